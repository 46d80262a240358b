//! Line-by-line ATBL state machine

use log::{debug, trace};

use super::fragment::decode_hex_fragment;
use super::line::{decode_line, Command};
use super::options::ParseOptions;
use super::table::{Cell, Row, Table};
use crate::utils::error::{AtblError, ParseResult};

/// The only accepted version line
pub const VERSION_LINE: &str = "ver 1";

/// Where the state machine currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// No row is open
    NoRow,
    /// A row is open but has no cell under construction
    RowOpen,
    /// A row is open and a cell is under construction
    CellOpen,
}

/// ATBL document parser
///
/// Holds the table built so far plus the row and cell under
/// construction. [`AtblParser::parse`] consumes the parser, so one
/// instance parses exactly one document.
#[derive(Debug, Default)]
pub struct AtblParser {
    table: Table,
    current_row: Option<Row>,
    current_cell: Option<Cell>,
    options: ParseOptions,
}

impl AtblParser {
    /// Create a parser with the given options
    pub fn new(options: ParseOptions) -> Self {
        AtblParser {
            options,
            ..Default::default()
        }
    }

    pub fn state(&self) -> ParserState {
        match (&self.current_row, &self.current_cell) {
            (None, _) => ParserState::NoRow,
            (Some(_), None) => ParserState::RowOpen,
            (Some(_), Some(_)) => ParserState::CellOpen,
        }
    }

    /// Parse a whole document into a table
    pub fn parse(mut self, input: &str) -> ParseResult<Table> {
        if input.is_empty() {
            return Err(AtblError::EmptyInput);
        }

        let options = self.options.clone();
        let mut lines = input
            .split('\n')
            .map(|line| options.normalize_line(line))
            .zip(1..);
        debug!("parsing ATBL document ({} bytes)", input.len());

        if let Some((first, lineno)) = lines.next() {
            validate_version(first, lineno)?;
        }

        for (line, lineno) in lines {
            if line.is_empty() {
                continue;
            }

            let (command, arg) = decode_line(line, lineno)?;
            trace!("line {}: {} {:?}", lineno, command, arg);

            match command {
                Command::Rem => {}
                Command::Ver => return Err(AtblError::MisplacedVersion { line: lineno }),
                Command::Row => self.open_row(),
                Command::Cel => self.open_cell(lineno)?,
                Command::Txt => self.append_text(&arg, lineno)?,
                Command::Hex => self.append_hex(&arg, lineno)?,
            }
        }

        Ok(self.finish())
    }

    /// Close whatever is open and hand the table over
    pub(crate) fn finish(mut self) -> Table {
        self.close_row();
        debug!(
            "parsed ATBL table: {} rows, {} cells",
            self.table.row_count(),
            self.table.cell_count()
        );
        self.table
    }

    /// Start a new row, finishing the open one first
    pub(crate) fn open_row(&mut self) {
        self.close_row();
        self.current_row = Some(Row::new());
    }

    /// Move the open cell into the open row and the row into the table.
    /// Does nothing when no row is open.
    pub(crate) fn close_row(&mut self) {
        self.close_cell();
        if let Some(row) = self.current_row.take() {
            self.table.push_row(row);
        }
    }

    /// Start a new cell in the open row, finishing the open cell first
    pub(crate) fn open_cell(&mut self, lineno: usize) -> ParseResult<()> {
        if self.current_row.is_none() {
            return Err(AtblError::UnstartedRow { line: lineno });
        }
        self.close_cell();
        self.current_cell = Some(Cell::new());
        Ok(())
    }

    /// Move the open cell, if any, into the open row
    pub(crate) fn close_cell(&mut self) {
        if let (Some(cell), Some(row)) = (self.current_cell.take(), self.current_row.as_mut()) {
            row.push(cell);
        }
    }

    pub(crate) fn append_text(&mut self, arg: &str, lineno: usize) -> ParseResult<()> {
        self.cell_mut(lineno)?.extend_from_slice(arg.as_bytes());
        Ok(())
    }

    pub(crate) fn append_hex(&mut self, arg: &str, lineno: usize) -> ParseResult<()> {
        let cell = self.cell_mut(lineno)?;
        let bytes = decode_hex_fragment(arg)
            .map_err(|source| AtblError::HexDecode { line: lineno, source })?;
        cell.extend(bytes);
        Ok(())
    }

    fn cell_mut(&mut self, lineno: usize) -> ParseResult<&mut Cell> {
        self.current_cell
            .as_mut()
            .ok_or(AtblError::UninitializedCell { line: lineno })
    }
}

fn validate_version(line: &str, lineno: usize) -> ParseResult<()> {
    if line == VERSION_LINE {
        Ok(())
    } else {
        Err(AtblError::Version { line: lineno })
    }
}

/// Parse an ATBL document with default options
pub fn parse(input: &str) -> ParseResult<Table> {
    AtblParser::default().parse(input)
}

/// Parse an ATBL document with custom options
pub fn parse_with_options(input: &str, options: &ParseOptions) -> ParseResult<Table> {
    AtblParser::new(options.clone()).parse(input)
}
