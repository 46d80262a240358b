//! # atbl
//!
//! Parser for ATBL, a line-oriented plain-text encoding of a table whose
//! cells hold raw bytes.
//!
//! ## Format
//!
//! ```text
//! ver 1            <- mandatory first line
//! rem comment      <- ignored
//! row              <- start a row
//! cel              <- start a cell in the current row
//! txt some text    <- append UTF-8 text to the current cell
//!     more text    <- continuation: append "\n" + "more text"
//! hex 00ff10       <- append hex-decoded bytes to the current cell
//! ```
//!
//! ## Usage Examples
//!
//! ```rust
//! use atbl::parse;
//!
//! let table = parse("ver 1\nrow\ncel\ntxt foo\n    bar\ncel\nhex 00ff").unwrap();
//! assert_eq!(table.row_count(), 1);
//! assert_eq!(table.cell(0, 0), Some(&b"foo\nbar"[..]));
//! assert_eq!(table.cell(0, 1), Some(&[0x00, 0xff][..]));
//! ```
//!
//! Malformed documents fail with an [`AtblError`] naming the line:
//!
//! ```rust
//! use atbl::{parse, AtblError};
//!
//! let err = parse("ver 1\ncel").unwrap_err();
//! assert_eq!(err, AtblError::UnstartedRow { line: 2 });
//! ```

/// Core parsing modules
pub mod core;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core parsing API
pub use crate::core::{
    cell_as_text, cell_display, cell_to_hex, decode_hex_fragment, decode_line, is_command, parse,
    parse_with_options, AtblParser, Cell, Command, ParseOptions, ParserState, Row, Table,
    VERSION_LINE,
};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{AtblError, ParseResult};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(table: &Table) -> Vec<Vec<String>> {
        table
            .rows()
            .iter()
            .map(|row| row.iter().map(|c| cell_as_text(c).into_owned()).collect())
            .collect()
    }

    #[test]
    fn test_text_cell() {
        let table = parse("ver 1\nrow\ncel\ntxt hello").unwrap();
        assert_eq!(cells(&table), vec![vec!["hello"]]);
    }

    #[test]
    fn test_hex_cell() {
        let table = parse("ver 1\nrow\ncel\nhex 68656c6c6f").unwrap();
        assert_eq!(table.cell(0, 0), Some(&[0x68, 0x65, 0x6c, 0x6c, 0x6f][..]));
        assert_eq!(table.cell(0, 0), Some(&b"hello"[..]));
    }

    #[test]
    fn test_continuation_line() {
        let table = parse("ver 1\nrow\ncel\ntxt foo\n    bar").unwrap();
        assert_eq!(table.cell(0, 0), Some(&b"foo\nbar"[..]));
    }

    #[test]
    fn test_new_row_closes_previous_row() {
        let table = parse("ver 1\nrow\ncel\ntxt a\ncel\ntxt b\nrow\ncel\ntxt c").unwrap();
        assert_eq!(cells(&table), vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn test_errors_name_their_line() {
        assert_eq!(parse("ver 2"), Err(AtblError::Version { line: 1 }));
        assert_eq!(
            parse("ver 1\ncel\ntxt x"),
            Err(AtblError::UnstartedRow { line: 2 })
        );
        assert!(matches!(
            parse("ver 1\nrow\ncel\nhex abc"),
            Err(AtblError::HexDecode { line: 4, .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), Err(AtblError::EmptyInput));
    }

    #[test]
    fn test_version_only_is_empty_table() {
        assert!(parse("ver 1").unwrap().is_empty());
        assert!(parse("ver 1\n").unwrap().is_empty());
        assert!(parse("ver 1\nrem nothing here").unwrap().is_empty());
    }

    #[test]
    fn test_with_options() {
        let input = "ver 1\r\nrow\r\ncel\r\ntxt a\r\n";
        assert_eq!(parse(input), Err(AtblError::Version { line: 1 }));

        let table = parse_with_options(input, &ParseOptions::lenient()).unwrap();
        assert_eq!(cells(&table), vec![vec!["a"]]);
    }
}
