//! Line decoding: command recognition and continuation lines

use std::borrow::Cow;
use std::fmt;

use phf::phf_map;

use crate::utils::error::{AtblError, ParseResult};

/// Prefix marking a continuation line
pub const CONTINUATION_PREFIX: &str = "    ";

/// Minimum length of a command line, in characters
pub const MIN_LINE_LEN: usize = 3;

/// The fixed ATBL command vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Version header, only legal on line 1
    Ver,
    /// Remark, ignored
    Rem,
    /// Start a new row
    Row,
    /// Start a new cell
    Cel,
    /// Append UTF-8 text to the current cell
    Txt,
    /// Append hex-decoded bytes to the current cell
    Hex,
}

static COMMANDS: phf::Map<&'static str, Command> = phf_map! {
    "ver" => Command::Ver,
    "rem" => Command::Rem,
    "row" => Command::Row,
    "cel" => Command::Cel,
    "txt" => Command::Txt,
    "hex" => Command::Hex,
};

impl Command {
    /// Look up a 3-character token (case-sensitive)
    pub fn from_token(token: &str) -> Option<Command> {
        COMMANDS.get(token).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Ver => "ver",
            Command::Rem => "rem",
            Command::Row => "row",
            Command::Cel => "cel",
            Command::Txt => "txt",
            Command::Hex => "hex",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a token is one of the ATBL commands
pub fn is_command(token: &str) -> bool {
    COMMANDS.contains_key(token)
}

/// Byte offset of the `n`th character of `s`, or `s.len()` if it has fewer
fn char_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(idx, _)| idx)
}

/// Decode a non-empty line into its command and argument.
///
/// A line starting with four spaces is a continuation line: it decodes
/// as `txt` whose argument is a newline followed by the rest of the line.
/// Otherwise the first three characters are the command token and the
/// argument starts at the fifth character; the separator in between is
/// not checked.
pub fn decode_line(line: &str, lineno: usize) -> ParseResult<(Command, Cow<'_, str>)> {
    if line.chars().take(MIN_LINE_LEN).count() < MIN_LINE_LEN {
        return Err(AtblError::LineTooShort { line: lineno });
    }

    if let Some(rest) = line.strip_prefix(CONTINUATION_PREFIX) {
        let mut arg = String::with_capacity(rest.len() + 1);
        arg.push('\n');
        arg.push_str(rest);
        return Ok((Command::Txt, Cow::Owned(arg)));
    }

    let token = &line[..char_offset(line, MIN_LINE_LEN)];
    let command = Command::from_token(token).ok_or_else(|| AtblError::UnknownCommand {
        line: lineno,
        token: token.to_string(),
    })?;

    let arg = &line[char_offset(line, MIN_LINE_LEN + 1)..];
    Ok((command, Cow::Borrowed(arg)))
}
