//! ATBL diagnostics
//!
//! This module turns parse errors into readable reports and looks for
//! constructs that parse but are probably not what the author meant:
//!
//! - Parse errors (always fatal, at most one per document)
//! - Carriage returns that end up inside cell content
//! - Arguments given to `row` / `cel`, which are ignored
//!
//! ## Example
//!
//! ```rust
//! use atbl::diagnostics::check_atbl;
//! use atbl::ParseOptions;
//!
//! let result = check_atbl("ver 1\ncel", &ParseOptions::default());
//! assert!(result.has_errors());
//! ```

use std::fmt;

use crate::core::{decode_line, parse_with_options, Command, ParseOptions, Table};
use crate::utils::error::AtblError;

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";

/// Diagnostic severity level, most severe last
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Info,
    /// The document parses but may not mean what it says
    Warning,
    /// The document does not parse
    Error,
}

impl DiagnosticLevel {
    /// Most severe first, the order used in summaries
    const BY_SEVERITY: [DiagnosticLevel; 3] = [
        DiagnosticLevel::Error,
        DiagnosticLevel::Warning,
        DiagnosticLevel::Info,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DiagnosticLevel::Info => "info",
            DiagnosticLevel::Warning => "warning",
            DiagnosticLevel::Error => "error",
        }
    }

    /// Noun used when counting diagnostics of this level
    fn noun(self) -> &'static str {
        match self {
            DiagnosticLevel::Info => "note",
            level => level.label(),
        }
    }

    /// ANSI escape that starts this level's terminal colour
    pub fn ansi_color(self) -> &'static str {
        match self {
            DiagnosticLevel::Info => "\x1b[34m",
            DiagnosticLevel::Warning => "\x1b[33m",
            DiagnosticLevel::Error => "\x1b[31m",
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One finding about a document, optionally pinned to a source line
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    /// 1-indexed line the finding refers to
    pub line: Option<usize>,
    /// That line, with control characters escaped
    pub snippet: Option<String>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            snippet: None,
            help: None,
        }
    }

    /// Pin the diagnostic to `line`, quoting `text` as its content
    pub fn at_line(mut self, line: usize, text: &str) -> Self {
        self.line = Some(line);
        self.snippet = Some(text.escape_debug().to_string());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Error diagnostic for a failed parse of `input`
    pub fn from_error(err: &AtblError, input: &str) -> Self {
        let mut diag = Diagnostic::new(DiagnosticLevel::Error, err.to_string());
        if let Some(line) = err.line() {
            let text = input.split('\n').nth(line - 1).unwrap_or_default();
            diag = diag.at_line(line, text);
        }
        if let Some(help) = err.suggestion() {
            diag = diag.with_help(help);
        }
        diag
    }
}

impl fmt::Display for Diagnostic {
    /// ```text
    /// error: message
    ///   --> line N
    ///   | source line
    ///   = help: hint
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;
        if let Some(line) = self.line {
            write!(f, "\n  --> line {}", line)?;
        }
        if let Some(snippet) = &self.snippet {
            write!(f, "\n  | {}", snippet)?;
        }
        if let Some(help) = &self.help {
            write!(f, "\n  = help: {}", help)?;
        }
        Ok(())
    }
}

/// Everything `check_atbl` found, plus the table when parsing succeeded
#[derive(Debug, Default)]
pub struct CheckResult {
    pub diagnostics: Vec<Diagnostic>,
    pub table: Option<Table>,
}

impl CheckResult {
    fn push(&mut self, diag: Diagnostic) {
        self.diagnostics.push(diag);
    }

    fn of_level(&self, level: DiagnosticLevel) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.level == level)
    }

    /// Number of diagnostics at `level`
    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.of_level(level).count()
    }

    /// Rendered diagnostics at `level`, in document order
    pub fn messages(&self, level: DiagnosticLevel) -> Vec<String> {
        self.of_level(level).map(Diagnostic::to_string).collect()
    }

    pub fn has_errors(&self) -> bool {
        self.count(DiagnosticLevel::Error) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Most severe level present, if any
    pub fn worst(&self) -> Option<DiagnosticLevel> {
        self.diagnostics.iter().map(|d| d.level).max()
    }

    /// One-line summary: table shape (when parsed) and counts per level
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(table) = &self.table {
            parts.push(counted(table.row_count(), "row"));
            parts.push(counted(table.cell_count(), "cell"));
            parts.push(counted(table.byte_count(), "byte"));
        }
        for level in DiagnosticLevel::BY_SEVERITY {
            match self.count(level) {
                0 => {}
                n => parts.push(counted(n, level.noun())),
            }
        }
        if self.is_empty() {
            parts.push("no issues found".to_string());
        }
        parts.join(", ")
    }
}

fn counted(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

/// Check an ATBL document for errors and suspicious constructs
pub fn check_atbl(input: &str, options: &ParseOptions) -> CheckResult {
    let mut result = CheckResult::default();

    match parse_with_options(input, options) {
        Ok(table) => result.table = Some(table),
        Err(err) => result.push(Diagnostic::from_error(&err, input)),
    }

    check_lines(input, options, &mut result);

    result
}

/// Line-level lints. Lines that fail to decode are skipped here since
/// the parse error already covers them.
fn check_lines(input: &str, options: &ParseOptions, result: &mut CheckResult) {
    for (lineno, raw) in input.split('\n').enumerate().skip(1).map(|(i, l)| (i + 1, l)) {
        if !options.strip_carriage_returns && raw.ends_with('\r') {
            result.push(
                Diagnostic::new(DiagnosticLevel::Warning, "line ends with a carriage return")
                    .at_line(lineno, raw)
                    .with_help("the `\\r` is kept as content; enable lenient line endings to strip it"),
            );
        }

        let line = options.normalize_line(raw);
        if line.is_empty() {
            continue;
        }
        if let Ok((command @ (Command::Row | Command::Cel), arg)) = decode_line(line, lineno) {
            if !arg.is_empty() {
                result.push(
                    Diagnostic::new(
                        DiagnosticLevel::Info,
                        format!("argument to `{}` is ignored", command),
                    )
                    .at_line(lineno, line),
                );
            }
        }
    }
}

/// Render a check result as a report, one block per diagnostic followed
/// by the summary line. With `use_color`, each block takes its level's
/// colour and the summary takes the worst level's (green when clean).
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let paint = |color: &str, text: String| {
        if use_color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text
        }
    };

    let mut output = String::new();
    for diag in &result.diagnostics {
        output.push_str(&paint(diag.level.ansi_color(), diag.to_string()));
        output.push_str("\n\n");
    }

    let summary_color = result.worst().map_or(GREEN, DiagnosticLevel::ansi_color);
    output.push_str(&paint(summary_color, format!("Summary: {}", result.summary())));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_document_has_no_issues() {
        let result = check_atbl("ver 1\nrow\ncel\ntxt hi", &ParseOptions::default());
        assert!(result.is_empty());
        assert!(!result.has_errors());
        assert_eq!(result.worst(), None);
        assert_eq!(result.table.as_ref().map(Table::row_count), Some(1));
        assert_eq!(
            result.summary(),
            "1 row, 1 cell, 2 bytes, no issues found"
        );
    }

    #[test]
    fn test_parse_error_becomes_diagnostic() {
        let result = check_atbl("ver 1\ncel\ntxt x", &ParseOptions::default());
        assert!(result.has_errors());
        assert!(result.table.is_none());

        let diag = &result.diagnostics[0];
        assert_eq!(diag.line, Some(2));
        assert_eq!(diag.snippet.as_deref(), Some("cel"));
        assert!(diag.help.is_some());
    }

    #[test]
    fn test_empty_input_diagnostic_has_no_line() {
        let result = check_atbl("", &ParseOptions::default());
        assert_eq!(result.count(DiagnosticLevel::Error), 1);
        assert_eq!(result.diagnostics[0].line, None);
        assert_eq!(result.diagnostics[0].snippet, None);
    }

    #[test]
    fn test_carriage_return_warning() {
        let input = "ver 1\nrow\r\ncel\ntxt a\r";
        let strict = check_atbl(input, &ParseOptions::strict());
        // `row\r` still decodes as `row` with an empty argument
        assert_eq!(strict.count(DiagnosticLevel::Warning), 2);
        assert_eq!(strict.diagnostics[0].snippet.as_deref(), Some("row\\r"));
        assert!(!strict.has_errors());
        assert_eq!(strict.summary(), "1 row, 1 cell, 2 bytes, 2 warnings");

        let lenient = check_atbl(input, &ParseOptions::lenient());
        assert_eq!(lenient.count(DiagnosticLevel::Warning), 0);
    }

    #[test]
    fn test_ignored_argument_note() {
        let result = check_atbl("ver 1\nrow header\ncel name\ntxt x", &ParseOptions::default());
        assert_eq!(result.count(DiagnosticLevel::Info), 2);
        assert_eq!(result.worst(), Some(DiagnosticLevel::Info));
        assert!(!result.has_errors());

        let messages = result.messages(DiagnosticLevel::Info);
        assert!(messages[0].contains("argument to `row` is ignored"));
        assert!(messages[1].contains("argument to `cel` is ignored"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(DiagnosticLevel::Error, "bad thing")
            .at_line(3, "hex abc")
            .with_help("fix it");
        assert_eq!(
            diag.to_string(),
            "error: bad thing\n  --> line 3\n  | hex abc\n  = help: fix it"
        );
    }

    #[test]
    fn test_format_diagnostics_plain() {
        let result = check_atbl("ver 2", &ParseOptions::default());
        let output = format_diagnostics(&result, false);
        assert!(output.contains("error: Line 1"));
        assert!(output.ends_with("Summary: 1 error"));
        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn test_format_diagnostics_colored() {
        let failed = format_diagnostics(&check_atbl("ver 2", &ParseOptions::default()), true);
        assert!(failed.starts_with("\x1b[31merror: "));
        assert!(failed.ends_with("\x1b[31mSummary: 1 error\x1b[0m"));

        let clean = format_diagnostics(&check_atbl("ver 1", &ParseOptions::default()), true);
        assert_eq!(clean, "\x1b[32mSummary: 0 rows, 0 cells, 0 bytes, no issues found\x1b[0m");

        let noted = format_diagnostics(&check_atbl("ver 1\nrow x", &ParseOptions::default()), true);
        assert!(noted.starts_with("\x1b[34minfo: "));
        assert!(noted.ends_with("\x1b[34mSummary: 1 row, 0 cells, 0 bytes, 1 note\x1b[0m"));
    }
}
