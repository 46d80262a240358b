//! Parser configuration

/// Options controlling how a document is split into lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Remove one trailing `\r` from every line before decoding it,
    /// so documents with Windows line endings parse. When disabled the
    /// `\r` is part of the line content (and of any `txt` argument).
    pub strip_carriage_returns: bool,
}

impl ParseOptions {
    /// Lines are taken exactly as split on `\n`
    pub fn strict() -> Self {
        Self::default()
    }

    /// Accept `\r\n` line endings
    pub fn lenient() -> Self {
        Self {
            strip_carriage_returns: true,
        }
    }

    /// Apply line-level normalization to a raw line
    pub(crate) fn normalize_line<'a>(&self, line: &'a str) -> &'a str {
        if self.strip_carriage_returns {
            line.strip_suffix('\r').unwrap_or(line)
        } else {
            line
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(!ParseOptions::strict().strip_carriage_returns);
        assert!(ParseOptions::lenient().strip_carriage_returns);
        assert_eq!(ParseOptions::default(), ParseOptions::strict());
    }

    #[test]
    fn test_normalize_line() {
        assert_eq!(ParseOptions::strict().normalize_line("ver 1\r"), "ver 1\r");
        assert_eq!(ParseOptions::lenient().normalize_line("ver 1\r"), "ver 1");
        assert_eq!(ParseOptions::lenient().normalize_line("txt a\r\r"), "txt a\r");
    }
}
