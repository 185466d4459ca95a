//! Purpose: Error model for engine failures surfaced through pooled parsers and scanners.
//! Exports: `Error`, `ErrorKind`, `categorize_message`.
//! Role: Single failure type returned by `json::Parser` and `json::Scanner`.
//! Invariants: Pools never construct errors; wrappers forward engine errors untouched.
//! Invariants: Category mapping is deterministic for a given serde_json error.
use std::error::Error as StdError;
use std::fmt;

use serde_json::error::Category;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Syntax,
    Data,
    Eof,
    Utf8,
    DepthLimit,
    NumericRange,
    Io,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax",
            ErrorKind::Data => "data",
            ErrorKind::Eof => "eof",
            ErrorKind::Utf8 => "utf8",
            ErrorKind::DepthLimit => "depth-limit",
            ErrorKind::NumericRange => "numeric-range",
            ErrorKind::Io => "io",
            ErrorKind::Unknown => "unknown",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    line: Option<usize>,
    column: Option<usize>,
    offset: Option<u64>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            line: None,
            column: None,
            offset: None,
            source: None,
        }
    }

    /// Categorises a serde_json failure and keeps it as the source.
    pub fn from_json(err: serde_json::Error) -> Self {
        let message = err.to_string();
        let kind = match categorize_message(&message) {
            ErrorKind::Unknown => match err.classify() {
                Category::Io => ErrorKind::Io,
                Category::Syntax => ErrorKind::Syntax,
                Category::Data => ErrorKind::Data,
                Category::Eof => ErrorKind::Eof,
            },
            refined => refined,
        };
        let mut error = Self::new(kind).with_message(message);
        if err.line() > 0 {
            error = error.with_position(err.line(), err.column());
        }
        error.with_source(err)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn column(&self) -> Option<usize> {
        self.column
    }

    /// Byte offset into the scanned input where the failing value started.
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.as_str())?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " (offset: {offset})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

/// Maps parser wording to a kind; `Unknown` when nothing specific matches.
pub fn categorize_message(message: &str) -> ErrorKind {
    let lower = message.to_ascii_lowercase();
    if lower.contains("recursion limit") {
        ErrorKind::DepthLimit
    } else if lower.contains("number out of range") {
        ErrorKind::NumericRange
    } else if lower.contains("utf-8")
        || lower.contains("utf8")
        || lower.contains("unicode code point")
    {
        ErrorKind::Utf8
    } else {
        ErrorKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, categorize_message};
    use std::error::Error as _;

    #[test]
    fn message_mapping_is_stable() {
        let cases = [
            ("recursion limit exceeded at line 1 column 129", ErrorKind::DepthLimit),
            ("number out of range at line 1 column 9", ErrorKind::NumericRange),
            ("invalid unicode code point at line 1 column 4", ErrorKind::Utf8),
            ("invalid UTF-8 in string", ErrorKind::Utf8),
            ("opaque parser issue", ErrorKind::Unknown),
        ];

        for (message, kind) in cases {
            assert_eq!(categorize_message(message), kind, "{message}");
        }
    }

    #[test]
    fn json_errors_keep_category_position_and_source() {
        let err = serde_json::from_str::<serde_json::Value>(r#"{"a":}"#).unwrap_err();
        let error = Error::from_json(err);
        assert_eq!(error.kind(), ErrorKind::Syntax);
        assert_eq!(error.line(), Some(1));
        assert!(error.column().is_some());
        assert!(error.source().is_some());

        let err = serde_json::from_str::<serde_json::Value>(r#"{"a":1"#).unwrap_err();
        assert_eq!(Error::from_json(err).kind(), ErrorKind::Eof);
    }

    #[test]
    fn display_includes_kind_message_and_offset() {
        let error = Error::new(ErrorKind::Syntax)
            .with_message("expected value")
            .with_offset(12);
        assert_eq!(error.to_string(), "syntax: expected value (offset: 12)");
        assert_eq!(Error::new(ErrorKind::Eof).to_string(), "eof");
    }
}
