use std::fmt;

use serde::Serialize;

/// The error taxonomy for the zeek-fmt core (spec §7).
///
/// `FileError` and `ParseError` are the two conditions that abort formatting
/// outright; in-tree `ERROR`/`is_missing`/`has_error` nodes do not produce an
/// `Error` at all — they're surfaced via `Script::has_error`/`get_error` and
/// handled by [`zeek_fmt`'s error-preserving formatter](../zeek_fmt/index.html).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Error {
    /// The source file could not be read.
    File(FileError),
    /// The parser returned no usable tree at all.
    Parse(ParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<FileError> for Error {
    fn from(e: FileError) -> Self {
        Self::File(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

/// The source file could not be read (permissions, missing file, bad UTF-8
/// coercion on a non-file-like reader, etc).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileError {
    pub message: String,
}

impl FileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FileError {}

/// A hard parse error: the parser produced no tree at all, as distinct from a
/// tree that merely contains `ERROR`/missing/has_error nodes (those are
/// handled without raising).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseError {
    pub message: String,
    /// The full source line the error occurred on, when known.
    pub line: Option<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }

    pub fn with_line(message: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: Some(line.into()),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_error_displays_message() {
        let err = FileError::new("permission denied");
        assert_eq!(err.to_string(), "permission denied");
    }

    #[test]
    fn parse_error_without_line() {
        let err = ParseError::new("cannot parse script");
        assert_eq!(err.to_string(), "cannot parse script");
        assert_eq!(err.line, None);
    }

    #[test]
    fn parse_error_with_line() {
        let err = ParseError::with_line("cannot parse line 0, col 0: \"xxx\"", "xxx  function foo() { }");
        assert_eq!(err.line.as_deref(), Some("xxx  function foo() { }"));
    }

    #[test]
    fn error_from_conversions() {
        let file_err: Error = FileError::new("oops").into();
        assert!(matches!(file_err, Error::File(_)));

        let parse_err: Error = ParseError::new("oops").into();
        assert!(matches!(parse_err, Error::Parse(_)));
    }
}
