//! Where a [`crate::Script`]'s source bytes come from (spec §6 "Programmatic
//! API": `Script::new(source: Input)`).

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use zeek_common::error::FileError;

/// A source for a [`crate::Script`]. Construction never reads; the bytes are
/// pulled lazily by `Script::parse`.
pub enum Input {
    /// A file on disk.
    Path(PathBuf),
    /// Standard input, selected by filename `"-"` or by omitting a filename.
    Stdin,
    /// An arbitrary byte source, e.g. an in-memory buffer in a test.
    Reader(Box<dyn Read>),
}

impl Input {
    /// `"-"` means stdin; anything else is a path, matching the CLI's
    /// filename convention.
    pub fn from_name(name: &str) -> Self {
        if name == "-" {
            Input::Stdin
        } else {
            Input::Path(PathBuf::from(name))
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Input::Path(path.into())
    }

    pub fn from_reader(reader: impl Read + 'static) -> Self {
        Input::Reader(Box::new(reader))
    }

    pub fn read(self) -> Result<Vec<u8>, FileError> {
        let bytes = match self {
            Input::Path(path) => {
                fs::read(&path).map_err(|e| FileError::new(format!("{}: {e}", path.display())))?
            }
            Input::Stdin => {
                let mut buf = Vec::new();
                io::stdin()
                    .read_to_end(&mut buf)
                    .map_err(|e| FileError::new(e.to_string()))?;
                buf
            }
            Input::Reader(mut reader) => {
                let mut buf = Vec::new();
                reader
                    .read_to_end(&mut buf)
                    .map_err(|e| FileError::new(e.to_string()))?;
                buf
            }
        };
        Ok(normalize_crlf(bytes))
    }

    /// Display name for diagnostics; stdin renders as `"-"`.
    pub fn display_name(&self) -> String {
        match self {
            Input::Path(path) => path.display().to_string(),
            Input::Stdin => "-".to_string(),
            Input::Reader(_) => "<reader>".to_string(),
        }
    }
}

/// `\r\n` is normalized on input (spec §3 "Source buffer"), so every
/// downstream byte offset is computed against a single newline convention
/// regardless of how the source file was saved.
fn normalize_crlf(bytes: Vec<u8>) -> Vec<u8> {
    if !bytes.windows(2).any(|w| w == b"\r\n") {
        return bytes;
    }
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
            out.push(b'\n');
            i += 2;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_is_normalized_to_lf() {
        assert_eq!(normalize_crlf(b"global foo = 1;\r\n\r\n".to_vec()), b"global foo = 1;\n\n");
    }

    #[test]
    fn lone_cr_is_left_alone() {
        assert_eq!(normalize_crlf(b"a\rb\r\nc".to_vec()), b"a\rb\nc");
    }

    #[test]
    fn lf_only_input_is_unchanged() {
        assert_eq!(normalize_crlf(b"a\nb\n".to_vec()), b"a\nb\n");
    }
}
