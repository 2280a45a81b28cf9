//! Shared types for the zeek-fmt workspace: byte spans, line indexing, and
//! the error taxonomy used by [`zeek_script`] and the CLI.

pub mod error;
pub mod span;

pub use error::{Error, FileError, ParseError};
pub use span::{LineIndex, Point, Span};
