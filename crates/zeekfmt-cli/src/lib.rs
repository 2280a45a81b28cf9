//! Shared logic behind the `zeek-format` and `zeek-script` binaries (spec §6).

pub mod commands;
pub mod discovery;

pub use commands::{cmd_format, cmd_parse, print_error};
