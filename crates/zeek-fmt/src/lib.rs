//! The layout engine: dispatch from grammar symbol to layout rule, the
//! concrete per-symbol rules, and the hint-resolving output stream they all
//! write through (spec §4).

pub mod comments;
pub mod decls;
pub mod dispatch;
pub mod error;
pub mod exprs;
pub mod hints;
pub mod stmts;
pub mod stream;
pub mod types;

pub use dispatch::{format_child, format_children, format_node, FormatCtx};
pub use hints::Hints;
pub use stream::OutputStream;
