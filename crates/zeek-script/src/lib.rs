//! `Script`: the façade a caller actually touches (spec §6 "Programmatic
//! API"). Owns the source bytes and the built [`zeek_syntax::Tree`], and
//! exposes parse/format/dump/error-reporting without exposing the tree
//! builder or layout engine directly.

pub mod dump;
pub mod input;

use std::io::{self, Write};

use tree_sitter::Parser;

use zeek_common::error::{Error, FileError, ParseError};
use zeek_fmt::{dispatch, OutputStream};
use zeek_syntax::{build_tree, NodeId, Tree};

pub use input::Input;

/// A single Zeek script: its source bytes and the enriched tree built from
/// them.
pub struct Script {
    input: Option<Input>,
    source: Vec<u8>,
    tree: Option<Tree>,
}

impl Script {
    /// Construction does not read; call [`Script::parse`] first.
    pub fn new(input: Input) -> Self {
        Self {
            input: Some(input),
            source: Vec::new(),
            tree: None,
        }
    }

    /// Build a `Script` directly from an in-memory buffer, bypassing
    /// [`Input`] entirely. Convenient for tests and for the formatter's
    /// programmatic callers that already have bytes in hand.
    pub fn from_bytes(source: impl Into<Vec<u8>>) -> Self {
        Self {
            input: None,
            source: source.into(),
            tree: None,
        }
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Reads the source (if not already in hand), parses it, and builds the
    /// enriched tree. Returns `true` iff the tree has no `ERROR`/missing/
    /// has_error nodes anywhere.
    pub fn parse(&mut self) -> Result<bool, Error> {
        if let Some(input) = self.input.take() {
            self.source = input.read().map_err(Error::from)?;
        }

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_zeek::LANGUAGE.into())
            .map_err(|e| Error::from(ParseError::new(format!("grammar load failed: {e}"))))?;

        let ts_tree = parser
            .parse(&self.source, None)
            .ok_or_else(|| Error::from(ParseError::new("cannot parse script")))?;

        let tree = build_tree(ts_tree.root_node());
        self.tree = Some(tree);

        Ok(!self.has_error())
    }

    fn tree(&self) -> &Tree {
        self.tree
            .as_ref()
            .expect("Script::parse must be called before using the tree")
    }

    /// True when the tree contains any `ERROR` node, missing node, or
    /// `has_error` node (spec §6).
    pub fn has_error(&self) -> bool {
        let tree = self.tree();
        for (id, _) in dump::traverse(tree, tree.root(), false) {
            let node = tree.get(id);
            if node.is_error() || node.is_missing || node.has_error {
                return true;
            }
        }
        false
    }

    /// The offending line, its 0-based line number, and a message
    /// describing the first problem encountered in source order — the node
    /// that introduced the error, not one merely propagating `has_error`
    /// from a child (spec §6, §7).
    pub fn get_error(&self) -> Option<(String, usize, String)> {
        let tree = self.tree();
        for (id, _) in dump::traverse(tree, tree.root(), false) {
            let node = tree.get(id);
            let snippet = |max: usize| {
                let bytes = &self.source[node.span.start..node.span.end];
                if bytes.len() > max {
                    format!("{}[...]", String::from_utf8_lossy(&bytes[..max]))
                } else {
                    String::from_utf8_lossy(bytes).into_owned()
                }
            };

            let msg = if node.is_error() {
                format!(
                    "cannot parse line {}, col {}: \"{}\"",
                    node.start_point.row,
                    node.start_point.col,
                    snippet(50)
                )
            } else if node.is_missing {
                format!(
                    "missing grammar node \"{}\" on line {}, col {}",
                    node.kind, node.start_point.row, node.start_point.col
                )
            } else if node.has_error && !node.children.iter().any(|&c| tree.get(c).has_error) {
                format!(
                    "grammar node \"{}\" has error on line {}, col {}",
                    node.kind, node.start_point.row, node.start_point.col
                )
            } else {
                continue;
            };

            let line = self
                .source
                .split(|&b| b == b'\n')
                .nth(node.start_point.row)
                .map(|l| String::from_utf8_lossy(l).into_owned())
                .unwrap_or_default();

            return Some((line, node.start_point.row, msg));
        }
        None
    }

    /// Formats the script and writes the result to `sink` (a filename-opened
    /// file, an in-memory buffer, or anything else `Write`-able — mirrors
    /// `Script.format`'s flexible `output` argument).
    pub fn format(&self, sink: Box<dyn Write>, enable_linebreaks: bool) {
        let tree = self.tree();
        let out = OutputStream::new(sink, enable_linebreaks);
        let mut ctx = dispatch::FormatCtx::new(tree, &self.source, out);
        dispatch::format_child(&mut ctx, tree.root(), zeek_fmt::Hints::NONE);
        ctx.out.close();
    }

    /// Formats straight to standard output, routing a broken pipe to the
    /// null device instead of panicking (spec §7).
    pub fn format_to_stdout(&self, enable_linebreaks: bool) {
        let tree = self.tree();
        let out = OutputStream::to_stdout(enable_linebreaks);
        let mut ctx = dispatch::FormatCtx::new(tree, &self.source, out);
        dispatch::format_child(&mut ctx, tree.root(), zeek_fmt::Hints::NONE);
        ctx.out.close();
    }

    /// Writes the parse-tree dump (spec §6 "Parse-tree dump format").
    pub fn write_tree(&self, sink: &mut dyn Write, include_cst: bool) -> io::Result<()> {
        let tree = self.tree();
        for (id, nesting) in dump::traverse(tree, tree.root(), include_cst) {
            writeln!(sink, "{}", dump::node_str(tree, &self.source, id, nesting))?;
        }
        Ok(())
    }

    pub fn root(&self) -> NodeId {
        self.tree().root()
    }
}
