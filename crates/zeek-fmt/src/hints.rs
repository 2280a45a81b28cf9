//! Layout hints carried per output fragment (spec §4.3 "Layout hints").
//!
//! Hints are advisory or binding signals the [`crate::stream::OutputStream`]
//! consults when deciding where to break a line; formatters attach them to
//! the bytes they write rather than deciding line breaks themselves.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Hints: u8 {
        /// Non-binding: when the line is already too long, prefer breaking
        /// before this fragment (`&&`/`||`/`+` in long chains).
        const GOOD_AFTER_LB = 0b0000_0001;
        /// Binding: never break immediately before this fragment.
        const NO_LB_BEFORE = 0b0000_0010;
        /// Binding: never break immediately after this fragment.
        const NO_LB_AFTER = 0b0000_0100;
        /// This fragment does not count toward line length (comments).
        const ZERO_WIDTH = 0b0000_1000;
        /// Signals a nested expression/block rendering in multi-line form.
        const COMPLEX_BLOCK = 0b0001_0000;
    }
}

impl Hints {
    pub const NONE: Hints = Hints::empty();
}
