//! Lines: the leaf data structure of the buffer model.
//!
//! A `Line` is a byte sequence plus a parallel per-byte color-class sequence
//! and a redraw flag (spec §3). Mutation only ever happens through the
//! methods here; the owning `File` (in `core-state`) is responsible for
//! keeping the line count invariant (`|lines| >= 1`) and for re-highlighting
//! after structural edits.
//!
//! This crate deliberately treats every byte as one terminal cell: no
//! grapheme clustering, no wide-character accounting. That is a scope
//! boundary carried over from the source system (spec §1, §9), not an
//! oversight.

pub mod highlight;

/// A cursor-like (column, line) pair. Used for cursor, mark, and scroll
/// offset coordinates throughout the workspace so every crate agrees on
/// what "x" and "y" mean: `x` is a byte column, `y` is a line index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub const fn origin() -> Self {
        Self { x: 0, y: 0 }
    }
}

/// Semantic color bucket for a single byte. The renderer maps these onto a
/// theme's RGB palette (spec §4.4); this crate only knows the classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    Normal,
    Comment,
    Keyword,
    String,
    Char,
    Number,
}

/// Minimum leaf geometry enforced by the layout engine (spec §4.1).
pub const WINDOW_MIN_WIDTH: u16 = 40;
pub const WINDOW_MIN_HEIGHT: u16 = 10;

/// Indentation unit used by smart-indent and the non-ctrl word-delete rule
/// (spec §4.3).
pub const SPACES_PER_TAB: usize = 2;

/// Cursor/scroll margins (spec §4.2).
pub const LEFT_MARGIN: usize = 6;
pub const RIGHT_MARGIN: usize = 6;
pub const TOP_MARGIN: usize = 6;
pub const BOTTOM_MARGIN: usize = 6;

/// Status bar layout constants (spec §4.4).
///
/// Minimum distance kept between the minibar's own cursor and either edge
/// of the scrolled window the status bar gives its typed input.
pub const BAR_LEFT_MARGIN: usize = 4;
pub const BAR_RIGHT_MARGIN: usize = 4;
/// Widest a file path is allowed to print on the status bar before it is
/// truncated (with a leading ellipsis, keeping the tail of the path).
pub const MINIBAR_MAX_PATH_WIDTH: usize = 30;
/// Blank cells between the line-number gutter and the first column of text.
pub const EDITOR_LINE_NUMBER_MARGIN: usize = 2;

/// A single line of a `File`: bytes, parallel colors, and a dirty flag.
///
/// Invariant: `colors.len()` is either `0` (never highlighted) or equal to
/// `chars.len()`. The renderer must only consult `colors` when the owning
/// file has a highlighter bound (spec §3 Line invariant).
#[derive(Debug, Clone)]
pub struct Line {
    chars: Vec<u8>,
    colors: Vec<ColorClass>,
    redraw: bool,
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Line {
    pub fn new() -> Self {
        Self {
            chars: Vec::new(),
            colors: Vec::new(),
            redraw: true,
        }
    }

    pub fn from_bytes(chars: Vec<u8>) -> Self {
        Self {
            chars,
            colors: Vec::new(),
            redraw: true,
        }
    }

    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn colors(&self) -> &[ColorClass] {
        &self.colors
    }

    pub fn redraw(&self) -> bool {
        self.redraw
    }

    pub fn mark_dirty(&mut self) {
        self.redraw = true;
    }

    pub fn clear_dirty(&mut self) {
        self.redraw = false;
    }

    /// Sets the per-byte color sequence. Must be called with a vector whose
    /// length equals `self.len()`; this is the only way `colors` becomes
    /// non-empty.
    pub fn set_colors(&mut self, colors: Vec<ColorClass>) {
        debug_assert_eq!(colors.len(), self.chars.len());
        self.colors = colors;
    }

    /// Invalidates cached colors (e.g. the owning file lost its highlighter
    /// binding, or this line no longer matches the last highlight pass).
    pub fn clear_colors(&mut self) {
        self.colors.clear();
    }

    /// Insert one byte at `at` (byte offset, 0..=len). Marks the line dirty.
    pub fn insert_byte(&mut self, at: usize, b: u8) {
        self.chars.insert(at, b);
        self.clear_colors();
        self.redraw = true;
    }

    /// Delete the byte at `at`. Marks the line dirty. Panics if out of
    /// bounds; callers clamp first.
    pub fn delete_byte(&mut self, at: usize) -> u8 {
        let b = self.chars.remove(at);
        self.clear_colors();
        self.redraw = true;
        b
    }

    /// Split this line at `at`: `self` keeps `[0, at)`, the tail `[at, len)`
    /// is returned as a freshly created `Line`. Both are marked dirty.
    pub fn split_off(&mut self, at: usize) -> Line {
        let tail_chars = self.chars.split_off(at);
        self.clear_colors();
        self.redraw = true;
        let mut tail = Line::from_bytes(tail_chars);
        tail.redraw = true;
        tail
    }

    /// Append another line's bytes onto the end of this one (used when
    /// merging lines, e.g. backspace at column 0). Marks the line dirty;
    /// the other line is consumed.
    pub fn append(&mut self, mut other: Line) {
        self.chars.append(&mut other.chars);
        self.clear_colors();
        self.redraw = true;
    }

    /// Number of leading space (0x20) bytes.
    pub fn leading_space_count(&self) -> usize {
        self.chars.iter().take_while(|&&b| b == b' ').count()
    }

    /// Byte at `idx`, if any.
    pub fn byte_at(&self, idx: usize) -> Option<u8> {
        self.chars.get(idx).copied()
    }

    /// Insert a slice of bytes at `at`, splitting on `\n` so a multi-line
    /// paste can be expressed as a sequence of line operations by the
    /// caller. This helper itself only inserts a single-line slice (no
    /// embedded `\n`); callers are responsible for splitting first (see
    /// `core_actions::edit::paste`).
    pub fn insert_slice(&mut self, at: usize, bytes: &[u8]) {
        self.chars.splice(at..at, bytes.iter().copied());
        self.clear_colors();
        self.redraw = true;
    }
}

/// Classification of a contiguous byte run, used by word/unit deletion
/// (spec §4.3) and smart-indent brace detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunClass {
    Space,
    Identifier,
    Other,
}

pub fn classify_byte(b: u8) -> RunClass {
    if b == b' ' {
        RunClass::Space
    } else if b.is_ascii_alphanumeric() || b == b'_' {
        RunClass::Identifier
    } else {
        RunClass::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_delete_round_trip() {
        let mut l = Line::new();
        for (i, b) in b"hello".iter().enumerate() {
            l.insert_byte(i, *b);
        }
        assert_eq!(l.chars(), b"hello");
        l.delete_byte(4);
        assert_eq!(l.chars(), b"hell");
    }

    #[test]
    fn split_and_append_are_inverse() {
        let mut l = Line::from_bytes(b"hello world".to_vec());
        let tail = l.split_off(5);
        assert_eq!(l.chars(), b"hello");
        assert_eq!(tail.chars(), b" world");
        l.append(tail);
        assert_eq!(l.chars(), b"hello world");
    }

    #[test]
    fn leading_space_count_counts_only_leading_run() {
        let l = Line::from_bytes(b"    foo  ".to_vec());
        assert_eq!(l.leading_space_count(), 4);
    }

    #[test]
    fn colors_invariant_length() {
        let mut l = Line::from_bytes(b"abc".to_vec());
        assert!(l.colors().is_empty());
        l.set_colors(vec![ColorClass::Normal; 3]);
        assert_eq!(l.colors().len(), l.len());
        l.insert_byte(0, b'x');
        assert!(l.colors().is_empty(), "structural edit invalidates colors");
    }

    #[test]
    fn classify_byte_buckets() {
        assert_eq!(classify_byte(b' '), RunClass::Space);
        assert_eq!(classify_byte(b'a'), RunClass::Identifier);
        assert_eq!(classify_byte(b'_'), RunClass::Identifier);
        assert_eq!(classify_byte(b'{'), RunClass::Other);
    }
}

#[cfg(test)]
mod proptest_line {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// `split_off` followed by `append` must reconstruct the original
        /// bytes exactly, for any split point in range (spec §4.3's
        /// insert_newline relies on this being lossless).
        #[test]
        fn split_then_append_round_trips(
            bytes in proptest::collection::vec(any::<u8>(), 0..64),
            at in 0usize..65,
        ) {
            let at = at.min(bytes.len());
            let mut line = Line::from_bytes(bytes.clone());
            let tail = line.split_off(at);
            line.append(tail);
            prop_assert_eq!(line.chars(), bytes.as_slice());
        }

        /// `leading_space_count` never exceeds the line length and always
        /// equals the length of the literal run of 0x20 bytes at the start.
        #[test]
        fn leading_space_count_matches_manual_scan(
            bytes in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let line = Line::from_bytes(bytes.clone());
            let expected = bytes.iter().take_while(|&&b| b == b' ').count();
            prop_assert_eq!(line.leading_space_count(), expected);
            prop_assert!(line.leading_space_count() <= line.len());
        }
    }
}
