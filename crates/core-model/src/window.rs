//! `Window`: a view onto one `File`, plus everything that is per-view
//! rather than per-file — cursor, scroll offset, mark, minibar, and the
//! last search (spec §4.2).

use crate::layout::RegionId;
use core_state::FileId;
use core_text::Pos;
use std::collections::HashMap;

/// A block selection anchor. `end` is always the live cursor; `start` is
/// fixed at the moment the mark was toggled on (spec §4.3 "mark").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pub start: Pos,
}

/// Which minibar prompt, if any, is open (spec §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinibarMode {
    Inactive,
    Open,
    New,
    Command,
    Find,
}

#[derive(Debug, Clone)]
pub struct MinibarState {
    pub mode: MinibarMode,
    pub input: Vec<u8>,
    pub cursor: usize,
    /// Horizontal scroll offset of the minibar's own text entry, kept
    /// within the margins the same way a window's viewport is (spec §4.6).
    pub scroll: usize,
}

impl Default for MinibarState {
    fn default() -> Self {
        Self {
            mode: MinibarMode::Inactive,
            input: Vec::new(),
            cursor: 0,
            scroll: 0,
        }
    }
}

impl MinibarState {
    pub fn open(&mut self, mode: MinibarMode) {
        self.mode = mode;
        self.input.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    pub fn close(&mut self) {
        self.mode = MinibarMode::Inactive;
        self.input.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.mode, MinibarMode::Inactive)
    }
}

/// A transient status-bar error, cleared the next time the window does
/// something that succeeds (spec §4.6, §7).
#[derive(Debug, Clone)]
pub struct ErrorState {
    pub message: String,
}

/// State of an in-progress or last-completed in-file search (spec §4.6).
/// `origin` is the cursor position when find mode was entered: it both
/// seeds "the first match at or after the cursor" and is what Escape
/// restores.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub needle: Vec<u8>,
    pub matches: Vec<Pos>,
    pub origin: Pos,
    pub current_match: Option<Pos>,
    pub match_count: usize,
    pub match_index: usize,
}

/// The last keystroke this window processed, recorded so that some
/// bindings (the Ctrl-Delete "repeat unit" rule, spec §4.3) can look one
/// step back without threading extra state through the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastKeystroke {
    pub ctrl: bool,
    pub byte: Option<u8>,
}

/// Cursor, scroll offset, ideal column, mark, and last keystroke remembered
/// per file a window has ever shown, so switching back to a previously
/// viewed file restores exactly where the user left it (spec §3 "Window",
/// §4.2 "change_file").
#[derive(Debug, Clone, Copy)]
pub struct FileViewState {
    pub cursor: Pos,
    pub cursor_x_ideal: usize,
    pub offset: Pos,
    pub mark: Option<Mark>,
    pub previous_keystroke: Option<LastKeystroke>,
}

impl Default for FileViewState {
    fn default() -> Self {
        Self {
            cursor: Pos::origin(),
            cursor_x_ideal: 0,
            offset: Pos::origin(),
            mark: None,
            previous_keystroke: None,
        }
    }
}

/// One tiled view. Every field here is per-window, not per-file; a `File`
/// shown in two windows has two independent cursors (spec §3).
pub struct Window {
    pub file: FileId,
    pub region: RegionId,
    pub cursor: Pos,
    pub cursor_x_ideal: usize,
    pub offset: Pos,
    pub mark: Option<Mark>,
    pub minibar: MinibarState,
    pub error: Option<ErrorState>,
    pub search: Option<SearchState>,
    pub file_states: HashMap<FileId, FileViewState>,
    redraw: bool,
    pub previous_keystroke: Option<LastKeystroke>,
}

impl Window {
    /// A brand new window with no file bound yet (`FileId(0)` is filled in
    /// by `EditorModel` immediately after construction — the layout engine
    /// itself does not know about files).
    pub fn new(region: RegionId) -> Self {
        Self {
            file: FileId(0),
            region,
            cursor: Pos::origin(),
            cursor_x_ideal: 0,
            offset: Pos::origin(),
            mark: None,
            minibar: MinibarState::default(),
            error: None,
            search: None,
            file_states: HashMap::new(),
            redraw: true,
            previous_keystroke: None,
        }
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

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(ErrorState { message: message.into() });
        self.mark_dirty();
    }

    pub fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Snapshot the current cursor/offset under `self.file`, then either
    /// restore the saved state for `new_file` or start it fresh at the
    /// origin (spec §4.2 "change_file").
    pub fn change_file(&mut self, new_file: FileId) {
        self.file_states.insert(
            self.file,
            FileViewState {
                cursor: self.cursor,
                cursor_x_ideal: self.cursor_x_ideal,
                offset: self.offset,
                mark: self.mark,
                previous_keystroke: self.previous_keystroke,
            },
        );

        let restored = self.file_states.remove(&new_file).unwrap_or_default();
        self.cursor = restored.cursor;
        self.cursor_x_ideal = restored.cursor_x_ideal;
        self.offset = restored.offset;
        self.mark = restored.mark;
        self.previous_keystroke = restored.previous_keystroke;
        self.file = new_file;
        self.search = None;
        self.clear_error();
        self.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // `RegionId` has no public constructor (by design — only `Layout` mints
    // them), so tests borrow the id `Layout` hands out for its first region.
    fn test_region_id() -> RegionId {
        let layout = crate::layout::Layout::new(80, 24);
        layout.root()
    }

    #[test]
    fn change_file_starts_fresh_for_unseen_file() {
        let mut w = Window::new(test_region_id());
        w.cursor = Pos::new(3, 4);
        w.change_file(FileId(1));
        assert_eq!(w.cursor, Pos::origin());
        assert_eq!(w.file, FileId(1));
    }

    #[test]
    fn change_file_restores_previously_seen_state() {
        let mut w = Window::new(test_region_id());
        w.cursor = Pos::new(3, 4);
        w.cursor_x_ideal = 4;
        w.change_file(FileId(1));
        w.cursor = Pos::new(9, 9);
        w.change_file(FileId(0));
        assert_eq!(w.cursor, Pos::new(3, 4));
        assert_eq!(w.cursor_x_ideal, 4);
    }

    #[test]
    fn change_file_clears_mark_and_search() {
        let mut w = Window::new(test_region_id());
        w.mark = Some(Mark { start: Pos::origin() });
        w.search = Some(SearchState {
            needle: b"x".to_vec(),
            matches: Vec::new(),
            origin: Pos::origin(),
            current_match: None,
            match_count: 0,
            match_index: 0,
        });
        w.change_file(FileId(1));
        assert!(w.mark.is_none());
        assert!(w.search.is_none());
    }
}
