//! The editor model: the layout engine, the file table, and the clipboard,
//! wired together behind one API (spec §3, §4.1, §4.2).
//!
//! This crate owns no keystroke handling and no rendering; `core-actions`
//! dispatches commands against it and `core-render` reads it to draw a
//! frame. It exists so those two crates share one consistent view of
//! "what windows exist, what do they show, and what is focused" without
//! either of them reimplementing the arena bookkeeping.

pub mod layout;
pub mod window;

pub use layout::{Layout, Region, RegionId, RegionNode, WindowId};
pub use window::{ErrorState, FileViewState, LastKeystroke, Mark, MinibarMode, MinibarState, SearchState, Window};

use core_state::{Clipboard, EditorError, File, FileId, FileTable};

/// Ties a `FileTable`, a `Layout` of windows/regions, and a `Clipboard`
/// into the one piece of state `core-actions` mutates and `core-render`
/// reads each frame.
pub struct EditorModel {
    files: FileTable,
    layout: Layout,
    clipboard: Clipboard,
}

impl EditorModel {
    /// A fresh editor with a single untitled window filling `width x height`.
    pub fn new(width: u16, height: u16) -> Self {
        let mut files = FileTable::new();
        let file_id = files.create_path(b"");
        let mut layout = Layout::new(width, height);
        let focus = layout.focus();
        layout.window_mut(focus).file = file_id;
        Self {
            files,
            layout,
            clipboard: Clipboard::new(),
        }
    }

    pub fn files(&self) -> &FileTable {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut FileTable {
        &mut self.files
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut Clipboard {
        &mut self.clipboard
    }

    pub fn focused_window(&self) -> WindowId {
        self.layout.focus()
    }

    /// Disjoint mutable access to a window and the file it shows —
    /// `core-actions`' editing primitives need both at once, and since
    /// they live behind two separate fields this is ordinary safe Rust,
    /// not aliasing through one `&mut self`.
    pub fn window_and_file_mut(&mut self, window: WindowId) -> (&mut Window, &mut File) {
        let file_id = self.layout.window(window).file;
        (self.layout.window_mut(window), self.files.get_mut(file_id))
    }

    pub fn window_and_file(&self, window: WindowId) -> (&Window, &File) {
        let file_id = self.layout.window(window).file;
        (self.layout.window(window), self.files.get(file_id))
    }

    /// Disjoint mutable access to a window, its file, and the clipboard —
    /// for cut/paste, which touch all three.
    pub fn window_file_clipboard_mut(&mut self, window: WindowId) -> (&mut Window, &mut File, &mut Clipboard) {
        let file_id = self.layout.window(window).file;
        (
            self.layout.window_mut(window),
            self.files.get_mut(file_id),
            &mut self.clipboard,
        )
    }

    /// Open `path` in the focused window, reusing an already-open `File`
    /// for the same byte-equal path (spec §3 "open"). On failure the
    /// window keeps showing whatever it showed before and records the
    /// error for the status bar (spec §7).
    pub fn open_file(&mut self, path: &[u8]) -> Result<FileId, EditorError> {
        let result = self.files.open_path(path);
        let focus = self.layout.focus();
        match result {
            Ok(file_id) => {
                self.layout.window_mut(focus).change_file(file_id);
                Ok(file_id)
            }
            Err(err) => {
                // Spec §4.6/S6: every open failure, regardless of the
                // underlying error kind, surfaces the fixed
                // "can not open file <path>" wording — not the kind-specific
                // `Display` (e.g. `InvalidLineEnding`'s own message).
                self.layout
                    .window_mut(focus)
                    .set_error(EditorError::FileOpenFailed(path.to_vec()).to_string());
                Err(err)
            }
        }
    }

    /// Create (or switch to, if already present) an untitled/new file at
    /// `path` in the focused window (spec §4.6 "new" prompt).
    pub fn create_file(&mut self, path: &[u8]) -> FileId {
        let file_id = self.files.create_path(path);
        let focus = self.layout.focus();
        self.layout.window_mut(focus).change_file(file_id);
        file_id
    }

    /// Save the file shown in the focused window.
    pub fn save_focused(&mut self) -> Result<(), EditorError> {
        let focus = self.layout.focus();
        let file_id = self.layout.window(focus).file;
        let result = self.files.save(file_id);
        if let Err(ref err) = result {
            self.layout.window_mut(focus).set_error(err.to_string());
        }
        result
    }

    /// Split the focused window. The new window gets a freshly allocated,
    /// untitled empty file of its own (spec §4.1 "a freshly allocated empty
    /// Window") rather than sharing the split window's file; focus stays on
    /// the original window. Returns the new window's id.
    pub fn split_focused(&mut self, stacked: bool) -> WindowId {
        let focus = self.layout.focus();
        let new_window = self.layout.split(focus, stacked);
        let new_file = self.files.create_path(b"");
        self.layout.window_mut(new_window).file = new_file;
        new_window
    }

    /// Close the focused window. Closing the last window in the layout is
    /// a no-op (spec §4.1 "remove" on the root).
    pub fn close_focused(&mut self) -> bool {
        let focus = self.layout.focus();
        self.layout.remove(focus)
    }

    pub fn focus_next(&mut self) {
        let focus = self.layout.focus();
        let next = self.layout.focus_next(focus);
        self.layout.set_focus(next);
    }

    pub fn focus_previous(&mut self) {
        let focus = self.layout.focus();
        let prev = self.layout.focus_previous(focus);
        self.layout.set_focus(prev);
    }

    pub fn swap_focused(&mut self) {
        let focus = self.layout.focus();
        self.layout.swap(focus);
    }

    pub fn resize_focused(&mut self, amount: i32) {
        let focus = self.layout.focus();
        self.layout.resize(focus, amount);
    }

    /// The terminal itself was resized; re-lay out every region from the
    /// new extent (spec §5's pending-flag rule drains into this call).
    pub fn resize_terminal(&mut self, width: u16, height: u16) {
        self.layout.resize_terminal(width, height);
    }
}
