//! `File`, the process-wide file table, and the clipboard (spec §3, §4.2).
//!
//! This crate is deliberately buffer-centric: it knows nothing about
//! windows, regions, or focus (that lives in `core-model`), and nothing
//! about keystrokes or editing operations (that lives in `core-actions`).

mod clipboard;
mod error;
mod file;
mod table;

pub use clipboard::Clipboard;
pub use error::EditorError;
pub use file::File;
pub use table::{FileId, FileTable};
