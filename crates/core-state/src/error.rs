//! Domain error kinds (spec §7), all eventually surfaced on a Window's
//! status bar by the dispatcher — never propagated to terminate the
//! process.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("can not open file {}", String::from_utf8_lossy(.0))]
    FileOpenFailed(Vec<u8>),

    #[error("invalid line ending in {}", String::from_utf8_lossy(.0))]
    InvalidLineEnding(Vec<u8>),

    #[error("can not save file {}", String::from_utf8_lossy(.0))]
    FileSaveFailed(Vec<u8>),

    #[error("no mark set")]
    BlockOperationNoMark,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("split requires a direction")]
    SplitFailed,
}
