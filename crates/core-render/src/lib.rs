//! Frame assembly: turns an `EditorModel` plus a `Theme` into a single
//! buffered sequence of terminal writes (spec §4.4).
//!
//! `frame::render` is the only entry point the main loop calls. It walks
//! every live Window once per frame: aggregating which rows changed,
//! clearing them, painting gutter/content/status bar, and deferring the
//! dirty-flag reset until every Window sharing a File has been scanned
//! (spec §5 "Files are shared across Windows"). `palette` is the
//! renderer's sole coupling to the theme subsystem — everywhere else it
//! addresses color by semantic token, never by a literal RGB triple.
//! `writer` batches the resulting terminal commands into one flush.

pub mod frame;
pub mod palette;
pub mod status;
pub mod writer;
