//! Status bar composition (spec §4.4 "Status bar layout").
//!
//! Left to right: mode-specific prompt or error message, the minibar's own
//! scrolled input, the search match counter, the mark indicator, the file
//! path, the unsaved asterisk, and the scroll percentage. A Window with no
//! file bound (the empty untitled path `EditorModel::new` starts with)
//! reads `no file`.

use core_model::{MinibarMode, Window};
use core_state::File;
use core_text::{BAR_LEFT_MARGIN, BAR_RIGHT_MARGIN, MINIBAR_MAX_PATH_WIDTH};

fn prompt_label(mode: MinibarMode) -> &'static str {
    match mode {
        MinibarMode::Open => "Open: ",
        MinibarMode::New => "New: ",
        MinibarMode::Command => "Command: ",
        MinibarMode::Find => "Find: ",
        MinibarMode::Inactive => "",
    }
}

/// Slice `input` so `cursor` stays at least `BAR_LEFT_MARGIN` from the
/// start of the slice and `BAR_RIGHT_MARGIN` from its end, scrolling the
/// window rightward once the buffer outgrows `width` (spec §4.4).
fn scrolled_window(input: &[u8], cursor: usize, width: usize) -> String {
    if width == 0 || input.is_empty() {
        return String::new();
    }
    let len = input.len();
    let cursor = cursor.min(len);

    let mut start = 0usize;
    if cursor + BAR_RIGHT_MARGIN > width {
        start = cursor + BAR_RIGHT_MARGIN - width;
    }
    if start > 0 && cursor.saturating_sub(start) < BAR_LEFT_MARGIN {
        start = cursor.saturating_sub(BAR_LEFT_MARGIN);
    }
    start = start.min(len);
    let end = (start + width).min(len);
    String::from_utf8_lossy(&input[start..end]).into_owned()
}

/// Truncate an over-long path to its tail, prefixed with an ellipsis, so
/// the status bar never has to wrap (spec §4.4 `MinibarMaxPathWidth`).
fn truncate_path(path: &[u8]) -> String {
    let text = String::from_utf8_lossy(path);
    if text.chars().count() <= MINIBAR_MAX_PATH_WIDTH {
        return text.into_owned();
    }
    let tail_len = MINIBAR_MAX_PATH_WIDTH.saturating_sub(3);
    let tail: String = text.chars().rev().take(tail_len).collect::<Vec<_>>().into_iter().rev().collect();
    format!("...{tail}")
}

fn scroll_percent(cursor_y: usize, line_count: usize) -> usize {
    if line_count <= 1 {
        100
    } else {
        (cursor_y * 100) / (line_count - 1)
    }
}

/// Build the full status bar text for `window`/`file` (spec §4.4). `width`
/// bounds the minibar's own scrolled input, not the whole line; the caller
/// pads or truncates the returned string to the region width.
pub fn compose(window: &Window, file: &File, width: usize) -> String {
    if file.path().is_empty() {
        return "no file".to_string();
    }

    let mut out = String::new();

    if let Some(error) = &window.error {
        out.push_str(&error.message);
        out.push(' ');
    } else if window.minibar.is_active() {
        let label = prompt_label(window.minibar.mode);
        out.push_str(label);
        let available = width.saturating_sub(label.len() + 16).max(8);
        out.push_str(&scrolled_window(&window.minibar.input, window.minibar.cursor, available));
        out.push(' ');
    }

    if let Some(search) = &window.search {
        if search.match_count > 0 {
            out.push_str(&format!("{}/{} ", search.match_index + 1, search.match_count));
        }
    }

    if window.mark.is_some() {
        out.push_str("[] ");
    }

    out.push_str(&truncate_path(file.path()));
    if !file.saved() {
        out.push('*');
    }
    out.push(' ');
    out.push_str(&format!("{}%", scroll_percent(window.cursor.y, file.line_count())));

    out
}
