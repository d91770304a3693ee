//! Minibar mode machine (spec §4.8): the shared Open/New/Command/Find
//! prompt line a focused Window shows in place of ordinary editing input.
//!
//! Buffer editing (insert/delete/navigate) is identical across all four
//! active states; only what Enter and Escape do, and Find's incremental
//! re-search, differ. Committing Open/New/Command hands the raw input
//! back to the caller — those three need the whole `EditorModel` (file
//! table, layout) to act on, which this module deliberately does not see.
//! Find is fully self-contained: it only ever touches the Window and the
//! File it is searching.

use crate::edit::delete_count;
use crate::search::{Pattern, search_file};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_model::{MinibarMode, SearchState, Window};
use core_state::File;
use core_text::Pos;

/// What happened to one keystroke routed into an active minibar.
pub enum MinibarEvent {
    /// Stayed open.
    Continue,
    /// Open/New/Command committed; the caller still has to act on `input`.
    Commit { mode: MinibarMode, input: Vec<u8> },
    /// The prompt closed and there is nothing further to do (Find's own
    /// commit/cancel, or Open/New/Command's cancel).
    Closed,
}

/// Enter a minibar prompt (spec §4.8). Find additionally seeds a fresh
/// `SearchState` anchored at the current cursor (spec §4.6 "origin").
pub fn open(window: &mut Window, mode: MinibarMode) {
    if matches!(mode, MinibarMode::Find) {
        window.search = Some(SearchState {
            needle: Vec::new(),
            matches: Vec::new(),
            origin: window.cursor,
            current_match: None,
            match_count: 0,
            match_index: 0,
        });
    }
    window.minibar.open(mode);
    window.mark_dirty();
}

/// Feed one key to the active minibar. `should_abort` is polled by Find's
/// incremental re-search (spec §4.6) so a fresh keystroke can preempt a
/// stale search on a large File; other modes ignore it.
pub fn handle_key(
    window: &mut Window,
    file: &File,
    event: KeyEvent,
    mut should_abort: impl FnMut() -> bool,
) -> MinibarEvent {
    debug_assert!(window.minibar.is_active());
    let mode = window.minibar.mode;
    let is_find = matches!(mode, MinibarMode::Find);

    match (event.code, event.mods) {
        (KeyCode::Esc, _) => {
            if is_find {
                if let Some(search) = window.search.take() {
                    window.cursor = search.origin;
                }
            }
            window.minibar.close();
            window.mark_dirty();
            MinibarEvent::Closed
        }

        (KeyCode::Enter, _) => {
            if is_find {
                if let Some(pos) = window.search.as_ref().and_then(|s| s.current_match) {
                    window.cursor = pos;
                }
                window.search = None;
                window.minibar.close();
                window.mark_dirty();
                return MinibarEvent::Closed;
            }
            let input = window.minibar.input.clone();
            window.minibar.close();
            window.mark_dirty();
            MinibarEvent::Commit { mode, input }
        }

        (KeyCode::Left, m) if m.is_empty() => {
            window.minibar.cursor = window.minibar.cursor.saturating_sub(1);
            window.mark_dirty();
            MinibarEvent::Continue
        }
        (KeyCode::Right, m) if m.is_empty() => {
            window.minibar.cursor = (window.minibar.cursor + 1).min(window.minibar.input.len());
            window.mark_dirty();
            MinibarEvent::Continue
        }
        (KeyCode::Home, _) => {
            window.minibar.cursor = 0;
            window.mark_dirty();
            MinibarEvent::Continue
        }
        (KeyCode::End, _) => {
            window.minibar.cursor = window.minibar.input.len();
            window.mark_dirty();
            MinibarEvent::Continue
        }

        (KeyCode::Up, _) if is_find => {
            navigate(window, -1);
            MinibarEvent::Continue
        }
        (KeyCode::Down, m) if is_find => {
            let step = if m.contains(KeyModifiers::CTRL) {
                let total = window.search.as_ref().map(|s| s.matches.len()).unwrap_or(0);
                1 + total / 50
            } else {
                1
            };
            navigate(window, step as isize);
            MinibarEvent::Continue
        }

        (KeyCode::Backspace, _) => {
            delete_left(window, 1);
            if is_find {
                rerun_search(window, file, &mut should_abort);
            } else {
                window.mark_dirty();
            }
            MinibarEvent::Continue
        }
        (KeyCode::Delete, m) => {
            let ctrl = m.contains(KeyModifiers::CTRL);
            let pre = &window.minibar.input[..window.minibar.cursor];
            let count = delete_count(pre, ctrl);
            delete_left(window, count);
            if is_find {
                rerun_search(window, file, &mut should_abort);
            } else {
                window.mark_dirty();
            }
            MinibarEvent::Continue
        }

        (KeyCode::Char(c), _) if (0x20..=0x7e).contains(&c) => {
            let at = window.minibar.cursor;
            window.minibar.input.insert(at, c);
            window.minibar.cursor += 1;
            if is_find {
                rerun_search(window, file, &mut should_abort);
            } else {
                window.mark_dirty();
            }
            MinibarEvent::Continue
        }

        _ => MinibarEvent::Continue,
    }
}

/// Remove `count` bytes to the left of the minibar cursor.
fn delete_left(window: &mut Window, count: usize) {
    let cursor = window.minibar.cursor;
    let start = cursor.saturating_sub(count);
    if start == cursor {
        return;
    }
    window.minibar.input.drain(start..cursor);
    window.minibar.cursor = start;
}

fn navigate(window: &mut Window, step: isize) {
    let Some(search) = window.search.as_mut() else {
        return;
    };
    if search.matches.is_empty() {
        return;
    }
    let len = search.matches.len() as isize;
    let idx = search.match_index as isize;
    let new_idx = ((idx + step) % len + len) % len;
    search.match_index = new_idx as usize;
    search.current_match = Some(search.matches[search.match_index]);
    window.mark_dirty();
}

fn rerun_search(window: &mut Window, file: &File, should_abort: impl FnMut() -> bool) {
    let needle = window.minibar.input.clone();
    let pattern = Pattern::new(&needle);
    let Some(matches) = search_file(file, &pattern, should_abort) else {
        // Stale run preempted by fresh input; the next keystroke's search
        // will repaint (spec §4.6).
        window.mark_dirty();
        return;
    };
    let origin = window.search.as_ref().map(|s| s.origin).unwrap_or(window.cursor);
    let match_count = matches.len();
    let (match_index, current_match) = first_match_at_or_after(&matches, origin);
    window.search = Some(SearchState {
        needle,
        matches,
        origin,
        current_match,
        match_count,
        match_index,
    });
    window.mark_dirty();
}

/// The initial selection after typing: the first match at or after
/// `origin`, wrapping to the very first match if none qualify (spec §4.6).
fn first_match_at_or_after(matches: &[Pos], origin: Pos) -> (usize, Option<Pos>) {
    if matches.is_empty() {
        return (0, None);
    }
    for (i, &m) in matches.iter().enumerate() {
        if (m.y, m.x) >= (origin.y, origin.x) {
            return (i, Some(m));
        }
    }
    (0, Some(matches[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::{Layout, MinibarMode};
    use core_state::File;

    fn test_window() -> Window {
        let layout = Layout::new(80, 24);
        Window::new(layout.root())
    }

    fn key(c: u8) -> KeyEvent {
        KeyEvent::plain(KeyCode::Char(c))
    }

    #[test]
    fn printable_keys_insert_at_cursor() {
        let mut w = test_window();
        let f = File::create_path(b"t");
        open(&mut w, MinibarMode::Command);
        handle_key(&mut w, &f, key(b's'), || false);
        handle_key(&mut w, &f, key(b'w'), || false);
        assert_eq!(w.minibar.input, b"sw");
        assert_eq!(w.minibar.cursor, 2);
    }

    #[test]
    fn enter_commits_open_mode_with_typed_path() {
        let mut w = test_window();
        let f = File::create_path(b"t");
        open(&mut w, MinibarMode::Open);
        for &b in b"a.txt" {
            handle_key(&mut w, &f, key(b), || false);
        }
        match handle_key(&mut w, &f, KeyEvent::plain(KeyCode::Enter), || false) {
            MinibarEvent::Commit { mode, input } => {
                assert_eq!(mode, MinibarMode::Open);
                assert_eq!(input, b"a.txt");
            }
            _ => panic!("expected Commit"),
        }
        assert!(!w.minibar.is_active());
    }

    #[test]
    fn escape_cancels_without_committing() {
        let mut w = test_window();
        let f = File::create_path(b"t");
        open(&mut w, MinibarMode::New);
        handle_key(&mut w, &f, key(b'x'), || false);
        match handle_key(&mut w, &f, KeyEvent::plain(KeyCode::Esc), || false) {
            MinibarEvent::Closed => {}
            _ => panic!("expected Closed"),
        }
        assert!(!w.minibar.is_active());
    }

    #[test]
    fn find_mode_reruns_search_on_each_keystroke() {
        let mut w = test_window();
        let mut f = File::create_path(b"t");
        f.line_mut(0).unwrap().insert_slice(0, b"foo bar foo");
        open(&mut w, MinibarMode::Find);
        handle_key(&mut w, &f, key(b'f'), || false);
        handle_key(&mut w, &f, key(b'o'), || false);
        handle_key(&mut w, &f, key(b'o'), || false);
        let search = w.search.as_ref().unwrap();
        assert_eq!(search.match_count, 2);
        assert_eq!(search.current_match, Some(Pos::new(0, 0)));
    }

    #[test]
    fn find_enter_pins_cursor_at_match() {
        let mut w = test_window();
        let mut f = File::create_path(b"t");
        f.line_mut(0).unwrap().insert_slice(0, b"xx foo");
        w.cursor = Pos::new(0, 0);
        open(&mut w, MinibarMode::Find);
        for &b in b"foo" {
            handle_key(&mut w, &f, key(b), || false);
        }
        handle_key(&mut w, &f, KeyEvent::plain(KeyCode::Enter), || false);
        assert_eq!(w.cursor, Pos::new(3, 0));
        assert!(!w.minibar.is_active());
        assert!(w.search.is_none());
    }

    #[test]
    fn find_escape_restores_saved_cursor() {
        let mut w = test_window();
        let mut f = File::create_path(b"t");
        f.line_mut(0).unwrap().insert_slice(0, b"xx foo");
        w.cursor = Pos::new(1, 0);
        open(&mut w, MinibarMode::Find);
        for &b in b"foo" {
            handle_key(&mut w, &f, key(b), || false);
        }
        handle_key(&mut w, &f, KeyEvent::plain(KeyCode::Esc), || false);
        assert_eq!(w.cursor, Pos::new(1, 0));
    }

    #[test]
    fn aborted_search_leaves_previous_matches_and_stays_dirty() {
        let mut w = test_window();
        let mut f = File::create_path(b"t");
        f.line_mut(0).unwrap().insert_slice(0, b"foo foo");
        open(&mut w, MinibarMode::Find);
        handle_key(&mut w, &f, key(b'f'), || false);
        let before = w.search.as_ref().unwrap().matches.clone();
        handle_key(&mut w, &f, key(b'o'), || true);
        assert_eq!(w.search.as_ref().unwrap().matches, before);
    }

    #[test]
    fn backspace_removes_one_byte() {
        let mut w = test_window();
        let f = File::create_path(b"t");
        open(&mut w, MinibarMode::Command);
        handle_key(&mut w, &f, key(b'a'), || false);
        handle_key(&mut w, &f, key(b'b'), || false);
        handle_key(&mut w, &f, KeyEvent::plain(KeyCode::Backspace), || false);
        assert_eq!(w.minibar.input, b"a");
    }
}
