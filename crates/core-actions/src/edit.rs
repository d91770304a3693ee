//! Editing primitives: insertion, deletion, smart indent, and the block
//! mark/copy/cut/paste family (spec §4.3).

use crate::motion::clamp_cursor;
use core_model::{Mark, Window};
use core_state::{Clipboard, EditorError, File};
use core_text::{classify_byte, Line, Pos, RunClass, SPACES_PER_TAB};

/// insert_char(w, c) — spec §4.3.
pub fn insert_char(window: &mut Window, file: &mut File, c: u8) {
    let y = window.cursor.y;
    file.line_mut(y).expect("cursor line exists").insert_byte(window.cursor.x, c);
    file.rehighlight_line(y);
    file.mark_unsaved();
    window.cursor.x += 1;
    window.cursor_x_ideal = window.cursor.x;
}

/// insert_newline(w) — spec §4.3 smart-indent rule, including the
/// brace-pair auto-close that fires only when the previous keystroke was
/// `{` (tracked on the Window by the dispatcher).
pub fn insert_newline(window: &mut Window, file: &mut File) {
    let y = window.cursor.y;
    let x = window.cursor.x;

    let leading = file.line(y).expect("cursor line exists").leading_space_count();
    let last_before_tail = if x > 0 {
        file.line(y).unwrap().byte_at(x - 1)
    } else {
        None
    };
    let opens_brace = last_before_tail == Some(b'{');
    let indent = leading + if opens_brace { SPACES_PER_TAB } else { 0 };

    let tail = file.line_mut(y).unwrap().split_off(x);
    let mut new_line = Line::from_bytes(vec![b' '; indent]);
    new_line.append(tail);
    file.insert_line(y + 1, new_line);
    file.rehighlight_line(y);
    file.rehighlight_line(y + 1);

    let typed_open_brace_pair =
        opens_brace && window.previous_keystroke.map(|k| k.byte) == Some(Some(b'{'));
    if typed_open_brace_pair {
        let closing = Line::from_bytes(vec![b' '; leading].into_iter().chain(std::iter::once(b'}')).collect());
        file.insert_line(y + 2, closing);
        file.rehighlight_line(y + 2);
    }

    file.mark_unsaved();
    window.cursor = Pos::new(indent, y + 1);
    window.cursor_x_ideal = indent;
}

/// delete_char(w) — backspace semantics (spec §4.3).
pub fn delete_char(window: &mut Window, file: &mut File) {
    let y = window.cursor.y;
    let x = window.cursor.x;
    if x > 0 {
        file.line_mut(y).unwrap().delete_byte(x - 1);
        file.rehighlight_line(y);
        window.cursor.x -= 1;
    } else if y > 0 {
        let removed = file.remove_line(y);
        let prev_len = file.line(y - 1).unwrap().len();
        file.line_mut(y - 1).unwrap().append(removed);
        file.rehighlight_line(y - 1);
        window.cursor.y -= 1;
        window.cursor.x = prev_len;
    } else {
        // (0,0) of a one-line file: no-op, preserving the empty-File invariant.
        return;
    }
    window.cursor_x_ideal = window.cursor.x;
    file.mark_unsaved();
}

/// Classify the pre-cursor substring into trailing runs and sum their
/// lengths per the rule in spec §4.3. Shared with the minibar's own
/// delete/ctrl-delete handling (spec §4.8: "ctrl uses the same unit rule
/// as the editor").
pub(crate) fn delete_count(pre: &[u8], ctrl: bool) -> usize {
    if pre.is_empty() {
        return 0;
    }
    if ctrl {
        let mut i = pre.len();
        let first_class = classify_byte(pre[i - 1]);
        let mut count = 0;
        while i > 0 && classify_byte(pre[i - 1]) == first_class {
            count += 1;
            i -= 1;
        }
        // A trailing run of plain whitespace on its own deletes nothing
        // useful, so also absorb the word/symbol run behind it (spec §4.3:
        // "accumulates trailing space + identifier + other counts").
        if first_class == RunClass::Space && i > 0 {
            let second_class = classify_byte(pre[i - 1]);
            while i > 0 && classify_byte(pre[i - 1]) == second_class {
                count += 1;
                i -= 1;
            }
        }
        count.max(1)
    } else if pre.iter().all(|&b| b == b' ') {
        let n = pre.len();
        if n > 0 && n % SPACES_PER_TAB == 0 {
            SPACES_PER_TAB
        } else {
            1
        }
    } else {
        1
    }
}

/// delete_word_or_unit(w, ctrl) — spec §4.3.
pub fn delete_word_or_unit(window: &mut Window, file: &mut File, ctrl: bool) {
    let y = window.cursor.y;
    let x = window.cursor.x;
    let pre = file.line(y).unwrap().chars()[..x].to_vec();
    let count = delete_count(&pre, ctrl);
    for _ in 0..count {
        if window.cursor.x == 0 {
            break;
        }
        delete_char(window, file);
    }
}

/// mark toggle — spec §4.3.
pub fn toggle_mark(window: &mut Window) {
    window.mark = Some(Mark { start: window.cursor });
}

/// block normalization — spec §4.3: orders `(mark, cursor)` into document
/// order regardless of which came first (mark symmetry law, spec §8).
pub fn block_normalize(a: Pos, b: Pos) -> (Pos, Pos) {
    if (a.y, a.x) <= (b.y, b.x) {
        (a, b)
    } else {
        (b, a)
    }
}

/// Serialize the block between `start` and `end` the way copy/cut do (spec
/// §4.3): head range on the start line, whole lines between, tail range on
/// the end line, joined by `\n`. Same-line blocks are a single slice.
fn serialize_block(file: &File, start: Pos, end: Pos) -> Vec<u8> {
    if start.y == end.y {
        let line = file.line(start.y).unwrap();
        return line.chars()[start.x..end.x.min(line.len())].to_vec();
    }
    let mut out = Vec::new();
    let first = file.line(start.y).unwrap();
    out.extend_from_slice(&first.chars()[start.x..]);
    for y in (start.y + 1)..end.y {
        out.push(b'\n');
        out.extend_from_slice(file.line(y).unwrap().chars());
    }
    out.push(b'\n');
    let last = file.line(end.y).unwrap();
    out.extend_from_slice(&last.chars()[..end.x.min(last.len())]);
    out
}

/// copy(w) — spec §4.3. Requires a valid mark.
pub fn copy(window: &Window, file: &File, clipboard: &mut Clipboard) -> Result<(), EditorError> {
    let mark = window.mark.ok_or(EditorError::BlockOperationNoMark)?;
    let (start, end) = block_normalize(mark.start, window.cursor);
    clipboard.set(serialize_block(file, start, end));
    Ok(())
}

/// delete_block — remove everything strictly between `start` and `end`,
/// concatenating the start-line prefix with the end-line suffix (spec
/// §4.3 "cut").
fn delete_block(file: &mut File, start: Pos, end: Pos) {
    if start.y == end.y {
        let line = file.line_mut(start.y).unwrap();
        let len = line.len();
        let tail = line.chars()[end.x.min(len)..].to_vec();
        while line.len() > start.x {
            line.delete_byte(line.len() - 1);
        }
        for b in tail {
            line.insert_byte(line.len(), b);
        }
        file.rehighlight_line(start.y);
        return;
    }

    let suffix = {
        let last = file.line(end.y).unwrap();
        last.chars()[end.x.min(last.len())..].to_vec()
    };
    for y in ((start.y + 1)..=end.y).rev() {
        file.remove_line(y);
    }
    let first = file.line_mut(start.y).unwrap();
    while first.len() > start.x {
        first.delete_byte(first.len() - 1);
    }
    for b in suffix {
        first.insert_byte(first.len(), b);
    }
    file.rehighlight_line(start.y);
}

/// cut(w) — copy then delete_block, cursor moves to `start` (spec §4.3).
pub fn cut(window: &mut Window, file: &mut File, clipboard: &mut Clipboard) -> Result<(), EditorError> {
    let mark = window.mark.ok_or(EditorError::BlockOperationNoMark)?;
    let (start, end) = block_normalize(mark.start, window.cursor);
    clipboard.set(serialize_block(file, start, end));
    delete_block(file, start, end);
    file.mark_unsaved();
    window.cursor = start;
    window.cursor_x_ideal = start.x;
    window.mark = None;
    clamp_cursor(window, file);
    Ok(())
}

/// paste(w) — inserts clipboard bytes at the cursor, splitting on `\n` into
/// new lines while preserving the tail of the original line at the
/// insertion point (spec §4.3). Sets the mark to the pre-paste cursor.
pub fn paste(window: &mut Window, file: &mut File, clipboard: &Clipboard) -> Result<(), EditorError> {
    if clipboard.is_empty() {
        return Err(EditorError::BlockOperationNoMark);
    }
    let pre_paste_cursor = window.cursor;
    let y = window.cursor.y;
    let x = window.cursor.x;

    let tail = file.line_mut(y).unwrap().split_off(x);
    let mut segments = clipboard.get().split(|&b| b == b'\n');
    let first_segment = segments.next().unwrap_or(&[]);
    file.line_mut(y).unwrap().insert_slice(x, first_segment);

    let mut last_y = y;
    let mut last_x = file.line(y).unwrap().len();
    let mut insert_at = y + 1;
    for segment in segments {
        file.insert_line(insert_at, Line::from_bytes(segment.to_vec()));
        last_y = insert_at;
        last_x = segment.len();
        insert_at += 1;
    }
    file.line_mut(last_y).unwrap().append(tail);
    for line in y..=last_y {
        file.rehighlight_line(line);
    }

    file.mark_unsaved();
    window.cursor = Pos::new(last_x, last_y);
    window.cursor_x_ideal = last_x;
    window.mark = Some(Mark { start: pre_paste_cursor });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::Layout;
    use core_state::File;

    fn window() -> Window {
        Window::new(Layout::new(80, 24).root())
    }

    #[test]
    fn insert_char_advances_cursor() {
        let mut w = window();
        let mut f = File::create_path(b"t");
        insert_char(&mut w, &mut f, b'a');
        assert_eq!(f.line(0).unwrap().chars(), b"a");
        assert_eq!(w.cursor.x, 1);
    }

    #[test]
    fn insert_newline_splits_line() {
        let mut w = window();
        let mut f = File::create_path(b"t");
        f.line_mut(0).unwrap().insert_slice(0, b"hello world");
        w.cursor = Pos::new(5, 0);
        insert_newline(&mut w, &mut f);
        assert_eq!(f.line(0).unwrap().chars(), b"hello");
        assert_eq!(f.line(1).unwrap().chars(), b" world");
        assert_eq!(w.cursor, Pos::new(0, 1));
    }

    /// S2 — smart indent with brace pair.
    #[test]
    fn smart_indent_inserts_closing_brace_line() {
        let mut w = window();
        let mut f = File::create_path(b"t");
        insert_char(&mut w, &mut f, b'{');
        w.previous_keystroke = Some(core_model::LastKeystroke { ctrl: false, byte: Some(b'{') });
        insert_newline(&mut w, &mut f);
        assert_eq!(f.line_count(), 3);
        assert_eq!(f.line(0).unwrap().chars(), b"{");
        assert_eq!(f.line(1).unwrap().chars(), b"  ");
        assert_eq!(f.line(2).unwrap().chars(), b"}");
        assert_eq!(w.cursor, Pos::new(2, 1));
    }

    #[test]
    fn delete_char_merges_previous_line() {
        let mut w = window();
        let mut f = File::create_path(b"t");
        f.insert_line(1, Line::from_bytes(b"world".to_vec()));
        f.line_mut(0).unwrap().insert_slice(0, b"hello");
        w.cursor = Pos::new(0, 1);
        delete_char(&mut w, &mut f);
        assert_eq!(f.line_count(), 1);
        assert_eq!(f.line(0).unwrap().chars(), b"helloworld");
        assert_eq!(w.cursor, Pos::new(5, 0));
    }

    /// S3 — word delete across runs.
    #[test]
    fn ctrl_delete_removes_trailing_identifier_run() {
        let mut w = window();
        let mut f = File::create_path(b"t");
        f.line_mut(0).unwrap().insert_slice(0, b"    hello world");
        w.cursor = Pos::new(15, 0);
        delete_word_or_unit(&mut w, &mut f, true);
        assert_eq!(f.line(0).unwrap().chars(), b"    hello ");
    }

    #[test]
    fn non_ctrl_delete_removes_one_tab_worth_of_spaces() {
        let mut w = window();
        let mut f = File::create_path(b"t");
        f.line_mut(0).unwrap().insert_slice(0, b"    ");
        w.cursor = Pos::new(4, 0);
        delete_word_or_unit(&mut w, &mut f, false);
        assert_eq!(f.line(0).unwrap().chars(), b"  ");
    }

    #[test]
    fn block_normalize_is_symmetric() {
        let a = Pos::new(2, 0);
        let b = Pos::new(3, 2);
        assert_eq!(block_normalize(a, b), block_normalize(b, a));
    }

    /// S4 — block cut across lines.
    #[test]
    fn cut_across_lines_matches_scenario() {
        let mut w = window();
        let mut f = File::create_path(b"t");
        f.line_mut(0).unwrap().insert_slice(0, b"alpha");
        f.insert_line(1, Line::from_bytes(b"beta".to_vec()));
        f.insert_line(2, Line::from_bytes(b"gamma".to_vec()));
        w.mark = Some(Mark { start: Pos::new(2, 0) });
        w.cursor = Pos::new(3, 2);
        let mut clipboard = Clipboard::new();
        cut(&mut w, &mut f, &mut clipboard).unwrap();
        assert_eq!(clipboard.get(), b"pha\nbeta\ngam");
        assert_eq!(f.line_count(), 1);
        assert_eq!(f.line(0).unwrap().chars(), b"alma");
        assert_eq!(w.cursor, Pos::new(2, 0));
    }

    #[test]
    fn copy_without_mark_errors() {
        let w = window();
        let f = File::create_path(b"t");
        let mut clipboard = Clipboard::new();
        assert!(copy(&w, &f, &mut clipboard).is_err());
    }

    #[test]
    fn paste_splits_on_embedded_newlines_and_preserves_tail() {
        let mut w = window();
        let mut f = File::create_path(b"t");
        f.line_mut(0).unwrap().insert_slice(0, b"XY");
        w.cursor = Pos::new(1, 0);
        let mut clipboard = Clipboard::new();
        clipboard.set(b"A\nB".to_vec());
        paste(&mut w, &mut f, &clipboard).unwrap();
        assert_eq!(f.line_count(), 2);
        assert_eq!(f.line(0).unwrap().chars(), b"XA");
        assert_eq!(f.line(1).unwrap().chars(), b"BY");
        assert_eq!(w.cursor, Pos::new(1, 1));
    }

    #[test]
    fn paste_empty_clipboard_errors() {
        let mut w = window();
        let mut f = File::create_path(b"t");
        let clipboard = Clipboard::new();
        assert!(paste(&mut w, &mut f, &clipboard).is_err());
    }
}
