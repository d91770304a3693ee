//! Cursor motion and scroll-offset tracking (spec §4.2).
//!
//! Every function here takes the focused `Window` and the `File` it is
//! currently showing; none of them know about keystrokes or bindings — that
//! translation happens in `dispatch`.

use core_model::Window;
use core_state::File;
use core_text::{BOTTOM_MARGIN, LEFT_MARGIN, RIGHT_MARGIN, TOP_MARGIN};

fn line_len(file: &File, y: usize) -> usize {
    file.line(y).map(core_text::Line::len).unwrap_or(0)
}

/// Clamp the cursor into `[0, |lines|) x [0, |line.chars|]` (spec §3 Window
/// invariant). Called after any structural edit, not just after motions.
pub fn clamp_cursor(window: &mut Window, file: &File) {
    let max_y = file.line_count().saturating_sub(1);
    if window.cursor.y > max_y {
        window.cursor.y = max_y;
    }
    let max_x = line_len(file, window.cursor.y);
    if window.cursor.x > max_x {
        window.cursor.x = max_x;
    }
}

pub fn left(window: &mut Window, file: &File) {
    if window.cursor.x > 0 {
        window.cursor.x -= 1;
    } else if window.cursor.y > 0 {
        window.cursor.y -= 1;
        window.cursor.x = line_len(file, window.cursor.y);
    }
    window.cursor_x_ideal = window.cursor.x;
}

pub fn right(window: &mut Window, file: &File) {
    let len = line_len(file, window.cursor.y);
    if window.cursor.x < len {
        window.cursor.x += 1;
    } else if window.cursor.y + 1 < file.line_count() {
        window.cursor.y += 1;
        window.cursor.x = 0;
    }
    window.cursor_x_ideal = window.cursor.x;
}

pub fn up(window: &mut Window, file: &File) {
    if window.cursor.y > 0 {
        window.cursor.y -= 1;
        window.cursor.x = window.cursor_x_ideal.min(line_len(file, window.cursor.y));
    }
}

pub fn down(window: &mut Window, file: &File) {
    if window.cursor.y + 1 < file.line_count() {
        window.cursor.y += 1;
        window.cursor.x = window.cursor_x_ideal.min(line_len(file, window.cursor.y));
    }
}

/// Home toggles between the first non-space column and column 0 (spec §4.2).
pub fn home(window: &mut Window, file: &File) {
    let leading = file.line(window.cursor.y).map(core_text::Line::leading_space_count).unwrap_or(0);
    window.cursor.x = if window.cursor.x > leading { leading } else { 0 };
    window.cursor_x_ideal = window.cursor.x;
}

pub fn end(window: &mut Window, file: &File) {
    window.cursor.x = line_len(file, window.cursor.y);
    window.cursor_x_ideal = window.cursor.x;
}

/// Shift-Home: jump to the very start of the file.
pub fn shift_home(window: &mut Window) {
    window.cursor = core_text::Pos::origin();
    window.cursor_x_ideal = 0;
}

/// Shift-End: jump to the very end of the file.
pub fn shift_end(window: &mut Window, file: &File) {
    let y = file.line_count().saturating_sub(1);
    window.cursor.y = y;
    window.cursor.x = line_len(file, y);
    window.cursor_x_ideal = window.cursor.x;
}

/// Page up/down move cursor and offset by half the window's region height
/// (spec §4.2). `region_height` includes the status bar row; callers pass
/// the text area height.
pub fn page_up(window: &mut Window, file: &File, region_height: u16) {
    let jump = (region_height / 2).max(1) as usize;
    window.cursor.y = window.cursor.y.saturating_sub(jump);
    window.offset.y = window.offset.y.saturating_sub(jump);
    window.cursor.x = window.cursor_x_ideal.min(line_len(file, window.cursor.y));
}

pub fn page_down(window: &mut Window, file: &File, region_height: u16) {
    let jump = (region_height / 2).max(1) as usize;
    let max_y = file.line_count().saturating_sub(1);
    window.cursor.y = (window.cursor.y + jump).min(max_y);
    window.offset.y = window.offset.y.saturating_add(jump);
    window.cursor.x = window.cursor_x_ideal.min(line_len(file, window.cursor.y));
}

/// After any cursor change, nudge `offset` so the cursor stays at least one
/// margin's width from every viewport edge (spec §4.2). `region_size` is the
/// window's text area (width, height) excluding gutter and status bar.
pub fn adjust_offset(window: &mut Window, region_size: (u16, u16)) {
    let (width, height) = (region_size.0 as usize, region_size.1 as usize);

    if window.cursor.x < window.offset.x + LEFT_MARGIN {
        window.offset.x = window.cursor.x.saturating_sub(LEFT_MARGIN);
    } else if window.cursor.x + RIGHT_MARGIN >= window.offset.x + width {
        window.offset.x = window.cursor.x + RIGHT_MARGIN + 1 - width.max(1);
    }

    if window.cursor.y < window.offset.y + TOP_MARGIN {
        window.offset.y = window.cursor.y.saturating_sub(TOP_MARGIN);
    } else if window.cursor.y + BOTTOM_MARGIN >= window.offset.y + height {
        window.offset.y = window.cursor.y + BOTTOM_MARGIN + 1 - height.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::File;

    fn file(lines: &[&str]) -> File {
        let f = File::create_path(b"t");
        let mut f = f;
        for (i, s) in lines.iter().enumerate() {
            if i == 0 {
                f.line_mut(0).unwrap().insert_slice(0, s.as_bytes());
            } else {
                f.insert_line(i, core_text::Line::from_bytes(s.as_bytes().to_vec()));
            }
        }
        f
    }

    #[test]
    fn left_at_column_zero_joins_previous_line() {
        let f = file(&["abc", "def"]);
        let mut w = Window::new(test_region());
        w.cursor = core_text::Pos::new(0, 1);
        left(&mut w, &f);
        assert_eq!(w.cursor, core_text::Pos::new(3, 0));
    }

    #[test]
    fn right_at_end_of_line_wraps_to_next() {
        let f = file(&["abc", "def"]);
        let mut w = Window::new(test_region());
        w.cursor = core_text::Pos::new(3, 0);
        right(&mut w, &f);
        assert_eq!(w.cursor, core_text::Pos::new(0, 1));
    }

    #[test]
    fn home_toggles_leading_space_and_zero() {
        let f = file(&["   abc"]);
        let mut w = Window::new(test_region());
        w.cursor = core_text::Pos::new(5, 0);
        home(&mut w, &f);
        assert_eq!(w.cursor.x, 3);
        home(&mut w, &f);
        assert_eq!(w.cursor.x, 0);
    }

    #[test]
    fn vertical_motion_preserves_ideal_column() {
        let f = file(&["abcdef", "xy", "abcdef"]);
        let mut w = Window::new(test_region());
        w.cursor = core_text::Pos::new(5, 0);
        w.cursor_x_ideal = 5;
        down(&mut w, &f);
        assert_eq!(w.cursor, core_text::Pos::new(2, 1), "clamped to shorter line");
        down(&mut w, &f);
        assert_eq!(w.cursor, core_text::Pos::new(5, 2), "ideal column restored");
    }

    #[test]
    fn adjust_offset_keeps_cursor_within_margins() {
        let mut w = Window::new(test_region());
        w.cursor = core_text::Pos::new(2, 2);
        adjust_offset(&mut w, (80, 24));
        assert_eq!(w.offset, core_text::Pos::origin());
    }

    fn test_region() -> core_model::RegionId {
        core_model::Layout::new(80, 24).root()
    }
}
