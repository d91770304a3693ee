//! The spec §4.4 frame algorithm: dirty aggregation, clear, paint, a
//! deferred flag reset, cursor positioning, and a single flush. This is
//! the renderer's only entry point; every other module in this crate
//! exists to serve one step of it.

use crate::palette::{color, syntax_color};
use crate::status;
use crate::writer::Writer;
use core_actions::edit::block_normalize;
use core_config::{Palette, Theme};
use core_model::{EditorModel, MinibarMode, Window, WindowId};
use core_state::{File, FileId};
use core_text::{ColorClass, Line, Pos, EDITOR_LINE_NUMBER_MARGIN};
use std::collections::{HashMap, HashSet};

/// Render one frame against `model`'s current state under `theme`,
/// queuing every terminal write into `writer`. The caller flushes.
pub fn render(model: &mut EditorModel, theme: &Theme, writer: &mut Writer) {
    let root_region = *model.layout().region(model.layout().root());
    let total_rows = (root_region.origin.1 + root_region.size.1) as usize;
    let mut dirty = vec![false; total_rows];

    let windows = model.layout().windows();

    for &w in &windows {
        mark_dirty_rows(model, w, &mut dirty);
    }

    for (y, &is_dirty) in dirty.iter().enumerate() {
        if is_dirty {
            writer.move_to(0, y as u16);
            writer.clear_line(0, y as u16);
        }
    }

    let mut visited: HashMap<FileId, HashSet<usize>> = HashMap::new();
    for &w in &windows {
        let (file_id, lines) = paint_window(model, w, theme, &dirty, writer);
        visited.entry(file_id).or_default().extend(lines);
    }

    for &w in &windows {
        model.layout_mut().window_mut(w).clear_dirty();
    }
    for (file_id, lines) in visited {
        let file = model.files_mut().get_mut(file_id);
        for idx in lines {
            if let Some(line) = file.line_mut(idx) {
                line.clear_dirty();
            }
        }
        file.clear_dirty();
    }

    position_cursor(model, theme, writer);
}

fn mark_dirty_rows(model: &EditorModel, w: WindowId, dirty: &mut [bool]) {
    let (window, file) = model.window_and_file(w);
    let region = model.layout().region(window.region);
    let status_row = (region.origin.1 + region.size.1.saturating_sub(1)) as usize;

    if window.redraw() || file.redraw() {
        for y in region.origin.1..region.origin.1 + region.size.1 {
            dirty[y as usize] = true;
        }
    } else {
        let text_rows = region.size.1.saturating_sub(1);
        for j in 0..text_rows {
            let line_idx = window.offset.y + j as usize;
            if file.line(line_idx).is_some_and(Line::redraw) {
                dirty[(region.origin.1 + j) as usize] = true;
            }
        }
    }
    dirty[status_row] = true;
}

fn digit_count(value: usize) -> usize {
    value.to_string().len()
}

/// Paint one Window's gutter, text, and status bar into rows marked dirty
/// in `dirty`. Returns the file and the set of line indices it actually
/// painted, so the caller can clear only those lines' dirty flags.
fn paint_window(
    model: &EditorModel,
    w: WindowId,
    theme: &Theme,
    dirty: &[bool],
    writer: &mut Writer,
) -> (FileId, Vec<usize>) {
    let (window, file) = model.window_and_file(w);
    let region = *model.layout().region(window.region);
    let palette = &theme.palette;

    let border = region.origin.0 > 0;
    let border_width: u16 = if border { 2 } else { 0 };
    let max_idx = file.line_count().saturating_sub(1);
    let gutter_digits = digit_count(max_idx);
    let gutter_width = gutter_digits + EDITOR_LINE_NUMBER_MARGIN;
    let content_x = region.origin.0 + border_width + gutter_width as u16;
    let content_width = (region.size.0 as usize).saturating_sub(border_width as usize + gutter_width);

    let text_rows = region.size.1.saturating_sub(1);
    let mark_range = window.mark.map(|m| block_normalize(m.start, window.cursor));
    let mut visited = Vec::new();

    for j in 0..text_rows {
        let y = region.origin.1 + j;
        if !dirty[y as usize] {
            continue;
        }
        let line_idx = window.offset.y + j as usize;

        if border {
            writer.move_to(region.origin.0, y);
            writer.set_background(color(palette.status_bg));
            writer.print(" ");
            writer.set_background(color(palette.editor_bg));
            writer.print(" ");
        }

        writer.move_to(content_x.saturating_sub(gutter_width as u16), y);
        writer.set_foreground(color(palette.editor_fg));
        writer.set_background(color(palette.editor_bg));

        match file.line(line_idx) {
            Some(line) => {
                visited.push(line_idx);
                writer.print(format!("{:>width$}", line_idx, width = gutter_digits));
                writer.print(" ".repeat(EDITOR_LINE_NUMBER_MARGIN));
                paint_line_content(window, file, line, line_idx, content_width, palette, mark_range, writer);
            }
            None => {
                writer.print(" ".repeat(gutter_width));
            }
        }
        writer.reset_color();
    }

    let status_y = region.origin.1 + region.size.1.saturating_sub(1);
    if dirty[status_y as usize] {
        writer.move_to(region.origin.0, status_y);
        writer.set_foreground(color(palette.status_fg));
        writer.set_background(color(palette.status_bg));
        let text = status::compose(window, file, region.size.0 as usize);
        let width = region.size.0 as usize;
        let char_count = text.chars().count();
        let padded = if char_count > width {
            text.chars().take(width).collect::<String>()
        } else {
            text + &" ".repeat(width - char_count)
        };
        writer.print(padded);
        writer.reset_color();
    }

    (window.file, visited)
}

/// Paint one visible slice of `line`, switching fg/bg as syntax classes,
/// search matches, and a marked block enter and exit (spec §4.4 step 3).
fn paint_line_content(
    window: &Window,
    file: &File,
    line: &Line,
    line_idx: usize,
    width: usize,
    palette: &Palette,
    mark_range: Option<(Pos, Pos)>,
    writer: &mut Writer,
) {
    let offset_x = window.offset.x;
    let chars = line.chars();
    if offset_x >= chars.len() || width == 0 {
        return;
    }
    let end = (offset_x + width).min(chars.len());
    let colors = line.colors();
    let has_colors = colors.len() == chars.len();

    let needle_len = window.search.as_ref().map(|s| s.needle.len().max(1)).unwrap_or(0);
    let matches: Vec<(usize, usize)> = window
        .search
        .as_ref()
        .map(|s| s.matches.iter().filter(|m| m.y == line_idx).map(|m| (m.x, m.x + needle_len)).collect())
        .unwrap_or_default();
    let selected_range = window.search.as_ref().and_then(|s| s.current_match).and_then(|m| {
        if m.y == line_idx {
            Some((m.x, m.x + needle_len))
        } else {
            None
        }
    });

    let mut current_overlay: Option<bool> = None; // Some(true) = selected match, Some(false) = plain match
    let mut current_class: Option<ColorClass> = None;

    for x in offset_x..end {
        let in_mark = mark_range.is_some_and(|(start, end)| {
            let p = Pos::new(x, line_idx);
            (start.y, start.x) <= (p.y, p.x) && (p.y, p.x) < (end.y, end.x)
        });
        let is_selected_match = selected_range.is_some_and(|(s, e)| x >= s && x < e);
        let in_match = matches.iter().any(|&(s, e)| x >= s && x < e);

        let overlay = if in_mark || is_selected_match {
            Some(true)
        } else if in_match {
            Some(false)
        } else {
            None
        };

        if overlay != current_overlay {
            current_overlay = overlay;
            match overlay {
                Some(true) => {
                    writer.set_foreground(color(palette.selected_match_fg));
                    writer.set_background(color(palette.selected_match_bg));
                }
                Some(false) => {
                    writer.set_foreground(color(palette.match_fg));
                    writer.set_background(color(palette.match_bg));
                }
                None => {
                    writer.set_foreground(color(palette.editor_fg));
                    writer.set_background(color(palette.editor_bg));
                }
            }
            current_class = None;
        }

        if overlay.is_none() {
            let class = if has_colors { colors[x] } else { ColorClass::Normal };
            if Some(class) != current_class {
                writer.set_foreground(syntax_color(class, palette));
                current_class = Some(class);
            }
        }

        writer.print((chars[x] as char).to_string());
    }
}

/// Step 5: place the terminal cursor inside the focused Window, using
/// minibar coordinates when a prompt is open, switching the cursor color
/// token by mode.
fn position_cursor(model: &EditorModel, theme: &Theme, writer: &mut Writer) {
    let focus = model.focused_window();
    let (window, file) = model.window_and_file(focus);
    let region = *model.layout().region(window.region);
    let palette = &theme.palette;

    if window.minibar.mode != MinibarMode::Inactive {
        let status_y = region.origin.1 + region.size.1.saturating_sub(1);
        let x = region.origin.0 + window.minibar.cursor as u16;
        writer.set_foreground(color(palette.cursor_minibar));
        writer.move_to(x, status_y);
    } else {
        let border_width: u16 = if region.origin.0 > 0 { 2 } else { 0 };
        let max_idx = file.line_count().saturating_sub(1);
        let gutter_width = digit_count(max_idx) + EDITOR_LINE_NUMBER_MARGIN;
        let x = region.origin.0 + border_width + gutter_width as u16 + (window.cursor.x.saturating_sub(window.offset.x)) as u16;
        let y = region.origin.1 + (window.cursor.y.saturating_sub(window.offset.y)) as u16;
        writer.set_foreground(color(palette.cursor_normal));
        writer.move_to(x, y);
    }
}


#[cfg(test)]
mod proptest_frame {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// `digit_count` is the decimal width the gutter margin is sized
        /// from; it must match `usize::to_string().len()` for every value,
        /// not just the boundary cases the unit tests cover.
        #[test]
        fn digit_count_matches_to_string_len(value in 0usize..10_000_000) {
            prop_assert_eq!(digit_count(value), value.to_string().len());
        }

        /// `mark_dirty_rows` only ever sets rows inside the window's own
        /// region plus its status row; it must never touch rows belonging
        /// to another leaf (spec §4.4's per-window dirty accounting).
        #[test]
        fn mark_dirty_rows_stays_inside_its_region(
            width in 80u16..160, height in 24u16..60, stacked in any::<bool>(),
        ) {
            let mut model = EditorModel::new(width, height);
            let first = model.focused_window();
            let second = model.split_focused(stacked);

            let root_region = *model.layout().region(model.layout().root());
            let total_rows = (root_region.origin.1 + root_region.size.1) as usize;
            let mut dirty = vec![false; total_rows];
            mark_dirty_rows(&model, second, &mut dirty);

            let (window, _) = model.window_and_file(second);
            let region = model.layout().region(window.region);
            let in_region = |y: usize| {
                (region.origin.1 as usize..(region.origin.1 + region.size.1) as usize).contains(&y)
            };
            for (y, &is_dirty) in dirty.iter().enumerate() {
                if is_dirty {
                    prop_assert!(in_region(y));
                }
            }
            let _ = first;
        }
    }
}
