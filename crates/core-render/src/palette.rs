//! Maps a theme's semantic RGB tokens onto `crossterm::style::Color`
//! (spec §4.4 "color model"). This is the renderer's only coupling to the
//! theme subsystem: everywhere else it addresses colors by token, never by
//! a literal RGB triple.

use core_config::Rgb;
use core_text::ColorClass;
use crossterm::style::Color;

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.0, g: rgb.1, b: rgb.2 }
}

/// The foreground a `ColorClass` paints with under `palette`. `Normal`
/// bytes use the ordinary editor foreground; syntax classes are only ever
/// produced for a file with a highlighter bound (spec §4.5), so a
/// `Normal`-everywhere line and an unhighlighted one look identical.
pub fn syntax_color(class: ColorClass, palette: &core_config::Palette) -> Color {
    let rgb = match class {
        ColorClass::Normal => palette.editor_fg,
        ColorClass::Comment => palette.syntax_comment,
        ColorClass::Keyword => palette.syntax_keyword,
        ColorClass::String => palette.syntax_string,
        ColorClass::Char => palette.syntax_char,
        ColorClass::Number => palette.syntax_number,
    };
    color(rgb)
}
