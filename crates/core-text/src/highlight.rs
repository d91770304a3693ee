//! Per-line syntax highlighting (spec §4.5).
//!
//! Highlighting is strictly per-line: there is no cross-line state. The
//! source this spec distills never implemented the multi-line comment
//! tracking its profile fields hint at, and neither does this crate — the
//! `multiline_comment_start`/`_end` fields are retained as documentation
//! only (spec §9 open question).

use crate::ColorClass;

/// A keyword bucket: all keywords of a given byte length, for the "bucket
/// by length before comparing" dispatch spec.md calls for.
pub struct KeywordBucket {
    pub len: usize,
    pub words: &'static [&'static str],
}

pub struct LanguageProfile {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub line_comment: Option<&'static str>,
    /// Reserved; cross-line comment tracking is not implemented (spec §9).
    pub multiline_comment_start: Option<&'static str>,
    /// Reserved; cross-line comment tracking is not implemented (spec §9).
    pub multiline_comment_end: Option<&'static str>,
    pub highlight_strings: bool,
    pub highlight_chars: bool,
    pub highlight_numbers: bool,
    pub highlight_comments: bool,
    pub keywords: &'static [KeywordBucket],
}

impl LanguageProfile {
    pub fn is_keyword(&self, word: &[u8]) -> bool {
        for bucket in self.keywords {
            if bucket.len == word.len() {
                return bucket.words.iter().any(|w| w.as_bytes() == word);
            }
        }
        false
    }
}

macro_rules! bucket {
    ($len:expr, [$($w:expr),* $(,)?]) => {
        KeywordBucket { len: $len, words: &[$($w),*] }
    };
}

pub static RUST_LIKE: LanguageProfile = LanguageProfile {
    name: "rust-like",
    extensions: &["rs"],
    line_comment: Some("//"),
    multiline_comment_start: Some("/*"),
    multiline_comment_end: Some("*/"),
    highlight_strings: true,
    highlight_chars: true,
    highlight_numbers: true,
    highlight_comments: true,
    keywords: &[
        bucket!(2, ["fn", "if", "in", "as"]),
        bucket!(3, ["let", "mut", "pub", "use", "mod", "for", "dyn"]),
        bucket!(4, ["else", "true", "enum", "impl", "self", "Self", "loop", "move"]),
        bucket!(5, ["false", "const", "match", "trait", "while", "break", "super", "async"]),
        bucket!(6, ["return", "struct", "unsafe", "extern", "static"]),
        bucket!(7, ["default"]),
        bucket!(8, ["continue"]),
    ],
};

pub static C_LIKE: LanguageProfile = LanguageProfile {
    name: "c-like",
    extensions: &["c", "h", "cc", "cpp", "hpp"],
    line_comment: Some("//"),
    multiline_comment_start: Some("/*"),
    multiline_comment_end: Some("*/"),
    highlight_strings: true,
    highlight_chars: true,
    highlight_numbers: true,
    highlight_comments: true,
    keywords: &[
        bucket!(2, ["if", "do"]),
        bucket!(3, ["for", "int"]),
        bucket!(4, ["else", "char", "void", "long", "enum", "case"]),
        bucket!(5, ["while", "break", "const", "float", "short", "union"]),
        bucket!(6, ["return", "static", "struct", "sizeof", "switch", "double"]),
        bucket!(7, ["typedef"]),
        bucket!(8, ["continue", "unsigned"]),
        bucket!(9, ["volatile"]),
    ],
};

/// Select a profile by matching the path's extension (the text after the
/// last `.`), case-sensitively, against each profile's extension list.
pub fn select_profile(path: &[u8]) -> Option<&'static LanguageProfile> {
    let dot = path.iter().rposition(|&b| b == b'.')?;
    let ext = &path[dot + 1..];
    for profile in [&RUST_LIKE, &C_LIKE] {
        if profile
            .extensions
            .iter()
            .any(|e| e.as_bytes() == ext)
        {
            return Some(profile);
        }
    }
    None
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Produce a per-byte color-class sequence for `bytes`, following the rules
/// in spec §4.5, left to right. Returns a vector of the same length as
/// `bytes` regardless of whether `profile` is `Some`.
pub fn highlight_line(bytes: &[u8], profile: Option<&LanguageProfile>) -> Vec<ColorClass> {
    let mut colors = vec![ColorClass::Normal; bytes.len()];
    let Some(profile) = profile else {
        return colors;
    };
    let n = bytes.len();
    let mut i = 0;
    while i < n {
        if profile.highlight_comments {
            if let Some(marker) = profile.line_comment {
                if bytes[i..].starts_with(marker.as_bytes()) {
                    for slot in colors.iter_mut().skip(i) {
                        *slot = ColorClass::Comment;
                    }
                    return colors;
                }
            }
        }
        let b = bytes[i];
        if profile.highlight_strings && b == b'"' {
            let start = i;
            i += 1;
            while i < n && bytes[i] != b'"' {
                i += 1;
            }
            if i < n {
                i += 1; // consume closing quote
            }
            for slot in colors.iter_mut().take(i).skip(start) {
                *slot = ColorClass::String;
            }
            continue;
        }
        if profile.highlight_chars && b == b'\'' {
            let start = i;
            i += 1;
            while i < n && bytes[i] != b'\'' {
                i += 1;
            }
            if i < n {
                i += 1;
            }
            for slot in colors.iter_mut().take(i).skip(start) {
                *slot = ColorClass::Char;
            }
            continue;
        }
        if profile.highlight_numbers && b.is_ascii_digit() {
            let start = i;
            while i < n && bytes[i].is_ascii_digit() {
                i += 1;
            }
            for slot in colors.iter_mut().take(i).skip(start) {
                *slot = ColorClass::Number;
            }
            continue;
        }
        if is_ident_start(b) {
            let start = i;
            while i < n && is_ident_continue(bytes[i]) {
                i += 1;
            }
            let class = if profile.is_keyword(&bytes[start..i]) {
                ColorClass::Keyword
            } else {
                ColorClass::Normal
            };
            for slot in colors.iter_mut().take(i).skip(start) {
                *slot = class;
            }
            continue;
        }
        i += 1;
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_vs_identifier() {
        let colors = highlight_line(b"let foo = 1;", Some(&RUST_LIKE));
        assert_eq!(colors[0], ColorClass::Keyword); // l
        assert_eq!(colors[2], ColorClass::Keyword); // t
        assert_eq!(colors[4], ColorClass::Normal); // f(oo)
        assert_eq!(colors[10], ColorClass::Number); // '1'
    }

    #[test]
    fn comment_terminates_line() {
        let colors = highlight_line(b"x // trailing", Some(&RUST_LIKE));
        assert_eq!(colors[0], ColorClass::Normal);
        assert_eq!(colors[2], ColorClass::Comment);
        assert_eq!(colors[12], ColorClass::Comment);
    }

    #[test]
    fn string_literal_to_closing_quote_or_eol() {
        let colors = highlight_line(br#"a "bc" d"#, Some(&RUST_LIKE));
        assert_eq!(colors[2], ColorClass::String);
        assert_eq!(colors[5], ColorClass::String);
        assert_eq!(colors[7], ColorClass::Normal);

        let unterminated = highlight_line(br#"a "bc"#, Some(&RUST_LIKE));
        assert_eq!(unterminated[2], ColorClass::String);
        assert_eq!(unterminated[4], ColorClass::String);
    }

    #[test]
    fn no_profile_is_all_normal() {
        let colors = highlight_line(b"let x = 1;", None);
        assert!(colors.iter().all(|c| matches!(c, ColorClass::Normal)));
    }

    #[test]
    fn select_profile_by_extension() {
        assert!(select_profile(b"main.rs").is_some());
        assert!(select_profile(b"main.c").is_some());
        assert!(select_profile(b"README").is_none());
        assert!(select_profile(b"README.md").is_none());
    }
}
