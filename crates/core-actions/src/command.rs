//! Parser for the `:`-less command strings committed from the command
//! minibar (spec §4.8, §6). Unlike the teacher's `:`-prefixed vim command
//! line, this editor's command buffer has no leading sigil — the whole
//! minibar line *is* the command.

use core_state::EditorError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSelector {
    Name(String),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    SplitStacked,
    SplitSide,
    Theme(ThemeSelector),
    Close,
}

/// Parse one committed command-minibar line (spec §4.8 "command" commit,
/// §6 identifier/number grammar). `split -` and `split |` pick the split
/// direction; `theme <name|index>` switches the palette; `close` removes
/// the focused window.
pub fn parse(raw: &[u8]) -> Result<ParsedCommand, EditorError> {
    let text = String::from_utf8_lossy(raw);
    let trimmed = text.trim();
    let (head, tail) = split_head(trimmed);

    match head {
        "split" => match tail.trim() {
            "-" => Ok(ParsedCommand::SplitStacked),
            "|" => Ok(ParsedCommand::SplitSide),
            _ => Err(EditorError::SplitFailed),
        },
        "theme" => {
            let arg = tail.trim();
            if arg.is_empty() {
                return Err(EditorError::UnknownCommand(trimmed.to_string()));
            }
            if let Ok(index) = arg.parse::<usize>() {
                Ok(ParsedCommand::Theme(ThemeSelector::Index(index)))
            } else if is_identifier(arg) {
                Ok(ParsedCommand::Theme(ThemeSelector::Name(arg.to_string())))
            } else {
                Err(EditorError::UnknownCommand(trimmed.to_string()))
            }
        }
        "close" if tail.trim().is_empty() => Ok(ParsedCommand::Close),
        _ => Err(EditorError::UnknownCommand(trimmed.to_string())),
    }
}

fn split_head(body: &str) -> (&str, &str) {
    let mut idx = 0usize;
    for (offset, ch) in body.char_indices() {
        if ch.is_whitespace() {
            break;
        }
        idx = offset + ch.len_utf8();
    }
    if idx == 0 || idx >= body.len() {
        (body, "")
    } else {
        body.split_at(idx)
    }
}

/// `[A-Za-z0-9_]+`, leading digit permitted (spec §6).
fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
