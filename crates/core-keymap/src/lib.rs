//! The logical keybinding table (spec §4.7): every `KeyEvent` the decoder
//! can produce is first checked against this table before falling back to
//! "insert this printable byte". There is no chord trie here — every
//! binding in this editor is a single chord, so a flat match suffices.

use core_events::{KeyCode, KeyEvent, KeyModifiers};

/// A logical command a keystroke can resolve to, independent of which key
/// happens to be bound to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    FocusNext,
    FocusPrevious,
    PageUp,
    PageDown,
    Exit,
    Open,
    New,
    Save,
    Command,
    Mark,
    Copy,
    Paste,
    Cut,
    Find,
}

/// Look up the logical binding for a keystroke, if any (spec §4.7).
/// Returns `None` for keys with no global binding — the dispatcher then
/// treats them as ordinary editing input (motion, insertion, deletion).
pub fn resolve(event: KeyEvent) -> Option<Binding> {
    match (event.code, event.mods) {
        (KeyCode::Right, m) if m == KeyModifiers::SHIFT => Some(Binding::FocusNext),
        (KeyCode::Left, m) if m == KeyModifiers::SHIFT => Some(Binding::FocusPrevious),
        (KeyCode::Up, m) if m == KeyModifiers::SHIFT => Some(Binding::PageUp),
        (KeyCode::Down, m) if m == KeyModifiers::SHIFT => Some(Binding::PageDown),
        (KeyCode::Char(b'q'), m) if m == KeyModifiers::CTRL => Some(Binding::Exit),
        (KeyCode::Char(b'g'), m) if m == KeyModifiers::CTRL => Some(Binding::Open),
        (KeyCode::Char(b'n'), m) if m == KeyModifiers::CTRL => Some(Binding::New),
        (KeyCode::Char(b's'), m) if m == KeyModifiers::CTRL => Some(Binding::Save),
        (KeyCode::Char(b'r'), m) if m == KeyModifiers::CTRL => Some(Binding::Command),
        (KeyCode::Char(b'b'), m) if m == KeyModifiers::CTRL => Some(Binding::Mark),
        (KeyCode::Char(b'c'), m) if m == KeyModifiers::CTRL => Some(Binding::Copy),
        (KeyCode::Char(b'v'), m) if m == KeyModifiers::CTRL => Some(Binding::Paste),
        (KeyCode::Char(b'x'), m) if m == KeyModifiers::CTRL => Some(Binding::Cut),
        (KeyCode::Char(b'f'), m) if m == KeyModifiers::CTRL => Some(Binding::Find),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_right_focuses_next() {
        let ev = KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT);
        assert_eq!(resolve(ev), Some(Binding::FocusNext));
    }

    #[test]
    fn ctrl_q_exits() {
        let ev = KeyEvent::new(KeyCode::Char(b'q'), KeyModifiers::CTRL);
        assert_eq!(resolve(ev), Some(Binding::Exit));
    }

    #[test]
    fn plain_arrow_has_no_binding() {
        let ev = KeyEvent::plain(KeyCode::Right);
        assert_eq!(resolve(ev), None);
    }

    #[test]
    fn plain_letter_has_no_binding() {
        let ev = KeyEvent::plain(KeyCode::Char(b'q'));
        assert_eq!(resolve(ev), None);
    }

    #[test]
    fn every_ctrl_letter_binding_is_distinct() {
        let bindings = [
            (b'q', Binding::Exit),
            (b'g', Binding::Open),
            (b'n', Binding::New),
            (b's', Binding::Save),
            (b'r', Binding::Command),
            (b'b', Binding::Mark),
            (b'c', Binding::Copy),
            (b'v', Binding::Paste),
            (b'x', Binding::Cut),
            (b'f', Binding::Find),
        ];
        for (byte, expected) in bindings {
            let ev = KeyEvent::new(KeyCode::Char(byte), KeyModifiers::CTRL);
            assert_eq!(resolve(ev), Some(expected));
        }
    }
}
