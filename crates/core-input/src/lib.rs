//! Raw-byte key decoder (spec §4.7).
//!
//! This crate has no terminal-library dependency: it turns whatever bytes
//! the terminal handed the main loop into `KeyEvent`s. `core-terminal` is
//! the thing that actually reads bytes from stdin; this crate only knows
//! how to parse the bytes it's given, byte-cell by byte-cell, the same
//! way the buffer model treats every byte as one cell (spec §1).

use core_events::{KeyCode, KeyEvent, KeyModifiers};

/// Decode the next event out of `buf`, returning it along with how many
/// bytes were consumed. Always consumes at least one byte so callers make
/// forward progress even on unrecognized input. `None` means the consumed
/// bytes didn't resolve to anything we emit a keystroke for (an
/// unrecognized escape sequence, or a byte we don't map).
pub fn decode_one(buf: &[u8]) -> (Option<KeyEvent>, usize) {
    if buf.is_empty() {
        return (None, 0);
    }

    match buf[0] {
        0x1b => decode_escape(buf),
        b'\r' | b'\n' => (Some(KeyEvent::plain(KeyCode::Enter)), 1),
        b'\t' => (Some(KeyEvent::plain(KeyCode::Tab)), 1),
        0x7f | 0x08 => (Some(KeyEvent::plain(KeyCode::Backspace)), 1),
        // Ctrl-A .. Ctrl-Z, skipping the control codes with their own named
        // key above (Ctrl-I = Tab, Ctrl-M = Enter, Ctrl-H = Backspace).
        b @ 0x01..=0x1a => {
            let letter = b - 0x01 + b'a';
            (
                Some(KeyEvent::new(KeyCode::Char(letter), KeyModifiers::CTRL)),
                1,
            )
        }
        b if b.is_ascii_graphic() || b == b' ' => (Some(KeyEvent::plain(KeyCode::Char(b))), 1),
        _ => (None, 1),
    }
}

/// Decode a CSI (`ESC [ ...`) or lone `ESC` sequence.
fn decode_escape(buf: &[u8]) -> (Option<KeyEvent>, usize) {
    if buf.len() < 2 {
        return (Some(KeyEvent::plain(KeyCode::Esc)), 1);
    }
    if buf[1] != b'[' {
        // Not a CSI sequence we understand; treat the ESC alone as Esc and
        // let the next byte be reprocessed on its own.
        return (Some(KeyEvent::plain(KeyCode::Esc)), 1);
    }
    if buf.len() < 3 {
        return (None, buf.len());
    }

    // `ESC [ <final>` — unmodified arrow/home/end.
    let bare = match buf[2] {
        b'A' => Some(KeyCode::Up),
        b'B' => Some(KeyCode::Down),
        b'C' => Some(KeyCode::Right),
        b'D' => Some(KeyCode::Left),
        b'H' => Some(KeyCode::Home),
        b'F' => Some(KeyCode::End),
        _ => None,
    };
    if let Some(code) = bare {
        return (Some(KeyEvent::plain(code)), 3);
    }

    // `ESC [ 3 ~` Delete, `ESC [ 3 ; 5 ~` Ctrl-Delete.
    if buf[2] == b'3' {
        if buf.len() >= 4 && buf[3] == b'~' {
            return (Some(KeyEvent::plain(KeyCode::Delete)), 4);
        }
        if buf.len() >= 6 && buf[3] == b';' && buf[4] == b'5' && buf[5] == b'~' {
            return (
                Some(KeyEvent::new(KeyCode::Delete, KeyModifiers::CTRL)),
                6,
            );
        }
        if buf.len() < 6 {
            return (None, buf.len());
        }
    }

    // `ESC [ 1 ; <mod> <final>` — modified arrow/home/end.
    if buf[2] == b'1' {
        if buf.len() < 5 {
            return (None, buf.len());
        }
        if buf[3] != b';' {
            return (None, 3);
        }
        let mods = match buf[4] {
            b'2' => KeyModifiers::SHIFT,
            b'5' => KeyModifiers::CTRL,
            _ => return (None, 5),
        };
        if buf.len() < 6 {
            return (None, buf.len());
        }
        let code = match buf[5] {
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            _ => return (None, 6),
        };
        return (Some(KeyEvent::new(code, mods)), 6);
    }

    (None, 3)
}
