//! Shared key/event vocabulary (spec §4.7, §5).
//!
//! The editor runs a single-threaded cooperative loop (render; read_input;
//! dispatch) — there is no event channel here, unlike a multi-producer
//! async design. What every other crate needs in common is a vocabulary
//! for "what did the terminal just tell us": a decoded key, or a resize.

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL  = 0b0000_0001;
        const SHIFT = 0b0000_0010;
    }
}

/// A decoded keypress, independent of any particular terminal library
/// (spec §4.7 names the logical keys a binding table dispatches on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(u8),
    Enter,
    Tab,
    Backspace,
    Delete,
    Esc,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub fn ctrl(&self) -> bool {
        self.mods.contains(KeyModifiers::CTRL)
    }

    pub fn shift(&self) -> bool {
        self.mods.contains(KeyModifiers::SHIFT)
    }
}

/// Everything the single-threaded main loop can observe from the terminal
/// in one iteration. `Resize` is handled with a two-step pending-flag
/// pattern rather than acted on immediately (spec §5): the terminal layer
/// records the latest size here, and the main loop applies it between
/// frames, never from inside a signal handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Latest unapplied resize, if any. `set` always keeps only the newest
/// size — coalescing a burst of resize events into the one the loop will
/// actually act on.
#[derive(Debug, Default)]
pub struct PendingResize {
    size: Option<(u16, u16)>,
}

impl PendingResize {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, width: u16, height: u16) {
        self.size = Some((width, height));
    }

    pub fn take(&mut self) -> Option<(u16, u16)> {
        self.size.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_resize_coalesces_to_latest() {
        let mut pending = PendingResize::new();
        pending.set(80, 24);
        pending.set(100, 40);
        assert_eq!(pending.take(), Some((100, 40)));
        assert_eq!(pending.take(), None);
    }

    #[test]
    fn key_event_modifier_helpers() {
        let ev = KeyEvent::new(KeyCode::Char(b'a'), KeyModifiers::CTRL);
        assert!(ev.ctrl());
        assert!(!ev.shift());
    }
}
