//! Terminal backend: crossterm owns raw mode, the alternate screen, and the
//! one event source the main loop polls (spec §5, §9).
//!
//! Every crossterm `Event` is translated into this editor's own vocabulary
//! (`core_events::TerminalEvent`) at the boundary, the same way the teacher's
//! key-token translator kept the rest of the editor free of a crossterm
//! dependency. Resizes are never acted on here: `poll_event` only records the
//! latest size into a `PendingResize`, which the main loop drains between
//! frames (spec §5's pending-flag rule — never resize from inside whatever
//! crossterm is doing internally to notice SIGWINCH).

use anyhow::{Context, Result};
use core_events::{KeyCode, KeyEvent, KeyModifiers, TerminalEvent};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::Write;
use std::io::stdout;
use std::time::Duration;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
    active: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }

    /// Block until the terminal has something to say, or `timeout` elapses.
    /// Returns `Ok(None)` on a timeout with nothing pending.
    pub fn poll_event(&self, timeout: Duration) -> Result<Option<TerminalEvent>> {
        if !event::poll(timeout).context("polling terminal for events")? {
            return Ok(None);
        }
        match event::read().context("reading terminal event")? {
            Event::Key(key) => Ok(translate_key(key).map(TerminalEvent::Key)),
            Event::Resize(width, height) => Ok(Some(TerminalEvent::Resize(width, height))),
            // Mouse, focus, paste events have no spec binding; swallow them.
            _ => Ok(None),
        }
    }

    /// Current terminal size in columns/rows. `crossterm::terminal::size`
    /// fails in rare environments (some pty emulators, piped test harnesses)
    /// that don't answer `TIOCGWINSZ`; in that case we fall back to the
    /// classic cursor-position trick: push the cursor far past any real
    /// screen edge, ask the terminal where it actually landed, and read that
    /// back as the size, then restore the cursor (spec §9 open question).
    pub fn size(&self) -> Result<(u16, u16)> {
        match crossterm::terminal::size() {
            Ok(size) => Ok(size),
            Err(_) => self.size_via_cursor_position_probe(),
        }
    }

    fn size_via_cursor_position_probe(&self) -> Result<(u16, u16)> {
        let mut out = stdout();
        execute!(out, MoveTo(9999, 9999)).context("probing size: moving cursor")?;
        let (col, row) =
            crossterm::cursor::position().context("probing size: reading cursor position")?;
        execute!(out, MoveTo(0, 0)).context("probing size: restoring cursor")?;
        out.flush().ok();
        Ok((col + 1, row + 1))
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
            self.entered = true;
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl<'a> Drop for TerminalGuard<'a> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.backend.leave();
        }
    }
}

/// Translate a crossterm key event into this editor's own `KeyEvent`.
/// Returns `None` for keys with no spec meaning (function keys, media keys).
fn translate_key(key: event::KeyEvent) -> Option<KeyEvent> {
    use crossterm::event::{KeyCode as CtCode, KeyModifiers as CtMods};

    let mut mods = KeyModifiers::empty();
    if key.modifiers.contains(CtMods::CONTROL) {
        mods |= KeyModifiers::CTRL;
    }
    if key.modifiers.contains(CtMods::SHIFT) {
        mods |= KeyModifiers::SHIFT;
    }

    let code = match key.code {
        CtCode::Char(c) if c.is_ascii() => KeyCode::Char(c as u8),
        CtCode::Enter => KeyCode::Enter,
        CtCode::Tab => KeyCode::Tab,
        CtCode::Backspace => KeyCode::Backspace,
        CtCode::Delete => KeyCode::Delete,
        CtCode::Esc => KeyCode::Esc,
        CtCode::Up => KeyCode::Up,
        CtCode::Down => KeyCode::Down,
        CtCode::Left => KeyCode::Left,
        CtCode::Right => KeyCode::Right,
        CtCode::Home => KeyCode::Home,
        CtCode::End => KeyCode::End,
        _ => return None,
    };
    Some(KeyEvent::new(code, mods))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode as CtCode, KeyEvent as CtKeyEvent, KeyModifiers as CtMods};

    #[test]
    fn translates_plain_letter() {
        let ev = translate_key(CtKeyEvent::new(CtCode::Char('a'), CtMods::NONE)).unwrap();
        assert_eq!(ev, KeyEvent::plain(KeyCode::Char(b'a')));
    }

    #[test]
    fn translates_ctrl_shift_combo() {
        let ev = translate_key(CtKeyEvent::new(
            CtCode::Right,
            CtMods::CONTROL | CtMods::SHIFT,
        ))
        .unwrap();
        assert_eq!(ev.code, KeyCode::Right);
        assert!(ev.ctrl());
        assert!(ev.shift());
    }

    #[test]
    fn function_keys_have_no_translation() {
        assert!(translate_key(CtKeyEvent::new(CtCode::F(5), CtMods::NONE)).is_none());
    }

    #[test]
    fn non_ascii_char_has_no_translation() {
        assert!(translate_key(CtKeyEvent::new(CtCode::Char('é'), CtMods::NONE)).is_none());
    }
}
