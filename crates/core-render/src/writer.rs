//! Batches the terminal writes one frame produces into a single flush
//! (spec §4.4 step 6 "single write of the assembled byte buffer").
//!
//! `frame::render` queues cursor moves, line clears, text, and color
//! changes here in order; `flush` is the one place that actually talks to
//! the terminal. Positions are absolute (0,0)-origin; the caller is
//! responsible for bounds.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{Write, stdout};

#[derive(Debug)]
pub enum Command {
    MoveTo(u16, u16),
    ClearLine(u16, u16), // (x,y) start; clears full line before selective repaint (Step 7)
    Print(String),
    SetForeground(Color),
    SetBackground(Color),
    ResetColor,
    HideCursor,
    ShowCursor,
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }
    pub fn clear_line(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::ClearLine(x, y));
    }
    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }
    pub fn set_foreground(&mut self, color: Color) {
        self.cmds.push(Command::SetForeground(color));
    }
    pub fn set_background(&mut self, color: Color) {
        self.cmds.push(Command::SetBackground(color));
    }
    pub fn reset_color(&mut self) {
        self.cmds.push(Command::ResetColor);
    }
    pub fn hide_cursor(&mut self) {
        self.cmds.push(Command::HideCursor);
    }
    pub fn show_cursor(&mut self) {
        self.cmds.push(Command::ShowCursor);
    }
    pub fn flush(self) -> Result<()> {
        let mut out = stdout();
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => {
                    queue!(out, MoveTo(x, y))?;
                }
                Command::ClearLine(_, _) => {
                    // Caller guarantees a preceding MoveTo(0, y) so ClearType::CurrentLine
                    // wipes prior contents (including leftovers from longer previous text).
                    queue!(out, Clear(ClearType::CurrentLine))?;
                }
                Command::Print(s) => {
                    queue!(out, Print(s))?;
                }
                Command::SetForeground(c) => {
                    queue!(out, SetForegroundColor(c))?;
                }
                Command::SetBackground(c) => {
                    queue!(out, SetBackgroundColor(c))?;
                }
                Command::ResetColor => {
                    queue!(out, ResetColor)?;
                }
                Command::HideCursor => {
                    queue!(out, Hide)?;
                }
                Command::ShowCursor => {
                    queue!(out, Show)?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}
