//! Top-level dispatch (spec §4.7): the only entry point the main loop
//! calls. Resolves a `KeyEvent` against the logical binding table, routes
//! it to the minibar or the ordinary editor handlers depending on whether
//! the focused Window has a prompt open, and records it as the Window's
//! `previous_keystroke` afterward.

use crate::command::{self, ParsedCommand, ThemeSelector};
use crate::minibar::{self, MinibarEvent};
use crate::{edit, motion};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_keymap::{resolve, Binding};
use core_model::{EditorModel, LastKeystroke, MinibarMode, WindowId};

/// What the main loop should do after one dispatch call.
pub enum DispatchOutcome {
    /// Keep running.
    Continue,
    /// Ctrl-Q was pressed; terminate cleanly.
    Quit,
    /// A `theme <name|index>` command committed. Switching the active
    /// palette lives outside this crate (spec §6 leaves palette ownership
    /// to the render/config layer), so the caller resolves `selector`
    /// against its `ThemeRegistry` and repaints.
    ThemeRequested(ThemeSelector),
}

/// Dispatch one terminal key event against `model`'s focused window (spec
/// §4.7). `region_size` is that window's text-area extent, used for
/// scroll-margin adjustment after a motion. `should_abort` is forwarded to
/// an in-progress Find search so a fresh keystroke can preempt a stale one.
pub fn dispatch(
    model: &mut EditorModel,
    event: KeyEvent,
    region_size: (u16, u16),
    mut should_abort: impl FnMut() -> bool,
) -> DispatchOutcome {
    let binding = resolve(event);

    // Ctrl-Q is intercepted globally, even while a minibar prompt is open
    // (spec §4.7 "Ctrl-Q is intercepted globally to terminate").
    if binding == Some(Binding::Exit) {
        return DispatchOutcome::Quit;
    }

    let focus = model.focused_window();
    let outcome = if model.layout().window(focus).minibar.is_active() {
        dispatch_minibar(model, focus, event, &mut should_abort)
    } else {
        dispatch_editor(model, focus, event, binding, region_size)
    };

    record_keystroke(model, focus, event);
    outcome
}

fn record_keystroke(model: &mut EditorModel, focus: WindowId, event: KeyEvent) {
    let byte = match event.code {
        KeyCode::Char(b) => Some(b),
        _ => None,
    };
    model.layout_mut().window_mut(focus).previous_keystroke =
        Some(LastKeystroke { ctrl: event.ctrl(), byte });
}

fn dispatch_minibar(
    model: &mut EditorModel,
    focus: WindowId,
    event: KeyEvent,
    should_abort: &mut impl FnMut() -> bool,
) -> DispatchOutcome {
    let (window, file) = model.window_and_file_mut(focus);
    let result = minibar::handle_key(window, file, event, should_abort);

    match result {
        MinibarEvent::Continue | MinibarEvent::Closed => DispatchOutcome::Continue,
        MinibarEvent::Commit { mode, input } => apply_minibar_commit(model, mode, input),
    }
}

fn apply_minibar_commit(model: &mut EditorModel, mode: MinibarMode, input: Vec<u8>) -> DispatchOutcome {
    match mode {
        MinibarMode::Open => {
            let _ = model.open_file(&input);
            DispatchOutcome::Continue
        }
        MinibarMode::New => {
            model.create_file(&input);
            DispatchOutcome::Continue
        }
        MinibarMode::Command => apply_command(model, &input),
        MinibarMode::Find | MinibarMode::Inactive => DispatchOutcome::Continue,
    }
}

fn apply_command(model: &mut EditorModel, input: &[u8]) -> DispatchOutcome {
    let focus = model.focused_window();
    match command::parse(input) {
        Ok(ParsedCommand::SplitStacked) => {
            model.split_focused(true);
            DispatchOutcome::Continue
        }
        Ok(ParsedCommand::SplitSide) => {
            model.split_focused(false);
            DispatchOutcome::Continue
        }
        Ok(ParsedCommand::Close) => {
            model.close_focused();
            DispatchOutcome::Continue
        }
        Ok(ParsedCommand::Theme(selector)) => DispatchOutcome::ThemeRequested(selector),
        Err(err) => {
            model.layout_mut().window_mut(focus).set_error(err.to_string());
            DispatchOutcome::Continue
        }
    }
}

fn dispatch_editor(
    model: &mut EditorModel,
    focus: WindowId,
    event: KeyEvent,
    binding: Option<Binding>,
    region_size: (u16, u16),
) -> DispatchOutcome {
    match binding {
        Some(binding) => dispatch_binding(model, focus, binding, region_size),
        None => dispatch_editing_key(model, focus, event, region_size),
    }
    DispatchOutcome::Continue
}

fn dispatch_binding(model: &mut EditorModel, focus: WindowId, binding: Binding, region_size: (u16, u16)) {
    match binding {
        Binding::Exit => unreachable!("handled in dispatch before routing"),
        Binding::FocusNext => model.focus_next(),
        Binding::FocusPrevious => model.focus_previous(),
        Binding::PageUp => {
            let (window, file) = model.window_and_file_mut(focus);
            motion::page_up(window, file, region_size.1);
            motion::adjust_offset(window, region_size);
        }
        Binding::PageDown => {
            let (window, file) = model.window_and_file_mut(focus);
            motion::page_down(window, file, region_size.1);
            motion::adjust_offset(window, region_size);
        }
        Binding::Open => minibar::open(model.layout_mut().window_mut(focus), MinibarMode::Open),
        Binding::New => minibar::open(model.layout_mut().window_mut(focus), MinibarMode::New),
        Binding::Command => minibar::open(model.layout_mut().window_mut(focus), MinibarMode::Command),
        Binding::Find => minibar::open(model.layout_mut().window_mut(focus), MinibarMode::Find),
        Binding::Save => {
            let _ = model.save_focused();
        }
        Binding::Mark => edit::toggle_mark(model.layout_mut().window_mut(focus)),
        Binding::Copy => {
            let (window, file, clipboard) = model.window_file_clipboard_mut(focus);
            if let Err(err) = edit::copy(window, file, clipboard) {
                window.set_error(err.to_string());
            }
        }
        Binding::Cut => {
            let (window, file, clipboard) = model.window_file_clipboard_mut(focus);
            if let Err(err) = edit::cut(window, file, clipboard) {
                window.set_error(err.to_string());
            }
        }
        Binding::Paste => {
            let (window, file, clipboard) = model.window_file_clipboard_mut(focus);
            if let Err(err) = edit::paste(window, file, clipboard) {
                window.set_error(err.to_string());
            }
        }
    }
}

/// Ordinary editing input: motions, insertion, deletion — anything with
/// no entry in the logical binding table (spec §4.7 "otherwise treated as
/// ordinary editing input").
fn dispatch_editing_key(model: &mut EditorModel, focus: WindowId, event: KeyEvent, region_size: (u16, u16)) {
    let (window, file) = model.window_and_file_mut(focus);

    match event.code {
        KeyCode::Left => motion::left(window, file),
        KeyCode::Right => motion::right(window, file),
        KeyCode::Up => motion::up(window, file),
        KeyCode::Down => motion::down(window, file),
        KeyCode::Home if event.mods == KeyModifiers::SHIFT => motion::shift_home(window),
        KeyCode::End if event.mods == KeyModifiers::SHIFT => motion::shift_end(window, file),
        KeyCode::Home => motion::home(window, file),
        KeyCode::End => motion::end(window, file),
        KeyCode::Enter => edit::insert_newline(window, file),
        KeyCode::Backspace => edit::delete_char(window, file),
        KeyCode::Delete => edit::delete_word_or_unit(window, file, event.ctrl()),
        KeyCode::Char(c) if (0x20..=0x7e).contains(&c) => edit::insert_char(window, file, c),
        _ => return,
    }

    motion::adjust_offset(window, region_size);
}
