//! Entry point: CLI parsing, logging setup, and the single-threaded
//! `render; read_input; dispatch` loop (spec §5, §9).

use anyhow::Result;
use clap::Parser;
use core_actions::command::ThemeSelector;
use core_actions::dispatch::{dispatch, DispatchOutcome};
use core_config::{Config, Theme, ThemeRegistry};
use core_events::{PendingResize, TerminalEvent};
use core_model::{EditorModel, WindowId};
use core_render::frame;
use core_render::writer::Writer;
use core_terminal::{CrosstermBackend, TerminalBackend};
use core_text::EDITOR_LINE_NUMBER_MARGIN;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "editor", version, about = "A tiling terminal text editor")]
struct Args {
    /// Files to open at startup. The first opens in the initial window;
    /// each further path opens in its own side-by-side split.
    paths: Vec<PathBuf>,
    /// Configuration file path (overrides discovery of `editor.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("editor.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "editor.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn path_to_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

/// Open each CLI path argument, splitting a fresh side-by-side window for
/// every path after the first (spec §4.1's split carries the focused
/// window's file forward; we immediately `open_file` over it instead).
fn open_paths(model: &mut EditorModel, paths: &[PathBuf]) {
    for (i, path) in paths.iter().enumerate() {
        if i > 0 {
            let new_window = model.split_focused(false);
            model.layout_mut().set_focus(new_window);
        }
        let _ = model.open_file(&path_to_bytes(path));
    }
}

fn digit_count(value: usize) -> usize {
    value.to_string().len()
}

/// The focused window's text area, excluding gutter/border and the status
/// row, matching `core-render`'s own gutter geometry (spec §4.4) so a
/// motion's scroll-margin adjustment agrees with what is actually painted.
fn text_region_size(model: &EditorModel, w: WindowId) -> (u16, u16) {
    let (window, file) = model.window_and_file(w);
    let region = model.layout().region(window.region);
    let border_width: u16 = if region.origin.0 > 0 { 2 } else { 0 };
    let max_idx = file.line_count().saturating_sub(1);
    let gutter_width = digit_count(max_idx) + EDITOR_LINE_NUMBER_MARGIN;
    let width = region.size.0.saturating_sub(border_width + gutter_width as u16);
    let height = region.size.1.saturating_sub(1);
    (width, height)
}

/// A theme switch repaints every Window, not just the one whose minibar
/// committed the `theme` command (spec §4.4's color model is shared by the
/// whole frame, not per-window state).
fn mark_all_windows_dirty(model: &mut EditorModel) {
    for w in model.layout().windows() {
        model.layout_mut().window_mut(w).mark_dirty();
    }
}

fn resolve_theme<'a>(registry: &'a ThemeRegistry, selector: &ThemeSelector) -> Option<&'a Theme> {
    match selector {
        ThemeSelector::Name(name) => registry.by_name(name),
        ThemeSelector::Index(index) => registry.by_index(*index),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();

    info!(target: "runtime", "startup");

    let mut backend = CrosstermBackend::new();
    backend.set_title("editor")?;
    let _terminal_guard = backend.enter_guard()?;

    let (width, height) = backend.size()?;
    let mut model = EditorModel::new(width, height);
    open_paths(&mut model, &args.paths);

    let config: Config = core_config::load_from(args.config.clone());
    let mut theme = core_config::startup_theme(&config).clone();

    let mut pending_resize = PendingResize::new();

    'main: loop {
        if let Some((w, h)) = pending_resize.take() {
            model.resize_terminal(w, h);
        }

        let mut writer = Writer::new();
        frame::render(&mut model, &theme, &mut writer);
        writer.flush()?;

        let event = loop {
            if let Some(ev) = backend.poll_event(Duration::from_millis(250))? {
                break ev;
            }
        };

        match event {
            TerminalEvent::Resize(w, h) => pending_resize.set(w, h),
            TerminalEvent::Key(key) => {
                let focus = model.focused_window();
                let region_size = text_region_size(&model, focus);
                match dispatch(&mut model, key, region_size, || false) {
                    DispatchOutcome::Quit => break 'main,
                    DispatchOutcome::Continue => {}
                    DispatchOutcome::ThemeRequested(selector) => match resolve_theme(&config.registry, &selector) {
                        Some(new_theme) => {
                            theme = new_theme.clone();
                            mark_all_windows_dirty(&mut model);
                        }
                        None => {
                            model.layout_mut().window_mut(focus).set_error("unknown theme");
                        }
                    },
                }
            }
        }
    }

    info!(target: "runtime", "shutdown");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_count_matches_decimal_width() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
    }

    #[test]
    fn text_region_size_excludes_gutter_and_status_row() {
        let model = EditorModel::new(20, 10);
        let focus = model.focused_window();
        let (width, height) = text_region_size(&model, focus);
        // width 20, no border (single window), gutter = 1 digit + EDITOR_LINE_NUMBER_MARGIN(2) = 3
        assert_eq!(width, 17);
        assert_eq!(height, 9); // status row excluded
    }

    #[test]
    fn mark_all_windows_dirty_reaches_every_split() {
        let mut model = EditorModel::new(40, 10);
        let first = model.focused_window();
        let second = model.split_focused(false);
        model.layout_mut().window_mut(first).clear_dirty();
        model.layout_mut().window_mut(second).clear_dirty();

        mark_all_windows_dirty(&mut model);

        assert!(model.layout().window(first).redraw());
        assert!(model.layout().window(second).redraw());
    }

    #[test]
    fn resolve_theme_looks_up_by_name_and_index() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(resolve_theme(&registry, &ThemeSelector::Name("light".to_string())).unwrap().name, "light");
        assert_eq!(resolve_theme(&registry, &ThemeSelector::Index(0)).unwrap().name, "dark");
        assert!(resolve_theme(&registry, &ThemeSelector::Name("nope".to_string())).is_none());
    }

    #[test]
    fn open_paths_puts_each_file_in_its_own_split() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "one").unwrap();
        std::fs::write(&b, "two").unwrap();

        let mut model = EditorModel::new(80, 24);
        open_paths(&mut model, &[a, b]);

        assert_eq!(model.layout().leaf_count(), 2);
        assert_eq!(model.files().len(), 2);
    }
}
