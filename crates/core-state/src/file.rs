//! `File`: an in-memory text document (spec §3, §4.2).

use crate::error::EditorError;
use core_text::highlight::{select_profile, LanguageProfile};
use core_text::Line;

/// An ordered sequence of `Line`s, a path, and the dirty/saved flags spec.md
/// §3 defines. A `File` always has at least one line.
pub struct File {
    path: Vec<u8>,
    lines: Vec<Line>,
    saved: bool,
    /// "entire file must be redrawn in all viewing windows" (spec §3).
    redraw: bool,
    highlighter: Option<&'static LanguageProfile>,
}

impl File {
    /// `open_path` — reads the whole file from disk. `\r` is only tolerated
    /// immediately before `\n`; any other occurrence fails the load with
    /// `InvalidLineEnding`. A freshly loaded file is `saved = true`.
    pub fn open_path(path: &[u8]) -> Result<Self, EditorError> {
        let path_str = String::from_utf8_lossy(path).into_owned();
        let content = std::fs::read(&path_str).map_err(|err| {
            tracing::warn!(target: "core_state::file", path = %path_str, %err, "open failed");
            EditorError::FileOpenFailed(path.to_vec())
        })?;
        let lines = split_lines(&content).map_err(|_| {
            tracing::warn!(target: "core_state::file", path = %path_str, "rejected: invalid line ending");
            EditorError::InvalidLineEnding(path.to_vec())
        })?;
        Ok(Self {
            path: path.to_vec(),
            highlighter: select_profile(path),
            lines,
            saved: true,
            redraw: true,
        })
    }

    /// `create_path` — a single empty line, `saved = false`.
    pub fn create_path(path: &[u8]) -> Self {
        Self {
            path: path.to_vec(),
            highlighter: select_profile(path),
            lines: vec![Line::new()],
            saved: false,
            redraw: true,
        }
    }

    /// `save` — writes all lines separated by `\r\n`, no trailing
    /// terminator, truncating the target. Sets `saved = true` on success.
    pub fn save(&mut self) -> Result<(), EditorError> {
        let mut out = Vec::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.extend_from_slice(b"\r\n");
            }
            out.extend_from_slice(line.chars());
        }
        let path_str = String::from_utf8_lossy(&self.path).into_owned();
        std::fs::write(&path_str, out).map_err(|err| {
            tracing::warn!(target: "core_state::file", path = %path_str, %err, "save failed");
            EditorError::FileSaveFailed(self.path.clone())
        })?;
        self.saved = true;
        Ok(())
    }

    pub fn path(&self) -> &[u8] {
        &self.path
    }

    pub fn saved(&self) -> bool {
        self.saved
    }

    pub fn mark_unsaved(&mut self) {
        self.saved = false;
    }

    pub fn redraw(&self) -> bool {
        self.redraw
    }

    pub fn mark_dirty(&mut self) {
        self.redraw = true;
    }

    pub fn clear_dirty(&mut self) {
        self.redraw = false;
    }

    pub fn highlighter(&self) -> Option<&'static LanguageProfile> {
        self.highlighter
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    pub fn line_mut(&mut self, idx: usize) -> Option<&mut Line> {
        self.lines.get_mut(idx)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Insert a freshly created line at `at` (0..=line_count()).
    pub fn insert_line(&mut self, at: usize, line: Line) {
        self.lines.insert(at, line);
    }

    /// Remove the line at `at`. Never called such that `lines` becomes
    /// empty (spec §3 invariant) — callers must replenish if the last line
    /// is removed; in practice every caller in `core-actions` only removes
    /// lines strictly between two other surviving lines.
    pub fn remove_line(&mut self, at: usize) -> Line {
        let line = self.lines.remove(at);
        if self.lines.is_empty() {
            self.lines.push(Line::new());
        }
        line
    }

    /// Re-runs the syntax highlighter over a single line, matching the
    /// per-line contract of spec §4.5.
    pub fn rehighlight_line(&mut self, idx: usize) {
        if let Some(line) = self.lines.get_mut(idx) {
            let colors = core_text::highlight::highlight_line(line.chars(), self.highlighter);
            line.set_colors(colors);
        }
    }
}

/// Split file content into lines per the scanning rule in spec §4.2: `\n`
/// or `\r\n` terminate a line; a lone `\r` not immediately followed by `\n`
/// is rejected. A trailing partial line with no terminator becomes the
/// final line; a file with zero bytes yields one empty line.
fn split_lines(content: &[u8]) -> Result<Vec<Line>, ()> {
    let mut lines = Vec::new();
    let mut current = Vec::new();
    let mut i = 0;
    let n = content.len();
    while i < n {
        match content[i] {
            b'\r' => {
                if i + 1 < n && content[i + 1] == b'\n' {
                    lines.push(Line::from_bytes(std::mem::take(&mut current)));
                    i += 2;
                } else {
                    return Err(());
                }
            }
            b'\n' => {
                lines.push(Line::from_bytes(std::mem::take(&mut current)));
                i += 1;
            }
            b => {
                current.push(b);
                i += 1;
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(Line::from_bytes(current));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_path_is_single_empty_line_unsaved() {
        let f = File::create_path(b"untitled.txt");
        assert_eq!(f.line_count(), 1);
        assert!(!f.saved());
    }

    #[test]
    fn split_lines_accepts_lf_and_crlf() {
        let lines = split_lines(b"a\nb\r\nc").unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].chars(), b"a");
        assert_eq!(lines[1].chars(), b"b");
        assert_eq!(lines[2].chars(), b"c");
    }

    #[test]
    fn split_lines_rejects_lone_cr() {
        assert!(split_lines(b"a\rb\n").is_err());
    }

    #[test]
    fn split_lines_empty_file_has_one_line() {
        let lines = split_lines(b"").unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty());
    }

    #[test]
    fn save_round_trips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");
        let path_bytes = path.to_str().unwrap().as_bytes().to_vec();
        let mut f = File::create_path(&path_bytes);
        f.insert_line(1, Line::from_bytes(b"second".to_vec()));
        f.line_mut(0).unwrap().insert_slice(0, b"first");
        f.save().unwrap();
        let reloaded = File::open_path(&path_bytes).unwrap();
        assert_eq!(reloaded.line_count(), 2);
        assert_eq!(reloaded.line(0).unwrap().chars(), b"first");
        assert_eq!(reloaded.line(1).unwrap().chars(), b"second");

        let disk = std::fs::read(&path).unwrap();
        let mut f2 = File::open_path(&path_bytes).unwrap();
        f2.save().unwrap();
        let disk_again = std::fs::read(&path).unwrap();
        assert_eq!(disk, disk_again, "round trip must be byte-for-byte stable");
    }

    #[test]
    fn open_missing_file_fails() {
        assert!(File::open_path(b"/nonexistent/path/does/not/exist.txt").is_err());
    }
}
