//! Theme/palette registry and `editor.toml` loading (spec §4.4 "color
//! model", §6 "themes").
//!
//! A theme is a complete RGB assignment to the renderer's semantic color
//! tokens. Themes are indexed and named; lookup is by case-sensitive name
//! or by numeric index (spec §6). The registry ships two built-in themes
//! and accepts config-defined ones layered on top.

use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::info;

/// An RGB triple (spec §6: "a complete assignment of RGB values").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }
}

/// One RGB value per semantic token the renderer addresses (spec §4.4
/// color model paragraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Palette {
    pub editor_fg: Rgb,
    pub editor_bg: Rgb,
    pub status_fg: Rgb,
    pub status_bg: Rgb,
    pub cursor_normal: Rgb,
    pub cursor_minibar: Rgb,
    pub selected_match_fg: Rgb,
    pub selected_match_bg: Rgb,
    pub match_fg: Rgb,
    pub match_bg: Rgb,
    pub syntax_comment: Rgb,
    pub syntax_keyword: Rgb,
    pub syntax_string: Rgb,
    pub syntax_char: Rgb,
    pub syntax_number: Rgb,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Theme {
    pub name: String,
    pub palette: Palette,
}

fn dark_theme() -> Theme {
    Theme {
        name: "dark".to_string(),
        palette: Palette {
            editor_fg: Rgb::new(0xd4, 0xd4, 0xd4),
            editor_bg: Rgb::new(0x1e, 0x1e, 0x1e),
            status_fg: Rgb::new(0x00, 0x00, 0x00),
            status_bg: Rgb::new(0x61, 0xaf, 0xef),
            cursor_normal: Rgb::new(0xff, 0xff, 0xff),
            cursor_minibar: Rgb::new(0xe5, 0xc0, 0x7b),
            selected_match_fg: Rgb::new(0x00, 0x00, 0x00),
            selected_match_bg: Rgb::new(0xe5, 0xc0, 0x7b),
            match_fg: Rgb::new(0x00, 0x00, 0x00),
            match_bg: Rgb::new(0x98, 0xc3, 0x79),
            syntax_comment: Rgb::new(0x5c, 0x63, 0x70),
            syntax_keyword: Rgb::new(0xc6, 0x78, 0xdd),
            syntax_string: Rgb::new(0x98, 0xc3, 0x79),
            syntax_char: Rgb::new(0x98, 0xc3, 0x79),
            syntax_number: Rgb::new(0xd1, 0x9a, 0x66),
        },
    }
}

fn light_theme() -> Theme {
    Theme {
        name: "light".to_string(),
        palette: Palette {
            editor_fg: Rgb::new(0x1e, 0x1e, 0x1e),
            editor_bg: Rgb::new(0xfa, 0xfa, 0xfa),
            status_fg: Rgb::new(0xff, 0xff, 0xff),
            status_bg: Rgb::new(0x2c, 0x52, 0xa3),
            cursor_normal: Rgb::new(0x00, 0x00, 0x00),
            cursor_minibar: Rgb::new(0x8a, 0x5a, 0x00),
            selected_match_fg: Rgb::new(0xff, 0xff, 0xff),
            selected_match_bg: Rgb::new(0x8a, 0x5a, 0x00),
            match_fg: Rgb::new(0xff, 0xff, 0xff),
            match_bg: Rgb::new(0x3c, 0x8a, 0x3c),
            syntax_comment: Rgb::new(0x8a, 0x8a, 0x8a),
            syntax_keyword: Rgb::new(0x7b, 0x3a, 0xa8),
            syntax_string: Rgb::new(0x3c, 0x8a, 0x3c),
            syntax_char: Rgb::new(0x3c, 0x8a, 0x3c),
            syntax_number: Rgb::new(0xa8, 0x5a, 0x00),
        },
    }
}

/// Indexed + named theme lookup (spec §6). Index 0 is always the registry's
/// default theme.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
}

impl ThemeRegistry {
    pub fn builtin() -> Self {
        Self {
            themes: vec![dark_theme(), light_theme()],
        }
    }

    /// Append config-defined themes after the built-ins, so `[[theme]]`
    /// entries in `editor.toml` can add palettes without displacing the
    /// indices of the built-ins.
    pub fn push(&mut self, theme: Theme) {
        self.themes.push(theme);
    }

    pub fn by_index(&self, index: usize) -> Option<&Theme> {
        self.themes.get(index)
    }

    /// Case-sensitive name lookup (spec §6).
    pub fn by_name(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.name == name)
    }

    pub fn default_theme(&self) -> &Theme {
        &self.themes[0]
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeConfig {
    /// Name of the theme selected at startup; falls back to the registry's
    /// default when absent or unrecognized.
    #[serde(default)]
    pub startup: Option<String>,
    /// User-defined themes layered on top of the two built-ins.
    #[serde(default)]
    pub theme: Vec<Theme>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub file: ConfigFile,
    pub registry: ThemeRegistry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: ConfigFile::default(),
            registry: ThemeRegistry::builtin(),
        }
    }
}

/// Best-effort config path following platform conventions (XDG / AppData
/// Roaming), preferring a working-directory override the same way the
/// teacher's `discover` does.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("editor.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("editor").join("editor.toml");
    }
    PathBuf::from("editor.toml")
}

/// Load `editor.toml` (or the path passed by the binary), falling back to
/// built-in-only defaults on a missing or unparseable file.
pub fn load_from(path: Option<PathBuf>) -> Config {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Config::default();
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let mut registry = ThemeRegistry::builtin();
            for theme in file.theme.theme.clone() {
                registry.push(theme);
            }
            Config { file, registry }
        }
        Err(err) => {
            info!(target: "config", path = %path.display(), %err, "editor.toml parse failed, using defaults");
            Config::default()
        }
    }
}

/// Resolve the theme named in `editor.toml`'s `[theme] startup` field, or
/// the registry default when absent/unknown.
pub fn startup_theme<'a>(config: &'a Config) -> &'a Theme {
    config
        .file
        .theme
        .startup
        .as_deref()
        .and_then(|name| config.registry.by_name(name))
        .unwrap_or_else(|| config.registry.default_theme())
}
