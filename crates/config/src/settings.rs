//! Configuration structures for bufnav settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General application settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Key bindings
    #[serde(default)]
    pub keys: KeySettings,

    /// Panel geometry
    #[serde(default)]
    pub layout: LayoutSettings,

    /// Colors
    #[serde(default)]
    pub theme: ThemeSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Capture mouse events (click to select)
    #[serde(default = "default_mouse")]
    pub mouse: bool,

    /// Event poll interval in ms
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Records file (TOML); the built-in sample is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<String>,
}

/// Key bindings, as `ctrl+c` style strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeySettings {
    #[serde(default = "default_quit_key")]
    pub quit: String,

    #[serde(default = "default_down_key")]
    pub down: String,

    #[serde(default = "default_up_key")]
    pub up: String,
}

/// Panel frames as `[x0, y0, x1, y1]`, corners inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default = "default_master_geometry")]
    pub master: [u16; 4],

    #[serde(default = "default_detail_geometry")]
    pub detail: [u16; 4],

    #[serde(default = "default_stats_geometry")]
    pub stats: [u16; 4],
}

/// Color settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSettings {
    /// Color of the focused frame and the highlighted line
    #[serde(default = "default_selected_fg")]
    pub selected_fg: String,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

// Default value functions for serde
fn default_mouse() -> bool {
    defaults::MOUSE
}

fn default_tick_rate_ms() -> u64 {
    defaults::TICK_RATE_MS
}

fn default_quit_key() -> String {
    defaults::QUIT_KEY.to_string()
}

fn default_down_key() -> String {
    defaults::DOWN_KEY.to_string()
}

fn default_up_key() -> String {
    defaults::UP_KEY.to_string()
}

fn default_master_geometry() -> [u16; 4] {
    defaults::MASTER_GEOMETRY
}

fn default_detail_geometry() -> [u16; 4] {
    defaults::DETAIL_GEOMETRY
}

fn default_stats_geometry() -> [u16; 4] {
    defaults::STATS_GEOMETRY
}

fn default_selected_fg() -> String {
    defaults::SELECTED_FG.to_string()
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

// Default implementations
impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            mouse: default_mouse(),
            tick_rate_ms: default_tick_rate_ms(),
            data_file: None,
        }
    }
}

impl Default for KeySettings {
    fn default() -> Self {
        Self {
            quit: default_quit_key(),
            down: default_down_key(),
            up: default_up_key(),
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            master: default_master_geometry(),
            detail: default_detail_geometry(),
            stats: default_stats_geometry(),
        }
    }
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            selected_fg: default_selected_fg(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
        }
    }
}
