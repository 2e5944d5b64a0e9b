//! User settings and preferences
//!
//! Persisted as JSON in the data directory. A missing or malformed file
//! falls back to defaults; the file is written back whenever a setting
//! changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Crosshair rendering styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CrosshairStyle {
    /// Four gapped lines plus a center dot
    #[default]
    Cross,
    /// A single dot
    Dot,
    /// A thin circle with a center dot
    Circle,
}

impl CrosshairStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrosshairStyle::Cross => "cross",
            CrosshairStyle::Dot => "dot",
            CrosshairStyle::Circle => "circle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cross" | "default" => Some(CrosshairStyle::Cross),
            "dot" => Some(CrosshairStyle::Dot),
            "circle" => Some(CrosshairStyle::Circle),
            _ => None,
        }
    }

    /// The next style in cycling order (wraps around)
    pub fn next(&self) -> Self {
        match self {
            CrosshairStyle::Cross => CrosshairStyle::Dot,
            CrosshairStyle::Dot => CrosshairStyle::Circle,
            CrosshairStyle::Circle => CrosshairStyle::Cross,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio (carried for the settings file format; playback not built) ===
    pub sound_enabled: bool,
    /// 0.0 - 1.0
    pub music_volume: f32,
    /// 0.0 - 1.0
    pub sfx_volume: f32,

    // === Crosshair ===
    pub crosshair_color: [u8; 3],
    pub crosshair_style: CrosshairStyle,
    /// Pixels across
    pub crosshair_size: f32,

    // === HUD ===
    pub show_fps: bool,
    pub show_stats: bool,

    // === Display / input ===
    pub fullscreen: bool,
    pub mouse_sensitivity: f32,
    /// Extra forgiveness radius (px) applied to hit tests
    pub click_threshold: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_volume: 0.5,
            sfx_volume: 0.7,

            crosshair_color: [255, 70, 85],
            crosshair_style: CrosshairStyle::Cross,
            crosshair_size: 16.0,

            show_fps: true,
            show_stats: true,

            fullscreen: false,
            mouse_sensitivity: 1.0,
            click_threshold: 5.0,
        }
    }
}

impl Settings {
    /// Load settings from disk; any failure falls back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Malformed settings file ({e}), using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Write settings to disk, creating the parent directory if needed
    pub fn save(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    log::warn!("Failed to save settings: {e}");
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to serialize settings: {e}"),
        }
    }

    /// Crosshair color as linear RGBA for the renderer
    pub fn crosshair_rgba(&self) -> [f32; 4] {
        let [r, g, b] = self.crosshair_color;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let loaded = Settings::load(Path::new("/nonexistent/settings.json"));
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.show_fps = false;
        settings.crosshair_style = CrosshairStyle::Circle;
        settings.click_threshold = 8.0;

        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        // serde(default) lets an old/truncated file still load
        let back: Settings = serde_json::from_str(r#"{"show_fps": false}"#).unwrap();
        assert!(!back.show_fps);
        assert_eq!(back.click_threshold, Settings::default().click_threshold);
    }

    #[test]
    fn test_crosshair_style_cycle_covers_all() {
        let mut style = CrosshairStyle::Cross;
        for _ in 0..3 {
            style = style.next();
        }
        assert_eq!(style, CrosshairStyle::Cross);
    }
}
