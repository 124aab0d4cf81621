// app/settings.rs - Persisted Settings
//
// Stored as JSON in the platform config directory. Every field has a
// default so older or hand-edited files keep loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::capture::CaptureBackend;
use crate::constants::{magnifier, overlay, window};

/// Magnifier geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnifierSettings {
    pub source_width: u32,
    pub source_height: u32,
    pub zoom_width: u32,
    pub zoom_height: u32,
    pub cursor_offset: i32,
}

impl Default for MagnifierSettings {
    fn default() -> Self {
        Self {
            source_width: magnifier::SOURCE_WIDTH,
            source_height: magnifier::SOURCE_HEIGHT,
            zoom_width: magnifier::ZOOM_WIDTH,
            zoom_height: magnifier::ZOOM_HEIGHT,
            cursor_offset: magnifier::CURSOR_OFFSET,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Idle window
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub cover_image: Option<PathBuf>,
    pub saved_image: Option<PathBuf>,

    // Selection overlay
    pub overlay_opacity: f32,
    pub frame_interval_ms: u64,
    pub capture_delay_ms: u64,
    pub capture_backend: CaptureBackend,
    pub magnifier: MagnifierSettings,

    // Behavior
    pub last_save_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_title: window::TITLE.to_string(),
            window_width: window::DEFAULT_WIDTH,
            window_height: window::DEFAULT_HEIGHT,
            cover_image: None,
            saved_image: None,

            overlay_opacity: overlay::DEFAULT_OPACITY,
            frame_interval_ms: overlay::FRAME_INTERVAL_MS,
            capture_delay_ms: overlay::CAPTURE_DELAY_MS,
            capture_backend: CaptureBackend::default(),
            magnifier: MagnifierSettings::default(),

            last_save_dir: None,
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("SnapFrame")
            .join("settings.json")
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`. A missing file is not an error; an unreadable or
    /// malformed one is logged and replaced by defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let settings = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                Ok(settings) => {
                    info!("Settings loaded from {:?}", path);
                    settings
                }
                Err(e) => {
                    error!("Failed to parse settings: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read settings file: {}", e);
                Self::default()
            }
        };
        settings.sanitized()
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, json).with_context(|| format!("Failed to write settings to {:?}", path))?;
        info!("Settings saved to {:?}", path);
        Ok(())
    }

    /// Remember the folder of a saved file and write the settings to
    /// `config_path` when it changed. Returns whether anything was written.
    pub fn remember_save_dir(&mut self, saved_file: &Path, config_path: &Path) -> Result<bool> {
        let dir = match saved_file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => return Ok(false),
        };
        if self.last_save_dir.as_ref() == Some(&dir) {
            return Ok(false);
        }
        info!("Remembering save directory {:?}", dir);
        self.last_save_dir = Some(dir);
        self.save_to(config_path)?;
        Ok(true)
    }

    /// Replace out-of-range values with usable ones
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.overlay_opacity.is_finite() {
            warn!("Invalid overlay opacity, using {}", defaults.overlay_opacity);
            self.overlay_opacity = defaults.overlay_opacity;
        }
        self.overlay_opacity = self.overlay_opacity.clamp(0.0, 1.0);
        if self.window_width == 0 || self.window_height == 0 {
            self.window_width = defaults.window_width;
            self.window_height = defaults.window_height;
        }
        if self.frame_interval_ms == 0 {
            self.frame_interval_ms = defaults.frame_interval_ms;
        }
        let mag = &mut self.magnifier;
        if mag.source_width == 0 || mag.source_height == 0 {
            mag.source_width = magnifier::SOURCE_WIDTH;
            mag.source_height = magnifier::SOURCE_HEIGHT;
        }
        if mag.zoom_width == 0 || mag.zoom_height == 0 {
            mag.zoom_width = magnifier::ZOOM_WIDTH;
            mag.zoom_height = magnifier::ZOOM_HEIGHT;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_in_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "window_width": 640, "magnifier": { "zoom_width": 200 } }"#)
                .unwrap();
        assert_eq!(settings.window_width, 640);
        assert_eq!(settings.window_height, window::DEFAULT_HEIGHT);
        assert_eq!(settings.magnifier.zoom_width, 200);
        assert_eq!(settings.magnifier.zoom_height, magnifier::ZOOM_HEIGHT);
        assert_eq!(settings.capture_backend, CaptureBackend::Xcap);
    }

    #[test]
    fn backend_names_are_lowercase() {
        let settings: Settings = serde_json::from_str(r#"{ "capture_backend": "mock" }"#).unwrap();
        assert_eq!(settings.capture_backend, CaptureBackend::Mock);
    }

    #[test]
    fn sanitize_clamps_and_repairs() {
        let settings = Settings {
            overlay_opacity: 3.0,
            window_width: 0,
            frame_interval_ms: 0,
            magnifier: MagnifierSettings {
                source_width: 0,
                ..MagnifierSettings::default()
            },
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.overlay_opacity, 1.0);
        assert_eq!(settings.window_width, window::DEFAULT_WIDTH);
        assert_eq!(settings.frame_interval_ms, overlay::FRAME_INTERVAL_MS);
        assert_eq!(settings.magnifier.source_width, magnifier::SOURCE_WIDTH);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings = Settings::load_from(Path::new("/definitely/not/here/settings.json"));
        assert_eq!(settings, Settings::default());
    }
}
