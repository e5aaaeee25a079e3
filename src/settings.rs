//! Engine settings loaded from a RON file

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::rasterizer::{DirectionalLight, RasterSettings, Vec3};

#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(e: ron::error::SpannedError) -> Self {
        SettingsError::ParseError(e)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(e) => write!(f, "IO error: {}", e),
            SettingsError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Tunables for the demo binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub show_uvs: bool,
    pub ambient: f32,
    pub intensity: f32,
    /// Radians per second the sun direction swings through
    pub day_cycle_speed: f32,
    pub start_x: f32,
    pub start_z: f32,
    pub move_speed: f32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            show_uvs: false,
            ambient: 0.3,
            intensity: 0.7,
            day_cycle_speed: 0.1,
            start_x: 16.0,
            start_z: 16.0,
            move_speed: 8.0,
        }
    }
}

impl EngineSettings {
    pub fn raster_settings(&self, sun_angle: f32) -> RasterSettings {
        RasterSettings {
            light: DirectionalLight {
                dir: Vec3::new(sun_angle.cos(), -1.0, sun_angle.sin()).normalize(),
                ambient: self.ambient,
                intensity: self.intensity,
            },
            show_uvs: self.show_uvs,
        }
    }
}

/// Load settings from a RON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<EngineSettings, SettingsError> {
    let contents = fs::read_to_string(path)?;
    let settings: EngineSettings = ron::from_str(&contents)?;
    Ok(settings)
}

/// Load settings, falling back to defaults when the file is missing
/// or malformed
pub fn load_settings_or_default<P: AsRef<Path>>(path: P) -> EngineSettings {
    match load_settings(path.as_ref()) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("settings {}: {}; using defaults", path.as_ref().display(), e);
            EngineSettings::default()
        }
    }
}
