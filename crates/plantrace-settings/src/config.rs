//! Configuration for the PlanTrace editor
//!
//! Provides the editor tunables, their defaults, and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Snap radii (meters and screen pixels)
//! - Gesture timing and tolerances
//! - View zoom limits
//! - History depth
//! - Background ingestion
//! - Item catalog selection

use plantrace_core::constants;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult, SettingsResult};

/// Which item catalog the editor offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogVariant {
    /// Interior remodel: flooring, tatami, fittings
    Interior,
    /// Exterior works: parking, fences, gates, planting
    Exterior,
}

impl Default for CatalogVariant {
    fn default() -> Self {
        Self::Exterior
    }
}

impl fmt::Display for CatalogVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interior => write!(f, "Interior"),
            Self::Exterior => write!(f, "Exterior"),
        }
    }
}

/// Snapping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Real-world snap radius in meters
    pub distance_meters: f64,
    /// Minimum snap radius in screen pixels
    pub min_screen_px: f64,
    /// Closed-loop radius as a multiple of the snap radius
    pub close_multiplier: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            distance_meters: constants::SNAP_DISTANCE_METER,
            min_screen_px: constants::MIN_SNAP_SCREEN_PX,
            close_multiplier: constants::CLOSE_SNAP_MULTIPLIER,
        }
    }
}

/// Pointer gesture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Long-press hold time in milliseconds
    pub long_press_ms: u64,
    /// Movement in screen pixels that cancels a long-press
    pub move_tolerance_px: f64,
    /// Fraction of the pinch ratio applied per move (0, 1]
    pub pinch_damping: f64,
    /// Zoom factor per wheel notch
    pub wheel_zoom_step: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            long_press_ms: constants::LONG_PRESS_MS,
            move_tolerance_px: constants::MOVE_TOLERANCE_PX,
            pinch_damping: constants::PINCH_DAMPING,
            wheel_zoom_step: constants::WHEEL_ZOOM_STEP,
        }
    }
}

/// View settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Lower zoom limit
    pub min_zoom: f64,
    /// Upper zoom limit
    pub max_zoom: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            min_zoom: constants::MIN_ZOOM,
            max_zoom: constants::MAX_ZOOM,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of snapshots kept
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_depth: constants::HISTORY_DEPTH,
        }
    }
}

/// Background ingestion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Upscale factor for the first PDF page
    pub pdf_raster_scale: f32,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            pdf_raster_scale: constants::PDF_RASTER_SCALE,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Offered item catalog
    pub catalog: CatalogVariant,
    /// Snapping
    pub snap: SnapSettings,
    /// Gestures
    pub gestures: GestureSettings,
    /// View limits
    pub view: ViewSettings,
    /// Undo history
    pub history: HistorySettings,
    /// Background ingestion
    pub ingest: IngestSettings,
}

enum FileFormat {
    Json,
    Toml,
}

fn file_format(path: &Path) -> ConfigResult<FileFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(FileFormat::Json),
        Some("toml") => Ok(FileFormat::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Load config from file (JSON or TOML, chosen by extension)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = file_format(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML, chosen by extension)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match file_format(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        // Snap radii
        if !(self.snap.distance_meters.is_finite() && self.snap.distance_meters >= 0.0) {
            return Err(ConfigError::out_of_range(
                "snap.distance_meters",
                self.snap.distance_meters,
            ));
        }
        if !(self.snap.min_screen_px.is_finite() && self.snap.min_screen_px > 0.0) {
            return Err(ConfigError::out_of_range(
                "snap.min_screen_px",
                self.snap.min_screen_px,
            ));
        }
        if !(self.snap.close_multiplier.is_finite() && self.snap.close_multiplier >= 1.0) {
            return Err(ConfigError::out_of_range(
                "snap.close_multiplier",
                self.snap.close_multiplier,
            ));
        }

        // Gestures
        if self.gestures.long_press_ms == 0 {
            return Err(ConfigError::out_of_range("gestures.long_press_ms", 0));
        }
        if !(self.gestures.move_tolerance_px.is_finite() && self.gestures.move_tolerance_px > 0.0)
        {
            return Err(ConfigError::out_of_range(
                "gestures.move_tolerance_px",
                self.gestures.move_tolerance_px,
            ));
        }
        if !(self.gestures.pinch_damping > 0.0 && self.gestures.pinch_damping <= 1.0) {
            return Err(ConfigError::out_of_range(
                "gestures.pinch_damping",
                self.gestures.pinch_damping,
            ));
        }
        if !(self.gestures.wheel_zoom_step.is_finite() && self.gestures.wheel_zoom_step > 1.0) {
            return Err(ConfigError::out_of_range(
                "gestures.wheel_zoom_step",
                self.gestures.wheel_zoom_step,
            ));
        }

        // View
        if !(self.view.min_zoom.is_finite() && self.view.min_zoom > 0.0) {
            return Err(ConfigError::out_of_range("view.min_zoom", self.view.min_zoom));
        }
        if !(self.view.max_zoom.is_finite() && self.view.max_zoom > self.view.min_zoom) {
            return Err(ConfigError::out_of_range("view.max_zoom", self.view.max_zoom));
        }

        // History keeps at least the current snapshot
        if self.history.max_depth == 0 {
            return Err(ConfigError::out_of_range("history.max_depth", 0));
        }

        if !(self.ingest.pdf_raster_scale.is_finite() && self.ingest.pdf_raster_scale > 0.0) {
            return Err(ConfigError::out_of_range(
                "ingest.pdf_raster_scale",
                self.ingest.pdf_raster_scale,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.snap.min_screen_px, 45.0);
        assert_eq!(config.gestures.long_press_ms, 400);
        assert_eq!(config.view.max_zoom, 10.0);
        assert_eq!(config.catalog, CatalogVariant::Exterior);
    }

    #[test]
    fn test_validate_rejects_inverted_zoom_limits() {
        let mut config = Config::default();
        config.view.min_zoom = 5.0;
        config.view.max_zoom = 2.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::out_of_range("view.max_zoom", 2.0))
        );
    }

    #[test]
    fn test_validate_rejects_bad_damping() {
        let mut config = Config::default();
        config.gestures.pinch_damping = 0.0;
        assert!(config.validate().is_err());
        config.gestures.pinch_damping = 1.5;
        assert!(config.validate().is_err());
        config.gestures.pinch_damping = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("catalog = \"interior\"\n[snap]\nmin_screen_px = 30.0\n")
            .unwrap();
        assert_eq!(config.catalog, CatalogVariant::Interior);
        assert_eq!(config.snap.min_screen_px, 30.0);
        assert_eq!(config.snap.distance_meters, 0.1);
        assert_eq!(config.history.max_depth, 100);
    }

    #[test]
    fn test_catalog_variant_display() {
        assert_eq!(CatalogVariant::Interior.to_string(), "Interior");
        assert_eq!(CatalogVariant::Exterior.to_string(), "Exterior");
    }
}
