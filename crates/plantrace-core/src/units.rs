//! Real-world units and scale
//!
//! Geometry is stored in image-pixel space. Meters only appear through a
//! calibrated [`Scale`] (pixels per meter) when quantities are derived or
//! when the user enters a distance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{EPSILON, MIN_SNAP_SCREEN_PX, SNAP_DISTANCE_METER};
use crate::error::InputError;

/// Quantity unit of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Running meters
    Meter,
    /// Square meters
    SquareMeter,
    /// Single piece
    Item,
    /// Set of fittings
    Set,
}

impl UnitKind {
    /// Whether the quantity is a counted unit rather than a measured one
    pub fn is_counted(&self) -> bool {
        matches!(self, Self::Item | Self::Set)
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meter => write!(f, "m"),
            Self::SquareMeter => write!(f, "m²"),
            Self::Item => write!(f, "item"),
            Self::Set => write!(f, "set"),
        }
    }
}

impl FromStr for UnitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" => Ok(Self::Meter),
            "m²" | "m2" | "sqm" => Ok(Self::SquareMeter),
            "item" => Ok(Self::Item),
            "set" => Ok(Self::Set),
            _ => Err(format!("Unknown unit: {}", s)),
        }
    }
}

/// Calibrated image scale in pixels per meter
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Scale(f64);

impl Scale {
    /// Creates a scale from a pixels-per-meter value.
    pub fn new(pixels_per_meter: f64) -> Result<Self, InputError> {
        if !pixels_per_meter.is_finite() || pixels_per_meter <= 0.0 {
            return Err(InputError::OutOfRange {
                field: "scale".to_string(),
                expected: "a positive pixels-per-meter value".to_string(),
                value: pixels_per_meter,
            });
        }
        Ok(Self(pixels_per_meter))
    }

    /// Derives a scale from a measured pixel distance and the real distance it spans.
    ///
    /// ```text
    /// scale = pixel_distance / meters
    /// ```
    ///
    /// A zero pixel distance (both picks on the same spot) is refused, as is
    /// a non-positive meter value.
    pub fn from_calibration(pixel_distance: f64, meters: f64) -> Result<Self, InputError> {
        if !meters.is_finite() || meters <= 0.0 {
            return Err(InputError::OutOfRange {
                field: "distance".to_string(),
                expected: "greater than 0".to_string(),
                value: meters,
            });
        }
        if !pixel_distance.is_finite() || pixel_distance <= EPSILON {
            return Err(InputError::CalibrationRejected {
                reason: "the two reference points coincide".to_string(),
            });
        }
        Self::new(pixel_distance / meters)
    }

    /// Pixels per meter.
    pub fn pixels_per_meter(&self) -> f64 {
        self.0
    }

    /// Meters per pixel.
    pub fn meters_per_pixel(&self) -> f64 {
        1.0 / self.0
    }

    /// Converts a pixel length to meters.
    pub fn to_meters(&self, pixels: f64) -> f64 {
        pixels / self.0
    }

    /// Converts a length in meters to pixels.
    pub fn to_pixels(&self, meters: f64) -> f64 {
        meters * self.0
    }

    /// Converts a pixel area to square meters.
    pub fn to_square_meters(&self, square_pixels: f64) -> f64 {
        let mpp = self.meters_per_pixel();
        square_pixels * mpp * mpp
    }
}

impl TryFrom<f64> for Scale {
    type Error = InputError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Scale> for f64 {
    fn from(scale: Scale) -> Self {
        scale.0
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} px/m", self.0)
    }
}

/// Snap radius in screen pixels
///
/// ```text
/// snap_px = max(snap_meters * scale, min_screen_px)   (scale set)
/// snap_px = min_screen_px                             (no scale)
/// ```
pub fn snap_distance_pixels(scale: Option<Scale>, snap_meters: f64, min_screen_px: f64) -> f64 {
    match scale {
        Some(scale) => scale.to_pixels(snap_meters).max(min_screen_px),
        None => min_screen_px,
    }
}

/// Snap radius using the factory defaults.
pub fn default_snap_distance_pixels(scale: Option<Scale>) -> f64 {
    snap_distance_pixels(scale, SNAP_DISTANCE_METER, MIN_SNAP_SCREEN_PX)
}

/// Parse user-entered text as a finite number
///
/// * `field` - Name of the field, used in the error
/// * `text` - Raw text from the input dialog
pub fn parse_number(field: &str, text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => {
            tracing::debug!("Rejected numeric input for {}: {:?}", field, text);
            Err(InputError::NotANumber {
                field: field.to_string(),
                text: text.to_string(),
            })
        }
    }
}

/// Parse user-entered text as a strictly positive number
pub fn parse_positive(field: &str, text: &str) -> Result<f64, InputError> {
    let value = parse_number(field, text)?;
    if value <= 0.0 {
        return Err(InputError::OutOfRange {
            field: field.to_string(),
            expected: "greater than 0".to_string(),
            value,
        });
    }
    Ok(value)
}

/// Format a quantity for display with its unit
pub fn format_quantity(value: f64, unit: UnitKind) -> String {
    if unit.is_counted() {
        format!("{:.0} {}", value, unit)
    } else {
        format!("{:.2} {}", value, unit)
    }
}
