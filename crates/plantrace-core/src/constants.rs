//! Default tuning constants.
//!
//! These are the factory values; `plantrace-settings` exposes each of them
//! as a configurable field.

/// Real-world snap radius in meters, converted to pixels once a scale exists.
pub const SNAP_DISTANCE_METER: f64 = 0.1;

/// Minimum snap radius in screen pixels.
pub const MIN_SNAP_SCREEN_PX: f64 = 45.0;

/// Closed-loop detection uses this multiple of the snap threshold.
pub const CLOSE_SNAP_MULTIPLIER: f64 = 4.0;

/// Lower zoom limit.
pub const MIN_ZOOM: f64 = 0.1;

/// Upper zoom limit.
pub const MAX_ZOOM: f64 = 10.0;

/// Zoom factor applied per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

/// Hold time before a stationary touch becomes a long-press.
pub const LONG_PRESS_MS: u64 = 400;

/// Movement (screen px) that cancels a pending long-press or turns a press into a drag.
pub const MOVE_TOLERANCE_PX: f64 = 10.0;

/// Fraction of the raw pinch ratio applied per move event.
pub const PINCH_DAMPING: f64 = 0.5;

/// Upscale factor for rasterizing the first PDF page.
pub const PDF_RASTER_SCALE: f32 = 2.0;

/// Default number of history snapshots kept.
pub const HISTORY_DEPTH: usize = 100;

/// Coordinates closer than this are treated as the same point.
pub const EPSILON: f64 = 1e-9;
