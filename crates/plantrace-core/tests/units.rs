//! Property tests for scale calibration and snap radius.

#[path = "units/scale.rs"]
mod scale;
