//! # PlanTrace Core
//!
//! Core types and utilities shared by the PlanTrace crates.
//! Provides the error taxonomy, real-world units and scale handling,
//! numeric input parsing, and the default tuning constants.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{Error, GeometryError, IngestError, InputError, Result};
pub use units::{parse_number, Scale, UnitKind};
