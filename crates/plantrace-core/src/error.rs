//! Error handling for PlanTrace
//!
//! Provides error types for every layer of the editor core:
//! - Ingest errors (unsupported or unreadable background sources)
//! - Geometry errors (degenerate rings, failed boolean operations)
//! - Input errors (rejected numeric entry, operations needing a scale or selection)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Background ingestion error type
///
/// Raised while turning an uploaded file into a raster background.
/// An ingest error never mutates editor state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    /// The bytes are neither a PDF nor a decodable raster image
    #[error("Unsupported file format: {detail}")]
    UnsupportedFormat {
        /// What was detected instead.
        detail: String,
    },

    /// No PDF rasterizer was supplied
    #[error("PDF rasterization is not available")]
    PdfRasterizerUnavailable,

    /// The PDF could not be opened or its first page could not be rendered
    #[error("Corrupt PDF: {reason}")]
    CorruptPdf {
        /// The reason reported by the rasterizer.
        reason: String,
    },

    /// The raster image could not be decoded
    #[error("Failed to decode image: {reason}")]
    Decode {
        /// The decoder message.
        reason: String,
    },

    /// The decoded image has no pixels
    #[error("Image has zero size ({width}x{height})")]
    EmptyImage {
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
    },

    /// The source file could not be read
    #[error("Failed to read {path}: {reason}")]
    Read {
        /// Path that was requested.
        path: String,
        /// The I/O error message.
        reason: String,
    },
}

/// Geometry error type
///
/// Only raised by operations that cannot return an identity result.
/// Callers are expected to recover locally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A ring has fewer than three points
    #[error("Degenerate ring with {points} point(s)")]
    DegenerateRing {
        /// Number of points supplied.
        points: usize,
    },

    /// A coordinate is NaN or infinite
    #[error("Non-finite coordinate ({x}, {y})")]
    NonFinite {
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
    },
}

/// User input error type
///
/// Rejected numeric entry and operations whose preconditions do not hold.
/// State is left untouched when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// Text could not be parsed as a finite number
    #[error("'{text}' is not a valid number for {field}")]
    NotANumber {
        /// The field being edited.
        field: String,
        /// The rejected text.
        text: String,
    },

    /// Value parsed but is outside the accepted range
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        /// The field being edited.
        field: String,
        /// Human readable constraint.
        expected: String,
        /// The rejected value.
        value: f64,
    },

    /// Operation needs a calibrated scale
    #[error("Scale has not been set")]
    ScaleNotSet,

    /// Operation needs a selected item
    #[error("No item selected")]
    NoSelection,

    /// Referenced item does not exist
    #[error("Unknown item: {id}")]
    UnknownItem {
        /// The item id.
        id: String,
    },

    /// Index outside the site boundary
    #[error("Site vertex {index} out of range (site has {len} vertices)")]
    VertexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of vertices.
        len: usize,
    },

    /// Scale calibration could not be applied
    #[error("Scale calibration rejected: {reason}")]
    CalibrationRejected {
        /// Why the calibration was refused.
        reason: String,
    },

    /// Operation is not valid in the current editor state
    #[error("Not available: {reason}")]
    NotAvailable {
        /// What is missing.
        reason: String,
    },
}

/// Unified error type for PlanTrace
#[derive(Error, Debug)]
pub enum Error {
    /// Ingest error
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Input error
    #[error(transparent)]
    Input(#[from] InputError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an ingest error
    pub fn is_ingest_error(&self) -> bool {
        matches!(self, Error::Ingest(_))
    }

    /// Check if this is an input error
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Input(_))
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
