//! # PlanTrace
//!
//! Floor-plan and site-plan digitizer. A scanned plan is loaded as a
//! background, the site boundary and catalog items are traced over it, a
//! real-world scale is calibrated from a known distance, and quantities and
//! a cost estimate are derived from the traced geometry.
//!
//! ## Architecture
//!
//! PlanTrace is organized as a workspace with multiple crates:
//!
//! 1. **plantrace-core** - Error types, units, scale and numeric input parsing
//! 2. **plantrace-settings** - Editor configuration and its persistence
//! 3. **plantrace-designer** - Geometry, snapping, drawing, editing, viewport,
//!    gestures, history, quote and the `DesignerState` controller
//! 4. **plantrace** - Headless session replay binary that integrates all crates
//!
//! ## Features
//!
//! - **Tracing**: site boundary with orthogonal lock and ring closing
//! - **Catalog**: interior and exterior items, polygon/line/point geometry
//! - **Clipping**: floor items are clipped to the site boundary
//! - **Calibration**: pixels-per-meter scale from two site vertices
//! - **Editing**: vertex/edge drags, item move, rotate and flip, undo/redo
//! - **Quote**: per-item quantities in m, m² or pieces with prices

pub mod session;

pub use plantrace_core::{
    parse_number, Error, GeometryError, IngestError, InputError, Result, Scale, UnitKind,
};
pub use plantrace_designer as designer;
pub use plantrace_designer::{
    build_quote, DesignerState, ItemKind, Point, Quote, QuoteLine, SetupStep, ToolMode,
};
pub use plantrace_settings::{Config, SettingsPersistence};
pub use session::{Session, SessionCommand};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, keeping stdout for results
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
