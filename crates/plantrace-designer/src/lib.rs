//! # PlanTrace Designer
//!
//! Geometric editing engine for tracing floor and site plans over a scanned
//! background. Raw pointer input is turned into a validated model of a site
//! boundary, catalog items and freeform drawings under a real-world scale,
//! from which a cost estimate is derived.
//!
//! ## Core Components
//!
//! - **Geometry**: distances, winding, areas, pivot transforms and the
//!   boundary intersection used to clip floor items
//! - **Snapping**: vertex/edge snap, orthogonal lock and ring closing with
//!   zoom-invariant radii
//! - **Drawing**: per-tool click state machine
//! - **Editing**: site vertex/edge drags and item move/rotate/flip
//! - **Viewport / Gestures**: pan, zoom and rotation; long-press and pinch
//! - **History**: linear undo/redo over snapshots
//! - **Quote**: quantities and prices per item
//! - **Ingest**: raster decoding and the PDF rasterizer seam
//!
//! ## Architecture
//!
//! ```text
//! pointer events
//!   └── GestureController ── ViewTransform (screen -> model)
//!         └── DrawingMachine / EditingState
//!               └── snapping, geometry
//!                     └── DesignerState (site, items, drawings, scale)
//!                           ├── History (commit)
//!                           └── Quote (derived)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use plantrace_designer::{DesignerState, Point, ToolMode};
//!
//! let mut state = DesignerState::new();
//! state.set_tool(ToolMode::DrawSite)?;
//! for p in [(0.0, 0.0), (400.0, 0.0), (400.0, 300.0), (2.0, 1.0)] {
//!     state.click(Point::new(p.0, p.1));
//! }
//! state.confirm_pending();
//! ```

pub mod catalog;
pub mod designer_state;
pub mod drawing;
pub mod editing;
pub mod geometry;
pub mod gesture;
pub mod history;
pub mod ingest;
pub mod model;
pub mod quote;
pub mod snapping;
pub mod viewport;

pub use catalog::{
    BlockType, BlockWallOptions, FenceType, GeometryKind, ItemInfo, ItemKind, ItemOptions,
    RetainingWallType,
};
pub use designer_state::{DesignerState, SetupStep};
pub use drawing::{DrawOutcome, DrawPhase, DrawingMachine, PendingConfirmation, ToolMode};
pub use editing::{EditingState, SiteHit};
pub use geometry::{ClipOutcome, FlipAxis};
pub use gesture::{GestureController, GestureEvent, PointerId, PointerKind};
pub use history::{History, HistoryState};
pub use ingest::{BackgroundImage, PdfRasterizer, SourceKind};
pub use model::{
    BoundaryType, DrawingElement, DrawingId, DrawingTool, ItemId, LineStyle, PlacedItem, Point,
    Site,
};
pub use quote::{build_quote, Quote, QuoteLine};
pub use snapping::{SnapTarget, SnapThresholds, Snapped};
pub use viewport::ViewTransform;
