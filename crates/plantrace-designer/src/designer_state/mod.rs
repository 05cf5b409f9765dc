//! Designer state manager for UI integration.
//! Owns every piece of editor state and routes input to the engines.
//!
//! This module is split into submodules for better organization:
//! - `history`: Snapshot, commit and undo/redo
//! - `input`: Pointer, wheel and gesture routing
//! - `tools`: Tool switching, clicks and confirmation
//! - `items`: Selection and item edit operations
//! - `site`: Site edits and scale calibration
//! - `setup`: Setup workflow, background loading and view rotation

mod history;
mod input;
mod items;
mod setup;
mod site;
mod tools;

pub use setup::SetupStep;

use plantrace_core::Scale;
use plantrace_settings::Config;
use smallvec::SmallVec;

use crate::catalog::ItemKind;
use crate::drawing::{DrawPhase, DrawingMachine, PendingConfirmation, ToolMode};
use crate::editing::EditingState;
use crate::gesture::GestureController;
use crate::history::History;
use crate::ingest::BackgroundImage;
use crate::model::{DrawingElement, ItemId, LineStyle, PlacedItem, Point, Site};
use crate::quote::{build_quote, Quote};
use crate::snapping::{SnapThresholds, Snapped};
use crate::viewport::ViewTransform;

/// Designer state for UI integration
#[derive(Debug, Clone)]
pub struct DesignerState {
    pub(crate) config: Config,
    pub(crate) history: History,
    pub(crate) site: Site,
    pub(crate) items: Vec<PlacedItem>,
    pub(crate) drawings: Vec<DrawingElement>,
    pub(crate) scale: Option<Scale>,
    pub(crate) tool: ToolMode,
    pub(crate) machine: DrawingMachine,
    /// Site vertices picked for calibration
    pub(crate) scale_picks: SmallVec<[Point; 2]>,
    pub(crate) editing: Option<EditingState>,
    /// Site as it was when the active edit started
    pub(crate) site_before_edit: Option<Site>,
    pub(crate) selected: Option<ItemId>,
    pub(crate) view: ViewTransform,
    pub(crate) gestures: GestureController,
    pub(crate) hover: Option<Snapped>,
    pub(crate) line_style: LineStyle,
    pub(crate) background: Option<BackgroundImage>,
    pub(crate) setup_step: SetupStep,
}

impl DesignerState {
    /// Creates a designer with default settings.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a designer using the given settings.
    pub fn with_config(config: Config) -> Self {
        Self {
            history: History::with_depth(config.history.max_depth),
            site: Site::new(),
            items: Vec::new(),
            drawings: Vec::new(),
            scale: None,
            tool: ToolMode::default(),
            machine: DrawingMachine::new(),
            scale_picks: SmallVec::new(),
            editing: None,
            site_before_edit: None,
            selected: None,
            view: ViewTransform::with_settings(0.0, 0.0, &config.view),
            gestures: GestureController::new(config.gestures.clone()),
            hover: None,
            line_style: LineStyle::default(),
            background: None,
            setup_step: SetupStep::LoadImage,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn drawings(&self) -> &[DrawingElement] {
        &self.drawings
    }

    pub fn scale(&self) -> Option<Scale> {
        self.scale
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    /// Points accumulated for the item or drawing being placed.
    pub fn in_progress_points(&self) -> &[Point] {
        self.machine.in_progress_points()
    }

    pub fn drawing_phase(&self) -> &DrawPhase {
        self.machine.phase()
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.machine.pending()
    }

    pub fn scale_picks(&self) -> &[Point] {
        &self.scale_picks
    }

    pub fn editing(&self) -> Option<&EditingState> {
        self.editing.as_ref()
    }

    pub fn selected_item_id(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewTransform {
        &mut self.view
    }

    /// Snap indicator for the hovered position.
    pub fn hover(&self) -> Option<Snapped> {
        self.hover
    }

    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    pub fn set_line_style(&mut self, style: LineStyle) {
        self.line_style = style;
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    pub fn setup_step(&self) -> SetupStep {
        self.setup_step
    }

    /// Snap radii for the current scale and zoom.
    pub fn thresholds(&self) -> SnapThresholds {
        SnapThresholds::new(self.scale, self.view.zoom(), &self.config.snap)
    }

    /// Catalog entries offered by the configured catalog variant.
    pub fn offered_items(&self) -> &'static [ItemKind] {
        ItemKind::available(self.config.catalog)
    }

    /// Cost estimate for the current items.
    pub fn quote(&self) -> Quote {
        build_quote(&self.items, self.scale)
    }

    /// Drops every transient interaction: accumulated points, pending
    /// confirmation, scale picks and any active direct edit.
    pub(crate) fn reset_transient(&mut self) {
        self.machine.reset();
        self.scale_picks.clear();
        self.editing = None;
        self.site_before_edit = None;
        self.hover = None;
    }
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new()
    }
}
