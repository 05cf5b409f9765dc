//! Drawing state machine.
//!
//! Turns model-space clicks into site points, placed items and freeform
//! drawings. The machine never touches committed state: it reports what a
//! click produced through [`DrawOutcome`] and the controller applies it.
//!
//! ```text
//! Idle --click--> Accumulating --closing click--> AwaitingConfirmation
//!   ^                  |                                 |
//!   +--- arity reached (commit) / clear / cancel --------+--- confirm / cancel
//! ```
//!
//! The site is the exception to `Accumulating`: its traced points are
//! committed one by one, so the machine reads them from the [`Site`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{GeometryKind, ItemKind};
use crate::geometry::{clip_to_boundary, ClipOutcome};
use crate::model::{DrawingElement, DrawingTool, LineStyle, PlacedItem, Point, Site};
use crate::snapping::{
    is_closing_click, orthogonal_lock, proximity_snap, SnapThresholds, SnapTarget, Snapped,
};

/// Active editor tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "arg", rename_all = "snake_case")]
pub enum ToolMode {
    #[default]
    Select,
    DrawSite,
    AddItem(ItemKind),
    EditSite,
    SetScale,
    Draw(DrawingTool),
}

impl ToolMode {
    /// Tools during which pan/zoom gestures are suspended.
    pub fn suspends_gestures(&self) -> bool {
        matches!(self, Self::DrawSite | Self::SetScale)
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => write!(f, "Select"),
            Self::DrawSite => write!(f, "Draw site"),
            Self::AddItem(kind) => write!(f, "Add {}", kind),
            Self::EditSite => write!(f, "Edit site"),
            Self::SetScale => write!(f, "Set scale"),
            Self::Draw(tool) => write!(f, "Draw {}", tool),
        }
    }
}

/// A closed polygon waiting for the user to confirm it.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingConfirmation {
    Site {
        points: Vec<Point>,
    },
    Item {
        kind: ItemKind,
        points: Vec<Point>,
        /// The points were cut to the site boundary.
        clipped: bool,
    },
}

impl PendingConfirmation {
    pub fn points(&self) -> &[Point] {
        match self {
            Self::Site { points } | Self::Item { points, .. } => points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DrawPhase {
    #[default]
    Idle,
    Accumulating {
        points: Vec<Point>,
    },
    AwaitingConfirmation(PendingConfirmation),
}

/// What a click produced.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    /// Nothing changed
    Ignored,
    /// A transient point was accumulated
    PointAdded(Snapped),
    /// A site point must be appended and committed
    SitePointAdded(Point),
    /// A closed polygon is waiting for confirmation
    ConfirmationRequested,
    /// A fixed-arity item is complete
    ItemPlaced(PlacedItem),
    /// A freeform drawing is complete
    DrawingPlaced(DrawingElement),
}

#[derive(Debug, Clone, Default)]
pub struct DrawingMachine {
    phase: DrawPhase,
}

impl DrawingMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DrawPhase {
        &self.phase
    }

    /// Points accumulated for the current item or drawing.
    pub fn in_progress_points(&self) -> &[Point] {
        match &self.phase {
            DrawPhase::Accumulating { points } => points,
            _ => &[],
        }
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        match &self.phase {
            DrawPhase::AwaitingConfirmation(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn is_awaiting_confirmation(&self) -> bool {
        self.pending().is_some()
    }

    pub fn reset(&mut self) {
        self.phase = DrawPhase::Idle;
    }

    fn take_points(&mut self) -> Vec<Point> {
        match std::mem::take(&mut self.phase) {
            DrawPhase::Accumulating { points } => points,
            _ => Vec::new(),
        }
    }

    /// Site tracing click.
    pub fn click_site(&mut self, raw: Point, site: &Site, t: &SnapThresholds) -> DrawOutcome {
        if self.is_awaiting_confirmation() || site.is_finalized() {
            return DrawOutcome::Ignored;
        }

        if is_closing_click(raw, site.points(), 3, t.close) {
            tracing::debug!("Site ring closed with {} points", site.len());
            self.phase = DrawPhase::AwaitingConfirmation(PendingConfirmation::Site {
                points: site.points().to_vec(),
            });
            return DrawOutcome::ConfirmationRequested;
        }

        DrawOutcome::SitePointAdded(Self::site_point(raw, site, t))
    }

    /// Where a site click at `raw` lands: locked to an axis of the last point.
    pub fn site_point(raw: Point, site: &Site, t: &SnapThresholds) -> Point {
        match site.last() {
            Some(previous) => orthogonal_lock(previous, raw, site.points(), t.snap),
            None => raw,
        }
    }

    /// Where the next click for `kind` would land given the points placed so far.
    pub fn item_point(
        &self,
        kind: ItemKind,
        raw: Point,
        site: &Site,
        items: &[PlacedItem],
        t: &SnapThresholds,
    ) -> Snapped {
        Self::resolve_item_point(kind, raw, self.in_progress_points(), site, items, t)
    }

    // Flooring and tatami lock to an axis from the second point on; every
    // other point snaps to nearby geometry.
    fn resolve_item_point(
        kind: ItemKind,
        raw: Point,
        points: &[Point],
        site: &Site,
        items: &[PlacedItem],
        t: &SnapThresholds,
    ) -> Snapped {
        match points.last() {
            Some(&previous) if kind.uses_orthogonal_lock() => Snapped {
                point: orthogonal_lock(previous, raw, points.iter().chain(site.points()), t.snap),
                target: SnapTarget::Axis,
            },
            _ => proximity_snap(raw, site, items, t.snap),
        }
    }

    /// Item placement click.
    pub fn click_item(
        &mut self,
        kind: ItemKind,
        raw: Point,
        site: &Site,
        items: &[PlacedItem],
        t: &SnapThresholds,
    ) -> DrawOutcome {
        if self.is_awaiting_confirmation() {
            return DrawOutcome::Ignored;
        }

        let info = kind.info();
        let mut points = self.take_points();

        // A ring can only close once it has enough corners to be a polygon
        if info.geometry == GeometryKind::Polygon
            && is_closing_click(raw, &points, info.points_required, t.close)
        {
            let outcome = if kind.clips_to_site() && site.is_finalized() {
                clip_to_boundary(&points, site.points())
            } else {
                ClipOutcome::Unclipped(points)
            };
            let clipped = outcome.was_clipped();
            self.phase = DrawPhase::AwaitingConfirmation(PendingConfirmation::Item {
                kind,
                points: outcome.into_points(),
                clipped,
            });
            return DrawOutcome::ConfirmationRequested;
        }

        let snapped = Self::resolve_item_point(kind, raw, &points, site, items, t);
        points.push(snapped.point);

        if info.geometry != GeometryKind::Polygon && points.len() >= info.points_required {
            let item = PlacedItem::new(kind, points);
            tracing::debug!("Placed {} ({})", kind, item.id);
            return DrawOutcome::ItemPlaced(item);
        }

        self.phase = DrawPhase::Accumulating { points };
        DrawOutcome::PointAdded(snapped)
    }

    /// Freeform drawing click. Drawings do not snap.
    pub fn click_drawing(&mut self, tool: DrawingTool, style: LineStyle, raw: Point) -> DrawOutcome {
        if self.is_awaiting_confirmation() {
            return DrawOutcome::Ignored;
        }

        let mut points = self.take_points();
        points.push(raw);

        if points.len() >= tool.points_required() {
            return DrawOutcome::DrawingPlaced(DrawingElement::new(tool, points, style));
        }

        self.phase = DrawPhase::Accumulating { points };
        DrawOutcome::PointAdded(Snapped::raw(raw))
    }

    /// Accepts the pending polygon.
    pub fn confirm(&mut self) -> Option<PendingConfirmation> {
        match std::mem::take(&mut self.phase) {
            DrawPhase::AwaitingConfirmation(pending) => Some(pending),
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Rejects the pending polygon and discards accumulated points.
    pub fn cancel(&mut self) -> Option<PendingConfirmation> {
        match std::mem::take(&mut self.phase) {
            DrawPhase::AwaitingConfirmation(pending) => Some(pending),
            _ => None,
        }
    }

    /// Secondary action for item and drawing tools: drop accumulated points.
    pub fn clear_points(&mut self) -> bool {
        match self.phase {
            DrawPhase::Accumulating { .. } => {
                self.phase = DrawPhase::Idle;
                true
            }
            _ => false,
        }
    }
}
