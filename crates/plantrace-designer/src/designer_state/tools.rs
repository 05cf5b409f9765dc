//! Tool switching, canvas clicks and polygon confirmation.

use plantrace_core::InputError;

use super::{DesignerState, SetupStep};
use crate::drawing::{DrawOutcome, PendingConfirmation, ToolMode};
use crate::model::{PlacedItem, Point, Site};
use crate::snapping::nearest_vertex;

impl DesignerState {
    /// Switches the active tool, dropping any in-flight interaction.
    ///
    /// While setup is tracing the site or calibrating the scale the tool is
    /// pinned to that step.
    pub fn set_tool(&mut self, tool: ToolMode) -> Result<(), InputError> {
        if let Some(required) = self.setup_step.required_tool() {
            if tool != required {
                return Err(InputError::NotAvailable {
                    reason: format!("{} is required during setup step {}", required, self.setup_step),
                });
            }
        }
        self.force_tool(tool);
        Ok(())
    }

    pub(crate) fn force_tool(&mut self, tool: ToolMode) {
        self.abandon_site_edit();
        self.reset_transient();
        self.gestures.cancel();
        if !matches!(tool, ToolMode::Select) {
            self.selected = None;
        }
        tracing::debug!("Tool: {} -> {}", self.tool, tool);
        self.tool = tool;
    }

    /// Handles a primary click at a model-space point.
    pub fn click(&mut self, p: Point) {
        if self.machine.is_awaiting_confirmation() {
            tracing::debug!("Click ignored while confirmation is pending");
            return;
        }
        let t = self.thresholds();

        let outcome = match self.tool {
            ToolMode::Select => {
                self.selected = self.item_at(p, t.snap);
                return;
            }
            ToolMode::EditSite => return,
            ToolMode::SetScale => {
                self.pick_scale_vertex(p);
                return;
            }
            ToolMode::DrawSite => self.machine.click_site(p, &self.site, &t),
            ToolMode::AddItem(kind) => {
                self.machine
                    .click_item(kind, p, &self.site, &self.items, &t)
            }
            ToolMode::Draw(tool) => self.machine.click_drawing(tool, self.line_style, p),
        };
        self.apply_outcome(outcome);
    }

    fn apply_outcome(&mut self, outcome: DrawOutcome) {
        match outcome {
            DrawOutcome::Ignored | DrawOutcome::PointAdded(_) => {}
            DrawOutcome::ConfirmationRequested => {
                tracing::debug!("Awaiting confirmation");
            }
            DrawOutcome::SitePointAdded(point) => {
                if self.site.push_point(point) {
                    self.commit();
                }
            }
            DrawOutcome::ItemPlaced(item) => {
                tracing::info!("Placed {} {}", item.kind, item.id);
                self.items.push(item);
                self.commit();
            }
            DrawOutcome::DrawingPlaced(drawing) => {
                tracing::info!("Placed {} drawing", drawing.tool);
                self.drawings.push(drawing);
                self.commit();
            }
        }
    }

    fn pick_scale_vertex(&mut self, p: Point) {
        if self.scale_picks.len() >= 2 {
            return;
        }
        let Some((index, vertex)) = nearest_vertex(p, self.site.points(), self.thresholds().snap)
        else {
            return;
        };
        if self.scale_picks.contains(&vertex) {
            tracing::debug!("Vertex {} already picked", index);
            return;
        }
        self.scale_picks.push(vertex);
    }

    /// Accepts the polygon awaiting confirmation.
    pub fn confirm_pending(&mut self) -> bool {
        let Some(pending) = self.machine.confirm() else {
            return false;
        };
        match pending {
            PendingConfirmation::Site { points } => match Site::finalized(points) {
                Ok(site) => {
                    tracing::info!("Site finalized with {} vertices", site.len());
                    self.site = site;
                    self.commit();
                    if self.setup_step == SetupStep::TraceSite {
                        self.enter_step(SetupStep::CalibrateScale);
                    }
                }
                Err(e) => {
                    tracing::warn!("Site not finalized: {}", e);
                    return false;
                }
            },
            PendingConfirmation::Item { kind, points, clipped } => {
                let item = PlacedItem::new(kind, points);
                tracing::info!("Placed {} {} (clipped: {})", kind, item.id, clipped);
                self.items.push(item);
                self.commit();
            }
        }
        true
    }

    /// Rejects the polygon awaiting confirmation. Traced site points stay.
    pub fn cancel_pending(&mut self) -> bool {
        self.machine.cancel().is_some()
    }

    /// Secondary action: undo the last site point while tracing, otherwise
    /// clear whatever is accumulating.
    pub fn context_menu(&mut self) -> bool {
        if self.machine.is_awaiting_confirmation() {
            return false;
        }
        match self.tool {
            ToolMode::DrawSite => {
                let removed = self.site.pop_point().is_some();
                if removed {
                    self.commit();
                }
                removed
            }
            ToolMode::AddItem(_) | ToolMode::Draw(_) => self.machine.clear_points(),
            ToolMode::SetScale => {
                let had_picks = !self.scale_picks.is_empty();
                self.scale_picks.clear();
                had_picks
            }
            ToolMode::Select | ToolMode::EditSite => false,
        }
    }
}
