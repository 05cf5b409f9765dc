//! Site boundary edits and scale calibration.

use plantrace_core::units::parse_positive;
use plantrace_core::{InputError, Scale};

use super::DesignerState;
use crate::drawing::ToolMode;
use crate::editing::{hit_test_site, EditingState, SiteHit};
use crate::model::{BoundaryType, Point};
use crate::snapping::nearest_vertex;

impl DesignerState {
    /// Starts a vertex or edge drag at a model-space press. EditSite only.
    pub fn begin_site_edit(&mut self, p: Point) -> bool {
        if self.tool != ToolMode::EditSite || !self.site.is_finalized() {
            return false;
        }
        let edit = match hit_test_site(&self.site, p, self.thresholds().snap) {
            Some(SiteHit::Vertex(index)) => EditingState::begin_vertex(&self.site, index),
            Some(SiteHit::Edge(index)) => EditingState::begin_edge(&self.site, index, p),
            None => None,
        };
        self.start_edit(edit)
    }

    /// Long-press action: grabs the nearest site vertex within the
    /// closed-loop radius.
    pub fn grab_nearest_vertex(&mut self, p: Point) -> bool {
        if self.tool != ToolMode::EditSite || !self.site.is_finalized() || self.editing.is_some() {
            return false;
        }
        let edit = nearest_vertex(p, self.site.points(), self.thresholds().close)
            .and_then(|(index, _)| EditingState::begin_vertex(&self.site, index));
        self.start_edit(edit)
    }

    fn start_edit(&mut self, edit: Option<EditingState>) -> bool {
        let Some(edit) = edit else {
            return false;
        };
        tracing::debug!("Site edit started: {:?}", edit);
        self.site_before_edit = Some(self.site.clone());
        self.editing = Some(edit);
        true
    }

    /// Moves the grabbed vertex or edge to follow the pointer.
    pub fn drag_site_edit(&mut self, p: Point) {
        let Some(edit) = self.editing else {
            return;
        };
        if let Err(e) = edit.apply(&mut self.site, p) {
            tracing::warn!("Site edit dropped: {}", e);
            self.abandon_site_edit();
        }
    }

    /// Ends the active edit, committing once if the site changed.
    pub fn finish_site_edit(&mut self) -> bool {
        if self.editing.take().is_none() {
            return false;
        }
        let changed = self
            .site_before_edit
            .take()
            .is_some_and(|before| before != self.site);
        if changed {
            tracing::info!("Site edit committed");
            self.commit();
        }
        changed
    }

    /// Ends the active edit and restores the site it started from.
    pub fn abandon_site_edit(&mut self) {
        self.editing = None;
        if let Some(before) = self.site_before_edit.take() {
            self.site = before;
        }
    }

    /// Sets the construction type of vertex `index` and the edge leaving it.
    pub fn set_boundary_type(
        &mut self,
        index: usize,
        boundary: BoundaryType,
    ) -> Result<(), InputError> {
        self.site.set_boundary_type(index, boundary)?;
        self.commit();
        Ok(())
    }

    /// Sets the wall height at vertex `index`, in meters.
    pub fn set_vertex_height(&mut self, index: usize, height: f64) -> Result<(), InputError> {
        self.site.set_vertex_height(index, height)?;
        self.commit();
        Ok(())
    }

    /// Sets the scale from two image points and their real distance.
    ///
    /// Rejected input leaves the scale and the picks untouched.
    pub fn calibrate_scale(
        &mut self,
        p1: Point,
        p2: Point,
        meters_text: &str,
    ) -> Result<Scale, InputError> {
        let result = parse_positive("distance", meters_text)
            .and_then(|meters| Scale::from_calibration(p1.distance_to(&p2), meters));
        let scale = match result {
            Ok(scale) => scale,
            Err(e) => {
                tracing::warn!("Scale calibration rejected: {}", e);
                return Err(e);
            }
        };

        tracing::info!("Scale set to {}", scale);
        self.scale = Some(scale);
        self.scale_picks.clear();
        self.commit();
        self.sync_setup_step();
        Ok(scale)
    }

    /// Completes a calibration from the two picked site vertices.
    pub fn confirm_scale_distance(&mut self, meters_text: &str) -> Result<Scale, InputError> {
        match self.scale_picks.as_slice() {
            &[p1, p2] => self.calibrate_scale(p1, p2, meters_text),
            picks => Err(InputError::CalibrationRejected {
                reason: format!("two site vertices are needed, {} picked", picks.len()),
            }),
        }
    }

    pub fn cancel_scale_calibration(&mut self) {
        self.scale_picks.clear();
    }
}
