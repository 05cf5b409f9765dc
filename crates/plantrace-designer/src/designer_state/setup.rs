//! Setup workflow, background loading and view rotation.

use plantrace_core::{IngestError, InputError};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::DesignerState;
use crate::drawing::ToolMode;
use crate::ingest::{decode_background, BackgroundImage, PdfRasterizer};
use crate::model::Site;
use crate::viewport::ViewTransform;

/// Guided setup steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupStep {
    LoadImage = 1,
    AdjustRotation = 2,
    TraceSite = 3,
    CalibrateScale = 4,
    Complete = 5,
}

impl SetupStep {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::LoadImage),
            2 => Some(Self::AdjustRotation),
            3 => Some(Self::TraceSite),
            4 => Some(Self::CalibrateScale),
            5 => Some(Self::Complete),
            _ => None,
        }
    }

    /// Tool the step pins the editor to.
    pub fn required_tool(&self) -> Option<ToolMode> {
        match self {
            Self::TraceSite => Some(ToolMode::DrawSite),
            Self::CalibrateScale => Some(ToolMode::SetScale),
            _ => None,
        }
    }
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LoadImage => "load image",
            Self::AdjustRotation => "adjust rotation",
            Self::TraceSite => "trace site",
            Self::CalibrateScale => "calibrate scale",
            Self::Complete => "complete",
        };
        write!(f, "{} ({})", self.number(), name)
    }
}

impl DesignerState {
    pub(crate) fn enter_step(&mut self, step: SetupStep) {
        tracing::info!("Setup step {}", step);
        self.setup_step = step;
        self.force_tool(step.required_tool().unwrap_or(ToolMode::Select));
    }

    /// Re-derives the step from the site and scale once rotation is done,
    /// so undo and redo cannot leave the workflow ahead of the document.
    pub(crate) fn sync_setup_step(&mut self) {
        if self.setup_step < SetupStep::TraceSite {
            return;
        }
        let step = if !self.site.is_finalized() {
            SetupStep::TraceSite
        } else if self.scale.is_none() {
            SetupStep::CalibrateScale
        } else {
            SetupStep::Complete
        };
        if step != self.setup_step {
            self.enter_step(step);
        }
    }

    /// Replaces the whole document with a new background.
    ///
    /// Image, site, items, drawings, scale, history, view and tool are all
    /// reset together.
    pub fn apply_background(&mut self, background: BackgroundImage) {
        let (width, height) = background.size();
        self.reset_transient();
        self.background = Some(background);
        self.site = Site::new();
        self.items.clear();
        self.drawings.clear();
        self.scale = None;
        self.selected = None;
        self.history.clear();
        self.view = ViewTransform::with_settings(width, height, &self.config.view);
        self.enter_step(SetupStep::AdjustRotation);
    }

    /// Decodes `bytes` and applies the result. On error nothing changes.
    pub fn load_background_bytes(
        &mut self,
        bytes: &[u8],
        rasterizer: Option<&dyn PdfRasterizer>,
    ) -> Result<(), IngestError> {
        let background =
            decode_background(bytes, rasterizer, self.config.ingest.pdf_raster_scale)?;
        self.apply_background(background);
        Ok(())
    }

    pub fn rotate_view_90(&mut self) {
        self.view.rotate_90();
    }

    pub fn set_view_rotation(&mut self, degrees: f64) {
        self.view.set_rotation(degrees);
    }

    /// Accepts the image orientation and moves on to tracing.
    pub fn confirm_rotation(&mut self) -> Result<(), InputError> {
        if self.setup_step != SetupStep::AdjustRotation {
            return Err(InputError::NotAvailable {
                reason: format!("rotation is adjusted in step 2, current step is {}", self.setup_step),
            });
        }
        self.enter_step(SetupStep::TraceSite);
        Ok(())
    }

    /// Returns to an earlier setup step, discarding the work that followed it.
    pub fn go_to_step(&mut self, n: u8) -> Result<(), InputError> {
        let step = SetupStep::from_number(n).ok_or_else(|| InputError::OutOfRange {
            field: "step".to_string(),
            expected: "between 1 and 5".to_string(),
            value: n as f64,
        })?;
        if step > self.setup_step {
            return Err(InputError::NotAvailable {
                reason: format!("step {} has not been reached", step),
            });
        }
        self.abandon_site_edit();

        match step {
            SetupStep::LoadImage | SetupStep::Complete => {}
            SetupStep::AdjustRotation => {
                self.site = Site::new();
                self.scale = None;
                self.commit();
            }
            SetupStep::TraceSite => {
                self.site.reopen();
                self.scale = None;
                self.commit();
            }
            SetupStep::CalibrateScale => {
                self.scale = None;
                self.commit();
            }
        }
        self.enter_step(step);
        Ok(())
    }
}
