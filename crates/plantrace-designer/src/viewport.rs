//! View transform for canvas rendering.
//!
//! Handles conversion between screen coordinates (canvas pixels) and model
//! coordinates (background-image pixels). The transform is applied in two
//! stages: the image is first rotated about its own centre, then the rotated
//! stage is scaled by `zoom` and offset by `pan`.

use std::fmt;

use plantrace_core::constants::{MAX_ZOOM, MIN_ZOOM};
use plantrace_settings::ViewSettings;

use crate::geometry::rotate_about;
use crate::model::Point;

/// Represents the view transformation state (rotation, zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    /// Degrees, clockwise on screen, in [0, 360)
    rotation: f64,
    content_width: f64,
    content_height: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl ViewTransform {
    /// Creates an identity transform for content of the given size.
    pub fn new(content_width: f64, content_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            rotation: 0.0,
            content_width,
            content_height,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }

    /// Creates a transform using configured zoom limits.
    pub fn with_settings(content_width: f64, content_height: f64, settings: &ViewSettings) -> Self {
        Self {
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
            ..Self::new(content_width, content_height)
        }
    }

    /// Centre of the content, the rotation pivot.
    pub fn content_center(&self) -> Point {
        Point::new(self.content_width / 2.0, self.content_height / 2.0)
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to the configured limits.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Sets the image rotation in degrees, normalized to [0, 360).
    pub fn set_rotation(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.rotation = degrees.rem_euclid(360.0);
        }
    }

    /// Turns the image a quarter turn clockwise.
    pub fn rotate_90(&mut self) {
        self.set_rotation(self.rotation + 90.0);
    }

    /// Converts screen coordinates to model coordinates.
    ///
    /// Formula:
    /// ```text
    /// stage = (screen - pan) / zoom
    /// model = rotate(stage, content_center, -rotation)
    /// ```
    pub fn screen_to_model(&self, screen_x: f64, screen_y: f64) -> Point {
        let stage = Point::new(
            (screen_x - self.pan_x) / self.zoom,
            (screen_y - self.pan_y) / self.zoom,
        );
        if self.rotation == 0.0 {
            return stage;
        }
        rotate_about(&[stage], self.content_center(), -self.rotation)[0]
    }

    /// Converts model coordinates to screen coordinates.
    ///
    /// Formula:
    /// ```text
    /// stage  = rotate(model, content_center, rotation)
    /// screen = stage * zoom + pan
    /// ```
    pub fn model_to_screen(&self, model: Point) -> (f64, f64) {
        let stage = if self.rotation == 0.0 {
            model
        } else {
            rotate_about(&[model], self.content_center(), self.rotation)[0]
        };
        (
            stage.x * self.zoom + self.pan_x,
            stage.y * self.zoom + self.pan_y,
        )
    }

    /// Multiplies zoom by `factor`, keeping the given screen point fixed.
    ///
    /// Used for wheel zoom at the cursor and pinch zoom at the midpoint.
    pub fn zoom_at(&mut self, screen_x: f64, screen_y: f64, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let old_zoom = self.zoom;
        self.set_zoom(old_zoom * factor);
        let ratio = self.zoom / old_zoom;

        // screen = stage * zoom + pan  =>  pan' = screen - (screen - pan) * ratio
        self.pan_x = screen_x - (screen_x - self.pan_x) * ratio;
        self.pan_y = screen_y - (screen_y - self.pan_y) * ratio;
    }

    /// Fits the content into a canvas with padding and centres it.
    ///
    /// # Arguments
    /// * `canvas_width`, `canvas_height` - Canvas size in screen pixels
    /// * `padding` - Fraction of the canvas reserved on each side (0.0 - 0.5)
    pub fn fit_to_canvas(&mut self, canvas_width: f64, canvas_height: f64, padding: f64) {
        if self.content_width <= 0.0 || self.content_height <= 0.0 {
            return;
        }
        let padding_factor = 1.0 - (padding.clamp(0.0, 0.45) * 2.0);
        let zoom_x = (canvas_width * padding_factor) / self.content_width;
        let zoom_y = (canvas_height * padding_factor) / self.content_height;
        self.set_zoom(zoom_x.min(zoom_y));

        self.pan_x = (canvas_width - self.content_width * self.zoom) / 2.0;
        self.pan_y = (canvas_height - self.content_height * self.zoom) / 2.0;
    }

    /// Resets zoom, pan and rotation.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
        self.rotation = 0.0;
    }
}

impl fmt::Display for ViewTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1}) | Rotation: {:.0}°",
            self.zoom, self.pan_x, self.pan_y, self.rotation
        )
    }
}
