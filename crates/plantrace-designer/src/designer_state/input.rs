//! Pointer, wheel and gesture routing.
//!
//! Positions arriving here are screen coordinates; they are converted to
//! model space through the view transform before reaching the engines.

use std::time::Instant;

use super::DesignerState;
use crate::drawing::{DrawingMachine, ToolMode};
use crate::gesture::{GestureEvent, PointerId, PointerKind};
use crate::model::Point;
use crate::snapping::{nearest_vertex, SnapTarget, Snapped};

impl DesignerState {
    fn to_model(&self, screen: Point) -> Point {
        self.view.screen_to_model(screen.x, screen.y)
    }

    fn gestures_enabled(&self) -> bool {
        !self.tool.suspends_gestures()
    }

    /// A contact went down.
    pub fn pointer_down(
        &mut self,
        id: PointerId,
        kind: PointerKind,
        x: f64,
        y: f64,
        now: Instant,
    ) {
        let screen = Point::new(x, y);
        let event =
            self.gestures
                .pointer_down(id, kind, screen, now, self.gestures_enabled());

        // Mouse and pen grab site geometry on press; touch waits for a long-press
        if matches!(event, GestureEvent::Press(_)) && kind != PointerKind::Touch {
            self.begin_site_edit(self.to_model(screen));
        }
        self.handle_gesture(event);
    }

    /// A contact (or the hovering pointer) moved.
    pub fn pointer_move(&mut self, id: PointerId, x: f64, y: f64) {
        let screen = Point::new(x, y);
        let event = self.gestures.pointer_move(id, screen);

        if self.editing.is_some() && self.gestures.active_contacts() == 1 {
            self.drag_site_edit(self.to_model(screen));
            return;
        }
        self.handle_gesture(event);
    }

    /// A contact lifted.
    pub fn pointer_up(&mut self, id: PointerId, x: f64, y: f64) {
        let event = self.gestures.pointer_up(id, Point::new(x, y));
        self.handle_gesture(event);
    }

    /// The pointer left the canvas; an active edit is committed as if released.
    pub fn pointer_leave(&mut self) {
        self.gestures.cancel();
        self.finish_site_edit();
        self.hover = None;
    }

    /// Fires a pending long-press whose deadline has passed.
    pub fn poll_gestures(&mut self, now: Instant) {
        let event = self.gestures.poll(now);
        self.handle_gesture(event);
    }

    /// Zooms one wheel step around the cursor. Returns false when wheel
    /// zoom is suspended by the active tool.
    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) -> bool {
        if !self.gestures_enabled() || delta_y == 0.0 {
            return false;
        }
        let step = self.config.gestures.wheel_zoom_step;
        let factor = if delta_y < 0.0 { step } else { 1.0 / step };
        self.view.zoom_at(x, y, factor);
        true
    }

    fn handle_gesture(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::None | GestureEvent::Press(_) => {}
            GestureEvent::Hover(screen) => {
                self.hover = self.hover_snap(self.to_model(screen));
            }
            GestureEvent::Tap(screen) => {
                if self.editing.is_some() {
                    self.finish_site_edit();
                } else {
                    self.click(self.to_model(screen));
                }
            }
            GestureEvent::Drag { position, delta } => {
                if self.editing.is_some() {
                    self.drag_site_edit(self.to_model(position));
                } else if self.gestures_enabled() {
                    self.view.pan_by(delta.x, delta.y);
                }
            }
            GestureEvent::DragEnd(_) | GestureEvent::LongPressEnd(_) | GestureEvent::Cancel => {
                self.finish_site_edit();
            }
            GestureEvent::LongPress(screen) => {
                self.grab_nearest_vertex(self.to_model(screen));
            }
            GestureEvent::PinchStart => {
                if self.editing.is_some() {
                    tracing::debug!("Pinch cancelled site edit");
                    self.abandon_site_edit();
                }
            }
            GestureEvent::Pinch { center, pan, factor } => {
                self.view.pan_by(pan.x, pan.y);
                self.view.zoom_at(center.x, center.y, factor);
            }
            GestureEvent::PinchEnd => {}
        }
    }

    /// Where a click at `p` would land, for the snap indicator.
    fn hover_snap(&self, p: Point) -> Option<Snapped> {
        let t = self.thresholds();
        match self.tool {
            ToolMode::AddItem(kind) => Some(self.machine.item_point(
                kind,
                p,
                &self.site,
                &self.items,
                &t,
            )),
            ToolMode::DrawSite if !self.site.is_finalized() => Some(Snapped {
                point: DrawingMachine::site_point(p, &self.site, &t),
                target: SnapTarget::Axis,
            }),
            ToolMode::SetScale => nearest_vertex(p, self.site.points(), t.snap).map(|(_, point)| {
                Snapped {
                    point,
                    target: SnapTarget::Vertex,
                }
            }),
            _ => None,
        }
    }
}
