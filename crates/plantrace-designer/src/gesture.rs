//! Pointer gesture recognition.
//!
//! Tracks up to two contacts and turns raw pointer events into
//! [`GestureEvent`]s: press/tap/drag for one contact, damped pan and pinch
//! zoom for two, and a long-press for a stationary touch. Positions are in
//! screen coordinates.
//!
//! Time is passed in explicitly. The long-press is a deadline checked by
//! [`GestureController::poll`]; moving past the tolerance or lifting the
//! contact clears the deadline, so a cancelled long-press can never fire.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::time::{Duration, Instant};

use plantrace_settings::GestureSettings;

use crate::model::Point;

pub type PointerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    None,
    /// Pointer moved with no contact down
    Hover(Point),
    /// First contact went down
    Press(Point),
    /// Single contact moving after passing the tolerance or a long-press
    Drag { position: Point, delta: Point },
    /// Press and release within the tolerance
    Tap(Point),
    /// Release after a drag
    DragEnd(Point),
    /// Stationary touch held past the long-press time
    LongPress(Point),
    /// Release after a long-press
    LongPressEnd(Point),
    /// Second contact went down
    PinchStart,
    /// Two-contact movement: pan by `pan`, zoom by `factor` around `center`
    Pinch {
        center: Point,
        pan: Point,
        factor: f64,
    },
    /// One contact of a pinch lifted
    PinchEnd,
    /// All contacts dropped without a release
    Cancel,
}

#[derive(Debug, Clone, Copy)]
struct Contact {
    id: PointerId,
    start: Point,
    last: Point,
}

#[derive(Debug, Clone, Copy)]
struct PinchState {
    last_distance: f64,
    last_mid: Point,
}

#[derive(Debug, Clone)]
pub struct GestureController {
    settings: GestureSettings,
    contacts: SmallVec<[Contact; 2]>,
    long_press_deadline: Option<Instant>,
    long_pressed: bool,
    dragging: bool,
    pinch: Option<PinchState>,
    /// The current gesture included a pinch; no tap or drag until all lift
    pinched: bool,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(GestureSettings::default())
    }
}

fn midpoint(a: Point, b: Point) -> Point {
    (a + b) * 0.5
}

impl GestureController {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            contacts: SmallVec::new(),
            long_press_deadline: None,
            long_pressed: false,
            dragging: false,
            pinch: None,
            pinched: false,
        }
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn active_contacts(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    pub fn long_press_pending(&self) -> bool {
        self.long_press_deadline.is_some()
    }

    /// Handles a contact going down.
    ///
    /// With `gestures_enabled` off a touch never arms the long-press and a
    /// second contact is ignored, as is any third contact.
    pub fn pointer_down(
        &mut self,
        id: PointerId,
        kind: PointerKind,
        position: Point,
        now: Instant,
        gestures_enabled: bool,
    ) -> GestureEvent {
        match self.contacts.len() {
            0 => {
                self.contacts.push(Contact {
                    id,
                    start: position,
                    last: position,
                });
                self.long_press_deadline = (gestures_enabled && kind == PointerKind::Touch)
                    .then(|| now + Duration::from_millis(self.settings.long_press_ms));
                self.long_pressed = false;
                self.dragging = false;
                self.pinched = false;
                GestureEvent::Press(position)
            }
            1 if gestures_enabled && kind == PointerKind::Touch => {
                let first = self.contacts[0];
                self.contacts.push(Contact {
                    id,
                    start: position,
                    last: position,
                });
                self.long_press_deadline = None;
                self.pinch = Some(PinchState {
                    last_distance: first.last.distance_to(&position),
                    last_mid: midpoint(first.last, position),
                });
                self.pinched = true;
                tracing::trace!("Pinch started");
                GestureEvent::PinchStart
            }
            _ => GestureEvent::None,
        }
    }

    /// Handles contact (or hover) movement.
    pub fn pointer_move(&mut self, id: PointerId, position: Point) -> GestureEvent {
        if self.contacts.is_empty() {
            return GestureEvent::Hover(position);
        }
        let Some(index) = self.contacts.iter().position(|c| c.id == id) else {
            return GestureEvent::None;
        };

        if let Some(pinch) = self.pinch {
            self.contacts[index].last = position;
            let (a, b) = (self.contacts[0].last, self.contacts[1].last);
            let distance = a.distance_to(&b);
            let mid = midpoint(a, b);

            let factor = if pinch.last_distance > f64::EPSILON {
                let ratio = distance / pinch.last_distance;
                1.0 + (ratio - 1.0) * self.settings.pinch_damping
            } else {
                1.0
            };
            self.pinch = Some(PinchState {
                last_distance: distance,
                last_mid: mid,
            });
            return GestureEvent::Pinch {
                center: mid,
                pan: mid - pinch.last_mid,
                factor,
            };
        }

        if self.pinched {
            return GestureEvent::None;
        }

        let contact = &mut self.contacts[index];
        let delta = position - contact.last;
        contact.last = position;

        if !self.dragging && position.distance_to(&contact.start) > self.settings.move_tolerance_px {
            self.dragging = true;
            if self.long_press_deadline.take().is_some() {
                tracing::trace!("Long-press cancelled by movement");
            }
        }

        if self.dragging || self.long_pressed {
            GestureEvent::Drag { position, delta }
        } else {
            GestureEvent::None
        }
    }

    /// Handles a contact lifting.
    pub fn pointer_up(&mut self, id: PointerId, position: Point) -> GestureEvent {
        let Some(index) = self.contacts.iter().position(|c| c.id == id) else {
            return GestureEvent::None;
        };
        self.contacts.remove(index);
        self.long_press_deadline = None;

        if self.pinch.take().is_some() {
            return GestureEvent::PinchEnd;
        }
        if !self.contacts.is_empty() || self.pinched {
            return GestureEvent::None;
        }

        if self.long_pressed {
            GestureEvent::LongPressEnd(position)
        } else if self.dragging {
            GestureEvent::DragEnd(position)
        } else {
            GestureEvent::Tap(position)
        }
    }

    /// Fires the long-press once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> GestureEvent {
        match self.long_press_deadline {
            Some(deadline) if now >= deadline && self.contacts.len() == 1 => {
                self.long_press_deadline = None;
                self.long_pressed = true;
                GestureEvent::LongPress(self.contacts[0].last)
            }
            _ => GestureEvent::None,
        }
    }

    /// Drops every contact, e.g. when the pointer leaves the canvas.
    pub fn cancel(&mut self) -> GestureEvent {
        let had_contacts = !self.contacts.is_empty();
        self.contacts.clear();
        self.long_press_deadline = None;
        self.long_pressed = false;
        self.dragging = false;
        self.pinch = None;
        self.pinched = false;
        if had_contacts {
            GestureEvent::Cancel
        } else {
            GestureEvent::None
        }
    }
}
