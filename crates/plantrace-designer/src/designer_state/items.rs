//! Item selection and edit operations for designer state.

use plantrace_core::InputError;

use super::DesignerState;
use crate::catalog::{GeometryKind, ItemOptions};
use crate::editing::{flip_item, move_item_by_meters, rotate_item};
use crate::geometry::{closest_point_on_segment, point_in_polygon, FlipAxis};
use crate::model::{ItemId, PlacedItem, Point};

fn hits(item: &PlacedItem, p: Point, threshold: f64) -> bool {
    match item.kind.geometry() {
        GeometryKind::Polygon => {
            point_in_polygon(p, &item.points)
                || item
                    .edges()
                    .iter()
                    .any(|&(a, b)| closest_point_on_segment(p, a, b).distance_to(&p) <= threshold)
        }
        GeometryKind::Line => item
            .edges()
            .iter()
            .any(|&(a, b)| closest_point_on_segment(p, a, b).distance_to(&p) <= threshold),
        GeometryKind::Point => item
            .points
            .first()
            .is_some_and(|q| q.distance_to(&p) <= threshold),
    }
}

impl DesignerState {
    /// Topmost item under a model-space point.
    pub fn item_at(&self, p: Point, threshold: f64) -> Option<ItemId> {
        self.items
            .iter()
            .rev()
            .find(|item| hits(item, p, threshold))
            .map(|item| item.id)
    }

    pub fn select_item(&mut self, id: ItemId) -> Result<(), InputError> {
        if !self.items.iter().any(|item| item.id == id) {
            return Err(InputError::UnknownItem { id: id.to_string() });
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_item(&self) -> Option<&PlacedItem> {
        let id = self.selected?;
        self.items.iter().find(|item| item.id == id)
    }

    fn selected_index(&self) -> Result<usize, InputError> {
        let id = self.selected.ok_or(InputError::NoSelection)?;
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| InputError::UnknownItem { id: id.to_string() })
    }

    /// Applies `edit` to the selected item and commits.
    fn edit_selected(
        &mut self,
        edit: impl FnOnce(&mut PlacedItem) -> Result<(), InputError>,
    ) -> Result<(), InputError> {
        let index = self.selected_index()?;
        let mut item = self.items[index].clone();
        edit(&mut item)?;
        self.items[index] = item;
        self.commit();
        Ok(())
    }

    /// Removes the selected item.
    pub fn delete_selected_item(&mut self) -> Result<PlacedItem, InputError> {
        let index = self.selected_index()?;
        let item = self.items.remove(index);
        self.selected = None;
        tracing::info!("Deleted {} {}", item.kind, item.id);
        self.commit();
        Ok(item)
    }

    /// Moves the selected item by a distance in meters.
    pub fn move_selected_item(&mut self, dx_m: f64, dy_m: f64) -> Result<(), InputError> {
        let scale = self.scale.ok_or(InputError::ScaleNotSet)?;
        for (field, value) in [("dx", dx_m), ("dy", dy_m)] {
            if !value.is_finite() {
                return Err(InputError::OutOfRange {
                    field: field.to_string(),
                    expected: "a finite distance".to_string(),
                    value,
                });
            }
        }
        self.edit_selected(|item| {
            move_item_by_meters(item, dx_m, dy_m, scale);
            Ok(())
        })
    }

    /// Rotates the selected item about its centroid, clockwise on screen.
    pub fn rotate_selected_item(&mut self, degrees: f64) -> Result<(), InputError> {
        if !degrees.is_finite() {
            return Err(InputError::OutOfRange {
                field: "angle".to_string(),
                expected: "a finite angle".to_string(),
                value: degrees,
            });
        }
        self.edit_selected(|item| {
            rotate_item(item, degrees);
            Ok(())
        })
    }

    pub fn flip_selected_item(&mut self, axis: FlipAxis) -> Result<(), InputError> {
        self.edit_selected(|item| {
            flip_item(item, axis);
            Ok(())
        })
    }

    /// Sets the preview height of the selected item; `None` clears it.
    pub fn set_item_height(&mut self, height: Option<f64>) -> Result<(), InputError> {
        if let Some(h) = height {
            if !h.is_finite() || h < 0.0 {
                return Err(InputError::OutOfRange {
                    field: "height".to_string(),
                    expected: "zero or more".to_string(),
                    value: h,
                });
            }
        }
        self.edit_selected(|item| {
            item.height = height;
            Ok(())
        })
    }

    /// Replaces the per-kind options of the selected item.
    pub fn set_item_options(&mut self, options: ItemOptions) -> Result<(), InputError> {
        self.edit_selected(|item| {
            if !options.applies_to(item.kind) {
                return Err(InputError::NotAvailable {
                    reason: format!("{} has no such options", item.kind),
                });
            }
            item.options = options;
            Ok(())
        })
    }
}
