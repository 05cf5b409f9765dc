//! Site and item edit engine.
//!
//! Direct manipulation of the site boundary (vertex drag, edge push/pull)
//! and the numeric item operations (move, rotate, flip). Drags mutate the
//! live site on every move; the controller commits once on release.

use plantrace_core::{InputError, Scale};
use serde::{Deserialize, Serialize};

use crate::catalog::GeometryKind;
use crate::geometry::{centroid, edge_normal, reflect_about, rotate_about, FlipAxis};
use crate::model::{PlacedItem, Point, Site};
use crate::snapping::{nearest_edge_point, nearest_vertex};

/// An in-progress direct manipulation of the site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditingState {
    Vertex {
        index: usize,
    },
    /// Edge `index` runs from vertex `index` to vertex `index + 1` (wrapping).
    Edge {
        index: usize,
        start_point: Point,
        /// Unit normal of the edge at press time
        normal: Point,
        original_p1: Point,
        original_p2: Point,
    },
}

impl EditingState {
    pub fn begin_vertex(site: &Site, index: usize) -> Option<Self> {
        (index < site.len()).then_some(Self::Vertex { index })
    }

    /// Starts an edge drag; a zero-length edge cannot be grabbed.
    pub fn begin_edge(site: &Site, index: usize, press: Point) -> Option<Self> {
        let (p1, p2) = site.edge(index)?;
        let normal = edge_normal(p1, p2)?;
        Some(Self::Edge {
            index,
            start_point: press,
            normal,
            original_p1: p1,
            original_p2: p2,
        })
    }

    /// Moves the grabbed geometry to follow `pointer`. No snapping is applied.
    ///
    /// Edge drags are constrained to the normal:
    /// ```text
    /// offset = (pointer - start_point) . normal
    /// p1' = original_p1 + offset * normal
    /// p2' = original_p2 + offset * normal
    /// ```
    pub fn apply(&self, site: &mut Site, pointer: Point) -> Result<(), InputError> {
        match *self {
            Self::Vertex { index } => site.set_vertex(index, pointer),
            Self::Edge {
                index,
                start_point,
                normal,
                original_p1,
                original_p2,
            } => {
                let offset = (pointer - start_point).dot(&normal);
                let shift = normal * offset;
                let next = (index + 1) % site.len().max(1);
                site.set_vertex(index, original_p1 + shift)?;
                site.set_vertex(next, original_p2 + shift)
            }
        }
    }
}

/// Part of the site boundary under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum SiteHit {
    Vertex(usize),
    Edge(usize),
}

/// Nearest vertex within `threshold`, else nearest edge within `threshold`.
pub fn hit_test_site(site: &Site, p: Point, threshold: f64) -> Option<SiteHit> {
    if let Some((index, _)) = nearest_vertex(p, site.points(), threshold) {
        return Some(SiteHit::Vertex(index));
    }
    nearest_edge_point(p, site.edges(), threshold).map(|(index, _)| SiteHit::Edge(index))
}

/// Translates an item by a distance entered in meters.
pub fn move_item_by_meters(item: &mut PlacedItem, dx_m: f64, dy_m: f64, scale: Scale) {
    let delta = Point::new(scale.to_pixels(dx_m), scale.to_pixels(dy_m));
    for p in &mut item.points {
        *p = *p + delta;
    }
}

/// Rotates an item about its centroid; positive degrees turn clockwise on screen.
///
/// Single-point items keep their position and accumulate the angle in
/// `rotation` instead.
pub fn rotate_item(item: &mut PlacedItem, degrees: f64) {
    let pivot = centroid(&item.points);
    item.points = rotate_about(&item.points, pivot, degrees);
    if item.kind.geometry() == GeometryKind::Point {
        let current = item.rotation.unwrap_or(0.0);
        item.rotation = Some((current + degrees).rem_euclid(360.0));
    }
}

/// Mirrors an item about its centroid.
///
/// Polygon point order is reversed so the ring keeps its winding.
pub fn flip_item(item: &mut PlacedItem, axis: FlipAxis) {
    let pivot = centroid(&item.points);
    item.points = reflect_about(&item.points, pivot, axis);
    if item.is_polygon() {
        item.points.reverse();
    }
    if let Some(rotation) = item.rotation {
        let mirrored = match axis {
            FlipAxis::Horizontal => 180.0 - rotation,
            FlipAxis::Vertical => -rotation,
        };
        item.rotation = Some(mirrored.rem_euclid(360.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemKind;
    use crate::geometry::is_clockwise;

    fn rect_site() -> Site {
        Site::finalized(vec![
            Point::new(0.0, 0.0),
            Point::new(400.0, 0.0),
            Point::new(400.0, 300.0),
            Point::new(0.0, 300.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_vertex_drag_replaces_vertex() {
        let mut site = rect_site();
        let edit = EditingState::begin_vertex(&site, 2).unwrap();
        edit.apply(&mut site, Point::new(450.0, 320.0)).unwrap();
        assert_eq!(site.points()[2], Point::new(450.0, 320.0));
        assert_eq!(site.len(), 4);
        assert!(EditingState::begin_vertex(&site, 9).is_none());
    }

    #[test]
    fn test_edge_drag_moves_along_normal_only() {
        let mut site = rect_site();
        // Top edge (0,0)-(400,0), normal points to +y
        let edit = EditingState::begin_edge(&site, 0, Point::new(200.0, 0.0)).unwrap();
        edit.apply(&mut site, Point::new(260.0, -50.0)).unwrap();
        assert_eq!(site.points()[0], Point::new(0.0, -50.0));
        assert_eq!(site.points()[1], Point::new(400.0, -50.0));
        assert_eq!(site.points()[2], Point::new(400.0, 300.0));
    }

    #[test]
    fn test_closing_edge_drag_wraps() {
        let mut site = rect_site();
        let edit = EditingState::begin_edge(&site, 3, Point::new(0.0, 150.0)).unwrap();
        edit.apply(&mut site, Point::new(-40.0, 150.0)).unwrap();
        assert_eq!(site.points()[3], Point::new(-40.0, 300.0));
        assert_eq!(site.points()[0], Point::new(-40.0, 0.0));
    }

    #[test]
    fn test_zero_length_edge_cannot_be_grabbed() {
        let site = Site::finalized(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
        ])
        .unwrap();
        assert!(EditingState::begin_edge(&site, 0, Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_hit_test_prefers_vertex() {
        let site = rect_site();
        assert_eq!(
            hit_test_site(&site, Point::new(5.0, 5.0), 45.0),
            Some(SiteHit::Vertex(0))
        );
        assert_eq!(
            hit_test_site(&site, Point::new(200.0, 290.0), 45.0),
            Some(SiteHit::Edge(2))
        );
        assert_eq!(hit_test_site(&site, Point::new(200.0, 150.0), 45.0), None);
    }

    #[test]
    fn test_move_by_meters() {
        let mut item = PlacedItem::new(
            ItemKind::Fence,
            vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
        );
        move_item_by_meters(&mut item, 1.0, -0.5, Scale::new(50.0).unwrap());
        assert_eq!(item.points, vec![Point::new(50.0, -25.0), Point::new(150.0, -25.0)]);
    }

    #[test]
    fn test_rotate_line_about_centroid() {
        let mut item = PlacedItem::new(
            ItemKind::Fence,
            vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
        );
        rotate_item(&mut item, 90.0);
        assert!((item.points[0].x - 50.0).abs() < 1e-9);
        assert!((item.points[0].y + 50.0).abs() < 1e-9);
        assert!((item.points[1].y - 50.0).abs() < 1e-9);
        assert_eq!(item.rotation, None);
    }

    #[test]
    fn test_rotate_point_item_tracks_angle() {
        let mut item = PlacedItem::new(ItemKind::Carport, vec![Point::new(10.0, 10.0)]);
        rotate_item(&mut item, -90.0);
        assert!(item.points[0].distance_to(&Point::new(10.0, 10.0)) < 1e-9);
        assert_eq!(item.rotation, Some(270.0));
    }

    #[test]
    fn test_flip_polygon_keeps_winding() {
        let mut item = PlacedItem::new(
            ItemKind::ParkingArea,
            vec![
                Point::new(0.0, 0.0),
                Point::new(40.0, 0.0),
                Point::new(40.0, 20.0),
                Point::new(0.0, 20.0),
            ],
        );
        let before = is_clockwise(&item.points);
        flip_item(&mut item, FlipAxis::Horizontal);
        assert_eq!(is_clockwise(&item.points), before);
        flip_item(&mut item, FlipAxis::Horizontal);
        assert_eq!(item.points[0], Point::new(0.0, 0.0));
        assert_eq!(item.points[2], Point::new(40.0, 20.0));
    }
}
