//! Snapping engine.
//!
//! All thresholds are in model (image-pixel) units. They are derived from a
//! screen-pixel radius divided by the current zoom, so the radius the user
//! perceives stays constant while zooming.

use plantrace_core::units::snap_distance_pixels;
use plantrace_core::Scale;
use plantrace_settings::SnapSettings;
use serde::{Deserialize, Serialize};

use crate::geometry::closest_point_on_segment;
use crate::model::{PlacedItem, Point, Site};

/// Snap and closed-loop radii for the current scale and zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapThresholds {
    /// Vertex/edge/axis snap radius
    pub snap: f64,
    /// Closed-loop radius around the first point
    pub close: f64,
}

impl SnapThresholds {
    pub fn new(scale: Option<Scale>, zoom: f64, settings: &SnapSettings) -> Self {
        let px = snap_distance_pixels(scale, settings.distance_meters, settings.min_screen_px);
        let snap = px / zoom;
        Self {
            snap,
            close: snap * settings.close_multiplier,
        }
    }
}

/// What a snapped point attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapTarget {
    Vertex,
    Edge,
    /// Aligned with the previous point by the orthogonal lock
    Axis,
    /// Would close the ring
    Close,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapped {
    pub point: Point,
    pub target: SnapTarget,
}

impl Snapped {
    pub fn raw(point: Point) -> Self {
        Self {
            point,
            target: SnapTarget::None,
        }
    }
}

/// Nearest vertex strictly within `threshold`, with its index.
pub fn nearest_vertex<'a>(
    raw: Point,
    vertices: impl IntoIterator<Item = &'a Point>,
    threshold: f64,
) -> Option<(usize, Point)> {
    vertices
        .into_iter()
        .enumerate()
        .map(|(i, v)| (i, *v, raw.distance_to(v)))
        .filter(|(_, _, d)| *d < threshold)
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(i, v, _)| (i, v))
}

/// Nearest point on any edge within `threshold`, with the edge index.
pub fn nearest_edge_point(
    raw: Point,
    edges: impl IntoIterator<Item = (Point, Point)>,
    threshold: f64,
) -> Option<(usize, Point)> {
    edges
        .into_iter()
        .enumerate()
        .map(|(i, (a, b))| {
            let q = closest_point_on_segment(raw, a, b);
            (i, q, raw.distance_to(&q))
        })
        .filter(|(_, _, d)| *d <= threshold)
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(i, q, _)| (i, q))
}

/// Vertex-then-edge snap against the site and every placed item.
pub fn proximity_snap(raw: Point, site: &Site, items: &[PlacedItem], threshold: f64) -> Snapped {
    let vertices = site
        .points()
        .iter()
        .chain(items.iter().flat_map(|item| item.points.iter()));
    if let Some((_, point)) = nearest_vertex(raw, vertices, threshold) {
        return Snapped {
            point,
            target: SnapTarget::Vertex,
        };
    }

    let edges = site
        .edges()
        .chain(items.iter().flat_map(|item| item.edges()));
    if let Some((_, point)) = nearest_edge_point(raw, edges, threshold) {
        return Snapped {
            point,
            target: SnapTarget::Edge,
        };
    }

    Snapped::raw(raw)
}

/// Locks the new point to the dominant axis of travel from `previous`.
///
/// The minor coordinate is copied from `previous`. The dominant coordinate
/// snaps to the nearest matching coordinate among `anchors` within
/// `threshold`, or keeps the raw value.
pub fn orthogonal_lock<'a>(
    previous: Point,
    raw: Point,
    anchors: impl IntoIterator<Item = &'a Point>,
    threshold: f64,
) -> Point {
    let dx = (raw.x - previous.x).abs();
    let dy = (raw.y - previous.y).abs();
    let horizontal = dx > dy;

    let pick = |p: &Point| if horizontal { p.x } else { p.y };
    let target = pick(&raw);
    let snapped = anchors
        .into_iter()
        .map(pick)
        .map(|c| (c, (c - target).abs()))
        .filter(|(_, d)| *d < threshold)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
        .unwrap_or(target);

    if horizontal {
        Point::new(snapped, previous.y)
    } else {
        Point::new(previous.x, snapped)
    }
}

/// Whether `raw` closes the ring started by `points[0]`.
pub fn is_closing_click(raw: Point, points: &[Point], min_points: usize, close: f64) -> bool {
    match points.first() {
        Some(first) if points.len() >= min_points => raw.distance_to(first) < close,
        _ => false,
    }
}
