//! Geometry kernel.
//!
//! Pure functions over points in image-pixel space (Y grows downward).
//! Degenerate input yields an identity result rather than an error, except
//! for polygon intersection which reports what it could not do.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::{Matrix3, Point2, Vector2};
use plantrace_core::constants::EPSILON;
use plantrace_core::GeometryError;
use serde::{Deserialize, Serialize};

use crate::model::Point;

/// Axis a flip mirrors across, through the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left-right (x is negated about the pivot)
    Horizontal,
    /// Mirror top-bottom (y is negated about the pivot)
    Vertical,
}

pub fn distance(a: Point, b: Point) -> f64 {
    a.distance_to(&b)
}

/// Ray-casting parity test. Points exactly on an edge may land either way.
pub fn point_in_polygon(p: Point, ring: &[Point]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (ring[i], ring[j]);
        if (pi.y > p.y) != (pj.y > p.y)
            && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Projection of `p` onto segment `a`-`b`, clamped to the segment.
///
/// ```text
/// t = clamp(((p - a) . (b - a)) / |b - a|^2, 0, 1)
/// q = a + t * (b - a)
/// ```
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let l2 = ab.dot(&ab);
    if l2 == 0.0 {
        return a;
    }
    let t = ((p - a).dot(&ab) / l2).clamp(0.0, 1.0);
    a + ab * t
}

/// Arithmetic mean of the points; the origin for an empty slice.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::default();
    }
    let sum = points.iter().fold(Point::default(), |acc, p| acc + *p);
    sum * (1.0 / points.len() as f64)
}

/// Shoelace edge sum `Σ (x2 - x1)(y2 + y1)` over the closed ring.
fn edge_sum(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (p1, p2) = (points[i], points[(i + 1) % n]);
            (p2.x - p1.x) * (p2.y + p1.y)
        })
        .sum()
}

/// Winding test: a positive shoelace edge sum counts as clockwise.
/// Fewer than three points is never clockwise.
pub fn is_clockwise(points: &[Point]) -> bool {
    if points.len() < 3 {
        return false;
    }
    edge_sum(points) > 0.0
}

/// Signed shoelace area; its sign is opposite to the edge sum's.
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let (p1, p2) = (points[i], points[(i + 1) % n]);
            p1.x * p2.y - p2.x * p1.y
        })
        .sum();
    twice / 2.0
}

/// Absolute polygon area in square pixels.
pub fn polygon_area(points: &[Point]) -> f64 {
    signed_area(points).abs()
}

/// Reverses clockwise rings so the result winds counter-clockwise.
pub fn ensure_counter_clockwise(mut points: Vec<Point>) -> Vec<Point> {
    if is_clockwise(&points) {
        points.reverse();
    }
    points
}

/// Appends the first point if the ring is not already explicitly closed.
pub fn close_ring(points: &[Point]) -> Vec<Point> {
    let mut ring = points.to_vec();
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        if points.len() > 1 && distance(*first, *last) > EPSILON {
            ring.push(*first);
        }
    }
    ring
}

/// Drops a trailing point that repeats the first one.
pub fn strip_closing_duplicate(mut points: Vec<Point>) -> Vec<Point> {
    if points.len() > 1 {
        let (first, last) = (points[0], points[points.len() - 1]);
        if distance(first, last) <= EPSILON {
            points.pop();
        }
    }
    points
}

fn to_contour(ring: &[Point]) -> Result<Vec<[f64; 2]>, GeometryError> {
    // Contours are implicitly closed for the overlay.
    let open = strip_closing_duplicate(ring.to_vec());
    if open.len() < 3 {
        return Err(GeometryError::DegenerateRing { points: open.len() });
    }
    if let Some(bad) = open.iter().find(|p| !p.is_finite()) {
        return Err(GeometryError::NonFinite { x: bad.x, y: bad.y });
    }
    Ok(open.iter().map(|p| [p.x, p.y]).collect())
}

/// Boolean intersection of two simple rings.
///
/// Inputs may be open or explicitly closed. Each returned ring is the outer
/// contour of one result shape, without a closing duplicate, wound
/// counter-clockwise. An empty vector means the rings are disjoint.
pub fn polygon_intersection(
    subject: &[Point],
    clip: &[Point],
) -> Result<Vec<Vec<Point>>, GeometryError> {
    let subject = vec![to_contour(&close_ring(subject))?];
    let clip = vec![to_contour(&close_ring(clip))?];

    // Vec of shapes, each shape a Vec of contours, outer boundary first
    let shapes = subject.overlay(&clip, OverlayRule::Intersect, FillRule::EvenOdd);

    Ok(shapes
        .into_iter()
        .filter_map(|shape| shape.into_iter().next())
        .map(|contour| {
            let ring: Vec<Point> = contour.into_iter().map(|[x, y]| Point::new(x, y)).collect();
            strip_closing_duplicate(ring)
        })
        .filter(|ring| ring.len() >= 3)
        .map(ensure_counter_clockwise)
        .collect())
}

/// Outcome of clipping a candidate polygon against a boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipOutcome {
    Clipped(Vec<Point>),
    /// The intersection failed or was empty; the candidate is kept as-is.
    Unclipped(Vec<Point>),
}

impl ClipOutcome {
    pub fn into_points(self) -> Vec<Point> {
        match self {
            Self::Clipped(points) | Self::Unclipped(points) => points,
        }
    }

    pub fn was_clipped(&self) -> bool {
        matches!(self, Self::Clipped(_))
    }
}

/// Clips `candidate` to `boundary`, keeping only the first result ring.
///
/// Never fails: on an empty intersection or a geometry error the unclipped
/// candidate is returned and a warning is logged.
pub fn clip_to_boundary(candidate: &[Point], boundary: &[Point]) -> ClipOutcome {
    match polygon_intersection(candidate, boundary) {
        Ok(rings) => match rings.into_iter().next() {
            Some(ring) => {
                tracing::debug!(
                    "Clipped {}-point polygon to {} points",
                    candidate.len(),
                    ring.len()
                );
                ClipOutcome::Clipped(ring)
            }
            None => {
                tracing::warn!("Polygon lies outside the boundary, keeping it unclipped");
                ClipOutcome::Unclipped(candidate.to_vec())
            }
        },
        Err(e) => {
            tracing::warn!("Polygon clipping failed, keeping it unclipped: {}", e);
            ClipOutcome::Unclipped(candidate.to_vec())
        }
    }
}

fn about_pivot(pivot: Point, m: Matrix3<f64>) -> Matrix3<f64> {
    Matrix3::new_translation(&Vector2::new(pivot.x, pivot.y))
        * m
        * Matrix3::new_translation(&Vector2::new(-pivot.x, -pivot.y))
}

fn apply(m: &Matrix3<f64>, points: &[Point]) -> Vec<Point> {
    points
        .iter()
        .map(|p| {
            let q = m.transform_point(&Point2::new(p.x, p.y));
            Point::new(q.x, q.y)
        })
        .collect()
}

/// Rotates points about `pivot`; positive degrees turn clockwise on screen.
///
/// ```text
/// x' = cx + dx*cos(θ) - dy*sin(θ)
/// y' = cy + dx*sin(θ) + dy*cos(θ)
/// ```
pub fn rotate_about(points: &[Point], pivot: Point, degrees: f64) -> Vec<Point> {
    let m = about_pivot(pivot, Matrix3::new_rotation(degrees.to_radians()));
    apply(&m, points)
}

/// Mirrors points across the axis through `pivot`.
pub fn reflect_about(points: &[Point], pivot: Point, axis: FlipAxis) -> Vec<Point> {
    let s = match axis {
        FlipAxis::Horizontal => Vector2::new(-1.0, 1.0),
        FlipAxis::Vertical => Vector2::new(1.0, -1.0),
    };
    let m = about_pivot(pivot, Matrix3::new_nonuniform_scaling(&s));
    apply(&m, points)
}

/// Unit normal `(-dy, dx) / len` of edge `a`-`b`; `None` for a zero-length edge.
pub fn edge_normal(a: Point, b: Point) -> Option<Point> {
    let d = b - a;
    let len = d.length();
    if len <= EPSILON {
        return None;
    }
    Some(Point::new(-d.y / len, d.x / len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Vec<Point> {
        vec![
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ]
    }

    #[test]
    fn test_point_in_polygon() {
        let sq = square(0.0, 0.0, 10.0);
        assert!(point_in_polygon(Point::new(5.0, 5.0), &sq));
        assert!(!point_in_polygon(Point::new(15.0, 5.0), &sq));
        assert!(!point_in_polygon(Point::new(5.0, 5.0), &sq[..2]));
    }

    #[test]
    fn test_closest_point_on_segment_clamps() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(closest_point_on_segment(Point::new(5.0, 3.0), a, b), Point::new(5.0, 0.0));
        assert_eq!(closest_point_on_segment(Point::new(-5.0, 3.0), a, b), a);
        assert_eq!(closest_point_on_segment(Point::new(15.0, -3.0), a, b), b);
    }

    #[test]
    fn test_closest_point_on_degenerate_segment() {
        let a = Point::new(3.0, 4.0);
        assert_eq!(closest_point_on_segment(Point::new(100.0, 7.0), a, a), a);
    }

    #[test]
    fn test_centroid() {
        assert_eq!(centroid(&[]), Point::new(0.0, 0.0));
        let c = centroid(&square(0.0, 0.0, 10.0));
        assert!((c.x - 5.0).abs() < 1e-12 && (c.y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_is_clockwise_edge_sum() {
        let sq = square(0.0, 0.0, 10.0);
        assert!(!is_clockwise(&sq));
        let mut rev = sq.clone();
        rev.reverse();
        assert!(is_clockwise(&rev));
        assert!(!is_clockwise(&sq[..2]));
    }

    #[test]
    fn test_polygon_area() {
        assert!((polygon_area(&square(3.0, 4.0, 10.0)) - 100.0).abs() < 1e-9);
        assert_eq!(polygon_area(&square(0.0, 0.0, 10.0)[..2]), 0.0);
    }

    #[test]
    fn test_close_and_strip_ring() {
        let sq = square(0.0, 0.0, 1.0);
        let closed = close_ring(&sq);
        assert_eq!(closed.len(), 5);
        assert_eq!(close_ring(&closed).len(), 5);
        assert_eq!(strip_closing_duplicate(closed), sq);
    }

    #[test]
    fn test_intersection_of_overlapping_squares() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let rings = polygon_intersection(&a, &b).unwrap();
        assert_eq!(rings.len(), 1);
        assert!((polygon_area(&rings[0]) - 25.0).abs() < 1e-6);
        assert!(!is_clockwise(&rings[0]));
        for p in &rings[0] {
            assert!(p.x >= 5.0 - 1e-6 && p.x <= 10.0 + 1e-6);
            assert!(p.y >= 5.0 - 1e-6 && p.y <= 10.0 + 1e-6);
        }
    }

    #[test]
    fn test_intersection_of_disjoint_squares_is_empty() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(50.0, 50.0, 10.0);
        assert!(polygon_intersection(&a, &b).unwrap().is_empty());
    }

    #[test]
    fn test_intersection_rejects_degenerate_ring() {
        let a = square(0.0, 0.0, 10.0);
        let err = polygon_intersection(&a[..2], &a).unwrap_err();
        assert_eq!(err, GeometryError::DegenerateRing { points: 2 });
    }

    #[test]
    fn test_clip_falls_back_when_disjoint() {
        let candidate = square(100.0, 100.0, 10.0);
        let outcome = clip_to_boundary(&candidate, &square(0.0, 0.0, 10.0));
        assert_eq!(outcome, ClipOutcome::Unclipped(candidate));
    }

    #[test]
    fn test_rotate_about_quarter_turn() {
        let pts = rotate_about(&[Point::new(10.0, 0.0)], Point::new(0.0, 0.0), 90.0);
        assert!((pts[0].x - 0.0).abs() < 1e-9);
        assert!((pts[0].y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_reflect_about_pivot() {
        let pivot = Point::new(5.0, 5.0);
        let h = reflect_about(&[Point::new(2.0, 1.0)], pivot, FlipAxis::Horizontal);
        assert_eq!(h[0], Point::new(8.0, 1.0));
        let v = reflect_about(&[Point::new(2.0, 1.0)], pivot, FlipAxis::Vertical);
        assert_eq!(v[0], Point::new(2.0, 9.0));
    }

    #[test]
    fn test_edge_normal() {
        let n = edge_normal(Point::new(0.0, 0.0), Point::new(10.0, 0.0)).unwrap();
        assert_eq!(n, Point::new(0.0, 1.0));
        assert!(edge_normal(Point::new(1.0, 1.0), Point::new(1.0, 1.0)).is_none());
    }
}
