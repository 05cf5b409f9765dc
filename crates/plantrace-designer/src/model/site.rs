use plantrace_core::{GeometryError, InputError};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Point;

/// Construction type of a site boundary edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryType {
    #[default]
    ExteriorWall,
    Opening,
}

impl fmt::Display for BoundaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExteriorWall => write!(f, "Exterior wall"),
            Self::Opening => write!(f, "Opening"),
        }
    }
}

/// The traced site boundary.
///
/// While tracing, only `points` grows. Once finalized the boundary has at
/// least three vertices and `boundary_types` / `vertex_heights` run parallel
/// to `points` (entry `i` describes vertex `i` and the edge leaving it).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Site {
    points: Vec<Point>,
    boundary_types: Vec<BoundaryType>,
    vertex_heights: Vec<f64>,
    finalized: bool,
}

impl Site {
    pub fn new() -> Self {
        Self::default()
    }

    /// An unfinalized site with the given traced points.
    pub fn tracing(points: Vec<Point>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Closes a traced boundary, filling per-vertex data with defaults.
    pub fn finalized(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::DegenerateRing {
                points: points.len(),
            });
        }
        let n = points.len();
        Ok(Self {
            points,
            boundary_types: vec![BoundaryType::default(); n],
            vertex_heights: vec![0.0; n],
            finalized: true,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn boundary_types(&self) -> &[BoundaryType] {
        &self.boundary_types
    }

    pub fn vertex_heights(&self) -> &[f64] {
        &self.vertex_heights
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Appends a traced point. No-op on a finalized boundary.
    pub fn push_point(&mut self, point: Point) -> bool {
        if self.finalized {
            return false;
        }
        self.points.push(point);
        true
    }

    /// Removes the most recently traced point.
    pub fn pop_point(&mut self) -> Option<Point> {
        if self.finalized {
            return None;
        }
        self.points.pop()
    }

    /// Drops finalization, keeping the traced points.
    pub fn reopen(&mut self) {
        self.finalized = false;
        self.boundary_types.clear();
        self.vertex_heights.clear();
    }

    /// Moves one vertex, keeping the parallel arrays intact.
    pub fn set_vertex(&mut self, index: usize, point: Point) -> Result<(), InputError> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(InputError::VertexOutOfRange { index, len })?;
        *slot = point;
        Ok(())
    }

    pub fn set_boundary_type(
        &mut self,
        index: usize,
        boundary: BoundaryType,
    ) -> Result<(), InputError> {
        let len = self.boundary_types.len();
        let slot = self
            .boundary_types
            .get_mut(index)
            .ok_or(InputError::VertexOutOfRange { index, len })?;
        *slot = boundary;
        Ok(())
    }

    pub fn set_vertex_height(&mut self, index: usize, height: f64) -> Result<(), InputError> {
        if !height.is_finite() || height < 0.0 {
            return Err(InputError::OutOfRange {
                field: "height".to_string(),
                expected: "zero or more".to_string(),
                value: height,
            });
        }
        let len = self.vertex_heights.len();
        let slot = self
            .vertex_heights
            .get_mut(index)
            .ok_or(InputError::VertexOutOfRange { index, len })?;
        *slot = height;
        Ok(())
    }

    /// Number of boundary edges; only a finalized boundary is closed.
    pub fn edge_count(&self) -> usize {
        match (self.finalized, self.points.len()) {
            (true, n) => n,
            (false, n) => n.saturating_sub(1),
        }
    }

    /// Edge `index` as (start, end); the last edge of a closed boundary wraps.
    pub fn edge(&self, index: usize) -> Option<(Point, Point)> {
        if index >= self.edge_count() {
            return None;
        }
        let n = self.points.len();
        Some((self.points[index], self.points[(index + 1) % n]))
    }

    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        (0..self.edge_count()).filter_map(move |i| self.edge(i))
    }
}
