use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Point;
use crate::catalog::{GeometryKind, ItemInfo, ItemKind, ItemOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog item placed on the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub points: Vec<Point>,
    /// Height in meters for the 3D preview.
    pub height: Option<f64>,
    /// Orientation in degrees; only meaningful for single-point items.
    pub rotation: Option<f64>,
    pub options: ItemOptions,
}

impl PlacedItem {
    pub fn new(kind: ItemKind, points: Vec<Point>) -> Self {
        Self {
            id: ItemId::new(),
            kind,
            points,
            height: kind.info().default_height,
            rotation: None,
            options: ItemOptions::default_for(kind),
        }
    }

    pub fn info(&self) -> ItemInfo {
        self.kind.info()
    }

    pub fn is_polygon(&self) -> bool {
        self.kind.geometry() == GeometryKind::Polygon
    }

    /// Edges for snapping: closed for polygons, the single segment for lines.
    pub fn edges(&self) -> Vec<(Point, Point)> {
        let n = self.points.len();
        match self.kind.geometry() {
            GeometryKind::Polygon if n >= 2 => (0..n)
                .map(|i| (self.points[i], self.points[(i + 1) % n]))
                .collect(),
            GeometryKind::Line if n == 2 => vec![(self.points[0], self.points[1])],
            _ => Vec::new(),
        }
    }
}
