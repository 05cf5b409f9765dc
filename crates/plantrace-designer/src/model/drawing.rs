use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawingId(Uuid);

impl DrawingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DrawingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DrawingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Freeform annotation primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingTool {
    Line,
    Rectangle,
    /// Center then a point on the circumference.
    Circle,
    /// Start, a point on the arc, end.
    Arc,
    DoubleLine,
}

impl DrawingTool {
    pub fn points_required(&self) -> usize {
        match self {
            Self::Arc => 3,
            _ => 2,
        }
    }
}

impl fmt::Display for DrawingTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line => write!(f, "Line"),
            Self::Rectangle => write!(f, "Rectangle"),
            Self::Circle => write!(f, "Circle"),
            Self::Arc => write!(f, "Arc"),
            Self::DoubleLine => write!(f, "Double line"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    DashDot,
}

/// A freeform annotation. Never priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingElement {
    pub id: DrawingId,
    pub tool: DrawingTool,
    pub points: Vec<Point>,
    pub style: LineStyle,
}

impl DrawingElement {
    pub fn new(tool: DrawingTool, points: Vec<Point>, style: LineStyle) -> Self {
        Self {
            id: DrawingId::new(),
            tool,
            points,
            style,
        }
    }
}
