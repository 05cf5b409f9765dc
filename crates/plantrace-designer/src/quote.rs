//! Quantity and cost estimate.
//!
//! The quote is derived from the placed items and the scale every time it
//! is requested; it is never stored.

use plantrace_core::{Scale, UnitKind};
use serde::{Deserialize, Serialize};

use crate::geometry::{distance, polygon_area};
use crate::model::{ItemId, PlacedItem};

/// One priced item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub id: ItemId,
    pub name: String,
    pub quantity: f64,
    pub unit: UnitKind,
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Quote {
    pub lines: Vec<QuoteLine>,
    /// Sum of line totals rounded to whole currency units
    pub total: u64,
}

impl Quote {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Real-world quantity of an item in its catalog unit.
///
/// Length items need exactly two points and area items at least three;
/// anything else measures as zero.
pub fn item_quantity(item: &PlacedItem, scale: Scale) -> f64 {
    let unit = item.info().unit;
    match unit {
        UnitKind::Meter if item.points.len() == 2 => {
            scale.to_meters(distance(item.points[0], item.points[1]))
        }
        UnitKind::SquareMeter if item.points.len() >= 3 => {
            scale.to_square_meters(polygon_area(&item.points))
        }
        UnitKind::Item | UnitKind::Set => 1.0,
        _ => 0.0,
    }
}

/// Prices every item. Without a scale nothing can be measured and the
/// quote is empty.
pub fn build_quote(items: &[PlacedItem], scale: Option<Scale>) -> Quote {
    let Some(scale) = scale else {
        return Quote::default();
    };

    let lines: Vec<QuoteLine> = items
        .iter()
        .map(|item| {
            let info = item.info();
            let quantity = item_quantity(item, scale);
            QuoteLine {
                id: item.id,
                name: info.name.to_string(),
                quantity,
                unit: info.unit,
                unit_price: info.price_per_unit,
                total: quantity * info.price_per_unit,
            }
        })
        .collect();

    let sum: f64 = lines.iter().map(|line| line.total).sum();
    Quote {
        lines,
        total: sum.round().max(0.0) as u64,
    }
}
