//! Item catalog.
//!
//! Every placeable item is an [`ItemKind`]; its pricing unit, geometry and
//! default dimensions come from a static [`ItemInfo`] table. Which kinds are
//! offered to the user depends on the configured [`CatalogVariant`].

use plantrace_core::UnitKind;
use plantrace_settings::CatalogVariant;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of an item's point list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    /// Closed ring of three or more points
    Polygon,
    /// Exactly two points
    Line,
    /// Exactly one point
    Point,
}

/// Static description of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemInfo {
    pub name: &'static str,
    pub unit: UnitKind,
    /// Price per unit in whole currency units.
    pub price_per_unit: f64,
    /// Points needed to place the item (minimum for polygons).
    pub points_required: usize,
    pub geometry: GeometryKind,
    /// Height in meters used by the 3D preview.
    pub default_height: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    // Interior remodel
    Flooring,
    Tatami,
    WallCloth,
    Kitchen,
    Toilet,
    Bath,
    Washbasin,
    Door,
    Window,
    Closet,
    // Exterior works
    ParkingArea,
    Fence,
    BlockWall,
    RetainingWall,
    Gate,
    Carport,
    WoodDeck,
    Planting,
    Approach,
}

const INTERIOR: &[ItemKind] = &[
    ItemKind::Flooring,
    ItemKind::Tatami,
    ItemKind::WallCloth,
    ItemKind::Kitchen,
    ItemKind::Toilet,
    ItemKind::Bath,
    ItemKind::Washbasin,
    ItemKind::Door,
    ItemKind::Window,
    ItemKind::Closet,
];

const EXTERIOR: &[ItemKind] = &[
    ItemKind::ParkingArea,
    ItemKind::Fence,
    ItemKind::BlockWall,
    ItemKind::RetainingWall,
    ItemKind::Gate,
    ItemKind::Carport,
    ItemKind::WoodDeck,
    ItemKind::Planting,
    ItemKind::Approach,
];

const fn polygon(name: &'static str, price_per_unit: f64) -> ItemInfo {
    ItemInfo {
        name,
        unit: UnitKind::SquareMeter,
        price_per_unit,
        points_required: 3,
        geometry: GeometryKind::Polygon,
        default_height: None,
    }
}

const fn line(
    name: &'static str,
    unit: UnitKind,
    price_per_unit: f64,
    default_height: Option<f64>,
) -> ItemInfo {
    ItemInfo {
        name,
        unit,
        price_per_unit,
        points_required: 2,
        geometry: GeometryKind::Line,
        default_height,
    }
}

const fn point(
    name: &'static str,
    unit: UnitKind,
    price_per_unit: f64,
    default_height: Option<f64>,
) -> ItemInfo {
    ItemInfo {
        name,
        unit,
        price_per_unit,
        points_required: 1,
        geometry: GeometryKind::Point,
        default_height,
    }
}

impl ItemKind {
    /// Kinds offered by a catalog variant, in menu order.
    pub fn available(variant: CatalogVariant) -> &'static [ItemKind] {
        match variant {
            CatalogVariant::Interior => INTERIOR,
            CatalogVariant::Exterior => EXTERIOR,
        }
    }

    pub fn info(&self) -> ItemInfo {
        use UnitKind::{Item, Meter, Set};
        match self {
            Self::Flooring => polygon("Flooring", 9000.0),
            Self::Tatami => polygon("Tatami", 12000.0),
            Self::WallCloth => line("Wall cloth", Meter, 3500.0, Some(2.4)),
            Self::Kitchen => point("Kitchen", Set, 800000.0, Some(0.85)),
            Self::Toilet => point("Toilet", Item, 200000.0, Some(0.8)),
            Self::Bath => point("Unit bath", Set, 900000.0, Some(2.0)),
            Self::Washbasin => point("Washbasin", Item, 150000.0, Some(0.8)),
            Self::Door => line("Door", Set, 60000.0, Some(2.0)),
            Self::Window => line("Window", Item, 50000.0, Some(1.1)),
            Self::Closet => polygon("Closet", 30000.0),

            Self::ParkingArea => polygon("Parking area", 15000.0),
            Self::Fence => line("Fence", Meter, 18000.0, Some(0.8)),
            Self::BlockWall => line("Block wall", Meter, 20000.0, Some(0.4)),
            Self::RetainingWall => line("Retaining wall", Meter, 35000.0, Some(0.6)),
            Self::Gate => line("Gate", Item, 150000.0, Some(1.2)),
            Self::Carport => point("Carport", Item, 300000.0, Some(2.3)),
            Self::WoodDeck => polygon("Wood deck", 25000.0),
            Self::Planting => point("Planting", Item, 30000.0, None),
            Self::Approach => polygon("Approach", 20000.0),
        }
    }

    pub fn geometry(&self) -> GeometryKind {
        self.info().geometry
    }

    pub fn is_polygon(&self) -> bool {
        self.geometry() == GeometryKind::Polygon
    }

    /// Floor coverings are clipped to the site boundary when closed.
    pub fn clips_to_site(&self) -> bool {
        matches!(self, Self::Flooring | Self::Tatami)
    }

    /// Floor coverings are traced with the orthogonal lock.
    pub fn uses_orthogonal_lock(&self) -> bool {
        matches!(self, Self::Flooring | Self::Tatami)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info().name)
    }
}

/// Block face finish for block walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    #[default]
    Normal,
    DecorativeA,
    DecorativeB,
}

/// Fence mounted on top of a block wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FenceType {
    #[default]
    None,
    Mesh,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetainingWallType {
    #[default]
    Vertical,
    Sloped,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockWallOptions {
    pub block_type: BlockType,
    pub fence_type: FenceType,
    /// Fence height above the block courses, meters.
    pub fence_height: f64,
}

impl Default for BlockWallOptions {
    fn default() -> Self {
        Self {
            block_type: BlockType::Normal,
            fence_type: FenceType::None,
            fence_height: 0.8,
        }
    }
}

/// Per-kind settings attached to a placed item.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemOptions {
    #[default]
    None,
    BlockWall(BlockWallOptions),
    RetainingWall { wall_type: RetainingWallType },
}

impl ItemOptions {
    /// Default options for a freshly placed item.
    pub fn default_for(kind: ItemKind) -> Self {
        match kind {
            ItemKind::BlockWall => Self::BlockWall(BlockWallOptions::default()),
            ItemKind::RetainingWall => Self::RetainingWall {
                wall_type: RetainingWallType::default(),
            },
            _ => Self::None,
        }
    }

    /// Whether these options may be attached to `kind`.
    pub fn applies_to(&self, kind: ItemKind) -> bool {
        match self {
            Self::None => !matches!(kind, ItemKind::BlockWall | ItemKind::RetainingWall),
            Self::BlockWall(_) => kind == ItemKind::BlockWall,
            Self::RetainingWall { .. } => kind == ItemKind::RetainingWall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_required_matches_geometry() {
        for variant in [CatalogVariant::Interior, CatalogVariant::Exterior] {
            for kind in ItemKind::available(variant) {
                let info = kind.info();
                let expected = match info.geometry {
                    GeometryKind::Polygon => 3,
                    GeometryKind::Line => 2,
                    GeometryKind::Point => 1,
                };
                assert_eq!(info.points_required, expected, "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_polygons_are_priced_by_area() {
        for kind in ItemKind::available(CatalogVariant::Exterior)
            .iter()
            .chain(ItemKind::available(CatalogVariant::Interior))
        {
            if kind.is_polygon() {
                assert_eq!(kind.info().unit, UnitKind::SquareMeter);
            }
        }
    }

    #[test]
    fn test_exterior_catalog_values() {
        let fence = ItemKind::Fence.info();
        assert_eq!(fence.unit, UnitKind::Meter);
        assert_eq!(fence.price_per_unit, 18000.0);
        assert_eq!(fence.default_height, Some(0.8));

        let gate = ItemKind::Gate.info();
        assert_eq!(gate.unit, UnitKind::Item);
        assert_eq!(gate.points_required, 2);
    }

    #[test]
    fn test_only_floor_coverings_clip() {
        assert!(ItemKind::Flooring.clips_to_site());
        assert!(ItemKind::Tatami.clips_to_site());
        assert!(!ItemKind::Closet.clips_to_site());
        assert!(!ItemKind::ParkingArea.clips_to_site());
    }

    #[test]
    fn test_default_options() {
        assert!(matches!(
            ItemOptions::default_for(ItemKind::BlockWall),
            ItemOptions::BlockWall(_)
        ));
        assert_eq!(ItemOptions::default_for(ItemKind::Fence), ItemOptions::None);
        assert!(!ItemOptions::None.applies_to(ItemKind::RetainingWall));
        assert!(ItemOptions::default_for(ItemKind::RetainingWall).applies_to(ItemKind::RetainingWall));
    }

    #[test]
    fn test_serde_kind_names() {
        let json = serde_json::to_string(&ItemKind::ParkingArea).unwrap();
        assert_eq!(json, "\"PARKING_AREA\"");
    }
}
