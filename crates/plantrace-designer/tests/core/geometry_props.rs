use plantrace_designer::catalog::ItemKind;
use plantrace_designer::editing::{flip_item, rotate_item};
use plantrace_designer::geometry::{
    closest_point_on_segment, is_clockwise, polygon_area, rotate_about, FlipAxis,
};
use plantrace_designer::model::{PlacedItem, Point};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    -1000.0f64..1000.0
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

/// Rings with a clearly non-zero area so the winding is well defined.
fn ring() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec(point(), 3..8).prop_filter("non-degenerate ring", |pts| {
        polygon_area(pts) > 1.0
    })
}

fn close(a: Point, b: Point) -> bool {
    a.distance_to(&b) < 1e-6
}

proptest! {
    #[test]
    fn winding_is_invariant_under_cyclic_rotation(pts in ring(), shift in 0usize..8) {
        let mut rotated = pts.clone();
        rotated.rotate_left(shift % pts.len());
        prop_assert_eq!(is_clockwise(&rotated), is_clockwise(&pts));
    }

    #[test]
    fn winding_flips_under_reversal(pts in ring()) {
        let mut reversed = pts.clone();
        reversed.reverse();
        prop_assert_ne!(is_clockwise(&reversed), is_clockwise(&pts));
    }

    #[test]
    fn degenerate_segment_projects_to_its_point(p in point(), a in point()) {
        prop_assert_eq!(closest_point_on_segment(p, a, a), a);
    }

    #[test]
    fn rotate_then_unrotate_restores(pts in ring(), pivot in point(), theta in -720.0f64..720.0) {
        let back = rotate_about(&rotate_about(&pts, pivot, theta), pivot, -theta);
        for (a, b) in back.iter().zip(&pts) {
            prop_assert!(close(*a, *b), "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn horizontal_flip_twice_restores_polygon(pts in ring()) {
        let original = PlacedItem::new(ItemKind::ParkingArea, pts);
        let mut item = original.clone();
        flip_item(&mut item, FlipAxis::Horizontal);
        flip_item(&mut item, FlipAxis::Horizontal);
        for (a, b) in item.points.iter().zip(&original.points) {
            prop_assert!(close(*a, *b));
        }
    }

    #[test]
    fn horizontal_flip_twice_restores_line(a in point(), b in point()) {
        let original = PlacedItem::new(ItemKind::Fence, vec![a, b]);
        let mut item = original.clone();
        flip_item(&mut item, FlipAxis::Horizontal);
        flip_item(&mut item, FlipAxis::Horizontal);
        prop_assert!(close(item.points[0], a));
        prop_assert!(close(item.points[1], b));
    }

    #[test]
    fn horizontal_flip_twice_restores_point_item(p in point(), angle in 0.0f64..360.0) {
        let mut item = PlacedItem::new(ItemKind::Planting, vec![p]);
        rotate_item(&mut item, angle);
        let before = item.clone();
        flip_item(&mut item, FlipAxis::Horizontal);
        flip_item(&mut item, FlipAxis::Horizontal);
        prop_assert!(close(item.points[0], before.points[0]));
        let (r0, r1) = (before.rotation.unwrap_or(0.0), item.rotation.unwrap_or(0.0));
        let diff = (r0 - r1).rem_euclid(360.0);
        prop_assert!(diff < 1e-6 || diff > 360.0 - 1e-6);
    }
}
