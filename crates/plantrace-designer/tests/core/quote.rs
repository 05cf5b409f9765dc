use plantrace_core::{Scale, UnitKind};
use plantrace_designer::catalog::ItemKind;
use plantrace_designer::model::{PlacedItem, Point};
use plantrace_designer::quote::{build_quote, item_quantity};

#[test]
fn test_line_of_scale_pixels_is_one_meter() {
    let scale = Scale::new(87.5).unwrap();
    let fence = PlacedItem::new(
        ItemKind::Fence,
        vec![Point::new(10.0, 10.0), Point::new(97.5, 10.0)],
    );
    assert!((item_quantity(&fence, scale) - 1.0).abs() < 1e-12);
}

#[test]
fn test_rectangle_area_in_square_meters() {
    let scale = Scale::new(40.0).unwrap();
    let (w, h) = (200.0, 120.0);
    let deck = PlacedItem::new(
        ItemKind::WoodDeck,
        vec![
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ],
    );
    let expected = (w / 40.0) * (h / 40.0);
    assert!((item_quantity(&deck, scale) - expected).abs() < 1e-9);
}

#[test]
fn test_quote_lines_and_total() {
    let scale = Scale::new(100.0).unwrap();
    let items = vec![
        PlacedItem::new(
            ItemKind::Fence,
            vec![Point::new(0.0, 0.0), Point::new(250.0, 0.0)],
        ),
        PlacedItem::new(ItemKind::Carport, vec![Point::new(50.0, 50.0)]),
    ];
    let quote = build_quote(&items, Some(scale));
    assert_eq!(quote.lines.len(), 2);

    let fence = &quote.lines[0];
    assert_eq!(fence.unit, UnitKind::Meter);
    assert!((fence.quantity - 2.5).abs() < 1e-12);
    assert!((fence.total - 2.5 * fence.unit_price).abs() < 1e-6);

    let carport = &quote.lines[1];
    assert_eq!(carport.quantity, 1.0);
    assert_eq!(carport.total, carport.unit_price);

    let sum: f64 = quote.lines.iter().map(|l| l.total).sum();
    assert_eq!(quote.total, sum.round() as u64);
}

#[test]
fn test_quote_without_scale_is_empty() {
    let items = vec![PlacedItem::new(ItemKind::Carport, vec![Point::new(0.0, 0.0)])];
    let quote = build_quote(&items, None);
    assert!(quote.lines.is_empty());
    assert_eq!(quote.total, 0);
}
