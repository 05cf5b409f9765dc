use plantrace_designer::model::Point;
use plantrace_designer::viewport::ViewTransform;
use plantrace_settings::ViewSettings;

fn assert_close(a: Point, b: Point) {
    assert!(a.distance_to(&b) < 1e-6, "{:?} != {:?}", a, b);
}

#[test]
fn test_identity_transform() {
    let vt = ViewTransform::new(800.0, 600.0);
    assert_eq!(vt.zoom(), 1.0);
    assert_eq!(vt.screen_to_model(120.0, 45.0), Point::new(120.0, 45.0));
    assert_eq!(vt.model_to_screen(Point::new(120.0, 45.0)), (120.0, 45.0));
}

#[test]
fn test_pan_and_zoom_inverse() {
    let mut vt = ViewTransform::new(800.0, 600.0);
    vt.set_zoom(2.0);
    vt.set_pan(30.0, -10.0);
    // model = (screen - pan) / zoom
    assert_close(vt.screen_to_model(230.0, 90.0), Point::new(100.0, 50.0));
    let (sx, sy) = vt.model_to_screen(Point::new(100.0, 50.0));
    assert!((sx - 230.0).abs() < 1e-9);
    assert!((sy - 90.0).abs() < 1e-9);
}

#[test]
fn test_rotation_is_about_content_center() {
    let mut vt = ViewTransform::new(800.0, 600.0);
    vt.set_rotation(90.0);
    // The centre of the image stays put under any rotation
    let center = vt.content_center();
    let (sx, sy) = vt.model_to_screen(center);
    assert_close(Point::new(sx, sy), center);
}

#[test]
fn test_round_trip_with_rotation_pan_and_zoom() {
    let mut vt = ViewTransform::new(1000.0, 700.0);
    vt.set_rotation(270.0);
    vt.set_zoom(1.7);
    vt.set_pan(-40.0, 25.0);
    for p in [
        Point::new(0.0, 0.0),
        Point::new(1000.0, 700.0),
        Point::new(123.4, 567.8),
    ] {
        let (sx, sy) = vt.model_to_screen(p);
        assert_close(vt.screen_to_model(sx, sy), p);
    }
}

#[test]
fn test_zoom_is_clamped() {
    let mut vt = ViewTransform::new(800.0, 600.0);
    vt.set_zoom(50.0);
    assert_eq!(vt.zoom(), 10.0);
    vt.set_zoom(0.01);
    assert_eq!(vt.zoom(), 0.1);

    let settings = ViewSettings {
        min_zoom: 0.5,
        max_zoom: 4.0,
    };
    let mut limited = ViewTransform::with_settings(800.0, 600.0, &settings);
    limited.set_zoom(8.0);
    assert_eq!(limited.zoom(), 4.0);
}

#[test]
fn test_zoom_at_keeps_cursor_fixed() {
    let mut vt = ViewTransform::new(800.0, 600.0);
    vt.set_pan(15.0, 20.0);
    let before = vt.screen_to_model(300.0, 200.0);
    vt.zoom_at(300.0, 200.0, 1.1);
    assert!((vt.zoom() - 1.1).abs() < 1e-12);
    assert_close(vt.screen_to_model(300.0, 200.0), before);
}

#[test]
fn test_zoom_at_limit_does_not_drift() {
    let mut vt = ViewTransform::new(800.0, 600.0);
    vt.set_zoom(10.0);
    vt.set_pan(5.0, 5.0);
    vt.zoom_at(100.0, 100.0, 2.0);
    assert_eq!(vt.zoom(), 10.0);
    assert_eq!((vt.pan_x(), vt.pan_y()), (5.0, 5.0));
}

#[test]
fn test_rotate_90_wraps() {
    let mut vt = ViewTransform::new(800.0, 600.0);
    for _ in 0..3 {
        vt.rotate_90();
    }
    assert_eq!(vt.rotation(), 270.0);
    vt.rotate_90();
    assert_eq!(vt.rotation(), 0.0);
    vt.set_rotation(-90.0);
    assert_eq!(vt.rotation(), 270.0);
}

#[test]
fn test_fit_to_canvas_centres_content() {
    let mut vt = ViewTransform::new(1000.0, 500.0);
    vt.fit_to_canvas(500.0, 500.0, 0.0);
    assert!((vt.zoom() - 0.5).abs() < 1e-12);
    assert!((vt.pan_x() - 0.0).abs() < 1e-9);
    assert!((vt.pan_y() - 125.0).abs() < 1e-9);
}

#[test]
fn test_reset_and_display() {
    let mut vt = ViewTransform::new(800.0, 600.0);
    vt.set_zoom(2.0);
    vt.rotate_90();
    vt.reset();
    assert_eq!(vt.zoom(), 1.0);
    assert_eq!(vt.rotation(), 0.0);
    assert_eq!(vt.to_string(), "Zoom: 1.00x | Pan: (0.0, 0.0) | Rotation: 0°");
}
