use std::time::{Duration, Instant};

use plantrace_designer::gesture::{GestureController, GestureEvent, PointerKind};
use plantrace_designer::model::Point;
use plantrace_settings::GestureSettings;

fn controller() -> GestureController {
    GestureController::new(GestureSettings::default())
}

#[test]
fn test_tap_within_tolerance() {
    let mut g = controller();
    let t0 = Instant::now();
    assert_eq!(
        g.pointer_down(1, PointerKind::Mouse, Point::new(100.0, 100.0), t0, true),
        GestureEvent::Press(Point::new(100.0, 100.0))
    );
    assert_eq!(g.pointer_move(1, Point::new(104.0, 103.0)), GestureEvent::None);
    assert_eq!(
        g.pointer_up(1, Point::new(104.0, 103.0)),
        GestureEvent::Tap(Point::new(104.0, 103.0))
    );
    assert_eq!(g.active_contacts(), 0);
}

#[test]
fn test_drag_beyond_tolerance() {
    let mut g = controller();
    g.pointer_down(1, PointerKind::Mouse, Point::new(0.0, 0.0), Instant::now(), true);
    let event = g.pointer_move(1, Point::new(20.0, 0.0));
    assert_eq!(
        event,
        GestureEvent::Drag {
            position: Point::new(20.0, 0.0),
            delta: Point::new(20.0, 0.0),
        }
    );
    assert_eq!(
        g.pointer_up(1, Point::new(20.0, 0.0)),
        GestureEvent::DragEnd(Point::new(20.0, 0.0))
    );
}

#[test]
fn test_hover_without_contact() {
    let mut g = controller();
    assert_eq!(
        g.pointer_move(7, Point::new(3.0, 4.0)),
        GestureEvent::Hover(Point::new(3.0, 4.0))
    );
}

#[test]
fn test_long_press_fires_once_after_deadline() {
    let mut g = controller();
    let t0 = Instant::now();
    g.pointer_down(1, PointerKind::Touch, Point::new(50.0, 50.0), t0, true);
    assert!(g.long_press_pending());

    assert_eq!(g.poll(t0 + Duration::from_millis(399)), GestureEvent::None);
    assert_eq!(
        g.poll(t0 + Duration::from_millis(400)),
        GestureEvent::LongPress(Point::new(50.0, 50.0))
    );
    assert_eq!(g.poll(t0 + Duration::from_millis(900)), GestureEvent::None);

    // Movement after the long-press drags even within tolerance
    assert!(matches!(
        g.pointer_move(1, Point::new(52.0, 50.0)),
        GestureEvent::Drag { .. }
    ));
    assert_eq!(
        g.pointer_up(1, Point::new(52.0, 50.0)),
        GestureEvent::LongPressEnd(Point::new(52.0, 50.0))
    );
}

#[test]
fn test_long_press_cancelled_by_movement() {
    let mut g = controller();
    let t0 = Instant::now();
    g.pointer_down(1, PointerKind::Touch, Point::new(0.0, 0.0), t0, true);
    g.pointer_move(1, Point::new(0.0, 11.0));
    assert!(!g.long_press_pending());
    assert_eq!(g.poll(t0 + Duration::from_secs(2)), GestureEvent::None);
}

#[test]
fn test_long_press_cancelled_by_release() {
    let mut g = controller();
    let t0 = Instant::now();
    g.pointer_down(1, PointerKind::Touch, Point::new(0.0, 0.0), t0, true);
    assert!(matches!(g.pointer_up(1, Point::new(0.0, 0.0)), GestureEvent::Tap(_)));
    assert_eq!(g.poll(t0 + Duration::from_secs(2)), GestureEvent::None);
}

#[test]
fn test_mouse_never_long_presses() {
    let mut g = controller();
    let t0 = Instant::now();
    g.pointer_down(1, PointerKind::Mouse, Point::new(0.0, 0.0), t0, true);
    assert_eq!(g.poll(t0 + Duration::from_secs(2)), GestureEvent::None);
}

#[test]
fn test_pinch_pans_and_zooms_with_damping() {
    let mut g = controller();
    let t0 = Instant::now();
    g.pointer_down(1, PointerKind::Touch, Point::new(0.0, 0.0), t0, true);
    assert_eq!(
        g.pointer_down(2, PointerKind::Touch, Point::new(100.0, 0.0), t0, true),
        GestureEvent::PinchStart
    );
    assert!(g.is_pinching());

    // Spread from 100 to 200 px: ratio 2, damped by 0.5 -> 1.5
    match g.pointer_move(2, Point::new(200.0, 0.0)) {
        GestureEvent::Pinch { center, pan, factor } => {
            assert_eq!(center, Point::new(100.0, 0.0));
            assert_eq!(pan, Point::new(50.0, 0.0));
            assert!((factor - 1.5).abs() < 1e-12);
        }
        other => panic!("expected pinch, got {:?}", other),
    }

    assert_eq!(g.pointer_up(2, Point::new(200.0, 0.0)), GestureEvent::PinchEnd);
    // The remaining finger neither drags nor taps
    assert_eq!(g.pointer_move(1, Point::new(80.0, 0.0)), GestureEvent::None);
    assert_eq!(g.pointer_up(1, Point::new(80.0, 0.0)), GestureEvent::None);
}

#[test]
fn test_second_contact_ignored_when_gestures_disabled() {
    let mut g = controller();
    let t0 = Instant::now();
    g.pointer_down(1, PointerKind::Touch, Point::new(0.0, 0.0), t0, true);
    assert_eq!(
        g.pointer_down(2, PointerKind::Touch, Point::new(100.0, 0.0), t0, false),
        GestureEvent::None
    );
    assert_eq!(g.active_contacts(), 1);
    assert_eq!(g.pointer_up(2, Point::new(100.0, 0.0)), GestureEvent::None);
}

#[test]
fn test_touch_hold_is_a_tap_when_gestures_disabled() {
    let mut g = controller();
    let t0 = Instant::now();
    g.pointer_down(1, PointerKind::Touch, Point::new(10.0, 10.0), t0, false);
    assert!(!g.long_press_pending());
    assert_eq!(g.poll(t0 + Duration::from_secs(1)), GestureEvent::None);
    assert_eq!(
        g.pointer_up(1, Point::new(10.0, 10.0)),
        GestureEvent::Tap(Point::new(10.0, 10.0))
    );
}

#[test]
fn test_cancel_clears_contacts() {
    let mut g = controller();
    g.pointer_down(1, PointerKind::Touch, Point::new(0.0, 0.0), Instant::now(), true);
    assert_eq!(g.cancel(), GestureEvent::Cancel);
    assert_eq!(g.active_contacts(), 0);
    assert_eq!(g.cancel(), GestureEvent::None);
}
