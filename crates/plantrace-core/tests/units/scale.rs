use plantrace_core::units::{snap_distance_pixels, Scale};
use proptest::prelude::*;

proptest! {
    #[test]
    fn calibrated_scale_maps_reference_distance_back(
        pixels in 1.0f64..5000.0,
        meters in 0.01f64..500.0,
    ) {
        let scale = Scale::from_calibration(pixels, meters).unwrap();
        prop_assert!((scale.to_meters(pixels) - meters).abs() < 1e-9 * meters.max(1.0));
    }

    #[test]
    fn snap_radius_never_below_screen_floor(
        ppm in 0.01f64..10000.0,
        floor in 1.0f64..100.0,
    ) {
        let scale = Scale::new(ppm).unwrap();
        prop_assert!(snap_distance_pixels(Some(scale), 0.1, floor) >= floor);
    }
}

#[test]
fn test_unset_scale_uses_screen_floor() {
    assert_eq!(snap_distance_pixels(None, 0.1, 45.0), 45.0);
}
