use cinescroll_core::*;

fn tracker(config: ScrollConfig) -> ScrollIntensityTracker {
    ScrollIntensityTracker::new(&config).expect("valid scroll config")
}

const FRAME: f64 = 1.0 / 60.0;

#[test]
fn intensity_is_never_negative() {
    let mut t = tracker(ScrollConfig::default());
    for i in 0..500 {
        let delta = (i as f64 * 0.37).sin() * 120.0;
        t.push_delta(delta);
        let s = t.tick(FRAME);
        assert!(s.intensity >= 0.0);
        assert_eq!(
            s.intensity,
            (s.smoothed_current - s.smoothed_previous).abs()
        );
    }
}

#[test]
fn intensity_reaches_zero_once_input_is_constant() {
    let mut t = tracker(ScrollConfig {
        sensitivity: 1.0,
        ..ScrollConfig::default()
    });
    t.set_position(100.0);
    for _ in 0..2000 {
        t.tick(FRAME);
    }
    let s = t.state();
    assert_eq!(s.intensity, 0.0);
    assert_eq!(s.smoothed_previous, s.smoothed_current);
    assert!((s.smoothed_current - 100.0).abs() < 1e-9);
}

#[test]
fn wheel_deltas_are_scaled_by_sensitivity() {
    let mut t = tracker(ScrollConfig::default());
    t.push_delta(100.0);
    assert!((t.raw() - 100.0 * WHEEL_SENSITIVITY).abs() < 1e-12);
    // smoothing has not run yet
    assert_eq!(t.smoothed(), 0.0);
}

#[test]
fn bounds_clamp_raw_input_silently() {
    let bounds = ScrollBounds::new(1.5, 12.0).unwrap();
    let mut t = tracker(ScrollConfig {
        start: 9.0,
        bounds: Some(bounds),
        ..ScrollConfig::default()
    });
    t.push_delta(-10_000.0); // sensitivity is negative: pushes raw up
    assert_eq!(t.raw(), 12.0);
    t.push_delta(10_000.0);
    assert_eq!(t.raw(), 1.5);
    t.set_position(-3.0);
    assert_eq!(t.raw(), 1.5);

    for _ in 0..600 {
        let s = t.tick(FRAME);
        assert!(s.smoothed_current >= 1.5 && s.smoothed_current <= 12.0);
    }
}

#[test]
fn start_outside_bounds_is_clamped() {
    let t = tracker(ScrollConfig {
        start: 40.0,
        bounds: Some(ScrollBounds::new(0.0, 10.0).unwrap()),
        ..ScrollConfig::default()
    });
    assert_eq!(t.raw(), 10.0);
    assert_eq!(t.smoothed(), 10.0);
}

#[test]
fn invalid_configuration_is_rejected() {
    assert!(ScrollBounds::new(5.0, 1.0).is_err());
    assert!(ScrollBounds::new(f64::NAN, 1.0).is_err());

    let zero_sensitivity = ScrollConfig {
        sensitivity: 0.0,
        ..ScrollConfig::default()
    };
    assert_eq!(
        ScrollIntensityTracker::new(&zero_sensitivity).unwrap_err(),
        ConfigError::Sensitivity(0.0)
    );

    let no_damping = ScrollConfig {
        damping: 0.0,
        ..ScrollConfig::default()
    };
    assert!(matches!(
        ScrollIntensityTracker::new(&no_damping),
        Err(ConfigError::SmoothingFactor(_))
    ));

    let bad_rate = ScrollConfig {
        reference_frame_rate: Some(0.0),
        ..ScrollConfig::default()
    };
    assert!(ScrollIntensityTracker::new(&bad_rate).is_err());
}

#[test]
fn non_finite_input_is_ignored() {
    let mut t = tracker(ScrollConfig::default());
    t.push_delta(20.0);
    let before = t.raw();
    t.push_delta(f64::NAN);
    t.set_position(f64::INFINITY);
    assert_eq!(t.raw(), before);
}

#[test]
fn per_tick_mode_ignores_frame_duration() {
    let mut t = tracker(ScrollConfig {
        sensitivity: 1.0,
        reference_frame_rate: None,
        ..ScrollConfig::default()
    });
    t.set_position(10.0);
    let s = t.tick(5.0);
    assert!((s.smoothed_current - 1.0).abs() < 1e-12);
    assert!((s.intensity - 1.0).abs() < 1e-12);
}
