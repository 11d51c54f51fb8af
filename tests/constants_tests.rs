// Host-side checks on the shared tuning constants and how the presets use them.

use cinescroll_core::*;
use std::f64::consts::PI;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // Smoothing factor must be a valid filter weight
    assert!(SCROLL_DAMPING > 0.0 && SCROLL_DAMPING <= 1.0);
    assert!(REFERENCE_FRAME_RATE > 0.0);

    // Wheel down moves the intro camera toward the sphere
    assert!(WHEEL_SENSITIVITY < 0.0);

    // Intro bounds bracket the start; the closest approach is inside the shell
    assert!(INTRO_SCROLL_MIN < INTRO_SCROLL_START && INTRO_SCROLL_START < INTRO_SCROLL_MAX);
    assert!(INTRO_SCROLL_MIN > 0.0 && INTRO_SCROLL_MIN < SPHERE_RADIUS);
    assert!(INTRO_REVEAL_DEPTH > INTRO_SCROLL_MIN && INTRO_REVEAL_DEPTH < INTRO_SCROLL_START);

    // Sphere carries more slots than content so every item repeats
    assert!(SPHERE_CONTENT_COUNT <= SPHERE_SLOT_COUNT);
    assert!(SPHERE_JITTER >= 0.0 && SPHERE_JITTER < 0.5);

    assert!(TORUS_MINOR_RADIUS < TORUS_MAJOR_RADIUS);
    assert!(PARALLAX_RATE > 0.0 && PARALLAX_GAIN > 0.0);
}

#[test]
fn golden_angle_matches_its_closed_form() {
    let expected = PI * (3.0 - 5f64.sqrt());
    assert!((GOLDEN_ANGLE - expected).abs() < 1e-12);
}

#[test]
fn palette_channels_are_normalized() {
    for colour in STAR_PALETTE {
        assert!(colour.iter().all(|c| (0.0..=1.0).contains(c)));
    }
}

#[test]
fn presets_use_the_page_constants() {
    let intro = PresentationConfig::intro_sphere();
    assert_eq!(intro.scroll.start, INTRO_SCROLL_START);
    assert_eq!(intro.trail.count, INTRO_TRAIL_COUNT);
    assert_eq!(intro.reveal_below, Some(INTRO_REVEAL_DEPTH));

    let chapters = PresentationConfig::chapters();
    assert_eq!(chapters.camera.scale, CHAPTER_OBJECTS_DISTANCE);
    assert_eq!(chapters.camera.fov_y_degrees, CHAPTER_FOV_DEGREES);

    let particles = PresentationConfig::particle_field();
    assert_eq!(particles.camera.base.z, PARTICLE_CAMERA_Z);
    assert_eq!(particles.trail.count, PARTICLE_TRAIL_COUNT);
}
