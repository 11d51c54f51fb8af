use cinescroll_core::*;
use glam::{DQuat, DVec3, Vec4};

#[test]
fn shipped_presets_validate() {
    for config in [
        PresentationConfig::intro_sphere(),
        PresentationConfig::chapters(),
        PresentationConfig::particle_field(),
    ] {
        let tracker = config.validate().unwrap();
        assert_eq!(tracker.raw(), config.scroll.start);
        assert!(Choreographer::new(config).is_ok());
    }
}

#[test]
fn presets_resolve_by_name() {
    assert_eq!(PresentationConfig::from_name("intro").unwrap().name, "intro");
    assert_eq!(PresentationConfig::from_name("sphere").unwrap().name, "intro");
    assert_eq!(
        PresentationConfig::from_name("chapters").unwrap().camera.axis,
        CameraAxis::Horizontal
    );
    assert_eq!(
        PresentationConfig::from_name("particle-field").unwrap().trail.count,
        PARTICLE_TRAIL_COUNT
    );
    assert!(PresentationConfig::from_name("gallery").is_none());
}

#[test]
fn invalid_tunables_are_rejected() {
    let mut config = PresentationConfig::chapters();
    config.scroll.damping = 0.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::SmoothingFactor(_))
    ));

    let mut config = PresentationConfig::chapters();
    config.scroll.sensitivity = 0.0;
    assert!(matches!(config.validate(), Err(ConfigError::Sensitivity(_))));

    let mut config = PresentationConfig::chapters();
    config.camera.fov_y_degrees = -1.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NonPositive { .. })
    ));

    let mut config = PresentationConfig::chapters();
    config.parallax = Some(ParallaxConfig {
        gain: f64::NAN,
        rate: 5.0,
    });
    assert!(matches!(config.validate(), Err(ConfigError::NotFinite { .. })));

    let mut config = PresentationConfig::particle_field();
    config.trail.spacing = -0.1;
    assert!(matches!(config.validate(), Err(ConfigError::Negative { .. })));

    let mut config = PresentationConfig::intro_sphere();
    config.exit = Some(ExitConfig {
        camera_duration: 0.0,
        ..ExitConfig::SPHERE
    });
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NonPositive { .. })
    ));
    config.exit = Some(ExitConfig {
        group_x: f64::INFINITY,
        ..ExitConfig::SPHERE
    });
    assert!(matches!(config.validate(), Err(ConfigError::NotFinite { .. })));

    assert!(ScrollBounds::new(2.0, 1.0).is_err());
    assert!(Choreographer::new(PresentationConfig {
        initial_aspect: 0.0,
        ..PresentationConfig::intro_sphere()
    })
    .is_err());
}

#[test]
fn config_errors_describe_the_problem() {
    let err = ScrollBounds::new(3.0, 1.0).unwrap_err();
    assert!(err.to_string().contains('3'));
    let err = SmoothingFilter::new(1.5).unwrap_err();
    assert!(err.to_string().contains("1.5"));
}

#[test]
fn camera_matrices_are_finite_and_centre_the_target() {
    let pose = CameraPose {
        position: DVec3::new(20.0, 0.0, CHAPTER_CAMERA_Z),
        parallax: DVec3::new(0.1, -0.1, 0.0),
    };
    let camera = Camera::from_pose(&pose, 16.0 / 9.0, CHAPTER_FOV_DEGREES);
    assert_eq!(camera.eye, pose.eye().as_vec3());
    let vp = camera.view_projection();
    assert!(vp.to_cols_array().iter().all(|v| v.is_finite()));

    // a point straight ahead lands in the middle of the screen
    let ahead = camera.eye - glam::Vec3::Z * 5.0;
    let clip = vp * Vec4::new(ahead.x, ahead.y, ahead.z, 1.0);
    assert!((clip.x / clip.w).abs() < 1e-5);
    assert!((clip.y / clip.w).abs() < 1e-5);
}

#[test]
fn instance_records_are_tightly_packed() {
    assert_eq!(std::mem::size_of::<InstanceData>(), 32);

    let mut frame = FrameTransforms::default();
    frame.trail_offsets = vec![DVec3::ZERO, DVec3::new(0.0, 0.0, 0.1)];
    frame.layout.push(ElementTransform {
        index: 0,
        content_id: 4,
        position: DVec3::new(1.0, 2.0, 3.0),
        rotation: DQuat::IDENTITY,
    });

    let mut instances = Vec::new();
    frame.layout_instances(0.5, &mut instances);
    frame.trail_instances(&mut instances);
    assert_eq!(instances.len(), 3);
    assert_eq!(instances[0].position, [1.0, 2.0, 3.0]);
    assert_eq!(instances[0].scale, 0.5);
    assert_eq!(instances[0].rotation, [0.0, 0.0, 0.0, 1.0]);

    let bytes: &[u8] = bytemuck::cast_slice(&instances);
    assert_eq!(bytes.len(), 3 * 32);
}
