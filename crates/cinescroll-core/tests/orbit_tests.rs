use cinescroll_core::*;
use glam::{DQuat, DVec3};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

fn close(a: DVec3, b: DVec3, eps: f64) -> bool {
    a.distance(b) < eps
}

#[test]
fn torus_path_is_periodic_in_u() {
    let path = OrbitPath::torus(8.0, 0.06, 0.7).unwrap();
    for k in 0..64 {
        let u = -10.0 + k as f64 * 0.37;
        let a = path.sample(u).position;
        let b = path.sample(u + TAU).position;
        assert!(close(a, b, 1e-9), "u={u}: {a:?} vs {b:?}");
    }
}

#[test]
fn torus_path_stays_on_its_ring() {
    let (major, minor, v) = (3.0, 0.5, 1.1);
    let path = OrbitPath::torus(major, minor, v).unwrap();
    for k in 0..32 {
        let p = path.sample(k as f64 * 0.2).position;
        let ring = (p.x * p.x + p.y * p.y).sqrt();
        assert!((ring - (major + minor * v.cos())).abs() < 1e-9);
        assert!((p.z - minor * v.sin()).abs() < 1e-12);
    }
}

#[test]
fn torus_tangent_hint_runs_ahead_of_u() {
    let path = OrbitPath::torus(2.0, 0.5, 0.0).unwrap();
    let s = path.sample(0.3);
    assert!((s.tangent_hint_rotation - (0.3 + FRAC_PI_2)).abs() < 1e-12);
}

#[test]
fn lemniscate_is_planar_and_symmetric() {
    let path = OrbitPath::lemniscate(2.0).unwrap();
    for k in 0..200 {
        let t = -7.0 + k as f64 * 0.071;
        let p = path.sample(t).position;
        assert_eq!(p.z, 0.0);

        // half a turn mirrors across the y axis
        let half = path.sample(t + PI).position;
        assert!(close(half, DVec3::new(-p.x, p.y, 0.0), 1e-9));

        // reflecting the parameter about π/2 mirrors across the x axis
        let reflected = path.sample(PI - t).position;
        assert!(close(reflected, DVec3::new(p.x, -p.y, 0.0), 1e-9));
    }
}

#[test]
fn lemniscate_crosses_itself_only_at_the_origin() {
    let path = OrbitPath::lemniscate(1.0).unwrap();
    assert!(close(path.sample(0.0).position, DVec3::ZERO, 1e-12));
    assert!(close(path.sample(PI).position, DVec3::ZERO, 1e-12));
    assert!(close(path.sample(FRAC_PI_2).position, DVec3::X, 1e-12));
}

#[test]
fn world_transform_rotates_then_translates() {
    let path = OrbitPath::lemniscate(1.0).unwrap();
    let transform = WorldTransform::new(
        DQuat::from_rotation_z(FRAC_PI_2),
        DVec3::new(10.0, 0.0, 0.0),
    );
    // local (1, 0, 0) -> rotated (0, 1, 0) -> translated (10, 1, 0)
    let p = path.sample_in(FRAC_PI_2, &transform).position;
    assert!(close(p, DVec3::new(10.0, 1.0, 0.0), 1e-12), "{p:?}");
}

#[test]
fn world_transform_scales_before_rotating() {
    let transform = WorldTransform::from_euler_xyz(0.0, 0.0, PI, DVec3::new(0.0, 2.0, 0.0))
        .with_scale(0.2)
        .unwrap();
    let p = transform.apply(DVec3::new(8.0, 0.0, 0.0));
    assert!(close(p, DVec3::new(-1.6, 2.0, 0.0), 1e-12), "{p:?}");
    assert!(WorldTransform::IDENTITY.with_scale(0.0).is_err());
}

#[test]
fn phases_wrap_into_one_turn() {
    let mut phase = Phase::default();
    for _ in 0..1000 {
        phase.advance(0.1, 3.3);
        assert!(phase.value() >= 0.0 && phase.value() < TAU);
    }
    let mut backwards = Phase::new(0.2);
    backwards.advance(1.0, -0.5);
    assert!((backwards.value() - (TAU - 0.3)).abs() < 1e-12);

    assert_eq!(wrap_phase(TAU), 0.0);
    assert!(wrap_phase(-1e-20) < TAU);
}

#[test]
fn evenly_spaced_groups_share_shape_and_speed() {
    let path = OrbitPath::lemniscate(1.5).unwrap();
    let group = evenly_spaced(path, 3, 0.5, 10, WorldTransform::IDENTITY).unwrap();
    assert_eq!(group.len(), 3);
    let expected = [0.0, TAU / 3.0, 2.0 * TAU / 3.0];
    for (binding, offset) in group.iter().zip(expected) {
        assert_eq!(binding.path, path);
        assert_eq!(binding.speed, 0.5);
        assert!((binding.phase_offset - offset).abs() < 1e-12);
    }
    let ids: Vec<FollowerId> = group.iter().map(|b| b.follower_id).collect();
    assert_eq!(ids, vec![10, 11, 12]);

    assert_eq!(
        evenly_spaced(path, 0, 0.5, 0, WorldTransform::IDENTITY).unwrap_err(),
        ConfigError::EmptyFollowerGroup
    );
}

#[test]
fn follower_sample_applies_offset_and_transform() {
    let path = OrbitPath::lemniscate(1.0).unwrap();
    let binding = FollowerBinding::new(1, path, 1.0)
        .unwrap()
        .with_offset(FRAC_PI_2)
        .unwrap()
        .with_transform(WorldTransform::new(DQuat::IDENTITY, DVec3::new(0.0, 0.0, -3.0)));
    let s = binding.sample(0.0);
    assert!(close(s.position, DVec3::new(1.0, 0.0, -3.0), 1e-12));
    assert!((s.phase - FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn invalid_paths_are_rejected() {
    assert!(OrbitPath::lemniscate(0.0).is_err());
    assert!(OrbitPath::torus(-1.0, 0.1, 0.0).is_err());
    assert!(OrbitPath::torus(1.0, 0.0, 0.0).is_err());
    assert!(OrbitPath::torus(1.0, 0.1, f64::NAN).is_err());
    assert!(FollowerBinding::new(0, OrbitPath::lemniscate(1.0).unwrap(), f64::NAN).is_err());
}
