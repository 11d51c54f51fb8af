use cinescroll_core::*;
use glam::DVec3;
use std::collections::BTreeSet;

fn content(n: u32) -> Vec<ContentId> {
    (0..n).collect()
}

#[test]
fn fifty_slots_eighteen_images_radius_three() {
    let generator = SphericalLayoutGenerator::new(50, 3.0).unwrap();
    for seed in [None, Some(1), Some(42), Some(9_001)] {
        let layout = generator.generate(&content(18), seed);
        assert_eq!(layout.len(), 50);
        assert!(layout.is_complete());

        let indices: BTreeSet<usize> = layout.points().iter().map(|p| p.index).collect();
        assert_eq!(indices.len(), 50);
        assert_eq!(indices.iter().copied().max(), Some(49));

        for p in layout.points() {
            let r = p.position.length();
            assert!((r - 3.0).abs() < 1e-6, "point {} at radius {r}", p.index);
            assert!(p.source_content_id < 18);
        }

        let used: BTreeSet<ContentId> =
            layout.points().iter().map(|p| p.source_content_id).collect();
        assert_eq!(used.len(), 18, "seed {seed:?} left content unused");
    }
}

#[test]
fn equal_counts_form_a_bijection() {
    let generator = SphericalLayoutGenerator::new(18, 2.0).unwrap();

    let seeded = generator.generate(&content(18), Some(7));
    let ids: BTreeSet<ContentId> = seeded.points().iter().map(|p| p.source_content_id).collect();
    assert_eq!(ids.len(), 18);

    // Same seed reproduces the exact mapping
    let again = generator.generate(&content(18), Some(7));
    assert_eq!(seeded, again);

    // No seed: content keeps its order
    let ordered = generator.generate(&content(18), None);
    for p in ordered.points() {
        assert_eq!(p.source_content_id as usize, p.index);
    }
}

#[test]
fn seed_changes_assignment_but_never_geometry() {
    let generator = SphericalLayoutGenerator::new(50, 3.0).unwrap();
    let a = generator.generate(&content(18), Some(1));
    let b = generator.generate(&content(18), Some(2));
    for (pa, pb) in a.points().iter().zip(b.points()) {
        assert_eq!(pa.index, pb.index);
        assert_eq!(pa.position, pb.position);
        assert_eq!(pa.position, generator.slot_position(pa.index));
    }
    let ids_a: Vec<_> = a.points().iter().map(|p| p.source_content_id).collect();
    let ids_b: Vec<_> = b.points().iter().map(|p| p.source_content_id).collect();
    assert_ne!(ids_a, ids_b);
}

#[test]
fn consecutive_slots_are_well_separated() {
    let generator = SphericalLayoutGenerator::new(50, 1.0).unwrap();
    let slots: Vec<DVec3> = generator.slots().collect();
    for pair in slots.windows(2) {
        let angle = pair[0].angle_between(pair[1]);
        assert!(angle > 0.4, "consecutive slots only {angle} rad apart");
    }
}

#[test]
fn elements_face_the_centre() {
    let generator = SphericalLayoutGenerator::new(30, 4.0).unwrap();

    let plain = generator.generate(&content(5), None);
    for p in plain.points() {
        let facing = p.rotation * DVec3::Z;
        let inward = -p.position.normalize();
        assert!(facing.distance(inward) < 1e-9);
    }

    let jittered = generator.generate(&content(5), Some(3));
    for p in jittered.points() {
        let facing = p.rotation * DVec3::Z;
        let inward = -p.position.normalize();
        // two axes each tilted by at most 0.15 rad
        assert!(facing.angle_between(inward) <= 0.25);
    }
}

#[test]
fn zero_jitter_keeps_exact_facing_even_when_seeded() {
    let generator = SphericalLayoutGenerator::new(12, 1.0)
        .unwrap()
        .with_jitter(0.0)
        .unwrap();
    let layout = generator.generate(&content(4), Some(11));
    for p in layout.points() {
        let facing = p.rotation * DVec3::Z;
        assert!(facing.distance(-p.position.normalize()) < 1e-9);
    }
}

#[test]
fn more_content_than_slots_uses_a_subset() {
    let generator = SphericalLayoutGenerator::new(10, 1.0).unwrap();
    let layout = generator.generate(&content(25), Some(5));
    assert_eq!(layout.len(), 10);
    let ids: BTreeSet<_> = layout.points().iter().map(|p| p.source_content_id).collect();
    assert_eq!(ids.len(), 10, "no padding needed, so no repeats");
    assert!(ids.iter().all(|id| *id < 25));
}

#[test]
fn missing_content_degrades_instead_of_failing() {
    let generator = SphericalLayoutGenerator::new(50, 3.0).unwrap();
    let empty = generator.generate(&[], Some(1));
    assert!(empty.is_empty());
    assert_eq!(empty.target_count(), 50);
    assert!(!empty.is_complete());

    let full = generator.generate(&content(18), Some(1));
    let survivors: Vec<ContentId> = (0..18).filter(|id| id % 3 != 0).collect();
    let partial = full.retain_content(&survivors);
    assert!(partial.len() < 50);
    for p in partial.points() {
        assert!(survivors.contains(&p.source_content_id));
        assert_eq!(Some(p), full.get(p.index));
    }
}

#[test]
fn invalid_generators_are_rejected() {
    assert_eq!(
        SphericalLayoutGenerator::new(0, 1.0).unwrap_err(),
        ConfigError::EmptyLayout
    );
    assert!(SphericalLayoutGenerator::new(10, 0.0).is_err());
    assert!(SphericalLayoutGenerator::new(10, -2.0).is_err());
    assert!(SphericalLayoutGenerator::new(10, 1.0)
        .unwrap()
        .with_jitter(-0.1)
        .is_err());
}

#[test]
fn face_origin_handles_the_poles() {
    for pos in [DVec3::Y * 2.0, -DVec3::Y * 2.0, DVec3::new(0.0, 0.0, 5.0)] {
        let facing = face_origin(pos) * DVec3::Z;
        assert!(facing.distance(-pos.normalize()) < 1e-9, "pole {pos:?}");
    }
}
