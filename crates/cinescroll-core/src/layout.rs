//! Golden-angle (Fibonacci) sphere layout for decorative elements.
//!
//! Slot geometry depends only on the slot count and radius. Which content
//! lands in which slot, and the small per-element tilt, come from a seeded
//! RNG, so two layouts with different seeds share every slot position.

use crate::constants::{GOLDEN_ANGLE, SPHERE_JITTER};
use crate::error::{ensure_non_negative, ensure_positive, ConfigError, ConfigResult};
use glam::{DMat3, DQuat, DVec3, EulerRot};
use rand::prelude::*;

pub type ContentId = u32;

/// One placed element.
///
/// `rotation` turns the element's local +Z toward the sphere centre, plus jitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutPoint {
    pub index: usize,
    pub position: DVec3,
    pub source_content_id: ContentId,
    pub rotation: DQuat,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SphereLayout {
    points: Vec<LayoutPoint>,
    target_count: usize,
}

impl SphereLayout {
    #[inline]
    pub fn points(&self) -> &[LayoutPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.points.len() == self.target_count
    }

    pub fn get(&self, index: usize) -> Option<&LayoutPoint> {
        self.points.iter().find(|p| p.index == index)
    }

    /// New layout keeping only the points whose content is in `available`.
    ///
    /// Slots keep their index and position; dropped slots are simply absent.
    pub fn retain_content(&self, available: &[ContentId]) -> SphereLayout {
        SphereLayout {
            points: self
                .points
                .iter()
                .filter(|p| available.contains(&p.source_content_id))
                .copied()
                .collect(),
            target_count: self.target_count,
        }
    }
}

/// Places `target_count` elements on a sphere of `radius`.
#[derive(Clone, Debug, PartialEq)]
pub struct SphericalLayoutGenerator {
    target_count: usize,
    radius: f64,
    jitter: f64,
}

impl SphericalLayoutGenerator {
    pub fn new(target_count: usize, radius: f64) -> ConfigResult<Self> {
        if target_count == 0 {
            return Err(ConfigError::EmptyLayout);
        }
        ensure_positive("layout radius", radius)?;
        Ok(Self {
            target_count,
            radius,
            jitter: SPHERE_JITTER,
        })
    }

    pub fn with_jitter(mut self, jitter: f64) -> ConfigResult<Self> {
        self.jitter = ensure_non_negative("layout jitter", jitter)?;
        Ok(self)
    }

    #[inline]
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn slot_position(&self, index: usize) -> DVec3 {
        let h = (index as f64 + 0.5) / self.target_count as f64;
        let phi = (1.0 - 2.0 * h).acos();
        let theta = GOLDEN_ANGLE * index as f64;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        DVec3::new(
            self.radius * sin_phi * cos_theta,
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
        )
    }

    pub fn slots(&self) -> impl Iterator<Item = DVec3> + '_ {
        (0..self.target_count).map(|i| self.slot_position(i))
    }

    /// Lay out `content` over every slot.
    ///
    /// With a seed, missing slots are filled by sampling `content` with
    /// replacement, the list is shuffled once and each element gets a random
    /// tilt. Without a seed, content repeats round-robin in the given order and
    /// no tilt is applied. Empty `content` yields an empty layout.
    pub fn generate(&self, content: &[ContentId], seed: Option<u64>) -> SphereLayout {
        if content.is_empty() {
            log::warn!("[layout] no content available; {} slots left empty", self.target_count);
            return SphereLayout {
                points: Vec::new(),
                target_count: self.target_count,
            };
        }
        let mut rng = seed.map(StdRng::seed_from_u64);
        let assigned = self.assign_content(content, rng.as_mut());
        let points = assigned
            .into_iter()
            .enumerate()
            .map(|(index, source_content_id)| {
                let position = self.slot_position(index);
                let tilt = match rng.as_mut() {
                    Some(r) => DQuat::from_euler(
                        EulerRot::XYZ,
                        r.gen_range(-self.jitter..=self.jitter),
                        r.gen_range(-self.jitter..=self.jitter),
                        0.0,
                    ),
                    None => DQuat::IDENTITY,
                };
                LayoutPoint {
                    index,
                    position,
                    source_content_id,
                    rotation: face_origin(position) * tilt,
                }
            })
            .collect::<Vec<_>>();
        log::debug!(
            "[layout] placed {} elements from {} content items (seeded={})",
            points.len(),
            content.len(),
            seed.is_some()
        );
        SphereLayout {
            points,
            target_count: self.target_count,
        }
    }

    fn assign_content(&self, content: &[ContentId], rng: Option<&mut StdRng>) -> Vec<ContentId> {
        let mut assigned = content.to_vec();
        match rng {
            Some(rng) => {
                while assigned.len() < self.target_count {
                    if let Some(&id) = content.choose(rng) {
                        assigned.push(id);
                    }
                }
                assigned.shuffle(rng);
            }
            None => {
                let mut next = 0usize;
                while assigned.len() < self.target_count {
                    assigned.push(content[next % content.len()]);
                    next += 1;
                }
            }
        }
        assigned.truncate(self.target_count);
        assigned
    }
}

/// Rotation whose local +Z axis points from `position` to the origin.
pub fn face_origin(position: DVec3) -> DQuat {
    let forward = (-position).normalize_or_zero();
    if forward == DVec3::ZERO {
        return DQuat::IDENTITY;
    }
    let mut up = DVec3::Y;
    if up.cross(forward).length_squared() < 1e-12 {
        up = DVec3::Z;
    }
    let right = up.cross(forward).normalize();
    let true_up = forward.cross(right);
    DQuat::from_mat3(&DMat3::from_cols(right, true_up, forward))
}
