use glam::{DVec3, Vec3};
use rand::prelude::*;

/// Static point cloud. Trail copies of a field share these positions and
/// only differ by the per-frame trail offset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub colors: Vec<[f32; 3]>,
}

impl ParticleField {
    /// Scatter `count` points uniformly in a box of size `extent` centred on
    /// the origin, each coloured from `palette` (white when empty).
    pub fn scatter(count: usize, extent: DVec3, palette: &[[f32; 3]], seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        for _ in 0..count {
            let unit = DVec3::new(
                rng.gen::<f64>() - 0.5,
                rng.gen::<f64>() - 0.5,
                rng.gen::<f64>() - 0.5,
            );
            positions.push((unit * extent).as_vec3());
            colors.push(*palette.choose(&mut rng).unwrap_or(&[1.0, 1.0, 1.0]));
        }
        Self { positions, colors }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
