//! Attraction/avalanche particle field.
//!
//! A cloud of 1000 position-only particles contracts toward a central body
//! with strength proportional to the integration value φ. During an
//! avalanche the contraction is overlaid with per-axis jitter and the core
//! doubles its emissive output. Particles that drift inside the inner shell
//! or past the outer shell respawn uniformly in the spawn cube, the only
//! source of new positions, which keeps the cloud from collapsing onto the
//! origin or escaping.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::snapshot::RhythmSnapshot;
use crate::visual::{AvalancheVisual, Body, PointCloud, Transform};

const PARTICLE_COUNT: usize = 1000;
/// Half-size of the spawn cube.
const SPAWN_HALF: f32 = 2.0;
/// Respawn once a particle leaves this radial band.
const MIN_RADIUS: f32 = 0.5;
const MAX_RADIUS: f32 = 3.0;
/// Attraction constant; φ scales it.
const ATTRACTION: f32 = 0.01;
/// Additive epsilon keeping the force finite near the origin.
const EPSILON: f32 = 0.1;
/// Per-axis jitter amplitude during an avalanche.
const JITTER: f32 = 0.1;

/// Attraction field state: a fixed particle arena plus its RNG.
#[derive(Debug)]
pub struct AvalancheField {
    positions: Box<[Vec3]>,
    rng: SmallRng,
    elapsed: f32,
}

impl AvalancheField {
    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(super::activation_seed(0xA1));
        let positions = (0..PARTICLE_COUNT)
            .map(|_| random_in_cube(&mut rng, SPAWN_HALF))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            positions,
            rng,
            elapsed: 0.0,
        }
    }

    /// Contract the cloud toward the center and respawn escapees.
    pub fn advance(&mut self, snapshot: &RhythmSnapshot, dt: f32) -> AvalancheVisual {
        self.elapsed += dt;
        let time = self.elapsed;
        let phi = snapshot.value(0);
        let meta = snapshot.meta.avalanche();

        for p in self.positions.iter_mut() {
            let distance = p.length();
            let force = phi * ATTRACTION / (distance + EPSILON);
            *p -= *p * force;

            if meta.avalanche_active {
                *p += Vec3::new(
                    (self.rng.gen::<f32>() - 0.5) * JITTER,
                    (self.rng.gen::<f32>() - 0.5) * JITTER,
                    (self.rng.gen::<f32>() - 0.5) * JITTER,
                );
            }

            let distance = p.length();
            if distance < MIN_RADIUS || distance > MAX_RADIUS {
                *p = random_in_cube(&mut self.rng, SPAWN_HALF);
            }
        }

        let (emissive, intensity) = if meta.avalanche_active {
            (Vec3::new(1.0, 0.2, 0.2), phi)
        } else {
            (Vec3::new(0.8, 0.3, 0.3), phi * 0.5)
        };

        let criticality = meta.criticality.clamp(0.0, 1.0);
        let tint = Vec3::new(1.0, 0.45, 0.45).lerp(Vec3::ONE, criticality);

        AvalancheVisual {
            core: Body {
                transform: Transform {
                    position: Vec3::ZERO,
                    rotation: Vec3::new(time * 0.2, time * 0.3, 0.0),
                    scale: Vec3::splat(0.5 + phi * 1.5),
                },
                color: Vec3::new(1.0, 0.42, 0.42),
                emissive,
                emissive_intensity: intensity,
                visible: true,
            },
            particles: PointCloud {
                positions: self.positions.to_vec(),
                color: tint,
                size: 0.02,
                opacity: 0.6,
            },
        }
    }

    #[cfg(test)]
    fn positions(&self) -> &[Vec3] {
        &self.positions
    }
}

impl Default for AvalancheField {
    fn default() -> Self {
        Self::new()
    }
}

fn random_in_cube(rng: &mut SmallRng, half_size: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-half_size..half_size),
        rng.gen_range(-half_size..half_size),
        rng.gen_range(-half_size..half_size),
    )
}
