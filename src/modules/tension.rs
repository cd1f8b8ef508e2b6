//! Tension spring and release system.
//!
//! One spring body stretches and compresses with the tension value,
//! vibrating laterally at two incommensurate frequencies once tension
//! crosses 0.5. A fixed pool of 500 release particles erupts while the
//! release flag is up: idle particles are born near the origin with an
//! outward velocity, then fall under gravity with horizontal damping until
//! they drop below the floor and return to the idle pool. The only module
//! with true Newtonian particle dynamics.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::snapshot::RhythmSnapshot;
use crate::visual::{Body, PointCloud, TensionVisual, Transform};

const PARTICLE_COUNT: usize = 500;
/// Fixed integration step, seconds. Matches a 60 Hz frame.
const DT_FIXED: f32 = 0.016;
/// Horizontal velocity damping per tick.
const DAMPING: f32 = 0.98;
/// Downward velocity decrement per tick.
const GRAVITY: f32 = 0.02;
/// Particles below this height reset to the idle pool.
const FLOOR: f32 = -5.0;
/// Per-tick birth probability is release intensity times this.
const BIRTH_RATE: f32 = 0.1;

#[derive(Debug, Clone, Copy, Default)]
struct ReleaseParticle {
    position: Vec3,
    velocity: Vec3,
    alive: bool,
}

/// Spring plus release-particle pool.
#[derive(Debug)]
pub struct TensionSystem {
    particles: Box<[ReleaseParticle]>,
    rng: SmallRng,
    elapsed: f32,
}

impl TensionSystem {
    pub fn new() -> Self {
        Self {
            particles: vec![ReleaseParticle::default(); PARTICLE_COUNT].into_boxed_slice(),
            rng: SmallRng::seed_from_u64(super::activation_seed(0xB2)),
            elapsed: 0.0,
        }
    }

    /// Advance the spring pose and the particle pool by one tick.
    pub fn advance(&mut self, snapshot: &RhythmSnapshot, dt: f32) -> TensionVisual {
        self.elapsed += dt;
        let time = self.elapsed;
        let tension = snapshot.value(0);
        let release = snapshot.value(1);
        let releasing = snapshot.meta.tension().release_active;

        for particle in self.particles.iter_mut() {
            if releasing && !particle.alive && self.rng.gen::<f32>() < release * BIRTH_RATE {
                particle.position = Vec3::new(
                    (self.rng.gen::<f32>() - 0.5) * 0.5,
                    0.0,
                    (self.rng.gen::<f32>() - 0.5) * 0.5,
                );
                let angle = self.rng.gen::<f32>() * TAU;
                let speed = release * (0.5 + self.rng.gen::<f32>() * 0.5);
                particle.velocity = Vec3::new(
                    angle.cos() * speed,
                    self.rng.gen::<f32>() * speed * 2.0,
                    angle.sin() * speed,
                );
                particle.alive = true;
            }

            particle.position += particle.velocity * DT_FIXED;
            particle.velocity.x *= DAMPING;
            particle.velocity.z *= DAMPING;
            particle.velocity.y -= GRAVITY;

            if particle.position.y < FLOOR {
                *particle = ReleaseParticle::default();
            }
        }

        let lateral = if tension > 0.5 {
            Vec3::new(
                (time * 20.0).sin() * tension * 0.05,
                0.0,
                (time * 25.0).cos() * tension * 0.05,
            )
        } else {
            Vec3::ZERO
        };

        TensionVisual {
            spring: Body {
                transform: Transform {
                    position: lateral,
                    rotation: Vec3::ZERO,
                    scale: Vec3::new(
                        1.0 - tension * 0.3,
                        1.0 + tension * 2.0,
                        1.0 - tension * 0.3,
                    ),
                },
                color: Vec3::new(0.2 + tension * 0.8, 0.8 - tension * 0.6, 0.2),
                emissive: Vec3::ZERO,
                emissive_intensity: 0.0,
                visible: true,
            },
            particles: PointCloud {
                positions: self.particles.iter().map(|p| p.position).collect(),
                color: Vec3::new(0.565, 0.804, 0.957),
                size: if releasing { 0.05 } else { 0.025 },
                opacity: if releasing { 0.8 } else { 0.4 },
            },
        }
    }

    /// Particles currently in flight.
    pub fn live_count(&self) -> usize {
        self.particles.iter().filter(|p| p.alive).count()
    }

    #[cfg(test)]
    fn particles(&self) -> &[ReleaseParticle] {
        &self.particles
    }
}

impl Default for TensionSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{RhythmMode, SnapshotMeta, TensionMeta};

    fn snapshot(tension: f32, release: f32, active: bool) -> RhythmSnapshot {
        RhythmSnapshot {
            mode: RhythmMode::Tension,
            timestamp: 0.0,
            values: vec![tension, release],
            meta: SnapshotMeta::Tension(TensionMeta {
                release_active: active,
            }),
        }
    }

    #[test]
    fn test_no_births_while_inactive() {
        let mut system = TensionSystem::new();
        for _ in 0..50 {
            system.advance(&snapshot(0.3, 1.0, false), 0.016);
        }
        assert_eq!(system.live_count(), 0);
    }

    #[test]
    fn test_birth_rate_statistical_bound() {
        // With release=1 each idle particle births with probability 0.1 per
        // tick, so one tick over 500 idle particles should yield roughly 50
        // births. Allow a generous band around the binomial mean.
        let mut system = TensionSystem::new();
        system.advance(&snapshot(0.0, 1.0, true), 0.016);
        let live = system.live_count();
        assert!(live > 20 && live < 100, "unexpected birth count {live}");
    }

    #[test]
    fn test_spring_pose() {
        let mut system = TensionSystem::new();
        let visual = system.advance(&snapshot(1.0, 0.0, false), 0.016);
        let scale = visual.spring.transform.scale;
        assert!((scale.y - 3.0).abs() < 1e-6);
        assert!((scale.x - 0.7).abs() < 1e-6);
        // Above the 0.5 threshold the spring vibrates off-center.
        assert!(visual.spring.transform.position.length() > 0.0);

        let relaxed = system.advance(&snapshot(0.2, 0.0, false), 0.016);
        assert_eq!(relaxed.spring.transform.position, Vec3::ZERO);
    }

    #[test]
    fn test_floor_reset_returns_to_idle_pool() {
        let mut system = TensionSystem::new();
        system.advance(&snapshot(0.0, 1.0, true), 0.016);
        assert!(system.live_count() > 0);
        // Gravity pulls every particle below the floor within a fall cycle;
        // the reset empties the live pool and zeroes lateral motion.
        for _ in 0..2000 {
            system.advance(&snapshot(0.0, 0.0, false), 0.016);
        }
        assert_eq!(system.live_count(), 0);
        for p in system.particles() {
            assert_eq!(p.position.x, 0.0);
            assert_eq!(p.position.z, 0.0);
        }
    }

    #[test]
    fn test_no_particle_rests_below_floor() {
        let mut system = TensionSystem::new();
        for _ in 0..600 {
            system.advance(&snapshot(0.0, 1.0, true), 0.016);
            for p in system.particles() {
                assert!(p.position.y >= FLOOR);
                assert!(p.position.is_finite());
            }
        }
    }

    #[test]
    fn test_release_doubles_opacity_and_size() {
        let mut system = TensionSystem::new();
        let idle = system.advance(&snapshot(0.0, 0.0, false), 0.016);
        let bursting = system.advance(&snapshot(0.0, 1.0, true), 0.016);
        assert!((bursting.particles.opacity - 2.0 * idle.particles.opacity).abs() < 1e-6);
        assert!((bursting.particles.size - 2.0 * idle.particles.size).abs() < 1e-6);
    }
}
