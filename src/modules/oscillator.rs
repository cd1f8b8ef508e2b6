//! Coupled oscillator field.
//!
//! Three oscillator bodies orbit a static anchor, each placed by its phase
//! angle and lifted by its displacement. With a coupling strength present in
//! the metadata, every ordered pair of oscillators is joined by an edge
//! whose opacity encodes the coupling. The only module that is a pure
//! function of the latest snapshot plus elapsed time, with no particle state
//! surviving between ticks.

use glam::Vec3;

use crate::snapshot::RhythmSnapshot;
use crate::visual::{Body, Edge, OscillatorVisual, Transform};

const OSCILLATOR_COUNT: usize = 3;

/// Stateless-across-ticks oscillator field (elapsed time only).
#[derive(Debug, Default)]
pub struct OscillatorField {
    elapsed: f32,
}

impl OscillatorField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map the snapshot onto the three bodies, the anchor and the edges.
    pub fn advance(&mut self, snapshot: &RhythmSnapshot, dt: f32) -> OscillatorVisual {
        self.elapsed += dt;
        let time = self.elapsed;
        let meta = snapshot.meta.oscillator();

        let positions: [Vec3; OSCILLATOR_COUNT] = std::array::from_fn(|i| {
            let value = snapshot.value(i);
            let phase = meta.phases.get(i).copied().unwrap_or(0.0);
            let ring = (i + 1) as f32;
            Vec3::new(phase.cos() * ring, value * 2.0, phase.sin() * ring)
        });

        let oscillators: [Body; OSCILLATOR_COUNT] = std::array::from_fn(|i| {
            let value = snapshot.value(i);
            let phase = meta.phases.get(i).copied().unwrap_or(0.0);
            Body {
                transform: Transform {
                    position: positions[i],
                    rotation: Vec3::new(phase, time * 0.5 + i as f32, 0.0),
                    scale: Vec3::splat(0.3 + value.abs() * 0.5),
                },
                color: Vec3::new(0.4, 0.4, 0.9),
                emissive: Vec3::new(
                    0.5 + value * 0.5,
                    0.3 + value.abs() * 0.3,
                    0.8 - value.abs() * 0.3,
                ),
                emissive_intensity: 0.5,
                visible: true,
            }
        });

        let edges = match meta.coupling_strength {
            Some(coupling) => {
                let mut edges = Vec::with_capacity(OSCILLATOR_COUNT * (OSCILLATOR_COUNT - 1));
                for i in 0..OSCILLATOR_COUNT {
                    for j in 0..OSCILLATOR_COUNT {
                        if i != j {
                            edges.push(Edge {
                                from: positions[i],
                                to: positions[j],
                                opacity: coupling,
                            });
                        }
                    }
                }
                edges
            }
            None => Vec::new(),
        };

        OscillatorVisual {
            oscillators,
            anchor: Body {
                transform: Transform::at(Vec3::ZERO, 0.5),
                color: Vec3::splat(0.27),
                emissive: Vec3::splat(0.13),
                emissive_intensity: 1.0,
                visible: true,
            },
            edges,
        }
    }
}
