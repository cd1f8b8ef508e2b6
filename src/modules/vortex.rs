//! Vortex flow field with trail.
//!
//! A tracked point moves through a fixed 20x20 lattice of oriented cells.
//! Every tick each cell is re-aimed tangentially around the point's planar
//! projection with inverse-distance strength falloff, producing a rotating
//! vortex appearance; the point's own spin integrates the flow velocity,
//! and a 100-slot [`TrailBuffer`] records its path. The full lattice is
//! recomputed every tick; the densest per-tick arithmetic in the crate and
//! the subject of the `advance` benchmark.

use glam::Vec3;
use std::f32::consts::PI;

use crate::snapshot::RhythmSnapshot;
use crate::trail::TrailBuffer;
use crate::visual::{Body, FieldCell, PointCloud, Transform, VortexVisual};

/// Cells per lattice side.
const GRID_SIDE: usize = 20;
/// World-space spacing between neighboring cells.
const GRID_SPACING: f32 = 0.3;
/// Trail capacity in positions.
const TRAIL_LENGTH: usize = 100;

/// Vortex field state: lattice bases, recomputed cells, trail, spin.
#[derive(Debug)]
pub struct VortexField {
    /// Immutable cell base positions, row-major.
    bases: Box<[Vec3]>,
    /// Per-tick cell output, written in place.
    cells: Box<[FieldCell]>,
    trail: TrailBuffer,
    /// Accumulated tracer rotation, integrated from flow velocity.
    rotation: Vec3,
    elapsed: f32,
}

impl VortexField {
    pub fn new() -> Self {
        let half = (GRID_SIDE / 2) as f32;
        let mut bases = Vec::with_capacity(GRID_SIDE * GRID_SIDE);
        for x in 0..GRID_SIDE {
            for z in 0..GRID_SIDE {
                bases.push(Vec3::new(
                    (x as f32 - half) * GRID_SPACING,
                    0.0,
                    (z as f32 - half) * GRID_SPACING,
                ));
            }
        }
        Self {
            bases: bases.into_boxed_slice(),
            cells: vec![FieldCell::default(); GRID_SIDE * GRID_SIDE].into_boxed_slice(),
            trail: TrailBuffer::new(TRAIL_LENGTH),
            rotation: Vec3::ZERO,
            elapsed: 0.0,
        }
    }

    /// Move the tracer, extend the trail, re-aim all 400 cells.
    pub fn advance(&mut self, snapshot: &RhythmSnapshot, dt: f32) -> VortexVisual {
        self.elapsed += dt;
        let position = Vec3::new(snapshot.value(0), snapshot.value(1), snapshot.value(2)) * 2.0;
        let flow = snapshot.value(3);
        let velocity = Vec3::from(snapshot.meta.vortex().velocity);

        // Continuous spin proportional to local flow velocity.
        self.rotation += velocity * dt;

        self.trail.push(position);

        for (cell, base) in self.cells.iter_mut().zip(self.bases.iter()) {
            let dx = base.x - position.x;
            let dz = base.z - position.z;
            let distance = (dx * dx + dz * dz).sqrt();
            // Tangential aim; the +1 denominator keeps strength finite at
            // the tracer itself.
            let angle = dz.atan2(dx) + PI / 2.0;
            let strength = flow / (distance + 1.0);
            *cell = FieldCell {
                position: *base,
                rotation: Vec3::new(0.0, angle, strength * PI / 4.0),
                scale: Vec3::new(0.1, 0.1 + strength * 0.2, 0.1),
            };
        }

        VortexVisual {
            tracer: Body {
                transform: Transform {
                    position,
                    rotation: self.rotation,
                    scale: Vec3::ONE,
                },
                color: Vec3::new(0.93, 0.54, 0.21),
                emissive: Vec3::new(0.93, 0.54, 0.21),
                emissive_intensity: flow,
                visible: true,
            },
            trail: PointCloud {
                positions: self.trail.as_slice().to_vec(),
                color: Vec3::new(0.984, 0.827, 0.553),
                size: 0.05,
                opacity: 0.6,
            },
            cells: self.cells.to_vec(),
        }
    }

    /// Trail write cursor, for hosts that want ring diagnostics.
    pub fn trail_cursor(&self) -> usize {
        self.trail.cursor()
    }
}

impl Default for VortexField {
    fn default() -> Self {
        Self::new()
    }
}
