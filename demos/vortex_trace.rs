//! # Vortex Trace
//!
//! Sends the tracked point of the vortex module around a slow Lissajous
//! orbit and prints the trail cursor plus the strongest field cell each
//! second, showing the lattice re-aiming around the moving point.
//!
//! ## What This Demonstrates
//!
//! - A time-parametric `SnapshotSource`
//! - Trail ring semantics observable through `VortexVisual`
//! - Per-cell strength falloff around the tracer
//!
//! Run with: `cargo run --example vortex_trace`

use pulsefield::prelude::*;
use pulsefield::VortexMeta;

/// Lissajous orbit in the XZ plane with a pulsing flow magnitude.
struct Orbit {
    t: f32,
}

impl SnapshotSource for Orbit {
    fn advance_state(&mut self, _mode: RhythmMode, dt: f32) -> Result<(), SourceError> {
        self.t += dt;
        Ok(())
    }

    fn fetch_snapshot(&mut self, mode: RhythmMode) -> Result<RhythmSnapshot, SourceError> {
        let t = self.t;
        Ok(RhythmSnapshot {
            mode,
            timestamp: t as f64,
            values: vec![
                (t * 0.7).sin() * 0.8,
                0.0,
                (t * 0.9).cos() * 0.8,
                1.0 + (t * 1.3).sin() * 0.5,
            ],
            meta: SnapshotMeta::Vortex(VortexMeta {
                velocity: [(t * 0.7).cos(), 0.0, -(t * 0.9).sin()],
            }),
        })
    }
}

fn main() {
    let mut scheduler = FrameScheduler::new(Orbit { t: 0.0 }, RhythmMode::Vortex);
    let handle = scheduler.handle();

    let mut frame = 0u32;
    scheduler.run(|visual| {
        frame += 1;
        if let VisualState::Vortex(v) = visual {
            if frame % 60 == 0 {
                let strongest = v
                    .cells
                    .iter()
                    .map(|c| c.scale.y)
                    .fold(f32::MIN, f32::max);
                println!(
                    "frame {:4}  tracer {:+.2} {:+.2}  strongest cell {:.3}",
                    frame, v.tracer.transform.position.x, v.tracer.transform.position.z, strongest
                );
            }
        }
        if frame == 300 {
            handle.stop();
        }
    });
}
