//! # Tension Fountain
//!
//! Drives the tension module with a synthetic charge/release rhythm: tension
//! ramps up, snaps, and the release particles erupt. Frame summaries are
//! printed in place of a renderer.
//!
//! ## What This Demonstrates
//!
//! - Implementing `SnapshotSource` for a hand-rolled rhythm
//! - Running `FrameScheduler` with a stop handle
//! - Reading `TensionVisual` fields a renderer would consume
//!
//! Run with: `cargo run --example tension_fountain`

use pulsefield::prelude::*;
use pulsefield::TensionMeta;

/// Charge-and-snap rhythm: tension climbs, then releases over half a second.
struct ChargeRelease {
    tension: f32,
    release_timer: f32,
}

impl SnapshotSource for ChargeRelease {
    fn advance_state(&mut self, _mode: RhythmMode, dt: f32) -> Result<(), SourceError> {
        if self.release_timer > 0.0 {
            self.release_timer -= dt;
        } else {
            self.tension += dt * 0.4;
            if self.tension >= 1.0 {
                self.tension = 0.0;
                self.release_timer = 0.5;
            }
        }
        Ok(())
    }

    fn fetch_snapshot(&mut self, mode: RhythmMode) -> Result<RhythmSnapshot, SourceError> {
        let releasing = self.release_timer > 0.0;
        Ok(RhythmSnapshot {
            mode,
            timestamp: 0.0,
            values: vec![self.tension, if releasing { 0.9 } else { 0.0 }],
            meta: SnapshotMeta::Tension(TensionMeta {
                release_active: releasing,
            }),
        })
    }
}

fn main() {
    let source = ChargeRelease {
        tension: 0.0,
        release_timer: 0.0,
    };

    let mut scheduler = FrameScheduler::new(source, RhythmMode::Tension);
    let handle = scheduler.handle();

    let mut frame = 0u32;
    scheduler.run(|visual| {
        frame += 1;
        if let VisualState::Tension(v) = visual {
            if frame % 30 == 0 {
                println!(
                    "frame {:4}  spring height {:.2}  cloud opacity {:.1}",
                    frame, v.spring.transform.scale.y, v.particles.opacity
                );
            }
        }
        if frame == 600 {
            handle.stop();
        }
    });
}
