//! # Pulsefield
//!
//! Procedural simulation core for rhythm-driven visuals: five alternative
//! real-time visual metaphors for an externally computed "inner rhythm"
//! signal. Each display frame, a [`RhythmSnapshot`] of scalar values and
//! typed metadata arrives from a [`SnapshotSource`]; the active simulation
//! module turns it into evolving particle systems, vector fields and
//! deforming geometry, emitted as a [`VisualState`] for a renderer to draw.
//!
//! Rendering itself (materials, cameras, lighting), the rhythm model and
//! window plumbing all live outside this crate.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pulsefield::prelude::*;
//!
//! let mut scheduler = FrameScheduler::new(my_source, RhythmMode::Vortex);
//! let handle = scheduler.handle();
//!
//! scheduler.run(|visual| {
//!     if let VisualState::Vortex(v) = visual {
//!         renderer.draw_body(&v.tracer);
//!         renderer.draw_points(v.trail.position_bytes());
//!     }
//! });
//! ```
//!
//! ## The five modes
//!
//! | Mode | Metaphor | State |
//! |------|----------|-------|
//! | [`RhythmMode::Oscillator`] | coupled oscillators on rings | none (pure mapping) |
//! | [`RhythmMode::Avalanche`] | attraction field near criticality | 1000 particles |
//! | [`RhythmMode::Tension`] | spring charging and erupting | 500 particles w/ physics |
//! | [`RhythmMode::Vortex`] | flow lattice around a tracked point | 400 cells + 100-slot trail |
//! | [`RhythmMode::Attention`] | search-and-focus cursor | fixed 100-point ambient cloud |
//!
//! Exactly one module is active at a time. Switching modes discards the
//! retiring module's state and constructs a fresh one. Nothing persists
//! across sessions or selections.
//!
//! ## Ticks and failure
//!
//! A tick is: clamp `dt`, advance the source's rhythm, fetch a snapshot,
//! advance the module. Snapshot failures skip the tick (the previous frame
//! stays on screen) and are logged via `tracing`; malformed snapshots
//! decode to documented defaults at the boundary. No error here is fatal:
//! the worst observable symptom is a frozen or default-valued frame.

pub mod error;
pub mod modules;
pub mod scheduler;
pub mod snapshot;
pub mod time;
pub mod trail;
pub mod visual;

pub use error::SourceError;
pub use glam::Vec3;
pub use modules::{
    AttentionController, AvalancheField, Module, OscillatorField, TensionSystem, VortexField,
};
pub use scheduler::{FrameScheduler, SchedulerHandle, SnapshotSource};
pub use snapshot::{
    AttentionMeta, AvalancheMeta, OscillatorMeta, RhythmMode, RhythmSnapshot, SnapshotMeta,
    TensionMeta, VortexMeta,
};
pub use time::Clock;
pub use trail::TrailBuffer;
pub use visual::{
    AttentionVisual, AvalancheVisual, Body, Edge, FieldCell, OscillatorVisual, PointCloud,
    TensionVisual, Transform, VisualState, VortexVisual,
};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use pulsefield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::SourceError;
    pub use crate::modules::Module;
    pub use crate::scheduler::{FrameScheduler, SchedulerHandle, SnapshotSource};
    pub use crate::snapshot::{RhythmMode, RhythmSnapshot, SnapshotMeta};
    pub use crate::time::Clock;
    pub use crate::trail::TrailBuffer;
    pub use crate::visual::{Body, PointCloud, Transform, VisualState};
    pub use crate::Vec3;
}
