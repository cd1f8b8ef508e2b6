//! Frame scheduler: the cooperative per-tick loop.
//!
//! The scheduler owns the snapshot source, the active [`Module`] and the
//! [`Clock`]. One tick is: update the clock, ask the source to advance its
//! rhythm by `dt`, fetch the resulting snapshot, and advance the module.
//! Source failures are logged and skip the tick; the previous visual state
//! stays on screen and scheduling continues.
//!
//! Hosts with their own frame callback drive [`FrameScheduler::tick`]
//! directly; [`FrameScheduler::run`] provides a paced loop for everything
//! else. Cancellation and mode switches go through the cloneable
//! [`SchedulerHandle`] and take effect at the end of the in-flight tick,
//! never mid-mutation.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::SourceError;
use crate::modules::Module;
use crate::snapshot::{RhythmMode, RhythmSnapshot};
use crate::time::Clock;
use crate::visual::VisualState;

/// External producer of rhythm snapshots.
///
/// Two logical calls per tick: [`advance_state`](Self::advance_state)
/// progresses the source's internal rhythm by `dt` seconds, then
/// [`fetch_snapshot`](Self::fetch_snapshot) reads the resulting state. Both
/// may fail; failures are never fatal to the scheduler.
pub trait SnapshotSource {
    /// Progress the rhythm model for `mode` by `dt` seconds.
    fn advance_state(&mut self, mode: RhythmMode, dt: f32) -> Result<(), SourceError>;

    /// Read the current snapshot for `mode`.
    fn fetch_snapshot(&mut self, mode: RhythmMode) -> Result<RhythmSnapshot, SourceError>;
}

/// Sentinel for "no pending mode request".
const MODE_NONE: u8 = u8::MAX;

fn encode(mode: RhythmMode) -> u8 {
    match mode {
        RhythmMode::Oscillator => 0,
        RhythmMode::Avalanche => 1,
        RhythmMode::Tension => 2,
        RhythmMode::Vortex => 3,
        RhythmMode::Attention => 4,
    }
}

fn decode(value: u8) -> Option<RhythmMode> {
    RhythmMode::ALL.get(value as usize).copied()
}

/// Cloneable control handle for a running scheduler.
///
/// Safe to use from within the scheduler's own frame callback: both
/// operations are deferred to the tick boundary.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    running: Arc<AtomicBool>,
    requested: Arc<AtomicU8>,
}

impl SchedulerHandle {
    fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            requested: Arc::new(AtomicU8::new(MODE_NONE)),
        }
    }

    /// Cancel the loop. Takes effect at the end of the in-flight tick.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether the loop is currently running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Request a mode switch before the next tick. The retiring module's
    /// state is discarded wholesale.
    pub fn request_mode(&self, mode: RhythmMode) {
        self.requested.store(encode(mode), Ordering::SeqCst);
    }

    fn take_requested(&self) -> Option<RhythmMode> {
        decode(self.requested.swap(MODE_NONE, Ordering::SeqCst))
    }
}

/// The per-mode simulation loop.
pub struct FrameScheduler<S: SnapshotSource> {
    source: S,
    module: Module,
    clock: Clock,
    last_visual: Option<VisualState>,
    handle: SchedulerHandle,
    interval: Duration,
}

impl<S: SnapshotSource> FrameScheduler<S> {
    /// Create a scheduler for `mode`, paced at 60 Hz by default.
    pub fn new(source: S, mode: RhythmMode) -> Self {
        Self {
            source,
            module: Module::new(mode),
            clock: Clock::new(),
            last_visual: None,
            handle: SchedulerHandle::new(),
            interval: Duration::from_secs_f64(1.0 / 60.0),
        }
    }

    /// Set the paced-loop refresh rate for [`run`](Self::run).
    pub fn with_refresh_hz(mut self, hz: f32) -> Self {
        if hz > 0.0 {
            self.interval = Duration::from_secs_f64(1.0 / hz as f64);
        }
        self
    }

    /// Use a fixed delta per tick, for deterministic hosts and tests.
    pub fn with_fixed_delta(mut self, delta: f32) -> Self {
        self.clock.set_fixed_delta(Some(delta));
        self
    }

    /// Control handle; clone it out before calling [`run`](Self::run).
    pub fn handle(&self) -> SchedulerHandle {
        self.handle.clone()
    }

    /// The active mode.
    pub fn mode(&self) -> RhythmMode {
        self.module.mode()
    }

    /// Most recent visual state, if any tick has succeeded yet.
    pub fn visual(&self) -> Option<&VisualState> {
        self.last_visual.as_ref()
    }

    /// Switch modes immediately: discard the active module's state,
    /// construct a fresh one, drop the retained visual.
    pub fn set_mode(&mut self, mode: RhythmMode) {
        if mode != self.module.mode() {
            debug!(from = %self.module.mode(), to = %mode, "switching simulation mode");
            self.module = Module::new(mode);
            self.last_visual = None;
        }
    }

    /// Execute one tick.
    ///
    /// On source failure the tick is skipped: the error is logged and the
    /// previous visual state (if any) is returned unchanged. A failed tick
    /// never halts subsequent scheduling.
    pub fn tick(&mut self) -> Option<&VisualState> {
        let (_, dt) = self.clock.update();
        let mode = self.module.mode();

        match self.request_snapshot(mode, dt) {
            Ok(snapshot) => {
                let visual = self.module.advance(&snapshot, dt);
                self.last_visual = Some(visual);
            }
            Err(e) => {
                warn!(mode = %mode, error = %e, "snapshot request failed, tick skipped");
            }
        }
        self.last_visual.as_ref()
    }

    fn request_snapshot(&mut self, mode: RhythmMode, dt: f32) -> Result<RhythmSnapshot, SourceError> {
        self.source.advance_state(mode, dt)?;
        self.source.fetch_snapshot(mode)
    }

    /// Run the paced loop until the handle stops it.
    ///
    /// `on_frame` observes each successfully produced visual state. Mode
    /// switch requests are applied between ticks; `stop()` called from
    /// within `on_frame` takes effect before the next tick starts.
    pub fn run<F: FnMut(&VisualState)>(&mut self, mut on_frame: F) {
        self.handle.running.store(true, Ordering::SeqCst);
        let mut next_deadline = Instant::now();

        while self.handle.is_running() {
            if let Some(mode) = self.handle.take_requested() {
                self.set_mode(mode);
            }
            if let Some(visual) = self.tick() {
                on_frame(visual);
            }
            if !self.handle.is_running() {
                break;
            }
            next_deadline += self.interval;
            let now = Instant::now();
            if next_deadline > now {
                std::thread::sleep(next_deadline - now);
            } else {
                // Fell behind; re-anchor instead of racing to catch up.
                next_deadline = now;
            }
        }
    }

    /// Recover the snapshot source.
    pub fn into_source(self) -> S {
        self.source
    }
}
