//! The five simulation modules, one per rhythm mode.
//!
//! Each module owns private persistent state (particle arenas, trail
//! buffers, accumulated rotation) and exposes a single operation: consume
//! one snapshot, advance by `dt` seconds, emit a
//! [`VisualState`](crate::visual::VisualState). Modules share no state and
//! are mutually exclusive at runtime; [`Module`] is the sum type a scheduler
//! owns, replaced wholesale on mode switch.

mod attention;
mod avalanche;
mod oscillator;
mod tension;
mod vortex;

pub use attention::AttentionController;
pub use avalanche::AvalancheField;
pub use oscillator::OscillatorField;
pub use tension::TensionSystem;
pub use vortex::VortexField;

use crate::snapshot::{RhythmMode, RhythmSnapshot};
use crate::visual::VisualState;

/// Seed for a module's RNG at activation: different each run, salted per
/// consumer so two modules activated in the same instant diverge.
pub(crate) fn activation_seed(salt: u64) -> u64 {
    salt ^ std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

/// The active simulation module.
///
/// Constructed fresh on mode (re)selection; all per-mode state lives inside
/// the variant and is dropped with it.
#[derive(Debug)]
pub enum Module {
    Oscillator(OscillatorField),
    Avalanche(AvalancheField),
    Tension(TensionSystem),
    Vortex(VortexField),
    Attention(AttentionController),
}

impl Module {
    /// Construct a module with fresh state for `mode`.
    pub fn new(mode: RhythmMode) -> Self {
        match mode {
            RhythmMode::Oscillator => Module::Oscillator(OscillatorField::new()),
            RhythmMode::Avalanche => Module::Avalanche(AvalancheField::new()),
            RhythmMode::Tension => Module::Tension(TensionSystem::new()),
            RhythmMode::Vortex => Module::Vortex(VortexField::new()),
            RhythmMode::Attention => Module::Attention(AttentionController::new()),
        }
    }

    /// The mode this module simulates.
    pub fn mode(&self) -> RhythmMode {
        match self {
            Module::Oscillator(_) => RhythmMode::Oscillator,
            Module::Avalanche(_) => RhythmMode::Avalanche,
            Module::Tension(_) => RhythmMode::Tension,
            Module::Vortex(_) => RhythmMode::Vortex,
            Module::Attention(_) => RhythmMode::Attention,
        }
    }

    /// Consume one snapshot, advance by `dt` seconds, emit visual state.
    pub fn advance(&mut self, snapshot: &RhythmSnapshot, dt: f32) -> VisualState {
        match self {
            Module::Oscillator(m) => VisualState::Oscillator(m.advance(snapshot, dt)),
            Module::Avalanche(m) => VisualState::Avalanche(m.advance(snapshot, dt)),
            Module::Tension(m) => VisualState::Tension(m.advance(snapshot, dt)),
            Module::Vortex(m) => VisualState::Vortex(m.advance(snapshot, dt)),
            Module::Attention(m) => VisualState::Attention(m.advance(snapshot, dt)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_mode_roundtrip() {
        for mode in RhythmMode::ALL {
            let module = Module::new(mode);
            assert_eq!(module.mode(), mode);
        }
    }

    #[test]
    fn test_advance_emits_matching_variant() {
        for mode in RhythmMode::ALL {
            let mut module = Module::new(mode);
            let snap = RhythmSnapshot::neutral(mode);
            let visual = module.advance(&snap, 0.016);
            assert_eq!(visual.mode(), mode);
        }
    }
}
