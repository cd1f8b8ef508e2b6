//! Rhythm snapshots: the per-tick input to every simulation module.
//!
//! A [`RhythmSnapshot`] is one tick's worth of externally computed rhythm
//! state: a handful of scalar `values` plus per-mode [`SnapshotMeta`]. The
//! producer of these numbers lives outside this crate (see
//! [`SnapshotSource`](crate::scheduler::SnapshotSource)); this module only
//! defines the shape of the data and the lenient decoding at the boundary.
//!
//! # Lenient by design
//!
//! Sources are loosely typed (the reference producer serializes metadata as
//! free-form JSON), so every field here has a documented neutral default:
//! missing scalars read as `0.0`, missing flags as `false`, missing target
//! lists as empty. A module never fails because a field is absent; the
//! worst outcome of a sparse snapshot is a default-valued frame.

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// The five mutually exclusive simulation modes.
///
/// String forms match the rhythm names used by external snapshot sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RhythmMode {
    /// Coupled oscillator field (`multi_temporal`).
    Oscillator,
    /// Attraction/avalanche particle field (`critical_phi`).
    Avalanche,
    /// Tension spring and release system (`prediction_tension`).
    Tension,
    /// Vortex flow field with trail (`semantic_vortex`).
    Vortex,
    /// Attention search and focus controller (`attention_wandering`).
    Attention,
}

impl RhythmMode {
    /// All modes, in selector order.
    pub const ALL: [RhythmMode; 5] = [
        RhythmMode::Oscillator,
        RhythmMode::Avalanche,
        RhythmMode::Tension,
        RhythmMode::Vortex,
        RhythmMode::Attention,
    ];

    /// Wire name of this mode, as emitted by snapshot sources.
    pub fn as_str(&self) -> &'static str {
        match self {
            RhythmMode::Oscillator => "multi_temporal",
            RhythmMode::Avalanche => "critical_phi",
            RhythmMode::Tension => "prediction_tension",
            RhythmMode::Vortex => "semantic_vortex",
            RhythmMode::Attention => "attention_wandering",
        }
    }
}

impl std::fmt::Display for RhythmMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-mode metadata for the oscillator field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OscillatorMeta {
    /// Phase angle per oscillator, radians. Missing entries read as 0.
    #[serde(default)]
    pub phases: Vec<f32>,
    /// Pairwise coupling in [0, 1]. `None` suppresses connection edges.
    #[serde(default)]
    pub coupling_strength: Option<f32>,
}

/// Per-mode metadata for the avalanche field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AvalancheMeta {
    /// High-activity regime flag: turbulence on, emissive doubled.
    #[serde(default)]
    pub avalanche_active: bool,
    /// Distance from the critical point, in [0, 1].
    #[serde(default)]
    pub criticality: f32,
}

/// Per-mode metadata for the tension system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TensionMeta {
    /// Gates particle emission; births never happen while false.
    #[serde(default)]
    pub release_active: bool,
}

/// Per-mode metadata for the vortex field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VortexMeta {
    /// Flow velocity at the tracked point; drives its continuous spin.
    #[serde(default)]
    pub velocity: [f32; 3],
}

/// Per-mode metadata for the attention controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttentionMeta {
    /// Candidate targets as (x, z) pairs; rebuilt into bodies every tick.
    #[serde(default)]
    pub targets: Vec<[f32; 2]>,
    /// Whether attention is locked onto a target.
    #[serde(default)]
    pub focused: bool,
    /// Index into `targets` of the current focus, if any.
    #[serde(default)]
    pub current_focus: Option<usize>,
}

/// Tagged per-mode metadata.
///
/// The loose attribute map of the wire format becomes one explicit variant
/// per mode, decoded once at the snapshot boundary. Accessors return the
/// variant's data when it matches the caller's mode and documented defaults
/// otherwise, so a module paired with foreign metadata degrades to a neutral
/// frame instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotMeta {
    Oscillator(OscillatorMeta),
    Avalanche(AvalancheMeta),
    Tension(TensionMeta),
    Vortex(VortexMeta),
    Attention(AttentionMeta),
}

impl SnapshotMeta {
    /// Empty metadata for the given mode.
    pub fn empty(mode: RhythmMode) -> Self {
        match mode {
            RhythmMode::Oscillator => SnapshotMeta::Oscillator(Default::default()),
            RhythmMode::Avalanche => SnapshotMeta::Avalanche(Default::default()),
            RhythmMode::Tension => SnapshotMeta::Tension(Default::default()),
            RhythmMode::Vortex => SnapshotMeta::Vortex(Default::default()),
            RhythmMode::Attention => SnapshotMeta::Attention(Default::default()),
        }
    }

    /// Oscillator metadata, or defaults if this is another variant.
    pub fn oscillator(&self) -> OscillatorMeta {
        match self {
            SnapshotMeta::Oscillator(m) => m.clone(),
            _ => OscillatorMeta::default(),
        }
    }

    /// Avalanche metadata, or defaults if this is another variant.
    pub fn avalanche(&self) -> AvalancheMeta {
        match self {
            SnapshotMeta::Avalanche(m) => *m,
            _ => AvalancheMeta::default(),
        }
    }

    /// Tension metadata, or defaults if this is another variant.
    pub fn tension(&self) -> TensionMeta {
        match self {
            SnapshotMeta::Tension(m) => *m,
            _ => TensionMeta::default(),
        }
    }

    /// Vortex metadata, or defaults if this is another variant.
    pub fn vortex(&self) -> VortexMeta {
        match self {
            SnapshotMeta::Vortex(m) => *m,
            _ => VortexMeta::default(),
        }
    }

    /// Attention metadata, or defaults if this is another variant.
    pub fn attention(&self) -> AttentionMeta {
        match self {
            SnapshotMeta::Attention(m) => m.clone(),
            _ => AttentionMeta::default(),
        }
    }
}

/// One tick's worth of externally computed rhythm state.
///
/// Immutable once received; consumed by exactly one module per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhythmSnapshot {
    /// Mode this snapshot was produced for.
    pub mode: RhythmMode,
    /// Monotonic timestamp from the source, seconds.
    pub timestamp: f64,
    /// Mode-specific scalar channel. Length is advisory; read via
    /// [`RhythmSnapshot::value`].
    pub values: Vec<f32>,
    /// Typed per-mode metadata.
    pub meta: SnapshotMeta,
}

impl RhythmSnapshot {
    /// A neutral snapshot for `mode`: no values, empty metadata.
    pub fn neutral(mode: RhythmMode) -> Self {
        Self {
            mode,
            timestamp: 0.0,
            values: Vec::new(),
            meta: SnapshotMeta::empty(mode),
        }
    }

    /// Scalar channel `i`, or `0.0` if the source sent fewer values.
    #[inline]
    pub fn value(&self, i: usize) -> f32 {
        self.values.get(i).copied().unwrap_or(0.0)
    }

    /// Decode a snapshot from a loose JSON payload.
    ///
    /// `payload` is expected to carry `timestamp`, `values` and `metadata`
    /// keys; each is optional and defaults when absent. Metadata fields the
    /// mode does not know are ignored. Only a structurally undecodable
    /// payload errors.
    pub fn from_json(mode: RhythmMode, payload: &serde_json::Value) -> Result<Self, SourceError> {
        let timestamp = payload
            .get("timestamp")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let values = match payload.get("values") {
            Some(v) => Vec::<f32>::deserialize(v)?,
            None => Vec::new(),
        };
        let meta_value = payload.get("metadata");
        let meta = match (mode, meta_value) {
            (_, None) => SnapshotMeta::empty(mode),
            (RhythmMode::Oscillator, Some(v)) => {
                SnapshotMeta::Oscillator(OscillatorMeta::deserialize(v)?)
            }
            (RhythmMode::Avalanche, Some(v)) => {
                SnapshotMeta::Avalanche(AvalancheMeta::deserialize(v)?)
            }
            (RhythmMode::Tension, Some(v)) => SnapshotMeta::Tension(TensionMeta::deserialize(v)?),
            (RhythmMode::Vortex, Some(v)) => SnapshotMeta::Vortex(VortexMeta::deserialize(v)?),
            (RhythmMode::Attention, Some(v)) => {
                SnapshotMeta::Attention(AttentionMeta::deserialize(v)?)
            }
        };
        Ok(Self {
            mode,
            timestamp,
            values,
            meta,
        })
    }
}
