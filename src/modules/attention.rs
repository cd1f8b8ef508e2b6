//! Attention search and focus controller.
//!
//! A cursor wanders the plane, pulsing and spinning quickly while
//! unfocused, then slows and brightens with focus strength once the
//! snapshot reports a locked target. Target bodies are rebuilt from
//! metadata every tick (the set is small and externally owned), and a beam
//! connects cursor to the focused target whenever the focus index resolves.
//! Both visual regimes are keyed directly off the `focused` flag; there is
//! no intermediate transition state and no persisted timer. A static
//! 100-point ambient cloud, rolled once at activation, fills the scene
//! behind the cursor.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

use crate::snapshot::RhythmSnapshot;
use crate::visual::{AttentionVisual, Body, PointCloud, Transform};

/// Highlight palette for the focused target.
const FOCUS_COLOR: Vec3 = Vec3::new(0.984, 0.749, 0.141);
const FOCUS_EMISSIVE: Vec3 = Vec3::new(0.960, 0.620, 0.043);
/// Palette for unfocused targets.
const TARGET_COLOR: Vec3 = Vec3::new(0.388, 0.400, 0.945);
const TARGET_EMISSIVE: Vec3 = Vec3::new(0.310, 0.275, 0.898);

/// Ambient background cloud: point count and spawn extents.
const AMBIENT_COUNT: usize = 100;
const AMBIENT_SPREAD: f32 = 8.0;
const AMBIENT_HEIGHT: f32 = 2.0;

/// Attention cursor state (elapsed time plus the fixed ambient cloud;
/// targets are not persisted).
#[derive(Debug)]
pub struct AttentionController {
    ambient: PointCloud,
    elapsed: f32,
}

impl AttentionController {
    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(super::activation_seed(0xC3));
        let positions = (0..AMBIENT_COUNT)
            .map(|_| {
                Vec3::new(
                    (rng.gen::<f32>() - 0.5) * AMBIENT_SPREAD,
                    rng.gen::<f32>() * AMBIENT_HEIGHT,
                    (rng.gen::<f32>() - 0.5) * AMBIENT_SPREAD,
                )
            })
            .collect();
        Self {
            ambient: PointCloud {
                positions,
                color: Vec3::new(0.878, 0.906, 1.0),
                size: 0.02,
                opacity: 0.3,
            },
            elapsed: 0.0,
        }
    }

    /// Place the cursor, rebuild targets, aim the beam.
    pub fn advance(&mut self, snapshot: &RhythmSnapshot, dt: f32) -> AttentionVisual {
        self.elapsed += dt;
        let time = self.elapsed;
        let x = snapshot.value(0);
        let y = snapshot.value(1);
        let boredom = snapshot.value(2);
        let focus = snapshot.value(3);
        let meta = snapshot.meta.attention();

        let cursor_pos = Vec3::new(x * 2.0, (time * 2.0).sin() * 0.1, y * 2.0);
        let cursor = if meta.focused {
            Body {
                transform: Transform {
                    position: cursor_pos,
                    rotation: Vec3::new((time * 1.5).sin() * 0.1, time * 0.5, 0.0),
                    scale: Vec3::splat(0.5 + focus * 0.3),
                },
                color: Vec3::new(0.5, 0.3, 1.0),
                emissive: Vec3::new(0.486, 0.227, 0.929),
                emissive_intensity: focus,
                visible: true,
            }
        } else {
            Body {
                transform: Transform {
                    position: cursor_pos,
                    rotation: Vec3::new((time * 1.5).sin() * 0.3, time * 2.0, 0.0),
                    scale: Vec3::splat(0.4 + (time * 3.0).sin() * 0.1),
                },
                color: Vec3::new(0.7, 0.5, 0.9),
                emissive: Vec3::new(0.486, 0.227, 0.929),
                emissive_intensity: 0.3 + boredom * 0.2,
                visible: true,
            }
        };

        let targets: Vec<Body> = meta
            .targets
            .iter()
            .enumerate()
            .map(|(index, t)| {
                let highlighted = meta.current_focus == Some(index);
                Body {
                    transform: Transform::at(Vec3::new(t[0] * 2.0, 0.0, t[1] * 2.0), 0.2),
                    color: if highlighted { FOCUS_COLOR } else { TARGET_COLOR },
                    emissive: if highlighted {
                        FOCUS_EMISSIVE
                    } else {
                        TARGET_EMISSIVE
                    },
                    emissive_intensity: if highlighted { 0.8 } else { 0.2 },
                    visible: true,
                }
            })
            .collect();

        let focused_target = if meta.focused {
            meta.current_focus.and_then(|i| meta.targets.get(i))
        } else {
            None
        };

        let (beam, beam_opacity) = match focused_target {
            Some(t) => {
                let dx = t[0] * 2.0 - x * 2.0;
                let dz = t[1] * 2.0 - y * 2.0;
                let length = (dx * dx + dz * dz).sqrt();
                let angle = dz.atan2(dx);
                (
                    Body {
                        transform: Transform {
                            position: Vec3::new(
                                (x * 2.0 + t[0] * 2.0) / 2.0,
                                0.0,
                                (y * 2.0 + t[1] * 2.0) / 2.0,
                            ),
                            rotation: Vec3::new(PI / 2.0, 0.0, -angle - PI / 2.0),
                            scale: Vec3::new(1.0, length, 1.0),
                        },
                        color: FOCUS_COLOR,
                        emissive: FOCUS_EMISSIVE,
                        emissive_intensity: 1.0,
                        visible: true,
                    },
                    focus * 0.3,
                )
            }
            None => (
                Body {
                    visible: false,
                    ..Body::default()
                },
                0.0,
            ),
        };

        AttentionVisual {
            cursor,
            targets,
            ambient: self.ambient.clone(),
            beam,
            beam_opacity,
        }
    }
}

impl Default for AttentionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{AttentionMeta, RhythmMode, SnapshotMeta};

    fn snapshot(
        values: [f32; 4],
        targets: Vec<[f32; 2]>,
        focused: bool,
        current: Option<usize>,
    ) -> RhythmSnapshot {
        RhythmSnapshot {
            mode: RhythmMode::Attention,
            timestamp: 0.0,
            values: values.to_vec(),
            meta: SnapshotMeta::Attention(AttentionMeta {
                targets,
                focused,
                current_focus: current,
            }),
        }
    }

    #[test]
    fn test_beam_hidden_while_unfocused() {
        let mut ctrl = AttentionController::new();
        // Even with a resolvable focus index, focused=false hides the beam.
        let visual = ctrl.advance(
            &snapshot([0.0; 4], vec![[1.0, 0.0]], false, Some(0)),
            0.016,
        );
        assert!(!visual.beam.visible);
        assert_eq!(visual.beam_opacity, 0.0);
    }

    #[test]
    fn test_beam_hidden_when_index_unresolvable() {
        let mut ctrl = AttentionController::new();
        let visual = ctrl.advance(&snapshot([0.0; 4], vec![[1.0, 0.0]], true, Some(5)), 0.016);
        assert!(!visual.beam.visible);
        let visual = ctrl.advance(&snapshot([0.0; 4], vec![[1.0, 0.0]], true, None), 0.016);
        assert!(!visual.beam.visible);
    }

    #[test]
    fn test_beam_geometry() {
        let mut ctrl = AttentionController::new();
        // Cursor at origin, target at (1, 0) in rhythm space → (2, 0) world.
        let visual = ctrl.advance(
            &snapshot([0.0, 0.0, 0.0, 0.5], vec![[1.0, 0.0]], true, Some(0)),
            0.016,
        );
        assert!(visual.beam.visible);
        assert!((visual.beam.transform.scale.y - 2.0).abs() < 1e-6);
        assert!((visual.beam.transform.position.x - 1.0).abs() < 1e-6);
        assert!((visual.beam_opacity - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_targets_rebuilt_each_tick() {
        let mut ctrl = AttentionController::new();
        let a = ctrl.advance(&snapshot([0.0; 4], vec![[0.0, 0.0]; 4], true, Some(2)), 0.016);
        assert_eq!(a.targets.len(), 4);
        assert!((a.targets[2].emissive_intensity - 0.8).abs() < 1e-6);
        assert!((a.targets[0].emissive_intensity - 0.2).abs() < 1e-6);

        let b = ctrl.advance(&snapshot([0.0; 4], vec![], false, None), 0.016);
        assert!(b.targets.is_empty());
    }

    #[test]
    fn test_ambient_cloud_fixed_at_activation() {
        let mut ctrl = AttentionController::new();
        let a = ctrl.advance(&snapshot([0.0; 4], vec![], false, None), 0.016);
        assert_eq!(a.ambient.positions.len(), 100);
        for p in &a.ambient.positions {
            assert!(p.x.abs() <= 4.0);
            assert!((0.0..=2.0).contains(&p.y));
            assert!(p.z.abs() <= 4.0);
        }
        // The cloud never moves; only re-activation rolls new positions.
        let b = ctrl.advance(&snapshot([0.5, -0.5, 0.0, 1.0], vec![], true, None), 0.016);
        assert_eq!(a.ambient, b.ambient);
        assert!((a.ambient.opacity - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_regime_switch_is_instant() {
        let mut ctrl = AttentionController::new();
        let focused = ctrl.advance(&snapshot([0.0, 0.0, 0.0, 1.0], vec![], true, None), 0.016);
        let wandering = ctrl.advance(&snapshot([0.0, 0.0, 1.0, 0.0], vec![], false, None), 0.016);
        // Focused regime: intensity tracks focus strength, slow spin.
        assert!((focused.cursor.emissive_intensity - 1.0).abs() < 1e-6);
        // Wandering regime: intensity tracks boredom, fast spin.
        assert!((wandering.cursor.emissive_intensity - 0.5).abs() < 1e-6);
        assert!(
            wandering.cursor.transform.rotation.y > focused.cursor.transform.rotation.y
        );
    }
}
