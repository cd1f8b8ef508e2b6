//! Visual state: the rendering-facing output of a simulation module.
//!
//! Each call to [`Module::advance`](crate::modules::Module::advance) yields
//! one [`VisualState`] describing everything a renderer needs for the
//! current frame: geometry transforms per named body, colors and emissive
//! intensities, point clouds and visibility flags. It is derived purely from
//! current simulation state, so a renderer never needs to re-read history.
//!
//! Point clouds expose their positions as a raw byte view
//! ([`PointCloud::position_bytes`]) so a GPU renderer can copy them into a
//! vertex buffer without an intermediate conversion pass.

use glam::Vec3;

/// Position, Euler rotation (radians) and per-axis scale of one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform at the origin.
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Transform at `position` with uniform `scale` and no rotation.
    pub fn at(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::splat(scale),
        }
    }
}

/// One named body: a transform plus its surface appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub transform: Transform,
    /// Base color, RGB in 0..1.
    pub color: Vec3,
    /// Emissive color, RGB in 0..1.
    pub emissive: Vec3,
    /// Emissive intensity multiplier.
    pub emissive_intensity: f32,
    pub visible: bool,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            color: Vec3::ONE,
            emissive: Vec3::ZERO,
            emissive_intensity: 0.0,
            visible: true,
        }
    }
}

/// A batch of point sprites sharing one color, size and opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub color: Vec3,
    /// Sprite size in world units.
    pub size: f32,
    pub opacity: f32,
}

impl PointCloud {
    /// Positions as raw bytes, laid out as tightly packed `[f32; 3]`.
    #[inline]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }
}

/// A line segment between two bodies, drawn with the given opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: Vec3,
    pub to: Vec3,
    pub opacity: f32,
}

/// One oriented cell of a flow-field lattice.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldCell {
    pub position: Vec3,
    /// Euler rotation: yaw = tangential flow angle, roll = local strength.
    pub rotation: Vec3,
    pub scale: Vec3,
}

/// Output of the coupled oscillator field.
#[derive(Debug, Clone, PartialEq)]
pub struct OscillatorVisual {
    /// The three oscillator bodies.
    pub oscillators: [Body; 3],
    /// Static anchor at the origin.
    pub anchor: Body,
    /// Coupling edges, one per ordered pair; empty when coupling is absent.
    pub edges: Vec<Edge>,
}

/// Output of the attraction/avalanche field.
#[derive(Debug, Clone, PartialEq)]
pub struct AvalancheVisual {
    /// Central integration body.
    pub core: Body,
    pub particles: PointCloud,
}

/// Output of the tension spring and release system.
#[derive(Debug, Clone, PartialEq)]
pub struct TensionVisual {
    pub spring: Body,
    pub particles: PointCloud,
}

/// Output of the vortex flow field.
#[derive(Debug, Clone, PartialEq)]
pub struct VortexVisual {
    /// Tracked point body.
    pub tracer: Body,
    /// Recent tracer positions, exactly trail-capacity entries.
    pub trail: PointCloud,
    /// The full lattice, recomputed this tick.
    pub cells: Vec<FieldCell>,
}

/// Output of the attention search and focus controller.
#[derive(Debug, Clone, PartialEq)]
pub struct AttentionVisual {
    pub cursor: Body,
    /// Target bodies rebuilt from metadata this tick.
    pub targets: Vec<Body>,
    /// Static background cloud, generated once at activation.
    pub ambient: PointCloud,
    /// Beam from cursor to the focused target; `visible` is false whenever
    /// the controller is unfocused or the focus index does not resolve.
    pub beam: Body,
    /// Beam opacity, proportional to focus strength.
    pub beam_opacity: f32,
}

/// Per-mode visual output, the only thing exposed to the projection layer.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualState {
    Oscillator(OscillatorVisual),
    Avalanche(AvalancheVisual),
    Tension(TensionVisual),
    Vortex(VortexVisual),
    Attention(AttentionVisual),
}

impl VisualState {
    /// The mode that produced this state.
    pub fn mode(&self) -> crate::snapshot::RhythmMode {
        use crate::snapshot::RhythmMode;
        match self {
            VisualState::Oscillator(_) => RhythmMode::Oscillator,
            VisualState::Avalanche(_) => RhythmMode::Avalanche,
            VisualState::Tension(_) => RhythmMode::Tension,
            VisualState::Vortex(_) => RhythmMode::Vortex,
            VisualState::Attention(_) => RhythmMode::Attention,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_cloud_byte_view() {
        let cloud = PointCloud {
            positions: vec![Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO],
            color: Vec3::ONE,
            size: 0.02,
            opacity: 0.6,
        };
        let bytes = cloud.position_bytes();
        assert_eq!(bytes.len(), 2 * 3 * 4);
        let back: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(back[0], 1.0);
        assert_eq!(back[2], 3.0);
    }

    #[test]
    fn test_transform_at() {
        let t = Transform::at(Vec3::Y, 2.0);
        assert_eq!(t.position, Vec3::Y);
        assert_eq!(t.scale, Vec3::splat(2.0));
        assert_eq!(t.rotation, Vec3::ZERO);
    }
}
