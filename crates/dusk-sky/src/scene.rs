//! Mutable scene state shared between the animator and the shading passes.
//!
//! [`SceneState`] is owned by the frame loop and handed to
//! [`animate`](crate::animate) by `&mut` once per frame. The shading passes
//! read it afterwards in the same frame.

use glam::Vec3;

use crate::animator::SUN_PLANE_Z;
use crate::geometry::SunDisc;

/// The single scene light, which is also the sun.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightState {
    /// Sun centre. Only `x` and `y` are animated; `z` stays on the sun plane.
    pub position: Vec3,
    /// Light color in RGB. Not clamped.
    pub color: Vec3,
    /// Ambient term multiplier. Not clamped.
    pub ambient_strength: f32,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, SUN_PLANE_Z),
            color: Vec3::new(1.0, 1.0, 0.8),
            ambient_strength: 0.5,
        }
    }
}

/// Everything the animator writes and the render passes read.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    pub light: LightState,
    /// Framebuffer clear color.
    pub sky_color: Vec3,
    /// Flat color of the sun disc. Only the blue channel is animated.
    pub sun_color: Vec3,
    /// Albedo of the ground plane. Never animated.
    pub ground_color: Vec3,
    /// Rim vertices of the sun fan, rewritten in full every frame.
    pub sun_disc: SunDisc,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(
            LightState::default(),
            Vec3::new(0.6, 0.8, 1.0),
            Vec3::new(1.0, 1.0, 0.8),
            Vec3::new(0.2, 0.7, 0.2),
        )
    }
}

impl SceneState {
    /// Build a scene from explicit initial values.
    ///
    /// The light position is forced onto the sun plane; the disc buffer is
    /// allocated here at its final size and never resized.
    pub fn new(light: LightState, sky_color: Vec3, sun_color: Vec3, ground_color: Vec3) -> Self {
        let light = LightState {
            position: Vec3::new(light.position.x, light.position.y, SUN_PLANE_Z),
            ..light
        };
        Self {
            light,
            sky_color,
            sun_color,
            ground_color,
            sun_disc: SunDisc::new(),
        }
    }
}
