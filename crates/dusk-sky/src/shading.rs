//! CPU reference for the ground shading formula.
//!
//! Mirrors the ground fragment shader term by term so the lighting model can
//! be unit tested without a GPU. The viewer is pinned at [`VIEW_POS`] and the
//! spotlight cone is measured from the viewer, not from the sun.

use glam::Vec3;

use crate::scene::SceneState;

/// Fixed eye position used by the specular, cone and attenuation terms.
pub const VIEW_POS: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Inner cone half-angle; full intensity inside it.
pub const CUT_OFF_DEGREES: f32 = 12.5;

/// Outer cone half-angle; zero diffuse/specular outside it.
pub const OUTER_CUT_OFF_DEGREES: f32 = 17.5;

const SPECULAR_STRENGTH: f32 = 0.1;
const SHININESS: f32 = 32.0;
const ATTENUATION_LINEAR: f32 = 0.09;
const ATTENUATION_QUADRATIC: f32 = 0.032;

/// Every per-frame input of the ground pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundLighting {
    pub light_pos: Vec3,
    pub light_color: Vec3,
    pub ground_color: Vec3,
    pub ambient_strength: f32,
    /// Cosine of [`CUT_OFF_DEGREES`].
    pub cut_off: f32,
    /// Cosine of [`OUTER_CUT_OFF_DEGREES`].
    pub outer_cut_off: f32,
}

impl GroundLighting {
    /// Snapshot the lighting inputs from the current scene.
    pub fn from_scene(scene: &SceneState) -> Self {
        Self {
            light_pos: scene.light.position,
            light_color: scene.light.color,
            ground_color: scene.ground_color,
            ambient_strength: scene.light.ambient_strength,
            cut_off: CUT_OFF_DEGREES.to_radians().cos(),
            outer_cut_off: OUTER_CUT_OFF_DEGREES.to_radians().cos(),
        }
    }
}

/// Shaded ground color at `frag_pos` with surface `normal`.
pub fn ground_color_at(frag_pos: Vec3, normal: Vec3, lighting: &GroundLighting) -> Vec3 {
    let light_color = lighting.light_color;

    let mut ambient = lighting.ambient_strength * light_color;

    let norm = normal.normalize();
    let light_dir = (lighting.light_pos - frag_pos).normalize();
    let diff = norm.dot(light_dir).max(0.0);
    let mut diffuse = diff * light_color;

    let view_dir = (VIEW_POS - frag_pos).normalize();
    let reflect_dir = reflect(-light_dir, norm);
    let spec = view_dir.dot(reflect_dir).max(0.0).powf(SHININESS);
    let mut specular = SPECULAR_STRENGTH * spec * light_color;

    // Soft cone edge, measured along the eye ray.
    let theta = light_dir.dot((-view_dir).normalize());
    let epsilon = lighting.cut_off - lighting.outer_cut_off;
    let intensity = ((theta - lighting.outer_cut_off) / epsilon).clamp(0.0, 1.0);
    diffuse *= intensity;
    specular *= intensity;

    let distance = (VIEW_POS - frag_pos).length();
    let attenuation =
        1.0 / (1.0 + ATTENUATION_LINEAR * distance + ATTENUATION_QUADRATIC * (distance * distance));
    ambient *= attenuation;
    diffuse *= attenuation;
    specular *= attenuation;

    (ambient + diffuse + specular) * lighting.ground_color
}

/// GLSL/WGSL `reflect`.
fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}
