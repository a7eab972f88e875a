//! Celestial animation for the dawn-to-dusk scene.
//!
//! Everything in this crate is plain CPU math on `glam` types: the sun orbit,
//! the sun disc fan, the sky/light/ambient color curves, the static ground
//! geometry, and a CPU mirror of the ground shading formula. GPU upload is
//! reached only through the [`DiscUploader`] boundary trait.

pub mod animator;
pub mod geometry;
pub mod scene;
pub mod shading;

pub use animator::{
    AMBIENT_OFFSET, COLOR_SLOPE, DiscUploader, LIGHT_WINDOW_TOP, SKY_OFFSETS, SUN_BLUE_OFFSET,
    SUN_PLANE_Z, SUN_RADIUS, ambient_strength, animate, light_color_for, sky_color, sun_position,
    write_sun_disc,
};
pub use geometry::{
    GROUND_DRAW_VERTICES, GROUND_MESH_VERTICES, GroundMesh, GroundVertex, SUN_DISC_VERTICES,
    SunDisc, SunVertex, fan_to_triangle_list,
};
pub use scene::{LightState, SceneState};
pub use shading::{
    CUT_OFF_DEGREES, GroundLighting, OUTER_CUT_OFF_DEGREES, VIEW_POS, ground_color_at,
};
