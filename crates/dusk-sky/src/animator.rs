//! Sun orbit and the color curves that follow it.
//!
//! The sun travels an ellipse of semi-axes `(0.76, 0.8)` around the origin
//! with a period of `6π` seconds. Every color on screen is an affine
//! function of the sun's height, so the scene brightens at noon and darkens
//! at night without any separate clock.

use glam::Vec3;

use crate::geometry::{SUN_DISC_VERTICES, SunDisc, SunVertex};
use crate::scene::{LightState, SceneState};

/// Radius of the sun disc, also the base unit of the orbit.
pub const SUN_RADIUS: f32 = 0.2;

/// Depth of the plane the sun moves on, just inside the far clip plane.
pub const SUN_PLANE_Z: f32 = 0.9999;

/// Elapsed seconds are divided by this before entering the orbit angle.
const ORBIT_TIME_DIVISOR: f32 = 3.0;

const ORBIT_X_SCALE: f32 = 3.8;
const ORBIT_Y_SCALE: f32 = 4.0;

/// Shared slope of every height-driven color channel.
pub const COLOR_SLOPE: f32 = 0.5;

/// Light color only animates while the sun is below this height.
pub const LIGHT_WINDOW_TOP: f32 = 0.5;

/// Sky color at the horizon (sun height 0).
pub const SKY_OFFSETS: Vec3 = Vec3::new(0.3, 0.425, 0.65);

pub const SUN_BLUE_OFFSET: f32 = 0.65;

pub const AMBIENT_OFFSET: f32 = 0.6;

/// Receives the freshly built sun disc once per frame.
///
/// The render side implements this to overwrite the whole GPU vertex buffer;
/// tests implement it to observe uploads. Closures taking a vertex slice
/// implement it too.
pub trait DiscUploader {
    fn upload_disc(&mut self, vertices: &[SunVertex]);
}

impl<F> DiscUploader for F
where
    F: FnMut(&[SunVertex]),
{
    fn upload_disc(&mut self, vertices: &[SunVertex]) {
        self(vertices)
    }
}

/// Sun centre at `time` seconds.
pub fn sun_position(time: f32) -> Vec3 {
    let angle = time / ORBIT_TIME_DIVISOR;
    Vec3::new(
        -SUN_RADIUS * (angle.cos() * ORBIT_X_SCALE),
        SUN_RADIUS * (angle.sin() * ORBIT_Y_SCALE),
        SUN_PLANE_Z,
    )
}

/// Overwrite every slot of `disc` with the rim around `center`.
///
/// Slot `i` sits at angle `i` degrees, so slot 360 lands back on slot 0 and
/// slot 361 on slot 1.
pub fn write_sun_disc(center: Vec3, disc: &mut SunDisc) {
    let step = std::f32::consts::TAU / 360.0;
    for (i, vertex) in disc.vertices_mut().iter_mut().enumerate() {
        let angle = i as f32 * step;
        *vertex = SunVertex {
            position: [
                center.x + SUN_RADIUS * angle.cos(),
                center.y + SUN_RADIUS * angle.sin(),
                center.z,
            ],
        };
    }
    debug_assert_eq!(disc.vertices().len(), SUN_DISC_VERTICES);
}

/// Light color for a sun at `position`, or `previous` when the sun is
/// outside the animated band `[-SUN_RADIUS, LIGHT_WINDOW_TOP)`.
///
/// Left of centre (rising) the light is warm; right of centre (setting) it
/// keeps a full blue channel.
pub fn light_color_for(position: Vec3, previous: Vec3) -> Vec3 {
    let y = position.y;
    if !(-SUN_RADIUS..LIGHT_WINDOW_TOP).contains(&y) {
        return previous;
    }
    let lift = y * COLOR_SLOPE;
    if position.x < 0.0 {
        Vec3::new(lift + 1.0, lift + 0.8, lift + 0.8)
    } else {
        Vec3::new(lift + 1.0, lift + 0.8, lift + 1.0)
    }
}

/// Sky color for a sun at height `y`. Never clamped.
pub fn sky_color(y: f32) -> Vec3 {
    SKY_OFFSETS + Vec3::splat(y * COLOR_SLOPE)
}

/// Ambient strength for a sun at height `y`. Never clamped.
pub fn ambient_strength(y: f32) -> f32 {
    y * COLOR_SLOPE + AMBIENT_OFFSET
}

fn sun_blue(y: f32) -> f32 {
    y * COLOR_SLOPE + SUN_BLUE_OFFSET
}

/// Advance `scene` to `time` seconds and push the new disc to `uploader`.
///
/// Output depends only on `time` and on the light color held from the
/// previous call, so repeating a call with the same `time` is a no-op.
pub fn animate(scene: &mut SceneState, time: f32, uploader: &mut impl DiscUploader) {
    let position = sun_position(time);
    write_sun_disc(position, &mut scene.sun_disc);

    let y = position.y;
    scene.light = LightState {
        position,
        color: light_color_for(position, scene.light.color),
        ambient_strength: ambient_strength(y),
    };
    scene.sky_color = sky_color(y);
    scene.sun_color.z = sun_blue(y);

    uploader.upload_disc(scene.sun_disc.vertices());
}
