//! Per-frame GPU work for the scene: uniform uploads, the animation step and
//! the single render pass holding the sun and ground draws.

use std::sync::Arc;

use dusk_render::{
    DepthBuffer, FrameEncoder, GroundPass, GroundUniform, RenderContext, RenderContextError,
    RenderPassBuilder, ShaderLibrary, SunPass, SunUniform, SurfaceError, Viewport,
    clear_color_from, init_render_context_blocking,
};
use dusk_sky::{DiscUploader, GroundLighting, SceneState, animate};
use glam::Mat4;
use tracing::{info, warn};
use winit::window::Window;

/// Per-frame values handed to the GPU, read around the animation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUniforms {
    pub clear: wgpu::Color,
    pub sun: SunUniform,
    pub ground: GroundUniform,
}

/// Advance `scene` to `time`, uploading the disc through `uploader`.
///
/// The clear color and the sun color are taken before the animation step,
/// so both lag the animated state by one frame. The ground uniforms are
/// taken after it.
pub fn advance_frame(
    scene: &mut SceneState,
    time: f32,
    uploader: &mut impl DiscUploader,
) -> FrameUniforms {
    let clear = clear_color_from(scene.sky_color);
    let sun = SunUniform::new(Mat4::IDENTITY, scene.sun_color);

    animate(scene, time, uploader);

    let ground = GroundUniform::new(Mat4::IDENTITY, &GroundLighting::from_scene(scene));
    FrameUniforms { clear, sun, ground }
}

/// All GPU state owned by the running app.
pub struct SceneRenderer {
    pub gpu: RenderContext,
    depth: DepthBuffer,
    sun: SunPass,
    ground: GroundPass,
}

impl SceneRenderer {
    /// Create the device, surface, depth buffer and both passes for `window`.
    pub fn new(
        window: Arc<Window>,
        vsync: bool,
        scene: &SceneState,
    ) -> Result<Self, RenderContextError> {
        let gpu = init_render_context_blocking(window, vsync)?;
        let (width, height) = gpu.size();
        let depth = DepthBuffer::new(&gpu.device, width, height);

        let mut shaders = ShaderLibrary::new();
        let sun = SunPass::new(
            &gpu.device,
            &mut shaders,
            gpu.surface_format,
            &SunUniform::new(Mat4::IDENTITY, scene.sun_color),
        );
        let ground = GroundPass::new(
            &gpu.device,
            &mut shaders,
            gpu.surface_format,
            &GroundUniform::new(Mat4::IDENTITY, &GroundLighting::from_scene(scene)),
        );
        if shaders.has_errors() {
            for name in [SunPass::SHADER_NAME, GroundPass::SHADER_NAME] {
                let errors = shaders
                    .diagnostics(name)
                    .iter()
                    .filter(|d| d.is_error())
                    .count();
                if errors > 0 {
                    warn!("Shader '{name}' has {errors} error(s); rendering continues");
                }
            }
        }
        info!("Scene renderer ready ({} shaders)", shaders.len());

        Ok(Self {
            gpu,
            depth,
            sun,
            ground,
        })
    }

    /// Follow a window resize: surface and depth buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        let (width, height) = self.gpu.size();
        self.depth.resize(&self.gpu.device, width, height);
    }

    /// Advance `scene` to `time` and draw one frame.
    pub fn render_frame(
        &mut self,
        scene: &mut SceneState,
        time: f32,
        viewport: &Viewport,
    ) -> Result<(), SurfaceError> {
        let queue = &self.gpu.queue;
        let uniforms = advance_frame(scene, time, &mut self.sun.disc_writer(queue));
        self.sun.write_uniforms(queue, &uniforms.sun);
        self.ground.write_uniforms(queue, &uniforms.ground);

        let surface_texture = self.gpu.get_current_texture()?;
        let mut frame = FrameEncoder::new(&self.gpu.device, surface_texture);
        let builder = RenderPassBuilder::new()
            .clear_color(uniforms.clear)
            .depth(self.depth.view.clone(), DepthBuffer::CLEAR_VALUE)
            .label("scene-pass");
        {
            let mut pass = frame.begin_render_pass(&builder);
            viewport.apply(&mut pass);
            self.sun.draw(&mut pass);
            self.ground.draw(&mut pass);
        }
        frame.submit(&self.gpu.queue);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dusk_sky::{SUN_DISC_VERTICES, SunVertex};
    use glam::Vec3;

    fn lit(scene: &SceneState) -> GroundUniform {
        GroundUniform::new(Mat4::IDENTITY, &GroundLighting::from_scene(scene))
    }

    #[test]
    fn test_clear_and_sun_use_state_before_animation() {
        let mut scene = SceneState::default();
        let before = scene.clone();

        let uniforms = advance_frame(&mut scene, 4.2, &mut |_: &[SunVertex]| {});

        assert_ne!(scene.sky_color, before.sky_color);
        assert_eq!(uniforms.clear, clear_color_from(before.sky_color));
        assert_eq!(uniforms.sun, SunUniform::new(Mat4::IDENTITY, before.sun_color));
    }

    #[test]
    fn test_ground_uses_state_after_animation() {
        let mut scene = SceneState::default();
        let before = scene.clone();

        let uniforms = advance_frame(&mut scene, 4.2, &mut |_: &[SunVertex]| {});

        assert_eq!(uniforms.ground, lit(&scene));
        assert_ne!(uniforms.ground, lit(&before));
        assert_eq!(uniforms.ground.light_pos, scene.light.position.to_array());
    }

    #[test]
    fn test_second_frame_sees_first_frame_sky() {
        let mut scene = SceneState::default();
        advance_frame(&mut scene, 1.0, &mut |_: &[SunVertex]| {});
        let sky_after_first = scene.sky_color;
        let sun_after_first = scene.sun_color;

        let uniforms = advance_frame(&mut scene, 2.0, &mut |_: &[SunVertex]| {});

        assert_eq!(uniforms.clear, clear_color_from(sky_after_first));
        assert_eq!(uniforms.sun.sun_color, sun_after_first.to_array());
    }

    #[test]
    fn test_disc_uploaded_once_with_animated_vertices() {
        let mut scene = SceneState::default();
        let mut uploads: Vec<Vec<SunVertex>> = Vec::new();

        advance_frame(&mut scene, 0.0, &mut |v: &[SunVertex]| uploads.push(v.to_vec()));

        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].len(), SUN_DISC_VERTICES);
        let centre = Vec3::from_array(uploads[0][0].position) - Vec3::new(0.2, 0.0, 0.0);
        assert!((centre - scene.light.position).length() < 1e-5);
    }
}
