//! Flat-colored sun disc pass.
//!
//! The disc vertex buffer is rewritten in full every frame through
//! [`SunDiscWriter`]; the fan is drawn through a static index buffer since
//! wgpu has no triangle-fan topology.

use bytemuck::{Pod, Zeroable};
use dusk_sky::{DiscUploader, SUN_DISC_VERTICES, SunDisc, SunVertex, fan_to_triangle_list};
use glam::{Mat4, Vec3};

use crate::buffer::{BufferAllocator, GpuVertex, IndexedMesh};
use crate::pipeline::{
    create_scene_pipeline, mat4_to_uniform, uniform_bind_group, uniform_bind_group_layout,
};
use crate::shader::ShaderLibrary;

/// `SunUniforms` block of [`SUN_SHADER_SOURCE`], 80 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SunUniform {
    pub model: [[f32; 4]; 4],
    pub sun_color: [f32; 3],
    pub _padding: f32,
}

impl SunUniform {
    pub fn new(model: Mat4, sun_color: Vec3) -> Self {
        Self {
            model: mat4_to_uniform(model),
            sun_color: sun_color.to_array(),
            _padding: 0.0,
        }
    }
}

/// Pipeline, uniform buffer and disc mesh for the sun pass.
pub struct SunPass {
    pub pipeline: wgpu::RenderPipeline,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub mesh: IndexedMesh,
}

impl SunPass {
    pub const SHADER_NAME: &'static str = "sun";

    /// Build the pass with the disc buffer sized for [`SUN_DISC_VERTICES`].
    pub fn new(
        device: &wgpu::Device,
        shaders: &mut ShaderLibrary,
        surface_format: wgpu::TextureFormat,
        initial: &SunUniform,
    ) -> Self {
        let shader = shaders.load_from_source(device, Self::SHADER_NAME, SUN_SHADER_SOURCE);

        let layout = uniform_bind_group_layout(
            device,
            "sun-uniform-bgl",
            std::mem::size_of::<SunUniform>() as u64,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let pipeline = create_scene_pipeline(
            device,
            "sun-pipeline",
            &shader,
            SunVertex::layout(),
            &layout,
            surface_format,
        );

        let allocator = BufferAllocator::new(device);
        let uniform_buffer = allocator.create_uniform_buffer("sun-uniforms", initial);
        let bind_group = uniform_bind_group(device, "sun-uniform-bg", &layout, &uniform_buffer);
        let mesh = allocator.create_indexed_mesh(
            "sun-disc",
            SunDisc::new().vertices(),
            &fan_to_triangle_list(SUN_DISC_VERTICES),
        );

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            mesh,
        }
    }

    pub fn write_uniforms(&self, queue: &wgpu::Queue, uniform: &SunUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniform));
    }

    /// Upload target for the animator, valid for one frame.
    pub fn disc_writer<'a>(&'a self, queue: &'a wgpu::Queue) -> SunDiscWriter<'a> {
        SunDiscWriter {
            queue,
            buffer: &self.mesh.vertex_buffer,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        self.mesh.draw(render_pass);
    }
}

/// Overwrites the sun vertex buffer from offset 0 on each upload.
pub struct SunDiscWriter<'a> {
    queue: &'a wgpu::Queue,
    buffer: &'a wgpu::Buffer,
}

impl DiscUploader for SunDiscWriter<'_> {
    fn upload_disc(&mut self, vertices: &[SunVertex]) {
        debug_assert_eq!(vertices.len(), SUN_DISC_VERTICES);
        self.queue.write_buffer(self.buffer, 0, bytemuck::cast_slice(vertices));
    }
}

/// WGSL for the sun pass. Clip-space depth is remapped from `-1..1` to `0..1`.
pub const SUN_SHADER_SOURCE: &str = r#"
struct SunUniforms {
    model: mat4x4<f32>,
    sunColor: vec3<f32>,
};

@group(0) @binding(0)
var<uniform> u: SunUniforms;

struct VertexInput {
    @location(0) aPos: vec3<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> @builtin(position) vec4<f32> {
    let world = u.model * vec4<f32>(in.aPos, 1.0);
    return vec4<f32>(world.xy, world.z * 0.5 + world.w * 0.5, world.w);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(u.sunColor, 1.0);
}
"#;
