//! Lit ground pass: ambient, diffuse and specular from the sun, shaped by a
//! soft spotlight cone around the fixed eye ray and attenuated with distance
//! from the eye.
//!
//! Only the first [`GROUND_DRAW_VERTICES`] vertices of the ground mesh are
//! drawn; the sky backdrop triangles stay resident in the buffer unused.

use bytemuck::{Pod, Zeroable};
use dusk_sky::{GROUND_DRAW_VERTICES, GroundLighting, GroundMesh, GroundVertex};
use glam::Mat4;

use crate::buffer::{BufferAllocator, GpuVertex, VertexMesh};
use crate::pipeline::{
    create_scene_pipeline, mat4_to_uniform, uniform_bind_group, uniform_bind_group_layout,
};
use crate::shader::ShaderLibrary;

/// `GroundUniforms` block of [`GROUND_SHADER_SOURCE`], 112 bytes.
///
/// Each `vec3` is followed by the scalar that packs into its fourth lane.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GroundUniform {
    pub model: [[f32; 4]; 4],
    pub light_pos: [f32; 3],
    pub ambient_strength: f32,
    pub light_color: [f32; 3],
    pub cut_off: f32,
    pub ground_color: [f32; 3],
    pub outer_cut_off: f32,
}

impl GroundUniform {
    pub fn new(model: Mat4, lighting: &GroundLighting) -> Self {
        Self {
            model: mat4_to_uniform(model),
            light_pos: lighting.light_pos.to_array(),
            ambient_strength: lighting.ambient_strength,
            light_color: lighting.light_color.to_array(),
            cut_off: lighting.cut_off,
            ground_color: lighting.ground_color.to_array(),
            outer_cut_off: lighting.outer_cut_off,
        }
    }
}

/// Pipeline, uniform buffer and mesh for the ground pass.
pub struct GroundPass {
    pub pipeline: wgpu::RenderPipeline,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub mesh: VertexMesh,
}

impl GroundPass {
    pub const SHADER_NAME: &'static str = "ground";

    pub fn new(
        device: &wgpu::Device,
        shaders: &mut ShaderLibrary,
        surface_format: wgpu::TextureFormat,
        initial: &GroundUniform,
    ) -> Self {
        let shader = shaders.load_from_source(device, Self::SHADER_NAME, GROUND_SHADER_SOURCE);

        let layout = uniform_bind_group_layout(
            device,
            "ground-uniform-bgl",
            std::mem::size_of::<GroundUniform>() as u64,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let pipeline = create_scene_pipeline(
            device,
            "ground-pipeline",
            &shader,
            GroundVertex::layout(),
            &layout,
            surface_format,
        );

        let allocator = BufferAllocator::new(device);
        let uniform_buffer = allocator.create_uniform_buffer("ground-uniforms", initial);
        let bind_group = uniform_bind_group(device, "ground-uniform-bg", &layout, &uniform_buffer);
        let mesh = allocator.create_vertex_mesh(
            "ground-vertices",
            GroundMesh::new().vertices(),
            GROUND_DRAW_VERTICES,
        );

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            mesh,
        }
    }

    pub fn write_uniforms(&self, queue: &wgpu::Queue, uniform: &GroundUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniform));
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        self.mesh.draw(render_pass);
    }
}

/// WGSL for the ground pass.
///
/// Clip-space depth is remapped from `-1..1` to `0..1` in the vertex stage.
/// The normal matrix is the inverse transpose of the model's upper 3×3,
/// built from cofactors.
pub const GROUND_SHADER_SOURCE: &str = r#"
struct GroundUniforms {
    model: mat4x4<f32>,
    lightPos: vec3<f32>,
    ambientStrength: f32,
    lightColor: vec3<f32>,
    cutOff: f32,
    groundColor: vec3<f32>,
    outerCutOff: f32,
};

@group(0) @binding(0)
var<uniform> u: GroundUniforms;

const VIEW_POS: vec3<f32> = vec3<f32>(0.0, 0.0, -1.0);
const SPECULAR_STRENGTH: f32 = 0.1;
const SHININESS: f32 = 32.0;

struct VertexInput {
    @location(0) aPos: vec3<f32>,
    @location(1) aNormal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) fragPos: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

fn normal_matrix(m: mat4x4<f32>) -> mat3x3<f32> {
    let a = m[0].xyz;
    let b = m[1].xyz;
    let c = m[2].xyz;
    let det = dot(a, cross(b, c));
    return mat3x3<f32>(cross(b, c), cross(c, a), cross(a, b)) * (1.0 / det);
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world = u.model * vec4<f32>(in.aPos, 1.0);
    out.fragPos = world.xyz;
    out.normal = normal_matrix(u.model) * in.aNormal;
    out.clip_position = vec4<f32>(world.xy, world.z * 0.5 + world.w * 0.5, world.w);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    var ambient = u.ambientStrength * u.lightColor;

    let norm = normalize(in.normal);
    let lightDir = normalize(u.lightPos - in.fragPos);
    let diff = max(dot(norm, lightDir), 0.0);
    var diffuse = diff * u.lightColor;

    let viewDir = normalize(VIEW_POS - in.fragPos);
    let reflectDir = reflect(-lightDir, norm);
    let spec = pow(max(dot(viewDir, reflectDir), 0.0), SHININESS);
    var specular = SPECULAR_STRENGTH * spec * u.lightColor;

    let theta = dot(lightDir, normalize(-viewDir));
    let epsilon = u.cutOff - u.outerCutOff;
    let intensity = clamp((theta - u.outerCutOff) / epsilon, 0.0, 1.0);
    diffuse = diffuse * intensity;
    specular = specular * intensity;

    let dist = length(VIEW_POS - in.fragPos);
    let attenuation = 1.0 / (1.0 + 0.09 * dist + 0.032 * (dist * dist));
    ambient = ambient * attenuation;
    diffuse = diffuse * attenuation;
    specular = specular * attenuation;

    let result = (ambient + diffuse + specular) * u.groundColor;
    return vec4<f32>(result, 1.0);
}
"#;
