//! wgpu rendering for the dawn-to-dusk scene: device and surface setup, the
//! shared depth buffer, and the sun and ground passes.

pub mod buffer;
pub mod depth;
pub mod gpu;
pub mod ground_pipeline;
pub mod pass;
pub mod pipeline;
pub mod shader;
pub mod sun_pipeline;
pub mod surface;

pub use buffer::{BufferAllocator, GpuVertex, IndexedMesh, VertexMesh};
pub use depth::DepthBuffer;
pub use gpu::{
    RenderContext, RenderContextError, SurfaceError, init_render_context_blocking,
    log_uncaptured_errors, with_validation_scope,
};
pub use ground_pipeline::{GROUND_SHADER_SOURCE, GroundPass, GroundUniform};
pub use pass::{FrameEncoder, RenderPassBuilder, clear_color_from};
pub use shader::{DiagnosticSeverity, ShaderDiagnostic, ShaderLibrary};
pub use sun_pipeline::{SUN_SHADER_SOURCE, SunDiscWriter, SunPass, SunUniform};
pub use surface::{PhysicalSize, Viewport};

/// Headless device for GPU-backed unit tests; `None` when no adapter exists.
#[cfg(test)]
pub(crate) fn create_test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    pollster::block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok()?;

        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: Default::default(),
                ..Default::default()
            })
            .await
            .ok()
    })
}
