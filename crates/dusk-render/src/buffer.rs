//! Vertex, index and uniform buffer creation.

use dusk_sky::{GroundVertex, SunVertex};

/// Vertex types with a fixed GPU buffer layout.
pub trait GpuVertex: bytemuck::Pod {
    fn layout() -> wgpu::VertexBufferLayout<'static>;
}

impl GpuVertex for SunVertex {
    /// `@location(0) aPos: vec3<f32>`, 12-byte stride.
    fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SunVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

impl GpuVertex for GroundVertex {
    /// `@location(0) aPos`, `@location(1) aNormal`, both `vec3<f32>`, 24-byte stride.
    fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GroundVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Vertex buffer drawn without indices, possibly only a prefix of it.
pub struct VertexMesh {
    pub vertex_buffer: wgpu::Buffer,
    /// Vertices actually drawn, starting at 0.
    pub draw_count: u32,
}

impl VertexMesh {
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.draw_count, 0..1);
    }
}

/// Vertex buffer paired with a static u16 index buffer.
pub struct IndexedMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl IndexedMesh {
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// GPU buffer allocator for creating vertex, index and uniform buffers.
pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> BufferAllocator<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    /// Upload `vertices` once and draw the first `draw_count` of them.
    pub fn create_vertex_mesh<V: GpuVertex>(
        &self,
        label: &str,
        vertices: &[V],
        draw_count: u32,
    ) -> VertexMesh {
        let vertex_count = vertices.len() as u32;
        VertexMesh {
            vertex_buffer: self.create_vertex_buffer(label, bytemuck::cast_slice(vertices)),
            draw_count: draw_count.min(vertex_count),
        }
    }

    /// Vertex buffer initialised with `vertices` that can be overwritten in
    /// place with `Queue::write_buffer`, plus a static index buffer.
    pub fn create_indexed_mesh<V: GpuVertex>(
        &self,
        label: &str,
        vertices: &[V],
        indices: &[u16],
    ) -> IndexedMesh {
        IndexedMesh {
            vertex_buffer: self
                .create_vertex_buffer(&format!("{label}-vertices"), bytemuck::cast_slice(vertices)),
            index_buffer: self.create_index_buffer_u16(&format!("{label}-indices"), indices),
            index_count: indices.len() as u32,
        }
    }

    /// Vertex buffer from raw bytes. Always writable with `write_buffer`.
    pub fn create_vertex_buffer(&self, label: &str, data: &[u8]) -> wgpu::Buffer {
        use wgpu::util::DeviceExt;

        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: data,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            })
    }

    pub fn create_index_buffer_u16(&self, label: &str, data: &[u16]) -> wgpu::Buffer {
        use wgpu::util::DeviceExt;

        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::INDEX,
            })
    }

    /// Uniform buffer holding one `T`, rewritten every frame.
    pub fn create_uniform_buffer<T: bytemuck::Pod>(&self, label: &str, initial: &T) -> wgpu::Buffer {
        use wgpu::util::DeviceExt;

        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::bytes_of(initial),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_test_device;
    use dusk_sky::{
        GROUND_DRAW_VERTICES, GroundMesh, SUN_DISC_VERTICES, SunDisc, fan_to_triangle_list,
    };

    #[test]
    fn test_sun_vertex_layout() {
        let layout = SunVertex::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, 0);
    }

    #[test]
    fn test_ground_vertex_layout() {
        let layout = GroundVertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }

    #[test]
    fn test_ground_mesh_draws_prefix() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let allocator = BufferAllocator::new(&device);
        let mesh = GroundMesh::new();
        let buffer = allocator.create_vertex_mesh("ground", mesh.vertices(), GROUND_DRAW_VERTICES);

        assert_eq!(buffer.draw_count, 6);
        assert_eq!(buffer.vertex_buffer.size(), 12 * 24);
    }

    #[test]
    fn test_draw_count_clamped_to_buffer() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let allocator = BufferAllocator::new(&device);
        let mesh = GroundMesh::new();
        let buffer = allocator.create_vertex_mesh("ground", mesh.vertices(), 100);
        assert_eq!(buffer.draw_count, 12);
    }

    #[test]
    fn test_sun_mesh_sizes() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let allocator = BufferAllocator::new(&device);
        let disc = SunDisc::new();
        let indices = fan_to_triangle_list(SUN_DISC_VERTICES);
        let mesh = allocator.create_indexed_mesh("sun", disc.vertices(), &indices);

        assert_eq!(mesh.index_count, 360 * 3);
        assert_eq!(mesh.vertex_buffer.size(), (SUN_DISC_VERTICES * 12) as u64);
        assert!(
            mesh.vertex_buffer
                .usage()
                .contains(wgpu::BufferUsages::COPY_DST)
        );
    }

    #[test]
    fn test_uniform_buffer_usage() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let allocator = BufferAllocator::new(&device);
        let buffer = allocator.create_uniform_buffer("u", &[0.0f32; 4]);
        assert_eq!(buffer.size(), 16);
        assert!(buffer.usage().contains(wgpu::BufferUsages::UNIFORM));
    }
}
