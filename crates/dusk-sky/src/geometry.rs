//! CPU-side vertex data: the per-frame sun fan and the static ground/sky quads.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::shading::VIEW_POS;

/// Sun fan length: 361 rim samples plus one closing vertex.
pub const SUN_DISC_VERTICES: usize = 362;

/// Ground (2 triangles) followed by sky backdrop (2 triangles).
pub const GROUND_MESH_VERTICES: usize = 12;

/// Only the ground triangles are drawn; the sky backdrop stays resident.
pub const GROUND_DRAW_VERTICES: u32 = 6;

/// Position-only vertex of the sun disc, 12 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SunVertex {
    pub position: [f32; 3],
}

/// Ground vertex with a face normal, 24 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GroundVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Fixed-size sun fan buffer.
///
/// Vertex order is the fan: vertex 0 is the pivot (itself a rim point) and
/// each following vertex opens one more triangle.
#[derive(Clone, Debug, PartialEq)]
pub struct SunDisc {
    vertices: Vec<SunVertex>,
}

impl Default for SunDisc {
    fn default() -> Self {
        Self::new()
    }
}

impl SunDisc {
    /// Allocate a zeroed disc of [`SUN_DISC_VERTICES`] entries.
    pub fn new() -> Self {
        Self {
            vertices: vec![SunVertex::default(); SUN_DISC_VERTICES],
        }
    }

    pub fn vertices(&self) -> &[SunVertex] {
        &self.vertices
    }

    /// Mutable access to the existing slots. The length cannot change.
    pub fn vertices_mut(&mut self) -> &mut [SunVertex] {
        &mut self.vertices
    }
}

/// Index list that draws a triangle fan of `vertex_count` vertices as a
/// plain triangle list: `(0, i, i + 1)` for every `i` in `1..vertex_count - 1`.
pub fn fan_to_triangle_list(vertex_count: usize) -> Vec<u16> {
    if vertex_count < 3 {
        return Vec::new();
    }
    (1..vertex_count - 1)
        .flat_map(|i| [0, i as u16, (i + 1) as u16])
        .collect()
}

/// The static ground plane and sky backdrop.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundMesh {
    vertices: [GroundVertex; GROUND_MESH_VERTICES],
}

impl Default for GroundMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl GroundMesh {
    /// Build the twelve vertices in draw order.
    ///
    /// The ground slopes from `y = -1` at the near edge to the horizon at
    /// `y = 0` on the far plane. The sky quad sits just inside the far plane
    /// above the horizon. Normals are per face, turned toward [`VIEW_POS`].
    pub fn new() -> Self {
        const SKY_Z: f32 = 0.99999;
        let triangles: [[Vec3; 3]; 4] = [
            [
                Vec3::new(1.0, -1.0, -1.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(-1.0, -1.0, -1.0),
            ],
            [
                Vec3::new(-1.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(-1.0, -1.0, -1.0),
            ],
            [
                Vec3::new(1.0, 1.0, SKY_Z),
                Vec3::new(1.0, 0.0, SKY_Z),
                Vec3::new(-1.0, 1.0, SKY_Z),
            ],
            [
                Vec3::new(-1.0, 1.0, SKY_Z),
                Vec3::new(1.0, 0.0, SKY_Z),
                Vec3::new(-1.0, 0.0, SKY_Z),
            ],
        ];

        let mut vertices = [GroundVertex::default(); GROUND_MESH_VERTICES];
        for (t, tri) in triangles.iter().enumerate() {
            let normal = face_normal_toward(tri, VIEW_POS);
            for (v, corner) in tri.iter().enumerate() {
                vertices[t * 3 + v] = GroundVertex {
                    position: corner.to_array(),
                    normal: normal.to_array(),
                };
            }
        }
        Self { vertices }
    }

    pub fn vertices(&self) -> &[GroundVertex] {
        &self.vertices
    }
}

fn face_normal_toward(tri: &[Vec3; 3], eye: Vec3) -> Vec3 {
    let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize();
    if n.dot(eye - tri[0]) < 0.0 { -n } else { n }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_sizes_match_gpu_strides() {
        assert_eq!(std::mem::size_of::<SunVertex>(), 12);
        assert_eq!(std::mem::size_of::<GroundVertex>(), 24);
        assert_eq!(std::mem::offset_of!(GroundVertex, normal), 12);
    }

    #[test]
    fn test_disc_byte_length() {
        let disc = SunDisc::new();
        assert_eq!(
            bytemuck::cast_slice::<SunVertex, u8>(disc.vertices()).len(),
            SUN_DISC_VERTICES * 12
        );
    }

    #[test]
    fn test_fan_indices_pivot_on_first_vertex() {
        let indices = fan_to_triangle_list(SUN_DISC_VERTICES);
        assert_eq!(indices.len(), (SUN_DISC_VERTICES - 2) * 3);
        assert!(indices.chunks(3).all(|tri| tri[0] == 0));
        assert_eq!(&indices[..3], &[0, 1, 2]);
        assert_eq!(&indices[indices.len() - 3..], &[0, 360, 361]);
    }

    #[test]
    fn test_fan_indices_for_degenerate_counts() {
        assert!(fan_to_triangle_list(0).is_empty());
        assert!(fan_to_triangle_list(2).is_empty());
        assert_eq!(fan_to_triangle_list(3), vec![0, 1, 2]);
    }

    #[test]
    fn test_ground_mesh_layout() {
        let mesh = GroundMesh::new();
        assert_eq!(mesh.vertices().len(), GROUND_MESH_VERTICES);
        assert_eq!(mesh.vertices()[0].position, [1.0, -1.0, -1.0]);
        assert_eq!(mesh.vertices()[11].position, [-1.0, 0.0, 0.99999]);
    }

    #[test]
    fn test_ground_normal_faces_viewer() {
        let mesh = GroundMesh::new();
        let expected = Vec3::new(0.0, 2.0, -1.0).normalize();
        for v in &mesh.vertices()[..GROUND_DRAW_VERTICES as usize] {
            let n = Vec3::from_array(v.normal);
            assert!((n - expected).length() < 1e-6, "ground normal {n:?}");
        }
    }

    #[test]
    fn test_sky_normal_points_at_camera() {
        let mesh = GroundMesh::new();
        for v in &mesh.vertices()[GROUND_DRAW_VERTICES as usize..] {
            let n = Vec3::from_array(v.normal);
            assert!((n - Vec3::NEG_Z).length() < 1e-6, "sky normal {n:?}");
        }
    }
}
