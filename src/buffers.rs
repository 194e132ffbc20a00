//! Flat vertex buffers for renderers.
//!
//! [`VertexBuffers`] is the only thing a renderer needs from a mesh: three
//! per-vertex float arrays and one index array, ready to upload as-is.

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeMesh, MeshIndex};

/// Parallel per-vertex arrays plus a triangle index list.
///
/// `positions`, `colors` and `normals` hold three floats per vertex in vertex
/// id order. `indices` holds three vertex ids per face in face order and
/// stored winding, so every index addresses the per-vertex arrays directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffers {
    /// `x, y, z` per vertex.
    pub positions: Vec<f32>,
    /// `r, g, b` per vertex, each in `[0, 1]`.
    pub colors: Vec<f32>,
    /// Accumulated, unnormalized normal per vertex.
    pub normals: Vec<f32>,
    /// Three vertex ids per triangle.
    pub indices: Vec<u32>,
}

impl VertexBuffers {
    /// Number of vertices described.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles described.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Convert a vertex id to a 32-bit buffer index.
fn buffer_index(index: usize) -> Result<u32> {
    u32::try_from(index).map_err(|_| {
        MeshError::invalid_param("vertex index", index, "does not fit a u32 index buffer")
    })
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Flatten the mesh into render buffers.
    ///
    /// Reflects the current state of the vertex attributes, including colors
    /// set by region highlighting.
    ///
    /// # Errors
    /// [`MeshError::InvalidParameter`] if a vertex id does not fit the `u32`
    /// index buffer, which can only happen with `u64` handles.
    ///
    /// # Example
    /// ```
    /// use hedgemesh::mesh::{build, HalfEdgeMesh};
    ///
    /// let coords = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let mesh: HalfEdgeMesh = build(&coords, &[0, 1, 2]).unwrap();
    /// let buffers = mesh.vertex_buffers().unwrap();
    ///
    /// assert_eq!(buffers.indices, vec![0, 1, 2]);
    /// assert_eq!(buffers.normals[6..9], [0.0, 0.0, 1.0]);
    /// ```
    pub fn vertex_buffers(&self) -> Result<VertexBuffers> {
        let n = self.num_vertices();
        let mut out = VertexBuffers {
            positions: Vec::with_capacity(n * 3),
            colors: Vec::with_capacity(n * 3),
            normals: Vec::with_capacity(n * 3),
            indices: Vec::with_capacity(self.num_faces() * 3),
        };

        for (v, vertex) in self.vertices() {
            let p = vertex.position;
            let nrm = self.normal(v);
            out.positions
                .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
            out.colors.extend_from_slice(&self.color(v).to_array());
            out.normals
                .extend_from_slice(&[nrm.x as f32, nrm.y as f32, nrm.z as f32]);
        }

        for f in self.face_ids() {
            for v in self.face_triangle(f) {
                out.indices.push(buffer_index(v.index())?);
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build, Color, VertexId};

    fn quad() -> HalfEdgeMesh {
        let coords = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 1.0, 0.5,
        ];
        build(&coords, &[0, 1, 2, 0, 2, 3]).unwrap()
    }

    #[test]
    fn test_buffer_lengths() {
        let mesh = quad();
        let b = mesh.vertex_buffers().unwrap();

        assert_eq!(b.vertex_count(), 4);
        assert_eq!(b.triangle_count(), 2);
        assert_eq!(b.positions.len(), 12);
        assert_eq!(b.colors.len(), 12);
        assert_eq!(b.normals.len(), 12);
        assert_eq!(b.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_positions_in_vertex_order() {
        let mesh = quad();
        let b = mesh.vertex_buffers().unwrap();

        for (v, vertex) in mesh.vertices() {
            let i = 3 * v.index();
            assert_eq!(b.positions[i], vertex.position.x as f32);
            assert_eq!(b.positions[i + 1], vertex.position.y as f32);
            assert_eq!(b.positions[i + 2], vertex.position.z as f32);
        }
    }

    #[test]
    fn test_indices_address_vertices() {
        let mesh = quad();
        let b = mesh.vertex_buffers().unwrap();
        assert!(b.indices.iter().all(|&i| (i as usize) < b.vertex_count()));
    }

    #[test]
    fn test_colors_reflect_mutation() {
        let mut mesh = quad();
        mesh.set_color(VertexId::new(2), Color::RED);
        let b = mesh.vertex_buffers().unwrap();

        assert_eq!(&b.colors[0..3], &[1.0, 1.0, 1.0]);
        assert_eq!(&b.colors[6..9], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normals_match_accumulators() {
        let mesh = quad();
        let b = mesh.vertex_buffers().unwrap();

        for v in mesh.vertex_ids() {
            let n = mesh.normal(v);
            let i = 3 * v.index();
            assert_eq!(&b.normals[i..i + 3], &[n.x as f32, n.y as f32, n.z as f32]);
        }
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh::<u32>::new();
        assert_eq!(mesh.vertex_buffers().unwrap(), VertexBuffers::default());
    }

    #[test]
    fn test_wide_handles_fit_when_small() {
        let coords = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let mesh: HalfEdgeMesh<u64> = build(&coords, &[0, 1, 2]).unwrap();
        assert_eq!(mesh.vertex_buffers().unwrap().indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_buffer_index_range() {
        assert_eq!(buffer_index(0).unwrap(), 0);
        assert_eq!(buffer_index(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_buffer_index_overflow_is_an_error() {
        let result = buffer_index(u32::MAX as usize + 1);
        assert!(matches!(
            result,
            Err(MeshError::InvalidParameter { name: "vertex index", .. })
        ));
    }
}
