//! # hedgemesh
//!
//! Half-edge construction for triangle soups, built for mesh viewers.
//!
//! A loader hands over two flat buffers (vertex coordinates and triangle
//! indices). hedgemesh turns them into a [`HalfEdgeMesh`](mesh::HalfEdgeMesh),
//! recovers which triangles share an edge, accumulates per-vertex normals,
//! optionally paints a region of interest, and flattens everything back into
//! the [`VertexBuffers`](buffers::VertexBuffers) a renderer uploads.
//!
//! ## Features
//!
//! - **Half-edge data structure**: arena storage with type-safe handles
//! - **Adjacency recovery**: opposite half-edges paired across the whole mesh,
//!   with non-manifold edges detected and reported
//! - **Vertex normals**: unnormalized sums of incident face normals
//! - **Region highlighting**: axis-aligned box selection of faces
//! - **OBJ I/O**: read `v`/`vn`/`f` records, write colored OBJ
//!
//! ## Quick Start
//!
//! ```
//! use hedgemesh::prelude::*;
//!
//! // A tetrahedron
//! let coords = [
//!     0.0, 0.0, 0.0,
//!     1.0, 0.0, 0.0,
//!     0.5, 1.0, 0.0,
//!     0.5, 0.5, 1.0,
//! ];
//! let triangles = [0, 2, 1, 0, 1, 3, 1, 2, 3, 2, 0, 3];
//!
//! let mut mesh: HalfEdgeMesh = build(&coords, &triangles).unwrap();
//! assert!(mesh.is_closed());
//!
//! let faces = find_region_faces(&mut mesh, &RegionOptions::default());
//! let buffers = mesh.vertex_buffers().unwrap();
//!
//! assert_eq!(buffers.vertex_count(), 4);
//! assert_eq!(buffers.triangle_count(), 4);
//! # let _ = faces;
//! ```
//!
//! ## Loading Files
//!
//! ```no_run
//! use hedgemesh::prelude::*;
//!
//! let mut mesh: HalfEdgeMesh = hedgemesh::io::load("bunny.obj").unwrap();
//! let ear = find_region_faces(&mut mesh, &RegionOptions::default());
//! println!("{} faces highlighted", ear.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod buffers;
pub mod error;
pub mod io;
pub mod mesh;

pub use error::{MeshError, Result};

/// Prelude module for convenient imports.
///
/// ```
/// use hedgemesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::region::{find_region_faces, RegionBox, RegionOptions};
    pub use crate::buffers::VertexBuffers;
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build, build_with_options, BuildOptions, Color, Face, FaceId, HalfEdge, HalfEdgeId,
        HalfEdgeMesh, MeshIndex, NonManifoldPolicy, Vertex, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::{Point3, Vector3};

    fn tetrahedron() -> HalfEdgeMesh {
        let coords = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.5, 1.0, 0.0, //
            0.5, 0.5, 1.0,
        ];
        build(&coords, &[0, 2, 1, 0, 1, 3, 1, 2, 3, 2, 0, 3]).unwrap()
    }

    #[test]
    fn test_tetrahedron() {
        let mesh = tetrahedron();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.num_halfedges(), 12);
        assert!(mesh.is_valid());
        assert!(mesh.is_closed());

        for he in mesh.halfedge_ids() {
            let opp = mesh.opposite(he).unwrap();
            assert_ne!(opp, he);
            assert_eq!(mesh.opposite(opp), Some(he));
            assert_eq!(mesh.next(mesh.next(mesh.next(he))), he);
        }
    }

    #[test]
    fn test_tetrahedron_normals_point_outward() {
        let mesh = tetrahedron();
        let centroid = Point3::new(0.5, 0.375, 0.25);

        for (v, vertex) in mesh.vertices() {
            let outward: Vector3<f64> = vertex.position - centroid;
            assert!(mesh.normal(v).dot(&outward) > 0.0, "vertex {:?}", v);
        }
    }

    #[test]
    fn test_full_pipeline() {
        let mut mesh = tetrahedron();
        let region = RegionBox::new(Point3::new(-0.1, -0.1, -0.1), Point3::new(1.1, 1.1, 0.1)).unwrap();
        let faces = find_region_faces(&mut mesh, &RegionOptions::default().with_region(region));

        // Only the bottom face lies in the z < 0.1 slab.
        assert_eq!(faces, vec![FaceId::new(0)]);

        let buffers = mesh.vertex_buffers().unwrap();
        assert_eq!(buffers.indices[0..3], [0, 2, 1]);
        assert_eq!(buffers.colors[0..3], [1.0, 0.0, 0.0]);
        assert_eq!(buffers.colors[9..12], [1.0, 1.0, 1.0]);
        for (v, vertex) in mesh.vertices() {
            let i = 3 * v.index();
            assert_eq!(buffers.positions[i], vertex.position.x as f32);
            assert_eq!(buffers.positions[i + 1], vertex.position.y as f32);
            assert_eq!(buffers.positions[i + 2], vertex.position.z as f32);
        }
    }
}
