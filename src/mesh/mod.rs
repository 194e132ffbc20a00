//! Core mesh data structures.
//!
//! The primary type is [`HalfEdgeMesh`], a half-edge representation of a
//! triangle soup. Vertices, half-edges and faces live in arenas and refer to
//! each other through the typed handles [`VertexId`], [`HalfEdgeId`] and
//! [`FaceId`]. Per-vertex normals and colors are stored separately in
//! [`VertexAttributes`].
//!
//! # Construction
//!
//! Meshes are built from the flat buffers a loader produces:
//!
//! ```
//! use hedgemesh::mesh::{build, HalfEdgeMesh, VertexId};
//! use nalgebra::Vector3;
//!
//! let coords = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
//! let mesh: HalfEdgeMesh = build(&coords, &[0, 1, 2]).unwrap();
//!
//! assert_eq!(*mesh.normal(VertexId::new(0)), Vector3::new(0.0, 0.0, 1.0));
//! ```

mod attributes;
mod builder;
mod halfedge;
mod index;

pub use attributes::{Color, VertexAttributes};
pub use builder::{build, build_with_options, BuildOptions, NonManifoldPolicy};
pub use halfedge::{Face, HalfEdge, HalfEdgeMesh, Vertex};
pub use index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
