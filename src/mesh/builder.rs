//! Mesh construction.
//!
//! Turns a flat triangle soup (a coordinate buffer and an index buffer, as
//! produced by a mesh loader) into a [`HalfEdgeMesh`], then recovers the
//! adjacency and per-vertex normals in three passes:
//!
//! 1. [`HalfEdgeMesh::compute_opposites`] pairs half-edges on shared edges
//! 2. [`HalfEdgeMesh::compute_vertex_halfedges`] gives every used vertex an
//!    outgoing half-edge
//! 3. [`HalfEdgeMesh::compute_normals`] accumulates face normals into the
//!    vertices

use std::collections::HashMap;

use nalgebra::Vector3;

use super::attributes::VertexAttributes;
use super::halfedge::{Face, HalfEdge, HalfEdgeMesh, Vertex};
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// What to do when an edge is shared by more than two triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonManifoldPolicy {
    /// Pair the first two half-edges, leave the rest without an opposite,
    /// record the edge and log a warning.
    #[default]
    Warn,
    /// Fail the build with [`MeshError::NonManifoldEdge`].
    Reject,
}

/// Options for [`build_with_options`].
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Handling of edges with more than two incident triangles.
    pub non_manifold: NonManifoldPolicy,
}

impl BuildOptions {
    /// Set the non-manifold edge policy.
    pub fn with_non_manifold(mut self, policy: NonManifoldPolicy) -> Self {
        self.non_manifold = policy;
        self
    }

    /// Shorthand for rejecting non-manifold input.
    pub fn strict() -> Self {
        Self::default().with_non_manifold(NonManifoldPolicy::Reject)
    }
}

/// Build a half-edge mesh from flat vertex and triangle buffers.
///
/// `coords` holds one `x, y, z` triple per vertex; vertex `i` gets id `i`.
/// `triangles` holds one triple of vertex indices per face, in winding order.
/// Trailing indices that do not form a whole triangle are ignored. Every index
/// is checked before any half-edge is created.
///
/// Non-manifold edges are tolerated and logged; use [`build_with_options`]
/// with [`BuildOptions::strict`] to reject them instead.
///
/// # Example
/// ```
/// use hedgemesh::mesh::{build, HalfEdgeMesh};
///
/// let coords = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let mesh: HalfEdgeMesh = build(&coords, &[0, 1, 2]).unwrap();
///
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// assert_eq!(mesh.num_halfedges(), 3);
/// ```
pub fn build<T, I>(coords: &[T], triangles: &[usize]) -> Result<HalfEdgeMesh<I>>
where
    T: Copy + Into<f64>,
    I: MeshIndex,
{
    build_with_options(coords, triangles, &BuildOptions::default())
}

/// Build a half-edge mesh from flat buffers with explicit options.
///
/// See [`build`].
pub fn build_with_options<T, I>(
    coords: &[T],
    triangles: &[usize],
    options: &BuildOptions,
) -> Result<HalfEdgeMesh<I>>
where
    T: Copy + Into<f64>,
    I: MeshIndex,
{
    if coords.len() % 3 != 0 {
        return Err(MeshError::MalformedCoords { len: coords.len() });
    }

    let num_vertices = coords.len() / 3;
    let tris = &triangles[..triangles.len() - triangles.len() % 3];
    let num_faces = tris.len() / 3;

    if num_vertices > I::capacity() {
        return Err(MeshError::invalid_param(
            "vertex count",
            num_vertices,
            "too many vertices for the mesh index type",
        ));
    }
    if tris.len() > I::capacity() {
        return Err(MeshError::invalid_param(
            "half-edge count",
            tris.len(),
            "too many triangles for the mesh index type",
        ));
    }

    for (fi, tri) in tris.chunks_exact(3).enumerate() {
        if let Some(&vi) = tri.iter().find(|&&vi| vi >= num_vertices) {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
        }
    }

    let mut mesh = HalfEdgeMesh::with_capacity(num_vertices, num_faces);

    for c in coords.chunks_exact(3) {
        mesh.vertices
            .push(Vertex::from_coords(c[0].into(), c[1].into(), c[2].into()));
    }
    mesh.attributes = VertexAttributes::new(num_vertices);

    for tri in tris.chunks_exact(3) {
        let base = mesh.halfedges.len();
        let face_id = FaceId::<I>::new(mesh.faces.len());
        mesh.faces.push(Face::new(HalfEdgeId::new(base)));

        for (corner, &vi) in tri.iter().enumerate() {
            mesh.halfedges.push(HalfEdge {
                origin: VertexId::new(vi),
                face: face_id,
                next: HalfEdgeId::new(base + (corner + 1) % 3),
                opposite: HalfEdgeId::invalid(),
            });
        }
    }

    mesh.compute_opposites(options.non_manifold)?;
    mesh.compute_vertex_halfedges();
    mesh.compute_normals();

    log::debug!(
        "built half-edge mesh: {} vertices, {} faces, {} boundary half-edges, {} non-manifold edges",
        mesh.num_vertices(),
        mesh.num_faces(),
        mesh.num_boundary_halfedges(),
        mesh.non_manifold.len()
    );

    Ok(mesh)
}

/// Pairing state of one undirected edge during [`HalfEdgeMesh::compute_opposites`].
#[derive(Clone, Copy)]
enum EdgeSlot<I: MeshIndex> {
    /// Seen once; waiting for its opposite.
    Open(HalfEdgeId<I>),
    /// Two half-edges linked.
    Paired,
    /// A third half-edge showed up; already reported.
    NonManifold,
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Link every half-edge to the half-edge running along the same undirected
    /// edge in another face.
    ///
    /// Half-edges are visited in storage order. The first two half-edges found
    /// on an undirected edge become mutual opposites; a third or later one is
    /// left unmatched and the edge is added to
    /// [`non_manifold_edges`](Self::non_manifold_edges). Half-edges whose ends
    /// coincide are never paired, and neither are two half-edges of the same
    /// face. Existing links are cleared first, so the pass can be re-run.
    ///
    /// With [`NonManifoldPolicy::Reject`] the pairing is planned before
    /// anything is written: on error the mesh is left exactly as it was.
    pub fn compute_opposites(&mut self, policy: NonManifoldPolicy) -> Result<()> {
        let mut slots: HashMap<(usize, usize), EdgeSlot<I>> =
            HashMap::with_capacity(self.halfedges.len());
        let mut pairs: Vec<(HalfEdgeId<I>, HalfEdgeId<I>)> =
            Vec::with_capacity(self.halfedges.len() / 2);
        let mut non_manifold: Vec<(VertexId<I>, VertexId<I>)> = Vec::new();

        for i in 0..self.halfedges.len() {
            let he = HalfEdgeId::<I>::new(i);
            let a = self.origin(he).index();
            let b = self.dest(he).index();
            if a == b {
                continue;
            }
            let key = (a.min(b), a.max(b));

            match slots.get(&key).copied() {
                None => {
                    slots.insert(key, EdgeSlot::Open(he));
                }
                Some(EdgeSlot::Open(first)) => {
                    if self.face_of(first) == self.face_of(he) {
                        continue;
                    }
                    pairs.push((first, he));
                    slots.insert(key, EdgeSlot::Paired);
                }
                Some(EdgeSlot::Paired) => {
                    if policy == NonManifoldPolicy::Reject {
                        return Err(MeshError::NonManifoldEdge { v0: key.0, v1: key.1 });
                    }
                    non_manifold.push((VertexId::new(key.0), VertexId::new(key.1)));
                    slots.insert(key, EdgeSlot::NonManifold);
                }
                Some(EdgeSlot::NonManifold) => {}
            }
        }

        for he in &mut self.halfedges {
            he.opposite = HalfEdgeId::invalid();
        }
        for (first, second) in pairs {
            self.halfedge_mut(first).opposite = second;
            self.halfedge_mut(second).opposite = first;
        }
        for (v0, v1) in &non_manifold {
            log::warn!(
                "edge ({}, {}) is shared by more than two faces; extra half-edges left unpaired",
                v0.index(),
                v1.index()
            );
        }
        self.non_manifold = non_manifold;

        Ok(())
    }

    /// Give every vertex the first half-edge, in storage order, that leaves it.
    ///
    /// A handle that is already set is kept. Vertices not referenced by any
    /// triangle stay without a half-edge.
    pub fn compute_vertex_halfedges(&mut self) {
        for (i, he) in self.halfedges.iter().enumerate() {
            let v = &mut self.vertices[he.origin.index()];
            if !v.halfedge.is_valid() {
                v.halfedge = HalfEdgeId::new(i);
            }
        }
    }

    /// Accumulate face normals into vertex normals.
    ///
    /// Each face adds `(p1 - p0) x (p2 - p0)` to the normal of its three
    /// corners, so vertex normals end up as the area-weighted sum of incident
    /// face normals. Nothing is normalized; degenerate faces add zero.
    /// Accumulators are zeroed first.
    pub fn compute_normals(&mut self) {
        self.attributes.clear_normals();

        for f in 0..self.faces.len() {
            let f = FaceId::<I>::new(f);
            let n: Vector3<f64> = self.face_cross(f);
            for v in self.face_triangle(f) {
                self.attributes.normals[v.index()] += n;
            }
        }
    }
}
