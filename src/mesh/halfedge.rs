//! Half-edge mesh data structure.
//!
//! Every input triangle owns exactly three half-edges, one per corner. A
//! half-edge starts at its corner vertex and runs to the next corner in the
//! triangle's winding order.
//!
//! - `next` walks the three half-edges of a face in a 3-cycle
//! - `opposite` is the half-edge of the neighbouring triangle that runs along
//!   the same undirected edge in the other direction
//! - each vertex stores one outgoing half-edge
//! - each face stores its first half-edge (the base)
//!
//! # Boundary Handling
//!
//! No extra half-edges are created for the outside of the surface. A
//! half-edge on the mesh boundary simply has no opposite. The same holds for
//! the third and later half-edges along a non-manifold edge, which are
//! listed by [`HalfEdgeMesh::non_manifold_edges`].

use nalgebra::{Point3, Vector3};

use super::attributes::{Color, VertexAttributes};
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// First emitted half-edge leaving this vertex.
    /// Invalid for vertices not used by any triangle.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create a new vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            halfedge: HalfEdgeId::invalid(),
        }
    }

    /// Create a new vertex from coordinates.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge originates from.
    pub origin: VertexId<I>,

    /// The face this half-edge belongs to.
    pub face: FaceId<I>,

    /// The next half-edge around the face, in input winding order.
    pub next: HalfEdgeId<I>,

    /// The half-edge running the other way along the same edge.
    /// Invalid on boundary and unmatched non-manifold edges.
    pub opposite: HalfEdgeId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create a half-edge with no links.
    pub fn new() -> Self {
        Self {
            origin: VertexId::invalid(),
            face: FaceId::invalid(),
            next: HalfEdgeId::invalid(),
            opposite: HalfEdgeId::invalid(),
        }
    }

    /// `true` if no opposite half-edge was found.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.opposite.is_valid()
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// A triangular face.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// Half-edge of the first corner of the input triangle.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a new face with the given base half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge }
    }
}

impl<I: MeshIndex> Default for Face<I> {
    fn default() -> Self {
        Self {
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

/// A half-edge mesh for triangle soups with recovered adjacency.
///
/// Built once by [`build`](super::build), then annotated in place by the
/// normal and region passes. Storage order of every arena is build order.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex<I>>,
    pub(crate) halfedges: Vec<HalfEdge<I>>,
    pub(crate) faces: Vec<Face<I>>,
    pub(crate) attributes: VertexAttributes,
    pub(crate) non_manifold: Vec<(VertexId<I>, VertexId<I>)>,
}

impl<I: MeshIndex> Default for HalfEdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            halfedges: Vec::new(),
            faces: Vec::new(),
            attributes: VertexAttributes::default(),
            non_manifold: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_faces * 3),
            faces: Vec::with_capacity(num_faces),
            attributes: VertexAttributes::default(),
            non_manifold: Vec::new(),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of half-edges. Always three per face.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    #[inline]
    pub(crate) fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Accumulated (unnormalized) normal of a vertex.
    #[inline]
    pub fn normal(&self, v: VertexId<I>) -> &Vector3<f64> {
        &self.attributes.normals[v.index()]
    }

    /// Unit normal of a vertex, or `None` when the accumulated normal is zero
    /// (isolated vertex, or only degenerate incident faces).
    pub fn unit_normal(&self, v: VertexId<I>) -> Option<Vector3<f64>> {
        self.normal(v).try_normalize(f64::EPSILON)
    }

    /// Color of a vertex.
    #[inline]
    pub fn color(&self, v: VertexId<I>) -> Color {
        self.attributes.colors[v.index()]
    }

    /// Set the color of a vertex.
    #[inline]
    pub fn set_color(&mut self, v: VertexId<I>, color: Color) {
        self.attributes.colors[v.index()] = color;
    }

    /// Per-vertex normal and color arrays.
    #[inline]
    pub fn attributes(&self) -> &VertexAttributes {
        &self.attributes
    }

    /// Undirected edges (smaller id first) used by more than two triangles,
    /// as found by the last opposite pass.
    #[inline]
    pub fn non_manifold_edges(&self) -> &[(VertexId<I>, VertexId<I>)] {
        &self.non_manifold
    }

    // ==================== Topology Queries ====================

    /// Get the next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the origin vertex of a half-edge.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).origin
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.origin(self.next(he))
    }

    /// Get the face of a half-edge.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Get the opposite half-edge, if the edge is shared with another face.
    #[inline]
    pub fn opposite(&self, he: HalfEdgeId<I>) -> Option<HalfEdgeId<I>> {
        self.halfedge(he).opposite.valid()
    }

    /// Check if a half-edge has no opposite.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Number of half-edges without an opposite.
    pub fn num_boundary_halfedges(&self) -> usize {
        self.halfedges.iter().filter(|he| he.is_boundary()).count()
    }

    /// `true` if every half-edge has an opposite.
    pub fn is_closed(&self) -> bool {
        self.halfedges.iter().all(|he| !he.is_boundary())
    }

    /// Faces sharing an edge with `f`, one slot per edge of the triangle.
    pub fn face_neighbors(&self, f: FaceId<I>) -> [Option<FaceId<I>>; 3] {
        let [h0, h1, h2] = self.face_halfedge_triple(f);
        [h0, h1, h2].map(|he| self.opposite(he).map(|o| self.face_of(o)))
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all vertices with their IDs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId<I>, &Vertex<I>)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all half-edges with their IDs.
    pub fn halfedges(&self) -> impl Iterator<Item = (HalfEdgeId<I>, &HalfEdge<I>)> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .map(|(i, he)| (HalfEdgeId::new(i), he))
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over all faces with their IDs.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId<I>, &Face<I>)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceId::new(i), f))
    }

    /// The three half-edges of a face, starting at its base.
    pub fn face_halfedge_triple(&self, f: FaceId<I>) -> [HalfEdgeId<I>; 3] {
        let he0 = self.face(f).halfedge;
        let he1 = self.next(he0);
        let he2 = self.next(he1);
        [he0, he1, he2]
    }

    /// Get the three vertices of a face, in winding order.
    pub fn face_triangle(&self, f: FaceId<I>) -> [VertexId<I>; 3] {
        self.face_halfedge_triple(f).map(|he| self.origin(he))
    }

    /// Get the positions of the three vertices of a face.
    pub fn face_positions(&self, f: FaceId<I>) -> [Point3<f64>; 3] {
        self.face_triangle(f).map(|v| *self.position(v))
    }

    // ==================== Geometry ====================

    /// Cross product of the two edges leaving the first corner of a face.
    ///
    /// Points along the right-hand normal of the winding order; its length is
    /// twice the triangle area. Zero for degenerate triangles.
    pub fn face_cross(&self, f: FaceId<I>) -> Vector3<f64> {
        let [p0, p1, p2] = self.face_positions(f);
        (p1 - p0).cross(&(p2 - p0))
    }

    /// Unit normal of a face, `None` for degenerate triangles.
    pub fn face_normal(&self, f: FaceId<I>) -> Option<Vector3<f64>> {
        self.face_cross(f).try_normalize(f64::EPSILON)
    }

    /// Compute the area of a face.
    pub fn face_area(&self, f: FaceId<I>) -> f64 {
        0.5 * self.face_cross(f).norm()
    }

    /// Compute the total surface area of the mesh.
    pub fn surface_area(&self) -> f64 {
        self.face_ids().map(|f| self.face_area(f)).sum()
    }

    /// Compute the bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?.position;
        let mut min = first;
        let mut max = first;

        for v in &self.vertices[1..] {
            for i in 0..3 {
                min[i] = min[i].min(v.position[i]);
                max[i] = max[i].max(v.position[i]);
            }
        }

        Some((min, max))
    }

    // ==================== Validation ====================

    /// Check that all connectivity is consistent.
    ///
    /// Verifies vertex half-edge origins, the 3-cycle of `next` inside each
    /// face, face back-links and the symmetry of `opposite`.
    pub fn is_valid(&self) -> bool {
        if self.attributes.len() != self.vertices.len()
            || self.halfedges.len() != self.faces.len() * 3
        {
            return false;
        }

        for (vid, v) in self.vertices() {
            if v.halfedge.is_valid() && self.halfedge(v.halfedge).origin != vid {
                return false;
            }
        }

        for (heid, he) in self.halfedges() {
            if !he.next.is_valid() || !he.face.is_valid() {
                return false;
            }
            if self.next(self.next(he.next)) != heid {
                return false;
            }
            if self.face_of(he.next) != he.face {
                return false;
            }
            if let Some(opp) = he.opposite.valid() {
                if opp == heid || self.halfedge(opp).opposite != heid {
                    return false;
                }
                // Opposites run along the same edge in reverse.
                if self.origin(opp) != self.dest(heid) || self.dest(opp) != he.origin {
                    return false;
                }
            }
        }

        for (fid, f) in self.faces() {
            if !f.halfedge.is_valid() || self.face_of(f.halfedge) != fid {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_creation() {
        let v = Vertex::<u32>::from_coords(1.0, 2.0, 3.0);
        assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
        assert!(!v.halfedge.is_valid());
    }

    #[test]
    fn test_new_halfedge_is_boundary() {
        let he = HalfEdge::<u32>::new();
        assert!(he.is_boundary());
        assert!(!he.next.is_valid());
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh::<u32>::new();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_halfedges(), 0);
        assert_eq!(mesh.num_faces(), 0);
        assert!(mesh.bounding_box().is_none());
        assert!(mesh.is_valid());
    }
}
