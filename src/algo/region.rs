//! Region-of-interest highlighting.
//!
//! A face belongs to the region when all three of its corners lie strictly
//! inside an axis-aligned box. Highlighting paints the corners of every such
//! face; vertices are never un-painted, so a vertex shared with a face
//! outside the box keeps the highlight.
//!
//! # Example
//!
//! ```
//! use hedgemesh::prelude::*;
//! use hedgemesh::algo::region::{find_region_faces, RegionBox, RegionOptions};
//! use nalgebra::Point3;
//!
//! let coords = [0.1, 0.1, 0.1, 0.9, 0.1, 0.1, 0.1, 0.9, 0.1, 5.0, 5.0, 5.0];
//! let mut mesh: HalfEdgeMesh = build(&coords, &[0, 1, 2, 1, 3, 2]).unwrap();
//!
//! let region = RegionBox::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).unwrap();
//! let faces = find_region_faces(&mut mesh, &RegionOptions::default().with_region(region));
//!
//! assert_eq!(faces, vec![FaceId::new(0)]);
//! assert_eq!(mesh.color(VertexId::new(0)), Color::RED);
//! assert_eq!(mesh.color(VertexId::new(3)), Color::WHITE);
//! ```

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{Color, FaceId, HalfEdgeMesh, MeshIndex};

/// An open axis-aligned box: points on the faces of the box are outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBox {
    min: Point3<f64>,
    max: Point3<f64>,
}

impl RegionBox {
    /// Create a box from its two corners.
    ///
    /// Fails unless `min` is strictly below `max` on every axis.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Result<Self> {
        const AXES: [&str; 3] = ["x", "y", "z"];
        for axis in 0..3 {
            if !(min[axis] < max[axis]) {
                return Err(MeshError::InvalidParameter {
                    name: "region",
                    value: format!("{} in ({}, {})", AXES[axis], min[axis], max[axis]),
                    reason: "lower bound must be below upper bound",
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Lower corner.
    #[inline]
    pub fn min(&self) -> Point3<f64> {
        self.min
    }

    /// Upper corner.
    #[inline]
    pub fn max(&self) -> Point3<f64> {
        self.max
    }

    /// `true` if `p` is strictly inside on all three axes.
    #[inline]
    pub fn contains(&self, p: &Point3<f64>) -> bool {
        (0..3).all(|i| p[i] > self.min[i] && p[i] < self.max[i])
    }
}

impl Default for RegionBox {
    /// The ear of the reference bunny model, in its local frame.
    fn default() -> Self {
        Self {
            min: Point3::new(-1.59, 1.88, -2.0),
            max: Point3::new(0.0, 3.0, 0.2),
        }
    }
}

/// Options for [`find_region_faces`].
#[derive(Debug, Clone)]
pub struct RegionOptions {
    /// Box selecting the faces.
    pub region: RegionBox,

    /// Color painted on the corners of selected faces.
    pub highlight: Color,
}

impl Default for RegionOptions {
    fn default() -> Self {
        Self {
            region: RegionBox::default(),
            highlight: Color::RED,
        }
    }
}

impl RegionOptions {
    /// Set the selection box.
    pub fn with_region(mut self, region: RegionBox) -> Self {
        self.region = region;
        self
    }

    /// Set the highlight color.
    pub fn with_highlight(mut self, color: Color) -> Self {
        self.highlight = color;
        self
    }
}

/// Faces whose three corners all lie strictly inside `region`, in face order.
pub fn faces_in_region<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, region: &RegionBox) -> Vec<FaceId<I>> {
    mesh.face_ids()
        .filter(|&f| mesh.face_positions(f).iter().all(|p| region.contains(p)))
        .collect()
}

/// Select the faces inside the region and paint their corners.
///
/// Returns the selected faces in face order. Colors of vertices outside the
/// selection are left untouched, so running this twice gives the same faces
/// and the same colors as running it once.
pub fn find_region_faces<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    options: &RegionOptions,
) -> Vec<FaceId<I>> {
    let faces = faces_in_region(mesh, &options.region);

    for &f in &faces {
        for v in mesh.face_triangle(f) {
            mesh.set_color(v, options.highlight);
        }
    }

    log::debug!(
        "region {:?}..{:?}: {} of {} faces selected",
        options.region.min,
        options.region.max,
        faces.len(),
        mesh.num_faces()
    );

    faces
}
