//! Per-vertex attributes kept apart from the topology.
//!
//! Normals and colors are written by whole-mesh passes (normal accumulation,
//! region highlighting). They are stored as plain arrays indexed by vertex id
//! so a pass only needs exclusive access to the array it writes.

use nalgebra::Vector3;

/// An RGB color with components in `[0, 1]`.
///
/// Only constructible through [`Color::new`] (which clamps) or the constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
}

impl Color {
    /// Default vertex color.
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Default highlight color for region classification.
    pub const RED: Color = Color {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };

    /// Create a color. Components are clamped to `[0, 1]`.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Red component.
    #[inline]
    pub fn r(self) -> f32 {
        self.r
    }

    /// Green component.
    #[inline]
    pub fn g(self) -> f32 {
        self.g
    }

    /// Blue component.
    #[inline]
    pub fn b(self) -> f32 {
        self.b
    }

    /// Components as `[r, g, b]`.
    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Normal and color arrays, one entry per vertex.
#[derive(Debug, Clone, Default)]
pub struct VertexAttributes {
    /// Accumulated, unnormalized vertex normals.
    pub normals: Vec<Vector3<f64>>,
    /// Vertex colors.
    pub colors: Vec<Color>,
}

impl VertexAttributes {
    /// Attributes for `n` vertices: zero normals, white colors.
    pub fn new(n: usize) -> Self {
        Self {
            normals: vec![Vector3::zeros(); n],
            colors: vec![Color::WHITE; n],
        }
    }

    /// Number of vertices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.normals.len()
    }

    /// `true` if no vertex is covered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.normals.is_empty()
    }

    /// Zero every normal accumulator.
    pub fn clear_normals(&mut self) {
        self.normals.fill(Vector3::zeros());
    }
}
