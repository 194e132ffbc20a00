//! Error types for hedgemesh.
//!
//! Everything that can go wrong while building, classifying or loading a mesh
//! is reported through [`MeshError`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The coordinate sequence does not hold a whole number of `x, y, z` triples.
    #[error("coordinate buffer length {len} is not a multiple of 3")]
    MalformedCoords {
        /// Length of the coordinate buffer.
        len: usize,
    },

    /// A triangle references a vertex that does not exist.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// An undirected edge is used by more than two triangles.
    #[error("edge ({v0}, {v1}) has more than two incident faces")]
    NonManifoldEdge {
        /// Smaller vertex index of the edge.
        v0: usize,
        /// Larger vertex index of the edge.
        v1: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// OBJ text could not be parsed.
    #[error("invalid OBJ data: {0}")]
    Obj(#[from] tobj::LoadError),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = MeshError::InvalidVertexIndex { face: 2, vertex: 9 };
        assert_eq!(e.to_string(), "face 2 references invalid vertex index 9");

        let e = MeshError::NonManifoldEdge { v0: 1, v1: 4 };
        assert_eq!(e.to_string(), "edge (1, 4) has more than two incident faces");

        let e = MeshError::invalid_param("min.x", 3.0, "must be below max.x");
        assert_eq!(e.to_string(), "invalid parameter: min.x = 3 (must be below max.x)");
    }
}
