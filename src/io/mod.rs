//! Mesh file I/O.
//!
//! Only Wavefront OBJ is supported. [`load`] and [`save`] check the file
//! extension and dispatch to [`obj`].
//!
//! ```no_run
//! use hedgemesh::io::{load, save};
//! use hedgemesh::mesh::HalfEdgeMesh;
//!
//! let mesh: HalfEdgeMesh = load("bunny.obj").unwrap();
//! save(&mesh, "bunny_colored.obj").unwrap();
//! ```

pub mod obj;

use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeMesh, MeshIndex};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Format> {
        let path = path.as_ref();
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
            .ok_or_else(|| MeshError::UnsupportedFormat {
                extension: path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("(none)")
                    .to_string(),
            })
    }
}

/// Load a mesh from a file with automatic format detection.
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<HalfEdgeMesh<I>> {
    let path = path.as_ref();
    match Format::from_path(path)? {
        Format::Obj => obj::load(path),
    }
}

/// Save a mesh to a file with automatic format detection.
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &HalfEdgeMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    match Format::from_path(path)? {
        Format::Obj => obj::save(mesh, path),
    }
}
