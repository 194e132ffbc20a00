//! Mesh algorithms.
//!
//! - [`region`]: bounding-box region selection and highlighting

pub mod region;

pub use region::{faces_in_region, find_region_faces, RegionBox, RegionOptions};
