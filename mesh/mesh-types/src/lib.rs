//! Mesh types for vertex normal recomputation.
//!
//! - [`Vertex`] - A vertex entry: position plus an optional normal
//! - [`IndexedMesh`] - Vertex entries and faces that index into them
//! - [`Triangle`] - A face with resolved corner positions
//!
//! # Vertex Entries
//!
//! Several entries may hold the exact same position. Exporters use this to
//! encode seams, where each side needs its own normal. Nothing here merges
//! duplicate entries.
//!
//! # Coordinate System
//!
//! Unit-agnostic `f64` coordinates. Faces wind counter-clockwise seen from
//! outside, so normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::split_unit_cube;
//!
//! let cube = split_unit_cube();
//! assert_eq!(cube.vertex_count(), 24);
//! assert!(cube.vertices.iter().all(|v| v.normal().is_none()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod mesh;
mod triangle;
mod vertex;

pub use mesh::{IndexedMesh, split_unit_cube, unit_cube};
pub use triangle::Triangle;
pub use vertex::{Vertex, VertexAttributes};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
