//! Weighted vertex normal recomputation with smoothing-angle hard edges.
//!
//! This crate recomputes per-vertex normals for indexed triangle meshes.
//! Vertex entries that share a position (UV or material seams) see each
//! other's faces, so seams shade smoothly, while faces bent further than a
//! smoothing angle away are kept out to preserve hard edges.
//!
//! # Features
//!
//! - **Weighting modes**: Unweighted, area, corner angle, or area times angle
//! - **Smoothing angle**: Per-entry hard-edge test against a reference normal
//! - **Seam aware**: Entries at the same position are smoothed together
//! - **Pluggable matching**: Exact or grid-snapped position keys, or your own
//!   [`PositionKey`]
//! - **Overlay**: Segments and OBJ export for inspecting the result
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Other game engines
//!
//! # Example
//!
//! ```
//! use mesh_types::split_unit_cube;
//! use mesh_normals::{apply_normals, NormalParams, WeightingMode};
//!
//! // A cube with 4 entries per side, so every corner is a seam
//! let mut cube = split_unit_cube();
//!
//! // 30 degree smoothing angle keeps the 90 degree edges hard
//! let params = NormalParams::for_cad().with_mode(WeightingMode::AngleWeighted);
//! let summary = apply_normals(&mut cube, &params).unwrap();
//! println!("{}", summary);
//! ```
//!
//! # Algorithm
//!
//! 1. For each face, compute the unnormalized cross-product normal (its
//!    length is twice the area) and record it, normalized, as the reference
//!    normal of each of its corners; the last face wins
//! 2. Group vertex entries by position and collect every face touching
//!    the group
//! 3. For each entry, sum the group's faces whose normal lies within the
//!    smoothing angle of the entry's reference normal, weighted by mode
//! 4. Normalize each sum; empty or zero sums give a zero normal

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod face;
mod grouping;
mod overlay;
mod params;
mod recalc;
mod result;

// Re-export main types and functions
pub use error::{NormalsError, NormalsResult};
pub use face::{
    FaceNormals, angle_between_deg, compute_face_normals, corner_angle_deg, safe_normalize,
};
pub use grouping::{
    ExactPosition, GridPosition, GroupKey, PositionGroup, PositionGroups, PositionKey,
    split_vertex_counts,
};
pub use overlay::{NormalSegment, OverlaySettings, build_overlay, write_overlay_obj};
pub use params::{NormalParams, PositionMatching, WeightingMode};
pub use recalc::{
    NormalRecalculator, apply_normals, faces_from_indices, recalc_weighted_normals,
    recalculate_mesh_normals, recalculate_normals, recalculate_normals_with,
};
pub use result::{NormalsOutput, NormalsSummary};
