//! Indexed triangle mesh.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Triangle, Vertex};

/// A triangle mesh whose faces index into a list of vertex entries.
///
/// Faces are `[v0, v1, v2]` with counter-clockwise winding seen from
/// outside. Indices are not validated on construction; consumers check them
/// before use.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
///
/// let mesh = IndexedMesh::from_parts(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.indices(), vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex entries.
    pub vertices: Vec<Vertex>,

    /// Faces as indices into `vertices`.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create an empty mesh with room for the given counts.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from entries and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from flat `[x0, y0, z0, x1, ...]` coordinates and a
    /// flat `[a0, b0, c0, a1, ...]` index list.
    ///
    /// Returns `None` if either length is not a multiple of 3.
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Option<Self> {
        if positions.len() % 3 != 0 || indices.len() % 3 != 0 {
            return None;
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Vertex::from_coords(c[0], c[1], c[2]))
            .collect();
        let faces = indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        Some(Self { vertices, faces })
    }

    /// Number of vertex entries.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Resolve a face to its corner positions.
    ///
    /// `None` if the face or any of its indices is out of range.
    #[must_use]
    pub fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let [a, b, c] = *self.faces.get(face_index)?;
        Some(Triangle::new(
            self.vertices.get(a as usize)?.position,
            self.vertices.get(b as usize)?.position,
            self.vertices.get(c as usize)?.position,
        ))
    }

    /// Positions of all entries, in entry order.
    #[must_use]
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Stored normals of all entries, undefined ones as zero.
    #[must_use]
    pub fn normals(&self) -> Vec<Vector3<f64>> {
        self.vertices
            .iter()
            .map(|v| v.normal().unwrap_or_else(Vector3::zeros))
            .collect()
    }

    /// Faces flattened to a single index list.
    #[must_use]
    pub fn indices(&self) -> Vec<u32> {
        self.faces.iter().flatten().copied().collect()
    }
}

/// Unit cube from (0,0,0) to (1,1,1) with one entry per corner.
///
/// Every corner is shared by all faces around it, so there are no seams.
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let corners = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];
    let faces = vec![
        [0, 2, 1], // -Z
        [0, 3, 2],
        [4, 5, 6], // +Z
        [4, 6, 7],
        [0, 1, 5], // -Y
        [0, 5, 4],
        [3, 7, 6], // +Y
        [3, 6, 2],
        [0, 4, 7], // -X
        [0, 7, 3],
        [1, 2, 6], // +X
        [1, 6, 5],
    ];

    IndexedMesh::from_parts(corners.into_iter().map(Vertex::from).collect(), faces)
}

/// Unit cube where every side owns its four corner entries.
///
/// 24 entries over 8 positions, sides in -Z, +Z, -Y, +Y, -X, +X order.
/// This is how exporters encode a hard-edged cube.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn split_unit_cube() -> IndexedMesh {
    // Corners of each side, counter-clockwise seen from outside
    const SIDES: [[[f64; 3]; 4]; 6] = [
        [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
        [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
        [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
        [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
        [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
    ];

    let mut mesh = IndexedMesh::with_capacity(24, 12);
    for side in &SIDES {
        let base = mesh.vertices.len() as u32;
        mesh.vertices.extend(side.iter().copied().map(Vertex::from));
        mesh.faces.push([base, base + 1, base + 2]);
        mesh.faces.push([base, base + 2, base + 3]);
    }
    mesh
}
