//! Vertex entries.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-entry shading data.
///
/// A `None` normal is undefined: the entry has not been shaded yet, or no
/// face around it produced a usable direction.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexAttributes {
    /// Unit normal.
    pub normal: Option<Vector3<f64>>,
}

/// One vertex entry of an indexed mesh.
///
/// Entries are not positions: a seam is two or more entries at the same
/// position, each free to carry its own normal.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Vector3, Vertex};
///
/// let plain = Vertex::from_coords(1.0, 2.0, 3.0);
/// assert!(plain.normal().is_none());
///
/// let shaded = Vertex::with_normal(Point3::new(1.0, 2.0, 3.0), Vector3::z());
/// assert_eq!(plain.position, shaded.position);
/// assert_eq!(shaded.normal(), Some(Vector3::z()));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in mesh units.
    pub position: Point3<f64>,

    /// Shading data.
    pub attributes: VertexAttributes,
}

impl Vertex {
    /// Create an unshaded entry.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            attributes: VertexAttributes { normal: None },
        }
    }

    /// Create an unshaded entry from raw coordinates.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Create an entry with a known normal.
    #[inline]
    #[must_use]
    pub const fn with_normal(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            position,
            attributes: VertexAttributes {
                normal: Some(normal),
            },
        }
    }

    /// The stored normal, if defined.
    #[inline]
    #[must_use]
    pub const fn normal(&self) -> Option<Vector3<f64>> {
        self.attributes.normal
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_is_unshaded() {
        let v = Vertex::from_coords(1.0, -2.0, 0.5);
        assert_eq!(v.position, Point3::new(1.0, -2.0, 0.5));
        assert_eq!(v.attributes, VertexAttributes::default());
    }

    #[test]
    fn seam_entries_keep_separate_normals() {
        let p = Point3::new(1.0, 1.0, 0.0);
        let a = Vertex::with_normal(p, Vector3::z());
        let b = Vertex::with_normal(p, Vector3::x());
        assert_eq!(a.position, b.position);
        assert_ne!(a, b);
    }

    #[test]
    fn from_array() {
        let v: Vertex = [0.0, 1.0, 2.0].into();
        assert_eq!(v, Vertex::new(Point3::new(0.0, 1.0, 2.0)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn shaded_entry_round_trips_json() {
        let v = Vertex::with_normal(Point3::new(1.0, 2.0, 3.0), Vector3::y());
        let json = serde_json::to_string(&v).unwrap_or_default();
        let back: Option<Vertex> = serde_json::from_str(&json).ok();
        assert_eq!(back, Some(v));
    }
}
