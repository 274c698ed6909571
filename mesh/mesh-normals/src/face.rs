//! Face normal pass and vector helpers.

use nalgebra::{Point3, Vector3};

/// Per-face normals and per-entry reference normals for one mesh snapshot.
///
/// Both arrays come out of a single pass over the faces.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceNormals {
    /// Unnormalized cross-product normal per face.
    ///
    /// The length is twice the face area, so this doubles as the area weight.
    pub area_weighted: Vec<Vector3<f64>>,

    /// Unit normal of the last face (in index order) touching each entry.
    ///
    /// Zero for entries no face touches, or whose last face is degenerate.
    /// Only used as the axis of the smoothing-angle test.
    pub reference: Vec<Vector3<f64>>,
}

impl FaceNormals {
    /// Number of faces whose normal is at or below `epsilon` in length.
    #[must_use]
    pub fn degenerate_count(&self, epsilon: f64) -> usize {
        self.area_weighted
            .iter()
            .filter(|n| is_zero(n, epsilon))
            .count()
    }
}

/// Compute face normals and reference normals.
///
/// Faces must already be validated against `positions.len()`. A face whose
/// cross product overflows `f64` gets the normal of its rescaled edges
/// instead, so its direction is right but its length is no longer the area.
///
/// # Example
///
/// ```
/// use mesh_normals::compute_face_normals;
/// use mesh_types::Point3;
///
/// let positions = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// ];
/// let normals = compute_face_normals(&positions, &[[0, 1, 2]], 0.0);
///
/// // Length is twice the area
/// assert!((normals.area_weighted[0].z - 4.0).abs() < 1e-12);
/// assert!((normals.reference[0].z - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn compute_face_normals(
    positions: &[Point3<f64>],
    faces: &[[u32; 3]],
    epsilon: f64,
) -> FaceNormals {
    let mut area_weighted = Vec::with_capacity(faces.len());
    let mut reference = vec![Vector3::zeros(); positions.len()];

    for &[i1, i2, i3] in faces {
        let (e1, e2) = edges(
            &positions[i1 as usize],
            &positions[i2 as usize],
            &positions[i3 as usize],
        );
        let mut normal = e1.cross(&e2);
        if !is_finite(&normal) {
            // Overflowed; keep the direction of the rescaled edges
            normal = (e1 / e1.amax()).cross(&(e2 / e2.amax()));
        }

        let unit = safe_normalize(&normal, epsilon);
        for v in [i1, i2, i3] {
            reference[v as usize] = unit;
        }

        area_weighted.push(normal);
    }

    FaceNormals {
        area_weighted,
        reference,
    }
}

/// Normalize `v`, returning zero when its length is at or below `epsilon`.
///
/// Never produces NaN. The length is measured after scaling by the largest
/// component, so vectors whose squared length overflows still normalize. A
/// vector containing NaN is treated as zero; infinite components dominate
/// the direction.
///
/// # Example
///
/// ```
/// use mesh_normals::safe_normalize;
/// use mesh_types::Vector3;
///
/// let n = safe_normalize(&Vector3::new(0.0, 0.0, 1e300), 0.0);
/// assert_eq!(n, Vector3::z());
///
/// assert_eq!(safe_normalize(&Vector3::zeros(), 0.0), Vector3::zeros());
/// ```
#[must_use]
pub fn safe_normalize(v: &Vector3<f64>, epsilon: f64) -> Vector3<f64> {
    if is_zero(v, epsilon) {
        return Vector3::zeros();
    }
    let scale = v.amax();
    if scale.is_finite() {
        let scaled = v / scale;
        scaled / scaled.norm()
    } else {
        let limit = v.map(|c| if c.is_infinite() { c.signum() } else { 0.0 });
        limit / limit.norm()
    }
}

/// Angle between two vectors in degrees, in `[0, 180]`.
///
/// If either vector is zero (at or below `epsilon`) the angle is `0.0`.
///
/// # Example
///
/// ```
/// use mesh_normals::angle_between_deg;
/// use mesh_types::Vector3;
///
/// let a = angle_between_deg(&Vector3::x(), &Vector3::y(), 0.0);
/// assert!((a - 90.0).abs() < 1e-12);
///
/// // Undefined angle resolves to zero
/// assert_eq!(angle_between_deg(&Vector3::zeros(), &Vector3::y(), 0.0), 0.0);
/// ```
#[must_use]
pub fn angle_between_deg(a: &Vector3<f64>, b: &Vector3<f64>, epsilon: f64) -> f64 {
    if is_zero(a, epsilon) || is_zero(b, epsilon) || !is_finite(a) || !is_finite(b) {
        return 0.0;
    }
    let a = a / a.amax();
    let b = b / b.amax();
    // atan2 keeps precision near 0 and 180 where acos loses it
    a.cross(&b).norm().atan2(a.dot(&b)).to_degrees().min(180.0)
}

/// Angle in degrees at `apex` between the edges towards `a` and `b`.
#[inline]
#[must_use]
pub fn corner_angle_deg(
    apex: &Point3<f64>,
    a: &Point3<f64>,
    b: &Point3<f64>,
    epsilon: f64,
) -> f64 {
    let (e1, e2) = edges(apex, a, b);
    angle_between_deg(&e1, &e2, epsilon)
}

/// Edges from `apex` to `a` and `b`.
///
/// When a difference overflows, all three points are first scaled down by
/// their largest coordinate.
fn edges(
    apex: &Point3<f64>,
    a: &Point3<f64>,
    b: &Point3<f64>,
) -> (Vector3<f64>, Vector3<f64>) {
    let e1 = a - apex;
    let e2 = b - apex;
    if is_finite(&e1) && is_finite(&e2) {
        return (e1, e2);
    }
    let scale = apex.coords.amax().max(a.coords.amax()).max(b.coords.amax());
    let origin = apex.coords / scale;
    (a.coords / scale - origin, b.coords / scale - origin)
}

#[inline]
fn is_finite(v: &Vector3<f64>) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Length of `v` without overflow in the squared sum.
fn scaled_norm(v: &Vector3<f64>) -> f64 {
    let scale = v.amax();
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    scale * (v / scale).norm()
}

#[inline]
fn is_zero(v: &Vector3<f64>, epsilon: f64) -> bool {
    let len = scaled_norm(v);
    // NaN lengths count as zero
    len.is_nan() || len == 0.0 || len <= epsilon
}
