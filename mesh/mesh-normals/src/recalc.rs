//! Weighted vertex normal recomputation.
//!
//! Two passes over an immutable snapshot: a face pass that produces
//! area-weighted and reference normals, then a smoothing pass over position
//! groups that sums every face passing the smoothing-angle test.

use mesh_types::{IndexedMesh, Point3, Vector3};
use tracing::{debug, info, warn};

use crate::error::{NormalsError, NormalsResult};
use crate::face::{
    FaceNormals, angle_between_deg, compute_face_normals, corner_angle_deg, safe_normalize,
};
use crate::grouping::{GroupKey, PositionGroups, PositionKey};
use crate::params::{NormalParams, WeightingMode};
use crate::result::{NormalsOutput, NormalsSummary};

/// Recompute vertex normals from a flat triangle index list.
///
/// Uses exact position matching and an `epsilon` of zero. Returns one
/// normal per vertex entry, each unit length or zero.
///
/// # Errors
///
/// Returns an error if the index count is not a multiple of 3, an index is
/// out of range, or the smoothing angle is NaN. Nothing is computed in
/// that case.
///
/// # Example
///
/// ```
/// use mesh_normals::{recalc_weighted_normals, WeightingMode};
/// use mesh_types::Point3;
///
/// let positions = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let normals =
///     recalc_weighted_normals(&positions, &[0, 1, 2], WeightingMode::AngleWeighted, 60.0)
///         .unwrap();
///
/// assert_eq!(normals.len(), 3);
/// assert!((normals[0].z - 1.0).abs() < 1e-12);
/// ```
pub fn recalc_weighted_normals(
    positions: &[Point3<f64>],
    indices: &[u32],
    mode: WeightingMode,
    smoothing_angle_degrees: f64,
) -> NormalsResult<Vec<Vector3<f64>>> {
    let faces = faces_from_indices(indices)?;
    let params = NormalParams::default()
        .with_mode(mode)
        .with_smoothing_angle(smoothing_angle_degrees);
    recalculate_normals(positions, &faces, &params).map(NormalsOutput::into_normals)
}

/// Recompute vertex normals with full control over the parameters.
///
/// # Errors
///
/// Returns an error if the params are invalid or a face references a
/// vertex entry that does not exist.
///
/// # Example
///
/// ```
/// use mesh_normals::{recalculate_normals, NormalParams};
/// use mesh_types::split_unit_cube;
///
/// let cube = split_unit_cube();
/// let output = recalculate_normals(&cube.positions(), &cube.faces, &NormalParams::for_cad())
///     .unwrap();
///
/// // Each side keeps its flat normal across the 90 degree creases
/// assert_eq!(output.summary.shared_positions, 8);
/// assert!(output.summary.had_rejections());
/// ```
pub fn recalculate_normals(
    positions: &[Point3<f64>],
    faces: &[[u32; 3]],
    params: &NormalParams,
) -> NormalsResult<NormalsOutput> {
    recalculate_normals_with(positions, faces, params, &params.position_matching)
}

/// Recompute vertex normals using a custom position-matching strategy.
///
/// `params.position_matching` is ignored in favor of `matcher`.
///
/// # Errors
///
/// Same as [`recalculate_normals`].
pub fn recalculate_normals_with<K: PositionKey + ?Sized>(
    positions: &[Point3<f64>],
    faces: &[[u32; 3]],
    params: &NormalParams,
    matcher: &K,
) -> NormalsResult<NormalsOutput> {
    params.validate()?;
    validate_faces(faces, positions.len())?;

    info!(
        vertices = positions.len(),
        faces = faces.len(),
        mode = %params.mode,
        smoothing_angle = params.smoothing_angle,
        "Recalculating vertex normals"
    );

    let face_normals = compute_face_normals(positions, faces, params.epsilon);
    let degenerate_faces = face_normals.degenerate_count(params.epsilon);
    if degenerate_faces > 0 {
        debug!(count = degenerate_faces, "Degenerate faces contribute zero");
    }

    let mut summary = NormalsSummary {
        vertex_count: positions.len(),
        face_count: faces.len(),
        degenerate_faces,
        ..Default::default()
    };

    let normals = match Smoothing::for_mode(params.mode) {
        None => unweighted_normals(faces, &face_normals, params.epsilon, &mut summary),
        Some(smoothing) => smoothed_normals(
            smoothing,
            positions,
            faces,
            &face_normals,
            params,
            matcher,
            &mut summary,
        ),
    };

    summary.zero_normals = normals.iter().filter(|n| n.norm_squared() == 0.0).count();

    info!(
        groups = summary.position_groups,
        seams = summary.shared_positions,
        accepted = summary.accepted_contributions,
        rejected = summary.rejected_contributions,
        zero = summary.zero_normals,
        "Normal recalculation complete"
    );

    Ok(NormalsOutput { normals, summary })
}

/// Recompute normals for every vertex entry of a mesh.
///
/// The mesh is not modified.
///
/// # Errors
///
/// Same as [`recalculate_normals`].
pub fn recalculate_mesh_normals(
    mesh: &IndexedMesh,
    params: &NormalParams,
) -> NormalsResult<NormalsOutput> {
    recalculate_normals(&mesh.positions(), &mesh.faces, params)
}

/// Recompute normals and store them on the mesh's vertex entries.
///
/// Zero results are stored as `None`. Positions and faces are untouched,
/// and on error the mesh is left as it was.
///
/// # Errors
///
/// Same as [`recalculate_normals`].
///
/// # Example
///
/// ```
/// use mesh_normals::{apply_normals, NormalParams};
/// use mesh_types::unit_cube;
///
/// let mut cube = unit_cube();
/// let summary = apply_normals(&mut cube, &NormalParams::smooth()).unwrap();
///
/// assert_eq!(summary.zero_normals, 0);
/// assert!(cube.vertices.iter().all(|v| v.normal().is_some()));
/// ```
pub fn apply_normals(
    mesh: &mut IndexedMesh,
    params: &NormalParams,
) -> NormalsResult<NormalsSummary> {
    let output = recalculate_mesh_normals(mesh, params)?;

    for (vertex, normal) in mesh.vertices.iter_mut().zip(output.normals) {
        vertex.attributes.normal = (normal.norm_squared() > 0.0).then_some(normal);
    }

    Ok(output.summary)
}

/// Split a flat index list into triangles.
///
/// # Errors
///
/// Returns [`NormalsError::IndexCountNotTriangles`] if the length is not a
/// multiple of 3.
pub fn faces_from_indices(indices: &[u32]) -> NormalsResult<Vec<[u32; 3]>> {
    if indices.len() % 3 != 0 {
        return Err(NormalsError::IndexCountNotTriangles { len: indices.len() });
    }
    Ok(indices
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect())
}

fn validate_faces(faces: &[[u32; 3]], vertex_count: usize) -> NormalsResult<()> {
    for face in faces {
        for &index in face {
            if index as usize >= vertex_count {
                return Err(NormalsError::InvalidIndex { index, vertex_count });
            }
        }
    }
    Ok(())
}

/// Per-entry sum of raw face normals with no grouping and no angle test.
fn unweighted_normals(
    faces: &[[u32; 3]],
    face_normals: &FaceNormals,
    epsilon: f64,
    summary: &mut NormalsSummary,
) -> Vec<Vector3<f64>> {
    let mut sums = vec![Vector3::zeros(); face_normals.reference.len()];

    for (face, normal) in faces.iter().zip(&face_normals.area_weighted) {
        for &v in face {
            sums[v as usize] += normal;
        }
    }
    summary.accepted_contributions = faces.len() * 3;

    sums.iter().map(|s| safe_normalize(s, epsilon)).collect()
}

/// Weighting of the modes that go through position groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Smoothing {
    Area,
    Angle,
    AreaAndAngle,
}

impl Smoothing {
    /// `None` for [`WeightingMode::Unweighted`], which skips grouping.
    const fn for_mode(mode: WeightingMode) -> Option<Self> {
        match mode {
            WeightingMode::Unweighted => None,
            WeightingMode::AreaWeighted => Some(Self::Area),
            WeightingMode::AngleWeighted => Some(Self::Angle),
            WeightingMode::AreaAndAngleWeighted => Some(Self::AreaAndAngle),
        }
    }

    const fn uses_corner_angle(self) -> bool {
        matches!(self, Self::Angle | Self::AreaAndAngle)
    }

    #[inline]
    fn contribution(self, normal: &Vector3<f64>, corner_angle: f64, epsilon: f64) -> Vector3<f64> {
        match self {
            Self::Area => *normal,
            Self::Angle => safe_normalize(normal, epsilon) * corner_angle,
            Self::AreaAndAngle => normal * corner_angle,
        }
    }
}

fn smoothed_normals<K: PositionKey + ?Sized>(
    smoothing: Smoothing,
    positions: &[Point3<f64>],
    faces: &[[u32; 3]],
    face_normals: &FaceNormals,
    params: &NormalParams,
    matcher: &K,
    summary: &mut NormalsSummary,
) -> Vec<Vector3<f64>> {
    let groups = PositionGroups::build(positions, faces, matcher);
    summary.position_groups = groups.len();
    summary.shared_positions = groups.split_count();
    debug!(
        groups = summary.position_groups,
        seams = summary.shared_positions,
        "Built position groups"
    );

    let epsilon = params.epsilon;
    let mut normals = vec![Vector3::zeros(); positions.len()];
    let mut isolated = 0usize;

    for group in &groups {
        for &v in &group.vertices {
            let reference = &face_normals.reference[v as usize];
            let apex = &positions[v as usize];
            let mut sum = Vector3::zeros();
            let mut accepted = 0usize;

            for &t in &group.faces {
                let normal = &face_normals.area_weighted[t];
                if angle_between_deg(reference, normal, epsilon) > params.smoothing_angle {
                    summary.rejected_contributions += 1;
                    continue;
                }
                accepted += 1;

                let corner_angle = if smoothing.uses_corner_angle() {
                    subtended_angle(positions, faces[t], apex, &group.key, matcher, epsilon)
                } else {
                    0.0
                };
                sum += smoothing.contribution(normal, corner_angle, epsilon);
            }

            if accepted == 0 {
                isolated += 1;
            }
            summary.accepted_contributions += accepted;
            normals[v as usize] = safe_normalize(&sum, epsilon);
        }
    }

    if isolated > 0 {
        warn!(
            count = isolated,
            smoothing_angle = params.smoothing_angle,
            "Vertex entries rejected every incident face"
        );
    }

    normals
}

/// Angle at `apex` between the two corners of `face` that are not at the
/// apex position.
fn subtended_angle<K: PositionKey + ?Sized>(
    positions: &[Point3<f64>],
    face: [u32; 3],
    apex: &Point3<f64>,
    apex_key: &GroupKey,
    matcher: &K,
    epsilon: f64,
) -> f64 {
    let [c1, c2, c3] = face.map(|i| &positions[i as usize]);
    let (a, b) = if &matcher.key(c1) == apex_key {
        (c2, c3)
    } else if &matcher.key(c2) == apex_key {
        (c1, c3)
    } else {
        (c1, c2)
    };
    corner_angle_deg(apex, a, b, epsilon)
}

/// Stateless normal recomputation service.
///
/// Holds a [`NormalParams`] so callers can configure once and reuse it on
/// many meshes.
///
/// # Example
///
/// ```
/// use mesh_normals::{NormalParams, NormalRecalculator, WeightingMode};
/// use mesh_types::unit_cube;
///
/// let recalculator =
///     NormalRecalculator::new(NormalParams::smooth().with_mode(WeightingMode::AreaWeighted));
/// let output = recalculator.recalculate_mesh(&unit_cube()).unwrap();
/// assert_eq!(output.normals.len(), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalRecalculator {
    params: NormalParams,
}

impl NormalRecalculator {
    /// Create a recalculator with the given params.
    #[must_use]
    pub const fn new(params: NormalParams) -> Self {
        Self { params }
    }

    /// The params this recalculator runs with.
    #[must_use]
    pub const fn params(&self) -> &NormalParams {
        &self.params
    }

    /// See [`recalculate_normals`].
    ///
    /// # Errors
    ///
    /// Same as [`recalculate_normals`].
    pub fn recalculate(
        &self,
        positions: &[Point3<f64>],
        faces: &[[u32; 3]],
    ) -> NormalsResult<NormalsOutput> {
        recalculate_normals(positions, faces, &self.params)
    }

    /// See [`recalculate_mesh_normals`].
    ///
    /// # Errors
    ///
    /// Same as [`recalculate_normals`].
    pub fn recalculate_mesh(&self, mesh: &IndexedMesh) -> NormalsResult<NormalsOutput> {
        recalculate_mesh_normals(mesh, &self.params)
    }

    /// See [`apply_normals`].
    ///
    /// # Errors
    ///
    /// Same as [`recalculate_normals`].
    pub fn apply(&self, mesh: &mut IndexedMesh) -> NormalsResult<NormalsSummary> {
        apply_normals(mesh, &self.params)
    }
}
