//! Property-based tests for normal recomputation.
//!
//! These tests use proptest to generate random meshes and verify invariants.
//!
//! Run with: cargo test -p mesh-normals -- proptest

use mesh_normals::{
    NormalParams, NormalsError, PositionMatching, WeightingMode, recalculate_mesh_normals,
};
use mesh_types::{IndexedMesh, Triangle, Vector3, Vertex};
use proptest::prelude::*;

// =============================================================================
// Strategies for generating random meshes
// =============================================================================

/// Generate a random vertex position in a bounded range.
fn arb_position() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-100.0..100.0f64)
}

/// Generate a random vertex with position only.
fn arb_vertex() -> impl Strategy<Value = Vertex> {
    arb_position().prop_map(|[x, y, z]| Vertex::from_coords(x, y, z))
}

/// Generate a valid mesh with the specified number of vertices and faces.
///
/// Some vertices are copies of earlier positions so that seams occur.
fn arb_mesh(
    min_vertices: usize,
    max_vertices: usize,
    min_faces: usize,
    max_faces: usize,
) -> impl Strategy<Value = IndexedMesh> {
    (min_vertices..=max_vertices).prop_flat_map(move |num_vertices| {
        let vertices = prop::collection::vec(arb_vertex(), num_vertices);
        let duplicates = prop::collection::vec(any::<prop::sample::Index>(), 0..=num_vertices / 2);

        (vertices, duplicates).prop_flat_map(move |(mut verts, dups)| {
            for idx in dups {
                let source = verts[idx.index(verts.len())].position;
                verts.push(Vertex::new(source));
            }

            let n = verts.len() as u32;
            if n < 3 {
                return Just(IndexedMesh {
                    vertices: verts,
                    faces: Vec::new(),
                })
                .boxed();
            }

            let face = prop::array::uniform3(0..n);
            let faces = prop::collection::vec(face, min_faces..=max_faces);

            faces
                .prop_map(move |f| IndexedMesh {
                    vertices: verts.clone(),
                    faces: f,
                })
                .boxed()
        })
    })
}

fn arb_mode() -> impl Strategy<Value = WeightingMode> {
    prop::sample::select(WeightingMode::ALL.to_vec())
}

fn is_unit_or_zero(n: &Vector3<f64>) -> bool {
    let len = n.norm();
    len == 0.0 || (len - 1.0).abs() < 1e-9
}

// =============================================================================
// Property Tests: Output shape
// =============================================================================

proptest! {
    /// Every valid mesh produces one finite, unit-or-zero normal per entry.
    #[test]
    fn normals_are_unit_or_zero(
        mesh in arb_mesh(3, 40, 0, 80),
        mode in arb_mode(),
        angle in 0.0..180.0f64,
    ) {
        let params = NormalParams::default().with_mode(mode).with_smoothing_angle(angle);
        let output = recalculate_mesh_normals(&mesh, &params).unwrap();

        prop_assert_eq!(output.normals.len(), mesh.vertices.len());
        prop_assert_eq!(output.summary.vertex_count, mesh.vertices.len());
        for n in &output.normals {
            prop_assert!(n.iter().all(|c| c.is_finite()), "non-finite normal {:?}", n);
            prop_assert!(is_unit_or_zero(n), "normal {:?} has length {}", n, n.norm());
        }
    }

    /// Recomputation is a pure function of the input.
    #[test]
    fn recalculation_is_deterministic(
        mesh in arb_mesh(3, 30, 1, 60),
        mode in arb_mode(),
    ) {
        let params = NormalParams::default().with_mode(mode);
        let first = recalculate_mesh_normals(&mesh, &params).unwrap();
        let second = recalculate_mesh_normals(&mesh, &params).unwrap();

        prop_assert_eq!(first, second);
    }

    /// Entries not referenced by any face get a zero normal.
    #[test]
    fn unreferenced_entries_are_zero(
        mesh in arb_mesh(3, 30, 0, 20),
        mode in arb_mode(),
    ) {
        let output = recalculate_mesh_normals(&mesh, &NormalParams::smooth().with_mode(mode)).unwrap();

        let mut referenced = vec![false; mesh.vertices.len()];
        for face in &mesh.faces {
            for &v in face {
                referenced[v as usize] = true;
            }
        }
        for (n, used) in output.normals.iter().zip(&referenced) {
            if !used {
                prop_assert_eq!(*n, Vector3::zeros());
            }
        }
    }
}

// =============================================================================
// Property Tests: Weighting
// =============================================================================

proptest! {
    /// Unweighted mode matches a plain per-entry sum of face normals.
    #[test]
    fn unweighted_matches_plain_sum(
        mesh in arb_mesh(3, 30, 1, 60),
        angle in 0.0..180.0f64,
    ) {
        let mut sums = vec![Vector3::zeros(); mesh.vertices.len()];
        for face in &mesh.faces {
            let tri = Triangle::new(
                mesh.vertices[face[0] as usize].position,
                mesh.vertices[face[1] as usize].position,
                mesh.vertices[face[2] as usize].position,
            );
            let n = tri.normal_unnormalized();
            for &v in face {
                sums[v as usize] += n;
            }
        }

        let params = NormalParams::default()
            .with_mode(WeightingMode::Unweighted)
            .with_smoothing_angle(angle);
        let output = recalculate_mesh_normals(&mesh, &params).unwrap();

        for (n, sum) in output.normals.iter().zip(&sums) {
            let expected = sum.try_normalize(0.0).unwrap_or_else(Vector3::zeros);
            prop_assert!((n - expected).norm() < 1e-9, "{:?} != {:?}", n, expected);
        }
    }

    /// Lowering the smoothing angle never accepts more contributions.
    #[test]
    fn smoothing_angle_is_monotonic(
        mesh in arb_mesh(3, 30, 1, 60),
        mode in arb_mode(),
        a in 0.0..180.0f64,
        b in 0.0..180.0f64,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let base = NormalParams::default().with_mode(mode);

        let strict = recalculate_mesh_normals(&mesh, &base.clone().with_smoothing_angle(low)).unwrap();
        let loose = recalculate_mesh_normals(&mesh, &base.with_smoothing_angle(high)).unwrap();

        prop_assert!(strict.summary.accepted_contributions <= loose.summary.accepted_contributions);
    }

    /// Smoothing across every edge never rejects a face.
    #[test]
    fn smooth_rejects_nothing(
        mesh in arb_mesh(3, 30, 1, 60),
        mode in arb_mode(),
    ) {
        let output = recalculate_mesh_normals(&mesh, &NormalParams::smooth().with_mode(mode)).unwrap();
        prop_assert!(!output.summary.had_rejections());
    }

    /// A grid much finer than the coordinate spacing groups like exact matching.
    #[test]
    fn fine_grid_matches_exact(
        mesh in arb_mesh(3, 20, 1, 40),
        mode in arb_mode(),
    ) {
        let exact = NormalParams::smooth().with_mode(mode);
        let grid = exact
            .clone()
            .with_position_matching(PositionMatching::Grid { cell_size: 1e-9 });

        let a = recalculate_mesh_normals(&mesh, &exact).unwrap();
        let b = recalculate_mesh_normals(&mesh, &grid).unwrap();

        prop_assert_eq!(a.summary.position_groups, b.summary.position_groups);
    }
}

// =============================================================================
// Property Tests: Epsilon and extreme scales
// =============================================================================

proptest! {
    /// A negative epsilon is rejected; any other finite epsilon gives
    /// unit-or-zero normals.
    #[test]
    fn epsilon_is_validated(
        mesh in arb_mesh(3, 20, 1, 30),
        mode in arb_mode(),
        epsilon in -1.0..1.0f64,
    ) {
        let params = NormalParams::default().with_mode(mode).with_epsilon(epsilon);
        let result = recalculate_mesh_normals(&mesh, &params);

        if epsilon < 0.0 {
            prop_assert!(matches!(result, Err(NormalsError::InvalidEpsilon(_))));
        } else {
            let output = result.unwrap();
            for n in &output.normals {
                prop_assert!(n.iter().all(|c| c.is_finite()), "non-finite normal {:?}", n);
                prop_assert!(is_unit_or_zero(n), "normal {:?} has length {}", n, n.norm());
            }
        }
    }

    /// Scaling a mesh towards the top of the f64 range never yields NaN.
    #[test]
    fn huge_meshes_stay_finite(
        mesh in arb_mesh(3, 20, 1, 30),
        mode in arb_mode(),
        exponent in 100i32..=305,
    ) {
        let scale = 10f64.powi(exponent);
        let scaled = IndexedMesh {
            vertices: mesh
                .vertices
                .iter()
                .map(|v| Vertex::new(v.position * scale))
                .collect(),
            faces: mesh.faces.clone(),
        };

        let output = recalculate_mesh_normals(&scaled, &NormalParams::default().with_mode(mode))
            .unwrap();
        for n in &output.normals {
            prop_assert!(n.iter().all(|c| c.is_finite()), "non-finite normal {:?}", n);
            prop_assert!(is_unit_or_zero(n), "normal {:?} has length {}", n, n.norm());
        }
    }
}
