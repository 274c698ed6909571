//! Benchmarks for mesh-normals operations.
//!
//! Run with: cargo bench -p mesh-normals
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-normals -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-normals -- --baseline main

#![allow(missing_docs, clippy::cast_possible_truncation)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_normals::{
    ExactPosition, NormalParams, PositionGroups, PositionMatching, WeightingMode,
    recalculate_mesh_normals,
};
use mesh_types::{IndexedMesh, Vertex, split_unit_cube};
use std::f64::consts::{PI, TAU};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Latitude/longitude sphere laid out the way textured exports are.
///
/// The first column is repeated at the end and each pole has one entry per
/// column, so the sphere carries a UV seam and split poles.
fn create_uv_sphere(rings: u32, segments: u32) -> IndexedMesh {
    let mut mesh = IndexedMesh::new();

    for ring in 0..=rings {
        let (sin_t, cos_t) = if ring == rings {
            (0.0, -1.0)
        } else {
            (PI * f64::from(ring) / f64::from(rings)).sin_cos()
        };
        for segment in 0..=segments {
            let phi = TAU * f64::from(segment % segments) / f64::from(segments);
            let (sin_p, cos_p) = phi.sin_cos();
            mesh.vertices
                .push(Vertex::from_coords(sin_t * cos_p, sin_t * sin_p, cos_t));
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for segment in 0..segments {
            let a = ring * stride + segment;
            let b = a + stride;
            // Skip the triangles that collapse onto a pole
            if ring != 0 {
                mesh.faces.push([a, b, a + 1]);
            }
            if ring + 1 != rings {
                mesh.faces.push([a + 1, b, b + 1]);
            }
        }
    }

    mesh
}

/// Give every face its own three entries, so every position is a seam.
fn unweld(mesh: &IndexedMesh) -> IndexedMesh {
    let mut split = IndexedMesh::with_capacity(mesh.faces.len() * 3, mesh.faces.len());
    for face in &mesh.faces {
        let base = split.vertices.len() as u32;
        for &v in face {
            split.vertices.push(Vertex::new(mesh.vertices[v as usize].position));
        }
        split.faces.push([base, base + 1, base + 2]);
    }
    split
}

// =============================================================================
// Recalculation Benchmarks
// =============================================================================

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Modes");

    let test_cases = [
        ("cube_split_12tri", split_unit_cube()),
        ("sphere_224tri", create_uv_sphere(8, 16)),
        ("sphere_960tri", create_uv_sphere(16, 32)),
        ("sphere_3968tri", create_uv_sphere(32, 64)),
    ];

    for (name, mesh) in &test_cases {
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        for mode in WeightingMode::ALL {
            let params = NormalParams::default().with_mode(mode);
            group.bench_with_input(BenchmarkId::new(mode.to_string(), name), mesh, |b, mesh| {
                b.iter(|| recalculate_mesh_normals(black_box(mesh), &params));
            });
        }
    }

    group.finish();
}

fn bench_seams(c: &mut Criterion) {
    let mut group = c.benchmark_group("Seams");

    let sphere = create_uv_sphere(16, 32);
    let test_cases = [("welded", sphere.clone()), ("unwelded", unweld(&sphere))];

    for (name, mesh) in &test_cases {
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        group.bench_with_input(BenchmarkId::new("exact", name), mesh, |b, mesh| {
            let params = NormalParams::for_cad();
            b.iter(|| recalculate_mesh_normals(black_box(mesh), &params));
        });

        group.bench_with_input(BenchmarkId::new("grid", name), mesh, |b, mesh| {
            let params = NormalParams::for_cad()
                .with_position_matching(PositionMatching::Grid { cell_size: 1e-6 });
            b.iter(|| recalculate_mesh_normals(black_box(mesh), &params));
        });
    }

    group.finish();
}

// =============================================================================
// Grouping Benchmarks
// =============================================================================

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("Grouping");

    let mesh = unweld(&create_uv_sphere(32, 64));
    let positions = mesh.positions();
    group.throughput(Throughput::Elements(mesh.vertices.len() as u64));

    group.bench_function("position_groups_sphere_3968tri", |b| {
        b.iter(|| PositionGroups::build(black_box(&positions), &mesh.faces, &ExactPosition));
    });

    group.finish();
}

criterion_group!(benches, bench_modes, bench_seams, bench_grouping);
criterion_main!(benches);
