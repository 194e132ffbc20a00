//! Benchmarks for mesh construction, region selection and buffer extraction.

use criterion::{criterion_group, criterion_main, Criterion};
use hedgemesh::prelude::*;
use nalgebra::Point3;

/// Flat buffers for an `n` x `n` grid of quads, two triangles each.
fn grid_buffers(n: usize) -> (Vec<f64>, Vec<usize>) {
    let mut coords = Vec::with_capacity((n + 1) * (n + 1) * 3);
    let mut triangles = Vec::with_capacity(n * n * 6);

    for j in 0..=n {
        for i in 0..=n {
            coords.extend_from_slice(&[i as f64, j as f64, 0.0]);
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            triangles.extend_from_slice(&[v00, v10, v11, v00, v11, v01]);
        }
    }

    (coords, triangles)
}

fn bench_mesh_construction(c: &mut Criterion) {
    let (coords, triangles) = grid_buffers(100);

    c.bench_function("build_grid_100x100", |b| {
        b.iter(|| {
            let mesh: HalfEdgeMesh = build(&coords, &triangles).unwrap();
            mesh
        });
    });
}

fn bench_region_and_buffers(c: &mut Criterion) {
    let (coords, triangles) = grid_buffers(100);
    let mut mesh: HalfEdgeMesh = build(&coords, &triangles).unwrap();
    let options = RegionOptions::default().with_region(
        RegionBox::new(Point3::new(10.0, 10.0, -1.0), Point3::new(60.0, 60.0, 1.0)).unwrap(),
    );

    c.bench_function("find_region_faces_100x100", |b| {
        b.iter(|| find_region_faces(&mut mesh, &options).len());
    });

    c.bench_function("vertex_buffers_100x100", |b| {
        b.iter(|| mesh.vertex_buffers().unwrap());
    });
}

criterion_group!(benches, bench_mesh_construction, bench_region_and_buffers);
criterion_main!(benches);
