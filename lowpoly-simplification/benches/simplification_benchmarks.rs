//! Benchmarks for grid clustering and Laplacian smoothing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lowpoly_core::{Point3d, TriangleMesh};
use lowpoly_simplification::{laplacian_smooth, triangle_soup, vertex_clustering};

fn generate_grid_mesh(size: usize) -> TriangleMesh {
    let mut vertices = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let fx = x as f64 / (size - 1) as f64 * std::f64::consts::PI;
            let fy = y as f64 / (size - 1) as f64 * std::f64::consts::PI;
            vertices.push(Point3d::new(x as f64, y as f64, (fx.sin() * fy.sin()) * 2.0));
        }
    }
    let mut faces = Vec::with_capacity((size - 1) * (size - 1) * 2);
    for y in 0..(size - 1) {
        for x in 0..(size - 1) {
            let tl = y * size + x;
            let tr = tl + 1;
            let bl = (y + 1) * size + x;
            let br = bl + 1;
            faces.push([tl, bl, tr]);
            faces.push([tr, bl, br]);
        }
    }
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

fn bench_clustering(c: &mut Criterion) {
    let sizes = [50, 100, 200];
    let cell_sizes = [1.5, 3.0, 7.5];

    let mut group = c.benchmark_group("clustering");

    for &size in &sizes {
        let soup = triangle_soup(&generate_grid_mesh(size));
        let triangle_count = soup.len() / 3;

        for &cell_size in &cell_sizes {
            group.bench_with_input(
                BenchmarkId::new("uniform_grid", format!("{}t_c{}", triangle_count, cell_size)),
                &(&soup, cell_size),
                |b, &(soup, cell_size)| {
                    b.iter(|| {
                        let result = vertex_clustering(black_box(soup), cell_size).unwrap();
                        black_box(result);
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_smoothing(c: &mut Criterion) {
    let iterations = [1u32, 3, 10];

    let mut group = c.benchmark_group("smoothing");
    let mesh = generate_grid_mesh(100);

    for &n in &iterations {
        group.bench_with_input(BenchmarkId::new("laplacian", n), &n, |b, &n| {
            b.iter(|| {
                let result =
                    laplacian_smooth(black_box(&mesh.vertices), &mesh.faces, n, 0.5).unwrap();
                black_box(result);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_clustering, bench_smoothing);
criterion_main!(benches);
