use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matkern::{Backend, Matrix, TileConfig};

fn square(n: usize, backend: Backend) -> Matrix<f32> {
    Matrix::from_fn(n, n, |r, c| ((r * n + c) % 100) as f32)
        .unwrap()
        .with_backend(backend)
}

fn bench_matmul_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");

    for n in [16, 64, 128, 256] {
        for backend in [Backend::Sequential, Backend::Parallel] {
            let a = square(n, backend);
            let b = square(n, backend);
            let id = format!("{n}x{n}/{backend:?}");

            group.bench_with_input(BenchmarkId::from_parameter(&id), &(&a, &b), |bench, (a, b)| {
                bench.iter(|| black_box(black_box(a).matmul(black_box(b)).unwrap()));
            });
        }
    }

    group.finish();
}

fn bench_matmul_tiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul_tiles");

    let a = square(128, Backend::Sequential);
    let b = square(128, Backend::Sequential);

    for (rb, cb, db) in [(4, 4, 2), (8, 8, 8), (16, 64, 16), (64, 64, 64)] {
        let tiles = TileConfig::new(rb, cb, db).unwrap();
        let id = format!("{rb}x{cb}x{db}");

        group.bench_with_input(BenchmarkId::from_parameter(&id), &tiles, |bench, &tiles| {
            bench.iter(|| black_box(a.matmul_tiled(black_box(&b), tiles).unwrap()));
        });
    }

    group.bench_function("naive", |bench| {
        bench.iter(|| black_box(a.matmul_naive(black_box(&b)).unwrap()));
    });

    group.finish();
}

fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");

    for n in [64, 256, 1024] {
        let m = square(n, Backend::select_best());
        group.bench_with_input(BenchmarkId::from_parameter(n), &m, |bench, m| {
            bench.iter(|| black_box(black_box(m).transpose()));
        });
    }

    group.finish();
}

fn bench_convolve2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolve2d");

    let kernel = Matrix::from_vec(3, 3, vec![1.0 / 9.0; 9]).unwrap();
    for n in [32, 128, 512] {
        let input = square(n, Backend::select_best());
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |bench, input| {
            bench.iter(|| black_box(black_box(input).convolve2d(&kernel).unwrap()));
        });
    }

    group.finish();
}

fn bench_mod_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("mod_inverse");
    let p = 1_000_003i64;

    for n in [8, 32, 64] {
        // Unit upper-triangular: every pivot is 1
        let m = Matrix::from_fn(n, n, |r, c| {
            if r == c {
                1
            } else if r < c {
                ((r + c) % 7) as i64
            } else {
                0
            }
        })
        .unwrap()
            .with_backend(Backend::select_best());

        group.bench_with_input(BenchmarkId::from_parameter(n), &m, |bench, m| {
            bench.iter(|| black_box(black_box(m).mod_inverse(p).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_matmul_sizes,
    bench_matmul_tiles,
    bench_transpose,
    bench_convolve2d,
    bench_mod_inverse
);
criterion_main!(benches);
