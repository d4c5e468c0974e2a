use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use lanewise_tensor::{CpuAllocator, Shape, Tensor};

fn bench_shape(c: &mut Criterion) {
    let mut group = c.benchmark_group("Shape");

    let a = Shape::new([64, 1, 32, 8]);
    let b = Shape::new([1, 16, 32, 1]);

    group.bench_function("bstrides", |bencher| {
        bencher.iter(|| black_box(&a).bstrides())
    });

    group.bench_function("broadcast", |bencher| {
        bencher.iter(|| black_box(&a).broadcast(black_box(&b)).unwrap())
    });

    group.finish();
}

fn bench_tensor(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tensor");

    group.bench_function("from_shape_val", |bencher| {
        bencher.iter(|| {
            Tensor::<f32, 3, _>::from_shape_val(black_box([128, 128, 8]), 0.0, CpuAllocator)
                .unwrap()
        })
    });

    let tensor = Tensor::<f32, 3, _>::from_shape_val([128, 128, 8], 1.0, CpuAllocator).unwrap();
    group.bench_function("clone", |bencher| {
        bencher.iter(|| black_box(&tensor).clone())
    });

    group.finish();
}

criterion_group!(benches, bench_shape, bench_tensor);
criterion_main!(benches);
