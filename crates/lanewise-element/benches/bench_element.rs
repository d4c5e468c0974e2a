use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use lanewise_element::{element, from_fn, Add, MulAdd};
use lanewise_tensor::{CpuAllocator, Tensor};
use rand::Rng;

fn random_tensor<const N: usize>(
    shape: [usize; N],
    rng: &mut impl Rng,
) -> Tensor<f32, N, CpuAllocator> {
    let numel = shape.iter().product::<usize>();
    let data: Vec<f32> = (0..numel).map(|_| rng.random::<f32>()).collect();
    Tensor::from_shape_vec(shape, data, CpuAllocator).unwrap()
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    let mut rng = rand::rng();

    // 1024 and 8 run 8 lanes wide, 1020 runs 4 wide and 1023 runs scalar
    for cols in [8, 1020, 1023, 1024] {
        let a = random_tensor([256, cols], &mut rng);
        let b = random_tensor([256, cols], &mut rng);
        let mut out = Tensor::<f32, 2, _>::zeros([256, cols], CpuAllocator).unwrap();

        group.bench_function(format!("f32_256x{}", cols), |bencher| {
            bencher.iter(|| element(Add, black_box(out.view_mut()), [a.view(), b.view()]))
        });
    }

    let closure = from_fn(|_, [a, b]: [f32; 2]| a + b);
    let a = random_tensor([256, 1024], &mut rng);
    let b = random_tensor([256, 1024], &mut rng);
    let mut out = Tensor::<f32, 2, _>::zeros([256, 1024], CpuAllocator).unwrap();
    group.bench_function("from_fn_f32_256x1024", |bencher| {
        bencher.iter(|| element(&closure, black_box(out.view_mut()), [a.view(), b.view()]))
    });

    group.finish();
}

fn bench_broadcast(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcast");
    let mut rng = rand::rng();

    let x = random_tensor([64, 64, 32], &mut rng);
    let row = random_tensor([1, 1, 32], &mut rng);
    let col = random_tensor([64, 64, 1], &mut rng);
    let mut out = Tensor::<f32, 3, _>::zeros([64, 64, 32], CpuAllocator).unwrap();

    group.bench_function("row_64x64x32", |bencher| {
        bencher.iter(|| element(Add, black_box(out.view_mut()), [x.view(), row.view()]))
    });

    group.bench_function("column_64x64x32", |bencher| {
        bencher.iter(|| element(Add, black_box(out.view_mut()), [x.view(), col.view()]))
    });

    group.bench_function("mul_add_64x64x32", |bencher| {
        bencher.iter(|| {
            element(
                MulAdd,
                black_box(out.view_mut()),
                [x.view(), row.view(), x.view()],
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_add, bench_broadcast);
criterion_main!(benches);
