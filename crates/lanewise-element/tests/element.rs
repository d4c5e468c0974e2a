use approx::assert_relative_eq;
use lanewise_element::{element, from_fn, try_element, AddScaled, ElementError, Sub, Sum};
use lanewise_tensor::{CpuAllocator, Shape, Tensor, TensorView};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_tensor<const N: usize>(
    shape: [usize; N],
    rng: &mut StdRng,
) -> Result<Tensor<f32, N, CpuAllocator>, ElementError> {
    let numel = shape.iter().product::<usize>();
    let data = (0..numel).map(|_| rng.random_range(-10.0..10.0)).collect();
    Ok(Tensor::from_shape_vec(shape, data, CpuAllocator)?)
}

/// Reads `t` at an output index, clamping broadcast axes to 0.
fn broadcast_get<const N: usize>(t: &Tensor<f32, N, CpuAllocator>, index: [usize; N]) -> f32 {
    let dims = t.shape.dims();
    let index = std::array::from_fn(|i| if dims[i] == 1 { 0 } else { index[i] });
    t.get(index).copied().unwrap_or(f32::NAN)
}

#[test]
fn test_matches_naive_broadcast() -> Result<(), ElementError> {
    let mut rng = StdRng::seed_from_u64(7);

    let cases = [
        ([2, 3, 8], [2, 3, 8]),
        ([2, 1, 8], [1, 5, 8]),
        ([4, 3, 1], [4, 1, 12]),
        ([1, 1, 1], [3, 2, 5]),
        ([3, 7, 1], [3, 1, 1]),
        ([1, 6, 4], [5, 6, 4]),
    ];

    for (sa, sb) in cases {
        let out_shape = Shape::new(sa).broadcast(&Shape::new(sb))?;
        let a = random_tensor(sa, &mut rng)?;
        let b = random_tensor(sb, &mut rng)?;
        let mut out = Tensor::<f32, 3, _>::zeros(out_shape.dims(), CpuAllocator)?;

        try_element(Sub, out.view_mut(), [a.view(), b.view()])?;

        let [d0, d1, d2] = out_shape.dims();
        for i in 0..d0 {
            for j in 0..d1 {
                for k in 0..d2 {
                    let expected = broadcast_get(&a, [i, j, k]) - broadcast_get(&b, [i, j, k]);
                    assert_eq!(
                        out.get([i, j, k]),
                        Some(&expected),
                        "{sa:?} - {sb:?} at [{i}, {j}, {k}]"
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_lower_rank_operand_padded() -> Result<(), ElementError> {
    let bias = [1.0f32, 2.0, 3.0, 4.0];
    let bias_shape = Shape::<2>::from_dims_padded(&[4])?;
    assert_eq!(bias_shape.dims(), [1, 4]);

    let x = Tensor::<f32, 2, _>::from_shape_fn([3, 4], CpuAllocator, |[r, _]| r as f32 * 10.0)?;
    let mut out = Tensor::<f32, 2, _>::zeros([3, 4], CpuAllocator)?;

    element(
        Sum,
        out.view_mut(),
        [x.view(), TensorView::from_slice(bias_shape.dims(), &bias[..])?],
    );

    assert_eq!(
        out.as_slice(),
        vec![1.0, 2.0, 3.0, 4.0, 11.0, 12.0, 13.0, 14.0, 21.0, 22.0, 23.0, 24.0]
    );
    Ok(())
}

#[test]
fn test_axpy_in_place() -> Result<(), ElementError> {
    let mut rng = StdRng::seed_from_u64(42);
    let x = random_tensor([4, 16], &mut rng)?;
    let y0 = random_tensor([4, 16], &mut rng)?;

    let mut y = y0.clone();
    try_element(AddScaled(0.25), y.view_mut(), [x.view()])?;

    for ((&y, &y0), &x) in y.as_slice().iter().zip(y0.as_slice()).zip(x.as_slice()) {
        assert_relative_eq!(y, y0 + 0.25 * x, epsilon = 1e-5);
    }
    Ok(())
}

#[test]
fn test_many_inputs() -> Result<(), ElementError> {
    let mut rng = StdRng::seed_from_u64(3);
    let t: Vec<_> = (0..5)
        .map(|_| random_tensor([2, 4], &mut rng))
        .collect::<Result<_, _>>()?;
    let mut out = Tensor::<f32, 2, _>::zeros([2, 4], CpuAllocator)?;

    try_element(
        Sum,
        out.view_mut(),
        [t[0].view(), t[1].view(), t[2].view(), t[3].view(), t[4].view()],
    )?;

    for i in 0..8 {
        let expected = t.iter().fold(0.0, |acc, t| acc + t.as_slice()[i]);
        assert_relative_eq!(out.as_slice()[i], expected, epsilon = 1e-5);
    }
    Ok(())
}

#[test]
fn test_closure_functor_sees_output() -> Result<(), ElementError> {
    let x = Tensor::<f32, 1, _>::from_shape_vec(
        [8],
        (0..8).map(|i| i as f32).collect(),
        CpuAllocator,
    )?;
    let mut out = Tensor::<f32, 1, _>::from_shape_val([8], 100.0, CpuAllocator)?;

    let keep_larger = from_fn(|out, [x]: [f32; 1]| if x * 20.0 > out { x * 20.0 } else { out });
    try_element(keep_larger, out.view_mut(), [x.view()])?;

    assert_eq!(
        out.as_slice(),
        vec![100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 120.0, 140.0]
    );
    Ok(())
}

#[test]
#[should_panic(expected = "cannot be broadcast to output shape")]
fn test_incompatible_shape_is_fatal() {
    let a = [0.0f32; 6];
    let mut out = [0.0f32; 4];
    element(
        Sum,
        lanewise_tensor::TensorViewMut::from_slice_mut([4], &mut out[..]).unwrap(),
        [TensorView::from_slice([6], &a[..]).unwrap()],
    );
}
