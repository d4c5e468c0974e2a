use lanewise_tensor::{DataType, Shape, TensorError, TensorView, TensorViewMut};

use crate::{
    engine::walk,
    error::ElementError,
    functor::Functor,
    lane::{Float32, Float32x4, Float32x8, LaneWidth},
};

/// Chooses the widest lane width that splits the innermost dimension of every operand into
/// whole groups.
///
/// The output and all inputs participate. A single operand whose innermost size is not a
/// multiple of 4, including a size-1 axis broadcast along the innermost dimension, makes the
/// whole call scalar. Rank 0 is always scalar.
///
/// # Examples
///
/// ```rust
/// use lanewise_element::{select_lane_width, LaneWidth};
/// use lanewise_tensor::Shape;
///
/// let out = Shape::new([3, 16]);
/// assert_eq!(select_lane_width(&out, &[&Shape::new([1, 16])]), LaneWidth::X8);
/// assert_eq!(select_lane_width(&out, &[&Shape::new([3, 1])]), LaneWidth::Scalar);
/// ```
pub fn select_lane_width<const N: usize>(out: &Shape<N>, inputs: &[&Shape<N>]) -> LaneWidth {
    if N == 0 {
        return LaneWidth::Scalar;
    }

    let inner = N - 1;
    let fits = |width: LaneWidth| {
        std::iter::once(out)
            .chain(inputs.iter().copied())
            .all(|shape| width.divides(shape.dims()[inner]))
    };

    if fits(LaneWidth::X8) {
        LaneWidth::X8
    } else if fits(LaneWidth::X4) {
        LaneWidth::X4
    } else {
        LaneWidth::Scalar
    }
}

/// Runs `functor` over `f32` data, picking the lane width with [`select_lane_width`].
///
/// The slices hold row-major data of their shapes and every input shape must be
/// broadcastable to `out_shape`; [`try_element`] checks this for views.
///
/// # Panics
///
/// Panics if a slice is shorter than its shape requires.
pub fn element_float32<F, const N: usize, const M: usize>(
    functor: &F,
    out: &mut [f32],
    out_shape: &Shape<N>,
    inputs: &[&[f32]; M],
    input_shapes: &[Shape<N>; M],
) where
    F: Functor<M>,
{
    let shapes: [&Shape<N>; M] = std::array::from_fn(|k| &input_shapes[k]);
    let width = select_lane_width(out_shape, &shapes);

    log::debug!("element-wise {} with {} inputs at lane width {}", out_shape, M, width);

    match width {
        LaneWidth::X8 => walk::<Float32x8, F, N, M>(functor, out, out_shape, inputs, input_shapes),
        LaneWidth::X4 => walk::<Float32x4, F, N, M>(functor, out, out_shape, inputs, input_shapes),
        LaneWidth::Scalar => {
            walk::<Float32, F, N, M>(functor, out, out_shape, inputs, input_shapes)
        }
    }
}

/// Applies `functor` element-wise over `out` and `inputs`, broadcasting size-1 input
/// dimensions.
///
/// The output is written in place, one value per position, in row-major order. The functor
/// receives the current output value and the input values at that position.
///
/// # Arguments
///
/// * `functor` - The computation to apply.
/// * `out` - The output view. Its element type selects the kernel.
/// * `inputs` - The input views, each broadcastable to the output shape.
///
/// # Errors
///
/// Nothing is written when an error is returned.
///
/// - [`ElementError::UnsupportedDataType`] if the output is not `float32`.
/// - [`ElementError::TensorError`] wrapping [`TensorError::InvalidShape`] if a view holds a
///   different number of elements than its shape describes.
/// - [`ElementError::DataTypeMismatch`] if an input has another element type than the output.
/// - [`ElementError::ShapeMismatch`] if an input is not broadcastable to the output shape.
///
/// # Examples
///
/// ```rust
/// use lanewise_element::{try_element, Add};
/// use lanewise_tensor::{CpuAllocator, Tensor2};
///
/// let a = Tensor2::<f32, _>::from_shape_vec([2, 3], vec![1., 2., 3., 4., 5., 6.], CpuAllocator)?;
/// let b = Tensor2::<f32, _>::from_shape_vec([1, 3], vec![10., 20., 30.], CpuAllocator)?;
/// let mut out = Tensor2::<f32, _>::zeros([2, 3], CpuAllocator)?;
///
/// try_element(Add, out.view_mut(), [a.view(), b.view()])?;
/// assert_eq!(out.as_slice(), [11., 22., 33., 14., 25., 36.]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn try_element<F, const N: usize, const M: usize>(
    functor: F,
    mut out: TensorViewMut<'_, N>,
    inputs: [TensorView<'_, N>; M],
) -> Result<(), ElementError>
where
    F: Functor<M>,
{
    let data_type = out.data_type();
    if data_type != DataType::Float32 {
        return Err(ElementError::UnsupportedDataType(data_type));
    }

    let out_shape = *out.shape();
    if out_shape.numel() != out.len() {
        return Err(TensorError::invalid_shape(out_shape.numel(), out.len()).into());
    }

    for (index, input) in inputs.iter().enumerate() {
        if input.data_type() != data_type {
            return Err(ElementError::DataTypeMismatch {
                index,
                expected: data_type,
                actual: input.data_type(),
            });
        }
        if input.shape().numel() != input.len() {
            return Err(TensorError::invalid_shape(input.shape().numel(), input.len()).into());
        }
        if !input.shape().is_broadcastable_to(&out_shape) {
            return Err(ElementError::ShapeMismatch {
                index,
                input: input.shape().dims().to_vec(),
                output: out_shape.dims().to_vec(),
            });
        }
    }

    let mut srcs: [&[f32]; M] = [Default::default(); M];
    for (src, input) in srcs.iter_mut().zip(inputs.iter()) {
        *src = input.typed::<f32>()?;
    }
    let input_shapes = inputs.map(|input| *input.shape());

    element_float32(
        &functor,
        out.typed_mut::<f32>()?,
        &out_shape,
        &srcs,
        &input_shapes,
    );

    Ok(())
}

/// Applies `functor` element-wise over `out` and `inputs`, see [`try_element`].
///
/// # Panics
///
/// Any error of [`try_element`] is fatal: it is logged and the call panics with the error
/// message, e.g. `Unsupported data type for element-wise operation: int32`. The output is
/// left untouched in that case.
///
/// # Examples
///
/// ```rust
/// use lanewise_element::{element, Relu};
/// use lanewise_tensor::{TensorView, TensorViewMut};
///
/// let x = [-1.0f32, 2.0, -3.0, 4.0];
/// let mut y = [0.0f32; 4];
/// element(
///     Relu,
///     TensorViewMut::from_slice_mut([4], &mut y[..]).unwrap(),
///     [TensorView::from_slice([4], &x[..]).unwrap()],
/// );
/// assert_eq!(y, [0.0, 2.0, 0.0, 4.0]);
/// ```
pub fn element<F, const N: usize, const M: usize>(
    functor: F,
    out: TensorViewMut<'_, N>,
    inputs: [TensorView<'_, N>; M],
) where
    F: Functor<M>,
{
    if let Err(e) = try_element(functor, out, inputs) {
        log::error!("{e}");
        panic!("{e}");
    }
}
