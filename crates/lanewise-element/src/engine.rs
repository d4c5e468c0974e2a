use lanewise_tensor::Shape;

use crate::{functor::Functor, lane::Lanes};

/// Applies `functor` at every position of `out_shape`, reading the inputs through their
/// broadcast strides.
///
/// The walk keeps one flat offset per operand. Along the innermost axis it runs a tight loop
/// over lane groups; the outer axes advance like an odometer, adding each operand's
/// broadcast stride when a counter ticks and rewinding the offset when it wraps. A size-1
/// input axis has broadcast stride 0, so its data is revisited instead of advanced. Rank 0
/// calls the functor exactly once.
///
/// Positions are visited in row-major order of the output shape and every output element
/// is written exactly once.
///
/// # Arguments
///
/// * `functor` - The computation, receiving the current output value and one value per input.
/// * `out` - The output data, row-major with shape `out_shape`.
/// * `out_shape` - The shape of the output; it is never broadcast.
/// * `inputs` - The input data, row-major with shapes `input_shapes`.
/// * `input_shapes` - The shapes of the inputs, each broadcastable to `out_shape`.
///
/// # Panics
///
/// Panics on an out-of-bounds access if the slices do not match their shapes, if an input
/// is not broadcastable to the output, or if the lane width of `L` does not divide the
/// innermost size of every operand. The dispatch layer checks all of these before walking.
pub fn walk<L, F, const N: usize, const M: usize>(
    functor: &F,
    out: &mut [f32],
    out_shape: &Shape<N>,
    inputs: &[&[f32]; M],
    input_shapes: &[Shape<N>; M],
) where
    L: Lanes,
    F: Functor<M>,
{
    log::trace!("walk {} over {} with {} inputs", L::WIDTH, out_shape, M);

    if out_shape.numel() == 0 {
        return;
    }

    if N == 0 {
        let args = std::array::from_fn(|k| L::load(inputs[k], 0));
        let value = functor.apply(L::load(out, 0), args);
        L::store(out, 0, value);
        return;
    }

    let dims = out_shape.dims();
    let out_bstrides = out_shape.bstrides();
    let in_bstrides: [[usize; N]; M] = std::array::from_fn(|k| input_shapes[k].bstrides());

    let lanes = L::WIDTH.lanes();
    let inner = N - 1;
    let groups = dims[inner] / lanes;
    let out_step = out_bstrides[inner] * lanes;
    let in_steps: [usize; M] = std::array::from_fn(|k| in_bstrides[k][inner] * lanes);

    let mut counters = [0usize; N];
    let mut out_offset = 0usize;
    let mut offsets = [0usize; M];

    loop {
        let mut o = out_offset;
        let mut ix = offsets;
        for _ in 0..groups {
            let args = std::array::from_fn(|k| L::load(inputs[k], ix[k]));
            let value = functor.apply(L::load(out, o), args);
            L::store(out, o, value);

            o += out_step;
            for (i, step) in ix.iter_mut().zip(in_steps.iter()) {
                *i += step;
            }
        }

        // advance the outer axes, innermost first
        let mut axis = inner;
        loop {
            if axis == 0 {
                return;
            }
            axis -= 1;

            counters[axis] += 1;
            out_offset += out_bstrides[axis];
            for (offset, bstrides) in offsets.iter_mut().zip(in_bstrides.iter()) {
                *offset += bstrides[axis];
            }

            if counters[axis] < dims[axis] {
                break;
            }

            counters[axis] = 0;
            out_offset -= dims[axis] * out_bstrides[axis];
            for (offset, bstrides) in offsets.iter_mut().zip(in_bstrides.iter()) {
                *offset -= dims[axis] * bstrides[axis];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use lanewise_tensor::Shape;

    use super::walk;
    use crate::{
        functor::{from_fn, Add, Functor},
        lane::{Float32, Float32x4, Float32x8, LaneValue},
    };

    /// Writes a running counter, exposing the visiting order.
    struct Order(RefCell<f32>);

    impl Functor<0> for Order {
        fn apply<V: LaneValue>(&self, _out: V, _args: [V; 0]) -> V {
            let mut next = self.0.borrow_mut();
            let value = V::from_lanes(|i| *next + i as f32);
            *next += V::LANES as f32;
            value
        }
    }

    #[test]
    fn test_broadcast_row_over_matrix() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [10.0, 20.0, 30.0];
        let mut out = [0.0; 6];
        walk::<Float32, _, 2, 2>(
            &Add,
            &mut out,
            &Shape::new([2, 3]),
            &[&a[..], &b[..]],
            &[Shape::new([2, 3]), Shape::new([1, 3])],
        );
        assert_eq!(out, [11.0, 22.0, 33.0, 14.0, 25.0, 36.0]);
    }

    #[test]
    fn test_broadcast_column_over_matrix() {
        let col = [1.0, 2.0, 3.0];
        let m: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let mut out = [0.0; 12];
        walk::<Float32, _, 2, 2>(
            &Add,
            &mut out,
            &Shape::new([3, 4]),
            &[&col[..], &m[..]],
            &[Shape::new([3, 1]), Shape::new([3, 4])],
        );
        for r in 0..3 {
            for c in 0..4 {
                assert_eq!(out[r * 4 + c], col[r] + m[r * 4 + c]);
            }
        }
    }

    #[test]
    fn test_visits_in_row_major_order() {
        let mut out = [0.0; 24];
        walk::<Float32, _, 3, 0>(
            &Order(RefCell::new(0.0)),
            &mut out,
            &Shape::new([2, 3, 4]),
            &[],
            &[],
        );
        let expected: Vec<f32> = (0..24).map(|i| i as f32).collect();
        assert_eq!(out.to_vec(), expected);

        let mut out = [0.0; 24];
        walk::<Float32x4, _, 3, 0>(
            &Order(RefCell::new(0.0)),
            &mut out,
            &Shape::new([2, 3, 4]),
            &[],
            &[],
        );
        assert_eq!(out.to_vec(), expected);
    }

    #[test]
    fn test_vector_walk_broadcasts_outer_axes() {
        let row: Vec<f32> = (0..8).map(|i| i as f32).collect();
        let bias: Vec<f32> = (0..16).map(|i| if i < 8 { 100.0 } else { 200.0 }).collect();
        let mut out = vec![0.0; 16];
        let shift = from_fn(|_out, [x, b]: [f32; 2]| x + b);
        walk::<Float32x8, _, 3, 2>(
            &shift,
            &mut out,
            &Shape::new([2, 1, 8]),
            &[&row[..], &bias[..]],
            &[Shape::new([1, 1, 8]), Shape::new([2, 1, 8])],
        );
        for i in 0..2 {
            for j in 0..8 {
                assert_eq!(out[i * 8 + j], j as f32 + bias[i * 8]);
            }
        }
    }

    #[test]
    fn test_rank_zero_calls_once() {
        let mut out = [5.0];
        walk::<Float32, _, 0, 2>(
            &Add,
            &mut out,
            &Shape::new([]),
            &[&[1.5][..], &[2.0][..]],
            &[Shape::new([]); 2],
        );
        assert_eq!(out, [3.5]);
    }

    #[test]
    fn test_empty_output_is_untouched() {
        let mut out: [f32; 0] = [];
        walk::<Float32x8, _, 2, 0>(
            &Order(RefCell::new(0.0)),
            &mut out,
            &Shape::new([0, 8]),
            &[],
            &[],
        );
    }
}
