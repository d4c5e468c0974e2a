#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! A single entry point, [`element`], applies a [`Functor`] over one output tensor and any
//! number of input tensors of the same rank. Inputs with a size-1 dimension are broadcast
//! along it without materializing the repetition: the walk simply does not advance through
//! that dimension.
//!
//! Three decisions are taken per call:
//!
//! 1. **Element type**: the output's runtime [`DataType`](lanewise_tensor::DataType) selects
//!    the kernel family. Only `float32` has one; any other type is fatal.
//! 2. **Lane width**: [`select_lane_width`] picks 8, 4 or 1 elements per functor
//!    invocation from the innermost dimension sizes.
//! 3. **Walk**: [`engine::walk`] visits every output position once in row-major order.
//!
//! # Example
//!
//! ```rust
//! use lanewise_element::{element, from_fn};
//! use lanewise_tensor::{CpuAllocator, Tensor2};
//!
//! let x = Tensor2::<f32, _>::from_shape_vec([3, 1], vec![1.0, 2.0, 3.0], CpuAllocator)?;
//! let y = Tensor2::<f32, _>::from_shape_vec([1, 4], vec![0.0, 10.0, 20.0, 30.0], CpuAllocator)?;
//! let mut out = Tensor2::<f32, _>::zeros([3, 4], CpuAllocator)?;
//!
//! element(from_fn(|_, [x, y]: [f32; 2]| x + y), out.view_mut(), [x.view(), y.view()]);
//! assert_eq!(out.get([2, 3]), Some(&33.0));
//! # Ok::<(), lanewise_tensor::TensorError>(())
//! ```

/// Type and lane-width dispatch, the public entry points.
pub mod dispatch;

/// The broadcast-aware walk over a fixed rank.
pub mod engine;

/// Error types for element-wise operations.
///
/// Defines [`ElementError`] for calls rejected before any element is written.
pub mod error;

/// The [`Functor`] trait and the stock functors.
pub mod functor;

/// Lane widths and the scalar and vector execution families.
pub mod lane;

pub use dispatch::{element, element_float32, select_lane_width, try_element};
pub use error::ElementError;
pub use functor::{
    from_fn, Abs, Accumulate, Add, AddScaled, Assign, Div, FromFn, Functor, Max, Min, Mul,
    MulAdd, Neg, Relu, Scale, Sqrt, Sub, Sum,
};
pub use lane::{LaneValue, LaneWidth, Lanes};
