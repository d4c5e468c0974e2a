#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! ```rust
//! use lanewise::element::{element, Mul};
//! use lanewise::tensor::{CpuAllocator, Tensor2};
//!
//! let a = Tensor2::<f32, _>::from_shape_val([2, 4], 3.0, CpuAllocator)?;
//! let b = Tensor2::<f32, _>::from_shape_vec([2, 1], vec![1.0, 2.0], CpuAllocator)?;
//! let mut out = Tensor2::<f32, _>::zeros([2, 4], CpuAllocator)?;
//!
//! element(Mul, out.view_mut(), [a.view(), b.view()]);
//! assert_eq!(out.as_slice(), [3.0, 3.0, 3.0, 3.0, 6.0, 6.0, 6.0, 6.0]);
//! # Ok::<(), lanewise::tensor::TensorError>(())
//! ```

#[doc(inline)]
pub use lanewise_tensor as tensor;

#[doc(inline)]
pub use lanewise_element as element;
