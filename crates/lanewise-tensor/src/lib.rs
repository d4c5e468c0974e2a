#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `lanewise-tensor` is the indexing layer under the element-wise kernels of `lanewise`. It
//! provides fixed-rank shapes with broadcast-aware strides, allocator-backed owned tensors
//! and type-erased views carrying a runtime element type tag.
//!
//! # Architecture
//!
//! - **Shape**: dimension sizes, row-major strides and broadcast strides for a rank `N`
//!   known at compile time. Axes accept negative indices.
//! - **Tensor**: owned data in a [`storage::TensorStorage`] plus a [`Shape`].
//! - **TensorView / TensorViewMut**: non-owning `(shape, pointer, data type)` triples handed
//!   to kernels that dispatch on the element type at runtime.
//! - **TensorAllocator**: trait-based memory allocation, [`CpuAllocator`] by default.
//!
//! # Quick Start
//!
//! ```rust
//! use lanewise_tensor::{CpuAllocator, DataType, Tensor};
//!
//! let t = Tensor::<f32, 2, _>::from_shape_vec([3, 1], vec![1.0, 2.0, 3.0], CpuAllocator)
//!     .unwrap();
//!
//! // the size-1 axis is broadcast: it has no stride in a broadcast walk
//! assert_eq!(t.shape.bstrides(), [1, 0]);
//!
//! let view = t.view();
//! assert_eq!(view.data_type(), DataType::Float32);
//! assert_eq!(view.typed::<f32>().unwrap(), &[1.0, 2.0, 3.0]);
//! ```

/// Allocator module containing memory management utilities.
///
/// This module provides the [`TensorAllocator`] trait and the [`CpuAllocator`] backed by the
/// system allocator.
pub mod allocator;

/// Element type tags and the [`Element`] trait.
pub mod dtype;

/// Fixed-rank shapes with row-major and broadcast strides.
pub mod shape;

/// Storage module containing the allocator-backed element buffer.
pub mod storage;

/// Tensor module containing the owned tensor and the error type.
pub mod tensor;

/// Type-erased, non-owning views consumed by kernels.
pub mod view;

pub use crate::allocator::{CpuAllocator, TensorAllocator, TensorAllocatorError};
pub use crate::dtype::{DataType, Element};
pub use crate::shape::Shape;
pub use crate::tensor::{Tensor, TensorError};
pub use crate::view::{TensorView, TensorViewMut};

/// Type alias for a 1-dimensional tensor.
pub type Tensor1<T, A> = Tensor<T, 1, A>;

/// Type alias for a 2-dimensional tensor.
pub type Tensor2<T, A> = Tensor<T, 2, A>;

/// Type alias for a 3-dimensional tensor.
pub type Tensor3<T, A> = Tensor<T, 3, A>;
