use thiserror::Error;

use super::{
    allocator::{TensorAllocator, TensorAllocatorError},
    dtype::{DataType, Element},
    shape::Shape,
    storage::TensorStorage,
    view::{TensorView, TensorViewMut},
};

/// Error type for tensor creation, indexing and view operations.
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    /// Tensor shape does not match the provided data.
    ///
    /// The product of the shape dimensions must equal the number of elements exactly.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// An axis, possibly negative, does not address a dimension.
    #[error("Axis {axis} is out of range for a tensor of rank {rank}")]
    AxisOutOfRange {
        /// The axis that was requested
        axis: isize,
        /// The rank of the tensor
        rank: usize,
    },

    /// More dimensions were given than the tensor rank can hold.
    #[error("Rank {rank} exceeds the maximum rank {max}")]
    RankExceeded {
        /// The number of dimensions given
        rank: usize,
        /// The rank of the target shape
        max: usize,
    },

    /// Underlying storage operation failed.
    #[error("Storage error: {0}")]
    StorageError(#[from] TensorAllocatorError),

    /// Tensor dimensions incompatible for the requested operation.
    ///
    /// Raised for example when two shapes are not broadcastable against each other.
    #[error("Dimension mismatch: {message}. Expected shape: {expected}, got: {actual}")]
    DimensionMismatch {
        /// Human-readable description of the mismatch
        message: String,
        /// Expected shape description
        expected: String,
        /// Actual shape description
        actual: String,
    },

    /// A view was accessed with an element type different from the one it carries.
    #[error("Data type mismatch: tensor holds {actual}, requested {expected}")]
    DataTypeMismatch {
        /// The requested element type
        expected: DataType,
        /// The element type of the tensor
        actual: DataType,
    },
}

impl TensorError {
    /// Creates an InvalidShape error.
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }

    /// Creates a DimensionMismatch error with formatted shapes.
    pub fn dimension_mismatch(
        message: impl Into<String>,
        expected: &[usize],
        actual: &[usize],
    ) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        }
    }
}

/// A multi-dimensional array of fixed rank `N` owning its data.
///
/// The tensor combines allocator-backed storage with a [`Shape`]. Data is laid out in
/// row-major order. Element-wise kernels do not consume tensors directly but through the
/// type-erased [`TensorView`] / [`TensorViewMut`] obtained with [`Tensor::view`] and
/// [`Tensor::view_mut`].
///
/// # Examples
///
/// ```rust
/// use lanewise_tensor::{CpuAllocator, Tensor};
///
/// let t = Tensor::<f32, 2, _>::from_shape_vec([2, 3], vec![1., 2., 3., 4., 5., 6.], CpuAllocator)
///     .unwrap();
/// assert_eq!(t.shape.dims(), [2, 3]);
/// assert_eq!(t.get([1, 2]), Some(&6.0));
/// ```
pub struct Tensor<T, const N: usize, A: TensorAllocator> {
    /// The storage of the tensor.
    pub storage: TensorStorage<T, A>,
    /// The shape of the tensor.
    pub shape: Shape<N>,
}

impl<T, const N: usize, A: TensorAllocator> Tensor<T, N, A> {
    /// Creates a new `Tensor` with the given shape and data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an error
    /// is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use lanewise_tensor::{CpuAllocator, Tensor2};
    ///
    /// let t = Tensor2::<u8, _>::from_shape_vec([2, 2], vec![1, 2, 3, 4], CpuAllocator).unwrap();
    /// assert_eq!(t.shape.dims(), [2, 2]);
    /// ```
    pub fn from_shape_vec(shape: [usize; N], data: Vec<T>, alloc: A) -> Result<Self, TensorError> {
        let shape = Shape::new(shape);
        let numel = shape.numel();
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        let storage = TensorStorage::from_vec(data, alloc)?;
        Ok(Self { storage, shape })
    }

    /// Creates a new `Tensor` with every element set to `value`.
    ///
    /// # Example
    ///
    /// ```
    /// use lanewise_tensor::{CpuAllocator, Tensor3};
    ///
    /// let t = Tensor3::<u8, _>::from_shape_val([2, 1, 3], 2, CpuAllocator).unwrap();
    /// assert_eq!(t.as_slice(), vec![2, 2, 2, 2, 2, 2]);
    /// ```
    pub fn from_shape_val(shape: [usize; N], value: T, alloc: A) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        let numel = shape.iter().product::<usize>();
        Self::from_shape_vec(shape, vec![value; numel], alloc)
    }

    /// Creates a new `Tensor` by calling `f` with the index of every element in row-major
    /// order.
    ///
    /// # Example
    ///
    /// ```
    /// use lanewise_tensor::{CpuAllocator, Tensor2};
    ///
    /// let t = Tensor2::<u8, _>::from_shape_fn([2, 2], CpuAllocator, |[i, j]| (i * 2 + j) as u8)
    ///     .unwrap();
    /// assert_eq!(t.as_slice(), vec![0, 1, 2, 3]);
    /// ```
    pub fn from_shape_fn<F>(shape: [usize; N], alloc: A, f: F) -> Result<Self, TensorError>
    where
        F: Fn([usize; N]) -> T,
    {
        let numel = shape.iter().product::<usize>();
        let data: Vec<T> = (0..numel)
            .map(|i| {
                let mut index = [0; N];
                let mut j = i;
                for k in (0..N).rev() {
                    index[k] = j % shape[k];
                    j /= shape[k];
                }
                f(index)
            })
            .collect();
        Self::from_shape_vec(shape, data, alloc)
    }

    /// Create a new tensor with all elements set to zero.
    pub fn zeros(shape: [usize; N], alloc: A) -> Result<Self, TensorError>
    where
        T: Clone + num_traits::Zero,
    {
        Self::from_shape_val(shape, T::zero(), alloc)
    }

    /// Get the data of the tensor as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Get the data of the tensor as a mutable slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// Copies the data of the tensor into a vector.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.storage.to_vec()
    }

    /// Returns the number of elements in the tensor.
    #[inline]
    pub fn numel(&self) -> usize {
        self.storage.len()
    }

    /// Get the offset of the element at the given index, `None` if any index is out of
    /// bounds.
    pub fn get_iter_offset(&self, index: [usize; N]) -> Option<usize> {
        let mut offset = 0;
        for ((&idx, dim_size), stride) in index
            .iter()
            .zip(self.shape.dims())
            .zip(self.shape.strides())
        {
            if idx >= dim_size {
                return None;
            }
            offset += idx * stride;
        }
        Some(offset)
    }

    /// Get the element at the given index, checking if the index is out of bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use lanewise_tensor::{CpuAllocator, Tensor2};
    ///
    /// let t = Tensor2::<u8, _>::from_shape_vec([2, 2], vec![1, 2, 3, 4], CpuAllocator).unwrap();
    /// assert_eq!(t.get([1, 0]), Some(&3));
    /// assert!(t.get([2, 0]).is_none());
    /// ```
    pub fn get(&self, index: [usize; N]) -> Option<&T> {
        self.get_iter_offset(index)
            .and_then(|i| self.as_slice().get(i))
    }

    /// Get the element at the given index without checking the bounds.
    ///
    /// # Safety
    ///
    /// Every index must be smaller than the size of its dimension.
    pub unsafe fn get_unchecked(&self, index: [usize; N]) -> &T {
        let offset = index
            .iter()
            .zip(self.shape.strides())
            .fold(0, |acc, (&idx, stride)| acc + idx * stride);
        // SAFETY: the caller keeps every index within its dimension.
        unsafe { self.as_slice().get_unchecked(offset) }
    }

    /// Returns the element type tag of the tensor.
    #[inline]
    pub fn data_type(&self) -> DataType
    where
        T: Element,
    {
        T::DATA_TYPE
    }

    /// Returns a type-erased, read-only view of the tensor.
    pub fn view(&self) -> TensorView<'_, N>
    where
        T: Element,
    {
        TensorView::from_parts(self.shape, self.as_slice())
    }

    /// Returns a type-erased, writable view of the tensor.
    pub fn view_mut(&mut self) -> TensorViewMut<'_, N>
    where
        T: Element,
    {
        let shape = self.shape;
        TensorViewMut::from_parts(shape, self.as_slice_mut())
    }
}

impl<T: Clone, const N: usize, A: TensorAllocator> Clone for Tensor<T, N, A> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            shape: self.shape,
        }
    }
}

impl<T: std::fmt::Debug, const N: usize, A: TensorAllocator> std::fmt::Debug for Tensor<T, N, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape.dims())
            .field("data", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::allocator::CpuAllocator;
    use crate::dtype::DataType;
    use crate::tensor::TensorError;
    use crate::{Tensor, Tensor1, Tensor2, Tensor3};

    #[test]
    fn test_constructor_1d() -> Result<(), TensorError> {
        let t = Tensor1::<u8, _>::from_shape_vec([1], vec![1], CpuAllocator)?;
        assert_eq!(t.shape.dims(), [1]);
        assert_eq!(t.as_slice(), vec![1]);
        assert_eq!(t.shape.strides(), [1]);
        assert_eq!(t.numel(), 1);
        Ok(())
    }

    #[test]
    fn test_constructor_2d() -> Result<(), TensorError> {
        let t = Tensor2::<u8, _>::from_shape_vec([1, 2], vec![1, 2], CpuAllocator)?;
        assert_eq!(t.shape.dims(), [1, 2]);
        assert_eq!(t.as_slice(), vec![1, 2]);
        assert_eq!(t.shape.strides(), [2, 1]);
        assert_eq!(t.numel(), 2);
        Ok(())
    }

    #[test]
    fn test_constructor_rank_0() -> Result<(), TensorError> {
        let t = Tensor::<f32, 0, _>::from_shape_vec([], vec![3.5], CpuAllocator)?;
        assert_eq!(t.numel(), 1);
        assert_eq!(t.get([]), Some(&3.5));
        Ok(())
    }

    #[test]
    fn test_constructor_invalid_shape() {
        let res = Tensor2::<u8, _>::from_shape_vec([2, 3], vec![1, 2, 3, 4, 5], CpuAllocator);
        assert_eq!(res.err(), Some(TensorError::invalid_shape(6, 5)));
    }

    #[test]
    fn test_get_3d() -> Result<(), TensorError> {
        let data: Vec<u8> = vec![1, 2, 3, 4, 5, 6];
        let t = Tensor3::<u8, _>::from_shape_vec([2, 1, 3], data, CpuAllocator)?;
        assert_eq!(t.get([0, 0, 0]), Some(&1));
        assert_eq!(t.get([0, 0, 2]), Some(&3));
        assert_eq!(t.get([1, 0, 0]), Some(&4));
        assert_eq!(t.get([1, 0, 2]), Some(&6));
        assert!(t.get([2, 0, 0]).is_none());
        assert!(t.get([0, 1, 0]).is_none());
        assert!(t.get([0, 0, 3]).is_none());
        assert_eq!(unsafe { *t.get_unchecked([1, 0, 1]) }, 5);
        Ok(())
    }

    #[test]
    fn test_from_shape_fn_row_major() -> Result<(), TensorError> {
        let t = Tensor3::<u32, _>::from_shape_fn([2, 2, 2], CpuAllocator, |[i, j, k]| {
            (i * 100 + j * 10 + k) as u32
        })?;
        assert_eq!(t.as_slice(), vec![0, 1, 10, 11, 100, 101, 110, 111]);
        Ok(())
    }

    #[test]
    fn test_zeros_and_data_type() -> Result<(), TensorError> {
        let t = Tensor2::<f32, _>::zeros([2, 3], CpuAllocator)?;
        assert_eq!(t.as_slice(), vec![0.0; 6]);
        assert_eq!(t.data_type(), DataType::Float32);

        let t = Tensor2::<i32, _>::zeros([1, 1], CpuAllocator)?;
        assert_eq!(t.data_type(), DataType::Int32);
        Ok(())
    }

    #[test]
    fn test_clone_is_independent() -> Result<(), TensorError> {
        let mut a = Tensor1::<f32, _>::from_shape_vec([3], vec![1.0, 2.0, 3.0], CpuAllocator)?;
        let b = a.clone();
        a.as_slice_mut()[0] = 7.0;
        assert_eq!(a.as_slice(), vec![7.0, 2.0, 3.0]);
        assert_eq!(b.as_slice(), vec![1.0, 2.0, 3.0]);
        Ok(())
    }
}
