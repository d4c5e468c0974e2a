use std::{marker::PhantomData, ptr::NonNull};

use crate::{
    dtype::{DataType, Element},
    shape::Shape,
    tensor::TensorError,
};

/// A non-owning, type-erased, read-only view into tensor data.
///
/// A view is the triple (shape, raw element pointer, element type tag). It borrows the data
/// for `'a`, so the owner cannot be mutated or dropped while the view exists. The typed
/// elements are recovered with [`TensorView::typed`], which checks the tag first.
///
/// # Examples
///
/// ```rust
/// use lanewise_tensor::{DataType, TensorView};
///
/// let data = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let view = TensorView::from_slice([2, 3], &data).unwrap();
/// assert_eq!(view.data_type(), DataType::Float32);
/// assert_eq!(view.shape()[-1], 3);
/// assert_eq!(view.typed::<f32>().unwrap()[4], 5.0);
/// assert!(view.typed::<i32>().is_err());
/// ```
#[derive(Clone, Copy)]
pub struct TensorView<'a, const N: usize> {
    shape: Shape<N>,
    ptr: NonNull<u8>,
    len: usize,
    data_type: DataType,
    _marker: PhantomData<&'a [u8]>,
}

impl<'a, const N: usize> TensorView<'a, N> {
    /// Creates a view over a slice interpreted with the given shape.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::InvalidShape`] if the slice length differs from the number of
    /// elements of the shape.
    pub fn from_slice<T: Element>(shape: [usize; N], data: &'a [T]) -> Result<Self, TensorError> {
        let shape = Shape::new(shape);
        if shape.numel() != data.len() {
            return Err(TensorError::invalid_shape(shape.numel(), data.len()));
        }
        Ok(Self::from_parts(shape, data))
    }

    /// Wraps `data` without checking it against `shape`. The shape of a tensor is a public
    /// field, so consumers compare `shape().numel()` with `len()` before walking.
    pub(crate) fn from_parts<T: Element>(shape: Shape<N>, data: &'a [T]) -> Self {
        Self {
            shape,
            ptr: NonNull::from(data).cast::<u8>(),
            len: data.len(),
            data_type: T::DATA_TYPE,
            _marker: PhantomData,
        }
    }

    /// The shape of the viewed tensor.
    #[inline]
    pub fn shape(&self) -> &Shape<N> {
        &self.shape
    }

    /// The element type tag of the viewed tensor.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The number of viewed elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the view holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The broadcast stride of the dimension at `axis`, see [`Shape::bstride`].
    #[inline]
    pub fn bstride(&self, axis: isize) -> usize {
        self.shape.bstride(axis)
    }

    /// Recovers the typed elements in flat row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::DataTypeMismatch`] if `T` is not the element type of the view.
    pub fn typed<T: Element>(&self) -> Result<&'a [T], TensorError> {
        if T::DATA_TYPE != self.data_type {
            return Err(TensorError::DataTypeMismatch {
                expected: T::DATA_TYPE,
                actual: self.data_type,
            });
        }
        // SAFETY: the view was built from a `&'a [T]` of `len` elements with this tag.
        Ok(unsafe { std::slice::from_raw_parts(self.ptr.cast::<T>().as_ptr(), self.len) })
    }
}

// SAFETY: a view behaves like `&'a [T]` for an `Element` type, which is `Sync`.
unsafe impl<const N: usize> Send for TensorView<'_, N> {}
// SAFETY: see above.
unsafe impl<const N: usize> Sync for TensorView<'_, N> {}

impl<const N: usize> std::fmt::Debug for TensorView<'_, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorView")
            .field("shape", &self.shape.dims())
            .field("data_type", &self.data_type)
            .field("len", &self.len)
            .finish()
    }
}

/// A non-owning, type-erased, writable view into tensor data.
///
/// The view holds the only borrow of its data for `'a`, which makes it the exclusive writer
/// of the tensor while it lives.
pub struct TensorViewMut<'a, const N: usize> {
    shape: Shape<N>,
    ptr: NonNull<u8>,
    len: usize,
    data_type: DataType,
    _marker: PhantomData<&'a mut [u8]>,
}

impl<'a, const N: usize> TensorViewMut<'a, N> {
    /// Creates a writable view over a slice interpreted with the given shape.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::InvalidShape`] if the slice length differs from the number of
    /// elements of the shape.
    pub fn from_slice_mut<T: Element>(
        shape: [usize; N],
        data: &'a mut [T],
    ) -> Result<Self, TensorError> {
        let shape = Shape::new(shape);
        if shape.numel() != data.len() {
            return Err(TensorError::invalid_shape(shape.numel(), data.len()));
        }
        Ok(Self::from_parts(shape, data))
    }

    /// Wraps `data` without checking it against `shape`, see [`TensorView::from_parts`].
    pub(crate) fn from_parts<T: Element>(shape: Shape<N>, data: &'a mut [T]) -> Self {
        Self {
            shape,
            len: data.len(),
            ptr: NonNull::from(data).cast::<u8>(),
            data_type: T::DATA_TYPE,
            _marker: PhantomData,
        }
    }

    /// The shape of the viewed tensor.
    #[inline]
    pub fn shape(&self) -> &Shape<N> {
        &self.shape
    }

    /// The element type tag of the viewed tensor.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The number of viewed elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the view holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The broadcast stride of the dimension at `axis`, see [`Shape::bstride`].
    #[inline]
    pub fn bstride(&self, axis: isize) -> usize {
        self.shape.bstride(axis)
    }

    /// Reborrows the data as a read-only view.
    pub fn as_view(&self) -> TensorView<'_, N> {
        TensorView {
            shape: self.shape,
            ptr: self.ptr,
            len: self.len,
            data_type: self.data_type,
            _marker: PhantomData,
        }
    }

    /// Recovers the typed elements for writing.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::DataTypeMismatch`] if `T` is not the element type of the view.
    pub fn typed_mut<T: Element>(&mut self) -> Result<&mut [T], TensorError> {
        if T::DATA_TYPE != self.data_type {
            return Err(TensorError::DataTypeMismatch {
                expected: T::DATA_TYPE,
                actual: self.data_type,
            });
        }
        // SAFETY: the view was built from a `&'a mut [T]` of `len` elements with this tag and
        // the returned borrow is tied to `&mut self`.
        Ok(unsafe { std::slice::from_raw_parts_mut(self.ptr.cast::<T>().as_ptr(), self.len) })
    }
}

// SAFETY: a writable view behaves like `&'a mut [T]` for an `Element` type, which is `Send`.
unsafe impl<const N: usize> Send for TensorViewMut<'_, N> {}
// SAFETY: shared access to the view only reads through `as_view`.
unsafe impl<const N: usize> Sync for TensorViewMut<'_, N> {}

impl<const N: usize> std::fmt::Debug for TensorViewMut<'_, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorViewMut")
            .field("shape", &self.shape.dims())
            .field("data_type", &self.data_type)
            .field("len", &self.len)
            .finish()
    }
}
