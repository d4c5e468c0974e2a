//! Allocator-backed owned storage for tensor elements.

use std::{alloc::Layout, ptr::NonNull};

use crate::{
    allocator::{TensorAllocator, TensorAllocatorError},
    tensor::TensorError,
};

/// An owned, contiguous buffer of `T` allocated through a [`TensorAllocator`].
///
/// The buffer is released with the same allocator when the storage is dropped. Empty buffers
/// never reach the allocator.
pub struct TensorStorage<T, A: TensorAllocator> {
    /// The pointer to the tensor memory which must be non-null.
    ptr: NonNull<T>,
    /// The number of elements in the buffer.
    len: usize,
    /// The memory layout used for allocation.
    layout: Layout,
    /// The allocator used to allocate and release the buffer.
    alloc: A,
}

impl<T, A: TensorAllocator> TensorStorage<T, A> {
    /// Moves the contents of a vector into memory obtained from `alloc`.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is invalid or the allocation fails.
    pub fn from_vec(mut value: Vec<T>, alloc: A) -> Result<Self, TensorError> {
        let len = value.len();
        let layout = Layout::array::<T>(len).map_err(TensorAllocatorError::LayoutError)?;

        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            let raw_ptr = alloc.alloc(layout)? as *mut T;
            NonNull::new(raw_ptr).ok_or(TensorAllocatorError::NullPointer)?
        };

        // SAFETY: ptr is valid for `len` elements and does not overlap the vector's buffer.
        // The elements are moved, so the vector must not drop them.
        unsafe {
            std::ptr::copy_nonoverlapping(value.as_ptr(), ptr.as_ptr(), len);
            value.set_len(0);
        }

        Ok(Self {
            ptr,
            len,
            layout,
            alloc,
        })
    }

    /// Returns the storage data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: ptr is valid and aligned for len initialized elements.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Returns the storage data as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: ptr is valid and aligned for len elements and we hold the only reference.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Returns the number of elements in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copies the elements into a new vector.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }
}

// SAFETY: the storage owns its buffer exclusively, like a `Vec<T>`.
unsafe impl<T: Send, A: TensorAllocator + Send> Send for TensorStorage<T, A> {}

// SAFETY: shared access only hands out `&[T]`.
unsafe impl<T: Sync, A: TensorAllocator + Sync> Sync for TensorStorage<T, A> {}

impl<T, A: TensorAllocator> Drop for TensorStorage<T, A> {
    fn drop(&mut self) {
        // SAFETY: the elements are initialized and owned by this storage.
        unsafe {
            std::ptr::drop_in_place(std::ptr::slice_from_raw_parts_mut(
                self.ptr.as_ptr(),
                self.len,
            ));
        }
        if self.layout.size() != 0 {
            self.alloc.dealloc(self.ptr.as_ptr() as *mut u8, self.layout);
        }
    }
}

impl<T: Clone, A: TensorAllocator> Clone for TensorStorage<T, A> {
    /// Deep-copies the buffer with the same allocator.
    ///
    /// # Panics
    ///
    /// Panics if the allocator cannot provide a buffer of the same size.
    fn clone(&self) -> Self {
        match Self::from_vec(self.to_vec(), self.alloc.clone()) {
            Ok(storage) => storage,
            Err(e) => panic!("Failed to clone tensor storage: {e}"),
        }
    }
}

impl<T, A: TensorAllocator> std::fmt::Debug for TensorStorage<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorStorage")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("layout", &self.layout)
            .finish()
    }
}
