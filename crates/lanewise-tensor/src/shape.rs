use crate::tensor::TensorError;

/// Computes the strides for a row-major (C-contiguous) tensor layout.
///
/// The rightmost dimension has stride 1 and each dimension's stride is the product of all
/// dimensions to its right.
///
/// # Examples
///
/// ```rust
/// use lanewise_tensor::shape::get_strides_from_shape;
///
/// assert_eq!(get_strides_from_shape([2, 3]), [3, 1]);
/// assert_eq!(get_strides_from_shape([2, 3, 4]), [12, 4, 1]);
/// ```
pub fn get_strides_from_shape<const N: usize>(shape: [usize; N]) -> [usize; N] {
    let mut strides: [usize; N] = [0; N];
    let mut stride = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

/// The shape of a tensor of fixed rank `N`, together with its row-major strides.
///
/// Besides the plain stride, a shape exposes a broadcast stride ([`Shape::bstride`]) which is
/// zero along every dimension of size one. Walking a tensor with broadcast strides against a
/// larger shape repeats its size-one dimensions without copying any data.
///
/// Axes can be addressed from the back with negative indices: `-1` is the innermost
/// dimension.
///
/// # Examples
///
/// ```rust
/// use lanewise_tensor::Shape;
///
/// let shape = Shape::new([3, 1, 4]);
/// assert_eq!(shape[-1], 4);
/// assert_eq!(shape.strides(), [4, 4, 1]);
/// assert_eq!(shape.bstride(1), 0);
/// assert_eq!(shape.bstride(0), 4);
/// assert_eq!(shape.numel(), 12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape<const N: usize> {
    dims: [usize; N],
    strides: [usize; N],
}

impl<const N: usize> Shape<N> {
    /// Creates a shape with row-major strides.
    pub fn new(dims: [usize; N]) -> Self {
        Self {
            dims,
            strides: get_strides_from_shape(dims),
        }
    }

    /// Creates a shape from a slice of at most `N` dimensions, padding the front with ones.
    ///
    /// This lets a lower-rank operand take part in a fixed-rank computation: `[3]` padded to
    /// rank 3 becomes `[1, 1, 3]`, which broadcasts along the two leading axes.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::RankExceeded`] if `dims` has more than `N` entries.
    pub fn from_dims_padded(dims: &[usize]) -> Result<Self, TensorError> {
        if dims.len() > N {
            return Err(TensorError::RankExceeded {
                rank: dims.len(),
                max: N,
            });
        }
        let mut padded = [1; N];
        padded[N - dims.len()..].copy_from_slice(dims);
        Ok(Self::new(padded))
    }

    /// The number of dimensions.
    #[inline]
    pub const fn rank(&self) -> usize {
        N
    }

    /// The size of every dimension.
    #[inline]
    pub fn dims(&self) -> [usize; N] {
        self.dims
    }

    /// The row-major stride of every dimension.
    #[inline]
    pub fn strides(&self) -> [usize; N] {
        self.strides
    }

    /// The broadcast stride of every dimension, see [`Shape::bstride`].
    #[inline]
    pub fn bstrides(&self) -> [usize; N] {
        let mut bstrides = [0; N];
        for (i, b) in bstrides.iter_mut().enumerate() {
            *b = self.bstride_at(i);
        }
        bstrides
    }

    /// The total number of elements. A rank-0 shape holds a single element.
    #[inline]
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Resolves a possibly negative axis to its position in `0..N`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::AxisOutOfRange`] if the axis does not address a dimension.
    pub fn normalize_axis(&self, axis: isize) -> Result<usize, TensorError> {
        let resolved = if axis < 0 { axis + N as isize } else { axis };
        if resolved < 0 || resolved >= N as isize {
            return Err(TensorError::AxisOutOfRange { axis, rank: N });
        }
        Ok(resolved as usize)
    }

    /// The size of the dimension at `axis`, negative axes counting from the back.
    ///
    /// # Panics
    ///
    /// Panics if the axis is out of range, like indexing a slice would.
    pub fn dim(&self, axis: isize) -> usize {
        self[axis]
    }

    /// The row-major stride of the dimension at `axis`.
    ///
    /// # Panics
    ///
    /// Panics if the axis is out of range.
    pub fn stride(&self, axis: isize) -> usize {
        self.strides[self.resolve(axis)]
    }

    /// The broadcast stride of the dimension at `axis`: its stride if the dimension holds
    /// more than one element, 0 if it is being broadcast.
    ///
    /// # Panics
    ///
    /// Panics if the axis is out of range.
    pub fn bstride(&self, axis: isize) -> usize {
        self.bstride_at(self.resolve(axis))
    }

    /// Computes the shape two operands broadcast to.
    ///
    /// Along every axis the sizes must be equal or one of them must be 1.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::DimensionMismatch`] if an axis has two different sizes, neither
    /// of them 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lanewise_tensor::Shape;
    ///
    /// let a = Shape::new([3, 1]);
    /// let b = Shape::new([1, 4]);
    /// assert_eq!(a.broadcast(&b).unwrap(), Shape::new([3, 4]));
    /// assert!(Shape::new([3]).broadcast(&Shape::new([4])).is_err());
    /// ```
    pub fn broadcast(&self, other: &Shape<N>) -> Result<Shape<N>, TensorError> {
        let mut dims = [0; N];
        for (i, out) in dims.iter_mut().enumerate() {
            let (a, b) = (self.dims[i], other.dims[i]);
            *out = if a == b || b == 1 {
                a
            } else if a == 1 {
                b
            } else {
                return Err(TensorError::dimension_mismatch(
                    format!("Shapes are not broadcastable along axis {i}"),
                    &self.dims,
                    &other.dims,
                ));
            };
        }
        Ok(Shape::new(dims))
    }

    /// Returns true if every dimension equals the target's or is 1.
    pub fn is_broadcastable_to(&self, target: &Shape<N>) -> bool {
        self.dims
            .iter()
            .zip(target.dims.iter())
            .all(|(&d, &t)| d == t || d == 1)
    }

    #[inline]
    fn bstride_at(&self, i: usize) -> usize {
        if self.dims[i] > 1 {
            self.strides[i]
        } else {
            0
        }
    }

    fn resolve(&self, axis: isize) -> usize {
        match self.normalize_axis(axis) {
            Ok(i) => i,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<const N: usize> std::ops::Index<isize> for Shape<N> {
    type Output = usize;

    fn index(&self, axis: isize) -> &usize {
        &self.dims[self.resolve(axis)]
    }
}

impl<const N: usize> From<[usize; N]> for Shape<N> {
    fn from(dims: [usize; N]) -> Self {
        Self::new(dims)
    }
}

impl<const N: usize> std::fmt::Display for Shape<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.dims)
    }
}
