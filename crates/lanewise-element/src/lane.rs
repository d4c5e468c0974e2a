use std::ops::{Add, Div, Mul, Sub};

use wide::{f32x4, f32x8};

/// The number of `f32` elements one functor invocation processes.
///
/// The set is closed: element-wise calls run either one element at a time or in groups of
/// four or eight along the innermost axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LaneWidth {
    /// One element per invocation.
    Scalar,
    /// Four elements per invocation.
    X4,
    /// Eight elements per invocation.
    X8,
}

impl LaneWidth {
    /// The number of elements in a lane group.
    #[inline]
    pub const fn lanes(&self) -> usize {
        match self {
            LaneWidth::Scalar => 1,
            LaneWidth::X4 => 4,
            LaneWidth::X8 => 8,
        }
    }

    /// Returns true if a run of `len` elements splits into whole lane groups.
    #[inline]
    pub const fn divides(&self, len: usize) -> bool {
        len % self.lanes() == 0
    }
}

impl std::fmt::Display for LaneWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaneWidth::Scalar => f.write_str("f32"),
            LaneWidth::X4 => f.write_str("f32x4"),
            LaneWidth::X8 => f.write_str("f32x8"),
        }
    }
}

/// The values a functor computes with: a single `f32` or a vector of `f32` lanes.
///
/// Every method acts lane by lane, so a functor written once against this trait gives the
/// same per-element result at every width.
pub trait LaneValue:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// The number of `f32` lanes.
    const LANES: usize;

    /// Broadcasts a scalar to every lane.
    fn splat(value: f32) -> Self;

    /// Reads lane `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= Self::LANES`.
    fn lane(&self, i: usize) -> f32;

    /// Builds a value by calling `f` for every lane index.
    fn from_lanes<F: FnMut(usize) -> f32>(f: F) -> Self;

    /// Lane-wise maximum.
    fn max(self, other: Self) -> Self;

    /// Lane-wise minimum.
    fn min(self, other: Self) -> Self;

    /// Lane-wise absolute value.
    fn abs(self) -> Self;

    /// Lane-wise square root.
    fn sqrt(self) -> Self;

    /// Lane-wise `self * m + a`. Whether the operation is fused depends on the target.
    fn mul_add(self, m: Self, a: Self) -> Self;
}

impl LaneValue for f32 {
    const LANES: usize = 1;

    #[inline]
    fn splat(value: f32) -> Self {
        value
    }

    #[inline]
    fn lane(&self, i: usize) -> f32 {
        assert!(i == 0, "lane {i} out of range for a scalar");
        *self
    }

    #[inline]
    fn from_lanes<F: FnMut(usize) -> f32>(mut f: F) -> Self {
        f(0)
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        f32::max(self, other)
    }

    #[inline]
    fn min(self, other: Self) -> Self {
        f32::min(self, other)
    }

    #[inline]
    fn abs(self) -> Self {
        f32::abs(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }

    #[inline]
    fn mul_add(self, m: Self, a: Self) -> Self {
        self * m + a
    }
}

macro_rules! impl_lane_value {
    ($ty:ty, $lanes:literal) => {
        impl LaneValue for $ty {
            const LANES: usize = $lanes;

            #[inline]
            fn splat(value: f32) -> Self {
                <$ty>::splat(value)
            }

            #[inline]
            fn lane(&self, i: usize) -> f32 {
                self.to_array()[i]
            }

            #[inline]
            fn from_lanes<F: FnMut(usize) -> f32>(f: F) -> Self {
                <$ty>::new(std::array::from_fn(f))
            }

            #[inline]
            fn max(self, other: Self) -> Self {
                <$ty>::max(self, other)
            }

            #[inline]
            fn min(self, other: Self) -> Self {
                <$ty>::min(self, other)
            }

            #[inline]
            fn abs(self) -> Self {
                <$ty>::abs(self)
            }

            #[inline]
            fn sqrt(self) -> Self {
                <$ty>::sqrt(self)
            }

            #[inline]
            fn mul_add(self, m: Self, a: Self) -> Self {
                <$ty>::mul_add(self, m, a)
            }
        }
    };
}

impl_lane_value!(f32x4, 4);
impl_lane_value!(f32x8, 8);

/// A compile-time execution family: how a lane group is read from and written to a flat
/// `f32` buffer.
///
/// Offsets are in `f32` elements. A group occupies `WIDTH.lanes()` consecutive elements
/// starting at the offset; no alignment is required.
pub trait Lanes {
    /// The value type functors compute with.
    type Value: LaneValue;

    /// The runtime tag of the family.
    const WIDTH: LaneWidth;

    /// Reads the lane group starting at `offset`.
    fn load(data: &[f32], offset: usize) -> Self::Value;

    /// Writes the lane group starting at `offset`.
    fn store(data: &mut [f32], offset: usize, value: Self::Value);
}

/// One element at a time.
pub struct Float32;

/// Groups of four elements in a [`wide::f32x4`].
pub struct Float32x4;

/// Groups of eight elements in a [`wide::f32x8`].
pub struct Float32x8;

impl Lanes for Float32 {
    type Value = f32;
    const WIDTH: LaneWidth = LaneWidth::Scalar;

    #[inline]
    fn load(data: &[f32], offset: usize) -> f32 {
        data[offset]
    }

    #[inline]
    fn store(data: &mut [f32], offset: usize, value: f32) {
        data[offset] = value;
    }
}

macro_rules! impl_vector_lanes {
    ($family:ty, $ty:ty, $width:ident, $lanes:literal) => {
        impl Lanes for $family {
            type Value = $ty;
            const WIDTH: LaneWidth = LaneWidth::$width;

            #[inline]
            fn load(data: &[f32], offset: usize) -> $ty {
                let mut lanes = [0.0; $lanes];
                lanes.copy_from_slice(&data[offset..offset + $lanes]);
                <$ty>::new(lanes)
            }

            #[inline]
            fn store(data: &mut [f32], offset: usize, value: $ty) {
                data[offset..offset + $lanes].copy_from_slice(&value.to_array());
            }
        }
    };
}

impl_vector_lanes!(Float32x4, f32x4, X4, 4);
impl_vector_lanes!(Float32x8, f32x8, X8, 8);
