use crate::lane::LaneValue;

/// A computation applied once per output element, or once per lane group.
///
/// `M` is the number of input tensors. The functor receives the current value of the output
/// at the visited position together with one value per input and returns the new output
/// value. Ignoring `out` gives a plain assignment; using it expresses in-place updates such
/// as accumulation.
///
/// The evaluation method is generic over [`LaneValue`], so one implementation serves the
/// scalar, 4-wide and 8-wide families alike.
///
/// # Examples
///
/// ```rust
/// use lanewise_element::{Functor, LaneValue};
///
/// /// `out = (a - b)^2`
/// struct SquaredDiff;
///
/// impl Functor<2> for SquaredDiff {
///     fn apply<V: LaneValue>(&self, _out: V, [a, b]: [V; 2]) -> V {
///         let d = a - b;
///         d * d
///     }
/// }
///
/// assert_eq!(SquaredDiff.apply(0.0f32, [5.0, 2.0]), 9.0);
/// ```
pub trait Functor<const M: usize> {
    /// Computes the new output value from the current one and the input values.
    fn apply<V: LaneValue>(&self, out: V, args: [V; M]) -> V;
}

impl<F: Functor<M>, const M: usize> Functor<M> for &F {
    #[inline]
    fn apply<V: LaneValue>(&self, out: V, args: [V; M]) -> V {
        (**self).apply(out, args)
    }
}

/// `out = a`
#[derive(Clone, Copy, Debug, Default)]
pub struct Assign;

impl Functor<1> for Assign {
    #[inline]
    fn apply<V: LaneValue>(&self, _out: V, [a]: [V; 1]) -> V {
        a
    }
}

/// `out = a + b`
#[derive(Clone, Copy, Debug, Default)]
pub struct Add;

impl Functor<2> for Add {
    #[inline]
    fn apply<V: LaneValue>(&self, _out: V, [a, b]: [V; 2]) -> V {
        a + b
    }
}

/// `out = a - b`
#[derive(Clone, Copy, Debug, Default)]
pub struct Sub;

impl Functor<2> for Sub {
    #[inline]
    fn apply<V: LaneValue>(&self, _out: V, [a, b]: [V; 2]) -> V {
        a - b
    }
}

/// `out = a * b`
#[derive(Clone, Copy, Debug, Default)]
pub struct Mul;

impl Functor<2> for Mul {
    #[inline]
    fn apply<V: LaneValue>(&self, _out: V, [a, b]: [V; 2]) -> V {
        a * b
    }
}

/// `out = a / b`
#[derive(Clone, Copy, Debug, Default)]
pub struct Div;

impl Functor<2> for Div {
    #[inline]
    fn apply<V: LaneValue>(&self, _out: V, [a, b]: [V; 2]) -> V {
        a / b
    }
}

/// `out = max(a, b)`
#[derive(Clone, Copy, Debug, Default)]
pub struct Max;

impl Functor<2> for Max {
    #[inline]
    fn apply<V: LaneValue>(&self, _out: V, [a, b]: [V; 2]) -> V {
        a.max(b)
    }
}

/// `out = min(a, b)`
#[derive(Clone, Copy, Debug, Default)]
pub struct Min;

impl Functor<2> for Min {
    #[inline]
    fn apply<V: LaneValue>(&self, _out: V, [a, b]: [V; 2]) -> V {
        a.min(b)
    }
}

/// `out = a_0 + a_1 + ... + a_{M-1}`, summed left to right.
///
/// With no inputs the output is set to zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum;

impl<const M: usize> Functor<M> for Sum {
    #[inline]
    fn apply<V: LaneValue>(&self, _out: V, args: [V; M]) -> V {
        args.into_iter().fold(V::splat(0.0), |acc, a| acc + a)
    }
}

/// `out = -a`
#[derive(Clone, Copy, Debug, Default)]
pub struct Neg;

impl Functor<1> for Neg {
    #[inline]
    fn apply<V: LaneValue>(&self, _out: V, [a]: [V; 1]) -> V {
        V::splat(-1.0) * a
    }
}

/// `out = |a|`
#[derive(Clone, Copy, Debug, Default)]
pub struct Abs;

impl Functor<1> for Abs {
    #[inline]
    fn apply<V: LaneValue>(&self, _out: V, [a]: [V; 1]) -> V {
        a.abs()
    }
}

/// `out = sqrt(a)`
#[derive(Clone, Copy, Debug, Default)]
pub struct Sqrt;

impl Functor<1> for Sqrt {
    #[inline]
    fn apply<V: LaneValue>(&self, _out: V, [a]: [V; 1]) -> V {
        a.sqrt()
    }
}

/// `out = max(a, 0)`
#[derive(Clone, Copy, Debug, Default)]
pub struct Relu;

impl Functor<1> for Relu {
    #[inline]
    fn apply<V: LaneValue>(&self, _out: V, [a]: [V; 1]) -> V {
        a.max(V::splat(0.0))
    }
}

/// `out = a * factor`
#[derive(Clone, Copy, Debug)]
pub struct Scale(pub f32);

impl Functor<1> for Scale {
    #[inline]
    fn apply<V: LaneValue>(&self, _out: V, [a]: [V; 1]) -> V {
        a * V::splat(self.0)
    }
}

/// `out = out + a`
#[derive(Clone, Copy, Debug, Default)]
pub struct Accumulate;

impl Functor<1> for Accumulate {
    #[inline]
    fn apply<V: LaneValue>(&self, out: V, [a]: [V; 1]) -> V {
        out + a
    }
}

/// `out = out + alpha * a`
#[derive(Clone, Copy, Debug)]
pub struct AddScaled(pub f32);

impl Functor<1> for AddScaled {
    #[inline]
    fn apply<V: LaneValue>(&self, out: V, [a]: [V; 1]) -> V {
        out + V::splat(self.0) * a
    }
}

/// `out = a * b + c`, fused where the target supports it.
#[derive(Clone, Copy, Debug, Default)]
pub struct MulAdd;

impl Functor<3> for MulAdd {
    #[inline]
    fn apply<V: LaneValue>(&self, _out: V, [a, b, c]: [V; 3]) -> V {
        a.mul_add(b, c)
    }
}

/// A functor built from a scalar closure, see [`from_fn`].
#[derive(Clone, Copy, Debug)]
pub struct FromFn<F>(F);

/// Wraps a scalar closure `Fn(out, inputs) -> out` into a [`Functor`].
///
/// At vector widths the closure is evaluated lane by lane, so the result does not depend on
/// the lane width chosen for a call. Hand-written functors are faster where they map to
/// vector instructions.
///
/// # Examples
///
/// ```rust
/// use lanewise_element::{from_fn, Functor};
///
/// let clamp = from_fn(|_out, [x]: [f32; 1]| x.clamp(-1.0, 1.0));
/// assert_eq!(clamp.apply(0.0f32, [3.0]), 1.0);
/// ```
pub fn from_fn<F, const M: usize>(f: F) -> FromFn<F>
where
    F: Fn(f32, [f32; M]) -> f32,
{
    FromFn(f)
}

impl<F, const M: usize> Functor<M> for FromFn<F>
where
    F: Fn(f32, [f32; M]) -> f32,
{
    #[inline]
    fn apply<V: LaneValue>(&self, out: V, args: [V; M]) -> V {
        V::from_lanes(|i| (self.0)(out.lane(i), args.map(|a| a.lane(i))))
    }
}
