use crate::backend::Backend;
use std::marker::PhantomData;

/// Scalar operations required by a numerical backend.
///
/// Arithmetic comes from the standard operator traits; the remaining methods
/// cover conversion to and from host `f64` values and the checks the
/// optimizer runs on every iteration.
///
/// # Example
/// ```
/// use supervised_rs::backend::ScalarOps;
///
/// let x = 4.0f64;
/// assert_eq!(ScalarOps::sqrt(x), 2.0);
/// assert!(ScalarOps::is_finite(x));
/// ```
pub trait ScalarOps:
    Clone
    + Copy
    + Send
    + Sync
    + std::ops::Add<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Div<Output = Self>
{
    /// Square root. Returns NaN for negative inputs.
    fn sqrt(self) -> Self;

    /// Converts an `f64` value to this scalar type.
    fn from_f64(v: f64) -> Self;

    /// Converts this scalar to an `f64` value.
    fn to_f64(self) -> f64;

    /// `true` when the value is neither NaN nor infinite.
    fn is_finite(self) -> bool;
}

impl ScalarOps for f64 {
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

/// Backend-typed scalar wrapper.
///
/// Carries the originating backend as a phantom type so scalars of different
/// backends cannot be mixed.
#[cfg_attr(
    all(feature = "cpu", feature = "ndarray"),
    doc = r#"
Same-backend arithmetic compiles:

```
use supervised_rs::backend::{CpuBackend, NdarrayBackend, Scalar};

let a: Scalar<CpuBackend> = Scalar::new(1.0);
let b: Scalar<NdarrayBackend> = Scalar::new(2.0);
assert_eq!((a + a).to_f64(), 2.0);
assert_eq!((b * b).to_f64(), 4.0);
```

Mixing backends does not:

```compile_fail
use supervised_rs::backend::{CpuBackend, NdarrayBackend, Scalar};

let a: Scalar<CpuBackend> = Scalar::new(1.0);
let b: Scalar<NdarrayBackend> = Scalar::new(2.0);
let _ = a + b;
```
"#
)]
#[derive(Clone, Debug, Copy)]
pub struct Scalar<B: Backend> {
    pub(crate) data: B::Scalar,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Scalar<B> {
    /// Creates a scalar from a host `f64`.
    ///
    /// # Example
    /// ```
    /// use supervised_rs::backend::{CpuBackend, Scalar};
    ///
    /// let s: Scalar<CpuBackend> = Scalar::new(3.5);
    /// assert_eq!(s.to_f64(), 3.5);
    /// ```
    pub fn new(f: f64) -> Self {
        Self {
            data: B::scalar_f64(f),
            backend: PhantomData,
        }
    }

    pub(crate) fn from_raw(data: B::Scalar) -> Self {
        Self {
            data,
            backend: PhantomData,
        }
    }

    /// Converts this scalar to a host `f64`.
    pub fn to_f64(&self) -> f64 {
        self.data.to_f64()
    }

    /// `true` when the value is neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        self.data.is_finite()
    }

    /// Square root of this scalar.
    pub fn sqrt(&self) -> Self {
        Self::from_raw(self.data.sqrt())
    }
}

impl<B: Backend> std::ops::Add for Scalar<B> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_raw(self.data + rhs.data)
    }
}

impl<B: Backend> std::ops::Sub for Scalar<B> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_raw(self.data - rhs.data)
    }
}

impl<B: Backend> std::ops::Mul for Scalar<B> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_raw(self.data * rhs.data)
    }
}

/// Follows IEEE 754 for division by zero.
impl<B: Backend> std::ops::Div for Scalar<B> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::from_raw(self.data / rhs.data)
    }
}
