//! # Backend Abstraction
//!
//! Storage and vectorized arithmetic for the fitting engine. Optimizers and
//! models are written against the typed wrappers [`Scalar`], [`Tensor1D`] and
//! [`Tensor2D`]; the [`Backend`] trait decides how the data is held and how
//! the few operations the engine needs are computed.
//!
//! ## Available Backends
//!
//! | Backend          | Feature   | Storage                          |
//! |------------------|-----------|----------------------------------|
//! | `CpuBackend`     | `cpu`     | `Vec<f64>`, row-major matrices   |
//! | `NdarrayBackend` | `ndarray` | `ndarray::Array1` / `Array2`     |
//!
//! ## Example
//!
//! ```rust
//! use supervised_rs::backend::{CpuBackend, Tensor1D, Tensor2D};
//!
//! let x = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
//! let w = Tensor1D::<CpuBackend>::new(vec![0.5, 0.5]);
//! assert_eq!(x.dot(&w).to_vec(), vec![1.5, 3.5]);
//! ```

use std::fmt::Debug;

#[cfg(feature = "cpu")]
mod cpu;
#[cfg(feature = "cpu")]
/// Pure-Rust CPU backend.
pub use cpu::{CpuBackend, CpuTensor2D};

#[cfg(feature = "ndarray")]
mod ndarray_backend;
#[cfg(feature = "ndarray")]
/// Backend backed by the `ndarray` crate.
pub use ndarray_backend::{NdarrayBackend, NdarrayTensor2D};

/// Scalar value representation and arithmetic operations.
pub mod scalar;
/// One-dimensional tensor abstraction.
pub mod tensor1d;
/// Two-dimensional tensor abstraction.
pub mod tensor2d;

pub use scalar::{Scalar, ScalarOps};
pub use tensor1d::Tensor1D;
pub use tensor2d::Tensor2D;

/// Abstraction over tensor storage and the operations used during fitting.
///
/// Implementations are zero-sized marker types; all state lives in the
/// associated tensor types. Shape preconditions are checked by the typed
/// wrappers before they reach the backend, so backend methods may assume
/// compatible shapes.
pub trait Backend: Clone + Copy + Debug + Send + Sync + 'static {
    /// Scalar type supporting arithmetic operations.
    type Scalar: ScalarOps + Debug;

    /// One-dimensional tensor type.
    type Tensor1D: Clone + Debug + Send + Sync;

    /// Two-dimensional tensor type.
    type Tensor2D: Clone + Debug + Send + Sync;

    // --- Constructors ---

    /// Creates a 1D tensor filled with zeros.
    fn zeros_1d(len: usize) -> Self::Tensor1D;

    /// Constructs a 1D tensor from owned data.
    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D;

    /// Constructs a 2D tensor from row-major data.
    ///
    /// Callers guarantee `data.len() == rows * cols`.
    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D;

    /// Creates a backend scalar from an `f64`.
    fn scalar_f64(value: f64) -> Self::Scalar;

    // --- Data access ---

    /// Copies a 1D tensor out to host memory.
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64>;

    /// Number of elements of a 1D tensor.
    fn len_1d(t: &Self::Tensor1D) -> usize;

    /// Shape of a 2D tensor as `(rows, cols)`.
    fn shape(t: &Self::Tensor2D) -> (usize, usize);

    // --- Element-wise operations ---

    /// Element-wise `a + b`.
    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise `a - b`.
    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise `a * b`.
    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Multiplies every element by `s`.
    fn mul_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D;

    /// Adds `s` to every element.
    fn add_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D;

    /// Natural logarithm of every element.
    fn log_1d(t: &Self::Tensor1D) -> Self::Tensor1D;

    /// Logistic sigmoid `1 / (1 + e^(-x))` of every element.
    fn sigmoid_1d(t: &Self::Tensor1D) -> Self::Tensor1D;

    /// Clamps every element into `[lo, hi]`.
    fn clip_1d(t: &Self::Tensor1D, lo: &Self::Scalar, hi: &Self::Scalar) -> Self::Tensor1D;

    // --- Reductions ---

    /// Sum of all elements.
    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar;

    /// `true` when no element is NaN or infinite.
    fn all_finite_1d(t: &Self::Tensor1D) -> bool;

    // --- Linear algebra ---

    /// `A · x` for `A` of shape (m × n) and `x` of length n.
    fn matvec(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D;

    /// `Aᵀ · x` for `A` of shape (m × n) and `x` of length m.
    fn matvec_transposed(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D;

    /// Returns a copy of `t` with a column of ones inserted before column 0.
    fn prepend_ones_column_2d(t: &Self::Tensor2D) -> Self::Tensor2D;
}
