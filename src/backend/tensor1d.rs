use super::scalar::Scalar;
use crate::backend::Backend;
use std::marker::PhantomData;

/// Backend-typed 1D tensor.
///
/// Used for parameter vectors, gradients, targets and predictions. The
/// backend is carried as a phantom type so tensors of different backends
/// cannot be combined.
///
/// Binary element-wise operations panic when the two operands have different
/// lengths; callers that accept user data check shapes first and report
/// [`LearnError::ShapeMismatch`](crate::LearnError::ShapeMismatch).
///
/// # Example
/// ```
/// use supervised_rs::backend::{CpuBackend, Scalar, Tensor1D};
///
/// let x: Tensor1D<CpuBackend> = Tensor1D::new(vec![1.0, 2.0, 3.0]);
/// let y = x.scale(&Scalar::new(2.0));
/// assert_eq!(y.to_vec(), vec![2.0, 4.0, 6.0]);
/// ```
#[derive(Clone, Debug)]
pub struct Tensor1D<B: Backend> {
    pub(crate) data: B::Tensor1D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Tensor1D<B> {
    fn wrap(data: B::Tensor1D) -> Self {
        Self {
            data,
            backend: PhantomData,
        }
    }

    fn assert_same_len(&self, other: &Self, op: &str) {
        assert_eq!(
            self.len(),
            other.len(),
            "Tensor1D::{op}: length mismatch"
        );
    }

    /// Creates a tensor from host values.
    pub fn new(data: Vec<f64>) -> Self {
        Self::wrap(B::from_vec_1d(data))
    }

    /// Creates a tensor of `len` zeros.
    ///
    /// # Example
    /// ```
    /// use supervised_rs::backend::{CpuBackend, Tensor1D};
    ///
    /// let zeros: Tensor1D<CpuBackend> = Tensor1D::zeros(3);
    /// assert_eq!(zeros.to_vec(), vec![0.0, 0.0, 0.0]);
    /// ```
    pub fn zeros(len: usize) -> Self {
        Self::wrap(B::zeros_1d(len))
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        B::len_1d(&self.data)
    }

    /// `true` if the tensor has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the values out to host memory.
    pub fn to_vec(&self) -> Vec<f64> {
        B::to_vec_1d(&self.data)
    }

    /// Element-wise `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        self.assert_same_len(other, "add");
        Self::wrap(B::add_1d(&self.data, &other.data))
    }

    /// Element-wise `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.assert_same_len(other, "sub");
        Self::wrap(B::sub_1d(&self.data, &other.data))
    }

    /// Element-wise (Hadamard) product.
    pub fn mul(&self, other: &Self) -> Self {
        self.assert_same_len(other, "mul");
        Self::wrap(B::mul_1d(&self.data, &other.data))
    }

    /// Multiplies every element by `a`.
    pub fn scale(&self, a: &Scalar<B>) -> Self {
        Self::wrap(B::mul_scalar_1d(&self.data, &a.data))
    }

    /// Adds `a` to every element.
    pub fn add_scalar(&self, a: &Scalar<B>) -> Self {
        Self::wrap(B::add_scalar_1d(&self.data, &a.data))
    }

    /// Inner product `Σ selfᵢ · otherᵢ`.
    ///
    /// # Example
    /// ```
    /// use supervised_rs::backend::{CpuBackend, Tensor1D};
    ///
    /// let a = Tensor1D::<CpuBackend>::new(vec![1.0, 2.0, 3.0]);
    /// let b = Tensor1D::<CpuBackend>::new(vec![4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b).to_f64(), 32.0);
    /// ```
    pub fn dot(&self, other: &Self) -> Scalar<B> {
        self.assert_same_len(other, "dot");
        let prod = B::mul_1d(&self.data, &other.data);
        Scalar::from_raw(B::sum_all_1d(&prod))
    }

    /// Sum of all elements. Zero for an empty tensor.
    pub fn sum(&self) -> Scalar<B> {
        Scalar::from_raw(B::sum_all_1d(&self.data))
    }

    /// Euclidean norm `√(Σ xᵢ²)`.
    pub fn l2_norm(&self) -> Scalar<B> {
        self.dot(self).sqrt()
    }

    /// Element-wise natural logarithm.
    pub fn log(&self) -> Self {
        Self::wrap(B::log_1d(&self.data))
    }

    /// Element-wise logistic sigmoid.
    ///
    /// Evaluated in a form that does not overflow for large `|x|`.
    ///
    /// # Example
    /// ```
    /// use supervised_rs::backend::{CpuBackend, Tensor1D};
    ///
    /// let p = Tensor1D::<CpuBackend>::new(vec![0.0, 800.0, -800.0]).sigmoid();
    /// assert_eq!(p.to_vec(), vec![0.5, 1.0, 0.0]);
    /// ```
    pub fn sigmoid(&self) -> Self {
        Self::wrap(B::sigmoid_1d(&self.data))
    }

    /// Clamps every element into `[lo, hi]`.
    pub fn clip(&self, lo: f64, hi: f64) -> Self {
        Self::wrap(B::clip_1d(
            &self.data,
            &B::scalar_f64(lo),
            &B::scalar_f64(hi),
        ))
    }

    /// `true` when no element is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        B::all_finite_1d(&self.data)
    }
}

#[cfg(all(test, feature = "cpu"))]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    type T = Tensor1D<CpuBackend>;

    #[test]
    fn test_tensor1d_new_and_len() {
        let t = T::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(t.len(), 5);
        assert!(!t.is_empty());
        assert!(T::new(vec![]).is_empty());
    }

    #[test]
    fn test_tensor1d_zeros() {
        let t = T::zeros(1000);
        assert_eq!(t.len(), 1000);
        assert!(t.to_vec().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_tensor1d_elementwise() {
        let a = T::new(vec![5.0, 7.0]);
        let b = T::new(vec![2.0, 3.0]);
        assert_eq!(a.add(&b).to_vec(), vec![7.0, 10.0]);
        assert_eq!(a.sub(&b).to_vec(), vec![3.0, 4.0]);
        assert_eq!(a.mul(&b).to_vec(), vec![10.0, 21.0]);
    }

    #[test]
    fn test_tensor1d_scalar_ops() {
        let a = T::new(vec![1.0, -2.0]);
        assert_eq!(a.scale(&Scalar::new(-3.0)).to_vec(), vec![-3.0, 6.0]);
        assert_eq!(a.add_scalar(&Scalar::new(1.0)).to_vec(), vec![2.0, -1.0]);
    }

    #[test]
    fn test_tensor1d_dot_and_norm() {
        let a = T::new(vec![1.0, -1.0]);
        let b = T::new(vec![2.0, 3.0]);
        assert_eq!(a.dot(&b).to_f64(), -1.0);
        assert_eq!(T::new(vec![3.0, 4.0]).l2_norm().to_f64(), 5.0);
        assert_eq!(T::new(vec![]).sum().to_f64(), 0.0);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_tensor1d_sub_length_mismatch_panics() {
        let _ = T::new(vec![1.0, 2.0]).sub(&T::new(vec![1.0]));
    }

    #[test]
    fn test_tensor1d_sigmoid_values() {
        let s = T::new(vec![0.0, 2.0, -2.0]).sigmoid().to_vec();
        assert_eq!(s[0], 0.5);
        assert!((s[1] - 0.880_797_077_977_882_3).abs() < 1e-12);
        assert!((s[1] + s[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tensor1d_sigmoid_extreme_inputs_stay_finite() {
        let s = T::new(vec![1e308, -1e308, f64::MAX]).sigmoid();
        assert!(s.is_finite());
        assert_eq!(s.to_vec(), vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_tensor1d_clip_and_log() {
        let c = T::new(vec![-1.0, 0.5, 2.0]).clip(0.0, 1.0);
        assert_eq!(c.to_vec(), vec![0.0, 0.5, 1.0]);

        let l = T::new(vec![1.0, std::f64::consts::E]).log().to_vec();
        assert_eq!(l[0], 0.0);
        assert!((l[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tensor1d_is_finite() {
        assert!(T::new(vec![1.0, -2.0]).is_finite());
        assert!(!T::new(vec![1.0, f64::NAN]).is_finite());
        assert!(!T::new(vec![f64::INFINITY]).is_finite());
        assert!(!T::new(vec![0.0]).log().is_finite());
    }
}
