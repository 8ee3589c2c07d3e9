use super::tensor1d::Tensor1D;
use crate::backend::Backend;
use crate::error::{LearnError, Result};
use std::marker::PhantomData;

/// Backend-typed 2D tensor holding one sample per row.
///
/// # Example
/// ```
/// use supervised_rs::backend::{CpuBackend, Tensor1D, Tensor2D};
///
/// let x = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(x.shape(), (2, 2));
/// let y = x.tdot(&Tensor1D::new(vec![1.0, 1.0]));
/// assert_eq!(y.to_vec(), vec![4.0, 6.0]);
/// ```
#[derive(Clone, Debug)]
pub struct Tensor2D<B: Backend> {
    pub(crate) data: B::Tensor2D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Tensor2D<B> {
    fn wrap(data: B::Tensor2D) -> Self {
        Self {
            data,
            backend: PhantomData,
        }
    }

    /// Creates a matrix from row-major data.
    ///
    /// # Errors
    /// [`LearnError::ShapeMismatch`] if `data.len() != rows * cols`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(LearnError::ShapeMismatch {
                context: "Tensor2D::new data length",
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self::wrap(B::from_vec_2d(data, rows, cols)))
    }

    /// Creates a matrix from a slice of rows.
    ///
    /// An empty slice yields a `0 × 0` matrix.
    ///
    /// # Errors
    /// [`LearnError::ShapeMismatch`] if the rows have different lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(LearnError::ShapeMismatch {
                context: "Tensor2D::from_rows row length",
                expected: cols,
                got: bad.len(),
            });
        }
        let data: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::new(data, rows.len(), cols)
    }

    /// Creates a `rows × cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::wrap(B::from_vec_2d(vec![0.0; rows * cols], rows, cols))
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        B::shape(&self.data)
    }

    /// Number of rows (samples).
    pub fn rows(&self) -> usize {
        self.shape().0
    }

    /// Number of columns (features).
    pub fn cols(&self) -> usize {
        self.shape().1
    }

    /// Matrix-vector product `self · v`.
    ///
    /// # Panics
    /// Panics if `v.len() != self.cols()`.
    pub fn dot(&self, v: &Tensor1D<B>) -> Tensor1D<B> {
        assert_eq!(
            self.cols(),
            v.len(),
            "Tensor2D::dot: vector length must equal column count"
        );
        Tensor1D {
            data: B::matvec(&self.data, &v.data),
            backend: PhantomData,
        }
    }

    /// Transposed product `selfᵀ · v`.
    ///
    /// # Panics
    /// Panics if `v.len() != self.rows()`.
    pub fn tdot(&self, v: &Tensor1D<B>) -> Tensor1D<B> {
        assert_eq!(
            self.rows(),
            v.len(),
            "Tensor2D::tdot: vector length must equal row count"
        );
        Tensor1D {
            data: B::matvec_transposed(&self.data, &v.data),
            backend: PhantomData,
        }
    }

    /// Copy of the matrix with a leading column of ones for the intercept.
    pub(crate) fn with_bias_column(&self) -> Self {
        Self::wrap(B::prepend_ones_column_2d(&self.data))
    }
}
