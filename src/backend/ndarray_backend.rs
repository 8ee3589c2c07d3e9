use super::Backend;
use ndarray::{Array1, Array2};

/// Backend using `ndarray` arrays and its matrix-vector routines.
///
/// # Type mappings
/// - `Scalar`: `f64`
/// - `Tensor1D`: `ndarray::Array1<f64>`
/// - `Tensor2D`: [`NdarrayTensor2D`] wrapping `ndarray::Array2<f64>`
#[derive(Clone, Debug, Copy)]
pub struct NdarrayBackend;

/// Wrapper around `Array2<f64>`.
///
/// Build through [`Tensor2D::from_rows`](crate::backend::Tensor2D::from_rows),
/// which checks the row lengths.
///
/// # Example
/// ```
/// use supervised_rs::backend::{NdarrayBackend, Tensor2D};
///
/// let tensor = Tensor2D::<NdarrayBackend>::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])?;
/// assert_eq!(tensor.shape(), (2, 3));
/// # Ok::<(), supervised_rs::LearnError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NdarrayTensor2D(pub Array2<f64>);

impl Backend for NdarrayBackend {
    type Scalar = f64;
    type Tensor1D = Array1<f64>;
    type Tensor2D = NdarrayTensor2D;

    fn zeros_1d(len: usize) -> Self::Tensor1D {
        Array1::zeros(len)
    }

    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D {
        Array1::from_vec(data)
    }

    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D {
        NdarrayTensor2D(Array2::from_shape_fn((rows, cols), |(i, j)| {
            data[i * cols + j]
        }))
    }

    fn scalar_f64(value: f64) -> Self::Scalar {
        value
    }

    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64> {
        t.to_vec()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        t.0.dim()
    }

    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a + b
    }

    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a - b
    }

    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a * b
    }

    fn mul_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D {
        t * *s
    }

    fn add_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D {
        t + *s
    }

    fn log_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.mapv(f64::ln)
    }

    fn sigmoid_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.mapv(|z| {
            if z >= 0.0 {
                1.0 / (1.0 + (-z).exp())
            } else {
                let ez = z.exp();
                ez / (1.0 + ez)
            }
        })
    }

    fn clip_1d(t: &Self::Tensor1D, lo: &Self::Scalar, hi: &Self::Scalar) -> Self::Tensor1D {
        t.mapv(|v| v.clamp(*lo, *hi))
    }

    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar {
        t.sum()
    }

    fn all_finite_1d(t: &Self::Tensor1D) -> bool {
        t.iter().all(|v| v.is_finite())
    }

    fn matvec(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D {
        a.0.dot(x)
    }

    fn matvec_transposed(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D {
        a.0.t().dot(x)
    }

    fn prepend_ones_column_2d(t: &Self::Tensor2D) -> Self::Tensor2D {
        let (rows, cols) = t.0.dim();
        NdarrayTensor2D(Array2::from_shape_fn((rows, cols + 1), |(i, j)| {
            if j == 0 {
                1.0
            } else {
                t.0[[i, j - 1]]
            }
        }))
    }
}
