use super::Backend;

/// Pure-Rust backend storing tensors in `Vec<f64>`.
#[derive(Clone, Debug, Copy)]
pub struct CpuBackend;

/// Row-major matrix: `(data, rows, cols)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTensor2D(pub(crate) Vec<f64>, pub(crate) usize, pub(crate) usize);

impl CpuTensor2D {
    fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(data.len(), rows * cols, "inconsistent shape");
        Self(data, rows, cols)
    }
}

fn sigmoid(z: f64) -> f64 {
    // Split on sign so exp never sees a large positive argument.
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let ez = z.exp();
        ez / (1.0 + ez)
    }
}

impl Backend for CpuBackend {
    type Scalar = f64;
    type Tensor1D = Vec<f64>;
    type Tensor2D = CpuTensor2D;

    // --- Constructors ---
    fn zeros_1d(len: usize) -> Self::Tensor1D {
        vec![0.0; len]
    }

    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D {
        data
    }

    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D {
        CpuTensor2D::new(data, rows, cols)
    }

    fn scalar_f64(value: f64) -> Self::Scalar {
        value
    }

    // --- Access ---
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64> {
        t.clone()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        (t.1, t.2)
    }

    // --- Element-wise ops ---
    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a.iter().zip(b).map(|(a, b)| a + b).collect()
    }

    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a.iter().zip(b).map(|(a, b)| a - b).collect()
    }

    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a.iter().zip(b).map(|(a, b)| a * b).collect()
    }

    fn mul_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D {
        t.iter().map(|x| x * s).collect()
    }

    fn add_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D {
        t.iter().map(|x| x + s).collect()
    }

    fn log_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.iter().map(|v| v.ln()).collect()
    }

    fn sigmoid_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.iter().map(|&z| sigmoid(z)).collect()
    }

    fn clip_1d(t: &Self::Tensor1D, lo: &Self::Scalar, hi: &Self::Scalar) -> Self::Tensor1D {
        t.iter().map(|v| v.clamp(*lo, *hi)).collect()
    }

    // --- Reductions ---
    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar {
        t.iter().sum()
    }

    fn all_finite_1d(t: &Self::Tensor1D) -> bool {
        t.iter().all(|v| v.is_finite())
    }

    // --- Linear algebra ---
    fn matvec(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D {
        let CpuTensor2D(data, rows, cols) = a;
        if *cols == 0 {
            return vec![0.0; *rows];
        }
        data.chunks_exact(*cols)
            .map(|row| row.iter().zip(x).map(|(a, b)| a * b).sum())
            .collect()
    }

    fn matvec_transposed(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D {
        let CpuTensor2D(data, _, cols) = a;
        let mut out = vec![0.0; *cols];
        if *cols == 0 {
            return out;
        }
        // Row-major: accumulate one row at a time.
        for (row, &xi) in data.chunks_exact(*cols).zip(x) {
            for (acc, &aij) in out.iter_mut().zip(row) {
                *acc += aij * xi;
            }
        }
        out
    }

    fn prepend_ones_column_2d(t: &Self::Tensor2D) -> Self::Tensor2D {
        let CpuTensor2D(data, rows, cols) = t;
        let mut out = Vec::with_capacity(rows * (cols + 1));
        if *cols == 0 {
            out.resize(*rows, 1.0);
        } else {
            for row in data.chunks_exact(*cols) {
                out.push(1.0);
                out.extend_from_slice(row);
            }
        }
        CpuTensor2D::new(out, *rows, cols + 1)
    }
}
