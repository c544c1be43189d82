pub(crate) mod dot;
pub(crate) mod matmul;

use crate::backend::ComputeBackend;
use crate::error::{KernelError, Result};
use crate::matrix::Matrix;

/// Single-threaded reference backend.
///
/// Dot product is one running sum over all indices; matmul transposes the
/// right operand and fills every row on the calling thread.
#[derive(Debug, Clone)]
pub struct SequentialBackend;

impl SequentialBackend {
    pub fn new() -> Self {
        SequentialBackend
    }
}

impl Default for SequentialBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeBackend for SequentialBackend {
    fn name(&self) -> &str {
        "sequential"
    }

    fn dot(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        check_vectors(a, b)?;
        Ok(dot::dot_slice(a, b))
    }

    fn matmul(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        check_matrices(a, b)?;
        let n = a.dim();
        let bt = b.transpose()?;
        let mut c = Matrix::zeros(n)?;
        matmul::fill_rows(a.as_slice(), bt.as_slice(), n, 0..n, c.as_mut_slice());
        Ok(c)
    }
}

pub(crate) fn check_vectors(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(KernelError::InvalidParameter(format!(
            "dot: a.len()={} but b.len()={}",
            a.len(),
            b.len()
        )));
    }
    if a.is_empty() {
        return Err(KernelError::InvalidParameter(
            "dot: vectors must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn check_matrices(a: &Matrix, b: &Matrix) -> Result<()> {
    if a.dim() != b.dim() {
        return Err(KernelError::InvalidParameter(format!(
            "matmul: [{0}x{0}] @ [{1}x{1}]",
            a.dim(),
            b.dim()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> SequentialBackend {
        SequentialBackend::new()
    }

    #[test]
    fn test_dot_basic() {
        let r = backend().dot(&[1.0, 2.0, 3.0], &[4.0, -5.0, 6.0]).unwrap();
        assert_eq!(r, 12.0);
    }

    #[test]
    fn test_dot_length_mismatch() {
        assert!(backend().dot(&[1.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_dot_empty() {
        assert!(backend().dot(&[], &[]).is_err());
    }

    #[test]
    fn test_matmul_identity() {
        // 2x2 identity @ [1,2;3,4]
        let a = Matrix::identity(2).unwrap();
        let x = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2).unwrap();
        let c = backend().matmul(&a, &x).unwrap();
        assert_eq!(c.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_matmul_basic() {
        // [1,2;3,4] @ [5,6;7,8] = [19,22;43,50]
        let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2).unwrap();
        let x = Matrix::from_vec(vec![5.0, 6.0, 7.0, 8.0], 2).unwrap();
        let c = backend().matmul(&a, &x).unwrap();
        assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_matmul_dimension_mismatch() {
        let a = Matrix::identity(2).unwrap();
        let b = Matrix::identity(3).unwrap();
        assert!(backend().matmul(&a, &b).is_err());
    }
}
