use std::fmt;

use crate::alloc::{try_collect, try_filled};
use crate::error::{KernelError, Result};

/// A square, row-major `f64` matrix.
///
/// Element `(i, j)` lives at `data[i * dim + j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    dim: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Wrap existing row-major data as a `dim x dim` matrix.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `dim == 0` or `data.len() != dim * dim`.
    pub fn from_vec(data: Vec<f64>, dim: usize) -> Result<Self> {
        check_dim(dim)?;
        let numel = numel(dim)?;
        if data.len() != numel {
            return Err(KernelError::InvalidParameter(format!(
                "matrix data length {} does not match {}x{} (numel={})",
                data.len(),
                dim,
                dim,
                numel
            )));
        }
        Ok(Matrix { dim, data })
    }

    /// Create a zero-filled matrix.
    pub fn zeros(dim: usize) -> Result<Self> {
        Self::filled(dim, 0.0)
    }

    /// Create a matrix with every element set to one.
    pub fn ones(dim: usize) -> Result<Self> {
        Self::filled(dim, 1.0)
    }

    /// Create the identity matrix.
    pub fn identity(dim: usize) -> Result<Self> {
        let mut m = Self::zeros(dim)?;
        for i in 0..dim {
            m.data[i * dim + i] = 1.0;
        }
        Ok(m)
    }

    fn filled(dim: usize, value: f64) -> Result<Self> {
        check_dim(dim)?;
        let data = try_filled(numel(dim)?, value, "matrix")?;
        Ok(Matrix { dim, data })
    }

    /// Number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns element `(i, j)`.
    ///
    /// # Panics
    /// Panics if `i` or `j` is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(j < self.dim, "column {} out of bounds for dim {}", j, self.dim);
        self.data[i * self.dim + j]
    }

    /// Returns row `i` as a contiguous slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Returns the transpose as a new matrix.
    ///
    /// Multiplication kernels transpose their right operand once so the
    /// inner loop walks both operands with unit stride.
    pub fn transpose(&self) -> Result<Matrix> {
        let n = self.dim;
        let data = try_collect(
            (0..n * n).map(|idx| {
                let (j, i) = (idx / n, idx % n);
                self.data[i * n + j]
            }),
            "transposed matrix",
        )?;
        Ok(Matrix { dim: n, data })
    }

    /// Cheap summary of the matrix: the sum of the first element of every row.
    pub fn checksum(&self) -> f64 {
        self.data.iter().step_by(self.dim).sum()
    }
}

fn check_dim(dim: usize) -> Result<()> {
    if dim == 0 {
        return Err(KernelError::InvalidParameter(
            "matrix dimension must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn numel(dim: usize) -> Result<usize> {
    dim.checked_mul(dim).ok_or_else(|| {
        KernelError::InvalidParameter(format!("matrix dimension {} overflows", dim))
    })
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.dim {
            write!(f, "[")?;
            for (j, v) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
