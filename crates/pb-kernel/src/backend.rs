use std::fmt::Debug;

use crate::error::Result;
use crate::matrix::Matrix;

/// Trait for interchangeable kernel implementations (sequential, threaded).
///
/// Inputs are borrowed read-only for the whole call; results are returned
/// owned. Implementations validate their inputs before doing any work.
pub trait ComputeBackend: Send + Sync + Debug {
    /// Returns the name of this backend (e.g., "sequential", "threaded").
    fn name(&self) -> &str;

    /// Dot product: sum of a[i] * b[i].
    ///
    /// - `a`, `b`: equal-length, non-empty vectors
    fn dot(&self, a: &[f64], b: &[f64]) -> Result<f64>;

    /// Square matrix multiplication: C = A @ B.
    ///
    /// Both operands must have the same dimension.
    fn matmul(&self, a: &Matrix, b: &Matrix) -> Result<Matrix>;
}
