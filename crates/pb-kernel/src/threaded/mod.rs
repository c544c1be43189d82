mod scatter;

use tracing::debug;

use crate::alloc::try_filled;
use crate::backend::ComputeBackend;
use crate::cpu::{check_matrices, check_vectors, dot, matmul};
use crate::error::{KernelError, Result};
use crate::matrix::Matrix;
use crate::partition::WorkDomain;
use crate::slot::PaddedSlot;

use scatter::{scatter, split_rows};

/// Partitioned parallel backend.
///
/// Each call splits `[0, N)` into `workers` contiguous ranges (clamped to
/// `N`), runs one scoped thread per range and joins them all before the
/// result is read. Dot-product workers write a private cache-line padded
/// slot; matmul workers write a disjoint block of output rows.
#[derive(Debug, Clone)]
pub struct ThreadedBackend {
    workers: usize,
}

impl ThreadedBackend {
    /// Create a backend that uses up to `workers` threads per call.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `workers == 0`.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(KernelError::InvalidParameter(
                "worker count must be at least 1".to_string(),
            ));
        }
        Ok(ThreadedBackend { workers })
    }

    /// Requested worker count (before clamping to the problem size).
    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl ComputeBackend for ThreadedBackend {
    fn name(&self) -> &str {
        "threaded"
    }

    fn dot(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        check_vectors(a, b)?;
        let domain = WorkDomain::new(a.len())?;
        let workers = domain.clamp_workers(self.workers)?;
        let ranges = domain.partition(workers)?;
        debug!(n = domain.len(), workers, "dot: partitioned");

        let mut slots = try_filled(workers, PaddedSlot::new(0.0f64), "partial sums")?;
        scatter(&ranges, slots.iter_mut().collect(), |range, slot: &mut PaddedSlot<f64>| {
            slot.set(dot::dot_slice(&a[range.clone()], &b[range]));
        })?;

        Ok(dot::combine(slots.into_iter().map(PaddedSlot::into_inner)))
    }

    fn matmul(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        check_matrices(a, b)?;
        let n = a.dim();
        let domain = WorkDomain::new(n)?;
        let workers = domain.clamp_workers(self.workers)?;
        let rows = domain.partition(workers)?;
        debug!(n, workers, "matmul: partitioned rows");

        let bt = b.transpose()?;
        let mut c = Matrix::zeros(n)?;
        let (a, bt) = (a.as_slice(), bt.as_slice());
        let blocks = split_rows(c.as_mut_slice(), n, &rows);
        scatter(&rows, blocks, |range, block| {
            matmul::fill_rows(a, bt, n, range, block);
        })?;

        Ok(c)
    }
}
