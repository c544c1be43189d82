//! Reproducible pseudo-random inputs.
//!
//! The same `(n, seed)` always yields the same values, so sequential and
//! threaded runs (and separate processes) see identical operands.

use pb_kernel::alloc::try_collect;
use pb_kernel::{KernelError, Matrix};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;

/// Default seeds for the two dot-product operands.
pub const DEFAULT_SEED_A: u64 = 12345;
pub const DEFAULT_SEED_B: u64 = 54321;
/// Default seed for matrix operands.
pub const DEFAULT_MATRIX_SEED: u64 = 42;

/// Generate `n` values uniformly distributed in `[-1, 1]`.
pub fn vector(n: usize, seed: u64) -> Result<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(try_collect(
        (0..n).map(|_| rng.gen_range(-1.0..=1.0)),
        "input vector",
    )?)
}

/// Generate an `n x n` matrix with values uniformly distributed in `[0, 1]`.
pub fn matrix(n: usize, seed: u64) -> Result<Matrix> {
    let numel = n.checked_mul(n).ok_or_else(|| {
        KernelError::InvalidParameter(format!("matrix dimension {} overflows", n))
    })?;
    let mut rng = StdRng::seed_from_u64(seed);
    let data = try_collect((0..numel).map(|_| rng.gen_range(0.0..=1.0)), "input matrix")?;
    Ok(Matrix::from_vec(data, n)?)
}
