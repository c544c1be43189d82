use std::ops::Range;

use tracing::debug;

use crate::error::{KernelError, Result};

/// The index range `[0, len)` over which a kernel distributes its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkDomain {
    len: usize,
}

impl WorkDomain {
    /// Create a domain over `len` elements.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `len == 0`.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(KernelError::InvalidParameter(
                "work domain must contain at least one element".to_string(),
            ));
        }
        Ok(WorkDomain { len })
    }

    /// Number of indices in the domain.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a domain holds at least one index.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Clamp a requested worker count so every worker gets at least one index.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `requested == 0`.
    pub fn clamp_workers(&self, requested: usize) -> Result<usize> {
        if requested == 0 {
            return Err(KernelError::InvalidParameter(
                "worker count must be at least 1".to_string(),
            ));
        }
        if requested > self.len {
            debug!(requested, clamped = self.len, "clamping workers to domain size");
            return Ok(self.len);
        }
        Ok(requested)
    }

    /// Split the domain into `workers` contiguous ranges.
    ///
    /// See [`partition`].
    pub fn partition(&self, workers: usize) -> Result<Vec<Range<usize>>> {
        partition(self.len, workers)
    }
}

/// Split `[0, n)` into exactly `t` ascending, disjoint, covering ranges.
///
/// With `base = n / t` and `rem = n % t`, the first `rem` ranges hold
/// `base + 1` indices and the rest hold `base`, so any two ranges differ in
/// length by at most one.
///
/// # Errors
/// Returns `InvalidParameter` unless `1 <= t <= n`. Callers clamp `t` with
/// [`WorkDomain::clamp_workers`] first.
pub fn partition(n: usize, t: usize) -> Result<Vec<Range<usize>>> {
    if n == 0 {
        return Err(KernelError::InvalidParameter(
            "cannot partition an empty domain".to_string(),
        ));
    }
    if t == 0 || t > n {
        return Err(KernelError::InvalidParameter(format!(
            "worker count {} outside 1..={}",
            t, n
        )));
    }

    let base = n / t;
    let rem = n % t;
    let mut ranges = Vec::with_capacity(t);
    let mut start = 0;
    for i in 0..t {
        let end = start + base + usize::from(i < rem);
        ranges.push(start..end);
        start = end;
    }
    debug_assert_eq!(start, n);
    Ok(ranges)
}
