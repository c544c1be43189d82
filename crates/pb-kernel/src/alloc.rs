use crate::error::{KernelError, Result};

/// Allocate a vector of `len` copies of `value`, reporting failure instead of
/// aborting the process.
///
/// `what` names the buffer in the resulting `AllocationFailure`.
pub fn try_filled<T: Clone>(len: usize, value: T, what: &'static str) -> Result<Vec<T>> {
    let bytes = len.saturating_mul(std::mem::size_of::<T>());
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| KernelError::AllocationFailure { what, bytes })?;
    v.resize(len, value);
    Ok(v)
}

/// Collect an exact-size iterator into a fallibly allocated vector.
pub fn try_collect<T, I>(iter: I, what: &'static str) -> Result<Vec<T>>
where
    I: ExactSizeIterator<Item = T>,
{
    let len = iter.len();
    let bytes = len.saturating_mul(std::mem::size_of::<T>());
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| KernelError::AllocationFailure { what, bytes })?;
    v.extend(iter);
    Ok(v)
}
