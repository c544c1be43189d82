// Dot-product inner loop shared by the sequential and threaded backends.

/// Sum of `a[i] * b[i]` accumulated in ascending index order from `0.0`.
///
/// Callers pass equal-length slices; extra elements of the longer slice are
/// ignored.
pub(crate) fn dot_slice(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        sum += x * y;
    }
    sum
}

/// Left-to-right sum of per-worker partials in worker order.
pub(crate) fn combine(partials: impl IntoIterator<Item = f64>) -> f64 {
    let mut total = 0.0f64;
    for p in partials {
        total += p;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_slice() {
        assert_eq!(dot_slice(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
    }

    #[test]
    fn test_combine_order() {
        assert_eq!(combine([1.0, 2.0, 3.5]), 6.5);
        assert_eq!(combine(std::iter::empty()), 0.0);
    }
}
