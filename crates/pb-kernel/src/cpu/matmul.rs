// Row-block matmul kernel shared by the sequential and threaded backends.
//
// The right operand is always passed transposed so the inner product walks
// both operands with unit stride.

use std::ops::Range;

/// Fill `out` with rows `rows` of `A @ B`.
///
/// - `a`: row-major `n x n` left operand
/// - `bt`: row-major `n x n` transpose of the right operand
/// - `out`: `rows.len() * n` elements; local row `r` holds global row `rows.start + r`
pub(crate) fn fill_rows(a: &[f64], bt: &[f64], n: usize, rows: Range<usize>, out: &mut [f64]) {
    debug_assert_eq!(out.len(), rows.len() * n);
    for (local, i) in rows.enumerate() {
        let a_row = &a[i * n..(i + 1) * n];
        let out_row = &mut out[local * n..(local + 1) * n];
        for (j, c) in out_row.iter_mut().enumerate() {
            let bt_row = &bt[j * n..(j + 1) * n];
            let mut sum = 0.0f64;
            for k in 0..n {
                sum += a_row[k] * bt_row[k];
            }
            *c = sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rows_partial_block() {
        // A = [1,2;3,4], B = [5,6;7,8] => C = [19,22;43,50]
        let a = [1.0, 2.0, 3.0, 4.0];
        let bt = [5.0, 7.0, 6.0, 8.0];
        let mut out = [0.0; 2];
        fill_rows(&a, &bt, 2, 1..2, &mut out);
        assert_eq!(out, [43.0, 50.0]);
    }
}
