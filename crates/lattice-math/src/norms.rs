//! Grid reductions used by the convergence test and normalisation.

use ndarray::{ArrayView2, Zip};

/// L2 norm of the change between two grids: sqrt(Σ (a − b)²).
pub fn l2_change(current: ArrayView2<f64>, previous: ArrayView2<f64>) -> f64 {
    let mut sum = 0.0;
    Zip::from(current).and(previous).for_each(|&a, &b| {
        let d = a - b;
        sum += d * d;
    });
    sum.sqrt()
}

/// Arithmetic mean, `None` for an empty grid.
pub fn mean(values: ArrayView2<f64>) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.sum() / values.len() as f64)
    }
}

/// (min, max) of a grid, `None` for an empty grid.
pub fn min_max(values: ArrayView2<f64>) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
