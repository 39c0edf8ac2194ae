//! Data generators for the featurebin benchmarks.
//!
//! Everything is deterministic so runs are comparable across machines.

use featurebin::frame::{Column, Frame};
use ndarray::Array2;

/// Skewed, repeat-heavy values resembling a real continuous feature.
///
/// Values are rounded to two decimals, so the number of distinct values
/// grows much slower than `n`.
pub fn skewed_values(n: usize, seed: u64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = (i as f64 + seed as f64 * 7.3) * 0.618_033_988_75;
            let u = t.fract();
            // squared uniform puts most of the mass near zero
            (u * u * 1000.0 * 100.0).round() / 100.0
        })
        .collect()
}

/// A frame with `n_cols` float columns named `f0`, `f1`, ...
pub fn synthetic_frame(n_rows: usize, n_cols: usize) -> Frame {
    let mut data = Array2::zeros((n_rows, n_cols));
    for (c, mut column) in data.columns_mut().into_iter().enumerate() {
        for (cell, v) in column.iter_mut().zip(skewed_values(n_rows, c as u64)) {
            *cell = v;
        }
    }
    match Frame::from_array(&data, column_names(n_cols)) {
        Ok(frame) => frame,
        Err(e) => panic!("synthetic frame has consistent shape: {}", e),
    }
}

/// Column names of [`synthetic_frame`].
pub fn column_names(n_cols: usize) -> Vec<String> {
    (0..n_cols).map(|c| format!("f{}", c)).collect()
}

/// A single-column frame holding `values`.
pub fn single_column(values: Vec<f64>) -> Frame {
    match Frame::new().with_column("x", Column::Float(values)) {
        Ok(frame) => frame,
        Err(e) => panic!("single column frame: {}", e),
    }
}
