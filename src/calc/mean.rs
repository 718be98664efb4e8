#![allow(clippy::needless_range_loop)]

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..data.len() {
        sum += data[i];
    }
    sum / data.len() as f64
}
