#![allow(clippy::needless_range_loop)]

/// Centred sum of squares, `Σ(d - mean)²`.
pub fn sum_of_squares(data: &[f64], mean: f64) -> f64 {
    let mut sum = 0.0;
    for i in 0..data.len() {
        sum += (data[i] - mean).powi(2);
    }
    sum
}

/// Centred sum of cross products, `Σ(x - x̄)(y - ȳ)`. Both slices must have the same length.
pub fn sum_of_cross_products(xs: &[f64], ys: &[f64], x_mean: f64, y_mean: f64) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let mut sum = 0.0;
    for i in 0..xs.len() {
        sum += (xs[i] - x_mean) * (ys[i] - y_mean);
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_float_eq {
        ($a:expr, $b:expr, $tol:expr) => {
            assert!(($a - $b).abs() < $tol, "{:.22} != {:.22}", $a, $b);
        };
    }

    macro_rules! float_eq {
        ($a:expr, $b:expr) => {
            assert_float_eq!($a, $b, 1e-12);
        };
    }

    fn data() -> Vec<f64> {
        [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
            .iter()
            .cycle()
            .take(8 * 1000 - 1)
            .copied()
            .collect::<Vec<f64>>()
    }
    const VARIANCE: f64 = 5.249124699157198;

    #[test]
    fn test_sum_of_squares() {
        let data = data();
        let mean = crate::calc::mean(&data);
        float_eq!(sum_of_squares(&data, mean) / data.len() as f64, VARIANCE);
    }

    #[test]
    fn test_sum_of_cross_products() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        float_eq!(sum_of_cross_products(&xs, &ys, 2.5, 5.0), 10.0);
        float_eq!(sum_of_cross_products(&xs, &xs, 2.5, 2.5), sum_of_squares(&xs, 2.5));
    }
}
