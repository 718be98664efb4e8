use tracing::debug;

use crate::Error;

/// Aligned `(x, y)` observations with no missing or non-finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    xs: Vec<f64>,
    ys: Vec<f64>,
    dropped: usize,
}

impl Sample {
    /// Build a sample from two aligned columns. Every value must be finite.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, Error> {
        if xs.len() != ys.len() {
            return Err(Error::UnequalColumnLengths);
        }
        if let Some(i) = xs
            .iter()
            .zip(ys.iter())
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(Error::NonFiniteValue(i));
        }
        Ok(Self { xs, ys, dropped: 0 })
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Result<Self, Error> {
        let (xs, ys) = pairs.into_iter().unzip();
        Self::new(xs, ys)
    }

    /// Build a sample from two aligned columns, dropping every row where either value is
    /// NaN. Infinite values are still rejected.
    pub fn from_columns_dropping_missing(xs: &[f64], ys: &[f64]) -> Result<Self, Error> {
        if xs.len() != ys.len() {
            return Err(Error::UnequalColumnLengths);
        }
        let (xs_kept, ys_kept): (Vec<f64>, Vec<f64>) = xs
            .iter()
            .zip(ys.iter())
            .filter(|(x, y)| !x.is_nan() && !y.is_nan())
            .map(|(x, y)| (*x, *y))
            .unzip();
        let dropped = xs.len() - xs_kept.len();
        if dropped > 0 {
            debug!(dropped, kept = xs_kept.len(), "dropped rows with missing values");
        }
        let mut sample = Self::new(xs_kept, ys_kept)?;
        sample.dropped = dropped;
        Ok(sample)
    }

    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Rows removed for missing values when the sample was built.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_new() {
        let sample = Sample::new(vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]).unwrap();
        assert_eq!(sample.len(), 3);
        assert_eq!(sample.dropped(), 0);
        assert_eq!(
            sample.pairs().collect::<Vec<_>>(),
            vec![(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]
        );
    }

    #[test]
    fn test_new_unequal_lengths() {
        assert!(matches!(
            Sample::new(vec![1.0, 2.0], vec![1.0]),
            Err(Error::UnequalColumnLengths)
        ));
    }

    #[test]
    fn test_new_non_finite() {
        assert!(matches!(
            Sample::new(vec![1.0, f64::NAN], vec![1.0, 2.0]),
            Err(Error::NonFiniteValue(1))
        ));
        assert!(matches!(
            Sample::new(vec![1.0, 2.0], vec![f64::INFINITY, 2.0]),
            Err(Error::NonFiniteValue(0))
        ));
    }

    #[test]
    fn test_single_point_is_constructible() {
        let sample = Sample::from_pairs([(1.0, 1.0)]).unwrap();
        assert_eq!(sample.len(), 1);
        assert!(!sample.is_empty());
    }

    #[test]
    fn test_dropping_missing() {
        let xs = [1.0, f64::NAN, 3.0, 4.0, 5.0];
        let ys = [10.0, 20.0, f64::NAN, 40.0, 50.0];
        let sample = Sample::from_columns_dropping_missing(&xs, &ys).unwrap();
        assert_eq!(sample.xs(), &[1.0, 4.0, 5.0]);
        assert_eq!(sample.ys(), &[10.0, 40.0, 50.0]);
        assert_eq!(sample.dropped(), 2);
    }

    #[test]
    fn test_dropping_missing_everything() {
        let sample =
            Sample::from_columns_dropping_missing(&[f64::NAN, 1.0], &[1.0, f64::NAN]).unwrap();
        assert!(sample.is_empty());
        assert_eq!(sample.dropped(), 2);
    }

    #[test]
    fn test_dropping_missing_keeps_infinite_error() {
        assert!(matches!(
            Sample::from_columns_dropping_missing(&[f64::NAN, f64::INFINITY], &[1.0, 2.0]),
            Err(Error::NonFiniteValue(0))
        ));
    }
}
