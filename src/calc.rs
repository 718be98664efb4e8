pub mod mean;
pub mod variance;

pub use mean::mean;
pub use variance::{sum_of_cross_products, sum_of_squares};

/// Smallest and largest value of `data`, `None` when it is empty.
pub fn min_max(data: &[f64]) -> Option<(f64, f64)> {
    let first = *data.first()?;
    Some(
        data[1..]
            .iter()
            .fold((first, first), |(lo, hi), &d| (lo.min(d), hi.max(d))),
    )
}

/// Affine map of a finite interval `[lo, hi]` onto `[0, 1]`. Intervals wider than `f64::MAX`
/// are halved first so the width stays finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScale {
    offset: f64,
    range: f64,
    halved: bool,
}

impl UnitScale {
    pub fn new(lo: f64, hi: f64) -> Self {
        let range = hi - lo;
        if range.is_finite() {
            Self {
                offset: lo,
                range,
                halved: false,
            }
        } else {
            Self {
                offset: lo / 2.0,
                range: hi / 2.0 - lo / 2.0,
                halved: true,
            }
        }
    }

    #[inline]
    fn factor(&self) -> f64 {
        if self.halved {
            2.0
        } else {
            1.0
        }
    }

    #[inline]
    pub fn to_unit(&self, d: f64) -> f64 {
        (d / self.factor() - self.offset) / self.range
    }

    #[inline]
    pub fn from_unit(&self, u: f64) -> f64 {
        (self.offset + u * self.range) * self.factor()
    }

    /// Width of the original interval, infinite when it exceeds `f64::MAX`.
    #[inline]
    pub fn span(&self) -> f64 {
        self.range * self.factor()
    }

    /// Width of this interval divided by the width of `other`.
    #[inline]
    pub fn ratio(&self, other: &UnitScale) -> f64 {
        (self.range / other.range) * (self.factor() / other.factor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_scale_endpoints() {
        for (lo, hi) in [(1.0, 4.0), (-3.5, 2.0), (0.0, 1e-170), (0.0, 5e-324), (-1e308, 1e308)] {
            let scale = UnitScale::new(lo, hi);
            assert_eq!(scale.to_unit(lo), 0.0);
            assert_eq!(scale.to_unit(hi), 1.0);
            assert_eq!(scale.from_unit(0.0), lo);
            assert_eq!(scale.from_unit(1.0), hi);
        }
    }

    #[test]
    fn test_unit_scale_span_and_ratio() {
        let x = UnitScale::new(1.0, 4.0);
        let y = UnitScale::new(2.0, 8.0);
        assert_eq!(x.span(), 3.0);
        assert_eq!(y.ratio(&x), 2.0);
        let wide = UnitScale::new(-1e308, 1e308);
        assert!(wide.span().is_infinite());
        assert!((wide.ratio(&UnitScale::new(-1e307, 1e307)) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_max(&[]), None);
        assert_eq!(min_max(&[3.0]), Some((3.0, 3.0)));
        assert_eq!(min_max(&[3.0, -1.0, 7.5, 2.0]), Some((-1.0, 7.5)));
    }
}
