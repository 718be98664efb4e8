//! Single variable ordinary least squares.
//!
//! [`fit`] turns a [`Sample`] into an immutable [`RegressionResult`]; [`predict`] evaluates the
//! fitted line at a point and flags extrapolation outside the observed x range.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::{debug, warn};

use crate::{
    calc::{mean, min_max, sum_of_cross_products, sum_of_squares, UnitScale},
    Degeneracy, Error, Sample,
};

/// A fitted coefficient tested against zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coefficient {
    estimate: f64,
    std_err: f64,
    t: f64,
    p: f64,
}

impl Coefficient {
    /// `None` when the standard error is zero or the statistic is not finite.
    fn test(estimate: f64, std_err: f64, t_distr: &StudentsT) -> Option<Self> {
        let t = estimate / std_err;
        if std_err == 0.0 || !std_err.is_finite() || !t.is_finite() {
            return None;
        }
        Some(Coefficient {
            estimate,
            std_err,
            t,
            p: 2.0 * (1.0 - t_distr.cdf(t.abs())),
        })
    }

    #[inline]
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    #[inline]
    pub fn std_err(&self) -> f64 {
        self.std_err
    }

    #[inline]
    pub fn t(&self) -> f64 {
        self.t
    }

    #[inline]
    pub fn p(&self) -> f64 {
        self.p
    }
}

/// The fitted line `y = slope * x + intercept` and its goodness of fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionResult {
    slope: f64,
    intercept: f64,
    correlation: f64,
    determination: f64,
    adj_determination: Option<f64>,
    residual_sum_of_squares: f64,
    domain_min: f64,
    domain_max: f64,
    n: usize,
    // [slope, intercept], absent without residual degrees of freedom or for an exact fit
    inference: Option<[Coefficient; 2]>,
}

impl RegressionResult {
    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Pearson correlation coefficient, in `[-1, 1]`.
    #[inline]
    pub fn correlation(&self) -> f64 {
        self.correlation
    }

    /// Coefficient of determination, always the square of [`Self::correlation`].
    #[inline]
    pub fn determination(&self) -> f64 {
        self.determination
    }

    /// Adjusted R², `None` for two points.
    #[inline]
    pub fn adj_determination(&self) -> Option<f64> {
        self.adj_determination
    }

    #[inline]
    pub fn residual_sum_of_squares(&self) -> f64 {
        self.residual_sum_of_squares
    }

    #[inline]
    pub fn domain_min(&self) -> f64 {
        self.domain_min
    }

    #[inline]
    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn slope_coefficient(&self) -> Option<&Coefficient> {
        self.inference.as_ref().map(|c| &c[0])
    }

    pub fn intercept_coefficient(&self) -> Option<&Coefficient> {
        self.inference.as_ref().map(|c| &c[1])
    }

    #[inline]
    fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Predict `y` at `x0`. Any `x0` is accepted; values outside
    /// `[domain_min, domain_max]` (and NaN) are flagged as extrapolation.
    pub fn predict(&self, x0: f64) -> Prediction {
        Prediction {
            x0,
            y_hat: self.evaluate(x0),
            is_extrapolation: !(self.domain_min..=self.domain_max).contains(&x0),
        }
    }

    /// The fitted line evaluated at every x, in order.
    pub fn fitted_values(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// The fitted line at the two ends of the observed x range.
    pub fn line_endpoints(&self) -> [(f64, f64); 2] {
        [
            (self.domain_min, self.evaluate(self.domain_min)),
            (self.domain_max, self.evaluate(self.domain_max)),
        ]
    }
}

/// A point prediction from a [`RegressionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    x0: f64,
    y_hat: f64,
    is_extrapolation: bool,
}

impl Prediction {
    #[inline]
    pub fn x0(&self) -> f64 {
        self.x0
    }

    #[inline]
    pub fn y_hat(&self) -> f64 {
        self.y_hat
    }

    #[inline]
    pub fn is_extrapolation(&self) -> bool {
        self.is_extrapolation
    }
}

/// Fit `y = slope * x + intercept` by ordinary least squares.
///
/// Both columns are mapped onto `[0, 1]` by their observed range before any sums are taken, so
/// very large or very small magnitudes neither overflow nor underflow.
///
/// Fails with [`Error::InsufficientData`] for fewer than two pairs, with
/// [`Error::DegenerateInput`] when either x or y is constant and with
/// [`Error::NonFiniteResult`] when the line cannot be represented in `f64`.
#[tracing::instrument(skip(sample), fields(n = sample.len()))]
pub fn fit(sample: &Sample) -> Result<RegressionResult, Error> {
    let n = sample.len();
    if n < 2 {
        return Err(Error::InsufficientData(n));
    }
    let xs = sample.xs();
    let ys = sample.ys();

    let (domain_min, domain_max) = min_max(xs).ok_or(Error::InsufficientData(n))?;
    if domain_min == domain_max {
        return Err(Error::DegenerateInput(Degeneracy::ConstantX));
    }
    let (y_min, y_max) = min_max(ys).ok_or(Error::InsufficientData(n))?;
    if y_min == y_max {
        return Err(Error::DegenerateInput(Degeneracy::ConstantY));
    }

    let x_scale = UnitScale::new(domain_min, domain_max);
    let y_scale = UnitScale::new(y_min, y_max);
    let us = xs.iter().map(|&x| x_scale.to_unit(x)).collect::<Vec<_>>();
    let vs = ys.iter().map(|&y| y_scale.to_unit(y)).collect::<Vec<_>>();

    let u_mean = mean(&us);
    let v_mean = mean(&vs);
    let suu = sum_of_squares(&us, u_mean);
    let svv = sum_of_squares(&vs, v_mean);
    let suv = sum_of_cross_products(&us, &vs, u_mean, v_mean);
    // both columns span [0, 1], so a zero spread means the mapping collapsed
    if suu == 0.0 {
        return Err(Error::DegenerateInput(Degeneracy::ConstantX));
    }
    if svv == 0.0 {
        return Err(Error::DegenerateInput(Degeneracy::ConstantY));
    }

    let unit_slope = suv / suu;
    let unit_intercept = v_mean - unit_slope * u_mean;
    let ratio = y_scale.ratio(&x_scale);
    let slope = unit_slope * ratio;
    // x = 0 expressed in unit coordinates
    let u_origin = x_scale.to_unit(0.0);
    let intercept = y_scale.from_unit(unit_intercept + unit_slope * u_origin);

    let correlation = (suv / (suu * svv).sqrt()).clamp(-1.0, 1.0);
    let determination = correlation * correlation;

    let unit_rss = us
        .iter()
        .zip(vs.iter())
        .map(|(u, v)| (v - (unit_slope * u + unit_intercept)).powi(2))
        .sum::<f64>();
    let y_span = y_scale.span();
    let residual_sum_of_squares = if unit_rss == 0.0 {
        0.0
    } else {
        unit_rss * y_span * y_span
    };

    if !(slope.is_finite() && intercept.is_finite() && residual_sum_of_squares.is_finite()) {
        warn!(slope, intercept, residual_sum_of_squares, "Fitted line is not finite");
        return Err(Error::NonFiniteResult);
    }

    let (adj_determination, inference) = if n > 2 {
        let df = (n - 2) as f64;
        let adj = 1.0 - (1.0 - determination) * (n as f64 - 1.0) / df;
        let unit_s2 = unit_rss / df;
        let inference = match StudentsT::new(0.0, 1.0, df) {
            Ok(t_distr) => {
                let slope_coef =
                    Coefficient::test(slope, (unit_s2 / suu).sqrt() * ratio, &t_distr);
                let intercept_coef = Coefficient::test(
                    intercept,
                    (unit_s2 * (1.0 / n as f64 + (u_mean - u_origin).powi(2) / suu)).sqrt()
                        * y_span,
                    &t_distr,
                );
                let inference = slope_coef.zip(intercept_coef).map(|(s, i)| [s, i]);
                if inference.is_none() {
                    debug!("Exact or unrepresentable fit, skipping coefficient tests");
                }
                inference
            },
            Err(e) => {
                warn!("Skipping coefficient tests: {}", e);
                None
            },
        };
        (Some(adj), inference)
    } else {
        (None, None)
    };

    debug!(slope, intercept, correlation, determination, "Fitted line");
    Ok(RegressionResult {
        slope,
        intercept,
        correlation,
        determination,
        adj_determination,
        residual_sum_of_squares,
        domain_min,
        domain_max,
        n,
        inference,
    })
}

/// Predict `y` at `x0` from a fitted result. See [`RegressionResult::predict`].
#[inline]
pub fn predict(result: &RegressionResult, x0: f64) -> Prediction {
    result.predict(x0)
}
