use std::fmt;

use serde::Serialize;

use crate::{Error, Prediction, RegressionResult};

/// A fitted result with the column names it came from, ready to display.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    x_name: &'a str,
    y_name: &'a str,
    result: &'a RegressionResult,
    dropped: usize,
    prediction: Option<Prediction>,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a RegressionResult, x_name: &'a str, y_name: &'a str) -> Self {
        Self {
            x_name,
            y_name,
            result,
            dropped: 0,
            prediction: None,
        }
    }

    /// Record how many rows were dropped for missing values.
    pub fn with_dropped(mut self, dropped: usize) -> Self {
        self.dropped = dropped;
        self
    }

    pub fn with_prediction(mut self, x0: f64) -> Self {
        self.prediction = Some(self.result.predict(x0));
        self
    }

    #[inline]
    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    /// The regression line as displayed, e.g. `y = 2.00x + 0.50`.
    pub fn equation(&self) -> String {
        format!(
            "y = {:.2}x + {:.2}",
            self.result.slope(),
            self.result.intercept()
        )
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ~ {}", self.y_name, self.x_name)?;
        writeln!(f, "回帰式：{}", self.equation())?;
        writeln!(f, "相関係数（r）：{:.3}", self.result.correlation())?;
        write!(f, "決定係数（R²）：{:.3}", self.result.determination())?;
        if self.dropped > 0 {
            write!(f, "\n欠損値を含む{}行を除外しました", self.dropped)?;
        }
        if let Some(p) = &self.prediction {
            write!(
                f,
                "\n{} = {} のときの{}の予測値：{:.2}",
                self.x_name,
                p.x0(),
                self.y_name,
                p.y_hat()
            )?;
            if p.is_extrapolation() {
                write!(
                    f,
                    "\n注意：{} は観測範囲 [{}, {}] の外にあるため、外挿による予測です",
                    p.x0(),
                    self.result.domain_min(),
                    self.result.domain_max()
                )?;
            }
        }
        Ok(())
    }
}
