#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod calc;
mod config;
mod error;
mod file;
mod fit;
mod report;
mod sample;
mod table;

use tracing::info;

pub use crate::{config::*, error::*, file::*, fit::*, report::*, sample::*, table::*};

/// Install a `tracing` subscriber filtered by `RUST_LOG`, defaulting to `warn`. Returns
/// `false` if a global subscriber was already set.
pub fn init_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

/// Fit `y` against `x` from two columns of a table. Rows with a missing value in either
/// column are dropped before fitting.
#[tracing::instrument(skip(table))]
pub fn analyze(table: &Table, x: &str, y: &str) -> Result<RegressionResult, Error> {
    let sample = table.sample(x, y)?;
    info!(
        "Fitting {} against {} on {} rows ({} dropped)",
        y,
        x,
        sample.len(),
        sample.dropped()
    );
    fit(&sample)
}
