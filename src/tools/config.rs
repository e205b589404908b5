use std::fmt::Display;

use anyhow::{
    bail,
    ensure,
};

use crate::data_structs::typedef::{
    CountType,
    ProbType,
};
use crate::{
    getter_fn,
    with_field_fn,
};

/// Probability band `[lower, upper]` of ambiguous calls. Both ends are
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IgnoreInterval {
    lower: ProbType,
    upper: ProbType,
}

impl IgnoreInterval {
    pub fn try_new(
        lower: ProbType,
        upper: ProbType,
    ) -> anyhow::Result<Self> {
        if !(0.0..=1.0).contains(&lower) || !(0.0..=1.0).contains(&upper) {
            bail!(
                "Ignore interval bounds must lie in [0, 1], got [{}, {}]",
                lower,
                upper
            )
        }
        if lower > upper {
            bail!(
                "Ignore interval lower bound {} is greater than upper bound {}",
                lower,
                upper
            )
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> ProbType {
        self.lower
    }

    pub fn upper(&self) -> ProbType {
        self.upper
    }

    /// Whether a call with this probability is ignored.
    pub fn contains(
        &self,
        probability: ProbType,
    ) -> bool {
        probability >= self.lower && probability <= self.upper
    }
}

impl Display for IgnoreInterval {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// Parameters of aggregation, site selection and partitioning.
#[derive(Debug, Clone)]
pub struct PrepConfig {
    interval:             IgnoreInterval,
    min_reads_per_sample: CountType,
    batch_size:           usize,
}

impl PrepConfig {
    pub const DEFAULT_MIN_READS_PER_SAMPLE: CountType = 5;
    pub const DEFAULT_BATCH_SIZE: usize = 400_000;

    /// The ignore interval has no default and must always be given.
    pub fn new(interval: IgnoreInterval) -> Self {
        Self {
            interval,
            min_reads_per_sample: Self::DEFAULT_MIN_READS_PER_SAMPLE,
            batch_size: Self::DEFAULT_BATCH_SIZE,
        }
    }

    with_field_fn!(interval, IgnoreInterval);
    with_field_fn!(min_reads_per_sample, CountType);
    with_field_fn!(batch_size, usize);

    getter_fn!(min_reads_per_sample, CountType);
    getter_fn!(batch_size, usize);

    pub fn interval(&self) -> IgnoreInterval {
        self.interval
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.batch_size > 0, "Batch size must be greater than 0");
        Ok(())
    }
}

/// Parameters of the multiple testing correction.
#[derive(Debug, Clone)]
pub struct FdrConfig {
    /// Only reported alongside the results. The adjustment itself does not
    /// depend on it.
    alpha: f64,
}

impl FdrConfig {
    pub const DEFAULT_ALPHA: f64 = 0.05;

    with_field_fn!(alpha, f64);
    getter_fn!(alpha, f64);

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.alpha > 0.0 && self.alpha < 1.0,
            "Alpha must lie in (0, 1), got {}",
            self.alpha
        );
        Ok(())
    }
}

impl Default for FdrConfig {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
        }
    }
}
