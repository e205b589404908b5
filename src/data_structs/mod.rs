//! Core records passed between the pipeline stages.
//!
//! - [`ReadRecord`]: one per-read modification call, as produced by the
//!   modification caller.
//! - [`SiteSampleSummary`]: statistics of the non-ignored calls of one sample
//!   at one site, produced by aggregation.
//! - [`SiteSummary`]: a site that passed complete-case selection.
//! - [`Segment`]: an inclusive index range over the selected sites.
//! - [`SampleInfo`]: what was ingested for one sample.
//! - [`ProbAccumulator`]: the mergeable reduction state behind
//!   [`SiteSampleSummary`].
//! - [`typedef`]: aliases for positions, counts and probabilities.

mod accumulator;
mod records;
pub mod typedef;

#[cfg(test)]
mod tests;

pub use accumulator::ProbAccumulator;
pub(crate) use records::validate_probability;
pub use records::{
    ReadRecord,
    SampleInfo,
    Segment,
    SiteSampleSummary,
    SiteSummary,
};
