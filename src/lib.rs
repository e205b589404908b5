//! # diffmod
//!
//! `diffmod` prepares per-read RNA modification probabilities for a
//! differential modification test and post-processes the test output. The
//! test itself runs elsewhere; this crate covers what happens before and
//! after it.
//!
//! The pipeline has four stages:
//!
//! 1. **Aggregation** ([`SummaryAggregator`]): per-read calls from one or
//!    more tab-separated files are reduced into per-(site, sample) summary
//!    statistics. Calls whose probability falls inside the ignore band
//!    ([`IgnoreInterval`]) are treated as ambiguous and dropped.
//! 2. **Selection** ([`SiteSelector`]): only sites where *every* sample of
//!    the cohort clears a per-sample read threshold are kept, in a canonical
//!    `(rname, position)` order.
//! 3. **Partitioning** ([`partition_sites`]): the ordered selection is split
//!    into near-equal contiguous [`Segment`]s, one per downstream test run.
//! 4. **Correction** ([`FdrCorrector`]): the per-segment p-value tables are
//!    merged and Benjamini-Hochberg adjusted across the whole population.
//!
//! ## Usage
//!
//! ```no_run
//! use diffmod::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let entries = read_sample_sheet("samples.csv")?;
//!     let config = PrepConfig::new(IgnoreInterval::try_new(0.3, 0.7)?);
//!
//!     let aggregated = aggregate_files(&entries, config.interval(), |_| {})?;
//!     let selected = SiteSelector::from(&config)
//!         .select(aggregated.summaries(), aggregated.total_distinct_samples());
//!     let segments = partition_sites(selected.len(), *config.batch_size())?;
//!
//!     for segment in &segments {
//!         println!("{}: {} sites", segment, selected.segment(segment).len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Number of threads used for file ingestion can be configured with the
//! `DIFFMOD_NUM_THREADS` environment variable. It is forwarded to polars as
//! well.

#[ctor::ctor]
fn init() {
    if let Ok(n) = std::env::var("DIFFMOD_NUM_THREADS") {
        std::env::set_var("POLARS_MAX_THREADS", n)
    }
}

pub mod data_structs;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

#[allow(unused_imports)]
use prelude::*;
