//! Pipeline stages.
//!
//! - [`aggregate`]: per-read calls to per-(site, sample) summaries.
//! - [`select`]: complete-case site selection.
//! - [`partition`]: balanced segments over the selected sites.
//! - [`fdr`]: merging of per-segment p-value tables and Benjamini-Hochberg
//!   correction.
//! - [`config`]: parameters of the stages.

pub mod aggregate;
pub mod config;
pub mod fdr;
pub mod partition;
pub mod select;

pub use aggregate::{
    aggregate_files,
    total_distinct_samples,
    AggregatedSites,
    SummaryAggregator,
};
pub use config::{
    FdrConfig,
    IgnoreInterval,
    PrepConfig,
};
pub use fdr::{
    benjamini_hochberg,
    FdrCorrector,
};
pub use partition::partition_sites;
pub use select::{
    SelectedSites,
    SiteSelector,
};
