//! File formats consumed and produced by the pipeline.
//!
//! - [`reads`]: per-read modification calls (tab-separated, with header).
//! - [`sample_sheet`]: the manifest mapping read files to samples and
//!   groups.
//! - [`tables`]: intermediate tables (summaries, samples, selected sites,
//!   segments).
//! - [`pvalues`]: per-segment p-value tables and the corrected output.

pub mod pvalues;
pub mod reads;
pub mod sample_sheet;
pub mod tables;

pub use pvalues::{
    read_pvalue_table,
    write_corrected,
    PValueTableFormat,
};
pub use reads::{
    read_calls,
    ReadCallsSchema,
};
pub use sample_sheet::{
    read_sample_sheet,
    SampleEntry,
};
pub use tables::{
    read_table,
    write_table,
    TableRow,
};
