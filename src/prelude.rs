pub use crate::data_structs::typedef::{
    CountType,
    PosType,
    ProbType,
};
pub use crate::data_structs::{
    ProbAccumulator,
    ReadRecord,
    SampleInfo,
    Segment,
    SiteSampleSummary,
    SiteSummary,
};
pub use crate::io::{
    read_calls,
    read_pvalue_table,
    read_sample_sheet,
    read_table,
    write_corrected,
    write_table,
    PValueTableFormat,
    SampleEntry,
    TableRow,
};
pub use crate::tools::{
    aggregate_files,
    benjamini_hochberg,
    partition_sites,
    total_distinct_samples,
    AggregatedSites,
    FdrConfig,
    FdrCorrector,
    IgnoreInterval,
    PrepConfig,
    SelectedSites,
    SiteSelector,
    SummaryAggregator,
};
