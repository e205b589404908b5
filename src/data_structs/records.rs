use std::fmt::Display;
use std::ops::RangeInclusive;

use anyhow::bail;
use serde::{
    Deserialize,
    Serialize,
};

use super::typedef::{
    CountType,
    PosType,
    ProbType,
};

/// A single per-read modification call.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadRecord {
    pub sample_name:          String,
    pub group_name:           String,
    pub rname:                String,
    pub position:             PosType,
    pub probability_modified: ProbType,
}

impl ReadRecord {
    pub fn new(
        sample_name: impl Into<String>,
        group_name: impl Into<String>,
        rname: impl Into<String>,
        position: PosType,
        probability_modified: ProbType,
    ) -> Self {
        Self {
            sample_name: sample_name.into(),
            group_name: group_name.into(),
            rname: rname.into(),
            position,
            probability_modified,
        }
    }

    /// Fails if the probability is not a number in `[0, 1]`.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_probability(self.probability_modified)
    }
}

pub(crate) fn validate_probability(value: ProbType) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&value) {
        bail!("probability {} is outside [0, 1]", value)
    }
    Ok(())
}

/// Statistics of the non-ignored calls of one sample at one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSampleSummary {
    pub rname:       String,
    #[serde(rename = "transcript_position")]
    pub position:    PosType,
    pub sample_name: String,
    pub read_count:  CountType,
    pub max_prob:    ProbType,
    pub min_prob:    ProbType,
    #[serde(rename = "avg_probability_modified")]
    pub mean_prob:   ProbType,
    /// Sample variance, `None` with fewer than two reads.
    pub variance:    Option<ProbType>,
}

impl SiteSampleSummary {
    pub fn site(&self) -> (&str, PosType) {
        (self.rname.as_str(), self.position)
    }
}

/// A site after per-sample filtering, aggregated over samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSummary {
    pub rname:        String,
    #[serde(rename = "transcript_position")]
    pub position:     PosType,
    /// Sum of the read counts of the samples that passed the filter.
    pub read_count:   u64,
    /// Number of samples that passed the filter.
    pub sample_count: usize,
}

/// Inclusive, 0-based index range over the selected sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub start: usize,
    pub end:   usize,
}

impl Segment {
    pub fn new(
        start: usize,
        end: usize,
    ) -> Self {
        Self { start, end }
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl Display for Segment {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// What was ingested for one sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleInfo {
    pub sample_name: String,
    pub group_name:  String,
    /// Number of read files of the sample.
    pub files:       usize,
    /// Read rows seen, ignored calls included.
    pub raw_reads:   u64,
}

impl SampleInfo {
    /// Whether the sample counts towards the cohort size.
    pub fn is_observed(&self) -> bool {
        self.raw_reads > 0
    }
}
