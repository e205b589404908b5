use std::collections::BTreeMap;

use hashbrown::HashSet;
use log::info;

use crate::data_structs::typedef::{
    CountType,
    PosType,
};
use crate::data_structs::{
    Segment,
    SiteSampleSummary,
    SiteSummary,
};
use crate::tools::config::PrepConfig;

/// Complete-case site selection.
///
/// A site is selected only if every sample of the cohort has at least
/// `min_reads_per_sample` non-ignored reads there.
#[derive(Debug, Clone, Copy)]
pub struct SiteSelector {
    min_reads_per_sample: CountType,
}

impl From<&PrepConfig> for SiteSelector {
    fn from(config: &PrepConfig) -> Self {
        Self::new(*config.min_reads_per_sample())
    }
}

impl SiteSelector {
    pub fn new(min_reads_per_sample: CountType) -> Self {
        Self {
            min_reads_per_sample,
        }
    }

    pub fn min_reads_per_sample(&self) -> CountType {
        self.min_reads_per_sample
    }

    /// Selects the sites covered by all `total_distinct_samples` samples.
    ///
    /// `total_distinct_samples` is the cohort size over the whole raw input,
    /// not the number of samples seen at a particular site.
    pub fn select(
        &self,
        summaries: &[SiteSampleSummary],
        total_distinct_samples: usize,
    ) -> SelectedSites {
        info!("Number of unique samples: {}", total_distinct_samples);
        if total_distinct_samples == 0 {
            return SelectedSites::default();
        }

        let mut tallies: BTreeMap<(&str, PosType), (u64, HashSet<&str>)> = BTreeMap::new();
        for summary in summaries
            .iter()
            .filter(|s| s.read_count >= self.min_reads_per_sample)
        {
            let (read_count, samples) = tallies.entry(summary.site()).or_default();
            if samples.insert(summary.sample_name.as_str()) {
                *read_count += summary.read_count as u64;
            }
        }

        let sites: Vec<SiteSummary> = tallies
            .into_iter()
            .filter(|(_, (_, samples))| samples.len() == total_distinct_samples)
            .map(|((rname, position), (read_count, samples))| {
                SiteSummary {
                    rname: rname.to_string(),
                    position,
                    read_count,
                    sample_count: samples.len(),
                }
            })
            .collect();

        info!("Selected {} sites meeting criteria", sites.len());
        SelectedSites { sites }
    }
}

/// Selected sites in canonical `(rname, position)` order. The position of a
/// site in this sequence is its index for partitioning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedSites {
    sites: Vec<SiteSummary>,
}

impl SelectedSites {
    /// Wraps sites read back from disk. They are re-sorted so the index
    /// order does not depend on the file.
    pub fn from_sites(mut sites: Vec<SiteSummary>) -> Self {
        sites.sort_by(|a, b| (a.rname.as_str(), a.position).cmp(&(b.rname.as_str(), b.position)));
        Self { sites }
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn sites(&self) -> &[SiteSummary] {
        &self.sites
    }

    /// Sites covered by a segment. Indices past the end are clipped.
    pub fn segment(
        &self,
        segment: &Segment,
    ) -> &[SiteSummary] {
        let end = (segment.end + 1).min(self.sites.len());
        let start = segment.start.min(end);
        &self.sites[start..end]
    }

    pub fn into_sites(self) -> Vec<SiteSummary> {
        self.sites
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn summary(
        rname: &str,
        position: PosType,
        sample: &str,
        read_count: CountType,
    ) -> SiteSampleSummary {
        SiteSampleSummary {
            rname: rname.to_string(),
            position,
            sample_name: sample.to_string(),
            read_count,
            max_prob: 1.0,
            min_prob: 0.0,
            mean_prob: 0.5,
            variance: None,
        }
    }

    #[test]
    fn test_partial_coverage_is_not_selected() {
        let summaries = vec![
            // Only two of three samples clear the threshold.
            summary("tx1", 10, "s1", 6),
            summary("tx1", 10, "s2", 5),
            summary("tx1", 10, "s3", 4),
            // All three clear it.
            summary("tx1", 20, "s1", 5),
            summary("tx1", 20, "s2", 7),
            summary("tx1", 20, "s3", 9),
        ];
        let selected = SiteSelector::new(5).select(&summaries, 3);

        assert_eq!(selected.sites(), &[SiteSummary {
            rname:        "tx1".to_string(),
            position:     20,
            read_count:   21,
            sample_count: 3,
        }]);
    }

    #[test]
    fn test_cohort_size_is_global() {
        // The site is complete among the samples present, but a fourth sample
        // exists in the input.
        let summaries = vec![
            summary("tx1", 10, "s1", 6),
            summary("tx1", 10, "s2", 6),
            summary("tx1", 10, "s3", 6),
        ];
        assert!(SiteSelector::new(5).select(&summaries, 4).is_empty());
        assert_eq!(SiteSelector::new(5).select(&summaries, 3).len(), 1);
    }

    #[test]
    fn test_no_samples_selects_nothing() {
        let summaries = vec![summary("tx1", 10, "s1", 6)];
        assert!(SiteSelector::new(0).select(&summaries, 0).is_empty());
        assert!(SiteSelector::new(0).select(&[], 0).is_empty());
    }

    #[test]
    fn test_selection_is_sorted() {
        let summaries = vec![
            summary("tx2", 1, "s1", 5),
            summary("tx10", 3, "s1", 5),
            summary("tx1", 30, "s1", 5),
            summary("tx1", 4, "s1", 5),
        ];
        let selected = SiteSelector::new(5).select(&summaries, 1);
        let keys = selected
            .sites()
            .iter()
            .map(|s| (s.rname.as_str(), s.position))
            .collect_vec();
        assert_eq!(keys, vec![("tx1", 4), ("tx1", 30), ("tx10", 3), ("tx2", 1)]);

        let reloaded = SelectedSites::from_sites(selected.sites().iter().rev().cloned().collect());
        assert_eq!(reloaded, selected);
    }

    #[test]
    fn test_segment_slicing() {
        let summaries = (0..5).map(|i| summary("tx1", i, "s1", 5)).collect_vec();
        let selected = SiteSelector::new(1).select(&summaries, 1);

        let slice = selected.segment(&Segment::new(1, 3));
        assert_eq!(slice.iter().map(|s| s.position).collect_vec(), vec![1, 2, 3]);
        assert_eq!(selected.segment(&Segment::new(3, 9)).len(), 2);
    }
}
