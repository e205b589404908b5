use std::collections::BTreeMap;

use anyhow::{
    bail,
    Context,
};
use hashbrown::HashMap;
use itertools::Itertools;
use log::{
    debug,
    info,
};
use polars::prelude::DataFrame;
use rayon::prelude::*;

use crate::data_structs::typedef::{
    PosType,
    ProbType,
};
use crate::data_structs::{
    validate_probability,
    ProbAccumulator,
    ReadRecord,
    SampleInfo,
    SiteSampleSummary,
};
use crate::io::reads::{
    iter_calls,
    read_calls,
};
use crate::io::SampleEntry;
use crate::tools::config::IgnoreInterval;
use crate::utils::{
    n_threads,
    THREAD_POOL,
};

/// rname -> position -> accumulator
type SiteTable = HashMap<String, HashMap<PosType, ProbAccumulator>>;

#[derive(Debug, Default)]
struct SampleState {
    group_name: String,
    files:      usize,
    raw_reads:  u64,
    ignored:    u64,
    sites:      SiteTable,
}

impl SampleState {
    fn push(
        &mut self,
        interval: &IgnoreInterval,
        rname: &str,
        position: PosType,
        probability: ProbType,
    ) {
        self.raw_reads += 1;
        if interval.contains(probability) {
            self.ignored += 1;
            return;
        }
        self.sites
            .entry_ref(rname)
            .or_default()
            .entry(position)
            .or_default()
            .push(probability);
    }

    fn merge(
        &mut self,
        other: SampleState,
    ) {
        self.files += other.files;
        self.raw_reads += other.raw_reads;
        self.ignored += other.ignored;
        for (rname, positions) in other.sites {
            let table = self.sites.entry(rname).or_default();
            for (position, acc) in positions {
                table.entry(position).or_default().merge(acc);
            }
        }
    }
}

/// Reduces per-read calls into per-(site, sample) summaries.
///
/// Calls inside the ignore interval are counted towards the sample's raw
/// read total but excluded from every statistic. Aggregators built over
/// disjoint chunks of the input can be combined with
/// [`SummaryAggregator::merge`] in any order.
#[derive(Debug)]
pub struct SummaryAggregator {
    interval: IgnoreInterval,
    samples:  BTreeMap<String, SampleState>,
}

impl SummaryAggregator {
    pub fn new(interval: IgnoreInterval) -> Self {
        Self {
            interval,
            samples: BTreeMap::new(),
        }
    }

    pub fn interval(&self) -> IgnoreInterval {
        self.interval
    }

    fn sample_state(
        &mut self,
        sample_name: &str,
        group_name: &str,
    ) -> anyhow::Result<&mut SampleState> {
        let state = self
            .samples
            .entry(sample_name.to_string())
            .or_insert_with(|| {
                SampleState {
                    group_name: group_name.to_string(),
                    ..Default::default()
                }
            });
        if state.group_name != group_name {
            bail!(
                "Sample '{}' is assigned to both group '{}' and group '{}'",
                sample_name,
                state.group_name,
                group_name
            )
        }
        Ok(state)
    }

    /// Adds a single call. Fails if its probability is outside `[0, 1]`.
    pub fn push(
        &mut self,
        record: &ReadRecord,
    ) -> anyhow::Result<()> {
        record.validate()?;
        let interval = self.interval;
        self.sample_state(&record.sample_name, &record.group_name)?
            .push(
                &interval,
                &record.rname,
                record.position,
                record.probability_modified,
            );
        Ok(())
    }

    /// Adds every row of a call table belonging to one sample. Returns the
    /// number of rows.
    ///
    /// A malformed row (missing field, negative position, probability outside
    /// `[0, 1]`) rejects the table. The rows before it are still
    /// accumulated, so the aggregator should be discarded on error.
    pub fn push_frame(
        &mut self,
        entry: &SampleEntry,
        df: &DataFrame,
    ) -> anyhow::Result<usize> {
        let interval = self.interval;
        let state = self.sample_state(&entry.sample_name, &entry.group_name)?;
        state.files += 1;

        let mut rows = 0;
        for (row, (rname, position, probability)) in iter_calls(df)?.enumerate() {
            let (rname, position, probability) = match (rname, position, probability) {
                (Some(rname), Some(position), Some(probability)) => {
                    (rname, position, probability)
                },
                _ => bail!("row {}: missing field", row),
            };
            let position = PosType::try_from(position)
                .with_context(|| format!("row {}: invalid position {}", row, position))?;
            validate_probability(probability).with_context(|| format!("row {}", row))?;

            state.push(&interval, rname, position, probability);
            rows += 1;
        }
        Ok(rows)
    }

    /// Reads a call file and adds it under the entry's sample.
    pub fn push_file(
        &mut self,
        entry: &SampleEntry,
    ) -> anyhow::Result<usize> {
        let df = read_calls(&entry.file_path)?;
        let rows = self
            .push_frame(entry, &df)
            .with_context(|| format!("Malformed read calls file {}", entry.file_path.display()))?;
        info!(
            "Inserted file {} (sample '{}', group '{}'): {} rows",
            entry.file_path.display(),
            entry.sample_name,
            entry.group_name,
            rows
        );
        Ok(rows)
    }

    /// Combines two aggregators over disjoint parts of the input.
    pub fn merge(
        mut self,
        other: SummaryAggregator,
    ) -> anyhow::Result<Self> {
        if self.interval != other.interval {
            bail!(
                "Cannot merge aggregators with different ignore intervals {} and {}",
                self.interval,
                other.interval
            )
        }
        for (sample_name, state) in other.samples {
            let group_name = state.group_name.clone();
            self.sample_state(&sample_name, &group_name)?.merge(state);
        }
        Ok(self)
    }

    /// Number of distinct samples with at least one read row, ignored
    /// calls included.
    pub fn total_distinct_samples(&self) -> usize {
        self.samples
            .values()
            .filter(|state| state.raw_reads > 0)
            .count()
    }

    /// Computes the summaries, sorted by `(rname, position, sample_name)`.
    pub fn finish(self) -> AggregatedSites {
        let samples = self
            .samples
            .iter()
            .map(|(sample_name, state)| {
                SampleInfo {
                    sample_name: sample_name.clone(),
                    group_name:  state.group_name.clone(),
                    files:       state.files,
                    raw_reads:   state.raw_reads,
                }
            })
            .collect_vec();

        for (sample_name, state) in self.samples.iter() {
            debug!(
                "Sample '{}': {} reads, {} ignored",
                sample_name, state.raw_reads, state.ignored
            );
        }

        let mut summaries = self
            .samples
            .into_iter()
            .flat_map(|(sample_name, state)| {
                state
                    .sites
                    .into_iter()
                    .flat_map(|(rname, positions)| {
                        positions
                            .into_iter()
                            .filter_map(|(position, acc)| {
                                acc.into_summary(&rname, position, &sample_name)
                            })
                            .collect_vec()
                    })
                    .collect_vec()
            })
            .collect_vec();
        summaries.sort_unstable_by(|a, b| {
            (a.rname.as_str(), a.position, a.sample_name.as_str()).cmp(&(
                b.rname.as_str(),
                b.position,
                b.sample_name.as_str(),
            ))
        });

        AggregatedSites { summaries, samples }
    }
}

/// Output of aggregation: the per-(site, sample) summaries and the samples
/// they were computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSites {
    summaries: Vec<SiteSampleSummary>,
    samples:   Vec<SampleInfo>,
}

impl AggregatedSites {
    pub fn new(
        summaries: Vec<SiteSampleSummary>,
        samples: Vec<SampleInfo>,
    ) -> Self {
        Self { summaries, samples }
    }

    pub fn summaries(&self) -> &[SiteSampleSummary] {
        &self.summaries
    }

    pub fn samples(&self) -> &[SampleInfo] {
        &self.samples
    }

    pub fn total_distinct_samples(&self) -> usize {
        total_distinct_samples(&self.samples)
    }

    pub fn into_parts(self) -> (Vec<SiteSampleSummary>, Vec<SampleInfo>) {
        (self.summaries, self.samples)
    }
}

/// Number of samples that contributed at least one read row.
pub fn total_distinct_samples(samples: &[SampleInfo]) -> usize {
    samples
        .iter()
        .filter(|s| s.is_observed())
        .map(|s| s.sample_name.as_str())
        .unique()
        .count()
}

/// Reads and aggregates every file of the sample sheet.
///
/// Files are ingested in parallel on the crate thread pool and the partial
/// results merged; `on_file` is called after each file.
pub fn aggregate_files<F>(
    entries: &[SampleEntry],
    interval: IgnoreInterval,
    on_file: F,
) -> anyhow::Result<AggregatedSites>
where
    F: Fn(&SampleEntry) + Sync, {
    info!(
        "Aggregating {} files on {} threads, ignoring probabilities in {}",
        entries.len(),
        n_threads(),
        interval
    );
    let aggregator = THREAD_POOL.install(|| {
        entries
            .par_iter()
            .map(|entry| -> anyhow::Result<SummaryAggregator> {
                let mut aggregator = SummaryAggregator::new(interval);
                aggregator.push_file(entry)?;
                on_file(entry);
                Ok(aggregator)
            })
            .try_reduce(
                || SummaryAggregator::new(interval),
                |left, right| left.merge(right),
            )
    })?;

    let total_samples = aggregator.total_distinct_samples();
    let result = aggregator.finish();
    info!(
        "Created {} site-sample summaries for {} samples",
        result.summaries().len(),
        total_samples
    );
    Ok(result)
}
