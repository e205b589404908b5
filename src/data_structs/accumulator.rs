use super::records::SiteSampleSummary;
use super::typedef::{
    CountType,
    PosType,
    ProbType,
};

/// Reduction state for the calls of one sample at one site.
///
/// The accumulator keeps the contributing probabilities themselves and only
/// computes statistics on [`ProbAccumulator::into_summary`], after sorting
/// them. Merging is therefore a multiset union: any ingestion order and any
/// chunking of the input produce bit-identical summaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbAccumulator {
    values: Vec<ProbType>,
}

impl ProbAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        value: ProbType,
    ) {
        self.values.push(value);
    }

    /// Merges another accumulator of the same key into this one.
    pub fn merge(
        &mut self,
        other: ProbAccumulator,
    ) {
        if self.values.is_empty() {
            self.values = other.values;
        }
        else {
            self.values.extend(other.values);
        }
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Computes the summary statistics. Returns `None` if nothing was
    /// accumulated.
    pub fn into_summary(
        mut self,
        rname: &str,
        position: PosType,
        sample_name: &str,
    ) -> Option<SiteSampleSummary> {
        if self.values.is_empty() {
            return None;
        }
        self.values.sort_unstable_by(|a, b| a.total_cmp(b));

        let n = self.values.len();
        let mean = self.values.iter().sum::<ProbType>() / n as ProbType;
        let variance = if n > 1 {
            let squares = self
                .values
                .iter()
                .map(|v| (v - mean) * (v - mean))
                .sum::<ProbType>();
            Some(squares / (n - 1) as ProbType)
        }
        else {
            None
        };

        Some(SiteSampleSummary {
            rname: rname.to_string(),
            position,
            sample_name: sample_name.to_string(),
            read_count: n as CountType,
            min_prob: self.values[0],
            max_prob: self.values[n - 1],
            mean_prob: mean,
            variance,
        })
    }
}

impl FromIterator<ProbType> for ProbAccumulator {
    fn from_iter<T: IntoIterator<Item = ProbType>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
