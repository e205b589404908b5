#![allow(dead_code)]
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use diffmod::prelude::*;
use rand::seq::SliceRandom;
use rand::{
    Rng,
    SeedableRng,
};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub rname:       String,
    pub position:    PosType,
    pub probability: ProbType,
}

/// Read-level calls of a synthetic cohort.
#[derive(Debug, Clone)]
pub struct DemoCohort {
    /// sample -> group
    pub groups: BTreeMap<String, String>,
    /// sample -> calls
    pub calls:  BTreeMap<String, Vec<Call>>,
}

pub struct DemoCallsBuilder {
    n_transcripts: usize,
    n_positions:   PosType,
    min_reads:     usize,
    max_reads:     usize,
    rng:           ChaCha8Rng,
}

impl DemoCallsBuilder {
    pub fn new(
        n_transcripts: usize,
        n_positions: PosType,
        min_reads: usize,
        max_reads: usize,
        seed: u64,
    ) -> Self {
        Self {
            n_transcripts,
            n_positions,
            min_reads,
            max_reads,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Probabilities are drawn on a 0.001 grid, so interval bounds and ties
    /// are hit regularly.
    fn probability(&mut self) -> ProbType {
        self.rng.gen_range(0..=1000) as f64 / 1000.0
    }

    pub fn build(
        &mut self,
        samples: &[(&str, &str)],
    ) -> DemoCohort {
        let mut groups = BTreeMap::new();
        let mut calls = BTreeMap::new();
        for (sample, group) in samples {
            let mut sample_calls = Vec::new();
            for t in 0..self.n_transcripts {
                for position in 0..self.n_positions {
                    let n_reads = self.rng.gen_range(self.min_reads..=self.max_reads);
                    for _ in 0..n_reads {
                        sample_calls.push(Call {
                            rname: format!("ENST{:05}", t),
                            position,
                            probability: self.probability(),
                        });
                    }
                }
            }
            groups.insert(sample.to_string(), group.to_string());
            calls.insert(sample.to_string(), sample_calls);
        }
        DemoCohort { groups, calls }
    }
}

impl DemoCohort {
    /// Adds a sample whose calls all carry the same probability.
    pub fn add_constant_sample(
        &mut self,
        sample: &str,
        group: &str,
        sites: &[(&str, PosType)],
        probability: ProbType,
    ) {
        let calls = sites
            .iter()
            .flat_map(|(rname, position)| {
                (0..10).map(move |_| Call {
                    rname: rname.to_string(),
                    position: *position,
                    probability,
                })
            })
            .collect();
        self.groups.insert(sample.to_string(), group.to_string());
        self.calls.insert(sample.to_string(), calls);
    }

    /// Writes every sample as `n_files` shuffled call files plus a sample
    /// sheet with relative paths. Returns the sheet path.
    pub fn write(
        &self,
        dir: &Path,
        n_files: usize,
        seed: u64,
    ) -> anyhow::Result<PathBuf> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let sheet_path = dir.join("samples.csv");
        let mut sheet = File::create(&sheet_path)?;
        writeln!(sheet, "sample_name,group,file_path")?;

        for (sample, calls) in self.calls.iter() {
            let mut calls = calls.clone();
            calls.shuffle(&mut rng);
            let chunk_size = calls.len().div_ceil(n_files).max(1);
            let mut chunks = calls.chunks(chunk_size).collect::<Vec<_>>();
            chunks.resize(n_files, &[]);

            for (i, chunk) in chunks.into_iter().enumerate() {
                let file_name = format!("{}_{}.tsv", sample, i);
                write_calls(&dir.join(&file_name), chunk)?;
                writeln!(sheet, "{},{},{}", sample, self.groups[sample], file_name)?;
            }
        }
        Ok(sheet_path)
    }

    /// Non-ignored probabilities per (rname, position, sample).
    pub fn kept_values(
        &self,
        interval: &IgnoreInterval,
    ) -> BTreeMap<(String, PosType, String), Vec<ProbType>> {
        let mut kept: BTreeMap<_, Vec<ProbType>> = BTreeMap::new();
        for (sample, calls) in self.calls.iter() {
            for call in calls.iter().filter(|c| !interval.contains(c.probability)) {
                kept.entry((call.rname.clone(), call.position, sample.clone()))
                    .or_default()
                    .push(call.probability);
            }
        }
        kept
    }
}

/// Writes calls as a tab-separated file. An unused leading column checks
/// that columns are picked by name.
pub fn write_calls(
    path: &Path,
    calls: &[Call],
) -> anyhow::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "read_id\tchrom\tref_position\tmod_qual")?;
    for (i, call) in calls.iter().enumerate() {
        writeln!(
            file,
            "read_{}\t{}\t{}\t{}",
            i, call.rname, call.position, call.probability
        )?;
    }
    Ok(())
}

pub fn demo_interval() -> IgnoreInterval {
    IgnoreInterval::try_new(0.3, 0.7).unwrap()
}
