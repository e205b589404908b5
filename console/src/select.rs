use std::path::PathBuf;

use clap::Args;
use console::style;
use diffmod::prelude::*;

use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct SelectArgs {
    #[arg(long, required = true, help = "Summary table written by `prep`.")]
    summary: PathBuf,

    #[arg(long, required = true, help = "Sample table written by `prep`.")]
    samples_table: PathBuf,

    #[arg(long, required = true, help = "Path for the selected sites table (TSV).")]
    sites: PathBuf,

    #[arg(long, required = true, help = "Path for the segment table (CSV).")]
    segments: PathBuf,

    #[arg(
        long,
        default_value_t = PrepConfig::DEFAULT_MIN_READS_PER_SAMPLE,
        help = "Minimum number of non-ignored reads every sample needs at a site."
    )]
    min_reads_per_sample: CountType,

    #[arg(
        long,
        default_value_t = PrepConfig::DEFAULT_BATCH_SIZE,
        help = "Maximum number of sites per segment."
    )]
    batch_size: usize,
}

impl SelectArgs {
    pub fn run(
        &self,
        _utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let summaries: Vec<SiteSampleSummary> = read_table(&self.summary)?;
        let samples: Vec<SampleInfo> = read_table(&self.samples_table)?;

        let selected = SiteSelector::new(self.min_reads_per_sample)
            .select(&summaries, total_distinct_samples(&samples));
        let segments = partition_sites(selected.len(), self.batch_size)?;

        write_table(&self.sites, selected.sites())?;
        write_table(&self.segments, &segments)?;

        println!(
            "[{}] {} sites selected, {} segments written to {}",
            style("V").green(),
            style(selected.len()).green(),
            style(segments.len()).green(),
            self.segments.display()
        );
        Ok(())
    }
}
