use std::path::PathBuf;

use clap::Args;
use console::style;
use diffmod::prelude::*;
use log::info;

use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct PrepArgs {
    #[arg(
        short,
        long,
        required = true,
        help = "Sample sheet (CSV with sample_name, group and file_path columns)."
    )]
    samples: PathBuf,

    #[arg(
        long,
        required = true,
        help = "Lower bound of the ignored probability interval."
    )]
    lower: f64,

    #[arg(
        long,
        required = true,
        help = "Upper bound of the ignored probability interval."
    )]
    upper: f64,

    #[arg(
        short,
        long,
        required = true,
        help = "Path for the per-site, per-sample summary table (TSV)."
    )]
    output: PathBuf,

    #[arg(
        long,
        help = "Path for the sample table. Defaults to <output>.samples.tsv."
    )]
    samples_table: Option<PathBuf>,
}

impl PrepArgs {
    fn samples_table_path(&self) -> PathBuf {
        self.samples_table
            .clone()
            .unwrap_or_else(|| self.output.with_extension("samples.tsv"))
    }

    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let interval = IgnoreInterval::try_new(self.lower, self.upper)?;
        let entries = read_sample_sheet(&self.samples)?;

        let progress_bar = utils.progress_bar(entries.len())?;
        let aggregated = aggregate_files(&entries, interval, |_| progress_bar.inc(1))?;
        progress_bar.finish_and_clear();

        write_table(&self.output, aggregated.summaries())?;
        info!("Wrote summary table to {}", self.output.display());
        let samples_table = self.samples_table_path();
        write_table(&samples_table, aggregated.samples())?;
        info!("Wrote sample table to {}", samples_table.display());

        println!(
            "[{}] {} site-sample summaries from {} samples written to {}",
            style("V").green(),
            style(aggregated.summaries().len()).green(),
            style(aggregated.total_distinct_samples()).green(),
            self.output.display()
        );
        Ok(())
    }
}
