use std::path::PathBuf;

use clap::Args;
use console::style;
use diffmod::prelude::*;
use log::info;

use crate::utils::{
    expand_wildcards,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct FdrArgs {
    #[arg(
        value_parser,
        num_args = 1..,
        required = true,
        help = "Per-segment p-value tables (parquet or arrow IPC)."
    )]
    tables: Vec<String>,

    #[arg(short, long, required = true, help = "Path for the corrected table (TSV).")]
    output: PathBuf,

    #[arg(
        short,
        long,
        default_value_t = FdrConfig::DEFAULT_ALPHA,
        help = "Significance level used when reporting results."
    )]
    alpha: f64,

    #[arg(
        long,
        help = "Segment table written by `select`. If given, one table per segment is required."
    )]
    segments: Option<PathBuf>,
}

impl FdrArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let config = FdrConfig::default().with_alpha(self.alpha);
        config.validate()?;
        let mut corrector = FdrCorrector::new(config);
        if let Some(segments_path) = &self.segments {
            let segments: Vec<Segment> = read_table(segments_path)?;
            info!("Expecting {} tables from {}", segments.len(), segments_path.display());
            corrector = corrector.with_expected_tables(segments.len());
        }

        let paths = expand_wildcards(&self.tables)?;
        let progress_bar = utils.progress_bar(paths.len())?;
        let tables = paths
            .iter()
            .map(|path| {
                read_pvalue_table(path).map(|df| {
                    progress_bar.inc(1);
                    (path.display().to_string(), df)
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        progress_bar.finish_and_clear();

        let mut corrected = corrector.correct(tables)?;
        write_corrected(&self.output, &mut corrected)?;

        println!(
            "[{}] {} tests corrected, written to {}",
            style("V").green(),
            style(corrected.height()).green(),
            self.output.display()
        );
        Ok(())
    }
}
