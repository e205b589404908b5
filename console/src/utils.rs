use std::path::PathBuf;

use anyhow::{
    bail,
    Context,
};
use clap::Args;
use glob::glob;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(long, default_value_t = 1, help = "Number of threads to use.")]
    pub threads:  usize,
    #[arg(short, long, default_value_t = false, help = "Verbose output.")]
    pub verbose:  bool,
    #[arg(
        long,
        default_value_t = false,
        help = "Display progress bar (Disable if you need clean pipeline logs)."
    )]
    pub progress: bool,
}

impl UtilsArgs {
    /// Configures thread counts and the logger. Must run before the library
    /// does any work, as pool sizes are read lazily from the environment.
    pub fn setup(&self) -> anyhow::Result<()> {
        if self.threads == 0 {
            bail!("Number of threads must be greater than 0");
        }
        std::env::set_var("DIFFMOD_NUM_THREADS", self.threads.to_string());
        std::env::set_var("POLARS_MAX_THREADS", self.threads.to_string());

        let mut builder = pretty_env_logger::formatted_builder();
        match std::env::var("RUST_LOG") {
            Ok(filters) => {
                builder.parse_filters(&filters);
            },
            Err(_) => {
                builder.filter_level(if self.verbose {
                    log::LevelFilter::Debug
                }
                else {
                    log::LevelFilter::Info
                });
            },
        }
        builder.try_init().context("Failed to set up logger")?;
        Ok(())
    }

    /// Progress bar over `total` steps, hidden unless `--progress` is set.
    pub fn progress_bar(
        &self,
        total: usize,
    ) -> anyhow::Result<ProgressBar> {
        if self.progress {
            init_pbar(total)
        }
        else {
            Ok(ProgressBar::hidden())
        }
    }
}

pub(crate) fn init_pbar(total: usize) -> anyhow::Result<ProgressBar> {
    let progress_bar = ProgressBar::new(total as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}, ETA: {eta}] [{bar:40.cyan/blue}] \
                 {pos:>5.green}/{len:5} {msg}",
            )?
            .progress_chars("#>-"),
    );
    progress_bar.set_message("Processing...");
    Ok(progress_bar)
}

/// Expands wildcards the shell passed through unexpanded. Literal paths are
/// kept as-is.
pub(crate) fn expand_wildcards(paths: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut expanded_paths = Vec::new();

    for path in paths {
        if path.contains('*') || path.contains('?') {
            let matches =
                glob(path).with_context(|| format!("Error processing wildcard '{}'", path))?;
            let before = expanded_paths.len();
            expanded_paths.extend(matches.filter_map(Result::ok));
            if expanded_paths.len() == before {
                bail!("Wildcard '{}' matched no files", path);
            }
        }
        else {
            expanded_paths.push(PathBuf::from(path));
        }
    }

    Ok(expanded_paths)
}
