mod fdr;
mod prep;
mod select;
pub(crate) mod utils;

use clap::{
    Parser,
    Subcommand,
};
use fdr::FdrArgs;
use prep::PrepArgs;
use select::SelectArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Summarise read-level calls per site and sample.
    Prep {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  PrepArgs,
    },

    /// Select sites covered by every sample and split them into segments.
    Select {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  SelectArgs,
    },

    /// Merge per-segment p-value tables and apply Benjamini-Hochberg.
    Fdr {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  FdrArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Prep { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Select { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Fdr { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
    }
    Ok(())
}
