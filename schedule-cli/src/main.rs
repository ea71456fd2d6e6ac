mod commands;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use schedule_core::settings::GridOverrides;

#[derive(Parser)]
#[command(name = "schedule")]
#[command(about = "Lay out schedule day views on a slot grid")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Grid attributes that override the schedule file and global settings.
#[derive(Args, Debug, Default)]
pub struct GridArgs {
    /// Start time of the first slot (e.g. "9:00")
    #[arg(long)]
    slot_start: Option<String>,

    /// Length of each slot (e.g. "0:30", or a minute count like "30")
    #[arg(long)]
    slot_length: Option<String>,

    /// Number of slots in the grid
    #[arg(long, allow_negative_numbers = true)]
    slots: Option<i64>,
}

impl From<GridArgs> for GridOverrides {
    fn from(args: GridArgs) -> Self {
        GridOverrides {
            slot_start: args.slot_start,
            slot_length: args.slot_length,
            slots: args.slots,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the placement computed for every event
    Place {
        /// Schedule file (TOML)
        file: PathBuf,

        #[command(flatten)]
        grid: GridArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Draw each day as a text grid
    Show {
        /// Schedule file (TOML)
        file: PathBuf,

        #[command(flatten)]
        grid: GridArgs,
    },
    /// Print the time labels for the grid
    ///
    /// Labels are counted by slots, not by time, so a zero slot length prints
    /// the grid start once per slot. Placement commands reject that grid.
    Legend {
        #[command(flatten)]
        grid: GridArgs,
    },
    /// Show the settings path and the default grid
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Place { file, grid, json } => commands::place::run(&file, grid.into(), json),
        Commands::Show { file, grid } => commands::show::run(&file, grid.into()),
        Commands::Legend { grid } => commands::legend::run(grid.into()),
        Commands::Config => commands::config::run(),
    }
}
