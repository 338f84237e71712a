// Command-line interface definition.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pitchcall_core::pitch::{Handedness, PitchType};
use pitchcall_core::query::Selection;

/// pitchcall - which pitch to throw next, from historical Statcast outcomes
#[derive(Parser, Debug)]
#[command(name = "pitchcall")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rank next-pitch choices by historical success after the pitch you just threw", long_about = None)]
pub struct Cli {
    /// Pitch table to load instead of the configured `data.path`
    #[arg(global = true, long = "data", value_name = "CSV")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the top five next pitches for a context
    Recommend {
        /// Previous pitch (code such as SL, or name); "any" for all
        #[arg(long = "previous", short = 'p', default_value = "any", value_parser = parse_pitch)]
        previous: Selection<PitchType>,

        /// Pitcher handedness (L, R or any)
        #[arg(long = "pitcher", default_value = "any", value_parser = parse_hand)]
        pitcher: Selection<Handedness>,

        /// Hitter handedness (L, R or any)
        #[arg(long = "hitter", default_value = "any", value_parser = parse_hand)]
        hitter: Selection<Handedness>,

        /// Output format
        #[arg(long = "format", value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List the filter values present in the pitch table
    Options,

    /// Print the pitch-type and metric glossary
    Glossary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

fn parse_pitch(s: &str) -> Result<Selection<PitchType>, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_hand(s: &str) -> Result<Selection<Handedness>, String> {
    s.parse().map_err(|e| format!("{e}"))
}
