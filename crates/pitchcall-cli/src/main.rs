// pitchcall entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, stdout is for the report)
// 2. Parse arguments
// 3. For data commands: load config (copying defaults on first run) and
//    the pitch table, once
// 4. Run the requested command and print the result

mod cli;
mod render;

use anyhow::Context;
use clap::Parser;
use std::path::Path;
use tracing::{error, info};

use pitchcall_core::config::{self, Config};
use pitchcall_core::dataset;
use pitchcall_core::pitch::PitchEvent;
use pitchcall_core::query::FilterOptions;
use pitchcall_core::{recommend, FilterContext, RecommendError};

use cli::{Cli, Commands, OutputFormat};

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Glossary => {
            print!("{}", render::glossary_text());
        }
        Commands::Options => {
            let (_, events) = prepare(cli.data.as_deref())?;
            print!("{}", render::options_text(&FilterOptions::from_events(&events)));
        }
        Commands::Recommend {
            previous,
            pitcher,
            hitter,
            format,
        } => {
            let (config, events) = prepare(cli.data.as_deref())?;
            let context = FilterContext::from_selections(previous, pitcher, hitter);
            let results = recommend(&events, &context, &config.scoring).map_err(|e| {
                error!("recommendation failed: {}", e);
                anyhow::Error::new(e)
            })?;
            info!("{} recommendations for {:?}", results.len(), context);

            match format {
                OutputFormat::Table => {
                    print!("{}", render::recommendation_table(&context, &results))
                }
                OutputFormat::Json => println!(
                    "{}",
                    render::recommendation_json(&context, &results)
                        .context("failed to serialize recommendations")?
                ),
            }
        }
    }

    Ok(())
}

/// Load config (with an optional data path override) and the pitch table.
fn prepare(data_override: Option<&Path>) -> anyhow::Result<(Config, Vec<PitchEvent>)> {
    let mut config = config::load_config().context("failed to load configuration")?;
    if let Some(path) = data_override {
        config.data.path = path.display().to_string();
    }
    info!(
        "Config loaded: data={}, min_year={:?}, weak_contact_mph={}",
        config.data.path, config.data.min_year, config.scoring.weak_contact_mph
    );

    let events = load_table(&config)?;
    Ok((config, events))
}

/// Load the pitch table, reporting any loader failure as missing data.
fn load_table(config: &Config) -> anyhow::Result<Vec<PitchEvent>> {
    info!("Loading pitch table from {}", config.data.path);
    let events = dataset::load_events(&config.data).map_err(|e| {
        error!("pitch table unavailable: {}", e);
        anyhow::Error::new(RecommendError::from(e))
    })?;
    info!("Loaded {} pitches", events.len());
    Ok(events)
}

/// Initialize tracing to log to a file so stdout only carries the report.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("pitchcall.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pitchcall=info,pitchcall_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
