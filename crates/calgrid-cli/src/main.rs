use std::io::stdout;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use calgrid_cli::commands::{day, events, export, month, util};
use calgrid_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let mut calendar = util::open_calendar(&config)?;
    let mut out = stdout().lock();

    match command {
        Commands::Month { month: shown } => {
            month::run(
                &mut out,
                &calendar,
                util::month_or_current(*shown)?,
                util::today(),
                config.preview_limit,
            )?;
        }
        Commands::Day { date, query, json } => {
            day::run(&mut out, &calendar, date, query, *json)?;
        }
        Commands::Add { date, fields } => {
            events::add(&mut out, &mut calendar, date, fields)?;
        }
        Commands::Edit {
            date,
            index,
            fields,
        } => {
            events::edit(&mut out, &mut calendar, date, *index, fields)?;
        }
        Commands::Remove { date, index } => {
            events::remove(&mut out, &mut calendar, date, *index)?;
        }
        Commands::Move { from, index, to } => {
            events::move_event(&mut out, &mut calendar, from, *index, to)?;
        }
        Commands::Export {
            format,
            month: shown,
            stdout,
        } => {
            let dir = (!*stdout).then_some(config.export_dir.as_path());
            export::run(
                &mut out,
                &calendar,
                *format,
                util::month_or_current(*shown)?,
                dir,
            )?;
        }
    }

    Ok(())
}
