use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tax_core::{FederalTaxEngine, TaxYearConfig};
use tax_data::logging::{enable_file_logging, init_default_logging, set_log_level};
use tax_data::report::{render_federal, render_state, render_state_list};
use tax_data::{TaxBracketLoader, load_return};
use tax_states::{StateRegistry, StateTaxEngine, UsState};
use tracing::{debug, info, warn};

/// Calculate federal and state income tax for a return stored as TOML.
#[derive(Parser, Debug)]
#[command(name = "tax-calc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the tax return (TOML)
    #[arg(long = "return", value_name = "FILE", required_unless_present = "list_states")]
    return_file: Option<PathBuf>,

    /// State to calculate instead of the return's state of residence
    #[arg(long)]
    state: Option<String>,

    /// CSV file of federal rate schedules replacing the built-in tables
    #[arg(long, value_name = "FILE")]
    brackets: Option<PathBuf>,

    /// Log filter: a level (error, warn, info, debug, trace) or an
    /// EnvFilter directive. Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log output to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// List the states with a calculator and the states without income tax
    #[arg(long, default_value_t = false)]
    list_states: bool,

    /// Tax year for --list-states
    #[arg(long, default_value_t = 2025)]
    year: i32,
}

fn load_config(
    tax_year: i32,
    brackets: Option<&Path>,
) -> Result<TaxYearConfig> {
    let base = TaxYearConfig::for_year(tax_year)?;
    let Some(path) = brackets else {
        return Ok(base.clone());
    };

    let file =
        File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let records = TaxBracketLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
    debug!(rows = records.len(), path = %path.display(), "bracket rows read");

    TaxBracketLoader::apply(base, &records)
        .with_context(|| format!("Unusable brackets in {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_default_logging();
    if let Some(level) = &cli.log_level {
        set_log_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        enable_file_logging(path)?;
    }

    let registry = StateRegistry::with_builtin_states();

    if cli.list_states {
        let engine = StateTaxEngine::new(&registry, cli.year);
        print!(
            "{}",
            render_state_list(
                cli.year,
                &engine.get_supported_states(),
                &engine.get_no_income_tax_states()
            )
        );
        return Ok(());
    }

    let Some(return_path) = cli.return_file.as_deref() else {
        bail!("--return is required unless --list-states is given");
    };
    let mut tax_return = load_return(return_path)?;
    info!(path = %return_path.display(), tax_year = tax_return.tax_year, "return loaded");

    let config = load_config(tax_return.tax_year, cli.brackets.as_deref())?;
    let federal = FederalTaxEngine::new(&config)
        .calculate_complete_return(&mut tax_return)
        .context("Federal calculation failed")?;
    print!("{}", render_federal(federal));

    let state_code = cli
        .state
        .clone()
        .or_else(|| tax_return.state_of_residence.clone());
    let Some(state_code) = state_code else {
        return Ok(());
    };

    let engine = StateTaxEngine::new(&registry, tax_return.tax_year);
    match engine
        .calculate(&tax_return, &state_code)
        .with_context(|| format!("State calculation failed for {state_code}"))?
    {
        Some(breakdown) => {
            println!();
            print!("{}", render_state(&breakdown));
        }
        None => match UsState::parse(&state_code) {
            Some(state) if !state.has_income_tax() => {
                println!();
                println!("{} has no state income tax.", state.name());
            }
            _ => warn!(
                state_code = %state_code,
                tax_year = tax_return.tax_year,
                "no state calculator available"
            ),
        },
    }

    Ok(())
}
