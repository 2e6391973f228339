use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use comptes_core::CompanySnapshot;
use comptes_finance::{
    DisplayOptions, NumberLocale, Report, compute_series, compute_year_metrics,
};
use comptes_ingest::{load_snapshot_dir, load_snapshot_json};
use std::path::PathBuf;
use tracing::{debug, info};

mod config;
mod logging;
mod render;
mod state;

use config::{Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "comptes", version, about = "Financial aggregation for PGC statements")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Grouped totals and ratios for the most recent fiscal years
    Report {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of fiscal years (default from config, 5)
        #[arg(long)]
        years: Option<usize>,

        #[command(flatten)]
        display: DisplayArgs,

        /// Output format (default from config, table)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// One fiscal year with variation and working capital breakdown
    Year {
        /// Fiscal year to show
        year: i32,

        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// List statements with missing rows or blank fields
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Manage ~/.comptes/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Directory holding statements.csv, balance_sheets.csv, income_statements.csv
    #[arg(long)]
    dir: Option<PathBuf>,

    /// JSON snapshot document
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DisplayArgs {
    /// Show amounts in thousands
    #[arg(long)]
    thousands: bool,

    /// Number locale: ca, es or en
    #[arg(long)]
    locale: Option<NumberLocale>,
}

impl SourceArgs {
    fn load(&self) -> Result<CompanySnapshot> {
        match (&self.dir, &self.json) {
            (Some(dir), _) => load_snapshot_dir(dir)
                .with_context(|| format!("loading snapshot from {}", dir.display())),
            (None, Some(json)) => load_snapshot_json(json)
                .with_context(|| format!("loading snapshot from {}", json.display())),
            (None, None) => bail!("pass --dir <DIR> or --json <FILE>"),
        }
    }
}

impl DisplayArgs {
    fn options(&self, cfg: &Config) -> DisplayOptions {
        DisplayOptions::new(
            self.thousands || cfg.report.thousands,
            self.locale.unwrap_or(cfg.report.locale),
        )
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    logging::init_tracing(&cfg.log.filter);
    debug!(?cfg, "loaded config");

    match cli.command {
        Command::Report {
            source,
            years,
            display,
            format,
        } => {
            let snapshot = source.load()?;
            let years = years.unwrap_or(cfg.report.years);
            let opts = display.options(&cfg);
            run_report(&snapshot, years, &opts, format.unwrap_or(cfg.report.format))?;
        }

        Command::Year {
            year,
            source,
            display,
        } => {
            let snapshot = source.load()?;
            run_year(&snapshot, year, &display.options(&cfg));
        }

        Command::Validate { source } => {
            let snapshot = source.load()?;
            if snapshot.is_empty() {
                println!("No financial statements found.");
                return Ok(());
            }
            println!("{}", render::validation_table(&snapshot));
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

fn run_report(
    snapshot: &CompanySnapshot,
    years: usize,
    opts: &DisplayOptions,
    format: OutputFormat,
) -> Result<()> {
    if years == 0 {
        bail!("--years must be at least 1");
    }
    let series = compute_series(snapshot, years);
    info!(years = series.years.len(), "computed metric series");
    let report = Report::build(&series, opts);

    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Csv => report
            .write_csv(std::io::stdout().lock())
            .context("writing csv to stdout")?,
        OutputFormat::Table => {
            if report.is_empty() {
                println!("No financial statements found.");
                return Ok(());
            }
            if opts.thousands {
                println!("Amounts in thousands\n");
            }
            println!("{}", render::report_table(&report));
        }
    }
    Ok(())
}

fn run_year(snapshot: &CompanySnapshot, year: i32, opts: &DisplayOptions) {
    let metrics = compute_year_metrics(
        year,
        &snapshot.statements,
        &snapshot.balance_sheets,
        &snapshot.income_statements,
    );
    let statement = snapshot.statement_for_year(year);
    match statement {
        Some(st) => println!("Fiscal year {} (statement {}, {:?})\n", year, st.id, st.status),
        None => println!("No statement for fiscal year {}; all figures are zero.\n", year),
    }

    // every available year, so the variation column has a predecessor
    let series = compute_series(snapshot, usize::MAX);
    println!("{}", render::year_table(&metrics, &series, opts));

    let balance_sheet = statement.and_then(|st| snapshot.balance_sheet(&st.id));
    println!("{}", render::working_capital_table(balance_sheet, &metrics, opts));
}
