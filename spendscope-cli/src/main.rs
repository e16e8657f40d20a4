use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use spendscope_core::{Category, Currency, CurrencyDisplay, RawTransaction, Transaction, format_amount};
use spendscope_finance::{
    AnalysisClient, Classifier, StatementReport, TransactionFilter, View, categorize,
};
use spendscope_ingest::{demo_statement, load_statement};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod auth;
mod config;
mod render;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "spendscope",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SPENDSCOPE_BUILD_SHA"), ")"),
    about = "Categorize a bank statement and explain where the money went"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a statement file (PDF, CSV, or extracted text)
    Analyze {
        file: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Analyze the built-in demo statement
    Demo {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Show which category a single transaction would get
    Categorize {
        description: String,

        /// Signed amount: negative = expense, positive = income
        #[arg(allow_hyphen_values = true)]
        amount: f64,
    },

    /// Convert an amount between USD and INR
    Convert {
        #[arg(allow_hyphen_values = true)]
        amount: f64,

        #[arg(long, default_value = "USD")]
        from: Currency,

        #[arg(long, default_value = "INR")]
        to: Currency,
    },

    /// Manage ~/.spendscope/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file location
    Path,
}

#[derive(Args, Debug, Clone)]
struct ReportArgs {
    /// Display currency (USD or INR); defaults to the config value
    #[arg(long)]
    currency: Option<Currency>,

    /// Only list transactions matching this text
    #[arg(long)]
    search: Option<String>,

    /// Only list (and chart) this category, e.g. "Food & Dining"
    #[arg(long)]
    category: Option<Category>,

    /// all, income or expenses
    #[arg(long, default_value = "all")]
    view: View,

    /// Ask the analysis API for model-generated insights
    #[arg(long)]
    ai: bool,

    /// API key for --ai (falls back to $OPENAI_API_KEY, then a prompt)
    #[arg(long)]
    api_key: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

/// JSON output: the listed transactions respect the filter; breakdown and
/// summary always cover the whole statement.
#[derive(Serialize)]
struct JsonReport<'a> {
    currency: Currency,
    #[serde(flatten)]
    report: &'a StatementReport,
    listed: Vec<&'a Transaction>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .init();

    match cli.command {
        Command::Analyze { file, report } => {
            let cfg = config::load_config()?;
            let raw = load_statement(&file, &cfg.load_options())
                .await
                .with_context(|| format!("processing {}", file.display()))?;
            run_report(raw, report, &cfg).await?;
        }

        Command::Demo { report } => {
            let cfg = config::load_config()?;
            run_report(demo_statement(), report, &cfg).await?;
        }

        Command::Categorize {
            description,
            amount,
        } => {
            println!("{}", categorize(&description, amount));
        }

        Command::Convert { amount, from, to } => {
            let rates = config::load_config()?.rates();
            let converted = rates.convert(rates.to_base(amount, from), to);
            println!(
                "{} = {}",
                format_amount(amount, from),
                format_amount(converted, to)
            );
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

async fn run_report(raw: Vec<RawTransaction>, args: ReportArgs, cfg: &Config) -> Result<()> {
    let money = CurrencyDisplay::new(args.currency.unwrap_or(cfg.currency.default), cfg.rates());

    let mut classifier = Classifier::default();
    let mut report = StatementReport::build(&raw, &mut classifier, &money)?;
    info!(count = report.transactions.len(), "processed transactions");

    if args.ai {
        match auth::resolve_api_key(args.api_key.clone())? {
            Some(key) => {
                let client = AnalysisClient::new(cfg.analysis.clone());
                let analysis = client.analyze_or_fallback(&report.transactions, &key).await;
                if let Some(e) = &analysis.failure {
                    eprintln!("warning: {e}");
                }
                report = report.with_analysis(analysis.result);
            }
            None => eprintln!(
                "warning: an OpenAI API key is required for --ai (pass --api-key or set {}); showing built-in insights",
                auth::API_KEY_ENV
            ),
        }
    }

    let filter = TransactionFilter::new()
        .query(args.search.clone().unwrap_or_default())
        .category(args.category)
        .view(args.view);

    if args.json {
        let out = JsonReport {
            currency: money.currency,
            report: &report,
            listed: filter.apply(&report.transactions),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        render::print_report(&report, &filter, &money);
    }

    Ok(())
}
