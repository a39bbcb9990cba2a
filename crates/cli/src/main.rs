// salesboard - seller performance analytics from the command line

mod analyze;
mod exit_codes;
mod table;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use salesboard_analytics::SalesError;

use exit_codes::{sales_exit_code, EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "salesboard")]
#[command(about = "Rank sellers by profit, compute bonuses and top products")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a sales data file and print the seller ranking
    #[command(after_help = "\
Examples:
  salesboard analyze sales.json
  salesboard analyze sales.json --config review.toml
  salesboard analyze sales.json --json --top 3
  salesboard analyze sales.json --output report.json --lenient")]
    Analyze {
        /// Path to the JSON sales data (sellers, products, purchase_records)
        data: PathBuf,

        /// TOML run configuration
        #[arg(long, short = 'c', env = "SALESBOARD_CONFIG")]
        config: Option<PathBuf>,

        /// Output the full JSON report to stdout instead of the table
        #[arg(long)]
        json: bool,

        /// Write the JSON report to file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Top products kept per seller (overrides config)
        #[arg(long)]
        top: Option<usize>,

        /// Skip records and items with unknown sellers or products instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Check a sales data file (and optional config) without running the analysis
    #[command(after_help = "\
Examples:
  salesboard validate sales.json
  salesboard validate sales.json --config review.toml")]
    Validate {
        /// Path to the JSON sales data
        data: PathBuf,

        /// TOML run configuration
        #[arg(long, short = 'c', env = "SALESBOARD_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  salesboard-analytics ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not errors
            return ExitCode::from(if e.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS });
        }
    };

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            data,
            config,
            json,
            output,
            top,
            lenient,
        } => analyze::cmd_analyze(data, config, json, output, top, lenient),
        Commands::Validate { data, config } => analyze::cmd_validate(data, config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Create error from engine error with proper exit code.
    pub fn sales(err: SalesError) -> Self {
        let code = sales_exit_code(&err);
        let hint = match &err {
            SalesError::UnknownSeller { .. } | SalesError::UnknownProduct { .. } => {
                Some("pass --lenient to skip records with unknown references".to_string())
            }
            SalesError::DuplicateKey { .. } => {
                Some("seller ids and product SKUs must be unique".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
