mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::debug;
use std::process;

use commands::cash_flows::{IrrArgs, NpvArgs};
use commands::deal::DealArgs;
use commands::loan::{BalanceArgs, PaymentArgs};
use commands::report::ReportArgs;
use pencil_core::report::render_text;

/// Does my deal pencil? Commercial real estate underwriting
#[derive(Parser)]
#[command(
    name = "pencil",
    version,
    about = "Commercial real estate deal underwriting",
    long_about = "Underwrite a levered commercial real estate acquisition: loan \
                  amortization, yearly cash flow projection, IRR, DSCR, cash-on-cash, \
                  equity multiple, break-even occupancy, NPV and a qualitative verdict. \
                  Deals come from a JSON/YAML file, piped JSON, or per-field flags."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Underwrite and assess a deal
    Analyze(DealArgs),
    /// Print the formatted deal report (structured with --output json)
    Report(ReportArgs),
    /// Monthly payment and annual debt service for a loan
    Payment(PaymentArgs),
    /// Outstanding loan balance after a number of years
    Balance(BalanceArgs),
    /// Internal rate of return of a cash flow series
    Irr(IrrArgs),
    /// Net present value of a cash flow series
    Npv(NpvArgs),
    /// List every out-of-range deal parameter
    Validate(DealArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::deal::run_analyze(args),
        Commands::Report(args) => match commands::report::run_report(args) {
            Ok(report) if !matches!(cli.output, OutputFormat::Json) => {
                print!("{}", render_text(&report));
                return;
            }
            Ok(report) => serde_json::to_value(report).map_err(Into::into),
            Err(e) => Err(e),
        },
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Balance(args) => commands::loan::run_balance(args),
        Commands::Irr(args) => commands::cash_flows::run_irr(args),
        Commands::Npv(args) => commands::cash_flows::run_npv(args),
        Commands::Validate(args) => commands::deal::run_validate(args),
        Commands::Version => {
            println!("pencil {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            debug!("formatting output as {:?}", cli.output);
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
