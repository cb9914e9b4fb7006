mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::time_value::{IrrArgs, NpvArgs, PaymentArgs};
use commands::underwriting::AnalyzeArgs;

/// Rental property underwriting and cash-flow analysis
#[derive(Parser)]
#[command(
    name = "pfa",
    version,
    about = "Rental property underwriting and cash-flow analysis",
    long_about = "A CLI for underwriting single rental properties: stabilized \
                  first-year metrics (NOI, cash flow, cash-on-cash, yield, equity \
                  multiple), amortized loan payments, and NPV/IRR over arbitrary \
                  cash-flow series."
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
    /// Underwrite a deal: full stabilized metrics from assumptions
    Analyze(AnalyzeArgs),
    /// Solve the internal rate of return of a cash-flow series
    Irr(IrrArgs),
    /// Net present value of a cash-flow series at a discount rate
    Npv(NpvArgs),
    /// Fixed monthly payment for a fully amortizing loan
    Payment(PaymentArgs),
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
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::underwriting::run_analyze(args),
        Commands::Irr(args) => commands::time_value::run_irr(args),
        Commands::Npv(args) => commands::time_value::run_npv(args),
        Commands::Payment(args) => commands::time_value::run_payment(args),
        Commands::Version => {
            println!("pfa {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
