mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::debug;
use std::process;

use commands::format::FormatArgs;
use commands::funding::FundingPlanArgs;
use commands::gift_tax::GiftTaxArgs;
use commands::loan::{AmortizeArgs, CompareLoansArgs, OptimalRateArgs};

/// Homebuyer financing calculations
#[derive(Parser)]
#[command(
    name = "hfc",
    version,
    about = "Homebuyer financing calculations",
    long_about = "Plan home purchase financing with decimal precision: bank and private \
                  loan repayment schedules, the private-loan rate that stays inside the \
                  tax-free imputed interest allowance, progressive gift tax, and a \
                  simplified funding plan."
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
    /// Build a month-by-month loan repayment schedule
    Amortize(AmortizeArgs),
    /// Derive the private-loan rate that keeps imputed interest tax free
    OptimalRate(OptimalRateArgs),
    /// Compare a bank loan with a private (family) loan
    CompareLoans(CompareLoansArgs),
    /// Calculate gift tax with the progressive bracket schedule
    GiftTax(GiftTaxArgs),
    /// Aggregate own funds, gifts and loans into a funding plan
    FundingPlan(FundingPlanArgs),
    /// Format an amount in won and in 억/만 units
    Format(FormatArgs),
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
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Amortize(args) => commands::loan::run_amortize(args),
        Commands::OptimalRate(args) => commands::loan::run_optimal_rate(args),
        Commands::CompareLoans(args) => commands::loan::run_compare_loans(args),
        Commands::GiftTax(args) => commands::gift_tax::run_gift_tax(args),
        Commands::FundingPlan(args) => commands::funding::run_funding_plan(args),
        Commands::Format(args) => commands::format::run_format(args),
        Commands::Version => {
            println!("hfc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            debug!("rendering output as {:?}", cli.output);
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
