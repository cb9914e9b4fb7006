use clap::Args;
use serde_json::Value;

use property_finance_core::underwriting::{self, DealAssumptions};

use crate::input;

/// Arguments for deal underwriting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnalyzeArgs {
    /// Path to a JSON or YAML assumptions file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Contract purchase price
    #[arg(long)]
    pub purchase_price: Option<f64>,

    /// Closing costs (title, escrow, legal)
    #[arg(long)]
    pub closing_costs: Option<f64>,

    /// Lender origination fees and points
    #[arg(long)]
    pub loan_costs: Option<f64>,

    /// Rehab budget and operating-deficit reserve
    #[arg(long)]
    pub rehab_reserve: Option<f64>,

    /// Any other acquisition costs
    #[arg(long)]
    pub misc_costs: Option<f64>,

    /// Loan size as a percentage of purchase price (75 = 75%)
    #[arg(long)]
    pub loan_pct: Option<f64>,

    /// Annual nominal interest rate in percent (6.25 = 6.25%)
    #[arg(long, alias = "rate")]
    pub interest_rate_pct: Option<f64>,

    /// Amortization term in years
    #[arg(long)]
    pub amort_years: Option<f64>,

    /// Vacancy loss as a percentage of gross rent (7 = 7%)
    #[arg(long)]
    pub vacancy_pct: Option<f64>,

    /// Starting monthly gross rent
    #[arg(long)]
    pub starting_rent: Option<f64>,

    /// Other monthly income (laundry, parking, fees)
    #[arg(long)]
    pub misc_income: Option<f64>,

    /// Property management fee as a percentage of gross rent (10 = 10%)
    #[arg(long)]
    pub prop_mgmt_pct: Option<f64>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions: DealAssumptions = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        DealAssumptions {
            purchase_price: args
                .purchase_price
                .ok_or("--purchase-price is required (or provide --input)")?,
            closing_costs: args
                .closing_costs
                .ok_or("--closing-costs is required (or provide --input)")?,
            loan_costs: args
                .loan_costs
                .ok_or("--loan-costs is required (or provide --input)")?,
            rehab_reserve: args
                .rehab_reserve
                .ok_or("--rehab-reserve is required (or provide --input)")?,
            misc_costs: args.misc_costs.unwrap_or(0.0),
            loan_pct: args
                .loan_pct
                .ok_or("--loan-pct is required (or provide --input)")?,
            interest_rate_pct: args
                .interest_rate_pct
                .ok_or("--interest-rate-pct is required (or provide --input)")?,
            amort_years: args
                .amort_years
                .ok_or("--amort-years is required (or provide --input)")?,
            vacancy_pct: args
                .vacancy_pct
                .ok_or("--vacancy-pct is required (or provide --input)")?,
            starting_rent: args
                .starting_rent
                .ok_or("--starting-rent is required (or provide --input)")?,
            misc_income: args.misc_income.unwrap_or(0.0),
            prop_mgmt_pct: args
                .prop_mgmt_pct
                .ok_or("--prop-mgmt-pct is required (or provide --input)")?,
        }
    };

    let result = underwriting::analyze_deal(&assumptions);
    Ok(serde_json::to_value(result)?)
}
