use clap::Args;
use serde_json::{json, Value};

use property_finance_core::amortization::monthly_payment;
use property_finance_core::time_value::{self, IrrSolver};

/// Arguments for IRR solving
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct IrrArgs {
    /// Comma-separated cash flows, period 0 first (e.g. "-1000,300,300,300")
    #[arg(long)]
    pub cash_flows: String,

    /// Starting estimate as a decimal rate (0.10 = 10%)
    #[arg(long)]
    pub guess: Option<f64>,

    /// Convergence threshold on the step between estimates
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Cap on Newton iterations
    #[arg(long)]
    pub max_iterations: Option<u32>,
}

/// Arguments for NPV
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct NpvArgs {
    /// Discount rate per period as a decimal (0.08 = 8%)
    #[arg(long)]
    pub rate: f64,

    /// Comma-separated cash flows, period 0 first
    #[arg(long)]
    pub cash_flows: String,
}

/// Arguments for amortized payment
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PaymentArgs {
    /// Principal borrowed
    #[arg(long)]
    pub principal: f64,

    /// Annual nominal interest rate in percent (6.25 = 6.25%)
    #[arg(long)]
    pub rate: f64,

    /// Number of monthly periods
    #[arg(long)]
    pub months: f64,
}

pub fn run_irr(args: IrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cash_flows = parse_cash_flows(&args.cash_flows)?;

    let defaults = IrrSolver::default();
    let solver = IrrSolver {
        tolerance: args.tolerance.unwrap_or(defaults.tolerance),
        max_iterations: args.max_iterations.unwrap_or(defaults.max_iterations),
        initial_guess: args.guess.unwrap_or(defaults.initial_guess),
    };
    let outcome = solver.run(&cash_flows, solver.initial_guess);

    let mut result = json!({
        "irr": outcome.rate,
        "irr_pct": outcome.rate * 100.0,
        "iterations": outcome.iterations,
        "converged": outcome.converged,
    });
    if !outcome.rate.is_finite() {
        // Non-finite f64 serializes as null; keep the actual value readable.
        result["note"] = json!(format!(
            "non-finite result ({}): the Newton iteration divided by a zero \
             derivative or diverged",
            outcome.rate
        ));
    }
    Ok(result)
}

pub fn run_npv(args: NpvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cash_flows = parse_cash_flows(&args.cash_flows)?;
    let value = time_value::npv(args.rate, &cash_flows);

    Ok(json!({
        "npv": value,
        "rate": args.rate,
        "periods": cash_flows.len(),
    }))
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment = monthly_payment(args.principal, args.rate, args.months);

    Ok(json!({
        "payment": payment,
        "principal": args.principal,
        "rate_pct": args.rate,
        "months": args.months,
    }))
}

fn parse_cash_flows(raw: &str) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| format!("Invalid cash flow '{}': expected a number", s).into())
        })
        .collect()
}
