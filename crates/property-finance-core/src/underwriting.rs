//! Single-property rental underwriting: stabilized first-year metrics
//! derived from a flat set of deal assumptions.

use serde::{Deserialize, Serialize};

use crate::amortization::monthly_payment;
use crate::types::{with_metadata, ComputationOutput, Money, Multiple, Percent};

/// Placeholder share of gross rent standing in for all non-management
/// operating expenses (taxes, insurance, maintenance, reserves).
/// TODO: replace with itemized expense lines.
pub const OTHER_OPEX_RATIO: f64 = 0.30;

/// Holding period, in years, behind the simplified equity multiple estimate.
pub const HOLD_YEARS_ESTIMATE: f64 = 5.0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Inputs for underwriting a single rental property.
///
/// Percentage fields use whole-number scaling (7 = 7%); the conversion to
/// decimals happens inside the pipeline. Fields are not assumed non-negative:
/// zero and negative values degrade through the floors and guards below
/// instead of erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealAssumptions {
    /// Contract purchase price of the property
    pub purchase_price: Money,
    /// Closing costs (title, escrow, legal)
    pub closing_costs: Money,
    /// Lender origination fees and points
    pub loan_costs: Money,
    /// Rehab budget and operating-deficit reserve
    pub rehab_reserve: Money,
    /// Any other acquisition costs
    pub misc_costs: Money,
    /// Loan size as a percentage of purchase price (75 = 75%)
    pub loan_pct: Percent,
    /// Annual nominal interest rate (6.25 = 6.25%)
    pub interest_rate_pct: Percent,
    /// Amortization term in years
    pub amort_years: f64,
    /// Vacancy loss as a percentage of gross rent (7 = 7%)
    pub vacancy_pct: Percent,
    /// Starting monthly gross rent
    pub starting_rent: Money,
    /// Other monthly income (laundry, parking, fees)
    pub misc_income: Money,
    /// Property management fee as a percentage of gross rent (10 = 10%)
    pub prop_mgmt_pct: Percent,
}

/// Stabilized first-year metrics, fully determined by the assumptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealMetrics {
    /// Purchase price plus all acquisition costs
    pub total_cost: Money,
    /// Principal borrowed
    pub loan_amount: Money,
    /// Fixed monthly mortgage payment
    pub monthly_debt_service: Money,
    /// Monthly net operating income, floored at zero
    pub monthly_noi: Money,
    /// Monthly cash flow after debt service; may be negative
    pub monthly_cash_flow: Money,
    /// Monthly cash flow annualized
    pub annualized_cash_flow: Money,
    /// Cash invested at close, floored at zero
    pub initial_equity: Money,
    /// Annualized cash flow over initial equity, as a percentage
    pub cash_on_cash_pct: Percent,
    /// Annualized NOI over total cost, as a percentage
    pub stabilized_yield_pct: Percent,
    /// Simplified five-year equity multiple proxy
    pub equity_multiple_est: Multiple,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Derives the stabilized first-year metrics from a set of assumptions.
///
/// Total over any numeric input: every division is guarded, floors clamp
/// negative NOI and equity to zero, and non-finite values from extreme
/// inputs pass through into the output record instead of aborting. Identical
/// assumptions always produce bit-identical metrics.
pub fn compute_metrics(input: &DealAssumptions) -> DealMetrics {
    let total_cost = input.purchase_price
        + input.closing_costs
        + input.loan_costs
        + input.rehab_reserve
        + input.misc_costs;
    let loan_amount = input.loan_pct / 100.0 * input.purchase_price;
    let monthly_debt_service =
        monthly_payment(loan_amount, input.interest_rate_pct, input.amort_years * 12.0);

    let gross_after_vacancy =
        input.starting_rent * (1.0 - input.vacancy_pct / 100.0) + input.misc_income;
    let management_expense = input.prop_mgmt_pct / 100.0 * input.starting_rent;
    let other_operating = OTHER_OPEX_RATIO * input.starting_rent;
    let monthly_opex = management_expense + other_operating;
    let monthly_noi = floored(gross_after_vacancy - monthly_opex, 0.0);

    let monthly_cash_flow = monthly_noi - monthly_debt_service;
    let annualized_cash_flow = monthly_cash_flow * 12.0;
    let initial_equity = floored(total_cost - loan_amount, 0.0);

    let cash_on_cash_pct = if initial_equity > 0.0 {
        annualized_cash_flow / initial_equity * 100.0
    } else {
        0.0
    };
    let stabilized_yield_pct = if total_cost > 0.0 {
        monthly_noi * 12.0 / total_cost * 100.0
    } else {
        0.0
    };
    let equity_multiple_est =
        1.0 + annualized_cash_flow * HOLD_YEARS_ESTIMATE / floored(initial_equity, 1.0);

    DealMetrics {
        total_cost,
        loan_amount,
        monthly_debt_service,
        monthly_noi,
        monthly_cash_flow,
        annualized_cash_flow,
        initial_equity,
        cash_on_cash_pct,
        stabilized_yield_pct,
        equity_multiple_est,
    }
}

/// Runs the underwriting pipeline and wraps the metrics in the standard
/// output envelope. Warnings are advisory and never change the numbers.
pub fn analyze_deal(input: &DealAssumptions) -> ComputationOutput<DealMetrics> {
    let start = std::time::Instant::now();

    let metrics = compute_metrics(input);
    let warnings = collect_warnings(input, &metrics);

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Rental Property Underwriting (Stabilized First-Year Snapshot)",
        input,
        warnings,
        elapsed,
        metrics,
    )
}

/// Floor with ECMAScript `Math.max` NaN semantics: a NaN input comes back
/// NaN rather than clamping to the floor.
fn floored(value: f64, floor: f64) -> f64 {
    if value.is_nan() {
        value
    } else {
        value.max(floor)
    }
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn collect_warnings(input: &DealAssumptions, metrics: &DealMetrics) -> Vec<String> {
    let mut warnings = Vec::new();

    if input.vacancy_pct > 15.0 {
        warnings.push(format!(
            "Vacancy assumption of {:.1}% is above typical stabilized levels",
            input.vacancy_pct
        ));
    }
    if metrics.loan_amount <= 0.0 {
        warnings.push("No financing assumed; metrics reflect an all-cash purchase".to_string());
    } else if metrics.monthly_debt_service == 0.0 {
        warnings.push(
            "Financed deal produced no debt service; check rate and amortization term".to_string(),
        );
    }
    if metrics.total_cost - metrics.loan_amount < 0.0 {
        warnings
            .push("Loan amount exceeds total project cost; initial equity floored at zero".to_string());
    }
    if metrics.monthly_noi == 0.0 && metrics.total_cost > 0.0 {
        warnings.push(
            "Operating expenses absorb all effective gross income; NOI floored at zero".to_string(),
        );
    }
    if metrics.monthly_cash_flow < 0.0 {
        warnings.push(format!(
            "Deal is cash-flow negative after debt service ({:.2}/month)",
            metrics.monthly_cash_flow
        ));
    }
    if has_non_finite(metrics) {
        warnings.push(
            "Results contain non-finite values; one or more assumptions are outside the \
             representable range"
                .to_string(),
        );
    }

    warnings
}

fn has_non_finite(metrics: &DealMetrics) -> bool {
    [
        metrics.total_cost,
        metrics.loan_amount,
        metrics.monthly_debt_service,
        metrics.monthly_noi,
        metrics.monthly_cash_flow,
        metrics.annualized_cash_flow,
        metrics.initial_equity,
        metrics.cash_on_cash_pct,
        metrics.stabilized_yield_pct,
        metrics.equity_multiple_est,
    ]
    .iter()
    .any(|v| !v.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
