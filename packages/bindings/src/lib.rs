use napi::Result as NapiResult;
use napi_derive::napi;
use serde::{Deserialize, Serialize};

use property_finance_core::time_value::IrrSolver;
use property_finance_core::underwriting::DealAssumptions;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Underwriting
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_deal(input_json: String) -> NapiResult<String> {
    let input: DealAssumptions = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = property_finance_core::underwriting::analyze_deal(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Time Value
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct IrrRequest {
    cash_flows: Vec<f64>,
    guess: Option<f64>,
    tolerance: Option<f64>,
    max_iterations: Option<u32>,
}

#[derive(Serialize)]
struct IrrResponse {
    rate: f64,
    rate_pct: f64,
    iterations: u32,
    converged: bool,
    finite: bool,
}

#[napi]
pub fn solve_irr(input_json: String) -> NapiResult<String> {
    let request: IrrRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;

    let defaults = IrrSolver::default();
    let solver = IrrSolver {
        tolerance: request.tolerance.unwrap_or(defaults.tolerance),
        max_iterations: request.max_iterations.unwrap_or(defaults.max_iterations),
        initial_guess: request.guess.unwrap_or(defaults.initial_guess),
    };
    let outcome = solver.run(&request.cash_flows, solver.initial_guess);

    // Non-finite doubles serialize as null; `finite` lets the JS side tell
    // a failed iteration apart from a missing field.
    let response = IrrResponse {
        rate: outcome.rate,
        rate_pct: outcome.rate * 100.0,
        iterations: outcome.iterations,
        converged: outcome.converged,
        finite: outcome.rate.is_finite(),
    };
    serde_json::to_string(&response).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct NpvRequest {
    rate: f64,
    cash_flows: Vec<f64>,
}

#[napi]
pub fn npv(input_json: String) -> NapiResult<String> {
    let request: NpvRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let value = property_finance_core::time_value::npv(request.rate, &request.cash_flows);
    serde_json::to_string(&serde_json::json!({ "npv": value })).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct PaymentRequest {
    principal: f64,
    annual_rate_pct: f64,
    months: f64,
}

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let request: PaymentRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = property_finance_core::amortization::monthly_payment(
        request.principal,
        request.annual_rate_pct,
        request.months,
    );
    serde_json::to_string(&serde_json::json!({ "payment": payment })).map_err(to_napi_error)
}
