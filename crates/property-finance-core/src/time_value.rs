use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// Convergence threshold on the step size between successive estimates.
pub const CONVERGENCE_THRESHOLD: f64 = 1e-7;
/// Iteration cap; past it the solver returns its last estimate.
pub const MAX_IRR_ITERATIONS: u32 = 100;
/// Starting rate when the caller has no better guess.
pub const DEFAULT_INITIAL_GUESS: Rate = 0.10;

/// Net Present Value of a series of cash flows at a periodic discount rate.
///
/// Period 0 is undiscounted. Total over the reals: a rate at or below -100%
/// produces non-finite discount factors that flow into the sum rather than
/// erroring.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> Money {
    let one_plus_r = 1.0 + rate;
    let mut result = 0.0;
    let mut discount = 1.0;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount *= one_plus_r;
        }
        result += cf / discount;
    }

    result
}

/// How a Newton-Raphson run ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IrrOutcome {
    pub rate: Rate,
    pub iterations: u32,
    pub converged: bool,
}

/// Newton-Raphson IRR solver with its constants as explicit settings.
///
/// The iteration is direct and unguarded: no bracketing, no bisection
/// fallback, no check that a real root exists. If the derivative vanishes at
/// some step the update divides by zero and the estimate goes non-finite,
/// propagating through the remaining iterations and coming back to the
/// caller as-is — results must be treated as potentially NaN or infinite.
/// Series with several sign changes can converge to any of the mathematically
/// valid roots depending on the starting guess. Non-convergence is not an
/// error: after `max_iterations` steps the last estimate is returned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IrrSolver {
    /// Stop once `|x_new - x|` drops below this.
    pub tolerance: f64,
    /// Hard cap on Newton steps.
    pub max_iterations: u32,
    /// Guess used by [`IrrSolver::solve`].
    pub initial_guess: Rate,
}

impl Default for IrrSolver {
    fn default() -> Self {
        Self {
            tolerance: CONVERGENCE_THRESHOLD,
            max_iterations: MAX_IRR_ITERATIONS,
            initial_guess: DEFAULT_INITIAL_GUESS,
        }
    }
}

impl IrrSolver {
    /// Solve starting from the solver's own `initial_guess`.
    pub fn solve(&self, cash_flows: &[Money]) -> Rate {
        self.run(cash_flows, self.initial_guess).rate
    }

    /// Solve starting from an explicit guess.
    pub fn solve_from(&self, cash_flows: &[Money], guess: Rate) -> Rate {
        self.run(cash_flows, guess).rate
    }

    /// Full outcome of a run: the estimate plus iteration count and whether
    /// the step-size criterion was met before the cap.
    pub fn run(&self, cash_flows: &[Money], guess: Rate) -> IrrOutcome {
        let mut rate = guess;

        for i in 0..self.max_iterations {
            let (npv_val, dnpv) = npv_and_derivative(cash_flows, rate);
            let next = rate - npv_val / dnpv;
            if (next - rate).abs() < self.tolerance {
                return IrrOutcome {
                    rate: next,
                    iterations: i + 1,
                    converged: true,
                };
            }
            rate = next;
        }

        IrrOutcome {
            rate,
            iterations: self.max_iterations,
            converged: false,
        }
    }
}

/// Internal Rate of Return using Newton-Raphson with the standard settings.
pub fn irr(cash_flows: &[Money], guess: Rate) -> Rate {
    IrrSolver::default().solve_from(cash_flows, guess)
}

/// Single pass accumulating `f(x) = Σ cf_t/(1+x)^t` and
/// `f'(x) = Σ -t·cf_t/(1+x)^(t+1)`.
fn npv_and_derivative(cash_flows: &[Money], rate: Rate) -> (f64, f64) {
    let one_plus_r = 1.0 + rate;
    let mut npv_val = 0.0;
    let mut dnpv = 0.0;
    let mut discount = 1.0;

    for (t, cf) in cash_flows.iter().enumerate() {
        npv_val += cf * discount;
        if t > 0 {
            dnpv -= t as f64 * cf * discount / one_plus_r;
        }
        discount /= one_plus_r;
    }

    (npv_val, dnpv)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npv_basic() {
        let cfs = [-1000.0, 300.0, 400.0, 500.0];
        let result = npv(0.10, &cfs);
        assert!((result - -21.036814425244245).abs() < 1e-6, "npv={}", result);
    }

    #[test]
    fn test_npv_zero_rate_is_plain_sum() {
        let cfs = [-100.0, 50.0, 50.0, 50.0];
        assert_eq!(npv(0.0, &cfs), 50.0);
    }

    #[test]
    fn test_npv_at_negative_one_rate_goes_infinite() {
        assert!(npv(-1.0, &[100.0, 100.0]).is_infinite());
    }

    #[test]
    fn test_irr_basic() {
        let cfs = [-1000.0, 400.0, 400.0, 400.0];
        let rate = irr(&cfs, DEFAULT_INITIAL_GUESS);
        assert!((rate - 0.09701025740327304).abs() < 1e-6, "irr={}", rate);
    }

    #[test]
    fn test_irr_round_trip_zeroes_npv() {
        let cfs = [-1000.0, 300.0, 300.0, 300.0, 300.0];
        let rate = irr(&cfs, DEFAULT_INITIAL_GUESS);
        assert!((rate - 0.07713847295208369).abs() < 1e-6, "irr={}", rate);
        assert!(npv(rate, &cfs).abs() < 1e-6, "residual npv={}", npv(rate, &cfs));
    }

    #[test]
    fn test_irr_deterministic_across_calls() {
        let cfs = [-1000.0, 0.0, 0.0, 0.0, 2000.0];
        let first = irr(&cfs, DEFAULT_INITIAL_GUESS);
        let second = irr(&cfs, DEFAULT_INITIAL_GUESS);
        assert_eq!(first, second);
    }

    #[test]
    fn test_irr_converges_quickly_on_clean_series() {
        let cfs = [-1000.0, 300.0, 300.0, 300.0, 300.0];
        let outcome = IrrSolver::default().run(&cfs, DEFAULT_INITIAL_GUESS);
        assert!(outcome.converged);
        assert!(outcome.iterations <= 10, "iterations={}", outcome.iterations);
    }

    #[test]
    fn test_irr_single_flow_has_zero_derivative() {
        // A single cash flow has f'(x) = 0 everywhere; the first step divides
        // by zero and the estimate never recovers.
        let rate = irr(&[100.0], DEFAULT_INITIAL_GUESS);
        assert!(!rate.is_finite(), "rate={}", rate);
    }

    #[test]
    fn test_irr_empty_series_is_nan() {
        assert!(irr(&[], DEFAULT_INITIAL_GUESS).is_nan());
    }

    #[test]
    fn test_zero_iteration_budget_returns_guess() {
        let solver = IrrSolver {
            max_iterations: 0,
            ..IrrSolver::default()
        };
        let outcome = solver.run(&[-1000.0, 500.0, 600.0], 0.25);
        assert_eq!(outcome.rate, 0.25);
        assert_eq!(outcome.iterations, 0);
        assert!(!outcome.converged);
    }

    #[test]
    fn test_loose_tolerance_converges_no_slower() {
        let cfs = [-1000.0, 300.0, 300.0, 300.0, 300.0];
        let tight = IrrSolver::default().run(&cfs, DEFAULT_INITIAL_GUESS);
        let loose = IrrSolver {
            tolerance: 1e-2,
            ..IrrSolver::default()
        };
        let loose_outcome = loose.run(&cfs, DEFAULT_INITIAL_GUESS);
        assert!(loose_outcome.converged);
        assert!(loose_outcome.iterations <= tight.iterations);
        assert!((loose_outcome.rate - tight.rate).abs() < 1e-2);
    }

    #[test]
    fn test_solve_uses_configured_guess() {
        let cfs = [-1000.0, 400.0, 400.0, 400.0];
        let solver = IrrSolver {
            initial_guess: 0.05,
            ..IrrSolver::default()
        };
        assert_eq!(solver.solve(&cfs), solver.solve_from(&cfs, 0.05));
    }
}
