use crate::types::{Money, Percent};

/// Fixed periodic payment for a fully amortizing loan.
///
/// `annual_rate_pct` is the nominal annual rate in whole-number percent
/// (6.25 = 6.25%), converted internally to a monthly decimal rate. Returns
/// `0.0` for non-positive principal, rate, or period count: no-loan and
/// negative-amortization inputs mean "no payment", not an error. Otherwise
/// applies the standard annuity formula `p * r / (1 - (1 + r)^-n)`.
///
/// The period count is a real number, so fractional terms are accepted. No
/// rounding is applied; display formatting is the caller's concern.
pub fn monthly_payment(principal: Money, annual_rate_pct: Percent, periods: f64) -> Money {
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    if principal <= 0.0 || monthly_rate <= 0.0 || periods <= 0.0 {
        return 0.0;
    }
    principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-periods))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_reference_case() {
        // 30-year fixed at 6% APR on $300k.
        let p = monthly_payment(300_000.0, 6.0, 360.0);
        assert!((p - 1798.6515754582708).abs() < 1e-6, "payment={}", p);
    }

    #[test]
    fn test_payment_fifteen_year() {
        let p = monthly_payment(200_000.0, 4.5, 180.0);
        assert!((p - 1529.9865776269264).abs() < 1e-6, "payment={}", p);
    }

    #[test]
    fn test_payment_sanity_band() {
        // $750k at 6.5% over 30 years lands in the $4,700s.
        let p = monthly_payment(750_000.0, 6.5, 360.0);
        assert!(p > 4700.0 && p < 4800.0, "payment={}", p);
    }

    #[test]
    fn test_degenerate_inputs_yield_zero() {
        assert_eq!(monthly_payment(0.0, 6.0, 360.0), 0.0);
        assert_eq!(monthly_payment(-100_000.0, 6.0, 360.0), 0.0);
        assert_eq!(monthly_payment(300_000.0, 0.0, 360.0), 0.0);
        assert_eq!(monthly_payment(300_000.0, -1.5, 360.0), 0.0);
        assert_eq!(monthly_payment(300_000.0, 6.0, 0.0), 0.0);
        assert_eq!(monthly_payment(300_000.0, 6.0, -12.0), 0.0);
    }

    #[test]
    fn test_payment_increases_with_rate() {
        let low = monthly_payment(300_000.0, 5.0, 360.0);
        let mid = monthly_payment(300_000.0, 6.0, 360.0);
        let high = monthly_payment(300_000.0, 7.0, 360.0);
        assert!(low < mid && mid < high, "low={} mid={} high={}", low, mid, high);
    }

    #[test]
    fn test_payment_decreases_with_term() {
        let short = monthly_payment(300_000.0, 6.0, 180.0);
        let long = monthly_payment(300_000.0, 6.0, 360.0);
        assert!(short > long, "short={} long={}", short, long);
    }

    #[test]
    fn test_payment_linear_in_principal() {
        let single = monthly_payment(250_000.0, 6.0, 360.0);
        let double = monthly_payment(500_000.0, 6.0, 360.0);
        assert!((double - 2.0 * single).abs() < 1e-9, "single={} double={}", single, double);
    }

    #[test]
    fn test_fractional_term_between_neighbors() {
        let p359 = monthly_payment(300_000.0, 6.0, 359.0);
        let p359_5 = monthly_payment(300_000.0, 6.0, 359.5);
        let p360 = monthly_payment(300_000.0, 6.0, 360.0);
        assert!(p360 < p359_5 && p359_5 < p359);
    }
}
