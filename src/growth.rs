//! Compound growth primitives shared by every projection path
//!
//! Both functions are the same year-by-year recurrence. The plan engine, the
//! what-if solver, and the risk scenarios all go through here, so the two
//! sides of the API can never disagree on rounding or compounding order.

use rust_decimal::Decimal;

/// Future value of an amount after `years` of compound growth
///
/// `rate` is an annual fraction (0.03 for 3%). `years == 0` returns the
/// principal unchanged.
pub fn future_value(principal: Decimal, rate: Decimal, years: u32) -> Decimal {
    let growth = Decimal::ONE + rate;
    let mut value = principal;
    for _ in 0..years {
        value *= growth;
    }
    value
}

/// Future value of savings with an annual contribution added after growth
///
/// Recurrence: `v ← v * (1 + rate) + annual_contribution`, iterated `years`
/// times. Deliberately not the closed-form annuity formula; the iteration is
/// the reference behavior every caller must match.
pub fn future_savings(
    principal: Decimal,
    annual_contribution: Decimal,
    rate: Decimal,
    years: u32,
) -> Decimal {
    let growth = Decimal::ONE + rate;
    let mut value = principal;
    for _ in 0..years {
        value = value * growth + annual_contribution;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_zero_years_is_identity() {
        let principal = dec("12345.67");
        assert_eq!(future_value(principal, dec("0.07"), 0), principal);
        assert_eq!(future_savings(principal, dec("1000"), dec("0.07"), 0), principal);
    }

    #[test]
    fn test_future_value_compounds() {
        // 1000 * 1.05^3 = 1157.625
        assert_eq!(future_value(dec("1000"), dec("0.05"), 3), dec("1157.625"));
    }

    #[test]
    fn test_future_value_zero_rate() {
        assert_eq!(future_value(dec("500"), Decimal::ZERO, 40), dec("500"));
    }

    #[test]
    fn test_future_savings_recurrence() {
        // Year 1: 1000*1.1 + 100 = 1200
        // Year 2: 1200*1.1 + 100 = 1420
        assert_eq!(future_savings(dec("1000"), dec("100"), dec("0.1"), 2), dec("1420"));
    }

    #[test]
    fn test_future_savings_zero_rate_is_straight_line() {
        assert_eq!(
            future_savings(dec("1000"), dec("100"), Decimal::ZERO, 10),
            dec("2000")
        );
    }

    #[test]
    fn test_future_savings_with_zero_contribution_matches_future_value() {
        let principal = dec("25000");
        let rate = dec("0.07");
        assert_eq!(
            future_savings(principal, Decimal::ZERO, rate, 25),
            future_value(principal, rate, 25)
        );
    }
}
