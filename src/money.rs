//! Fixed-point currency helpers
//!
//! Every monetary quantity in the engine is a `rust_decimal::Decimal`.
//! Intermediate math runs at full precision; rounding to whole cents happens
//! only at output boundaries, so sixty years of compounding never accumulate
//! binary float drift.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Scale used when rounding monetary output (whole cents)
pub const MONEY_SCALE: u32 = 2;

/// Scale used when rounding reported ratios and percentages
pub const RATIO_SCALE: u32 = 1;

/// Round a monetary amount to whole cents
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(MONEY_SCALE)
}

/// Convert a monetary amount to an `f64` rounded to cents, for API boundaries
pub fn to_dollars_f64(amount: Decimal) -> f64 {
    round_money(amount).to_f64().unwrap_or(0.0)
}

/// Divide with a guard: a zero denominator yields `None`, never a panic
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Integer power by repeated multiplication
///
/// Bounded loop (projection horizons are at most ~100 years), and avoids the
/// float `powf` path so results stay exactly reproducible.
pub fn pow(base: Decimal, exp: u32) -> Decimal {
    let mut result = Decimal::ONE;
    for _ in 0..exp {
        result *= base;
    }
    result
}

/// Format the quantity as dollars with thousands separators
pub fn format_dollars(quantity: &Decimal) -> String {
    let formatted = match quantity.round().to_i64() {
        Some(dollars) if dollars >= 0 => dollars
            .to_string()
            .as_bytes()
            .rchunks(3)
            .rev()
            .map(std::str::from_utf8)
            .collect::<Result<Vec<&str>, _>>()
            .unwrap()
            .join(","),
        _ => format!("{:.0}", quantity),
    };
    format!("${:}", formatted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_round_money() {
        assert_eq!(
            round_money(Decimal::from_str("1700.005").unwrap()),
            Decimal::new(170000, 2)
        );
        assert_eq!(round_money(Decimal::from(25)), Decimal::from(25));
    }

    #[test]
    fn test_ratio_guards_zero_denominator() {
        assert_eq!(ratio(Decimal::from(10), Decimal::ZERO), None);
        assert_eq!(
            ratio(Decimal::from(10), Decimal::from(4)),
            Some(Decimal::new(25, 1))
        );
    }

    #[test]
    fn test_pow() {
        assert_eq!(pow(Decimal::from(2), 0), Decimal::ONE);
        assert_eq!(pow(Decimal::from(2), 10), Decimal::from(1024));

        // (1.05)^2 = 1.1025 exactly in fixed point
        let rate = Decimal::new(105, 2);
        assert_eq!(pow(rate, 2), Decimal::new(110250, 5));
    }

    #[test]
    fn test_format_less_than_one_thousand() {
        assert_eq!(format_dollars(&Decimal::from(150)), "$150");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_dollars(&Decimal::from(25123)), "$25,123");
    }

    #[test]
    fn test_format_millions() {
        assert_eq!(format_dollars(&Decimal::from(9_123_955)), "$9,123,955");
    }

    #[test]
    fn test_format_rounds() {
        assert_eq!(format_dollars(&Decimal::new(123_95593, 2)), "$123,956");
    }

    #[test]
    fn test_to_dollars_f64_rounds_to_cents() {
        let d = Decimal::from_str("1263.9583333333").unwrap();
        approx::assert_relative_eq!(to_dollars_f64(d), 1263.96, epsilon = 1e-9);
        approx::assert_relative_eq!(to_dollars_f64(Decimal::ZERO), 0.0);
    }
}
