//! Progressive income tax schedule

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One marginal bracket: income in `[lower, upper)` is taxed at `rate`
///
/// `upper == None` marks the open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(lower: Decimal, upper: Option<Decimal>, rate: Decimal) -> Self {
        Self { lower, upper, rate }
    }
}

/// Ordered, contiguous, exhaustive set of marginal brackets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    pub fn new(brackets: Vec<TaxBracket>) -> Self {
        Self { brackets }
    }

    /// 2024 Canadian federal brackets
    pub fn federal_2024() -> Self {
        let pct = |n: i64| Decimal::new(n, 3); // 150 -> 0.150
        Self::new(vec![
            TaxBracket::new(Decimal::ZERO, Some(Decimal::from(55_867)), pct(150)),
            TaxBracket::new(
                Decimal::from(55_867),
                Some(Decimal::from(111_733)),
                pct(205),
            ),
            TaxBracket::new(
                Decimal::from(111_733),
                Some(Decimal::from(173_205)),
                pct(260),
            ),
            TaxBracket::new(
                Decimal::from(173_205),
                Some(Decimal::from(246_752)),
                pct(290),
            ),
            TaxBracket::new(Decimal::from(246_752), None, pct(330)),
        ])
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Total tax payable on an annual income
    pub fn annual_tax(&self, annual_income: Decimal) -> Decimal {
        let mut tax = Decimal::ZERO;
        for bracket in &self.brackets {
            if annual_income <= bracket.lower {
                break;
            }
            let slice = match bracket.upper {
                Some(upper) => (annual_income - bracket.lower).min(upper - bracket.lower),
                None => annual_income - bracket.lower,
            };
            tax += slice * bracket.rate;
        }
        tax
    }

    /// Net monthly income after federal tax
    ///
    /// Annualizes the monthly figure, applies the brackets, and divides the
    /// after-tax annual amount back to a monthly figure. Pure and total for
    /// any non-negative input.
    pub fn after_tax_monthly_income(&self, monthly_income: Decimal) -> Decimal {
        let annual_income = monthly_income * Decimal::from(12);
        let after_tax_annual = annual_income - self.annual_tax(annual_income);
        after_tax_annual / Decimal::from(12)
    }

    /// Brackets must start at zero, be contiguous and ascending, and end with
    /// an open-ended top bracket
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.brackets.is_empty() {
            return Err(EngineError::InvalidAssumptions(
                "tax schedule has no brackets".into(),
            ));
        }
        if !self.brackets[0].lower.is_zero() {
            return Err(EngineError::InvalidAssumptions(format!(
                "first tax bracket must start at 0, starts at {}",
                self.brackets[0].lower
            )));
        }
        for pair in self.brackets.windows(2) {
            match pair[0].upper {
                Some(upper) if upper == pair[1].lower => {}
                Some(upper) => {
                    return Err(EngineError::InvalidAssumptions(format!(
                        "tax brackets not contiguous: {} then {}",
                        upper, pair[1].lower
                    )))
                }
                None => {
                    return Err(EngineError::InvalidAssumptions(
                        "open-ended tax bracket must be last".into(),
                    ))
                }
            }
        }
        let last = self.brackets.last().unwrap();
        if last.upper.is_some() {
            return Err(EngineError::InvalidAssumptions(
                "top tax bracket must be open-ended".into(),
            ));
        }
        for bracket in &self.brackets {
            if bracket.rate < Decimal::ZERO || bracket.rate >= Decimal::ONE {
                return Err(EngineError::InvalidAssumptions(format!(
                    "tax rate {} outside [0, 1)",
                    bracket.rate
                )));
            }
        }
        Ok(())
    }
}

impl Default for TaxSchedule {
    fn default() -> Self {
        Self::federal_2024()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_schedule_validates() {
        TaxSchedule::federal_2024().validate().unwrap();
    }

    #[test]
    fn test_zero_income() {
        let schedule = TaxSchedule::federal_2024();
        assert_eq!(schedule.after_tax_monthly_income(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_income_in_first_bracket() {
        let schedule = TaxSchedule::federal_2024();
        // 2000/month = 24000/year, all at 15% -> 20400/year net
        assert_eq!(schedule.after_tax_monthly_income(dec("2000")), dec("1700"));
    }

    #[test]
    fn test_bracket_boundary() {
        let schedule = TaxSchedule::federal_2024();
        // Exactly at the first bracket's upper edge nothing is taxed at 20.5%
        let tax = schedule.annual_tax(dec("55867"));
        assert_eq!(tax, dec("55867") * dec("0.15"));
    }

    #[test]
    fn test_income_spanning_brackets() {
        let schedule = TaxSchedule::federal_2024();
        // 100000/year: 55867 @ 15% + 44133 @ 20.5%
        let expected = dec("55867") * dec("0.15") + dec("44133") * dec("0.205");
        assert_eq!(schedule.annual_tax(dec("100000")), expected);
    }

    #[test]
    fn test_top_bracket_is_open_ended() {
        let schedule = TaxSchedule::federal_2024();
        let tax_1m = schedule.annual_tax(dec("1000000"));
        let tax_2m = schedule.annual_tax(dec("2000000"));
        // Every extra dollar above the top threshold is taxed at 33%
        assert_eq!(tax_2m - tax_1m, dec("1000000") * dec("0.33"));
    }

    #[test]
    fn test_after_tax_is_monotone() {
        let schedule = TaxSchedule::federal_2024();
        let mut previous = Decimal::ZERO;
        for monthly in [0, 1000, 4656, 4657, 9311, 15000, 25000, 100000] {
            let net = schedule.after_tax_monthly_income(Decimal::from(monthly));
            assert!(net >= previous, "net income decreased at {}", monthly);
            previous = net;
        }
    }

    #[test]
    fn test_validation_rejects_gap() {
        let schedule = TaxSchedule::new(vec![
            TaxBracket::new(Decimal::ZERO, Some(Decimal::from(50_000)), dec("0.15")),
            TaxBracket::new(Decimal::from(60_000), None, dec("0.30")),
        ]);
        assert!(matches!(
            schedule.validate(),
            Err(EngineError::InvalidAssumptions(_))
        ));
    }

    #[test]
    fn test_validation_rejects_bounded_top_bracket() {
        let schedule = TaxSchedule::new(vec![TaxBracket::new(
            Decimal::ZERO,
            Some(Decimal::from(50_000)),
            dec("0.15"),
        )]);
        assert!(schedule.validate().is_err());
    }
}
