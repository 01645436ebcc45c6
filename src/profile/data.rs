//! Financial profile data structures matching the advisory intake format

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Desired standard of living in retirement
///
/// Scales pre-retirement expenses to the fraction assumed to continue after
/// retirement (see `assumptions::LifestyleFactors`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifestyle {
    Frugal,
    Moderate,
    Comfortable,
    Lavish,
}

impl Lifestyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifestyle::Frugal => "frugal",
            Lifestyle::Moderate => "moderate",
            Lifestyle::Comfortable => "comfortable",
            Lifestyle::Lavish => "lavish",
        }
    }
}

/// Self-declared investment style, used for the estimated-growth metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestorType {
    Conservative,
    Balanced,
    Growth,
}

impl InvestorType {
    /// Expected annual portfolio growth for this style, as a percentage
    pub fn estimated_growth_pct(&self) -> Decimal {
        match self {
            InvestorType::Conservative => Decimal::from(4),
            InvestorType::Balanced => Decimal::from(6),
            InvestorType::Growth => Decimal::from(8),
        }
    }
}

/// A single position held in the user's investment account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentHolding {
    /// Display name of the holding, used for diversity counting
    pub holding_name: String,

    /// Units held
    pub number_of_units: Decimal,

    /// Average acquisition cost per unit
    pub average_cost_per_unit: Decimal,
}

impl InvestmentHolding {
    pub fn new(holding_name: impl Into<String>, units: Decimal, cost_per_unit: Decimal) -> Self {
        Self {
            holding_name: holding_name.into(),
            number_of_units: units,
            average_cost_per_unit: cost_per_unit,
        }
    }

    /// Book value of the position
    pub fn book_value(&self) -> Decimal {
        self.number_of_units * self.average_cost_per_unit
    }
}

/// A user's financial profile at a point in time
///
/// Immutable per calculation; every engine entry point takes it by reference
/// and derives its own working state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    /// Current age in whole years
    pub age: u8,

    /// Gross monthly income
    pub monthly_income: Decimal,

    /// Total monthly expenses
    pub monthly_expenses: Decimal,

    /// Liquid cash (chequing, savings, GICs counted as cash)
    pub cash_holdings: Decimal,

    /// Non-registered investment balance
    pub investment_holdings: Decimal,

    /// Outstanding debt across all liabilities
    pub current_debt: Decimal,

    /// RRSP balance
    pub rrsp_savings: Decimal,

    /// TFSA balance
    pub tfsa_savings: Decimal,

    /// Pensions and any other retirement accounts
    pub other_retirement_accounts: Decimal,

    /// Desired standard of living after retirement
    pub desired_retirement_lifestyle: Lifestyle,

    /// Self-declared investment style
    #[serde(default)]
    pub investor_type: Option<InvestorType>,
}

impl FinancialProfile {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        age: u8,
        monthly_income: Decimal,
        monthly_expenses: Decimal,
        cash_holdings: Decimal,
        investment_holdings: Decimal,
        current_debt: Decimal,
        rrsp_savings: Decimal,
        tfsa_savings: Decimal,
        other_retirement_accounts: Decimal,
        desired_retirement_lifestyle: Lifestyle,
    ) -> Self {
        Self {
            age,
            monthly_income,
            monthly_expenses,
            cash_holdings,
            investment_holdings,
            current_debt,
            rrsp_savings,
            tfsa_savings,
            other_retirement_accounts,
            desired_retirement_lifestyle,
            investor_type: None,
        }
    }

    /// Monthly income left over after expenses, floored at zero
    pub fn monthly_surplus(&self) -> Decimal {
        (self.monthly_income - self.monthly_expenses).max(Decimal::ZERO)
    }

    /// Balances that participate in market growth: registered accounts plus
    /// the non-registered investment balance. Cash is excluded; it only
    /// tracks inflation.
    pub fn investable_assets(&self) -> Decimal {
        self.rrsp_savings
            + self.tfsa_savings
            + self.other_retirement_accounts
            + self.investment_holdings
    }

    /// Sum of the registered retirement buckets
    pub fn total_retirement_savings(&self) -> Decimal {
        self.rrsp_savings + self.tfsa_savings + self.other_retirement_accounts
    }

    /// Everything the user owns
    pub fn total_assets(&self) -> Decimal {
        self.cash_holdings + self.investable_assets()
    }

    /// Assets minus debt; the only derivation allowed to go negative
    pub fn net_worth(&self) -> Decimal {
        self.total_assets() - self.current_debt
    }

    /// Annualized gross income
    pub fn annual_income(&self) -> Decimal {
        self.monthly_income * Decimal::from(12)
    }

    /// Check the non-negativity invariants on all balance fields
    pub fn validate(&self) -> Result<(), EngineError> {
        let fields = [
            ("monthly_income", self.monthly_income),
            ("monthly_expenses", self.monthly_expenses),
            ("cash_holdings", self.cash_holdings),
            ("investment_holdings", self.investment_holdings),
            ("current_debt", self.current_debt),
            ("rrsp_savings", self.rrsp_savings),
            ("tfsa_savings", self.tfsa_savings),
            ("other_retirement_accounts", self.other_retirement_accounts),
        ];
        for (name, value) in fields {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(EngineError::InvalidProfile(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_profile() -> FinancialProfile {
        FinancialProfile::new(
            30,
            dec("6000"),
            dec("4000"),
            dec("10000"),
            dec("20000"),
            dec("5000"),
            dec("5000"),
            dec("5000"),
            dec("0"),
            Lifestyle::Moderate,
        )
    }

    #[test]
    fn test_derived_balances() {
        let profile = sample_profile();
        assert_eq!(profile.monthly_surplus(), dec("2000"));
        assert_eq!(profile.investable_assets(), dec("30000"));
        assert_eq!(profile.total_retirement_savings(), dec("10000"));
        assert_eq!(profile.total_assets(), dec("40000"));
        assert_eq!(profile.net_worth(), dec("35000"));
    }

    #[test]
    fn test_surplus_floors_at_zero() {
        let mut profile = sample_profile();
        profile.monthly_expenses = dec("9000");
        assert_eq!(profile.monthly_surplus(), Decimal::ZERO);
    }

    #[test]
    fn test_validate_rejects_negative_balance() {
        let mut profile = sample_profile();
        profile.current_debt = dec("-100");
        assert!(matches!(
            profile.validate(),
            Err(EngineError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_book_value() {
        let holding = InvestmentHolding::new("XEQT", dec("100"), dec("31.50"));
        assert_eq!(holding.book_value(), dec("3150.00"));
    }

    #[test]
    fn test_investor_growth_estimates() {
        assert_eq!(InvestorType::Conservative.estimated_growth_pct(), dec("4"));
        assert_eq!(InvestorType::Balanced.estimated_growth_pct(), dec("6"));
        assert_eq!(InvestorType::Growth.estimated_growth_pct(), dec("8"));
    }
}
