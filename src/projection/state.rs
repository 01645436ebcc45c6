//! Projection state tracking for a single profile

use rust_decimal::Decimal;

use crate::assumptions::Assumptions;
use crate::profile::FinancialProfile;

use super::plan::YearlyProjection;

/// State of a projection at the start of a simulated year
///
/// `advance_year` applies exactly the recurrences in `growth`: cash tracks
/// inflation, invested assets grow at the net return and then receive the
/// annual contribution, benefit entitlements and expenses index with
/// inflation. Advancing one year at a time therefore lands on the same
/// values as `future_value`/`future_savings` evaluated at that horizon.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Years elapsed since the start of the projection
    pub year_index: u32,

    /// Attained age at this year
    pub age: u8,

    /// Liquid cash, assumed to merely track inflation
    pub cash: Decimal,

    /// Invested assets (registered accounts + non-registered holdings)
    pub investments: Decimal,

    /// Combined annual CPP+OAS entitlement, indexed to this year
    pub annual_benefits: Decimal,

    /// Annual expenses, indexed to this year
    pub annual_expenses: Decimal,
}

impl ProjectionState {
    /// Initialize state from a profile at projection start
    pub fn from_profile(profile: &FinancialProfile, assumptions: &Assumptions) -> Self {
        Self {
            year_index: 0,
            age: profile.age,
            cash: profile.cash_holdings,
            investments: profile.investable_assets(),
            annual_benefits: assumptions.benefits.total_annual(),
            annual_expenses: profile.monthly_expenses * Decimal::from(12),
        }
    }

    /// Total projected assets at this year
    pub fn total_assets(&self) -> Decimal {
        self.cash + self.investments
    }

    /// Savings needed at this year to fund the lifestyle-scaled expenses at
    /// the configured withdrawal rate
    pub fn required_savings(&self, lifestyle_factor: Decimal, withdrawal_rate: Decimal) -> Decimal {
        self.annual_expenses * lifestyle_factor / withdrawal_rate
    }

    /// Advance the state one year, returning the row describing that year
    pub fn advance_year(
        &mut self,
        assumptions: &Assumptions,
        annual_contribution: Decimal,
    ) -> YearlyProjection {
        let market = &assumptions.market;
        let inflation_factor = Decimal::ONE + market.inflation_rate;

        let growth_amount =
            self.investments * market.expected_return + self.cash * market.inflation_rate;
        let fee_amount = self.investments * market.annual_fee_rate;

        self.investments =
            self.investments * (Decimal::ONE + market.net_return()) + annual_contribution;
        self.cash *= inflation_factor;
        self.annual_benefits *= inflation_factor;
        self.annual_expenses *= inflation_factor;
        self.year_index += 1;
        self.age = self.age.saturating_add(1);

        YearlyProjection {
            year_index: self.year_index,
            age: self.age,
            asset_value: self.total_assets(),
            growth_amount,
            contribution_amount: annual_contribution,
            fee_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::{future_savings, future_value};
    use crate::profile::Lifestyle;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn profile() -> FinancialProfile {
        FinancialProfile::new(
            30,
            dec("6000"),
            dec("4000"),
            dec("10000"),
            dec("20000"),
            dec("0"),
            dec("5000"),
            dec("5000"),
            dec("0"),
            Lifestyle::Moderate,
        )
    }

    #[test]
    fn test_initial_state() {
        let assumptions = Assumptions::default_canadian();
        let state = ProjectionState::from_profile(&profile(), &assumptions);
        assert_eq!(state.year_index, 0);
        assert_eq!(state.age, 30);
        assert_eq!(state.total_assets(), dec("40000"));
        assert_eq!(state.annual_expenses, dec("48000"));
    }

    #[test]
    fn test_advance_matches_growth_primitives() {
        let assumptions = Assumptions::default_canadian();
        let market = &assumptions.market;
        let contribution = dec("20400");

        let mut state = ProjectionState::from_profile(&profile(), &assumptions);
        for _ in 0..25 {
            state.advance_year(&assumptions, contribution);
        }

        assert_eq!(state.cash, future_value(dec("10000"), market.inflation_rate, 25));
        assert_eq!(
            state.investments,
            future_savings(dec("30000"), contribution, market.net_return(), 25)
        );
        assert_eq!(
            state.annual_benefits,
            future_value(assumptions.benefits.total_annual(), market.inflation_rate, 25)
        );
    }

    #[test]
    fn test_advance_reports_year_amounts() {
        let assumptions = Assumptions::default_canadian();
        let mut state = ProjectionState::from_profile(&profile(), &assumptions);
        let row = state.advance_year(&assumptions, dec("12000"));

        assert_eq!(row.year_index, 1);
        assert_eq!(row.age, 31);
        // 20000+5000+5000 invested at 7% plus 10000 cash at 3%
        assert_eq!(row.growth_amount, dec("2100") + dec("300"));
        assert_eq!(row.contribution_amount, dec("12000"));
        assert_eq!(row.fee_amount, Decimal::ZERO);
        assert_eq!(row.asset_value, state.total_assets());
    }
}
