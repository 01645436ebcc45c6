//! Plan output structures for the feasibility search

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::round_money;

/// One simulated year of asset accumulation
///
/// Rows are produced in chronological order, one per simulated year
/// (`year_index` starts at 1), and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    /// Years since the start of the projection
    pub year_index: u32,

    /// Attained age at the end of this year
    pub age: u8,

    /// Total assets (cash + investments) at the end of this year
    pub asset_value: Decimal,

    /// Growth earned during this year
    pub growth_amount: Decimal,

    /// Contribution added during this year
    pub contribution_amount: Decimal,

    /// Management fee charged during this year
    pub fee_amount: Decimal,
}

impl YearlyProjection {
    /// Copy with every monetary field rounded to cents
    pub(crate) fn rounded(&self) -> Self {
        Self {
            year_index: self.year_index,
            age: self.age,
            asset_value: round_money(self.asset_value),
            growth_amount: round_money(self.growth_amount),
            contribution_amount: round_money(self.contribution_amount),
            fee_amount: round_money(self.fee_amount),
        }
    }
}

/// Complete output of the retirement feasibility search
///
/// Computed fresh per request; the engine holds no state between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementPlanResult {
    /// Earliest feasible retirement age, or the search ceiling if none
    pub retirement_age: u8,

    /// Age at the time of the calculation
    pub current_age: u8,

    pub years_until_retirement: u32,

    /// Years between retirement and life expectancy, floored at zero
    pub years_in_retirement: u32,

    /// Gross monthly income (echoed from the profile)
    pub monthly_income: Decimal,

    /// Monthly expenses (echoed from the profile)
    pub monthly_expenses: Decimal,

    /// Cash plus investable assets today
    pub current_savings: Decimal,

    /// After-tax monthly amount assumed to flow into investments
    pub monthly_contribution: Decimal,

    /// Total assets projected at the retirement age
    pub projected_savings: Decimal,

    /// Savings needed at the retirement age to fund the target lifestyle
    pub required_savings: Decimal,

    /// `max(0, required - projected)`; positive only when the search hit its
    /// age ceiling without finding a feasible year
    pub savings_gap: Decimal,

    /// Total monthly retirement income (savings drawdown + benefits)
    pub retirement_income: Decimal,

    /// Monthly expenses indexed to the retirement year
    pub retirement_expenses: Decimal,

    /// Monthly income from CPP and OAS, indexed to the retirement year
    pub government_benefits: Decimal,

    /// Monthly income from drawing down savings
    pub savings_income: Decimal,

    /// Year-by-year accumulation rows (empty unless detailed output is on)
    pub yearly_projections: Vec<YearlyProjection>,
}

impl RetirementPlanResult {
    /// Whether projected assets cover the requirement at the reported age
    pub fn is_fully_funded(&self) -> bool {
        self.savings_gap.is_zero()
    }
}
