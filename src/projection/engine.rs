//! Core engine for the retirement feasibility search

use log::debug;
use rust_decimal::Decimal;

use crate::assumptions::Assumptions;
use crate::error::EngineError;
use crate::money::round_money;
use crate::profile::FinancialProfile;

use super::plan::RetirementPlanResult;
use super::state::ProjectionState;

/// Configuration for a plan run
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// Whether to record the year-by-year accumulation trajectory
    pub detailed_output: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            detailed_output: true,
        }
    }
}

/// Feasibility search engine
///
/// Scans candidate retirement ages from the current age up to the configured
/// ceiling and reports the earliest age at which projected assets cover the
/// savings required for the target lifestyle. Later ages are assumed to stay
/// feasible once the threshold is crossed; the search never looks further.
pub struct PlanEngine {
    assumptions: Assumptions,
    config: PlanConfig,
}

impl PlanEngine {
    /// Create a new engine, validating the assumption set once up front
    pub fn new(assumptions: Assumptions, config: PlanConfig) -> Result<Self, EngineError> {
        assumptions.validate()?;
        Ok(Self {
            assumptions,
            config,
        })
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Run the feasibility search for a single profile
    ///
    /// Total for any validated profile: exhausting the age ceiling is a
    /// normal outcome reported through a positive `savings_gap`, not an
    /// error.
    pub fn project_plan(&self, profile: &FinancialProfile) -> RetirementPlanResult {
        let market = &self.assumptions.market;
        let twelve = Decimal::from(12);

        // Net monthly savings capacity reflects take-home pay
        let monthly_contribution = self
            .assumptions
            .tax
            .after_tax_monthly_income(profile.monthly_surplus());
        let annual_contribution = monthly_contribution * twelve;
        let lifestyle_factor = self
            .assumptions
            .lifestyle
            .factor(profile.desired_retirement_lifestyle);

        let mut state = ProjectionState::from_profile(profile, &self.assumptions);
        let mut rows = Vec::new();

        let (feasible, projected_savings, required_savings) = loop {
            let projected = state.total_assets();
            let required = state.required_savings(lifestyle_factor, market.withdrawal_rate);

            debug!(
                "candidate age {}: projected {} vs required {}",
                state.age, projected, required
            );

            if projected >= required {
                break (true, projected, required);
            }
            // Ceiling reached without a feasible year: clamp and report the
            // shortfall at the ceiling
            if state.age >= market.max_retirement_age {
                break (false, projected, required);
            }

            let row = state.advance_year(&self.assumptions, annual_contribution);
            if self.config.detailed_output {
                rows.push(row.rounded());
            }
        };

        if !feasible {
            debug!(
                "no feasible age up to {}; reporting ceiling shortfall",
                market.max_retirement_age
            );
        }

        let retirement_age = state.age;
        let years_until_retirement = state.year_index;
        let years_in_retirement =
            u32::from(market.life_expectancy.saturating_sub(retirement_age));

        // Income split at retirement
        let annual_savings_income = projected_savings * market.withdrawal_rate;
        let annual_government_income = state.annual_benefits;
        let monthly_savings_income = annual_savings_income / twelve;
        let monthly_government_income = annual_government_income / twelve;

        RetirementPlanResult {
            retirement_age,
            current_age: profile.age,
            years_until_retirement,
            years_in_retirement,
            monthly_income: round_money(profile.monthly_income),
            monthly_expenses: round_money(profile.monthly_expenses),
            current_savings: round_money(profile.total_assets()),
            monthly_contribution: round_money(monthly_contribution),
            projected_savings: round_money(projected_savings),
            required_savings: round_money(required_savings),
            savings_gap: round_money((required_savings - projected_savings).max(Decimal::ZERO)),
            retirement_income: round_money(monthly_savings_income + monthly_government_income),
            retirement_expenses: round_money(state.annual_expenses / twelve),
            government_benefits: round_money(monthly_government_income),
            savings_income: round_money(monthly_savings_income),
            yearly_projections: rows,
        }
    }

    /// Run plans for multiple profiles with the same configuration
    pub fn project_batch(&self, profiles: &[FinancialProfile]) -> Vec<RetirementPlanResult> {
        profiles.iter().map(|p| self.project_plan(p)).collect()
    }
}
