//! Government retirement benefit streams (CPP and OAS)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::growth::future_value;

/// Annual government benefit entitlements, plus the flat monthly planning
/// estimates the what-if solver uses when asked to include benefits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernmentBenefits {
    /// Canada Pension Plan maximum annual benefit
    pub cpp_annual: Decimal,

    /// Old Age Security annual benefit
    pub oas_annual: Decimal,

    /// Rounded monthly CPP estimate for quick scenarios
    pub cpp_monthly_estimate: Decimal,

    /// Rounded monthly OAS estimate for quick scenarios
    pub oas_monthly_estimate: Decimal,
}

impl GovernmentBenefits {
    /// Combined annual entitlement in today's dollars
    pub fn total_annual(&self) -> Decimal {
        self.cpp_annual + self.oas_annual
    }

    /// Combined annual entitlement indexed for `years` of inflation
    ///
    /// Each stream is indexed separately and then summed, matching how the
    /// entitlements are actually adjusted.
    pub fn projected_annual(&self, inflation_rate: Decimal, years: u32) -> Decimal {
        future_value(self.cpp_annual, inflation_rate, years)
            + future_value(self.oas_annual, inflation_rate, years)
    }

    /// Flat monthly estimate used by the what-if solver
    pub fn flat_monthly_estimate(&self) -> Decimal {
        self.cpp_monthly_estimate + self.oas_monthly_estimate
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let fields = [
            ("cpp_annual", self.cpp_annual),
            ("oas_annual", self.oas_annual),
            ("cpp_monthly_estimate", self.cpp_monthly_estimate),
            ("oas_monthly_estimate", self.oas_monthly_estimate),
        ];
        for (name, value) in fields {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidAssumptions(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for GovernmentBenefits {
    fn default() -> Self {
        Self {
            cpp_annual: Decimal::new(15_043_00, 2), // CPP maximum
            oas_annual: Decimal::new(8_400_00, 2),
            cpp_monthly_estimate: Decimal::from(1_200),
            oas_monthly_estimate: Decimal::from(615),
        }
    }
}
