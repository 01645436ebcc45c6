//! Market and timeline assumptions for projections

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Economic and timeline constants shared by every projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAssumptions {
    /// Annual inflation rate as a fraction (0.03 = 3%)
    pub inflation_rate: Decimal,

    /// Expected gross annual investment return
    pub expected_return: Decimal,

    /// Fraction of retirement assets drawn per year once retired
    pub withdrawal_rate: Decimal,

    /// Annual management fee charged against invested assets
    pub annual_fee_rate: Decimal,

    /// Terminal age used to size the retirement horizon
    pub life_expectancy: u8,

    /// Ceiling of the feasibility search
    pub max_retirement_age: u8,
}

impl MarketAssumptions {
    /// Investment return net of the management fee
    pub fn net_return(&self) -> Decimal {
        self.expected_return - self.annual_fee_rate
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.withdrawal_rate <= Decimal::ZERO {
            return Err(EngineError::InvalidAssumptions(format!(
                "withdrawal_rate must be positive, got {}",
                self.withdrawal_rate
            )));
        }
        if self.annual_fee_rate < Decimal::ZERO {
            return Err(EngineError::InvalidAssumptions(format!(
                "annual_fee_rate must be non-negative, got {}",
                self.annual_fee_rate
            )));
        }
        if self.max_retirement_age == 0 {
            return Err(EngineError::InvalidAssumptions(
                "max_retirement_age must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MarketAssumptions {
    fn default() -> Self {
        Self {
            inflation_rate: Decimal::new(3, 2),    // 3%
            expected_return: Decimal::new(7, 2),   // 7%
            withdrawal_rate: Decimal::new(4, 2),   // 4%
            annual_fee_rate: Decimal::ZERO,
            life_expectancy: 90,
            max_retirement_age: 90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        MarketAssumptions::default().validate().unwrap();
    }

    #[test]
    fn test_net_return_subtracts_fee() {
        let market = MarketAssumptions {
            annual_fee_rate: Decimal::new(5, 3), // 0.5%
            ..Default::default()
        };
        assert_eq!(market.net_return(), Decimal::new(65, 3));
    }

    #[test]
    fn test_zero_withdrawal_rate_rejected() {
        let market = MarketAssumptions {
            withdrawal_rate: Decimal::ZERO,
            ..Default::default()
        };
        assert!(market.validate().is_err());
    }
}
