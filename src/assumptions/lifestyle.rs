//! Retirement lifestyle expense-retention factors

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::profile::Lifestyle;

/// Fraction of pre-retirement expenses assumed to continue in retirement,
/// keyed by the desired lifestyle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleFactors {
    pub frugal: Decimal,
    pub moderate: Decimal,
    pub comfortable: Decimal,
    pub lavish: Decimal,
}

impl LifestyleFactors {
    pub fn factor(&self, lifestyle: Lifestyle) -> Decimal {
        match lifestyle {
            Lifestyle::Frugal => self.frugal,
            Lifestyle::Moderate => self.moderate,
            Lifestyle::Comfortable => self.comfortable,
            Lifestyle::Lavish => self.lavish,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, factor) in [
            ("frugal", self.frugal),
            ("moderate", self.moderate),
            ("comfortable", self.comfortable),
            ("lavish", self.lavish),
        ] {
            if factor <= Decimal::ZERO {
                return Err(EngineError::InvalidAssumptions(format!(
                    "lifestyle factor {} must be positive, got {}",
                    name, factor
                )));
            }
        }
        Ok(())
    }
}

impl Default for LifestyleFactors {
    fn default() -> Self {
        Self {
            frugal: Decimal::new(6, 1),
            moderate: Decimal::new(7, 1),
            comfortable: Decimal::new(8, 1),
            lavish: Decimal::new(9, 1),
        }
    }
}
