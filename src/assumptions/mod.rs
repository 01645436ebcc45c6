//! Projection assumptions: market constants, tax schedule, government
//! benefits, and lifestyle factors

mod benefits;
mod lifestyle;
mod market;
mod tax;
pub mod loader;

pub use benefits::GovernmentBenefits;
pub use lifestyle::LifestyleFactors;
pub use loader::LoadedAssumptions;
pub use market::MarketAssumptions;
pub use tax::{TaxBracket, TaxSchedule};

use std::path::Path;

use crate::error::EngineError;

/// Container for all projection assumptions
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Assumptions {
    pub market: MarketAssumptions,
    pub tax: TaxSchedule,
    pub benefits: GovernmentBenefits,
    pub lifestyle: LifestyleFactors,
}

impl Assumptions {
    /// Create assumptions with the default Canadian planning values
    pub fn default_canadian() -> Self {
        Self {
            market: MarketAssumptions::default(),
            tax: TaxSchedule::federal_2024(),
            benefits: GovernmentBenefits::default(),
            lifestyle: LifestyleFactors::default(),
        }
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self, EngineError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, EngineError> {
        let loaded = LoadedAssumptions::load_from(path)?;

        let assumptions = Self {
            market: loaded.market,
            tax: TaxSchedule::new(loaded.tax_brackets),
            benefits: loaded.benefits,
            lifestyle: loaded.lifestyle,
        };
        assumptions.validate()?;
        Ok(assumptions)
    }

    /// Validate every table; engines call this once at construction
    pub fn validate(&self) -> Result<(), EngineError> {
        self.market.validate()?;
        self.tax.validate()?;
        self.benefits.validate()?;
        self.lifestyle.validate()?;
        Ok(())
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_canadian()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_assumptions_validate() {
        Assumptions::default_canadian().validate().unwrap();
    }

    #[test]
    fn test_csv_matches_defaults() {
        let from_csv = Assumptions::from_csv().expect("assumption tables load");
        assert_eq!(from_csv, Assumptions::default_canadian());
    }
}
