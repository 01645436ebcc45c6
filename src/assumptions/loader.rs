//! CSV-based assumption loader
//!
//! Loads projection assumptions from CSV files in data/assumptions/

use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::{GovernmentBenefits, LifestyleFactors, MarketAssumptions, TaxBracket};
use crate::error::EngineError;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

fn open(path: &Path, file: &str) -> Result<csv::Reader<File>, EngineError> {
    let full = path.join(file);
    let handle = File::open(&full).map_err(|e| EngineError::io(full, e))?;
    Ok(csv::Reader::from_reader(handle))
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal, EngineError> {
    Decimal::from_str(raw.trim()).map_err(|e| EngineError::parse(field, raw, e))
}

/// Load tax brackets from CSV
///
/// Columns: Lower,Upper,Rate with `inf` as the upper bound of the top bracket
pub fn load_tax_brackets(path: &Path) -> Result<Vec<TaxBracket>, EngineError> {
    let mut reader = open(path, "tax_brackets.csv")?;
    let mut brackets = Vec::new();

    for result in reader.records() {
        let record = result?;
        let lower = parse_decimal("Lower", &record[0])?;
        let upper = match record[1].trim() {
            "inf" => None,
            raw => Some(parse_decimal("Upper", raw)?),
        };
        let rate = parse_decimal("Rate", &record[2])?;
        brackets.push(TaxBracket::new(lower, upper, rate));
    }

    Ok(brackets)
}

/// Load market assumptions from CSV
///
/// Key/value rows over the recognized parameter names; anything missing keeps
/// its default
pub fn load_market(path: &Path) -> Result<MarketAssumptions, EngineError> {
    let mut reader = open(path, "market.csv")?;
    let mut market = MarketAssumptions::default();

    for result in reader.records() {
        let record = result?;
        let value = record[1].trim();
        match record[0].trim() {
            "InflationRate" => market.inflation_rate = parse_decimal("InflationRate", value)?,
            "ExpectedReturn" => market.expected_return = parse_decimal("ExpectedReturn", value)?,
            "WithdrawalRate" => market.withdrawal_rate = parse_decimal("WithdrawalRate", value)?,
            "AnnualFeeRate" => market.annual_fee_rate = parse_decimal("AnnualFeeRate", value)?,
            "LifeExpectancy" => {
                market.life_expectancy = value
                    .parse()
                    .map_err(|e| EngineError::parse("LifeExpectancy", value, e))?
            }
            "MaxRetirementAge" => {
                market.max_retirement_age = value
                    .parse()
                    .map_err(|e| EngineError::parse("MaxRetirementAge", value, e))?
            }
            other => {
                return Err(EngineError::parse(
                    "market parameter",
                    other,
                    "unrecognized parameter name",
                ))
            }
        }
    }

    Ok(market)
}

/// Load government benefit amounts from CSV
///
/// Columns: Benefit,AnnualAmount,MonthlyEstimate with one row each for CPP
/// and OAS
pub fn load_benefits(path: &Path) -> Result<GovernmentBenefits, EngineError> {
    let mut reader = open(path, "government_benefits.csv")?;
    let mut benefits = GovernmentBenefits::default();

    for result in reader.records() {
        let record = result?;
        let annual = parse_decimal("AnnualAmount", &record[1])?;
        let monthly = parse_decimal("MonthlyEstimate", &record[2])?;
        match record[0].trim() {
            "CPP" => {
                benefits.cpp_annual = annual;
                benefits.cpp_monthly_estimate = monthly;
            }
            "OAS" => {
                benefits.oas_annual = annual;
                benefits.oas_monthly_estimate = monthly;
            }
            other => return Err(EngineError::parse("Benefit", other, "expected CPP or OAS")),
        }
    }

    Ok(benefits)
}

/// Load lifestyle expense-retention factors from CSV
///
/// Columns: Lifestyle,Factor
pub fn load_lifestyle_factors(path: &Path) -> Result<LifestyleFactors, EngineError> {
    let mut reader = open(path, "lifestyle_factors.csv")?;
    let mut factors = LifestyleFactors::default();

    for result in reader.records() {
        let record = result?;
        let factor = parse_decimal("Factor", &record[1])?;
        match record[0].trim() {
            "frugal" => factors.frugal = factor,
            "moderate" => factors.moderate = factor,
            "comfortable" => factors.comfortable = factor,
            "lavish" => factors.lavish = factor,
            other => {
                return Err(EngineError::parse(
                    "Lifestyle",
                    other,
                    "expected frugal|moderate|comfortable|lavish",
                ))
            }
        }
    }

    Ok(factors)
}

/// All assumption tables loaded from one directory
#[derive(Debug, Clone)]
pub struct LoadedAssumptions {
    pub tax_brackets: Vec<TaxBracket>,
    pub market: MarketAssumptions,
    pub benefits: GovernmentBenefits,
    pub lifestyle: LifestyleFactors,
}

impl LoadedAssumptions {
    pub fn load_from(path: &Path) -> Result<Self, EngineError> {
        Ok(Self {
            tax_brackets: load_tax_brackets(path)?,
            market: load_market(path)?,
            benefits: load_benefits(path)?,
            lifestyle: load_lifestyle_factors(path)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_directory() {
        let loaded = LoadedAssumptions::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
            .expect("default assumption tables load");

        assert_eq!(loaded.tax_brackets.len(), 5);
        assert_eq!(loaded.tax_brackets[0].lower, Decimal::ZERO);
        assert!(loaded.tax_brackets.last().unwrap().upper.is_none());

        assert_eq!(loaded.market.life_expectancy, 90);
        assert_eq!(loaded.benefits.cpp_annual, Decimal::new(15_043_00, 2));
        assert_eq!(loaded.lifestyle.moderate, Decimal::new(7, 1));
    }
}
