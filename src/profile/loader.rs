//! Load financial profiles from CSV intake files

use std::path::Path;
use std::str::FromStr;

use csv::Reader;
use rust_decimal::Decimal;

use super::{FinancialProfile, InvestorType, Lifestyle};
use crate::error::EngineError;

/// Raw CSV row matching the profile export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Age")]
    age: u8,
    #[serde(rename = "MonthlyIncome")]
    monthly_income: String,
    #[serde(rename = "MonthlyExpenses")]
    monthly_expenses: String,
    #[serde(rename = "CashHoldings")]
    cash_holdings: String,
    #[serde(rename = "InvestmentHoldings")]
    investment_holdings: String,
    #[serde(rename = "CurrentDebt")]
    current_debt: String,
    #[serde(rename = "RrspSavings")]
    rrsp_savings: String,
    #[serde(rename = "TfsaSavings")]
    tfsa_savings: String,
    #[serde(rename = "OtherRetirementAccounts")]
    other_retirement_accounts: String,
    #[serde(rename = "DesiredLifestyle")]
    desired_lifestyle: String,
    #[serde(rename = "InvestorType")]
    investor_type: String,
}

fn parse_money(field: &'static str, value: &str) -> Result<Decimal, EngineError> {
    // Empty cells default to zero rather than failing the whole row
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(trimmed).map_err(|e| EngineError::parse(field, value, e))
}

impl CsvRow {
    fn to_profile(self) -> Result<FinancialProfile, EngineError> {
        let desired_retirement_lifestyle = match self.desired_lifestyle.trim() {
            "frugal" => Lifestyle::Frugal,
            "moderate" => Lifestyle::Moderate,
            "comfortable" => Lifestyle::Comfortable,
            "lavish" => Lifestyle::Lavish,
            other => {
                return Err(EngineError::parse(
                    "DesiredLifestyle",
                    other,
                    "expected frugal|moderate|comfortable|lavish",
                ))
            }
        };

        // Investor type is optional and tolerant of the legacy synonyms the
        // intake form used to emit
        let investor_type = match self.investor_type.trim().to_lowercase().as_str() {
            "" => None,
            "conservative" => Some(InvestorType::Conservative),
            "balanced" | "moderate" => Some(InvestorType::Balanced),
            "growth" | "aggressive" => Some(InvestorType::Growth),
            other => {
                return Err(EngineError::parse(
                    "InvestorType",
                    other,
                    "expected conservative|balanced|growth",
                ))
            }
        };

        let profile = FinancialProfile {
            age: self.age,
            monthly_income: parse_money("MonthlyIncome", &self.monthly_income)?,
            monthly_expenses: parse_money("MonthlyExpenses", &self.monthly_expenses)?,
            cash_holdings: parse_money("CashHoldings", &self.cash_holdings)?,
            investment_holdings: parse_money("InvestmentHoldings", &self.investment_holdings)?,
            current_debt: parse_money("CurrentDebt", &self.current_debt)?,
            rrsp_savings: parse_money("RrspSavings", &self.rrsp_savings)?,
            tfsa_savings: parse_money("TfsaSavings", &self.tfsa_savings)?,
            other_retirement_accounts: parse_money(
                "OtherRetirementAccounts",
                &self.other_retirement_accounts,
            )?,
            desired_retirement_lifestyle,
            investor_type,
        };
        profile.validate()?;
        Ok(profile)
    }
}

/// Load all profiles from a CSV file
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<Vec<FinancialProfile>, EngineError> {
    let file = std::fs::File::open(path.as_ref())
        .map_err(|e| EngineError::io(path.as_ref().to_path_buf(), e))?;
    load_profiles_from_reader(file)
}

/// Load profiles from any reader (e.g., string buffer, network stream)
pub fn load_profiles_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<FinancialProfile>, EngineError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut profiles = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        profiles.push(row.to_profile()?);
    }

    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Age,MonthlyIncome,MonthlyExpenses,CashHoldings,InvestmentHoldings,CurrentDebt,RrspSavings,TfsaSavings,OtherRetirementAccounts,DesiredLifestyle,InvestorType
30,6000,4000,10000,20000,5000,5000,5000,0,moderate,balanced
45,9500.50,6200,25000,120000,15000,80000,45000,10000,comfortable,growth
";

    #[test]
    fn test_load_from_reader() {
        let profiles = load_profiles_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(profiles.len(), 2);

        let p1 = &profiles[0];
        assert_eq!(p1.age, 30);
        assert_eq!(p1.desired_retirement_lifestyle, Lifestyle::Moderate);
        assert_eq!(p1.investor_type, Some(InvestorType::Balanced));
        assert_eq!(p1.monthly_income, Decimal::from(6000));

        let p2 = &profiles[1];
        assert_eq!(p2.monthly_income, Decimal::new(950050, 2));
        assert_eq!(p2.investor_type, Some(InvestorType::Growth));
    }

    #[test]
    fn test_unknown_lifestyle_is_rejected() {
        let bad = SAMPLE.replace("moderate,balanced", "opulent,balanced");
        let err = load_profiles_from_reader(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::Parse { .. }));
    }

    #[test]
    fn test_empty_money_cell_defaults_to_zero() {
        let sparse = "\
Age,MonthlyIncome,MonthlyExpenses,CashHoldings,InvestmentHoldings,CurrentDebt,RrspSavings,TfsaSavings,OtherRetirementAccounts,DesiredLifestyle,InvestorType
52,7000,3500,12000,0,,30000,20000,,frugal,
";
        let profiles = load_profiles_from_reader(sparse.as_bytes()).unwrap();
        assert_eq!(profiles[0].current_debt, Decimal::ZERO);
        assert_eq!(profiles[0].other_retirement_accounts, Decimal::ZERO);
        assert_eq!(profiles[0].investor_type, None);
    }

    #[test]
    fn test_load_sample_inforce() {
        let profiles = load_profiles("data/sample_profiles.csv").expect("sample file loads");
        assert!(!profiles.is_empty());
        for profile in &profiles {
            profile.validate().unwrap();
        }
    }
}
