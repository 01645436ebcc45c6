//! Aggregate financial metrics reporting
//!
//! A pure reporting layer over the profile and investment holdings: every
//! metric pairs a value with a status against a hardcoded threshold table
//! and a guidance message. Any ratio whose denominator could be zero
//! degrades to `None` / `NotAvailable` instead of failing, so a sparse
//! profile still yields a partial report.

mod benchmarks;

pub use benchmarks::{net_worth_benchmark, retirement_benchmark};

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{pow, ratio, round_money, RATIO_SCALE};
use crate::profile::{FinancialProfile, InvestmentHolding};

/// Classification of a metric against its benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricStatus {
    #[serde(rename = "Below Target")]
    BelowTarget,
    #[serde(rename = "On Track")]
    OnTrack,
    #[serde(rename = "Above Target")]
    AboveTarget,
    #[serde(rename = "Not Available")]
    NotAvailable,
}

impl MetricStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricStatus::BelowTarget => "Below Target",
            MetricStatus::OnTrack => "On Track",
            MetricStatus::AboveTarget => "Above Target",
            MetricStatus::NotAvailable => "Not Available",
        }
    }
}

/// Knobs for the handful of modeling constants the report depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Assumed annual interest rate on outstanding debt
    pub debt_annual_rate: Decimal,

    /// Assumed amortization term for outstanding debt, in months
    pub debt_term_months: u32,

    /// Standard retirement age used for the countdown metric
    pub default_retirement_age: u8,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            debt_annual_rate: Decimal::new(5, 2),
            debt_term_months: 60,
            default_retirement_age: 65,
        }
    }
}

/// Snapshot of ~20 financial health metrics with statuses and guidance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetricsReport {
    // Overall financial position
    pub net_worth: Decimal,
    pub net_worth_status: MetricStatus,
    pub net_worth_message: String,
    pub net_worth_benchmark: String,

    pub monthly_cash_flow: Option<Decimal>,

    /// Estimated debt payment as a percentage of monthly income
    pub debt_to_income_ratio: Option<Decimal>,
    pub debt_status: MetricStatus,
    pub debt_message: String,
    pub debt_benchmark: String,

    // Savings
    /// Months of expenses covered by cash
    pub emergency_fund_ratio: Option<Decimal>,
    pub emergency_fund_status: MetricStatus,
    pub emergency_fund_message: String,
    pub emergency_fund_benchmark: String,

    /// Savings as a percentage of income
    pub savings_rate: Option<Decimal>,
    pub savings_status: MetricStatus,
    pub savings_message: String,
    pub savings_benchmark: String,

    pub monthly_savings: Option<Decimal>,

    // Investments
    pub total_investments: Option<Decimal>,
    /// Estimated annual growth percentage by investor type
    pub investment_growth: Option<Decimal>,
    /// Count of distinct holdings, capped at 10
    pub investment_diversity_score: Option<u8>,

    // Retirement
    /// Retirement savings as a multiple of annual income
    pub retirement_savings_ratio: Option<Decimal>,
    pub retirement_status: MetricStatus,
    pub retirement_message: String,
    pub retirement_benchmark: String,

    /// 0-10 score of progress toward the age-banded target
    pub retirement_readiness_score: Option<Decimal>,

    /// Years until the standard retirement age; negative once past it
    pub years_until_retirement: Option<i32>,
}

/// Compute the metrics report with the default modeling constants
pub fn compute_financial_metrics(
    profile: &FinancialProfile,
    holdings: &[InvestmentHolding],
) -> FinancialMetricsReport {
    compute_financial_metrics_with(&MetricsConfig::default(), profile, holdings)
}

/// Compute the metrics report with explicit modeling constants
pub fn compute_financial_metrics_with(
    config: &MetricsConfig,
    profile: &FinancialProfile,
    holdings: &[InvestmentHolding],
) -> FinancialMetricsReport {
    let age = profile.age;
    let annual_income = profile.annual_income();
    let net_worth = profile.net_worth();

    // Net worth vs age-banded multiples of salary
    let (net_worth_status, net_worth_message) = match ratio(net_worth, annual_income) {
        None => (
            MetricStatus::NotAvailable,
            "Add your income details to see how your net worth compares to benchmarks.",
        ),
        Some(net_worth_ratio) => assess_net_worth(age, net_worth_ratio),
    };

    let has_income = !profile.monthly_income.is_zero();
    let has_expenses = !profile.monthly_expenses.is_zero();
    let monthly_cash_flow = if has_income && has_expenses {
        Some(profile.monthly_income - profile.monthly_expenses)
    } else {
        None
    };

    // Debt service estimated with a level-payment amortization
    let monthly_debt_payment = if profile.current_debt > Decimal::ZERO {
        amortized_payment(
            profile.current_debt,
            config.debt_annual_rate,
            config.debt_term_months,
        )
    } else {
        Decimal::ZERO
    };
    let debt_to_income_ratio = ratio(monthly_debt_payment, profile.monthly_income)
        .map(|r| (r * Decimal::from(100)).round_dp(RATIO_SCALE));
    let (debt_status, debt_message) = match debt_to_income_ratio {
        None => (
            MetricStatus::NotAvailable,
            "Add your income and debt details to see how your debt load compares to recommendations.",
        ),
        Some(dti) if dti > Decimal::from(36) => (
            MetricStatus::BelowTarget,
            "High debt levels can strain your finances. Focus on reducing debt to improve financial flexibility.",
        ),
        Some(dti) if dti >= Decimal::from(20) => (
            MetricStatus::OnTrack,
            "Your debt is manageable. Continue making timely payments to maintain stability.",
        ),
        Some(_) => (
            MetricStatus::AboveTarget,
            "Great job! Low debt enhances your financial freedom and ability to invest.",
        ),
    };

    // Emergency fund coverage in months of expenses
    let emergency_fund_ratio = ratio(profile.cash_holdings, profile.monthly_expenses)
        .map(|r| r.round_dp(RATIO_SCALE));
    let (emergency_fund_status, emergency_fund_message) = match emergency_fund_ratio {
        None => (
            MetricStatus::NotAvailable,
            "Add your expenses and cash balance to see how your emergency fund compares to recommendations.",
        ),
        Some(months) if months < Decimal::from(3) => (
            MetricStatus::BelowTarget,
            "Your emergency fund is below the recommended level. Prioritize increasing your savings to cover unexpected expenses.",
        ),
        Some(months) if months <= Decimal::from(6) => (
            MetricStatus::OnTrack,
            "You're well-prepared for unforeseen events. Continue maintaining this safety net.",
        ),
        Some(_) => (
            MetricStatus::AboveTarget,
            "Excellent! Consider allocating excess funds to investments for potential growth.",
        ),
    };

    let monthly_savings = monthly_cash_flow;
    let savings_rate = monthly_savings
        .and_then(|savings| ratio(savings, profile.monthly_income))
        .map(|r| (r * Decimal::from(100)).round_dp(RATIO_SCALE));
    let (savings_status, savings_message) = match savings_rate {
        None => (
            MetricStatus::NotAvailable,
            "Add your income and expenses to see how your savings rate compares to recommendations.",
        ),
        Some(rate) if rate < Decimal::from(10) => (
            MetricStatus::BelowTarget,
            "Increasing your savings rate is crucial. Start with small, consistent contributions to build the habit.",
        ),
        Some(rate) if rate < Decimal::from(20) => (
            MetricStatus::OnTrack,
            "You're on the right track. Aim to gradually increase your savings to reach the recommended level.",
        ),
        Some(_) => (
            MetricStatus::AboveTarget,
            "Excellent! A high savings rate positions you well for future financial goals.",
        ),
    };

    // Investments: stated balance vs book value of listed holdings,
    // whichever is larger
    let portfolio_value: Decimal = holdings.iter().map(|h| h.book_value()).sum();
    let total_investments = if !profile.investment_holdings.is_zero() || !portfolio_value.is_zero()
    {
        Some(profile.investment_holdings.max(portfolio_value))
    } else {
        None
    };
    let investment_growth = profile.investor_type.map(|t| t.estimated_growth_pct());
    let investment_diversity_score = if holdings.is_empty() {
        None
    } else {
        let unique: HashSet<String> = holdings
            .iter()
            .map(|h| h.holding_name.to_lowercase())
            .collect();
        Some(unique.len().min(10) as u8)
    };

    // Retirement savings vs age-banded income multiples
    let total_retirement_savings = profile.total_retirement_savings();
    let retirement_savings_ratio = ratio(total_retirement_savings, annual_income)
        .map(|r| r.round_dp(RATIO_SCALE));
    let (retirement_status, retirement_message) = match retirement_savings_ratio {
        None => (
            MetricStatus::NotAvailable,
            "Add your income and retirement account details to see how your retirement savings compare to age-based targets.".to_string(),
        ),
        Some(r) => assess_retirement(age, r),
    };
    let retirement_readiness_score = retirement_savings_ratio.map(|r| {
        let target = benchmarks::readiness_target_ratio(age);
        ((r / target).min(Decimal::ONE) * Decimal::from(10)).round_dp(RATIO_SCALE)
    });

    let years_until_retirement = if age > 0 {
        Some(i32::from(config.default_retirement_age) - i32::from(age))
    } else {
        None
    };

    FinancialMetricsReport {
        net_worth: round_money(net_worth),
        net_worth_status,
        net_worth_message: net_worth_message.to_string(),
        net_worth_benchmark: benchmarks::net_worth_benchmark(age).to_string(),

        monthly_cash_flow: monthly_cash_flow.map(round_money),

        debt_to_income_ratio,
        debt_status,
        debt_message: debt_message.to_string(),
        debt_benchmark: "Below 36% of monthly income".to_string(),

        emergency_fund_ratio,
        emergency_fund_status,
        emergency_fund_message: emergency_fund_message.to_string(),
        emergency_fund_benchmark: "3-6 months of expenses".to_string(),

        savings_rate,
        savings_status,
        savings_message: savings_message.to_string(),
        savings_benchmark: "At least 20% of income".to_string(),

        monthly_savings: monthly_savings.map(round_money),

        total_investments: total_investments.map(round_money),
        investment_growth,
        investment_diversity_score,

        retirement_savings_ratio,
        retirement_status,
        retirement_message,
        retirement_benchmark: benchmarks::retirement_benchmark(age).to_string(),

        retirement_readiness_score,

        years_until_retirement,
    }
}

/// Level monthly payment for a loan balance at `annual_rate` over
/// `term_months`: `B*r / (1 - (1+r)^-n)` with `r` the monthly rate
fn amortized_payment(balance: Decimal, annual_rate: Decimal, term_months: u32) -> Decimal {
    let monthly_rate = annual_rate / Decimal::from(12);
    if monthly_rate.is_zero() || term_months == 0 {
        // Interest-free straight-line repayment
        return balance / Decimal::from(term_months.max(1));
    }
    let compounded = pow(Decimal::ONE + monthly_rate, term_months);
    balance * monthly_rate / (Decimal::ONE - Decimal::ONE / compounded)
}

fn assess_net_worth(age: u8, net_worth_ratio: Decimal) -> (MetricStatus, &'static str) {
    if age <= 35 {
        if net_worth_ratio < Decimal::new(5, 1) {
            (
                MetricStatus::BelowTarget,
                "Building your net worth takes time. Focus on reducing debt and increasing savings.",
            )
        } else if net_worth_ratio <= Decimal::new(15, 1) {
            (
                MetricStatus::OnTrack,
                "You're on the right path. Continue building your assets and managing liabilities.",
            )
        } else {
            (
                MetricStatus::AboveTarget,
                "Excellent start! Your net worth is growing robustly.",
            )
        }
    } else if age <= 50 {
        if net_worth_ratio < Decimal::from(2) {
            (
                MetricStatus::BelowTarget,
                "Consider strategies to boost your net worth, such as increasing savings and prudent investing.",
            )
        } else if net_worth_ratio <= Decimal::from(5) {
            (
                MetricStatus::OnTrack,
                "Good progress! Keep focusing on asset growth and long-term investments.",
            )
        } else {
            (
                MetricStatus::AboveTarget,
                "You're ahead of the curve. Consider diversifying investments to sustain growth.",
            )
        }
    } else if net_worth_ratio < Decimal::from(6) {
        (
            MetricStatus::BelowTarget,
            "It's important to enhance your net worth before retirement. Seek advice to optimize your financial plan.",
        )
    } else if net_worth_ratio <= Decimal::from(10) {
        (
            MetricStatus::OnTrack,
            "You're well-prepared for retirement. Maintain your financial strategies to preserve wealth.",
        )
    } else {
        (
            MetricStatus::AboveTarget,
            "Outstanding! Your strong net worth provides substantial retirement security.",
        )
    }
}

fn assess_retirement(age: u8, savings_ratio: Decimal) -> (MetricStatus, String) {
    let target = benchmarks::retirement_target_ratio(age);
    if savings_ratio < target {
        (
            MetricStatus::BelowTarget,
            format!(
                "It's important to boost your retirement savings. Consider increasing contributions and reviewing your investment strategy to reach the target of {}x annual income by age {}.",
                target, age
            ),
        )
    } else if savings_ratio <= target * Decimal::new(12, 1) {
        (
            MetricStatus::OnTrack,
            "You're on track for a comfortable retirement. Maintain your current savings and investment approach.".to_string(),
        )
    } else {
        (
            MetricStatus::AboveTarget,
            "Outstanding! Your diligent saving provides a strong foundation for retirement.".to_string(),
        )
    }
}
