//! Age-banded benchmark tables for the metrics report

use rust_decimal::Decimal;

/// Net worth benchmark for an age group, as a multiple of annual salary
pub fn net_worth_benchmark(age: u8) -> &'static str {
    if age <= 35 {
        "0.5-1.5x annual salary"
    } else if age <= 50 {
        "2-5x annual salary"
    } else {
        "6-10x annual salary"
    }
}

/// Recommended retirement savings for an age group, as a multiple of annual
/// income
pub fn retirement_benchmark(age: u8) -> &'static str {
    if age < 30 {
        "1x annual income"
    } else if age < 40 {
        "3x annual income"
    } else if age < 50 {
        "6x annual income"
    } else if age < 60 {
        "8x annual income"
    } else {
        "10x annual income"
    }
}

/// Target retirement-savings multiple used for status classification
pub fn retirement_target_ratio(age: u8) -> Decimal {
    if age < 30 {
        Decimal::from(1)
    } else if age < 40 {
        Decimal::from(3)
    } else if age < 50 {
        Decimal::from(6)
    } else if age < 60 {
        Decimal::from(8)
    } else {
        Decimal::from(10)
    }
}

/// Target multiple used by the readiness score (coarser top band)
pub fn readiness_target_ratio(age: u8) -> Decimal {
    if age < 30 {
        Decimal::from(1)
    } else if age < 40 {
        Decimal::from(3)
    } else if age < 50 {
        Decimal::from(6)
    } else {
        Decimal::from(8)
    }
}
