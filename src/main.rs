//! Retirement Engine CLI
//!
//! Command-line interface for running a demonstration retirement plan

use std::fs::File;
use std::io::Write;

use anyhow::Context;
use chrono::Local;
use rust_decimal::Decimal;

use retirement_engine::money::format_dollars;
use retirement_engine::profile::load_profiles;
use retirement_engine::scenario::{ScenarioRunner, WhatIfRequest};
use retirement_engine::{compute_financial_metrics, Assumptions, PlanConfig, PlanEngine};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Retirement Engine v0.1.0");
    println!("========================\n");
    println!("Report date: {}\n", Local::now().format("%Y-%m-%d"));

    let profiles =
        load_profiles("data/sample_profiles.csv").context("loading sample profiles")?;
    let profile = profiles.first().context("sample profile file is empty")?;

    println!("Profile:");
    println!("  Age: {}", profile.age);
    println!("  Monthly income: {}", format_dollars(&profile.monthly_income));
    println!("  Monthly expenses: {}", format_dollars(&profile.monthly_expenses));
    println!("  Cash: {}", format_dollars(&profile.cash_holdings));
    println!("  Investable assets: {}", format_dollars(&profile.investable_assets()));
    println!("  Lifestyle: {}", profile.desired_retirement_lifestyle.as_str());
    println!();

    // Set up assumptions and run the feasibility search
    let assumptions = Assumptions::default_canadian();
    let engine = PlanEngine::new(assumptions.clone(), PlanConfig::default())?;
    let result = engine.project_plan(profile);

    // Print header
    println!("Accumulation ({} years):", result.years_until_retirement);
    println!(
        "{:>5} {:>4} {:>16} {:>14} {:>14} {:>10}",
        "Year", "Age", "Assets", "Growth", "Contrib", "Fees"
    );
    println!("{}", "-".repeat(70));

    // Print first 24 years to console
    for row in result.yearly_projections.iter().take(24) {
        println!(
            "{:>5} {:>4} {:>16} {:>14} {:>14} {:>10}",
            row.year_index,
            row.age,
            format_dollars(&row.asset_value),
            format_dollars(&row.growth_amount),
            format_dollars(&row.contribution_amount),
            format_dollars(&row.fee_amount),
        );
    }
    if result.yearly_projections.len() > 24 {
        println!("... ({} more years)", result.yearly_projections.len() - 24);
    }

    // Write full trajectory to CSV
    let csv_path = "projection_output.csv";
    let mut file = File::create(csv_path).context("creating projection CSV")?;
    writeln!(file, "Year,Age,Assets,Growth,Contribution,Fees")?;
    for row in &result.yearly_projections {
        writeln!(
            file,
            "{},{},{},{},{},{}",
            row.year_index,
            row.age,
            row.asset_value,
            row.growth_amount,
            row.contribution_amount,
            row.fee_amount,
        )?;
    }
    println!("\nFull trajectory written to: {}", csv_path);

    // Print summary
    println!("\nPlan summary:");
    println!("  Retirement age: {}", result.retirement_age);
    println!("  Years in retirement: {}", result.years_in_retirement);
    println!("  Monthly contribution: {}", format_dollars(&result.monthly_contribution));
    println!("  Projected savings: {}", format_dollars(&result.projected_savings));
    println!("  Required savings: {}", format_dollars(&result.required_savings));
    println!("  Savings gap: {}", format_dollars(&result.savings_gap));
    println!(
        "  Retirement income: {}/month ({} savings + {} benefits)",
        format_dollars(&result.retirement_income),
        format_dollars(&result.savings_income),
        format_dollars(&result.government_benefits),
    );

    // What-if: retire at 65 on a 60k income goal
    let runner = ScenarioRunner::with_assumptions(assumptions)?;
    let request = WhatIfRequest::from_profile(
        profile,
        &runner.assumptions().market,
        65,
        Decimal::from(60_000),
    );
    let what_if = runner.run_what_if(&request)?;

    println!("\nWhat-if (retire at 65 on $60,000/year):");
    println!(
        "  Savings at retirement: {}",
        format_dollars(&what_if.total_savings_at_retirement)
    );
    println!(
        "  Monthly income: {}",
        format_dollars(&what_if.monthly_retirement_income)
    );
    println!("  Capital gap: {}", format_dollars(&what_if.savings_gap));
    println!(
        "  Contribution needed: {}/month",
        format_dollars(&what_if.monthly_contribution_needed)
    );

    // Financial health metrics as JSON
    let report = compute_financial_metrics(profile, &[]);
    println!("\nMetrics report:");
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
