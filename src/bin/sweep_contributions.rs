//! Sweep what-if retirement ages for every profile in an intake file
//!
//! For each profile and each candidate retirement age, solves for the
//! monthly contribution needed to hit the desired retirement income, and
//! writes the aggregated table to CSV.

use std::fs::File;
use std::io::Write;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;
use rayon::prelude::*;
use rust_decimal::Decimal;

use retirement_engine::profile::load_profiles;
use retirement_engine::scenario::{ScenarioRunner, WhatIfRequest};

#[derive(Parser, Debug)]
#[command(about = "Sweep what-if contribution requirements across retirement ages")]
struct Args {
    /// Path to the profile intake CSV
    #[arg(long, default_value = "data/sample_profiles.csv")]
    profiles: String,

    /// Output CSV path
    #[arg(long, default_value = "what_if_sweep.csv")]
    output: String,

    /// Desired annual retirement income
    #[arg(long, default_value_t = 60_000)]
    desired_income: u32,

    /// First retirement age to evaluate
    #[arg(long, default_value_t = 55)]
    min_age: u8,

    /// Last retirement age to evaluate
    #[arg(long, default_value_t = 75)]
    max_age: u8,
}

/// One row of the sweep output
struct SweepRow {
    profile_index: usize,
    current_age: u8,
    retirement_age: u8,
    savings_at_retirement: Decimal,
    monthly_income: Decimal,
    contribution_needed: Decimal,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let profiles = load_profiles(&args.profiles)
        .with_context(|| format!("loading profiles from {}", args.profiles))?;
    info!("loaded {} profiles in {:?}", profiles.len(), start.elapsed());

    let runner = ScenarioRunner::new();
    let desired_income = Decimal::from(args.desired_income);

    let rows: Vec<SweepRow> = profiles
        .par_iter()
        .enumerate()
        .map(|(profile_index, profile)| {
            let mut profile_rows = Vec::new();
            for retirement_age in args.min_age..=args.max_age {
                if retirement_age < profile.age {
                    continue;
                }
                let request = WhatIfRequest::from_profile(
                    profile,
                    &runner.assumptions().market,
                    retirement_age,
                    desired_income,
                );
                let response = runner
                    .run_what_if(&request)
                    .expect("profiles validated on load");
                profile_rows.push(SweepRow {
                    profile_index,
                    current_age: profile.age,
                    retirement_age,
                    savings_at_retirement: response.total_savings_at_retirement,
                    monthly_income: response.monthly_retirement_income,
                    contribution_needed: response.monthly_contribution_needed,
                });
            }
            profile_rows
        })
        .flatten()
        .collect();

    let mut file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output))?;
    writeln!(
        file,
        "Profile,CurrentAge,RetirementAge,SavingsAtRetirement,MonthlyIncome,ContributionNeeded"
    )?;
    for row in &rows {
        writeln!(
            file,
            "{},{},{},{},{},{}",
            row.profile_index,
            row.current_age,
            row.retirement_age,
            row.savings_at_retirement,
            row.monthly_income,
            row.contribution_needed,
        )?;
    }

    println!(
        "Wrote {} rows for {} profiles to {} in {:?}",
        rows.len(),
        profiles.len(),
        args.output,
        start.elapsed()
    );

    Ok(())
}
