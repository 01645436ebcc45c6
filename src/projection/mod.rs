//! Retirement feasibility projection engine

mod engine;
mod plan;
mod state;

pub use engine::{PlanConfig, PlanEngine};
pub use plan::{RetirementPlanResult, YearlyProjection};
pub use state::ProjectionState;
