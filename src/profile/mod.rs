//! User financial profile data and loaders

mod data;
pub mod loader;

pub use data::{FinancialProfile, InvestmentHolding, InvestorType, Lifestyle};
pub use loader::{load_profiles, load_profiles_from_reader};
