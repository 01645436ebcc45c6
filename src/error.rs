//! Error taxonomy for the engine
//!
//! Calculations themselves are total once their inputs validate; errors
//! surface at the fallible seams (loaders, constructors, request validation).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Assumption set fails validation (e.g., tax brackets with gaps)
    #[error("invalid assumptions: {0}")]
    InvalidAssumptions(String),

    /// Profile carries a value the calculations forbid (e.g., negative balance)
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    /// What-if request with an unusable timeline or rate
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    /// File could not be opened or read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV input
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A field in a data file failed to parse into its domain type
    #[error("cannot parse {field} from {value:?}: {reason}")]
    Parse {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(field: &'static str, value: &str, reason: impl ToString) -> Self {
        EngineError::Parse {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
