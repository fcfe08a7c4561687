use thiserror::Error;

/// Structural failures of a scoring call.
///
/// Per-respondent numeric problems (undefined correlation, empty subsets) are
/// never errors; they show up as missing scores.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
