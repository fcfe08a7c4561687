pub mod correlation;
pub mod engine;
pub mod error;
pub mod factors;
pub mod flag;
pub mod matrix;
pub mod split;
pub mod validation;

pub use correlation::{pairwise_pearson, spearman_brown};
pub use engine::{score, score_records, score_respondent, ScoreRecord, Scores};
pub use error::ScoringError;
pub use factors::FactorLengths;
pub use flag::{flag_below, summarize, ScoreSummary};
pub use matrix::ResponseMatrix;
pub use split::{split_halves, FactorHalves, PerFactorMeans};
pub use validation::validate_factors;
