use serde::Serialize;

use super::engine::ScoreRecord;

/// Indices of respondents whose score falls below `threshold`, in input order.
///
/// Respondents without a score are only listed when `include_missing` is set.
pub fn flag_below(records: &[ScoreRecord], threshold: f64, include_missing: bool) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| match r.score {
            Some(s) => s < threshold,
            None => include_missing,
        })
        .map(|(i, _)| i)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub respondents: usize,
    pub scored: usize,
    pub missing: usize,
    pub flagged: usize,
    /// Mean of the defined scores.
    pub mean_score: Option<f64>,
}

/// Counts over a scoring run. `flagged` is the output of [`flag_below`],
/// empty when no threshold is in effect.
pub fn summarize(records: &[ScoreRecord], flagged: &[usize]) -> ScoreSummary {
    let defined: Vec<f64> = records.iter().filter_map(|r| r.score).collect();
    let mean_score = if defined.is_empty() {
        None
    } else {
        Some(defined.iter().sum::<f64>() / defined.len() as f64)
    };

    ScoreSummary {
        respondents: records.len(),
        scored: defined.len(),
        missing: records.len() - defined.len(),
        flagged: flagged.len(),
        mean_score,
    }
}
