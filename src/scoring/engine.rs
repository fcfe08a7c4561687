use serde::Serialize;

use super::correlation::{pairwise_pearson, spearman_brown};
use super::error::ScoringError;
use super::factors::FactorLengths;
use super::matrix::ResponseMatrix;
use super::split::split_halves;
use super::validation::ensure_valid;

/// Score and diagnostic for one respondent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreRecord {
    /// Spearman-Brown corrected even-odd correlation, `None` when undefined.
    pub score: Option<f64>,
    /// Factors where both the even and the odd mean exist.
    pub valid_pairs: usize,
}

/// Result of a scoring call, shaped by the diagnostics flag.
#[derive(Debug, Clone, PartialEq)]
pub enum Scores {
    Plain(Vec<Option<f64>>),
    Diagnostic(Vec<ScoreRecord>),
}

impl Scores {
    pub fn len(&self) -> usize {
        match self {
            Scores::Plain(v) => v.len(),
            Scores::Diagnostic(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scores only, whichever shape was requested.
    pub fn values(&self) -> Vec<Option<f64>> {
        match self {
            Scores::Plain(v) => v.clone(),
            Scores::Diagnostic(v) => v.iter().map(|r| r.score).collect(),
        }
    }
}

/// Compute the even-odd consistency index for every respondent.
///
/// Fails only on structural problems with the inputs. Respondents whose index
/// cannot be computed get a missing score.
pub fn score(
    matrix: &ResponseMatrix,
    factors: &FactorLengths,
    include_diagnostics: bool,
) -> Result<Scores, ScoringError> {
    let records = score_records(matrix, factors)?;
    if include_diagnostics {
        Ok(Scores::Diagnostic(records))
    } else {
        Ok(Scores::Plain(records.into_iter().map(|r| r.score).collect()))
    }
}

/// Like [`score`], always returning the diagnostic records.
pub fn score_records(
    matrix: &ResponseMatrix,
    factors: &FactorLengths,
) -> Result<Vec<ScoreRecord>, ScoringError> {
    ensure_valid(matrix, factors)?;

    let degenerate = factors.degenerate_factors();
    if !degenerate.is_empty() {
        let positions: Vec<String> = degenerate.iter().map(|i| (i + 1).to_string()).collect();
        tracing::warn!(
            factors = %positions.join(", "),
            "single-item factors have no even half and never contribute a pair"
        );
    }

    let records: Vec<ScoreRecord> = matrix
        .iter_rows()
        .map(|row| score_respondent(row, factors))
        .collect();

    let missing = records.iter().filter(|r| r.score.is_none()).count();
    tracing::debug!(
        respondents = records.len(),
        factors = factors.len(),
        missing,
        "even-odd scoring complete"
    );

    Ok(records)
}

/// Score a single respondent's row.
///
/// A row that does not span exactly the columns covered by `factors` gets a
/// missing score and no valid pairs.
pub fn score_respondent(row: &[Option<f64>], factors: &FactorLengths) -> ScoreRecord {
    if row.len() != factors.total() {
        return ScoreRecord {
            score: None,
            valid_pairs: 0,
        };
    }

    let halves = split_halves(row, factors);
    let valid_pairs = halves.iter().filter(|h| h.is_complete()).count();

    let r = pairwise_pearson(halves.iter().map(|h| (h.even, h.odd)));

    ScoreRecord {
        score: r.map(spearman_brown),
        valid_pairs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// Collects formatted log output for assertions.
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for CaptureWriter {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Deterministic pseudo-random Likert responses (1..=5).
    fn likert_matrix(rows: usize, columns: usize, seed: u64) -> Vec<Vec<Option<f64>>> {
        let mut state = seed;
        (0..rows)
            .map(|_| {
                (0..columns)
                    .map(|_| {
                        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                        Some(((state >> 33) % 5 + 1) as f64)
                    })
                    .collect()
            })
            .collect()
    }

    fn factors(lengths: &[usize]) -> FactorLengths {
        FactorLengths::new(lengths.to_vec())
    }

    #[test]
    fn test_ten_by_ten_two_factors() {
        let matrix = ResponseMatrix::from_rows(likert_matrix(10, 10, 7)).unwrap();

        let plain = score(&matrix, &factors(&[5, 5]), false).unwrap();
        assert_eq!(plain.len(), 10);
        for s in plain.values().into_iter().flatten() {
            assert!((-1.0..=1.0).contains(&s), "score {} out of range", s);
        }

        match score(&matrix, &factors(&[5, 5]), true).unwrap() {
            Scores::Diagnostic(records) => {
                assert_eq!(records.len(), 10);
                assert!(records.iter().all(|r| r.valid_pairs == 2));
            }
            Scores::Plain(_) => panic!("expected diagnostic output"),
        }
    }

    #[test]
    fn test_consistent_respondent_scores_high() {
        // Even and odd halves track each other across three factors
        let row = vec![
            Some(1.0), Some(1.0), Some(1.0), Some(1.0),
            Some(3.0), Some(3.0), Some(3.0), Some(3.0),
            Some(5.0), Some(5.0), Some(5.0), Some(4.0),
        ];
        let matrix = ResponseMatrix::from_rows(vec![row]).unwrap();
        let records = score_records(&matrix, &factors(&[4, 4, 4])).unwrap();
        let s = records[0].score.unwrap();
        assert!(s > 0.9, "expected high consistency, got {}", s);
        assert_eq!(records[0].valid_pairs, 3);
    }

    #[test]
    fn test_known_score() {
        // means per factor (even, odd): (2,1), (4,5), (4,3)
        // r over those pairs = sqrt(3)/2
        let row = vec![
            Some(1.0), Some(2.0),
            Some(5.0), Some(4.0),
            Some(3.0), Some(4.0),
        ];
        let matrix = ResponseMatrix::from_rows(vec![row]).unwrap();
        let records = score_records(&matrix, &factors(&[2, 2, 2])).unwrap();
        let r = 3f64.sqrt() / 2.0;
        let expected = 2.0 * r / (1.0 + r);
        assert!((records[0].score.unwrap() - expected).abs() < 1e-8);
    }

    #[test]
    fn test_inconsistent_respondent_clamped_to_minus_one() {
        // Even and odd means move in opposite directions
        let row = vec![
            Some(1.0), Some(5.0),
            Some(5.0), Some(1.0),
            Some(3.0), Some(3.0),
        ];
        let matrix = ResponseMatrix::from_rows(vec![row]).unwrap();
        let records = score_records(&matrix, &factors(&[2, 2, 2])).unwrap();
        assert_eq!(records[0].score, Some(-1.0));
    }

    #[test]
    fn test_all_missing_respondent() {
        let matrix = ResponseMatrix::from_rows(vec![
            vec![None; 6],
            vec![Some(1.0), Some(2.0), Some(4.0), Some(5.0), Some(2.0), Some(2.0)],
        ])
        .unwrap();
        let records = score_records(&matrix, &factors(&[2, 2, 2])).unwrap();
        assert_eq!(records[0].score, None);
        assert_eq!(records[0].valid_pairs, 0);
        assert!(records[1].score.is_some());
    }

    #[test]
    fn test_one_complete_factor_is_undefined() {
        // Factor 1 entirely missing, factor 2 complete
        let matrix = ResponseMatrix::from_rows(vec![vec![
            None, None, None,
            Some(2.0), Some(3.0), Some(4.0),
        ]])
        .unwrap();
        let records = score_records(&matrix, &factors(&[3, 3])).unwrap();
        assert_eq!(records[0].score, None);
        assert_eq!(records[0].valid_pairs, 1);
    }

    #[test]
    fn test_single_factor_all_missing() {
        let matrix = ResponseMatrix::from_rows(vec![vec![None, None, None, None]]).unwrap();
        let records = score_records(&matrix, &factors(&[4])).unwrap();
        assert_eq!(records[0], ScoreRecord { score: None, valid_pairs: 0 });
    }

    #[test]
    fn test_length_one_factors_never_score() {
        let matrix = ResponseMatrix::from_rows(likert_matrix(5, 4, 3)).unwrap();
        let records = score_records(&matrix, &factors(&[1, 1, 1, 1])).unwrap();
        assert!(records.iter().all(|r| r.score.is_none() && r.valid_pairs == 0));
    }

    #[test]
    fn test_length_one_factor_excluded_from_pairs() {
        let matrix = ResponseMatrix::from_rows(vec![vec![
            Some(1.0), Some(2.0),
            Some(9.0),
            Some(4.0), Some(5.0),
            Some(3.0), Some(3.0),
        ]])
        .unwrap();
        let records = score_records(&matrix, &factors(&[2, 1, 2, 2])).unwrap();
        assert_eq!(records[0].valid_pairs, 3);
        assert!(records[0].score.is_some());
    }

    #[test]
    fn test_respondent_row_length_mismatch() {
        let f = factors(&[2, 2]);
        let missing = ScoreRecord { score: None, valid_pairs: 0 };
        assert_eq!(score_respondent(&[Some(1.0)], &f), missing);
        assert_eq!(score_respondent(&[Some(1.0); 5], &f), missing);
    }

    #[test]
    fn test_infinite_cell_never_reaches_scoring() {
        let rows = vec![vec![Some(1.0), Some(2.0), Some(f64::INFINITY), Some(4.0), Some(3.0), Some(4.0)]];
        assert!(ResponseMatrix::from_rows(rows).is_err());
    }

    #[test]
    fn test_length_one_factor_warning_logged() {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let writer_buf = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || CaptureWriter(writer_buf.clone()))
            .with_ansi(false)
            .finish();

        let matrix = ResponseMatrix::from_rows(likert_matrix(2, 6, 9)).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            score_records(&matrix, &factors(&[2, 1, 2, 1])).unwrap();
        });

        let logged = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("WARN"), "no warning in: {}", logged);
        assert!(logged.contains("single-item factors"));
        assert!(logged.contains("2, 4"));
    }

    #[test]
    fn test_no_warning_without_length_one_factors() {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let writer_buf = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || CaptureWriter(writer_buf.clone()))
            .with_ansi(false)
            .finish();

        let matrix = ResponseMatrix::from_rows(likert_matrix(2, 6, 9)).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            score_records(&matrix, &factors(&[3, 3])).unwrap();
        });

        let logged = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert!(!logged.contains("single-item factors"));
    }

    #[test]
    fn test_sum_mismatch_is_invalid_argument() {
        let matrix = ResponseMatrix::from_rows(likert_matrix(3, 10, 1)).unwrap();
        let err = score(&matrix, &factors(&[5, 4]), false).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_factors_is_invalid_argument() {
        let matrix = ResponseMatrix::from_rows(likert_matrix(3, 4, 1)).unwrap();
        assert!(score(&matrix, &factors(&[]), true).is_err());
    }

    #[test]
    fn test_idempotent() {
        let matrix = ResponseMatrix::from_rows(likert_matrix(20, 12, 42)).unwrap();
        let f = factors(&[4, 4, 4]);
        assert_eq!(score(&matrix, &f, true).unwrap(), score(&matrix, &f, true).unwrap());
    }

    #[test]
    fn test_no_cross_respondent_leakage() {
        let rows = likert_matrix(8, 9, 11);
        let f = factors(&[3, 3, 3]);
        let full = score_records(&ResponseMatrix::from_rows(rows.clone()).unwrap(), &f).unwrap();
        let tail = score_records(&ResponseMatrix::from_rows(rows[3..].to_vec()).unwrap(), &f).unwrap();
        assert_eq!(&full[3..], &tail[..]);
    }

    #[test]
    fn test_complete_data_has_all_pairs() {
        let matrix = ResponseMatrix::from_rows(likert_matrix(15, 14, 5)).unwrap();
        let records = score_records(&matrix, &factors(&[2, 3, 4, 5])).unwrap();
        assert!(records.iter().all(|r| r.valid_pairs == 4));
        for s in records.iter().filter_map(|r| r.score) {
            assert!((-1.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_partial_missing_keeps_factor() {
        let matrix = ResponseMatrix::from_rows(vec![vec![
            Some(1.0), None, Some(1.0), Some(2.0),
            Some(3.0), Some(3.0), None, Some(4.0),
            Some(5.0), Some(5.0), Some(5.0), None,
        ]])
        .unwrap();
        let records = score_records(&matrix, &factors(&[4, 4, 4])).unwrap();
        assert_eq!(records[0].valid_pairs, 3);
    }
}
