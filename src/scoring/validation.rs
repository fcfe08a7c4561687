use super::error::ScoringError;
use super::factors::FactorLengths;
use super::matrix::ResponseMatrix;

/// Check the structural preconditions of a scoring call.
/// Returns all problems at once (not just the first).
pub fn validate_factors(matrix: &ResponseMatrix, factors: &FactorLengths) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if factors.is_empty() {
        errors.push("factors: at least one factor length is required".to_string());
    }

    for (i, &len) in factors.as_slice().iter().enumerate() {
        if len == 0 {
            errors.push(format!("factors[{}]: length must be at least 1", i));
        }
    }

    if !factors.is_empty() && factors.total() != matrix.columns() {
        errors.push(format!(
            "factors: lengths sum to {} but the response matrix has {} columns",
            factors.total(),
            matrix.columns()
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Same checks as [`validate_factors`], folded into a single error.
pub(crate) fn ensure_valid(matrix: &ResponseMatrix, factors: &FactorLengths) -> Result<(), ScoringError> {
    validate_factors(matrix, factors).map_err(|errors| ScoringError::InvalidArgument(errors.join("; ")))
}
