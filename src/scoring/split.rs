use super::factors::FactorLengths;

/// Even and odd item means of one factor for one respondent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorHalves {
    pub even: Option<f64>,
    pub odd: Option<f64>,
}

impl FactorHalves {
    /// Both halves are present, so the factor contributes a pair.
    pub fn is_complete(&self) -> bool {
        self.even.is_some() && self.odd.is_some()
    }

    pub fn pair(&self) -> Option<(f64, f64)> {
        self.even.zip(self.odd)
    }
}

/// Per-factor even/odd means for a single respondent, one entry per factor.
pub type PerFactorMeans = Vec<FactorHalves>;

/// Split a respondent's row into per-factor even/odd means.
///
/// Position parity is taken within each factor, starting at 1: the first item
/// of every factor is odd, whatever its absolute column.
pub fn split_halves(row: &[Option<f64>], factors: &FactorLengths) -> PerFactorMeans {
    factors
        .blocks()
        .map(|block| {
            let items = &row[block];
            // slice index 0 is position 1 (odd)
            let odd = mean(items.iter().step_by(2).copied());
            let even = mean(items.iter().skip(1).step_by(2).copied());
            FactorHalves { even, odd }
        })
        .collect()
}

/// Mean of the present values, `None` when nothing is present.
fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, n) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}
