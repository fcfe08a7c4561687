use super::error::ScoringError;

/// Respondent-by-item response table.
///
/// Rows are respondents, columns are items. A cell is `None` when the
/// respondent gave no usable answer. Column order matters: it determines each
/// item's position inside its factor.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMatrix {
    rows: usize,
    columns: usize,
    cells: Vec<Option<f64>>,
}

impl ResponseMatrix {
    /// Build a matrix from rows of optional values.
    ///
    /// NaN cells are stored as missing; infinite cells are rejected. Every row
    /// must have the same length and the matrix must contain at least one row
    /// and one column.
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> Result<Self, ScoringError> {
        let row_count = rows.len();
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if row_count == 0 || columns == 0 {
            return Err(ScoringError::InvalidArgument(format!(
                "response matrix must have at least one row and one column (got {}x{})",
                row_count, columns
            )));
        }

        let mut cells = Vec::with_capacity(row_count * columns);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != columns {
                return Err(ScoringError::InvalidArgument(format!(
                    "row {} has {} columns, expected {}",
                    i + 1,
                    row.len(),
                    columns
                )));
            }
            for (j, cell) in row.into_iter().enumerate() {
                match cell {
                    Some(x) if x.is_infinite() => {
                        return Err(ScoringError::InvalidArgument(format!(
                            "row {}, column {}: infinite value {}",
                            i + 1,
                            j + 1,
                            x
                        )));
                    }
                    Some(x) if x.is_nan() => cells.push(None),
                    other => cells.push(other),
                }
            }
        }

        Ok(Self {
            rows: row_count,
            columns,
            cells,
        })
    }

    /// Build a matrix from plain floats, treating NaN as missing.
    pub fn from_f64_rows(rows: Vec<Vec<f64>>) -> Result<Self, ScoringError> {
        Self::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Responses of a single respondent, in column order.
    pub fn row(&self, index: usize) -> &[Option<f64>] {
        let start = index * self.columns;
        &self.cells[start..start + self.columns]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Option<f64>]> {
        self.cells.chunks(self.columns)
    }
}
