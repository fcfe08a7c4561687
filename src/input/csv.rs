use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use thiserror::Error;

use crate::config::InputConfig;
use crate::scoring::{ResponseMatrix, ScoringError};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("id column '{0}' not found in header")]
    MissingIdColumn(String),

    #[error("id column '{0}' requires a header row")]
    IdColumnWithoutHeader(String),

    #[error("row {row}: expected {expected} fields, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    NotNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("no respondent rows in input")]
    Empty,

    #[error(transparent)]
    Matrix(#[from] ScoringError),
}

/// How to read a response file.
#[derive(Debug, Clone, PartialEq)]
pub struct InputOptions {
    pub delimiter: u8,
    pub has_headers: bool,
    pub id_column: Option<String>,
    pub missing: Vec<String>,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            id_column: None,
            missing: vec![String::new(), "NA".to_string()],
        }
    }
}

impl From<&InputConfig> for InputOptions {
    fn from(config: &InputConfig) -> Self {
        let defaults = Self::default();
        Self {
            delimiter: config
                .delimiter
                .as_deref()
                .and_then(|d| d.bytes().next())
                .unwrap_or(defaults.delimiter),
            has_headers: config.has_headers.unwrap_or(defaults.has_headers),
            id_column: config.id_column.clone(),
            missing: config.missing.clone().unwrap_or(defaults.missing),
        }
    }
}

/// Responses loaded from a file, with their labels.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// One identifier per respondent, in row order
    pub ids: Vec<String>,
    /// Item column names, in column order
    pub items: Vec<String>,
    pub matrix: ResponseMatrix,
}

/// Load a response matrix from a CSV file.
pub fn load_responses(path: &Path, options: &InputOptions) -> Result<Dataset, InputError> {
    let reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .from_path(path)?;
    read_dataset(reader, options)
}

/// Parse a response matrix from any CSV source.
pub fn parse_responses<R: Read>(source: R, options: &InputOptions) -> Result<Dataset, InputError> {
    let reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .from_reader(source);
    read_dataset(reader, options)
}

fn read_dataset<R: Read>(
    mut reader: csv::Reader<R>,
    options: &InputOptions,
) -> Result<Dataset, InputError> {
    let header: Option<Vec<String>> = if options.has_headers {
        Some(reader.headers()?.iter().map(|h| h.trim().to_string()).collect())
    } else {
        None
    };

    let id_index = match (&options.id_column, &header) {
        (Some(name), Some(header)) => Some(
            header
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| InputError::MissingIdColumn(name.clone()))?,
        ),
        (Some(name), None) => return Err(InputError::IdColumnWithoutHeader(name.clone())),
        (None, _) => None,
    };

    let mut ids = Vec::new();
    let mut rows = Vec::new();
    let mut width = header.as_ref().map(Vec::len);
    // 1-based line of the first data record
    let first_line = if options.has_headers { 2 } else { 1 };

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = first_line + i;

        let expected = *width.get_or_insert(record.len());
        if record.len() != expected {
            return Err(InputError::RaggedRow {
                row: line,
                expected,
                found: record.len(),
            });
        }

        let mut values = Vec::with_capacity(expected);
        for (col, field) in record.iter().enumerate() {
            if Some(col) == id_index {
                ids.push(field.trim().to_string());
                continue;
            }
            values.push(parse_cell(field, &options.missing).ok_or_else(|| {
                InputError::NotNumeric {
                    row: line,
                    column: column_name(header.as_deref(), col),
                    value: field.to_string(),
                }
            })?);
        }

        if id_index.is_none() {
            ids.push((i + 1).to_string());
        }
        rows.push(values);
    }

    if rows.is_empty() {
        return Err(InputError::Empty);
    }

    let items = (0..width.unwrap_or(0))
        .filter(|&col| Some(col) != id_index)
        .map(|col| column_name(header.as_deref(), col))
        .collect();

    let matrix = ResponseMatrix::from_rows(rows)?;
    tracing::debug!(
        respondents = matrix.rows(),
        items = matrix.columns(),
        "loaded responses"
    );

    Ok(Dataset { ids, items, matrix })
}

/// `Some(None)` for a missing cell, `Some(Some(v))` for a finite number,
/// `None` for anything else (including "inf").
fn parse_cell(field: &str, missing: &[String]) -> Option<Option<f64>> {
    let field = field.trim();
    if missing.iter().any(|m| m.trim() == field) {
        return Some(None);
    }
    match field.parse::<f64>() {
        Ok(v) if v.is_nan() => Some(None),
        Ok(v) if v.is_infinite() => None,
        Ok(v) => Some(Some(v)),
        Err(_) => None,
    }
}

fn column_name(header: Option<&[String]>, col: usize) -> String {
    header
        .and_then(|h| h.get(col).cloned())
        .unwrap_or_else(|| format!("V{}", col + 1))
}
