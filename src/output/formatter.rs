use std::io::IsTerminal;

use owo_colors::OwoColorize;
use serde::Serialize;

use crate::scoring::ScoreRecord;

/// A respondent with their score, ready for display
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRespondent<'a> {
    /// 1-based position in the input
    #[serde(skip)]
    pub index: usize,
    pub id: &'a str,
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_pairs: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flagged: Option<bool>,
}

impl<'a> ScoredRespondent<'a> {
    pub fn new(index: usize, id: &'a str, record: &ScoreRecord, diagnostics: bool) -> Self {
        Self {
            index,
            id,
            score: record.score,
            valid_pairs: diagnostics.then_some(record.valid_pairs),
            flagged: None,
        }
    }

    pub fn with_flag(mut self, flagged: bool) -> Self {
        self.flagged = Some(flagged);
        self
    }

    fn is_flagged(&self) -> bool {
        self.flagged.unwrap_or(false)
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with 4 decimals, "NA" when it could not be computed
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{:.4}", s),
        None => "NA".to_string(),
    }
}

/// Format respondents as an aligned table with columns: Index, Id, Score,
/// and Pairs when diagnostics are present. Flagged rows are marked with '!'.
pub fn format_table(rows: &[ScoredRespondent], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No respondents to report.".to_string();
    }

    let id_width = rows
        .iter()
        .map(|r| r.id.chars().count())
        .max()
        .unwrap_or(0)
        .max(2);
    let index_width = rows.len().to_string().len() + 1;

    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        let index = format!("{}.", row.index);
        let score = format_score(row.score);
        let mut line = format!(
            "{:>iw$}  {:<idw$}  {:>7}",
            index,
            row.id,
            score,
            iw = index_width,
            idw = id_width
        );
        if let Some(pairs) = row.valid_pairs {
            line.push_str(&format!("  {:>3}", pairs));
        }
        if row.is_flagged() {
            line.push_str("  !");
        }

        if use_colors {
            let styled = if row.is_flagged() {
                line.red().bold().to_string()
            } else if row.score.is_none() {
                line.dimmed().to_string()
            } else {
                line
            };
            lines.push(styled);
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Format respondents as TSV with a header line.
pub fn format_tsv(rows: &[ScoredRespondent]) -> String {
    let diagnostics = rows.iter().any(|r| r.valid_pairs.is_some());
    let flags = rows.iter().any(|r| r.flagged.is_some());

    let mut header = vec!["id", "score"];
    if diagnostics {
        header.push("valid_pairs");
    }
    if flags {
        header.push("flagged");
    }

    let mut lines = vec![header.join("\t")];
    for row in rows {
        let mut fields = vec![row.id.to_string(), format_score(row.score)];
        if diagnostics {
            fields.push(row.valid_pairs.map(|p| p.to_string()).unwrap_or_default());
        }
        if flags {
            fields.push(row.is_flagged().to_string());
        }
        lines.push(fields.join("\t"));
    }
    lines.join("\n")
}

/// Format respondents as a pretty JSON array. Missing scores become null.
pub fn format_json(rows: &[ScoredRespondent]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}
