use serde::{Deserialize, Serialize};

/// Main evenodd configuration.
///
/// Every field is optional; command-line flags take precedence.
///
/// Example YAML:
/// ```yaml
/// factors: [5, 5, 4]
/// diagnostics: true
/// threshold: 0.3
/// input:
///   delimiter: ";"
///   id_column: respondent
///   missing: ["", "NA", "-99"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Item counts of the consecutive factors, left to right
    #[serde(default)]
    pub factors: Option<Vec<usize>>,

    /// Include valid pair counts in the output
    #[serde(default)]
    pub diagnostics: Option<bool>,

    /// Respondents scoring below this value are flagged
    #[serde(default)]
    pub threshold: Option<f64>,

    /// How the response file is read
    #[serde(default)]
    pub input: Option<InputConfig>,
}

/// CSV reading options.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Field separator, a single ASCII character (default: ',')
    #[serde(default)]
    pub delimiter: Option<String>,

    /// First record holds column names (default: true)
    #[serde(default)]
    pub has_headers: Option<bool>,

    /// Column holding respondent identifiers; excluded from the items
    #[serde(default)]
    pub id_column: Option<String>,

    /// Cell values read as missing (default: "" and "NA")
    #[serde(default)]
    pub missing: Option<Vec<String>>,
}
