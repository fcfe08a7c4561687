use super::schema::Config;

/// Validate a loaded configuration.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref factors) = config.factors {
        if factors.is_empty() {
            errors.push("factors: must list at least one factor length".to_string());
        }
        for (i, &len) in factors.iter().enumerate() {
            if len == 0 {
                errors.push(format!("factors[{}]: length must be at least 1", i));
            }
        }
    }

    if let Some(threshold) = config.threshold {
        if !(-1.0..=1.0).contains(&threshold) {
            errors.push(format!("threshold: {} is outside [-1, 1]", threshold));
        }
    }

    if let Some(ref input) = config.input {
        if let Some(ref delimiter) = input.delimiter {
            if delimiter.len() != 1 || !delimiter.is_ascii() {
                errors.push(format!(
                    "input.delimiter: '{}' must be a single ASCII character",
                    delimiter
                ));
            }
        }
        if let Some(ref id_column) = input.id_column {
            if id_column.trim().is_empty() {
                errors.push("input.id_column: must not be blank".to_string());
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
