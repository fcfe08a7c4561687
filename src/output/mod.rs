pub mod formatter;

pub use formatter::{
    format_json, format_score, format_table, format_tsv, should_use_colors, ScoredRespondent,
};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

/// Write rendered output to a file atomically
///
/// The file is either fully replaced or left untouched.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    file.write_all(contents.as_bytes())
        .context("Failed to write results")?;
    if !contents.ends_with('\n') {
        file.write_all(b"\n").context("Failed to write results")?;
    }

    file.commit()
        .with_context(|| format!("Failed to save results to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_write_output() {
        let temp_path = env::temp_dir().join("evenodd_test_output.tsv");
        let _ = std::fs::remove_file(&temp_path);

        write_output(&temp_path, "id\tscore\nr1\t0.5000").unwrap();
        let written = std::fs::read_to_string(&temp_path).unwrap();
        assert_eq!(written, "id\tscore\nr1\t0.5000\n");

        let _ = std::fs::remove_file(&temp_path);
    }
}
