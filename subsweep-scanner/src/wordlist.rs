use crate::error::{Result, ScanError};
use std::path::Path;
use tracing::debug;

/// Loads candidate labels from a newline-delimited wordlist.
///
/// Lines are trimmed and empty lines dropped; order is preserved.
/// Duplicate labels are kept — a repeated label only costs a wasted
/// probe, and the result sets collapse it later.
pub async fn load_wordlist(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ScanError::Wordlist {
            path: path.display().to_string(),
            source,
        })?;

    let labels: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    debug!("loaded {} candidate labels from {}", labels.len(), path.display());
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn loads_trimmed_non_empty_lines_in_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "www").unwrap();
        writeln!(file, "  mail  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file, "www").unwrap();

        let labels = load_wordlist(file.path()).await.unwrap();
        assert_eq!(labels, vec!["www", "mail", "www"]);
    }

    #[tokio::test]
    async fn unreadable_source_is_fatal() {
        let result = load_wordlist(Path::new("/nonexistent/words.txt")).await;
        assert!(matches!(result, Err(ScanError::Wordlist { .. })));
    }
}
