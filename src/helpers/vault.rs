use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::models::document::ActiveDocument;

/// Read one document from the vault. A missing file is the "no active
/// document" state, not an error; the caller decides how to render it.
pub fn read_document(path: impl AsRef<Path>) -> Result<Option<ActiveDocument>> {
    let path = path.as_ref();

    if !path.exists() {
        info!("No document at {}", path.display());
        return Ok(None);
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    info!("Read document '{}' ({} bytes)", name, content.len());

    Ok(Some(ActiveDocument { name, content }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_no_active_document() {
        let dir = TempDir::new().unwrap();
        let result = read_document(dir.path().join("2024-01-15.md")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn reads_name_and_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("2024-01-15.md");
        fs::write(&path, "| ⏱ | 1 | tag | note |\n").unwrap();

        let document = read_document(&path).unwrap().unwrap();
        assert_eq!(document.name, "2024-01-15.md");
        assert!(document.content.contains("⏱"));
    }

    #[test]
    fn empty_file_is_still_a_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("2024-01-15.md");
        fs::write(&path, "").unwrap();

        let document = read_document(&path).unwrap().unwrap();
        assert_eq!(document.content, "");
    }
}
