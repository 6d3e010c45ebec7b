//! Recursive document discovery inside a unit.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use super::DocumentFinder;
use crate::error::Result;
use crate::models::config::has_extension;
use crate::models::BatchConfig;

/// Finds files with one of the configured document extensions.
#[derive(Debug, Clone)]
pub struct ExtensionFinder {
    extensions: Vec<String>,
}

impl ExtensionFinder {
    pub fn new(config: &BatchConfig) -> Self {
        Self {
            extensions: config.document_extensions.clone(),
        }
    }
}

impl Default for ExtensionFinder {
    fn default() -> Self {
        Self::new(&BatchConfig::default())
    }
}

impl DocumentFinder for ExtensionFinder {
    /// Paths are returned sorted so a unit always processes in the same order.
    fn find_documents(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut documents = Vec::new();

        for entry in WalkDir::new(dir).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry under {}: {}", dir.display(), err);
                    continue;
                }
            };

            if entry.file_type().is_file()
                && has_extension(&entry.file_name().to_string_lossy(), &self.extensions)
            {
                documents.push(entry.into_path());
            }
        }

        documents.sort();
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_finds_nested_documents_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("b/deep")).unwrap();
        fs::write(dir.path().join("b/deep/z.pdf"), b"").unwrap();
        fs::write(dir.path().join("a.TXT"), b"").unwrap();
        fs::write(dir.path().join("image.png"), b"").unwrap();
        fs::write(dir.path().join("b/notes.docx"), b"").unwrap();

        let found = ExtensionFinder::default().find_documents(dir.path()).unwrap();
        let relative: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![PathBuf::from("a.TXT"), PathBuf::from("b/deep/z.pdf")]
        );
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(ExtensionFinder::default().find_documents(dir.path()).unwrap().is_empty());
    }
}
