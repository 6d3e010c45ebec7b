//! Unit discovery and artifact label sanitization.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BatchError, Result};
use crate::models::BatchConfig;

/// Characters that may not appear in an artifact file name.
const INVALID_LABEL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Label used when sanitization leaves nothing behind.
const FALLBACK_LABEL: &str = "unidad";

/// A direct child of the batch root: a folder or an archive file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingUnit {
    pub path: PathBuf,
    /// File or directory name as listed under the root.
    pub name: String,
    pub is_archive: bool,
}

/// List the processing units directly under `root`.
///
/// Directories come first, then archive files, each group sorted by name.
/// Other files, and the bundle left by a previous run, are ignored.
pub fn discover_units(root: &Path, config: &BatchConfig) -> Result<Vec<ProcessingUnit>> {
    if !root.is_dir() {
        return Err(BatchError::InvalidRoot(root.to_path_buf()).into());
    }

    let mut folders = Vec::new();
    let mut archives = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        // Follows symlinks, so a linked folder is a unit too
        if path.is_dir() {
            folders.push(ProcessingUnit {
                path,
                name,
                is_archive: false,
            });
        } else if name == config.bundle_name {
            debug!("Ignoring previous bundle {}", path.display());
        } else if config.is_archive_name(&name) {
            archives.push(ProcessingUnit {
                path,
                name,
                is_archive: true,
            });
        }
    }

    folders.sort_by(|a, b| a.name.cmp(&b.name));
    archives.sort_by(|a, b| a.name.cmp(&b.name));
    folders.extend(archives);

    debug!("Discovered {} units under {}", folders.len(), root.display());
    Ok(folders)
}

/// Turn a unit name into a file-name-safe artifact label.
///
/// Strips a trailing archive extension, replaces every invalid file name
/// character with `_`, and truncates to `max_length` characters.
pub fn sanitize_label(name: &str, archive_extensions: &[String], max_length: usize) -> String {
    let stem = archive_extensions
        .iter()
        .find_map(|ext| {
            let suffix = format!(".{}", ext);
            let cut = name.len().checked_sub(suffix.len())?;
            (name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(&suffix))
                .then(|| &name[..cut])
        })
        .unwrap_or(name);

    let label: String = stem
        .chars()
        .map(|c| if INVALID_LABEL_CHARS.contains(&c) || c.is_control() { '_' } else { c })
        .take(max_length)
        .collect();

    let label = label.trim().to_string();
    if label.is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        label
    }
}

/// Sanitized labels for `units`, in order, with collisions disambiguated.
///
/// The first unit keeps its label; later units with the same label
/// (compared case-insensitively) get `_2`, `_3`, ... appended, with the
/// base shortened so the result still fits in `max_label_length`.
pub fn assign_labels(units: &[ProcessingUnit], config: &BatchConfig) -> Vec<String> {
    let mut taken = HashSet::new();

    units
        .iter()
        .map(|unit| {
            let base = sanitize_label(&unit.name, &config.archive_extensions, config.max_label_length);
            let mut label = base.clone();
            let mut n = 2;
            while !taken.insert(label.to_lowercase()) {
                label = with_suffix(&base, n, config.max_label_length);
                n += 1;
            }
            label
        })
        .collect()
}

fn with_suffix(base: &str, n: usize, max_length: usize) -> String {
    let suffix = format!("_{}", n);
    let keep = max_length.saturating_sub(suffix.chars().count());
    let head: String = base.chars().take(keep).collect();
    format!("{}{}", head.trim_end(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn zip_only() -> Vec<String> {
        vec!["zip".to_string()]
    }

    #[test]
    fn test_sanitize_replaces_invalid_chars() {
        assert_eq!(sanitize_label("My:Folder*2024", &zip_only(), 50), "My_Folder_2024");
        assert_eq!(sanitize_label(r#"a<b>c"d/e\f|g?h"#, &zip_only(), 50), "a_b_c_d_e_f_g_h");
    }

    #[test]
    fn test_sanitize_strips_archive_extension() {
        assert_eq!(sanitize_label("B.zip", &zip_only(), 50), "B");
        assert_eq!(sanitize_label("Lote.ZIP", &zip_only(), 50), "Lote");
        assert_eq!(sanitize_label("notes.txt", &zip_only(), 50), "notes.txt");
    }

    #[test]
    fn test_sanitize_truncates_by_chars() {
        let long = "ñ".repeat(60);
        let label = sanitize_label(&long, &zip_only(), 50);
        assert_eq!(label.chars().count(), 50);
    }

    #[test]
    fn test_sanitize_never_empty() {
        assert_eq!(sanitize_label(".zip", &zip_only(), 50), FALLBACK_LABEL);
    }

    #[test]
    fn test_assign_labels_disambiguates() {
        let unit = |name: &str, is_archive| ProcessingUnit {
            path: PathBuf::from(name),
            name: name.to_string(),
            is_archive,
        };
        let units = vec![unit("A", false), unit("a:", false), unit("A.zip", true), unit("a_", false)];

        let labels = assign_labels(&units, &BatchConfig::default());
        assert_eq!(labels, vec!["A", "a_", "A_2", "a__2"]);
    }

    #[test]
    fn test_collision_suffix_respects_max_length() {
        let unit = |name: &str| ProcessingUnit {
            path: PathBuf::from(name),
            name: name.to_string(),
            is_archive: false,
        };
        let config = BatchConfig {
            max_label_length: 5,
            ..BatchConfig::default()
        };
        let units = vec![unit("ABCDEFG"), unit("ABCDEXY"), unit("abcdeZZ")];

        let labels = assign_labels(&units, &config);
        assert_eq!(labels, vec!["ABCDE", "ABC_2", "abc_3"]);
        assert!(labels.iter().all(|l| l.chars().count() <= 5));
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_follows_symlinked_folders() {
        let outside = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), root.path().join("linked")).unwrap();

        let units = discover_units(root.path(), &BatchConfig::default()).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].name, "linked");
        assert!(!units[0].is_archive);
    }

    #[test]
    fn test_discover_orders_and_filters() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("Zeta")).unwrap();
        fs::create_dir(root.path().join("Alpha")).unwrap();
        fs::write(root.path().join("lote.zip"), b"").unwrap();
        fs::write(root.path().join("notes.txt"), b"").unwrap();
        fs::write(root.path().join("resultados_extraccion.zip"), b"").unwrap();

        let units = discover_units(root.path(), &BatchConfig::default()).unwrap();
        let names: Vec<_> = units.iter().map(|u| (u.name.as_str(), u.is_archive)).collect();

        assert_eq!(names, vec![("Alpha", false), ("Zeta", false), ("lote.zip", true)]);
    }

    #[test]
    fn test_discover_rejects_missing_root() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("nope");

        let err = discover_units(&missing, &BatchConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::IdScanError::Batch(BatchError::InvalidRoot(_))
        ));
    }
}
