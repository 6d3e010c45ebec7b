//! ZIP unpacking into per-unit temporary directories.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tempfile::TempDir;
use tracing::{debug, error, warn};
use zip::ZipArchive;

use super::ArchiveUnpacker;
use crate::error::{BatchError, Result};
use crate::models::config::has_extension;
use crate::models::BatchConfig;

/// Working directory holding one unpacked archive.
///
/// Owned by exactly one unit. The directory is removed by [`cleanup`] or,
/// failing that, when the value is dropped.
///
/// [`cleanup`]: UnpackedArchive::cleanup
#[derive(Debug)]
pub struct UnpackedArchive {
    dir: TempDir,
}

impl UnpackedArchive {
    pub fn new(dir: TempDir) -> Self {
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the working directory. Failures are logged, not returned.
    pub fn cleanup(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!("Removed working directory {}", path.display()),
            Err(e) => error!("Failed to remove working directory {}: {}", path.display(), e),
        }
    }
}

/// Extracts the document members of `.zip` archives.
#[derive(Debug, Clone)]
pub struct ZipUnpacker {
    document_extensions: Vec<String>,
}

impl ZipUnpacker {
    pub fn new(config: &BatchConfig) -> Self {
        Self {
            document_extensions: config.document_extensions.clone(),
        }
    }
}

impl Default for ZipUnpacker {
    fn default() -> Self {
        Self::new(&BatchConfig::default())
    }
}

impl ArchiveUnpacker for ZipUnpacker {
    fn unpack(&self, archive_path: &Path) -> Result<UnpackedArchive> {
        let is_zip = archive_path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("zip"));
        if !is_zip {
            return Err(BatchError::UnsupportedArchive(archive_path.to_path_buf()).into());
        }

        let mut archive = ZipArchive::new(File::open(archive_path)?)?;
        let dir = tempfile::Builder::new().prefix("idscan_").tempdir()?;
        let mut extracted = 0;

        for i in 0..archive.len() {
            let mut member = archive.by_index(i)?;
            if member.is_dir() {
                continue;
            }

            // Reject names that would escape the working directory
            let Some(relative) = member.enclosed_name() else {
                warn!("Skipping unsafe archive member {}", member.name());
                continue;
            };
            if !has_extension(member.name(), &self.document_extensions) {
                continue;
            }

            let target = dir.path().join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&target)?;
            io::copy(&mut member, &mut out)?;
            extracted += 1;
        }

        debug!(
            "Unpacked {} documents from {} into {}",
            extracted,
            archive_path.display(),
            dir.path().display()
        );
        Ok(UnpackedArchive::new(dir))
    }
}
