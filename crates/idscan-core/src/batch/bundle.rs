//! Final ZIP bundle of the per-unit artifacts.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::Bundler;
use crate::error::{IdScanError, Result};

/// Writes artifacts into a deflate-compressed ZIP, one entry per file name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipBundler;

impl Bundler for ZipBundler {
    /// The bundle is assembled in a temporary file beside `destination` and
    /// moved into place only once complete, so a failed run leaves nothing
    /// at `destination`.
    fn bundle(&self, artifacts: &[PathBuf], destination: &Path) -> Result<PathBuf> {
        let parent = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let staged = NamedTempFile::new_in(parent)?;

        write_entries(artifacts, staged.reopen()?)?;

        staged.persist(destination).map_err(|e| IdScanError::Io(e.error))?;
        info!("Bundled {} artifacts into {}", artifacts.len(), destination.display());
        Ok(destination.to_path_buf())
    }
}

fn write_entries(artifacts: &[PathBuf], file: File) -> Result<()> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(file);

    for artifact in artifacts {
        let name = artifact
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                IdScanError::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("artifact path has no file name: {}", artifact.display()),
                ))
            })?;

        writer.start_file(name, options)?;
        io::copy(&mut File::open(artifact)?, &mut writer)?;
    }

    writer.finish()?;
    Ok(())
}
