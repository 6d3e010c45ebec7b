//! Batch orchestration over folders and archives.
//!
//! A batch root's direct children are the processing units: every
//! directory and every archive file. Each unit's documents are classified
//! and extracted, the unit's records are exported to one artifact named
//! after the unit, and all artifacts are bundled into a single ZIP under
//! the root. The collaborators doing file I/O sit behind the traits in this
//! module so the orchestrator can be driven with fakes.

mod archive;
mod bundle;
mod discovery;
mod export;
mod finder;
mod orchestrator;

pub use archive::{UnpackedArchive, ZipUnpacker};
pub use bundle::ZipBundler;
pub use discovery::{assign_labels, discover_units, sanitize_label, ProcessingUnit};
pub use export::{exporter_for, write_csv, CsvExporter, JsonExporter, CSV_HEADERS};
pub use finder::ExtensionFinder;
pub use orchestrator::{BatchOrchestrator, BatchPhase, BatchReport, UnitOutcome, UnitReport};

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::ExtractionRecord;

/// Receives progress and status notifications during a batch run.
///
/// Every method defaults to doing nothing, so observers implement only what
/// they need. Progress values are percentages in `0.0..=100.0` and never
/// decrease within one run.
pub trait ProgressObserver {
    fn on_progress(&self, _percent: f64) {}

    fn on_status(&self, _message: &str) {}

    fn on_phase(&self, _phase: BatchPhase) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

/// Unpacks an archive unit into a private working directory.
pub trait ArchiveUnpacker: Send + Sync {
    fn unpack(&self, archive: &Path) -> Result<UnpackedArchive>;
}

/// Lists the document files below a directory.
pub trait DocumentFinder: Send + Sync {
    fn find_documents(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

/// Writes one unit's records to a single artifact file.
pub trait ArtifactExporter: Send + Sync {
    /// File extension of the artifacts, without the dot.
    fn extension(&self) -> &'static str;

    /// Write `records` to `<output_dir>/<label>.<extension>` and return the path.
    fn export(&self, records: &[ExtractionRecord], label: &str, output_dir: &Path) -> Result<PathBuf>;
}

/// Packs artifacts into one compressed container.
pub trait Bundler: Send + Sync {
    fn bundle(&self, artifacts: &[PathBuf], destination: &Path) -> Result<PathBuf>;
}
