//! Batch driver: discovery, per-unit extraction, export and bundling.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::TempDir;
use tracing::{debug, error, info, warn};

use super::discovery::{assign_labels, discover_units, ProcessingUnit};
use super::{
    exporter_for, ArchiveUnpacker, ArtifactExporter, Bundler, DocumentFinder, ExtensionFinder,
    ProgressObserver, ZipBundler, ZipUnpacker,
};
use crate::document::FieldExtractor;
use crate::error::{BatchError, IdScanError, Result};
use crate::models::{BatchConfig, ExtractionRecord, IdScanConfig};
use crate::pdf::{panic_message, FileTextSource, TextSource};

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPhase {
    Idle,
    Discovering,
    /// Processing unit `index` (1-based) of `total`.
    Processing { index: usize, total: usize },
    Aggregating,
    Done,
    Failed,
}

/// What happened to one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UnitOutcome {
    /// Records were exported to the bundle entry named `entry`.
    Exported { entry: String, records: usize },
    /// The unit held no documents or no document produced a record.
    Skipped { reason: String },
    /// The unit could not be processed (unpack, read or export failure).
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitReport {
    /// Unit name as listed under the batch root.
    pub name: String,
    /// Sanitized artifact label.
    pub label: String,
    pub outcome: UnitOutcome,
}

/// Result of one batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    /// Final bundle, or `None` when no unit produced records.
    pub bundle: Option<PathBuf>,
    pub total_units: usize,
    pub units: Vec<UnitReport>,
}

impl BatchReport {
    pub fn exported(&self) -> usize {
        self.count(|o| matches!(o, UnitOutcome::Exported { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, UnitOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, UnitOutcome::Failed { .. }))
    }

    /// Total records across exported units.
    pub fn records(&self) -> usize {
        self.units
            .iter()
            .map(|u| match u.outcome {
                UnitOutcome::Exported { records, .. } => records,
                _ => 0,
            })
            .sum()
    }

    fn count(&self, pred: impl Fn(&UnitOutcome) -> bool) -> usize {
        self.units.iter().filter(|u| pred(&u.outcome)).count()
    }
}

/// Mutable bookkeeping for exactly one `run` call.
struct RunState {
    phase: BatchPhase,
    current_progress: f64,
    total_items: usize,
    completed: usize,
}

impl RunState {
    fn new() -> Self {
        Self {
            phase: BatchPhase::Idle,
            current_progress: 0.0,
            total_items: 0,
            completed: 0,
        }
    }

    fn enter(&mut self, phase: BatchPhase, observer: &dyn ProgressObserver) {
        debug!("Batch phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        observer.on_phase(phase);
    }

    /// Count one unit as finished, whatever its outcome.
    fn advance(&mut self, observer: &dyn ProgressObserver) {
        self.completed += 1;
        self.current_progress = self.completed as f64 / self.total_items as f64 * 100.0;
        observer.on_progress(self.current_progress);
    }

    fn fail(&mut self, err: IdScanError, observer: &dyn ProgressObserver) -> IdScanError {
        error!("Batch failed: {}", err);
        observer.on_status(&format!("Batch failed: {}", err));
        self.enter(BatchPhase::Failed, observer);
        err
    }
}

/// Drives extraction over every unit under a batch root.
///
/// The orchestrator itself holds no per-run state: progress counters and
/// the staging directory are created inside [`run`](Self::run), so one
/// instance may serve several concurrent runs.
pub struct BatchOrchestrator {
    config: BatchConfig,
    extractor: FieldExtractor,
    text_source: Box<dyn TextSource>,
    unpacker: Box<dyn ArchiveUnpacker>,
    finder: Box<dyn DocumentFinder>,
    exporter: Box<dyn ArtifactExporter>,
    bundler: Box<dyn Bundler>,
}

impl BatchOrchestrator {
    /// Orchestrator with the file-backed collaborators.
    pub fn new(config: &IdScanConfig) -> Self {
        Self {
            config: config.batch.clone(),
            extractor: FieldExtractor::new(&config.extraction),
            text_source: Box::new(FileTextSource),
            unpacker: Box::new(ZipUnpacker::new(&config.batch)),
            finder: Box::new(ExtensionFinder::new(&config.batch)),
            exporter: exporter_for(config.batch.export_format),
            bundler: Box::new(ZipBundler),
        }
    }

    pub fn with_extractor(mut self, extractor: FieldExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_text_source(mut self, source: impl TextSource + 'static) -> Self {
        self.text_source = Box::new(source);
        self
    }

    pub fn with_unpacker(mut self, unpacker: impl ArchiveUnpacker + 'static) -> Self {
        self.unpacker = Box::new(unpacker);
        self
    }

    pub fn with_finder(mut self, finder: impl DocumentFinder + 'static) -> Self {
        self.finder = Box::new(finder);
        self
    }

    pub fn with_exporter(mut self, exporter: impl ArtifactExporter + 'static) -> Self {
        self.exporter = Box::new(exporter);
        self
    }

    pub fn with_bundler(mut self, bundler: impl Bundler + 'static) -> Self {
        self.bundler = Box::new(bundler);
        self
    }

    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    pub fn text_source(&self) -> &dyn TextSource {
        self.text_source.as_ref()
    }

    /// Run a batch over the direct children of `root`.
    ///
    /// Unit-level problems are reported through `observer` and the returned
    /// [`BatchReport`]; only an invalid root or a failure while bundling
    /// ends the run with `Err`.
    pub fn run(&self, root: &Path, observer: &dyn ProgressObserver) -> Result<BatchReport> {
        let mut state = RunState::new();

        state.enter(BatchPhase::Discovering, observer);
        let units = match discover_units(root, &self.config) {
            Ok(units) => units,
            Err(e) => return Err(state.fail(e, observer)),
        };
        state.total_items = units.len();
        info!("Found {} units under {}", state.total_items, root.display());

        if units.is_empty() {
            observer.on_status("No folders or archives to process");
            state.enter(BatchPhase::Done, observer);
            return Ok(BatchReport {
                bundle: None,
                total_units: 0,
                units: Vec::new(),
            });
        }

        let staging = match tempfile::Builder::new().prefix("idscan_").tempdir() {
            Ok(dir) => dir,
            Err(e) => return Err(state.fail(e.into(), observer)),
        };

        let labels = assign_labels(&units, &self.config);
        let mut reports = Vec::with_capacity(units.len());
        let mut artifacts = Vec::new();

        for (i, (unit, label)) in units.iter().zip(labels).enumerate() {
            let total = state.total_items;
            state.enter(BatchPhase::Processing { index: i + 1, total }, observer);
            observer.on_status(&format!("Processing {} ({}/{})", unit.name, i + 1, total));

            let outcome = match self.process_unit(unit, &label, staging.path()) {
                Ok((artifact, records)) => {
                    let entry = artifact
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    artifacts.push(artifact);
                    UnitOutcome::Exported { entry, records }
                }
                Err(IdScanError::Batch(
                    e @ (BatchError::NoDocuments(_) | BatchError::NoRecords(_)),
                )) => {
                    warn!("Skipping unit {}: {}", unit.name, e);
                    observer.on_status(&format!("Skipped {}: {}", unit.name, e));
                    UnitOutcome::Skipped {
                        reason: e.to_string(),
                    }
                }
                Err(e) => {
                    warn!("Unit {} failed: {}", unit.name, e);
                    observer.on_status(&format!("Failed {}: {}", unit.name, e));
                    UnitOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };

            reports.push(UnitReport {
                name: unit.name.clone(),
                label,
                outcome,
            });
            state.advance(observer);
        }

        state.enter(BatchPhase::Aggregating, observer);
        let bundle = if artifacts.is_empty() {
            info!("No unit produced records; no bundle written");
            observer.on_status("No results to bundle");
            None
        } else {
            let destination = root.join(&self.config.bundle_name);
            match self.bundler.bundle(&artifacts, &destination) {
                Ok(path) => {
                    info!("Results bundled into {}", path.display());
                    observer.on_status(&format!("Results bundled into {}", path.display()));
                    Some(path)
                }
                Err(e) => {
                    let err = BatchError::Aggregation(e.to_string()).into();
                    return Err(state.fail(err, observer));
                }
            }
        };

        remove_staging(staging);
        state.enter(BatchPhase::Done, observer);

        Ok(BatchReport {
            bundle,
            total_units: state.total_items,
            units: reports,
        })
    }

    /// Extract every document reachable from `input`: a single document,
    /// a directory (searched recursively) or an archive.
    pub fn process_input(&self, input: &Path) -> Result<Vec<ExtractionRecord>> {
        self.with_documents(input, |documents| self.extract_documents(documents))
    }

    /// Resolve `input` to document paths and hand them to `f`.
    ///
    /// Archives are unpacked for the duration of the call and removed
    /// afterwards.
    pub fn with_documents<T>(&self, input: &Path, f: impl FnOnce(&[PathBuf]) -> T) -> Result<T> {
        if input.is_dir() {
            let documents = self.finder.find_documents(input)?;
            return Ok(f(&documents));
        }
        if !input.is_file() {
            return Err(IdScanError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("input not found: {}", input.display()),
            )));
        }

        let name = input.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if self.config.is_archive_name(&name) {
            let unpacked = self.unpacker.unpack(input)?;
            let documents = self.finder.find_documents(unpacked.path());
            let result = documents.map(|docs| f(&docs));
            unpacked.cleanup();
            result
        } else {
            Ok(f(&[input.to_path_buf()]))
        }
    }

    /// Records for every document that yields one, in input order.
    pub fn extract_documents(&self, documents: &[PathBuf]) -> Vec<ExtractionRecord> {
        documents
            .iter()
            .filter_map(|path| self.extract_file(path))
            .collect()
    }

    /// Read, classify and extract one document file.
    ///
    /// Read failures, including a panicking text source, are logged and
    /// yield `None` like any other document that produces no record.
    pub fn extract_file(&self, path: &Path) -> Option<ExtractionRecord> {
        let filename = path.file_name()?.to_string_lossy();

        let read = panic::catch_unwind(AssertUnwindSafe(|| self.text_source.read_text(path)));
        let text = match read {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Skipping {}: {}", path.display(), e);
                return None;
            }
            Err(payload) => {
                warn!("Skipping {}: text source panicked: {}", path.display(), panic_message(&*payload));
                return None;
            }
        };

        self.extractor.extract_document(&text, &filename)
    }

    fn process_unit(&self, unit: &ProcessingUnit, label: &str, staging: &Path) -> Result<(PathBuf, usize)> {
        info!("Processing unit {}", unit.name);

        let records = if unit.is_archive {
            let unpacked = self.unpacker.unpack(&unit.path)?;
            let records = self.unit_records(unpacked.path(), &unit.name);
            unpacked.cleanup();
            records?
        } else {
            self.unit_records(&unit.path, &unit.name)?
        };

        let artifact = self.exporter.export(&records, label, staging)?;
        info!("Unit {}: {} records", unit.name, records.len());
        Ok((artifact, records.len()))
    }

    fn unit_records(&self, dir: &Path, unit_name: &str) -> Result<Vec<ExtractionRecord>> {
        let documents = self.finder.find_documents(dir)?;
        if documents.is_empty() {
            return Err(BatchError::NoDocuments(unit_name.to_string()).into());
        }
        debug!("Unit {}: {} documents", unit_name, documents.len());

        let records = self.extract_documents(&documents);
        if records.is_empty() {
            return Err(BatchError::NoRecords(unit_name.to_string()).into());
        }
        Ok(records)
    }
}

impl Default for BatchOrchestrator {
    fn default() -> Self {
        Self::new(&IdScanConfig::default())
    }
}

fn remove_staging(staging: TempDir) {
    let path = staging.path().to_path_buf();
    if let Err(e) = staging.close() {
        error!("Failed to remove staging directory {}: {}", path.display(), e);
    }
}
