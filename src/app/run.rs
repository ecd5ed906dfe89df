// ARChide - app/run.rs
//
// Run orchestration: load mapping, load catalog, validate, relocate.
//
// State machine: VALIDATING -> (abort | ACTING) -> DONE.
//   - Every fatal error (missing inputs, malformed input, unmapped systems)
//     is returned before the first filesystem mutation.
//   - In the action pass every per-row failure is non-fatal; the run
//     continues with the next row and never rolls back earlier moves.
//
// Progress is reported through a caller-supplied callback so the console
// layer can print as the run proceeds; the same events are collected in
// the returned `RunReport`.

use crate::core::catalog;
use crate::core::mapping;
use crate::core::model::{CatalogEntry, RunEvent, RunReport, SystemMapping};
use crate::core::relocate::{self, PlannedMove};
use crate::core::validate;
use crate::platform::fs::FileOps;
use crate::util::constants;
use crate::util::error::{ArchideError, CatalogError, ConfigError, Result};
use std::io;
use std::path::{Path, PathBuf};

// =============================================================================
// Configuration
// =============================================================================

/// Inputs of one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Catalog exported from the front-end.
    pub catalog_path: PathBuf,

    /// `system = folder` mapping file.
    pub config_path: PathBuf,

    /// Root of the quarantine tree.
    pub quarantine_root: PathBuf,

    /// Directory that relative paths above, and relative system folders in
    /// the mapping, are resolved against.
    pub base_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(constants::DEFAULT_CATALOG_FILE),
            config_path: PathBuf::from(constants::DEFAULT_CONFIG_FILE),
            quarantine_root: PathBuf::from(constants::DEFAULT_QUARANTINE_DIR),
            base_dir: PathBuf::from("."),
        }
    }
}

impl RunConfig {
    /// Default file names resolved against `base_dir`.
    pub fn in_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Default::default()
        }
    }
}

// =============================================================================
// Progress messages
// =============================================================================

/// Messages emitted while a run proceeds.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// The mapping file was parsed.
    MappingLoaded {
        mapping: &'a SystemMapping,
        warnings: &'a [String],
    },

    /// The catalog was read and validated; the action pass is about to start.
    ActionStarted {
        quarantine_root: &'a Path,
        hidden: usize,
    },

    /// One hidden entry was processed.
    Event(&'a RunEvent),
}

// =============================================================================
// Input loading
// =============================================================================

/// Load and parse the mapping file at `path`.
pub fn load_mapping(
    path: &Path,
) -> std::result::Result<(SystemMapping, Vec<String>), ConfigError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let content = String::from_utf8(bytes).map_err(|e| ConfigError::InvalidEncoding {
        path: path.to_path_buf(),
        source: e,
    })?;
    mapping::parse_mapping(&content, path)
}

/// Load every row of the catalog at `path`.
pub fn load_catalog(path: &Path) -> std::result::Result<Vec<CatalogEntry>, CatalogError> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CatalogError::NotFound {
            path: path.to_path_buf(),
        },
        _ => CatalogError::Csv {
            path: path.to_path_buf(),
            source: csv::Error::from(e),
        },
    })?;
    catalog::read_catalog(io::BufReader::new(file), path)
}

// =============================================================================
// Run
// =============================================================================

/// Execute one run.
///
/// # Fatal errors
/// Returns `Err` for a missing or malformed mapping file, a missing or
/// malformed catalog, hidden entries naming unmapped systems, or failure to
/// create the quarantine root. In every case except the last nothing on disk
/// has changed.
///
/// # Non-fatal errors
/// Per-row failures become `RunEvent`s in the returned report.
pub fn run<F>(config: &RunConfig, file_ops: &dyn FileOps, mut on_progress: F) -> Result<RunReport>
where
    F: FnMut(RunProgress<'_>),
{
    let base = config.base_dir.as_path();

    let config_path = relocate::anchor(base, &config.config_path);
    let (mapping, mapping_warnings) = load_mapping(&config_path)?;
    tracing::info!(
        path = %config_path.display(),
        systems = mapping.len(),
        "Loaded system mapping"
    );
    on_progress(RunProgress::MappingLoaded {
        mapping: &mapping,
        warnings: &mapping_warnings,
    });

    let catalog_path = relocate::anchor(base, &config.catalog_path);
    let entries = load_catalog(&catalog_path)?;
    tracing::info!(path = %catalog_path.display(), rows = entries.len(), "Loaded catalog");

    validate::validate_entries(&entries, &mapping)?;

    let quarantine_dir = relocate::anchor(base, &config.quarantine_root);
    file_ops
        .ensure_dir(&quarantine_dir)
        .map_err(|e| ArchideError::Io {
            path: quarantine_dir.clone(),
            operation: "create quarantine folder",
            source: e,
        })?;

    let hidden = entries.iter().filter(|e| e.is_hidden()).count();
    on_progress(RunProgress::ActionStarted {
        quarantine_root: &config.quarantine_root,
        hidden,
    });

    let mut report = RunReport {
        systems: mapping
            .iter()
            .map(|(s, f)| (s.to_string(), f.to_string()))
            .collect(),
        mapping_warnings,
        total_rows: entries.len(),
        ..Default::default()
    };

    for entry in &entries {
        if !entry.is_hidden() {
            report.not_hidden += 1;
            continue;
        }

        let event = if !relocate::is_safe_filename(&entry.filename) {
            tracing::warn!(
                filename = %entry.filename,
                line = entry.line,
                "Filename leaves its system folder"
            );
            RunEvent::InvalidFilename {
                system: entry.system.clone(),
                filename: entry.filename.clone(),
            }
        } else if let Some(planned) =
            relocate::plan_move(entry, &mapping, &config.quarantine_root)
        {
            relocate_one(&planned, base, file_ops)
        } else {
            tracing::warn!(
                system = %entry.system,
                line = entry.line,
                "System not found in config after validation"
            );
            RunEvent::SystemUnmapped {
                system: entry.system.clone(),
                filename: entry.filename.clone(),
            }
        };

        on_progress(RunProgress::Event(&event));
        report.events.push(event);
    }

    tracing::info!(
        moved = report.moved(),
        errors = report.errors(),
        skipped = report.not_hidden,
        rows = report.total_rows,
        "Run complete"
    );

    Ok(report)
}

/// Ensure the destination folder exists, then rename the file into it.
///
/// An occupied destination is reported, never overwritten. When the source
/// is gone as well (a repeated run), the row reports the missing source.
fn relocate_one(planned: &PlannedMove, base: &Path, file_ops: &dyn FileOps) -> RunEvent {
    let source = relocate::anchor(base, &planned.source);
    let destination = relocate::anchor(base, &planned.destination);

    let failed = |reason: String| RunEvent::MoveFailed {
        system: planned.system.clone(),
        source: planned.source.clone(),
        destination: planned.destination.clone(),
        reason,
    };

    if let Some(dir) = destination.parent() {
        if let Err(e) = file_ops.ensure_dir(dir) {
            tracing::warn!(dir = %dir.display(), error = %e, "Failed to create quarantine folder");
            return failed(format!("cannot create '{}': {e}", dir.display()));
        }
    }

    if file_ops.exists(&destination) {
        if !file_ops.exists(&source) {
            tracing::debug!(path = %source.display(), "Source file not found");
            return RunEvent::SourceMissing {
                system: planned.system.clone(),
                source: planned.source.clone(),
            };
        }
        tracing::warn!(path = %destination.display(), "Destination already exists");
        return failed(format!(
            "destination '{}' already exists",
            planned.destination.display()
        ));
    }

    match file_ops.rename(&source, &destination) {
        Ok(()) => {
            tracing::debug!(
                from = %source.display(),
                to = %destination.display(),
                "Moved"
            );
            RunEvent::Moved {
                system: planned.system.clone(),
                source: planned.source.clone(),
                destination: planned.destination.clone(),
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %source.display(), "Source file not found");
            RunEvent::SourceMissing {
                system: planned.system.clone(),
                source: planned.source.clone(),
            }
        }
        Err(e) => {
            tracing::warn!(path = %source.display(), error = %e, "Move failed");
            failed(e.to_string())
        }
    }
}
