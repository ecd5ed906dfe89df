// ARChide - app/report.rs
//
// Human-readable console report: one line per event, a summary at the end.
// Writes to any Write trait object so the output can be tested.
// Also saves the structured report to a file for --export.

use crate::core::export::{self, ExportFormat};
use crate::core::model::{RunEvent, RunReport, SystemMapping};
use crate::util::constants;
use crate::util::error::{ArchideError, ExportError, ValidationError};
use std::io::{self, Write};
use std::path::Path;

/// Print the startup banner with the version right-aligned under it.
pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    for line in constants::BANNER {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{:>32}", constants::APP_VERSION)?;
    writeln!(out)
}

/// List the loaded systems and any duplicate-key warnings.
pub fn write_systems<W: Write>(
    out: &mut W,
    config_path: &Path,
    mapping: &SystemMapping,
    warnings: &[String],
) -> io::Result<()> {
    writeln!(out, "Systems found in {}:", config_path.display())?;
    writeln!(out)?;
    for (system, folder) in mapping.iter() {
        writeln!(out, "- {system} [{folder}]")?;
    }
    for warning in warnings {
        writeln!(out, "Warning: {warning}")?;
    }
    writeln!(out)
}

/// Header printed before the action pass starts, with the number of hidden
/// entries about to be processed.
pub fn write_action_header<W: Write>(
    out: &mut W,
    quarantine_root: &Path,
    hidden: usize,
) -> io::Result<()> {
    writeln!(
        out,
        "Moving {hidden} hidden games to {} folder:",
        quarantine_root.display()
    )?;
    writeln!(out)
}

/// One line describing an event.
pub fn format_event(event: &RunEvent) -> String {
    match event {
        RunEvent::Moved { source, .. } => format!("Moved: {}", source.display()),
        RunEvent::SourceMissing { source, .. } => {
            format!("File not found: {}", source.display())
        }
        RunEvent::MoveFailed { source, reason, .. } => {
            format!("Error moving file {}: {reason}", source.display())
        }
        RunEvent::InvalidFilename { system, filename } => {
            format!("Invalid filename for {system}: '{filename}'")
        }
        RunEvent::SystemUnmapped { system, .. } => {
            format!("System not found in config file: {system}")
        }
    }
}

/// Counted summary followed by the final confirmation line.
pub fn write_summary<W: Write>(
    out: &mut W,
    report: &RunReport,
    quarantine_root: &Path,
) -> io::Result<()> {
    writeln!(out)?;
    if report.moved() > 0 {
        writeln!(out, "{} games moved successfully (+)", report.moved())?;
    }
    if report.errors() > 0 {
        writeln!(out, "{} errors encountered (!)", report.errors())?;
    }
    if report.not_hidden > 0 {
        writeln!(
            out,
            "{} of {} entries not hidden, left in place",
            report.not_hidden, report.total_rows
        )?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Hidden games moved to {} folder. Check the results above.",
        quarantine_root.display()
    )
}

/// Describe a fatal error. Unmapped systems are listed one per line.
pub fn write_fatal<W: Write>(out: &mut W, error: &ArchideError) -> io::Result<()> {
    match error {
        ArchideError::Validation(ValidationError::UnmappedSystems { systems }) => {
            writeln!(out, "Error: Missing systems in config file:")?;
            for system in systems {
                writeln!(out, " - {system}")?;
            }
            Ok(())
        }
        other => writeln!(out, "Error: {other}"),
    }
}

/// Write `run_report` to `path` in the format its extension names.
///
/// Returns the number of events written. The extension is checked before the
/// file is created, so an unsupported path leaves nothing behind.
pub fn export_report(run_report: &RunReport, path: &Path) -> Result<usize, ExportError> {
    let format = ExportFormat::from_path(path)?;
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let writer = io::BufWriter::new(file);
    let count = match format {
        ExportFormat::Csv => export::export_csv(&run_report.events, writer, path)?,
        ExportFormat::Json => export::export_json(run_report, writer, path)?,
    };
    tracing::info!(path = %path.display(), events = count, "Report exported");
    Ok(count)
}
