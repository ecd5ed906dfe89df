// ARChide - core/export.rs
//
// CSV and JSON export of the run report.
// Core layer: writes to any Write trait object.

use crate::core::model::{RunEvent, RunReport};
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export format, chosen from the target file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(ExportError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Export run events to CSV format.
///
/// Writes: kind, system, source, destination, detail
pub fn export_csv<W: Write>(
    events: &[RunEvent],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["kind", "system", "source", "destination", "detail"])
        .map_err(csv_err)?;

    for event in events {
        let (source, destination, detail) = match event {
            RunEvent::Moved {
                source,
                destination,
                ..
            } => (source.display().to_string(), destination.display().to_string(), String::new()),
            RunEvent::SourceMissing { source, .. } => {
                (source.display().to_string(), String::new(), String::new())
            }
            RunEvent::MoveFailed {
                source,
                destination,
                reason,
                ..
            } => (
                source.display().to_string(),
                destination.display().to_string(),
                reason.clone(),
            ),
            RunEvent::InvalidFilename { filename, .. } => (
                filename.clone(),
                String::new(),
                "filename leaves the system folder".to_string(),
            ),
            RunEvent::SystemUnmapped { filename, .. } => {
                (filename.clone(), String::new(), String::new())
            }
        };

        csv_writer
            .write_record([
                event.label(),
                event.system(),
                source.as_str(),
                destination.as_str(),
                detail.as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(events.len())
}

/// Export the full report (systems, warnings, events) as pretty JSON.
pub fn export_json<W: Write>(
    report: &RunReport,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(&mut writer, report).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(report.events.len())
}
