// ARChide - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every fatal failure names the file it concerns; row-level move failures
// are not errors here, they are recorded as events in the run report.

use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all fatal ARChide outcomes.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum ArchideError {
    /// The system mapping file could not be loaded.
    Config(ConfigError),

    /// The catalog could not be loaded.
    Catalog(CatalogError),

    /// Hidden entries reference systems absent from the mapping.
    Validation(ValidationError),

    /// Writing the run report failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ArchideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Catalog(e) => write!(f, "{e}"),
            Self::Validation(e) => write!(f, "{e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ArchideError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Catalog(e) => Some(e),
            Self::Validation(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to loading the system mapping file.
#[derive(Debug)]
pub enum ConfigError {
    /// The mapping file does not exist.
    NotFound { path: PathBuf },

    /// A non-empty line could not be split into a non-empty key and value.
    MalformedLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    /// The mapping file is not valid UTF-8.
    InvalidEncoding {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    /// I/O error reading the mapping file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "{} not found.", path.display()),
            Self::MalformedLine {
                path,
                line_number,
                line,
            } => write!(
                f,
                "'{}' line {line_number}: expected 'system = folder', got '{line}'",
                path.display()
            ),
            Self::InvalidEncoding { path, source } => {
                write!(f, "'{}': invalid UTF-8 encoding: {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidEncoding { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for ArchideError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

/// Errors related to reading the catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// The catalog file does not exist.
    NotFound { path: PathBuf },

    /// The header row lacks a required column.
    MissingColumn { path: PathBuf, column: &'static str },

    /// A data row lacks a required field or cannot be decoded.
    MalformedRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// The CSV reader failed outside of a specific row (I/O, header decoding).
    Csv { path: PathBuf, source: csv::Error },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "{} not found.", path.display()),
            Self::MissingColumn { path, column } => write!(
                f,
                "'{}': header has no '{column}' column",
                path.display()
            ),
            Self::MalformedRow { path, line, reason } => {
                write!(f, "'{}' line {line}: {reason}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "Catalog read error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CatalogError> for ArchideError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Errors produced by the pre-flight validation pass.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Hidden entries name systems the mapping does not know.
    /// Each system appears once, in sorted order.
    UnmappedSystems { systems: BTreeSet<String> },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmappedSystems { systems } => {
                write!(f, "Missing systems in config file:")?;
                for system in systems {
                    write!(f, "\n - {system}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ArchideError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing the run report to a file.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The export path has no `.csv` or `.json` extension.
    UnsupportedFormat { path: PathBuf },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::UnsupportedFormat { path } => write!(
                f,
                "Cannot export to '{}': use a .csv or .json extension",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::UnsupportedFormat { .. } => None,
        }
    }
}

impl From<ExportError> for ArchideError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for ARChide results.
pub type Result<T> = std::result::Result<T, ArchideError>;
