// ARChide - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// =============================================================================
// System mapping
// =============================================================================

/// Mapping from a system's display name (as it appears in the catalog) to the
/// folder holding its game files.
///
/// Built once from the config file and immutable afterwards. Backed by a
/// `BTreeMap` so listings come out sorted by system name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemMapping {
    systems: BTreeMap<String, String>,
}

impl SystemMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a system, returning the folder it previously mapped to.
    pub fn insert(&mut self, system: String, folder: String) -> Option<String> {
        self.systems.insert(system, folder)
    }

    /// Folder configured for `system`, if any.
    pub fn folder(&self, system: &str) -> Option<&str> {
        self.systems.get(system).map(String::as_str)
    }

    pub fn contains(&self, system: &str) -> bool {
        self.systems.contains_key(system)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Iterate `(system, folder)` pairs in system-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.systems
            .iter()
            .map(|(system, folder)| (system.as_str(), folder.as_str()))
    }
}

impl<S: Into<String>, F: Into<String>> FromIterator<(S, F)> for SystemMapping {
    fn from_iter<I: IntoIterator<Item = (S, F)>>(iter: I) -> Self {
        Self {
            systems: iter
                .into_iter()
                .map(|(s, f)| (s.into(), f.into()))
                .collect(),
        }
    }
}

// =============================================================================
// Catalog entry
// =============================================================================

/// One row of the catalog. Columns other than these three are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "System")]
    pub system: String,

    #[serde(rename = "Filename")]
    pub filename: String,

    /// Raw flag text; see [`CatalogEntry::is_hidden`].
    #[serde(rename = "Hidden")]
    pub hidden: String,

    /// 1-based line in the catalog file where this row starts.
    #[serde(skip)]
    pub line: u64,
}

impl CatalogEntry {
    /// True when the hidden flag equals `HIDDEN`, ignoring case.
    /// Any other value, including an empty one, means visible.
    pub fn is_hidden(&self) -> bool {
        self.hidden.eq_ignore_ascii_case(constants::HIDDEN_FLAG)
    }
}

// =============================================================================
// Run events and report
// =============================================================================

/// Outcome of processing one hidden catalog entry in the action pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunEvent {
    /// The file was relocated into the quarantine tree.
    Moved {
        system: String,
        source: PathBuf,
        destination: PathBuf,
    },

    /// The source file does not exist. Non-fatal.
    SourceMissing { system: String, source: PathBuf },

    /// Creating the quarantine folder or renaming the file failed. Non-fatal.
    MoveFailed {
        system: String,
        source: PathBuf,
        destination: PathBuf,
        reason: String,
    },

    /// The filename is empty or would leave the system folder (absolute,
    /// drive-prefixed or containing `..`). Non-fatal; nothing is touched.
    InvalidFilename { system: String, filename: String },

    /// The entry's system has no configured folder. Validation rejects this
    /// before the action pass, so it only appears if that invariant breaks.
    SystemUnmapped { system: String, filename: String },
}

impl RunEvent {
    /// True for every outcome other than a successful move.
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Moved { .. })
    }

    /// Stable label used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Moved { .. } => "moved",
            Self::SourceMissing { .. } => "source_missing",
            Self::MoveFailed { .. } => "move_failed",
            Self::InvalidFilename { .. } => "invalid_filename",
            Self::SystemUnmapped { .. } => "system_unmapped",
        }
    }

    pub fn system(&self) -> &str {
        match self {
            Self::Moved { system, .. }
            | Self::SourceMissing { system, .. }
            | Self::MoveFailed { system, .. }
            | Self::InvalidFilename { system, .. }
            | Self::SystemUnmapped { system, .. } => system,
        }
    }
}

/// Structured result of a completed run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// `(system, folder)` pairs that were loaded, sorted by system.
    pub systems: Vec<(String, String)>,

    /// Non-fatal notes raised while loading the mapping (duplicate keys).
    pub mapping_warnings: Vec<String>,

    /// Every hidden-entry outcome, in catalog order.
    pub events: Vec<RunEvent>,

    /// Catalog rows read.
    pub total_rows: usize,

    /// Rows whose hidden flag did not match and were skipped.
    pub not_hidden: usize,
}

impl RunReport {
    pub fn moved(&self) -> usize {
        self.events.iter().filter(|e| !e.is_error()).count()
    }

    pub fn errors(&self) -> usize {
        self.events.iter().filter(|e| e.is_error()).count()
    }

    pub fn source_missing(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RunEvent::SourceMissing { .. }))
            .count()
    }

    pub fn move_failed(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RunEvent::MoveFailed { .. }))
            .count()
    }
}
