// ARChide - core/validate.rs
//
// Pre-flight validation: every hidden entry must name a mapped system.
// One unmapped system anywhere aborts the run before any file is touched.

use crate::core::model::{CatalogEntry, SystemMapping};
use crate::util::error::ValidationError;
use std::collections::BTreeSet;

/// Check that all hidden entries reference systems present in `mapping`.
///
/// Visible entries are ignored, mapped or not. On failure the error carries
/// each distinct missing system exactly once.
pub fn validate_entries(
    entries: &[CatalogEntry],
    mapping: &SystemMapping,
) -> Result<(), ValidationError> {
    let systems: BTreeSet<String> = entries
        .iter()
        .filter(|e| e.is_hidden() && !mapping.contains(&e.system))
        .map(|e| e.system.clone())
        .collect();

    if systems.is_empty() {
        tracing::debug!(entries = entries.len(), "All hidden entries have a mapped system");
        Ok(())
    } else {
        tracing::warn!(missing = systems.len(), "Hidden entries reference unmapped systems");
        Err(ValidationError::UnmappedSystems { systems })
    }
}
