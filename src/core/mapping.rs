// ARChide - core/mapping.rs
//
// Parser for the `system = folder` mapping file.
// Core layer: works on already-read text; the app layer owns file access.
//
// Format rules:
//   - One pair per line, split on the FIRST '=' so folders may contain '='.
//   - Key and value are trimmed and must both be non-empty.
//   - Blank (or whitespace-only) lines are skipped.
//   - A duplicate key overwrites the earlier one and yields a warning.

use crate::core::model::SystemMapping;
use crate::util::constants;
use crate::util::error::ConfigError;
use std::path::Path;

/// Parse mapping file `content`. `path` is only used for error context.
///
/// Returns the mapping plus non-fatal warnings (one per overwritten key).
/// Any non-blank line without a usable key and value is fatal.
pub fn parse_mapping(
    content: &str,
    path: &Path,
) -> Result<(SystemMapping, Vec<String>), ConfigError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut mapping = SystemMapping::new();
    let mut warnings = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let malformed = || ConfigError::MalformedLine {
            path: path.to_path_buf(),
            line_number,
            line: line.to_string(),
        };

        let (key, value) = line
            .split_once(constants::CONFIG_SEPARATOR)
            .ok_or_else(malformed)?;
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            return Err(malformed());
        }

        if let Some(previous) = mapping.insert(key.to_string(), value.to_string()) {
            let msg = format!(
                "'{}' line {line_number}: system '{key}' redefined ('{previous}' -> '{value}')",
                path.display()
            );
            tracing::warn!(system = %key, line = line_number, "Duplicate system in config");
            warnings.push(msg);
        }
    }

    tracing::debug!(
        path = %path.display(),
        systems = mapping.len(),
        "System mapping parsed"
    );

    Ok((mapping, warnings))
}
