// ARChide - core/relocate.rs
//
// Path resolution for the action pass. Pure functions, no filesystem access.
//
// The configured system folder is both where the game lives and the shape
// of its mirror under the quarantine root:
//   source      = <folder>/<filename>
//   destination = <quarantine>/<folder>/<filename>

use crate::core::model::{CatalogEntry, SystemMapping};
use std::path::{Component, Path, PathBuf};

/// Source and destination resolved for one hidden entry.
///
/// Paths are as the user wrote them (relative paths stay relative); the app
/// layer anchors them to its base directory before touching the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub system: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl PlannedMove {
    /// Folder that must exist before the rename.
    pub fn destination_dir(&self) -> Option<&Path> {
        self.destination.parent()
    }
}

/// True if `filename` names something inside its system folder: at least
/// one normal component and no root, drive prefix or `..`.
///
/// An absolute filename would replace both the source and destination under
/// `join`, and `..` would climb out of the per-system mirror.
pub fn is_safe_filename(filename: &str) -> bool {
    let mut has_name = false;
    for component in Path::new(filename).components() {
        match component {
            Component::Normal(_) => has_name = true,
            Component::CurDir => {}
            Component::Prefix(_) | Component::RootDir | Component::ParentDir => return false,
        }
    }
    has_name
}

/// Resolve the move for `entry`, or `None` if its system is not mapped.
/// The filename is expected to have passed [`is_safe_filename`].
pub fn plan_move(
    entry: &CatalogEntry,
    mapping: &SystemMapping,
    quarantine_root: &Path,
) -> Option<PlannedMove> {
    let folder = mapping.folder(&entry.system)?;
    Some(PlannedMove {
        system: entry.system.clone(),
        source: Path::new(folder).join(&entry.filename),
        destination: mirror_folder(quarantine_root, Path::new(folder)).join(&entry.filename),
    })
}

/// Mirror `folder` beneath `quarantine_root`.
///
/// Only normal components are kept: a root, drive prefix, `.` or `..` would
/// otherwise make `join` escape the quarantine tree (or replace it outright
/// for absolute folders, moving a file onto itself).
pub fn mirror_folder(quarantine_root: &Path, folder: &Path) -> PathBuf {
    let mut mirrored = quarantine_root.to_path_buf();
    for component in folder.components() {
        match component {
            Component::Normal(part) => mirrored.push(part),
            Component::Prefix(prefix) => {
                // Keep the drive letter so C:\roms and D:\roms stay apart.
                let drive: String = prefix
                    .as_os_str()
                    .to_string_lossy()
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .collect();
                if !drive.is_empty() {
                    mirrored.push(drive);
                }
            }
            Component::RootDir | Component::CurDir | Component::ParentDir => {}
        }
    }
    mirrored
}

/// Join `path` onto `base` unless it is already absolute.
pub fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
