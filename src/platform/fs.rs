// ARChide - platform/fs.rs
//
// Filesystem abstraction trait.
// Enables testing the run orchestration without real filesystem access.

use std::io;
use std::path::Path;

/// Filesystem operations the action pass performs, in the order it uses them.
pub trait FileOps {
    /// Create `dir` and any missing parents. Succeeds if it already exists.
    fn ensure_dir(&self, dir: &Path) -> io::Result<()>;

    /// True if anything (file, folder, symlink) is present at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Rename `from` to `to`. Both paths are expected on the same volume.
    /// Callers check `exists(to)` first: on Unix a rename replaces its target.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// `FileOps` backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileOps for RealFs {
    fn ensure_dir(&self, dir: &Path) -> io::Result<()> {
        std::fs::create_dir_all(dir)
    }

    fn exists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }
}
