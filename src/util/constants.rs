// ARChide - util/constants.rs
//
// Single source of truth for all named constants and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "ARChide";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// ASCII banner printed at startup, one line per element.
pub const BANNER: [&str; 4] = [
    r"   _   ___  ___ _    _    _",
    r"  /_\ | _ \/ __| |_ (_)__| |___",
    r" / _ \|   / (__| ' \| / _` / -_)",
    r"/_/ \_\_|_\\___|_||_|_\__,_\___|",
];

// =============================================================================
// Default file locations
// =============================================================================

/// Catalog exported from the front-end, relative to the working directory.
pub const DEFAULT_CATALOG_FILE: &str = "games.csv";

/// System-to-folder mapping file.
pub const DEFAULT_CONFIG_FILE: &str = "config.txt";

/// Root of the quarantine tree that receives hidden games.
pub const DEFAULT_QUARANTINE_DIR: &str = "_hidden";

// =============================================================================
// Catalog format
// =============================================================================

/// Header name of the system column.
pub const COLUMN_SYSTEM: &str = "System";

/// Header name of the filename column.
pub const COLUMN_FILENAME: &str = "Filename";

/// Header name of the hidden-flag column.
pub const COLUMN_HIDDEN: &str = "Hidden";

/// Columns every catalog header must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = [COLUMN_SYSTEM, COLUMN_FILENAME, COLUMN_HIDDEN];

/// Value of the hidden column (compared case-insensitively) that marks an
/// entry for relocation.
pub const HIDDEN_FLAG: &str = "HIDDEN";

// =============================================================================
// Config format
// =============================================================================

/// Separator between system name and folder in the mapping file.
pub const CONFIG_SEPARATOR: char = '=';

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG nor --debug is given.
///
/// Kept at `warn` because stdout carries the user-facing report and the
/// log stream shares the terminal.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// =============================================================================
// Console
// =============================================================================

/// Prompt shown before the process exits in interactive mode.
pub const EXIT_PROMPT: &str = "Press Enter to exit";
