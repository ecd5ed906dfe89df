// ARChide - tests/e2e_relocation.rs
//
// End-to-end tests for the full run: real config and catalog files on
// disk, real directory creation, real renames inside a temporary library.
// No mocks, no stubs.

use archide::app::report::export_report;
use archide::app::run::{run, RunConfig, RunProgress};
use archide::core::model::{RunEvent, RunReport};
use archide::platform::fs::RealFs;
use archide::util::error::{
    ArchideError, CatalogError, ConfigError, ExportError, ValidationError,
};
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// Helpers
// =============================================================================

/// A temporary library root holding config.txt, games.csv and game files.
struct Library {
    dir: tempfile::TempDir,
}

impl Library {
    fn new(config: &str, catalog: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.txt"), config).unwrap();
        fs::write(dir.path().join("games.csv"), catalog).unwrap();
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    fn add_game(&self, relative: &str) {
        self.add_file(relative, b"rom");
    }

    fn add_file(&self, relative: &str, content: &[u8]) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn run(&self) -> Result<RunReport, ArchideError> {
        run(&RunConfig::in_dir(self.root()), &RealFs, |_| {})
    }
}

// =============================================================================
// Scenario
// =============================================================================

/// One hidden and one visible NES game: only the hidden one moves.
#[test]
fn e2e_moves_hidden_game_and_leaves_visible_one() {
    let lib = Library::new(
        "NES = roms/nes\n",
        "System,Filename,Hidden\nNES,mario.nes,HIDDEN\nNES,zelda.nes,VISIBLE\n",
    );
    lib.add_game("roms/nes/mario.nes");
    lib.add_game("roms/nes/zelda.nes");

    let report = lib.run().unwrap();

    assert!(!lib.path("roms/nes/mario.nes").exists());
    assert!(lib.path("_hidden/roms/nes/mario.nes").is_file());
    assert!(lib.path("roms/nes/zelda.nes").is_file());
    assert!(!lib.path("_hidden/roms/nes/zelda.nes").exists());

    assert_eq!(report.moved(), 1);
    assert_eq!(report.errors(), 0);
    assert_eq!(report.not_hidden, 1);
    assert_eq!(
        report.events,
        vec![RunEvent::Moved {
            system: "NES".to_string(),
            source: Path::new("roms/nes").join("mario.nes"),
            destination: Path::new("_hidden")
                .join("roms")
                .join("nes")
                .join("mario.nes"),
        }]
    );
}

/// The quarantine mirror uses the configured folder, not the display name.
#[test]
fn e2e_destination_mirrors_configured_folder() {
    let lib = Library::new(
        "SystemA = roms/sysA\n",
        "System,Filename,Hidden\nSystemA,game.bin,hidden\n",
    );
    lib.add_game("roms/sysA/game.bin");

    lib.run().unwrap();

    assert!(lib.path("_hidden/roms/sysA/game.bin").is_file());
    assert!(!lib.path("_hidden/SystemA").exists());
}

// =============================================================================
// Idempotence and non-fatal row errors
// =============================================================================

/// A second run finds every file already gone and reports each as missing.
#[test]
fn e2e_second_run_reports_missing_sources() {
    let lib = Library::new(
        "NES = roms/nes\nSNES = roms/snes\n",
        "System,Filename,Hidden\nNES,a.nes,HIDDEN\nSNES,b.sfc,HIDDEN\n",
    );
    lib.add_game("roms/nes/a.nes");
    lib.add_game("roms/snes/b.sfc");

    let first = lib.run().unwrap();
    assert_eq!(first.moved(), 2);

    let second = lib.run().unwrap();
    assert_eq!(second.moved(), 0);
    assert_eq!(second.source_missing(), 2);
    assert_eq!(second.move_failed(), 0);
    assert!(lib.path("_hidden/roms/nes/a.nes").is_file());
    assert!(lib.path("_hidden/roms/snes/b.sfc").is_file());
}

/// A missing source does not stop later rows from being processed.
#[test]
fn e2e_missing_source_is_non_fatal() {
    let lib = Library::new(
        "NES = roms/nes\n",
        "System,Filename,Hidden\nNES,ghost.nes,HIDDEN\nNES,real.nes,HIDDEN\n",
    );
    lib.add_game("roms/nes/real.nes");

    let report = lib.run().unwrap();

    assert!(matches!(report.events[0], RunEvent::SourceMissing { .. }));
    assert!(matches!(report.events[1], RunEvent::Moved { .. }));
    assert!(lib.path("_hidden/roms/nes/real.nes").is_file());
}

/// Events reach the progress callback in catalog order.
#[test]
fn e2e_progress_callback_sees_every_event() {
    let lib = Library::new(
        "NES = roms/nes\n",
        "System,Filename,Hidden\nNES,a.nes,HIDDEN\nNES,b.nes,\nNES,c.nes,HIDDEN\n",
    );
    lib.add_game("roms/nes/a.nes");
    lib.add_game("roms/nes/c.nes");

    let mut sources = Vec::new();
    let mut mapping_seen = false;
    run(&RunConfig::in_dir(lib.root()), &RealFs, |progress| match progress {
        RunProgress::MappingLoaded { mapping, .. } => mapping_seen = mapping.contains("NES"),
        RunProgress::Event(RunEvent::Moved { source, .. }) => sources.push(source.clone()),
        _ => {}
    })
    .unwrap();

    assert!(mapping_seen);
    assert_eq!(
        sources,
        vec![
            Path::new("roms/nes").join("a.nes"),
            Path::new("roms/nes").join("c.nes")
        ]
    );
}

// =============================================================================
// Fatal pre-flight errors
// =============================================================================

/// Any unmapped hidden system aborts the run with zero side effects.
#[test]
fn e2e_unmapped_systems_abort_without_moving_anything() {
    let lib = Library::new(
        "NES = roms/nes\n",
        "System,Filename,Hidden\n\
         NES,a.nes,HIDDEN\n\
         SNES,b.sfc,HIDDEN\n\
         Amiga,c.adf,HIDDEN\n\
         SNES,d.sfc,HIDDEN\n\
         C64,e.d64,VISIBLE\n",
    );
    lib.add_game("roms/nes/a.nes");

    let err = lib.run().unwrap_err();

    match err {
        ArchideError::Validation(ValidationError::UnmappedSystems { systems }) => {
            let systems: Vec<_> = systems.into_iter().collect();
            assert_eq!(systems, vec!["Amiga".to_string(), "SNES".to_string()]);
        }
        other => panic!("expected UnmappedSystems, got {other:?}"),
    }
    assert!(lib.path("roms/nes/a.nes").is_file());
    assert!(!lib.path("_hidden").exists());
}

#[test]
fn e2e_missing_config_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("games.csv"), "System,Filename,Hidden\n").unwrap();

    let err = run(&RunConfig::in_dir(dir.path()), &RealFs, |_| {}).unwrap_err();
    assert!(
        matches!(err, ArchideError::Config(ConfigError::NotFound { .. })),
        "got {err:?}"
    );
    assert!(!dir.path().join("_hidden").exists());
}

#[test]
fn e2e_missing_catalog_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.txt"), "NES = roms/nes\n").unwrap();

    let err = run(&RunConfig::in_dir(dir.path()), &RealFs, |_| {}).unwrap_err();
    assert!(
        matches!(err, ArchideError::Catalog(CatalogError::NotFound { .. })),
        "got {err:?}"
    );
    assert!(!dir.path().join("_hidden").exists());
}

/// A row missing a required field fails the whole run, even if an earlier
/// hidden row could have been moved.
#[test]
fn e2e_malformed_row_aborts_before_any_move() {
    let lib = Library::new(
        "NES = roms/nes\n",
        "System,Filename,Hidden\nNES,a.nes,HIDDEN\nNES,b.nes\n",
    );
    lib.add_game("roms/nes/a.nes");

    let err = lib.run().unwrap_err();
    assert!(
        matches!(err, ArchideError::Catalog(CatalogError::MalformedRow { line: 3, .. })),
        "got {err:?}"
    );
    assert!(lib.path("roms/nes/a.nes").is_file());
}

#[test]
fn e2e_malformed_config_line_is_fatal() {
    let lib = Library::new(
        "NES = roms/nes\nthis line has no separator\n",
        "System,Filename,Hidden\nNES,a.nes,HIDDEN\n",
    );
    lib.add_game("roms/nes/a.nes");

    let err = lib.run().unwrap_err();
    assert!(
        matches!(
            err,
            ArchideError::Config(ConfigError::MalformedLine { line_number: 2, .. })
        ),
        "got {err:?}"
    );
    assert!(lib.path("roms/nes/a.nes").is_file());
}

#[test]
fn e2e_non_utf8_config_is_fatal() {
    let lib = Library::new("", "System,Filename,Hidden\nNES,a.nes,HIDDEN\n");
    fs::write(lib.path("config.txt"), b"NES = roms/n\xe9s\n").unwrap();
    lib.add_game("roms/nes/a.nes");

    let err = lib.run().unwrap_err();
    assert!(
        matches!(err, ArchideError::Config(ConfigError::InvalidEncoding { .. })),
        "got {err:?}"
    );
    assert!(lib.path("roms/nes/a.nes").is_file());
    assert!(!lib.path("_hidden").exists());
}

#[test]
fn e2e_non_utf8_catalog_row_is_fatal() {
    let lib = Library::new("NES = roms/nes\n", "");
    fs::write(
        lib.path("games.csv"),
        b"System,Filename,Hidden\nNES,a.nes,HIDDEN\nNES,b\xff.nes,HIDDEN\n",
    )
    .unwrap();
    lib.add_game("roms/nes/a.nes");

    let err = lib.run().unwrap_err();
    assert!(
        matches!(
            err,
            ArchideError::Catalog(CatalogError::MalformedRow { .. } | CatalogError::Csv { .. })
        ),
        "got {err:?}"
    );
    assert!(lib.path("roms/nes/a.nes").is_file());
    assert!(!lib.path("_hidden").exists());
}

// =============================================================================
// Occupied destinations and escaping filenames
// =============================================================================

/// A file already sitting at the destination is kept; the source stays put.
#[test]
fn e2e_existing_destination_is_not_overwritten() {
    let lib = Library::new(
        "NES = roms/nes\n",
        "System,Filename,Hidden\nNES,mario.nes,HIDDEN\nNES,zelda.nes,HIDDEN\n",
    );
    lib.add_file("_hidden/roms/nes/mario.nes", b"OLD");
    lib.add_file("roms/nes/mario.nes", b"NEW");
    lib.add_game("roms/nes/zelda.nes");

    let report = lib.run().unwrap();

    assert_eq!(fs::read(lib.path("_hidden/roms/nes/mario.nes")).unwrap(), b"OLD");
    assert_eq!(fs::read(lib.path("roms/nes/mario.nes")).unwrap(), b"NEW");
    assert!(lib.path("_hidden/roms/nes/zelda.nes").is_file());

    assert_eq!(report.moved(), 1);
    assert_eq!(report.move_failed(), 1);
    match &report.events[0] {
        RunEvent::MoveFailed { reason, .. } => {
            assert!(reason.contains("already exists"), "reason: {reason}")
        }
        other => panic!("expected MoveFailed, got {other:?}"),
    }
}

/// Filenames that climb out of the system folder never touch the filesystem.
#[test]
fn e2e_relative_escape_is_rejected() {
    let lib = Library::new(
        "NES = roms/nes\n",
        "System,Filename,Hidden\nNES,../../secret.txt,HIDDEN\nNES,ok.nes,HIDDEN\n",
    );
    lib.add_game("secret.txt");
    lib.add_game("roms/nes/ok.nes");

    let report = lib.run().unwrap();

    assert!(lib.path("secret.txt").is_file());
    assert!(!lib.path("_hidden/secret.txt").exists());
    assert!(lib.path("_hidden/roms/nes/ok.nes").is_file());
    assert_eq!(
        report.events[0],
        RunEvent::InvalidFilename {
            system: "NES".to_string(),
            filename: "../../secret.txt".to_string(),
        }
    );
    assert_eq!(report.moved(), 1);
}

#[cfg(unix)]
#[test]
fn e2e_absolute_filename_is_rejected() {
    let outside = tempfile::tempdir().unwrap();
    let target = outside.path().join("keep.bin");
    fs::write(&target, b"data").unwrap();

    let lib = Library::new(
        "NES = roms/nes\n",
        &format!("System,Filename,Hidden\nNES,{},HIDDEN\n", target.display()),
    );

    let report = lib.run().unwrap();

    assert!(target.is_file());
    assert_eq!(report.moved(), 0);
    assert!(matches!(report.events[0], RunEvent::InvalidFilename { .. }));
    let quarantined: Vec<_> = fs::read_dir(lib.path("_hidden")).unwrap().collect();
    assert!(quarantined.is_empty());
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn e2e_report_exports_as_json_and_csv() {
    let lib = Library::new(
        "NES = roms/nes\n",
        "System,Filename,Hidden\nNES,mario.nes,HIDDEN\nNES,gone.nes,HIDDEN\nNES,zelda.nes,\n",
    );
    lib.add_game("roms/nes/mario.nes");
    let report = lib.run().unwrap();

    let json_path = lib.path("report.json");
    assert_eq!(export_report(&report, &json_path).unwrap(), 2);
    let json: serde_json::Value =
        serde_json::from_slice(&fs::read(&json_path).unwrap()).unwrap();
    assert_eq!(json["total_rows"], 3);
    assert_eq!(json["not_hidden"], 1);
    assert_eq!(json["events"][0]["kind"], "moved");
    assert_eq!(json["events"][1]["kind"], "source_missing");

    let csv_path = lib.path("report.csv");
    assert_eq!(export_report(&report, &csv_path).unwrap(), 2);
    let text = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "kind,system,source,destination,detail");
    assert!(lines[1].starts_with("moved,NES,"));
    assert!(lines[2].starts_with("source_missing,NES,"));
    assert_eq!(lines.len(), 3);
}

#[test]
fn e2e_export_rejects_unknown_extension_without_creating_a_file() {
    let lib = Library::new("NES = roms/nes\n", "System,Filename,Hidden\n");
    let report = lib.run().unwrap();

    let path = lib.path("report.txt");
    let err = export_report(&report, &path).unwrap_err();
    assert!(matches!(err, ExportError::UnsupportedFormat { .. }), "got {err:?}");
    assert!(!path.exists());
}
