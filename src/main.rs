// ARChide - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. The run itself, printed live to stdout
// 4. Optional report export
// 5. Pause-on-exit and the process exit code

use archide::app::{report, run};
use archide::platform::{console, fs::RealFs};
use archide::util::{self, constants};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// ARChide - move games hidden in the catalog into a quarantine folder.
///
/// Reads the catalog and the system mapping from the working directory and
/// relocates every HIDDEN entry from its system folder into the quarantine
/// tree, mirroring the folder structure.
#[derive(Parser, Debug)]
#[command(name = "ARChide", version, about)]
struct Cli {
    /// Catalog file.
    #[arg(long, default_value = constants::DEFAULT_CATALOG_FILE)]
    catalog: PathBuf,

    /// System-to-folder mapping file.
    #[arg(long, default_value = constants::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Quarantine root that receives hidden games.
    #[arg(long, default_value = constants::DEFAULT_QUARANTINE_DIR)]
    quarantine: PathBuf,

    /// Directory that relative paths are resolved against.
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Also write the run report to this file (.csv or .json).
    #[arg(short = 'e', long = "export")]
    export: Option<PathBuf>,

    /// Exit without waiting for Enter.
    #[arg(long)]
    no_pause: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    util::logging::init(cli.debug);

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "ARChide starting"
    );

    let config = run::RunConfig {
        catalog_path: cli.catalog.clone(),
        config_path: cli.config.clone(),
        quarantine_root: cli.quarantine.clone(),
        base_dir: cli.base_dir.clone(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = report::write_banner(&mut out) {
        tracing::debug!(error = %e, "Failed to write banner");
    }

    let result = run::run(&config, &RealFs, |progress| {
        let written = match progress {
            run::RunProgress::MappingLoaded { mapping, warnings } => {
                report::write_systems(&mut out, &config.config_path, mapping, warnings)
            }
            run::RunProgress::ActionStarted {
                quarantine_root,
                hidden,
            } => report::write_action_header(&mut out, quarantine_root, hidden),
            run::RunProgress::Event(event) => writeln!(out, "{}", report::format_event(event)),
        };
        if let Err(e) = written {
            tracing::debug!(error = %e, "Failed to write progress");
        }
    });

    let code = match result {
        Ok(run_report) => {
            if let Err(e) = report::write_summary(&mut out, &run_report, &config.quarantine_root) {
                tracing::debug!(error = %e, "Failed to write summary");
            }
            match cli.export.as_deref().map(|p| report::export_report(&run_report, p)) {
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Report export failed");
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
                _ => ExitCode::SUCCESS,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Run aborted");
            let _ = out.flush();
            let mut err = io::stderr();
            if let Err(write_err) = report::write_fatal(&mut err, &e) {
                tracing::debug!(error = %write_err, "Failed to write error");
            }
            ExitCode::FAILURE
        }
    };

    let _ = out.flush();
    drop(out);

    if !cli.no_pause {
        console::pause();
    }

    code
}
