//! `tplayblast`: render one versioned scene through the hardware batch renderer.

mod cli;
mod logging;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use playblast::prelude::*;

/// Exit code for bad arguments, a missing scene argument or an unresolved
/// scene path
const GUARD_EXIT_CODE: i32 = -1;

/// Environment variable naming a configuration file when `-config` is absent
const CONFIG_ENV: &str = "TPLAYBLAST_CONFIG";

fn main() {
    logging::init();

    let matches = match cli::command().try_get_matches_from(cli::normalize_args(std::env::args_os())) {
        Ok(matches) => matches,
        Err(e) => {
            let code = parse_error_code(&e);
            if let Err(print_err) = e.print() {
                log::error!("Failed to print usage: {print_err}");
            }
            std::process::exit(code);
        }
    };

    let code = match run(&matches) {
        Ok(code) => code,
        Err(e) => report(&e),
    };
    std::process::exit(code);
}

/// Help and version requests exit cleanly; every other parse failure is a
/// usage error
fn parse_error_code(error: &clap::Error) -> i32 {
    use clap::error::ErrorKind;

    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => GUARD_EXIT_CODE,
    }
}

fn run(matches: &clap::ArgMatches) -> Result<i32> {
    let options = cli::run_options(matches);
    let config = load_config(options.config.as_deref())?;

    if options.occlusion {
        log::warn!("Occlusion playblasts are not supported; rendering a regular pass");
    }

    let locator = VersionedLayout::new(&config.paths.scenes_root);
    let runner = ShellRunner::new(config.renderer.shell.clone());
    let blast = Playblast::new(config, locator, runner);

    let request = blast.resolve(cli::scene_args(matches))?;

    if options.dry_run {
        let command = blast
            .prepare(&request)
            .with_context(|| format!("Failed to prepare {}", request.scene()))?;
        println!("{command}");
        return Ok(0);
    }

    let outcome = blast
        .run(&request)
        .with_context(|| format!("Failed to render {}", request.scene()))?;
    relay(&outcome, &mut std::io::stdout(), &mut std::io::stderr())
}

fn load_config(explicit: Option<&Path>) -> Result<PlayblastConfig> {
    let from_env = std::env::var_os(CONFIG_ENV).map(std::path::PathBuf::from);
    match explicit.map(Path::to_path_buf).or(from_env) {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            PlayblastConfig::load_from_file(&path)
                .map_err(PlayblastError::from)
                .with_context(|| format!("Failed to load configuration {}", path.display()))
        }
        None => Ok(PlayblastConfig::default()),
    }
}

/// Renderer stdout is always forwarded; stderr only when it failed.
/// Returns the exit code to report.
fn relay(outcome: &RenderOutcome, out: &mut impl Write, err: &mut impl Write) -> Result<i32> {
    out.write_all(&outcome.stdout)
        .context("Failed to forward renderer output")?;
    if !outcome.success() {
        err.write_all(&outcome.stderr)
            .context("Failed to forward renderer errors")?;
    }
    Ok(outcome.propagated_code())
}

/// Print an error and pick the exit code for it
fn report(error: &anyhow::Error) -> i32 {
    let code = exit_code_for(error);
    if code == GUARD_EXIT_CODE {
        println!("ERROR: {error}");
    } else {
        eprintln!("Error: {error:#}");
    }
    code
}

fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<PlayblastError>() {
        Some(e) if e.is_guard_failure() => GUARD_EXIT_CODE,
        _ => 1,
    }
}
