//! Host process for the launch shim.
mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use onesix_lib::launch::host::{self, DryRun, ABORT_EXIT_CODE};
use onesix_lib::launch::{global_registry, ScriptOutcome, SystemProperties};
use onesix_lib::LaunchParams;
use std::io::{self, BufReader};
use std::path::Path;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.default_log_filter()),
    )
    .format_timestamp_millis()
    .init();

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            -1
        }
    };

    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    let outcome = read_script(cli.script.as_deref())?;

    if cli.dry_run {
        let ScriptOutcome::Launch(params) = outcome else {
            log::info!("Launch aborted by the launch script");
            return Ok(ABORT_EXIT_CODE);
        };
        let report = DryRun::build(&params)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(0);
    }

    if matches!(outcome, ScriptOutcome::Launch(_)) {
        host::ensure_entry_points(global_registry())?;
    }

    let code = host::run_outcome(
        outcome,
        global_registry(),
        &SystemProperties,
        cli.expect_exit_code,
    )?;
    Ok(code)
}

fn read_script(path: Option<&Path>) -> Result<ScriptOutcome> {
    match path {
        Some(path) => {
            log::debug!("Reading launch script from {:?}", path);
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open launch script {:?}", path))?;
            LaunchParams::read_script(BufReader::new(file))
                .with_context(|| format!("Failed to parse launch script {:?}", path))
        }
        None => {
            log::debug!("Reading launch script from stdin");
            LaunchParams::read_script(io::stdin().lock()).context("Failed to parse launch script")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onesix_lib::launch::{register_entry_point, EntryPointType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TEST_MAIN: &str = "onesix.shim.tests.Main";

    fn write_script(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    fn cli_for(file: &NamedTempFile, extra: &[&str]) -> Cli {
        let mut args = vec!["onesix-shim", "--script", file.path().to_str().unwrap()];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    fn register_test_main() {
        register_entry_point(EntryPointType::new(TEST_MAIN).with_main(|_| Ok(())));
    }

    #[test]
    fn reads_script_from_file() {
        let file = write_script("param --demo\nuseQuickPlay 0\nlaunch\n");
        let outcome = read_script(Some(file.path())).unwrap();
        let ScriptOutcome::Launch(params) = outcome else {
            panic!("expected launch");
        };
        assert_eq!(params.first("param").unwrap(), "--demo");
    }

    #[test]
    fn missing_script_file_is_an_error() {
        let err = read_script(Some(Path::new("/nonexistent/launch-script.txt"))).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open launch script"));
    }

    #[test]
    fn abort_script_exits_with_abort_code() {
        let file = write_script("param --demo\nabort\n");
        assert_eq!(run(&cli_for(&file, &[])).unwrap(), ABORT_EXIT_CODE);
    }

    #[test]
    fn dry_run_prints_without_launching() {
        let file = write_script("mainClass com.example.Unregistered\nuseQuickPlay 0\nlaunch\n");
        assert_eq!(run(&cli_for(&file, &["--dry-run"])).unwrap(), 0);
    }

    #[test]
    fn dry_run_missing_quick_play_reports_parameter() {
        let file = write_script("param --demo\nlaunch\n");
        let err = run(&cli_for(&file, &["--dry-run"])).unwrap_err();
        assert!(format!("{:#}", err).contains("useQuickPlay"));
    }

    #[test]
    fn launch_matching_expected_exit_code_succeeds() {
        register_test_main();
        let file = write_script(&format!("mainClass {}\nuseQuickPlay 0\nlaunch\n", TEST_MAIN));
        assert_eq!(run(&cli_for(&file, &[])).unwrap(), 0);
    }

    #[test]
    fn launch_with_other_exit_code_is_an_error() {
        register_test_main();
        let file = write_script(&format!("mainClass {}\nuseQuickPlay 0\nlaunch\n", TEST_MAIN));

        let err = run(&cli_for(&file, &["--expect-exit-code", "-1"])).unwrap_err();

        assert_eq!(err.to_string(), "Game exited with value 0, expected -1");
    }

    #[test]
    fn failed_launch_can_be_the_expected_outcome() {
        register_test_main();
        let file = write_script("mainClass com.example.Unregistered\nuseQuickPlay 0\nlaunch\n");
        assert_eq!(
            run(&cli_for(&file, &["--expect-exit-code=-1"])).unwrap(),
            -1
        );
    }
}
