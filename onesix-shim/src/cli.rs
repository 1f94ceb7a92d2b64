use clap::Parser;
use std::path::PathBuf;

/// Launch shim: reads a launch script and starts the entry point it names.
///
/// Entry points are resolved in-process. Built on its own the shim registers
/// none, so only `--dry-run` is useful; a binary that links a target registers
/// it and calls `onesix_lib::launch::host::run_script` instead.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Read the launch script from this file instead of stdin
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Print the launch plan as JSON instead of launching
    #[arg(long)]
    pub dry_run: bool,

    /// Exit code the launch must produce; any other code is reported as an error
    #[arg(long, value_name = "CODE", default_value_t = 0, allow_negative_numbers = true)]
    pub expect_exit_code: i32,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
