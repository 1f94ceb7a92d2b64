//! Driving a launch from a host process: script in, exit code out.
//!
//! A binary that links a target registers its entry points, then hands the
//! launch script to [`run_script`].
use crate::launch::config::LaunchConfig;
use crate::launch::environment::{
    EnvironmentPublisher, RecordingPublisher, INSTANCE_ICON_PROPERTY, INSTANCE_TITLE_PROPERTY,
};
use crate::launch::error::LaunchError;
use crate::launch::params::{LaunchParams, ScriptError, ScriptOutcome};
use crate::launch::resolver::{EntryPointRegistry, SymbolResolver};
use crate::launch::types::LaunchPlan;
use serde::Serialize;
use std::io::BufRead;

/// Exit code when the script asks to abort instead of launch
pub const ABORT_EXIT_CODE: i32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("No entry points are registered in this process; register the target before launching, or use a dry run")]
    NoEntryPoints,

    #[error("Game exited with value {actual}, expected {expected}")]
    UnexpectedExitCode { actual: i32, expected: i32 },
}

/// Read a launch script and run it, returning the exit code.
///
/// A launch whose code differs from `expected` is an error.
pub fn run_script<R: BufRead>(
    reader: R,
    resolver: &dyn SymbolResolver,
    publisher: &dyn EnvironmentPublisher,
    expected: i32,
) -> Result<i32, HostError> {
    let outcome = LaunchParams::read_script(reader)?;
    run_outcome(outcome, resolver, publisher, expected)
}

/// Run an already-read script
pub fn run_outcome(
    outcome: ScriptOutcome,
    resolver: &dyn SymbolResolver,
    publisher: &dyn EnvironmentPublisher,
    expected: i32,
) -> Result<i32, HostError> {
    match outcome {
        ScriptOutcome::Abort => {
            log::info!("Launch aborted by the launch script");
            Ok(ABORT_EXIT_CODE)
        }
        ScriptOutcome::Launch(params) => {
            let code = crate::launch::launch(&params, resolver, publisher).exit_code();
            check_exit_code(code, expected)?;
            Ok(code)
        }
    }
}

/// Fail unless `actual` is the exit code the caller accepts
pub fn check_exit_code(actual: i32, expected: i32) -> Result<(), HostError> {
    if actual != expected {
        return Err(HostError::UnexpectedExitCode { actual, expected });
    }
    Ok(())
}

/// Fail early when nothing could possibly be resolved
pub fn ensure_entry_points(registry: &EntryPointRegistry) -> Result<(), HostError> {
    if registry.is_empty() {
        return Err(HostError::NoEntryPoints);
    }
    Ok(())
}

/// Dry-run report: what a launch would do, without doing it
#[derive(Debug, Serialize)]
pub struct DryRun {
    #[serde(flatten)]
    pub plan: LaunchPlan,
    pub command_line: String,
    pub instance_title: Option<String>,
    pub instance_icon: Option<String>,
}

impl DryRun {
    pub fn build(params: &LaunchParams) -> Result<Self, LaunchError> {
        // Record instead of publishing so a dry run leaves no process state behind
        let publisher = RecordingPublisher::new();
        let config = LaunchConfig::from_params(params, &publisher)?;
        let plan = LaunchPlan::from_config(&config);

        Ok(Self {
            command_line: plan.command_line(),
            plan,
            instance_title: publisher.get(INSTANCE_TITLE_PROPERTY),
            instance_icon: publisher.get(INSTANCE_ICON_PROPERTY),
        })
    }
}
