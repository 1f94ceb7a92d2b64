//! Core types for a launch attempt
use crate::launch::arguments::build_game_arguments;
use crate::launch::config::LaunchConfig;
use crate::launch::error::LaunchError;
use crate::launch::mode::select_mode;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Strategy used to start the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    /// Patch the base directory field, then call `main` with the raw arguments
    Legacy,

    /// Call `main` with window, server and join flags appended
    Modern,
}

impl LaunchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Modern => "modern",
        }
    }
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a launch attempt
#[derive(Debug)]
pub enum LaunchResult {
    Success,
    Failure(LaunchError),
}

impl LaunchResult {
    /// Process exit code: `0` on success, `-1` on any failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure(_) => -1,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn into_result(self) -> Result<(), LaunchError> {
        match self {
            Self::Success => Ok(()),
            Self::Failure(e) => Err(e),
        }
    }
}

/// What a launch would do, without doing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub mode: LaunchMode,
    pub main_class: String,

    /// Arguments the entry point's `main` receives
    pub arguments: Vec<String>,

    /// Directory written into the base directory field (legacy only)
    pub working_dir: PathBuf,
}

impl LaunchPlan {
    pub fn from_config(config: &LaunchConfig) -> Self {
        let mode = select_mode(&config.traits);
        let arguments = match mode {
            LaunchMode::Legacy => config.base_args.clone(),
            LaunchMode::Modern => build_game_arguments(config),
        };

        Self {
            mode,
            main_class: config.main_class.clone(),
            arguments,
            working_dir: config.working_dir.clone(),
        }
    }

    /// Arguments as a single shell-quoted line, for logs
    pub fn command_line(&self) -> String {
        quote_arguments(&self.arguments)
    }
}

pub(crate) fn quote_arguments(args: &[String]) -> String {
    shlex::try_join(args.iter().map(String::as_str)).unwrap_or_else(|_| args.join(" "))
}
