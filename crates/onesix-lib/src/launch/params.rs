//! Parameter store handed to the launcher, and the line-based script it is
//! usually read from.
use crate::launch::error::LaunchError;
use std::collections::HashMap;
use std::io::BufRead;

/// Only launcher implementation this shim provides
pub const SUPPORTED_LAUNCHER: &str = "onesix";

/// Key-to-values mapping describing how to start the target.
///
/// Values for a key keep the order they were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    values: HashMap<String, Vec<String>>,
}

impl LaunchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `key`
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Builder-style [`add`](Self::add)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(key, value);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(|v| !v.is_empty())
    }

    /// First value for `key`, failing when the key is absent
    pub fn first(&self, key: &str) -> Result<&str, LaunchError> {
        self.first_opt(key).ok_or_else(|| LaunchError::missing(key))
    }

    pub fn first_opt(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    pub fn first_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.first_opt(key).unwrap_or(default)
    }

    /// All values for `key`, failing when the key is absent
    pub fn all(&self, key: &str) -> Result<&[String], LaunchError> {
        match self.values.get(key) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(LaunchError::missing(key)),
        }
    }

    pub fn all_or(&self, key: &str, default: Vec<String>) -> Vec<String> {
        self.all(key).map(<[String]>::to_vec).unwrap_or(default)
    }

    /// Read a launch script.
    ///
    /// Each line is `key value`, where the value is everything after the first
    /// space. `launch` or `abort` on a line of its own ends the script. A
    /// `launcher` line names the launcher implementation and is not stored.
    pub fn read_script<R: BufRead>(reader: R) -> Result<ScriptOutcome, ScriptError> {
        let mut params = LaunchParams::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            match line.split_once(' ') {
                None => match line {
                    "launch" => return Ok(ScriptOutcome::Launch(params)),
                    "abort" => return Ok(ScriptOutcome::Abort),
                    _ => {
                        return Err(ScriptError::Malformed {
                            line: idx + 1,
                            content: line.to_string(),
                        })
                    }
                },
                Some(("launcher", name)) => {
                    if name != SUPPORTED_LAUNCHER {
                        return Err(ScriptError::UnsupportedLauncher(name.to_string()));
                    }
                }
                Some((key, value)) => params.add(key, value),
            }
        }

        Err(ScriptError::UnexpectedEof)
    }
}

/// How a launch script ended
#[derive(Debug, PartialEq, Eq)]
pub enum ScriptOutcome {
    Launch(LaunchParams),
    Abort,
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Failed to read launch script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed launch script line {line}: {content:?}")]
    Malformed { line: usize, content: String },

    #[error("Invalid launcher type: {0}")]
    UnsupportedLauncher(String),

    #[error("Launch script ended without `launch` or `abort`")]
    UnexpectedEof,
}
