//! Error taxonomy for a launch attempt.

/// Failures surfaced to the caller of a launch attempt
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// A required parameter was absent from the parameter store
    #[error("Missing required parameter: {key}")]
    MissingParameter { key: String },

    /// The entry point type, or its `main` callable, is not known to the resolver
    #[error("{message}: {entry_point}")]
    EntryPointResolution {
        message: String,
        entry_point: String,
        #[source]
        cause: Option<anyhow::Error>,
    },

    /// The entry point was found but failed while being prepared or run
    #[error("{message}")]
    Invocation {
        message: String,
        #[source]
        cause: Option<anyhow::Error>,
    },
}

impl LaunchError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingParameter { key: key.into() }
    }

    /// Underlying failure, already unwrapped from any invocation wrapper
    pub fn cause(&self) -> Option<&anyhow::Error> {
        match self {
            Self::MissingParameter { .. } => None,
            Self::EntryPointResolution { cause, .. } | Self::Invocation { cause, .. } => {
                cause.as_ref()
            }
        }
    }
}

/// Error returned by a resolved callable or field setter.
///
/// `Target` wraps whatever the target itself reported and is unwrapped by the
/// invoker before reporting; `Access` means the handle refused the operation.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("target raised an error: {0:#}")]
    Target(anyhow::Error),

    #[error("access refused: {0}")]
    Access(String),
}

impl CallError {
    /// Strip the invocation wrapper and return the real cause
    pub fn into_cause(self) -> anyhow::Error {
        match self {
            Self::Target(cause) => cause,
            other => anyhow::Error::new(other),
        }
    }
}
