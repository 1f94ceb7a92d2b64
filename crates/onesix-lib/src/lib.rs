pub mod launch;

// Re-export commonly used types
pub use launch::{
    launch, LaunchConfig, LaunchError, LaunchMode, LaunchParams, LaunchPlan, LaunchResult,
};
