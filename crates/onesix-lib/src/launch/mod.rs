//! Launch orchestration: parameters in, a running entry point out
pub mod arguments;
pub mod config;
pub mod environment;
pub mod error;
pub mod host;
pub mod invoker;
pub mod mode;
pub mod params;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use arguments::build_game_arguments;
pub use config::LaunchConfig;
pub use environment::{get_property, EnvironmentPublisher, RecordingPublisher, SystemProperties};
pub use error::{CallError, LaunchError};
pub use host::{DryRun, HostError, ABORT_EXIT_CODE};
pub use invoker::invoke;
pub use mode::select_mode;
pub use params::{LaunchParams, ScriptError, ScriptOutcome};
pub use resolver::{
    global_registry, register_entry_point, Callable, EntryPointRegistry, EntryPointType,
    FieldCandidate, FieldHandle, FieldKind, FieldValue, SymbolResolver,
};
pub use types::{LaunchMode, LaunchPlan, LaunchResult};

/// Interpret `params`, pick a launch mode and invoke the entry point.
///
/// Interpretation failures abort before anything is resolved. The calling
/// thread blocks for as long as the entry point runs.
pub fn launch(
    params: &LaunchParams,
    resolver: &dyn SymbolResolver,
    publisher: &dyn EnvironmentPublisher,
) -> LaunchResult {
    let config = match LaunchConfig::from_params(params, publisher) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Not enough arguments: {}", e);
            return LaunchResult::Failure(e);
        }
    };

    let mode = select_mode(&config.traits);
    log::info!(
        "Launching {} in {} mode (working dir {:?})",
        config.main_class,
        mode,
        config.working_dir
    );

    invoke(config, mode, resolver)
}
