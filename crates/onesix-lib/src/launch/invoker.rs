//! Entry point invocation for both launch modes.
use crate::launch::arguments::build_game_arguments;
use crate::launch::config::{LaunchConfig, BASE_DIR_FIELD_CANDIDATES};
use crate::launch::error::{CallError, LaunchError};
use crate::launch::resolver::{Callable, EntryPointType, FieldValue, SymbolResolver};
use crate::launch::types::{quote_arguments, LaunchMode, LaunchResult};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Resolve and run the entry point described by `config`.
///
/// Blocks until the entry point returns. Its return is the only success
/// signal; failures are logged and returned, never retried.
pub fn invoke(config: LaunchConfig, mode: LaunchMode, resolver: &dyn SymbolResolver) -> LaunchResult {
    let outcome = match mode {
        LaunchMode::Legacy => legacy_launch(&config, resolver),
        LaunchMode::Modern => modern_launch(&config, resolver),
    };

    match outcome {
        Ok(()) => LaunchResult::Success,
        Err(e) => {
            log::error!("{}", e);
            if let Some(cause) = e.cause() {
                log::error!("Caused by: {:#}", cause);
            }
            LaunchResult::Failure(e)
        }
    }
}

/// Older clients take no window/server flags and read their base directory
/// from a static field, which is patched before `main` runs.
fn legacy_launch(config: &LaunchConfig, resolver: &dyn SymbolResolver) -> Result<(), LaunchError> {
    let ty = resolve_type(
        config,
        resolver,
        "Could not set base folder. Failed to find Minecraft main class",
    )?;

    match resolver.resolve_writable_field(&ty, BASE_DIR_FIELD_CANDIDATES) {
        Some(field) => {
            log::debug!(
                "Setting {}.{} to {:?}",
                ty.id(),
                field.name(),
                config.working_dir
            );
            field
                .set(FieldValue::Directory(config.working_dir.clone()))
                .map_err(|e| LaunchError::Invocation {
                    message: format!("Could not set base folder on {}", ty.id()),
                    cause: Some(e.into_cause()),
                })?;
        }
        None => log::warn!("Could not find Minecraft path field on {}", ty.id()),
    }

    let main = resolve_main(&ty, resolver)?;
    call_main(
        &main,
        config.base_args.clone(),
        "Failed to invoke the Minecraft main class",
    )
}

fn modern_launch(config: &LaunchConfig, resolver: &dyn SymbolResolver) -> Result<(), LaunchError> {
    let args = build_game_arguments(config);

    let ty = resolve_type(config, resolver, "Failed to find Minecraft main class")?;
    let main = resolve_main(&ty, resolver)?;

    call_main(&main, args, "Failed to start Minecraft")
}

fn resolve_type(
    config: &LaunchConfig,
    resolver: &dyn SymbolResolver,
    message: &str,
) -> Result<EntryPointType, LaunchError> {
    resolver
        .resolve_type(&config.main_class)
        .ok_or_else(|| LaunchError::EntryPointResolution {
            message: message.to_string(),
            entry_point: config.main_class.clone(),
            cause: Some(anyhow::anyhow!(
                "no entry point registered as {}",
                config.main_class
            )),
        })
}

fn resolve_main(ty: &EntryPointType, resolver: &dyn SymbolResolver) -> Result<Callable, LaunchError> {
    resolver
        .resolve_static_entry_point(ty)
        .ok_or_else(|| LaunchError::EntryPointResolution {
            message: "Failed to acquire the main method".to_string(),
            entry_point: ty.id().to_string(),
            cause: Some(anyhow::anyhow!("{} has no static main", ty.id())),
        })
}

fn call_main(main: &Callable, args: Vec<String>, message: &str) -> Result<(), LaunchError> {
    log::info!("Invoking {}.main", main.owner());
    log::debug!("Arguments: {}", quote_arguments(&args));

    // A panicking entry point counts as one that threw
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| main.call(args))).unwrap_or_else(|payload| {
        Err(CallError::Target(anyhow::anyhow!(
            "entry point panicked: {}",
            panic_message(payload.as_ref())
        )))
    });

    outcome.map_err(|e| LaunchError::Invocation {
        message: message.to_string(),
        cause: Some(e.into_cause()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
