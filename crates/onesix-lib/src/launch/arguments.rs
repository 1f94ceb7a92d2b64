//! Argument builder for the modern launch path
use crate::launch::config::LaunchConfig;

/// Build the argument vector passed to the entry point's `main`.
///
/// Flags are appended to the base arguments in a fixed order: window size,
/// singleplayer quick play, then server join.
pub fn build_game_arguments(config: &LaunchConfig) -> Vec<String> {
    let mut args = config.base_args.clone();

    // No flag maximizes the window, so maximize only drops the size flags
    if !config.maximize {
        args.push("--width".to_string());
        args.push(config.window_width.to_string());
        args.push("--height".to_string());
        args.push(config.window_height.to_string());
    }

    if let Some(ref world) = config.join_world {
        args.push("--quickPlaySingleplayer".to_string());
        args.push(world.clone());
    }

    if let Some(ref address) = config.server_address {
        // An address without a port is passed on as-is, with the port spelled "null"
        let port = config.server_port.as_deref().unwrap_or("null");

        if config.use_quick_play_multiplayer {
            args.push("--quickPlayMultiplayer".to_string());
            args.push(format!("{}:{}", address, port));
        } else {
            args.push("--server".to_string());
            args.push(address.clone());
            args.push("--port".to_string());
            args.push(port.to_string());
        }
    }

    args
}
