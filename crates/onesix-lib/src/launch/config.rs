//! Interpretation of launch parameters into a typed [`LaunchConfig`].
use crate::launch::environment::{
    EnvironmentPublisher, INSTANCE_ICON_PROPERTY, INSTANCE_TITLE_PROPERTY,
};
use crate::launch::error::LaunchError;
use crate::launch::params::LaunchParams;
use crate::launch::resolver::{FieldCandidate, FieldKind};
use std::collections::BTreeSet;
use std::path::PathBuf;

// Parameter keys
pub const PARAM_KEY: &str = "param";
pub const MAIN_CLASS_KEY: &str = "mainClass";
pub const TRAITS_KEY: &str = "traits";
pub const WINDOW_PARAMS_KEY: &str = "windowParams";
pub const INSTANCE_TITLE_KEY: &str = "instanceTitle";
pub const INSTANCE_ICON_KEY: &str = "instanceIconId";
pub const SERVER_ADDRESS_KEY: &str = "serverAddress";
pub const SERVER_PORT_KEY: &str = "serverPort";
pub const USE_QUICK_PLAY_KEY: &str = "useQuickPlay";
pub const JOIN_WORLD_KEY: &str = "joinWorld";

// Defaults
pub const DEFAULT_MAIN_CLASS: &str = "net.minecraft.client.Minecraft";
pub const DEFAULT_WINDOW_PARAMS: &str = "854x480";
pub const DEFAULT_WIDTH: i32 = 854;
pub const DEFAULT_HEIGHT: i32 = 480;
pub const DEFAULT_INSTANCE_TITLE: &str = "Minecraft";
pub const DEFAULT_INSTANCE_ICON: &str = "default";

// Traits that force the legacy launch path
pub const LEGACY_LAUNCH_TRAIT: &str = "legacyLaunch";
pub const ALPHA_LAUNCH_TRAIT: &str = "alphaLaunch";

/// Static fields that older clients read their base directory from, tried in order
pub const BASE_DIR_FIELD_CANDIDATES: &[FieldCandidate] = &[
    FieldCandidate::new("minecraftDir", FieldKind::Directory),
    FieldCandidate::new("workDir", FieldKind::Directory),
    FieldCandidate::new("baseDir", FieldKind::Directory),
];

/// Everything needed to start the target, built once per launch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Identifier of the target's main entry point
    pub main_class: String,

    /// Pass-through arguments, in the order given
    pub base_args: Vec<String>,

    /// Feature flags controlling mode selection
    pub traits: BTreeSet<String>,

    pub window_width: i32,
    pub window_height: i32,

    /// When set, width/height flags are not passed to the target
    pub maximize: bool,

    /// Current working directory at interpretation time
    pub working_dir: PathBuf,

    pub server_address: Option<String>,

    /// Only meaningful together with `server_address`
    pub server_port: Option<String>,

    /// Only meaningful together with `server_address`
    pub use_quick_play_multiplayer: bool,

    /// Singleplayer world to join directly
    pub join_world: Option<String>,
}

impl LaunchConfig {
    /// Interpret `params`, snapshotting the process's current directory.
    ///
    /// Publishes the instance title and icon through `publisher` as a side
    /// effect. Fails if `useQuickPlay` is absent.
    pub fn from_params(
        params: &LaunchParams,
        publisher: &dyn EnvironmentPublisher,
    ) -> Result<Self, LaunchError> {
        let working_dir = std::env::current_dir().unwrap_or_else(|e| {
            log::warn!("Could not read current directory, using \".\": {}", e);
            PathBuf::from(".")
        });
        Self::from_params_in(params, publisher, working_dir)
    }

    /// Same as [`from_params`](Self::from_params) with an explicit working directory
    pub fn from_params_in(
        params: &LaunchParams,
        publisher: &dyn EnvironmentPublisher,
        working_dir: PathBuf,
    ) -> Result<Self, LaunchError> {
        let base_args = params.all_or(PARAM_KEY, Vec::new());
        let main_class = params.first_or(MAIN_CLASS_KEY, DEFAULT_MAIN_CLASS).to_string();
        let traits = params.all_or(TRAITS_KEY, Vec::new()).into_iter().collect();
        let window_params = params.first_or(WINDOW_PARAMS_KEY, DEFAULT_WINDOW_PARAMS);

        publisher.publish(
            INSTANCE_TITLE_PROPERTY,
            params.first_or(INSTANCE_TITLE_KEY, DEFAULT_INSTANCE_TITLE),
        );
        publisher.publish(
            INSTANCE_ICON_PROPERTY,
            params.first_or(INSTANCE_ICON_KEY, DEFAULT_INSTANCE_ICON),
        );

        let server_address = params.first_opt(SERVER_ADDRESS_KEY).map(str::to_string);
        let server_port = params.first_opt(SERVER_PORT_KEY).map(str::to_string);
        let use_quick_play_multiplayer = params.first(USE_QUICK_PLAY_KEY)?.starts_with('1');
        let join_world = params.first_opt(JOIN_WORLD_KEY).map(str::to_string);

        let (window_width, window_height, maximize) = parse_window_params(window_params);

        Ok(Self {
            main_class,
            base_args,
            traits,
            window_width,
            window_height,
            maximize,
            working_dir,
            server_address,
            server_port,
            use_quick_play_multiplayer,
            join_world,
        })
    }
}

/// Parse `WIDTHxHEIGHT` or `max`, returning `(width, height, maximize)`.
///
/// Anything unparseable keeps the default geometry without reporting an error.
fn parse_window_params(value: &str) -> (i32, i32, bool) {
    if value.eq_ignore_ascii_case("max") {
        return (DEFAULT_WIDTH, DEFAULT_HEIGHT, true);
    }

    // trailing empty tokens do not count ("800x600x" is two tokens)
    let mut dims: Vec<&str> = value.split('x').collect();
    while dims.len() > 1 && dims.last() == Some(&"") {
        dims.pop();
    }

    if let [w, h] = dims.as_slice() {
        if let (Ok(w), Ok(h)) = (w.parse::<i32>(), h.parse::<i32>()) {
            return (w, h, false);
        }
        log::debug!("Ignoring malformed window size {:?}", value);
    }

    (DEFAULT_WIDTH, DEFAULT_HEIGHT, false)
}
