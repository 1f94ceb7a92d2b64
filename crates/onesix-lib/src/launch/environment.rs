//! Process-wide informational attributes published for external tooling
//! (rich-presence mods read the instance title and icon from here).
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

/// Property carrying the instance's display title
pub const INSTANCE_TITLE_PROPERTY: &str = "multimc.instance.title";

/// Property carrying the instance's icon id
pub const INSTANCE_ICON_PROPERTY: &str = "multimc.instance.icon";

/// Sink for process-wide attributes written during interpretation
pub trait EnvironmentPublisher {
    fn publish(&self, key: &str, value: &str);
}

// Written once per launch, read by whatever runs inside the process afterwards
static PROPERTIES: Lazy<RwLock<HashMap<String, String>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Publishes into the process-wide property table
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProperties;

impl EnvironmentPublisher for SystemProperties {
    fn publish(&self, key: &str, value: &str) {
        log::debug!("Setting property {}={}", key, value);
        let mut props = PROPERTIES.write().unwrap_or_else(|e| e.into_inner());
        props.insert(key.to_string(), value.to_string());
    }
}

/// Read a property previously published through [`SystemProperties`]
pub fn get_property(key: &str) -> Option<String> {
    let props = PROPERTIES.read().unwrap_or_else(|e| e.into_inner());
    props.get(key).cloned()
}

/// Keeps published attributes in memory instead of touching process state
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<(String, String)>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, in order
    pub fn published(&self) -> Vec<(String, String)> {
        self.published
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Most recent value published for `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.published()
            .into_iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

impl EnvironmentPublisher for RecordingPublisher {
    fn publish(&self, key: &str, value: &str) {
        self.published
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((key.to_string(), value.to_string()));
    }
}
