//! Enumeration types for door-access events and configuration documents

use serde::{Deserialize, Serialize};

/// Role an event plays within a synthetic episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Door-open sensor fired
    DoorOpened,
    /// Activity while the door is open (neither flag set)
    Intermediate,
    /// Door-close sensor fired
    DoorClosed,
}

impl EventKind {
    /// Door-opened and door-closed flags for this kind
    pub fn flags(self) -> (bool, bool) {
        match self {
            EventKind::DoorOpened => (true, false),
            EventKind::Intermediate => (false, false),
            EventKind::DoorClosed => (false, true),
        }
    }
}

/// Supported configuration document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigFormat {
    /// YAML document (.yaml / .yml)
    Yaml,
    /// JSON document (.json)
    Json,
}

impl ConfigFormat {
    /// Determine the format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}
