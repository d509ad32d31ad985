//! Simulated connection status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Connection status of the hub
///
/// `disconnected --connect()--> connecting --handshake--> connected`.
/// `Error` exists for display only; nothing in the simulation drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }

    /// Whether `connect()` may start a handshake from this state
    pub fn can_connect(&self) -> bool {
        matches!(self, ConnectionStatus::Disconnected)
    }

    /// Badge label
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "Disconnected",
            ConnectionStatus::Connecting => "Connecting",
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Error => "Error",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let status = ConnectionStatus::default();
        assert_eq!(status, ConnectionStatus::Disconnected);
        assert!(status.can_connect());
        assert!(!status.is_connected());
    }

    #[test]
    fn test_only_disconnected_can_connect() {
        assert!(!ConnectionStatus::Connecting.can_connect());
        assert!(!ConnectionStatus::Connected.can_connect());
        assert!(!ConnectionStatus::Error.can_connect());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ConnectionStatus::Connecting).unwrap();
        assert_eq!(json, "\"connecting\"");
    }
}
