// Mission Control Configuration
//
// Timing, capacity and dashboard settings. Every field has a default, so an
// empty file (or no file at all) yields the stock simulation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionControlConfig {
    /// Event hub timing and randomness
    pub hub: HubConfig,

    /// View consumer capacities and local timers
    pub views: ViewConfig,

    /// Terminal dashboard settings
    pub dashboard: DashboardConfig,
}

/// Event hub configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Delay of the simulated handshake (connecting → connected)
    #[serde(with = "serde_millis")]
    pub handshake_delay: Duration,

    /// Lower bound of the random gap between generated events
    #[serde(with = "serde_millis")]
    pub min_interval: Duration,

    /// Upper bound of the random gap between generated events
    #[serde(with = "serde_millis")]
    pub max_interval: Duration,

    /// Fixed RNG seed for reproducible streams (entropy when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            handshake_delay: Duration::from_millis(1000),
            min_interval: Duration::from_millis(3000),
            max_interval: Duration::from_millis(5000),
            seed: None,
        }
    }
}

/// View consumer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Activity feed length
    pub activity_capacity: usize,

    /// Notification list length
    pub notification_capacity: usize,

    /// Agent log length
    pub agent_log_capacity: usize,

    /// Reflexion anomaly list length
    pub anomaly_capacity: usize,

    /// Health metric drift period
    #[serde(with = "serde_millis")]
    pub health_tick: Duration,

    /// Agent log line period
    #[serde(with = "serde_millis")]
    pub agent_log_tick: Duration,

    /// Reflexion monitor period
    #[serde(with = "serde_millis")]
    pub reflexion_tick: Duration,

    /// Trace graph progress period
    #[serde(with = "serde_millis")]
    pub trace_tick: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            activity_capacity: 50,
            notification_capacity: 10,
            agent_log_capacity: 20,
            anomaly_capacity: 10,
            health_tick: Duration::from_millis(4000),
            agent_log_tick: Duration::from_millis(3000),
            reflexion_tick: Duration::from_millis(5000),
            trace_tick: Duration::from_millis(2000),
        }
    }
}

/// Terminal dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Redraw interval
    #[serde(with = "serde_millis")]
    pub refresh: Duration,

    /// Log file (the terminal is owned by the UI)
    pub log_file: PathBuf,

    /// Agent shown in the agent log panel
    pub focus_agent: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh: Duration::from_millis(250),
            log_file: std::env::temp_dir().join("mission-control-dash.log"),
            focus_agent: "AGT-001".to_string(),
        }
    }
}

// Durations are written as integer milliseconds
mod serde_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

impl MissionControlConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: MissionControlConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hub.min_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "hub: min_interval must be greater than 0".to_string(),
            ));
        }

        if self.hub.min_interval > self.hub.max_interval {
            return Err(ConfigError::ValidationError(
                "hub: min_interval must not exceed max_interval".to_string(),
            ));
        }

        let capacities = [
            ("activity_capacity", self.views.activity_capacity),
            ("notification_capacity", self.views.notification_capacity),
            ("agent_log_capacity", self.views.agent_log_capacity),
            ("anomaly_capacity", self.views.anomaly_capacity),
        ];
        for (name, capacity) in capacities {
            if capacity == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "views: {} must be greater than 0",
                    name
                )));
            }
        }

        let ticks = [
            ("health_tick", self.views.health_tick),
            ("agent_log_tick", self.views.agent_log_tick),
            ("reflexion_tick", self.views.reflexion_tick),
            ("trace_tick", self.views.trace_tick),
        ];
        for (name, tick) in ticks {
            if tick.is_zero() {
                return Err(ConfigError::ValidationError(format!(
                    "views: {} must be greater than 0",
                    name
                )));
            }
        }

        if self.dashboard.refresh.is_zero() {
            return Err(ConfigError::ValidationError(
                "dashboard: refresh must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
