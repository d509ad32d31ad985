//! Simulated log tail of one agent

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::feed::BoundedFeed;
use super::mount::{spawn_ticker, Mounted};
use crate::catalog::AgentProfile;

const MESSAGES: [&str; 5] = [
    "Processing data chunk 47/120",
    "Pattern recognition confidence: 87.3%",
    "Delegating subtask to child agent",
    "Memory optimization completed",
    "Knowledge graph updated with new insights",
];

const WARN_PROBABILITY: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogLine {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct AgentLog {
    agent_id: String,
    lines: BoundedFeed<LogLine>,
    rng: StdRng,
}

impl AgentLog {
    pub fn new(agent_id: impl Into<String>, capacity: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            agent_id: agent_id.into(),
            lines: BoundedFeed::new(capacity),
            rng,
        }
    }

    /// Log seeded with the profile's recorded lines
    pub fn for_profile(profile: &AgentProfile, capacity: usize, seed: Option<u64>) -> Self {
        let mut log = Self::new(profile.id.clone(), capacity, seed);
        // Recorded lines are newest first; push oldest first to keep that order
        log.lines.extend(profile.logs.iter().rev().map(|line| LogLine {
            timestamp: line.timestamp,
            level: if line.warn { LogLevel::Warn } else { LogLevel::Info },
            message: line.message.clone(),
        }));
        log
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn lines(&self) -> &BoundedFeed<LogLine> {
        &self.lines
    }

    /// Prepend one simulated line
    pub fn tick(&mut self) {
        let level = if self.rng.gen_bool(WARN_PROBABILITY) {
            LogLevel::Warn
        } else {
            LogLevel::Info
        };
        let message = MESSAGES[self.rng.gen_range(0..MESSAGES.len())];

        self.lines.push(LogLine {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
        });
    }

    /// Timer only; the log does not listen to the hub
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(log: AgentLog, tick: Duration) -> Mounted<AgentLog> {
        let view = Arc::new(Mutex::new(log));
        Mounted::new("agent_log", view.clone()).with_timer(spawn_ticker(&view, tick, AgentLog::tick))
    }
}
