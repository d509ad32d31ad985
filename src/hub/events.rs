//! Event kinds, typed payloads and the event envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MissionControlError;

/// The five kinds of event the hub generates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    MissionUpdate,
    AgentStatus,
    SubgoalProgress,
    SystemAlert,
    TraceEvent,
}

impl EventKind {
    /// All kinds, in generation order
    pub const ALL: [EventKind; 5] = [
        EventKind::MissionUpdate,
        EventKind::AgentStatus,
        EventKind::SubgoalProgress,
        EventKind::SystemAlert,
        EventKind::TraceEvent,
    ];

    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::MissionUpdate => "mission_update",
            EventKind::AgentStatus => "agent_status",
            EventKind::SubgoalProgress => "subgoal_progress",
            EventKind::SystemAlert => "system_alert",
            EventKind::TraceEvent => "trace_event",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = MissionControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| MissionControlError::UnknownEventKind(s.to_string()))
    }
}

/// Lifecycle state of a mission or subgoal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Pending,
    Queued,
    Active,
    Completed,
    Failed,
}

impl MissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionStatus::Pending => "pending",
            MissionStatus::Queued => "queued",
            MissionStatus::Active => "active",
            MissionStatus::Completed => "completed",
            MissionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime state of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    Active,
    Idle,
    Terminated,
    Error,
}

impl AgentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentState::Active => "active",
            AgentState::Idle => "idle",
            AgentState::Terminated => "terminated",
            AgentState::Error => "error",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert / anomaly severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mission progress/status change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionUpdate {
    pub mission_id: String,
    pub progress: u8,
    pub status: MissionStatus,
}

/// Agent performance sample carried by status events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentPerformance {
    /// Seconds
    pub latency: f64,
    /// Percent
    pub success_rate: f64,
}

/// Agent status change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub agent_id: String,
    pub status: AgentState,
    pub performance: AgentPerformance,
}

/// Subgoal progress report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubgoalProgress {
    pub subgoal_id: String,
    pub progress: u8,
    pub agents_assigned: u32,
}

/// System alert raised by an engine component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemAlert {
    pub severity: Severity,
    pub message: String,
    pub component: String,
}

/// Node-level trace event (spawn, delegate, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub node_id: String,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Typed payload, one variant per event kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    MissionUpdate(MissionUpdate),
    AgentStatus(AgentStatus),
    SubgoalProgress(SubgoalProgress),
    SystemAlert(SystemAlert),
    TraceEvent(TraceEvent),
}

impl EventPayload {
    /// Kind discriminant of this payload
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::MissionUpdate(_) => EventKind::MissionUpdate,
            EventPayload::AgentStatus(_) => EventKind::AgentStatus,
            EventPayload::SubgoalProgress(_) => EventKind::SubgoalProgress,
            EventPayload::SystemAlert(_) => EventKind::SystemAlert,
            EventPayload::TraceEvent(_) => EventKind::TraceEvent,
        }
    }
}

/// Event envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event ID
    pub id: String,
    /// Event payload
    #[serde(flatten)]
    pub payload: EventPayload,
    /// When the event was generated
    pub timestamp: DateTime<Utc>,
}

impl Event {
    /// Create new event stamped with the current time
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            payload,
            timestamp: Utc::now(),
        }
    }

    /// Kind of this event
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// Create mission update event
    pub fn mission_update(mission_id: impl Into<String>, progress: u8, status: MissionStatus) -> Self {
        Self::new(EventPayload::MissionUpdate(MissionUpdate {
            mission_id: mission_id.into(),
            progress: progress.min(100),
            status,
        }))
    }

    /// Create agent status event
    pub fn agent_status(
        agent_id: impl Into<String>,
        status: AgentState,
        performance: AgentPerformance,
    ) -> Self {
        Self::new(EventPayload::AgentStatus(AgentStatus {
            agent_id: agent_id.into(),
            status,
            performance,
        }))
    }

    /// Create subgoal progress event
    pub fn subgoal_progress(subgoal_id: impl Into<String>, progress: u8, agents_assigned: u32) -> Self {
        Self::new(EventPayload::SubgoalProgress(SubgoalProgress {
            subgoal_id: subgoal_id.into(),
            progress: progress.min(100),
            agents_assigned,
        }))
    }

    /// Create system alert event
    pub fn system_alert(
        severity: Severity,
        message: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self::new(EventPayload::SystemAlert(SystemAlert {
            severity,
            message: message.into(),
            component: component.into(),
        }))
    }

    /// Create trace event
    pub fn trace_event(
        node_id: impl Into<String>,
        event: impl Into<String>,
        parent_id: Option<String>,
    ) -> Self {
        Self::new(EventPayload::TraceEvent(TraceEvent {
            node_id: node_id.into(),
            event: event.into(),
            parent_id,
        }))
    }

    /// Timestamp rendered as ISO-8601
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339()
    }

    /// Convert to a single JSON line
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = Event::mission_update("MG-001", 42, MissionStatus::Active);
        assert_eq!(event.kind(), EventKind::MissionUpdate);
        match event.payload {
            EventPayload::MissionUpdate(update) => {
                assert_eq!(update.mission_id, "MG-001");
                assert_eq!(update.progress, 42);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn test_progress_is_capped() {
        let event = Event::subgoal_progress("SG-001", 250, 2);
        match event.payload {
            EventPayload::SubgoalProgress(progress) => assert_eq!(progress.progress, 100),
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(EventKind::MissionUpdate.to_string(), "mission_update");
        assert_eq!("trace_event".parse::<EventKind>().unwrap(), EventKind::TraceEvent);
        assert!(matches!(
            "heartbeat".parse::<EventKind>(),
            Err(MissionControlError::UnknownEventKind(_))
        ));
    }

    #[test]
    fn test_json_shape() {
        let event = Event::system_alert(Severity::High, "System performance anomaly detected", "A2-Engine-Core");
        let value: serde_json::Value = serde_json::from_str(&event.to_json_line()).unwrap();

        assert_eq!(value["type"], "system_alert");
        assert_eq!(value["severity"], "high");
        assert_eq!(value["component"], "A2-Engine-Core");
        assert!(value["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_json_parse_back() {
        let event = Event::trace_event("NODE-7", "spawn", Some("NODE-3".to_string()));
        let parsed: Event = serde_json::from_str(&event.to_json_line()).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_trace_without_parent_omits_field() {
        let event = Event::trace_event("NODE-1", "spawn", None);
        let line = event.to_json_line();
        assert!(!line.contains("parent_id"));
    }
}
