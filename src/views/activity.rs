//! Activity feed: one line per event of any kind

use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::feed::BoundedFeed;
use super::mount::{subscribe_view, Mounted};
use crate::hub::{AgentState, Event, EventHub, EventKind, EventPayload, MissionStatus, Severity};

/// Entity family an activity line is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Mission,
    Agent,
    Subgoal,
    System,
    Trace,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Mission => "mission",
            ActivityKind::Agent => "agent",
            ActivityKind::Subgoal => "subgoal",
            ActivityKind::System => "system",
            ActivityKind::Trace => "trace",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Id of the event the entry was derived from
    pub id: String,
    pub kind: ActivityKind,
    pub action: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl ActivityEntry {
    pub fn from_event(event: &Event) -> Self {
        let (kind, action, description, entity_id, severity) = match &event.payload {
            EventPayload::MissionUpdate(update) => {
                let completed = update.status == MissionStatus::Completed;
                let description = if completed {
                    format!("Mission {} completed successfully", update.mission_id)
                } else {
                    format!(
                        "Mission {} progress updated to {}%",
                        update.mission_id, update.progress
                    )
                };
                (
                    ActivityKind::Mission,
                    if completed { "completed" } else { "updated" }.to_string(),
                    description,
                    Some(update.mission_id.clone()),
                    None,
                )
            }
            EventPayload::AgentStatus(status) => (
                ActivityKind::Agent,
                status.status.to_string(),
                format!("Agent {} status changed to {}", status.agent_id, status.status),
                Some(status.agent_id.clone()),
                Some(if status.status == AgentState::Error {
                    Severity::High
                } else {
                    Severity::Low
                }),
            ),
            EventPayload::SubgoalProgress(progress) => (
                ActivityKind::Subgoal,
                "progress".to_string(),
                format!(
                    "Subgoal {} progress updated to {}%",
                    progress.subgoal_id, progress.progress
                ),
                Some(progress.subgoal_id.clone()),
                None,
            ),
            EventPayload::SystemAlert(alert) => (
                ActivityKind::System,
                "alert".to_string(),
                alert.message.clone(),
                None,
                Some(alert.severity),
            ),
            EventPayload::TraceEvent(trace) => {
                let origin = trace
                    .parent_id
                    .as_ref()
                    .map(|parent| format!(" from {}", parent))
                    .unwrap_or_default();
                (
                    ActivityKind::Trace,
                    trace.event.clone(),
                    format!("Node {} {} event{}", trace.node_id, trace.event, origin),
                    Some(trace.node_id.clone()),
                    None,
                )
            }
        };

        Self {
            id: event.id.clone(),
            kind,
            action,
            description,
            timestamp: event.timestamp,
            entity_id,
            severity,
        }
    }
}

/// Newest-first activity feed
#[derive(Debug, Clone)]
pub struct ActivityFeed {
    entries: BoundedFeed<ActivityEntry>,
}

impl ActivityFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: BoundedFeed::new(capacity),
        }
    }

    pub fn apply(&mut self, event: &Event) {
        self.entries.push(ActivityEntry::from_event(event));
    }

    pub fn entries(&self) -> &BoundedFeed<ActivityEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Subscribe to every event kind
    pub fn mount(hub: &EventHub, capacity: usize) -> Mounted<ActivityFeed> {
        let view = Arc::new(Mutex::new(ActivityFeed::new(capacity)));
        EventKind::ALL
            .into_iter()
            .fold(Mounted::new("activity", view.clone()), |mounted, kind| {
                mounted.with_subscription(subscribe_view(hub, kind, &view, ActivityFeed::apply))
            })
    }
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::AgentPerformance;

    fn perf() -> AgentPerformance {
        AgentPerformance {
            latency: 1.2,
            success_rate: 97.0,
        }
    }

    #[test]
    fn test_mission_completed_entry() {
        let event = Event::mission_update("MG-001", 100, MissionStatus::Completed);
        let entry = ActivityEntry::from_event(&event);

        assert_eq!(entry.kind, ActivityKind::Mission);
        assert_eq!(entry.action, "completed");
        assert_eq!(entry.description, "Mission MG-001 completed successfully");
        assert_eq!(entry.entity_id.as_deref(), Some("MG-001"));
        assert_eq!(entry.id, event.id);
    }

    #[test]
    fn test_mission_progress_entry() {
        let entry = ActivityEntry::from_event(&Event::mission_update("MG-002", 41, MissionStatus::Active));
        assert_eq!(entry.action, "updated");
        assert_eq!(entry.description, "Mission MG-002 progress updated to 41%");
    }

    #[test]
    fn test_agent_entry_severity() {
        let error = ActivityEntry::from_event(&Event::agent_status("AGT-004", AgentState::Error, perf()));
        assert_eq!(error.action, "error");
        assert_eq!(error.severity, Some(Severity::High));
        assert_eq!(error.description, "Agent AGT-004 status changed to error");

        let idle = ActivityEntry::from_event(&Event::agent_status("AGT-004", AgentState::Idle, perf()));
        assert_eq!(idle.severity, Some(Severity::Low));
    }

    #[test]
    fn test_alert_and_trace_entries() {
        let alert = ActivityEntry::from_event(&Event::system_alert(
            Severity::Medium,
            "System performance anomaly detected",
            "A2-Engine-Core",
        ));
        assert_eq!(alert.kind, ActivityKind::System);
        assert_eq!(alert.description, "System performance anomaly detected");
        assert_eq!(alert.severity, Some(Severity::Medium));
        assert!(alert.entity_id.is_none());

        let trace = ActivityEntry::from_event(&Event::trace_event(
            "NODE-12",
            "spawn",
            Some("NODE-3".to_string()),
        ));
        assert_eq!(trace.description, "Node NODE-12 spawn event from NODE-3");

        let root = ActivityEntry::from_event(&Event::trace_event("NODE-0", "spawn", None));
        assert_eq!(root.description, "Node NODE-0 spawn event");
    }

    #[test]
    fn test_mounted_feed_receives_all_kinds() {
        let hub = EventHub::default();
        let feed = ActivityFeed::mount(&hub, 3);
        assert_eq!(feed.subscription_count(), EventKind::ALL.len());

        hub.publish(Event::subgoal_progress("SG-001", 10, 1));
        hub.publish(Event::system_alert(Severity::Low, "a", "b"));
        hub.publish(Event::trace_event("NODE-1", "spawn", None));
        hub.publish(Event::mission_update("MG-003", 99, MissionStatus::Failed));

        let kinds: Vec<ActivityKind> = feed.read(|f| f.entries().iter().map(|e| e.kind).collect());
        assert_eq!(
            kinds,
            vec![ActivityKind::Mission, ActivityKind::Trace, ActivityKind::System]
        );
    }
}
