//! Live notifications derived from alerts, completions and agent errors

use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::feed::BoundedFeed;
use super::mount::{subscribe_view, Mounted};
use crate::hub::{AgentState, Event, EventHub, EventKind, EventPayload, MissionStatus, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
    Info,
}

impl NotificationLevel {
    pub fn from_severity(severity: Severity) -> Self {
        match severity {
            Severity::High => NotificationLevel::Error,
            Severity::Medium => NotificationLevel::Warning,
            Severity::Low => NotificationLevel::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
            NotificationLevel::Info => "info",
        }
    }
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl Notification {
    /// Notification for `event`, if it warrants one
    pub fn from_event(event: &Event) -> Option<Self> {
        let (level, title, message) = match &event.payload {
            EventPayload::SystemAlert(alert) => (
                NotificationLevel::from_severity(alert.severity),
                "System Alert",
                alert.message.clone(),
            ),
            EventPayload::MissionUpdate(update) if update.status == MissionStatus::Completed => (
                NotificationLevel::Success,
                "Mission Completed",
                format!("Mission {} has been completed successfully", update.mission_id),
            ),
            EventPayload::AgentStatus(status) if status.status == AgentState::Error => (
                NotificationLevel::Error,
                "Agent Error",
                format!("Agent {} encountered an error", status.agent_id),
            ),
            _ => return None,
        };

        Some(Self {
            id: event.id.clone(),
            level,
            title: title.to_string(),
            message,
            timestamp: event.timestamp,
            read: false,
        })
    }
}

/// Bounded notification list with read tracking
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    notifications: BoundedFeed<Notification>,
}

impl NotificationCenter {
    pub fn new(capacity: usize) -> Self {
        Self {
            notifications: BoundedFeed::new(capacity),
        }
    }

    pub fn apply(&mut self, event: &Event) {
        if let Some(notification) = Notification::from_event(event) {
            self.notifications.push(notification);
        }
    }

    pub fn notifications(&self) -> &BoundedFeed<Notification> {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Returns false when no notification has that id
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in self.notifications.iter_mut() {
            notification.read = true;
        }
    }

    pub fn clear_all(&mut self) {
        self.notifications.clear();
    }

    pub fn mount(hub: &EventHub, capacity: usize) -> Mounted<NotificationCenter> {
        let view = Arc::new(Mutex::new(NotificationCenter::new(capacity)));
        [EventKind::SystemAlert, EventKind::MissionUpdate, EventKind::AgentStatus]
            .into_iter()
            .fold(Mounted::new("notifications", view.clone()), |mounted, kind| {
                mounted.with_subscription(subscribe_view(hub, kind, &view, NotificationCenter::apply))
            })
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::AgentPerformance;

    fn agent(status: AgentState) -> Event {
        Event::agent_status(
            "AGT-002",
            status,
            AgentPerformance {
                latency: 0.4,
                success_rate: 91.0,
            },
        )
    }

    #[test]
    fn test_alert_levels() {
        for (severity, level) in [
            (Severity::High, NotificationLevel::Error),
            (Severity::Medium, NotificationLevel::Warning),
            (Severity::Low, NotificationLevel::Info),
        ] {
            let notification =
                Notification::from_event(&Event::system_alert(severity, "boom", "A2-Engine-Core")).unwrap();
            assert_eq!(notification.level, level);
            assert_eq!(notification.title, "System Alert");
            assert_eq!(notification.message, "boom");
        }
    }

    #[test]
    fn test_only_notable_events() {
        assert!(Notification::from_event(&Event::mission_update("MG-001", 50, MissionStatus::Active)).is_none());
        assert!(Notification::from_event(&agent(AgentState::Idle)).is_none());
        assert!(Notification::from_event(&Event::subgoal_progress("SG-001", 5, 1)).is_none());

        let done = Notification::from_event(&Event::mission_update("MG-001", 100, MissionStatus::Completed)).unwrap();
        assert_eq!(done.level, NotificationLevel::Success);
        assert_eq!(done.message, "Mission MG-001 has been completed successfully");

        let failed = Notification::from_event(&agent(AgentState::Error)).unwrap();
        assert_eq!(failed.title, "Agent Error");
        assert_eq!(failed.message, "Agent AGT-002 encountered an error");
    }

    #[test]
    fn test_read_tracking() {
        let mut center = NotificationCenter::new(10);
        let first = Event::system_alert(Severity::Low, "one", "x");
        center.apply(&first);
        center.apply(&Event::system_alert(Severity::High, "two", "x"));
        assert_eq!(center.unread_count(), 2);

        assert!(center.mark_read(&first.id));
        assert_eq!(center.unread_count(), 1);
        assert!(!center.mark_read("missing"));

        center.mark_all_read();
        assert_eq!(center.unread_count(), 0);

        center.clear_all();
        assert!(center.notifications().is_empty());
    }

    #[test]
    fn test_capacity() {
        let mut center = NotificationCenter::new(10);
        for _ in 0..25 {
            center.apply(&Event::system_alert(Severity::Medium, "again", "x"));
        }
        assert_eq!(center.notifications().len(), 10);
    }

    #[test]
    fn test_mounted_center() {
        let hub = EventHub::default();
        let mut center = NotificationCenter::mount(&hub, 10);
        assert_eq!(center.subscription_count(), 3);

        hub.publish(agent(AgentState::Error));
        hub.publish(Event::trace_event("NODE-1", "spawn", None));
        assert_eq!(center.read(|c| c.unread_count()), 1);

        center.update(|c| c.mark_all_read());
        assert_eq!(center.read(|c| c.unread_count()), 0);

        center.unmount();
        assert_eq!(hub.total_subscribers(), 0);
    }
}
