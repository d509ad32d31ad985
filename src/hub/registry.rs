//! Subscriber registry
//!
//! Maps a topic to its listeners in registration order. Entries carry an
//! `active` flag so a listener removed mid-dispatch is skipped even though the
//! dispatcher is iterating over a snapshot.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::events::{Event, EventKind};

/// Callback invoked for every event delivered to a subscription
pub type Listener = Arc<dyn Fn(&Event) -> anyhow::Result<()> + Send + Sync>;

/// Subscription key: a recognized event kind or any other name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    Kind(EventKind),
    /// Legal to subscribe to, never fed by the generator
    Unrecognized(String),
}

impl Topic {
    /// Kind behind this topic, if recognized
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Topic::Kind(kind) => Some(*kind),
            Topic::Unrecognized(_) => None,
        }
    }
}

impl From<EventKind> for Topic {
    fn from(kind: EventKind) -> Self {
        Topic::Kind(kind)
    }
}

impl From<&str> for Topic {
    fn from(name: &str) -> Self {
        match name.parse::<EventKind>() {
            Ok(kind) => Topic::Kind(kind),
            Err(_) => Topic::Unrecognized(name.to_string()),
        }
    }
}

impl From<String> for Topic {
    fn from(name: String) -> Self {
        Topic::from(name.as_str())
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Kind(kind) => write!(f, "{}", kind),
            Topic::Unrecognized(name) => f.write_str(name),
        }
    }
}

/// Identity of one registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// One registered listener
pub(crate) struct ListenerEntry {
    pub(crate) id: ListenerId,
    active: AtomicBool,
    pub(crate) callback: Listener,
}

impl ListenerEntry {
    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Topic → ordered listeners
#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    next_id: u64,
    topics: HashMap<Topic, Vec<Arc<ListenerEntry>>>,
}

impl SubscriberRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a listener at the end of the topic's list
    pub(crate) fn insert(&mut self, topic: Topic, callback: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        self.topics.entry(topic).or_default().push(Arc::new(ListenerEntry {
            id,
            active: AtomicBool::new(true),
            callback,
        }));

        id
    }

    /// Remove exactly one listener; prunes the topic when it empties.
    /// Returns false when the listener was already gone.
    pub(crate) fn remove(&mut self, topic: &Topic, id: ListenerId) -> bool {
        let Some(listeners) = self.topics.get_mut(topic) else {
            return false;
        };

        let Some(position) = listeners.iter().position(|entry| entry.id == id) else {
            return false;
        };

        let entry = listeners.remove(position);
        entry.active.store(false, Ordering::Release);

        if listeners.is_empty() {
            self.topics.remove(topic);
        }

        true
    }

    /// Snapshot of the topic's listeners in registration order
    pub(crate) fn listeners(&self, topic: &Topic) -> Vec<Arc<ListenerEntry>> {
        self.topics.get(topic).cloned().unwrap_or_default()
    }

    /// Listener count for one topic
    pub(crate) fn count(&self, topic: &Topic) -> usize {
        self.topics.get(topic).map_or(0, Vec::len)
    }

    /// Number of topics with at least one listener
    pub(crate) fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Total listeners across topics
    pub(crate) fn total(&self) -> usize {
        self.topics.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Listener {
        Arc::new(|_event: &Event| Ok(()))
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut registry = SubscriberRegistry::new();
        let topic = Topic::from(EventKind::AgentStatus);
        let first = registry.insert(topic.clone(), noop());
        let second = registry.insert(topic.clone(), noop());

        let ids: Vec<ListenerId> = registry.listeners(&topic).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_remove_exactly_one_and_prune() {
        let mut registry = SubscriberRegistry::new();
        let topic = Topic::from(EventKind::MissionUpdate);
        let a = registry.insert(topic.clone(), noop());
        let b = registry.insert(topic.clone(), noop());

        assert!(registry.remove(&topic, a));
        assert_eq!(registry.count(&topic), 1);
        assert!(!registry.remove(&topic, a));

        assert!(registry.remove(&topic, b));
        assert_eq!(registry.topic_count(), 0);
    }

    #[test]
    fn test_removed_entry_is_inactive() {
        let mut registry = SubscriberRegistry::new();
        let topic = Topic::from(EventKind::TraceEvent);
        let id = registry.insert(topic.clone(), noop());
        let snapshot = registry.listeners(&topic);

        registry.remove(&topic, id);
        assert!(!snapshot[0].is_active());
    }

    #[test]
    fn test_topic_from_str() {
        assert_eq!(Topic::from("system_alert"), Topic::Kind(EventKind::SystemAlert));
        assert_eq!(
            Topic::from("budget_exceeded"),
            Topic::Unrecognized("budget_exceeded".to_string())
        );
        assert_eq!(Topic::from("budget_exceeded").kind(), None);
    }

    #[test]
    fn test_totals() {
        let mut registry = SubscriberRegistry::new();
        registry.insert(Topic::from(EventKind::AgentStatus), noop());
        registry.insert(Topic::from(EventKind::SystemAlert), noop());
        registry.insert(Topic::from("custom"), noop());
        assert_eq!(registry.topic_count(), 3);
        assert_eq!(registry.total(), 3);
    }
}
