//! Mount/unmount lifecycle shared by the view consumers
//!
//! A mounted view owns its state behind `Arc<Mutex<_>>`, the hub
//! subscriptions feeding it and any local timer tasks. Unmounting (or
//! dropping the handle) releases every subscription exactly once and aborts
//! every timer before returning.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::hub::{Event, EventHub, EventKind, Subscription};
use crate::utils::sync::lock;

/// A view attached to a hub
pub struct Mounted<V> {
    name: &'static str,
    view: Arc<Mutex<V>>,
    subscriptions: Vec<Subscription>,
    timers: Vec<JoinHandle<()>>,
    mounted: bool,
}

impl<V> Mounted<V> {
    pub(crate) fn new(name: &'static str, view: Arc<Mutex<V>>) -> Self {
        Self {
            name,
            view,
            subscriptions: Vec::new(),
            timers: Vec::new(),
            mounted: true,
        }
    }

    pub(crate) fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.subscriptions.push(subscription);
        self
    }

    pub(crate) fn with_timer(mut self, timer: JoinHandle<()>) -> Self {
        self.timers.push(timer);
        self
    }

    /// Run `f` against the current state
    pub fn read<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&lock(&self.view))
    }

    /// Run `f` against the state mutably (user actions such as mark-read)
    pub fn update<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        f(&mut lock(&self.view))
    }

    /// Subscriptions still registered with the hub
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.iter().filter(|s| s.is_active()).count()
    }

    /// Timer tasks still running
    pub fn timer_count(&self) -> usize {
        self.timers.iter().filter(|t| !t.is_finished()).count()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Release every subscription and abort every timer. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;

        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
        for timer in self.timers.drain(..) {
            timer.abort();
        }

        debug!("Unmounted {} view", self.name);
    }
}

impl<V: Clone> Mounted<V> {
    /// Clone of the current state
    pub fn snapshot(&self) -> V {
        lock(&self.view).clone()
    }
}

impl<V> Drop for Mounted<V> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<V> std::fmt::Debug for Mounted<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mounted")
            .field("name", &self.name)
            .field("mounted", &self.mounted)
            .field("subscriptions", &self.subscription_count())
            .field("timers", &self.timers.len())
            .finish()
    }
}

/// Subscribe `apply` to `kind`, applying each event to the shared view state
pub(crate) fn subscribe_view<V, F>(
    hub: &EventHub,
    kind: EventKind,
    view: &Arc<Mutex<V>>,
    apply: F,
) -> Subscription
where
    V: Send + 'static,
    F: Fn(&mut V, &Event) + Send + Sync + 'static,
{
    let weak = Arc::downgrade(view);
    hub.subscribe(kind, move |event| {
        if let Some(view) = weak.upgrade() {
            apply(&mut lock(&view), event);
        }
        Ok(())
    })
}

/// Spawn a local timer calling `tick` every `period`, first after one period
///
/// Must be called from within a tokio runtime.
pub(crate) fn spawn_ticker<V, F>(view: &Arc<Mutex<V>>, period: Duration, mut tick: F) -> JoinHandle<()>
where
    V: Send + 'static,
    F: FnMut(&mut V) + Send + 'static,
{
    let weak = Arc::downgrade(view);
    let period = period.max(Duration::from_millis(1));

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            let Some(view) = weak.upgrade() else { return };
            tick(&mut lock(&view));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::MissionStatus;

    #[derive(Debug, Default, Clone)]
    struct Counter {
        events: usize,
        ticks: usize,
    }

    #[test]
    fn test_subscription_feeds_view() {
        let hub = EventHub::default();
        let view = Arc::new(Mutex::new(Counter::default()));
        let mounted = Mounted::new("counter", view.clone()).with_subscription(subscribe_view(
            &hub,
            EventKind::MissionUpdate,
            &view,
            |state: &mut Counter, _event| state.events += 1,
        ));

        hub.publish(Event::mission_update("MG-001", 10, MissionStatus::Active));
        assert_eq!(mounted.read(|c| c.events), 1);
        assert_eq!(mounted.subscription_count(), 1);
    }

    #[test]
    fn test_unmount_is_idempotent() {
        let hub = EventHub::default();
        let view = Arc::new(Mutex::new(Counter::default()));
        let mut mounted = Mounted::new("counter", view.clone()).with_subscription(subscribe_view(
            &hub,
            EventKind::MissionUpdate,
            &view,
            |state: &mut Counter, _event| state.events += 1,
        ));

        mounted.unmount();
        mounted.unmount();
        assert!(!mounted.is_mounted());
        assert_eq!(hub.total_subscribers(), 0);

        hub.publish(Event::mission_update("MG-001", 10, MissionStatus::Active));
        assert_eq!(mounted.snapshot().events, 0);
    }

    #[test]
    fn test_drop_releases_subscriptions() {
        let hub = EventHub::default();
        let view = Arc::new(Mutex::new(Counter::default()));
        {
            let _mounted = Mounted::new("counter", view.clone()).with_subscription(
                subscribe_view(&hub, EventKind::AgentStatus, &view, |state: &mut Counter, _| {
                    state.events += 1
                }),
            );
            assert_eq!(hub.subscriber_count(EventKind::AgentStatus), 1);
        }
        assert_eq!(hub.subscriber_count(EventKind::AgentStatus), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_fires_after_each_period() {
        let view = Arc::new(Mutex::new(Counter::default()));
        let mounted = Mounted::new("counter", view.clone()).with_timer(spawn_ticker(
            &view,
            Duration::from_millis(100),
            |state: &mut Counter| state.ticks += 1,
        ));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(mounted.read(|c| c.ticks), 0);

        tokio::time::sleep(Duration::from_millis(260)).await;
        assert_eq!(mounted.read(|c| c.ticks), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_stops_ticker() {
        let view = Arc::new(Mutex::new(Counter::default()));
        let mut mounted = Mounted::new("counter", view.clone()).with_timer(spawn_ticker(
            &view,
            Duration::from_millis(100),
            |state: &mut Counter| state.ticks += 1,
        ));

        tokio::time::sleep(Duration::from_millis(150)).await;
        mounted.unmount();
        tokio::time::sleep(Duration::from_millis(1000)).await;

        assert_eq!(mounted.read(|c| c.ticks), 1);
        assert_eq!(mounted.timer_count(), 0);
    }
}
