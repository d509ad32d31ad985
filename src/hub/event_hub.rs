//! The event hub: subscription registry, simulated connection and the
//! generation loop that feeds listeners.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::task::{Context, Poll};

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::Stream;
use tracing::{debug, info, warn};

use super::connection::ConnectionStatus;
use super::events::{Event, EventKind};
use super::generator::EventGenerator;
use super::registry::{Listener, ListenerId, SubscriberRegistry, Topic};
use crate::config::HubConfig;
use crate::utils::sync::lock;

/// A listener invocation that returned an error or panicked
#[derive(Debug, Clone)]
pub struct ListenerFailure {
    pub topic: Topic,
    pub listener: ListenerId,
    pub event_id: String,
    pub message: String,
    pub panicked: bool,
}

/// Observability hook for listener failures
pub type ErrorHook = Arc<dyn Fn(&ListenerFailure) + Send + Sync>;

/// Outcome of one dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub kind: EventKind,
    pub delivered: usize,
    pub failed: usize,
}

struct HubInner {
    config: HubConfig,
    registry: Mutex<SubscriberRegistry>,
    status: watch::Sender<ConnectionStatus>,
    last_message: Mutex<Option<Event>>,
    generator: Mutex<EventGenerator>,
    error_hook: Mutex<Option<ErrorHook>>,
    task: Mutex<Option<JoinHandle<()>>>,
    dispatched: AtomicU64,
    failures: AtomicU64,
}

impl HubInner {
    fn publish(&self, event: Event) -> DispatchReport {
        let kind = event.kind();
        let topic = Topic::Kind(kind);
        let listeners = lock(&self.registry).listeners(&topic);

        let mut report = DispatchReport {
            kind,
            delivered: 0,
            failed: 0,
        };

        for entry in listeners {
            if !entry.is_active() {
                continue;
            }

            let outcome = catch_unwind(AssertUnwindSafe(|| (entry.callback)(&event)));
            let (message, panicked) = match outcome {
                Ok(Ok(())) => {
                    report.delivered += 1;
                    continue;
                }
                Ok(Err(err)) => (format!("{:#}", err), false),
                Err(panic) => (panic_message(panic.as_ref()), true),
            };

            report.failed += 1;
            self.report_failure(ListenerFailure {
                topic: topic.clone(),
                listener: entry.id,
                event_id: event.id.clone(),
                message,
                panicked,
            });
        }

        debug!(
            "Dispatched {} {} to {} listener(s), {} failed",
            kind, event.id, report.delivered, report.failed
        );

        self.dispatched.fetch_add(1, Ordering::Relaxed);
        *lock(&self.last_message) = Some(event);
        report
    }

    fn report_failure(&self, failure: ListenerFailure) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        warn!(
            "Listener {} on {} failed for event {}: {}",
            failure.listener, failure.topic, failure.event_id, failure.message
        );

        let hook = lock(&self.error_hook).clone();
        if let Some(hook) = hook {
            if catch_unwind(AssertUnwindSafe(|| hook(&failure))).is_err() {
                warn!("Listener error hook panicked");
            }
        }
    }

    fn status(&self) -> ConnectionStatus {
        *self.status.borrow()
    }
}

impl Drop for HubInner {
    fn drop(&mut self) {
        if let Some(task) = lock(&self.task).take() {
            task.abort();
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("listener panicked: {}", message)
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("listener panicked: {}", message)
    } else {
        "listener panicked".to_string()
    }
}

/// Process-local publish/subscribe hub for synthetic events
///
/// Cloning is cheap; clones share one registry and one generation loop.
#[derive(Clone)]
pub struct EventHub {
    inner: Arc<HubInner>,
}

impl EventHub {
    /// Create a disconnected hub
    pub fn new(config: HubConfig) -> Self {
        let (status, _rx) = watch::channel(ConnectionStatus::Disconnected);
        let generator = EventGenerator::from_seed(config.seed);

        Self {
            inner: Arc::new(HubInner {
                config,
                registry: Mutex::new(SubscriberRegistry::new()),
                status,
                last_message: Mutex::new(None),
                generator: Mutex::new(generator),
                error_hook: Mutex::new(None),
                task: Mutex::new(None),
                dispatched: AtomicU64::new(0),
                failures: AtomicU64::new(0),
            }),
        }
    }

    /// Register `listener` under `topic`
    ///
    /// Only events generated after this call are delivered.
    pub fn subscribe<F>(&self, topic: impl Into<Topic>, listener: F) -> Subscription
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let topic = topic.into();
        let callback: Listener = Arc::new(listener);
        let id = lock(&self.inner.registry).insert(topic.clone(), callback);
        debug!("Subscribed {} to {}", id, topic);

        Subscription {
            hub: Arc::downgrade(&self.inner),
            topic,
            id,
            released: AtomicBool::new(false),
        }
    }

    /// Subscribe and receive events as an async stream
    pub fn stream(&self, topic: impl Into<Topic>) -> EventStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = self.subscribe(topic, move |event| {
            tx.send(event.clone())
                .map_err(|_| anyhow::anyhow!("event stream receiver dropped"))
        });

        EventStream {
            _subscription: subscription,
            inner: UnboundedReceiverStream::new(rx),
        }
    }

    /// Start the simulated handshake; no-op unless disconnected
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(&self) {
        let started = self.inner.status.send_if_modified(|status| {
            if status.can_connect() {
                *status = ConnectionStatus::Connecting;
                true
            } else {
                false
            }
        });
        if !started {
            debug!("connect() ignored while {}", self.inner.status());
            return;
        }

        info!("Event hub connecting (simulated)");
        let weak = Arc::downgrade(&self.inner);
        let handshake = self.inner.config.handshake_delay;
        let task = tokio::spawn(run_generation_loop(weak, handshake));

        if let Some(previous) = lock(&self.inner.task).replace(task) {
            previous.abort();
        }
    }

    /// Stop the generation loop and return to `disconnected`
    pub fn shutdown(&self) {
        if let Some(task) = lock(&self.inner.task).take() {
            task.abort();
        }
        self.inner.status.send_replace(ConnectionStatus::Disconnected);
        info!("Event hub shut down");
    }

    /// Deliver a prepared event synchronously to the listeners of its kind
    pub fn publish(&self, event: Event) -> DispatchReport {
        self.inner.publish(event)
    }

    /// Accepted only while connected; nothing is transmitted
    pub fn send_message<T: Serialize>(&self, message: &T) -> bool {
        if !self.is_connected() {
            debug!("send_message dropped while {}", self.inner.status());
            return false;
        }

        match serde_json::to_string(message) {
            Ok(body) => {
                info!("Sending message: {}", body);
                true
            }
            Err(e) => {
                warn!("Failed to serialize outgoing message: {}", e);
                false
            }
        }
    }

    /// Install the listener failure hook, replacing any previous one
    pub fn on_listener_error<F>(&self, hook: F)
    where
        F: Fn(&ListenerFailure) + Send + Sync + 'static,
    {
        *lock(&self.inner.error_hook) = Some(Arc::new(hook));
    }

    pub fn status(&self) -> ConnectionStatus {
        self.inner.status()
    }

    pub fn is_connected(&self) -> bool {
        self.status().is_connected()
    }

    /// Watch connection status transitions
    pub fn status_changes(&self) -> watch::Receiver<ConnectionStatus> {
        self.inner.status.subscribe()
    }

    /// Most recently dispatched event
    pub fn last_message(&self) -> Option<Event> {
        lock(&self.inner.last_message).clone()
    }

    /// Listener count for one topic
    pub fn subscriber_count(&self, topic: impl Into<Topic>) -> usize {
        lock(&self.inner.registry).count(&topic.into())
    }

    /// Number of topics that currently have listeners
    pub fn topic_count(&self) -> usize {
        lock(&self.inner.registry).topic_count()
    }

    /// Listeners across all topics
    pub fn total_subscribers(&self) -> usize {
        lock(&self.inner.registry).total()
    }

    /// Events dispatched since creation
    pub fn dispatched_count(&self) -> u64 {
        self.inner.dispatched.load(Ordering::Relaxed)
    }

    /// Listener failures since creation
    pub fn failure_count(&self) -> u64 {
        self.inner.failures.load(Ordering::Relaxed)
    }

    pub fn config(&self) -> &HubConfig {
        &self.inner.config
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(HubConfig::default())
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("status", &self.status())
            .field("subscribers", &self.total_subscribers())
            .finish()
    }
}

/// Handshake, then generate until the hub is dropped or shut down.
/// Holds only a weak reference so the loop never keeps the hub alive.
async fn run_generation_loop(hub: Weak<HubInner>, handshake: std::time::Duration) {
    tokio::time::sleep(handshake).await;

    {
        let Some(inner) = hub.upgrade() else { return };
        inner.status.send_replace(ConnectionStatus::Connected);
        info!("Event hub connected (simulated)");
    }

    loop {
        let gap = {
            let Some(inner) = hub.upgrade() else { return };
            let (min, max) = (inner.config.min_interval, inner.config.max_interval);
            // Guard must drop before `inner`
            let gap = lock(&inner.generator).next_interval(min, max);
            gap
        };

        tokio::time::sleep(gap).await;

        let Some(inner) = hub.upgrade() else { return };
        if !inner.status().is_connected() {
            return;
        }

        let event = lock(&inner.generator).next_event();
        inner.publish(event);
    }
}

/// Handle to one registered listener
///
/// `unsubscribe()` removes exactly this listener and is idempotent. Dropping
/// the handle unsubscribes as well.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    hub: Weak<HubInner>,
    topic: Topic,
    id: ListenerId,
    released: AtomicBool,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if self.released.swap(true, Ordering::AcqRel) {
            return;
        }

        if let Some(inner) = self.hub.upgrade() {
            if lock(&inner.registry).remove(&self.topic, self.id) {
                debug!("Unsubscribed {} from {}", self.id, self.topic);
            }
        }
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        !self.released.load(Ordering::Acquire)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Async stream of the events delivered to one subscription
pub struct EventStream {
    _subscription: Subscription,
    inner: UnboundedReceiverStream<Event>,
}

impl Stream for EventStream {
    type Item = Event;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Event>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
