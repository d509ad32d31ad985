//! Event Hub Integration Tests
//!
//! Exercises the hub through its public surface only:
//! 1. Per-kind delivery to callback and stream subscribers
//! 2. Unsubscribe and drop semantics
//! 3. No replay for late subscribers
//! 4. Listener failure isolation and the failure hook
//! 5. Handshake and randomized generation under paused time
//! 6. Seeded reproducibility

use mission_control_core::{
    hub::{AgentPerformance, AgentState, MissionStatus, Severity},
    ConnectionStatus, Event, EventHub, EventKind, EventPayload, HubConfig, ListenerFailure,
    Subscription,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_stream::StreamExt;
use tokio_test::{assert_pending, assert_ready, task};

fn seeded(seed: u64) -> HubConfig {
    HubConfig {
        seed: Some(seed),
        ..HubConfig::default()
    }
}

/// Listener that records every event it sees
fn recorder(hub: &EventHub, kind: EventKind) -> (Arc<Mutex<Vec<Event>>>, Subscription) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let subscription = hub.subscribe(kind, move |event: &Event| {
        sink.lock().unwrap().push(event.clone());
        Ok(())
    });
    (seen, subscription)
}

#[test]
fn test_each_kind_reaches_only_its_subscribers() {
    let hub = EventHub::default();
    let (missions, _m) = recorder(&hub, EventKind::MissionUpdate);
    let (alerts, _a) = recorder(&hub, EventKind::SystemAlert);

    hub.publish(Event::mission_update("MG-002", 40, MissionStatus::Active));
    hub.publish(Event::agent_status(
        "AGT-003",
        AgentState::Idle,
        AgentPerformance {
            latency: 1.2,
            success_rate: 97.0,
        },
    ));
    hub.publish(Event::system_alert(Severity::High, "disk full", "A2-Engine-Core"));

    assert_eq!(missions.lock().unwrap().len(), 1);
    assert_eq!(alerts.lock().unwrap().len(), 1);
    assert_eq!(hub.dispatched_count(), 3);
}

#[test]
fn test_unsubscribe_then_publish_delivers_nothing() {
    let hub = EventHub::default();
    let (seen, subscription) = recorder(&hub, EventKind::SubgoalProgress);

    subscription.unsubscribe();
    subscription.unsubscribe();
    assert!(!subscription.is_active());

    let report = hub.publish(Event::subgoal_progress("SG-001", 50, 2));
    assert_eq!(report.delivered, 0);
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(hub.subscriber_count(EventKind::SubgoalProgress), 0);
}

#[test]
fn test_subscriptions_outliving_hub_are_harmless() {
    let hub = EventHub::default();
    let (_seen, subscription) = recorder(&hub, EventKind::TraceEvent);
    drop(hub);

    subscription.unsubscribe();
    assert!(!subscription.is_active());
}

#[tokio::test]
async fn test_late_stream_sees_no_replay() {
    let hub = EventHub::default();
    hub.publish(Event::system_alert(Severity::Low, "before", "A2-Engine-Core"));

    let mut stream = hub.stream(EventKind::SystemAlert);
    {
        let mut next = task::spawn(stream.next());
        assert_pending!(next.poll());

        hub.publish(Event::system_alert(Severity::Low, "after", "A2-Engine-Core"));
        assert!(next.is_woken());

        let event = assert_ready!(next.poll()).expect("stream ended early");
        match event.payload {
            EventPayload::SystemAlert(alert) => {
                assert_eq!(alert.message, "after")
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    let mut next = task::spawn(stream.next());
    assert_pending!(next.poll());
}

#[test]
fn test_failing_listener_does_not_block_siblings() {
    let hub = EventHub::default();
    let failures: Arc<Mutex<Vec<ListenerFailure>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = failures.clone();
    hub.on_listener_error(move |failure| sink.lock().unwrap().push(failure.clone()));

    let (before, _b) = recorder(&hub, EventKind::AgentStatus);
    let _erroring = hub.subscribe(EventKind::AgentStatus, |_event: &Event| {
        Err(anyhow::anyhow!("listener rejected event"))
    });
    let _panicking = hub.subscribe(EventKind::AgentStatus, |_event: &Event| -> anyhow::Result<()> {
        panic!("listener blew up")
    });
    let (after, _a) = recorder(&hub, EventKind::AgentStatus);

    let report = hub.publish(Event::agent_status(
        "AGT-001",
        AgentState::Error,
        AgentPerformance {
            latency: 3.4,
            success_rate: 71.0,
        },
    ));

    assert_eq!(report.delivered, 2);
    assert_eq!(report.failed, 2);
    assert_eq!(before.lock().unwrap().len(), 1);
    assert_eq!(after.lock().unwrap().len(), 1);
    assert_eq!(hub.failure_count(), 2);

    let failures = failures.lock().unwrap();
    assert_eq!(failures.len(), 2);
    assert!(!failures[0].panicked);
    assert!(failures[1].panicked);
    assert!(failures[0].message.contains("rejected"));
}

#[tokio::test(start_paused = true)]
async fn test_connect_generate_shutdown_cycle() {
    let hub = EventHub::new(seeded(11));
    let mut status = hub.status_changes();
    let (seen, _subs): (Vec<_>, Vec<_>) = EventKind::ALL
        .into_iter()
        .map(|kind| recorder(&hub, kind))
        .unzip();

    hub.connect();
    assert_eq!(*status.borrow_and_update(), ConnectionStatus::Connecting);
    assert!(!hub.send_message(&"too early"));

    status.changed().await.unwrap();
    assert_eq!(*status.borrow_and_update(), ConnectionStatus::Connected);

    // Twenty seconds of generation at 3-5s per event
    tokio::time::sleep(Duration::from_secs(20)).await;
    let total: usize = seen.iter().map(|s| s.lock().unwrap().len()).sum();
    assert!((4..=7).contains(&total), "unexpected event count {}", total);
    assert!(hub.last_message().is_some());

    hub.shutdown();
    let frozen = hub.dispatched_count();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(hub.dispatched_count(), frozen);

    // A fresh handshake resumes generation
    hub.connect();
    tokio::time::sleep(Duration::from_millis(1000 + 5000 + 10)).await;
    assert!(hub.dispatched_count() > frozen);
}

#[tokio::test(start_paused = true)]
async fn test_same_seed_same_kind_sequence() {
    async fn kinds(seed: u64) -> Vec<EventKind> {
        let hub = EventHub::new(seeded(seed));
        let mut streams = tokio_stream::StreamMap::new();
        for kind in EventKind::ALL {
            streams.insert(kind, hub.stream(kind));
        }

        hub.connect();
        let mut kinds = Vec::new();
        while kinds.len() < 8 {
            match streams.next().await {
                Some((kind, _event)) => kinds.push(kind),
                None => break,
            }
        }
        hub.shutdown();
        kinds
    }

    assert_eq!(kinds(99).await, kinds(99).await);
}
