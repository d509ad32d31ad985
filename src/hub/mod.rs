//! Event hub for the simulated orchestration stream
//!
//! Provides:
//! - Typed events, one payload struct per kind
//! - Topic-keyed subscription registry with idempotent unsubscribe handles
//! - One-shot simulated handshake (disconnected → connecting → connected)
//! - Randomized generation loop feeding listeners in registration order
//! - Isolated listener invocation with a failure hook
//!
//! # Architecture
//!
//! Generator → `EventHub::publish` → listeners of the event's kind:
//! - `EventHub`: cheap-to-clone handle passed to every consumer
//! - `Subscription`: RAII handle; `unsubscribe()` or drop removes the listener
//! - `EventStream`: async adapter over a subscription

pub mod connection;
pub mod event_hub;
pub mod events;
pub mod generator;
pub mod registry;

pub use connection::ConnectionStatus;
pub use event_hub::{
    DispatchReport, ErrorHook, EventHub, EventStream, ListenerFailure, Subscription,
};
pub use events::{
    AgentPerformance, AgentState, AgentStatus, Event, EventKind, EventPayload, MissionStatus,
    MissionUpdate, Severity, SubgoalProgress, SystemAlert, TraceEvent,
};
pub use generator::{EventGenerator, ALERT_COMPONENT, ALERT_MESSAGE};
pub use registry::{Listener, ListenerId, Topic};
