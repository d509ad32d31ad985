//! Mission Control - Simulated Orchestration Monitor
//!
//! An in-process monitor for a hierarchical agent-orchestration system
//! (missions → subgoals → agents) that provides:
//! - A publish/subscribe event hub fed by a randomized synthetic generator
//! - A one-shot simulated connection handshake
//! - View consumers that fold events into bounded local state
//! - Fixture data for missions, agents, trace nodes and anomalies
//!
//! # Architecture
//!
//! The crate is organized into layers:
//! - **Hub**: typed events, subscription registry, generation loop
//! - **Views**: activity feed, notifications, health, missions, agent log,
//!   reflexion monitor, trace graph
//! - **Catalog**: fixed fixture data the views start from
//! - **Config**: TOML configuration with defaults for every field
//!
//! # Example
//!
//! ```ignore
//! use mission_control_core::{EventHub, EventKind, MissionControlConfig};
//! use mission_control_core::views::ActivityFeed;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = MissionControlConfig::load(None)?;
//!     let hub = EventHub::new(config.hub.clone());
//!
//!     let feed = ActivityFeed::mount(&hub, config.views.activity_capacity);
//!     let _alerts = hub.subscribe(EventKind::SystemAlert, |event| {
//!         println!("{}", event.to_json_line());
//!         Ok(())
//!     });
//!
//!     hub.connect();
//!     tokio::time::sleep(std::time::Duration::from_secs(10)).await;
//!     println!("{} activities", feed.read(|f| f.len()));
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod hub;
pub mod utils;
pub mod views;

// Re-export commonly used types
pub use config::{ConfigError, DashboardConfig, HubConfig, MissionControlConfig, ViewConfig};
pub use error::{MissionControlError, Result};
pub use hub::{
    ConnectionStatus, DispatchReport, Event, EventHub, EventKind, EventPayload, EventStream,
    ListenerFailure, Subscription, Topic,
};
