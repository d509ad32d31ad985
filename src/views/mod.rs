//! View consumers
//!
//! Each view mounts onto an [`EventHub`](crate::hub::EventHub), keeps its own
//! bounded state and releases every subscription and timer on unmount.
//! Views never share state; two views fed by the same event may disagree.

pub mod activity;
pub mod agent_log;
pub mod feed;
pub mod health;
pub mod missions;
pub mod mount;
pub mod notifications;
pub mod reflexion;
pub mod trace;

pub use activity::{ActivityEntry, ActivityFeed, ActivityKind};
pub use agent_log::{AgentLog, LogLevel, LogLine};
pub use feed::BoundedFeed;
pub use health::{HealthGrade, HealthMonitor, SystemMetrics};
pub use missions::MissionBoard;
pub use mount::Mounted;
pub use notifications::{Notification, NotificationCenter, NotificationLevel};
pub use reflexion::ReflexionMonitor;
pub use trace::{EdgeKind, TraceEdge, TraceGraph};
