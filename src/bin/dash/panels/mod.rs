//! Dashboard panels
//!
//! Each panel renders one mounted view. Panels hold no event state of their
//! own; they read the view under its lock once per frame.
//!
//! Current panels:
//! - Missions: board with status and progress per mission
//! - System Health: metric gauges and the overall-health sparkline
//! - Notifications: user-facing alerts with unread markers
//! - Live Activity: newest-first stream of every event kind
//! - Agent Log: rolling log of the focused agent
//! - Reflexion: anomalies, knowledge updates and replans
//! - Trace: execution graph with play/pause and type filter

pub mod activity;
pub mod agent_log;
pub mod health;
pub mod missions;
pub mod notifications;
pub mod reflexion;
pub mod trace;

pub use activity::ActivityPanel;
pub use agent_log::AgentLogPanel;
pub use health::HealthPanel;
pub use missions::MissionsPanel;
pub use notifications::NotificationsPanel;
pub use reflexion::ReflexionPanel;
pub use trace::TracePanel;

use crate::colors::DashboardColors;
use chrono::{DateTime, Utc};
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered panel block with a bold title
pub(crate) fn panel_block(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title.into())
        .title_style(
            Style::default()
                .fg(DashboardColors::HEADER)
                .add_modifier(Modifier::BOLD),
        )
        .border_style(Style::default().fg(DashboardColors::BORDER))
}

/// "now", "12s", "3m", "2h", "4d"
pub(crate) fn format_relative_time(timestamp: DateTime<Utc>) -> String {
    relative_to(timestamp, Utc::now())
}

fn relative_to(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(timestamp);

    if age.num_seconds() < 1 {
        "now".to_string()
    } else if age.num_seconds() < 60 {
        format!("{}s", age.num_seconds())
    } else if age.num_minutes() < 60 {
        format!("{}m", age.num_minutes())
    } else if age.num_hours() < 24 {
        format!("{}h", age.num_hours())
    } else {
        format!("{}d", age.num_days())
    }
}
