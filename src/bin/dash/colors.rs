//! Consistent color palette for the dashboard
//!
//! All panels take their colors from here so the same state reads the same
//! everywhere.

use mission_control_core::hub::{ConnectionStatus, MissionStatus, Severity};
use mission_control_core::views::{ActivityKind, HealthGrade, NotificationLevel};
use ratatui::style::Color;

/// Color palette for dashboard elements
pub struct DashboardColors;

impl DashboardColors {
    // === Status Colors ===

    /// Success, healthy, completed
    pub const SUCCESS: Color = Color::Green;

    /// Warning, degraded, connecting
    pub const WARNING: Color = Color::Yellow;

    /// Error, failed, critical
    pub const ERROR: Color = Color::Red;

    /// Active work in flight
    pub const IN_PROGRESS: Color = Color::Blue;

    /// Idle, pending, queued
    pub const IDLE: Color = Color::Gray;

    // === Entity Colors ===

    pub const MISSION: Color = Color::LightBlue;
    pub const SUBGOAL: Color = Color::LightGreen;
    pub const AGENT: Color = Color::LightMagenta;
    pub const SYSTEM: Color = Color::LightRed;
    pub const TRACE: Color = Color::Cyan;

    // === UI Elements ===

    /// Panel borders
    pub const BORDER: Color = Color::Cyan;

    /// Headers and labels
    pub const HEADER: Color = Color::Yellow;

    /// Timestamps and secondary text
    pub const SECONDARY: Color = Color::DarkGray;

    /// Primary text
    pub const TEXT: Color = Color::White;

    /// Unread markers, selected filters
    pub const HIGHLIGHT: Color = Color::Cyan;

    pub fn severity(severity: Severity) -> Color {
        match severity {
            Severity::High => Self::ERROR,
            Severity::Medium => Self::WARNING,
            Severity::Low => Self::IN_PROGRESS,
        }
    }

    pub fn mission_status(status: MissionStatus) -> Color {
        match status {
            MissionStatus::Active => Self::IN_PROGRESS,
            MissionStatus::Completed => Self::SUCCESS,
            MissionStatus::Failed => Self::ERROR,
            MissionStatus::Pending | MissionStatus::Queued => Self::IDLE,
        }
    }

    pub fn connection(status: ConnectionStatus) -> Color {
        match status {
            ConnectionStatus::Connected => Self::SUCCESS,
            ConnectionStatus::Connecting => Self::WARNING,
            ConnectionStatus::Disconnected | ConnectionStatus::Error => Self::ERROR,
        }
    }

    pub fn health(grade: HealthGrade) -> Color {
        match grade {
            HealthGrade::Healthy => Self::SUCCESS,
            HealthGrade::Degraded => Self::WARNING,
            HealthGrade::Critical => Self::ERROR,
        }
    }

    pub fn notification(level: NotificationLevel) -> Color {
        match level {
            NotificationLevel::Success => Self::SUCCESS,
            NotificationLevel::Warning => Self::WARNING,
            NotificationLevel::Error => Self::ERROR,
            NotificationLevel::Info => Self::IN_PROGRESS,
        }
    }

    pub fn activity(kind: ActivityKind) -> Color {
        match kind {
            ActivityKind::Mission => Self::MISSION,
            ActivityKind::Agent => Self::AGENT,
            ActivityKind::Subgoal => Self::SUBGOAL,
            ActivityKind::System => Self::SYSTEM,
            ActivityKind::Trace => Self::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(DashboardColors::SUCCESS, Color::Green);
        assert_eq!(DashboardColors::WARNING, Color::Yellow);
        assert_eq!(DashboardColors::ERROR, Color::Red);
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(DashboardColors::severity(Severity::High), Color::Red);
        assert_eq!(DashboardColors::severity(Severity::Medium), Color::Yellow);
        assert_eq!(DashboardColors::severity(Severity::Low), Color::Blue);
    }

    #[test]
    fn test_connection_colors() {
        assert_eq!(DashboardColors::connection(ConnectionStatus::Connected), Color::Green);
        assert_eq!(DashboardColors::connection(ConnectionStatus::Connecting), Color::Yellow);
        assert_eq!(DashboardColors::connection(ConnectionStatus::Disconnected), Color::Red);
    }
}
