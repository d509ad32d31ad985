//! State indicator widget - color-coded status badges

use crate::colors::DashboardColors;
use mission_control_core::hub::{AgentState, ConnectionStatus, MissionStatus};
use mission_control_core::views::{HealthGrade, LogLevel, NotificationLevel};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// State types for visual indication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateType {
    Active,
    Idle,
    Pending,
    Completed,
    Failed,
    Healthy,
    Degraded,
    Critical,
    Connected,
    Connecting,
    Disconnected,
    Info,
    Warning,
}

impl From<MissionStatus> for StateType {
    fn from(status: MissionStatus) -> Self {
        match status {
            MissionStatus::Active => StateType::Active,
            MissionStatus::Completed => StateType::Completed,
            MissionStatus::Failed => StateType::Failed,
            MissionStatus::Pending | MissionStatus::Queued => StateType::Pending,
        }
    }
}

impl From<AgentState> for StateType {
    fn from(state: AgentState) -> Self {
        match state {
            AgentState::Active => StateType::Active,
            AgentState::Idle => StateType::Idle,
            AgentState::Terminated | AgentState::Error => StateType::Failed,
        }
    }
}

impl From<ConnectionStatus> for StateType {
    fn from(status: ConnectionStatus) -> Self {
        match status {
            ConnectionStatus::Connected => StateType::Connected,
            ConnectionStatus::Connecting => StateType::Connecting,
            ConnectionStatus::Disconnected | ConnectionStatus::Error => StateType::Disconnected,
        }
    }
}

impl From<HealthGrade> for StateType {
    fn from(grade: HealthGrade) -> Self {
        match grade {
            HealthGrade::Healthy => StateType::Healthy,
            HealthGrade::Degraded => StateType::Degraded,
            HealthGrade::Critical => StateType::Critical,
        }
    }
}

impl From<NotificationLevel> for StateType {
    fn from(level: NotificationLevel) -> Self {
        match level {
            NotificationLevel::Success => StateType::Completed,
            NotificationLevel::Warning => StateType::Warning,
            NotificationLevel::Error => StateType::Failed,
            NotificationLevel::Info => StateType::Info,
        }
    }
}

impl From<LogLevel> for StateType {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Info => StateType::Info,
            LogLevel::Warn => StateType::Warning,
            LogLevel::Error => StateType::Failed,
        }
    }
}

pub struct StateIndicator {
    state_type: StateType,
    text: String,
    show_icon: bool,
}

impl StateIndicator {
    pub fn new(state_type: impl Into<StateType>, text: impl Into<String>) -> Self {
        Self {
            state_type: state_type.into(),
            text: text.into(),
            show_icon: true,
        }
    }

    pub fn show_icon(mut self, show: bool) -> Self {
        self.show_icon = show;
        self
    }

    fn color(&self) -> Color {
        match self.state_type {
            StateType::Active => DashboardColors::IN_PROGRESS,
            StateType::Idle | StateType::Pending => DashboardColors::IDLE,
            StateType::Completed | StateType::Healthy | StateType::Connected => {
                DashboardColors::SUCCESS
            }
            StateType::Degraded | StateType::Connecting | StateType::Warning => {
                DashboardColors::WARNING
            }
            StateType::Failed | StateType::Critical | StateType::Disconnected => {
                DashboardColors::ERROR
            }
            StateType::Info => DashboardColors::HIGHLIGHT,
        }
    }

    fn icon(&self) -> &'static str {
        match self.state_type {
            StateType::Active => "●",
            StateType::Idle => "○",
            StateType::Pending => "◌",
            StateType::Completed => "✓",
            StateType::Failed => "✗",
            StateType::Healthy => "♥",
            StateType::Degraded | StateType::Warning => "⚠",
            StateType::Critical => "‼",
            StateType::Connected => "◉",
            StateType::Connecting => "◐",
            StateType::Disconnected => "◯",
            StateType::Info => "ℹ",
        }
    }

    /// Icon and text as one bold span
    pub fn render(&self) -> Span<'static> {
        let content = if self.show_icon {
            format!("{} {}", self.icon(), self.text)
        } else {
            self.text.clone()
        };

        Span::styled(
            content,
            Style::default().fg(self.color()).add_modifier(Modifier::BOLD),
        )
    }

    pub fn render_icon_only(&self) -> Span<'static> {
        Span::styled(self.icon().to_string(), Style::default().fg(self.color()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(StateType::from(MissionStatus::Queued), StateType::Pending);
        assert_eq!(StateType::from(AgentState::Error), StateType::Failed);
        assert_eq!(
            StateType::from(ConnectionStatus::Connecting),
            StateType::Connecting
        );
        assert_eq!(StateType::from(HealthGrade::Degraded), StateType::Degraded);
    }

    #[test]
    fn test_state_colors() {
        assert_eq!(StateIndicator::new(StateType::Connected, "").color(), Color::Green);
        assert_eq!(StateIndicator::new(StateType::Failed, "").color(), Color::Red);
        assert_eq!(StateIndicator::new(StateType::Warning, "").color(), Color::Yellow);
    }

    #[test]
    fn test_indicator_from_domain_states() {
        // Panels only see the re-exported indicator
        use crate::widgets::StateIndicator;

        let mission = StateIndicator::new(MissionStatus::Failed, "failed");
        assert_eq!(mission.color(), Color::Red);
        let notification = StateIndicator::new(NotificationLevel::Warning, "warn");
        assert_eq!(notification.color(), Color::Yellow);
        let link = StateIndicator::new(ConnectionStatus::Connected, "live");
        assert_eq!(link.color(), Color::Green);
    }

    #[test]
    fn test_icon_display() {
        let span = StateIndicator::new(StateType::Active, "Test").render();
        assert!(span.content.contains("●"));

        let span = StateIndicator::new(StateType::Active, "Test").show_icon(false).render();
        assert_eq!(span.content, "Test");
    }
}
