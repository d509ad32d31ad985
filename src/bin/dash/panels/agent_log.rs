//! Agent Log panel - rolling log of the focused agent

use super::panel_block;
use crate::colors::DashboardColors;
use crate::widgets::StateIndicator;
use mission_control_core::views::AgentLog;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

pub struct AgentLogPanel {
    /// Display name of the focused agent
    pub agent_name: String,
}

impl AgentLogPanel {
    pub fn new(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, log: &AgentLog) {
        let items: Vec<ListItem> = log
            .lines()
            .iter()
            .map(|line| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", line.timestamp.format("%H:%M:%S")),
                        Style::default().fg(DashboardColors::SECONDARY),
                    ),
                    StateIndicator::new(line.level, format!("{:<5}", line.level.as_str()))
                        .show_icon(false)
                        .render(),
                    Span::styled(
                        format!(" {}", line.message),
                        Style::default().fg(DashboardColors::TEXT),
                    ),
                ]))
            })
            .collect();

        let title = format!("Agent Log: {} ({})", self.agent_name, log.agent_id());
        frame.render_widget(List::new(items).block(panel_block(title)), area);
    }
}
