//! Reflexion panel - self-monitoring health, anomalies and recent replans

use super::{format_relative_time, panel_block};
use crate::colors::DashboardColors;
use crate::widgets::{ProgressBar, Zones};
use mission_control_core::catalog::AnomalyStatus;
use mission_control_core::utils::string::truncate_at_char_boundary;
use mission_control_core::views::ReflexionMonitor;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const DESCRIPTION_WIDTH: usize = 48;

pub struct ReflexionPanel;

impl ReflexionPanel {
    pub fn render(&self, frame: &mut Frame, area: Rect, monitor: &ReflexionMonitor) {
        let mut lines = vec![Line::from(vec![
            Span::styled("Health    ", Style::default().fg(DashboardColors::HEADER)),
            ProgressBar::new(monitor.system_health())
                .zones(Zones::Health)
                .inline(20),
            Span::styled(
                format!(
                    "  {} open, {} updates, {} replans",
                    monitor.open_count(),
                    monitor.knowledge_updates().len(),
                    monitor.replans().len()
                ),
                Style::default().fg(DashboardColors::SECONDARY),
            ),
        ])];

        // Visible rows inside the border, minus the header line
        let rows = (area.height as usize).saturating_sub(3);
        for anomaly in monitor.anomalies().iter().take(rows) {
            let status_style = match anomaly.status {
                AnomalyStatus::Resolved => Style::default().fg(DashboardColors::SUCCESS),
                _ => Style::default()
                    .fg(DashboardColors::severity(anomaly.severity))
                    .add_modifier(Modifier::BOLD),
            };

            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:>4} ", format_relative_time(anomaly.timestamp)),
                    Style::default().fg(DashboardColors::SECONDARY),
                ),
                Span::styled(format!("{} ", anomaly.id), status_style),
                Span::styled(
                    format!("{:<12} ", anomaly.kind.as_str()),
                    Style::default().fg(DashboardColors::AGENT),
                ),
                Span::styled(
                    truncate_at_char_boundary(&anomaly.description, DESCRIPTION_WIDTH),
                    Style::default().fg(DashboardColors::TEXT),
                ),
                Span::styled(
                    format!(" {:.0}%", anomaly.confidence),
                    Style::default().fg(DashboardColors::SECONDARY),
                ),
            ]));
        }

        frame.render_widget(Paragraph::new(lines).block(panel_block("Reflexion")), area);
    }
}
