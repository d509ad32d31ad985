//! System Health panel - metric bars, overall grade and history sparkline

use super::panel_block;
use crate::colors::DashboardColors;
use crate::widgets::{ProgressBar, Sparkline, StateIndicator, Zones};
use mission_control_core::views::HealthMonitor;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BAR_WIDTH: usize = 20;

pub struct HealthPanel;

impl HealthPanel {
    pub fn render(&self, frame: &mut Frame, area: Rect, monitor: &HealthMonitor) {
        let metrics = monitor.metrics();

        let label = |name: &str| {
            Span::styled(
                format!("{:<10}", name),
                Style::default().fg(DashboardColors::HEADER),
            )
        };
        let bar = |name: &str, value: f64, zones: Zones| {
            Line::from(vec![
                label(name),
                ProgressBar::new(value).zones(zones).inline(BAR_WIDTH),
            ])
        };

        // History is newest-first; the sparkline reads oldest-first
        let history: Vec<f64> = monitor.history().iter().rev().copied().collect();
        let spark_width = (area.width as usize).saturating_sub(14).max(1);

        let mut sparkline = Sparkline::new(&history)
            .width(spark_width)
            .bounds(0.0, 100.0)
            .style(Style::default().fg(DashboardColors::health(monitor.grade())))
            .render();
        sparkline.spans.insert(0, label("History"));

        let lines = vec![
            Line::from(vec![
                label("Overall"),
                StateIndicator::new(monitor.grade(), format!("{:.1}%", metrics.overall)).render(),
                Span::styled(
                    format!("  {}", monitor.grade()),
                    Style::default()
                        .fg(DashboardColors::health(monitor.grade()))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            bar("CPU", metrics.cpu, Zones::Usage),
            bar("Memory", metrics.memory, Zones::Usage),
            bar("Network", metrics.network, Zones::Health),
            bar("Database", metrics.database, Zones::Health),
            Line::from(vec![
                label("Conns"),
                Span::styled(
                    format!("{:<8}", metrics.active_connections),
                    Style::default().fg(DashboardColors::TEXT),
                ),
                label("Req/min"),
                Span::styled(
                    metrics.throughput.to_string(),
                    Style::default().fg(DashboardColors::TEXT),
                ),
            ]),
            sparkline,
        ];

        frame.render_widget(Paragraph::new(lines).block(panel_block("System Health")), area);
    }
}
