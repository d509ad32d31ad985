//! Notifications panel - user-facing alerts, unread first in the title

use super::{format_relative_time, panel_block};
use crate::colors::DashboardColors;
use crate::widgets::StateIndicator;
use mission_control_core::views::NotificationCenter;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

pub struct NotificationsPanel;

impl NotificationsPanel {
    pub fn render(&self, frame: &mut Frame, area: Rect, center: &NotificationCenter) {
        let items: Vec<ListItem> = if center.notifications().is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "No notifications",
                Style::default().fg(DashboardColors::SECONDARY),
            )))]
        } else {
            center
                .notifications()
                .iter()
                .map(|n| {
                    let marker = if n.read { "  " } else { "• " };
                    let title_style = if n.read {
                        Style::default().fg(DashboardColors::TEXT)
                    } else {
                        Style::default()
                            .fg(DashboardColors::notification(n.level))
                            .add_modifier(Modifier::BOLD)
                    };

                    ListItem::new(Line::from(vec![
                        Span::styled(marker, Style::default().fg(DashboardColors::HIGHLIGHT)),
                        Span::styled(
                            format!("{:>4} ", format_relative_time(n.timestamp)),
                            Style::default().fg(DashboardColors::SECONDARY),
                        ),
                        StateIndicator::new(n.level, "").render_icon_only(),
                        Span::styled(format!(" {}: ", n.title), title_style),
                        Span::styled(n.message.clone(), Style::default().fg(DashboardColors::TEXT)),
                    ]))
                })
                .collect()
        };

        let title = match center.unread_count() {
            0 => "Notifications".to_string(),
            unread => format!("Notifications ({} unread)", unread),
        };

        frame.render_widget(List::new(items).block(panel_block(title)), area);
    }
}
