//! Live Activity panel - newest-first stream of every event kind
//!
//! Each row carries the relative time, a category badge colored by the
//! source kind, the action and its description. Alerts carry their severity.

use super::{format_relative_time, panel_block};
use crate::colors::DashboardColors;
use mission_control_core::views::{ActivityEntry, ActivityFeed};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

pub struct ActivityPanel;

impl ActivityPanel {
    pub fn render(&self, frame: &mut Frame, area: Rect, feed: &ActivityFeed) {
        let items: Vec<ListItem> = if feed.is_empty() {
            vec![
                ListItem::new(Line::from(Span::styled(
                    "No activity yet",
                    Style::default().fg(DashboardColors::SECONDARY),
                ))),
                ListItem::new(Line::from(Span::styled(
                    "Press 'c' to connect",
                    Style::default().fg(DashboardColors::SECONDARY),
                ))),
            ]
        } else {
            feed.entries().iter().map(Self::render_entry).collect()
        };

        let title = format!(
            "Live Activity ({}/{})",
            feed.len(),
            feed.entries().capacity()
        );

        frame.render_widget(List::new(items).block(panel_block(title)), area);
    }

    fn render_entry(entry: &ActivityEntry) -> ListItem<'static> {
        let color = DashboardColors::activity(entry.kind);

        let mut spans = vec![
            Span::styled(
                format!("{:>4} ", format_relative_time(entry.timestamp)),
                Style::default().fg(DashboardColors::SECONDARY),
            ),
            Span::styled(
                format!("[{:<7}] ", entry.kind.as_str()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{}: ", entry.action),
                Style::default().fg(color),
            ),
            Span::styled(
                entry.description.clone(),
                Style::default().fg(DashboardColors::TEXT),
            ),
        ];

        if let Some(severity) = entry.severity {
            spans.push(Span::styled(
                format!(" ({})", severity.as_str()),
                Style::default().fg(DashboardColors::severity(severity)),
            ));
        }

        ListItem::new(Line::from(spans))
    }
}
