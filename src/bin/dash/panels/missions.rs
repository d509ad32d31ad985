//! Missions panel - the mission board

use super::panel_block;
use crate::colors::DashboardColors;
use crate::widgets::{ProgressBar, StateIndicator};
use mission_control_core::utils::string::truncate_at_char_boundary;
use mission_control_core::views::MissionBoard;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

const NAME_WIDTH: usize = 28;

pub struct MissionsPanel;

impl MissionsPanel {
    pub fn render(&self, frame: &mut Frame, area: Rect, board: &MissionBoard) {
        let items: Vec<ListItem> = board
            .missions()
            .iter()
            .map(|mission| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", mission.id),
                        Style::default().fg(DashboardColors::MISSION),
                    ),
                    Span::styled(
                        format!(
                            "{:<width$} ",
                            truncate_at_char_boundary(&mission.name, NAME_WIDTH),
                            width = NAME_WIDTH
                        ),
                        Style::default().fg(DashboardColors::mission_status(mission.status)),
                    ),
                    ProgressBar::new(f64::from(mission.progress)).inline(10),
                    Span::raw(" "),
                    StateIndicator::new(mission.status, mission.status.as_str()).render(),
                    Span::styled(
                        format!(" {}", mission.priority),
                        Style::default().fg(DashboardColors::SECONDARY),
                    ),
                ]))
            })
            .collect();

        let title = format!(
            "Missions ({} active, {} completed)",
            board.active_count(),
            board.completed_count()
        );

        frame.render_widget(List::new(items).block(panel_block(title)), area);
    }
}
