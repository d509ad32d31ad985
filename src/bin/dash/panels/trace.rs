//! Trace panel - execution graph as an indented tree
//!
//! Nodes are drawn by depth with their outgoing edges; delegate edges
//! (subgoal to agent) are marked differently from spawn edges.

use super::panel_block;
use crate::colors::DashboardColors;
use crate::widgets::{ProgressBar, StateIndicator};
use mission_control_core::catalog::{NodeType, TraceNode};
use mission_control_core::views::{EdgeKind, TraceGraph};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

pub struct TracePanel;

impl TracePanel {
    pub fn render(&self, frame: &mut Frame, area: Rect, graph: &TraceGraph) {
        let edges = graph.edges();

        let items: Vec<ListItem> = graph
            .visible_nodes()
            .map(|node| {
                let mut spans = vec![
                    Span::raw("  ".repeat(node.depth as usize)),
                    StateIndicator::new(node.status, "").render_icon_only(),
                    Span::styled(
                        format!(" {} ", node.id),
                        Style::default().fg(Self::node_color(node)),
                    ),
                    Span::styled(node.name.clone(), Style::default().fg(DashboardColors::TEXT)),
                ];

                if let Some(role) = &node.role {
                    spans.push(Span::styled(
                        format!(" [{}]", role),
                        Style::default().fg(DashboardColors::SECONDARY),
                    ));
                }
                if let Some(progress) = node.progress {
                    spans.push(Span::raw(" "));
                    spans.push(ProgressBar::new(progress).inline(8));
                }
                if let Some(cost) = node.cost {
                    spans.push(Span::styled(
                        format!(" ${:.2}", cost),
                        Style::default().fg(DashboardColors::SECONDARY),
                    ));
                }

                let targets: Vec<String> = edges
                    .iter()
                    .filter(|e| e.source == node.id)
                    .map(|e| match e.kind {
                        EdgeKind::Delegate => format!("⇢{}", e.target),
                        EdgeKind::Spawn => format!("→{}", e.target),
                    })
                    .collect();
                if !targets.is_empty() {
                    spans.push(Span::styled(
                        format!(" {}", targets.join(" ")),
                        Style::default().fg(DashboardColors::TRACE),
                    ));
                }

                ListItem::new(Line::from(spans))
            })
            .collect();

        let playback = if graph.is_playing() { "▶ playing" } else { "⏸ paused" };
        let filter = graph.filter().map(|f| f.as_str()).unwrap_or("all");
        let title = format!("Trace ({}, filter: {})", playback, filter);

        frame.render_widget(List::new(items).block(panel_block(title)), area);
    }

    fn node_color(node: &TraceNode) -> Color {
        match node.node_type {
            NodeType::Mission => DashboardColors::MISSION,
            NodeType::Subgoal => DashboardColors::SUBGOAL,
            NodeType::Agent => DashboardColors::AGENT,
        }
    }
}
