//! Panel management - visibility toggles and two-column layout

use ratatui::layout::Constraint;

const PANEL_COUNT: usize = 7;

/// Panel identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Missions,
    Health,
    Notifications,
    Activity,
    AgentLog,
    Reflexion,
    Trace,
}

/// Column a panel is stacked in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Left,
    Right,
}

impl PanelId {
    /// All panels in display order
    pub const ALL: [PanelId; PANEL_COUNT] = [
        PanelId::Missions,
        PanelId::Health,
        PanelId::Notifications,
        PanelId::Activity,
        PanelId::AgentLog,
        PanelId::Reflexion,
        PanelId::Trace,
    ];

    fn index(&self) -> usize {
        match self {
            PanelId::Missions => 0,
            PanelId::Health => 1,
            PanelId::Notifications => 2,
            PanelId::Activity => 3,
            PanelId::AgentLog => 4,
            PanelId::Reflexion => 5,
            PanelId::Trace => 6,
        }
    }

    /// Keyboard shortcut number (1-7)
    pub fn shortcut_key(&self) -> char {
        char::from(b'1' + self.index() as u8)
    }

    pub fn from_shortcut(key: char) -> Option<PanelId> {
        PanelId::ALL.into_iter().find(|p| p.shortcut_key() == key)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PanelId::Missions => "Missions",
            PanelId::Health => "System Health",
            PanelId::Notifications => "Notifications",
            PanelId::Activity => "Live Activity",
            PanelId::AgentLog => "Agent Log",
            PanelId::Reflexion => "Reflexion",
            PanelId::Trace => "Trace",
        }
    }

    pub fn column(&self) -> Column {
        match self {
            PanelId::Missions | PanelId::Health | PanelId::Notifications | PanelId::Trace => {
                Column::Left
            }
            PanelId::Activity | PanelId::AgentLog | PanelId::Reflexion => Column::Right,
        }
    }

    /// Preferred height
    pub fn default_height(&self) -> Constraint {
        match self {
            PanelId::Missions => Constraint::Length(7),
            PanelId::Health => Constraint::Length(10),
            PanelId::Notifications => Constraint::Length(8),
            PanelId::Activity => Constraint::Min(12),
            PanelId::AgentLog => Constraint::Length(9),
            PanelId::Reflexion => Constraint::Length(9),
            PanelId::Trace => Constraint::Min(11),
        }
    }

    pub fn min_height(&self) -> u16 {
        match self {
            PanelId::Health => 6,
            PanelId::Activity | PanelId::Trace => 6,
            _ => 5,
        }
    }
}

/// Panel manager - controls visibility and layout
pub struct PanelManager {
    visible: [bool; PANEL_COUNT],
}

impl PanelManager {
    /// All panels visible
    pub fn new() -> Self {
        Self {
            visible: [true; PANEL_COUNT],
        }
    }

    pub fn toggle_panel(&mut self, panel: PanelId) {
        let slot = &mut self.visible[panel.index()];
        *slot = !*slot;
    }

    pub fn is_panel_visible(&self, panel: PanelId) -> bool {
        self.visible[panel.index()]
    }

    pub fn show_all(&mut self) {
        self.visible = [true; PANEL_COUNT];
    }

    pub fn hide_all(&mut self) {
        self.visible = [false; PANEL_COUNT];
    }

    /// '0' shows everything unless everything is already shown
    pub fn toggle_all(&mut self) {
        if self.visible_count() == PANEL_COUNT {
            self.hide_all();
        } else {
            self.show_all();
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    /// Visible panels of one column, top to bottom
    pub fn visible_in(&self, column: Column) -> Vec<PanelId> {
        PanelId::ALL
            .into_iter()
            .filter(|p| p.column() == column && self.is_panel_visible(*p))
            .collect()
    }

    /// Height constraints for the visible panels of one column
    pub fn layout_constraints(&self, column: Column, available_height: u16) -> Vec<Constraint> {
        let visible = self.visible_in(column);
        if visible.is_empty() {
            return vec![Constraint::Min(0)];
        }

        let total_default: u16 = visible
            .iter()
            .map(|p| match p.default_height() {
                Constraint::Length(h) | Constraint::Min(h) => h,
                _ => 10,
            })
            .sum();

        if total_default <= available_height {
            return visible.iter().map(|p| p.default_height()).collect();
        }

        // Compress: minimum heights plus an even share of what is left
        let min_heights: Vec<u16> = visible.iter().map(|p| p.min_height()).collect();
        let total_min: u16 = min_heights.iter().sum();
        if total_min >= available_height {
            return min_heights.into_iter().map(Constraint::Length).collect();
        }

        let extra = (available_height - total_min) / visible.len() as u16;
        let last = visible.len() - 1;
        min_heights
            .into_iter()
            .enumerate()
            .map(|(i, h)| {
                if i == last {
                    Constraint::Min(h)
                } else {
                    Constraint::Length(h + extra)
                }
            })
            .collect()
    }
}

impl Default for PanelManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_visible_by_default() {
        let manager = PanelManager::new();
        assert_eq!(manager.visible_count(), 7);
        assert!(manager.is_panel_visible(PanelId::Trace));
    }

    #[test]
    fn test_toggle() {
        let mut manager = PanelManager::new();
        manager.toggle_panel(PanelId::Health);
        assert!(!manager.is_panel_visible(PanelId::Health));
        assert_eq!(manager.visible_in(Column::Left).len(), 3);

        manager.toggle_panel(PanelId::Health);
        assert!(manager.is_panel_visible(PanelId::Health));
    }

    #[test]
    fn test_toggle_all() {
        let mut manager = PanelManager::new();
        manager.toggle_all();
        assert_eq!(manager.visible_count(), 0);

        manager.toggle_panel(PanelId::Activity);
        manager.toggle_all();
        assert_eq!(manager.visible_count(), 7);
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(PanelId::Missions.shortcut_key(), '1');
        assert_eq!(PanelId::Trace.shortcut_key(), '7');
        assert_eq!(PanelId::from_shortcut('4'), Some(PanelId::Activity));
        assert_eq!(PanelId::from_shortcut('9'), None);
    }

    #[test]
    fn test_columns_partition_panels() {
        let manager = PanelManager::new();
        let left = manager.visible_in(Column::Left).len();
        let right = manager.visible_in(Column::Right).len();
        assert_eq!(left + right, PanelId::ALL.len());
    }

    #[test]
    fn test_layout_constraints_limited_space() {
        let manager = PanelManager::new();
        let constraints = manager.layout_constraints(Column::Left, 20);
        assert_eq!(constraints.len(), 4);
        for c in constraints {
            match c {
                Constraint::Length(h) | Constraint::Min(h) => assert!(h >= 5),
                _ => panic!("Unexpected constraint type"),
            }
        }
    }

    #[test]
    fn test_layout_constraints_empty_column() {
        let mut manager = PanelManager::new();
        manager.hide_all();
        assert_eq!(manager.layout_constraints(Column::Right, 40), vec![Constraint::Min(0)]);
    }
}
