//! Inline progress bar with color zones

use crate::colors::DashboardColors;
use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// How a value maps to a color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zones {
    /// Higher is better (health scores)
    Health,
    /// Higher is worse (resource usage)
    Usage,
    /// Completion: blue until done, green at 100
    Completion,
}

pub struct ProgressBar {
    progress: f64,
    zones: Zones,
}

impl ProgressBar {
    /// Create new progress bar (progress: 0.0-100.0)
    pub fn new(progress: f64) -> Self {
        Self {
            progress: progress.clamp(0.0, 100.0),
            zones: Zones::Completion,
        }
    }

    pub fn zones(mut self, zones: Zones) -> Self {
        self.zones = zones;
        self
    }

    fn color(&self) -> Color {
        let p = self.progress;
        match self.zones {
            Zones::Health if p >= 80.0 => DashboardColors::SUCCESS,
            Zones::Health if p >= 60.0 => DashboardColors::WARNING,
            Zones::Health => DashboardColors::ERROR,
            Zones::Usage if p < 60.0 => DashboardColors::SUCCESS,
            Zones::Usage if p < 85.0 => DashboardColors::WARNING,
            Zones::Usage => DashboardColors::ERROR,
            Zones::Completion if p >= 100.0 => DashboardColors::SUCCESS,
            Zones::Completion => DashboardColors::IN_PROGRESS,
        }
    }

    /// `width` cells of bar followed by the percentage
    pub fn inline(&self, width: usize) -> Span<'static> {
        let filled = ((self.progress / 100.0) * width as f64).round() as usize;
        let bar = format!(
            "{}{} {:>3.0}%",
            "█".repeat(filled.min(width)),
            "░".repeat(width.saturating_sub(filled)),
            self.progress
        );
        Span::styled(bar, Style::default().fg(self.color()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamping() {
        assert_eq!(ProgressBar::new(150.0).inline(4).content, "████ 100%");
        assert_eq!(ProgressBar::new(-10.0).inline(4).content, "░░░░   0%");
    }

    #[test]
    fn test_health_zones() {
        let bar = |p| ProgressBar::new(p).zones(Zones::Health).color();
        assert_eq!(bar(92.0), Color::Green);
        assert_eq!(bar(73.0), Color::Yellow);
        assert_eq!(bar(40.0), Color::Red);
    }

    #[test]
    fn test_usage_zones() {
        let bar = |p| ProgressBar::new(p).zones(Zones::Usage).color();
        assert_eq!(bar(45.0), Color::Green);
        assert_eq!(bar(67.0), Color::Yellow);
        assert_eq!(bar(95.0), Color::Red);
    }

    #[test]
    fn test_inline_width() {
        let span = ProgressBar::new(50.0).inline(10);
        assert!(span.content.starts_with("█████░░░░░"));
        assert!(span.content.ends_with("50%"));
    }
}
