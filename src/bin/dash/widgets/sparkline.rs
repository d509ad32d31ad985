//! Sparkline widget for inline time-series visualization

use ratatui::{
    style::Style,
    text::{Line, Span},
};

/// Unicode block characters (8 levels plus blank)
const BLOCKS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One-line sparkline over oldest-first samples
pub struct Sparkline<'a> {
    data: &'a [f64],
    style: Style,
    width: usize,
    /// Fixed scale; the data's own min/max when absent
    bounds: Option<(f64, f64)>,
}

impl<'a> Sparkline<'a> {
    pub fn new(data: &'a [f64]) -> Self {
        Self {
            data,
            style: Style::default(),
            width: 20,
            bounds: None,
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = Some((min, max));
        self
    }

    pub fn render(&self) -> Line<'static> {
        let samples: Vec<f64> = self.data.iter().copied().filter(|v| v.is_finite()).collect();
        if samples.is_empty() {
            return Line::from(Span::styled("─".repeat(self.width), self.style));
        }

        let (min, max) = self.bounds.unwrap_or_else(|| {
            samples.iter().fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(*v), hi.max(*v)))
        });
        let range = max - min;

        // Most recent samples that fit
        let shown = &samples[samples.len().saturating_sub(self.width)..];
        let chars: String = shown
            .iter()
            .map(|value| {
                if range <= f64::EPSILON {
                    return BLOCKS[4];
                }
                let normalized = ((value - min) / range).clamp(0.0, 1.0);
                BLOCKS[(normalized * 8.0).round() as usize]
            })
            .collect();

        Line::from(Span::styled(chars, self.style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_placeholder() {
        let line = Sparkline::new(&[]).width(5).render();
        assert_eq!(text(&line), "─────");
    }

    #[test]
    fn test_flat_series() {
        let line = Sparkline::new(&[3.0, 3.0, 3.0]).render();
        assert_eq!(text(&line), "▄▄▄");
    }

    #[test]
    fn test_scaling() {
        let line = Sparkline::new(&[0.0, 50.0, 100.0]).bounds(0.0, 100.0).render();
        assert_eq!(text(&line), " ▄█");
    }

    #[test]
    fn test_keeps_most_recent() {
        let data: Vec<f64> = (0..50).map(f64::from).collect();
        let line = Sparkline::new(&data).width(10).render();
        assert_eq!(text(&line).chars().count(), 10);
        assert!(text(&line).ends_with('█'));
    }

    #[test]
    fn test_non_finite_skipped() {
        let line = Sparkline::new(&[f64::NAN, 1.0, f64::INFINITY, 2.0]).render();
        assert_eq!(text(&line).chars().count(), 2);
    }
}
