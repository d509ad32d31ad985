//! Reusable dashboard widgets
//!
//! - State indicators (color-coded status badges)
//! - Progress bars with color zones
//! - One-line sparklines

pub mod progress_bar;
pub mod sparkline;
pub mod state_indicator;

pub use progress_bar::{ProgressBar, Zones};
pub use sparkline::Sparkline;
pub use state_indicator::StateIndicator;
