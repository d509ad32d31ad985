//! System health monitor
//!
//! Seeded metrics, degraded by engine-core alerts and nudged by a local
//! drift timer that only runs while the hub is connected.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::feed::BoundedFeed;
use super::mount::{spawn_ticker, subscribe_view, Mounted};
use crate::hub::{Event, EventHub, EventKind, EventPayload, ALERT_COMPONENT};

/// Points of `overall` kept for the trend line
const HISTORY_LEN: usize = 60;
/// `overall` lost per engine-core alert
const ALERT_PENALTY: f64 = 5.0;

/// Snapshot of the simulated system metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub cpu: f64,
    pub memory: f64,
    pub network: f64,
    pub database: f64,
    pub overall: f64,
    pub active_connections: u32,
    pub throughput: u32,
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self {
            cpu: 45.0,
            memory: 67.0,
            network: 89.0,
            database: 92.0,
            overall: 73.0,
            active_connections: 24,
            throughput: 1247,
        }
    }
}

/// Coarse rating of a percentage metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthGrade {
    Healthy,
    Degraded,
    Critical,
}

impl HealthGrade {
    pub fn from_value(value: f64) -> Self {
        if value >= 80.0 {
            HealthGrade::Healthy
        } else if value >= 60.0 {
            HealthGrade::Degraded
        } else {
            HealthGrade::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthGrade::Healthy => "healthy",
            HealthGrade::Degraded => "degraded",
            HealthGrade::Critical => "critical",
        }
    }
}

impl fmt::Display for HealthGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HealthMonitor {
    metrics: SystemMetrics,
    history: BoundedFeed<f64>,
    rng: StdRng,
}

impl HealthMonitor {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let metrics = SystemMetrics::default();
        let mut history = BoundedFeed::new(HISTORY_LEN);
        history.push(metrics.overall);

        Self {
            metrics,
            history,
            rng,
        }
    }

    pub fn metrics(&self) -> &SystemMetrics {
        &self.metrics
    }

    pub fn grade(&self) -> HealthGrade {
        HealthGrade::from_value(self.metrics.overall)
    }

    /// Recent `overall` values, newest first
    pub fn history(&self) -> &BoundedFeed<f64> {
        &self.history
    }

    pub fn apply(&mut self, event: &Event) {
        if let EventPayload::SystemAlert(alert) = &event.payload {
            if alert.component == ALERT_COMPONENT {
                self.metrics.overall = (self.metrics.overall - ALERT_PENALTY).max(0.0);
                self.history.push(self.metrics.overall);
            }
        }
    }

    /// Apply one round of bounded random drift
    pub fn drift(&mut self) {
        let m = &mut self.metrics;
        m.cpu = Self::nudge(&mut self.rng, m.cpu, 5.0);
        m.memory = Self::nudge(&mut self.rng, m.memory, 4.0);
        m.network = Self::nudge(&mut self.rng, m.network, 3.0);
        m.database = Self::nudge(&mut self.rng, m.database, 2.0);
        m.overall = Self::nudge(&mut self.rng, m.overall, 1.5);

        let connections = i64::from(m.active_connections) + self.rng.gen_range(-3..=2);
        m.active_connections = connections.max(0) as u32;
        let throughput = i64::from(m.throughput) + self.rng.gen_range(-100..=99);
        m.throughput = throughput.max(0) as u32;

        self.history.push(m.overall);
    }

    fn nudge(rng: &mut StdRng, value: f64, spread: f64) -> f64 {
        (value + rng.gen_range(-spread..spread)).clamp(0.0, 100.0)
    }

    /// Subscribe to alerts and drift every `tick` while the hub is connected
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(hub: &EventHub, tick: Duration, seed: Option<u64>) -> Mounted<HealthMonitor> {
        let view = Arc::new(Mutex::new(HealthMonitor::new(seed)));
        let status = hub.status_changes();

        Mounted::new("health", view.clone())
            .with_subscription(subscribe_view(
                hub,
                EventKind::SystemAlert,
                &view,
                HealthMonitor::apply,
            ))
            .with_timer(spawn_ticker(&view, tick, move |monitor: &mut HealthMonitor| {
                if status.borrow().is_connected() {
                    monitor.drift();
                }
            }))
    }
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HubConfig;
    use crate::hub::Severity;

    #[test]
    fn test_seed_values() {
        let monitor = HealthMonitor::new(Some(1));
        let m = monitor.metrics();
        assert_eq!(m.cpu, 45.0);
        assert_eq!(m.memory, 67.0);
        assert_eq!(m.overall, 73.0);
        assert_eq!(m.active_connections, 24);
        assert_eq!(m.throughput, 1247);
        assert_eq!(monitor.grade(), HealthGrade::Degraded);
    }

    #[test]
    fn test_engine_alert_lowers_overall() {
        let mut monitor = HealthMonitor::new(Some(1));
        monitor.apply(&Event::system_alert(Severity::Low, "x", ALERT_COMPONENT));
        assert_eq!(monitor.metrics().overall, 68.0);

        monitor.apply(&Event::system_alert(Severity::High, "x", "Storage"));
        assert_eq!(monitor.metrics().overall, 68.0);
    }

    #[test]
    fn test_overall_floor() {
        let mut monitor = HealthMonitor::new(Some(1));
        for _ in 0..30 {
            monitor.apply(&Event::system_alert(Severity::High, "x", ALERT_COMPONENT));
        }
        assert_eq!(monitor.metrics().overall, 0.0);
        assert_eq!(monitor.grade(), HealthGrade::Critical);
    }

    #[test]
    fn test_drift_is_bounded() {
        let mut monitor = HealthMonitor::new(Some(9));
        for _ in 0..500 {
            let before = *monitor.metrics();
            monitor.drift();
            let after = monitor.metrics();

            assert!((after.cpu - before.cpu).abs() <= 5.0);
            assert!((after.database - before.database).abs() <= 2.0);
            assert!((0.0..=100.0).contains(&after.cpu));
            assert!((0.0..=100.0).contains(&after.overall));
        }
        assert_eq!(monitor.history().len(), HISTORY_LEN);
    }

    #[test]
    fn test_grades() {
        assert_eq!(HealthGrade::from_value(80.0), HealthGrade::Healthy);
        assert_eq!(HealthGrade::from_value(79.9), HealthGrade::Degraded);
        assert_eq!(HealthGrade::from_value(60.0), HealthGrade::Degraded);
        assert_eq!(HealthGrade::from_value(59.0), HealthGrade::Critical);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_drift_while_disconnected() {
        let hub = EventHub::default();
        let monitor = HealthMonitor::mount(&hub, Duration::from_millis(4000), Some(3));

        tokio::time::sleep(Duration::from_millis(20_000)).await;
        assert_eq!(monitor.snapshot().metrics(), &SystemMetrics::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drift_while_connected() {
        let hub = EventHub::new(HubConfig {
            handshake_delay: Duration::from_millis(10),
            min_interval: Duration::from_secs(3600),
            max_interval: Duration::from_secs(3600),
            seed: Some(5),
        });
        let monitor = HealthMonitor::mount(&hub, Duration::from_millis(4000), Some(3));
        hub.connect();

        tokio::time::sleep(Duration::from_millis(8_100)).await;
        assert!(hub.is_connected());
        // Seed entry plus two drift rounds
        assert_eq!(monitor.read(|m| m.history().len()), 3);
    }
}
