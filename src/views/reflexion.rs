//! Reflexion monitor: system health score and detected anomalies

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::feed::BoundedFeed;
use super::mount::{spawn_ticker, Mounted};
use crate::catalog::{self, Anomaly, AnomalyKind, AnomalyStatus, KnowledgeUpdate, Replan};
use crate::hub::Severity;
use crate::utils::string::padded_id;

const INITIAL_HEALTH: f64 = 94.2;
const HEALTH_FLOOR: f64 = 85.0;
const HEALTH_CEILING: f64 = 100.0;
const ANOMALY_PROBABILITY: f64 = 0.1;
const SEVERITIES: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

#[derive(Debug, Clone)]
pub struct ReflexionMonitor {
    system_health: f64,
    anomalies: BoundedFeed<Anomaly>,
    knowledge_updates: Vec<KnowledgeUpdate>,
    replans: Vec<Replan>,
    /// Anomalies recorded so far, seeded ones included; drives the next id
    recorded: u32,
    rng: StdRng,
}

impl ReflexionMonitor {
    pub fn new(capacity: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let seeded = catalog::anomalies();
        let recorded = seeded.len() as u32;
        let mut anomalies = BoundedFeed::new(capacity);
        anomalies.extend(seeded.into_iter().rev());

        Self {
            system_health: INITIAL_HEALTH,
            anomalies,
            knowledge_updates: catalog::knowledge_updates(),
            replans: catalog::replans(),
            recorded,
            rng,
        }
    }

    pub fn system_health(&self) -> f64 {
        self.system_health
    }

    pub fn anomalies(&self) -> &BoundedFeed<Anomaly> {
        &self.anomalies
    }

    pub fn knowledge_updates(&self) -> &[KnowledgeUpdate] {
        &self.knowledge_updates
    }

    pub fn replans(&self) -> &[Replan] {
        &self.replans
    }

    /// Anomalies not yet resolved
    pub fn open_count(&self) -> usize {
        self.anomalies
            .iter()
            .filter(|a| a.status != AnomalyStatus::Resolved)
            .count()
    }

    /// Drift health by up to ±1 and occasionally detect an anomaly
    pub fn tick(&mut self) {
        self.system_health = (self.system_health + self.rng.gen_range(-1.0..1.0))
            .clamp(HEALTH_FLOOR, HEALTH_CEILING);

        if self.rng.gen_bool(ANOMALY_PROBABILITY) {
            let anomaly = self.detect();
            info!("Anomaly {} detected on {}", anomaly.id, anomaly.affected_nodes.join(", "));
            self.anomalies.push(anomaly);
        }
    }

    fn detect(&mut self) -> Anomaly {
        self.recorded += 1;
        let agent = padded_id("AGT", self.rng.gen_range(1..=10));

        Anomaly {
            id: padded_id("ANO", self.recorded),
            timestamp: Utc::now(),
            severity: SEVERITIES[self.rng.gen_range(0..SEVERITIES.len())],
            kind: AnomalyKind::ALL[self.rng.gen_range(0..AnomalyKind::ALL.len())],
            description: "Automated anomaly detection triggered".to_string(),
            affected_nodes: vec![agent],
            status: AnomalyStatus::Detected,
            confidence: self.rng.gen_range(70.0..100.0),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn mount(monitor: ReflexionMonitor, tick: Duration) -> Mounted<ReflexionMonitor> {
        let view = Arc::new(Mutex::new(monitor));
        Mounted::new("reflexion", view.clone()).with_timer(spawn_ticker(
            &view,
            tick,
            ReflexionMonitor::tick,
        ))
    }
}

impl Default for ReflexionMonitor {
    fn default() -> Self {
        Self::new(10, None)
    }
}
