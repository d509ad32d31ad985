//! Synthetic event generator
//!
//! Picks a kind uniformly and fills its payload with pseudo-random values in
//! the same ranges the mock backend always used.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use super::events::{
    AgentPerformance, AgentState, Event, EventKind, MissionStatus, Severity,
};
use crate::utils::string::padded_id;

/// Message carried by every generated alert
pub const ALERT_MESSAGE: &str = "System performance anomaly detected";
/// Component named by every generated alert
pub const ALERT_COMPONENT: &str = "A2-Engine-Core";

const MISSION_STATUSES: [MissionStatus; 3] = [
    MissionStatus::Active,
    MissionStatus::Completed,
    MissionStatus::Failed,
];
const AGENT_STATES: [AgentState; 3] = [AgentState::Active, AgentState::Idle, AgentState::Error];
const SEVERITIES: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

/// Event synthesizer over any RNG
pub struct EventGenerator<R = StdRng> {
    rng: R,
}

impl EventGenerator<StdRng> {
    /// Seeded generator when `seed` is given, entropy otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl<R: Rng> EventGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Random gap in `[min, max]`
    pub fn next_interval(&mut self, min: Duration, max: Duration) -> Duration {
        if max <= min {
            return min;
        }
        let span = (max - min).as_millis() as u64;
        min + Duration::from_millis(self.rng.gen_range(0..=span))
    }

    /// Uniformly chosen kind
    pub fn next_kind(&mut self) -> EventKind {
        EventKind::ALL[self.rng.gen_range(0..EventKind::ALL.len())]
    }

    /// Event of a uniformly chosen kind
    pub fn next_event(&mut self) -> Event {
        let kind = self.next_kind();
        self.synthesize(kind)
    }

    /// Event of the given kind with random payload fields
    pub fn synthesize(&mut self, kind: EventKind) -> Event {
        match kind {
            EventKind::MissionUpdate => {
                let mission_id = padded_id("MG", self.rng.gen_range(1..=3));
                let progress = self.rng.gen_range(0..100);
                let status = *self.pick(&MISSION_STATUSES);
                Event::mission_update(mission_id, progress, status)
            }
            EventKind::AgentStatus => {
                let agent_id = padded_id("AGT", self.rng.gen_range(1..=10));
                let status = *self.pick(&AGENT_STATES);
                let performance = AgentPerformance {
                    latency: self.rng.gen_range(0.0..5.0),
                    success_rate: self.rng.gen_range(85.0..100.0),
                };
                Event::agent_status(agent_id, status, performance)
            }
            EventKind::SubgoalProgress => {
                let subgoal_id = padded_id("SG", self.rng.gen_range(1..=10));
                let progress = self.rng.gen_range(0..100);
                let agents_assigned = self.rng.gen_range(1..=5);
                Event::subgoal_progress(subgoal_id, progress, agents_assigned)
            }
            EventKind::SystemAlert => {
                let severity = *self.pick(&SEVERITIES);
                Event::system_alert(severity, ALERT_MESSAGE, ALERT_COMPONENT)
            }
            EventKind::TraceEvent => {
                let node_id = format!("NODE-{}", self.rng.gen_range(0..100));
                let parent_id = format!("NODE-{}", self.rng.gen_range(0..50));
                Event::trace_event(node_id, "spawn", Some(parent_id))
            }
        }
    }

    fn pick<'a, T>(&mut self, choices: &'a [T; 3]) -> &'a T {
        &choices[self.rng.gen_range(0..choices.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::events::EventPayload;
    use std::collections::HashSet;

    fn seeded() -> EventGenerator {
        EventGenerator::from_seed(Some(7))
    }

    #[test]
    fn test_interval_bounds() {
        let mut generator = seeded();
        let min = Duration::from_millis(3000);
        let max = Duration::from_millis(5000);
        for _ in 0..200 {
            let gap = generator.next_interval(min, max);
            assert!(gap >= min && gap <= max);
        }
    }

    #[test]
    fn test_degenerate_interval() {
        let mut generator = seeded();
        let fixed = Duration::from_millis(10);
        assert_eq!(generator.next_interval(fixed, fixed), fixed);
    }

    #[test]
    fn test_all_kinds_reachable() {
        let mut generator = seeded();
        let kinds: HashSet<EventKind> = (0..500).map(|_| generator.next_kind()).collect();
        assert_eq!(kinds.len(), EventKind::ALL.len());
    }

    #[test]
    fn test_synthesized_kind_matches() {
        let mut generator = seeded();
        for kind in EventKind::ALL {
            assert_eq!(generator.synthesize(kind).kind(), kind);
        }
    }

    #[test]
    fn test_payload_ranges() {
        let mut generator = seeded();
        for _ in 0..300 {
            match generator.next_event().payload {
                EventPayload::MissionUpdate(update) => {
                    assert!(["MG-001", "MG-002", "MG-003"].contains(&update.mission_id.as_str()));
                    assert!(update.progress < 100);
                }
                EventPayload::AgentStatus(status) => {
                    assert!(status.agent_id.starts_with("AGT-"));
                    assert!((0.0..5.0).contains(&status.performance.latency));
                    assert!((85.0..100.0).contains(&status.performance.success_rate));
                    assert_ne!(status.status, AgentState::Terminated);
                }
                EventPayload::SubgoalProgress(progress) => {
                    assert!((1..=5).contains(&progress.agents_assigned));
                }
                EventPayload::SystemAlert(alert) => {
                    assert_eq!(alert.message, ALERT_MESSAGE);
                    assert_eq!(alert.component, ALERT_COMPONENT);
                }
                EventPayload::TraceEvent(trace) => {
                    assert_eq!(trace.event, "spawn");
                    assert!(trace.parent_id.is_some());
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_kinds() {
        let mut a = seeded();
        let mut b = seeded();
        let kinds_a: Vec<EventKind> = (0..20).map(|_| a.next_event().kind()).collect();
        let kinds_b: Vec<EventKind> = (0..20).map(|_| b.next_event().kind()).collect();
        assert_eq!(kinds_a, kinds_b);
    }
}
