//! Mission board: seeded missions kept in step with mission updates

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info};

use super::mount::{subscribe_view, Mounted};
use crate::catalog::{self, Mission, Priority};
use crate::hub::{Event, EventHub, EventKind, EventPayload, MissionStatus};
use crate::utils::string::padded_id;

/// Missions, newest first
#[derive(Debug, Clone)]
pub struct MissionBoard {
    missions: Vec<Mission>,
}

impl MissionBoard {
    /// Board seeded with the catalog missions
    pub fn new() -> Self {
        Self {
            missions: catalog::missions(),
        }
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    pub fn get(&self, id: &str) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }

    /// Replace progress and status of the matching mission; unknown ids are ignored
    pub fn apply(&mut self, event: &Event) {
        let EventPayload::MissionUpdate(update) = &event.payload else {
            return;
        };

        match self.missions.iter_mut().find(|m| m.id == update.mission_id) {
            Some(mission) => {
                mission.progress = update.progress;
                mission.status = update.status;
            }
            None => debug!("Ignoring update for unknown mission {}", update.mission_id),
        }
    }

    /// Queue a new mission at the top of the board and return its id
    pub fn create_mission(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> String {
        let id = padded_id("MG", self.missions.len() as u32 + 1);
        let now = Utc::now();
        let mission = Mission {
            id: id.clone(),
            name: name.into(),
            description: description.into(),
            status: MissionStatus::Queued,
            priority,
            progress: 0,
            subgoals: 0,
            agents: 0,
            created_at: now,
            trace_id: format!("trace-{}", now.timestamp_millis()),
        };

        info!("Queued mission {} ({})", id, mission.name);
        self.missions.insert(0, mission);
        id
    }

    pub fn count_with_status(&self, status: MissionStatus) -> usize {
        self.missions.iter().filter(|m| m.status == status).count()
    }

    pub fn active_count(&self) -> usize {
        self.count_with_status(MissionStatus::Active)
    }

    pub fn completed_count(&self) -> usize {
        self.count_with_status(MissionStatus::Completed)
    }

    pub fn mount(hub: &EventHub) -> Mounted<MissionBoard> {
        let view = Arc::new(Mutex::new(MissionBoard::new()));
        Mounted::new("missions", view.clone()).with_subscription(subscribe_view(
            hub,
            EventKind::MissionUpdate,
            &view,
            MissionBoard::apply,
        ))
    }
}

impl Default for MissionBoard {
    fn default() -> Self {
        Self::new()
    }
}
