//! Fabricated fixture data
//!
//! Missions, subgoals, agents and reflexion records the views start from.
//! Nothing here is fetched; every value is fixed.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MissionControlError, Result};
use crate::hub::{AgentState, MissionStatus, Severity};

/// Mission priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = MissionControlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            other => Err(MissionControlError::Other(format!("Unknown priority: {}", other))),
        }
    }
}

/// Top-level mission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: MissionStatus,
    pub priority: Priority,
    pub progress: u8,
    pub subgoals: u32,
    pub agents: u32,
    pub created_at: DateTime<Utc>,
    pub trace_id: String,
}

/// Subgoal row of a mission breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subgoal {
    pub id: String,
    pub description: String,
    pub status: MissionStatus,
    pub depth: u32,
    pub progress: u8,
    pub agents: u32,
    pub can_recurse: bool,
    /// Dollars spent so far
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Spawn,
    Complete,
    Error,
    Replan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: TimelineKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subgoal_id: Option<String>,
}

/// Mission with its subgoal breakdown and timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionDetail {
    pub mission: Mission,
    pub subgoals: Vec<Subgoal>,
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningStep {
    pub step: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentStats {
    pub tasks_completed: u32,
    /// Percent
    pub success_rate: f64,
    /// Seconds
    pub avg_latency: f64,
    pub retries: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentLimits {
    pub max_depth: u32,
    /// Dollars
    pub budget: f64,
    /// Seconds
    pub timeout: u32,
}

/// Fixed log line of an agent profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedLogLine {
    pub timestamp: DateTime<Utc>,
    pub warn: bool,
    pub message: String,
}

/// Full agent profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub id: String,
    pub name: String,
    pub role: String,
    pub status: AgentState,
    pub current_task: String,
    pub capabilities: Vec<String>,
    pub performance: AgentStats,
    pub learning_path: Vec<LearningStep>,
    pub limits: AgentLimits,
    pub logs: Vec<SeedLogLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Mission,
    Subgoal,
    Agent,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Mission => "mission",
            NodeType::Subgoal => "subgoal",
            NodeType::Agent => "agent",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node of the execution trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceNode {
    pub id: String,
    pub name: String,
    pub node_type: NodeType,
    pub status: MissionStatus,
    pub depth: u32,
    /// Ids of the nodes this one spawned or delegated to
    pub connections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyKind {
    Performance,
    Logic,
    Resource,
    Pattern,
}

impl AnomalyKind {
    pub const ALL: [AnomalyKind; 4] = [
        AnomalyKind::Performance,
        AnomalyKind::Logic,
        AnomalyKind::Resource,
        AnomalyKind::Pattern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::Performance => "performance",
            AnomalyKind::Logic => "logic",
            AnomalyKind::Resource => "resource",
            AnomalyKind::Pattern => "pattern",
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyStatus {
    Detected,
    Investigating,
    Resolved,
}

impl AnomalyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyStatus::Detected => "detected",
            AnomalyStatus::Investigating => "investigating",
            AnomalyStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for AnomalyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub kind: AnomalyKind,
    pub description: String,
    pub affected_nodes: Vec<String>,
    pub status: AnomalyStatus,
    /// Percent
    pub confidence: f64,
}

/// Change to the shared knowledge graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeUpdate {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// schema_promotion, schema_drop, pattern_learned or capability_enhanced
    pub kind: String,
    pub description: String,
    pub impact: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replan {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub initiating_agent: String,
    pub reason: String,
    /// local, branch or global
    pub scope: String,
    pub status: MissionStatus,
    pub affected_subgoals: Vec<String>,
}

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn mission(
    id: &str,
    name: &str,
    description: &str,
    status: MissionStatus,
    priority: Priority,
    (progress, subgoals, agents): (u8, u32, u32),
    created_at: &str,
    trace_id: &str,
) -> Mission {
    Mission {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        status,
        priority,
        progress,
        subgoals,
        agents,
        created_at: at(created_at),
        trace_id: trace_id.to_string(),
    }
}

/// The three seeded missions, MG-001 first
pub fn missions() -> Vec<Mission> {
    vec![
        mission(
            "MG-001",
            "Fiscal Analysis Q4",
            "Comprehensive financial analysis and forecasting for Q4 performance",
            MissionStatus::Active,
            Priority::High,
            (67, 12, 8),
            "2024-01-15T10:30:00Z",
            "trace-001-fiscal",
        ),
        mission(
            "MG-002",
            "Market Research Initiative",
            "Deep market analysis for emerging AI technologies",
            MissionStatus::Active,
            Priority::Medium,
            (34, 8, 5),
            "2024-01-15T14:20:00Z",
            "trace-002-market",
        ),
        mission(
            "MG-003",
            "Compliance Audit",
            "Automated compliance checking across all systems",
            MissionStatus::Completed,
            Priority::Critical,
            (100, 15, 12),
            "2024-01-14T09:15:00Z",
            "trace-003-compliance",
        ),
    ]
}

fn subgoal(
    id: &str,
    description: &str,
    status: MissionStatus,
    (depth, progress, agents): (u32, u8, u32),
    can_recurse: bool,
    cost: f64,
) -> Subgoal {
    Subgoal {
        id: id.to_string(),
        description: description.to_string(),
        status,
        depth,
        progress,
        agents,
        can_recurse,
        cost,
    }
}

fn timeline(id: &str, timestamp: &str, kind: TimelineKind, description: &str, subgoal_id: Option<&str>) -> TimelineEntry {
    TimelineEntry {
        id: id.to_string(),
        timestamp: at(timestamp),
        kind,
        description: description.to_string(),
        subgoal_id: subgoal_id.map(str::to_string),
    }
}

/// Mission with its breakdown; every mission shares the same fixture breakdown
pub fn mission_detail(id: &str) -> Result<MissionDetail> {
    let mission = missions()
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| MissionControlError::UnknownEntity(format!("mission {}", id)))?;

    let subgoals = vec![
        subgoal("SG-001", "Analyze Q4 revenue streams", MissionStatus::Completed, (1, 100, 2), true, 0.45),
        subgoal("SG-002", "Generate expense categorization", MissionStatus::Active, (1, 78, 3), true, 0.32),
        subgoal("SG-003", "Forecast Q1 projections", MissionStatus::Active, (2, 34, 2), false, 0.28),
    ];

    let timeline = vec![
        timeline(
            "E-001",
            "2024-01-15T10:30:00Z",
            TimelineKind::Spawn,
            "Mission initialized with 3 primary subgoals",
            None,
        ),
        timeline(
            "E-002",
            "2024-01-15T10:45:00Z",
            TimelineKind::Spawn,
            "Subgoal SG-001 spawned 2 child tasks",
            Some("SG-001"),
        ),
        timeline(
            "E-003",
            "2024-01-15T11:20:00Z",
            TimelineKind::Complete,
            "Revenue analysis completed successfully",
            Some("SG-001"),
        ),
    ];

    Ok(MissionDetail {
        mission,
        subgoals,
        timeline,
    })
}

/// Agents that appear in the execution trace
pub fn agent_ids() -> Vec<String> {
    trace_nodes()
        .into_iter()
        .filter(|node| node.node_type == NodeType::Agent)
        .map(|node| node.id)
        .collect()
}

/// Full profile of a trace agent
///
/// Only AGT-001 carries a recorded history; the other agents get their trace
/// name and role with empty history.
pub fn agent_profile(id: &str) -> Result<AgentProfile> {
    let node = trace_nodes()
        .into_iter()
        .find(|node| node.node_type == NodeType::Agent && node.id == id)
        .ok_or_else(|| MissionControlError::UnknownEntity(format!("agent {}", id)))?;

    if id != "AGT-001" {
        return Ok(AgentProfile {
            id: node.id,
            name: node.name,
            role: node.role.unwrap_or_default(),
            status: match node.status {
                MissionStatus::Failed => AgentState::Error,
                MissionStatus::Completed => AgentState::Idle,
                _ => AgentState::Active,
            },
            current_task: String::new(),
            capabilities: Vec::new(),
            performance: AgentStats {
                tasks_completed: 0,
                success_rate: 0.0,
                avg_latency: 0.0,
                retries: 0,
            },
            learning_path: Vec::new(),
            limits: AgentLimits {
                max_depth: 5,
                budget: 10.0,
                timeout: 300,
            },
            logs: Vec::new(),
        });
    }

    let step = |step: &str, status: StepStatus, timestamp: Option<&str>| LearningStep {
        step: step.to_string(),
        status,
        timestamp: timestamp.map(at),
    };
    let log = |timestamp: &str, warn: bool, message: &str| SeedLogLine {
        timestamp: at(timestamp),
        warn,
        message: message.to_string(),
    };

    Ok(AgentProfile {
        id: node.id,
        name: node.name,
        role: "Data Analysis Specialist".to_string(),
        status: AgentState::Active,
        current_task: "Processing Q4 revenue categorization".to_string(),
        capabilities: strings(&[
            "Data Analysis",
            "Pattern Recognition",
            "Report Generation",
            "Recursive Delegation",
        ]),
        performance: AgentStats {
            tasks_completed: 47,
            success_rate: 94.7,
            avg_latency: 2.3,
            retries: 3,
        },
        learning_path: vec![
            step("Initialize core capabilities", StepStatus::Completed, Some("2024-01-15T10:30:00Z")),
            step("Load financial analysis patterns", StepStatus::Completed, Some("2024-01-15T10:32:00Z")),
            step("Establish recursive protocols", StepStatus::Completed, Some("2024-01-15T10:35:00Z")),
            step("Execute primary analysis task", StepStatus::Active, Some("2024-01-15T10:40:00Z")),
            step("Generate comprehensive report", StepStatus::Pending, None),
        ],
        limits: AgentLimits {
            max_depth: 5,
            budget: 10.0,
            timeout: 300,
        },
        // Newest first
        logs: vec![
            log("2024-01-15T11:47:01Z", false, "Recursive analysis completed successfully"),
            log("2024-01-15T11:46:30Z", false, "Spawning specialized analysis agent for anomaly"),
            log("2024-01-15T11:46:12Z", true, "Anomaly detected in Q3 comparison data"),
            log("2024-01-15T11:45:45Z", false, "Identified 12 primary revenue categories"),
            log("2024-01-15T11:45:23Z", false, "Started revenue stream analysis"),
        ],
    })
}

#[allow(clippy::too_many_arguments)]
fn node(
    id: &str,
    name: &str,
    node_type: NodeType,
    status: MissionStatus,
    depth: u32,
    connections: &[&str],
    role: Option<&str>,
    progress: Option<f64>,
    cost: Option<f64>,
) -> TraceNode {
    TraceNode {
        id: id.to_string(),
        name: name.to_string(),
        node_type,
        status,
        depth,
        connections: strings(connections),
        role: role.map(str::to_string),
        progress,
        cost,
    }
}

/// Execution trace of MG-001
pub fn trace_nodes() -> Vec<TraceNode> {
    use MissionStatus::{Active, Completed, Pending};
    use NodeType::{Agent, Mission, Subgoal};

    vec![
        node("MG-001", "Fiscal Analysis Q4", Mission, Active, 0, &["SG-001", "SG-002", "SG-003"], None, Some(67.0), None),
        node("SG-001", "Revenue Analysis", Subgoal, Completed, 1, &["AGT-001", "AGT-002"], None, Some(100.0), Some(0.45)),
        node("SG-002", "Expense Categorization", Subgoal, Active, 1, &["AGT-003", "SG-004"], None, Some(78.0), Some(0.32)),
        node("SG-003", "Forecast Generation", Subgoal, Pending, 1, &[], None, Some(0.0), Some(0.0)),
        node("AGT-001", "Financial Analyzer Alpha", Agent, Completed, 2, &[], Some("Data Analysis"), None, None),
        node("AGT-002", "Pattern Recognition Beta", Agent, Completed, 2, &[], Some("ML Specialist"), None, None),
        node("AGT-003", "Expense Classifier Gamma", Agent, Active, 2, &[], Some("Classification"), None, None),
        node("SG-004", "Anomaly Detection", Subgoal, Active, 2, &["AGT-004"], None, Some(34.0), Some(0.18)),
        node("AGT-004", "Anomaly Hunter Delta", Agent, Active, 3, &[], Some("Anomaly Detection"), None, None),
    ]
}

/// Recorded anomalies, newest first
pub fn anomalies() -> Vec<Anomaly> {
    vec![
        Anomaly {
            id: "ANO-001".to_string(),
            timestamp: at("2024-01-15T11:23:45Z"),
            severity: Severity::Medium,
            kind: AnomalyKind::Performance,
            description: "Agent AGT-003 showing 40% higher latency than baseline".to_string(),
            affected_nodes: strings(&["AGT-003", "SG-002"]),
            status: AnomalyStatus::Investigating,
            confidence: 87.3,
        },
        Anomaly {
            id: "ANO-002".to_string(),
            timestamp: at("2024-01-15T10:45:12Z"),
            severity: Severity::Low,
            kind: AnomalyKind::Pattern,
            description: "Unusual data pattern detected in expense categorization".to_string(),
            affected_nodes: strings(&["SG-002"]),
            status: AnomalyStatus::Resolved,
            confidence: 92.1,
        },
    ]
}

pub fn knowledge_updates() -> Vec<KnowledgeUpdate> {
    vec![
        KnowledgeUpdate {
            id: "KPG-001".to_string(),
            timestamp: at("2024-01-15T11:30:00Z"),
            kind: "pattern_learned".to_string(),
            description: "New financial analysis pattern identified and integrated".to_string(),
            impact: Severity::Medium,
        },
        KnowledgeUpdate {
            id: "KPG-002".to_string(),
            timestamp: at("2024-01-15T10:15:00Z"),
            kind: "schema_promotion".to_string(),
            description: "Expense categorization schema promoted to global knowledge".to_string(),
            impact: Severity::High,
        },
    ]
}

pub fn replans() -> Vec<Replan> {
    vec![Replan {
        id: "RPL-001".to_string(),
        timestamp: at("2024-01-15T11:45:00Z"),
        initiating_agent: "AGT-003".to_string(),
        reason: "Performance degradation detected, requesting resource reallocation".to_string(),
        scope: "branch".to_string(),
        status: MissionStatus::Completed,
        affected_subgoals: strings(&["SG-002", "SG-004"]),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_missions() {
        let missions = missions();
        let ids: Vec<&str> = missions.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["MG-001", "MG-002", "MG-003"]);
        assert_eq!(missions[2].status, MissionStatus::Completed);
        assert_eq!(missions[2].progress, 100);
        assert_eq!(missions[0].created_at.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_mission_detail_lookup() {
        let detail = mission_detail("MG-002").unwrap();
        assert_eq!(detail.mission.name, "Market Research Initiative");
        assert_eq!(detail.subgoals.len(), 3);
        assert_eq!(detail.timeline[2].kind, TimelineKind::Complete);

        assert!(matches!(
            mission_detail("MG-404"),
            Err(MissionControlError::UnknownEntity(_))
        ));
    }

    #[test]
    fn test_agent_profiles() {
        assert_eq!(agent_ids(), vec!["AGT-001", "AGT-002", "AGT-003", "AGT-004"]);

        let alpha = agent_profile("AGT-001").unwrap();
        assert_eq!(alpha.name, "Financial Analyzer Alpha");
        assert_eq!(alpha.performance.tasks_completed, 47);
        assert_eq!(alpha.logs.len(), 5);
        assert!(alpha.logs[2].warn);

        let delta = agent_profile("AGT-004").unwrap();
        assert_eq!(delta.role, "Anomaly Detection");
        assert!(delta.logs.is_empty());

        assert!(agent_profile("SG-001").is_err());
    }

    #[test]
    fn test_trace_connections_resolve() {
        let nodes = trace_nodes();
        for node in &nodes {
            for target in &node.connections {
                assert!(nodes.iter().any(|n| &n.id == target), "dangling {}", target);
            }
        }
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("Critical".parse::<Priority>().unwrap(), Priority::Critical);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
