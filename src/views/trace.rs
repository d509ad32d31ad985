//! Execution trace graph
//!
//! Mission → subgoal → agent hierarchy with derived edges. While playing, a
//! local timer advances the progress of active nodes.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::mount::{spawn_ticker, Mounted};
use crate::catalog::{self, NodeType, TraceNode};
use crate::hub::MissionStatus;

/// Largest progress step per tick
const MAX_STEP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Spawn,
    Delegate,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Spawn => f.write_str("spawn"),
            EdgeKind::Delegate => f.write_str("delegate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone)]
pub struct TraceGraph {
    nodes: Vec<TraceNode>,
    playing: bool,
    filter: Option<NodeType>,
    rng: StdRng,
}

impl TraceGraph {
    /// Graph over the catalog trace, paused and unfiltered
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_nodes(catalog::trace_nodes(), seed)
    }

    pub fn with_nodes(nodes: Vec<TraceNode>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            nodes,
            playing: false,
            filter: None,
            rng,
        }
    }

    pub fn nodes(&self) -> &[TraceNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&TraceNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Nodes passing the current type filter
    pub fn visible_nodes(&self) -> impl Iterator<Item = &TraceNode> {
        self.nodes
            .iter()
            .filter(move |n| self.filter.map_or(true, |t| n.node_type == t))
    }

    /// One edge per connection; subgoal → agent is a delegation
    pub fn edges(&self) -> Vec<TraceEdge> {
        self.nodes
            .iter()
            .flat_map(|source| {
                source.connections.iter().map(move |target| {
                    let delegated = source.node_type == NodeType::Subgoal
                        && self.node(target).map(|t| t.node_type) == Some(NodeType::Agent);
                    TraceEdge {
                        source: source.id.clone(),
                        target: target.clone(),
                        kind: if delegated {
                            EdgeKind::Delegate
                        } else {
                            EdgeKind::Spawn
                        },
                    }
                })
            })
            .collect()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    pub fn filter(&self) -> Option<NodeType> {
        self.filter
    }

    /// `None` shows every node
    pub fn set_filter(&mut self, filter: Option<NodeType>) {
        self.filter = filter;
    }

    /// Step the filter: all → mission → subgoal → agent → all
    pub fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None => Some(NodeType::Mission),
            Some(NodeType::Mission) => Some(NodeType::Subgoal),
            Some(NodeType::Subgoal) => Some(NodeType::Agent),
            Some(NodeType::Agent) => None,
        };
    }

    /// Advance active nodes that track progress; no-op while paused
    pub fn tick(&mut self) {
        if !self.playing {
            return;
        }

        for node in self.nodes.iter_mut() {
            if node.status != MissionStatus::Active {
                continue;
            }
            if let Some(progress) = node.progress.as_mut() {
                *progress = (*progress + self.rng.gen_range(0.0..MAX_STEP)).min(100.0);
            }
        }
    }

    /// Advance on `tick` while playing. Must be called from within a tokio runtime.
    pub fn mount(graph: TraceGraph, tick: Duration) -> Mounted<TraceGraph> {
        let view = Arc::new(Mutex::new(graph));
        Mounted::new("trace", view.clone()).with_timer(spawn_ticker(&view, tick, TraceGraph::tick))
    }
}

impl Default for TraceGraph {
    fn default() -> Self {
        Self::new(None)
    }
}
