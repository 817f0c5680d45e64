use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::db::RoadNetwork;

/// Minimum similarity score for a node identifier to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Location in the road network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    /// Charging power in energy units per hour; `0.0` means not a station.
    pub charging_power: f64,
}

impl GraphNode {
    /// Whether a vehicle can charge at this node.
    pub fn is_station(&self) -> bool {
        self.charging_power > 0.0
    }
}

/// Directed road segment between two locations.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub source: String,
    pub destination: String,
    /// Travel duration in minutes.
    pub duration: f64,
    /// Energy consumed travelling the segment.
    pub consumption: f64,
}

/// Cost of the cheapest-duration edge between two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCost {
    pub duration: f64,
    pub consumption: f64,
}

/// Read-only view of the road network consumed by the route search.
pub trait GraphAccess {
    /// Lookup a node by identifier.
    fn node(&self, id: &str) -> Option<&GraphNode>;

    /// All edges leaving `node_id`, in insertion order.
    fn outgoing_edges(&self, node_id: &str) -> &[GraphEdge];

    /// The minimum-duration edge from `source` to `destination`. Ties go to
    /// the edge inserted first.
    fn shortest_edge(&self, source: &str, destination: &str) -> Option<EdgeCost> {
        let mut best: Option<EdgeCost> = None;
        for edge in self.outgoing_edges(source) {
            if edge.destination != destination {
                continue;
            }
            let shorter = best
                .map(|current| compare_duration(edge.duration, current.duration) == Ordering::Less)
                .unwrap_or(true);
            if shorter {
                best = Some(EdgeCost {
                    duration: edge.duration,
                    consumption: edge.consumption,
                });
            }
        }
        best
    }
}

/// In-memory road graph.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    nodes: Arc<HashMap<String, GraphNode>>,
    adjacency: Arc<HashMap<String, Vec<GraphEdge>>>,
}

impl RoadGraph {
    /// Start building a graph programmatically.
    pub fn builder() -> RoadGraphBuilder {
        RoadGraphBuilder::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Charging stations sorted by identifier.
    pub fn stations(&self) -> Vec<&GraphNode> {
        let mut stations: Vec<&GraphNode> =
            self.nodes.values().filter(|node| node.is_station()).collect();
        stations.sort_by(|a, b| a.id.cmp(&b.id));
        stations
    }

    /// Node identifiers resembling `query`, best match first.
    pub fn fuzzy_node_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .nodes
            .keys()
            .map(|id| (strsim::jaro_winkler(&needle, &id.to_lowercase()), id.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.to_string())
            .collect()
    }
}

impl GraphAccess for RoadGraph {
    fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    fn outgoing_edges(&self, node_id: &str) -> &[GraphEdge] {
        self.adjacency
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Incremental constructor for [`RoadGraph`].
#[derive(Debug, Default)]
pub struct RoadGraphBuilder {
    nodes: HashMap<String, GraphNode>,
    adjacency: HashMap<String, Vec<GraphEdge>>,
}

impl RoadGraphBuilder {
    /// Add a node, replacing any earlier node with the same identifier.
    pub fn node(mut self, id: impl Into<String>, charging_power: f64) -> Self {
        let id = id.into();
        self.nodes.insert(
            id.clone(),
            GraphNode {
                id,
                charging_power,
            },
        );
        self
    }

    /// Add a directed edge. Parallel edges are kept.
    pub fn edge(
        mut self,
        source: impl Into<String>,
        destination: impl Into<String>,
        duration: f64,
        consumption: f64,
    ) -> Self {
        let source = source.into();
        self.adjacency
            .entry(source.clone())
            .or_default()
            .push(GraphEdge {
                source,
                destination: destination.into(),
                duration,
                consumption,
            });
        self
    }

    pub fn build(self) -> RoadGraph {
        RoadGraph {
            nodes: Arc::new(self.nodes),
            adjacency: Arc::new(self.adjacency),
        }
    }
}

/// Build the routing graph for a loaded road network.
pub fn build_graph(network: &RoadNetwork) -> RoadGraph {
    let mut builder = RoadGraph::builder();
    for node in network.nodes.values() {
        builder = builder.node(node.id.clone(), node.charging_power);
    }
    for edge in &network.edges {
        builder = builder.edge(
            edge.source.clone(),
            edge.destination.clone(),
            edge.duration,
            edge.consumption,
        );
    }
    builder.build()
}

fn compare_duration(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Greater)
}
