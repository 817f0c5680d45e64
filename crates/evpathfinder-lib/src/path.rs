use std::collections::HashMap;

use serde::Serialize;

use crate::frontier::FrontierId;

/// State of the vehicle at one node of a candidate route.
///
/// `travel_time` is the departure time from the node, so it already includes
/// `charging_time`; `soc` is the state of charge after any charging here.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitedNode {
    pub id: FrontierId,
    pub travel_time: f64,
    pub soc: f64,
    pub charging_time: f64,
}

impl VisitedNode {
    pub fn new(id: FrontierId, travel_time: f64, soc: f64, charging_time: f64) -> Self {
        Self {
            id,
            travel_time,
            soc,
            charging_time,
        }
    }

    /// Physical node identifier.
    pub fn name(&self) -> &str {
        self.id.name()
    }

    pub fn is_charging_stop(&self) -> bool {
        self.charging_time > 0.0
    }

    /// Plain record handed to callers.
    pub fn to_record(&self) -> VisitedNodeRecord {
        VisitedNodeRecord {
            node_id: self.name().to_string(),
            travel_time: self.travel_time,
            soc: self.soc,
            charging_time: self.charging_time,
        }
    }
}

/// Serialisable view of a [`VisitedNode`] without its frontier sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitedNodeRecord {
    pub node_id: String,
    pub travel_time: f64,
    pub soc: f64,
    pub charging_time: f64,
}

/// Candidate route prefix from the start state to the state it represents.
///
/// Never empty: index 0 is the start node and the last element is the
/// terminal state. Paths are not mutated once built; extending one produces a
/// new path.
#[derive(Debug, Clone)]
pub struct Path {
    nodes: Vec<VisitedNode>,
    positions: HashMap<FrontierId, usize>,
}

impl Path {
    /// Single-element path holding the start state.
    pub fn start(node: VisitedNode) -> Self {
        Self::from_nodes(vec![node])
    }

    /// Build a path from an ordered, non-empty node sequence.
    pub(crate) fn from_nodes(nodes: Vec<VisitedNode>) -> Self {
        debug_assert!(!nodes.is_empty(), "paths always contain the start node");
        let positions = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.clone(), index))
            .collect();
        Self { nodes, positions }
    }

    /// Copy of this path with `node` appended.
    pub fn extended(&self, node: VisitedNode) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        let mut positions = self.positions.clone();
        positions.insert(node.id.clone(), nodes.len());
        nodes.push(node);
        Self { nodes, positions }
    }

    pub fn nodes(&self) -> &[VisitedNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The state this path represents.
    pub fn last(&self) -> &VisitedNode {
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn position(&self, id: &FrontierId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// State recorded under `id`. Another state of the same physical node
    /// is not a match.
    pub fn get(&self, id: &FrontierId) -> Option<&VisitedNode> {
        self.position(id).map(|index| &self.nodes[index])
    }

    /// The node visited immediately before `id`, if any.
    pub fn parent_of(&self, id: &FrontierId) -> Option<&VisitedNode> {
        match self.position(id)? {
            0 => None,
            index => Some(&self.nodes[index - 1]),
        }
    }

    /// Index of the most recent node with a charging stop.
    pub fn last_station_index(&self) -> Option<usize> {
        self.nodes.iter().rposition(VisitedNode::is_charging_stop)
    }

    pub fn records(&self) -> Vec<VisitedNodeRecord> {
        self.nodes.iter().map(VisitedNode::to_record).collect()
    }
}
