//! Per-search path table and the dominance filter.

use std::collections::HashMap;
use std::sync::Arc;

use crate::frontier::FrontierId;
use crate::path::{Path, VisitedNode};

/// Every frontier entry created during one search, keyed by its identity.
///
/// Entries are never removed, even once dominated. Dominance is one-sided:
/// a new state is rejected when an existing state at the same node is at
/// least as good in both travel time and SOC, but existing states are never
/// purged by a better newcomer. This keeps a single candidate per state
/// instead of a full Pareto skyline.
#[derive(Debug, Default)]
pub(crate) struct PathTable {
    paths: HashMap<FrontierId, Arc<Path>>,
    by_node: HashMap<String, Vec<FrontierId>>,
}

impl PathTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `path` under the identity of its terminal state.
    pub fn insert(&mut self, path: Path) -> FrontierId {
        let id = path.last().id.clone();
        self.by_node
            .entry(id.name().to_string())
            .or_default()
            .push(id.clone());
        self.paths.insert(id.clone(), Arc::new(path));
        id
    }

    pub fn get(&self, id: &FrontierId) -> Option<Arc<Path>> {
        self.paths.get(id).cloned()
    }

    /// Number of frontier entries recorded, dominated ones included.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Terminal states recorded for the physical node `name`.
    pub fn states_at<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a VisitedNode> + 'a {
        self.by_node
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.paths.get(id).map(|path| path.last()))
    }

    /// Whether `candidate` survives the dominance filter.
    pub fn admits(&self, candidate: &VisitedNode) -> bool {
        !self.states_at(candidate.name()).any(|existing| {
            existing.travel_time <= candidate.travel_time && existing.soc >= candidate.soc
        })
    }
}
