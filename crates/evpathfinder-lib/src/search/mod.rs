//! Battery-constrained label-setting search.
//!
//! The state at a node is two-dimensional (arrival time, SOC), so one
//! physical node can hold several frontier entries at once. Entries are
//! expanded in travel-time order; the first entry extracted at the goal is
//! the fastest feasible route found. Hops the battery cannot cover go through
//! [`charging`] to insert a charging stop on the path built so far, and every
//! new state must pass the one-sided dominance filter of the per-search
//! path table.
//!
//! All search state (path table, queue, identity minter) lives in one
//! [`RouteSearch`] value and is dropped when the search ends, so concurrent
//! searches over the same graph never share frontier entries.

mod charging;
mod table;

use table::PathTable;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::frontier::FrontierIdMinter;
use crate::graph::{GraphAccess, GraphEdge};
use crate::path::{Path, VisitedNode};
use crate::queue::FrontierQueue;
use crate::vehicle::VehicleConfig;

use charging::ChargingPlanner;

/// Caller-level limits on a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Stop after this many frontier extractions; the search then reports no
    /// route and sets [`SearchStats::aborted`].
    pub max_expansions: Option<usize>,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Frontier entries extracted from the queue.
    pub expansions: usize,
    /// Frontier entries stored in the path table, including the start.
    pub frontier_entries: usize,
    /// Candidate states rejected by the dominance filter.
    pub dominated: usize,
    /// Hops that required a charging stop to be inserted.
    pub charging_insertions: usize,
    /// Hops for which no charging stop could make the hop feasible.
    pub infeasible_hops: usize,
    /// The search hit [`SearchOptions::max_expansions`].
    pub aborted: bool,
}

/// Result of a single search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Fastest feasible route, if any.
    pub path: Option<Path>,
    pub stats: SearchStats,
}

/// One invocation of the route search.
pub struct RouteSearch<'g, G: GraphAccess> {
    graph: &'g G,
    vehicle: VehicleConfig,
    options: SearchOptions,
    minter: FrontierIdMinter,
    table: PathTable,
    queue: FrontierQueue,
    stats: SearchStats,
}

impl<'g, G: GraphAccess> RouteSearch<'g, G> {
    pub fn new(graph: &'g G, vehicle: VehicleConfig, options: SearchOptions) -> Self {
        Self {
            graph,
            vehicle,
            options,
            minter: FrontierIdMinter::new(),
            table: PathTable::new(),
            queue: FrontierQueue::new(),
            stats: SearchStats::default(),
        }
    }

    /// Run the search from `start` to `goal`.
    ///
    /// Unknown endpoints and unreachable goals both produce an outcome with
    /// no path. Errors are reserved for an inconsistent graph or a broken
    /// internal invariant.
    pub fn run(mut self, start: &str, goal: &str) -> Result<SearchOutcome> {
        let graph = self.graph;
        let (Some(start_node), Some(goal_node)) = (graph.node(start), graph.node(goal)) else {
            debug!(start, goal, "route endpoint not found in graph");
            return Ok(self.finish(None));
        };

        let start_id = self.minter.mint(&start_node.id);
        let initial = VisitedNode::new(start_id.clone(), 0.0, self.vehicle.initial_charge, 0.0);
        self.table.insert(Path::start(initial));
        self.queue.insert(start_id, 0.0);

        debug!(
            start,
            goal,
            max_soc = self.vehicle.max_soc,
            initial_charge = self.vehicle.initial_charge,
            "starting route search"
        );

        while !self.queue.is_empty() {
            if let Some(limit) = self.options.max_expansions {
                if self.stats.expansions >= limit {
                    warn!(limit, "route search aborted after expansion limit");
                    self.stats.aborted = true;
                    return Ok(self.finish(None));
                }
            }

            let id = self.queue.extract_min()?;
            let path_of_u = self
                .table
                .get(&id)
                .ok_or_else(|| Error::UnknownFrontierEntry { id: id.to_string() })?;
            let u = path_of_u
                .get(&id)
                .ok_or_else(|| Error::UnknownFrontierEntry { id: id.to_string() })?;
            self.stats.expansions += 1;

            if u.name() == goal_node.id {
                return Ok(self.finish(Some(path_of_u)));
            }

            for edge in expansion_edges(graph, u.name()) {
                self.relax(&path_of_u, edge)?;
            }
        }

        Ok(self.finish(None))
    }

    /// Try to extend `path_of_u` along `edge`, charging on the way if needed.
    fn relax(&mut self, path_of_u: &Path, edge: &GraphEdge) -> Result<()> {
        let u = path_of_u.last();
        let travel_time = u.travel_time + edge.duration;
        let soc = u.soc - edge.consumption;

        let candidate = if soc >= 0.0 {
            let id = self.minter.mint(&edge.destination);
            path_of_u.extended(VisitedNode::new(id, travel_time, soc, 0.0))
        } else {
            self.stats.charging_insertions += 1;
            let planner = ChargingPlanner::new(self.graph, &self.vehicle);
            match planner.insert_stop(&mut self.minter, path_of_u, edge)? {
                Some(path) => path,
                None => {
                    self.stats.infeasible_hops += 1;
                    return Ok(());
                }
            }
        };

        let v = candidate.last();
        if !self.table.admits(v) {
            trace!(
                node = v.name(),
                travel_time = v.travel_time,
                soc = v.soc,
                "dominated state rejected"
            );
            self.stats.dominated += 1;
            return Ok(());
        }

        trace!(
            node = v.name(),
            travel_time = v.travel_time,
            soc = v.soc,
            "frontier entry admitted"
        );
        let priority = v.travel_time;
        let id = self.table.insert(candidate);
        self.queue.insert(id, priority);
        Ok(())
    }

    fn finish(mut self, path: Option<Arc<Path>>) -> SearchOutcome {
        self.stats.frontier_entries = self.table.len();
        debug!(
            found = path.is_some(),
            expansions = self.stats.expansions,
            frontier_entries = self.stats.frontier_entries,
            ids_minted = self.minter.minted(),
            dominated = self.stats.dominated,
            charging_insertions = self.stats.charging_insertions,
            "route search finished"
        );
        SearchOutcome {
            path: path.map(|path| path.as_ref().clone()),
            stats: self.stats,
        }
    }
}

/// Outgoing edges of `node`, keeping only the minimum-duration edge to each
/// known destination. Destinations keep the order of their first edge.
fn expansion_edges<'g, G: GraphAccess>(graph: &'g G, node: &str) -> Vec<&'g GraphEdge> {
    let mut chosen: Vec<&GraphEdge> = Vec::new();
    for edge in graph.outgoing_edges(node) {
        if graph.node(&edge.destination).is_none() {
            continue;
        }
        match chosen
            .iter_mut()
            .find(|existing| existing.destination == edge.destination)
        {
            Some(existing) => {
                if edge.duration < existing.duration {
                    *existing = edge;
                }
            }
            None => chosen.push(edge),
        }
    }
    chosen
}
