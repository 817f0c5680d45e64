//! Route planning entry points.
//!
//! This module provides:
//! - [`find_route`] - the bare search: an ordered list of visited nodes, empty
//!   when an endpoint is unknown or no feasible route exists
//! - [`RouteRequest`] / [`plan_route`] - the checked variant used by the CLI,
//!   which validates the vehicle and reports unknown nodes and unreachable
//!   goals as errors
//! - [`RoutePlan`] - the planned route with derived totals and search counters
//!
//! # Example
//!
//! ```
//! use evpathfinder_lib::{plan_route, RoadGraph, RouteRequest, VehicleConfig};
//!
//! let graph = RoadGraph::builder()
//!     .node("A", 0.0)
//!     .node("B", 60.0)
//!     .node("C", 0.0)
//!     .edge("A", "B", 10.0, 5.0)
//!     .edge("B", "C", 10.0, 5.0)
//!     .build();
//! let request = RouteRequest::new("A", "C", VehicleConfig::new(10.0, 5.0, 0.0));
//! let plan = plan_route(&graph, &request).unwrap();
//! assert_eq!(plan.charging_stops(), 1);
//! assert_eq!(plan.total_travel_time(), 25.0);
//! ```

use serde::Serialize;

use crate::energy::round2;
use crate::error::{Error, Result};
use crate::graph::{GraphAccess, RoadGraph};
use crate::path::{Path, VisitedNodeRecord};
use crate::search::{RouteSearch, SearchOptions, SearchStats};
use crate::vehicle::VehicleConfig;

/// Number of fuzzy suggestions offered for an unknown node.
const MAX_SUGGESTIONS: usize = 3;

/// Compute the fastest energy-feasible route from `start` to `end`.
///
/// Returns an empty sequence when either endpoint is unknown or the goal
/// cannot be reached with the given battery; the two cases are not
/// distinguished. Errors only on invalid vehicle parameters or an
/// inconsistent graph.
pub fn find_route<G: GraphAccess>(
    graph: &G,
    start: &str,
    end: &str,
    vehicle: &VehicleConfig,
) -> Result<Vec<VisitedNodeRecord>> {
    vehicle.validate()?;
    let outcome = RouteSearch::new(graph, *vehicle, SearchOptions::default()).run(start, end)?;
    Ok(outcome
        .path
        .map(|path| path.records())
        .unwrap_or_default())
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub vehicle: VehicleConfig,
    pub options: SearchOptions,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, goal: impl Into<String>, vehicle: VehicleConfig) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            vehicle,
            options: SearchOptions::default(),
        }
    }

    /// Cap the number of frontier expansions.
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.options.max_expansions = Some(limit);
        self
    }
}

/// Planned route returned by [`plan_route`].
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub start: String,
    pub goal: String,
    pub vehicle: VehicleConfig,
    pub steps: Vec<VisitedNodeRecord>,
    /// Energy added across all charging stops.
    pub energy_charged: f64,
    pub stats: SearchStats,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Arrival time at the goal, in minutes.
    pub fn total_travel_time(&self) -> f64 {
        self.steps.last().map_or(0.0, |step| step.travel_time)
    }

    pub fn total_charging_time(&self) -> f64 {
        round2(self.steps.iter().map(|step| step.charging_time).sum())
    }

    pub fn charging_stops(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.charging_time > 0.0)
            .count()
    }

    /// SOC on arrival at the goal.
    pub fn final_soc(&self) -> f64 {
        self.steps.last().map_or(0.0, |step| step.soc)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Resolve a node identifier, returning an error with suggestions when unknown.
fn resolve_node(graph: &RoadGraph, id: &str) -> Result<()> {
    if graph.node(id).is_some() {
        return Ok(());
    }
    Err(Error::UnknownNode {
        id: id.to_string(),
        suggestions: graph.fuzzy_node_matches(id, MAX_SUGGESTIONS),
    })
}

/// Energy added at charging stops: SOC after charging minus SOC on arrival.
fn energy_charged(graph: &RoadGraph, path: &Path) -> Result<f64> {
    let mut total = 0.0;
    for stop in path.nodes().iter().filter(|node| node.is_charging_stop()) {
        let Some(parent) = path.parent_of(&stop.id) else {
            continue;
        };
        let hop = graph
            .shortest_edge(parent.name(), stop.name())
            .ok_or_else(|| Error::MissingEdge {
                from: parent.name().to_string(),
                to: stop.name().to_string(),
            })?;
        total += stop.soc - (parent.soc - hop.consumption);
    }
    Ok(round2(total))
}

/// Plan a route for `request`, reporting unknown nodes and unreachable goals
/// as errors.
pub fn plan_route(graph: &RoadGraph, request: &RouteRequest) -> Result<RoutePlan> {
    request.vehicle.validate()?;
    resolve_node(graph, &request.start)?;
    resolve_node(graph, &request.goal)?;

    let outcome = RouteSearch::new(graph, request.vehicle, request.options)
        .run(&request.start, &request.goal)?;
    let Some(path) = outcome.path else {
        return Err(Error::RouteNotFound {
            start: request.start.clone(),
            goal: request.goal.clone(),
        });
    };

    let energy_charged = energy_charged(graph, &path)?;
    let steps = path.records();

    Ok(RoutePlan {
        start: request.start.clone(),
        goal: request.goal.clone(),
        vehicle: request.vehicle,
        steps,
        energy_charged,
        stats: outcome.stats,
    })
}
