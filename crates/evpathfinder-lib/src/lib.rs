//! EV pathfinder library entry points.
//!
//! This crate loads a road network from SQLite, builds an in-memory graph and
//! finds the fastest route for a battery electric vehicle, inserting charging
//! stops where the battery cannot cover a hop. Higher-level consumers (the
//! CLI) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

pub mod db;
pub mod energy;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod output;
pub mod path;
pub mod queue;
pub mod routing;
pub mod search;
pub mod vehicle;

pub use db::{load_road_network, RoadNetwork};
pub use error::{Error, Result};
pub use frontier::{FrontierId, FrontierIdMinter};
pub use graph::{build_graph, EdgeCost, GraphAccess, GraphEdge, GraphNode, RoadGraph};
pub use output::{RouteRenderMode, RouteStep, RouteSummary};
pub use path::{Path, VisitedNode, VisitedNodeRecord};
pub use routing::{find_route, plan_route, RoutePlan, RouteRequest};
pub use search::{RouteSearch, SearchOptions, SearchOutcome, SearchStats};
pub use vehicle::VehicleConfig;
