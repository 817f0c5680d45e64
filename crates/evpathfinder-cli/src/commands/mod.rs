// Handlers for CLI subcommands. main.rs parses arguments and dispatches here.

pub mod route;
pub mod stations;

use std::path::Path;

use anyhow::{Context, Result};
use evpathfinder_lib::{build_graph, load_road_network, RoadGraph};

/// Load the road network at `db_path` and build its routing graph.
pub fn load_graph(db_path: &Path) -> Result<RoadGraph> {
    let network = load_road_network(db_path)
        .with_context(|| format!("failed to load road network from {}", db_path.display()))?;
    Ok(build_graph(&network))
}
