//! Route command handler for computing charging-aware routes.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use evpathfinder_lib::{plan_route, RouteRequest, VehicleConfig};
use evpathfinder_cli::output::{render_route, OutputFormat};

use super::load_graph;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting node identifier.
    pub from: String,
    /// Destination node identifier.
    pub to: String,
    pub vehicle: VehicleConfig,
    /// Abort the search after this many expansions.
    pub max_expansions: Option<usize>,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let request = RouteRequest::new(self.from.clone(), self.to.clone(), self.vehicle);
        match self.max_expansions {
            Some(limit) => request.with_max_expansions(limit),
            None => request,
        }
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    db_path: &Path,
    args: &RouteCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let graph = load_graph(db_path)?;
    let plan = plan_route(&graph, &args.to_request())?;
    info!(
        hops = plan.hop_count(),
        charging_stops = plan.charging_stops(),
        expansions = plan.stats.expansions,
        "route planned"
    );

    print!("{}", render_route(&plan, format)?);
    Ok(())
}
