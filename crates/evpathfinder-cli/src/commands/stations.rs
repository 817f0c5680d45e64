use std::path::Path;

use anyhow::Result;

use evpathfinder_cli::output::{render_stations, OutputFormat};

use super::load_graph;

/// Handle the stations subcommand: list every node that can charge.
pub fn handle_stations_command(db_path: &Path, format: OutputFormat) -> Result<()> {
    let graph = load_graph(db_path)?;
    print!("{}", render_stations(&graph.stations(), format)?);
    Ok(())
}
