//! Output formatting for route and station listings.
//!
//! Text and rich formats reuse the library's [`RouteSummary`] renderers; JSON
//! output adds the vehicle and search counters so scripted consumers can tell
//! how much work a query took.

use std::fmt::Write;

use clap::ValueEnum;
use serde::Serialize;

use evpathfinder_lib::{
    GraphNode, RoutePlan, RouteRenderMode, RouteSummary, SearchStats, VehicleConfig,
};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text.
    #[default]
    Text,
    /// Markdown-flavoured text.
    Rich,
    /// Machine-readable JSON.
    Json,
}

#[derive(Serialize)]
struct JsonRoute<'a> {
    #[serde(flatten)]
    summary: &'a RouteSummary,
    vehicle: &'a VehicleConfig,
    stats: &'a SearchStats,
}

#[derive(Serialize)]
struct JsonStation<'a> {
    id: &'a str,
    charging_power: f64,
}

/// Render a planned route in the requested format.
pub fn render_route(plan: &RoutePlan, format: OutputFormat) -> anyhow::Result<String> {
    let summary = RouteSummary::from_plan(plan)?;
    let rendered = match format {
        OutputFormat::Text => summary.render(RouteRenderMode::PlainText),
        OutputFormat::Rich => summary.render(RouteRenderMode::RichText),
        OutputFormat::Json => {
            let payload = JsonRoute {
                summary: &summary,
                vehicle: &plan.vehicle,
                stats: &plan.stats,
            };
            let mut json = serde_json::to_string_pretty(&payload)?;
            json.push('\n');
            json
        }
    };
    Ok(rendered)
}

/// Render the charging stations of a network.
pub fn render_stations(stations: &[&GraphNode], format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        let payload: Vec<JsonStation<'_>> = stations
            .iter()
            .map(|node| JsonStation {
                id: &node.id,
                charging_power: node.charging_power,
            })
            .collect();
        let mut json = serde_json::to_string_pretty(&payload)?;
        json.push('\n');
        return Ok(json);
    }

    let mut buffer = String::new();
    if stations.is_empty() {
        buffer.push_str("No charging stations in this network.\n");
        return Ok(buffer);
    }

    let width = stations.iter().map(|node| node.id.len()).max().unwrap_or(0);
    let _ = writeln!(buffer, "Charging stations ({}):", stations.len());
    for node in stations {
        match format {
            OutputFormat::Rich => {
                let _ = writeln!(buffer, "* **{}** `{:.2}` units/h", node.id, node.charging_power);
            }
            _ => {
                let _ = writeln!(
                    buffer,
                    "  {:<width$}  {:>8.2} units/h",
                    node.id,
                    node.charging_power,
                    width = width
                );
            }
        }
    }
    Ok(buffer)
}
