mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use evpathfinder_cli::output::OutputFormat;
use evpathfinder_lib::VehicleConfig;

use commands::route::{handle_route_command, RouteCommandArgs};
use commands::stations::handle_stations_command;

#[derive(Parser, Debug)]
#[command(author, version, about = "Charging-aware routing for electric vehicles")]
struct Cli {
    /// Path to the SQLite road network.
    #[arg(long, env = "EVPATHFINDER_DB")]
    db: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the fastest route between two nodes, charging on the way.
    Route {
        /// Starting node identifier.
        #[arg(long = "from")]
        from: String,
        /// Destination node identifier.
        #[arg(long = "to")]
        to: String,
        /// Battery capacity in energy units.
        #[arg(long, default_value_t = 100.0)]
        max_soc: f64,
        /// State of charge at departure. Defaults to a full battery.
        #[arg(long)]
        initial_charge: Option<f64>,
        /// Minimum minutes spent at any charging stop.
        #[arg(long, default_value_t = 0.0)]
        min_charging_time: f64,
        /// Give up after this many search expansions.
        #[arg(long)]
        max_expansions: Option<usize>,
    },
    /// List the charging stations in the road network.
    Stations,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route {
            from,
            to,
            max_soc,
            initial_charge,
            min_charging_time,
            max_expansions,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                vehicle: VehicleConfig::new(
                    max_soc,
                    initial_charge.unwrap_or(max_soc),
                    min_charging_time,
                ),
                max_expansions,
            };
            handle_route_command(&cli.db, &args, cli.format)
        }
        Command::Stations => handle_stations_command(&cli.db, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
