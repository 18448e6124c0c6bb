//! # Waypoint CLI
//!
//! The `waypoint` binary: one subcommand per waypoint library operation.
//!
//! ## Usage
//!
//! ```bash
//! # Add a waypoint, then list what the service holds
//! waypoint add Tempe --lat 33.4255 --lon -111.94 --ele 1180 --address ASU
//! waypoint names
//!
//! # Distance and bearing computed locally from two stored waypoints
//! waypoint --url http://10.0.0.5:8080 distance Tempe Glendale --unit km
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG` (default `info`).

use std::time::Duration;

use anyhow::{Context, Result};
use argh::FromArgs;
use waypoint_cli::{render, settings};
use waypoint_client::{ClientConfig, WaypointLibraryClient};
use waypoint_common::{DistanceUnit, Waypoint};

/// Waypoint library client
#[derive(FromArgs)]
struct Cli {
    /// service URL (default: $WAYPOINT_SERVICE_URL or http://127.0.0.1:8080)
    #[argh(option)]
    url: Option<String>,

    /// extra request header as name:value (repeatable)
    #[argh(option, long = "header")]
    headers: Vec<String>,

    /// request timeout in milliseconds
    #[argh(option)]
    timeout_ms: Option<u64>,

    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Commands {
    Add(AddArgs),
    Update(UpdateArgs),
    Remove(RemoveArgs),
    Get(GetArgs),
    Names(NamesArgs),
    ById(ByIdArgs),
    Save(SaveArgs),
    Restore(RestoreArgs),
    Distance(DistanceArgs),
    Route(RouteArgs),
}

/// Add a waypoint to the library
#[derive(FromArgs)]
#[argh(subcommand, name = "add")]
struct AddArgs {
    /// waypoint name
    #[argh(positional)]
    name: String,

    /// latitude in degrees
    #[argh(option)]
    lat: String,

    /// longitude in degrees
    #[argh(option)]
    lon: String,

    /// elevation in feet
    #[argh(option, default = "String::from(\"0\")")]
    ele: String,

    /// street address
    #[argh(option, default = "String::new()")]
    address: String,
}

/// Replace the stored waypoint with the same name
#[derive(FromArgs)]
#[argh(subcommand, name = "update")]
struct UpdateArgs {
    /// waypoint name
    #[argh(positional)]
    name: String,

    /// latitude in degrees
    #[argh(option)]
    lat: String,

    /// longitude in degrees
    #[argh(option)]
    lon: String,

    /// elevation in feet
    #[argh(option, default = "String::from(\"0\")")]
    ele: String,

    /// street address
    #[argh(option, default = "String::new()")]
    address: String,
}

/// Remove a waypoint by name
#[derive(FromArgs)]
#[argh(subcommand, name = "remove")]
struct RemoveArgs {
    /// waypoint name
    #[argh(positional)]
    name: String,
}

/// Show one waypoint
#[derive(FromArgs)]
#[argh(subcommand, name = "get")]
struct GetArgs {
    /// waypoint name
    #[argh(positional)]
    name: String,

    /// print the stored JSON document instead of a summary
    #[argh(switch)]
    json: bool,
}

/// List stored waypoint names
#[derive(FromArgs)]
#[argh(subcommand, name = "names")]
struct NamesArgs {}

/// Look up a waypoint name by its index
#[derive(FromArgs)]
#[argh(subcommand, name = "by-id")]
struct ByIdArgs {
    /// zero-based index
    #[argh(positional)]
    id: i64,
}

/// Ask the service to write its library to its JSON file
#[derive(FromArgs)]
#[argh(subcommand, name = "save")]
struct SaveArgs {}

/// Ask the service to reload its library from its JSON file
#[derive(FromArgs)]
#[argh(subcommand, name = "restore")]
struct RestoreArgs {}

/// Distance and initial bearing between two stored waypoints
#[derive(FromArgs)]
#[argh(subcommand, name = "distance")]
struct DistanceArgs {
    /// origin waypoint name
    #[argh(positional)]
    from: String,

    /// destination waypoint name
    #[argh(positional)]
    to: String,

    /// statute, nautical or kilometer (default: statute)
    #[argh(option, default = "DistanceUnit::Statute")]
    unit: DistanceUnit,
}

/// The service's own distance-and-bearing text for two waypoints
#[derive(FromArgs)]
#[argh(subcommand, name = "route")]
struct RouteArgs {
    /// origin waypoint name
    #[argh(positional)]
    from: String,

    /// destination waypoint name
    #[argh(positional)]
    to: String,
}

fn build_client(cli: &Cli) -> Result<WaypointLibraryClient> {
    let url = settings::resolve_url(cli.url.clone(), std::env::var(settings::URL_ENV_VAR).ok());
    settings::validate_http_url(&url, "service URL")?;

    let mut config = ClientConfig::new(url);
    for header in &cli.headers {
        let (name, value) = settings::parse_header(header)?;
        config = config.with_header(name, value);
    }
    if let Some(ms) = cli.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }

    Ok(WaypointLibraryClient::with_config(config)?)
}

fn run(cli: Cli) -> Result<()> {
    let client = build_client(&cli)?;
    tracing::debug!(url = %client.url(), "Using waypoint service");

    match cli.command {
        Commands::Add(args) => {
            let added = client
                .add_new(&args.lat, &args.lon, &args.ele, &args.name, &args.address)
                .with_context(|| format!("Failed to add waypoint '{}'", args.name))?;
            println!("{}", added);
        }
        Commands::Update(args) => {
            let waypoint = Waypoint::parse(&args.lat, &args.lon, &args.ele, args.name, args.address)?;
            let updated = client
                .update_waypoint(&waypoint)
                .with_context(|| format!("Failed to update waypoint '{}'", waypoint.name()))?;
            println!("{}", updated);
        }
        Commands::Remove(args) => {
            println!("{}", client.remove(&args.name)?);
        }
        Commands::Get(args) => {
            let waypoint = client
                .get(&args.name)
                .with_context(|| format!("Failed to get waypoint '{}'", args.name))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&waypoint.to_document())?);
            } else {
                println!("{}", render::waypoint(&waypoint));
            }
        }
        Commands::Names(_) => {
            for name in client.get_names()? {
                println!("{}", name);
            }
        }
        Commands::ById(args) => {
            println!("{}", client.get_by_id(args.id)?);
        }
        Commands::Save(_) => {
            println!("{}", client.save_to_file()?);
        }
        Commands::Restore(_) => {
            println!("{}", client.restore_from_file()?);
        }
        Commands::Distance(args) => {
            let from = client.get(&args.from).with_context(|| format!("Failed to get waypoint '{}'", args.from))?;
            let to = client.get(&args.to).with_context(|| format!("Failed to get waypoint '{}'", args.to))?;
            println!("{}", render::distance(&from, &to, args.unit));
        }
        Commands::Route(args) => {
            println!("{}", client.distance_and_bearing(&args.from, &args.to)?);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    // stdout carries command output only
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli: Cli = argh::from_env();
    run(cli)
}
