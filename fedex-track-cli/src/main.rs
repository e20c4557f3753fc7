//! FedEx Tracking CLI Application
//!
//! Command-line front end for the fedex-track-client library. It adds:
//! - Credential/config loading (TOML file or environment variables)
//! - The authenticated HTTP transport (reqwest)
//! - Human-readable reporting of tracking outcomes
//! - Proof-of-delivery download to a local file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fedex_track_client::{TrackingOutcome, Tracker};
use std::path::PathBuf;

mod config;
mod http;

/// FedEx Tracker - Query shipment status and retrieve proof of delivery
#[derive(Parser, Debug)]
#[command(name = "fedex-track-cli")]
#[command(about = "Query FedEx shipment tracking status", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (config.toml with [api] credentials)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Query the tracking status of a shipment
    Track {
        /// Tracking number to query
        tracking_number: String,
    },
    /// Download the proof-of-delivery document for a shipment
    Pod {
        /// Tracking number or raw `qualifier~number` unique id
        id: String,
        /// Destination file for the PDF
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("FedEx Tracker CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using client library v{}", fedex_track_client::VERSION);

    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::config_from_env()?,
    };

    let transport =
        http::FedexTransport::connect(&config.api).context("Authentication failed")?;
    let tracker = Tracker::new(&transport);

    match &args.command {
        Command::Track { tracking_number } => {
            let outcome = tracker
                .track_by_number(tracking_number)
                .with_context(|| format!("Tracking query failed for {}", tracking_number))?;
            print_outcome(tracking_number, &outcome);
        }
        Command::Pod { id, output } => {
            tracker
                .download_pod(id, output, &transport)
                .with_context(|| format!("Proof-of-delivery download failed for {}", id))?;
            println!("Proof of delivery saved to {:?}", output);
        }
    }

    Ok(())
}

/// Print a tracking outcome in human-readable form
fn print_outcome(tracking_number: &str, outcome: &TrackingOutcome) {
    println!("═══════════════════════════════════════════════");
    println!("  Tracking: {}", tracking_number);
    println!("═══════════════════════════════════════════════\n");

    if !outcome.valid {
        println!("✗ No tracking information available");
        println!("  The number may be wrong or not yet in the carrier's system");
        return;
    }

    println!("Unique id:    {}", outcome.unique_id);
    println!("Carrier:      {}", outcome.carrier_code);
    println!(
        "Status:       {}",
        match (outcome.is_shipped, outcome.is_delivered) {
            (_, true) => "delivered",
            (true, false) => "in transit",
            (false, false) => "not yet shipped",
        }
    );
    if let Some(ship_date) = outcome.ship_date {
        println!("Shipped:      {}", ship_date.format("%Y-%m-%d %H:%M %:z"));
    }
    if let Some(delivery_date) = outcome.delivery_date {
        let label = if outcome.is_delivered {
            "Delivered:   "
        } else {
            "Estimated:   "
        };
        println!("{} {}", label, delivery_date.format("%Y-%m-%d %H:%M %:z"));
    }
    if let Some(package) = outcome.package {
        println!("Package:      {} x {}", package.count, package.package_type);
    }

    if let Some(latest) = outcome.latest_event {
        println!("\nLatest event: {}", latest);
    }
    println!("\nEvent history ({} events, carrier order):", outcome.events.len());
    for event in &outcome.events {
        println!("  {}", event);
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
