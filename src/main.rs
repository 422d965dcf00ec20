use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use walk_programme::{
    PostcodeProximity, ProximityThresholds, SortCriterion, WalkRecord, Walks, WalksConfig,
    WalksError, logging,
};

/// Print a walk programme in order
#[derive(Parser, Debug)]
#[command(name = "walk-programme", version, about = "Order and list a walk programme", long_about = None)]
struct Cli {
    /// JSON file holding an array of walk records
    walks: PathBuf,

    /// Sort keys, primary first (none, date, time, distance); overrides the config
    #[arg(short, long, value_delimiter = ',')]
    sort: Option<Vec<SortCriterion>>,

    /// Only list cancelled walks
    #[arg(long)]
    cancelled: bool,

    /// Show how far each location is from its postcode
    #[arg(long)]
    postcodes: bool,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        match e.downcast_ref::<WalksError>() {
            Some(walks_error) => eprintln!("Error: {}", walks_error.user_message()),
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = WalksConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging);

    let criteria = match cli.sort {
        Some(criteria) => criteria,
        None => config.sorting.criteria()?,
    };

    let mut walks = Walks::from_json_file(&cli.walks)
        .with_context(|| format!("Failed to load walks from {}", cli.walks.display()))?;
    info!(count = walks.len(), file = %cli.walks.display(), "Loaded walks");
    walks.sort(&criteria);

    let thresholds = ProximityThresholds::from(&config.postcode);
    if cli.cancelled {
        for walk in walks.cancelled() {
            println!("{}", walk_line(walk));
            if let Some(reason) = &walk.cancellation_reason {
                println!("    Reason: {reason}");
            }
        }
        return Ok(());
    }

    for section in walks.by_month() {
        println!("{}", section.heading());
        for walk in section.walks {
            println!("{}", walk_line(walk));
            if cli.postcodes {
                print_postcode_notes(walk, &thresholds);
            }
        }
    }

    Ok(())
}

fn walk_line(walk: &WalkRecord) -> String {
    let time = match (walk.sort_time(), walk.end_time()) {
        (Some(start), Some(end)) if end > start => {
            format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
        }
        (Some(start), _) => start.format("%H:%M").to_string(),
        (None, _) => "--:--".to_string(),
    };
    let status = if walk.is_cancelled() { " CANCELLED" } else { "" };
    format!(
        "  {} {} {} ({}){status}",
        walk.walk_date.format("%a %e %b"),
        time,
        walk.title,
        walk.distance_text()
    )
}

fn print_postcode_notes(walk: &WalkRecord, thresholds: &ProximityThresholds) {
    let locations = walk
        .meet_location
        .iter()
        .chain(std::iter::once(&walk.start_location));
    for location in locations {
        match PostcodeProximity::assess(location, thresholds) {
            Some(proximity) => println!("    {}", proximity.note(thresholds)),
            None => debug!(walk = %walk.title, kind = %location.kind, "No postcode position"),
        }
    }
}
