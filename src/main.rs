use anyhow::{Context, Result};
use booking_lib::geo::distance::{
    calculate_estimated_arrival_at_speed, format_distance, TravelSummary,
};
use booking_lib::normalize::coordinate::{normalize_coordinate, normalize_coordinate_or, to_geojson};
use booking_lib::normalize::phone::{format_phone_display, normalize_phone};
use booking_lib::utils::config::LocatorConfig;
use booking_lib::utils::env::load_env;
use clap::{Parser, Subcommand};
use log::{debug, info};
use serde_json::Value;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a phone number to the canonical 264 form
    Phone {
        input: String,

        /// Print the grouped display form instead
        #[arg(long)]
        display: bool,
    },
    /// Normalize a coordinate given as JSON (lat/lng object, GeoJSON Point or [lng, lat])
    Coordinate {
        json: String,

        /// Print as a GeoJSON Point
        #[arg(long)]
        geojson: bool,
    },
    /// Distance and arrival estimate between two JSON coordinates
    Distance {
        from: String,
        to: String,

        /// Average travel speed, overrides ETA_AVERAGE_SPEED_KMH
        #[arg(long)]
        speed: Option<f64>,
    },
    /// Arrival estimate for a distance in kilometers
    Eta {
        #[arg(allow_negative_numbers = true)]
        km: f64,

        #[arg(long)]
        speed: Option<f64>,
    },
    /// Display string for a distance in kilometers
    Format {
        #[arg(allow_negative_numbers = true)]
        km: f64,
    },
}

fn parse_json(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("Invalid JSON argument: {}", raw))
}

fn main() -> Result<()> {
    // Initialize logging and environment
    env_logger::init();
    load_env();

    let args = Args::parse();
    let config = LocatorConfig::from_env();
    config.log_config();

    match args.command {
        Command::Phone { input, display } => {
            let output = if display {
                format_phone_display(&input)
            } else {
                normalize_phone(&input)
            };
            println!("{}", output);
        }
        Command::Coordinate { json, geojson } => {
            let value = parse_json(&json)?;
            let output = match normalize_coordinate(&value) {
                Some(c) if geojson => serde_json::to_string(&to_geojson(&c))?,
                Some(c) => serde_json::to_string(&c)?,
                None => "null".to_string(),
            };
            println!("{}", output);
        }
        Command::Distance { from, to, speed } => {
            let from = normalize_coordinate_or(&parse_json(&from)?, config.default_coordinate);
            let to = normalize_coordinate_or(&parse_json(&to)?, config.default_coordinate);
            debug!("Distance from {:?} to {:?}", from, to);

            let summary =
                TravelSummary::between(&from, &to, speed.unwrap_or(config.average_speed_kmh));
            info!("Travel summary: {} / {}", summary.distance_text, summary.eta_text);
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
            );
        }
        Command::Eta { km, speed } => {
            println!(
                "{}",
                calculate_estimated_arrival_at_speed(km, speed.unwrap_or(config.average_speed_kmh))
            );
        }
        Command::Format { km } => {
            println!("{}", format_distance(km));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_distances_parse_as_values() {
        let args = Args::try_parse_from(["booking_utils", "eta", "-0.5"]).unwrap();
        assert!(matches!(args.command, Command::Eta { km, speed: None } if km == -0.5));

        let args = Args::try_parse_from(["booking_utils", "format", "-1.2"]).unwrap();
        assert!(matches!(args.command, Command::Format { km } if km == -1.2));
    }

    #[test]
    fn test_eta_speed_flag() {
        let args = Args::try_parse_from(["booking_utils", "eta", "10", "--speed", "60"]).unwrap();
        assert!(matches!(args.command, Command::Eta { km, speed: Some(s) } if km == 10.0 && s == 60.0));
    }
}
