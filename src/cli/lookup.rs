//! Lookup command handler
//!
//! Resolves an address or a coordinate pair and prints the report.

use crate::cli::init_logging;
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, FormatOptions};
use crate::resolve::interpret::Locale;
use clap::Args;
use std::str::FromStr;

/// Lookup command arguments
#[derive(Args)]
pub struct LookupArgs {
    /// Street address (geocoded)
    #[arg(long, short = 'a', conflicts_with_all = ["lat", "lng"])]
    pub address: Option<String>,

    /// Latitude
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    pub lat: Option<String>,

    /// Longitude
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lng: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Language of labels and descriptions (pl, en)
    #[arg(long, short = 'l')]
    pub locale: Option<String>,

    /// Map provider for the url format
    #[arg(long)]
    pub provider: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the lookup command
pub async fn run(args: LookupArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    init_logging("warn");

    let config = Config::load()?;

    let locale = match &args.locale {
        Some(locale) => Locale::from_str(locale).map_err(Error::Config)?,
        None => config.locale()?,
    };
    let format = args.format.unwrap_or(config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let resolver = config.build_resolver(locale)?;

    let report = if let Some(address) = &args.address {
        resolver
            .resolve_address(address)
            .await?
            .ok_or_else(|| Error::NotFound(address.trim().to_string()))?
    } else if let (Some(lat), Some(lng)) = (&args.lat, &args.lng) {
        let location = Coordinates::parse(lat, lng)?;
        resolver.resolve_coordinates(location).await?
    } else {
        return Err(Error::InvalidInput(
            "No location specified. Use --address or --lat/--lng".to_string(),
        ));
    };

    let options = FormatOptions {
        map_provider: args.provider.as_deref(),
        locale,
    };
    let output = formatter.format(&report, options, &config)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
