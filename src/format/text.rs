//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{FormatOptions, OutputFormatter};
use crate::resolve::interpret::Locale;
use crate::resolve::AirQualityReport;

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

/// Line headings in one language
struct Headings {
    address: &'static str,
    location: &'static str,
    station: &'static str,
    station_location: &'static str,
    distance: &'static str,
    measured_at: &'static str,
    missing: &'static str,
}

const HEADINGS_PL: Headings = Headings {
    address: "Adres",
    location: "Lokalizacja",
    station: "Stacja",
    station_location: "Lokalizacja stacji",
    distance: "Odległość",
    measured_at: "Czas pomiaru",
    missing: "brak danych",
};

const HEADINGS_EN: Headings = Headings {
    address: "Address",
    location: "Location",
    station: "Station",
    station_location: "Station location",
    distance: "Distance",
    measured_at: "Measured at",
    missing: "n/a",
};

impl Headings {
    fn for_locale(locale: Locale) -> &'static Headings {
        match locale {
            Locale::Pl => &HEADINGS_PL,
            Locale::En => &HEADINGS_EN,
        }
    }
}

fn format_sub_index(value: Option<f64>, missing: &str) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => missing.to_string(),
    }
}

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(
        &self,
        report: &AirQualityReport,
        options: FormatOptions<'_>,
        _config: &Config,
    ) -> Result<String> {
        let h = Headings::for_locale(options.locale);
        let station = &report.station;
        let result = &report.result;
        let mut output = String::new();

        // Location
        if let Some(address) = report.display_address.as_ref().or(report.query.as_ref()) {
            output.push_str(&format!("{}: {}\n", h.address, address));
        }
        output.push_str(&format!("{}: ({})\n\n", h.location, report.location));

        // Station
        output.push_str(&format!("{}: {}\n", h.station, station.station_name));
        output.push_str(&format!("{}: ({})\n", h.station_location, station.coordinate));
        output.push_str(&format!("{}: {}\n", h.distance, result.distance_label));
        if !station.measured_at.is_empty() {
            output.push_str(&format!("{}: {}\n", h.measured_at, station.measured_at));
        }
        output.push('\n');

        // Reading
        output.push_str(&format!("AQI: {} - {}\n", station.aqi, result.label));
        output.push_str(&format!("  PM2.5: {}\n", format_sub_index(station.pm25, h.missing)));
        output.push_str(&format!("  PM10: {}\n", format_sub_index(station.pm10, h.missing)));
        output.push_str(&format!("\n{}\n", result.interpretation));

        Ok(output)
    }
}
