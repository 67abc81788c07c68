//! URL output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{FormatOptions, OutputFormatter};
use crate::resolve::AirQualityReport;

/// URL formatter - outputs a map URL showing both the location and the station
pub struct UrlFormatter;

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL framing location and station"
    }

    fn format(
        &self,
        report: &AirQualityReport,
        options: FormatOptions<'_>,
        config: &Config,
    ) -> Result<String> {
        config.format_url(
            options.map_provider,
            report.result.map_center,
            report.result.map_zoom,
        )
    }
}
