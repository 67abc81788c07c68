//! Output formatters
//!
//! Provides trait-based output formatting for air quality reports.

pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::Result;
use crate::resolve::interpret::Locale;
use crate::resolve::AirQualityReport;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Formatting options that do not come from the report itself
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions<'a> {
    /// Map provider for the url format (None = configured default)
    pub map_provider: Option<&'a str>,
    /// Language of headings in human-readable output
    pub locale: Locale,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format an air quality report
    fn format(
        &self,
        report: &AirQualityReport,
        options: FormatOptions<'_>,
        config: &Config,
    ) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        Box::new(json::JsonFormatter) as Box<dyn OutputFormatter>,
        Box::new(text::TextFormatter),
        Box::new(url::UrlFormatter),
    ]
    .iter()
    .map(|f| FormatInfo {
        name: f.name().to_string(),
        description: f.description().to_string(),
    })
    .collect()
}
