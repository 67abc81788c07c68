//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "api_keys.waqi")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            print!("{}", render_config(&config));
        }

        // Key only: show that value
        (Some(key), None) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => {
                let keys = Config::available_keys().join("\n  ");
                return Err(Error::Config(format!(
                    "Unknown config key: {}\n\nAvailable keys:\n  {}",
                    key, keys
                )));
            }
        },

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        // Value without key: not valid
        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".to_string()));
        }
    }

    Ok(())
}

/// Mask a secret for display
fn masked(secret: &str) -> &'static str {
    if secret.is_empty() {
        "\"\" # not configured"
    } else {
        "\"***\" # configured"
    }
}

/// Render all configuration values, hiding API keys
fn render_config(config: &Config) -> String {
    let mut out = String::new();

    out.push_str("[defaults]\n");
    out.push_str(&format!("format = \"{}\"\n", config.defaults.format));
    out.push_str(&format!("locale = \"{}\"\n\n", config.defaults.locale));

    out.push_str("[server]\n");
    out.push_str(&format!("host = \"{}\"\n", config.server.host));
    out.push_str(&format!("port = {}\n\n", config.server.port));

    out.push_str("[providers]\n");
    out.push_str(&format!("geocoding_url = \"{}\"\n", config.providers.geocoding_url));
    out.push_str(&format!("air_quality_url = \"{}\"\n", config.providers.air_quality_url));
    out.push_str(&format!("timeout_secs = {}\n\n", config.providers.timeout_secs));

    out.push_str("[url]\n");
    out.push_str(&format!("default = \"{}\"\n\n", config.url.default));

    out.push_str("[url.providers]\n");
    let mut providers: Vec<_> = config.url.providers.iter().collect();
    providers.sort();
    for (name, template) in providers {
        out.push_str(&format!("{} = \"{}\"\n", name, template));
    }
    out.push('\n');

    out.push_str("[api_keys]\n");
    out.push_str(&format!("google = {}\n", masked(&config.api_keys.google)));
    out.push_str(&format!("waqi = {}\n", masked(&config.api_keys.waqi)));

    out
}
