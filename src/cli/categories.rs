//! Categories command handler
//!
//! Prints the AQI interpretation table.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::resolve::interpret::{AqiCategory, Locale};
use clap::Args;
use std::str::FromStr;

/// Categories command arguments
#[derive(Args)]
pub struct CategoriesArgs {
    /// Language of labels and descriptions (pl, en)
    #[arg(long, short = 'l')]
    pub locale: Option<String>,
}

/// Run the categories command
pub fn run(args: CategoriesArgs) -> Result<()> {
    let locale = match &args.locale {
        Some(locale) => Locale::from_str(locale).map_err(Error::Config)?,
        None => Config::load()?.locale()?,
    };

    print!("{}", render_table(locale));
    Ok(())
}

/// One line per category: AQI range, label, description
fn render_table(locale: Locale) -> String {
    let mut output = String::new();
    for category in AqiCategory::all() {
        let range = match category.range() {
            (low, Some(high)) => format!("{}-{}", low, high - 1),
            (low, None) => format!("{}+", low),
        };
        output.push_str(&format!(
            "{:>7}  {}\n         {}\n",
            range,
            category.label(locale),
            category.description(locale)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table() {
        let table = render_table(Locale::En);
        assert!(table.contains("   0-49  Good"));
        assert!(table.contains("  50-99  Moderate"));
        assert!(table.contains("   300+  Hazardous"));
    }

    #[test]
    fn test_render_table_polish() {
        let table = render_table(Locale::Pl);
        assert!(table.contains("Zagrożenie dla życia"));
        assert_eq!(table.lines().count(), 12);
    }
}
