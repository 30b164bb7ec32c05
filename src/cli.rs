//! CLI argument parsing with clap

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Setup Advisor - business setup guide for India, UK and cross-border
///
/// Walks through choosing where to set up, which legal structure to use,
/// and shows features, legal requirements and a pre-filled contact link.
/// Run without arguments for the interactive terminal wizard.
#[derive(Parser, Debug)]
#[command(name = "setup-advisor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Catalog file overriding the configured or built-in catalog
    #[arg(long, env = "SETUP_ADVISOR_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Category to choose at the first step
    #[arg(short, long)]
    pub category: Option<String>,

    /// Structure to choose within the category
    #[arg(short, long, requires = "category")]
    pub structure: Option<String>,

    /// List every category with its structures
    #[arg(short, long)]
    pub list: bool,

    /// Print the resulting view as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the active catalog as TOML
    #[arg(long)]
    pub dump_catalog: bool,

    /// Print a sample configuration file
    #[arg(long)]
    pub sample_config: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,
}

impl Cli {
    /// Get config file name (without extension) for log naming
    pub fn config_name(&self) -> Option<String> {
        self.config.as_ref().and_then(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
        })
    }

    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(ref catalog) = self.catalog {
            config.catalog_path = Some(catalog.clone());
        }
        config
    }

    /// Choices to apply in order, starting from the first step
    pub fn choices(&self) -> Vec<&str> {
        self.category
            .iter()
            .chain(self.structure.iter())
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_and_structure() {
        let cli = Cli::try_parse_from([
            "setup-advisor",
            "-c",
            "Setup in UK",
            "-s",
            "Sole Trader",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.choices(), vec!["Setup in UK", "Sole Trader"]);
        assert!(cli.json);
    }

    #[test]
    fn test_structure_requires_category() {
        assert!(Cli::try_parse_from(["setup-advisor", "--structure", "Sole Trader"]).is_err());
    }

    #[test]
    fn test_catalog_flag_overrides_config() {
        let cli =
            Cli::try_parse_from(["setup-advisor", "--catalog", "markets.toml", "-l"]).unwrap();
        let config = cli.merge_with_config(Config {
            catalog_path: Some(PathBuf::from("other.toml")),
            ..Default::default()
        });
        assert_eq!(config.catalog_path, Some(PathBuf::from("markets.toml")));
        assert!(cli.choices().is_empty());
    }

    #[test]
    fn test_config_name() {
        let cli = Cli::try_parse_from(["setup-advisor", "-C", "conf/uk.toml"]).unwrap();
        assert_eq!(cli.config_name().as_deref(), Some("uk"));
    }
}
