//! CLI definition using clap

use arviointi_types::{AnalysisMode, CredentialOrder, Language, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "auton-arviointi")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Car trade-in valuation from a single photo using AI")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Language (suomi, english). Uses config value if not specified.
    #[arg(long, short = 'l', global = true)]
    pub lang: Option<Language>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Value a car from a photo
    Value {
        /// Path to the photo
        image: PathBuf,

        /// Odometer reading in km. Asked interactively if omitted.
        #[arg(long)]
        km: Option<u64>,

        /// Diesel engine
        #[arg(long)]
        diesel: bool,

        /// Electric or hybrid
        #[arg(long)]
        ev: bool,

        /// Analysis mode (quick, deep). Uses config value if not specified.
        #[arg(long, short = 'm')]
        mode: Option<AnalysisMode>,

        /// Never ask for missing input or the API key
        #[arg(long)]
        no_prompt: bool,
    },

    /// Show API key status and active settings
    Status,

    /// List analysis modes and their models
    Models,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set language
        #[arg(long)]
        set_language: Option<Language>,

        /// Set analysis mode
        #[arg(long)]
        set_mode: Option<AnalysisMode>,

        /// Set credential lookup order
        #[arg(long)]
        set_credential_order: Option<CredentialOrder>,

        /// Set secret store file (TOML)
        #[arg(long)]
        set_secrets_path: Option<PathBuf>,

        /// Set the API key name used in the environment and secret store
        #[arg(long)]
        set_api_key_name: Option<String>,

        /// Set default odometer reading
        #[arg(long)]
        set_default_mileage: Option<u64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set model call timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Set API endpoint
        #[arg(long)]
        set_endpoint: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_value_command() {
        let cli = Cli::parse_from([
            "auton-arviointi",
            "value",
            "car.jpg",
            "--km",
            "210000",
            "--diesel",
            "--mode",
            "deep",
            "--lang",
            "en",
        ]);
        assert_eq!(cli.lang, Some(Language::English));
        match cli.command {
            Commands::Value {
                image,
                km,
                diesel,
                ev,
                mode,
                no_prompt,
            } => {
                assert_eq!(image, PathBuf::from("car.jpg"));
                assert_eq!(km, Some(210_000));
                assert!(diesel);
                assert!(!ev);
                assert_eq!(mode, Some(AnalysisMode::Deep));
                assert!(!no_prompt);
            }
            _ => panic!("expected value command"),
        }
    }

    #[test]
    fn test_parse_credential_order() {
        let cli = Cli::parse_from([
            "auton-arviointi",
            "config",
            "--set-credential-order",
            "secrets-first",
        ]);
        match cli.command {
            Commands::Config {
                set_credential_order,
                ..
            } => assert_eq!(set_credential_order, Some(CredentialOrder::SecretsFirst)),
            _ => panic!("expected config command"),
        }
    }
}
