//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{output_report, render_header};
use crate::prompt::{ask_vehicle_details, is_interactive, TerminalKeyPrompt};
use arviointi_app::app::{ValuationOptions, ValuationService, ValuationServiceError};
use arviointi_app::config::Config;
use arviointi_app::credentials::CredentialResolver;
use arviointi_app::locale::translations;
use arviointi_app::session::{ProgressCallback, VehicleDetails};
use arviointi_types::{AnalysisMode, CredentialOrder, Error, Language, OutputFormat};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Top-level command failure
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Error: {0}")]
    Core(#[from] Error),

    /// Already localized for the user
    #[error("{0}")]
    Valuation(#[from] ValuationServiceError),
}

pub type CommandResult = std::result::Result<(), CommandError>;

/// Execute CLI command
pub fn execute(cli: Cli) -> CommandResult {
    // Load config
    let config = Config::load()?;

    let language = cli.lang.unwrap_or(config.language);
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Value {
            image,
            km,
            diesel,
            ev,
            mode,
            no_prompt,
        } => {
            let mode = mode.unwrap_or(config.mode);
            let interactive = !no_prompt && is_interactive();
            let request = ValueArgs {
                image,
                km: *km,
                is_diesel: *diesel,
                is_ev: *ev,
                mode,
                language,
                output_format,
                interactive,
            };
            cmd_value(&config, request)
        }

        Commands::Status => cmd_status(&config, language),

        Commands::Models => cmd_models(&config, language),

        Commands::Config {
            show,
            set_language,
            set_mode,
            set_credential_order,
            set_secrets_path,
            set_api_key_name,
            set_default_mileage,
            set_output,
            set_timeout,
            set_endpoint,
            reset,
        } => cmd_config(
            config,
            *show,
            ConfigUpdate {
                language: *set_language,
                mode: *set_mode,
                credential_order: *set_credential_order,
                secrets_path: set_secrets_path.clone(),
                api_key_name: set_api_key_name.clone(),
                default_mileage_km: *set_default_mileage,
                output_format: *set_output,
                request_timeout_secs: *set_timeout,
                endpoint: set_endpoint.clone(),
            },
            *reset,
        ),
    }
}

struct ValueArgs<'a> {
    image: &'a Path,
    km: Option<u64>,
    is_diesel: bool,
    is_ev: bool,
    mode: AnalysisMode,
    language: Language,
    output_format: OutputFormat,
    interactive: bool,
}

fn cmd_value(config: &Config, args: ValueArgs<'_>) -> CommandResult {
    let t = translations(args.language);

    let resolver = CredentialResolver::from_config(config);
    let credential = if args.interactive {
        resolver.resolve_or_prompt(&TerminalKeyPrompt::new(t.enter_api_key))
    } else {
        resolver.resolve()
    };

    if let Some(ref cred) = credential {
        debug!(source = %cred.source, "Using API key");
    }

    // Inputs are only asked for when a submission can actually happen
    let details = match args.km {
        Some(mileage_km) => VehicleDetails {
            mileage_km,
            is_diesel: args.is_diesel,
            is_ev: args.is_ev,
        },
        None if args.interactive && credential.is_some() => {
            ask_vehicle_details(t, config.default_mileage_km, args.is_diesel, args.is_ev)
                .map_err(Error::from)?
        }
        None => VehicleDetails {
            mileage_km: config.default_mileage_km,
            is_diesel: args.is_diesel,
            is_ev: args.is_ev,
        },
    };

    let options = ValuationOptions {
        details,
        mode: args.mode,
        language: args.language,
    };

    let service = ValuationService::new(config)?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    let pb = spinner.clone();
    let progress: ProgressCallback = Box::new(move |msg| {
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
    });

    let result = service.run_path(args.image, &options, credential.as_ref(), Some(progress));
    spinner.finish_and_clear();

    let report = result?;
    output_report(args.output_format, t, &report)?;

    Ok(())
}

fn cmd_status(config: &Config, language: Language) -> CommandResult {
    let t = translations(language);
    let resolver = CredentialResolver::from_config(config);

    print!("{}", render_header(t));
    println!();

    match resolver.resolve() {
        Some(cred) => println!("{} ({})", t.api_status_ok, cred.source),
        None => println!("{}", t.api_status_error),
    }
    println!("Credential order: {}", resolver.order());
    println!(
        "{}: {} ({})",
        t.analysis_mode_label,
        t.mode_label(config.mode),
        config.mode.model_id()
    );

    Ok(())
}

fn cmd_models(config: &Config, language: Language) -> CommandResult {
    let t = translations(language);

    println!("{}", t.analysis_mode_label);
    for mode in AnalysisMode::ALL {
        let marker = if mode == config.mode { "*" } else { " " };
        println!(
            "{} {:<6} {:<24} {}",
            marker,
            mode.to_string(),
            mode.model_id(),
            t.mode_label(mode)
        );
    }

    Ok(())
}

/// Settings changed by `config --set-*`
#[derive(Default)]
struct ConfigUpdate {
    language: Option<Language>,
    mode: Option<AnalysisMode>,
    credential_order: Option<CredentialOrder>,
    secrets_path: Option<PathBuf>,
    api_key_name: Option<String>,
    default_mileage_km: Option<u64>,
    output_format: Option<OutputFormat>,
    request_timeout_secs: Option<u64>,
    endpoint: Option<String>,
}

impl ConfigUpdate {
    /// Apply to `config`, returning whether anything changed
    fn apply(self, config: &mut Config) -> bool {
        let mut modified = false;

        if let Some(language) = self.language {
            config.language = language;
            modified = true;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
            modified = true;
        }
        if let Some(order) = self.credential_order {
            config.credential_order = order;
            modified = true;
        }
        if let Some(path) = self.secrets_path {
            config.secrets_path = Some(path);
            modified = true;
        }
        if let Some(name) = self.api_key_name {
            config.api_key_name = name;
            modified = true;
        }
        if let Some(km) = self.default_mileage_km {
            config.default_mileage_km = km;
            modified = true;
        }
        if let Some(format) = self.output_format {
            config.output_format = format;
            modified = true;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout_secs = secs;
            modified = true;
        }
        if let Some(endpoint) = self.endpoint {
            config.endpoint = Some(endpoint);
            modified = true;
        }

        modified
    }
}

fn cmd_config(mut config: Config, show: bool, update: ConfigUpdate, reset: bool) -> CommandResult {
    if reset {
        config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let modified = update.apply(&mut config);
    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_update_applies_fields() {
        let mut config = Config::default();
        let update = ConfigUpdate {
            language: Some(Language::English),
            credential_order: Some(CredentialOrder::SecretsFirst),
            default_mileage_km: Some(90_000),
            ..ConfigUpdate::default()
        };

        assert!(update.apply(&mut config));
        assert_eq!(config.language, Language::English);
        assert_eq!(config.credential_order, CredentialOrder::SecretsFirst);
        assert_eq!(config.default_mileage_km, 90_000);
        assert_eq!(config.mode, AnalysisMode::Quick);
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        let mut config = Config::default();
        assert!(!ConfigUpdate::default().apply(&mut config));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_valuation_error_is_shown_verbatim() {
        let err: CommandError =
            ValuationServiceError::MissingCredential("⚠️ API Key is missing. Please check settings.".to_string())
                .into();
        assert_eq!(err.to_string(), "⚠️ API Key is missing. Please check settings.");
    }
}
