//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. Missing service credentials never stop the
//! server: the affected feature answers with a configuration error instead.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Which backend writes the daily stories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryBackend {
    Mock,
    Remote,
}

/// Settings for the text-generation service.
#[derive(Clone, Debug)]
pub struct SummaryServiceConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

/// Everything needed to talk to the personal-data vault.
#[derive(Clone, Debug)]
pub struct VaultSettings {
    pub vault_url: String,
    pub vault_id: String,
    pub account_id: String,
    pub bearer_token: String,
    pub table_name: String,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub cors_origin: String,
    pub summary_backend: SummaryBackend,
    pub summary: SummaryServiceConfig,
    /// `None` when any vault credential is missing.
    pub vault: Option<VaultSettings>,
    /// Names of the vault variables that were not set.
    pub missing_vault_vars: Vec<String>,
    pub processing_step: Duration,
    pub seed_demo: bool,
}

const VAULT_VARS: [&str; 4] = [
    "SKYFLOW_VAULT_URL",
    "SKYFLOW_VAULT_ID",
    "SKYFLOW_ACCOUNT_ID",
    "SKYFLOW_BEARER_TOKEN",
];

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // --- Server Settings ---
        let bind_address_str = get("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = get("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin =
            get("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        // --- Text-generation Service ---
        let api_key = get("ANTHROPIC_API_KEY");
        let summary_backend = match get("SUMMARY_BACKEND").as_deref().map(str::to_lowercase) {
            None if api_key.is_some() => SummaryBackend::Remote,
            None => SummaryBackend::Mock,
            Some(v) if v == "remote" => SummaryBackend::Remote,
            Some(v) if v == "mock" => SummaryBackend::Mock,
            Some(other) => {
                return Err(ConfigError::InvalidValue(
                    "SUMMARY_BACKEND".to_string(),
                    format!("'{}' is not one of 'mock' or 'remote'", other),
                ))
            }
        };
        let summary = SummaryServiceConfig {
            api_key,
            base_url: get("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|| "https://api.anthropic.com".to_string())
                .trim_end_matches('/')
                .to_string(),
            model: get("SUMMARY_MODEL").unwrap_or_else(|| "claude-sonnet-4-5".to_string()),
            max_tokens: parse_or("SUMMARY_MAX_TOKENS", get("SUMMARY_MAX_TOKENS"), 2000)?,
            timeout: Duration::from_secs(parse_or(
                "SUMMARY_TIMEOUT_SECS",
                get("SUMMARY_TIMEOUT_SECS"),
                60,
            )?),
        };

        // --- Vault ---
        let missing_vault_vars: Vec<String> = VAULT_VARS
            .into_iter()
            .filter(|key| get(*key).is_none())
            .map(|key| key.to_string())
            .collect();
        let vault = match (
            get("SKYFLOW_VAULT_URL"),
            get("SKYFLOW_VAULT_ID"),
            get("SKYFLOW_ACCOUNT_ID"),
            get("SKYFLOW_BEARER_TOKEN"),
        ) {
            (Some(vault_url), Some(vault_id), Some(account_id), Some(bearer_token)) => {
                Some(VaultSettings {
                    vault_url: vault_url.trim_end_matches('/').to_string(),
                    vault_id,
                    account_id,
                    bearer_token,
                    table_name: get("SKYFLOW_TABLE_NAME").unwrap_or_else(|| "persons".to_string()),
                })
            }
            _ => None,
        };

        // --- Story Processing ---
        let processing_step = Duration::from_millis(parse_or(
            "PROCESSING_STEP_MILLIS",
            get("PROCESSING_STEP_MILLIS"),
            1000,
        )?);
        let seed_demo = parse_or("MOMO_SEED_DEMO", get("MOMO_SEED_DEMO"), false)?;

        Ok(Self {
            bind_address,
            log_level,
            cors_origin,
            summary_backend,
            summary,
            vault,
            missing_vault_vars,
            processing_step,
            seed_demo,
        })
    }

    /// Human-readable notes about features running in a degraded mode.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.summary_backend == SummaryBackend::Remote && self.summary.api_key.is_none() {
            warnings.push(
                "ANTHROPIC_API_KEY is not set; story generation will fail until it is configured."
                    .to_string(),
            );
        }
        if self.summary_backend == SummaryBackend::Mock {
            warnings.push("Using the mock story generator.".to_string());
        }
        if !self.missing_vault_vars.is_empty() {
            warnings.push(format!(
                "Vault configuration is incomplete (missing {}); profile features are disabled.",
                self.missing_vault_vars.join(", ")
            ));
        }
        warnings
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
    }
}
