//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.parley/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::theme::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub theme: Option<Theme>,
    pub reply_delay_ms: Option<u64>,
    pub user_name: Option<String>,
    pub footer: Option<String>,
    pub greeting: Option<String>,
    pub placeholder_reply: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;
pub const DEFAULT_USER_NAME: &str = "Guest";
pub const DEFAULT_FOOTER: &str = "AI Assistant";
pub const DEFAULT_GREETING: &str = "Hello! I am your AI assistant. How can I help you today?";
pub const DEFAULT_PLACEHOLDER_REPLY: &str =
    "Missing Backend Connection: Front-end is not linked to a backend server.";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub theme: Theme,
    pub reply_delay: Duration,
    pub user_name: String,
    pub footer: String,
    pub greeting: String,
    pub placeholder_reply: String,
}

/// Values given on the command line. `None` means the flag was not passed.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides {
    pub theme: Option<Theme>,
    pub reply_delay_ms: Option<u64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.parley/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".parley").join("config.toml"))
}

/// Load config from `~/.parley/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ParleyConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ParleyConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ParleyConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ParleyConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<ParleyConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ParleyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Parley Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# theme = "dark"                     # "dark" or "light"  (env: PARLEY_THEME)
# reply_delay_ms = 1000              # env: PARLEY_REPLY_DELAY_MS
# user_name = "Guest"                # Shown in the sidebar (env: PARLEY_USER_NAME)
# footer = "AI Assistant"            # Credit line under the input box
# greeting = "Hello! I am your AI assistant. How can I help you today?"
# placeholder_reply = "Missing Backend Connection: Front-end is not linked to a backend server."
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config from the process environment.
pub fn resolve(config: &ParleyConfig, cli: CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `env` looks up a variable by name. Unparsable env values are skipped.
pub fn resolve_with_env<F>(config: &ParleyConfig, cli: CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    let general = &config.general;

    // Theme: CLI → env → config → default
    let theme = cli
        .theme
        .or_else(|| {
            env("PARLEY_THEME").and_then(|raw| {
                let parsed = Theme::from_name(&raw);
                if parsed.is_none() {
                    warn!("Ignoring unknown PARLEY_THEME value: {raw:?}");
                }
                parsed
            })
        })
        .or(general.theme)
        .unwrap_or_default();

    // Reply delay: CLI → env → config → default
    let reply_delay_ms = cli
        .reply_delay_ms
        .or_else(|| {
            env("PARLEY_REPLY_DELAY_MS").and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(ms) => Some(ms),
                Err(e) => {
                    warn!("Ignoring invalid PARLEY_REPLY_DELAY_MS value {raw:?}: {e}");
                    None
                }
            })
        })
        .or(general.reply_delay_ms)
        .unwrap_or(DEFAULT_REPLY_DELAY_MS);

    // User name: env → config → default
    let user_name = env("PARLEY_USER_NAME")
        .filter(|name| !name.trim().is_empty())
        .or_else(|| general.user_name.clone())
        .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());

    ResolvedConfig {
        theme,
        reply_delay: Duration::from_millis(reply_delay_ms),
        user_name,
        footer: general
            .footer
            .clone()
            .unwrap_or_else(|| DEFAULT_FOOTER.to_string()),
        greeting: general
            .greeting
            .clone()
            .unwrap_or_else(|| DEFAULT_GREETING.to_string()),
        placeholder_reply: general
            .placeholder_reply
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER_REPLY.to_string()),
    }
}
