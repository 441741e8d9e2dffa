//! Configuration management for EduTrackr.
//!
//! Loads configuration from ${EDUTRACKR_HOME}/config.toml with sensible
//! defaults. A missing file or missing Gemini credential is not an error:
//! the study service degrades to canned content instead.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default Gemini model for all study-tool calls.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Gemini provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// API key. Falls back to the `GEMINI_API_KEY` environment variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override. `GEMINI_BASE_URL` takes precedence over this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Model name.
    pub model: String,
    /// Optional output token cap passed through in generationConfig.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            max_output_tokens: None,
        }
    }
}

/// Provider table. Only Gemini is wired up today.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub gemini: GeminiSettings,
}

/// Simulated latency for the two asynchronous login steps.
///
/// The login flow has no real backend; these delays stand in for the
/// round-trips behind the "Verifying..." and "Authenticating..." pauses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginTimings {
    /// Delay before the details form advances to code verification (ms).
    pub dispatch_delay_ms: u64,
    /// Delay before code submission publishes the identity (ms).
    pub auth_delay_ms: u64,
}

impl Default for LoginTimings {
    fn default() -> Self {
        Self {
            dispatch_delay_ms: 800,
            auth_delay_ms: 1200,
        }
    }
}

impl LoginTimings {
    pub fn dispatch_delay(&self) -> Duration {
        Duration::from_millis(self.dispatch_delay_ms)
    }

    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }
}

/// Top-level configuration.
///
/// Scalar fields come before the tables so the TOML serializer never
/// emits a value after a table header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default tracing filter when EDUTRACKR_LOG is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    pub providers: ProvidersConfig,
    pub login: LoginTimings,
}

impl Config {
    /// Loads configuration from the default path, falling back to
    /// defaults when the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Invalid config TOML")
    }
}

/// Path helpers for the EduTrackr home directory.
pub mod paths {
    use std::path::PathBuf;

    /// Returns the user's home directory, if known.
    pub fn home_dir() -> Option<PathBuf> {
        std::env::var_os("HOME").map(PathBuf::from)
    }

    /// Returns the EduTrackr home directory.
    ///
    /// Resolution order: `EDUTRACKR_HOME`, then `~/.edutrackr`, then
    /// `.edutrackr` relative to the working directory as a last resort.
    pub fn edutrackr_home() -> PathBuf {
        if let Some(home) = std::env::var_os("EDUTRACKR_HOME") {
            return PathBuf::from(home);
        }
        home_dir()
            .map(|h| h.join(".edutrackr"))
            .unwrap_or_else(|| PathBuf::from(".edutrackr"))
    }

    /// Returns the config file path.
    pub fn config_path() -> PathBuf {
        edutrackr_home().join("config.toml")
    }

    /// Returns the log directory used by the TUI file appender.
    pub fn logs_dir() -> PathBuf {
        edutrackr_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_gemini_model_and_timings() {
        let config = Config::default();
        assert_eq!(config.providers.gemini.model, DEFAULT_GEMINI_MODEL);
        assert!(config.providers.gemini.api_key.is_none());
        assert_eq!(config.login.dispatch_delay(), Duration::from_millis(800));
        assert_eq!(config.login.auth_delay(), Duration::from_millis(1200));
    }

    #[test]
    fn parses_partial_config_with_defaults() {
        let config = Config::from_toml_str(
            r#"
            [providers.gemini]
            api_key = "test-key"

            [login]
            dispatch_delay_ms = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.providers.gemini.api_key.as_deref(), Some("test-key"));
        // Unspecified fields keep their defaults.
        assert_eq!(config.providers.gemini.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.login.dispatch_delay_ms, 10);
        assert_eq!(config.login.auth_delay_ms, 1200);
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(Config::from_toml_str("providers = 3").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.providers.gemini.api_key.is_none());
    }
}
