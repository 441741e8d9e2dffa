//! Gemini API client (Generative Language API, non-streaming).

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{Value, json};

use super::{ServiceError, ServiceErrorKind};
use crate::config::GeminiSettings;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Standard User-Agent header for EduTrackr API requests.
pub const USER_AGENT: &str = concat!("edutrackr/", env!("CARGO_PKG_VERSION"));

/// Resolves an API key with precedence: config > env.
///
/// # Errors
/// Returns an error when neither source provides a non-empty key.
pub fn resolve_api_key(
    config_api_key: Option<&str>,
    env_var: &str,
    config_section: &str,
) -> Result<String> {
    if let Some(key) = config_api_key {
        let trimmed = key.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    std::env::var(env_var).context(format!(
        "No API key available. Set {env_var} or api_key in [providers.{config_section}]."
    ))
}

/// Resolves a base URL with precedence: env > config > default.
///
/// # Errors
/// Returns an error when the chosen URL is malformed.
pub fn resolve_base_url(
    config_base_url: Option<&str>,
    env_var: &str,
    default_url: &str,
) -> Result<String> {
    if let Ok(env_url) = std::env::var(env_var) {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    Ok(default_url.to_string())
}

fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid Gemini base URL: {url}"))?;
    Ok(())
}

/// Resolved Gemini configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_output_tokens: Option<u32>,
}

impl GeminiConfig {
    /// Creates a config from settings plus environment.
    ///
    /// Authentication resolution order:
    /// 1. `api_key` in `[providers.gemini]`
    /// 2. `GEMINI_API_KEY` environment variable
    ///
    /// # Errors
    /// Returns an error when no API key is available.
    pub fn from_settings(settings: &GeminiSettings) -> Result<Self> {
        let api_key = resolve_api_key(settings.api_key.as_deref(), "GEMINI_API_KEY", "gemini")?;
        let base_url = resolve_base_url(
            settings.base_url.as_deref(),
            "GEMINI_BASE_URL",
            DEFAULT_BASE_URL,
        )?;

        Ok(Self {
            api_key,
            base_url,
            model: settings.model.clone(),
            max_output_tokens: settings.max_output_tokens,
        })
    }
}

/// Gemini client.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Generates JSON output conforming to `schema`.
    ///
    /// Returns the raw JSON text of the response; the caller parses it
    /// into its own shape.
    ///
    /// # Errors
    /// Returns a classified [`ServiceError`] on transport or parse failure.
    pub async fn generate_json(
        &self,
        prompt: &str,
        schema: Value,
    ) -> Result<String, ServiceError> {
        let generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema,
        });
        self.generate(build_request(prompt, Some(generation_config), self.config.max_output_tokens))
            .await
    }

    /// Generates free-form text for a prompt.
    ///
    /// # Errors
    /// Returns a classified [`ServiceError`] on transport or parse failure.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, ServiceError> {
        self.generate(build_request(prompt, None, self.config.max_output_tokens))
            .await
    }

    async fn generate(&self, request: Value) -> Result<String, ServiceError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        tracing::debug!(model = %self.config.model, "gemini generateContent request");

        let response = self
            .http
            .post(&url)
            .headers(build_headers(&self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ServiceError::http_status(status.as_u16(), &body));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| ServiceError::parse(format!("Invalid Gemini response JSON: {e}")))?;
        extract_text(&value)
            .ok_or_else(|| ServiceError::parse("Gemini response contained no text parts"))
    }
}

fn build_request(prompt: &str, generation_config: Option<Value>, max_tokens: Option<u32>) -> Value {
    let mut generation_config = generation_config.unwrap_or_else(|| json!({}));
    if let Some(max) = max_tokens {
        generation_config["maxOutputTokens"] = json!(max);
    }

    let mut request = json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }],
    });
    if generation_config
        .as_object()
        .is_some_and(|obj| !obj.is_empty())
    {
        request["generationConfig"] = generation_config;
    }
    request
}

/// Concatenates the text parts of the first candidate.
fn extract_text(value: &Value) -> Option<String> {
    let parts = value
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let mut text = String::new();
    for part in parts {
        if let Some(chunk) = part.get("text").and_then(Value::as_str) {
            text.push_str(chunk);
        }
    }
    if text.is_empty() { None } else { Some(text) }
}

fn build_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-goog-api-key",
        HeaderValue::from_str(api_key).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    headers.insert("accept", HeaderValue::from_static("application/json"));
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));
    headers
}

fn classify_reqwest_error(e: &reqwest::Error) -> ServiceError {
    if e.is_timeout() {
        ServiceError::timeout(format!("Request timed out: {e}"))
    } else if e.is_connect() {
        ServiceError::new(
            ServiceErrorKind::HttpStatus,
            format!("Connection failed: {e}"),
        )
    } else {
        ServiceError::new(ServiceErrorKind::HttpStatus, format!("Request failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_concatenates_candidate_parts() {
        let value = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "[{\"front\":" },
                        { "text": "\"Q\"}]" }
                    ]
                }
            }]
        });
        assert_eq!(extract_text(&value).as_deref(), Some(r#"[{"front":"Q"}]"#));
    }

    #[test]
    fn extract_text_rejects_empty_candidates() {
        assert_eq!(extract_text(&json!({ "candidates": [] })), None);
        assert_eq!(extract_text(&json!({})), None);
    }

    #[test]
    fn build_request_only_includes_config_when_present() {
        let plain = build_request("hi", None, None);
        assert!(plain.get("generationConfig").is_none());
        assert_eq!(plain["contents"][0]["parts"][0]["text"], json!("hi"));

        let capped = build_request("hi", None, Some(512));
        assert_eq!(capped["generationConfig"]["maxOutputTokens"], json!(512));

        let structured = build_request("hi", Some(json!({"responseMimeType": "application/json"})), None);
        assert_eq!(
            structured["generationConfig"]["responseMimeType"],
            json!("application/json")
        );
    }

    #[test]
    fn missing_key_resolution_fails_with_hint() {
        let err = resolve_api_key(None, "EDUTRACKR_TEST_NO_SUCH_KEY", "gemini").unwrap_err();
        assert!(format!("{err:#}").contains("EDUTRACKR_TEST_NO_SUCH_KEY"));
    }

    #[test]
    fn blank_config_key_is_treated_as_missing() {
        let err = resolve_api_key(Some("   "), "EDUTRACKR_TEST_NO_SUCH_KEY", "gemini");
        assert!(err.is_err());
    }

    #[test]
    fn base_url_falls_back_to_default() {
        let url =
            resolve_base_url(None, "EDUTRACKR_TEST_NO_SUCH_URL", DEFAULT_BASE_URL).unwrap();
        assert_eq!(url, DEFAULT_BASE_URL);
    }

    #[test]
    fn invalid_config_base_url_is_rejected() {
        assert!(resolve_base_url(Some("not a url"), "EDUTRACKR_TEST_NO_SUCH_URL", DEFAULT_BASE_URL).is_err());
    }
}
