use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::error::{ReelError, ReelResult};

/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";
/// Base URL used when neither configuration nor environment provides one.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Settings for the OpenAI-compatible HTTP API.
///
/// The API key is never read from configuration files; it comes from `OPENAI_API_KEY`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Base URL; `OPENAI_BASE_URL` takes precedence when set.
    pub base_url: Option<String>,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Chat model used for prompt enhancement.
    pub chat_model: String,
    /// Text-to-speech model.
    pub speech_model: String,
    /// Text-to-speech voice.
    pub speech_voice: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 120,
            chat_model: "gpt-4-turbo-preview".to_string(),
            speech_model: "tts-1".to_string(),
            speech_voice: "alloy".to_string(),
        }
    }
}

impl OpenAiConfig {
    /// Check field ranges.
    pub fn validate(&self) -> ReelResult<()> {
        if self.timeout_secs == 0 {
            return Err(ReelError::invalid_input("openai.timeout_secs must be > 0"));
        }
        if self.chat_model.trim().is_empty() || self.speech_model.trim().is_empty() {
            return Err(ReelError::invalid_input("openai model names must be non-empty"));
        }
        if self.speech_voice.trim().is_empty() {
            return Err(ReelError::invalid_input("openai.speech_voice must be non-empty"));
        }
        Ok(())
    }

    /// Effective base URL: environment, then configuration, then [`DEFAULT_BASE_URL`].
    pub fn resolved_base_url(&self) -> String {
        let from_env = std::env::var(BASE_URL_ENV_VAR)
            .ok()
            .filter(|s| !s.trim().is_empty());
        from_env
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }
}

/// Blocking client for an OpenAI-compatible API, shared by `Arc` between adapters.
#[derive(Debug)]
pub struct OpenAiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Build a client reading the key from `OPENAI_API_KEY`.
    pub fn from_env(config: OpenAiConfig) -> ReelResult<Self> {
        let key = std::env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ReelError::invalid_input(format!("{API_KEY_ENV_VAR} is not set"))
            })?;
        Self::new(config, key)
    }

    /// Build a client with an explicit key.
    pub fn new(config: OpenAiConfig, api_key: impl Into<String>) -> ReelResult<Self> {
        config.validate()?;
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            base_url: config.resolved_base_url(),
            api_key: api_key.into(),
            config,
        })
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Full URL for an API path such as `chat/completions`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST a JSON body and return the successful response.
    pub(crate) fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> anyhow::Result<reqwest::blocking::Response> {
        let url = self.endpoint(path);
        tracing::debug!(url = %url, "openai request");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .with_context(|| format!("request to '{url}' failed"))?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().unwrap_or_default();
            anyhow::bail!("'{url}' returned {status}: {}", detail.trim());
        }
        Ok(resp)
    }

    /// POST a JSON body and decode a JSON response.
    pub(crate) fn post_for_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> anyhow::Result<serde_json::Value> {
        let resp = self.post_json(path, body)?;
        resp.json().context("response is not valid json")
    }

    /// Download raw bytes, e.g. a generated image URL.
    pub(crate) fn download(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        let resp = self
            .http
            .get(url)
            .send()
            .with_context(|| format!("download of '{url}' failed"))?;
        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("download of '{url}' returned {status}");
        }
        let bytes = resp.bytes().context("failed to read download body")?;
        Ok(bytes.to_vec())
    }
}
