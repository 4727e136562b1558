//! OpenAI-compatible provider implementation
//!
//! This module implements the Provider trait against an OpenAI-style
//! `/chat/completions` endpoint. The model identifier and sampling
//! parameters are fixed per deployment; the API credential is read from
//! the environment and its absence is reported as a configuration
//! failure distinct from upstream request failures.

use crate::config::OpenAiConfig;
use crate::error::{KaiwaError, Result};
use crate::providers::{ChatMessage, Provider};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible completion provider
///
/// # Examples
///
/// ```no_run
/// use kaiwa::config::OpenAiConfig;
/// use kaiwa::providers::{ChatMessage, OpenAiProvider, Provider};
///
/// # async fn example() -> kaiwa::error::Result<()> {
/// let provider = OpenAiProvider::new(OpenAiConfig::default())?;
/// let reply = provider.complete(&[ChatMessage::user("Hello!")]).await?;
/// # Ok(())
/// # }
/// ```
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
    api_key: Option<String>,
}

/// Request structure for the chat completions endpoint
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Response structure from the chat completions endpoint
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider instance
    ///
    /// The credential is read from the environment variable named by
    /// `config.api_key_env`. A missing credential does not fail
    /// construction; each completion attempt reports it instead, so the
    /// failure surfaces on the request that needed it.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(concat!("kaiwa/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| KaiwaError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        let api_key = std::env::var(&config.api_key_env).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!(
                "No API credential found in {}; completion requests will fail",
                config.api_key_env
            );
        }

        tracing::info!(
            "Initialized OpenAI provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| KaiwaError::MissingCredentials(self.config.api_key_env.clone()))?;

        let request = CompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'));
        tracing::debug!("Requesting completion: model={}, turns={}", self.config.model, messages.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| KaiwaError::Provider(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Completion request failed: status={}, body={}", status, body);
            return Err(
                KaiwaError::Provider(format!("Upstream returned status {}", status)).into(),
            );
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| KaiwaError::Provider(format!("Malformed response: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| KaiwaError::Provider("Response contained no completion".to_string()))?;

        Ok(content)
    }
}
