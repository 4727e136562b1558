//! Base provider trait and wire message type
//!
//! This module defines the Provider trait that completion providers
//! implement, along with the role+content message shape sent over the
//! wire. Timestamps never cross this boundary; they belong to the
//! session's own [`Message`](crate::session::Message) type.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message structure sent to and received from completion providers
///
/// # Examples
///
/// ```
/// use kaiwa::providers::ChatMessage;
///
/// let msg = ChatMessage::user("Hello!");
/// assert_eq!(msg.role, "user");
/// assert_eq!(msg.content, "Hello!");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Creates a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

impl From<&crate::session::Message> for ChatMessage {
    /// Strips the timestamp, keeping role and content
    fn from(message: &crate::session::Message) -> Self {
        Self {
            role: message.role.as_str().to_string(),
            content: message.content.clone(),
        }
    }
}

/// Provider trait for completion backends
///
/// A provider performs a single request/response exchange with the
/// hosted completion service: no retries, no streaming, one upstream
/// attempt per call.
///
/// # Examples
///
/// ```no_run
/// use kaiwa::providers::{ChatMessage, Provider};
/// use kaiwa::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
///         Ok(messages.last().map(|m| m.content.clone()).unwrap_or_default())
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Completes a conversation with the given messages
    ///
    /// # Arguments
    ///
    /// * `messages` - Prior turns in chronological order
    ///
    /// # Returns
    ///
    /// Returns the assistant's response text
    ///
    /// # Errors
    ///
    /// Returns `KaiwaError::MissingCredentials` when the credential is
    /// absent, or `KaiwaError::Provider` for any other upstream failure
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}
