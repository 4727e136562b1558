//! Completion Gateway
//!
//! A stateless relay between the conversation session and the hosted
//! completion provider. It attaches the optional system preamble and
//! forwards the turns in a single blocking request/response exchange:
//! no retries, no rate limiting, no streaming.

pub mod server;

pub use server::{routes, serve};

use crate::error::Result;
use crate::providers::{ChatMessage, Provider};

/// Stateless relay to the completion provider
///
/// Input is an ordered sequence of role+content turns; output is the
/// single resulting assistant turn's text.
pub struct CompletionGateway {
    provider: Box<dyn Provider>,
    system_prompt: Option<String>,
}

impl CompletionGateway {
    /// Create a gateway over the given provider
    ///
    /// # Arguments
    ///
    /// * `provider` - The upstream completion backend
    /// * `system_prompt` - Optional system preamble prepended to every
    ///   forwarded sequence
    pub fn new(provider: Box<dyn Provider>, system_prompt: Option<String>) -> Self {
        Self {
            provider,
            system_prompt,
        }
    }

    /// Forward the turns to the provider and return the assistant text
    ///
    /// A single upstream attempt is made; failures propagate to the
    /// caller unchanged so configuration failures stay distinguishable
    /// from transient upstream ones.
    ///
    /// # Errors
    ///
    /// Returns `KaiwaError::MissingCredentials` or `KaiwaError::Provider`
    /// from the underlying provider
    pub async fn complete(&self, turns: &[ChatMessage]) -> Result<String> {
        let reply = match &self.system_prompt {
            Some(preamble) => {
                let mut wire = Vec::with_capacity(turns.len() + 1);
                wire.push(ChatMessage::system(preamble));
                wire.extend_from_slice(turns);
                self.provider.complete(&wire).await?
            }
            None => self.provider.complete(turns).await?,
        };

        tracing::debug!("Completion succeeded: {} chars", reply.len());
        Ok(reply)
    }
}
