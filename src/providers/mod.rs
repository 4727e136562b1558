//! Completion provider abstraction and implementations
//!
//! The [`Provider`] trait is the seam between the gateway and the hosted
//! completion service; [`OpenAiProvider`] is the shipped implementation.

pub mod base;
pub mod openai;

pub use base::{ChatMessage, Provider};
pub use openai::OpenAiProvider;

use crate::config::ProviderConfig;
use crate::error::{KaiwaError, Result};

/// Create a provider from configuration
///
/// # Errors
///
/// Returns `KaiwaError::Config` for an unknown provider type
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    match config.provider_type.as_str() {
        "openai" => Ok(Box::new(OpenAiProvider::new(config.openai.clone())?)),
        other => Err(KaiwaError::Config(format!("Unknown provider type: {}", other)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_openai() {
        let config = ProviderConfig::default();
        assert!(create_provider(&config).is_ok());
    }

    #[test]
    fn test_create_provider_unknown_type() {
        let config = ProviderConfig {
            provider_type: "mystery".to_string(),
            ..ProviderConfig::default()
        };
        assert!(create_provider(&config).is_err());
    }
}
