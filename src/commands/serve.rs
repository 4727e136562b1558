//! Completion endpoint server command handler

use crate::config::Config;
use crate::error::Result;
use crate::gateway::CompletionGateway;
use crate::providers::create_provider;
use std::sync::Arc;

/// Run the completion endpoint server
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `bind` - Optional override for the configured bind address
pub async fn run_serve(config: Config, bind: Option<String>) -> Result<()> {
    let provider = create_provider(&config.provider)?;
    let gateway = Arc::new(CompletionGateway::new(
        provider,
        config.chat.system_prompt.clone(),
    ));

    let bind = bind.unwrap_or(config.server.bind);
    crate::gateway::serve(&bind, gateway).await
}
