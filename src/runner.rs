//! Top-level bot runner: logging, components, dispatcher.

use std::fs;
use std::path::Path;
use std::sync::PoisonError;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::info;

use crate::components::{build_bot_components, build_callback_router, build_handler_chain};
use crate::config::BotConfig;
use crate::core::init_tracing;
use crate::telegram::run_dispatcher;

/// Runs the bot until shutdown.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;

    if let Some(parent) = Path::new(&config.log_file).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    init_tracing(&config.log_file)?;

    let components = build_bot_components(&config)?;

    let me = components.bot.get_me().await?;
    *components
        .bot_username
        .write()
        .unwrap_or_else(PoisonError::into_inner) = me.username().to_string();
    info!(username = me.username(), "Bot identity resolved");

    let chain = build_handler_chain(&components);
    let router = build_callback_router(&components);

    run_dispatcher(components.bot.clone(), chain, router, &config).await
}
