use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use polyglot_bot::config::BotConfig;
use polyglot_bot::handler::HandlerContext;
use polyglot_bot::keepalive::run_keep_alive;
use polyglot_bot::prefs::LanguageStore;
use polyglot_bot::sender::SlackSender;
use polyglot_bot::translator::Translator;
use polyglot_bot::webhook::{serve, AppState};
use polyglot_std::env::SystemEnv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = BotConfig::from_env(&SystemEnv);

    if config.slack_bot_token.is_none() {
        tracing::warn!("SLACK_BOT_TOKEN not set — replies will be dropped");
    }
    if config.slack_signing_secret.is_none() {
        tracing::warn!("SLACK_SIGNING_SECRET not set — request signature verification disabled");
    }
    if config.anthropic_api_key.is_none() {
        tracing::warn!(
            "ANTHROPIC_API_KEY not set — translations will fail with a user-visible error"
        );
    }

    let translator = Translator::new(
        config.anthropic_api_key.clone(),
        config.claude_model.clone(),
        config.claude_max_tokens,
        Duration::from_secs(config.translate_timeout_secs),
    );
    let state = AppState {
        signing_secret: config.slack_signing_secret.clone(),
        ctx: Arc::new(HandlerContext {
            store: LanguageStore::new(config.prefs_max_entries),
            translator,
        }),
        sender: SlackSender::new(config.slack_bot_token.clone()),
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    match config.keep_alive_url.clone() {
        Some(url) => {
            tokio::spawn(run_keep_alive(url, shutdown_rx));
        }
        None => tracing::info!("KEEP_ALIVE_URL not set — keep-alive loop disabled"),
    }

    serve(state, config.port, async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Received Ctrl+C, shutting down");
    })
    .await?;

    let _ = shutdown_tx.send(true);
    tracing::info!("Shutdown complete");
    Ok(())
}
