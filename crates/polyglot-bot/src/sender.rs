use polyglot_types::events::OutboundMessage;
use serde::Deserialize;

const SLACK_POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// The `{ok, error}` envelope every Slack Web API call returns.
#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

/// Posts replies via `chat.postMessage`.
///
/// Send failures are logged and swallowed: a reply that cannot be
/// delivered must never fail the webhook request that triggered it.
#[derive(Clone)]
pub struct SlackSender {
    http: reqwest::Client,
    api_url: String,
    bot_token: Option<String>,
}

impl SlackSender {
    pub fn new(bot_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: SLACK_POST_MESSAGE_URL.to_string(),
            bot_token,
        }
    }

    /// Point the sender at a different endpoint. Used by tests.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub async fn post_message(&self, msg: &OutboundMessage) {
        let Some(token) = self.bot_token.as_deref() else {
            tracing::warn!(channel = %msg.channel, "SLACK_BOT_TOKEN not set — dropping reply");
            return;
        };

        match self
            .http
            .post(&self.api_url)
            .bearer_auth(token)
            .json(msg)
            .send()
            .await
        {
            Ok(resp) => {
                let status = resp.status();
                match resp.json::<PostMessageResponse>().await {
                    Ok(api) if api.ok => {
                        tracing::debug!(channel = %msg.channel, "Posted reply");
                    }
                    Ok(api) => {
                        tracing::error!(
                            channel = %msg.channel,
                            error = ?api.error,
                            "chat.postMessage rejected"
                        );
                    }
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            %status,
                            "chat.postMessage response unreadable"
                        );
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "chat.postMessage request failed");
            }
        }
    }
}
