use polyglot_std::env::ReadEnv;

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Slack Web API token used to post replies. When absent, replies are
    /// dropped with a warning instead of failing the webhook request.
    pub slack_bot_token: Option<String>,
    /// Signing secret for verifying Events API request signatures.
    /// When absent, verification is disabled.
    pub slack_signing_secret: Option<String>,

    // ── Translation backend ───────────────────────────────────────────────
    /// Anthropic API key. When absent, translations fail with a
    /// user-visible error marker but the service keeps running.
    pub anthropic_api_key: Option<String>,
    /// Claude model ID used for translations. Default: "claude-sonnet-4-6".
    pub claude_model: String,
    /// Maximum output tokens per translation. Default: 1024.
    pub claude_max_tokens: u32,
    /// Total HTTP budget for one translation call, in seconds. Default: 30.
    pub translate_timeout_secs: u64,

    // ── Infra ─────────────────────────────────────────────────────────────
    /// Port the HTTP server binds on. Default: 8080.
    pub port: u16,
    /// URL the keep-alive loop pings every 5 minutes. Absent = loop
    /// disabled.
    pub keep_alive_url: Option<String>,
    /// Capacity bound for the in-memory preference store.
    /// Read from `PREFS_MAX_ENTRIES`. Default: 0 (unbounded).
    pub prefs_max_entries: usize,
}

impl BotConfig {
    pub fn from_env<E: ReadEnv>(env: &E) -> Self {
        let slack_bot_token = env.var("SLACK_BOT_TOKEN").ok().filter(|v| !v.is_empty());

        let slack_signing_secret = env
            .var("SLACK_SIGNING_SECRET")
            .ok()
            .filter(|v| !v.is_empty());

        let anthropic_api_key = env.var("ANTHROPIC_API_KEY").ok().filter(|v| !v.is_empty());

        let claude_model = env
            .var("CLAUDE_MODEL")
            .unwrap_or_else(|_| "claude-sonnet-4-6".to_string());

        let claude_max_tokens = env
            .var("CLAUDE_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024);

        let translate_timeout_secs = env
            .var("TRANSLATE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let port = env
            .var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);

        let keep_alive_url = env.var("KEEP_ALIVE_URL").ok().filter(|v| !v.is_empty());

        let prefs_max_entries = env
            .var("PREFS_MAX_ENTRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        Self {
            slack_bot_token,
            slack_signing_secret,
            anthropic_api_key,
            claude_model,
            claude_max_tokens,
            translate_timeout_secs,
            port,
            keep_alive_url,
            prefs_max_entries,
        }
    }
}
