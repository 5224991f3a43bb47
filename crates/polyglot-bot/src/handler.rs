use polyglot_types::events::{InboundEvent, OutboundMessage, SessionType};

use crate::languages::Language;
use crate::prefs::LanguageStore;
use crate::translator::Translator;

/// Shared state injected into every event dispatch.
pub struct HandlerContext {
    pub store: LanguageStore,
    pub translator: Translator,
}

/// What an inbound event calls for. First matching rule wins; every
/// well-formed event maps to exactly one decision.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// `app_mention`: greet the sender, naming their current language.
    Greet { user: String, channel: String },
    /// A DM starting with `setlang`. `arg` is the candidate code when the
    /// command had exactly two tokens; anything else replies with usage.
    SetLang {
        user: String,
        channel: String,
        arg: Option<String>,
    },
    /// A DM with real text: translate it into the sender's language.
    Translate {
        user: String,
        channel: String,
        text: String,
    },
    Ignore,
}

pub fn classify(event: &InboundEvent) -> Decision {
    match event {
        InboundEvent::Mention { user, channel } => Decision::Greet {
            user: user.clone(),
            channel: channel.clone(),
        },
        InboundEvent::Message {
            user,
            channel,
            text,
            session_type,
            from_bot,
        } => {
            // Only one-to-one DMs are handled; channel chatter reaches the
            // bot via app_mention instead.
            if *session_type != SessionType::Direct {
                return Decision::Ignore;
            }
            // Never react to bot messages (our own replies included).
            if *from_bot {
                return Decision::Ignore;
            }
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Decision::Ignore;
            }

            // Keyword match is a case-insensitive prefix check, not a
            // word-boundary one.
            if starts_with_ignore_case(trimmed, "setlang") {
                // Exactly two tokens ⇒ a candidate code; otherwise usage.
                let mut tokens = trimmed.split_whitespace();
                tokens.next();
                let arg = match (tokens.next(), tokens.next()) {
                    (Some(code), None) => Some(code.to_string()),
                    _ => None,
                };
                return Decision::SetLang {
                    user: user.clone(),
                    channel: channel.clone(),
                    arg,
                };
            }

            Decision::Translate {
                user: user.clone(),
                channel: channel.clone(),
                text: trimmed.to_string(),
            }
        }
    }
}

/// Run one inbound event to completion: at most one reply, never an error.
pub async fn handle_event(
    event: InboundEvent,
    ctx: &HandlerContext,
) -> Option<OutboundMessage> {
    match classify(&event) {
        Decision::Ignore => None,
        Decision::Greet { user, channel } => {
            let lang = ctx.store.get(&user);
            tracing::info!(user = %user, lang = lang.code(), "Greeting mention");
            Some(OutboundMessage {
                channel,
                text: greeting(&user, lang),
            })
        }
        Decision::SetLang { user, channel, arg } => {
            let text = match arg
                .as_deref()
                .and_then(|token| ctx.store.set_token(&user, token))
            {
                Some(lang) => {
                    tracing::info!(user = %user, lang = lang.code(), "Language updated");
                    format!("Language set to {}.", lang.display_name())
                }
                None => {
                    tracing::debug!(user = %user, arg = ?arg, "Rejected setlang");
                    usage_message()
                }
            };
            Some(OutboundMessage { channel, text })
        }
        Decision::Translate {
            user,
            channel,
            text,
        } => {
            let lang = ctx.store.get(&user);
            let rendered = match ctx.translator.translate(&text, lang).await {
                Ok(translated) => translated,
                Err(e) => {
                    tracing::warn!(error = %e, user = %user, "Translation failed");
                    format!("[Translation error: {e}]")
                }
            };
            Some(OutboundMessage {
                channel,
                text: format!("({}) {}", lang.display_name(), rendered),
            })
        }
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn greeting(user: &str, lang: Language) -> String {
    format!(
        "Hello <@{user}>! I translate your direct messages into {}. \
         DM me any text to translate it, or `setlang <code>` to switch.",
        lang.display_name()
    )
}

fn usage_message() -> String {
    format!("Usage: `setlang <{}>`", Language::usage_codes())
}
