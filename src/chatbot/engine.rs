//! Bot engine - dispatches chat events to the answer pipeline.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::chatbot::answer::AnswerGenerator;
use crate::chatbot::chunk::{chunk, DEFAULT_MAX_MESSAGE_LEN};
use crate::chatbot::language::{detect, Language};
use crate::chatbot::localize::{localize, MessageKey, LANGUAGE_PROMPT};
use crate::chatbot::session::SessionStore;
use crate::chatbot::telegram::Transport;

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Max UTF-16 code units per outgoing message.
    pub max_message_len: usize,
    /// Pause between consecutive segments of one answer.
    pub chunk_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
            chunk_delay: Duration::from_millis(500),
        }
    }
}

/// An inbound event, already stripped of transport details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotEvent {
    /// The `/start` command.
    Start { chat_id: i64 },
    /// An inline button press.
    LanguageCallback {
        chat_id: i64,
        /// Message carrying the keyboard, if Telegram still has it.
        message_id: Option<i64>,
        callback_id: String,
        data: String,
    },
    Text { chat_id: i64, text: String },
    /// A button press on an inline message, with no chat to answer in.
    DetachedCallback { callback_id: String },
}

/// The bot engine.
pub struct BotEngine {
    config: EngineConfig,
    generator: AnswerGenerator,
    sessions: Arc<dyn SessionStore>,
    transport: Arc<dyn Transport>,
}

impl BotEngine {
    pub fn new(
        config: EngineConfig,
        generator: AnswerGenerator,
        sessions: Arc<dyn SessionStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            generator,
            sessions,
            transport,
        }
    }

    pub async fn handle(&self, event: BotEvent) {
        match event {
            BotEvent::Start { chat_id } => self.handle_start(chat_id).await,
            BotEvent::LanguageCallback {
                chat_id,
                message_id,
                callback_id,
                data,
            } => {
                self.handle_language_callback(chat_id, message_id, &callback_id, &data)
                    .await
            }
            BotEvent::Text { chat_id, text } => self.handle_text(chat_id, &text).await,
            BotEvent::DetachedCallback { callback_id } => {
                info!("Acknowledging callback {callback_id} without a message");
                let _ = self.transport.answer_callback(&callback_id).await;
            }
        }
    }

    /// Offer the language keyboard.
    async fn handle_start(&self, chat_id: i64) {
        info!("👋 /start from {chat_id}");
        // Failure already logged by the transport
        let _ = self.transport.send_language_prompt(chat_id, LANGUAGE_PROMPT).await;
    }

    async fn handle_language_callback(
        &self,
        chat_id: i64,
        message_id: Option<i64>,
        callback_id: &str,
        data: &str,
    ) {
        let Some(language) = Language::from_callback_data(data) else {
            info!("Ignoring callback {data:?} from {chat_id}");
            let _ = self.transport.answer_callback(callback_id).await;
            return;
        };

        self.sessions.set(chat_id, language);
        info!("🌐 Chat {chat_id} selected language: {language}");

        if let Some(message_id) = message_id {
            let _ = self.transport.delete_message(chat_id, message_id).await;
        }
        self.deliver(chat_id, localize(MessageKey::Welcome, language)).await;
        self.deliver(chat_id, localize(MessageKey::LanguageSelected, language)).await;
        let _ = self.transport.answer_callback(callback_id).await;
    }

    async fn handle_text(&self, chat_id: i64, text: &str) {
        if text.starts_with("/start") {
            return self.handle_start(chat_id).await;
        }

        let language = self.resolve_language(chat_id, text);
        let preview: String = text.chars().take(50).collect();
        info!("📨 Message from {chat_id} ({language}): {preview}");

        let _ = self.transport.send_typing(chat_id).await;

        let reply = match self.generator.answer(text, language).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Cannot answer {chat_id}: {e}");
                localize(MessageKey::Error, language).to_string()
            }
        };

        self.deliver(chat_id, &reply).await;
    }

    /// Stored selection, or the detected language which then becomes the
    /// chat's selection.
    fn resolve_language(&self, chat_id: i64, text: &str) -> Language {
        if let Some(language) = self.sessions.get(chat_id) {
            return language;
        }
        let detected = detect(text);
        info!("🔎 Chat {chat_id} has no language yet, detected {detected}");
        self.sessions.set(chat_id, detected);
        detected
    }

    /// Send `text`, split into several messages when it is too long.
    async fn deliver(&self, chat_id: i64, text: &str) {
        let segments = chunk(text, self.config.max_message_len);
        if segments.len() > 1 {
            info!(
                "✂️ Long reply ({} UTF-16 units) split into {} messages",
                text.encode_utf16().count(),
                segments.len()
            );
        }

        let last = segments.len().saturating_sub(1);
        for (i, segment) in segments.iter().enumerate() {
            if self.transport.send_message(chat_id, segment).await.is_err() {
                // Later segments would arrive out of context
                return;
            }
            if i < last && !self.config.chunk_delay.is_zero() {
                tokio::time::sleep(self.config.chunk_delay).await;
            }
        }
    }
}
