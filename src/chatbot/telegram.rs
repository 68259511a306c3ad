//! Telegram client using teloxide.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, ChatAction, InlineKeyboardButton, InlineKeyboardMarkup, MessageId};
use tracing::{info, warn};

use crate::chatbot::language::Language;

/// Outbound operations the bot needs from a chat platform.
///
/// Failures are reported as a message that the implementation has
/// already logged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send plain text, returning the new message id.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<i64, String>;

    /// Send `text` with the language selection keyboard attached.
    async fn send_language_prompt(&self, chat_id: i64, text: &str) -> Result<i64, String>;

    /// Show the "typing..." indicator.
    async fn send_typing(&self, chat_id: i64) -> Result<(), String>;

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<(), String>;

    /// Acknowledge an inline button press.
    async fn answer_callback(&self, callback_id: &str) -> Result<(), String>;
}

/// Button label for each language.
fn button_label(language: Language) -> &'static str {
    match language {
        Language::Uzbek => "🇺🇿 O'zbek",
        Language::Russian => "🇷🇺 Русский",
        Language::English => "🇺🇸 English",
    }
}

/// Language keyboard layout: Uzbek and Russian on the first row, English below.
pub fn language_keyboard_rows() -> Vec<Vec<(&'static str, String)>> {
    let button = |lang: Language| (button_label(lang), lang.callback_data());
    vec![
        vec![button(Language::Uzbek), button(Language::Russian)],
        vec![button(Language::English)],
    ]
}

fn language_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(language_keyboard_rows().into_iter().map(|row| {
        row.into_iter()
            .map(|(label, data)| InlineKeyboardButton::callback(label, data))
            .collect::<Vec<_>>()
    }))
}

/// Telegram API client.
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramClient {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<i64, String> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map(|msg| msg.id.0 as i64)
            .map_err(|e| {
                let msg = format!("Failed to send: {e}");
                warn!("{}", msg);
                msg
            })
    }

    async fn send_language_prompt(&self, chat_id: i64, text: &str) -> Result<i64, String> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .reply_markup(language_keyboard())
            .await
            .map(|msg| msg.id.0 as i64)
            .map_err(|e| {
                let msg = format!("Failed to send language prompt: {e}");
                warn!("{}", msg);
                msg
            })
    }

    async fn send_typing(&self, chat_id: i64) -> Result<(), String> {
        self.bot
            .send_chat_action(ChatId(chat_id), ChatAction::Typing)
            .await
            .map_err(|e| {
                let msg = format!("Failed to send typing action: {e}");
                warn!("{}", msg);
                msg
            })?;

        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<(), String> {
        info!("🗑️ Deleting message {} in chat {}", message_id, chat_id);

        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id as i32))
            .await
            .map_err(|e| {
                let msg = format!("Failed to delete message: {e}");
                warn!("{}", msg);
                msg
            })?;

        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), String> {
        self.bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()))
            .await
            .map_err(|e| {
                let msg = format!("Failed to answer callback: {e}");
                warn!("{}", msg);
                msg
            })?;

        Ok(())
    }
}
