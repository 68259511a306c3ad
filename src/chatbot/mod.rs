//! Chatbot module - answers university questions with Gemini.

pub mod answer;
pub mod chunk;
pub mod engine;
pub mod gemini;
pub mod knowledge;
pub mod language;
pub mod localize;
pub mod session;
pub mod telegram;
pub mod topics;


pub use answer::AnswerGenerator;
pub use engine::{BotEngine, BotEvent, EngineConfig};
pub use gemini::{BackendError, GeminiClient, GenerationBackend};
pub use knowledge::{KnowledgeError, KnowledgeStore};
pub use language::Language;
pub use session::{InMemorySessionStore, SessionStore};
pub use telegram::{TelegramClient, Transport};
