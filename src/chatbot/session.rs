//! Per-chat language selection.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::chatbot::language::Language;

/// Storage for the language each chat talks in.
///
/// Reads and writes are single-key; a concurrent overwrite at worst gives
/// one in-flight request the previous language.
pub trait SessionStore: Send + Sync {
    fn get(&self, chat_id: i64) -> Option<Language>;
    fn set(&self, chat_id: i64, language: Language);
}

/// Process-memory session store. Forgets everything on restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    languages: RwLock<HashMap<i64, Language>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, chat_id: i64) -> Option<Language> {
        self.languages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&chat_id)
            .copied()
    }

    fn set(&self, chat_id: i64, language: Language) {
        self.languages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(chat_id, language);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_unknown_chat() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.get(42), None);
    }

    #[test]
    fn test_set_and_overwrite() {
        let store = InMemorySessionStore::new();
        store.set(42, Language::Russian);
        assert_eq!(store.get(42), Some(Language::Russian));

        store.set(42, Language::English);
        assert_eq!(store.get(42), Some(Language::English));
    }

    #[test]
    fn test_chats_are_independent() {
        let store = InMemorySessionStore::new();
        store.set(1, Language::Uzbek);
        store.set(-100200, Language::Russian);
        assert_eq!(store.get(1), Some(Language::Uzbek));
        assert_eq!(store.get(-100200), Some(Language::Russian));
    }
}
