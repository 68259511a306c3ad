//! Integration tests against the real Gemini API.
//!
//! These tests require GEMINI_API_TOKEN in the environment.
//!
//! Run with: cargo test --features integ_test --test gemini_live

#[cfg(feature = "integ_test")]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use usat_bot::chatbot::answer::AnswerGenerator;
    use usat_bot::chatbot::gemini::{BackendError, GeminiClient, GenerationBackend, DEFAULT_MODEL};
    use usat_bot::chatbot::knowledge::KnowledgeStore;
    use usat_bot::chatbot::language::Language;
    use usat_bot::chatbot::localize::{localize, MessageKey};

    fn token() -> Option<String> {
        std::env::var("GEMINI_API_TOKEN").ok().filter(|t| !t.is_empty())
    }

    #[tokio::test]
    async fn test_generate_returns_text() {
        let Some(token) = token() else {
            eprintln!("Skipping test: GEMINI_API_TOKEN not set");
            return;
        };

        let client = GeminiClient::new(token, DEFAULT_MODEL.into(), None).unwrap();
        let text = client
            .generate("Answer with a single word.", "What colour is the sky on a clear day?")
            .await
            .expect("generation failed");
        assert!(!text.trim().is_empty());
    }

    #[tokio::test]
    async fn test_bad_key_is_service_error() {
        let client = GeminiClient::new("invalid-key".into(), DEFAULT_MODEL.into(), None).unwrap();
        let err = client.generate("rules", "question").await.unwrap_err();
        assert!(matches!(err, BackendError::Service(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_grounded_answer() {
        let Some(token) = token() else {
            eprintln!("Skipping test: GEMINI_API_TOKEN not set");
            return;
        };

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"english": {"kontraktNarxlari": "Tuition is 15 000 000 UZS per year"}}"#)
            .unwrap();

        let client = GeminiClient::new(token, DEFAULT_MODEL.into(), None).unwrap();
        let generator = AnswerGenerator::new(Arc::new(client), Arc::new(KnowledgeStore::new(file.path())));
        let answer = generator.answer("What is the tuition fee?", Language::English).await.unwrap();

        assert_ne!(answer, localize(MessageKey::GenericApology, Language::English));
        assert!(!answer.contains("**"));
    }
}
