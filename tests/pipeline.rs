//! End-to-end answer pipeline through the public API, with a fake backend.

use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::NamedTempFile;

use usat_bot::chatbot::answer::{strip_markup, AnswerGenerator};
use usat_bot::chatbot::chunk::chunk;
use usat_bot::chatbot::gemini::{BackendError, GenerationBackend};
use usat_bot::chatbot::knowledge::KnowledgeStore;
use usat_bot::chatbot::language::{detect, Language};
use usat_bot::chatbot::localize::{localize, MessageKey};

/// Echoes a fixed reply and remembers the question it was asked.
struct RecordingBackend {
    reply: Result<&'static str, &'static str>,
    last_question: Mutex<Option<String>>,
}

impl RecordingBackend {
    fn replying(reply: &'static str) -> Self {
        Self { reply: Ok(reply), last_question: Mutex::new(None) }
    }

    fn failing(message: &'static str) -> Self {
        Self { reply: Err(message), last_question: Mutex::new(None) }
    }
}

#[async_trait]
impl GenerationBackend for RecordingBackend {
    async fn generate(&self, _instruction: &str, question: &str) -> Result<String, BackendError> {
        *self.last_question.lock().unwrap() = Some(question.to_string());
        match self.reply {
            Ok(text) => Ok(text.to_string()),
            Err(message) => Err(BackendError::Service(message.to_string())),
        }
    }
}

fn knowledge_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"uzbek": {"bankIshi": "Bank ishi: 4 yil, kunduzgi"}}"#).unwrap();
    file
}

#[tokio::test]
async fn bank_question_is_augmented_with_topic() {
    let file = knowledge_file();
    let backend = Arc::new(RecordingBackend::replying("**Bank ishi** 4 yil davom etadi."));
    let generator = AnswerGenerator::new(backend.clone(), Arc::new(KnowledgeStore::new(file.path())));

    let question = "bank ishi qancha o'qiladi?";
    let language = detect(question);
    assert_eq!(language, Language::Uzbek);

    let answer = generator.answer(question, language).await.unwrap();
    assert_eq!(answer, "Bank ishi 4 yil davom etadi.");

    let forwarded = backend.last_question.lock().unwrap().clone().unwrap();
    assert!(forwarded.starts_with(question));
    assert!(forwarded.contains("bankIshi"));
}

#[tokio::test]
async fn api_failure_maps_to_service_apology() {
    let file = knowledge_file();
    let backend = Arc::new(RecordingBackend::failing("API key expired"));
    let generator = AnswerGenerator::new(backend, Arc::new(KnowledgeStore::new(file.path())));

    for language in Language::ALL {
        let answer = generator.answer("narx", language).await.unwrap();
        assert_eq!(answer, localize(MessageKey::ServiceApology, language));
        assert_ne!(answer, localize(MessageKey::GenericApology, language));
    }
}

#[tokio::test]
async fn missing_knowledge_is_reported() {
    let backend = Arc::new(RecordingBackend::replying("unused"));
    let generator = AnswerGenerator::new(backend.clone(), Arc::new(KnowledgeStore::new("/nonexistent/usat.json")));

    assert!(generator.answer("narx", Language::Uzbek).await.is_err());
    assert!(backend.last_question.lock().unwrap().is_none());
}

#[test]
fn answer_text_survives_chunking() {
    let answer = strip_markup(&vec!["**Grant** o'rinlari soni har yili e'lon qilinadi"; 150].join(". "));
    let segments = chunk(&answer, 1000);
    assert!(segments.iter().all(|s| s.encode_utf16().count() <= 1000));
    assert_eq!(
        segments.join(" ").split_whitespace().collect::<Vec<_>>(),
        answer.split_whitespace().collect::<Vec<_>>()
    );
}
