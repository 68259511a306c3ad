//! Grounded answer generation: prompt assembly, backend call, cleanup.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;
use tracing::{info, warn};

use crate::chatbot::gemini::{BackendError, GenerationBackend};
use crate::chatbot::knowledge::{KnowledgeError, KnowledgeStore};
use crate::chatbot::language::Language;
use crate::chatbot::localize::{localize, MessageKey};
use crate::chatbot::topics::{match_topic, TopicId};

/// Max chars of user text or answers written to the log.
const LOG_PREVIEW_CHARS: usize = 50;

pub struct AnswerGenerator {
    backend: Arc<dyn GenerationBackend>,
    knowledge: Arc<KnowledgeStore>,
}

impl AnswerGenerator {
    pub fn new(backend: Arc<dyn GenerationBackend>, knowledge: Arc<KnowledgeStore>) -> Self {
        Self { backend, knowledge }
    }

    /// Answer a question in `language`.
    ///
    /// Backend failures are turned into a localized apology here; only a
    /// knowledge document that cannot be loaded is reported to the caller.
    pub async fn answer(&self, question: &str, language: Language) -> Result<String, KnowledgeError> {
        let document = self.knowledge.load().await?;
        let empty = Value::Object(Default::default());
        let slice = document.slice(language).unwrap_or(&empty);

        info!("❓ Question ({language}): '{}'", preview(question));

        let question = augment_question(question, language);
        let instruction = build_instruction(slice, language);

        match self.backend.generate(&instruction, &question).await {
            Ok(text) => {
                // Markup-only replies strip to nothing too
                let cleaned = strip_markup(&text);
                if cleaned.is_empty() {
                    warn!("Gemini returned an empty response for '{}'", preview(&question));
                    return Ok(localize(MessageKey::NoInformation, language).to_string());
                }
                info!("💬 Answer ({language}): '{}'", preview(&cleaned));
                Ok(cleaned)
            }
            Err(e) => {
                warn!("Generation failed: {e}");
                let key = match e {
                    BackendError::Service(_) => MessageKey::ServiceApology,
                    BackendError::Timeout(_) | BackendError::Unknown(_) => MessageKey::GenericApology,
                };
                Ok(localize(key, language).to_string())
            }
        }
    }
}

fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}

/// Append a topic hint when the question mentions a known keyword.
pub fn augment_question(question: &str, language: Language) -> String {
    match match_topic(question, language) {
        Some(topic) => format!("{question} - {}", topic_hint(topic, language)),
        None => question.to_string(),
    }
}

fn topic_hint(topic: TopicId, language: Language) -> String {
    match language {
        Language::Uzbek => format!("{topic} haqida batafsil ma'lumot bering"),
        Language::Russian => format!("дайте подробную информацию о {topic}"),
        Language::English => format!("give detailed information about {topic}"),
    }
}

fn role_framing(language: Language) -> &'static str {
    match language {
        Language::Uzbek => {
            "Siz USAT (Fan va texnologiyalar universiteti) bo'yicha sotuv menejerisiz.\n\
             Faqat o'zbek tilida javob bering.\n\
             Quyidagi ma'lumotlardan foydalaning (faqat \"uzbek\" bo'limidan):"
        }
        Language::Russian => {
            "Вы менеджер по продажам USAT (Университет науки и технологий).\n\
             Отвечайте только на русском языке.\n\
             Используйте следующую информацию (только из раздела \"russian\"):"
        }
        Language::English => {
            "You are a sales manager for USAT (University of Science and Technology).\n\
             Answer only in English.\n\
             Use the following information (only from \"english\" section):"
        }
    }
}

/// Build the instruction block: role, reference text, behavioural rules.
pub fn build_instruction(slice: &Value, language: Language) -> String {
    let reference = serde_json::to_string_pretty(slice).unwrap_or_else(|_| slice.to_string());
    let fallback = localize(MessageKey::NoInformation, language);

    format!(
        "{role}\n{reference}\n\n\
         IMPORTANT RULES:\n\
         1. Answer only on the basis of the information above.\n\
         2. Find a suitable answer for short words and incomplete questions too (for example: \"bank ishi\", \"dasturlash\", \"narx\", \"kontrakt narxlari\", \"qabul kvotasi\", \"yotoqxona bepul\", \"harbiy kafedra\").\n\
         3. Answer questions of any length: short (1-2 words), medium (1-2 sentences) or long.\n\
         4. If the question is unrelated to the topic or the information is not enough to answer, write exactly this text: \"{fallback}\"\n\
         5. Do not use markdown formatting (**, *, __, `) in your answers, write plain text.\n\
         6. Give program names, prices and other exact facts fully and precisely, without abbreviation.\n\
         7. Give detailed answers to contextual and complex questions.\n\
         8. Take the information from the section that matches the meaning of the question and answer completely.",
        role = role_framing(language),
    )
}

static MARKUP_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [r"\*\*(.*?)\*\*", r"\*(.*?)\*", r"__(.*?)__", r"`(.*?)`"]
        .map(|p| Regex::new(p).expect("static markup pattern must compile"))
});

/// Remove bold, italic, underline and code wrappers, keeping the inner text.
///
/// Passes repeat until nothing changes so the result is stable under
/// another call.
pub fn strip_markup(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = MARKUP_PATTERNS
            .iter()
            .fold(current.clone(), |acc, re| re.replace_all(&acc, "$1").into_owned());
        if next == current {
            break;
        }
        current = next;
    }
    current.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_markup_example() {
        assert_eq!(strip_markup("**Narx** 5 000 000 so'm"), "Narx 5 000 000 so'm");
    }

    #[test]
    fn test_strip_all_wrappers() {
        assert_eq!(
            strip_markup("  **bold** *italic* __under__ `code`  "),
            "bold italic under code"
        );
    }

    #[test]
    fn test_strip_keeps_lone_markers() {
        assert_eq!(strip_markup("5 * 3 = 15"), "5 * 3 = 15");
    }

    #[test]
    fn test_strip_markup_only_is_empty() {
        assert_eq!(strip_markup("****"), "");
        assert_eq!(strip_markup(" `` "), "");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let samples = [
            "**Narx** 5 000 000 so'm",
            "***triple***",
            "*`*`*",
            "__a__ ** b ** `c",
            "plain text",
            "**unclosed",
        ];
        for s in samples {
            let once = strip_markup(s);
            assert_eq!(strip_markup(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_augment_with_topic() {
        let q = augment_question("bank ishi haqida", Language::Uzbek);
        assert_eq!(q, "bank ishi haqida - bankIshi haqida batafsil ma'lumot bering");
    }

    #[test]
    fn test_augment_without_topic() {
        assert_eq!(augment_question("salom", Language::Uzbek), "salom");
    }

    #[test]
    fn test_augment_localized_hint() {
        let q = augment_question("What is the tuition?", Language::English);
        assert!(q.ends_with("give detailed information about kontraktNarxlari"));
    }

    #[test]
    fn test_instruction_contains_reference_and_rules() {
        let slice = json!({"kontraktNarxlari": "12 000 000 so'm"});
        let instruction = build_instruction(&slice, Language::Russian);
        assert!(instruction.starts_with("Вы менеджер"));
        assert!(instruction.contains("\"kontraktNarxlari\": \"12 000 000 so'm\""));
        assert!(instruction.contains(localize(MessageKey::NoInformation, Language::Russian)));
        assert!(instruction.contains("(**, *, __, `)"));
    }
}
