//! Response language tags and the heuristic language detector.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// A language the bot can answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Uzbek,
    Russian,
    English,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Uzbek, Language::Russian, Language::English];

    /// Tag used as the knowledge-document key and in callback payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Uzbek => "uzbek",
            Language::Russian => "russian",
            Language::English => "english",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "uzbek" => Some(Language::Uzbek),
            "russian" => Some(Language::Russian),
            "english" => Some(Language::English),
            _ => None,
        }
    }

    /// Parse an inline-button payload such as `lang_russian`.
    pub fn from_callback_data(data: &str) -> Option<Self> {
        data.strip_prefix(CALLBACK_PREFIX).and_then(Self::from_tag)
    }

    pub fn callback_data(&self) -> String {
        format!("{CALLBACK_PREFIX}{}", self.as_str())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const CALLBACK_PREFIX: &str = "lang_";

static RUSSIAN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\p{Cyrillic}",
        r"(?i)\b(privet|zdravstvuyte|skolko|stoimost|obuchenie|spasibo|pozhaluysta|gde|kogda|pochemu)\b",
    ])
});

static ENGLISH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\b(what|how|where|when|which|who|why)\b",
        r"(?i)\b(is|are|do|does|can|could|would|the)\b",
        r"(?i)\b(hello|hi|thanks|thank you|please)\b",
        r"(?i)\b(tuition|fee|fees|price|cost|university|admission|scholarship|dormitory|faculty)\b",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static language pattern must compile"))
        .collect()
}

/// Guess the language of an utterance.
///
/// Russian patterns are tested before English ones, so mixed text resolves
/// to Russian. Anything that matches neither family is treated as Uzbek.
pub fn detect(text: &str) -> Language {
    if RUSSIAN_PATTERNS.iter().any(|p| p.is_match(text)) {
        return Language::Russian;
    }
    if ENGLISH_PATTERNS.iter().any(|p| p.is_match(text)) {
        return Language::English;
    }
    Language::Uzbek
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_russian_cyrillic() {
        assert_eq!(detect("Сколько стоит обучение?"), Language::Russian);
        assert_eq!(detect("привет"), Language::Russian);
    }

    #[test]
    fn test_detect_russian_transliterated() {
        assert_eq!(detect("skolko stoit kontrakt"), Language::Russian);
    }

    #[test]
    fn test_detect_english() {
        assert_eq!(detect("What is the tuition fee?"), Language::English);
        assert_eq!(detect("Hello"), Language::English);
    }

    #[test]
    fn test_detect_uzbek_default() {
        assert_eq!(detect("Kontrakt narxi qancha?"), Language::Uzbek);
        assert_eq!(detect("yotoqxona bormi"), Language::Uzbek);
        assert_eq!(detect(""), Language::Uzbek);
    }

    #[test]
    fn test_russian_wins_over_english() {
        assert_eq!(detect("What is стоимость?"), Language::Russian);
    }

    #[test]
    fn test_word_boundaries() {
        // "this" contains "hi" but is not the word "hi"
        assert_eq!(detect("thisx"), Language::Uzbek);
    }

    #[test]
    fn test_callback_data() {
        assert_eq!(Language::from_callback_data("lang_russian"), Some(Language::Russian));
        assert_eq!(Language::from_callback_data("lang_klingon"), None);
        assert_eq!(Language::from_callback_data("uzbek"), None);
        for lang in Language::ALL {
            assert_eq!(Language::from_callback_data(&lang.callback_data()), Some(lang));
        }
    }
}
