//! Static user-facing strings keyed by message and language.

use crate::chatbot::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    Welcome,
    LanguageSelected,
    /// Sent when the knowledge document cannot be loaded.
    Error,
    /// Fallback sentence for questions the reference text does not cover.
    NoInformation,
    ServiceApology,
    GenericApology,
}

/// Language used when a key has no entry for the requested language.
pub const FALLBACK_LANGUAGE: Language = Language::Uzbek;

/// Trilingual prompt shown with the language keyboard.
pub const LANGUAGE_PROMPT: &str = "🌐 Tilni tanlang / Выберите язык / Choose language:";

const NO_INFORMATION_UZ: &str =
    "Bu savol uchun ma'lumotlar mavjud emas. USAT universiteti haqida boshqa savollaringiz bo'lsa, bemalol so'rang!";
const NO_INFORMATION_RU: &str =
    "Информация по этому вопросу недоступна. Если у вас есть другие вопросы об университете USAT, смело спрашивайте!";
const NO_INFORMATION_EN: &str =
    "Information on this question is not available. If you have other questions about USAT university, feel free to ask!";

static MESSAGES: &[(MessageKey, Language, &str)] = &[
    (
        MessageKey::Welcome,
        Language::Uzbek,
        "Salom! Men USAT (Fan va texnologiyalar universiteti) AI botman. Universitet haqida savollaringizga javob berishga tayyorman.",
    ),
    (
        MessageKey::Welcome,
        Language::Russian,
        "Привет! Я AI-бот USAT (Университет науки и технологий). Готов ответить на ваши вопросы об университете.",
    ),
    (
        MessageKey::Welcome,
        Language::English,
        "Hello! I'm USAT (University of Science and Technology) AI bot. Ready to answer your questions about the university.",
    ),
    (
        MessageKey::LanguageSelected,
        Language::Uzbek,
        "✅ O'zbek tili tanlandi. Endi savollaringizni bering!",
    ),
    (
        MessageKey::LanguageSelected,
        Language::Russian,
        "✅ Русский язык выбран. Теперь задавайте ваши вопросы!",
    ),
    (
        MessageKey::LanguageSelected,
        Language::English,
        "✅ English language selected. Now ask your questions!",
    ),
    (MessageKey::Error, Language::Uzbek, NO_INFORMATION_UZ),
    (MessageKey::Error, Language::Russian, NO_INFORMATION_RU),
    (MessageKey::Error, Language::English, NO_INFORMATION_EN),
    (MessageKey::NoInformation, Language::Uzbek, NO_INFORMATION_UZ),
    (MessageKey::NoInformation, Language::Russian, NO_INFORMATION_RU),
    (MessageKey::NoInformation, Language::English, NO_INFORMATION_EN),
    (
        MessageKey::ServiceApology,
        Language::Uzbek,
        "Kechirasiz, hozirda sun'iy intellekt xizmatida texnik muammo yuzaga keldi. Iltimos, keyinroq urinib ko'ring.",
    ),
    (
        MessageKey::ServiceApology,
        Language::Russian,
        "Извините, сейчас в сервисе искусственного интеллекта возникла техническая проблема. Пожалуйста, попробуйте позже.",
    ),
    (
        MessageKey::ServiceApology,
        Language::English,
        "Sorry, the AI service is experiencing a technical problem right now. Please try again later.",
    ),
    (
        MessageKey::GenericApology,
        Language::Uzbek,
        "Kechirasiz, so'rovingizni bajarishda kutilmagan xatolik yuz berdi. Iltimos, keyinroq qayta urinib ko'ring.",
    ),
    (
        MessageKey::GenericApology,
        Language::Russian,
        "Извините, при обработке вашего запроса произошла непредвиденная ошибка. Пожалуйста, попробуйте позже.",
    ),
    (
        MessageKey::GenericApology,
        Language::English,
        "Sorry, an unexpected error occurred while processing your request. Please try again later.",
    ),
];

fn lookup(key: MessageKey, language: Language) -> Option<&'static str> {
    MESSAGES
        .iter()
        .find(|(k, l, _)| *k == key && *l == language)
        .map(|(_, _, text)| *text)
}

/// Look up a user-facing string, falling back to Uzbek.
pub fn localize(key: MessageKey, language: Language) -> &'static str {
    lookup(key, language)
        .or_else(|| lookup(key, FALLBACK_LANGUAGE))
        .unwrap_or_default()
}
