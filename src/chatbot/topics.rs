//! Keyword-to-topic lookup used to enrich short questions before generation.
//!
//! Matching is a plain substring test over the lowercased question, so a
//! keyword hidden inside a longer word still matches. Each language has two
//! tables: study programs first, then general questions. The first keyword
//! found wins, which makes declaration order significant.

use crate::chatbot::language::Language;

/// Topic tag naming a section of the knowledge document.
pub type TopicId = &'static str;

type KeywordTable = &'static [(&'static str, TopicId)];

static UZBEK_PROGRAMS: KeywordTable = &[
    ("bank", "bankIshi"),
    ("bank ishi", "bankIshi"),
    ("banking", "bankIshi"),
    ("bankir", "bankIshi"),
    ("dasturlash", "dasturiyInjiniring"),
    ("dasturiy", "dasturiyInjiniring"),
    ("programming", "dasturiyInjiniring"),
    ("dasturiy injiniring", "dasturiyInjiniring"),
    ("kod", "dasturiyInjiniring"),
    ("kompyuter", "kompyuterInjiniringi"),
    ("kompyuter injiniringi", "kompyuterInjiniringi"),
    ("it", "kompyuterInjiniringi"),
    ("axborot texnologiyalari", "kompyuterInjiniringi"),
    ("moliya", "moliyaTexnologiyalar"),
    ("moliya va moliyaviy texnologiyalar", "moliyaTexnologiyalar"),
    ("finance", "moliyaTexnologiyalar"),
    ("moliyaviy", "moliyaTexnologiyalar"),
    ("iqtisod", "iqtisodiyot"),
    ("iqtisodiyot", "iqtisodiyot"),
    ("ekonomika", "iqtisodiyot"),
    ("buxgalter", "buxgalteriyaHisobi"),
    ("buxgalteriya hisobi", "buxgalteriyaHisobi"),
    ("hisobchi", "buxgalteriyaHisobi"),
    ("turizm", "turizm"),
    ("turizm va mehmondo'stlik", "turizm"),
    ("sayohat", "turizm"),
    ("til", "xorijiyTil"),
    ("xorijiy til", "xorijiyTil"),
    ("ingliz", "xorijiyTil"),
    ("ingliz tili", "xorijiyTil"),
    ("tarix", "tarix"),
    ("matematika", "matematika"),
    ("math", "matematika"),
    ("psixolog", "psixologiya"),
    ("psixologiya", "psixologiya"),
    ("arxitektura", "arxitektura"),
    ("maktab", "boshlangichTalim"),
    ("boshlang'ich ta'lim", "boshlangichTalim"),
    ("bolalar", "maktabgachaTalim"),
    ("maktabgacha ta'lim", "maktabgachaTalim"),
    ("logistika", "logistika"),
    ("maxsus pedagogika", "maxsusPedagogika"),
    ("o'zbek tili", "ozbekTili"),
    ("ona tili", "ozbekTili"),
    ("ijtimoiy ish", "ijtimoiyIsh"),
];

static UZBEK_GENERAL: KeywordTable = &[
    ("narx", "kontraktNarxlari"),
    ("narxlar", "kontraktNarxlari"),
    ("kontrakt narxi", "kontraktNarxlari"),
    ("kontrakt narxlari", "kontraktNarxlari"),
    ("o'qish narxi", "kontraktNarxlari"),
    ("to'lov", "moliyaviyShartlar"),
    ("pul", "moliyaviyShartlar"),
    ("bo'lib to'lash", "moliyaviyShartlar"),
    ("online to'lash", "moliyaviyShartlar"),
    ("plastik karta", "moliyaviyShartlar"),
    ("to'lov usullari", "moliyaviyShartlar"),
    ("grant", "grantVaStipendiyalar"),
    ("grant o'rinlari", "grantVaStipendiyalar"),
    ("stipendiya", "grantVaStipendiyalar"),
    ("rektor stipendiyasi", "grantVaStipendiyalar"),
    ("prezident stipendiyasi", "grantVaStipendiyalar"),
    ("davlat granti", "grantVaStipendiyalar"),
    ("nomli stipendiya", "grantVaStipendiyalar"),
    ("qabul", "qabulJarayoni"),
    ("qabul muddati", "qabulJarayoni"),
    ("qabul kvotasi", "qabulJarayoni"),
    ("imtihon", "qabulJarayoni"),
    ("test", "qabulJarayoni"),
    ("test fanlar", "qabulJarayoni"),
    ("minimal ball", "qabulJarayoni"),
    ("kirish ballari", "qabulJarayoni"),
    ("kirish imtihoni", "qabulJarayoni"),
    ("test shakli", "qabulJarayoni"),
    ("test takrorlash", "qabulJarayoni"),
    ("natijalar", "qabulJarayoni"),
    ("hujjat", "qabulJarayoni"),
    ("hujjatlar", "qabulJarayoni"),
    ("onlayn hujjat", "qabulJarayoni"),
    ("hujjat topshirish", "qabulJarayoni"),
    ("bepul hujjat", "qabulJarayoni"),
    ("shaxsiy kabinet", "qabulJarayoni"),
    ("manzil", "joylashuvManzili"),
    ("joy", "joylashuvManzili"),
    ("qayerda joylashgan", "joylashuvManzili"),
    ("universitet manzili", "joylashuvManzili"),
    ("yotoqxona", "infratuzilmaVaQulayliklar"),
    ("ijara", "infratuzilmaVaQulayliklar"),
    ("talabalar yotoqxonasi", "infratuzilmaVaQulayliklar"),
    ("yotoqxona bepul", "infratuzilmaVaQulayliklar"),
    ("yashash sharoiti", "infratuzilmaVaQulayliklar"),
    ("telefon", "boglanishUchun"),
    ("aloqa", "boglanishUchun"),
    ("telefon raqam", "boglanishUchun"),
    ("sayt", "boglanishUchun"),
    ("web-sayt", "boglanishUchun"),
    ("vebsayt", "boglanishUchun"),
    ("telegram", "boglanishUchun"),
    ("instagram", "boglanishUchun"),
    ("ta'lim shakli", "oquvJarayoni"),
    ("kunduzgi", "oquvJarayoni"),
    ("kechki", "oquvJarayoni"),
    ("sirtqi", "oquvJarayoni"),
    ("masofaviy", "oquvJarayoni"),
    ("o'qish tili", "oquvJarayoni"),
    ("o'qish muddati", "oquvJarayoni"),
    ("4 yil", "oquvJarayoni"),
    ("5 yil", "oquvJarayoni"),
    ("dars vaqti", "oquvJarayoni"),
    ("darslar boshlanadi", "oquvJarayoni"),
    ("oflayn dars", "oquvJarayoni"),
    ("onlayn dars", "oquvJarayoni"),
    ("magistratura", "oquvJarayoni"),
    ("magistratura bormi", "oquvJarayoni"),
    ("diplom", "oquvJarayoni"),
    ("diplom tan olinadimi", "oquvJarayoni"),
    ("xorijda tan olinadimi", "oquvJarayoni"),
    ("davlat diplomi", "oquvJarayoni"),
    ("xalqaro sertifikat", "oquvJarayoni"),
    ("ielts", "chetTiliSertifikatiImtiyozlari"),
    ("ielts kerakmi", "chetTiliSertifikatiImtiyozlari"),
    ("sertifikat", "chetTiliSertifikatiImtiyozlari"),
    ("chet tili", "chetTiliSertifikatiImtiyozlari"),
    ("til sertifikati", "chetTiliSertifikatiImtiyozlari"),
    ("ish", "oquvJarayoni"),
    ("ish topish", "oquvJarayoni"),
    ("ish bilan ta'minlash", "oquvJarayoni"),
    ("bitiruvchilarga yordam", "oquvJarayoni"),
    ("yarim stavka", "qoshimchaMalumotlar"),
    ("karyera markazi", "oquvJarayoni"),
    ("sport", "infratuzilmaVaQulayliklar"),
    ("sport to'garaklari", "fanKlublar"),
    ("sport musobaqalari", "qoshimchaMalumotlar"),
    ("fan klublar", "fanKlublar"),
    ("faoliyat", "fanKlublar"),
    ("tadbirlar", "tadbirlar"),
    ("festival", "tadbirlar"),
    ("fakultet", "oquvJarayoni"),
    ("nechta fakultet", "oquvJarayoni"),
    ("yo'nalish", "oquvJarayoni"),
    ("yo'nalishlar soni", "oquvJarayoni"),
    ("nechta yo'nalish", "oquvJarayoni"),
    ("dars", "oquvJarayoni"),
    ("darslar", "oquvJarayoni"),
    ("necha soat", "oquvJarayoni"),
    ("necha daqiqa", "oquvJarayoni"),
    ("sessiya", "oquvJarayoni"),
    ("imtihonlar", "oquvJarayoni"),
    ("rektor", "universitetHaqida"),
    ("rektor kim", "universitetHaqida"),
    ("imtiyoz", "moliyaviyShartlar"),
    ("imtiyozlar", "moliyaviyShartlar"),
    ("chegirma", "moliyaviyShartlar"),
    ("ijtimoiy imtiyozlar", "moliyaviyShartlar"),
    ("nogironlik imtiyozi", "moliyaviyShartlar"),
    ("amaliyot", "oquvJarayoni"),
    ("amaliyot dasturlari", "oquvJarayoni"),
    ("amaliyot bazalari", "qoshimchaMalumotlar"),
    ("xalqaro", "universitetHaqida"),
    ("xalqaro almashinuv", "universitetHaqida"),
    ("chet el", "universitetHaqida"),
    ("chet ellik", "qoshimchaMalumotlar"),
    ("xorijlik", "universitetHaqida"),
    ("ko'chirish", "perevod"),
    ("perevod", "perevod"),
    ("o'qishni ko'chirish", "perevod"),
    ("kredit tan olish", "perevod"),
    ("kutubxona", "infratuzilmaVaQulayliklar"),
    ("laboratoriya", "infratuzilmaVaQulayliklar"),
    ("axborot markazi", "infratuzilmaVaQulayliklar"),
    ("ovqatlanish joylari", "infratuzilmaVaQulayliklar"),
    ("internet", "infratuzilmaVaQulayliklar"),
    ("wifi", "infratuzilmaVaQulayliklar"),
    ("litsenziya", "universitetHaqida"),
    ("akkreditatsiya", "universitetHaqida"),
    ("davlat litsenziyasi", "universitetHaqida"),
    ("yozgi maktab", "qoshimchaMalumotlar"),
    ("harbiy kafedra", "qoshimchaMalumotlar"),
    ("harbiy tayyorgarlik", "qoshimchaMalumotlar"),
    ("iqtidorli talabalar", "qoshimchaMalumotlar"),
    ("ilmiy jurnal", "qoshimchaMalumotlar"),
    ("ichki stipendiya", "grantVaStipendiyalar"),
    ("rag'batlantiruvchi grant", "grantVaStipendiyalar"),
    ("to'lov muddati", "moliyaviyShartlar"),
    ("shartnoma imzolash", "moliyaviyShartlar"),
    ("buxgalteriya bo'limi", "infratuzilmaVaQulayliklar"),
    ("dasturiy tillar", "bakalavriYonalishlari"),
];

static RUSSIAN_PROGRAMS: KeywordTable = &[
    ("банковское дело", "bankIshi"),
    ("банк", "bankIshi"),
    ("программная инженерия", "dasturiyInjiniring"),
    ("программирование", "dasturiyInjiniring"),
    ("компьютерная инженерия", "kompyuterInjiniringi"),
    ("компьютер", "kompyuterInjiniringi"),
    ("финанс", "moliyaTexnologiyalar"),
    ("экономик", "iqtisodiyot"),
    ("бухгалтер", "buxgalteriyaHisobi"),
    ("туризм", "turizm"),
    ("иностранный язык", "xorijiyTil"),
    ("английский", "xorijiyTil"),
    ("истори", "tarix"),
    ("математик", "matematika"),
    ("психолог", "psixologiya"),
    ("архитектур", "arxitektura"),
    ("начальное образование", "boshlangichTalim"),
    ("дошкольное", "maktabgachaTalim"),
    ("логистик", "logistika"),
    ("специальная педагогика", "maxsusPedagogika"),
    ("узбекский язык", "ozbekTili"),
    ("социальная работа", "ijtimoiyIsh"),
];

static RUSSIAN_GENERAL: KeywordTable = &[
    ("контракт", "kontraktNarxlari"),
    ("стоимость", "kontraktNarxlari"),
    ("сколько стоит", "kontraktNarxlari"),
    ("цена", "kontraktNarxlari"),
    ("оплат", "moliyaviyShartlar"),
    ("рассрочк", "moliyaviyShartlar"),
    ("грант", "grantVaStipendiyalar"),
    ("стипенди", "grantVaStipendiyalar"),
    ("поступлени", "qabulJarayoni"),
    ("экзамен", "qabulJarayoni"),
    ("документ", "qabulJarayoni"),
    ("адрес", "joylashuvManzili"),
    ("где находится", "joylashuvManzili"),
    ("общежити", "infratuzilmaVaQulayliklar"),
    ("телефон", "boglanishUchun"),
    ("сайт", "boglanishUchun"),
    ("контакт", "boglanishUchun"),
    ("форма обучения", "oquvJarayoni"),
    ("заочн", "oquvJarayoni"),
    ("магистратур", "oquvJarayoni"),
    ("диплом", "oquvJarayoni"),
    ("ielts", "chetTiliSertifikatiImtiyozlari"),
    ("сертификат", "chetTiliSertifikatiImtiyozlari"),
    ("работ", "oquvJarayoni"),
    ("спорт", "infratuzilmaVaQulayliklar"),
    ("клуб", "fanKlublar"),
    ("мероприяти", "tadbirlar"),
    ("факультет", "oquvJarayoni"),
    ("ректор", "universitetHaqida"),
    ("льгот", "moliyaviyShartlar"),
    ("скидк", "moliyaviyShartlar"),
    ("практик", "oquvJarayoni"),
    ("перевод", "perevod"),
    ("библиотек", "infratuzilmaVaQulayliklar"),
    ("лиценз", "universitetHaqida"),
    ("военная кафедра", "qoshimchaMalumotlar"),
];

static ENGLISH_PROGRAMS: KeywordTable = &[
    ("banking", "bankIshi"),
    ("software engineering", "dasturiyInjiniring"),
    ("programming", "dasturiyInjiniring"),
    ("computer engineering", "kompyuterInjiniringi"),
    ("computer", "kompyuterInjiniringi"),
    ("finance", "moliyaTexnologiyalar"),
    ("economics", "iqtisodiyot"),
    ("accounting", "buxgalteriyaHisobi"),
    ("tourism", "turizm"),
    ("foreign language", "xorijiyTil"),
    ("history", "tarix"),
    ("mathematics", "matematika"),
    ("math", "matematika"),
    ("psychology", "psixologiya"),
    ("architecture", "arxitektura"),
    ("primary education", "boshlangichTalim"),
    ("preschool", "maktabgachaTalim"),
    ("logistics", "logistika"),
    ("special pedagogy", "maxsusPedagogika"),
    ("uzbek language", "ozbekTili"),
    ("social work", "ijtimoiyIsh"),
];

static ENGLISH_GENERAL: KeywordTable = &[
    ("tuition", "kontraktNarxlari"),
    ("contract price", "kontraktNarxlari"),
    ("price", "kontraktNarxlari"),
    ("cost", "kontraktNarxlari"),
    ("payment", "moliyaviyShartlar"),
    ("installment", "moliyaviyShartlar"),
    ("grant", "grantVaStipendiyalar"),
    ("scholarship", "grantVaStipendiyalar"),
    ("admission", "qabulJarayoni"),
    ("exam", "qabulJarayoni"),
    ("documents", "qabulJarayoni"),
    ("address", "joylashuvManzili"),
    ("location", "joylashuvManzili"),
    ("dormitory", "infratuzilmaVaQulayliklar"),
    ("phone", "boglanishUchun"),
    ("website", "boglanishUchun"),
    ("contact", "boglanishUchun"),
    ("part-time", "oquvJarayoni"),
    ("master", "oquvJarayoni"),
    ("diploma", "oquvJarayoni"),
    ("ielts", "chetTiliSertifikatiImtiyozlari"),
    ("certificate", "chetTiliSertifikatiImtiyozlari"),
    ("job", "oquvJarayoni"),
    ("career", "oquvJarayoni"),
    ("sport", "infratuzilmaVaQulayliklar"),
    ("club", "fanKlublar"),
    ("event", "tadbirlar"),
    ("faculty", "oquvJarayoni"),
    ("rector", "universitetHaqida"),
    ("discount", "moliyaviyShartlar"),
    ("internship", "oquvJarayoni"),
    ("transfer", "perevod"),
    ("library", "infratuzilmaVaQulayliklar"),
    ("license", "universitetHaqida"),
    ("military", "qoshimchaMalumotlar"),
];

/// Keyword tables for `language`, in search order.
fn tables(language: Language) -> [KeywordTable; 2] {
    match language {
        Language::Uzbek => [UZBEK_PROGRAMS, UZBEK_GENERAL],
        Language::Russian => [RUSSIAN_PROGRAMS, RUSSIAN_GENERAL],
        Language::English => [ENGLISH_PROGRAMS, ENGLISH_GENERAL],
    }
}

/// Find the topic a question is about, if any keyword occurs in it.
pub fn match_topic(text: &str, language: Language) -> Option<TopicId> {
    let normalized = text.trim().to_lowercase();
    tables(language)
        .into_iter()
        .flat_map(|table| table.iter())
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|&(_, topic)| topic)
}
