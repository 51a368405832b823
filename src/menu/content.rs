//! Menu content of the Salamat Mukashev Polytechnic College.
//!
//! Texts are kept verbatim in Russian and Kazakh. The two program listings are
//! independent screens, one per language of study.

use super::catalog::{Catalog, CatalogError};
use super::screen::{ListingOrder, Screen};
use reqwest::Url;

// ─────────────────────────────────────────────────────────────────────────────
// Screen keys (also used as callback data)
// ─────────────────────────────────────────────────────────────────────────────

/// Root menu
pub const MAIN_MENU: &str = "main_menu";
/// Language of study selection
pub const SPEC_CHOICE: &str = "spec_choice";
/// Programs taught in Russian
pub const SPEC_RU: &str = "spec_ru";
/// Programs taught in Kazakh
pub const SPEC_KZ: &str = "spec_kz";
/// Phone numbers
pub const CONTACT: &str = "contact";
/// Street address and map links
pub const ADDRESS: &str = "address";
/// Staff listing
pub const TEACHERS: &str = "teachers";

// ─────────────────────────────────────────────────────────────────────────────
// Static texts
// ─────────────────────────────────────────────────────────────────────────────

const GREETING: &str = "Здравствуйте! 👋\n\
Добро пожаловать в бот Политехнического колледжа им. Саламата Мукашева 🎓";

const MAIN_MENU_TEXT: &str = "Выберите нужный раздел 👇";
const SPEC_CHOICE_TEXT: &str = "Выберите язык обучения 👇";

const CONTACT_TEXT: &str = "📞 Контактные телефоны:\n\n\
Приемная: +7 7122 365626\n\
Приемная комиссия: +7 7122 366299";

const ADDRESS_TEXT: &str = "📍 г. Атырау, ул. Габбаса Бергалиева, 45\n\n\
Выберите удобный сервис для навигации 👇";

const SPECIALTIES_URL: &str = "https://politcol.kz/applicants/specialties/";
const APPLICATION_GUIDE_URL: &str = "https://youtu.be/837NCFc5q4M?si=IpAS7XMaEpiXbRnU";
const SITE_URL: &str = "https://politcol.kz/";
const TWO_GIS_URL: &str = "https://2gis.kz/atyrau/geo/70000001034595909/51.940179,47.134895";
const GOOGLE_MAPS_URL: &str = "https://www.google.com/maps/search/?api=1&query=47.134895,51.940179";

const BACK_TO_MENU: &str = "⬅️ Назад в меню";
const BACK_TO_LANGUAGE: &str = "⬅️ Назад к выбору языка";

/// Programs of study for 2025–2026: (classifier code, Russian title, Kazakh title).
pub const PROGRAMS: &[(&str, &str, &str)] = &[
    ("04110100", "Учет и аудит", "Есеп және аудит"),
    ("04120100", "Банковское и страховое дело", "Банктік және сақтандыру ісі"),
    (
        "05320200",
        "Технология и техника разведки месторождений полезных ископаемых",
        "Пайдалы қазбалар кен орындарын барлау технологиясы",
    ),
    (
        "06120100",
        "Вычислительная техника и информационные сети (по видам)",
        "Есептеу техникасы және ақпараттық желілер",
    ),
    ("06120200", "Системы информационной безопасности", "Ақпараттық қауіпсіздік жүйелері"),
    ("06130100", "Программное обеспечение (по видам)", "Бағдарламалық қамтамасыз ету"),
    (
        "07110100",
        "Химическая технология и производство (по видам)",
        "Химиялық технология және өндіріс",
    ),
    ("07110400", "Лабораторная технология", "Зертханалық технология"),
    (
        "07110500",
        "Технология переработки нефти и газа",
        "Мұнай мен газды қайта өңдеу технологиясы",
    ),
    ("07130200", "Электроснабжение (по отраслям)", "Электрмен жабдықтау"),
    (
        "07130700",
        "Техническое обслуживание, ремонт и эксплуатация электромеханического оборудования",
        "Электромеханикалық жабдықтарға техникалық қызмет көрсету",
    ),
    (
        "07140100",
        "Автоматизация и управление технологическими процессами",
        "Автоматтандыру және басқару",
    ),
    ("07140200", "Мехатроника (по отраслям)", "Мехатроника"),
    (
        "07140900",
        "Радиоэлектроника, электроника и телекоммуникации",
        "Радиоэлектроника және телекоммуникация",
    ),
    ("07150500", "Сварочное дело (по видам)", "Дәнекерлеу ісі"),
    ("07150600", "Слесарное дело (по отраслям и видам)", "Слесарлық іс"),
    (
        "07151100",
        "Эксплуатация и техническое обслуживание машин и оборудования",
        "Машиналар мен жабдықтарды пайдалану және қызмет көрсету",
    ),
    ("07220700", "Технология полимерного производства", "Полимер өндірісінің технологиясы"),
    (
        "07240700",
        "Бурение нефтяных и газовых скважин",
        "Мұнай және газ ұңғымаларын бұрғылау",
    ),
    (
        "07240900",
        "Эксплуатация нефтяных и газовых месторождений",
        "Мұнай және газ кен орындарын пайдалану",
    ),
    (
        "07320600",
        "Монтаж магистральных локальных и сетевых трубопроводов",
        "Құбыр желілерін монтаждау",
    ),
    (
        "10320200",
        "Защита в чрезвычайных ситуациях (по профилю)",
        "Төтенше жағдайларда қорғау",
    ),
    (
        "10410200",
        "Организация перевозок и управление движением на железнодорожном транспорте",
        "Теміржол көлігінде тасымалдауды ұйымдастыру",
    ),
];

/// Teaching staff, in authoring order. The screen sorts them.
pub const STAFF: &[&str] = &[
    "Абилхан А.С.",
    "Ербатырова М.Т.",
    "Ғалымжан Д.Ж.",
    "Жумагалиева Э.А.",
    "Нәсіпбаева А.Н.",
    "Саханова Б.А.",
    "Сариева А.С.",
];

/// Program listing language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Russian track
    Russian,
    /// Kazakh track
    Kazakh,
}

impl Language {
    const fn heading(self) -> &'static str {
        match self {
            Self::Russian => "📘 Специальности (2025–2026)",
            Self::Kazakh => "📗 Мамандылықтар (2025–2026)",
        }
    }

    const fn more_info(self) -> &'static str {
        match self {
            Self::Russian => "Подробнее:",
            Self::Kazakh => "Толық ақпарат:",
        }
    }
}

/// Build the college catalog.
///
/// # Errors
///
/// Returns a [`CatalogError`] if a link cannot be parsed or the transition
/// table is not closed.
pub fn college_catalog() -> Result<Catalog, CatalogError> {
    Catalog::builder(MAIN_MENU)
        .greeting(GREETING)
        .screen(main_menu()?)
        .screen(
            Screen::new(SPEC_CHOICE, SPEC_CHOICE_TEXT)
                .navigate("🇷🇺 Русский язык", SPEC_RU)
                .navigate("🇰🇿 Қазақ тілі", SPEC_KZ)
                .navigate("⬅️ Назад", MAIN_MENU),
        )
        .screen(programs_screen(SPEC_RU, Language::Russian))
        .screen(programs_screen(SPEC_KZ, Language::Kazakh))
        .screen(Screen::new(CONTACT, CONTACT_TEXT).navigate(BACK_TO_MENU, MAIN_MENU))
        .screen(
            Screen::new(ADDRESS, ADDRESS_TEXT)
                .link("🗺 Открыть в 2GIS", parse_link(TWO_GIS_URL)?)
                .link("🗺 Открыть в Google Maps", parse_link(GOOGLE_MAPS_URL)?)
                .navigate(BACK_TO_MENU, MAIN_MENU),
        )
        .screen(staff_screen(STAFF))
        .build()
}

fn main_menu() -> Result<Screen, CatalogError> {
    Ok(Screen::new(MAIN_MENU, MAIN_MENU_TEXT)
        .navigate("📚 Специальности/Мамандықтар", SPEC_CHOICE)
        .navigate("👩‍🏫 Преподаватели/Мұғалімдер", TEACHERS)
        .link(
            "📝 Как оставить заявку/Заявканы қалдыру",
            parse_link(APPLICATION_GUIDE_URL)?,
        )
        .link("🌐 Сайт", parse_link(SITE_URL)?)
        .navigate("📞 Контакты", CONTACT)
        .navigate("📍 Адрес", ADDRESS))
}

/// Program listing for one language of study.
#[must_use]
pub fn programs_screen(key: &str, language: Language) -> Screen {
    let entries: Vec<String> = PROGRAMS
        .iter()
        .map(|(code, ru, kz)| {
            let title = match language {
                Language::Russian => ru,
                Language::Kazakh => kz,
            };
            format!("{code} — {title}")
        })
        .collect();
    let footer = format!("{} {SPECIALTIES_URL}", language.more_info());

    Screen::listing(
        key,
        language.heading(),
        &entries,
        Some(&footer),
        ListingOrder::AsGiven,
    )
    .navigate(BACK_TO_LANGUAGE, SPEC_CHOICE)
}

/// Staff listing, sorted regardless of the order `names` come in.
#[must_use]
pub fn staff_screen<S: AsRef<str>>(names: &[S]) -> Screen {
    Screen::listing(
        TEACHERS,
        "👩‍🏫 Преподаватели колледжа:",
        names,
        None,
        ListingOrder::Sorted,
    )
    .navigate(BACK_TO_MENU, MAIN_MENU)
}

fn parse_link(raw: &str) -> Result<Url, CatalogError> {
    Url::parse(raw).map_err(|e| CatalogError::InvalidLink {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
