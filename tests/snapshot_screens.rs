use insta::assert_snapshot;
use politcol_bot::menu::content::college_catalog;
use politcol_bot::menu::{Catalog, RenderAction, Router, ENTRY_ACTION};

fn catalog() -> Catalog {
    college_catalog().expect("college catalog must be valid")
}

fn screen_text(key: &str) -> String {
    catalog()
        .resolve(key)
        .map(|screen| screen.text().to_owned())
        .unwrap_or_default()
}

#[test]
fn test_teachers_snapshot() {
    assert_snapshot!(screen_text("teachers"), @r"
    👩‍🏫 Преподаватели колледжа:

    Абилхан А.С.
    Ербатырова М.Т.
    Жумагалиева Э.А.
    Нәсіпбаева А.Н.
    Сариева А.С.
    Саханова Б.А.
    Ғалымжан Д.Ж.
    ");
}

#[test]
fn test_contact_snapshot() {
    assert_snapshot!(screen_text("contact"), @r"
    📞 Контактные телефоны:

    Приемная: +7 7122 365626
    Приемная комиссия: +7 7122 366299
    ");
}

#[test]
fn test_entry_snapshot() {
    let router = Router::new(catalog());
    let body = match router.handle(ENTRY_ACTION, ()).action {
        RenderAction::Replace { body, .. } => body.into_owned(),
        RenderAction::Unchanged => String::new(),
    };
    assert_snapshot!(body, @r"
    Здравствуйте! 👋
    Добро пожаловать в бот Политехнического колледжа им. Саламата Мукашева 🎓

    Выберите нужный раздел 👇
    ");
}
