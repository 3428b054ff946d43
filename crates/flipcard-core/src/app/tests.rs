use alloc::{format, vec::Vec};

use rand::{SeedableRng, rngs::SmallRng};

use super::*;
use crate::{
    input::MockTouch,
    layout::{Rect, center_of},
    storage::{self, MemoryStore},
};

const CONFIG: &str = r#"{
  "languages": {
    "default": "chinese",
    "supported": {
      "english": {"enabled": true, "english_name": "English"},
      "german": {"enabled": false, "english_name": "German"},
      "chinese": {"enabled": true, "english_name": "Chinese"},
      "spanish": {"enabled": true, "english_name": "Spanish"}
    }
  }
}"#;

/// 16 cards: "a" x10 and "b" x6, interleaved. "b" sits at 1, 4, 7, 10, 12, 14.
const SIXTEEN: [&str; 16] = [
    "a", "b", "a", "a", "b", "a", "a", "b", "a", "a", "b", "a", "b", "a", "b", "a",
];

struct ScriptedTouch {
    presses: Vec<TouchPoint>,
    cursor: usize,
}

impl ScriptedTouch {
    fn empty() -> Self {
        Self {
            presses: Vec::new(),
            cursor: 0,
        }
    }
}

impl TouchProvider for ScriptedTouch {
    type Error = ();

    fn poll_press(&mut self) -> Result<Option<TouchPoint>, Self::Error> {
        let Some(point) = self.presses.get(self.cursor).copied() else {
            return Ok(None);
        };
        self.cursor += 1;
        Ok(Some(point))
    }
}

type TestApp = FlipcardApp<MemoryStore, ScriptedTouch, SmallRng>;

fn index_json(categories: &[&str]) -> String {
    let cards: Vec<String> = categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            format!(
                r#"{{"id": "c{i}", "folder": "C{i}", "category": "{category}", "title": "Card {i}", "thumbnail": "THUMB.PNG"}}"#
            )
        })
        .collect();
    format!(
        r#"{{
  "metadata": {{"total_cards": {}}},
  "categories": {{"a": {{"name": "Animals"}}, "b": {{"name": "Birds"}}, "c": {{"name": "Empty"}}}},
  "cards": [{}]
}}"#,
        categories.len(),
        cards.join(",")
    )
}

fn card_json(i: usize) -> String {
    format!(
        r#"{{"title": "Card {i}", "main_image": "MAIN.PNG", "languages": {{
  "english": {{"big_file": "EN_B.PNG", "small_file": "EN_S.PNG"}},
  "chinese": {{"big_file": "ZH_B.PNG", "small_file": "ZH_S.PNG"}}
}}}}"#
    )
}

fn store_with(categories: &[&str]) -> MemoryStore {
    let mut store = MemoryStore::new()
        .with_file(storage::INDEX_PATH, index_json(categories).as_bytes())
        .with_file(storage::CONFIG_PATH, CONFIG.as_bytes());
    for i in 0..categories.len() {
        store.insert(&storage::card_path(&format!("C{i}")), card_json(i).as_bytes());
    }
    store
}

fn app_with(categories: &[&str]) -> TestApp {
    FlipcardApp::new(
        store_with(categories),
        ScriptedTouch::empty(),
        SmallRng::seed_from_u64(42),
        AppConfig::default(),
        0,
    )
    .unwrap()
}

fn select(app: &mut TestApp, category: &str) {
    app.apply(Action::Category(CategoryAction::Select(String::from(category))));
}

fn open_grid(app: &mut TestApp, category: &str) {
    app.apply(Action::Menu(MenuAction::Categories));
    select(app, category);
    assert_eq!(app.mode(), Mode::Grid);
}

fn tap(app: &TestApp, rect: Rect) -> Option<Action> {
    let (x, y) = center_of(rect);
    app.classify(TouchPoint::new(x, y))
}

#[test]
fn boots_into_menu_with_default_language() {
    let app = app_with(&SIXTEEN);

    assert_eq!(app.mode(), Mode::Menu);
    assert_eq!(app.catalog().total(), 16);
    assert_eq!(app.navigation().language_index, 1);
    assert_eq!(app.navigation().total_grid_pages, 2);
}

#[test]
fn missing_index_fails_boot() {
    let store = MemoryStore::new().with_file(storage::CONFIG_PATH, CONFIG.as_bytes());
    let result = FlipcardApp::new(
        store,
        ScriptedTouch::empty(),
        SmallRng::seed_from_u64(1),
        AppConfig::default(),
        0,
    );

    assert!(matches!(result, Err(err) if err.document == DocumentKind::Index));
}

#[test]
fn sixteen_cards_split_into_category_pages() {
    let mut app = app_with(&SIXTEEN);
    open_grid(&mut app, "a");

    assert_eq!(app.navigation().total_grid_pages, 1);
    let mut slot_count = 0;
    app.with_screen(|screen| {
        if let Screen::Grid { slots, category, .. } = screen {
            slot_count = slots.len();
            assert_eq!(category, "Animals");
        }
    });
    assert_eq!(slot_count, 10);

    app.apply(Action::Grid(GridAction::Home));
    select(&mut app, "b");
    assert_eq!(app.navigation().total_grid_pages, 1);
    assert_eq!(app.navigation().selected_category.as_deref(), Some("b"));
}

#[test]
fn grid_pages_wrap_and_single_page_arrows_do_nothing() {
    let mut app = app_with(&["a"; 20]);
    open_grid(&mut app, "a");
    assert_eq!(app.navigation().total_grid_pages, 2);

    app.apply(Action::Grid(GridAction::PreviousPage));
    assert_eq!(app.navigation().grid_page, 1);
    app.apply(Action::Grid(GridAction::NextPage));
    assert_eq!(app.navigation().grid_page, 0);

    let mut app = app_with(&SIXTEEN);
    open_grid(&mut app, "b");
    app.apply(Action::Grid(GridAction::NextPage));
    assert_eq!(app.navigation().grid_page, 0);
}

#[test]
fn thumbnail_resolves_through_the_filter() {
    let mut app = app_with(&SIXTEEN);
    open_grid(&mut app, "b");

    app.apply(Action::Grid(GridAction::Thumbnail(2)));
    assert_eq!(app.mode(), Mode::Flipcard);
    assert_eq!(app.navigation().current_card, 7);
    assert_eq!(app.current_detail().unwrap().title, "Card 7");
}

#[test]
fn empty_grid_slot_is_ignored() {
    let mut app = app_with(&SIXTEEN);
    open_grid(&mut app, "b");

    app.apply(Action::Grid(GridAction::Thumbnail(6)));
    assert_eq!(app.mode(), Mode::Grid);
}

#[test]
fn last_card_of_category_wraps_to_first() {
    let mut app = app_with(&SIXTEEN);
    open_grid(&mut app, "a");

    app.apply(Action::Grid(GridAction::Thumbnail(9)));
    assert_eq!(app.navigation().current_card, 15);

    app.apply(Action::Flipcard(FlipcardAction::Next));
    assert_eq!(app.navigation().current_card, 0);

    app.apply(Action::Flipcard(FlipcardAction::Previous));
    assert_eq!(app.navigation().current_card, 15);

    app.apply(Action::Flipcard(FlipcardAction::Previous));
    assert_eq!(app.navigation().current_card, 13);
}

#[test]
fn stepping_stays_inside_the_filter() {
    let mut app = app_with(&SIXTEEN);
    open_grid(&mut app, "b");
    app.apply(Action::Grid(GridAction::Thumbnail(0)));

    let mut seen = Vec::new();
    for _ in 0..6 {
        app.apply(Action::Flipcard(FlipcardAction::Next));
        seen.push(app.navigation().current_card);
    }
    assert_eq!(seen, [4, 7, 10, 12, 14, 1]);
}

#[test]
fn language_cycles_over_enabled_languages_and_resets_on_card_change() {
    let mut app = app_with(&SIXTEEN);
    open_grid(&mut app, "a");
    app.apply(Action::Grid(GridAction::Thumbnail(0)));
    assert_eq!(app.navigation().language_index, 1);

    let mut keys = Vec::new();
    for _ in 0..3 {
        app.apply(Action::Flipcard(FlipcardAction::CycleLanguage));
        let key = app.languages().key_at(app.navigation().language_index).unwrap();
        keys.push(String::from(key));
    }
    assert_eq!(keys, ["spanish", "english", "chinese"]);

    app.apply(Action::Flipcard(FlipcardAction::CycleLanguage));
    app.apply(Action::Flipcard(FlipcardAction::Next));
    assert_eq!(app.navigation().language_index, 1);
}

#[test]
fn flipcard_screen_shows_faces_for_active_language() {
    let mut app = app_with(&SIXTEEN);
    open_grid(&mut app, "a");
    app.apply(Action::Grid(GridAction::Thumbnail(1)));

    let mut seen = None;
    app.with_screen(|screen| {
        if let Screen::Flipcard {
            title,
            face,
            position,
            count,
            ..
        } = screen
        {
            seen = Some((
                String::from(title),
                String::from(face.big_file),
                position,
                count,
            ));
        }
    });
    assert_eq!(
        seen,
        Some((String::from("Card 2"), String::from("ZH_B.PNG"), 2, 10))
    );
}

#[test]
fn flipcard_home_returns_to_first_grid_page() {
    let mut app = app_with(&["a"; 20]);
    open_grid(&mut app, "a");
    app.apply(Action::Grid(GridAction::NextPage));
    app.apply(Action::Grid(GridAction::Thumbnail(0)));
    assert_eq!(app.navigation().current_card, 15);

    app.apply(Action::Flipcard(FlipcardAction::Home));
    assert_eq!(app.mode(), Mode::Grid);
    assert_eq!(app.navigation().grid_page, 0);
    assert_eq!(app.navigation().selected_category.as_deref(), Some("a"));
}

#[test]
fn random_mode_never_repeats_the_current_card() {
    let mut app = app_with(&SIXTEEN);
    app.apply(Action::Menu(MenuAction::Random));
    select(&mut app, "b");

    assert_eq!(app.mode(), Mode::Flipcard);
    let first = app.navigation().current_card;
    assert_eq!(app.catalog().card(first).unwrap().category, "b");
    assert_eq!(
        app.navigation().last_random_card_id.as_deref(),
        Some(app.catalog().card(first).unwrap().id.as_str())
    );

    let mut previous = first;
    for _ in 0..20 {
        app.apply(Action::Flipcard(FlipcardAction::Next));
        let current = app.navigation().current_card;
        assert_ne!(current, previous);
        assert_eq!(app.catalog().card(current).unwrap().category, "b");
        previous = current;
    }

    app.apply(Action::Flipcard(FlipcardAction::Home));
    assert_eq!(app.mode(), Mode::Category);
    assert!(app.navigation().random_mode);
}

#[test]
fn random_mode_with_empty_category_is_a_no_op() {
    let mut app = app_with(&SIXTEEN);
    app.apply(Action::Menu(MenuAction::Random));
    select(&mut app, "c");

    assert_eq!(app.mode(), Mode::Category);
    assert_eq!(app.navigation().selected_category, None);
}

#[test]
fn single_card_random_category_keeps_that_card() {
    let mut app = app_with(&["a", "b", "a"]);
    app.apply(Action::Menu(MenuAction::Random));
    select(&mut app, "b");
    assert_eq!(app.navigation().current_card, 1);

    app.apply(Action::Flipcard(FlipcardAction::Next));
    assert_eq!(app.navigation().current_card, 1);
}

#[test]
fn missing_card_descriptor_keeps_the_grid() {
    let mut store = store_with(&SIXTEEN);
    store.remove(&storage::card_path("C1"));
    let mut app = FlipcardApp::new(
        store,
        ScriptedTouch::empty(),
        SmallRng::seed_from_u64(3),
        AppConfig::default(),
        0,
    )
    .unwrap();
    open_grid(&mut app, "b");

    app.apply(Action::Grid(GridAction::Thumbnail(0)));
    assert_eq!(app.mode(), Mode::Grid);
    assert!(app.current_detail().is_none());
}

#[test]
fn saving_a_language_updates_default_and_returns_to_options() {
    let mut app = app_with(&SIXTEEN);
    app.apply(Action::Menu(MenuAction::Options));
    app.apply(Action::Option(OptionAction::LanguageSettings));
    assert_eq!(app.mode(), Mode::LanguageSelection);

    app.apply(Action::LanguageSelection(LanguageAction::Choose(
        String::from("spanish"),
    )));

    assert_eq!(app.mode(), Mode::Option);
    assert_eq!(app.languages().default_key(), "spanish");
    assert_eq!(app.navigation().language_index, 2);
    let saved = app.store.get(storage::CONFIG_PATH).unwrap();
    assert!(core::str::from_utf8(saved).unwrap().contains(r#""default":"spanish""#));
}

#[test]
fn failed_save_stays_in_language_selection() {
    let mut app = app_with(&SIXTEEN);
    app.apply(Action::Menu(MenuAction::Options));
    app.apply(Action::Option(OptionAction::LanguageSettings));
    app.store.set_fail_writes(true);

    app.apply(Action::LanguageSelection(LanguageAction::Choose(
        String::from("english"),
    )));

    assert_eq!(app.mode(), Mode::LanguageSelection);
    assert_eq!(app.languages().default_key(), "chinese");
    let mut notice = None;
    app.with_screen(|screen| {
        if let Screen::LanguageSelection { notice: shown, .. } = screen {
            notice = shown.map(String::from);
        }
    });
    assert_eq!(notice.as_deref(), Some(SAVE_FAILED_NOTICE));

    app.store.set_fail_writes(false);
    app.apply(Action::LanguageSelection(LanguageAction::Choose(
        String::from("english"),
    )));
    assert_eq!(app.mode(), Mode::Option);
    assert_eq!(app.languages().default_key(), "english");
}

#[test]
fn language_rows_mark_the_default() {
    let mut app = app_with(&SIXTEEN);
    app.apply(Action::Menu(MenuAction::Options));
    app.apply(Action::Option(OptionAction::LanguageSettings));

    let mut marks = Vec::new();
    app.with_screen(|screen| {
        if let Screen::LanguageSelection { rows, .. } = screen {
            marks = rows.iter().map(|row| (String::from(row.key), row.is_default)).collect();
        }
    });
    assert_eq!(
        marks,
        [
            (String::from("english"), false),
            (String::from("chinese"), true),
            (String::from("spanish"), false),
        ]
    );
}

#[test]
fn actions_for_other_screens_are_ignored() {
    let mut app = app_with(&SIXTEEN);

    app.apply(Action::Flipcard(FlipcardAction::Next));
    app.apply(Action::Grid(GridAction::Thumbnail(0)));
    assert_eq!(app.mode(), Mode::Menu);
    assert_eq!(app.navigation(), &NavigationState {
        language_index: 1,
        total_grid_pages: 2,
        ..NavigationState::new()
    });
}

#[test]
fn touches_classify_against_the_current_screen() {
    let mut app = app_with(&SIXTEEN);

    assert_eq!(
        tap(&app, layout::MENU_CATEGORIES),
        Some(Action::Menu(MenuAction::Categories))
    );
    app.apply(Action::Menu(MenuAction::Categories));

    assert_eq!(
        tap(&app, layout::category_slot(1)),
        Some(Action::Category(CategoryAction::Select(String::from("b"))))
    );
    assert_eq!(tap(&app, layout::category_slot(5)), None);
    assert_eq!(
        tap(&app, layout::NAV_HOME),
        Some(Action::Category(CategoryAction::Home))
    );

    select(&mut app, "a");
    assert_eq!(
        tap(&app, layout::grid_slot(4)),
        Some(Action::Grid(GridAction::Thumbnail(4)))
    );
    app.apply(Action::Grid(GridAction::Thumbnail(4)));
    assert_eq!(
        tap(&app, layout::FLIP_SMALL_FACE),
        Some(Action::Flipcard(FlipcardAction::CycleLanguage))
    );
    assert_eq!(
        tap(&app, layout::NAV_NEXT),
        Some(Action::Flipcard(FlipcardAction::Next))
    );
}

#[test]
fn tick_handles_one_press_and_requests_render() {
    let store = store_with(&SIXTEEN);
    let (x, y) = center_of(layout::MENU_OPTIONS);
    let (hx, hy) = center_of(layout::NAV_HOME);
    let input = ScriptedTouch {
        presses: alloc::vec![TouchPoint::new(x, y), TouchPoint::new(hx, hy)],
        cursor: 0,
    };
    let mut app =
        FlipcardApp::new(store, input, SmallRng::seed_from_u64(9), AppConfig::default(), 0).unwrap();

    assert_eq!(app.tick(10), TickResult::RenderRequested);
    assert_eq!(app.mode(), Mode::Option);
    assert_eq!(app.tick(20), TickResult::RenderRequested);
    assert_eq!(app.mode(), Mode::Menu);
    assert_eq!(app.tick(30), TickResult::NoRender);
}

#[test]
fn untouched_app_renders_menu_then_sleeps() {
    let config = AppConfig::new().with_idle_timeout_ms(1_000);
    let mut app = FlipcardApp::new(
        store_with(&SIXTEEN),
        MockTouch::new(),
        SmallRng::seed_from_u64(3),
        config,
        0,
    )
    .unwrap();

    assert_eq!(app.tick(50), TickResult::RenderRequested);
    let mut menu = false;
    app.with_screen(|screen| menu = matches!(screen, Screen::Menu { .. }));
    assert!(menu);
    assert_eq!(app.tick(100), TickResult::NoRender);
    assert_eq!(app.tick(1_000), TickResult::NoRender);
    assert_eq!(app.tick(1_001), TickResult::SleepRequested);
}

#[test]
fn idle_timeout_locks_once() {
    let store = store_with(&SIXTEEN);
    let (x, y) = center_of(layout::MENU_OPTIONS);
    let input = ScriptedTouch {
        presses: alloc::vec![TouchPoint::new(x, y)],
        cursor: 0,
    };
    let config = AppConfig::new().with_idle_timeout_ms(1_000);
    let mut app = FlipcardApp::new(store, input, SmallRng::seed_from_u64(9), config, 0).unwrap();

    assert_eq!(app.tick(500), TickResult::RenderRequested);
    assert_eq!(app.tick(1_200), TickResult::NoRender);
    assert_eq!(app.tick(1_500), TickResult::NoRender);
    assert_eq!(app.tick(1_501), TickResult::SleepRequested);
    assert!(app.is_locked());

    let mut locked = false;
    app.with_screen(|screen| locked = screen == Screen::Lock);
    assert!(locked);
    assert_eq!(app.tick(9_000), TickResult::NoRender);
}

#[test]
fn catalog_reload_moves_to_first_card_of_filter() {
    let mut app = app_with(&SIXTEEN);
    open_grid(&mut app, "a");
    app.apply(Action::Grid(GridAction::Thumbnail(9)));
    assert_eq!(app.navigation().current_card, 15);

    app.store
        .insert(storage::INDEX_PATH, index_json(&["b", "a", "a"]).as_bytes());
    app.reload_catalog().unwrap();

    assert_eq!(app.mode(), Mode::Flipcard);
    assert_eq!(app.navigation().current_card, 1);
    assert_eq!(app.current_detail().unwrap().title, "Card 1");
}

#[test]
fn catalog_reload_with_empty_filter_falls_back() {
    let mut app = app_with(&SIXTEEN);
    open_grid(&mut app, "b");
    app.apply(Action::Grid(GridAction::Thumbnail(0)));

    app.store
        .insert(storage::INDEX_PATH, index_json(&["a", "a"]).as_bytes());
    app.reload_catalog().unwrap();
    assert_eq!(app.mode(), Mode::Grid);
    assert_eq!(app.navigation().total_grid_pages, 1);

    let mut app = app_with(&SIXTEEN);
    app.apply(Action::Menu(MenuAction::Random));
    select(&mut app, "b");
    app.store
        .insert(storage::INDEX_PATH, index_json(&["a"]).as_bytes());
    app.reload_catalog().unwrap();
    assert_eq!(app.mode(), Mode::Category);
}

#[test]
fn failed_reload_leaves_state_untouched() {
    let mut app = app_with(&SIXTEEN);
    open_grid(&mut app, "a");
    app.apply(Action::Grid(GridAction::Thumbnail(3)));
    let before = app.navigation().clone();

    app.store.insert(storage::INDEX_PATH, b"{not json");
    assert!(app.reload_catalog().is_err());
    assert_eq!(app.navigation(), &before);
    assert_eq!(app.catalog().total(), 16);
}

#[test]
fn category_home_returns_to_menu_and_clears_random_mode() {
    let mut app = app_with(&SIXTEEN);
    app.apply(Action::Menu(MenuAction::Random));
    assert!(app.navigation().random_mode);

    app.apply(Action::Category(CategoryAction::Home));
    assert_eq!(app.mode(), Mode::Menu);
    assert!(!app.navigation().random_mode);
    assert_eq!(app.navigation().selected_category, None);
}

#[test]
fn grid_home_clears_the_selected_category() {
    let mut app = app_with(&SIXTEEN);
    open_grid(&mut app, "b");
    assert_eq!(app.navigation().selected_category.as_deref(), Some("b"));

    app.apply(Action::Grid(GridAction::Home));
    assert_eq!(app.mode(), Mode::Category);
    assert_eq!(app.navigation().selected_category, None);
    assert!(!app.navigation().random_mode);
}

#[test]
fn menu_random_forgets_the_last_random_card() {
    let mut app = app_with(&SIXTEEN);
    app.apply(Action::Menu(MenuAction::Random));
    select(&mut app, "a");
    assert!(app.navigation().last_random_card_id.is_some());

    app.apply(Action::Flipcard(FlipcardAction::Home));
    app.apply(Action::Category(CategoryAction::Home));
    app.apply(Action::Menu(MenuAction::Random));
    assert_eq!(app.mode(), Mode::Category);
    assert_eq!(app.navigation().last_random_card_id, None);
    assert_eq!(app.navigation().selected_category, None);
}

#[test]
fn language_home_returns_to_options() {
    let mut app = app_with(&SIXTEEN);
    app.apply(Action::Menu(MenuAction::Options));
    app.apply(Action::Option(OptionAction::LanguageSettings));
    assert_eq!(
        tap(&app, layout::NAV_HOME),
        Some(Action::LanguageSelection(LanguageAction::Home))
    );

    app.apply(Action::LanguageSelection(LanguageAction::Home));
    assert_eq!(app.mode(), Mode::Option);
    assert_eq!(app.languages().default_key(), "chinese");
}

#[test]
fn cycling_with_one_enabled_language_changes_nothing() {
    let mut store = store_with(&SIXTEEN);
    store.insert(
        storage::CONFIG_PATH,
        br#"{"languages": {"default": "english", "supported": {
            "english": {"enabled": true},
            "chinese": {"enabled": false}
        }}}"#,
    );
    let mut app = FlipcardApp::new(
        store,
        ScriptedTouch::empty(),
        SmallRng::seed_from_u64(5),
        AppConfig::default(),
        0,
    )
    .unwrap();
    open_grid(&mut app, "a");
    app.apply(Action::Grid(GridAction::Thumbnail(0)));
    assert_eq!(app.tick(1), TickResult::RenderRequested);

    app.apply(Action::Flipcard(FlipcardAction::CycleLanguage));
    assert_eq!(app.navigation().language_index, 0);
    assert_eq!(app.tick(2), TickResult::NoRender);
}

#[test]
fn disabled_language_cannot_be_saved() {
    let mut app = app_with(&SIXTEEN);
    app.apply(Action::Menu(MenuAction::Options));
    app.apply(Action::Option(OptionAction::LanguageSettings));

    app.apply(Action::LanguageSelection(LanguageAction::Choose(
        String::from("german"),
    )));
    assert_eq!(app.mode(), Mode::LanguageSelection);
    assert_eq!(app.languages().default_key(), "chinese");
    let saved = app.store.get(storage::CONFIG_PATH).unwrap();
    assert_eq!(saved, CONFIG.as_bytes());
}

const SIX_LANGUAGES: &str = r#"{"languages": {"default": "l0", "supported": {
  "l0": {"enabled": true}, "l1": {"enabled": true}, "l2": {"enabled": true},
  "l3": {"enabled": true}, "l4": {"enabled": true}, "l5": {"enabled": true}
}}}"#;

fn shown_language_keys(app: &TestApp) -> Vec<String> {
    let mut keys = Vec::new();
    for row in 0..layout::LANGUAGE_ROWS {
        if let Some(Action::LanguageSelection(LanguageAction::Choose(key))) =
            tap(app, layout::language_row(row))
        {
            keys.push(key);
        }
    }
    keys
}

#[test]
fn every_enabled_language_is_reachable_across_pages() {
    let mut store = store_with(&SIXTEEN);
    store.insert(storage::CONFIG_PATH, SIX_LANGUAGES.as_bytes());
    let mut app = FlipcardApp::new(
        store,
        ScriptedTouch::empty(),
        SmallRng::seed_from_u64(5),
        AppConfig::default(),
        0,
    )
    .unwrap();
    app.apply(Action::Menu(MenuAction::Options));
    app.apply(Action::Option(OptionAction::LanguageSettings));

    let mut keys = shown_language_keys(&app);
    assert_eq!(
        tap(&app, layout::NAV_NEXT),
        Some(Action::LanguageSelection(LanguageAction::NextPage))
    );
    app.apply(Action::LanguageSelection(LanguageAction::NextPage));
    assert_eq!(app.navigation().list_page, 1);
    keys.extend(shown_language_keys(&app));
    assert_eq!(keys, ["l0", "l1", "l2", "l3", "l4", "l5"]);

    let mut pages = None;
    app.with_screen(|screen| {
        if let Screen::LanguageSelection {
            rows,
            page,
            total_pages,
            ..
        } = screen
        {
            pages = Some((rows.len(), page, total_pages));
        }
    });
    assert_eq!(pages, Some((2, 1, 2)));

    let Some(action) = tap(&app, layout::language_row(1)) else {
        panic!("second row on the last page is empty");
    };
    app.apply(action);
    assert_eq!(app.mode(), Mode::Option);
    assert_eq!(app.languages().default_key(), "l5");

    app.apply(Action::Option(OptionAction::LanguageSettings));
    assert_eq!(app.navigation().list_page, 0);
    app.apply(Action::LanguageSelection(LanguageAction::PreviousPage));
    assert_eq!(app.navigation().list_page, 1);
}

#[test]
fn categories_past_the_first_page_are_reachable() {
    let ids: Vec<String> = (0..14).map(|i| format!("k{i}")).collect();
    let categories: Vec<String> = ids
        .iter()
        .map(|id| format!(r#""{id}": {{"name": "Group {id}"}}"#))
        .collect();
    let index = format!(
        r#"{{"metadata": {{"total_cards": 1}}, "categories": {{{}}},
  "cards": [{{"id": "c0", "folder": "C0", "category": "k13"}}]}}"#,
        categories.join(",")
    );
    let mut store = store_with(&["k13"]);
    store.insert(storage::INDEX_PATH, index.as_bytes());
    let mut app = FlipcardApp::new(
        store,
        ScriptedTouch::empty(),
        SmallRng::seed_from_u64(5),
        AppConfig::default(),
        0,
    )
    .unwrap();
    app.apply(Action::Menu(MenuAction::Categories));

    assert_eq!(
        tap(&app, layout::category_slot(1)),
        Some(Action::Category(CategoryAction::Select(String::from("k1"))))
    );
    app.apply(Action::Category(CategoryAction::PreviousPage));
    assert_eq!(app.navigation().list_page, 1);
    assert_eq!(
        tap(&app, layout::category_slot(1)),
        Some(Action::Category(CategoryAction::Select(String::from("k13"))))
    );
    assert_eq!(tap(&app, layout::category_slot(2)), None);

    let Some(action) = tap(&app, layout::category_slot(1)) else {
        panic!("last category is not on screen");
    };
    app.apply(action);
    assert_eq!(app.mode(), Mode::Grid);
    app.apply(Action::Grid(GridAction::Thumbnail(0)));
    assert_eq!(app.current_detail().unwrap().title, "Card 0");

    app.apply(Action::Flipcard(FlipcardAction::Home));
    app.apply(Action::Grid(GridAction::Home));
    assert_eq!(app.navigation().list_page, 0);
}

#[test]
fn single_page_list_arrows_do_nothing() {
    let mut app = app_with(&SIXTEEN);
    app.apply(Action::Menu(MenuAction::Categories));
    assert_eq!(
        tap(&app, layout::NAV_NEXT),
        Some(Action::Category(CategoryAction::NextPage))
    );
    assert_eq!(app.tick(1), TickResult::RenderRequested);

    app.apply(Action::Category(CategoryAction::NextPage));
    assert_eq!(app.navigation().list_page, 0);
    assert_eq!(app.tick(2), TickResult::NoRender);
}
