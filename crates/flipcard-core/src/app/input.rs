#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuAction {
    Categories,
    Random,
    Options,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CategoryAction {
    PreviousPage,
    NextPage,
    Home,
    Select(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GridAction {
    PreviousPage,
    NextPage,
    Home,
    /// Slot on the current page, 0-based in row-major order.
    Thumbnail(usize),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FlipcardAction {
    Previous,
    Next,
    Home,
    CycleLanguage,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OptionAction {
    Home,
    LanguageSettings,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LanguageAction {
    PreviousPage,
    NextPage,
    Home,
    Choose(String),
}

/// A touch resolved against the layout of the screen it landed on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    Menu(MenuAction),
    Category(CategoryAction),
    Grid(GridAction),
    Flipcard(FlipcardAction),
    Option(OptionAction),
    LanguageSelection(LanguageAction),
}

impl<ST, IN, R> FlipcardApp<ST, IN, R>
where
    ST: DocumentStore,
    IN: TouchProvider,
    R: Rng,
{
    fn process_input(&mut self, now_ms: u64) {
        let point = match self.input.poll_press() {
            Ok(Some(point)) => point,
            Ok(None) => return,
            Err(_) => {
                warn!("touch: poll failed");
                return;
            }
        };

        self.idle.record_activity(now_ms);
        if self.locked {
            self.locked = false;
            self.pending_redraw = true;
            return;
        }

        match self.classify(point) {
            Some(action) => self.apply(action),
            None => debug!(
                "touch: ({}, {}) hit nothing in {:?}",
                point.x, point.y, self.nav.mode
            ),
        }
    }

    /// Map a press to the action of the current screen, if any.
    pub fn classify(&self, point: TouchPoint) -> Option<Action> {
        let TouchPoint { x, y } = point;

        match self.nav.mode {
            Mode::Menu => layout::hit_menu(x, y).map(|button| {
                Action::Menu(match button {
                    MenuButton::Categories => MenuAction::Categories,
                    MenuButton::Random => MenuAction::Random,
                    MenuButton::Options => MenuAction::Options,
                })
            }),
            Mode::Category => {
                let action = match layout::hit_nav(x, y) {
                    Some(NavButton::Previous) => Some(CategoryAction::PreviousPage),
                    Some(NavButton::Next) => Some(CategoryAction::NextPage),
                    Some(NavButton::Home) => Some(CategoryAction::Home),
                    None => None,
                };
                if let Some(action) = action {
                    return Some(Action::Category(action));
                }
                let slot = layout::hit_category_slot(x, y)?;
                let categories = self.catalog.categories();
                let category = categories.get(self.nav.list_page * CATEGORY_SLOTS + slot)?;
                Some(Action::Category(CategoryAction::Select(String::from(
                    category.id,
                ))))
            }
            Mode::Grid => match layout::hit_nav(x, y) {
                Some(NavButton::Previous) => Some(Action::Grid(GridAction::PreviousPage)),
                Some(NavButton::Next) => Some(Action::Grid(GridAction::NextPage)),
                Some(NavButton::Home) => Some(Action::Grid(GridAction::Home)),
                None => layout::hit_grid_slot(x, y)
                    .map(|slot| Action::Grid(GridAction::Thumbnail(slot))),
            },
            Mode::Flipcard => match layout::hit_nav(x, y) {
                Some(NavButton::Previous) => Some(Action::Flipcard(FlipcardAction::Previous)),
                Some(NavButton::Next) => Some(Action::Flipcard(FlipcardAction::Next)),
                Some(NavButton::Home) => Some(Action::Flipcard(FlipcardAction::Home)),
                None => layout::hit_language_zone(x, y)
                    .then_some(Action::Flipcard(FlipcardAction::CycleLanguage)),
            },
            Mode::Option => {
                if layout::hit_home(x, y) {
                    Some(Action::Option(OptionAction::Home))
                } else if layout::hit_option_language(x, y) {
                    Some(Action::Option(OptionAction::LanguageSettings))
                } else {
                    None
                }
            }
            Mode::LanguageSelection => {
                let action = match layout::hit_nav(x, y) {
                    Some(NavButton::Previous) => Some(LanguageAction::PreviousPage),
                    Some(NavButton::Next) => Some(LanguageAction::NextPage),
                    Some(NavButton::Home) => Some(LanguageAction::Home),
                    None => None,
                };
                if let Some(action) = action {
                    return Some(Action::LanguageSelection(action));
                }
                let row = layout::hit_language_row(x, y)?;
                let language = self
                    .languages
                    .info_at(self.nav.list_page * LANGUAGE_ROWS + row)?;
                Some(Action::LanguageSelection(LanguageAction::Choose(
                    language.key.clone(),
                )))
            }
        }
    }

    /// Apply one action. Actions that belong to another screen are ignored.
    pub fn apply(&mut self, action: Action) {
        match (self.nav.mode, action) {
            (Mode::Menu, Action::Menu(action)) => self.apply_menu(action),
            (Mode::Category, Action::Category(action)) => self.apply_category(action),
            (Mode::Grid, Action::Grid(action)) => self.apply_grid(action),
            (Mode::Flipcard, Action::Flipcard(action)) => self.apply_flipcard(action),
            (Mode::Option, Action::Option(action)) => self.apply_option(action),
            (Mode::LanguageSelection, Action::LanguageSelection(action)) => {
                self.apply_language_selection(action)
            }
            (mode, action) => debug!("nav: {:?} ignored in {:?}", action, mode),
        }
    }
}
