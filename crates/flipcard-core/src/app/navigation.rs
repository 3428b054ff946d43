impl<ST, IN, R> FlipcardApp<ST, IN, R>
where
    ST: DocumentStore,
    IN: TouchProvider,
    R: Rng,
{
    fn apply_menu(&mut self, action: MenuAction) {
        match action {
            MenuAction::Categories => {
                self.nav.random_mode = false;
                self.nav.selected_category = None;
                self.enter_category();
            }
            MenuAction::Random => {
                self.nav.random_mode = true;
                self.nav.selected_category = None;
                self.nav.last_random_card_id = None;
                self.enter_category();
            }
            MenuAction::Options => self.enter_option(),
        }
    }

    fn apply_category(&mut self, action: CategoryAction) {
        let category = match action {
            CategoryAction::PreviousPage => return self.turn_list_page(false),
            CategoryAction::NextPage => return self.turn_list_page(true),
            CategoryAction::Home => {
                self.enter_menu();
                return;
            }
            CategoryAction::Select(category) => category,
        };

        if !self.nav.random_mode {
            info!("nav: category {} selected", category);
            self.nav.selected_category = Some(category);
            self.enter_grid(0);
            return;
        }

        if filter::filtered_count(self.catalog.cards(), Some(category.as_str())) == 0 {
            info!("nav: category {} has no cards", category);
            return;
        }
        let index = random::pick_random(self.catalog.cards(), &category, None, &mut self.rng);
        match self.enter_flipcard(index) {
            Ok(()) => {
                info!("nav: random start in category {}", category);
                self.nav.selected_category = Some(category);
                self.remember_random_card();
            }
            Err(err) => warn!("nav: card {} not shown: {}", index, err),
        }
    }

    fn apply_grid(&mut self, action: GridAction) {
        match action {
            GridAction::PreviousPage | GridAction::NextPage => {
                let pages = self.nav.total_grid_pages;
                if pages <= 1 {
                    debug!("nav: single grid page, arrows inactive");
                    return;
                }
                let forward = action == GridAction::NextPage;
                self.nav.grid_page = filter::wrap_step(self.nav.grid_page, pages, forward);
                self.pending_redraw = true;
            }
            GridAction::Home => {
                self.nav.selected_category = None;
                self.enter_category();
            }
            GridAction::Thumbnail(slot) => {
                let slots = filter::page_slots(
                    self.catalog.cards(),
                    self.nav.selected_category.as_deref(),
                    self.nav.grid_page,
                );
                let Some(&index) = slots.get(slot) else {
                    debug!("nav: grid slot {} is empty", slot);
                    return;
                };
                if let Err(err) = self.enter_flipcard(index) {
                    warn!("nav: card {} not shown: {}", index, err);
                }
            }
        }
    }

    fn apply_flipcard(&mut self, action: FlipcardAction) {
        match action {
            FlipcardAction::Previous => self.step_card(false),
            FlipcardAction::Next => self.step_card(true),
            FlipcardAction::Home => {
                if self.nav.random_mode {
                    self.nav.selected_category = None;
                    self.enter_category();
                } else {
                    self.enter_grid(0);
                }
            }
            FlipcardAction::CycleLanguage => {
                if self.languages.len() < 2 {
                    debug!("nav: fewer than two languages, not cycling");
                    return;
                }
                self.nav.language_index = self.languages.next_index(self.nav.language_index);
                debug!(
                    "nav: language -> {}",
                    self.languages.key_at(self.nav.language_index).unwrap_or("?")
                );
                self.pending_redraw = true;
            }
        }
    }

    fn apply_option(&mut self, action: OptionAction) {
        match action {
            OptionAction::Home => self.enter_menu(),
            OptionAction::LanguageSettings => {
                self.notice = None;
                self.nav.list_page = 0;
                self.nav.mode = Mode::LanguageSelection;
                self.pending_redraw = true;
            }
        }
    }

    fn apply_language_selection(&mut self, action: LanguageAction) {
        let key = match action {
            LanguageAction::PreviousPage => return self.turn_list_page(false),
            LanguageAction::NextPage => return self.turn_list_page(true),
            LanguageAction::Home => {
                self.enter_option();
                return;
            }
            LanguageAction::Choose(key) => key,
        };

        if !self.languages.is_enabled(&key) {
            debug!("nav: language {} is not enabled", key);
            return;
        }

        if let Err(err) = config::persist_default_language(&mut self.store, &key) {
            warn!("config: saving default {} failed: {}", key, err);
            self.notice = Some(SAVE_FAILED_NOTICE);
            self.pending_redraw = true;
            return;
        }

        if let Err(err) = self.reload_config() {
            warn!("config: reload after save failed: {}", err);
            self.languages.set_default_key(&key);
            self.nav.language_index = self.languages.default_index();
        }
        self.enter_option();
    }

    /// Arrows on the category and language lists; inert on a single page.
    fn turn_list_page(&mut self, forward: bool) {
        let pages = self.list_page_count();
        if pages <= 1 {
            debug!("nav: single list page, arrows inactive");
            return;
        }
        self.nav.list_page = filter::wrap_step(self.nav.list_page, pages, forward);
        self.pending_redraw = true;
    }

    /// Previous/next within the active filter, or a fresh random card.
    fn step_card(&mut self, forward: bool) {
        let cards = self.catalog.cards();
        let category = self.nav.selected_category.as_deref();

        let target = if self.nav.random_mode {
            let Some(category) = category else {
                warn!("nav: random mode without a category");
                return;
            };
            let exclude = cards.get(self.nav.current_card).map(|card| card.id.as_str());
            random::pick_random(cards, category, exclude, &mut self.rng)
        } else {
            let Some(position) =
                filter::filtered_index_of_global(cards, category, self.nav.current_card)
            else {
                warn!(
                    "nav: card {} outside the active filter, ignoring step",
                    self.nav.current_card
                );
                return;
            };
            let count = filter::filtered_count(cards, category);
            let next = filter::wrap_step(position, count, forward);
            match filter::global_index_of_filtered(cards, category, next) {
                Some(index) => index,
                None => return,
            }
        };

        match self.enter_flipcard(target) {
            Ok(()) if self.nav.random_mode => self.remember_random_card(),
            Ok(()) => {}
            Err(err) => warn!("nav: card {} not shown: {}", target, err),
        }
    }

    fn remember_random_card(&mut self) {
        self.nav.last_random_card_id = self
            .catalog
            .card(self.nav.current_card)
            .ok()
            .map(|card| card.id.clone());
    }

    fn enter_menu(&mut self) {
        self.nav.mode = Mode::Menu;
        self.nav.random_mode = false;
        self.nav.selected_category = None;
        self.detail = None;
        self.pending_redraw = true;
    }

    fn enter_category(&mut self) {
        self.nav.mode = Mode::Category;
        self.nav.list_page = 0;
        self.detail = None;
        self.pending_redraw = true;
    }

    fn enter_grid(&mut self, page: usize) {
        let pages =
            filter::grid_page_count(self.catalog.cards(), self.nav.selected_category.as_deref());
        self.nav.total_grid_pages = pages;
        self.nav.grid_page = page.min(pages - 1);
        self.nav.mode = Mode::Grid;
        self.detail = None;
        self.pending_redraw = true;
    }

    fn enter_option(&mut self) {
        self.notice = None;
        self.nav.mode = Mode::Option;
        self.pending_redraw = true;
    }

    /// Load the card's descriptor, then switch to it. State is untouched when
    /// the load fails.
    fn enter_flipcard(&mut self, index: usize) -> Result<(), LoadError> {
        let Some(card) = self.catalog.card_or_first(index) else {
            return Err(LoadError::invalid(DocumentKind::Index, "catalog has no cards"));
        };
        let index = if index < self.catalog.total() { index } else { 0 };
        let detail = CardDetail::load(&mut self.store, card)?;
        info!("nav: card {} id={} folder={}", index, card.id, card.folder);

        self.detail = Some(detail);
        self.nav.current_card = index;
        self.nav.language_index = self.languages.default_index();
        self.nav.mode = Mode::Flipcard;
        self.pending_redraw = true;
        Ok(())
    }

    /// Re-read the card index and bring the navigation state back in range.
    pub fn reload_catalog(&mut self) -> Result<(), LoadError> {
        self.catalog = Catalog::load(&mut self.store)?;
        self.revalidate();
        Ok(())
    }

    /// Re-read the language config. Replaces the whole language set.
    pub fn reload_config(&mut self) -> Result<(), LoadError> {
        self.languages = LanguageSet::load(&mut self.store)?;
        self.revalidate();
        Ok(())
    }

    fn revalidate(&mut self) {
        let cards = self.catalog.cards();
        let category = self.nav.selected_category.as_deref();

        self.nav.total_grid_pages = filter::grid_page_count(cards, category);
        self.nav.grid_page = self.nav.grid_page.min(self.nav.total_grid_pages - 1);
        self.nav.language_index = self.languages.default_index();
        self.nav.list_page = self.nav.list_page.min(self.list_page_count() - 1);
        self.pending_redraw = true;

        if self.nav.mode != Mode::Flipcard {
            return;
        }

        let target = match filter::filtered_index_of_global(cards, category, self.nav.current_card) {
            Some(_) => Some(self.nav.current_card),
            None => filter::global_index_of_filtered(cards, category, 0),
        };
        let shown = match target {
            Some(index) => match self.enter_flipcard(index) {
                Ok(()) => true,
                Err(err) => {
                    warn!("nav: card {} not shown after reload: {}", index, err);
                    false
                }
            },
            None => false,
        };
        if shown {
            return;
        }

        info!("nav: active filter is empty after reload");
        if self.nav.random_mode {
            self.enter_category();
        } else {
            self.enter_grid(0);
        }
    }
}
