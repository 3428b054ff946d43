impl<ST, IN, R> FlipcardApp<ST, IN, R>
where
    ST: DocumentStore,
    IN: TouchProvider,
    R: Rng,
{
    /// Load the index and language config and start in the menu.
    ///
    /// Failing to load either document is fatal at boot.
    pub fn new(
        mut store: ST,
        input: IN,
        rng: R,
        config: AppConfig,
        now_ms: u64,
    ) -> Result<Self, LoadError> {
        let catalog = Catalog::load(&mut store)?;
        let languages = LanguageSet::load(&mut store)?;

        let mut nav = NavigationState::new();
        nav.language_index = languages.default_index();
        nav.total_grid_pages = filter::grid_page_count(catalog.cards(), None);

        Ok(Self {
            store,
            input,
            rng,
            catalog,
            languages,
            nav,
            detail: None,
            idle: IdleTracker::new(config.idle_timeout_ms, now_ms),
            notice: None,
            locked: false,
            pending_redraw: true,
        })
    }

    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        self.process_input(now_ms);

        if self.idle.poll(now_ms) == IdleStatus::Expired {
            info!("sleep: idle for {} ms, locking", self.idle.idle_for(now_ms));
            self.locked = true;
            self.pending_redraw = false;
            return TickResult::SleepRequested;
        }

        if self.pending_redraw {
            self.pending_redraw = false;
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn mode(&self) -> Mode {
        self.nav.mode
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    pub fn current_detail(&self) -> Option<&CardDetail> {
        self.detail.as_ref()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn with_screen<F>(&self, f: F)
    where
        F: FnOnce(Screen<'_>),
    {
        if self.locked {
            f(Screen::Lock);
            return;
        }

        match self.nav.mode {
            Mode::Menu => f(Screen::Menu { title: APP_TITLE }),
            Mode::Category => {
                let mut rows: HeaplessVec<CategoryRowView<'_>, CATEGORY_SLOTS> = HeaplessVec::new();
                let first = self.nav.list_page * CATEGORY_SLOTS;
                for category in self
                    .catalog
                    .categories()
                    .into_iter()
                    .skip(first)
                    .take(CATEGORY_SLOTS)
                {
                    let _ = rows.push(CategoryRowView {
                        id: category.id,
                        name: category.name,
                        count: category.count,
                    });
                }
                f(Screen::Category {
                    rows: &rows,
                    random: self.nav.random_mode,
                    page: self.nav.list_page,
                    total_pages: self.list_page_count(),
                });
            }
            Mode::Grid => {
                let cards = self.catalog.cards();
                let category = self.nav.selected_category.as_deref();
                let mut slots: HeaplessVec<GridSlotView<'_>, GRID_PAGE_SIZE> = HeaplessVec::new();
                for index in filter::page_slots(cards, category, self.nav.grid_page) {
                    let card = &cards[index];
                    let _ = slots.push(GridSlotView {
                        title: &card.title,
                        folder: &card.folder,
                        thumbnail: &card.thumbnail,
                    });
                }
                f(Screen::Grid {
                    category: self.category_label(),
                    page: self.nav.grid_page,
                    total_pages: self.nav.total_grid_pages,
                    slots: &slots,
                });
            }
            Mode::Flipcard => {
                let Ok(card) = self.catalog.card(self.nav.current_card) else {
                    f(Screen::Status {
                        line1: "NO CARD",
                        line2: "RETURN HOME",
                    });
                    return;
                };
                let cards = self.catalog.cards();
                let category = self.nav.selected_category.as_deref();
                let position = filter::filtered_index_of_global(cards, category, self.nav.current_card)
                    .map_or(0, |index| index + 1);

                let language = self
                    .languages
                    .key_at(self.nav.language_index)
                    .unwrap_or("");
                let mut face = CardFaceView {
                    language: self
                        .languages
                        .info_at(self.nav.language_index)
                        .map_or("", |info| info.name.as_str()),
                    ..CardFaceView::default()
                };
                let (title, main_image) = match &self.detail {
                    Some(detail) => {
                        if let Some(files) = detail.face(language) {
                            face.big_file = &files.big_file;
                            face.small_file = &files.small_file;
                        }
                        let title = if detail.title.is_empty() {
                            card.title.as_str()
                        } else {
                            detail.title.as_str()
                        };
                        (title, detail.main_image.as_str())
                    }
                    None => (card.title.as_str(), ""),
                };

                f(Screen::Flipcard {
                    title,
                    folder: &card.folder,
                    main_image,
                    face,
                    position,
                    count: filter::filtered_count(cards, category),
                    random: self.nav.random_mode,
                });
            }
            Mode::Option => f(Screen::Option),
            Mode::LanguageSelection => {
                let mut rows: HeaplessVec<LanguageRowView<'_>, LANGUAGE_ROWS> = HeaplessVec::new();
                let first = self.nav.list_page * LANGUAGE_ROWS;
                for language in self.languages.enabled().iter().skip(first).take(LANGUAGE_ROWS) {
                    let _ = rows.push(LanguageRowView {
                        key: &language.key,
                        name: &language.name,
                        is_default: language.key == self.languages.default_key(),
                    });
                }
                f(Screen::LanguageSelection {
                    rows: &rows,
                    notice: self.notice,
                    page: self.nav.list_page,
                    total_pages: self.list_page_count(),
                });
            }
        }
    }

    /// Pages of the category or language list shown in the current mode.
    fn list_page_count(&self) -> usize {
        match self.nav.mode {
            Mode::Category => filter::page_count(self.catalog.category_count(), CATEGORY_SLOTS),
            Mode::LanguageSelection => filter::page_count(self.languages.len(), LANGUAGE_ROWS),
            _ => 1,
        }
    }

    fn category_label(&self) -> &str {
        match self.nav.selected_category.as_deref() {
            Some(id) => self.catalog.category_name(id).unwrap_or(id),
            None => ALL_CARDS_LABEL,
        }
    }
}
