//! App-level view models handed to the board renderer.

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CategoryRowView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub count: usize,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GridSlotView<'a> {
    pub title: &'a str,
    pub folder: &'a str,
    pub thumbnail: &'a str,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LanguageRowView<'a> {
    pub key: &'a str,
    pub name: &'a str,
    pub is_default: bool,
}

/// Images of the card on screen for the active language.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CardFaceView<'a> {
    pub language: &'a str,
    pub big_file: &'a str,
    pub small_file: &'a str,
}

/// One screen per navigation mode, plus the lock and status screens.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Screen<'a> {
    Menu {
        title: &'a str,
    },
    /// One page of categories; `page` is 0-based.
    Category {
        rows: &'a [CategoryRowView<'a>],
        random: bool,
        page: usize,
        total_pages: usize,
    },
    Grid {
        category: &'a str,
        page: usize,
        total_pages: usize,
        /// Only occupied slots; the rest of the page is drawn blank.
        slots: &'a [GridSlotView<'a>],
    },
    Flipcard {
        title: &'a str,
        folder: &'a str,
        main_image: &'a str,
        face: CardFaceView<'a>,
        /// 1-based position within the active filter.
        position: usize,
        count: usize,
        random: bool,
    },
    Option,
    LanguageSelection {
        rows: &'a [LanguageRowView<'a>],
        notice: Option<&'a str>,
        page: usize,
        total_pages: usize,
    },
    Lock,
    Status {
        line1: &'a str,
        line2: &'a str,
    },
}
