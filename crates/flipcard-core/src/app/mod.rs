//! Application state machine for the menu, category, grid, flashcard, and
//! language settings screens.

use alloc::string::String;

use heapless::Vec as HeaplessVec;
use log::{debug, info, warn};
use rand::Rng;

use crate::{
    catalog::{CardDetail, Catalog},
    config::{self, LanguageSet},
    error::{DocumentKind, LoadError},
    filter::{self, GRID_PAGE_SIZE},
    idle::{DEFAULT_IDLE_TIMEOUT_MS, IdleStatus, IdleTracker},
    input::{TouchPoint, TouchProvider},
    layout::{self, CATEGORY_SLOTS, LANGUAGE_ROWS, MenuButton, NavButton},
    random,
    render::{CardFaceView, CategoryRowView, GridSlotView, LanguageRowView, Screen},
    storage::DocumentStore,
};

const APP_TITLE: &str = "FLIPCARD";
const ALL_CARDS_LABEL: &str = "All cards";
const SAVE_FAILED_NOTICE: &str = "Could not save. Tap a language to retry.";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
    /// Idle timeout reached; the lock screen is up and the board may sleep.
    SleepRequested,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AppConfig {
    pub idle_timeout_ms: u64,
}

impl AppConfig {
    pub const fn new() -> Self {
        Self {
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
        }
    }

    pub const fn with_idle_timeout_ms(mut self, idle_timeout_ms: u64) -> Self {
        self.idle_timeout_ms = idle_timeout_ms;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Menu,
    Category,
    Grid,
    Flipcard,
    Option,
    LanguageSelection,
}

/// Where the user is. Mutated in place for the whole session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NavigationState {
    pub mode: Mode,
    /// Global index of the card on screen; meaningful in [`Mode::Flipcard`].
    pub current_card: usize,
    /// Index into the enabled languages.
    pub language_index: usize,
    /// `None` shows every card.
    pub selected_category: Option<String>,
    pub random_mode: bool,
    pub grid_page: usize,
    pub total_grid_pages: usize,
    /// Page of the category or language list on screen.
    pub list_page: usize,
    pub last_random_card_id: Option<String>,
}

impl NavigationState {
    pub const fn new() -> Self {
        Self {
            mode: Mode::Menu,
            current_card: 0,
            language_index: 0,
            selected_category: None,
            random_mode: false,
            grid_page: 0,
            total_grid_pages: 1,
            list_page: 0,
            last_random_card_id: None,
        }
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct FlipcardApp<ST, IN, R>
where
    ST: DocumentStore,
    IN: TouchProvider,
    R: Rng,
{
    store: ST,
    input: IN,
    rng: R,
    catalog: Catalog,
    languages: LanguageSet,
    nav: NavigationState,
    detail: Option<CardDetail>,
    idle: IdleTracker,
    notice: Option<&'static str>,
    locked: bool,
    pending_redraw: bool,
}

include!("view.rs");
include!("input.rs");
include!("navigation.rs");

#[cfg(test)]
mod tests;
