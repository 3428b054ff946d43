//! Screen regions for the 400x240 landscape panel.
//!
//! The renderer draws these rectangles and the touch classifier hit-tests
//! against the same values, so a button is defined exactly once.

use crate::filter::GRID_PAGE_SIZE;

pub const PANEL_WIDTH: u16 = 400;
pub const PANEL_HEIGHT: u16 = 240;

/// Axis-aligned rectangle; edges are inclusive for hit testing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    pub const fn right(&self) -> u16 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> u16 {
        self.y + self.height
    }
}

const NAV_SIZE: u16 = 36;
const NAV_Y: u16 = 4;
pub const NAV_PREV: Rect = Rect::new(8, NAV_Y, NAV_SIZE, NAV_SIZE);
pub const NAV_HOME: Rect = Rect::new((PANEL_WIDTH - NAV_SIZE) / 2, NAV_Y, NAV_SIZE, NAV_SIZE);
pub const NAV_NEXT: Rect = Rect::new(PANEL_WIDTH - 8 - NAV_SIZE, NAV_Y, NAV_SIZE, NAV_SIZE);

pub const MENU_CATEGORIES: Rect = Rect::new(20, 110, 116, 80);
pub const MENU_RANDOM: Rect = Rect::new(142, 110, 116, 80);
pub const MENU_OPTIONS: Rect = Rect::new(264, 110, 116, 80);

/// Category buttons: two columns, filled row by row.
pub const CATEGORY_SLOTS: usize = 12;
const CATEGORY_COLUMNS: usize = 2;

/// Grid thumbnails: five columns by three rows.
pub const GRID_COLUMNS: usize = 5;
pub const GRID_ROWS: usize = GRID_PAGE_SIZE / GRID_COLUMNS;

pub const FLIP_MAIN_IMAGE: Rect = Rect::new(8, 48, 160, 184);
/// Tapping anywhere on the language faces cycles the language.
pub const FLIP_LANGUAGE_ZONE: Rect = Rect::new(176, 48, 216, 184);
pub const FLIP_BIG_FACE: Rect = Rect::new(176, 48, 216, 92);
pub const FLIP_SMALL_FACE: Rect = Rect::new(176, 146, 216, 86);

pub const OPTION_LANGUAGE: Rect = Rect::new(60, 100, 280, 50);

pub const LANGUAGE_ROWS: usize = 4;
/// Error notice line under the language rows.
pub const LANGUAGE_NOTICE: Rect = Rect::new(40, 214, 320, 20);

pub const fn category_slot(slot: usize) -> Rect {
    let column = (slot % CATEGORY_COLUMNS) as u16;
    let row = (slot / CATEGORY_COLUMNS) as u16;
    Rect::new(8 + column * 198, 48 + row * 32, 186, 28)
}

pub const fn grid_slot(slot: usize) -> Rect {
    let column = (slot % GRID_COLUMNS) as u16;
    let row = (slot / GRID_COLUMNS) as u16;
    Rect::new(8 + column * 78, 50 + row * 62, 72, 56)
}

pub const fn language_row(row: usize) -> Rect {
    Rect::new(40, 56 + (row as u16) * 40, 320, 34)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuButton {
    Categories,
    Random,
    Options,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavButton {
    Previous,
    Home,
    Next,
}

pub fn hit_menu(x: u16, y: u16) -> Option<MenuButton> {
    if MENU_CATEGORIES.contains(x, y) {
        Some(MenuButton::Categories)
    } else if MENU_RANDOM.contains(x, y) {
        Some(MenuButton::Random)
    } else if MENU_OPTIONS.contains(x, y) {
        Some(MenuButton::Options)
    } else {
        None
    }
}

pub fn hit_nav(x: u16, y: u16) -> Option<NavButton> {
    if NAV_PREV.contains(x, y) {
        Some(NavButton::Previous)
    } else if NAV_HOME.contains(x, y) {
        Some(NavButton::Home)
    } else if NAV_NEXT.contains(x, y) {
        Some(NavButton::Next)
    } else {
        None
    }
}

pub fn hit_home(x: u16, y: u16) -> bool {
    NAV_HOME.contains(x, y)
}

pub fn hit_category_slot(x: u16, y: u16) -> Option<usize> {
    (0..CATEGORY_SLOTS).find(|&slot| category_slot(slot).contains(x, y))
}

pub fn hit_grid_slot(x: u16, y: u16) -> Option<usize> {
    (0..GRID_PAGE_SIZE).find(|&slot| grid_slot(slot).contains(x, y))
}

pub fn hit_language_zone(x: u16, y: u16) -> bool {
    FLIP_LANGUAGE_ZONE.contains(x, y)
}

pub fn hit_option_language(x: u16, y: u16) -> bool {
    OPTION_LANGUAGE.contains(x, y)
}

pub fn hit_language_row(x: u16, y: u16) -> Option<usize> {
    (0..LANGUAGE_ROWS).find(|&row| language_row(row).contains(x, y))
}

/// Centre point of a region.
pub const fn center_of(rect: Rect) -> (u16, u16) {
    (rect.x + rect.width / 2, rect.y + rect.height / 2)
}
