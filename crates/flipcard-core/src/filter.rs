//! Translation between global card indices and category-filtered indices.
//!
//! Every call rescans the card slice. Catalogs hold a few hundred cards at
//! most, and a scan always reflects the catalog currently loaded.

use heapless::Vec as HeaplessVec;

use crate::catalog::CardRecord;

/// Thumbnails per grid page (3 rows of 5 on the landscape panel).
pub const GRID_PAGE_SIZE: usize = 15;

/// Global indices shown on one grid page, in slot order.
pub type PageSlots = HeaplessVec<usize, GRID_PAGE_SIZE>;

fn matches(card: &CardRecord, category: Option<&str>) -> bool {
    category.is_none_or(|category| card.category == category)
}

fn filtered<'a>(
    cards: &'a [CardRecord],
    category: Option<&'a str>,
) -> impl Iterator<Item = usize> + 'a {
    cards
        .iter()
        .enumerate()
        .filter(move |(_, card)| matches(card, category))
        .map(|(index, _)| index)
}

/// Number of cards in `category`, or all cards when there is no filter.
pub fn filtered_count(cards: &[CardRecord], category: Option<&str>) -> usize {
    match category {
        None => cards.len(),
        Some(_) => cards.iter().filter(|card| matches(card, category)).count(),
    }
}

/// Global index of the `filtered_index`-th card of `category`.
pub fn global_index_of_filtered(
    cards: &[CardRecord],
    category: Option<&str>,
    filtered_index: usize,
) -> Option<usize> {
    filtered(cards, category).nth(filtered_index)
}

/// Position of the card at `global_index` within `category`.
///
/// `None` when the index is out of range or the card is not in the category.
pub fn filtered_index_of_global(
    cards: &[CardRecord],
    category: Option<&str>,
    global_index: usize,
) -> Option<usize> {
    let card = cards.get(global_index)?;
    if !matches(card, category) {
        return None;
    }
    filtered(cards, category).position(|index| index == global_index)
}

/// Pages needed to show `len` entries `page_size` at a time; never zero.
pub const fn page_count(len: usize, page_size: usize) -> usize {
    let pages = len.div_ceil(page_size);
    if pages == 0 { 1 } else { pages }
}

/// `max(1, ceil(filtered_count / GRID_PAGE_SIZE))`.
pub fn grid_page_count(cards: &[CardRecord], category: Option<&str>) -> usize {
    page_count(filtered_count(cards, category), GRID_PAGE_SIZE)
}

/// Global indices of the cards on grid page `page`; shorter than a full
/// page on the last page and empty past the end.
pub fn page_slots(cards: &[CardRecord], category: Option<&str>, page: usize) -> PageSlots {
    let mut slots = PageSlots::new();
    let start = page.saturating_mul(GRID_PAGE_SIZE);
    for index in filtered(cards, category).skip(start).take(GRID_PAGE_SIZE) {
        // take() bounds this to the slot capacity
        let _ = slots.push(index);
    }
    slots
}

/// Step `filtered_index` by one within `count` items, wrapping at both ends.
pub const fn wrap_step(filtered_index: usize, count: usize, forward: bool) -> usize {
    if count == 0 {
        return 0;
    }
    if forward {
        (filtered_index + 1) % count
    } else if filtered_index == 0 {
        count - 1
    } else {
        (filtered_index - 1) % count
    }
}
