//! Random card selection within a category.

use log::debug;
use rand::Rng;

use crate::catalog::CardRecord;

/// Pick a uniformly random card of `category`, never the one with `exclude_id`
/// unless it is the only match.
///
/// Falls back to the excluded card's own index when nothing else matches, and
/// to index 0 when the excluded card is not in the catalog either.
pub fn pick_random<R>(
    cards: &[CardRecord],
    category: &str,
    exclude_id: Option<&str>,
    rng: &mut R,
) -> usize
where
    R: Rng,
{
    let is_candidate = |card: &CardRecord| {
        card.category == category && exclude_id.is_none_or(|id| card.id != id)
    };

    let available = cards.iter().filter(|card| is_candidate(*card)).count();
    if available == 0 {
        let fallback = exclude_id
            .and_then(|id| cards.iter().position(|card| card.id == id))
            .unwrap_or(0);
        debug!(
            "random: no candidates in category={} exclude={:?}; fallback={}",
            category, exclude_id, fallback
        );
        return fallback;
    }

    let target = rng.random_range(0..available);
    cards
        .iter()
        .enumerate()
        .filter(|(_, card)| is_candidate(*card))
        .nth(target)
        .map_or(0, |(index, _)| index)
}
