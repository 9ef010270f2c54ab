use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::grid::{Cell, Grid};
use crate::item::{Catalog, ItemCategory};
use crate::query::find_open_spaces;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemCounts {
    pub food: usize,
    pub drink: usize,
    pub tools: usize,
}

impl ItemCounts {
    pub fn get(&self, category: ItemCategory) -> usize {
        match category {
            ItemCategory::Food => self.food,
            ItemCategory::Drink => self.drink,
            ItemCategory::Tool => self.tools,
        }
    }

    pub fn total(&self) -> usize {
        self.food + self.drink + self.tools
    }

    fn bump(&mut self, category: ItemCategory) {
        match category {
            ItemCategory::Food => self.food += 1,
            ItemCategory::Drink => self.drink += 1,
            ItemCategory::Tool => self.tools += 1,
        }
    }
}

/// Scatters item markers over open floor and returns how many of each
/// category actually landed. Runs short silently when floor runs out.
///
/// Ids are drawn uniformly from the whole catalog and rejected until one
/// matches the category being placed. Categories the catalog has no entry
/// for are skipped.
pub fn place_items(
    grid: &mut Grid,
    catalog: &Catalog,
    wanted: ItemCounts,
    rng: &mut impl Rng,
) -> ItemCounts {
    let mut open = find_open_spaces(grid);
    open.shuffle(rng);

    let mut placed = ItemCounts::default();
    for category in ItemCategory::ALL {
        if wanted.get(category) > 0 && !catalog.has_category(category) {
            warn!(?category, "catalog has no items of this category");
            continue;
        }
        while placed.get(category) < wanted.get(category) {
            let Some(pos) = open.pop() else {
                break;
            };
            let template = loop {
                if let Some(t) = catalog.templates().choose(rng) {
                    if t.category() == category {
                        break t;
                    }
                }
            };
            grid.set(pos, Cell::Item(template.id));
            placed.bump(category);
        }
    }

    if placed != wanted {
        debug!(?wanted, ?placed, "ran out of open floor for items");
    }
    placed
}
