use tracing::info;

use crate::grid::{Cell, Dir, Grid, Pos};
use crate::item::{Catalog, Item};
use crate::query::is_wall;

const STEP_COST: f32 = 1.0;
const STARVING_DAMAGE: f32 = 1.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Vitals {
    pub health: f32,
    pub hunger: f32,
    pub thirst: f32,
    pub max_health: f32,
    pub max_hunger: f32,
    pub max_thirst: f32,
}

impl Default for Vitals {
    fn default() -> Self {
        Vitals {
            health: 100.0,
            hunger: 100.0,
            thirst: 100.0,
            max_health: 100.0,
            max_hunger: 100.0,
            max_thirst: 100.0,
        }
    }
}

impl Vitals {
    pub fn decay(&mut self, hunger: f32, thirst: f32) {
        self.hunger = (self.hunger - hunger).max(0.0);
        self.thirst = (self.thirst - thirst).max(0.0);
    }

    /// Health loss for an empty stomach and an empty canteen, one point each.
    fn starve(&mut self) {
        if self.hunger <= 0.0 {
            self.health -= STARVING_DAMAGE;
        }
        if self.thirst <= 0.0 {
            self.health -= STARVING_DAMAGE;
        }
        self.health = self.health.max(0.0);
    }
}

#[derive(Clone, Debug, Default)]
pub struct Inventory {
    items: Vec<Item>,
    selected: usize,
}

impl Inventory {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn selected(&self) -> Option<&Item> {
        self.items.get(self.selected)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, item: Item) {
        if item.stacks() {
            if let Some(held) = self.items.iter_mut().find(|held| held.id == item.id) {
                held.quantity += item.quantity;
                return;
            }
        }
        self.items.push(item);
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }

    fn prune(&mut self) {
        self.items.retain(|item| !item.is_spent());
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Pos,
    pub vitals: Vitals,
    pub inventory: Inventory,
}

impl Player {
    pub fn new(pos: Pos) -> Self {
        Player {
            pos,
            vitals: Vitals::default(),
            inventory: Inventory::default(),
        }
    }

    /// Starting kit handed out at session start.
    pub fn with_starter_kit(pos: Pos, catalog: &Catalog) -> Self {
        let mut player = Player::new(pos);
        for name in ["bread", "water", "water", "hammer"] {
            if let Some(template) = catalog.templates().iter().find(|t| t.name == name) {
                player.inventory.add(Item::from_template(template));
            }
        }
        player
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.health > 0.0
    }

    /// Steps one cell unless the target is a wall. Walking costs food and
    /// water and hurts once either runs out.
    pub fn try_move(&mut self, grid: &Grid, dir: Dir) -> bool {
        let next = self.pos.step(dir);
        if is_wall(grid, next) {
            return false;
        }
        self.pos = next;
        self.vitals.decay(STEP_COST, STEP_COST);
        self.vitals.starve();
        true
    }

    pub fn pick_up(&mut self, grid: &mut Grid, catalog: &Catalog) -> Option<String> {
        let Some(Cell::Item(id)) = grid.get(self.pos) else {
            return None;
        };
        let item = catalog.instantiate(id)?;
        grid.set(self.pos, Cell::Floor);
        info!(item = %item.name, x = self.pos.x, y = self.pos.y, "picked up item");
        let msg = format!("Picked up {}.", item.name);
        self.inventory.add(item);
        Some(msg)
    }

    pub fn use_selected(&mut self) -> String {
        let idx = self.inventory.selected;
        let Some(item) = self.inventory.items.get_mut(idx) else {
            return "No item to use.".to_string();
        };
        let msg = item.apply(&mut self.vitals);
        self.inventory.prune();
        msg
    }

    pub fn give_selected(&mut self) -> String {
        let idx = self.inventory.selected;
        let Some(item) = self.inventory.items.get_mut(idx) else {
            return "No item to give.".to_string();
        };
        let msg = if item.stacks() {
            item.give()
        } else {
            item.quantity = 0;
            format!("You gave away the {}.", item.name)
        };
        self.inventory.prune();
        msg
    }
}
