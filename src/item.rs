use crate::player::Vitals;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u16);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    Food,
    Drink,
    Tool,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 3] = [ItemCategory::Food, ItemCategory::Drink, ItemCategory::Tool];
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemKind {
    Food { nutrition: f32, health: f32 },
    Drink { hydration: f32, health: f32 },
    Tool { uses: u32 },
}

impl ItemKind {
    pub fn category(&self) -> ItemCategory {
        match self {
            ItemKind::Food { .. } => ItemCategory::Food,
            ItemKind::Drink { .. } => ItemCategory::Drink,
            ItemKind::Tool { .. } => ItemCategory::Tool,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemTemplate {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
}

impl ItemTemplate {
    pub fn new(id: u16, name: &str, kind: ItemKind) -> Self {
        ItemTemplate {
            id: ItemId(id),
            name: name.to_string(),
            kind,
        }
    }

    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }
}

/// Immutable set of item templates. Inventories only ever hold copies made
/// by [`Catalog::instantiate`].
#[derive(Clone, Debug)]
pub struct Catalog {
    templates: Vec<ItemTemplate>,
}

impl Catalog {
    pub fn new(templates: Vec<ItemTemplate>) -> Self {
        Catalog { templates }
    }

    pub fn templates(&self) -> &[ItemTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn has_category(&self, category: ItemCategory) -> bool {
        self.templates.iter().any(|t| t.category() == category)
    }

    pub fn instantiate(&self, id: ItemId) -> Option<Item> {
        self.get(id).map(Item::from_template)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new(vec![
            ItemTemplate::new(0, "bread", ItemKind::Food { nutrition: 20.0, health: 0.0 }),
            ItemTemplate::new(1, "apple", ItemKind::Food { nutrition: 10.0, health: 5.0 }),
            ItemTemplate::new(2, "water", ItemKind::Drink { hydration: 20.0, health: 0.0 }),
            ItemTemplate::new(3, "juice", ItemKind::Drink { hydration: 15.0, health: 5.0 }),
            ItemTemplate::new(4, "hammer", ItemKind::Tool { uses: 5 }),
            ItemTemplate::new(5, "torch", ItemKind::Tool { uses: 3 }),
        ])
    }
}

/// An owned item in an inventory. For tools, `kind` carries the uses left
/// on this particular instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub quantity: u32,
}

impl Item {
    pub fn from_template(template: &ItemTemplate) -> Self {
        Item {
            id: template.id,
            name: template.name.clone(),
            kind: template.kind.clone(),
            quantity: 1,
        }
    }

    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }

    /// Tools are tracked per instance and never stack.
    pub fn stacks(&self) -> bool {
        self.category() != ItemCategory::Tool
    }

    pub fn is_spent(&self) -> bool {
        self.quantity == 0 || matches!(self.kind, ItemKind::Tool { uses: 0 })
    }

    pub fn apply(&mut self, vitals: &mut Vitals) -> String {
        match &mut self.kind {
            ItemKind::Food { nutrition, health } => {
                vitals.hunger = (vitals.hunger + *nutrition).min(vitals.max_hunger);
                vitals.health = (vitals.health + *health).min(vitals.max_health);
                self.quantity = self.quantity.saturating_sub(1);
                format!("You ate the {}. It fills your stomach.", self.name)
            }
            ItemKind::Drink { hydration, health } => {
                vitals.thirst = (vitals.thirst + *hydration).min(vitals.max_thirst);
                vitals.health = (vitals.health + *health).min(vitals.max_health);
                self.quantity = self.quantity.saturating_sub(1);
                format!("You drank the {}. It quenches your thirst.", self.name)
            }
            ItemKind::Tool { uses } => {
                *uses = uses.saturating_sub(1);
                if *uses == 0 {
                    format!("You used the {}. It breaks.", self.name)
                } else {
                    format!("You used the {}. {} uses left.", self.name, uses)
                }
            }
        }
    }

    pub fn give(&mut self) -> String {
        self.quantity = self.quantity.saturating_sub(1);
        format!("You gave away the {}.", self.name)
    }
}
