//! Item definitions and the item database
//!
//! Item templates are loaded from a RON file at startup; live [`Item`]
//! stacks are minted from templates by the [`ItemDb`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::render::SpriteId;

/// Unique identifier of an item definition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

/// Item category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Consumable,
    Equipment,
    QuestItem,
    Material,
    Misc,
}

/// A serializable item definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub sprite: SpriteId,
    pub kind: ItemKind,
    #[serde(default = "default_stackable")]
    pub stackable: bool,
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
}

fn default_stackable() -> bool {
    true
}

fn default_max_stack() -> u32 {
    99
}

/// A stack of items held in an inventory slot
#[derive(Debug, Clone)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub sprite: SpriteId,
    pub kind: ItemKind,
    pub stackable: bool,
    pub max_stack: u32,
    pub quantity: u32,
}

impl Item {
    /// Build a stack from a template
    pub fn from_template(template: &ItemTemplate, quantity: u32) -> Self {
        Self {
            id: template.id,
            name: template.name.clone(),
            description: template.description.clone(),
            sprite: template.sprite,
            kind: template.kind,
            stackable: template.stackable,
            max_stack: template.max_stack,
            quantity,
        }
    }

    /// Whether this stack can absorb `amount` more without overflowing
    pub fn can_add_to_stack(&self, amount: u32) -> bool {
        self.stackable && self.quantity + amount <= self.max_stack
    }

    /// True once the stack has run out
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}

/// Error loading the item database
#[derive(Debug)]
pub enum ItemDbError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Two templates share an id
    DuplicateId(ItemId),
}

impl From<io::Error> for ItemDbError {
    fn from(e: io::Error) -> Self {
        ItemDbError::Io(e)
    }
}

impl From<ron::error::SpannedError> for ItemDbError {
    fn from(e: ron::error::SpannedError) -> Self {
        ItemDbError::Parse(e)
    }
}

impl std::fmt::Display for ItemDbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemDbError::Io(e) => write!(f, "IO error: {}", e),
            ItemDbError::Parse(e) => write!(f, "Parse error: {}", e),
            ItemDbError::DuplicateId(id) => write!(f, "duplicate item id {}", id.0),
        }
    }
}

impl std::error::Error for ItemDbError {}

/// All known item definitions, keyed by id
#[derive(Debug, Default)]
pub struct ItemDb {
    templates: HashMap<ItemId, ItemTemplate>,
}

impl ItemDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a database from RON text (a list of templates)
    pub fn parse(text: &str) -> Result<Self, ItemDbError> {
        let templates: Vec<ItemTemplate> = ron::from_str(text)?;
        let mut db = Self::new();
        for template in templates {
            if db.templates.contains_key(&template.id) {
                return Err(ItemDbError::DuplicateId(template.id));
            }
            db.templates.insert(template.id, template);
        }
        log::info!("loaded {} item definitions", db.templates.len());
        Ok(db)
    }

    /// Load a database from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ItemDbError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// The built-in definitions used when no item file is available
    pub fn starter() -> Self {
        let templates = [
            ItemTemplate {
                id: ItemId(1),
                name: "Health Potion".into(),
                description: "Restores 50 HP".into(),
                sprite: SpriteId(16),
                kind: ItemKind::Consumable,
                stackable: true,
                max_stack: 99,
            },
            ItemTemplate {
                id: ItemId(2),
                name: "Rusty Key".into(),
                description: "Opens old doors".into(),
                sprite: SpriteId(17),
                kind: ItemKind::QuestItem,
                stackable: false,
                max_stack: 1,
            },
            ItemTemplate {
                id: ItemId(5),
                name: "Apple".into(),
                description: "Restores 10 HP".into(),
                sprite: SpriteId(19),
                kind: ItemKind::Consumable,
                stackable: true,
                max_stack: 20,
            },
            ItemTemplate {
                id: ItemId(6),
                name: "Wooden Shield".into(),
                description: "Blocks some damage".into(),
                sprite: SpriteId(20),
                kind: ItemKind::Equipment,
                stackable: false,
                max_stack: 1,
            },
        ];

        let mut db = Self::new();
        for template in templates {
            db.templates.insert(template.id, template);
        }
        db
    }

    /// Register a template directly (used by tests and tools)
    pub fn insert(&mut self, template: ItemTemplate) -> Result<(), ItemDbError> {
        if self.templates.contains_key(&template.id) {
            return Err(ItemDbError::DuplicateId(template.id));
        }
        self.templates.insert(template.id, template);
        Ok(())
    }

    /// Look up a template by id
    pub fn template(&self, id: ItemId) -> Option<&ItemTemplate> {
        self.templates.get(&id)
    }

    /// Mint a stack of `quantity` items; None for unknown ids
    pub fn spawn(&self, id: ItemId, quantity: u32) -> Option<Item> {
        self.templates
            .get(&id)
            .map(|t| Item::from_template(t, quantity))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin_template() -> ItemTemplate {
        ItemTemplate {
            id: ItemId(1),
            name: "Coin".into(),
            description: "Shiny.".into(),
            sprite: SpriteId(10),
            kind: ItemKind::Material,
            stackable: true,
            max_stack: 99,
        }
    }

    #[test]
    fn test_spawn_from_db() {
        let mut db = ItemDb::new();
        db.insert(coin_template()).unwrap();

        let stack = db.spawn(ItemId(1), 5).unwrap();
        assert_eq!(stack.quantity, 5);
        assert_eq!(stack.name, "Coin");
        assert!(db.spawn(ItemId(99), 1).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut db = ItemDb::new();
        db.insert(coin_template()).unwrap();
        assert!(matches!(
            db.insert(coin_template()),
            Err(ItemDbError::DuplicateId(ItemId(1)))
        ));
    }

    #[test]
    fn test_stack_capacity() {
        let item = Item::from_template(&coin_template(), 95);
        assert!(item.can_add_to_stack(4));
        assert!(!item.can_add_to_stack(5));
    }

    #[test]
    fn test_unstackable_never_stacks() {
        let mut template = coin_template();
        template.stackable = false;
        let item = Item::from_template(&template, 1);
        assert!(!item.can_add_to_stack(1));
    }

    #[test]
    fn test_starter_set() {
        let db = ItemDb::starter();
        assert_eq!(db.len(), 4);
        assert!(db.template(ItemId(1)).unwrap().stackable);
        assert!(!db.template(ItemId(2)).unwrap().stackable);
        assert_eq!(db.template(ItemId(5)).unwrap().max_stack, 20);
    }

    #[test]
    fn test_parse_ron_with_defaults() {
        let text = r#"[
            (
                id: 1,
                name: "Apple",
                description: "Restores a little health.",
                sprite: 3,
                kind: Consumable,
            ),
            (
                id: 2,
                name: "Sword",
                description: "Pointy end forward.",
                sprite: 4,
                kind: Equipment,
                stackable: false,
                max_stack: 1,
            ),
        ]"#;
        let db = ItemDb::parse(text).unwrap();
        assert_eq!(db.len(), 2);

        let apple = db.template(ItemId(1)).unwrap();
        assert!(apple.stackable);
        assert_eq!(apple.max_stack, 99);

        let sword = db.template(ItemId(2)).unwrap();
        assert!(!sword.stackable);
    }
}
