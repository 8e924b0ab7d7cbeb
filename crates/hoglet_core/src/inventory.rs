//! Slot-based inventory with stacking and a hotbar
//!
//! 24 slots in a 6-wide grid; the first row doubles as the hotbar. Adding a
//! stackable item tries to merge into an existing stack of the same id
//! before taking the first empty slot. Merging is all-or-nothing: a stack
//! without room for the full incoming quantity is skipped.

use crate::item::{Item, ItemId};

/// Total inventory slots
pub const INVENTORY_SLOTS: usize = 24;

/// Hotbar slots (the first row)
pub const HOTBAR_SLOTS: usize = 6;

/// Slots per grid row
pub const SLOTS_PER_ROW: usize = 6;

/// One inventory slot: an item stack or empty
pub type InventorySlot = Option<Item>;

/// The player's inventory
pub struct Inventory {
    slots: Vec<InventorySlot>,
    selected: Option<usize>,
    hotbar_selection: usize,
    open: bool,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            slots: (0..INVENTORY_SLOTS).map(|_| None).collect(),
            selected: None,
            hotbar_selection: 0,
            open: false,
        }
    }

    /// Add an item, stacking first, then taking the first empty slot
    ///
    /// Returns the item back when the inventory has no room for it.
    pub fn add(&mut self, item: Item) -> Result<(), Item> {
        if item.stackable {
            for slot in self.slots.iter_mut().flatten() {
                if slot.id == item.id && slot.can_add_to_stack(item.quantity) {
                    slot.quantity += item.quantity;
                    return Ok(());
                }
            }
        }

        for slot in self.slots.iter_mut() {
            if slot.is_none() {
                *slot = Some(item);
                return Ok(());
            }
        }

        log::debug!("inventory full, rejecting item {}", item.id.0);
        Err(item)
    }

    /// Whether `add` would succeed for this item
    pub fn has_room(&self, item: &Item) -> bool {
        if item.stackable {
            let stacks = self
                .slots
                .iter()
                .flatten()
                .any(|s| s.id == item.id && s.can_add_to_stack(item.quantity));
            if stacks {
                return true;
            }
        }
        self.slots.iter().any(Option::is_none)
    }

    /// Take the stack out of a slot
    ///
    /// Clears the selection if it pointed at the removed slot.
    pub fn remove(&mut self, slot: usize) -> Option<Item> {
        let item = self.slots.get_mut(slot)?.take()?;
        if self.selected == Some(slot) {
            self.selected = None;
        }
        Some(item)
    }

    /// Borrow the stack in a slot
    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.slots.get(slot)?.as_ref()
    }

    /// Total quantity across all stacks of an item id
    pub fn count(&self, id: ItemId) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| s.id == id)
            .map(|s| s.quantity)
            .sum()
    }

    /// Currently selected slot, if any
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Move the grid selection by a signed offset, clamped to the grid
    ///
    /// Use ±1 for horizontal movement and ±[`SLOTS_PER_ROW`] for vertical.
    /// The first movement from an empty selection lands on slot 0.
    pub fn move_selection(&mut self, offset: isize) {
        let Some(current) = self.selected else {
            self.selected = Some(0);
            return;
        };
        let target = (current as isize + offset).clamp(0, INVENTORY_SLOTS as isize - 1);
        self.selected = Some(target as usize);
    }

    /// Consume one item from the selected stack
    ///
    /// Returns the id of the consumed item; the slot empties when the stack
    /// runs out.
    pub fn use_selected(&mut self) -> Option<ItemId> {
        let slot = self.selected?;
        let item = self.slots.get_mut(slot)?.as_mut()?;
        item.quantity -= 1;
        let id = item.id;
        if item.is_empty() {
            self.remove(slot);
        }
        Some(id)
    }

    /// Take the whole selected stack out (for dropping into the world)
    pub fn drop_selected(&mut self) -> Option<Item> {
        let slot = self.selected?;
        self.remove(slot)
    }

    /// Currently selected hotbar slot (0-5)
    pub fn hotbar_selection(&self) -> usize {
        self.hotbar_selection
    }

    /// Select a hotbar slot; out-of-range indices are ignored
    pub fn select_hotbar(&mut self, slot: usize) {
        if slot < HOTBAR_SLOTS {
            self.hotbar_selection = slot;
        }
    }

    /// Borrow the stack in the selected hotbar slot
    pub fn hotbar_item(&self) -> Option<&Item> {
        self.get(self.hotbar_selection)
    }

    /// Consume one item from the selected hotbar slot
    pub fn use_hotbar_item(&mut self) -> Option<ItemId> {
        let slot = self.hotbar_selection;
        let item = self.slots.get_mut(slot)?.as_mut()?;
        item.quantity -= 1;
        let id = item.id;
        if item.is_empty() {
            self.remove(slot);
        }
        Some(id)
    }

    /// Whether the full inventory UI is open
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemKind, ItemTemplate};
    use crate::render::SpriteId;

    fn template(id: u32, stackable: bool, max_stack: u32) -> ItemTemplate {
        ItemTemplate {
            id: ItemId(id),
            name: format!("item-{}", id),
            description: String::new(),
            sprite: SpriteId(id),
            kind: ItemKind::Material,
            stackable,
            max_stack,
        }
    }

    fn stack(id: u32, quantity: u32) -> Item {
        Item::from_template(&template(id, true, 99), quantity)
    }

    #[test]
    fn test_add_stacks_before_empty_slot() {
        let mut inv = Inventory::new();
        inv.add(stack(1, 5)).unwrap();
        inv.add(stack(2, 1)).unwrap();
        inv.add(stack(1, 3)).unwrap();

        assert_eq!(inv.get(0).unwrap().quantity, 8);
        assert_eq!(inv.count(ItemId(1)), 8);
        // No third slot was taken
        assert!(inv.get(2).is_none());
    }

    #[test]
    fn test_full_stack_overflows_to_new_slot() {
        let mut inv = Inventory::new();
        inv.add(stack(1, 98)).unwrap();
        // Merging 5 would exceed max_stack 99, so it takes a fresh slot
        inv.add(stack(1, 5)).unwrap();

        assert_eq!(inv.get(0).unwrap().quantity, 98);
        assert_eq!(inv.get(1).unwrap().quantity, 5);
        assert_eq!(inv.count(ItemId(1)), 103);
    }

    #[test]
    fn test_unstackable_items_take_separate_slots() {
        let mut inv = Inventory::new();
        let sword = || Item::from_template(&template(7, false, 1), 1);
        inv.add(sword()).unwrap();
        inv.add(sword()).unwrap();

        assert_eq!(inv.get(0).unwrap().quantity, 1);
        assert_eq!(inv.get(1).unwrap().quantity, 1);
    }

    #[test]
    fn test_full_inventory_rejects() {
        let mut inv = Inventory::new();
        for i in 0..INVENTORY_SLOTS {
            inv.add(Item::from_template(&template(i as u32, false, 1), 1))
                .unwrap();
        }

        let extra = Item::from_template(&template(100, false, 1), 1);
        assert!(!inv.has_room(&extra));
        let rejected = inv.add(extra).unwrap_err();
        assert_eq!(rejected.id, ItemId(100));
    }

    #[test]
    fn test_full_inventory_still_stacks() {
        let mut inv = Inventory::new();
        inv.add(stack(1, 5)).unwrap();
        for i in 1..INVENTORY_SLOTS {
            inv.add(Item::from_template(&template(1000 + i as u32, false, 1), 1))
                .unwrap();
        }

        assert!(inv.has_room(&stack(1, 3)));
        inv.add(stack(1, 3)).unwrap();
        assert_eq!(inv.count(ItemId(1)), 8);
    }

    #[test]
    fn test_selection_clamps_to_grid() {
        let mut inv = Inventory::new();
        assert_eq!(inv.selected(), None);

        // First movement lands on slot 0
        inv.move_selection(1);
        assert_eq!(inv.selected(), Some(0));

        inv.move_selection(-1);
        assert_eq!(inv.selected(), Some(0));

        inv.move_selection(SLOTS_PER_ROW as isize);
        assert_eq!(inv.selected(), Some(6));

        // Clamp at the last slot
        inv.move_selection(1000);
        assert_eq!(inv.selected(), Some(INVENTORY_SLOTS - 1));
    }

    #[test]
    fn test_use_selected_consumes_and_empties() {
        let mut inv = Inventory::new();
        inv.add(stack(1, 2)).unwrap();
        inv.move_selection(1); // select slot 0

        assert_eq!(inv.use_selected(), Some(ItemId(1)));
        assert_eq!(inv.get(0).unwrap().quantity, 1);

        assert_eq!(inv.use_selected(), Some(ItemId(1)));
        assert!(inv.get(0).is_none());
        // Selection cleared with the emptied slot
        assert_eq!(inv.selected(), None);
        assert_eq!(inv.use_selected(), None);
    }

    #[test]
    fn test_drop_selected_returns_stack() {
        let mut inv = Inventory::new();
        inv.add(stack(3, 7)).unwrap();
        inv.move_selection(1);

        let dropped = inv.drop_selected().unwrap();
        assert_eq!(dropped.id, ItemId(3));
        assert_eq!(dropped.quantity, 7);
        assert!(inv.get(0).is_none());
    }

    #[test]
    fn test_hotbar_selection_and_use() {
        let mut inv = Inventory::new();
        inv.add(stack(1, 1)).unwrap();

        inv.select_hotbar(3);
        assert_eq!(inv.hotbar_selection(), 3);
        assert!(inv.hotbar_item().is_none());

        inv.select_hotbar(99);
        assert_eq!(inv.hotbar_selection(), 3, "out-of-range select ignored");

        inv.select_hotbar(0);
        assert_eq!(inv.hotbar_item().unwrap().id, ItemId(1));
        assert_eq!(inv.use_hotbar_item(), Some(ItemId(1)));
        assert!(inv.hotbar_item().is_none());
    }

    #[test]
    fn test_toggle_open() {
        let mut inv = Inventory::new();
        assert!(!inv.is_open());
        inv.toggle();
        assert!(inv.is_open());
        inv.toggle();
        assert!(!inv.is_open());
    }
}
