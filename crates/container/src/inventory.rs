//! Inventory contract and a fixed-capacity implementation.
//!
//! Containers never own item storage semantics; they bind slots to cells of
//! named inventories and go through this trait for every read and write.

use serde::{Deserialize, Serialize};
use slotforge_core::{ActorId, ItemId, ItemStack, DEFAULT_STACK_SIZE};

/// Storage bound into a container under a name.
pub trait Inventory {
    /// Number of cells.
    fn size(&self) -> usize;

    /// Stack held in a cell, if any.
    fn stack(&self, index: usize) -> Option<&ItemStack>;

    /// Mutable access to the stack held in a cell.
    fn stack_mut(&mut self, index: usize) -> Option<&mut ItemStack>;

    /// Replace the contents of a cell. Out-of-range writes are ignored.
    fn set_stack(&mut self, index: usize, stack: Option<ItemStack>);

    /// Whether the actor may keep interacting with this inventory.
    fn is_usable_by(&self, _actor: ActorId) -> bool {
        true
    }

    /// Largest count any cell may hold regardless of item.
    fn stack_limit(&self, _index: usize) -> u32 {
        DEFAULT_STACK_SIZE
    }

    /// Inventory-level restriction on what a cell accepts.
    fn is_item_valid(&self, _index: usize, _stack: &ItemStack) -> bool {
        true
    }

    /// Called after any cell changes.
    fn mark_dirty(&mut self) {}
}

/// Fixed-size inventory backed by a vector of optional stacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleInventory {
    slots: Vec<Option<ItemStack>>,
    stack_limit: u32,
    #[serde(default = "default_usable")]
    usable: bool,
    #[serde(skip)]
    changes: u64,
}

fn default_usable() -> bool {
    true
}

impl SimpleInventory {
    /// Create a new empty inventory.
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
            stack_limit: DEFAULT_STACK_SIZE,
            usable: true,
            changes: 0,
        }
    }

    /// Override the per-cell stack limit.
    pub fn with_stack_limit(mut self, stack_limit: u32) -> Self {
        self.stack_limit = stack_limit;
        self
    }

    /// Pre-fill cells. Entries past the end are dropped.
    pub fn with_stacks<I>(mut self, stacks: I) -> Self
    where
        I: IntoIterator<Item = (usize, ItemStack)>,
    {
        for (index, stack) in stacks {
            self.set_stack(index, Some(stack));
        }
        self.changes = 0;
        self
    }

    /// Toggle whether actors may use the inventory.
    pub fn set_usable(&mut self, usable: bool) {
        self.usable = usable;
    }

    /// All cells in order.
    pub fn stacks(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    /// Number of times the inventory reported a change.
    pub fn change_count(&self) -> u64 {
        self.changes
    }

    /// Count the total number of a specific item in the inventory.
    pub fn count_item(&self, item_id: ItemId) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.item_id() == item_id)
            .map(|stack| stack.count)
            .sum()
    }

    /// Total number of items across all cells.
    pub fn total_items(&self) -> u32 {
        self.slots.iter().flatten().map(|stack| stack.count).sum()
    }

    /// Check if the inventory is completely empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }
}

impl Inventory for SimpleInventory {
    fn size(&self) -> usize {
        self.slots.len()
    }

    fn stack(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    fn stack_mut(&mut self, index: usize) -> Option<&mut ItemStack> {
        self.slots.get_mut(index).and_then(|slot| slot.as_mut())
    }

    fn set_stack(&mut self, index: usize, stack: Option<ItemStack>) {
        if let Some(slot) = self.slots.get_mut(index) {
            // Zero-count stacks are stored as empty cells.
            *slot = stack.filter(|stack| !stack.is_empty());
        }
    }

    fn is_usable_by(&self, _actor: ActorId) -> bool {
        self.usable
    }

    fn stack_limit(&self, _index: usize) -> u32 {
        self.stack_limit
    }

    fn mark_dirty(&mut self) {
        self.changes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotforge_core::ItemKind;

    const STONE: ItemKind = ItemKind::new(1);
    const DIRT: ItemKind = ItemKind::new(3);

    #[test]
    fn zero_count_stacks_become_empty() {
        let mut inv = SimpleInventory::new(4);
        inv.set_stack(1, Some(ItemStack::new(STONE, 0)));
        assert!(inv.stack(1).is_none());
        assert!(inv.is_empty());
    }

    #[test]
    fn out_of_range_access_is_ignored() {
        let mut inv = SimpleInventory::new(2);
        inv.set_stack(5, Some(ItemStack::new(STONE, 1)));
        assert!(inv.stack(5).is_none());
        assert!(inv.stack_mut(5).is_none());
        assert!(inv.is_empty());
    }

    #[test]
    fn counts_items_by_id() {
        let inv = SimpleInventory::new(5).with_stacks([
            (0, ItemStack::new(STONE, 10)),
            (2, ItemStack::new(DIRT, 7)),
            (4, ItemStack::new(STONE, 5)),
        ]);
        assert_eq!(inv.count_item(STONE.id), 15);
        assert_eq!(inv.count_item(DIRT.id), 7);
        assert_eq!(inv.total_items(), 22);
        assert_eq!(inv.change_count(), 0);
    }

    #[test]
    fn usable_flag_and_limits() {
        let mut inv = SimpleInventory::new(1).with_stack_limit(16);
        assert!(inv.is_usable_by(ActorId(3)));
        inv.set_usable(false);
        assert!(!inv.is_usable_by(ActorId(3)));
        assert_eq!(inv.stack_limit(0), 16);
    }

    #[test]
    fn serde_skips_change_counter() {
        let mut inv = SimpleInventory::new(2).with_stacks([(1, ItemStack::new(DIRT, 4))]);
        inv.mark_dirty();
        let json = serde_json::to_string(&inv).unwrap();
        let back: SimpleInventory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stacks(), inv.stacks());
        assert_eq!(back.change_count(), 0);
    }
}
