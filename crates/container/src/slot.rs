//! UI slots bound to inventory cells.

use slotforge_core::{ItemFilter, ItemStack, SlotType};

use crate::inventory::Inventory;
use crate::layout::SlotPlacement;

/// One cell of the container UI.
///
/// The backing inventory is referenced by name and resolved through the
/// owning container on every access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Flattened position in the container.
    pub index: usize,
    /// Name of the backing inventory.
    pub inventory: String,
    /// Cell within the backing inventory.
    pub inner_index: usize,
    /// Slot category.
    pub slot_type: SlotType,
    /// Presentation coordinates.
    pub position: (i32, i32),
    /// Filter for specific-item slots.
    pub filter: Option<ItemFilter>,
}

impl Slot {
    /// Materialize a placement at a flattened index.
    pub fn from_placement(index: usize, placement: &SlotPlacement) -> Self {
        Self {
            index,
            inventory: placement.inventory.clone(),
            inner_index: placement.index,
            slot_type: placement.slot_type,
            position: (placement.x, placement.y),
            filter: placement.filter.clone(),
        }
    }

    /// Whether the slot accepts `stack` when backed by `inventory`.
    pub fn accepts(&self, inventory: &dyn Inventory, stack: &ItemStack) -> bool {
        match self.slot_type {
            SlotType::Ghost | SlotType::GhostOutput => true,
            SlotType::SpecificItem => self
                .filter
                .as_ref()
                .is_some_and(|filter| filter.matches(stack)),
            SlotType::CraftResult => false,
            SlotType::Input
            | SlotType::Output
            | SlotType::Container
            | SlotType::PlayerInventory
            | SlotType::PlayerHotbar => inventory.is_item_valid(self.inner_index, stack),
        }
    }

    /// Largest count the slot may hold. Ghost slots only ever show a single
    /// item.
    pub fn stack_limit(&self, inventory: &dyn Inventory) -> u32 {
        if self.slot_type.is_ghost() {
            1
        } else {
            inventory.stack_limit(self.inner_index)
        }
    }

    /// Capacity for a particular stack: the tighter of the item's own
    /// ceiling and the slot limit.
    pub fn capacity_for(&self, inventory: &dyn Inventory, stack: &ItemStack) -> u32 {
        stack.max_stack_size().min(self.stack_limit(inventory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::SimpleInventory;
    use slotforge_core::{ItemId, ItemKind};

    fn slot(slot_type: SlotType, filter: Option<ItemFilter>) -> Slot {
        Slot::from_placement(
            0,
            &SlotPlacement {
                inventory: "inv".to_string(),
                index: 0,
                x: 4,
                y: 2,
                slot_type,
                filter,
            },
        )
    }

    struct FuelOnly;

    impl Inventory for FuelOnly {
        fn size(&self) -> usize {
            1
        }
        fn stack(&self, _index: usize) -> Option<&ItemStack> {
            None
        }
        fn stack_mut(&mut self, _index: usize) -> Option<&mut ItemStack> {
            None
        }
        fn set_stack(&mut self, _index: usize, _stack: Option<ItemStack>) {}
        fn is_item_valid(&self, _index: usize, stack: &ItemStack) -> bool {
            stack.item_id() == ItemId(263)
        }
    }

    #[test]
    fn validity_depends_on_type() {
        let inv = SimpleInventory::new(1);
        let coal = ItemStack::new(ItemKind::new(263), 1);
        let dirt = ItemStack::new(ItemKind::new(3), 1);

        assert!(slot(SlotType::Ghost, None).accepts(&inv, &dirt));
        assert!(slot(SlotType::Container, None).accepts(&inv, &dirt));
        assert!(!slot(SlotType::CraftResult, None).accepts(&inv, &dirt));

        let specific = slot(SlotType::SpecificItem, Some(ItemFilter::Item(ItemId(263))));
        assert!(specific.accepts(&inv, &coal));
        assert!(!specific.accepts(&inv, &dirt));
    }

    #[test]
    fn plain_slots_defer_to_inventory() {
        let coal = ItemStack::new(ItemKind::new(263), 1);
        let dirt = ItemStack::new(ItemKind::new(3), 1);
        let input = slot(SlotType::Input, None);
        assert!(input.accepts(&FuelOnly, &coal));
        assert!(!input.accepts(&FuelOnly, &dirt));
    }

    #[test]
    fn capacity_is_tighter_of_item_and_slot() {
        let inv = SimpleInventory::new(1).with_stack_limit(16);
        let pearls = ItemStack::new(ItemKind::new(368).with_max_stack_size(16), 1);
        let stone = ItemStack::new(ItemKind::new(1), 1);
        let plain = slot(SlotType::Container, None);
        assert_eq!(plain.capacity_for(&inv, &pearls), 16);
        assert_eq!(plain.capacity_for(&inv, &stone), 16);
        assert_eq!(slot(SlotType::Ghost, None).capacity_for(&inv, &stone), 1);
        assert_eq!(plain.position, (4, 2));
    }
}
