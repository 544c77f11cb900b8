//! Slot categories and the definitions used to group them.

use crate::item::{ItemFilter, ItemStack};
use serde::{Deserialize, Serialize};

/// Category of a UI slot; decides what it accepts and where quick transfer
/// sends its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotType {
    /// Main 27-slot player storage.
    PlayerInventory,
    /// 9-slot player hotbar.
    PlayerHotbar,
    /// Machine input.
    Input,
    /// Machine output.
    Output,
    /// Generic container storage.
    Container,
    /// Display-only preview slot.
    Ghost,
    /// Display-only preview of an output.
    GhostOutput,
    /// Result of the attached crafter.
    CraftResult,
    /// Accepts only stacks matching the slot's filter.
    SpecificItem,
}

impl SlotType {
    /// Every slot type, in declaration order.
    pub const ALL: [SlotType; 9] = [
        SlotType::PlayerInventory,
        SlotType::PlayerHotbar,
        SlotType::Input,
        SlotType::Output,
        SlotType::Container,
        SlotType::Ghost,
        SlotType::GhostOutput,
        SlotType::CraftResult,
        SlotType::SpecificItem,
    ];

    /// Ghost slots mirror a preview and never hold transferable items.
    pub fn is_ghost(self) -> bool {
        matches!(self, SlotType::Ghost | SlotType::GhostOutput)
    }

    /// Slots that belong to the player rather than the bound machine.
    pub fn is_player(self) -> bool {
        matches!(self, SlotType::PlayerInventory | SlotType::PlayerHotbar)
    }
}

/// Grouping key for slot ranges: a slot type plus, for
/// [`SlotType::SpecificItem`] only, the item filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotDefinition {
    /// Slot category.
    pub slot_type: SlotType,
    /// Filter distinguishing specific-item groups.
    pub filter: Option<ItemFilter>,
}

impl SlotDefinition {
    /// Definition for a plain slot type.
    pub fn new(slot_type: SlotType) -> Self {
        Self {
            slot_type,
            filter: None,
        }
    }

    /// Definition for a specific-item group.
    pub fn specific(filter: ItemFilter) -> Self {
        Self {
            slot_type: SlotType::SpecificItem,
            filter: Some(filter),
        }
    }

    /// Category key for a placement; the filter only survives for
    /// specific-item slots.
    pub fn category(slot_type: SlotType, filter: Option<&ItemFilter>) -> Self {
        match slot_type {
            SlotType::SpecificItem => Self {
                slot_type,
                filter: filter.cloned(),
            },
            _ => Self::new(slot_type),
        }
    }

    /// Whether the stack passes this definition's filter. Definitions
    /// without a filter accept everything.
    pub fn matches(&self, stack: &ItemStack) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter.matches(stack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemId, ItemKind};
    use std::collections::HashMap;

    #[test]
    fn category_drops_filter_for_plain_types() {
        let filter = ItemFilter::Item(ItemId(5));
        assert_eq!(
            SlotDefinition::category(SlotType::Input, Some(&filter)),
            SlotDefinition::new(SlotType::Input)
        );
        assert_eq!(
            SlotDefinition::category(SlotType::SpecificItem, Some(&filter)),
            SlotDefinition::specific(filter)
        );
    }

    #[test]
    fn definitions_work_as_map_keys() {
        let mut map = HashMap::new();
        map.insert(SlotDefinition::specific(ItemFilter::Item(ItemId(1))), 1);
        map.insert(SlotDefinition::specific(ItemFilter::Item(ItemId(2))), 2);
        map.insert(SlotDefinition::new(SlotType::Output), 3);

        assert_eq!(
            map.get(&SlotDefinition::specific(ItemFilter::Item(ItemId(2)))),
            Some(&2)
        );
        assert_eq!(map.get(&SlotDefinition::new(SlotType::Output)), Some(&3));
        assert_eq!(map.get(&SlotDefinition::new(SlotType::Input)), None);
    }

    #[test]
    fn unfiltered_definition_matches_everything() {
        let stack = ItemStack::new(ItemKind::new(9), 1);
        assert!(SlotDefinition::new(SlotType::Container).matches(&stack));
        assert!(!SlotDefinition::specific(ItemFilter::Item(ItemId(1))).matches(&stack));
    }

    #[test]
    fn ghost_and_player_groups() {
        assert!(SlotType::Ghost.is_ghost());
        assert!(SlotType::GhostOutput.is_ghost());
        assert!(!SlotType::Output.is_ghost());
        assert!(SlotType::PlayerHotbar.is_player());
        assert!(!SlotType::Container.is_player());
    }
}
