//! Quick transfer (shift-click) and the two-phase stack merge.
//!
//! Quick transfer classifies the clicked slot, then walks a fixed list of
//! destination groups for that category and stops at the first group that
//! takes any part of the stack.

use slotforge_core::{ActorId, ItemStack, SlotDefinition, SlotType};
use std::ops::Range;
use tracing::{debug, trace, warn};

use crate::container::Container;

/// Category of a quick-transfer source slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCategory {
    /// Filtered machine slot.
    SpecificItem,
    /// Machine input, output or generic container storage.
    Machine,
    /// Display-only slot.
    Ghost,
    /// Player storage.
    PlayerInventory,
    /// Player hotbar.
    PlayerHotbar,
}

/// A destination group tried during quick transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    /// Slot type of the group.
    pub slot_type: SlotType,
    /// Scan from the highest index down.
    pub reverse: bool,
}

const fn forward(slot_type: SlotType) -> Destination {
    Destination {
        slot_type,
        reverse: false,
    }
}

const fn reverse(slot_type: SlotType) -> Destination {
    Destination {
        slot_type,
        reverse: true,
    }
}

const FROM_SPECIFIC: &[Destination] = &[
    reverse(SlotType::PlayerInventory),
    forward(SlotType::PlayerHotbar),
];

const FROM_MACHINE: &[Destination] = &[
    forward(SlotType::SpecificItem),
    reverse(SlotType::PlayerInventory),
    forward(SlotType::PlayerHotbar),
];

const FROM_PLAYER_INVENTORY: &[Destination] = &[
    forward(SlotType::SpecificItem),
    forward(SlotType::Input),
    forward(SlotType::PlayerHotbar),
];

const FROM_PLAYER_HOTBAR: &[Destination] = &[
    forward(SlotType::SpecificItem),
    forward(SlotType::Input),
    forward(SlotType::PlayerInventory),
];

impl SourceCategory {
    /// Classify a slot type, in priority order. Craft-result slots have no
    /// category.
    pub fn classify(slot_type: SlotType) -> Option<Self> {
        match slot_type {
            SlotType::SpecificItem => Some(SourceCategory::SpecificItem),
            SlotType::Output | SlotType::Input | SlotType::Container => {
                Some(SourceCategory::Machine)
            }
            SlotType::Ghost | SlotType::GhostOutput => Some(SourceCategory::Ghost),
            SlotType::PlayerInventory => Some(SourceCategory::PlayerInventory),
            SlotType::PlayerHotbar => Some(SourceCategory::PlayerHotbar),
            SlotType::CraftResult => None,
        }
    }

    /// Destination groups in the order they are tried.
    pub fn destinations(self) -> &'static [Destination] {
        match self {
            SourceCategory::SpecificItem => FROM_SPECIFIC,
            SourceCategory::Machine => FROM_MACHINE,
            SourceCategory::Ghost => &[],
            SourceCategory::PlayerInventory => FROM_PLAYER_INVENTORY,
            SourceCategory::PlayerHotbar => FROM_PLAYER_HOTBAR,
        }
    }
}

/// Result of a quick transfer, with the reason when nothing moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Items moved; carries the source stack as it was before the merge.
    Moved(ItemStack),
    /// The source slot was empty or missing.
    EmptySource,
    /// No destination group took anything.
    NoTransfer,
    /// Ghost slots never take part in bulk transfer.
    Rejected,
    /// The source slot has no quick-transfer category.
    Unclassifiable,
}

impl TransferOutcome {
    /// The moved stack image, if anything moved.
    pub fn into_moved(self) -> Option<ItemStack> {
        match self {
            TransferOutcome::Moved(stack) => Some(stack),
            _ => None,
        }
    }
}

fn scan_order(range: Range<usize>, reverse: bool) -> Box<dyn Iterator<Item = usize>> {
    if reverse {
        Box::new(range.rev())
    } else {
        Box::new(range)
    }
}

impl Container {
    /// Quick-transfer the stack in `index`. Returns the stack image that was
    /// in the slot before the move, or `None` if nothing moved.
    pub fn transfer_stack_in_slot(&mut self, actor: ActorId, index: usize) -> Option<ItemStack> {
        self.quick_move(actor, index).into_moved()
    }

    /// Quick-transfer with the reason reported.
    pub fn quick_move(&mut self, actor: ActorId, index: usize) -> TransferOutcome {
        let Some(original) = self.stack(index).cloned() else {
            return TransferOutcome::EmptySource;
        };
        let Some(slot_type) = self.slot_type(index) else {
            return TransferOutcome::EmptySource;
        };
        let Some(category) = SourceCategory::classify(slot_type) else {
            warn!(index, ?slot_type, "quick transfer from unclassifiable slot");
            return TransferOutcome::Unclassifiable;
        };
        if category == SourceCategory::Ghost {
            return TransferOutcome::Rejected;
        }

        let mut moving = original.clone();
        let accepted = category
            .destinations()
            .iter()
            .any(|destination| self.merge_into_group(&mut moving, *destination));
        if !accepted {
            debug!(index, ?category, "no destination accepted stack");
            return TransferOutcome::NoTransfer;
        }

        if moving.count == 0 {
            self.set_stack(index, None);
        } else {
            let remaining = moving.count;
            match self.stack_mut(index) {
                Some(held) => held.count = remaining,
                None => warn!(index, "source slot emptied during transfer"),
            }
            self.mark_slot_changed(index);
        }

        if moving.count == original.count {
            return TransferOutcome::NoTransfer;
        }

        let taken = original.copy_with_count(original.count - moving.count);
        self.on_take(index, actor, &taken);
        debug!(index, moved = taken.count, remaining = moving.count, "quick transfer");
        TransferOutcome::Moved(original)
    }

    /// Merge into every range of one destination group, stopping at the first
    /// range that takes anything.
    fn merge_into_group(&mut self, stack: &mut ItemStack, destination: Destination) -> bool {
        let ranges: Vec<Range<usize>> = if destination.slot_type == SlotType::SpecificItem {
            let mut definitions = self
                .ranges()
                .definitions_of(SlotType::SpecificItem)
                .peekable();
            if definitions.peek().is_none() {
                warn!(slot_type = ?destination.slot_type, "layout has no slots of this type");
                return false;
            }
            definitions
                .filter(|(definition, _)| definition.matches(stack))
                .flat_map(|(_, ranges)| ranges.iter())
                .collect()
        } else {
            match self
                .ranges()
                .ranges_for(&SlotDefinition::new(destination.slot_type))
            {
                Some(ranges) => ranges.iter().collect(),
                None => {
                    warn!(slot_type = ?destination.slot_type, "layout has no slots of this type");
                    return false;
                }
            }
        };

        ranges.into_iter().any(|range| {
            self.merge_item_stack(&mut *stack, range.start, range.end, destination.reverse)
        })
    }

    /// Two-phase merge of `stack` into slots `start..end`.
    ///
    /// Phase one tops up compatible stacks in scan order; phase two places
    /// what is left into the first empty slot that accepts it. Returns true
    /// if any slot changed. `stack.count` is reduced by exactly the amount
    /// that moved.
    pub fn merge_item_stack(
        &mut self,
        stack: &mut ItemStack,
        start: usize,
        end: usize,
        reverse: bool,
    ) -> bool {
        let end = end.min(self.slot_count());
        if start >= end || stack.is_empty() {
            return false;
        }
        let mut changed = false;

        if stack.is_stackable() {
            for index in scan_order(start..end, reverse) {
                if stack.count == 0 {
                    break;
                }
                if !self.slot_accepts(index, stack) {
                    continue;
                }
                let capacity = self.slot_capacity(index, stack);
                let Some(held) = self.stack_mut(index) else {
                    continue;
                };
                if !held.can_stack_with(stack) {
                    continue;
                }

                let merged = held.count.saturating_add(stack.count);
                let moved = if merged <= capacity {
                    held.count = merged;
                    stack.count
                } else if held.count < capacity {
                    let moved = capacity - held.count;
                    held.count = capacity;
                    moved
                } else {
                    continue;
                };
                stack.count -= moved;
                self.mark_slot_changed(index);
                changed = true;
                trace!(index, moved, "stacked onto existing");
            }
        }

        if stack.count > 0 {
            for index in scan_order(start..end, reverse) {
                if self.has_stack(index) || !self.slot_accepts(index, stack) {
                    continue;
                }
                let amount = stack.count.min(self.slot_capacity(index, stack));
                if amount == 0 {
                    continue;
                }
                self.set_stack(index, Some(stack.copy_with_count(amount)));
                stack.count -= amount;
                changed = true;
                trace!(index, amount, "placed into empty slot");
                break;
            }
        }

        changed
    }
}
