//! Containers: named inventories plus the flattened slot list built from a
//! layout.

use slotforge_core::{ActorId, ItemStack, LayoutError, SlotType};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tracing::{debug, warn};

use crate::crafter::Crafter;
use crate::inventory::Inventory;
use crate::layout::{ContainerLayout, FinishedLayout};
use crate::ranges::SlotRangeTable;
use crate::slot::Slot;

/// Errors raised while assembling a container.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The layout itself is invalid.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// A declared inventory was never bound.
    #[error("inventory `{0}` is declared by the layout but not bound")]
    MissingInventory(String),
    /// A bound inventory is smaller than the layout declares.
    #[error("inventory `{name}` has {actual} cells, layout expects {declared}")]
    InventoryTooSmall {
        /// Inventory name.
        name: String,
        /// Size declared by the layout.
        declared: usize,
        /// Size of the bound inventory.
        actual: usize,
    },
}

/// Slots and inventories touched since the host last collected changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Flattened slot indices.
    pub slots: BTreeSet<usize>,
    /// Inventory names.
    pub inventories: BTreeSet<String>,
}

impl ChangeSet {
    /// True when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.inventories.is_empty()
    }
}

/// An open container: bound inventories, their slots, and an optional
/// crafter.
pub struct Container {
    layout: FinishedLayout,
    inventories: HashMap<String, Box<dyn Inventory>>,
    slots: Vec<Slot>,
    crafter: Option<Box<dyn Crafter>>,
    changes: ChangeSet,
}

impl Container {
    /// Create a container with no inventories bound and no slots generated.
    pub fn new(layout: FinishedLayout) -> Self {
        Self {
            layout,
            inventories: HashMap::new(),
            slots: Vec::new(),
            crafter: None,
            changes: ChangeSet::default(),
        }
    }

    /// Finish `layout`, bind `inventories` and generate slots.
    pub fn build<I>(layout: ContainerLayout, inventories: I) -> Result<Self, ContainerError>
    where
        I: IntoIterator<Item = (String, Box<dyn Inventory>)>,
    {
        let mut container = Self::new(layout.finish()?);
        for (name, inventory) in inventories {
            container.add_inventory(name, inventory);
        }
        container.generate_slots()?;
        Ok(container)
    }

    /// Bind an inventory under a name, returning any inventory it replaces.
    pub fn add_inventory(
        &mut self,
        name: impl Into<String>,
        inventory: Box<dyn Inventory>,
    ) -> Option<Box<dyn Inventory>> {
        self.inventories.insert(name.into(), inventory)
    }

    /// Inventory bound under `name`.
    pub fn inventory(&self, name: &str) -> Option<&dyn Inventory> {
        self.inventories.get(name).map(|inventory| inventory.as_ref())
    }

    /// Mutable inventory bound under `name`.
    pub fn inventory_mut(&mut self, name: &str) -> Option<&mut (dyn Inventory + 'static)> {
        self.inventories.get_mut(name).map(|inventory| inventory.as_mut())
    }

    /// Unbind and return an inventory. Slots bound to it read as empty and
    /// accept nothing until another inventory is bound under the name.
    pub fn detach_inventory(&mut self, name: &str) -> Option<Box<dyn Inventory>> {
        self.inventories.remove(name)
    }

    /// Materialize one slot per placement. Every declared inventory must be
    /// bound and large enough.
    pub fn generate_slots(&mut self) -> Result<(), ContainerError> {
        for decl in self.layout.inventories() {
            let inventory = self
                .inventories
                .get(&decl.name)
                .ok_or_else(|| ContainerError::MissingInventory(decl.name.clone()))?;
            if inventory.size() < decl.size {
                return Err(ContainerError::InventoryTooSmall {
                    name: decl.name.clone(),
                    declared: decl.size,
                    actual: inventory.size(),
                });
            }
        }

        self.slots = self
            .layout
            .placements()
            .iter()
            .enumerate()
            .map(|(index, placement)| Slot::from_placement(index, placement))
            .collect();
        debug!(slots = self.slots.len(), "generated container slots");
        Ok(())
    }

    /// Whether every bound inventory is usable by the actor.
    pub fn can_interact(&self, actor: ActorId) -> bool {
        self.inventories
            .values()
            .all(|inventory| inventory.is_usable_by(actor))
    }

    /// Attach the crafter feeding craft-result slots.
    pub fn set_crafter(&mut self, crafter: Box<dyn Crafter>) {
        self.crafter = Some(crafter);
    }

    /// Attached crafter, if any.
    pub fn crafter(&self) -> Option<&dyn Crafter> {
        self.crafter.as_deref()
    }

    /// Write the crafter's current result into every craft-result slot.
    pub fn refresh_craft_results(&mut self) {
        let Some(result) = self.crafter.as_ref().map(|crafter| crafter.craft_result()) else {
            return;
        };
        let targets: Vec<usize> = self
            .slots
            .iter()
            .filter(|slot| slot.slot_type == SlotType::CraftResult)
            .map(|slot| slot.index)
            .collect();
        for index in targets {
            if self.stack(index) != result.as_ref() {
                self.set_stack(index, result.clone());
            }
        }
    }

    /// Validated layout backing this container.
    pub fn layout(&self) -> &FinishedLayout {
        &self.layout
    }

    /// Range table of the layout.
    pub fn ranges(&self) -> &SlotRangeTable {
        self.layout.ranges()
    }

    /// All slots in flattened order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot at a flattened index.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Type of the slot at a flattened index.
    pub fn slot_type(&self, index: usize) -> Option<SlotType> {
        self.slots.get(index).map(|slot| slot.slot_type)
    }

    fn bound(&self, index: usize) -> Option<(&Slot, &dyn Inventory)> {
        let slot = self.slots.get(index)?;
        let inventory = self.inventories.get(&slot.inventory)?;
        Some((slot, inventory.as_ref()))
    }

    /// Stack shown in a slot.
    pub fn stack(&self, index: usize) -> Option<&ItemStack> {
        let (slot, inventory) = self.bound(index)?;
        inventory
            .stack(slot.inner_index)
            .filter(|stack| !stack.is_empty())
    }

    /// Whether the slot holds a non-empty stack.
    pub fn has_stack(&self, index: usize) -> bool {
        self.stack(index).is_some()
    }

    pub(crate) fn stack_mut(&mut self, index: usize) -> Option<&mut ItemStack> {
        let slot = self.slots.get(index)?;
        self.inventories
            .get_mut(&slot.inventory)?
            .stack_mut(slot.inner_index)
            .filter(|stack| !stack.is_empty())
    }

    /// Replace the stack in a slot and record the change.
    pub fn set_stack(&mut self, index: usize, stack: Option<ItemStack>) {
        let Some(slot) = self.slots.get(index) else {
            warn!(index, "set_stack on missing slot");
            return;
        };
        match self.inventories.get_mut(&slot.inventory) {
            Some(inventory) => {
                inventory.set_stack(slot.inner_index, stack.filter(|stack| !stack.is_empty()));
                self.mark_slot_changed(index);
            }
            None => warn!(index, inventory = %slot.inventory, "slot bound to detached inventory"),
        }
    }

    /// Whether the slot would accept `stack`.
    pub fn slot_accepts(&self, index: usize, stack: &ItemStack) -> bool {
        self.bound(index)
            .is_some_and(|(slot, inventory)| slot.accepts(inventory, stack))
    }

    /// How many of `stack`'s item the slot may hold in total.
    pub fn slot_capacity(&self, index: usize, stack: &ItemStack) -> u32 {
        self.bound(index)
            .map_or(0, |(slot, inventory)| slot.capacity_for(inventory, stack))
    }

    /// Record that a slot changed and tell its inventory.
    pub fn mark_slot_changed(&mut self, index: usize) {
        let Some(slot) = self.slots.get(index) else {
            return;
        };
        if let Some(inventory) = self.inventories.get_mut(&slot.inventory) {
            inventory.mark_dirty();
        }
        self.changes.slots.insert(index);
        self.changes.inventories.insert(slot.inventory.clone());
    }

    /// Notify the slot that `taken` was picked up from it.
    pub fn on_take(&mut self, index: usize, actor: ActorId, taken: &ItemStack) {
        if self.slot_type(index) != Some(SlotType::CraftResult) {
            return;
        }
        match self.crafter.as_mut() {
            Some(crafter) => crafter.on_result_taken(actor, taken),
            None => warn!(index, "craft result taken without a crafter attached"),
        }
    }

    /// Drain the change set for broadcasting.
    pub fn take_changes(&mut self) -> ChangeSet {
        std::mem::take(&mut self.changes)
    }

    /// Changes recorded so far.
    pub fn pending_changes(&self) -> &ChangeSet {
        &self.changes
    }
}
