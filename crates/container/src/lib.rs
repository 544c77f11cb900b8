#![warn(missing_docs)]
//! Data-driven inventory containers: slot layouts bound to named
//! inventories, single-slot clicks and quick transfer.

mod click;
mod container;
mod crafter;
mod inventory;
mod layout;
mod ranges;
mod slot;
mod transfer;

pub use click::{ClickButton, ClickHandler, ClickMode, CursorClickHandler};
pub use container::{ChangeSet, Container, ContainerError};
pub use crafter::Crafter;
pub use inventory::{Inventory, SimpleInventory};
pub use layout::{
    ContainerLayout, FinishedLayout, InventoryDecl, SlotPlacement, HOTBAR_SIZE, PLAYER_INVENTORY,
    PLAYER_INVENTORY_SIZE, SLOT_SPACING,
};
pub use ranges::{SlotRangeTable, SlotRanges};
pub use slot::Slot;
pub use transfer::{Destination, SourceCategory, TransferOutcome};

pub use slotforge_core::{
    ActorId, ItemFilter, ItemId, ItemKind, ItemStack, LayoutError, SlotDefinition, SlotType,
};
