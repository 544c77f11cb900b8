//! Declarative container layouts.
//!
//! A layout names the inventories a container binds and lists slot
//! placements in flattened order. Finishing a layout validates it and derives
//! the [`SlotRangeTable`].

use serde::{Deserialize, Serialize};
use slotforge_core::{ItemFilter, LayoutError, SlotType};
use std::collections::HashMap;

use crate::ranges::SlotRangeTable;

/// Inventory name used by [`ContainerLayout::add_player_inventory`].
pub const PLAYER_INVENTORY: &str = "player";

/// Cells in the player inventory (hotbar included).
pub const PLAYER_INVENTORY_SIZE: usize = 36;

/// Hotbar width; hotbar occupies player cells `0..HOTBAR_SIZE`.
pub const HOTBAR_SIZE: usize = 9;

/// Pixel pitch between adjacent slots.
pub const SLOT_SPACING: i32 = 18;

/// Vertical offset from the top of the player grid to the hotbar row.
const HOTBAR_OFFSET: i32 = 58;

/// An inventory the layout expects to be bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryDecl {
    /// Name slots use to refer to the inventory.
    pub name: String,
    /// Minimum number of cells the bound inventory must have.
    pub size: usize,
}

/// One slot: which inventory cell it shows, where, and its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPlacement {
    /// Inventory name.
    pub inventory: String,
    /// Cell within that inventory.
    pub index: usize,
    /// Presentation x coordinate.
    #[serde(default)]
    pub x: i32,
    /// Presentation y coordinate.
    #[serde(default)]
    pub y: i32,
    /// Slot category.
    #[serde(rename = "type")]
    pub slot_type: SlotType,
    /// Filter for specific-item slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<ItemFilter>,
}

/// Builder for the inventories and slot placements of a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerLayout {
    /// Declared inventories.
    pub inventories: Vec<InventoryDecl>,
    /// Slots in flattened order.
    pub slots: Vec<SlotPlacement>,
}

impl ContainerLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an inventory slots may bind to.
    pub fn declare_inventory(&mut self, name: impl Into<String>, size: usize) -> &mut Self {
        self.inventories.push(InventoryDecl {
            name: name.into(),
            size,
        });
        self
    }

    /// Append one slot.
    pub fn add_slot(
        &mut self,
        slot_type: SlotType,
        inventory: impl Into<String>,
        index: usize,
        x: i32,
        y: i32,
    ) -> &mut Self {
        self.slots.push(SlotPlacement {
            inventory: inventory.into(),
            index,
            x,
            y,
            slot_type,
            filter: None,
        });
        self
    }

    /// Append a specific-item slot accepting only stacks matching `filter`.
    pub fn add_specific_slot(
        &mut self,
        filter: ItemFilter,
        inventory: impl Into<String>,
        index: usize,
        x: i32,
        y: i32,
    ) -> &mut Self {
        self.slots.push(SlotPlacement {
            inventory: inventory.into(),
            index,
            x,
            y,
            slot_type: SlotType::SpecificItem,
            filter: Some(filter),
        });
        self
    }

    /// Append a horizontal run of `amount` slots bound to consecutive cells.
    /// Returns the next unused inventory index.
    #[allow(clippy::too_many_arguments)]
    pub fn add_slot_range(
        &mut self,
        slot_type: SlotType,
        inventory: &str,
        index: usize,
        x: i32,
        y: i32,
        amount: usize,
        dx: i32,
    ) -> usize {
        let mut x = x;
        for offset in 0..amount {
            self.add_slot(slot_type, inventory, index + offset, x, y);
            x += dx;
        }
        index + amount
    }

    /// Append a grid of slots, row by row. Returns the next unused inventory
    /// index.
    #[allow(clippy::too_many_arguments)]
    pub fn add_slot_box(
        &mut self,
        slot_type: SlotType,
        inventory: &str,
        index: usize,
        x: i32,
        y: i32,
        columns: usize,
        dx: i32,
        rows: usize,
        dy: i32,
    ) -> usize {
        let mut index = index;
        let mut y = y;
        for _ in 0..rows {
            index = self.add_slot_range(slot_type, inventory, index, x, y, columns, dx);
            y += dy;
        }
        index
    }

    /// Declare the player inventory and append its 27 storage slots followed
    /// by the 9 hotbar slots, using the standard grid geometry.
    pub fn add_player_inventory(&mut self, x: i32, y: i32) -> &mut Self {
        if !self.inventories.iter().any(|decl| decl.name == PLAYER_INVENTORY) {
            self.declare_inventory(PLAYER_INVENTORY, PLAYER_INVENTORY_SIZE);
        }
        self.add_slot_box(
            SlotType::PlayerInventory,
            PLAYER_INVENTORY,
            HOTBAR_SIZE,
            x,
            y,
            9,
            SLOT_SPACING,
            3,
            SLOT_SPACING,
        );
        self.add_slot_range(
            SlotType::PlayerHotbar,
            PLAYER_INVENTORY,
            0,
            x,
            y + HOTBAR_OFFSET,
            HOTBAR_SIZE,
            SLOT_SPACING,
        );
        self
    }

    /// Validate the layout and derive its range table.
    pub fn finish(self) -> Result<FinishedLayout, LayoutError> {
        let mut sizes: HashMap<&str, usize> = HashMap::new();
        for decl in &self.inventories {
            if sizes.insert(decl.name.as_str(), decl.size).is_some() {
                return Err(LayoutError::DuplicateInventory(decl.name.clone()));
            }
        }

        let mut bound: HashMap<(&str, usize), usize> = HashMap::new();
        for (slot, placement) in self.slots.iter().enumerate() {
            let size = *sizes.get(placement.inventory.as_str()).ok_or_else(|| {
                LayoutError::UnknownInventory {
                    slot,
                    inventory: placement.inventory.clone(),
                }
            })?;
            if placement.index >= size {
                return Err(LayoutError::IndexOutOfBounds {
                    slot,
                    inventory: placement.inventory.clone(),
                    index: placement.index,
                    size,
                });
            }
            match (placement.slot_type, &placement.filter) {
                (SlotType::SpecificItem, None) => return Err(LayoutError::MissingFilter { slot }),
                (SlotType::SpecificItem, Some(_)) | (_, None) => {}
                (slot_type, Some(_)) => {
                    return Err(LayoutError::UnexpectedFilter { slot, slot_type })
                }
            }
            let cell = (placement.inventory.as_str(), placement.index);
            if let Some(first) = bound.insert(cell, slot) {
                return Err(LayoutError::DuplicateBinding {
                    slot,
                    first,
                    inventory: placement.inventory.clone(),
                    index: placement.index,
                });
            }
        }

        let ranges = SlotRangeTable::from_placements(&self.slots);
        Ok(FinishedLayout {
            inventories: self.inventories,
            placements: self.slots,
            ranges,
        })
    }
}

/// A validated layout together with its range table.
#[derive(Debug, Clone)]
pub struct FinishedLayout {
    inventories: Vec<InventoryDecl>,
    placements: Vec<SlotPlacement>,
    ranges: SlotRangeTable,
}

impl FinishedLayout {
    /// Declared inventories.
    pub fn inventories(&self) -> &[InventoryDecl] {
        &self.inventories
    }

    /// Placements in flattened order.
    pub fn placements(&self) -> &[SlotPlacement] {
        &self.placements
    }

    /// Range table derived from the placements.
    pub fn ranges(&self) -> &SlotRangeTable {
        &self.ranges
    }

    /// Type of the slot at a flattened index.
    pub fn slot_type(&self, index: usize) -> Option<SlotType> {
        self.ranges.slot_type(index)
    }
}
