//! Layout validation errors.

use crate::slot::SlotType;
use thiserror::Error;

/// Problems detected while finishing a slot layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A placement names an inventory the layout never declared.
    #[error("slot {slot} refers to undeclared inventory `{inventory}`")]
    UnknownInventory {
        /// Flattened slot index.
        slot: usize,
        /// Inventory name used by the placement.
        inventory: String,
    },
    /// A placement points past the end of its inventory.
    #[error("slot {slot} binds index {index} of `{inventory}` which only has {size} slots")]
    IndexOutOfBounds {
        /// Flattened slot index.
        slot: usize,
        /// Inventory name.
        inventory: String,
        /// Requested inner index.
        index: usize,
        /// Declared inventory size.
        size: usize,
    },
    /// Two placements bind the same inventory cell.
    #[error("slot {slot} rebinds index {index} of `{inventory}` already used by slot {first}")]
    DuplicateBinding {
        /// Flattened slot index of the second binding.
        slot: usize,
        /// Flattened slot index of the first binding.
        first: usize,
        /// Inventory name.
        inventory: String,
        /// Inner index bound twice.
        index: usize,
    },
    /// A specific-item slot was declared without a filter.
    #[error("specific-item slot {slot} has no item filter")]
    MissingFilter {
        /// Flattened slot index.
        slot: usize,
    },
    /// A non specific-item slot carries a filter that would be ignored.
    #[error("slot {slot} of type {slot_type:?} cannot carry an item filter")]
    UnexpectedFilter {
        /// Flattened slot index.
        slot: usize,
        /// Declared type.
        slot_type: SlotType,
    },
    /// The same inventory name was declared twice.
    #[error("inventory `{0}` declared more than once")]
    DuplicateInventory(String),
}
