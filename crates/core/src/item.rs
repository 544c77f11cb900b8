//! Item stacks and item filters.
//!
//! The host application describes its items through [`ItemKind`]; the engine
//! only needs identity, the per-kind stack ceiling and whether damage values
//! distinguish subtypes.

use serde::{Deserialize, Serialize};

/// Item identifier referencing the host's item registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u16);

/// Maximum stack size for most items.
pub const DEFAULT_STACK_SIZE: u32 = 64;

/// Static description of an item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKind {
    /// Registry identifier.
    pub id: ItemId,
    /// Largest count a single stack of this item may hold.
    pub max_stack_size: u32,
    /// Whether stacks with different damage values are different items.
    pub has_subtypes: bool,
}

impl ItemKind {
    /// A plain item stacking to [`DEFAULT_STACK_SIZE`].
    pub const fn new(id: u16) -> Self {
        Self {
            id: ItemId(id),
            max_stack_size: DEFAULT_STACK_SIZE,
            has_subtypes: false,
        }
    }

    /// Override the stack ceiling.
    pub const fn with_max_stack_size(mut self, max_stack_size: u32) -> Self {
        self.max_stack_size = max_stack_size;
        self
    }

    /// Mark damage values as distinguishing subtypes.
    pub const fn with_subtypes(mut self) -> Self {
        self.has_subtypes = true;
        self
    }
}

/// A stack of items held in an inventory slot.
///
/// A count of zero is equivalent to an empty slot; inventories normalise such
/// stacks to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Type of item.
    pub kind: ItemKind,
    /// Quantity in stack.
    pub count: u32,
    /// Damage or subtype value.
    #[serde(default)]
    pub damage: u32,
    /// Opaque tag data compared byte-for-byte when stacking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<u8>>,
}

impl ItemStack {
    /// Create a new item stack.
    pub fn new(kind: ItemKind, count: u32) -> Self {
        Self {
            kind,
            count,
            damage: 0,
            metadata: None,
        }
    }

    /// Set the damage value.
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    /// Attach tag data.
    pub fn with_metadata(mut self, metadata: Vec<u8>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Registry id of the item.
    pub fn item_id(&self) -> ItemId {
        self.kind.id
    }

    /// Get the maximum stack size for this item.
    pub fn max_stack_size(&self) -> u32 {
        self.kind.max_stack_size
    }

    /// Whether more than one of this item fits in a stack.
    pub fn is_stackable(&self) -> bool {
        self.kind.max_stack_size > 1
    }

    /// Whether the stack holds nothing.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if this stack can merge with another stack.
    ///
    /// Item identity must match, damage must match when the item has
    /// subtypes, and tag data must be identical.
    pub fn can_stack_with(&self, other: &ItemStack) -> bool {
        self.kind.id == other.kind.id
            && (!self.kind.has_subtypes || self.damage == other.damage)
            && self.metadata == other.metadata
    }

    /// Clone this stack with a different count.
    pub fn copy_with_count(&self, count: u32) -> ItemStack {
        ItemStack {
            count,
            ..self.clone()
        }
    }

    /// Split this stack, taking the specified amount into a new stack.
    pub fn split(&mut self, amount: u32) -> Option<ItemStack> {
        if amount == 0 || amount > self.count {
            return None;
        }

        self.count -= amount;
        Some(self.copy_with_count(amount))
    }
}

/// Value-comparable predicate restricting which stacks a slot accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemFilter {
    /// Any stack of this item.
    Item(ItemId),
    /// Only this item with exactly this damage value.
    Variant {
        /// Item to accept.
        item: ItemId,
        /// Required damage value.
        damage: u32,
    },
    /// Any stack whose item is in the list.
    AnyOf(Vec<ItemId>),
}

impl ItemFilter {
    /// Check whether a stack passes the filter.
    pub fn matches(&self, stack: &ItemStack) -> bool {
        match self {
            ItemFilter::Item(item) => stack.item_id() == *item,
            ItemFilter::Variant { item, damage } => {
                stack.item_id() == *item && stack.damage == *damage
            }
            ItemFilter::AnyOf(items) => items.contains(&stack.item_id()),
        }
    }
}
