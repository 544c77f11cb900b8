#![warn(missing_docs)]
//! Core primitives shared across the workspace: item stacks, filters and
//! slot categories.

pub mod error;
pub mod item;
pub mod slot;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use error::LayoutError;
pub use item::{ItemFilter, ItemId, ItemKind, ItemStack, DEFAULT_STACK_SIZE};
pub use slot::{SlotDefinition, SlotType};

/// Opaque identity of whoever is interacting with a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u64);

impl ActorId {
    /// Actor used by headless tools and tests.
    pub const SYSTEM: Self = Self(0);
}
