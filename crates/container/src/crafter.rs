//! Crafter collaborator for craft-result slots.

use slotforge_core::{ActorId, ItemStack};

/// Produces the stack shown in craft-result slots and is told when a player
/// takes it.
pub trait Crafter {
    /// Stack the craft-result slots should currently show.
    fn craft_result(&self) -> Option<ItemStack>;

    /// Called after `taken` was removed from a craft-result slot.
    fn on_result_taken(&mut self, actor: ActorId, taken: &ItemStack);
}
