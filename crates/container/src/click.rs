//! Direct slot clicks.
//!
//! The container only guarantees the ghost-slot reset; everything else is
//! delegated to a [`ClickHandler`]. [`CursorClickHandler`] is the standard
//! handler that carries a stack on the cursor.

use serde::{Deserialize, Serialize};
use slotforge_core::{ActorId, ItemStack, SlotType};
use tracing::{debug, warn};

use crate::container::Container;

/// Mouse button used for a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickButton {
    /// Primary button: whole stacks.
    Left,
    /// Secondary button: halves and single items.
    Right,
}

/// How a click should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickMode {
    /// Pick up, place or swap with the cursor.
    Pickup,
    /// Shift-click quick transfer.
    QuickMove,
}

/// Single-slot click behaviour.
pub trait ClickHandler {
    /// Handle a click on `index`. Returns the stack now associated with the
    /// click (for the cursor handler, the cursor contents).
    fn click(
        &mut self,
        container: &mut Container,
        index: usize,
        button: ClickButton,
        mode: ClickMode,
        actor: ActorId,
    ) -> Option<ItemStack>;
}

impl Container {
    /// Direct click on a slot. Ghost slots are cleared before the handler
    /// runs, whatever the button.
    pub fn slot_click(
        &mut self,
        index: usize,
        button: ClickButton,
        mode: ClickMode,
        actor: ActorId,
        handler: &mut dyn ClickHandler,
    ) -> Option<ItemStack> {
        if index >= self.slot_count() {
            warn!(index, "click on missing slot");
            return None;
        }
        if self.slot_type(index) == Some(SlotType::Ghost) && self.has_stack(index) {
            self.set_stack(index, None);
        }
        handler.click(self, index, button, mode, actor)
    }
}

/// Click handler holding the stack attached to the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorClickHandler {
    cursor: Option<ItemStack>,
}

impl CursorClickHandler {
    /// Handler with an empty cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack currently on the cursor.
    pub fn cursor(&self) -> Option<&ItemStack> {
        self.cursor.as_ref()
    }

    /// Replace the cursor contents.
    pub fn set_cursor(&mut self, stack: Option<ItemStack>) {
        self.cursor = stack.filter(|stack| !stack.is_empty());
    }

    fn quick_move(
        &mut self,
        container: &mut Container,
        index: usize,
        actor: ActorId,
    ) -> Option<ItemStack> {
        let mut first = None;
        // Keep transferring while the slot still holds the same item.
        while let Some(moved) = container.transfer_stack_in_slot(actor, index) {
            let same = container
                .stack(index)
                .is_some_and(|left| left.can_stack_with(&moved));
            first.get_or_insert(moved);
            if !same {
                break;
            }
        }
        first
    }

    fn take_result(&mut self, container: &mut Container, index: usize, actor: ActorId) {
        let Some(result) = container.stack(index).cloned() else {
            return;
        };
        match self.cursor.as_mut() {
            None => self.cursor = Some(result.clone()),
            Some(cursor)
                if cursor.can_stack_with(&result)
                    && cursor.count + result.count <= cursor.max_stack_size() =>
            {
                cursor.count += result.count;
            }
            Some(_) => return,
        }
        container.set_stack(index, None);
        container.on_take(index, actor, &result);
    }

    fn pickup(
        &mut self,
        container: &mut Container,
        index: usize,
        button: ClickButton,
        actor: ActorId,
    ) {
        match container.slot_type(index) {
            Some(SlotType::CraftResult) => return self.take_result(container, index, actor),
            Some(SlotType::Ghost | SlotType::GhostOutput) => {
                // Ghost slots show a single copy and never consume the cursor.
                if let Some(cursor) = &self.cursor {
                    if container.slot_accepts(index, cursor) {
                        container.set_stack(index, Some(cursor.copy_with_count(1)));
                    }
                }
                return;
            }
            _ => {}
        }

        let held = container.stack(index).cloned();
        match (self.cursor.take(), held) {
            (None, None) => {}
            (None, Some(mut held)) => {
                let amount = match button {
                    ClickButton::Left => held.count,
                    ClickButton::Right => (held.count + 1) / 2,
                };
                if let Some(taken) = held.split(amount) {
                    container.set_stack(index, Some(held));
                    container.on_take(index, actor, &taken);
                    self.cursor = Some(taken);
                }
            }
            (Some(mut cursor), None) => {
                if container.slot_accepts(index, &cursor) {
                    let amount = match button {
                        ClickButton::Left => cursor.count,
                        ClickButton::Right => 1,
                    }
                    .min(container.slot_capacity(index, &cursor));
                    if let Some(placed) = cursor.split(amount) {
                        container.set_stack(index, Some(placed));
                    }
                }
                self.set_cursor(Some(cursor));
            }
            (Some(mut cursor), Some(mut held)) => {
                if !container.slot_accepts(index, &cursor) {
                    self.cursor = Some(cursor);
                    return;
                }
                if held.can_stack_with(&cursor) {
                    let capacity = container.slot_capacity(index, &cursor);
                    let room = capacity.saturating_sub(held.count);
                    let amount = match button {
                        ClickButton::Left => cursor.count,
                        ClickButton::Right => 1,
                    }
                    .min(room);
                    if amount > 0 {
                        held.count += amount;
                        cursor.count -= amount;
                        container.set_stack(index, Some(held));
                    }
                    self.set_cursor(Some(cursor));
                } else if cursor.count <= container.slot_capacity(index, &cursor) {
                    container.set_stack(index, Some(cursor));
                    container.on_take(index, actor, &held);
                    self.cursor = Some(held);
                } else {
                    self.cursor = Some(cursor);
                }
            }
        }
    }
}

impl ClickHandler for CursorClickHandler {
    fn click(
        &mut self,
        container: &mut Container,
        index: usize,
        button: ClickButton,
        mode: ClickMode,
        actor: ActorId,
    ) -> Option<ItemStack> {
        debug!(index, ?button, ?mode, "slot click");
        match mode {
            ClickMode::QuickMove => self.quick_move(container, index, actor),
            ClickMode::Pickup => {
                self.pickup(container, index, button, actor);
                self.cursor.clone()
            }
        }
    }
}
