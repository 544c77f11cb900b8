//! Ready-made layouts and containers for tests.
//!
//! Player slots are laid out hotbar first so flattened indices `0..36` line
//! up with player inventory cells: hotbar `0..9`, storage `9..36`.

use slotforge_container::{
    Container, ContainerLayout, Inventory, SimpleInventory, HOTBAR_SIZE, PLAYER_INVENTORY,
    PLAYER_INVENTORY_SIZE, SLOT_SPACING,
};
use slotforge_core::{ItemFilter, ItemKind, SlotType};

/// Name of the machine inventory in fixture layouts.
pub const MACHINE: &str = "machine";

/// Plain stackable item.
pub const STONE: ItemKind = ItemKind::new(1);
/// Second plain stackable item.
pub const DIRT: ItemKind = ItemKind::new(3);
/// Item accepted by the fuel slot of [`furnace_layout`].
pub const COAL: ItemKind = ItemKind::new(263);
/// Item that stacks to 16.
pub const PEARL: ItemKind = ItemKind::new(368).with_max_stack_size(16);
/// Unstackable item.
pub const SWORD: ItemKind = ItemKind::new(267).with_max_stack_size(1);

/// Flattened index of the furnace fuel slot.
pub const FURNACE_FUEL: usize = 36;
/// Flattened index of the furnace input slot.
pub const FURNACE_INPUT: usize = 37;
/// Flattened index of the furnace output slot.
pub const FURNACE_OUTPUT: usize = 38;
/// Flattened index of the furnace ghost preview slot.
pub const FURNACE_GHOST: usize = 39;
/// Flattened index of the furnace ghost output slot.
pub const FURNACE_GHOST_OUTPUT: usize = 40;

/// Append hotbar then storage slots for the player inventory.
pub fn add_player_hotbar_first(layout: &mut ContainerLayout) {
    layout.declare_inventory(PLAYER_INVENTORY, PLAYER_INVENTORY_SIZE);
    layout.add_slot_range(
        SlotType::PlayerHotbar,
        PLAYER_INVENTORY,
        0,
        8,
        142,
        HOTBAR_SIZE,
        SLOT_SPACING,
    );
    layout.add_slot_box(
        SlotType::PlayerInventory,
        PLAYER_INVENTORY,
        HOTBAR_SIZE,
        8,
        84,
        9,
        SLOT_SPACING,
        3,
        SLOT_SPACING,
    );
}

/// Player slots plus one output slot at index 36.
pub fn machine_layout() -> ContainerLayout {
    let mut layout = ContainerLayout::new();
    add_player_hotbar_first(&mut layout);
    layout
        .declare_inventory(MACHINE, 1)
        .add_slot(SlotType::Output, MACHINE, 0, 116, 35);
    layout
}

/// Player slots plus a furnace: coal-only fuel, input, output and two ghost
/// previews at indices 36..41.
pub fn furnace_layout() -> ContainerLayout {
    let mut layout = ContainerLayout::new();
    add_player_hotbar_first(&mut layout);
    layout
        .declare_inventory(MACHINE, 5)
        .add_specific_slot(ItemFilter::Item(COAL.id), MACHINE, 0, 56, 53)
        .add_slot(SlotType::Input, MACHINE, 1, 56, 17)
        .add_slot(SlotType::Output, MACHINE, 2, 116, 35)
        .add_slot(SlotType::Ghost, MACHINE, 3, 8, 8)
        .add_slot(SlotType::GhostOutput, MACHINE, 4, 26, 8);
    layout
}

/// Build a container from a layout, creating an empty inventory for every
/// declared name.
pub fn build_empty(layout: ContainerLayout) -> Container {
    let inventories: Vec<(String, Box<dyn Inventory>)> = layout
        .inventories
        .iter()
        .map(|decl| {
            (
                decl.name.clone(),
                Box::new(SimpleInventory::new(decl.size)) as Box<dyn Inventory>,
            )
        })
        .collect();
    Container::build(layout, inventories).expect("fixture layout is valid")
}

/// [`machine_layout`] with empty inventories.
pub fn machine_with_player() -> Container {
    build_empty(machine_layout())
}

/// [`furnace_layout`] with empty inventories.
pub fn furnace_with_player() -> Container {
    build_empty(furnace_layout())
}

/// Sum of every count in the container.
pub fn total_items(container: &Container) -> u64 {
    (0..container.slot_count())
        .filter_map(|index| container.stack(index))
        .map(|stack| u64::from(stack.count))
        .sum()
}
