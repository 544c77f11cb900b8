//! End-to-end quick transfer scenarios over player + machine layouts.

use slotforge_container::{
    ActorId, ClickButton, ClickMode, Container, CursorClickHandler, ItemStack, SlotType,
    TransferOutcome,
};
use slotforge_testkit::{
    assert_json_snapshot, furnace_with_player, machine_with_player, total_items,
    ContainerSnapshot, COAL, DIRT, FURNACE_FUEL, FURNACE_GHOST, FURNACE_GHOST_OUTPUT,
    FURNACE_INPUT, FURNACE_OUTPUT, STONE,
};
use std::path::Path;

const ACTOR: ActorId = ActorId(42);
const OUTPUT: usize = 36;

fn count(container: &Container, index: usize) -> u32 {
    container.stack(index).map_or(0, |stack| stack.count)
}

fn fill(container: &mut Container, slots: std::ops::Range<usize>, stack: ItemStack) {
    for index in slots {
        container.set_stack(index, Some(stack.clone()));
    }
}

#[test]
fn output_goes_to_player_storage_from_the_end() {
    let mut container = machine_with_player();
    container.set_stack(OUTPUT, Some(ItemStack::new(STONE, 64)));
    container.set_stack(0, Some(ItemStack::new(STONE, 10)));

    let moved = container.transfer_stack_in_slot(ACTOR, OUTPUT);

    assert_eq!(moved, Some(ItemStack::new(STONE, 64)));
    assert!(container.stack(OUTPUT).is_none());
    // Player storage is tried before the hotbar and scanned in reverse.
    assert_eq!(count(&container, 35), 64);
    assert_eq!(count(&container, 0), 10);
    assert_eq!(total_items(&container), 74);
}

#[test]
fn output_tops_up_hotbar_when_storage_is_full() {
    let mut container = machine_with_player();
    fill(&mut container, 9..36, ItemStack::new(DIRT, 64));
    container.set_stack(OUTPUT, Some(ItemStack::new(STONE, 64)));
    container.set_stack(0, Some(ItemStack::new(STONE, 10)));

    let moved = container.transfer_stack_in_slot(ACTOR, OUTPUT);

    assert_eq!(moved.map(|stack| stack.count), Some(64));
    assert_eq!(count(&container, 0), 64);
    assert_eq!(count(&container, 1), 10);
    assert!(container.stack(OUTPUT).is_none());
}

#[test]
fn oversized_source_tops_up_without_overflow() {
    let mut container = machine_with_player();
    fill(&mut container, 9..36, ItemStack::new(DIRT, 64));
    container.set_stack(0, Some(ItemStack::new(STONE, 10)));
    container.set_stack(OUTPUT, Some(ItemStack::new(STONE, u32::MAX - 3)));
    let before = total_items(&container);

    let moved = container.transfer_stack_in_slot(ACTOR, OUTPUT);

    assert_eq!(moved.map(|stack| stack.count), Some(u32::MAX - 3));
    assert_eq!(count(&container, 0), 64);
    assert_eq!(count(&container, 1), 64);
    assert_eq!(count(&container, OUTPUT), u32::MAX - 3 - 54 - 64);
    assert_eq!(total_items(&container), before);
}

#[test]
fn reverse_scan_spreads_partial_absorption() {
    let mut container = machine_with_player();
    fill(&mut container, 9..36, ItemStack::new(STONE, 60));
    container.set_stack(OUTPUT, Some(ItemStack::new(STONE, 64)));

    assert!(container.transfer_stack_in_slot(ACTOR, OUTPUT).is_some());

    // Sixteen slots from the end each take four.
    for index in 20..36 {
        assert_eq!(count(&container, index), 64, "slot {index}");
    }
    for index in 9..20 {
        assert_eq!(count(&container, index), 60, "slot {index}");
    }
    assert!(container.stack(OUTPUT).is_none());
}

#[test]
fn remainder_stays_in_source() {
    let mut container = machine_with_player();
    fill(&mut container, 9..36, ItemStack::new(DIRT, 64));
    fill(&mut container, 0..9, ItemStack::new(STONE, 63));
    container.set_stack(OUTPUT, Some(ItemStack::new(STONE, 64)));

    let moved = container.transfer_stack_in_slot(ACTOR, OUTPUT);

    assert_eq!(moved.map(|stack| stack.count), Some(64));
    assert_eq!(count(&container, OUTPUT), 55);
    assert!((0..9).all(|index| count(&container, index) == 64));
}

#[test]
fn empty_output_is_a_no_op() {
    let mut container = machine_with_player();
    container.set_stack(0, Some(ItemStack::new(STONE, 10)));
    container.take_changes();
    let before = ContainerSnapshot::capture(&container);

    assert_eq!(container.transfer_stack_in_slot(ACTOR, OUTPUT), None);
    assert_eq!(container.quick_move(ACTOR, OUTPUT), TransferOutcome::EmptySource);
    assert_eq!(ContainerSnapshot::capture(&container), before);
    assert!(container.pending_changes().is_empty());
}

#[test]
fn full_destinations_leave_source_untouched() {
    let mut container = machine_with_player();
    fill(&mut container, 0..36, ItemStack::new(DIRT, 64));
    container.set_stack(OUTPUT, Some(ItemStack::new(STONE, 64)));
    container.take_changes();

    assert_eq!(container.quick_move(ACTOR, OUTPUT), TransferOutcome::NoTransfer);
    assert_eq!(container.stack(OUTPUT), Some(&ItemStack::new(STONE, 64)));
    assert!(container.pending_changes().is_empty());
}

#[test]
fn specific_slot_wins_over_player_storage() {
    let mut container = furnace_with_player();
    container.set_stack(FURNACE_OUTPUT, Some(ItemStack::new(COAL, 20)));

    assert!(container
        .transfer_stack_in_slot(ACTOR, FURNACE_OUTPUT)
        .is_some());
    assert_eq!(count(&container, FURNACE_FUEL), 20);
    assert_eq!(count(&container, FURNACE_INPUT), 0);
    assert_eq!(total_items(&container), 20);
}

#[test]
fn furnace_contents_match_golden_after_quick_transfers() {
    let mut container = furnace_with_player();
    container.set_stack(FURNACE_OUTPUT, Some(ItemStack::new(COAL, 20)));
    container.set_stack(0, Some(ItemStack::new(STONE, 30)));

    assert!(container.transfer_stack_in_slot(ACTOR, 0).is_some());
    assert!(container
        .transfer_stack_in_slot(ACTOR, FURNACE_OUTPUT)
        .is_some());

    let snapshot = ContainerSnapshot::capture(&container);
    let occupied: Vec<_> = snapshot.occupied().collect();
    let golden = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/snapshots/furnace_after_quick_transfer.json");
    assert_json_snapshot(golden, &occupied).expect("furnace snapshot");
}

#[test]
fn player_items_prefer_specific_then_input() {
    let mut container = furnace_with_player();
    container.set_stack(3, Some(ItemStack::new(COAL, 8)));
    container.set_stack(20, Some(ItemStack::new(STONE, 30)));

    container.transfer_stack_in_slot(ACTOR, 3);
    container.transfer_stack_in_slot(ACTOR, 20);

    assert_eq!(count(&container, FURNACE_FUEL), 8);
    assert_eq!(count(&container, FURNACE_INPUT), 30);
    assert!(container.stack(3).is_none());
    assert!(container.stack(20).is_none());
}

#[test]
fn storage_falls_back_to_hotbar_and_back() {
    let mut container = furnace_with_player();
    container.set_stack(FURNACE_INPUT, Some(ItemStack::new(DIRT, 1)));
    container.set_stack(12, Some(ItemStack::new(STONE, 5)));

    container.transfer_stack_in_slot(ACTOR, 12);
    assert_eq!(count(&container, 0), 5);

    container.transfer_stack_in_slot(ACTOR, 0);
    // Hotbar sends to storage scanning forward.
    assert_eq!(count(&container, 9), 5);
}

#[test]
fn specific_source_returns_to_player() {
    let mut container = furnace_with_player();
    container.set_stack(FURNACE_FUEL, Some(ItemStack::new(COAL, 12)));

    let moved = container.transfer_stack_in_slot(ACTOR, FURNACE_FUEL);

    assert_eq!(moved, Some(ItemStack::new(COAL, 12)));
    assert_eq!(count(&container, 35), 12);
    assert!(container.stack(FURNACE_FUEL).is_none());
}

#[test]
fn ghost_slots_never_transfer() {
    let mut container = furnace_with_player();
    container.set_stack(FURNACE_GHOST, Some(ItemStack::new(STONE, 1)));
    container.set_stack(FURNACE_GHOST_OUTPUT, Some(ItemStack::new(STONE, 1)));

    assert_eq!(container.quick_move(ACTOR, FURNACE_GHOST), TransferOutcome::Rejected);
    assert_eq!(
        container.transfer_stack_in_slot(ACTOR, FURNACE_GHOST_OUTPUT),
        None
    );
    assert_eq!(count(&container, FURNACE_GHOST), 1);
    assert_eq!(count(&container, FURNACE_GHOST_OUTPUT), 1);
    assert_eq!(total_items(&container), 2);
}

#[test]
fn changes_name_source_and_destination() {
    let mut container = machine_with_player();
    container.set_stack(OUTPUT, Some(ItemStack::new(STONE, 3)));
    container.take_changes();

    container.transfer_stack_in_slot(ACTOR, OUTPUT);
    let changes = container.take_changes();

    assert!(changes.slots.contains(&OUTPUT));
    assert!(changes.slots.contains(&35));
    assert!(changes.inventories.contains("machine"));
    assert!(changes.inventories.contains("player"));
}

#[test]
fn shift_click_repeats_while_item_remains() {
    let mut container = furnace_with_player();
    container.set_stack(FURNACE_INPUT, Some(ItemStack::new(STONE, 60)));
    container.set_stack(0, Some(ItemStack::new(STONE, 64)));
    let mut handler = CursorClickHandler::new();

    let first = container.slot_click(
        0,
        ClickButton::Left,
        ClickMode::QuickMove,
        ACTOR,
        &mut handler,
    );

    assert_eq!(first.map(|stack| stack.count), Some(64));
    assert_eq!(count(&container, FURNACE_INPUT), 64);
    assert_eq!(count(&container, 9), 60);
    assert!(container.stack(0).is_none());
    assert_eq!(container.slot_type(9), Some(SlotType::PlayerInventory));
}

#[test]
fn ghost_click_resets_display() {
    let mut container = furnace_with_player();
    container.set_stack(FURNACE_GHOST, Some(ItemStack::new(STONE, 1)));
    let mut handler = CursorClickHandler::new();

    container.slot_click(
        FURNACE_GHOST,
        ClickButton::Right,
        ClickMode::QuickMove,
        ACTOR,
        &mut handler,
    );

    assert!(container.stack(FURNACE_GHOST).is_none());
}
