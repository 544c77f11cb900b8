//! Craft-result slots: crafter output, pickup notification and transfer
//! rejection.

use slotforge_container::{
    ActorId, ClickButton, ClickMode, Container, ContainerLayout, Crafter, CursorClickHandler,
    ItemStack, SlotType, TransferOutcome,
};
use slotforge_testkit::{add_player_hotbar_first, build_empty, STONE};
use std::cell::RefCell;
use std::rc::Rc;

const RESULT: usize = 36;

struct Bench {
    taken: Rc<RefCell<Vec<u32>>>,
}

impl Crafter for Bench {
    fn craft_result(&self) -> Option<ItemStack> {
        Some(ItemStack::new(STONE, 4))
    }

    fn on_result_taken(&mut self, _actor: ActorId, taken: &ItemStack) {
        self.taken.borrow_mut().push(taken.count);
    }
}

fn bench() -> (Container, Rc<RefCell<Vec<u32>>>) {
    let mut layout = ContainerLayout::new();
    add_player_hotbar_first(&mut layout);
    layout
        .declare_inventory("result", 1)
        .add_slot(SlotType::CraftResult, "result", 0, 124, 35);
    let mut container = build_empty(layout);
    let taken = Rc::new(RefCell::new(Vec::new()));
    container.set_crafter(Box::new(Bench {
        taken: Rc::clone(&taken),
    }));
    container.refresh_craft_results();
    (container, taken)
}

#[test]
fn craft_result_is_not_quick_transferable() {
    let (mut container, taken) = bench();
    assert_eq!(
        container.quick_move(ActorId(1), RESULT),
        TransferOutcome::Unclassifiable
    );
    assert_eq!(container.stack(RESULT).map(|s| s.count), Some(4));
    assert!(taken.borrow().is_empty());
}

#[test]
fn craft_result_rejects_placed_items() {
    let (mut container, _) = bench();
    container.set_stack(RESULT, None);
    assert!(!container.slot_accepts(RESULT, &ItemStack::new(STONE, 1)));

    let mut stack = ItemStack::new(STONE, 8);
    assert!(!container.merge_item_stack(&mut stack, RESULT, RESULT + 1, false));
}

#[test]
fn taking_the_result_notifies_the_crafter() {
    let (mut container, taken) = bench();
    let mut handler = CursorClickHandler::new();

    container.slot_click(RESULT, ClickButton::Left, ClickMode::Pickup, ActorId(1), &mut handler);
    assert_eq!(handler.cursor().map(|s| s.count), Some(4));
    assert!(container.stack(RESULT).is_none());

    container.refresh_craft_results();
    container.slot_click(RESULT, ClickButton::Right, ClickMode::Pickup, ActorId(1), &mut handler);
    assert_eq!(handler.cursor().map(|s| s.count), Some(8));
    assert_eq!(taken.borrow().as_slice(), &[4, 4]);
}
