use pegdeck_core::{
    ActivationLedger, CardDefinition, EventBus, InventoryStore, PickRejection, Rarity,
};
use proptest::prelude::*;

fn pool() -> Vec<CardDefinition> {
    (0..8u32)
        .map(|idx| {
            let def = CardDefinition::new(
                format!("card{idx}"),
                format!("Card {idx}"),
                Rarity::Common,
                idx % 5,
                "score-boost",
            );
            if idx % 2 == 0 {
                def.stacking(idx + 1)
            } else {
                def
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Remove(usize),
    Pick(usize),
    Unpick(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..8usize).prop_map(Op::Add),
        (0..8usize).prop_map(Op::Remove),
        (0..8usize).prop_map(Op::Pick),
        (0..8usize).prop_map(Op::Unpick),
    ]
}

proptest! {
    #[test]
    fn pick_invariants_hold_after_every_op(
        limit in 1u32..15,
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let cards = pool();
        let mut inv = InventoryStore::with_energy_limit(limit);
        let mut events = EventBus::default();
        for op in ops {
            match op {
                Op::Add(idx) => inv.add_card(&cards[idx], &mut events),
                Op::Remove(idx) => {
                    inv.remove_card(&cards[idx], &mut events);
                }
                Op::Pick(idx) => {
                    let before = inv.picked_ids();
                    let verdict = inv.can_pick(Some(&cards[idx]));
                    let picked = inv.try_pick(Some(&cards[idx]), &mut events);
                    prop_assert_eq!(picked, verdict.is_ok());
                    if !picked {
                        prop_assert_eq!(inv.picked_ids(), before);
                    }
                }
                Op::Unpick(idx) => {
                    inv.try_unpick(&cards[idx], &mut events);
                }
            }
            prop_assert!(inv.energy_used() <= inv.energy_limit());
            let mut ids = inv.picked_ids();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), inv.picked().len());
            for card in &cards {
                for stack in inv.stacks().iter().filter(|s| s.card.id == card.id) {
                    prop_assert!(stack.count >= 1 && stack.count <= card.stack_cap());
                }
            }
        }
    }

    #[test]
    fn add_then_remove_round_trips(idx in 0..8usize, prior in 0..4usize) {
        let cards = pool();
        let mut inv = InventoryStore::new();
        let mut events = EventBus::default();
        for _ in 0..prior {
            inv.add_card(&cards[idx], &mut events);
        }
        let before = inv.owned_count(&cards[idx].id);
        // A full stack absorbs the add, so the round trip only holds below the cap.
        prop_assume!(!cards[idx].stackable || before < cards[idx].stack_cap());
        inv.add_card(&cards[idx], &mut events);
        prop_assert!(inv.remove_card(&cards[idx], &mut events));
        prop_assert_eq!(inv.owned_count(&cards[idx].id), before);
    }

    #[test]
    fn stack_never_exceeds_cap(max in 1u32..10, extra in 0u32..10) {
        let card = CardDefinition::new("s", "S", Rarity::Rare, 1, "stone-breaker").stacking(max);
        let mut inv = InventoryStore::new();
        let mut events = EventBus::default();
        for _ in 0..(max + extra) {
            inv.add_card(&card, &mut events);
        }
        prop_assert_eq!(inv.owned_count("s"), max);
        prop_assert_eq!(inv.stacks().len(), 1);
    }

    #[test]
    fn repeated_activation_consumes_once(copies in 1u32..5, restarts in 1usize..6) {
        let card = CardDefinition::new("a", "A", Rarity::Common, 2, "mirror-shot").stacking(9);
        let mut inv = InventoryStore::new();
        let mut ledger = ActivationLedger::new();
        let mut events = EventBus::default();
        for _ in 0..copies {
            inv.add_card(&card, &mut events);
        }
        prop_assert!(inv.try_pick(Some(&card), &mut events));
        ledger.activate(1, &mut inv, &mut events);
        for _ in 0..restarts {
            prop_assert!(ledger.activate(1, &mut inv, &mut events).is_resumed());
        }
        prop_assert_eq!(inv.owned_count("a"), copies - 1);
    }
}

#[test]
fn stackable_plus_five_is_capped() {
    let card = CardDefinition::new("s", "S", Rarity::Epic, 1, "bonus-life").stacking(4);
    let mut inv = InventoryStore::new();
    let mut events = EventBus::default();
    for _ in 0..9 {
        inv.add_card(&card, &mut events);
    }
    assert_eq!(inv.owned_count("s"), 4);
}

#[test]
fn second_pick_is_duplicate() {
    let card = CardDefinition::new("d", "D", Rarity::Common, 1, "rescue");
    let mut inv = InventoryStore::new();
    let mut events = EventBus::default();
    assert!(inv.try_pick(Some(&card), &mut events));
    assert_eq!(inv.can_pick(Some(&card)), Err(PickRejection::Duplicate));
    assert!(!inv.try_pick(Some(&card), &mut events));
    assert_eq!(inv.picked().len(), 1);
}
