//! End-to-end hand scenarios driven entirely through the public `Table`
//! façade, cross-checked against the standalone pot module so the engine's
//! internal bookkeeping and the pure pot math never drift apart.

use holdem_table::betting::Action;
use holdem_table::events::{HandEventKind, HandHistory};
use holdem_table::money::Chips;
use holdem_table::pot::{distribute_all_pots, layer_pots, Payout};
use holdem_table::rng::SeededRng;
use holdem_table::table::{PlayerId, RakeSetting, TableConfig, TablePhase};
use holdem_table::Table;
use std::collections::{HashMap, HashSet};

fn seat(table: &mut Table, name: &str, stack: u128) -> PlayerId {
    let id = PlayerId::new(name);
    table.seat_player(id.clone(), Chips::new(stack)).unwrap();
    id
}

/// Applies `Call` where legal, else `Check`, until the hand ends.
fn drive_check_down(table: &mut Table) {
    while let Some(id) = table.get_state().current_player_id {
        let kinds = table.legal_actions(&id);
        let action = if kinds.contains(&holdem_table::betting::ActionKind::Call) {
            Action::Call { amount: None }
        } else {
            Action::Check
        };
        table.apply_action(&id, action).unwrap();
    }
}

/// Jams every actor all-in until the hand ends (no folds).
fn drive_all_in(table: &mut Table) {
    while let Some(id) = table.get_state().current_player_id {
        table.apply_action(&id, Action::AllIn { amount: None }).unwrap();
    }
}

/// Recomputes pot layering and distribution purely from the recorded event
/// log and asserts it matches what the engine actually paid out.
fn verify_history_against_pot_module(history: &HandHistory) {
    let mut contributed: HashMap<PlayerId, Chips> = HashMap::new();
    let mut folded: HashSet<PlayerId> = HashSet::new();
    let mut ranked = None;
    let mut recorded_payouts: HashMap<PlayerId, Chips> = HashMap::new();
    let mut recorded_rake = Chips::ZERO;

    for event in &history.events {
        match &event.kind {
            HandEventKind::BlindsPosted { contributions } => {
                for (id, amount) in contributions {
                    let entry = contributed.entry(id.clone()).or_insert(Chips::ZERO);
                    *entry = entry.add(*amount);
                }
            }
            HandEventKind::ActionTaken { player, action, moved } => {
                let entry = contributed.entry(player.clone()).or_insert(Chips::ZERO);
                *entry = entry.add(*moved);
                if matches!(action, Action::Fold) {
                    folded.insert(player.clone());
                }
            }
            HandEventKind::Showdown { ranked: r } => ranked = Some(r.clone()),
            HandEventKind::PotDistributed { payouts, rake } => {
                recorded_rake = *rake;
                for (id, amount) in payouts {
                    let entry = recorded_payouts.entry(id.clone()).or_insert(Chips::ZERO);
                    *entry = entry.add(*amount);
                }
            }
            _ => {}
        }
    }

    let rows: Vec<(PlayerId, Chips, bool)> = contributed
        .iter()
        .map(|(id, amount)| (id.clone(), *amount, !folded.contains(id)))
        .collect();
    let pots = layer_pots(&rows);

    let expected: Payout = match &ranked {
        Some(r) => {
            let rake_config = history.table_config.rake.map(|r| r.to_rake_config());
            distribute_all_pots(&pots, rake_config.as_ref(), r)
        }
        None => {
            let winner = contributed
                .keys()
                .find(|id| !folded.contains(*id))
                .expect("uncontested hand has exactly one non-folded player")
                .clone();
            let total: Chips = pots.iter().map(|p| p.total).sum();
            Payout {
                rake: Chips::ZERO,
                payouts: vec![(winner, total)],
                forfeited: Chips::ZERO,
            }
        }
    };

    let mut expected_payouts: HashMap<PlayerId, Chips> = HashMap::new();
    for (id, amount) in &expected.payouts {
        let entry = expected_payouts.entry(id.clone()).or_insert(Chips::ZERO);
        *entry = entry.add(*amount);
    }

    assert_eq!(expected.rake, recorded_rake, "rake mismatch");
    assert_eq!(expected_payouts, recorded_payouts, "payout mismatch");

    let total_pot: Chips = pots.iter().map(|p| p.total).sum();
    let total_out: Chips = recorded_payouts.values().copied().sum();
    assert_eq!(
        total_pot,
        total_out.add(recorded_rake).add(expected.forfeited),
        "chips were created or destroyed"
    );
}

fn config(seed: u32, rake: Option<RakeSetting>) -> TableConfig {
    TableConfig::new(2, 9, Chips::new(1), Chips::new(2), None, None, rake, Some(seed)).unwrap()
}

#[test]
fn heads_up_check_down_reaches_showdown() {
    let mut table = Table::new(config(42, None), Box::new(SeededRng::new(42)));
    seat(&mut table, "alice", 1000);
    seat(&mut table, "bob", 1000);
    table.start_hand().unwrap();
    assert_eq!(
        table.get_state().dealer_seat,
        Some(0),
        "a table's first hand seats the dealer at the first occupied seat"
    );

    drive_check_down(&mut table);

    let state = table.get_state();
    assert_eq!(state.phase, TablePhase::Idle);
    let history = table.get_last_hand_history().unwrap();
    assert!(history.events.iter().any(|e| matches!(e.kind, HandEventKind::Showdown { .. })));
    verify_history_against_pot_module(&history);

    let paid: Chips = history
        .events
        .iter()
        .filter_map(|e| match &e.kind {
            HandEventKind::PotDistributed { payouts, .. } => {
                Some(payouts.iter().map(|(_, c)| *c).sum::<Chips>())
            }
            _ => None,
        })
        .sum();
    assert_eq!(paid, Chips::new(4), "blinds-only check-down pot is exactly SB + BB");

    let mut stacks: Vec<u128> = state.players.iter().map(|p| p.stack.get()).collect();
    stacks.sort();
    assert_eq!(
        stacks,
        vec![998, 1002],
        "the showdown winner nets the 4-chip pot, the loser keeps what they didn't commit"
    );
}

#[test]
fn immediate_fold_awards_pot_uncontested() {
    let mut table = Table::new(config(2, None), Box::new(SeededRng::new(2)));
    let alice = seat(&mut table, "alice", 1000);
    let bob = seat(&mut table, "bob", 1000);
    table.start_hand().unwrap();

    let first_actor = table.get_state().current_player_id.unwrap();
    assert_eq!(first_actor, alice, "heads-up, the dealer/small blind acts first preflop");
    table.apply_action(&first_actor, Action::Fold).unwrap();

    let state = table.get_state();
    assert_eq!(state.phase, TablePhase::Idle);
    let history = table.get_last_hand_history().unwrap();
    assert!(!history.events.iter().any(|e| matches!(e.kind, HandEventKind::Showdown { .. })));
    verify_history_against_pot_module(&history);

    let alice_stack = state.players.iter().find(|p| p.id == alice).unwrap().stack;
    let bob_stack = state.players.iter().find(|p| p.id == bob).unwrap().stack;
    assert_eq!(alice_stack, Chips::new(999), "alice posted and lost the 1-chip small blind");
    assert_eq!(bob_stack, Chips::new(1001), "bob collects alice's small blind uncontested");
}

#[test]
fn three_way_uneven_all_in_produces_layered_side_pots() {
    let mut table = Table::new(config(3, None), Box::new(SeededRng::new(3)));
    seat(&mut table, "short", 10);
    seat(&mut table, "mid", 40);
    seat(&mut table, "deep", 200);
    table.start_hand().unwrap();

    drive_all_in(&mut table);

    let state = table.get_state();
    assert_eq!(state.phase, TablePhase::Idle);
    let history = table.get_last_hand_history().unwrap();
    verify_history_against_pot_module(&history);

    // the short stack can win at most what every opponent covered of its stack
    let total_paid: Chips = history
        .events
        .iter()
        .filter_map(|e| match &e.kind {
            HandEventKind::PotDistributed { payouts, .. } => Some(payouts.iter().map(|(_, c)| *c).sum::<Chips>()),
            _ => None,
        })
        .sum();
    assert!(total_paid.get() > 0);
}

#[test]
fn rake_is_capped_and_only_taken_at_showdown() {
    let rake = RakeSetting { percentage: 0.1, cap: Chips::new(5) };
    let mut table = Table::new(config(4, Some(rake)), Box::new(SeededRng::new(4)));
    seat(&mut table, "alice", 1000);
    seat(&mut table, "bob", 1000);
    table.start_hand().unwrap();

    drive_check_down(&mut table);

    let history = table.get_last_hand_history().unwrap();
    verify_history_against_pot_module(&history);

    let recorded_rake = history
        .events
        .iter()
        .find_map(|e| match &e.kind {
            HandEventKind::PotDistributed { rake, .. } => Some(*rake),
            _ => None,
        })
        .unwrap();
    assert!(recorded_rake <= Chips::new(5), "rake must respect the configured cap");
}

#[test]
fn repeated_all_in_hands_always_conserve_chips() {
    for seed in 10..15u32 {
        let mut table = Table::new(config(seed, None), Box::new(SeededRng::new(seed)));
        seat(&mut table, "a", 50 + seed as u128);
        seat(&mut table, "b", 120);
        seat(&mut table, "c", 300);
        table.start_hand().unwrap();
        drive_all_in(&mut table);
        let history = table.get_last_hand_history().unwrap();
        verify_history_against_pot_module(&history);
    }
}
