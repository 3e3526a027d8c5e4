//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use crate::api::ChatRole;
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

// ============================================================================
// Test Helpers
// ============================================================================

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

/// Abstract action; reply actions are bound to a concrete turn id when applied
#[derive(Debug, Clone)]
enum Action {
    Type(String),
    Pick(usize),
    Submit(String),
    Reset,
    /// Resolve the current pending turn, if any
    Reply(String),
    Fail,
    /// Reply to an id that was pending at some earlier point
    StaleReply(usize),
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t\n]{1,4}",
        "[a-zA-Z0-9 ?!]{1,30}",
    ]
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        1 => arb_text().prop_map(Action::Type),
        1 => (0usize..8).prop_map(Action::Pick),
        3 => arb_text().prop_map(Action::Submit),
        1 => Just(Action::Reset),
        2 => "[a-zA-Z ]{0,20}".prop_map(Action::Reply),
        1 => Just(Action::Fail),
        1 => (0usize..4).prop_map(Action::StaleReply),
    ]
}

/// Drive `state` through `actions`, returning every state visited plus the
/// ids that were ever pending
fn run(actions: &[Action]) -> (Vec<ChatState>, Vec<TurnId>) {
    let mut state = ChatState::new(at(0));
    let mut states = vec![state.clone()];
    let mut seen_pending: Vec<TurnId> = Vec::new();

    for (step, action) in actions.iter().enumerate() {
        let when = at(i64::try_from(step).unwrap() + 1);
        let pending = match state.phase() {
            Phase::Pending { turn_id } => Some(turn_id),
            Phase::Idle => None,
        };
        let event = match action {
            Action::Type(text) => Event::InputChanged { text: text.clone() },
            Action::Pick(index) => Event::SuggestionPicked { index: *index },
            Action::Submit(text) => Event::Submit {
                text: text.clone(),
                at: when,
            },
            Action::Reset => Event::Reset { at: when },
            Action::Reply(content) => match pending {
                Some(turn_id) => Event::ReplyReceived {
                    turn_id,
                    content: content.clone(),
                    at: when,
                },
                None => continue,
            },
            Action::Fail => match pending {
                Some(turn_id) => Event::ReplyFailed {
                    turn_id,
                    reason: "boom".into(),
                    at: when,
                },
                None => continue,
            },
            Action::StaleReply(n) => match seen_pending.get(*n) {
                Some(turn_id) => Event::ReplyReceived {
                    turn_id: turn_id.clone(),
                    content: "late".into(),
                    at: when,
                },
                None => continue,
            },
        };

        if let Ok(result) = transition(&state, event) {
            state = result.new_state;
        }
        if let Phase::Pending { turn_id } = state.phase() {
            if !seen_pending.contains(&turn_id) {
                seen_pending.push(turn_id);
            }
        }
        states.push(state.clone());
    }

    (states, seen_pending)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn at_most_one_pending_turn(actions in proptest::collection::vec(arb_action(), 0..40)) {
        let (states, _) = run(&actions);
        for state in &states {
            prop_assert!(state.turns().iter().filter(|t| t.pending).count() <= 1);
        }
    }

    #[test]
    fn pending_turn_is_always_last_and_assistant(actions in proptest::collection::vec(arb_action(), 0..40)) {
        let (states, _) = run(&actions);
        for state in &states {
            if let Some(turn) = state.pending_turn() {
                prop_assert_eq!(turn.role, ChatRole::Assistant);
                prop_assert_eq!(&state.turns().last().unwrap().id, &turn.id);
            }
        }
    }

    #[test]
    fn turn_ids_are_unique_across_resets(actions in proptest::collection::vec(arb_action(), 0..40)) {
        let (states, _) = run(&actions);
        let mut roles: HashMap<TurnId, ChatRole> = HashMap::new();
        for state in &states {
            let ids: HashSet<&TurnId> = state.turns().iter().map(|t| &t.id).collect();
            prop_assert_eq!(ids.len(), state.turns().len());
            // An id always names the same logical turn
            for turn in state.turns() {
                let role = roles.entry(turn.id.clone()).or_insert(turn.role);
                prop_assert_eq!(*role, turn.role);
            }
        }
    }

    #[test]
    fn submit_grows_by_exactly_two_or_not_at_all(
        actions in proptest::collection::vec(arb_action(), 0..20),
        text in arb_text(),
    ) {
        let (states, _) = run(&actions);
        let state = states.last().unwrap();
        let before = state.turns().len();
        match transition(state, Event::Submit { text: text.clone(), at: at(1000) }) {
            Ok(result) => {
                prop_assert!(!text.trim().is_empty());
                prop_assert!(!state.is_pending());
                prop_assert_eq!(result.new_state.turns().len(), before + 2);
                prop_assert_eq!(
                    result.effects.iter().filter(|e| matches!(e, Effect::RequestReply { .. })).count(),
                    1
                );
            }
            Err(TransitionError::EmptyInput) => prop_assert!(text.trim().is_empty()),
            Err(TransitionError::ReplyPending) => prop_assert!(state.is_pending()),
            Err(other) => prop_assert!(false, "unexpected rejection: {other}"),
        }
    }

    #[test]
    fn reset_always_yields_single_greeting(actions in proptest::collection::vec(arb_action(), 0..40)) {
        let (states, _) = run(&actions);
        let result = transition(states.last().unwrap(), Event::Reset { at: at(1000) }).unwrap();
        let turns = result.new_state.turns();
        prop_assert_eq!(turns.len(), 1);
        prop_assert_eq!(turns[0].role, ChatRole::Assistant);
        prop_assert!(!turns[0].pending);
        prop_assert_eq!(&turns[0].content, GREETING);
    }

    #[test]
    fn only_the_live_pending_turn_accepts_replies(actions in proptest::collection::vec(arb_action(), 0..40)) {
        let (states, seen) = run(&actions);
        let state = states.last().unwrap();
        for turn_id in seen {
            let event = Event::ReplyReceived { turn_id, content: "x".into(), at: at(2000) };
            if let Ok(result) = transition(state, event) {
                // Accepted only when resolving the live pending turn
                prop_assert!(state.is_pending());
                prop_assert!(!result.new_state.is_pending());
                prop_assert_eq!(result.new_state.turns().len(), state.turns().len());
            }
        }
    }

    #[test]
    fn resolution_preserves_sequence_order(actions in proptest::collection::vec(arb_action(), 0..40)) {
        let (states, _) = run(&actions);
        for pair in states.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            if before.is_pending() && !after.is_pending() && before.turns().len() == after.turns().len() {
                let ids_before: Vec<&TurnId> = before.turns().iter().map(|t| &t.id).collect();
                let ids_after: Vec<&TurnId> = after.turns().iter().map(|t| &t.id).collect();
                prop_assert_eq!(ids_before, ids_after);
            }
        }
    }
}
