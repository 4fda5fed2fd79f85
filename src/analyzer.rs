//! This module provides functions for analyzing Turing Machine programs to detect likely
//! mistakes before execution: a final state nothing leads to, states that are entered but
//! have no rules, and rules that can never fire.
//!
//! Findings are warnings. A program that never halts is still a valid program.

use crate::types::{Program, State};
use std::collections::{BTreeSet, HashSet, VecDeque};
use thiserror::Error;

/// Represents a suspicious construct found during the analysis of a Turing Machine program.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum AnalysisWarning {
    /// No rule moves the machine into the final state, so it can never halt.
    #[error("Final state {0} is never the target of a transition")]
    FinalStateUnreachable(State),
    /// Reachable states that are not final and have no rules; entering one always ends
    /// in an undefined transition.
    #[error("States without transitions: {0:?}")]
    DeadEndStates(Vec<State>),
    /// States that have rules but cannot be reached from the initial state.
    #[error("Unreachable states detected: {0:?}")]
    UnreachableStates(Vec<State>),
    /// The machine stops on entering the final state, so its rules never fire.
    #[error("Transitions from final state {0} are never applied")]
    FinalStateHasTransitions(State),
}

/// Analyzes a given Turing Machine `Program` for likely mistakes.
///
/// # Arguments
///
/// * `program` - A reference to the `Program` to be analyzed.
///
/// # Returns
///
/// * A vector of warnings, empty if nothing suspicious was found.
pub fn analyze(program: &Program) -> Vec<AnalysisWarning> {
    [
        check_final_state_reachable,
        check_dead_end_states,
        check_unreachable_states,
        check_final_state_transitions,
    ]
    .iter()
    .filter_map(|f| f(program))
    .collect()
}

/// Checks that at least one rule targets the final state.
fn check_final_state_reachable(program: &Program) -> Option<AnalysisWarning> {
    let final_state = program.final_state();
    if program.initial_state() == final_state {
        return None;
    }

    let targeted = program
        .rules()
        .iter()
        .any(|rule| rule.next_state == final_state);

    (!targeted).then(|| AnalysisWarning::FinalStateUnreachable(final_state.to_string()))
}

/// Checks for reachable non-final states with no outgoing rules.
fn check_dead_end_states(program: &Program) -> Option<AnalysisWarning> {
    let states: Vec<State> = reachable_states(program)
        .into_iter()
        .filter(|state| {
            state != program.final_state() && program.transitions_from(state).is_none()
        })
        .collect();

    (!states.is_empty()).then_some(AnalysisWarning::DeadEndStates(states))
}

/// Checks for states with rules that the initial state never leads to.
fn check_unreachable_states(program: &Program) -> Option<AnalysisWarning> {
    let reachable = reachable_states(program);

    let states: Vec<State> = program
        .states()
        .into_iter()
        .filter(|state| program.transitions_from(state).is_some() && !reachable.contains(*state))
        .map(str::to_string)
        .collect();

    (!states.is_empty()).then_some(AnalysisWarning::UnreachableStates(states))
}

/// Checks whether any rule leaves the final state.
fn check_final_state_transitions(program: &Program) -> Option<AnalysisWarning> {
    let final_state = program.final_state();

    program
        .transitions_from(final_state)
        .map(|_| AnalysisWarning::FinalStateHasTransitions(final_state.to_string()))
}

/// Returns the states reachable from the initial state, sorted.
///
/// Traversal stops at the final state since the machine halts there.
fn reachable_states(program: &Program) -> BTreeSet<State> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([program.initial_state()]);

    while let Some(state) = queue.pop_front() {
        if !visited.insert(state) || state == program.final_state() {
            continue;
        }

        if let Some(transitions) = program.transitions_from(state) {
            queue.extend(transitions.values().map(|t| t.next_state.as_str()));
        }
    }

    visited.into_iter().map(str::to_string).collect()
}
