//! This module provides the parser for Turing Machine definitions, utilizing the `pest` crate.
//! The grammar in `grammar.pest` describes a line-oriented format: an optional head position
//! and tape, then the blank symbol, initial state, final state, and one transition rule per line.

use crate::types::{Definition, Direction, Program, Symbol, TransitionRule, TuringMachineError};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::HashSet;

/// Derives a `PestParser` for the Turing Machine grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TuringMachineParser;

/// Parses a definition without a tape section.
///
/// The machine starts on a single blank cell with the head on it.
///
/// # Arguments
///
/// * `input` - A string slice containing the Turing Machine definition.
///
/// # Returns
///
/// * `Ok(Definition)` if the input is successfully parsed.
/// * `Err(TuringMachineError::ParseError)` if there are any syntax errors, invalid
///   directions or duplicated rules.
pub fn parse(input: &str) -> Result<Definition, TuringMachineError> {
    parse_rule(Rule::program, input)
}

/// Parses a definition that starts with a head position line and a tape line.
pub fn parse_with_tape(input: &str) -> Result<Definition, TuringMachineError> {
    parse_rule(Rule::program_with_tape, input)
}

fn parse_rule(rule: Rule, input: &str) -> Result<Definition, TuringMachineError> {
    let root = TuringMachineParser::parse(rule, input.trim())
        .map_err(|e| TuringMachineError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| TuringMachineError::ValidationError("Empty definition".to_string()))?;

    parse_definition(root)
}

/// Builds a `Definition` from a `Pair<Rule::program>` or `Pair<Rule::program_with_tape>`.
fn parse_definition(pair: Pair<Rule>) -> Result<Definition, TuringMachineError> {
    let mut head: Option<(i64, Span)> = None;
    let mut tape: Option<Vec<Symbol>> = None;
    let mut blank: Option<Symbol> = None;
    let mut initial_state: Option<String> = None;
    let mut final_state: Option<String> = None;
    let mut rules = Vec::new();

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::head => head = Some((parse_head(&p)?, p.as_span())),
            Rule::tape => tape = Some(p.into_inner().map(|s| s.as_str().to_string()).collect()),
            Rule::blank => blank = Some(p.as_str().to_string()),
            Rule::initial_state => initial_state = Some(p.as_str().to_string()),
            Rule::final_state => final_state = Some(p.as_str().to_string()),
            Rule::transitions => rules = parse_transitions(p)?,
            _ => {} // EOI
        }
    }

    let blank = check_required_rule(blank, "blank symbol")?;
    let initial_state = check_required_rule(initial_state, "initial state")?;
    let final_state = check_required_rule(final_state, "final state")?;

    let (head, tape) = match (head, tape) {
        (Some((head, span)), Some(tape)) => {
            check_head_position(head, tape.len(), span)?;
            (head, tape)
        }
        _ => (0, vec![blank.clone()]),
    };

    Ok(Definition {
        program: Program::new(blank, initial_state, final_state, rules)?,
        head,
        tape,
    })
}

/// Parses the signed head position from a `Pair<Rule::head>`.
fn parse_head(pair: &Pair<Rule>) -> Result<i64, TuringMachineError> {
    pair.as_str()
        .parse::<i64>()
        .map_err(|e| parse_error(&format!("Invalid head position: {e}"), pair.as_span()))
}

/// Parses every rule line, rejecting a repeated `(state, input)` pair at its own span.
fn parse_transitions(pair: Pair<Rule>) -> Result<Vec<TransitionRule>, TuringMachineError> {
    let mut seen = HashSet::new();
    let mut rules = Vec::new();

    for transition_pair in pair.into_inner() {
        let span = transition_pair.as_span();
        let rule = parse_transition(transition_pair)?;

        if !seen.insert((rule.state.clone(), rule.read.clone())) {
            return Err(parse_error(
                &format!(
                    "Duplicate transition rule for state {} and symbol {:?}",
                    rule.state, rule.read
                ),
                span,
            ));
        }

        rules.push(rule);
    }

    Ok(rules)
}

/// Parses `state input next_state output move` from a `Pair<Rule::transition>`.
fn parse_transition(pair: Pair<Rule>) -> Result<TransitionRule, TuringMachineError> {
    let span = pair.as_span();
    let fields: Vec<Pair<Rule>> = pair.into_inner().collect();

    let [state, read, next_state, write, direction] = fields.as_slice() else {
        return Err(parse_error(
            "Expected: state input next_state output move",
            span,
        ));
    };

    Ok(TransitionRule::new(
        state.as_str(),
        read.as_str(),
        next_state.as_str(),
        write.as_str(),
        parse_direction(direction)?,
    ))
}

/// Parses a move. Only left and right are accepted.
fn parse_direction(pair: &Pair<Rule>) -> Result<Direction, TuringMachineError> {
    pair.as_str()
        .parse::<Direction>()
        .map_err(|e| parse_error(&e.to_string(), pair.as_span()))
}

/// Creates a `TuringMachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TuringMachineError {
    TuringMachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Checks if a required line is present, returning an `Err` if it's missing.
fn check_required_rule<T>(value: Option<T>, name: &str) -> Result<T, TuringMachineError> {
    value.ok_or_else(|| TuringMachineError::ValidationError(format!("Missing {name}")))
}

/// The engine grows the tape one cell per step, so the head may start at most one cell
/// outside the tape.
fn check_head_position(head: i64, len: usize, span: Span) -> Result<(), TuringMachineError> {
    if head < -1 || head > len as i64 {
        return Err(parse_error(
            &format!("Head position {head} is outside the tape (length {len})"),
            span,
        ));
    }

    Ok(())
}
