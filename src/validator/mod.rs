/*
    This module checks that grammars are in Chomsky normal form
*/

use itertools::Itertools;
use thiserror::Error;

use crate::grammar::*;

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ViolationKind {
    #[error("alternative has no symbols")]
    Empty,
    #[error("empty terminal")]
    EmptyTerminal,
    #[error("unit production to nonterminal `{0}`")]
    LoneNonterminal(String),
    #[error("terminal {0} in a two-symbol alternative")]
    TerminalInPair(Symbol),
    #[error("alternative has {0} symbols, at most 2 are allowed")]
    TooLong(usize),
}

// One production that breaks the form. `alternative` indexes into the rewrite
// of `symbol`
#[derive(Debug, PartialEq, Eq, Clone, Error)]
#[error("`{}` alternative {}: {}", .symbol, .alternative + 1, .kind)]
pub struct FormViolation {
    pub symbol: String,
    pub alternative: usize,
    pub kind: ViolationKind,
}

// Checks a single alternative. A single non-empty terminal or exactly two
// nonterminals are accepted
pub fn check_alternative(alternative: &Alternative) -> Result<(), ViolationKind> {
    match alternative.as_slice() {
        [] => Err(ViolationKind::Empty),
        [Symbol::Terminal(t)] if t.is_empty() => Err(ViolationKind::EmptyTerminal),
        [Symbol::Terminal(_)] => Ok(()),
        [Symbol::Nonterminal(n)] => Err(ViolationKind::LoneNonterminal(n.clone())),
        [Symbol::Nonterminal(_), Symbol::Nonterminal(_)] => Ok(()),
        [first, second] => {
            let terminal = if first.is_terminal() { first } else { second };
            Err(ViolationKind::TerminalInPair(terminal.clone()))
        }
        longer => Err(ViolationKind::TooLong(longer.len())),
    }
}

pub fn rewrite_violations(symbol: &str, rewrite: &Rewrite) -> Vec<FormViolation> {
    rewrite.iter()
        .enumerate()
        .filter_map(|(alternative, alt)| check_alternative(alt).err().map(|kind| FormViolation {
            symbol: symbol.to_string(),
            alternative,
            kind
        }))
        .collect()
}

// Stops at the first rule that is not in normal form
pub fn is_cnf(grammar: &Grammar) -> bool {
    grammar.rules.values()
        .flatten()
        .all(|alternative| check_alternative(alternative).is_ok())
}

// Like is_cnf, but reports every offending alternative
pub fn check_cnf(grammar: &Grammar) -> Result<(), Vec<FormViolation>> {
    let violations = grammar.rules.iter()
        .sorted_by(|a, b| a.0.cmp(b.0))
        .flat_map(|(symbol, rewrite)| rewrite_violations(symbol, rewrite))
        .collect_vec();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
