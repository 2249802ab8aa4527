/*
    This module decides membership with the CYK chart parser
*/

mod table;

use std::collections::HashMap;

use itertools::Itertools;
use thiserror::Error;

use crate::grammar::*;
use crate::validator::{check_cnf, FormViolation};
pub use table::ParseTable;

#[derive(Debug, PartialEq, Error)]
pub enum ParseError {
    // The chart construction is only correct for grammars in normal form
    #[error("grammar is not in Chomsky normal form ({} violation(s))", .0.len())]
    NotCnf(Vec<FormViolation>),
    #[error("input has {len} tokens, the limit is {limit}")]
    InputTooLong { len: usize, limit: usize },
    #[error("a parse table for {len} tokens does not fit in memory")]
    TableTooLarge { len: usize },
}

pub type Result<T> = std::result::Result<T, ParseError>;

// Outcome of one parse. The table stays available for inspection
#[derive(Debug, Clone, PartialEq)]
pub struct Parse {
    pub accepted: bool,
    pub table: ParseTable,
}

// A binary production head -> left right, by nonterminal index
#[derive(Debug, Clone, Copy)]
struct Binary {
    head: usize,
    left: usize,
    right: usize,
}

// A validated grammar in index form, reusable across inputs
#[derive(Debug)]
pub struct Parser {
    names: Vec<String>,
    units: HashMap<String, Vec<usize>>,
    binaries: Vec<Binary>,
    start: Option<usize>,
    max_len: Option<usize>,
}

impl Parser {
    // Refuses grammars that are not in normal form
    pub fn new(grammar: &Grammar) -> Result<Self> {
        check_cnf(grammar).map_err(ParseError::NotCnf)?;

        let names = grammar.nonterminals().into_iter().cloned().collect_vec();
        let index: HashMap<&str, usize> = names.iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let mut units: HashMap<String, Vec<usize>> = HashMap::new();
        let mut binaries = Vec::new();
        for (head, name) in names.iter().enumerate() {
            for alternative in &grammar.rules[name] {
                match alternative.as_slice() {
                    [Symbol::Terminal(t)] => {
                        let heads = units.entry(t.clone()).or_default();
                        if !heads.contains(&head) {
                            heads.push(head);
                        }
                    }
                    [Symbol::Nonterminal(b), Symbol::Nonterminal(c)] => {
                        // Undefined nonterminals never appear in a cell, so
                        // productions using them can never fire
                        if let (Some(&left), Some(&right)) = (index.get(b.as_str()), index.get(c.as_str())) {
                            binaries.push(Binary { head, left, right });
                        }
                    }
                    _ => unreachable!("checked by check_cnf"),
                }
            }
        }

        let start = index.get(grammar.start_symbol.as_str()).copied();

        Ok(Parser { names, units, binaries, start, max_len: None })
    }

    // Inputs longer than `limit` are refused instead of parsed
    pub fn with_max_len(mut self, limit: usize) -> Self {
        self.max_len = Some(limit);
        self
    }

    pub fn binary_count(&self) -> usize {
        self.binaries.len()
    }

    pub fn parse<S: AsRef<str>>(&self, input: &[S]) -> Result<Parse> {
        if let Some(limit) = self.max_len {
            if input.len() > limit {
                return Err(ParseError::InputTooLong { len: input.len(), limit });
            }
        }

        let table = self.build_table(input, |i, j| i..j)?;

        // No CNF grammar derives the empty sequence
        let accepted = match (self.start, input.len()) {
            (Some(start), n) if n > 0 => table.contains(0, n - 1, start),
            _ => false,
        };

        Ok(Parse { accepted, table })
    }

    // `splits(i, j)` yields the split points of span i..=j, i.e. every k in i..j
    fn build_table<S, I, F>(&self, input: &[S], splits: F) -> Result<ParseTable>
    where
        S: AsRef<str>,
        I: Iterator<Item = usize>,
        F: Fn(usize, usize) -> I,
    {
        let n = input.len();
        let mut table = ParseTable::new(n, self.names.clone())
            .ok_or(ParseError::TableTooLarge { len: n })?;

        for (i, token) in input.iter().enumerate() {
            for &head in self.units.get(token.as_ref()).into_iter().flatten() {
                table.insert(i, i, head);
            }
        }

        for span in 2..=n {
            for i in 0..=n - span {
                let j = i + span - 1;
                for k in splits(i, j) {
                    for binary in &self.binaries {
                        if table.contains(i, k, binary.left) && table.contains(k + 1, j, binary.right) {
                            table.insert(i, j, binary.head);
                        }
                    }
                }
            }
        }

        Ok(table)
    }
}

// Checks the grammar and parses a single input
pub fn parse<S: AsRef<str>>(grammar: &Grammar, input: &[S]) -> Result<Parse> {
    Parser::new(grammar)?.parse(input)
}

// Every character is one token
pub fn char_tokens(text: &str) -> Vec<String> {
    text.chars().map(String::from).collect()
}

// Whitespace separated tokens, for grammars with multi-character terminals
pub fn word_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}
