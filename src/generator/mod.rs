/*
    This module generates random sentences of a grammar
*/

use rand::prelude::*;
use std::path::PathBuf;
use std::{collections::HashMap, fmt::Display};

use crate::grammar::*;
use crate::error_handling::*;

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // An undefined nonterminal was used
    UndefinedNonterminal(String),
    // The nonterminal never derives a finite sentence
    Unproductive(String),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            GenerateErrorType::Unproductive(nonterminal) => write!(f, "Nonterminal `{}` never derives a finite sentence", nonterminal),
        }
    }
}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult<T> = Result<T, GenerateError>;

// Smallest derivation tree height of every productive nonterminal
fn min_heights(rules: &HashMap<String, Rewrite>) -> HashMap<&str, usize> {
    let mut heights: HashMap<&str, usize> = HashMap::new();

    loop {
        let mut changed = false;
        for (symbol, rewrite) in rules {
            let best = rewrite.iter()
                .filter_map(|alternative| alternative_height(alternative, &heights))
                .min();
            if let Some(height) = best {
                if heights.get(symbol.as_str()).map_or(true, |&known| height < known) {
                    heights.insert(symbol.as_str(), height);
                    changed = true;
                }
            }
        }
        if !changed {
            return heights;
        }
    }
}

fn alternative_height(alternative: &Alternative, heights: &HashMap<&str, usize>) -> Option<usize> {
    alternative.iter()
        .map(|symbol| match symbol {
            Symbol::Terminal(_) => Some(0),
            Symbol::Nonterminal(n) => heights.get(n.as_str()).copied(),
        })
        .try_fold(0, |acc, height| height.map(|h| acc.max(h)))
        .map(|height| height + 1)
}

struct Generator<'a, R: Rng> {
    rules: &'a HashMap<String, Rewrite>,
    heights: HashMap<&'a str, usize>,
    location: Location,
    max_depth: usize,
    rng: &'a mut R,
}

impl<'a, R: Rng> Generator<'a, R> {
    fn error(&self, error: GenerateErrorType) -> GenerateError {
        GenerateError::at(self.location.clone(), error)
    }

    fn generate_nonterminal(&mut self, nonterminal: &str, depth: usize, out: &mut Vec<String>) -> GenResult<()> {
        let rewrite = self.rules
            .get(nonterminal)
            .ok_or_else(|| self.error(GenerateErrorType::UndefinedNonterminal(nonterminal.to_string())))?;

        let heights = rewrite.iter()
            .map(|alternative| alternative_height(alternative, &self.heights))
            .collect::<Vec<_>>();

        // Alternatives that still finish within the depth budget. Past the
        // budget only the shallowest alternatives are taken, which always ends
        let budget = self.max_depth.saturating_sub(depth);
        let mut candidates = heights.iter()
            .enumerate()
            .filter(|(_, height)| height.is_some_and(|h| h <= budget))
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        if candidates.is_empty() {
            let shallowest = heights.iter()
                .flatten()
                .min()
                .ok_or_else(|| self.error(GenerateErrorType::Unproductive(nonterminal.to_string())))?;
            candidates = heights.iter()
                .enumerate()
                .filter(|(_, height)| **height == Some(*shallowest))
                .map(|(index, _)| index)
                .collect();
        }

        let chosen = match candidates.choose(&mut *self.rng) {
            Some(&index) => &rewrite[index],
            None => return Err(self.error(GenerateErrorType::Unproductive(nonterminal.to_string()))),
        };

        for symbol in chosen {
            match symbol {
                Symbol::Nonterminal(n) => self.generate_nonterminal(n, depth + 1, out)?,
                Symbol::Terminal(t) => out.push(t.clone()),
            }
        }

        Ok(())
    }
}

// Generates a random sentence starting from the grammar's start symbol.
// Derivations are kept around `max_depth` levels deep
pub fn generate<R: Rng>(grammar: &Grammar, file: PathBuf, max_depth: usize, rng: &mut R) -> GenResult<Vec<String>> {
    generate_with_override(grammar, &grammar.start_symbol, file, max_depth, rng)
}

// Generates a sentence in the given grammar starting with the given symbol
pub fn generate_with_override<R: Rng>(grammar: &Grammar, start: &str, file: PathBuf, max_depth: usize, rng: &mut R) -> GenResult<Vec<String>> {
    let mut generator = Generator {
        rules: &grammar.rules,
        heights: min_heights(&grammar.rules),
        location: Location::file(file),
        max_depth,
        rng,
    };

    let mut sentence = Vec::new();
    generator.generate_nonterminal(start, 0, &mut sentence)?;
    Ok(sentence)
}
