use std::collections::HashMap;

use crate::grammar::Symbol::Nonterminal;
use crate::validator::{check_alternative, FormViolation};
use super::CompileErrorType::{NotCnf, UndefinedNonterminal};
use super::{Alternative, CompileError, CompileErrors, FileResult, Location};

// Alternatives of every nonterminal, each with the line it was written on
pub type IntermediateRuleset = HashMap<String, Vec<(Alternative, Location)>>;

fn get_alternative_undefined_symbols(alternative: &Alternative, location: &Location, rules: &IntermediateRuleset) -> CompileErrors {
    // Filter out everything but nonterminals and unwrap the text from the
    // nonterminals. Then filter out all the undefined nonterminals.
    alternative.iter()
        .filter_map(|symbol| match symbol {
            Nonterminal(symbol) => Some(symbol),
            _ => None
        })
        .filter(|symbol| !rules.contains_key(*symbol))
        .map(|symbol_text| CompileError::at(location.to_owned(), UndefinedNonterminal(symbol_text.to_owned())))
        .collect()
}

fn get_undefined_symbols(rules: &IntermediateRuleset) -> CompileErrors {
    rules.values()
        .flatten()
        .flat_map(|(alternative, location)| get_alternative_undefined_symbols(alternative, location, rules))
        .collect()
}

fn get_form_violations(rules: &IntermediateRuleset) -> CompileErrors {
    rules.iter()
        .flat_map(|(symbol, alternatives)| alternatives.iter()
            .enumerate()
            .filter_map(move |(index, (alternative, location))| {
                check_alternative(alternative).err().map(|kind| CompileError::at(location.clone(), NotCnf(FormViolation {
                    symbol: symbol.clone(),
                    alternative: index,
                    kind
                })))
            }))
        .collect()
}

fn into_result(errors: CompileErrors) -> FileResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn verify_rules(rules: &IntermediateRuleset) -> FileResult<()> {
    into_result(get_undefined_symbols(rules))
}

pub fn verify_cnf(rules: &IntermediateRuleset) -> FileResult<()> {
    into_result(get_form_violations(rules))
}
