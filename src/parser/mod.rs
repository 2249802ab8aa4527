/*
    This module parses grammar files
*/

mod lexer;
mod verifier;

use std::collections::HashMap;
use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::grammar::*;
use crate::error_handling::*;
use crate::validator::FormViolation;
use itertools::Itertools;
use lexer::*;
use verifier::{verify_cnf, verify_rules, IntermediateRuleset};

#[derive(Debug)]
pub enum CompileErrorType {
    // A line which should contain a rule does not
    MissingEquals,
    // A rule has multiple equals signs
    UnexpectedEquals,
    // The user starts a rule line with something other than a nonterminal
    MissingNonterminal,
    // There is an unclosed quote
    UnmatchedQuote,
    // An undefined token was used
    UndefinedNonterminal(String),
    // An alternative is not a single terminal or a pair of nonterminals
    NotCnf(FormViolation),
    // Somehow a full rewrite was parsed as a base alternative
    // This is a problem with cyk, not the grammar
    UnsplitRewrite,
    // A blank line got too deep into the parser
    // This is a problem with cyk, not the grammar
    UnexpectedBlankLine,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::UndefinedNonterminal(a), CompileErrorType::UndefinedNonterminal(b)) => a == b,
            (CompileErrorType::NotCnf(a), CompileErrorType::NotCnf(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingEquals => write!(f, "Expected `=` after nonterminal"),
            CompileErrorType::UnexpectedEquals => write!(f, "Unexpected `=` encountered"),
            CompileErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            CompileErrorType::UnmatchedQuote => write!(f, "Unmatched quotes"),
            CompileErrorType::UndefinedNonterminal(nonterminal) => write!(f, "Could not find definition for `{}`", nonterminal),
            CompileErrorType::NotCnf(violation) => write!(f, "Not in Chomsky normal form: {}", violation),
            CompileErrorType::UnsplitRewrite => write!(f, "Rewrite was not fully split (this is a problem with cyk, not the grammar)"),
            CompileErrorType::UnexpectedBlankLine => write!(f, "Blank line encountered in rule parser (this is a problem with cyk, not the grammar)"),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> CompileError {
    CompileError::at(Location::file(file), CompileErrorType::FileError(error))
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: String,
    rewrite: Rewrite,
    location: Location
}

fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    tokens.iter().map(|t| match t {
        Token::Equals => Err(CompileErrorType::UnexpectedEquals),
        Token::Or => Err(CompileErrorType::UnsplitRewrite),
        Token::Nonterminal(s) => Ok(Symbol::Nonterminal(s.clone())),
        Token::Terminal(s) => Ok(Symbol::Terminal(s.clone()))
    }).collect()
}

fn parse_rewrite(tokens: &[Token]) -> Result<Rewrite> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    let symbol = match tokens.first() {
        Some(Token::Nonterminal(s)) => Ok(s.clone()),
        Some(_) => Err(CompileErrorType::MissingNonterminal),
        None => Err(CompileErrorType::UnexpectedBlankLine)
    }?;

    if tokens.get(1) != Some(&Token::Equals) {
        return Err(CompileErrorType::MissingEquals)
    }

    let rewrite = parse_rewrite(&tokens[2..])?;

    Ok(Rule {
        symbol,
        rewrite,
        location
    })
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line, location.clone()))
        .map_err(|error| CompileError::at(location, error))
}

// Blank lines and lines holding only a comment define nothing
fn is_rule_line(line: &String) -> bool {
    let trimmed = line.trim_start();
    !trimmed.is_empty() && !trimmed.starts_with(';')
}

// Returns an iterator over the lines of a file, with the io errors wrapped
// in CompileError and enumerated
fn file_line_nums<'a>(file: File, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    std::io::BufReader::new(file)
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.to_path_buf())))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

fn text_line_nums(text: &str) -> impl Iterator<Item = (usize, LineResult<String>)> + '_ {
    text.lines()
        .map(|line| LineResult::Ok(line.to_string()))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line))
        .map(|(num, line)| (num + 1, line))
}

// Collects the rules into a ruleset, appending the alternatives of repeated
// definitions. Every alternative keeps the location it was written at
fn ruleset_from_rules(rules: Vec<Rule>, require_cnf: bool) -> FileResult<HashMap<String, Rewrite>> {
    let mut test_ruleset = IntermediateRuleset::with_capacity(rules.len());
    for rule in rules {
        let alternatives = test_ruleset.entry(rule.symbol).or_default();
        alternatives.extend(rule.rewrite.into_iter().map(|alt| (alt, rule.location.clone())));
    }

    let mut errors = match verify_rules(&test_ruleset) {
        Ok(()) => Vec::new(),
        Err(errors) => errors,
    };
    if require_cnf {
        if let Err(violations) = verify_cnf(&test_ruleset) {
            errors.extend(violations);
        }
    }
    if !errors.is_empty() {
        errors.sort_by_key(|error| error.location.line);
        return Err(errors);
    }

    let ruleset = test_ruleset.into_iter()
        .map(|(symbol, alternatives)| (symbol, alternatives.into_iter().map(|(alt, _)| alt).collect()))
        .collect();

    Ok(ruleset)
}

fn grammar_from_rules(rule_list: Vec<Rule>, require_cnf: bool) -> FileResult<Grammar> {
    let start_symbol = rule_list.first()
        .map(|rule| rule.symbol.clone())
        .unwrap_or_default();

    let rules = ruleset_from_rules(rule_list, require_cnf)?;

    Ok(Grammar {
        start_symbol,
        rules
    })
}

fn parse_lines(lines: impl Iterator<Item = (usize, LineResult<String>)>, path: &Path, require_cnf: bool) -> FileResult<Grammar> {
    let parsed_lines = lines.map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location {
            file: path.to_path_buf(),
            line: num
        }))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if !errors.is_empty() {
        return Err(errors);
    }

    grammar_from_rules(rules, require_cnf)
}

// Parses a grammar file. The first rule defines the start symbol
pub fn parse_file(path: &Path) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.to_path_buf())])?;
    parse_lines(file_line_nums(file, path), path, false)
}

// Parses a grammar file and rejects every alternative that is not in Chomsky
// normal form, pointing at the line it was written on
pub fn parse_cnf_file(path: &Path) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.to_path_buf())])?;
    parse_lines(file_line_nums(file, path), path, true)
}

// Parses grammar text held in memory, `name` stands in for the file name
pub fn parse_str(text: &str, name: &str, require_cnf: bool) -> FileResult<Grammar> {
    parse_lines(text_line_nums(text), Path::new(name), require_cnf)
}
