mod cli;
mod log;

use std::io::BufRead;
use std::process;
use std::time::Instant;

use clap::Parser as _;
use cyk::cyk::{char_tokens, word_tokens, ParseError, Parser};
use cyk::generator;
use cyk::grammar::Grammar;
use cyk::parser::{parse_cnf_file, CompileErrorType};

use cli::Cli;
use log::log;

fn load_grammar(cli: &Cli) -> Grammar {
    let grammar = match parse_cnf_file(&cli.file) {
        Ok(grammar) => grammar,
        Err(errors) => {
            for error in &errors {
                eprintln!("{}", error);
            }
            let unreadable = errors.iter().any(|e| matches!(e.error, CompileErrorType::FileError(_)));
            process::exit(if unreadable { exitcode::IOERR } else { exitcode::CONFIG })
        }
    };

    match &cli.start {
        Some(start) => grammar.with_start(start),
        None => grammar,
    }
}

fn sample_sentences(grammar: &Grammar, cli: &Cli, amount: u32) -> Vec<Vec<String>> {
    let mut rng = rand::thread_rng();

    (0..amount)
        .map(|_| match generator::generate(grammar, cli.file.clone(), cli.depth, &mut rng) {
            Ok(sentence) => sentence,
            Err(error) => {
                eprintln!("{}", error);
                process::exit(exitcode::CONFIG)
            }
        })
        .collect()
}

fn read_sentences(tokenize: fn(&str) -> Vec<String>) -> Vec<Vec<String>> {
    std::io::stdin()
        .lock()
        .lines()
        .map(|line| match line {
            Ok(line) => tokenize(&line),
            Err(error) => {
                eprintln!("failed to read stdin: {error}");
                process::exit(exitcode::IOERR)
            }
        })
        .collect()
}

// n^3 * |G|, None when it does not fit in a usize
fn step_estimate(n: usize, binaries: usize) -> Option<usize> {
    n.checked_pow(3)?.checked_mul(binaries)
}

fn check(parser: &Parser, tokens: &[String], separator: &str, show_table: bool) -> Result<bool, ParseError> {
    let started = Instant::now();
    let parse = parser.parse(tokens)?;
    let elapsed = started.elapsed();

    let n = tokens.len();
    match step_estimate(n, parser.binary_count()) {
        Some(steps) => log!("parsed {} tokens, n^3 * |G| = {}", n, steps),
        None => log!("parsed {} tokens, n^3 * |G| overflows", n),
    }

    let verdict = if parse.accepted { "accepted" } else { "rejected" };
    println!("{:?}: {} in {}", tokens.join(separator), verdict, humantime::format_duration(elapsed));
    if show_table {
        print!("{}", parse.table);
    }

    Ok(parse.accepted)
}

fn main() {
    let cli = Cli::parse();
    log::set_verbose(cli.verbose);

    let grammar = load_grammar(&cli);
    log!(
        "loaded {} nonterminals and {} productions from {}, start symbol `{}`",
        grammar.rules.len(),
        grammar.production_count(),
        cli.file.display(),
        grammar.start_symbol
    );

    let parser = match Parser::new(&grammar) {
        Ok(parser) => parser,
        Err(error) => {
            eprintln!("{}", error);
            process::exit(exitcode::CONFIG)
        }
    };
    let parser = match cli.max_length {
        Some(limit) => parser.with_max_len(limit),
        None => parser,
    };

    let (tokenize, separator): (fn(&str) -> Vec<String>, &str) = if cli.words {
        (word_tokens, " ")
    } else {
        (char_tokens, "")
    };

    let sentences = if let Some(amount) = cli.generate {
        sample_sentences(&grammar, &cli, amount)
    } else if !cli.inputs.is_empty() {
        cli.inputs.iter().map(|input| tokenize(input)).collect()
    } else {
        read_sentences(tokenize)
    };

    let mut accepted = 0;
    for tokens in &sentences {
        match check(&parser, tokens, separator, cli.table) {
            Ok(true) => accepted += 1,
            Ok(false) => {}
            Err(error) => {
                eprintln!("{}", error);
                process::exit(exitcode::DATAERR)
            }
        }
    }

    log!("{} of {} sentences accepted", accepted, sentences.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doubling_parser() -> Parser {
        Parser::new(&Grammar::from_convention("S", &[("S", &["SS", "a"])])).unwrap()
    }

    #[test]
    fn estimate_saturates_instead_of_overflowing() {
        assert_eq!(step_estimate(10, 2), Some(2000));
        assert_eq!(step_estimate(0, 7), Some(0));
        assert_eq!(step_estimate(3_000_000, 1), None);
        assert_eq!(step_estimate(usize::MAX, 0), None);
    }

    #[test]
    fn huge_input_hits_the_length_limit() {
        let parser = doubling_parser().with_max_len(10);
        let tokens = vec![String::new(); 3_000_000];

        assert_eq!(
            check(&parser, &tokens, "", false),
            Err(ParseError::InputTooLong { len: 3_000_000, limit: 10 })
        );
    }

    #[test]
    fn short_input_is_checked() {
        let parser = doubling_parser().with_max_len(10);
        let tokens = char_tokens("aaa");

        assert_eq!(check(&parser, &tokens, "", false), Ok(true));
    }
}
