/*
    This module is for storing and manipulating grammars
*/

use std::collections::HashMap;
use std::fmt::Display;

use itertools::Itertools;

// The base unit in a grammar rule
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(t) => write!(f, "\"{}\"", t),
            Symbol::Nonterminal(n) => write!(f, "{}", n),
        }
    }
}

// The symbols in a single alternative
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Grammar {
    pub start_symbol: String,
    pub rules: HashMap<String, Rewrite>,
}

impl Grammar {
    // Builds a grammar from compact right-hand sides where every character is
    // a symbol: uppercase characters are nonterminals, anything else is a
    // terminal. `("S", &["AB", "a"])` reads as S = A B | "a"
    pub fn from_convention(start: &str, rules: &[(&str, &[&str])]) -> Self {
        let mut grammar = Grammar {
            start_symbol: start.to_string(),
            rules: HashMap::with_capacity(rules.len()),
        };

        for (symbol, alternatives) in rules {
            let rewrite = grammar.rules.entry(symbol.to_string()).or_default();
            rewrite.extend(alternatives.iter().map(|alt| {
                alt.chars()
                    .map(|c| if c.is_uppercase() {
                        Symbol::Nonterminal(c.to_string())
                    } else {
                        Symbol::Terminal(c.to_string())
                    })
                    .collect()
            }));
        }

        grammar
    }

    // Nonterminals with a definition, in a stable order
    pub fn nonterminals(&self) -> Vec<&String> {
        self.rules.keys().sorted().collect()
    }

    pub fn production_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn with_start(mut self, start: &str) -> Self {
        self.start_symbol = start.to_string();
        self
    }
}

// Prints the grammar in the same syntax the file parser reads, start rule first
impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let order = self.rules.keys()
            .sorted_by_key(|symbol| (**symbol != self.start_symbol, (*symbol).clone()));

        for symbol in order {
            let alternatives = self.rules[symbol].iter()
                .map(|alt| alt.iter().join(" "))
                .join(" | ");
            writeln!(f, "{} = {}", symbol, alternatives)?;
        }

        Ok(())
    }
}
