use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar, in Chomsky normal form
    pub file: PathBuf,

    /// Sentences to test (default: one per line from stdin)
    pub inputs: Vec<String>,

    /// Start symbol (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Split sentences on whitespace instead of into single characters
    #[arg(short, long)]
    pub words: bool,

    /// Print the parse table of every sentence
    #[arg(short, long)]
    pub table: bool,

    /// Generate random sentences from the grammar and test those instead
    #[arg(short, long, value_name = "AMOUNT")]
    pub generate: Option<u32>,

    /// Derivation depth of generated sentences
    #[arg(long, value_name = "DEPTH", default_value_t = 8)]
    pub depth: usize,

    /// Refuse sentences longer than this many tokens. The parse table
    /// takes n^2 * |N| bytes, so this also bounds memory
    #[arg(long, value_name = "TOKENS")]
    pub max_length: Option<usize>,

    /// Print timestamped diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
