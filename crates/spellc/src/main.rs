//! The SpellLang interpreter CLI.
//!
//! Reads a `.spell` source file, runs it through the lex -> parse ->
//! evaluate pipeline, and exits non-zero on any stage's failure.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use spell_eval::{Evaluator, StdoutSink};

#[derive(Parser)]
#[command(name = "spellc", version, about = "The SpellLang interpreter")]
struct Cli {
    /// Path to a SpellLang source file
    #[arg(value_name = "filename.spell")]
    path: PathBuf,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            eprintln!("Usage: spellc <filename.spell>");
            process::exit(1);
        }
    };

    if let Err(message) = run(&cli.path) {
        eprintln!("{message}");
        process::exit(1);
    }
}

/// Tokenizes directly rather than going through `spell_parser::parse`, so a
/// `LexError` prints as "Lexer Error at ..." instead of being folded into a
/// "Parser Error at ...". The two stages keep their own message.
fn run(path: &PathBuf) -> Result<(), String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {e}", path.display()))?;

    let tokens = spell_lexer::tokenize(&source).map_err(|e| e.to_string())?;
    let program = spell_parser::parse_tokens(tokens).map_err(|e| e.to_string())?;

    let mut evaluator = Evaluator::new(Box::new(StdoutSink));
    evaluator.run(&program).map_err(|e| e.to_string())?;

    Ok(())
}
