/// Word List Cleaner — normalizes a graded vocabulary list into plain words.
///
/// Usage: wordlist_cleaner <input> <output>
///
/// Strips part-of-speech notes, splits alternative forms and removes
/// ellipses, then writes one word per line in sorted order.
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use iplus1_sequencer::core::wordlist::load_word_list;

#[derive(Parser, Debug)]
#[command(name = "wordlist_cleaner")]
#[command(about = "Clean a vocabulary list into one dictionary word per line")]
#[command(version)]
struct Args {
    /// Raw word list; the first tab-separated field of each line is used
    input: PathBuf,

    /// Cleaned word list
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let words = load_word_list(&args.input)
        .with_context(|| format!("Failed to read '{}'", args.input.display()))?;

    let mut sorted: Vec<&String> = words.iter().collect();
    sorted.sort();

    let mut contents = String::new();
    for word in sorted {
        contents.push_str(word);
        contents.push('\n');
    }
    std::fs::write(&args.output, contents)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;

    println!("Wrote {} words to '{}'", words.len(), args.output.display());
    Ok(())
}
