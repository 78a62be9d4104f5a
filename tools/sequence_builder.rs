/// Sequence Builder — orders enhanced sentence corpora into i+1 sequences.
///
/// Usage: sequence_builder [--config <run.ron> | --frequency-table <file>] <corpus>... --output <file>
///
/// Each corpus file is one unit (e.g. one video). Units are sequenced in
/// the order given, each building on the words learned in the previous ones.
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iplus1_sequencer::core::config::SequencerConfig;
use iplus1_sequencer::core::corpus::load_corpus;
use iplus1_sequencer::core::curriculum::Curriculum;
use iplus1_sequencer::core::pipeline::Sequencer;
use iplus1_sequencer::core::writer::{self, TsvOptions};

#[derive(Parser, Debug)]
#[command(name = "sequence_builder")]
#[command(about = "Order sentence corpora into an i+1 learning sequence")]
#[command(version)]
struct Args {
    /// Enhanced corpus files (.ron or tab-separated), one per unit
    #[arg(required = true)]
    corpus: Vec<PathBuf>,

    /// RON run configuration; individual flags override its values
    #[arg(short, long, env = "IPLUS1_CONFIG")]
    config: Option<PathBuf>,

    /// Tab-separated word/count frequency table
    #[arg(short, long)]
    frequency_table: Option<PathBuf>,

    /// Known-words file, one word per line (missing file = no known words)
    #[arg(short, long)]
    known_words: Option<PathBuf>,

    /// Treat this many of the most frequent words as known from the start
    #[arg(long)]
    initial_known: Option<usize>,

    /// Preferred maximum of new words per sentence
    #[arg(long)]
    ceiling: Option<usize>,

    /// Output file; `.ron` writes RON, anything else a tab-separated table
    #[arg(short, long)]
    output: PathBuf,

    /// Add sentence and new-word pinyin columns to TSV output
    #[arg(long)]
    pinyin: bool,

    /// Also append the sequence to this master table
    #[arg(long)]
    append_master: Option<PathBuf>,

    /// Append learned words to the known-words file after sequencing
    #[arg(long)]
    update_known: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iplus1_sequencer=info,sequence_builder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;

    // Load every unit before sequencing so a bad file aborts the whole run
    let mut units = Vec::with_capacity(args.corpus.len());
    for path in &args.corpus {
        let sentences = load_corpus(path)
            .with_context(|| format!("Failed to load corpus '{}'", path.display()))?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unit")
            .to_string();
        units.push((name, sentences));
    }

    let sequencer = Sequencer::from_config(&config).context("Failed to build sequencer")?;
    let mut curriculum = Curriculum::new(sequencer);
    for (name, sentences) in units {
        curriculum.add_unit(name, sentences);
    }

    let records = curriculum.master_list();
    let tsv = TsvOptions {
        pinyin: config.pinyin,
    };
    let written = if args.output.extension().and_then(|s| s.to_str()) == Some("ron") {
        writer::save_sequence(&records, &args.output)
    } else {
        writer::save_tsv(&records, tsv, &args.output)
    };
    written.with_context(|| format!("Failed to write '{}'", args.output.display()))?;

    if let Some(ref master) = args.append_master {
        writer::append_tsv(&records, tsv, master)
            .with_context(|| format!("Failed to append to '{}'", master.display()))?;
    }

    if args.update_known {
        let path = config
            .known_words
            .as_ref()
            .context("--update-known needs a known-words file")?;
        curriculum
            .sequencer()
            .known()
            .append_learned(path)
            .with_context(|| format!("Failed to update '{}'", path.display()))?;
    }

    print_summary(&curriculum);
    println!("Sequence saved to '{}'", args.output.display());
    Ok(())
}

fn resolve_config(args: &Args) -> Result<SequencerConfig> {
    let mut config = match (&args.config, &args.frequency_table) {
        (Some(path), _) => SequencerConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        (None, Some(table)) => SequencerConfig::new(table),
        (None, None) => anyhow::bail!("either --config or --frequency-table is required"),
    };

    if let Some(ref table) = args.frequency_table {
        config.frequency_table = table.clone();
    }
    if let Some(ref known) = args.known_words {
        config.known_words = Some(known.clone());
    }
    if let Some(n) = args.initial_known {
        config.initial_known_count = n;
    }
    if let Some(c) = args.ceiling {
        config.new_word_ceiling = c;
    }
    if args.pinyin {
        config.pinyin = true;
    }
    config.validate()?;
    Ok(config)
}

fn print_summary(curriculum: &Curriculum) {
    for unit in curriculum.units() {
        let s = &unit.summary;
        println!(
            "{}: {} sentences, {} new words, {} review, {} above ceiling, {} excluded",
            unit.name,
            s.selected,
            s.words_introduced,
            s.review,
            s.above_ceiling,
            s.excluded_empty + s.excluded_duplicates
        );
    }
    let totals = curriculum.totals();
    println!(
        "Total: {} sentences, known words {} -> {}",
        totals.selected, totals.known_before, totals.known_after
    );
}
