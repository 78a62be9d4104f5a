/// Corpus Segmenter — turns raw sentences into an enhanced corpus.
///
/// Usage: corpus_segmenter --input <sentences.txt> --output <corpus.ron> [--dictionary <words>] [--whitespace]
///
/// Input lines are `text` or `text<TAB>audio_ref`. With `--dictionary` the
/// greedy longest-match segmenter is used; otherwise one word per character.
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iplus1_sequencer::core::config::SequencerConfig;
use iplus1_sequencer::core::corpus::{load_raw, save_corpus};
use iplus1_sequencer::core::segment::{enhance, SegmenterKind};

#[derive(Parser, Debug)]
#[command(name = "corpus_segmenter")]
#[command(about = "Segment raw sentences into an enhanced corpus")]
#[command(version)]
struct Args {
    /// Raw sentences (.ron list or one sentence per line)
    #[arg(short, long)]
    input: PathBuf,

    /// Output corpus (RON)
    #[arg(short, long)]
    output: PathBuf,

    /// Take the segmenter from this RON run configuration
    #[arg(short, long, conflicts_with_all = ["dictionary", "whitespace"])]
    config: Option<PathBuf>,

    /// Word list for greedy longest-match segmentation
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Split on whitespace instead (space-delimited languages)
    #[arg(long, conflicts_with = "dictionary")]
    whitespace: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iplus1_sequencer=info,corpus_segmenter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let kind = if let Some(ref path) = args.config {
        SequencerConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?
            .segmenter
    } else if let Some(ref dictionary) = args.dictionary {
        SegmenterKind::Greedy {
            dictionary: dictionary.clone(),
        }
    } else if args.whitespace {
        SegmenterKind::Whitespace
    } else {
        SegmenterKind::Character
    };
    let segmenter = kind.build().context("Failed to build segmenter")?;

    let raw = load_raw(&args.input)
        .with_context(|| format!("Failed to read '{}'", args.input.display()))?;
    println!("Segmenting {} sentences...", raw.len());

    let enhanced = enhance(raw, segmenter.as_ref());
    save_corpus(&enhanced.sentences, &args.output)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;

    println!(
        "Saved {} sentences to '{}' ({} failed, {} without words)",
        enhanced.sentences.len(),
        args.output.display(),
        enhanced.failed,
        enhanced.empty
    );
    Ok(())
}
