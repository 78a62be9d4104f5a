/// The sequencing pipeline: collaborators loaded from disk, then runs.
///
/// Wires together the frequency index, the known-word set and the
/// sequencing engine. A `Sequencer` keeps its known-word set between
/// runs, so consecutive runs build on each other.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::config::{ConfigError, SequencerConfig};
use crate::core::corpus::CorpusError;
use crate::core::frequency::{FrequencyError, WordFrequencyIndex};
use crate::core::known::{KnownWordSet, KnownWordsError};
use crate::core::pool::SentencePool;
use crate::core::segment::SegmentError;
use crate::core::sequencer::{SequenceRun, SequencingEngine, DEFAULT_NEW_WORD_CEILING};
use crate::core::writer::WriterError;
use crate::schema::sentence::Sentence;

#[derive(Debug, Error)]
pub enum SequencerError {
    #[error("frequency table error: {0}")]
    Frequency(#[from] FrequencyError),
    #[error("known words error: {0}")]
    KnownWords(#[from] KnownWordsError),
    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),
    #[error("segmentation error: {0}")]
    Segment(#[from] SegmentError),
    #[error("output error: {0}")]
    Writer(#[from] WriterError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("no frequency table configured")]
    MissingFrequencyIndex,
}

/// Owns the frequency index and the learner's known words across runs.
/// Built via `Sequencer::builder()`.
#[derive(Debug, Clone)]
pub struct Sequencer {
    index: WordFrequencyIndex,
    known: KnownWordSet,
    new_word_ceiling: usize,
}

/// Builder for constructing a `Sequencer`.
#[derive(Debug, Default)]
pub struct SequencerBuilder {
    frequency_table: Option<PathBuf>,
    known_words: Option<PathBuf>,
    initial_known_count: usize,
    new_word_ceiling: Option<usize>,
    /// Directly provided index (for testing without files).
    index: Option<WordFrequencyIndex>,
    /// Directly provided known words (for testing without files).
    known: Option<KnownWordSet>,
}

impl Sequencer {
    pub fn builder() -> SequencerBuilder {
        SequencerBuilder::default()
    }

    pub fn from_config(config: &SequencerConfig) -> Result<Self, SequencerError> {
        config.validate()?;
        let mut builder = Self::builder()
            .frequency_table(&config.frequency_table)
            .initial_known_count(config.initial_known_count)
            .new_word_ceiling(config.new_word_ceiling);
        if let Some(ref path) = config.known_words {
            builder = builder.known_words(path);
        }
        builder.build()
    }

    /// Sequence a batch of sentences. Invalid and duplicate sentences are
    /// excluded before the run starts.
    pub fn sequence<I>(&mut self, sentences: I) -> SequenceRun
    where
        I: IntoIterator<Item = Sentence>,
    {
        let mut pool = SentencePool::new(sentences);
        self.sequence_pool(&mut pool)
    }

    /// Drain an already built pool.
    pub fn sequence_pool(&mut self, pool: &mut SentencePool) -> SequenceRun {
        SequencingEngine::new(&self.index)
            .with_new_word_ceiling(self.new_word_ceiling)
            .run_with_summary(pool, &mut self.known)
    }

    pub fn index(&self) -> &WordFrequencyIndex {
        &self.index
    }

    pub fn known(&self) -> &KnownWordSet {
        &self.known
    }

    pub fn new_word_ceiling(&self) -> usize {
        self.new_word_ceiling
    }

    pub fn into_known(self) -> KnownWordSet {
        self.known
    }
}

impl SequencerBuilder {
    pub fn frequency_table(mut self, path: impl AsRef<Path>) -> Self {
        self.frequency_table = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn known_words(mut self, path: impl AsRef<Path>) -> Self {
        self.known_words = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn initial_known_count(mut self, count: usize) -> Self {
        self.initial_known_count = count;
        self
    }

    pub fn new_word_ceiling(mut self, ceiling: usize) -> Self {
        self.new_word_ceiling = Some(ceiling);
        self
    }

    /// Provide the index directly (for testing without files).
    pub fn with_index(mut self, index: WordFrequencyIndex) -> Self {
        self.index = Some(index);
        self
    }

    /// Provide known words directly (for testing without files).
    pub fn with_known(mut self, known: KnownWordSet) -> Self {
        self.known = Some(known);
        self
    }

    pub fn build(self) -> Result<Sequencer, SequencerError> {
        let new_word_ceiling = self.new_word_ceiling.unwrap_or(DEFAULT_NEW_WORD_CEILING);
        if new_word_ceiling == 0 {
            return Err(ConfigError::Invalid("new_word_ceiling must be at least 1".to_string()).into());
        }

        // Directly provided collaborators win over paths
        let index = match (self.index, self.frequency_table) {
            (Some(index), _) => index,
            (None, Some(path)) => WordFrequencyIndex::load(&path)?,
            (None, None) => return Err(SequencerError::MissingFrequencyIndex),
        };

        let mut known = match (self.known, self.known_words) {
            (Some(known), _) => known,
            (None, Some(path)) => KnownWordSet::load_optional(&path)?,
            (None, None) => KnownWordSet::new(),
        };
        known.seed_most_frequent(&index, self.initial_known_count);

        tracing::info!(
            ranked_words = index.len(),
            known_words = known.len(),
            new_word_ceiling,
            "sequencer ready"
        );

        Ok(Sequencer {
            index,
            known,
            new_word_ceiling,
        })
    }
}
