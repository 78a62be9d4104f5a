/// Run configuration, read from RON files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::segment::SegmenterKind;
use crate::core::sequencer::DEFAULT_NEW_WORD_CEILING;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error in config: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything a sequencing run needs to locate its collaborators.
///
/// ```ron
/// (
///     frequency_table: "words/100k",
///     known_words: Some("known"),
///     initial_known_count: 6,
///     new_word_ceiling: 1,
///     segmenter: Greedy(dictionary: "words/all_words"),
///     pinyin: true,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerConfig {
    /// Tab-separated word/count table.
    pub frequency_table: PathBuf,
    /// One known word per line; a missing file means no prior knowledge.
    #[serde(default)]
    pub known_words: Option<PathBuf>,
    /// How many of the most frequent words count as known from the start.
    #[serde(default)]
    pub initial_known_count: usize,
    #[serde(default = "default_new_word_ceiling")]
    pub new_word_ceiling: usize,
    #[serde(default)]
    pub segmenter: SegmenterKind,
    /// Add pinyin columns to TSV output.
    #[serde(default)]
    pub pinyin: bool,
}

fn default_new_word_ceiling() -> usize {
    DEFAULT_NEW_WORD_CEILING
}

impl SequencerConfig {
    pub fn new(frequency_table: impl Into<PathBuf>) -> Self {
        Self {
            frequency_table: frequency_table.into(),
            known_words: None,
            initial_known_count: 0,
            new_word_ceiling: DEFAULT_NEW_WORD_CEILING,
            segmenter: SegmenterKind::default(),
            pinyin: false,
        }
    }

    pub fn parse_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frequency_table.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "frequency_table must not be empty".to_string(),
            ));
        }
        if self.new_word_ceiling == 0 {
            return Err(ConfigError::Invalid(
                "new_word_ceiling must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
