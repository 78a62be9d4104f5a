/// Known-word set — the learner's mastered vocabulary.

use rustc_hash::FxHashSet;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::core::frequency::WordFrequencyIndex;
use crate::schema::sentence::Word;

#[derive(Debug, Error)]
pub enum KnownWordsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Set of words considered mastered. Words are only ever added.
#[derive(Debug, Clone, Default)]
pub struct KnownWordSet {
    words: FxHashSet<Word>,
    /// Words added after construction, in the order they were learned.
    learned: Vec<Word>,
}

impl KnownWordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the set from an external word list. Seed words do not count as learned.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Word>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            learned: Vec::new(),
        }
    }

    /// Parse a known-words list: one word per line, blank lines ignored.
    pub fn parse(text: &str) -> Self {
        Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )
    }

    /// Load a known-words file. A missing file yields an empty set.
    pub fn load_optional(path: &Path) -> Result<Self, KnownWordsError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let set = Self::parse(&contents);
                tracing::info!(
                    words = set.len(),
                    path = %path.display(),
                    "loaded known words"
                );
                Ok(set)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no known-words file, starting empty");
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Add the `n` most frequent words of the index as seed vocabulary.
    pub fn seed_most_frequent(&mut self, index: &WordFrequencyIndex, n: usize) {
        for word in index.most_frequent(n) {
            self.words.insert(word.to_string());
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Insert every word not already known. Returns how many were new.
    pub fn add_all<'w, I>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = &'w Word>,
    {
        let mut added = 0;
        for word in words {
            if self.words.insert(word.clone()) {
                self.learned.push(word.clone());
                added += 1;
            }
        }
        added
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words learned since construction, oldest first.
    pub fn learned(&self) -> &[Word] {
        &self.learned
    }

    /// Append learned words to a known-words file, one per line.
    pub fn append_learned(&self, path: &Path) -> Result<usize, KnownWordsError> {
        if self.learned.is_empty() {
            return Ok(0);
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        for word in &self.learned {
            writeln!(file, "{}", word)?;
        }
        tracing::info!(
            words = self.learned.len(),
            path = %path.display(),
            "appended learned words"
        );
        Ok(self.learned.len())
    }
}
