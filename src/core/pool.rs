/// Sentence pool — candidates awaiting sequencing.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::known::KnownWordSet;
use crate::core::segment::is_punctuation_token;
use crate::schema::sentence::{Sentence, Word};

/// The candidate sentences for one sequencing run.
///
/// Insertion order is preserved and used as the final tie-break, so the
/// same input order always yields the same sequence. Sentences are never
/// added after construction.
#[derive(Debug, Clone, Default)]
pub struct SentencePool {
    slots: Vec<Option<Sentence>>,
    positions: FxHashMap<String, usize>,
    remaining: usize,
    excluded_empty: usize,
    excluded_duplicates: usize,
}

impl SentencePool {
    /// Build a pool keyed by sentence text.
    ///
    /// Sentences without words are excluded. When two sentences share the
    /// same text the first one is kept.
    pub fn new<I>(sentences: I) -> Self
    where
        I: IntoIterator<Item = Sentence>,
    {
        let mut pool = Self::default();
        for sentence in sentences {
            if !sentence.is_valid() {
                tracing::debug!(text = %sentence.text, "excluding sentence with no words");
                pool.excluded_empty += 1;
                continue;
            }
            if pool.positions.contains_key(&sentence.text) {
                tracing::warn!(text = %sentence.text, "duplicate sentence text, keeping first");
                pool.excluded_duplicates += 1;
                continue;
            }
            pool.positions.insert(sentence.text.clone(), pool.slots.len());
            pool.slots.push(Some(sentence));
            pool.remaining += 1;
        }
        pool
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    pub fn len(&self) -> usize {
        self.remaining
    }

    /// Remove a sentence by text. Removing an absent sentence is a no-op.
    pub fn remove(&mut self, text: &str) -> Option<Sentence> {
        let position = *self.positions.get(text)?;
        let taken = self.slots[position].take();
        if taken.is_some() {
            self.remaining -= 1;
        }
        taken
    }

    pub fn get(&self, text: &str) -> Option<&Sentence> {
        let position = *self.positions.get(text)?;
        self.slots[position].as_ref()
    }

    /// Remaining sentences with their insertion position, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Sentence)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|s| (i, s)))
    }

    /// Sentences dropped at construction for having no words.
    pub fn excluded_empty(&self) -> usize {
        self.excluded_empty
    }

    /// Sentences dropped at construction for repeating an earlier text.
    pub fn excluded_duplicates(&self) -> usize {
        self.excluded_duplicates
    }
}

/// Distinct words of `sentence` not yet in `known`, in first-occurrence order.
///
/// Punctuation tokens are treated as always known.
pub fn new_words(sentence: &Sentence, known: &KnownWordSet) -> Vec<Word> {
    let mut seen = FxHashSet::default();
    sentence
        .words
        .iter()
        .filter(|w| !is_punctuation_token(w) && !known.contains(w) && seen.insert(w.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(text: &str, words: &[&str]) -> Sentence {
        Sentence::new(text, words.iter().map(|w| w.to_string()).collect())
    }

    #[test]
    fn excludes_empty_sentences() {
        let pool = SentencePool::new(vec![
            sentence("你好", &["你好"]),
            sentence("……", &[]),
        ]);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.excluded_empty(), 1);
    }

    #[test]
    fn duplicate_text_keeps_first() {
        let pool = SentencePool::new(vec![
            sentence("你好", &["你好"]),
            sentence("你好", &["你", "好"]),
        ]);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.excluded_duplicates(), 1);
        assert_eq!(pool.get("你好").unwrap().words, vec!["你好"]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut pool = SentencePool::new(vec![
            sentence("a", &["a"]),
            sentence("b", &["b"]),
        ]);
        assert!(pool.remove("a").is_some());
        assert!(pool.remove("a").is_none());
        assert!(pool.remove("missing").is_none());
        assert_eq!(pool.len(), 1);
        assert!(!pool.is_empty());
        pool.remove("b");
        assert!(pool.is_empty());
    }

    #[test]
    fn iter_keeps_insertion_positions() {
        let mut pool = SentencePool::new(vec![
            sentence("a", &["a"]),
            sentence("b", &["b"]),
            sentence("c", &["c"]),
        ]);
        pool.remove("b");
        let remaining: Vec<(usize, &str)> =
            pool.iter().map(|(i, s)| (i, s.text.as_str())).collect();
        assert_eq!(remaining, vec![(0, "a"), (2, "c")]);
    }

    #[test]
    fn new_words_distinct_in_first_occurrence_order() {
        let known = KnownWordSet::from_words(["的"]);
        let s = sentence("x", &["人", "的", "你好", "人", "的", "谢谢"]);
        assert_eq!(new_words(&s, &known), vec!["人", "你好", "谢谢"]);
    }

    #[test]
    fn new_words_empty_when_all_known() {
        let known = KnownWordSet::from_words(["人", "你好"]);
        let s = sentence("人你好", &["人", "你好"]);
        assert!(new_words(&s, &known).is_empty());
    }

    #[test]
    fn punctuation_tokens_never_new() {
        let known = KnownWordSet::new();
        let s = sentence("你好！", &["你好", "！", "...", "？！"]);
        assert_eq!(new_words(&s, &known), vec!["你好"]);

        let only_marks = sentence("！", &["！"]);
        assert!(new_words(&only_marks, &known).is_empty());
    }
}
