/// Greedy i+1 sequencing engine.
///
/// Repeatedly picks the remaining sentence that introduces the fewest
/// unknown words, preferring sentences whose new vocabulary is most
/// frequent, then shorter sentences, then earlier pool entries. The
/// chosen sentence's new words become known and the loop continues
/// until the pool is drained.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::frequency::WordFrequencyIndex;
use crate::core::known::KnownWordSet;
use crate::core::pool::{new_words, SentencePool};
use crate::schema::selection::{Rank, SelectionRecord};
use crate::schema::sentence::Word;

/// Default number of new words a sentence may introduce before it is
/// considered a relaxed (above-ceiling) selection.
pub const DEFAULT_NEW_WORD_CEILING: usize = 1;

/// Statistics for one sequencing run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub selected: usize,
    /// Selections that introduced no new word.
    pub review: usize,
    /// Selections made only because nothing at or below the ceiling remained.
    pub above_ceiling: usize,
    pub words_introduced: usize,
    pub excluded_empty: usize,
    pub excluded_duplicates: usize,
    pub known_before: usize,
    pub known_after: usize,
}

/// Output of a run: the ordered records plus run statistics.
#[derive(Debug, Clone, Default)]
pub struct SequenceRun {
    pub records: Vec<SelectionRecord>,
    pub summary: RunSummary,
}

/// Cached score of one remaining sentence.
#[derive(Debug, Clone)]
struct Candidate {
    text: String,
    word_count: usize,
    new_words: Vec<Word>,
    best_rank: Rank,
}

impl Candidate {
    fn rescore(&mut self, known: &KnownWordSet, index: &WordFrequencyIndex) {
        self.new_words.retain(|w| !known.contains(w));
        self.best_rank = best_rank(&self.new_words, index);
    }
}

/// The greedy selection loop, driven by a frequency index.
#[derive(Debug, Clone, Copy)]
pub struct SequencingEngine<'a> {
    index: &'a WordFrequencyIndex,
    new_word_ceiling: usize,
}

impl<'a> SequencingEngine<'a> {
    pub fn new(index: &'a WordFrequencyIndex) -> Self {
        Self {
            index,
            new_word_ceiling: DEFAULT_NEW_WORD_CEILING,
        }
    }

    pub fn with_new_word_ceiling(mut self, ceiling: usize) -> Self {
        self.new_word_ceiling = ceiling;
        self
    }

    pub fn new_word_ceiling(&self) -> usize {
        self.new_word_ceiling
    }

    /// Drain `pool` into an ordered sequence, growing `known` as sentences are accepted.
    pub fn run(&self, pool: &mut SentencePool, known: &mut KnownWordSet) -> Vec<SelectionRecord> {
        self.run_with_summary(pool, known).records
    }

    /// Like [`run`](Self::run), also returning run statistics.
    pub fn run_with_summary(&self, pool: &mut SentencePool, known: &mut KnownWordSet) -> SequenceRun {
        let mut summary = RunSummary {
            excluded_empty: pool.excluded_empty(),
            excluded_duplicates: pool.excluded_duplicates(),
            known_before: known.len(),
            ..RunSummary::default()
        };

        // Candidates are indexed by pool position so the position doubles
        // as the insertion-order tie-break.
        let mut candidates: Vec<Option<Candidate>> = Vec::new();
        // Unknown word → positions of the sentences containing it.
        let mut containing: FxHashMap<Word, Vec<usize>> = FxHashMap::default();

        for (position, sentence) in pool.iter() {
            if candidates.len() <= position {
                candidates.resize(position + 1, None);
            }
            let unknown = new_words(sentence, known);
            for word in &unknown {
                containing.entry(word.clone()).or_default().push(position);
            }
            candidates[position] = Some(Candidate {
                text: sentence.text.clone(),
                word_count: sentence.words.len(),
                best_rank: best_rank(&unknown, self.index),
                new_words: unknown,
            });
        }

        let mut records = Vec::with_capacity(pool.len());

        while let Some(position) = select(&candidates) {
            let Some(chosen) = candidates[position].take() else {
                break;
            };
            let Some(sentence) = pool.remove(&chosen.text) else {
                continue;
            };

            let word_rank = chosen
                .new_words
                .iter()
                .map(|w| self.index.rank_of(w))
                .max();
            let count = chosen.new_words.len();

            if count == 0 {
                summary.review += 1;
            } else if count > self.new_word_ceiling {
                summary.above_ceiling += 1;
                tracing::debug!(
                    text = %sentence.text,
                    new_words = count,
                    ceiling = self.new_word_ceiling,
                    "no sentence within ceiling remains, relaxing"
                );
            }

            let added = known.add_all(&chosen.new_words);
            summary.words_introduced += added;

            tracing::debug!(
                index = records.len() + 1,
                text = %sentence.text,
                new_words = ?chosen.new_words,
                "selected sentence"
            );

            // Only sentences sharing a newly learned word can change score.
            for word in &chosen.new_words {
                if let Some(positions) = containing.remove(word) {
                    for p in positions {
                        if let Some(candidate) = candidates[p].as_mut() {
                            candidate.rescore(known, self.index);
                        }
                    }
                }
            }

            records.push(SelectionRecord {
                sequence_index: records.len() + 1,
                sentence,
                new_words: chosen.new_words,
                word_rank,
            });
        }

        summary.selected = records.len();
        summary.known_after = known.len();

        tracing::info!(
            selected = summary.selected,
            review = summary.review,
            above_ceiling = summary.above_ceiling,
            words_introduced = summary.words_introduced,
            "sequencing run complete"
        );

        SequenceRun { records, summary }
    }
}

/// Run the engine with the default ceiling.
pub fn run(
    pool: &mut SentencePool,
    known: &mut KnownWordSet,
    index: &WordFrequencyIndex,
) -> Vec<SelectionRecord> {
    SequencingEngine::new(index).run(pool, known)
}

/// Best (lowest) rank among `words`; unranked when there are none.
fn best_rank(words: &[Word], index: &WordFrequencyIndex) -> Rank {
    words
        .iter()
        .map(|w| index.rank_of(w))
        .min()
        .unwrap_or(Rank::Unranked)
}

/// Position of the best remaining candidate.
///
/// Ordered by new-word count, best new-word rank, sentence length and
/// finally pool position.
fn select(candidates: &[Option<Candidate>]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .filter_map(|(position, slot)| slot.as_ref().map(|c| (position, c)))
        .min_by_key(|(position, c)| (c.new_words.len(), c.best_rank, c.word_count, *position))
        .map(|(position, _)| position)
}
