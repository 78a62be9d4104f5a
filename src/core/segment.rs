/// Segmentation capability — turning raw sentence text into words.
///
/// Any backend (a local dictionary algorithm, a hosted language model)
/// implements [`Segmenter`]; callers pick one through [`SegmenterKind`].

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::wordlist;
use crate::schema::sentence::{RawSentence, Sentence, Word};

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("segmenter backend failed: {0}")]
    Backend(String),
    #[error("dictionary is empty")]
    EmptyDictionary,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Words and translation for one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segmentation {
    pub words: Vec<Word>,
    pub translation: String,
}

/// A segmentation backend.
pub trait Segmenter {
    fn segment_and_translate(&self, text: &str) -> Result<Segmentation, SegmentError>;
}

/// Punctuation that never forms a word.
const CJK_PUNCTUATION: &[char] = &[
    '。', '，', '？', '！', '、', '：', '；', '“', '”', '‘', '’', '（', '）', '【', '】', '《',
    '》', '「', '」', '『', '』', '…', '—', '～', '·',
];

pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || CJK_PUNCTUATION.contains(&c)
}

/// True for tokens with nothing but punctuation and whitespace. Such tokens
/// are never vocabulary, even when a pre-segmented corpus keeps them.
pub fn is_punctuation_token(word: &str) -> bool {
    word.trim().chars().all(is_punctuation)
}

/// Remove bold markup left over from subtitle extraction.
pub fn strip_markup(text: &str) -> String {
    text.replace("<b>", "").replace("</b>", "").trim().to_string()
}

/// Longest-match dictionary segmenter.
///
/// At each position the longest dictionary word is taken; characters with
/// no match become single-character words. Punctuation and whitespace
/// separate runs and are dropped.
#[derive(Debug, Clone)]
pub struct GreedySegmenter {
    dictionary: FxHashSet<String>,
    max_word_len: usize,
}

impl GreedySegmenter {
    pub fn new(dictionary: FxHashSet<String>) -> Result<Self, SegmentError> {
        let max_word_len = dictionary
            .iter()
            .map(|w| w.chars().count())
            .max()
            .ok_or(SegmentError::EmptyDictionary)?;
        Ok(Self {
            dictionary,
            max_word_len,
        })
    }

    pub fn segment(&self, text: &str) -> Vec<Word> {
        let mut words = Vec::new();
        for run in runs(text) {
            let chars: Vec<char> = run.chars().collect();
            let mut i = 0;
            while i < chars.len() {
                let longest = (i + self.max_word_len).min(chars.len());
                let matched = (i + 2..=longest).rev().find_map(|j| {
                    let candidate: String = chars[i..j].iter().collect();
                    self.dictionary.contains(&candidate).then_some((candidate, j))
                });
                match matched {
                    Some((word, j)) => {
                        words.push(word);
                        i = j;
                    }
                    None => {
                        words.push(chars[i].to_string());
                        i += 1;
                    }
                }
            }
        }
        words
    }
}

impl Segmenter for GreedySegmenter {
    fn segment_and_translate(&self, text: &str) -> Result<Segmentation, SegmentError> {
        Ok(Segmentation {
            words: self.segment(text),
            translation: String::new(),
        })
    }
}

/// One word per character, for scripts without word boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterSegmenter;

impl Segmenter for CharacterSegmenter {
    fn segment_and_translate(&self, text: &str) -> Result<Segmentation, SegmentError> {
        let words = text
            .chars()
            .filter(|c| !c.is_whitespace() && !is_punctuation(*c))
            .map(|c| c.to_string())
            .collect();
        Ok(Segmentation {
            words,
            translation: String::new(),
        })
    }
}

/// Whitespace tokenizer for space-delimited languages.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn segment_and_translate(&self, text: &str) -> Result<Segmentation, SegmentError> {
        let words = text
            .split_whitespace()
            .map(|tok| tok.trim_matches(is_punctuation))
            .filter(|tok| !tok.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Segmentation {
            words,
            translation: String::new(),
        })
    }
}

/// Segmenter selection, as written in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmenterKind {
    Greedy { dictionary: PathBuf },
    Character,
    Whitespace,
}

impl Default for SegmenterKind {
    fn default() -> Self {
        Self::Character
    }
}

impl SegmenterKind {
    pub fn build(&self) -> Result<Box<dyn Segmenter>, SegmentError> {
        Ok(match self {
            Self::Greedy { dictionary } => {
                let words = wordlist::load_word_list(dictionary)?;
                tracing::info!(
                    words = words.len(),
                    path = %dictionary.display(),
                    "loaded segmentation dictionary"
                );
                Box::new(GreedySegmenter::new(words)?)
            }
            Self::Character => Box::new(CharacterSegmenter),
            Self::Whitespace => Box::new(WhitespaceSegmenter),
        })
    }
}

/// Result of enhancing raw sentences.
#[derive(Debug, Clone, Default)]
pub struct Enhanced {
    pub sentences: Vec<Sentence>,
    /// Sentences the segmenter failed on.
    pub failed: usize,
    /// Sentences that segmented to no words.
    pub empty: usize,
}

/// Segment raw sentences into pool-ready sentences.
///
/// A failure on one sentence skips it and leaves the rest untouched.
pub fn enhance<I, S>(raw: I, segmenter: &S) -> Enhanced
where
    I: IntoIterator<Item = RawSentence>,
    S: Segmenter + ?Sized,
{
    let mut out = Enhanced::default();
    for item in raw {
        let text = strip_markup(&item.text);
        if text.is_empty() {
            out.empty += 1;
            continue;
        }
        match segmenter.segment_and_translate(&text) {
            Ok(seg) if seg.words.is_empty() => {
                tracing::debug!(text = %text, "segmented to no words, dropping");
                out.empty += 1;
            }
            Ok(seg) => out.sentences.push(Sentence {
                text,
                words: seg.words,
                audio_ref: item.audio_ref,
                translation: seg.translation,
            }),
            Err(e) => {
                tracing::warn!(text = %text, error = %e, "segmentation failed, skipping");
                out.failed += 1;
            }
        }
    }
    tracing::info!(
        enhanced = out.sentences.len(),
        failed = out.failed,
        empty = out.empty,
        "enhancement complete"
    );
    out
}

/// Maximal runs of text between punctuation and whitespace.
fn runs(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || is_punctuation(c))
        .filter(|run| !run.is_empty())
}
