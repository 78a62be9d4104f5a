use serde::{Deserialize, Serialize};
use std::fmt;

use super::sentence::{Sentence, Word};

/// Position of a word in the corpus-wide popularity ordering.
///
/// `Ranked(1)` is the most frequent word. Words missing from the frequency
/// table are `Unranked`, which orders after every ranked value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ranked(u32),
    Unranked,
}

impl Rank {
    pub fn value(&self) -> Option<u32> {
        match self {
            Self::Ranked(n) => Some(*n),
            Self::Unranked => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ranked(n) => write!(f, "{}", n),
            Self::Unranked => f.write_str("unranked"),
        }
    }
}

/// One accepted sentence in the output sequence.
///
/// `new_words` and `word_rank` are captured at the moment of selection and
/// never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// 1-based position in the output.
    pub sequence_index: usize,
    pub sentence: Sentence,
    pub new_words: Vec<Word>,
    /// Worst (numerically highest) rank among `new_words`; `None` for review sentences.
    pub word_rank: Option<Rank>,
}

impl SelectionRecord {
    pub fn new_word_count(&self) -> usize {
        self.new_words.len()
    }

    /// A review sentence introduces no new vocabulary.
    pub fn is_review(&self) -> bool {
        self.new_words.is_empty()
    }

    /// New words joined the way downstream tables expect them.
    pub fn new_words_joined(&self) -> String {
        self.new_words.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unranked_orders_after_every_rank() {
        assert!(Rank::Ranked(1) < Rank::Ranked(2));
        assert!(Rank::Ranked(u32::MAX) < Rank::Unranked);
        assert_eq!(
            [Rank::Unranked, Rank::Ranked(7), Rank::Ranked(3)].iter().min(),
            Some(&Rank::Ranked(3))
        );
    }

    #[test]
    fn rank_display() {
        assert_eq!(Rank::Ranked(42).to_string(), "42");
        assert_eq!(Rank::Unranked.to_string(), "unranked");
        assert_eq!(Rank::Unranked.value(), None);
    }

    #[test]
    fn record_joins_new_words() {
        let record = SelectionRecord {
            sequence_index: 1,
            sentence: Sentence::new("谢谢人", vec!["谢谢".to_string(), "人".to_string()]),
            new_words: vec!["谢谢".to_string(), "人".to_string()],
            word_rank: Some(Rank::Ranked(50)),
        };
        assert_eq!(record.new_words_joined(), "谢谢, 人");
        assert_eq!(record.new_word_count(), 2);
        assert!(!record.is_review());
    }
}
