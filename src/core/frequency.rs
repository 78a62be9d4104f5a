/// Word frequency index — corpus-wide popularity ranks.

use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;

use crate::schema::selection::Rank;

#[derive(Debug, Error)]
pub enum FrequencyError {
    #[error("line {line}: empty word")]
    EmptyWord { line: usize },
    #[error("line {line}: negative count {count} for word '{word}'")]
    NegativeCount { line: usize, word: String, count: i64 },
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyRow {
    pub word: String,
    pub count: i64,
}

impl FrequencyRow {
    pub fn new(word: impl Into<String>, count: i64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Immutable mapping word → frequency rank, built once per corpus.
#[derive(Debug, Clone, Default)]
pub struct WordFrequencyIndex {
    ranks: FxHashMap<String, u32>,
    /// Words in rank order; `by_rank[0]` has rank 1.
    by_rank: Vec<String>,
}

impl WordFrequencyIndex {
    /// Build an index from table rows.
    ///
    /// Rows are stably sorted by descending count, so equal counts keep
    /// their input order. A word appearing twice keeps its best rank and
    /// the later row is ignored.
    pub fn from_rows<I>(rows: I) -> Result<Self, FrequencyError>
    where
        I: IntoIterator<Item = FrequencyRow>,
    {
        let mut validated = Vec::new();
        for (i, row) in rows.into_iter().enumerate() {
            validate_row(&row, i + 1)?;
            validated.push(row);
        }
        Ok(Self::from_validated(validated))
    }

    fn from_validated(mut rows: Vec<FrequencyRow>) -> Self {
        rows.sort_by(|a, b| b.count.cmp(&a.count));

        let mut ranks = FxHashMap::default();
        let mut by_rank = Vec::with_capacity(rows.len());
        for row in rows {
            if ranks.contains_key(&row.word) {
                continue;
            }
            ranks.insert(row.word.clone(), by_rank.len() as u32 + 1);
            by_rank.push(row.word);
        }

        Self { ranks, by_rank }
    }

    /// Parse a tab-separated frequency table.
    ///
    /// If the first non-blank line has a non-numeric count field it is a
    /// header, and the `Vocab`/`word` and `Count`/`count` columns are
    /// located by name. Otherwise column 0 is the word and column 1 the count.
    pub fn parse_table(text: &str) -> Result<Self, FrequencyError> {
        let mut word_col = 0;
        let mut count_col = 1;
        let mut rows = Vec::new();
        let mut seen_first = false;

        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            let trimmed = line.trim_end_matches('\r');
            if trimmed.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = trimmed.split('\t').map(str::trim).collect();

            if !seen_first {
                seen_first = true;
                if is_header(&fields) {
                    word_col = find_column(&fields, &["vocab", "word"]).ok_or_else(|| {
                        FrequencyError::Malformed {
                            line: line_no,
                            reason: "header has no word column".to_string(),
                        }
                    })?;
                    count_col = find_column(&fields, &["count", "frequency"]).ok_or_else(|| {
                        FrequencyError::Malformed {
                            line: line_no,
                            reason: "header has no count column".to_string(),
                        }
                    })?;
                    continue;
                }
            }

            let word = fields.get(word_col).copied().unwrap_or("");
            let count_field = fields.get(count_col).ok_or_else(|| FrequencyError::Malformed {
                line: line_no,
                reason: format!("expected at least {} fields", count_col.max(word_col) + 1),
            })?;
            let count: i64 = count_field.parse().map_err(|_| FrequencyError::Malformed {
                line: line_no,
                reason: format!("count '{}' is not an integer", count_field),
            })?;

            let row = FrequencyRow::new(word, count);
            validate_row(&row, line_no)?;
            rows.push(row);
        }

        Ok(Self::from_validated(rows))
    }

    /// Load a tab-separated frequency table from disk.
    pub fn load(path: &Path) -> Result<Self, FrequencyError> {
        let contents = std::fs::read_to_string(path)?;
        let index = Self::parse_table(&contents)?;
        tracing::info!(
            words = index.len(),
            path = %path.display(),
            "loaded frequency table"
        );
        Ok(index)
    }

    pub fn rank_of(&self, word: &str) -> Rank {
        match self.ranks.get(word) {
            Some(&rank) => Rank::Ranked(rank),
            None => Rank::Unranked,
        }
    }

    /// The `n` most frequent words, best rank first.
    pub fn most_frequent(&self, n: usize) -> impl Iterator<Item = &str> {
        self.by_rank.iter().take(n).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_rank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_rank.is_empty()
    }
}

fn validate_row(row: &FrequencyRow, line: usize) -> Result<(), FrequencyError> {
    if row.word.trim().is_empty() {
        return Err(FrequencyError::EmptyWord { line });
    }
    if row.count < 0 {
        return Err(FrequencyError::NegativeCount {
            line,
            word: row.word.clone(),
            count: row.count,
        });
    }
    Ok(())
}

fn is_header(fields: &[&str]) -> bool {
    fields.len() >= 2 && fields.iter().all(|f| f.parse::<i64>().is_err())
}

fn find_column(fields: &[&str], names: &[&str]) -> Option<usize> {
    fields
        .iter()
        .position(|f| names.iter().any(|n| f.eq_ignore_ascii_case(n)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> WordFrequencyIndex {
        WordFrequencyIndex::from_rows(vec![
            FrequencyRow::new("谢谢", 10),
            FrequencyRow::new("的", 900),
            FrequencyRow::new("你好", 300),
            FrequencyRow::new("人", 500),
        ])
        .unwrap()
    }

    #[test]
    fn ranks_follow_descending_count() {
        let index = sample_index();
        assert_eq!(index.rank_of("的"), Rank::Ranked(1));
        assert_eq!(index.rank_of("人"), Rank::Ranked(2));
        assert_eq!(index.rank_of("你好"), Rank::Ranked(3));
        assert_eq!(index.rank_of("谢谢"), Rank::Ranked(4));
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn missing_word_is_unranked() {
        let index = sample_index();
        assert_eq!(index.rank_of("猫"), Rank::Unranked);
    }

    #[test]
    fn ties_keep_input_order() {
        let index = WordFrequencyIndex::from_rows(vec![
            FrequencyRow::new("b", 5),
            FrequencyRow::new("a", 5),
            FrequencyRow::new("c", 5),
        ])
        .unwrap();
        assert_eq!(index.rank_of("b"), Rank::Ranked(1));
        assert_eq!(index.rank_of("a"), Rank::Ranked(2));
        assert_eq!(index.rank_of("c"), Rank::Ranked(3));
    }

    #[test]
    fn duplicate_word_keeps_best_rank() {
        let index = WordFrequencyIndex::from_rows(vec![
            FrequencyRow::new("x", 1),
            FrequencyRow::new("y", 7),
            FrequencyRow::new("x", 9),
        ])
        .unwrap();
        assert_eq!(index.rank_of("x"), Rank::Ranked(1));
        assert_eq!(index.rank_of("y"), Rank::Ranked(2));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn empty_word_rejected() {
        let result = WordFrequencyIndex::from_rows(vec![
            FrequencyRow::new("ok", 3),
            FrequencyRow::new("  ", 3),
        ]);
        assert!(matches!(result, Err(FrequencyError::EmptyWord { line: 2 })));
    }

    #[test]
    fn negative_count_rejected() {
        let result = WordFrequencyIndex::from_rows(vec![FrequencyRow::new("bad", -1)]);
        assert!(matches!(
            result,
            Err(FrequencyError::NegativeCount { count: -1, .. })
        ));
    }

    #[test]
    fn zero_count_is_valid() {
        let index = WordFrequencyIndex::from_rows(vec![FrequencyRow::new("rare", 0)]).unwrap();
        assert_eq!(index.rank_of("rare"), Rank::Ranked(1));
    }

    #[test]
    fn parse_table_with_named_header() {
        let table = "Rank\tVocab\tCount\n1\t的\t900\n2\t人\t500\n\n3\t你好\t300\n";
        let index = WordFrequencyIndex::parse_table(table).unwrap();
        assert_eq!(index.rank_of("的"), Rank::Ranked(1));
        assert_eq!(index.rank_of("你好"), Rank::Ranked(3));
    }

    #[test]
    fn parse_table_without_header() {
        let table = "人\t20\n的\t40\n";
        let index = WordFrequencyIndex::parse_table(table).unwrap();
        assert_eq!(index.rank_of("的"), Rank::Ranked(1));
        assert_eq!(index.rank_of("人"), Rank::Ranked(2));
    }

    #[test]
    fn parse_table_reports_bad_count_line() {
        let table = "Vocab\tCount\n的\t40\n人\tmany\n";
        let err = WordFrequencyIndex::parse_table(table).unwrap_err();
        assert!(matches!(err, FrequencyError::Malformed { line: 3, .. }));
    }

    #[test]
    fn parse_table_rejects_missing_count() {
        let table = "的\t40\n人\n";
        let err = WordFrequencyIndex::parse_table(table).unwrap_err();
        assert!(matches!(err, FrequencyError::Malformed { line: 2, .. }));
    }

    #[test]
    fn most_frequent_in_rank_order() {
        let index = sample_index();
        let top: Vec<&str> = index.most_frequent(2).collect();
        assert_eq!(top, vec!["的", "人"]);
        assert_eq!(index.most_frequent(10).count(), 4);
    }
}
