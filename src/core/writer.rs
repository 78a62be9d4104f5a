/// Sequence output — TSV tables and RON snapshots of selection records.

use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::core::romanize::{pinyin, pinyin_words};
use crate::schema::selection::SelectionRecord;

#[derive(Debug, Error)]
pub enum WriterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    RonSer(#[from] ron::Error),
}

const TSV_HEADER: &str = "Sequence\tSentence\tAudioRef\tTranslation\tNewWords\tWordRank";
const PINYIN_HEADER: &str = "\tSentencePinyin\tNewWordsPinyin";

/// Optional columns of the TSV table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TsvOptions {
    /// Append `SentencePinyin` and `NewWordsPinyin` columns.
    pub pinyin: bool,
}

impl TsvOptions {
    pub fn with_pinyin() -> Self {
        Self { pinyin: true }
    }

    fn header(&self) -> String {
        if self.pinyin {
            format!("{}{}", TSV_HEADER, PINYIN_HEADER)
        } else {
            TSV_HEADER.to_string()
        }
    }
}

/// Write records as a tab-separated table with a header row.
pub fn write_tsv<W: Write>(
    records: &[SelectionRecord],
    options: TsvOptions,
    out: &mut W,
) -> Result<(), WriterError> {
    writeln!(out, "{}", options.header())?;
    write_tsv_rows(records, options, out)
}

/// Write records as table rows only, for appending to an existing table.
pub fn write_tsv_rows<W: Write>(
    records: &[SelectionRecord],
    options: TsvOptions,
    out: &mut W,
) -> Result<(), WriterError> {
    for record in records {
        let rank = record
            .word_rank
            .map(|r| r.to_string())
            .unwrap_or_default();
        write!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            record.sequence_index,
            clean_field(&record.sentence.text),
            clean_field(&record.sentence.audio_ref),
            clean_field(&record.sentence.translation),
            clean_field(&record.new_words_joined()),
            rank
        )?;
        if options.pinyin {
            write!(
                out,
                "\t{}\t{}",
                clean_field(&pinyin(&record.sentence.text)),
                clean_field(&pinyin_words(&record.new_words))
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Save records to a TSV file, replacing it.
pub fn save_tsv(
    records: &[SelectionRecord],
    options: TsvOptions,
    path: &Path,
) -> Result<(), WriterError> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_tsv(records, options, &mut file)?;
    file.flush()?;
    Ok(())
}

/// Append records to a TSV file, writing the header only if the file is new or empty.
pub fn append_tsv(
    records: &[SelectionRecord],
    options: TsvOptions,
    path: &Path,
) -> Result<(), WriterError> {
    let needs_header = std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let mut file = std::io::BufWriter::new(file);
    if needs_header {
        writeln!(file, "{}", options.header())?;
    }
    write_tsv_rows(records, options, &mut file)?;
    file.flush()?;
    tracing::info!(
        records = records.len(),
        path = %path.display(),
        "appended sequence"
    );
    Ok(())
}

/// Save records as a RON list.
pub fn save_sequence(records: &[SelectionRecord], path: &Path) -> Result<(), WriterError> {
    let serialized = ron::ser::to_string_pretty(records, ron::ser::PrettyConfig::default())?;
    std::fs::write(path, serialized)?;
    Ok(())
}

/// Load records saved by [`save_sequence`].
pub fn load_sequence(path: &Path) -> Result<Vec<SelectionRecord>, WriterError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(ron::from_str(&contents)?)
}

/// Tabs and line breaks would split a field.
fn clean_field(field: &str) -> String {
    field.replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::selection::Rank;
    use crate::schema::sentence::Sentence;

    fn records() -> Vec<SelectionRecord> {
        vec![
            SelectionRecord {
                sequence_index: 1,
                sentence: Sentence::new("你好", vec!["你好".to_string()])
                    .with_audio_ref("clip_1.mp3")
                    .with_translation("Hello"),
                new_words: vec!["你好".to_string()],
                word_rank: Some(Rank::Ranked(3)),
            },
            SelectionRecord {
                sequence_index: 2,
                sentence: Sentence::new("嗯嗯", vec!["嗯".to_string(), "嗯".to_string()])
                    .with_translation("Mm\thm"),
                new_words: vec!["嗯".to_string()],
                word_rank: Some(Rank::Unranked),
            },
            SelectionRecord {
                sequence_index: 3,
                sentence: Sentence::new("你好嗯", vec!["你好".to_string(), "嗯".to_string()]),
                new_words: Vec::new(),
                word_rank: None,
            },
        ]
    }

    #[test]
    fn tsv_has_header_and_fields() {
        let mut buf = Vec::new();
        write_tsv(&records(), TsvOptions::default(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], TSV_HEADER);
        assert_eq!(lines[1], "1\t你好\tclip_1.mp3\tHello\t你好\t3");
        assert_eq!(lines[2], "2\t嗯嗯\t\tMm hm\t嗯\tunranked");
        assert_eq!(lines[3], "3\t你好嗯\t\t\t\t");
    }

    #[test]
    fn pinyin_columns_follow_rank() {
        let mut buf = Vec::new();
        write_tsv(&records(), TsvOptions::with_pinyin(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Sequence\tSentence\tAudioRef\tTranslation\tNewWords\tWordRank\tSentencePinyin\tNewWordsPinyin"
        );
        assert_eq!(lines[1], "1\t你好\tclip_1.mp3\tHello\t你好\t3\tnǐ hǎo\tnǐ hǎo");
        // Review rows have a sentence reading but no new-word reading
        let fields: Vec<&str> = lines[3].split('\t').collect();
        assert_eq!(fields.len(), 8);
        assert!(fields[6].starts_with("nǐ hǎo "));
        assert_eq!(fields[7], "");
    }

    #[test]
    fn append_writes_header_once() {
        let path = std::path::PathBuf::from("target/test_append_sequence.tsv");
        std::fs::create_dir_all("target").unwrap();
        let _ = std::fs::remove_file(&path);

        append_tsv(&records()[..1], TsvOptions::default(), &path).unwrap();
        append_tsv(&records()[1..], TsvOptions::default(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("Sequence\t").count(), 1);
        assert_eq!(text.lines().count(), 4);

        // Cleanup
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn save_and_load_sequence() {
        let path = std::path::PathBuf::from("target/test_sequence.ron");
        std::fs::create_dir_all("target").unwrap();

        save_sequence(&records(), &path).unwrap();
        let loaded = load_sequence(&path).unwrap();
        assert_eq!(loaded, records());

        // Cleanup
        let _ = std::fs::remove_file(&path);
    }
}
