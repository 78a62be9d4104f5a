/// Corpus loading — enhanced sentence tables and raw sentence lists.

use std::path::Path;
use thiserror::Error;

use crate::core::segment::strip_markup;
use crate::schema::sentence::{RawSentence, Sentence};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    RonSer(#[from] ron::Error),
}

/// Load an enhanced corpus. `.ron` files hold a list of sentences; any
/// other extension is read as a tab-separated table.
pub fn load_corpus(path: &Path) -> Result<Vec<Sentence>, CorpusError> {
    let contents = std::fs::read_to_string(path)?;
    let sentences = if is_ron(path) {
        parse_corpus_ron(&contents)?
    } else {
        parse_corpus_table(&contents)?
    };
    tracing::info!(
        sentences = sentences.len(),
        path = %path.display(),
        "loaded corpus"
    );
    Ok(sentences)
}

pub fn parse_corpus_ron(text: &str) -> Result<Vec<Sentence>, CorpusError> {
    let mut sentences: Vec<Sentence> = ron::from_str(text)?;
    for s in &mut sentences {
        s.text = strip_markup(&s.text);
    }
    Ok(sentences)
}

/// Parse a tab-separated corpus table.
///
/// The header must name `Sentence` and `segmented_words` columns;
/// `translation` and `audio_ref` are optional. Segmented words are
/// comma-separated. Rows with a blank `segmented_words` field yield a
/// sentence with no words, which the pool later excludes.
pub fn parse_corpus_table(text: &str) -> Result<Vec<Sentence>, CorpusError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Ok(Vec::new());
    };
    let columns: Vec<&str> = header.trim_end_matches('\r').split('\t').map(str::trim).collect();
    let column = |name: &str| columns.iter().position(|c| c.eq_ignore_ascii_case(name));

    let text_col = column("Sentence").ok_or(CorpusError::MissingColumn("Sentence"))?;
    let words_col =
        column("segmented_words").ok_or(CorpusError::MissingColumn("segmented_words"))?;
    let translation_col = column("translation");
    let audio_col = column("audio_ref");

    let mut sentences = Vec::new();
    for (i, line) in lines {
        let fields: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();
        let field = |col: usize| fields.get(col).map(|f| f.trim()).unwrap_or("");

        if fields.len() <= text_col {
            return Err(CorpusError::Malformed {
                line: i + 1,
                reason: format!("expected {} fields, found {}", columns.len(), fields.len()),
            });
        }

        let words = field(words_col)
            .split(',')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();

        sentences.push(Sentence {
            text: strip_markup(field(text_col)),
            words,
            audio_ref: audio_col.map(field).unwrap_or_default().to_string(),
            translation: translation_col.map(field).unwrap_or_default().to_string(),
        });
    }
    Ok(sentences)
}

/// Write a corpus as a RON list.
pub fn save_corpus(sentences: &[Sentence], path: &Path) -> Result<(), CorpusError> {
    let serialized = ron::ser::to_string_pretty(sentences, ron::ser::PrettyConfig::default())?;
    std::fs::write(path, serialized)?;
    Ok(())
}

/// Load raw sentences for segmentation.
///
/// `.ron` files hold a list of raw sentences. Otherwise each non-blank
/// line is `text` or `text<TAB>audio_ref`.
pub fn load_raw(path: &Path) -> Result<Vec<RawSentence>, CorpusError> {
    let contents = std::fs::read_to_string(path)?;
    if is_ron(path) {
        return Ok(ron::from_str(&contents)?);
    }
    Ok(parse_raw_lines(&contents))
}

pub fn parse_raw_lines(text: &str) -> Vec<RawSentence> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (text, audio_ref) = line.split_once('\t').unwrap_or((line, ""));
            RawSentence {
                text: text.trim().to_string(),
                audio_ref: audio_ref.trim().to_string(),
            }
        })
        .collect()
}

fn is_ron(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_with_optional_columns() {
        let table = "Sentence\tstart_time\tsegmented_words\ttranslation\taudio_ref\n\
                     <b>你好</b>\t0.5\t你好\tHello\tclip_1.mp3\n\
                     人你好\t1.2\t人, 你好\tHello, person\tclip_2.mp3\n";
        let sentences = parse_corpus_table(table).unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "你好");
        assert_eq!(sentences[0].translation, "Hello");
        assert_eq!(sentences[1].words, vec!["人", "你好"]);
        assert_eq!(sentences[1].audio_ref, "clip_2.mp3");
    }

    #[test]
    fn table_without_optional_columns() {
        let table = "Sentence\tsegmented_words\n谢谢人\t谢谢,人\n";
        let sentences = parse_corpus_table(table).unwrap();
        assert_eq!(sentences[0].words, vec!["谢谢", "人"]);
        assert!(sentences[0].audio_ref.is_empty());
    }

    #[test]
    fn blank_words_field_gives_empty_sentence() {
        let table = "Sentence\tsegmented_words\n嗯\t\n";
        let sentences = parse_corpus_table(table).unwrap();
        assert!(sentences[0].words.is_empty());
    }

    #[test]
    fn table_missing_words_column_fails() {
        let err = parse_corpus_table("Sentence\ttranslation\n你好\tHello\n").unwrap_err();
        assert!(matches!(err, CorpusError::MissingColumn("segmented_words")));
    }

    #[test]
    fn empty_table_is_empty_corpus() {
        assert!(parse_corpus_table("\n\n").unwrap().is_empty());
    }

    #[test]
    fn ron_corpus_strips_markup() {
        let ron_text = r#"[
            (text: "<b>你好</b>", words: ["你好"], audio_ref: "a.mp3"),
            (text: "人", words: ["人"]),
        ]"#;
        let sentences = parse_corpus_ron(ron_text).unwrap();
        assert_eq!(sentences[0].text, "你好");
        assert_eq!(sentences[1].translation, "");
    }

    #[test]
    fn raw_lines_with_optional_audio() {
        let raw = parse_raw_lines("你好\tclip_1.mp3\n\n谢谢\n");
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].audio_ref, "clip_1.mp3");
        assert_eq!(raw[1].text, "谢谢");
        assert!(raw[1].audio_ref.is_empty());
    }

    #[test]
    fn save_and_load_corpus() {
        let sentences = vec![Sentence::new("你好", vec!["你好".to_string()]).with_translation("Hello")];
        let path = std::path::PathBuf::from("target/test_corpus_roundtrip.ron");
        std::fs::create_dir_all("target").unwrap();

        save_corpus(&sentences, &path).unwrap();
        let loaded = load_corpus(&path).unwrap();
        assert_eq!(loaded, sentences);

        // Cleanup
        let _ = std::fs::remove_file(&path);
    }
}
