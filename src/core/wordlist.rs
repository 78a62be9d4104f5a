/// Dictionary word-list cleaning.
///
/// Graded vocabulary lists annotate entries with part-of-speech notes in
/// full-width parentheses, list alternative forms separated by `｜` and
/// mark bound forms with ellipses. These helpers reduce such entries to
/// plain dictionary words.

use rustc_hash::FxHashSet;
use std::path::Path;

/// Clean one raw list entry into zero or more words.
pub fn clean_entry(raw: &str) -> Vec<String> {
    let stripped = strip_annotations(raw);
    stripped
        .split('｜')
        .map(|part| part.replace('…', "").replace("...", "").trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Remove every `（…）` annotation, including its contents.
fn strip_annotations(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for c in raw.chars() {
        match c {
            '（' => depth += 1,
            '）' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Clean every line of a word list. The first tab-separated field of a
/// line is taken as the entry.
pub fn parse_word_list(text: &str) -> FxHashSet<String> {
    text.lines()
        .filter_map(|line| line.split('\t').next())
        .flat_map(clean_entry)
        .collect()
}

/// Load and clean a word list from disk.
pub fn load_word_list(path: &Path) -> std::io::Result<FxHashSet<String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_word_list(&contents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_part_of_speech_note() {
        assert_eq!(clean_entry("白（形）"), vec!["白"]);
    }

    #[test]
    fn splits_alternative_forms() {
        assert_eq!(clean_entry("爸爸｜爸（名）"), vec!["爸爸", "爸"]);
    }

    #[test]
    fn removes_ellipses() {
        assert_eq!(clean_entry("…的时候"), vec!["的时候"]);
        assert_eq!(clean_entry("一边...一边"), vec!["一边一边"]);
    }

    #[test]
    fn annotation_only_entry_is_empty() {
        assert!(clean_entry("（量）").is_empty());
        assert!(clean_entry("   ").is_empty());
    }

    #[test]
    fn parse_uses_first_field_and_dedupes() {
        let list = parse_word_list("白（形）\tbái\twhite\n白\tbái\n\n人\trén\n");
        assert_eq!(list.len(), 2);
        assert!(list.contains("白"));
        assert!(list.contains("人"));
    }
}
