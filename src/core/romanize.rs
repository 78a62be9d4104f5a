/// Pinyin romanization for sequence output.

use pinyin::ToPinyin;

use crate::core::segment::is_punctuation;
use crate::schema::sentence::Word;

/// Tone-marked pinyin for `text`, one syllable per Han character.
///
/// Syllables are space-separated. Characters without a reading (Latin
/// letters, digits, punctuation) pass through unchanged; punctuation
/// attaches to the preceding syllable.
pub fn pinyin(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    let mut after_syllable = false;
    for c in text.chars() {
        match c.to_pinyin() {
            Some(reading) => {
                if !out.is_empty() && !out.ends_with(char::is_whitespace) {
                    out.push(' ');
                }
                out.push_str(reading.with_tone());
                after_syllable = true;
            }
            None => {
                if after_syllable && !c.is_whitespace() && !is_punctuation(c) {
                    out.push(' ');
                }
                out.push(c);
                after_syllable = false;
            }
        }
    }
    out
}

/// Each word romanized on its own, joined like `SelectionRecord::new_words_joined`.
pub fn pinyin_words(words: &[Word]) -> String {
    words
        .iter()
        .map(|w| pinyin(w.trim()))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
