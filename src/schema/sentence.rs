use serde::{Deserialize, Serialize};

/// A token in the target language. Identity is exact string equality.
pub type Word = String;

/// A transcribed sentence, already segmented into words.
///
/// `audio_ref` and `translation` are opaque to the sequencer and are
/// passed through to the output untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub words: Vec<Word>,
    #[serde(default)]
    pub audio_ref: String,
    #[serde(default)]
    pub translation: String,
}

impl Sentence {
    pub fn new(text: impl Into<String>, words: Vec<Word>) -> Self {
        Self {
            text: text.into(),
            words,
            audio_ref: String::new(),
            translation: String::new(),
        }
    }

    pub fn with_audio_ref(mut self, audio_ref: impl Into<String>) -> Self {
        self.audio_ref = audio_ref.into();
        self
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = translation.into();
        self
    }

    /// A sentence is only eligible for sequencing when it has at least one word.
    pub fn is_valid(&self) -> bool {
        !self.words.is_empty()
    }
}

/// A sentence before segmentation: text plus pass-through audio reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSentence {
    pub text: String,
    #[serde(default)]
    pub audio_ref: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_fill_pass_through_fields() {
        let s = Sentence::new("你好", vec!["你好".to_string()])
            .with_audio_ref("clip_0001.mp3")
            .with_translation("Hello");
        assert_eq!(s.audio_ref, "clip_0001.mp3");
        assert_eq!(s.translation, "Hello");
        assert!(s.is_valid());
    }

    #[test]
    fn empty_word_list_is_invalid() {
        let s = Sentence::new("。", Vec::new());
        assert!(!s.is_valid());
    }

    #[test]
    fn missing_optional_fields_default_in_ron() {
        let s: Sentence = ron::from_str(r#"(text: "人你好", words: ["人", "你好"])"#).unwrap();
        assert_eq!(s.words, vec!["人", "你好"]);
        assert!(s.audio_ref.is_empty());
        assert!(s.translation.is_empty());
    }
}
