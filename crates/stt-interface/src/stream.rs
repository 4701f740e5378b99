use crate::word::Word;

/// One unit yielded by a live recognizer stream.
///
/// Arrival order is the only ordering guarantee. Interim events carry the
/// recognizer's current best guess for the trailing audio window and may
/// regress between arrivals; only `is_final` events are durable.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RecognizerEvent {
    pub text: String,
    pub is_final: bool,
    pub confidence: f64,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl RecognizerEvent {
    pub fn interim(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            is_final: false,
            confidence,
            words: Vec::new(),
        }
    }

    pub fn finalized(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            is_final: true,
            confidence,
            words: Vec::new(),
        }
    }

    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.words = words;
        self
    }
}
