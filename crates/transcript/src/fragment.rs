use lectern_stt_interface::Word;

/// One recognized utterance fragment, interim or final.
///
/// Immutable once constructed: the aggregator replaces or appends whole
/// fragments, never edits a stored one.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ResultFragment {
    pub text: String,
    pub is_final: bool,
    pub confidence: f64,
    /// Wall-clock capture time in epoch milliseconds (when the fragment was
    /// received, not where it sits in the audio).
    pub timestamp_ms: u64,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl ResultFragment {
    pub fn new(text: impl Into<String>, is_final: bool, confidence: f64, words: Vec<Word>) -> Self {
        Self {
            text: text.into(),
            is_final,
            confidence,
            timestamp_ms: now_epoch_ms(),
            words,
        }
    }
}

fn now_epoch_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .min(u64::MAX as u128) as u64
}
