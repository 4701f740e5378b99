use lectern_stt_interface::Word;

/// Notable condition on a completed result. Flags describe the content, they
/// are not errors: an empty result is a valid terminal outcome.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
pub enum QualityFlag {
    #[strum(serialize = "empty_results")]
    EmptyResults,
    #[strum(serialize = "low_confidence")]
    LowConfidence,
    #[strum(serialize = "no_words")]
    NoWords,
}

/// Flat, reduced view of one completed batch operation. Constructed once
/// after a poll-to-completion cycle; never mutated afterwards.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BatchResult {
    pub transcript: String,
    pub words: Vec<Word>,
    pub confidence: f64,
    /// End-time offset of the last word. Word timings are ground truth;
    /// no declared duration field is consulted.
    pub duration_seconds: f64,
    pub word_count: usize,
    pub quality_flags: Vec<QualityFlag>,
    pub operation_id: String,
    pub processing_time_seconds: f64,
}

impl BatchResult {
    pub fn is_empty(&self) -> bool {
        self.quality_flags.contains(&QualityFlag::EmptyResults)
    }
}
