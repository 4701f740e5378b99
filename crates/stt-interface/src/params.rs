//! Explicit recognition request configuration.
//!
//! Every recognized option is enumerated here with its default; callers
//! construct a value, optionally override fields, and the submission path
//! validates it exactly once. There is no dynamic option merging.

const MIN_SAMPLE_RATE: u32 = 8_000;
const MAX_SAMPLE_RATE: u32 = 48_000;

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
pub enum AudioEncoding {
    #[strum(serialize = "linear16")]
    Linear16,
    #[strum(serialize = "flac")]
    Flac,
    #[strum(serialize = "mp3")]
    Mp3,
    #[strum(serialize = "ogg_opus")]
    OggOpus,
}

#[derive(Debug, thiserror::Error)]
pub enum InvalidOptions {
    #[error("language code must not be empty")]
    EmptyLanguage,

    #[error("max_alternatives must be at least 1, got {0}")]
    ZeroAlternatives(u32),

    #[error("sample rate {0} outside supported range {MIN_SAMPLE_RATE}..={MAX_SAMPLE_RATE}")]
    SampleRateOutOfRange(u32),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecognizeOptions {
    pub language: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub encoding: Option<AudioEncoding>,
    #[serde(default)]
    pub sample_rate: Option<u32>,
    pub punctuate: bool,
    pub word_timestamps: bool,
    pub max_alternatives: u32,
    pub profanity_filter: bool,
    pub diarization: bool,
}

impl Default for RecognizeOptions {
    fn default() -> Self {
        Self {
            language: "ja".to_string(),
            model: None,
            encoding: None,
            sample_rate: None,
            punctuate: true,
            word_timestamps: true,
            max_alternatives: 1,
            profanity_filter: false,
            diarization: false,
        }
    }
}

impl RecognizeOptions {
    pub fn validate(&self) -> Result<(), InvalidOptions> {
        if self.language.trim().is_empty() {
            return Err(InvalidOptions::EmptyLanguage);
        }
        if self.max_alternatives == 0 {
            return Err(InvalidOptions::ZeroAlternatives(self.max_alternatives));
        }
        if let Some(rate) = self.sample_rate
            && !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&rate)
        {
            return Err(InvalidOptions::SampleRateOutOfRange(rate));
        }
        Ok(())
    }

    /// Same options with the model replaced. Used by the fallback retry.
    pub fn with_model(&self, model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..self.clone()
        }
    }
}
