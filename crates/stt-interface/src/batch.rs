//! Raw shapes of a completed long-running recognition response.
//!
//! Engines return a deeply nested structure in which every level may be
//! absent: the results map, the entry for a given audio source, the
//! transcript, or the transcript's result list. Absence at any level is a
//! valid terminal outcome (silence, music-only audio), so every field below
//! defaults rather than failing deserialization.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RawBatchResponse {
    /// Keyed by audio-source identifier (the URI the caller submitted).
    #[serde(default)]
    pub results: HashMap<String, RawFileResult>,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RawFileResult {
    #[serde(default)]
    pub transcript: Option<RawTranscript>,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RawTranscript {
    #[serde(default)]
    pub results: Vec<RawRecognitionResult>,
}

/// One recognized span of audio. Alternatives arrive pre-sorted by
/// confidence; consumers take the first and ignore the rest.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RawRecognitionResult {
    #[serde(default)]
    pub alternatives: Vec<RawAlternative>,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RawAlternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub words: Vec<RawWord>,
}

/// Word-level timing as the engine reports it. `confidence` is optional on
/// the wire; reduction falls back to the alternative's confidence.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RawWord {
    pub text: String,
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_every_level_absent() {
        let response: RawBatchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_empty());

        let response: RawBatchResponse =
            serde_json::from_str(r#"{"results": {"gs://bucket/a.mp3": {}}}"#).unwrap();
        assert!(response.results["gs://bucket/a.mp3"].transcript.is_none());
    }

    #[test]
    fn deserializes_full_nesting() {
        let json = r#"{
            "results": {
                "gs://bucket/a.mp3": {
                    "transcript": {
                        "results": [{
                            "alternatives": [{
                                "transcript": "hello world",
                                "confidence": 0.92,
                                "words": [
                                    {"text": "hello", "start": 0.1, "end": 0.5},
                                    {"text": "world", "start": 0.6, "end": 0.9, "confidence": 0.88}
                                ]
                            }]
                        }]
                    }
                }
            }
        }"#;

        let response: RawBatchResponse = serde_json::from_str(json).unwrap();
        let transcript = response.results["gs://bucket/a.mp3"]
            .transcript
            .as_ref()
            .unwrap();
        let alt = &transcript.results[0].alternatives[0];
        assert_eq!(alt.transcript, "hello world");
        assert_eq!(alt.words[0].confidence, None);
        assert_eq!(alt.words[1].confidence, Some(0.88));
    }
}
