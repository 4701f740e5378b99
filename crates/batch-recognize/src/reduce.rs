//! Reduction of a raw batch response into one flat [`BatchResult`].
//!
//! Absence of transcribable content is a valid, common terminal outcome
//! (silence, music-only audio), not an error: every missing level in the
//! nested response short-circuits to an empty result tagged `empty_results`.

use std::time::Duration;

use lectern_stt_interface::Word;
use lectern_stt_interface::batch::RawBatchResponse;

use crate::result::{BatchResult, QualityFlag};

const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct ReduceContext {
    /// Key of the submitted audio in the response's results map.
    pub audio_source: String,
    pub operation_id: String,
    pub processing_time: Duration,
}

pub fn reduce(mut raw: RawBatchResponse, ctx: ReduceContext) -> BatchResult {
    let Some(file_result) = raw.results.remove(&ctx.audio_source) else {
        if raw.results.is_empty() {
            tracing::warn!(operation = %ctx.operation_id, "no_transcription_results_returned");
        } else {
            tracing::warn!(
                operation = %ctx.operation_id,
                requested = %ctx.audio_source,
                available = ?raw.results.keys().collect::<Vec<_>>(),
                "no_results_for_requested_audio_source"
            );
        }
        return empty_result(ctx);
    };

    let Some(transcript) = file_result.transcript else {
        tracing::warn!(operation = %ctx.operation_id, "no_transcript_in_file_result");
        return empty_result(ctx);
    };

    if transcript.results.is_empty() {
        tracing::warn!(operation = %ctx.operation_id, "no_results_in_transcript");
        return empty_result(ctx);
    }

    let mut parts = Vec::new();
    let mut words: Vec<Word> = Vec::new();
    let mut confidences = Vec::new();

    for result in transcript.results {
        // alternatives are pre-sorted by confidence; the first is the best
        let Some(alternative) = result.alternatives.into_iter().next() else {
            continue;
        };

        confidences.push(alternative.confidence);
        for raw_word in alternative.words {
            words.push(Word {
                text: raw_word.text,
                start: raw_word.start,
                end: raw_word.end,
                confidence: raw_word.confidence.unwrap_or(alternative.confidence),
            });
        }
        parts.push(alternative.transcript);
    }

    let confidence = if confidences.is_empty() {
        0.0
    } else {
        confidences.iter().sum::<f64>() / confidences.len() as f64
    };

    // word timings are ground truth for duration
    let duration_seconds = words.last().map_or(0.0, |w| w.end);

    let mut quality_flags = Vec::new();
    if confidence < LOW_CONFIDENCE_THRESHOLD {
        quality_flags.push(QualityFlag::LowConfidence);
    }
    if words.is_empty() {
        quality_flags.push(QualityFlag::NoWords);
    }

    BatchResult {
        transcript: parts.join(" "),
        word_count: words.len(),
        words,
        confidence,
        duration_seconds,
        quality_flags,
        operation_id: ctx.operation_id,
        processing_time_seconds: ctx.processing_time.as_secs_f64(),
    }
}

fn empty_result(ctx: ReduceContext) -> BatchResult {
    BatchResult {
        transcript: String::new(),
        words: Vec::new(),
        confidence: 0.0,
        duration_seconds: 0.0,
        word_count: 0,
        quality_flags: vec![QualityFlag::EmptyResults],
        operation_id: ctx.operation_id,
        processing_time_seconds: ctx.processing_time.as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use lectern_stt_interface::batch::{
        RawAlternative, RawFileResult, RawRecognitionResult, RawTranscript, RawWord,
    };

    use super::*;

    const SOURCE: &str = "gs://bucket/audio.mp3";

    fn ctx() -> ReduceContext {
        ReduceContext {
            audio_source: SOURCE.to_string(),
            operation_id: "op-1".to_string(),
            processing_time: Duration::from_secs(12),
        }
    }

    fn raw_word(text: &str, start: f64, end: f64, confidence: Option<f64>) -> RawWord {
        RawWord {
            text: text.to_string(),
            start,
            end,
            confidence,
        }
    }

    fn response_with(results: Vec<RawRecognitionResult>) -> RawBatchResponse {
        let mut raw = RawBatchResponse::default();
        raw.results.insert(
            SOURCE.to_string(),
            RawFileResult {
                transcript: Some(RawTranscript { results }),
            },
        );
        raw
    }

    fn alternative(
        transcript: &str,
        confidence: f64,
        words: Vec<RawWord>,
    ) -> RawRecognitionResult {
        RawRecognitionResult {
            alternatives: vec![RawAlternative {
                transcript: transcript.to_string(),
                confidence,
                words,
            }],
        }
    }

    #[test]
    fn missing_results_map_is_empty_not_error() {
        let result = reduce(RawBatchResponse::default(), ctx());

        assert_eq!(result.quality_flags, [QualityFlag::EmptyResults]);
        assert_eq!(result.word_count, 0);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.transcript, "");
        assert_eq!(result.operation_id, "op-1");
    }

    #[test]
    fn missing_audio_source_key_is_empty() {
        let mut raw = RawBatchResponse::default();
        raw.results
            .insert("gs://bucket/other.mp3".to_string(), RawFileResult::default());

        let result = reduce(raw, ctx());
        assert_eq!(result.quality_flags, [QualityFlag::EmptyResults]);
    }

    #[test]
    fn missing_transcript_is_empty() {
        let mut raw = RawBatchResponse::default();
        raw.results
            .insert(SOURCE.to_string(), RawFileResult { transcript: None });

        let result = reduce(raw, ctx());
        assert_eq!(result.quality_flags, [QualityFlag::EmptyResults]);
    }

    #[test]
    fn empty_transcript_results_is_empty() {
        let result = reduce(response_with(vec![]), ctx());
        assert_eq!(result.quality_flags, [QualityFlag::EmptyResults]);
    }

    #[test]
    fn joins_transcripts_and_flattens_words() {
        let raw = response_with(vec![
            alternative(
                "hello world",
                0.9,
                vec![
                    raw_word("hello", 0.1, 0.5, Some(0.95)),
                    raw_word("world", 0.6, 1.2, None),
                ],
            ),
            alternative("again", 0.7, vec![raw_word("again", 1.5, 2.0, Some(0.7))]),
        ]);

        let result = reduce(raw, ctx());

        assert_eq!(result.transcript, "hello world again");
        assert_eq!(result.word_count, 3);
        assert_relative_eq!(result.confidence, 0.8);
        assert!(result.quality_flags.is_empty());
        // word without its own confidence inherits the alternative's
        assert_relative_eq!(result.words[1].confidence, 0.9);
        assert_relative_eq!(result.processing_time_seconds, 12.0);
    }

    #[test]
    fn duration_is_end_of_last_word() {
        let raw = response_with(vec![alternative(
            "two words",
            0.9,
            vec![
                raw_word("two", 0.0, 2.5, Some(0.9)),
                raw_word("words", 2.6, 4.0, Some(0.9)),
            ],
        )]);

        let result = reduce(raw, ctx());
        assert_relative_eq!(result.duration_seconds, 4.0);
    }

    #[test]
    fn takes_only_the_top_alternative() {
        let raw = response_with(vec![RawRecognitionResult {
            alternatives: vec![
                RawAlternative {
                    transcript: "best guess".to_string(),
                    confidence: 0.9,
                    words: vec![],
                },
                RawAlternative {
                    transcript: "worse guess".to_string(),
                    confidence: 0.4,
                    words: vec![],
                },
            ],
        }]);

        let result = reduce(raw, ctx());
        assert_eq!(result.transcript, "best guess");
        assert_relative_eq!(result.confidence, 0.9);
    }

    #[test]
    fn low_confidence_and_no_words_flags() {
        let raw = response_with(vec![alternative("mumble", 0.3, vec![])]);

        let result = reduce(raw, ctx());
        assert_eq!(
            result.quality_flags,
            [QualityFlag::LowConfidence, QualityFlag::NoWords]
        );
        assert_eq!(result.duration_seconds, 0.0);
        assert_eq!(result.transcript, "mumble");
    }

    #[test]
    fn results_without_alternatives_are_skipped() {
        let raw = response_with(vec![
            RawRecognitionResult {
                alternatives: vec![],
            },
            alternative("kept", 0.8, vec![raw_word("kept", 0.0, 1.0, Some(0.8))]),
        ]);

        let result = reduce(raw, ctx());
        assert_eq!(result.transcript, "kept");
        assert_relative_eq!(result.confidence, 0.8);
    }
}
