//! Submission with one automatic recovery path, and the composed
//! submit → poll → reduce flow.

use tokio_util::sync::CancellationToken;

use lectern_stt_interface::RecognizeOptions;

use crate::error::Error;
use crate::operation::{BatchOperation, BatchRecognizer};
use crate::poll::{PollConfig, poll_until_done};
use crate::reduce::{ReduceContext, reduce};
use crate::result::BatchResult;

/// Model retried once when the engine rejects the requested model name.
pub const FALLBACK_MODEL: &str = "latest_long";

/// Validate options once and start the operation. When the engine rejects
/// the requested model (detected by substring match on the error text), the
/// submission is retried exactly once with [`FALLBACK_MODEL`]; a second
/// failure surfaces as [`Error::ModelRejected`]. Every other failure
/// propagates untouched.
pub async fn submit_with_fallback<R: BatchRecognizer>(
    recognizer: &R,
    options: &RecognizeOptions,
) -> Result<R::Operation, Error> {
    options.validate()?;

    match recognizer.start(options).await {
        Ok(op) => Ok(op),
        Err(error)
            if mentions_model(&error)
                && options.model.is_some()
                && options.model.as_deref() != Some(FALLBACK_MODEL) =>
        {
            tracing::warn!(
                %error,
                requested = options.model.as_deref().unwrap_or_default(),
                fallback = FALLBACK_MODEL,
                "model_rejected_retrying_with_fallback"
            );
            recognizer
                .start(&options.with_model(FALLBACK_MODEL))
                .await
                .map_err(|e| Error::ModelRejected(e.to_string()))
        }
        Err(error) => Err(error),
    }
}

fn mentions_model(error: &Error) -> bool {
    match error {
        Error::AudioFormat(message) | Error::Transcription(message) => {
            message.to_lowercase().contains("model")
        }
        _ => false,
    }
}

/// Full batch flow: submit (with model fallback), poll to completion under
/// the caller's cancellation token, reduce to a flat result stamped with the
/// wall-clock processing time.
pub async fn transcribe<R: BatchRecognizer>(
    recognizer: &R,
    options: &RecognizeOptions,
    audio_source: impl Into<String>,
    config: &PollConfig,
    cancel: &CancellationToken,
) -> Result<BatchResult, Error> {
    let started = tokio::time::Instant::now();
    let audio_source = audio_source.into();

    tracing::info!(
        %audio_source,
        model = options.model.as_deref().unwrap_or("default"),
        language = %options.language,
        "batch_transcription_started"
    );

    let mut op = submit_with_fallback(recognizer, options).await?;
    let operation_id = op.id().to_string();

    let raw = poll_until_done(&mut op, config, cancel).await?;

    let result = reduce(
        raw,
        ReduceContext {
            audio_source,
            operation_id,
            processing_time: started.elapsed(),
        },
    );

    tracing::info!(
        operation = %result.operation_id,
        word_count = result.word_count,
        confidence = result.confidence,
        duration_secs = result.duration_seconds,
        processing_secs = result.processing_time_seconds,
        quality_flags = ?result.quality_flags,
        "batch_transcription_completed"
    );

    Ok(result)
}
