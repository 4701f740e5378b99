//! Session driver: routes a live recognizer stream into an aggregator.
//!
//! Consumes events in arrival order until the stream ends, the first
//! recognizer error, or external cancellation. Cancellation is not an error;
//! everything committed so far stays queryable on the aggregator.

use futures_util::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use lectern_stt_interface::RecognizerEvent;

use crate::aggregator::SharedAggregator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    StreamEnded,
    Cancelled,
}

#[derive(Debug, Clone, Copy)]
pub struct DriveSummary {
    pub interim_count: u64,
    pub final_count: u64,
    pub outcome: DriveOutcome,
}

pub async fn drive_session<S, E>(
    stream: S,
    session: &SharedAggregator,
    cancel: &CancellationToken,
) -> Result<DriveSummary, E>
where
    S: Stream<Item = Result<RecognizerEvent, E>>,
    E: std::fmt::Display,
{
    let mut stream = std::pin::pin!(stream);
    let mut interim_count = 0u64;
    let mut final_count = 0u64;

    let outcome = loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(interim_count, final_count, "session_cancelled");
                break DriveOutcome::Cancelled;
            }
            event = stream.next() => {
                match event {
                    Some(Ok(event)) => {
                        if event.is_final {
                            final_count += 1;
                            session.handle_final(event.text, event.confidence, event.words);
                        } else {
                            interim_count += 1;
                            session.handle_interim(event.text, event.confidence, event.words);
                        }
                    }
                    Some(Err(error)) => {
                        tracing::error!(%error, interim_count, final_count, "recognizer_stream_error");
                        return Err(error);
                    }
                    None => {
                        tracing::info!(interim_count, final_count, "recognizer_stream_ended");
                        break DriveOutcome::StreamEnded;
                    }
                }
            }
        }
    };

    Ok(DriveSummary {
        interim_count,
        final_count,
        outcome,
    })
}
