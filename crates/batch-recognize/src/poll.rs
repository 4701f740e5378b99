//! Bounded polling of a long-running operation.
//!
//! Cooperative wait rather than a blocking sleep: the loop selects on the
//! caller's cancellation token between checks, so an abandoned submission
//! never leaks a sleeping task.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use lectern_stt_interface::batch::RawBatchResponse;

use crate::error::Error;
use crate::operation::BatchOperation;

#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub interval: Duration,
    pub ceiling: Duration,
    /// Log progress every Nth poll.
    pub progress_every: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            ceiling: Duration::from_secs(3600),
            progress_every: 10,
        }
    }
}

/// Poll `op` at a fixed interval until it reports done, then fetch and
/// return the raw result. Fails with [`Error::PollingTimeout`] when the
/// ceiling elapses first and [`Error::Cancelled`] when the token fires.
pub async fn poll_until_done<O: BatchOperation>(
    op: &mut O,
    config: &PollConfig,
    cancel: &CancellationToken,
) -> Result<RawBatchResponse, Error> {
    let started = tokio::time::Instant::now();
    let mut polls: u32 = 0;

    tracing::info!(operation = op.id(), "batch_poll_started");

    while !op.is_done().await? {
        polls += 1;
        let elapsed = started.elapsed();

        if elapsed >= config.ceiling {
            tracing::error!(
                operation = op.id(),
                elapsed_secs = elapsed.as_secs(),
                polls,
                "batch_poll_timeout"
            );
            return Err(Error::PollingTimeout {
                elapsed_secs: elapsed.as_secs(),
            });
        }

        if polls % config.progress_every == 0 {
            tracing::info!(
                operation = op.id(),
                elapsed_secs = elapsed.as_secs(),
                polls,
                "batch_poll_progress"
            );
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(operation = op.id(), polls, "batch_poll_cancelled");
                return Err(Error::Cancelled);
            }
            _ = tokio::time::sleep(config.interval) => {}
        }
    }

    tracing::info!(
        operation = op.id(),
        elapsed_secs = started.elapsed().as_secs(),
        polls,
        "batch_operation_completed"
    );

    op.fetch_result()
        .await
        .map_err(|e| Error::ResultRetrieval(e.to_string()))
}
