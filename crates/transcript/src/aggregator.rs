//! # Replace-or-Append Result Aggregator
//!
//! Recognizers repeatedly re-decode the same trailing audio window and emit
//! improving guesses; only the final decision is durable. The aggregator
//! therefore keeps **one** revisable interim slot and an append-only list of
//! committed finals as separate fields, so "current live guess" and
//! "committed transcript" are both O(1) to answer at any point mid-stream.
//!
//! Two commit paths, no further state machine:
//! - interim → unconditionally replaces the interim slot (latest wins)
//! - final → appends to the committed list and clears the interim slot
//!
//! Registered consumer callbacks observe every commit in order; a failing
//! consumer is logged and suppressed, never allowed to break the stream.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard};

use lectern_stt_interface::Word;

use crate::export::SessionExport;
use crate::fragment::ResultFragment;
use crate::metrics::SessionMetrics;

pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

type ResultCallback = Box<dyn FnMut(&ResultFragment) -> Result<(), CallbackError> + Send>;

/// Single-writer session state. One producer feeds fragments; wrap in
/// [`SharedAggregator`] when readers or the consumer callback run on other
/// tasks.
pub struct ResultAggregator {
    current_interim: Option<ResultFragment>,
    finals: Vec<ResultFragment>,
    confidence_sum: f64,
    metrics: SessionMetrics,
    callback: Option<ResultCallback>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self {
            current_interim: None,
            finals: Vec::new(),
            confidence_sum: 0.0,
            metrics: SessionMetrics::default(),
            callback: None,
        }
    }

    pub fn set_callback(
        &mut self,
        callback: impl FnMut(&ResultFragment) -> Result<(), CallbackError> + Send + 'static,
    ) {
        self.callback = Some(Box::new(callback));
    }

    /// Accept an interim result, replacing any previous one. No merge, no
    /// ordering check against the previous interim. Accepts any well-formed
    /// input as-is, including empty text and zero confidence.
    pub fn handle_interim(
        &mut self,
        text: impl Into<String>,
        confidence: f64,
        words: Vec<Word>,
    ) -> ResultFragment {
        let fragment = ResultFragment::new(text, false, confidence, words);

        self.current_interim = Some(fragment.clone());
        self.metrics.total_interim += 1;
        self.metrics.last_result_at_ms = Some(fragment.timestamp_ms);

        self.forward(&fragment);

        tracing::debug!(confidence, "interim_result_replaced");
        fragment
    }

    /// Commit a final result. Appends to the transcript, clears any pending
    /// interim (final always supersedes it), and recomputes the derived
    /// metrics incrementally.
    pub fn handle_final(
        &mut self,
        text: impl Into<String>,
        confidence: f64,
        words: Vec<Word>,
    ) -> ResultFragment {
        let fragment = ResultFragment::new(text, true, confidence, words);

        self.finals.push(fragment.clone());
        self.current_interim = None;

        self.confidence_sum += fragment.confidence;
        self.metrics.total_final += 1;
        self.metrics.avg_confidence = self.confidence_sum / self.metrics.total_final as f64;
        self.metrics.interim_to_final_ratio =
            self.metrics.total_interim as f64 / self.metrics.total_final as f64;
        self.metrics.last_result_at_ms = Some(fragment.timestamp_ms);

        self.forward(&fragment);

        tracing::info!(
            committed = self.finals.len(),
            confidence,
            "final_result_committed"
        );
        fragment
    }

    pub fn current_interim(&self) -> Option<&ResultFragment> {
        self.current_interim.as_ref()
    }

    /// Defensive copy; caller mutation never affects internal state.
    pub fn final_results(&self) -> Vec<ResultFragment> {
        self.finals.clone()
    }

    /// Space-joined text of committed finals in commit order. The pending
    /// interim is never part of the transcript.
    pub fn full_transcript(&self) -> String {
        self.finals
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn metrics(&self) -> SessionMetrics {
        self.metrics
    }

    /// Clear all state back to initial values for a new session. The
    /// registered callback survives a reset.
    pub fn reset(&mut self) {
        self.current_interim = None;
        self.finals.clear();
        self.confidence_sum = 0.0;
        self.metrics = SessionMetrics::default();
        tracing::debug!("aggregator_reset");
    }

    /// Serializable snapshot for handoff to external persistence.
    pub fn export(&self) -> SessionExport {
        SessionExport {
            full_transcript: self.full_transcript(),
            segments: self.finals.clone(),
            metrics: self.metrics,
            exported_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn forward(&mut self, fragment: &ResultFragment) {
        let Some(callback) = self.callback.as_mut() else {
            return;
        };
        match catch_unwind(AssertUnwindSafe(|| callback(fragment))) {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                tracing::error!(%error, is_final = fragment.is_final, "result_callback_failed");
            }
            Err(_) => {
                tracing::error!(is_final = fragment.is_final, "result_callback_panicked");
            }
        }
    }
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle exposing the aggregator behind a single lock.
///
/// Mutations and reads acquire the same lock, so readers always observe a
/// consistent replace/append + metrics state, never a torn snapshot. The
/// callback runs inside the commit critical section, preserving commit
/// order. Each session's handle is independent; nothing is shared across
/// sessions.
#[derive(Clone)]
pub struct SharedAggregator {
    inner: Arc<Mutex<ResultAggregator>>,
}

impl SharedAggregator {
    pub fn new() -> Self {
        Self::from_aggregator(ResultAggregator::new())
    }

    pub fn from_aggregator(aggregator: ResultAggregator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(aggregator)),
        }
    }

    pub fn set_callback(
        &self,
        callback: impl FnMut(&ResultFragment) -> Result<(), CallbackError> + Send + 'static,
    ) {
        self.lock().set_callback(callback);
    }

    pub fn handle_interim(
        &self,
        text: impl Into<String>,
        confidence: f64,
        words: Vec<Word>,
    ) -> ResultFragment {
        self.lock().handle_interim(text, confidence, words)
    }

    pub fn handle_final(
        &self,
        text: impl Into<String>,
        confidence: f64,
        words: Vec<Word>,
    ) -> ResultFragment {
        self.lock().handle_final(text, confidence, words)
    }

    pub fn current_interim(&self) -> Option<ResultFragment> {
        self.lock().current_interim().cloned()
    }

    pub fn final_results(&self) -> Vec<ResultFragment> {
        self.lock().final_results()
    }

    pub fn full_transcript(&self) -> String {
        self.lock().full_transcript()
    }

    pub fn metrics(&self) -> SessionMetrics {
        self.lock().metrics()
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn export(&self) -> SessionExport {
        self.lock().export()
    }

    fn lock(&self) -> MutexGuard<'_, ResultAggregator> {
        // A poisoning panic can only originate in a consumer callback, and
        // those leave the state consistent (mutation completes first).
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for SharedAggregator {
    fn default() -> Self {
        Self::new()
    }
}
