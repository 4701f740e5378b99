pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fatal: the caller must fix the input before resubmitting.
    #[error("unsupported or invalid audio format: {0}")]
    AudioFormat(String),

    #[error("invalid recognize options: {0}")]
    InvalidOptions(#[from] lectern_stt_interface::InvalidOptions),

    /// The operation did not complete within the polling ceiling. The whole
    /// submission may be retried.
    #[error("operation polling timed out after {elapsed_secs}s")]
    PollingTimeout { elapsed_secs: u64 },

    /// Engine-side failure (including rate limiting); retryable by
    /// resubmission.
    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("failed to retrieve operation result: {0}")]
    ResultRetrieval(String),

    /// The engine rejected the requested model and the fallback model also
    /// failed.
    #[error("model rejected by recognizer: {0}")]
    ModelRejected(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::PollingTimeout { .. } | Error::Transcription(_) | Error::ResultRetrieval(_)
        )
    }
}
