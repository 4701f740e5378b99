use std::future::Future;

use lectern_stt_interface::RecognizeOptions;
use lectern_stt_interface::batch::RawBatchResponse;

use crate::error::Error;

/// Handle to one in-flight long-running recognition job. Each operation gets
/// its own poll loop and timeout ceiling; no two handles share state.
pub trait BatchOperation: Send {
    fn id(&self) -> &str;

    fn is_done(&mut self) -> impl Future<Output = Result<bool, Error>> + Send;

    fn fetch_result(&mut self) -> impl Future<Output = Result<RawBatchResponse, Error>> + Send;
}

/// External batch engine: accepts a validated request and returns an
/// operation handle to poll.
pub trait BatchRecognizer: Send + Sync {
    type Operation: BatchOperation;

    fn start(
        &self,
        options: &RecognizeOptions,
    ) -> impl Future<Output = Result<Self::Operation, Error>> + Send;
}
