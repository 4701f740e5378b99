pub mod error;
pub mod operation;
pub mod poll;
pub mod reduce;
pub mod result;
pub mod submit;

pub use error::{Error, Result};
pub use operation::{BatchOperation, BatchRecognizer};
pub use poll::{PollConfig, poll_until_done};
pub use reduce::{ReduceContext, reduce};
pub use result::{BatchResult, QualityFlag};
pub use submit::{FALLBACK_MODEL, submit_with_fallback, transcribe};
