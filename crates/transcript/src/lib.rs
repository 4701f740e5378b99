pub mod aggregator;
pub mod driver;
pub mod export;
pub mod fragment;
pub mod metrics;

pub use aggregator::{CallbackError, ResultAggregator, SharedAggregator};
pub use driver::{DriveOutcome, DriveSummary, drive_session};
pub use export::SessionExport;
pub use fragment::ResultFragment;
pub use metrics::SessionMetrics;
