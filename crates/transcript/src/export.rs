use crate::fragment::ResultFragment;
use crate::metrics::SessionMetrics;

/// Serializable snapshot of a session, the contract handed to the external
/// persistence layer. `segments` is the full ordered list of committed
/// finals; the pending interim is never exported.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SessionExport {
    pub full_transcript: String,
    pub segments: Vec<ResultFragment>,
    pub metrics: SessionMetrics,
    /// RFC 3339 wall-clock capture time of the export itself.
    pub exported_at: String,
}

#[cfg(test)]
mod tests {
    use crate::aggregator::ResultAggregator;

    use super::*;

    #[test]
    fn export_snapshot_carries_segments_and_metrics() {
        let mut agg = ResultAggregator::new();
        agg.handle_interim("draft", 0.5, vec![]);
        agg.handle_final("hello", 0.9, vec![]);
        agg.handle_final("world", 0.7, vec![]);

        let export = agg.export();
        assert_eq!(export.full_transcript, "hello world");
        assert_eq!(export.segments.len(), 2);
        assert!(export.segments.iter().all(|s| s.is_final));
        assert_eq!(export.metrics.total_final, 2);
        assert_eq!(export.metrics.total_interim, 1);

        chrono::DateTime::parse_from_rfc3339(&export.exported_at)
            .expect("exported_at must be RFC 3339");
    }

    #[test]
    fn export_round_trips_through_json() {
        let mut agg = ResultAggregator::new();
        agg.handle_final("こんにちは", 0.95, vec![]);

        let json = serde_json::to_string(&agg.export()).unwrap();
        let back: SessionExport = serde_json::from_str(&json).unwrap();

        assert_eq!(back.full_transcript, "こんにちは");
        assert_eq!(back.segments[0].confidence, 0.95);
        assert_eq!(back.metrics.total_final, 1);
    }

    #[test]
    fn empty_session_exports_empty_transcript() {
        let export = ResultAggregator::new().export();
        assert_eq!(export.full_transcript, "");
        assert!(export.segments.is_empty());
        assert_eq!(export.metrics, SessionMetrics::default());
    }
}
