/// Derived statistics over a session's aggregated results.
///
/// Recomputed incrementally at each commit; always consistent with the
/// aggregator state by the time any commit call returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SessionMetrics {
    pub total_interim: u64,
    pub total_final: u64,
    /// Arithmetic mean confidence across committed final results; 0.0 until
    /// the first final commit.
    pub avg_confidence: f64,
    pub last_result_at_ms: Option<u64>,
    /// `total_interim / total_final`; 0.0 while no finals exist.
    pub interim_to_final_ratio: f64,
}
