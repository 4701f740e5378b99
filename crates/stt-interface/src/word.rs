#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Word {
    pub text: String,
    /// Offset from the start of the audio, in seconds.
    pub start: f64,
    pub end: f64,
    pub confidence: f64,
}
