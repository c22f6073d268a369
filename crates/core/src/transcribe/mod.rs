mod simulated;

use crate::media::MediaFile;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

pub use simulated::SimulatedTranscriptionSource;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub confidence: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub confidence: f64,
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Total interview duration in seconds: the latest segment end, or
    /// zero for an empty transcript.
    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.end).fold(0.0, f64::max)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TranscribeError {
    #[error("transcription failed: {0}")]
    Failed(String),
}

pub trait TranscriptionSource: Send + Sync {
    fn transcribe(&self, file: MediaFile)
        -> BoxFuture<'_, Result<Transcript, TranscribeError>>;
}
