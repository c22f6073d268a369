mod fallback;
mod heuristic;
mod openrouter;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use fallback::FallbackAnalyzer;
pub use heuristic::HeuristicAnalyzer;
pub use openrouter::OpenRouterAnalyzer;

/// The six affective states the scoring contract permits.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Confident,
    Nervous,
    Enthusiastic,
    Hesitant,
    Uncertain,
    Professional,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Confident => "confident",
            Emotion::Nervous => "nervous",
            Emotion::Enthusiastic => "enthusiastic",
            Emotion::Hesitant => "hesitant",
            Emotion::Uncertain => "uncertain",
            Emotion::Professional => "professional",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled, time-bounded affective state. Produced once per analysis
/// run and held in chronological insertion order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmotionEvent {
    pub timestamp: f64,
    pub emotion: Emotion,
    pub intensity: f64,
    pub duration: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpeechMetrics {
    pub speech_rate: f64,
    pub pause_count: u32,
    pub average_pause_length: f64,
    pub filler_word_count: u32,
    pub hesitation_count: u32,
    pub volume_variation: f64,
    pub pitch_variation: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerformanceMetrics {
    pub confidence: u8,
    pub clarity: u8,
    pub engagement: u8,
    pub professionalism: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feedback {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Everything the scoring stage produces for one transcript.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBundle {
    pub emotions: Vec<EmotionEvent>,
    pub speech_metrics: SpeechMetrics,
    pub performance_metrics: PerformanceMetrics,
    pub feedback: Feedback,
    pub overall_score: u8,
}

#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("analysis service returned http {status}: {body}")]
    Api { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

pub trait Analyzer: Send + Sync {
    fn analyze(&self, text: String) -> BoxFuture<'_, Result<AnalysisBundle, AnalysisError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emotion_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Emotion::Professional).unwrap(),
            "\"professional\""
        );
        let parsed: Emotion = serde_json::from_str("\"nervous\"").unwrap();
        assert_eq!(parsed, Emotion::Nervous);
    }

    #[test]
    fn bundle_round_trips_with_wire_field_names() {
        let bundle = AnalysisBundle {
            emotions: vec![EmotionEvent {
                timestamp: 15.5,
                emotion: Emotion::Confident,
                intensity: 0.85,
                duration: 10.2,
            }],
            speech_metrics: SpeechMetrics {
                speech_rate: 145.0,
                pause_count: 12,
                average_pause_length: 1.2,
                filler_word_count: 8,
                hesitation_count: 5,
                volume_variation: 0.3,
                pitch_variation: 0.25,
            },
            performance_metrics: PerformanceMetrics {
                confidence: 78,
                clarity: 85,
                engagement: 72,
                professionalism: 88,
            },
            feedback: Feedback {
                strengths: vec!["Clear articulation".to_owned()],
                improvements: vec!["Reduce filler words".to_owned()],
                suggestions: vec!["Practice mock interviews".to_owned()],
            },
            overall_score: 81,
        };

        let json = serde_json::to_string(&bundle).unwrap();
        assert!(json.contains("\"speechMetrics\""));
        assert!(json.contains("\"overallScore\""));
        assert!(json.contains("\"fillerWordCount\""));

        let back: AnalysisBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bundle);
    }
}
