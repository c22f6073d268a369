//! Final report types and assembly.
//!
//! Assembly normalizes every sub-result into one immutable, fully
//! serializable report: clock-formatted times, derived pattern counts,
//! defaulted feedback, and range-enforced scores.

use crate::analysis::{AnalysisBundle, Emotion, Feedback, HeuristicAnalyzer, PerformanceMetrics};
use crate::media::MediaFile;
use crate::section::{Section, MAX_SECTION_SCORE, MIN_SECTION_SCORE};
use crate::transcribe::Transcript;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Formats whole seconds as `m:ss`: `125 -> "2:05"`, `59 -> "0:59"`,
/// `0 -> "0:00"`.
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// An emotion event as rendered in the report: clock timestamp, rounded
/// duration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportEmotion {
    pub timestamp: String,
    pub emotion: Emotion,
    pub intensity: f64,
    pub duration: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpeechPatterns {
    pub hesitation_count: u32,
    pub average_pause: f64,
    pub speech_rate: f64,
    pub filler_words: u32,
    pub interruptions_handled: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub id: String,
    pub file_name: String,
    pub duration: String,
    pub created_at: DateTime<Utc>,
    pub overall_score: u8,
    pub metrics: PerformanceMetrics,
    pub emotions: Vec<ReportEmotion>,
    pub patterns: SpeechPatterns,
    pub feedback: Feedback,
    pub sections: Vec<Section>,
}

/// Builds the final report from the transcript, the analysis bundle,
/// and the scored sections. Emotions keep their insertion order.
pub fn assemble(
    file: &MediaFile,
    transcript: &Transcript,
    bundle: AnalysisBundle,
    sections: Vec<Section>,
) -> AnalysisReport {
    let emotions = bundle
        .emotions
        .into_iter()
        .map(|e| ReportEmotion {
            timestamp: format_clock(e.timestamp),
            emotion: e.emotion,
            intensity: e.intensity,
            duration: e.duration.round().max(0.0) as u32,
        })
        .collect();

    let metrics = bundle.speech_metrics;
    let patterns = SpeechPatterns {
        hesitation_count: metrics.hesitation_count,
        average_pause: metrics.average_pause_length,
        speech_rate: metrics.speech_rate,
        filler_words: metrics.filler_word_count,
        interruptions_handled: (f64::from(metrics.pause_count) * 0.3).floor() as u32,
    };

    let performance = bundle.performance_metrics;
    AnalysisReport {
        id: Uuid::new_v4().to_string(),
        file_name: file.name.clone(),
        duration: format_clock(transcript.total_duration()),
        created_at: Utc::now(),
        overall_score: bundle.overall_score.min(100),
        metrics: PerformanceMetrics {
            confidence: performance.confidence.min(100),
            clarity: performance.clarity.min(100),
            engagement: performance.engagement.min(100),
            professionalism: performance.professionalism.min(100),
        },
        emotions,
        patterns,
        feedback: fill_feedback_defaults(bundle.feedback),
        sections: sections
            .into_iter()
            .map(|mut s| {
                s.score = s.score.clamp(MIN_SECTION_SCORE, MAX_SECTION_SCORE);
                s
            })
            .collect(),
    }
}

/// Every feedback list must be non-empty in the final report; gaps are
/// filled from the canonical lists.
fn fill_feedback_defaults(feedback: Feedback) -> Feedback {
    let defaults = HeuristicAnalyzer::canonical_feedback();
    Feedback {
        strengths: if feedback.strengths.is_empty() {
            defaults.strengths
        } else {
            feedback.strengths
        },
        improvements: if feedback.improvements.is_empty() {
            defaults.improvements
        } else {
            feedback.improvements
        },
        suggestions: if feedback.suggestions.is_empty() {
            defaults.suggestions
        } else {
            feedback.suggestions
        },
    }
}
