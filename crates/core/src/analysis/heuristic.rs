//! Deterministic, lexicon-based scoring. The guaranteed terminal
//! fallback: pure, total, and free of any network dependency.

use crate::analysis::{
    AnalysisBundle, AnalysisError, Analyzer, Emotion, EmotionEvent, Feedback,
    PerformanceMetrics, SpeechMetrics,
};
use futures::future::BoxFuture;
use futures::FutureExt;

const FILLER_WORDS: &[&str] = &["um", "uh", "like", "you", "know", "so", "actually", "basically"];
const UNCERTAIN_WORDS: &[&str] = &[
    "maybe", "perhaps", "possibly", "might", "guess", "think", "probably",
];
const CONFIDENCE_WORDS: &[&str] = &[
    "definitely", "certainly", "absolutely", "confident", "sure", "exactly",
];

/// Content-blind emotion timeline spanning a ~512s interview. The
/// fallback path derives speech metrics and scores from the transcript
/// but keeps emotions and feedback canonical.
const FALLBACK_EMOTIONS: &[(f64, Emotion, f64, f64)] = &[
    (0.0, Emotion::Nervous, 0.7, 25.0),
    (30.0, Emotion::Confident, 0.8, 40.0),
    (75.0, Emotion::Enthusiastic, 0.75, 35.0),
    (115.0, Emotion::Professional, 0.85, 45.0),
    (165.0, Emotion::Hesitant, 0.6, 20.0),
    (190.0, Emotion::Confident, 0.85, 50.0),
    (245.0, Emotion::Enthusiastic, 0.8, 30.0),
    (280.0, Emotion::Professional, 0.9, 40.0),
    (325.0, Emotion::Confident, 0.88, 35.0),
    (365.0, Emotion::Uncertain, 0.5, 15.0),
    (385.0, Emotion::Confident, 0.9, 45.0),
    (435.0, Emotion::Enthusiastic, 0.85, 25.0),
    (465.0, Emotion::Professional, 0.92, 47.0),
];

#[derive(Clone, Debug, Default)]
pub struct HeuristicAnalyzer;

impl HeuristicAnalyzer {
    pub const DEFAULT_OVERALL_SCORE: u8 = 75;

    pub fn new() -> Self {
        Self
    }

    /// Full text-derived bundle. Same text in, same bundle out.
    pub fn analyze_text(&self, text: &str) -> AnalysisBundle {
        let lowered = text.to_lowercase();
        let word_count = lowered.split_whitespace().count() as f64;
        let filler_count = f64::from(count_fillers(&lowered));

        // The scoring penalizes/credits the full lexicon sizes rather
        // than per-transcript occurrences.
        let confidence = (90.0 - filler_count * 2.0 - UNCERTAIN_WORDS.len() as f64 * 3.0
            + CONFIDENCE_WORDS.len() as f64 * 2.0)
            .max(50.0);
        let clarity = (95.0 - filler_count * 1.5).max(60.0);
        let engagement = (80.0 - filler_count + (word_count / 10.0).min(20.0)).max(55.0);
        let professionalism = (85.0 - filler_count * 1.5).max(65.0);

        AnalysisBundle {
            emotions: Self::emotion_timeline(),
            speech_metrics: Self::speech_metrics(text),
            performance_metrics: PerformanceMetrics {
                confidence: confidence.round() as u8,
                clarity: clarity.round() as u8,
                engagement: engagement.round() as u8,
                professionalism: professionalism.round() as u8,
            },
            feedback: Self::canonical_feedback(),
            // Mean of the unrounded sub-scores.
            overall_score: ((confidence + clarity + engagement + professionalism) / 4.0).round()
                as u8,
        }
    }

    /// Text-derived speech metrics. Acoustic features are not derivable
    /// from text, so volume and pitch variation are stubbed constants.
    pub fn speech_metrics(text: &str) -> SpeechMetrics {
        let lowered = text.to_lowercase();
        let word_count = lowered.split_whitespace().count() as f64;
        let filler_count = count_fillers(&lowered);
        let sentence_count = text.split('.').count() as f64;

        SpeechMetrics {
            speech_rate: (word_count * 1.5).clamp(120.0, 180.0),
            pause_count: (sentence_count * 1.2).floor() as u32,
            average_pause_length: 1.5,
            filler_word_count: filler_count,
            hesitation_count: (f64::from(filler_count) * 0.6).floor() as u32,
            volume_variation: 0.3,
            pitch_variation: 0.25,
        }
    }

    pub fn emotion_timeline() -> Vec<EmotionEvent> {
        FALLBACK_EMOTIONS
            .iter()
            .map(|&(timestamp, emotion, intensity, duration)| EmotionEvent {
                timestamp,
                emotion,
                intensity,
                duration,
            })
            .collect()
    }

    pub fn default_performance_metrics() -> PerformanceMetrics {
        PerformanceMetrics {
            confidence: 78,
            clarity: 85,
            engagement: 72,
            professionalism: 88,
        }
    }

    pub fn canonical_feedback() -> Feedback {
        Feedback {
            strengths: vec![
                "Clear and articulate communication".to_owned(),
                "Professional demeanor throughout the interview".to_owned(),
                "Good technical knowledge demonstration".to_owned(),
                "Structured responses to questions".to_owned(),
            ],
            improvements: vec![
                "Reduce use of filler words for clearer communication".to_owned(),
                "Provide more specific examples with quantifiable results".to_owned(),
                "Show more enthusiasm when discussing achievements".to_owned(),
                "Practice confident body language and vocal delivery".to_owned(),
            ],
            suggestions: vec![
                "Record practice sessions to identify speech patterns".to_owned(),
                "Prepare STAR method responses for behavioral questions".to_owned(),
                "Research the company and role more thoroughly".to_owned(),
                "Practice speaking slowly and deliberately".to_owned(),
                "Join a public speaking group like Toastmasters".to_owned(),
            ],
        }
    }
}

fn count_fillers(lowered_text: &str) -> u32 {
    lowered_text
        .split_whitespace()
        .filter(|word| {
            let stripped = word.trim_matches(|c| matches!(c, '.' | ',' | '!' | '?'));
            FILLER_WORDS.contains(&stripped)
        })
        .count() as u32
}

impl Analyzer for HeuristicAnalyzer {
    fn analyze(&self, text: String) -> BoxFuture<'_, Result<AnalysisBundle, AnalysisError>> {
        async move { Ok(self.analyze_text(&text)) }.boxed()
    }
}
