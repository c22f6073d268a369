//! Duration-quartile segmentation and per-section scoring.
//!
//! Section boundaries are always duration quartiles regardless of the
//! actual interview structure; emotions are bucketed by timestamp alone.

use crate::analysis::{Emotion, EmotionEvent};
use crate::report::format_clock;
use serde::{Deserialize, Serialize};

pub const SECTION_TITLES: [&str; 4] = [
    "Opening & Introduction",
    "Technical Discussion",
    "Behavioral Questions",
    "Closing & Questions",
];

pub const MIN_SECTION_SCORE: u8 = 35;
pub const MAX_SECTION_SCORE: u8 = 100;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: String,
    pub time_range: String,
    pub score: u8,
    pub issues: Vec<String>,
    pub highlights: Vec<String>,
}

/// Partitions `[0, total_duration]` into four equal windows and scores
/// each from the emotions whose timestamp lands in `[start, end)`.
pub fn segment_sections(total_duration: f64, emotions: &[EmotionEvent]) -> Vec<Section> {
    let window = total_duration / 4.0;

    (0..4)
        .map(|i| {
            let start = i as f64 * window;
            let end = (i + 1) as f64 * window;

            let in_window: Vec<&EmotionEvent> = emotions
                .iter()
                .filter(|e| e.timestamp >= start && e.timestamp < end)
                .collect();

            let confident_count = in_window
                .iter()
                .filter(|e| matches!(e.emotion, Emotion::Confident | Emotion::Enthusiastic))
                .count() as i32;
            let nervous_count = in_window
                .iter()
                .filter(|e| matches!(e.emotion, Emotion::Nervous | Emotion::Hesitant))
                .count() as i32;

            let mut score = 70 + confident_count * 6 - nervous_count * 10;

            // Position-specific adjustments: a calm opening, confidence
            // in the technical section, and a strong finish all count
            // for extra.
            match i {
                0 => {
                    if nervous_count == 0 {
                        score += 10;
                    }
                    if confident_count > 0 {
                        score += 5;
                    }
                }
                1 => {
                    if confident_count > 0 {
                        score += 15;
                    }
                }
                3 => {
                    if confident_count > 0 {
                        score += 8;
                    }
                }
                _ => {}
            }

            let score = score.clamp(i32::from(MIN_SECTION_SCORE), i32::from(MAX_SECTION_SCORE)) as u8;

            let mut issues = Vec::new();
            let mut highlights = Vec::new();

            if f64::from(nervous_count) > in_window.len() as f64 * 0.5 {
                issues.push("Noticeable nervousness in this section".to_owned());
            }
            if in_window.is_empty() {
                issues.push("Limited vocal engagement detected".to_owned());
            }

            if f64::from(confident_count) > in_window.len() as f64 * 0.6 {
                highlights.push("Strong confidence demonstrated".to_owned());
            }
            match i {
                0 if score > 75 => {
                    highlights.push("Good opening impression and introduction".to_owned());
                }
                1 if score > 80 => {
                    highlights.push("Excellent technical knowledge and communication".to_owned());
                }
                2 if score > 75 => {
                    highlights.push("Effective storytelling and behavioral responses".to_owned());
                }
                3 if score > 80 => {
                    highlights.push("Strong closing with thoughtful questions".to_owned());
                }
                _ => {}
            }

            Section {
                title: SECTION_TITLES[i].to_owned(),
                time_range: format!("{} - {}", format_clock(start), format_clock(end)),
                score,
                issues,
                highlights,
            }
        })
        .collect()
}
