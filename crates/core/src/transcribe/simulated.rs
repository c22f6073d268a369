use crate::media::MediaFile;
use crate::transcribe::{Transcript, TranscribeError, TranscriptSegment, TranscriptionSource};
use futures::future::BoxFuture;
use futures::FutureExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Speaking pace used to size each segment: 0.6s per word with a 3s floor.
const SECONDS_PER_WORD: f64 = 0.6;
const MIN_SEGMENT_SECS: f64 = 3.0;
const OVERALL_CONFIDENCE: f64 = 0.87;

const INTERVIEW_SENTENCES: &[&str] = &[
    "Thank you for taking the time to meet with me today. I'm really excited about this opportunity.",
    "I have over five years of experience in software development, primarily working with React and Node.js.",
    "In my previous role at TechCorp, I led a team of four developers on a major e-commerce platform.",
    "One of my biggest achievements was reducing the application load time by 40% through optimization.",
    "I'm particularly passionate about creating user-friendly interfaces and solving complex problems.",
    "When faced with challenges, I like to break them down into smaller, manageable components.",
    "I believe in continuous learning and staying up-to-date with the latest technologies.",
    "For example, I recently completed a certification in cloud architecture on AWS.",
    "I work well in collaborative environments and enjoy mentoring junior developers.",
    "What excites me most about this role is the opportunity to work on innovative projects.",
    "I'm curious about the team structure and how you approach project management here.",
    "Do you have any questions about my background or experience that I can clarify?",
];

/// Stand-in for a real transcription backend. Produces a plausible
/// interview transcript with realistic per-segment timing from file
/// metadata alone. The random source is seedable so tests can pin it.
pub struct SimulatedTranscriptionSource {
    rng: Mutex<StdRng>,
}

impl SimulatedTranscriptionSource {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn generate(&self) -> Transcript {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let mut segments = Vec::with_capacity(INTERVIEW_SENTENCES.len());
        let mut current_time = 0.0;

        for sentence in INTERVIEW_SENTENCES {
            let words = sentence.split_whitespace().count() as f64;
            let duration = (words * SECONDS_PER_WORD).max(MIN_SEGMENT_SECS);

            segments.push(TranscriptSegment {
                start: current_time,
                end: current_time + duration,
                text: (*sentence).to_owned(),
                confidence: rng.random_range(0.85..0.95),
            });

            // Realistic pause before the next answer.
            current_time += duration + rng.random_range(0.5..2.5);
        }

        Transcript {
            text: INTERVIEW_SENTENCES.join(" "),
            confidence: OVERALL_CONFIDENCE,
            segments,
        }
    }
}

impl Default for SimulatedTranscriptionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptionSource for SimulatedTranscriptionSource {
    fn transcribe(
        &self,
        file: MediaFile,
    ) -> BoxFuture<'_, Result<Transcript, TranscribeError>> {
        async move {
            tracing::debug!(file = %file.name, size_bytes = file.size_bytes, "synthesizing transcript");
            Ok(self.generate())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_file() -> MediaFile {
        MediaFile::new("interview.mp3", 4096, None)
    }

    #[tokio::test]
    async fn segments_are_ordered_and_contiguous_with_pauses() {
        let source = SimulatedTranscriptionSource::with_seed(7);
        let transcript = source.transcribe(test_file()).await.unwrap();

        assert_eq!(transcript.segments.len(), INTERVIEW_SENTENCES.len());
        assert_eq!(transcript.segments[0].start, 0.0);
        assert_eq!(transcript.confidence, OVERALL_CONFIDENCE);

        for window in transcript.segments.windows(2) {
            let pause = window[1].start - window[0].end;
            assert!(
                pause > 0.5 - 1e-9 && pause < 2.5,
                "pause out of range: {pause}"
            );
        }
    }

    #[tokio::test]
    async fn segment_durations_follow_speaking_pace() {
        let source = SimulatedTranscriptionSource::with_seed(7);
        let transcript = source.transcribe(test_file()).await.unwrap();

        for segment in &transcript.segments {
            let words = segment.text.split_whitespace().count() as f64;
            let expected = (words * SECONDS_PER_WORD).max(MIN_SEGMENT_SECS);
            let actual = segment.end - segment.start;
            assert!((actual - expected).abs() < 1e-9, "{}", segment.text);
        }
    }

    #[tokio::test]
    async fn segment_confidences_are_in_declared_range() {
        let source = SimulatedTranscriptionSource::with_seed(7);
        let transcript = source.transcribe(test_file()).await.unwrap();

        for segment in &transcript.segments {
            assert!((0.85..0.95).contains(&segment.confidence));
        }
    }

    #[tokio::test]
    async fn pinned_seed_reproduces_exact_timings() {
        let a = SimulatedTranscriptionSource::with_seed(42)
            .transcribe(test_file())
            .await
            .unwrap();
        let b = SimulatedTranscriptionSource::with_seed(42)
            .transcribe(test_file())
            .await
            .unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn full_text_joins_all_segments() {
        let source = SimulatedTranscriptionSource::with_seed(1);
        let transcript = source.transcribe(test_file()).await.unwrap();
        for segment in &transcript.segments {
            assert!(transcript.text.contains(&segment.text));
        }
    }
}
