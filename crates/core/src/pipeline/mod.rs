//! End-to-end analysis pipeline: validate, transcribe, analyze,
//! segment, assemble.

use crate::analysis::{AnalysisError, Analyzer};
use crate::media::{MediaError, MediaFile};
use crate::report::{assemble, AnalysisReport};
use crate::section::segment_sections;
use crate::transcribe::{TranscribeError, TranscriptionSource};

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    InvalidMedia(#[from] MediaError),
    #[error(transparent)]
    Transcription(#[from] TranscribeError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Fire-and-forget progress reporting at fixed milestones. Implementors
/// must not block; the pipeline does not await them.
pub trait ProgressSink: Send + Sync {
    fn report(&self, percent: u8, stage: &str);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&self, _percent: u8, _stage: &str) {}
}

impl<F> ProgressSink for F
where
    F: Fn(u8, &str) + Send + Sync,
{
    fn report(&self, percent: u8, stage: &str) {
        self(percent, stage)
    }
}

/// One logical pipeline per upload. The components hold no per-request
/// state, so independent runs may share a pipeline concurrently.
pub struct Pipeline<T, A> {
    transcription: T,
    analyzer: A,
}

impl<T, A> Pipeline<T, A>
where
    T: TranscriptionSource,
    A: Analyzer,
{
    pub fn new(transcription: T, analyzer: A) -> Self {
        Self {
            transcription,
            analyzer,
        }
    }

    pub async fn run(
        &self,
        file: MediaFile,
        progress: &dyn ProgressSink,
    ) -> Result<AnalysisReport, PipelineError> {
        progress.report(5, "Validating file...");
        file.validate()?;

        progress.report(30, "Generating interview transcription...");
        let transcript = self.transcription.transcribe(file.clone()).await?;
        tracing::debug!(
            segments = transcript.segments.len(),
            duration_secs = transcript.total_duration(),
            "transcript ready"
        );

        progress.report(60, "Analyzing speech patterns...");
        let bundle = self.analyzer.analyze(transcript.text.clone()).await?;

        progress.report(90, "Finalizing analysis results...");
        let sections = segment_sections(transcript.total_duration(), &bundle.emotions);
        let report = assemble(&file, &transcript, bundle, sections);
        tracing::info!(
            file = %report.file_name,
            overall_score = report.overall_score,
            "analysis complete"
        );

        progress.report(100, "Analysis complete!");
        Ok(report)
    }
}
