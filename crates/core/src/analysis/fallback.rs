use crate::analysis::{AnalysisBundle, AnalysisError, Analyzer, HeuristicAnalyzer};
use futures::future::BoxFuture;
use futures::FutureExt;

const LOG_TARGET: &str = "analysis::fallback";

/// Wraps a primary analyzer with the heuristic one. Any primary failure
/// (network, bad status, unparseable body, timeout) is replaced by the
/// heuristic bundle for the same text, so this wrapper never fails and a
/// report is always produced.
#[derive(Clone)]
pub struct FallbackAnalyzer<P>
where
    P: Analyzer + Clone,
{
    primary: P,
    heuristic: HeuristicAnalyzer,
}

impl<P> FallbackAnalyzer<P>
where
    P: Analyzer + Clone,
{
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            heuristic: HeuristicAnalyzer::new(),
        }
    }
}

impl<P> Analyzer for FallbackAnalyzer<P>
where
    P: Analyzer + Clone + Send + Sync + 'static,
{
    fn analyze(&self, text: String) -> BoxFuture<'_, Result<AnalysisBundle, AnalysisError>> {
        async move {
            match self.primary.analyze(text.clone()).await {
                Ok(bundle) => Ok(bundle),
                Err(e) => {
                    tracing::warn!(target: LOG_TARGET, error = %e, "analysis service failed, using heuristic analyzer");
                    Ok(self.heuristic.analyze_text(&text))
                }
            }
        }
        .boxed()
    }
}
