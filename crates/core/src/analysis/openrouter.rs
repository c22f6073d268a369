use crate::analysis::{
    AnalysisBundle, AnalysisError, Analyzer, Emotion, EmotionEvent, Feedback,
    HeuristicAnalyzer, PerformanceMetrics, SpeechMetrics,
};
use crate::config::EngineConfig;
use crate::util::extract_json_object;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const PROMPT_HEADER: &str = "As an expert interview coach and communication analyst, analyze \
this interview transcription and provide a comprehensive assessment in JSON format.";

const RESPONSE_SCHEMA: &str = r#"{
  "emotions": [
    {
      "timestamp": 15.5,
      "emotion": "confident",
      "confidence": 0.85,
      "duration": 10.2
    }
  ],
  "speechMetrics": {
    "speechRate": 145,
    "pauseCount": 12,
    "averagePauseLength": 1.2,
    "fillerWordCount": 8,
    "hesitationCount": 5,
    "volumeVariation": 0.3,
    "pitchVariation": 0.25
  },
  "performanceMetrics": {
    "confidence": 78,
    "clarity": 85,
    "engagement": 72,
    "professionalism": 88
  },
  "feedback": {
    "strengths": ["Clear articulation", "Good technical knowledge", "Professional demeanor"],
    "improvements": ["Reduce filler words", "Speak more confidently", "Provide more specific examples"],
    "suggestions": ["Practice mock interviews", "Record yourself speaking", "Prepare STAR method responses"]
  },
  "overallScore": 81
}"#;

const PROMPT_GUIDELINES: &str = "Analysis Guidelines:
- Emotions must be one of: confident, nervous, enthusiastic, hesitant, uncertain, professional
- Distribute emotions realistically across the interview timeline
- Speech rate: normal conversational pace is 140-160 WPM
- Count actual filler words like \"um\", \"uh\", \"like\", \"you know\" in the transcription
- Confidence score (0-100): based on word choice, certainty, and assertiveness
- Clarity score (0-100): based on structure, coherence, and articulation
- Engagement score (0-100): based on enthusiasm, energy, and storytelling
- Professionalism score (0-100): based on language choice, formality, and appropriateness
- Provide 3-5 specific, actionable items for each feedback category
- Overall score should reflect the candidate's interview readiness (0-100)

Focus on realistic, constructive feedback that would help someone improve their interview skills.";

/// Client for the external reasoning service. Holds only immutable
/// configuration, so it can be shared across concurrent analyses.
#[derive(Clone)]
pub struct OpenRouterAnalyzer {
    client: Client,
    config: EngineConfig,
}

impl OpenRouterAnalyzer {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Wire emotion events carry the model's label confidence; the report
/// layer treats it as the event intensity.
#[derive(Deserialize)]
struct RawEmotion {
    timestamp: f64,
    emotion: Emotion,
    confidence: f64,
    duration: f64,
}

impl From<RawEmotion> for EmotionEvent {
    fn from(raw: RawEmotion) -> Self {
        Self {
            timestamp: raw.timestamp,
            emotion: raw.emotion,
            intensity: raw.confidence,
            duration: raw.duration,
        }
    }
}

/// A partially valid response keeps its valid fields; only the missing
/// ones are substituted. A response that fails to parse at all is an
/// error, which the fallback wrapper turns into a whole-bundle
/// substitution.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBundle {
    emotions: Option<Vec<RawEmotion>>,
    speech_metrics: Option<SpeechMetrics>,
    performance_metrics: Option<PerformanceMetrics>,
    feedback: Option<Feedback>,
    overall_score: Option<u8>,
}

impl RawBundle {
    fn into_bundle(self, transcript: &str) -> AnalysisBundle {
        if self.emotions.is_none()
            || self.speech_metrics.is_none()
            || self.performance_metrics.is_none()
            || self.feedback.is_none()
            || self.overall_score.is_none()
        {
            tracing::debug!("service response incomplete, substituting fallback fields");
        }

        AnalysisBundle {
            emotions: self
                .emotions
                .map(|es| es.into_iter().map(EmotionEvent::from).collect())
                .unwrap_or_else(HeuristicAnalyzer::emotion_timeline),
            speech_metrics: self
                .speech_metrics
                .unwrap_or_else(|| HeuristicAnalyzer::speech_metrics(transcript)),
            performance_metrics: self
                .performance_metrics
                .unwrap_or_else(HeuristicAnalyzer::default_performance_metrics),
            feedback: self.feedback.unwrap_or_else(HeuristicAnalyzer::canonical_feedback),
            overall_score: self
                .overall_score
                .unwrap_or(HeuristicAnalyzer::DEFAULT_OVERALL_SCORE),
        }
    }
}

fn build_prompt(transcript: &str) -> String {
    format!(
        "{PROMPT_HEADER}\n\nINTERVIEW TRANSCRIPTION:\n\"{transcript}\"\n\n\
         Return a JSON response with this exact structure:\n\n{RESPONSE_SCHEMA}\n\n{PROMPT_GUIDELINES}"
    )
}

fn parse_analysis(content: &str, transcript: &str) -> Result<AnalysisBundle, AnalysisError> {
    let object = extract_json_object(content)
        .ok_or_else(|| AnalysisError::InvalidResponse("no JSON object in response".to_owned()))?;
    let raw: RawBundle = serde_json::from_str(object)
        .map_err(|e| AnalysisError::InvalidResponse(format!("failed to parse analysis: {e}")))?;
    Ok(raw.into_bundle(transcript))
}

impl Analyzer for OpenRouterAnalyzer {
    fn analyze(&self, text: String) -> BoxFuture<'_, Result<AnalysisBundle, AnalysisError>> {
        let this = self.clone();
        async move {
            let request = ChatRequest {
                model: this.config.model.as_str().to_owned(),
                messages: vec![ChatMessage {
                    role: "user".to_owned(),
                    content: build_prompt(&text),
                }],
                temperature: 0.7,
                max_tokens: 2000,
            };

            let url = format!("{}/chat/completions", this.config.base_url);
            let response = this
                .client
                .post(&url)
                .header(
                    "Authorization",
                    format!("Bearer {}", this.config.api_key.expose()),
                )
                .timeout(this.config.request_timeout)
                .json(&request)
                .send()
                .await
                .map_err(AnalysisError::Network)?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_owned());
                return Err(AnalysisError::Api { status, body });
            }

            let chat: ChatResponse = response.json().await.map_err(|e| {
                AnalysisError::InvalidResponse(format!("failed to parse JSON: {e}"))
            })?;

            let content = chat
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content)
                .unwrap_or_default();

            parse_analysis(&content, &text)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSCRIPT: &str = "um so I led the project. It went well.";

    fn complete_response() -> String {
        format!(
            "Here is my assessment of the candidate:\n\n{}\n\nGood luck!",
            r#"{
              "emotions": [
                {"timestamp": 5.0, "emotion": "confident", "confidence": 0.9, "duration": 12.0}
              ],
              "speechMetrics": {
                "speechRate": 150,
                "pauseCount": 10,
                "averagePauseLength": 1.1,
                "fillerWordCount": 4,
                "hesitationCount": 2,
                "volumeVariation": 0.4,
                "pitchVariation": 0.3
              },
              "performanceMetrics": {
                "confidence": 82, "clarity": 88, "engagement": 75, "professionalism": 90
              },
              "feedback": {
                "strengths": ["Concise answers"],
                "improvements": ["More examples"],
                "suggestions": ["Mock interviews"]
              },
              "overallScore": 84
            }"#
        )
    }

    #[test]
    fn parses_complete_response_verbatim() {
        let bundle = parse_analysis(&complete_response(), TRANSCRIPT).unwrap();
        assert_eq!(bundle.overall_score, 84);
        assert_eq!(bundle.emotions.len(), 1);
        assert_eq!(bundle.emotions[0].emotion, Emotion::Confident);
        assert_eq!(bundle.emotions[0].intensity, 0.9);
        assert_eq!(bundle.speech_metrics.speech_rate, 150.0);
        assert_eq!(bundle.performance_metrics.clarity, 88);
        assert_eq!(bundle.feedback.strengths, vec!["Concise answers".to_owned()]);
    }

    #[test]
    fn missing_feedback_substitutes_only_feedback() {
        let content = r#"{
          "emotions": [
            {"timestamp": 5.0, "emotion": "nervous", "confidence": 0.6, "duration": 8.0}
          ],
          "speechMetrics": {
            "speechRate": 132,
            "pauseCount": 7,
            "averagePauseLength": 1.4,
            "fillerWordCount": 6,
            "hesitationCount": 3,
            "volumeVariation": 0.2,
            "pitchVariation": 0.2
          },
          "performanceMetrics": {
            "confidence": 70, "clarity": 80, "engagement": 68, "professionalism": 77
          },
          "overallScore": 74
        }"#;

        let bundle = parse_analysis(content, TRANSCRIPT).unwrap();
        assert_eq!(bundle.overall_score, 74);
        assert_eq!(bundle.emotions[0].emotion, Emotion::Nervous);
        assert_eq!(bundle.speech_metrics.pause_count, 7);
        assert_eq!(bundle.performance_metrics.confidence, 70);
        assert_eq!(bundle.feedback, HeuristicAnalyzer::canonical_feedback());
    }

    #[test]
    fn empty_object_substitutes_every_field() {
        let bundle = parse_analysis("{}", TRANSCRIPT).unwrap();
        assert_eq!(bundle.emotions, HeuristicAnalyzer::emotion_timeline());
        assert_eq!(
            bundle.speech_metrics,
            HeuristicAnalyzer::speech_metrics(TRANSCRIPT)
        );
        assert_eq!(
            bundle.performance_metrics,
            HeuristicAnalyzer::default_performance_metrics()
        );
        assert_eq!(bundle.feedback, HeuristicAnalyzer::canonical_feedback());
        assert_eq!(bundle.overall_score, HeuristicAnalyzer::DEFAULT_OVERALL_SCORE);
    }

    #[test]
    fn prose_without_object_is_an_error() {
        let err = parse_analysis("The candidate did fine overall.", TRANSCRIPT).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidResponse(_)));
    }

    #[test]
    fn unknown_emotion_label_is_an_error() {
        let content = r#"{"emotions": [{"timestamp": 0, "emotion": "elated", "confidence": 0.5, "duration": 5}]}"#;
        let err = parse_analysis(content, TRANSCRIPT).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidResponse(_)));
    }

    #[test]
    fn prompt_embeds_transcript_and_contract() {
        let prompt = build_prompt(TRANSCRIPT);
        assert!(prompt.contains(TRANSCRIPT));
        assert!(prompt.contains("confident, nervous, enthusiastic, hesitant, uncertain, professional"));
        assert!(prompt.contains("140-160 WPM"));
        assert!(prompt.contains("\"overallScore\": 81"));
    }
}
