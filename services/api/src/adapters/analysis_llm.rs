//! services/api/src/adapters/analysis_llm.rs
//!
//! This module contains the adapter for the day-analysis LLM.
//! It implements the `DayAnalysisService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use study_planner_core::{
    domain::{AnalysisRequest, AnalysisResponse, MotivationalMessage},
    ports::{DayAnalysisService, PortError, PortResult},
};
use tracing::{debug, warn};

const ANALYSIS_INSTRUCTIONS: &str = r#"You are "Rafeeq", a warm study companion for an Egyptian secondary-school student.
You receive the student's free-text reflection on their day (usually in Arabic), their weekly schedule,
their grade and the day to plan for.

Respond with ONE JSON object and nothing else. Every human-readable string must be in Arabic.
The object has exactly these fields:
{
  "summary": {
    "accomplishment": string,
    "effortType": "mental" | "emotional" | "physical",
    "stressLevel": "low" | "medium" | "high",
    "analysisText": string
  },
  "webAnalysis": {
    "rootCause": string,
    "suggestedRemedy": string,
    "sources": [{ "title": string, "url": string, "snippet": string }]
  },
  "motivationalMessage": { "text": string, "source": string,
    "category": "religious" | "scientific" | "philosophical" | "wisdom" },
  "tomorrowPlan": [{ "time": string, "task": string, "method": string,
    "type": "study" | "break" | "sleep" | "prayer" }],
  "recommendedMethods": [{ "subject": string, "methodName": string, "details": string, "tools": [string] }],
  "researchConnections": [{ "point": string, "source": string,
    "evidenceStrength": "strong" | "medium" | "limited",
    "type": "causal" | "correlational", "relevance": string }],
  "psychologicalSupport": { "message": string, "technique": string },
  "quranicLink": { "verse": string, "surah": string, "behavioralExplanation": string },
  "balanceScore": number between 0 and 100
}

Build "tomorrowPlan" around the activities the schedule already lists for the target day, leaving
room for prayer, breaks and sleep. Be honest about stress and never shame the student."#;

const INSPIRATION_INSTRUCTIONS: &str = r#"Give one short motivational message in Arabic for a student preparing for exams.
Alternate between Quran, hadith, scientific findings and wisdom of scholars.
Respond with ONE JSON object and nothing else:
{ "text": string, "source": string, "category": "religious" | "scientific" | "philosophical" | "wisdom" }"#;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `DayAnalysisService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiAnalysisAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiAnalysisAdapter {
    /// Creates a new `OpenAiAnalysisAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// Sends one system + user exchange and returns the text of the first choice.
    async fn complete(&self, system: &str, user: String) -> PortResult<String> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .temperature(0.7)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(classify_openai_error)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Unexpected("Analysis LLM response contained no text content.".to_string())
            })
    }
}

//=========================================================================================
// `DayAnalysisService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DayAnalysisService for OpenAiAnalysisAdapter {
    async fn analyze_day(&self, request: &AnalysisRequest) -> PortResult<AnalysisResponse> {
        let payload =
            serde_json::to_string_pretty(request).map_err(|e| PortError::Unexpected(e.to_string()))?;
        let content = self
            .complete(
                ANALYSIS_INSTRUCTIONS,
                format!(
                    "GRADE: {}\nTARGET DAY: {}\n\nDAY DATA:\n{}",
                    request.grade.label(),
                    request.target_day,
                    payload
                ),
            )
            .await?;
        debug!(chars = content.len(), "Analysis LLM replied");
        parse_json_reply(&content)
    }

    async fn fresh_inspiration(&self) -> PortResult<MotivationalMessage> {
        let content = self
            .complete(INSPIRATION_INSTRUCTIONS, "رسالة اليوم".to_string())
            .await?;
        parse_json_reply(&content)
    }
}

//=========================================================================================
// Reply Handling
//=========================================================================================

/// Quota and rate-limit rejections become `QuotaExceeded`; everything else is
/// `Unexpected`.
fn classify_openai_error(e: OpenAIError) -> PortError {
    match e {
        OpenAIError::ApiError(api) => {
            let signals = [
                Some(api.message.as_str()),
                api.r#type.as_deref(),
                api.code.as_deref(),
            ];
            if signals.into_iter().flatten().any(is_quota_signal) {
                warn!(message = %api.message, "Analysis LLM quota exhausted");
                PortError::QuotaExceeded(api.message)
            } else {
                PortError::Unexpected(api.message)
            }
        }
        other => {
            let text = other.to_string();
            if is_quota_signal(&text) {
                PortError::QuotaExceeded(text)
            } else {
                PortError::Unexpected(text)
            }
        }
    }
}

fn is_quota_signal(text: &str) -> bool {
    let text = text.to_lowercase();
    ["insufficient_quota", "rate_limit", "quota", "429", "resource_exhausted"]
        .iter()
        .any(|marker| text.contains(marker))
}

/// Decodes a JSON reply, tolerating a surrounding markdown code fence.
fn parse_json_reply<T: DeserializeOwned>(content: &str) -> PortResult<T> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();
    serde_json::from_str(body)
        .map_err(|e| PortError::Unexpected(format!("Analysis LLM returned malformed JSON: {}", e)))
}
