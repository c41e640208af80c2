//! Practice question generation over the Gemini `generateContent` API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::Question;
use crate::config::GeminiConfig;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No API key configured (set GEMINI_API_KEY or gemini.api_key)")]
    MissingApiKey,

    #[error("Service error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Service returned an empty response")]
    EmptyResponse,

    #[error("Malformed question list: {0}")]
    Malformed(String),

    #[error("Request was cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, QuizError>;

pub const SYSTEM_PROMPT: &str = r#"You are a strict Teaching Assistant for the course "EE4216 Hardware for IoT".
The final exam format includes:
1. Spot and correct errors (Syntax, Logic, API misuse).
2. Fill in the blanks (API names, parameters, types).
3. Conceptual explanations.

Key Topics: ESP32-S3, GPIO, Interrupts, FreeRTOS (Tasks, Queues, Semaphores), WiFi, HTTP, MQTT, Deep Sleep, SPI, I2C.

Generate 3 unique exam-style questions based on these topics.
Return ONLY valid JSON array. No markdown formatting.
Structure:
[
  {
    "id": number,
    "type": "error_spotting" | "fill_blank" | "concept",
    "question": "The question text",
    "codeContext": "Optional C++ code snippet if needed",
    "answer": "The correct answer",
    "explanation": "Why this is the answer"
  }
]"#;

pub const TASK_PROMPT: &str = "Generate 3 hard exam questions for EE4216. One error spotting (e.g. wrong FreeRTOS API or ISR blocking), one fill in the blank (e.g. MQTT or HTTP API), one concept (e.g. Deep Sleep vs Light Sleep).";

/// Source of practice question batches
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Request exactly one batch. No retries.
    async fn generate(&self) -> Result<Vec<Question>>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Strip a surrounding markdown code fence, if the model added one anyway
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse model output as a JSON array of questions
pub fn parse_questions(text: &str) -> Result<Vec<Question>> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(QuizError::EmptyResponse);
    }
    serde_json::from_str::<Vec<Question>>(body).map_err(|e| QuizError::Malformed(e.to_string()))
}

/// HTTP client for the generative-language API
pub struct GeminiGenerator {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl QuestionGenerator for GeminiGenerator {
    async fn generate(&self) -> Result<Vec<Question>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(QuizError::MissingApiKey)?;

        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: SYSTEM_PROMPT }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: TASK_PROMPT }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        log::debug!("Requesting practice questions from {}", self.url());

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(QuizError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await?;
        let parsed: GenerateResponse =
            serde_json::from_str(&raw).map_err(|e| QuizError::Malformed(e.to_string()))?;
        let text = parsed.text().ok_or(QuizError::EmptyResponse)?;

        parse_questions(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::models::{Question, QuestionType};
    use crate::quiz::session::QuizSession;
    use axum::{routing::post, Json, Router};
    use tokio::net::TcpListener;

    const BATCH: &str = r#"[
        {"id":1,"type":"error_spotting","question":"q1","codeContext":"delay(10);","answer":"a1","explanation":"e1"},
        {"id":2,"type":"fill_blank","question":"q2","answer":"a2","explanation":"e2"},
        {"id":3,"type":"concept","question":"q3","answer":"a3","explanation":"e3"}
    ]"#;

    /// Serve a fixed `generateContent` reply on a random local port
    async fn mock_service(reply: serde_json::Value) -> String {
        let app = Router::new().route(
            "/models/{action}",
            post(move || {
                let reply = reply.clone();
                async move { Json(reply) }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn config_for(endpoint: String) -> GeminiConfig {
        GeminiConfig {
            api_key: Some("test-key".to_string()),
            endpoint,
            ..GeminiConfig::default()
        }
    }

    fn candidate(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
        })
    }

    #[test]
    fn test_parse_questions() {
        let questions = parse_questions(BATCH).unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].kind, QuestionType::ErrorSpotting);
        assert_eq!(questions[2].kind, QuestionType::Concept);
    }

    #[test]
    fn test_parse_questions_with_code_fence() {
        let fenced = format!("```json\n{}\n```", BATCH);
        assert_eq!(parse_questions(&fenced).unwrap().len(), 3);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(
            parse_questions(r#"{"questions": []}"#),
            Err(QuizError::Malformed(_))
        ));
        assert!(matches!(parse_questions("   "), Err(QuizError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_generate_against_mock_service() {
        let endpoint = mock_service(candidate(BATCH)).await;
        let generator = GeminiGenerator::new(config_for(endpoint)).unwrap();
        let questions = generator.generate().await.unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[1].answer, "a2");
    }

    #[tokio::test]
    async fn test_generate_malformed_body() {
        let endpoint = mock_service(candidate("Sure! Here are your questions.")).await;
        let generator = GeminiGenerator::new(config_for(endpoint)).unwrap();
        assert!(matches!(
            generator.generate().await,
            Err(QuizError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_non_ok_status() {
        let app = Router::new().route(
            "/models/{action}",
            post(|| async {
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "backend unavailable",
                )
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let generator = GeminiGenerator::new(config_for(format!("http://{}", addr))).unwrap();
        match generator.generate().await {
            Err(QuizError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "backend unavailable");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_session_falls_back_on_unparseable_reply() {
        let endpoint = mock_service(candidate("Sure! Here are your questions.")).await;
        let generator = GeminiGenerator::new(config_for(endpoint)).unwrap();
        let mut session = QuizSession::new();

        session.generate(&generator).await;

        assert!(!session.is_loading());
        assert_eq!(session.questions(), &[Question::fallback()]);
    }

    #[tokio::test]
    async fn test_generate_without_candidates() {
        let endpoint = mock_service(serde_json::json!({ "candidates": [] })).await;
        let generator = GeminiGenerator::new(config_for(endpoint)).unwrap();
        assert!(matches!(
            generator.generate().await,
            Err(QuizError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let generator = GeminiGenerator::new(GeminiConfig {
            api_key: None,
            ..GeminiConfig::default()
        })
        .unwrap();
        assert!(matches!(
            generator.generate().await,
            Err(QuizError::MissingApiKey)
        ));
    }
}
