/// Gemini client — the single point of entry for all generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions MUST go through this module.
///
/// Every call runs in structured-output mode: a `responseSchema` is attached
/// so the model returns the `{questions: [...]}` object rather than free text.
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// The model used for all generation calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model returned no content")]
    EmptyContent,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_tokens: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The generated payload the schema forces the model to produce.
#[derive(Debug, Deserialize)]
struct QuestionPayload {
    questions: Vec<String>,
}

/// Seam for handlers and tests: anything that can turn a prompt into a
/// question list. Implemented by [`GeminiClient`] in production.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate_questions(&self, prompt: &str) -> Result<Vec<String>, LlmError>;
}

/// Wraps the Gemini `generateContent` API in structured-output mode.
/// One call per request: no retry, no backoff, no explicit timeout.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// JSON schema handed to the model; it may only answer with an object
    /// holding an ordered array of question strings.
    fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "questions": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "An array of interview questions."
                }
            },
            "required": ["questions"]
        })
    }
}

#[async_trait]
impl QuestionGenerator for GeminiClient {
    async fn generate_questions(&self, prompt: &str) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, MODEL);

        let request_body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": Self::response_schema()
            }
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the provider's error envelope
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Generation call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_tokens, usage.output_tokens
            );
        }

        let text = response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.iter().find_map(|p| p.text.as_deref()))
            .ok_or(LlmError::EmptyContent)?;

        // Structured mode should never fence the JSON, but guard anyway
        let payload: QuestionPayload = serde_json::from_str(strip_json_fences(text))?;

        Ok(payload.questions)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"questions\": []}\n```";
        assert_eq!(strip_json_fences(input), "{\"questions\": []}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"questions\": []}";
        assert_eq!(strip_json_fences(input), "{\"questions\": []}");
    }

    fn generation_response(questions: &[&str]) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "text": json!({ "questions": questions }).to_string()
                    }]
                }
            }],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 34 }
        })
    }

    #[tokio::test]
    async fn returns_questions_from_structured_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/models/{MODEL}:generateContent")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(generation_response(&["What is ownership?", "Explain async."])),
            )
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("test-key".to_string(), server.uri());
        let questions = client.generate_questions("prompt").await.expect("questions");

        assert_eq!(questions, vec!["What is ownership?", "Explain async."]);
    }

    #[tokio::test]
    async fn surfaces_provider_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "message": "Quota exceeded" }
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("test-key".to_string(), server.uri());
        let err = client.generate_questions("prompt").await.unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Quota exceeded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_candidates_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("test-key".to_string(), server.uri());
        let err = client.generate_questions("prompt").await.unwrap_err();

        assert!(matches!(err, LlmError::EmptyContent));
    }
}
