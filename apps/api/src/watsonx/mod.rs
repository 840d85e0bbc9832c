/// Watsonx Client — the single point of entry for all watsonx.ai chat calls.
///
/// ARCHITECTURAL RULE: No other module may call the watsonx API directly.
/// All model interactions MUST go through this module.
///
/// The client makes exactly one attempt per call. Failures are surfaced to
/// the caller as `InferenceError`; there is no retry, fallback, or caching
/// of completions.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod iam;

use iam::IamTokenSource;

const CHAT_PATH: &str = "/ml/v1/text/chat";
/// watsonx.ai REST API version pin.
const WATSONX_VERSION: &str = "2024-10-08";

/// Any failure of the outbound inference call: transport, auth, non-success
/// status, or a response missing the expected choice/content fields.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Model response contained no choices")]
    EmptyChoices,

    #[error("Model response choice had no message content")]
    EmptyContent,
}

/// Generation parameters sent with each chat request.
#[derive(Debug, Clone, Copy)]
pub struct ChatParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model_id: &'a str,
    project_id: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentPart<'a> {
    #[serde(rename = "type")]
    part_type: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Extracts the content of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct WatsonxErrorBody {
    errors: Vec<WatsonxErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct WatsonxErrorDetail {
    message: String,
}

/// The chat model seam. `WatsonxClient` is the production implementation;
/// tests substitute a stub to exercise callers without network access.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(&self, prompt: &str, params: ChatParams) -> Result<ChatResponse, InferenceError>;
}

/// The watsonx.ai chat client used by all services.
/// Sends one user message holding one text part and reads back the choices.
pub struct WatsonxClient {
    http: Client,
    url: String,
    model_id: String,
    project_id: String,
    iam: IamTokenSource,
}

impl WatsonxClient {
    pub fn new(url: String, model_id: String, project_id: String, iam: IamTokenSource) -> Self {
        Self {
            http: Client::new(),
            url,
            model_id,
            project_id,
            iam,
        }
    }
}

#[async_trait]
impl ChatModel for WatsonxClient {
    async fn chat(&self, prompt: &str, params: ChatParams) -> Result<ChatResponse, InferenceError> {
        let request_body = ChatRequest {
            model_id: &self.model_id,
            project_id: &self.project_id,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![ContentPart {
                    part_type: "text",
                    text: prompt,
                }],
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let token = self.iam.bearer_token().await?;

        let response = self
            .http
            .post(format!("{}{}", self.url, CHAT_PATH))
            .query(&[("version", WATSONX_VERSION)])
            .bearer_auth(token)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Pull the first structured error message if the body parses
            let message = serde_json::from_str::<WatsonxErrorBody>(&body)
                .ok()
                .and_then(|e| e.errors.into_iter().next())
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;
        debug!(
            "watsonx chat call succeeded: {} choice(s)",
            chat_response.choices.len()
        );

        Ok(chat_response)
    }
}
