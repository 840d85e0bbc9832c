//! Advice Service — the shared render → invoke → extract core behind all
//! three features (career advice, cover letter, resume polish).
//!
//! Each operation is stateless: one rendered prompt, one chat call, the first
//! choice's content back. No conversation history, no retries, no caching.

pub mod handlers;
pub mod prompts;

use std::sync::Arc;

use tracing::debug;

use crate::watsonx::{ChatModel, ChatParams, InferenceError};

/// Sampling temperature shared by all operations.
const TEMPERATURE: f32 = 0.7;

/// Per-operation output token budgets. Career advice gets the larger budget;
/// cover letters and polish output are expected to be shorter.
const CAREER_ADVICE_MAX_TOKENS: u32 = 1024;
const COVER_LETTER_MAX_TOKENS: u32 = 512;
const POLISH_MAX_TOKENS: u32 = 512;

/// Holds the chat model seam plus nothing else. Cloning is cheap; all
/// per-call values are local to the call.
#[derive(Clone)]
pub struct AdviceService {
    model: Arc<dyn ChatModel>,
}

impl AdviceService {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// The single generic routine all operations share: send the rendered
    /// prompt, extract `choices[0].message.content`.
    async fn complete(&self, prompt: String, max_tokens: u32) -> Result<String, InferenceError> {
        let params = ChatParams {
            temperature: TEMPERATURE,
            max_tokens,
        };

        debug!("Invoking chat model ({} prompt chars)", prompt.len());
        let response = self.model.chat(&prompt, params).await?;

        if response.choices.is_empty() {
            return Err(InferenceError::EmptyChoices);
        }
        let text = response.text().ok_or(InferenceError::EmptyContent)?;
        Ok(text.to_string())
    }

    /// Suggests resume improvements for a target position and job description.
    pub async fn advise_on_resume(
        &self,
        position_applied: &str,
        job_description: &str,
        resume_content: &str,
    ) -> Result<String, InferenceError> {
        let prompt =
            prompts::career_advice_prompt(position_applied, job_description, resume_content);
        self.complete(prompt, CAREER_ADVICE_MAX_TOKENS).await
    }

    /// Generates a cover letter tailored to the company, position, and resume.
    pub async fn generate_cover_letter(
        &self,
        company_name: &str,
        position_name: &str,
        job_description: &str,
        resume_content: &str,
    ) -> Result<String, InferenceError> {
        let prompt = prompts::cover_letter_prompt(
            company_name,
            position_name,
            job_description,
            resume_content,
        );
        self.complete(prompt, COVER_LETTER_MAX_TOKENS).await
    }

    /// Polishes a resume for a position, optionally following caller-supplied
    /// instructions (blank instructions fall back to general improvements).
    pub async fn polish_resume(
        &self,
        position_name: &str,
        resume_content: &str,
        polish_prompt: Option<&str>,
    ) -> Result<String, InferenceError> {
        let prompt = prompts::polish_resume_prompt(position_name, resume_content, polish_prompt);
        self.complete(prompt, POLISH_MAX_TOKENS).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::watsonx::{ChatChoice, ChatResponse, ChoiceMessage};

    /// Stub backend: records every prompt it receives and replays a canned
    /// outcome. One canned outcome per expected call — a second call panics,
    /// which doubles as a no-retry assertion.
    struct StubModel {
        outcomes: Mutex<Vec<Result<ChatResponse, InferenceError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubModel {
        fn returning_text(text: &str) -> Self {
            Self::with_outcome(Ok(ChatResponse {
                choices: vec![ChatChoice {
                    message: ChoiceMessage {
                        content: Some(text.to_string()),
                    },
                }],
            }))
        }

        fn with_outcome(outcome: Result<ChatResponse, InferenceError>) -> Self {
            Self {
                outcomes: Mutex::new(vec![outcome]),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn seen_prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatModel for StubModel {
        async fn chat(
            &self,
            prompt: &str,
            _params: ChatParams,
        ) -> Result<ChatResponse, InferenceError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .expect("backend called more times than expected")
        }
    }

    fn service_with(model: Arc<StubModel>) -> AdviceService {
        AdviceService::new(model)
    }

    #[tokio::test]
    async fn test_advise_on_resume_returns_backend_text() {
        let stub = Arc::new(StubModel::returning_text("X"));
        let service = service_with(stub.clone());

        let advice = service
            .advise_on_resume("Data Engineer", "jd", "resume")
            .await
            .unwrap();
        assert_eq!(advice, "X");
    }

    #[tokio::test]
    async fn test_generate_cover_letter_returns_backend_text() {
        let stub = Arc::new(StubModel::returning_text("X"));
        let service = service_with(stub.clone());

        let letter = service
            .generate_cover_letter("Acme", "Engineer", "jd", "resume")
            .await
            .unwrap();
        assert_eq!(letter, "X");
    }

    #[tokio::test]
    async fn test_polish_resume_returns_backend_text() {
        let stub = Arc::new(StubModel::returning_text("X"));
        let service = service_with(stub.clone());

        let polished = service
            .polish_resume("Engineer", "resume", None)
            .await
            .unwrap();
        assert_eq!(polished, "X");
    }

    #[tokio::test]
    async fn test_empty_choices_is_inference_failure() {
        let stub = Arc::new(StubModel::with_outcome(Ok(ChatResponse {
            choices: vec![],
        })));
        let service = service_with(stub);

        let result = service.advise_on_resume("a", "b", "c").await;
        assert!(matches!(result, Err(InferenceError::EmptyChoices)));
    }

    #[tokio::test]
    async fn test_missing_content_is_inference_failure() {
        let stub = Arc::new(StubModel::with_outcome(Ok(ChatResponse {
            choices: vec![ChatChoice {
                message: ChoiceMessage { content: None },
            }],
        })));
        let service = service_with(stub);

        let result = service.polish_resume("a", "b", Some("c")).await;
        assert!(matches!(result, Err(InferenceError::EmptyContent)));
    }

    #[tokio::test]
    async fn test_transport_error_propagates_without_retry() {
        let stub = Arc::new(StubModel::with_outcome(Err(InferenceError::Api {
            status: 503,
            message: "unavailable".to_string(),
        })));
        let service = service_with(stub.clone());

        let result = service
            .generate_cover_letter("Acme", "Engineer", "jd", "resume")
            .await;
        assert!(matches!(result, Err(InferenceError::Api { status: 503, .. })));
        // StubModel holds exactly one outcome; a retry would have panicked.
        assert_eq!(stub.seen_prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_advise_prompt_carries_inputs_verbatim() {
        let stub = Arc::new(StubModel::returning_text("Add a SQL section."));
        let service = service_with(stub.clone());

        let advice = service
            .advise_on_resume(
                "Data Engineer",
                "Looking for SQL and Python skills",
                "5 years Python, no SQL",
            )
            .await
            .unwrap();

        assert_eq!(advice, "Add a SQL section.");

        let prompts = stub.seen_prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Data Engineer"));
        assert!(prompts[0].contains("Looking for SQL and Python skills"));
        assert!(prompts[0].contains("5 years Python, no SQL"));
    }

    #[tokio::test]
    async fn test_polish_blank_instructions_use_general_branch() {
        let stub = Arc::new(StubModel::returning_text("polished"));
        let service = service_with(stub.clone());

        service
            .polish_resume("Engineer", "resume", Some("   "))
            .await
            .unwrap();

        let prompts = stub.seen_prompts();
        assert!(prompts[0].contains("Suggest improvements"));
    }
}
