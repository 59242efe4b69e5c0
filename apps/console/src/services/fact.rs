//! Fact provider
//!
//! Wraps one call to the generative-text service and turns its answer into a
//! single trimmed fact sentence.

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use thiserror::Error;
use tracing::debug;

use crate::api::{ClientError, GenerateContentRequest, GenerateContentResponse, GenerativeClient};
use crate::config::{AppConfig, API_KEY_VAR};

pub type FactResult<T> = Result<T, FactError>;

pub const FACT_PROMPT: &str = "Tell me one concise, scientifically accurate and intriguing fact \
about physics that a layperson can understand. Answer with the fact itself as plain prose, \
without any introduction such as \"Here is a fact\".";

const GENERIC_FAILURE: &str = "an unknown error occurred";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FactError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("The AI service returned an empty response.")]
    EmptyResponse,
    #[error("Failed to generate fact from AI service: {0}")]
    Provider(String),
}

impl FactError {
    pub fn provider(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = message.trim();
        if message.is_empty() {
            Self::Provider(GENERIC_FAILURE.to_string())
        } else {
            Self::Provider(message.to_string())
        }
    }
}

impl From<ClientError> for FactError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::EmptyResponse(status) if status.is_success() => Self::EmptyResponse,
            ClientError::Api(body) => Self::provider(body.message),
            other => Self::provider(other.to_string()),
        }
    }
}

/// Produces one fact per call.
pub trait FactProvider {
    fn get_fact(&self) -> LocalBoxFuture<'_, FactResult<String>>;
}

pub struct GeminiFactProvider {
    client: GenerativeClient,
}

impl GeminiFactProvider {
    /// Fails with [`FactError::Configuration`] when no credential is configured.
    pub fn new(config: AppConfig) -> FactResult<Self> {
        if config.api_key().is_none() {
            return Err(FactError::Configuration(format!(
                "{API_KEY_VAR} is not set; the fact provider cannot be created"
            )));
        }

        let client = GenerativeClient::new(config)
            .map_err(|err| FactError::Configuration(err.to_string()))?;

        Ok(Self { client })
    }

    pub fn model(&self) -> String {
        self.client.config().model_id().to_string()
    }
}

impl FactProvider for GeminiFactProvider {
    fn get_fact(&self) -> LocalBoxFuture<'_, FactResult<String>> {
        async move {
            let request = GenerateContentRequest::from_prompt(FACT_PROMPT);
            let response = self
                .client
                .generate_content(&request)
                .await
                .map_err(|err| {
                    debug!(status = ?err.status(), "generate_content failed: {err}");
                    FactError::from(err)
                })?;
            extract_fact(&response)
        }
        .boxed_local()
    }
}

pub fn extract_fact(response: &GenerateContentResponse) -> FactResult<String> {
    let text = response.text().unwrap_or_default();
    let fact = text.trim();

    if !fact.is_empty() {
        return Ok(fact.to_string());
    }

    debug!(
        finish_reason = ?response.finish_reason(),
        block_reason = ?response.block_reason(),
        "service answered without usable text"
    );
    Err(FactError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorBody;
    use reqwest::StatusCode;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).expect("valid response fixture")
    }

    fn single_text(text: &str) -> GenerateContentResponse {
        response(json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }))
    }

    #[test]
    fn trims_outer_whitespace_only() {
        assert_eq!(extract_fact(&single_text("  A fact.  \n")).unwrap(), "A fact.");
        assert_eq!(
            extract_fact(&single_text("\tTwo  spaces\tinside. ")).unwrap(),
            "Two  spaces\tinside."
        );
    }

    #[test]
    fn empty_or_absent_text_is_empty_response() {
        assert_eq!(extract_fact(&single_text("")), Err(FactError::EmptyResponse));
        assert_eq!(extract_fact(&single_text("  \n ")), Err(FactError::EmptyResponse));
        assert_eq!(
            extract_fact(&response(json!({ "candidates": [{ "content": { "parts": [{}] } }] }))),
            Err(FactError::EmptyResponse)
        );
        assert_eq!(
            extract_fact(&response(json!({ "candidates": [] }))),
            Err(FactError::EmptyResponse)
        );
        assert_eq!(extract_fact(&response(json!({}))), Err(FactError::EmptyResponse));
    }

    #[test]
    fn blocked_prompt_is_empty_response() {
        let blocked = response(json!({
            "candidates": [],
            "promptFeedback": { "blockReason": "SAFETY" }
        }));
        assert_eq!(blocked.block_reason(), Some("SAFETY"));
        assert_eq!(extract_fact(&blocked), Err(FactError::EmptyResponse));
    }

    #[test]
    fn provider_message_is_wrapped() {
        assert_eq!(
            FactError::provider("timeout").to_string(),
            "Failed to generate fact from AI service: timeout"
        );
        assert_eq!(
            FactError::provider("  "),
            FactError::Provider(GENERIC_FAILURE.to_string())
        );
    }

    #[test]
    fn client_errors_map_onto_fact_errors() {
        assert_eq!(
            FactError::from(ClientError::EmptyResponse(StatusCode::OK)),
            FactError::EmptyResponse
        );

        let api = ClientError::Api(ApiErrorBody {
            code: Some(429),
            message: "Resource has been exhausted".into(),
            status: Some("RESOURCE_EXHAUSTED".into()),
            http_status: Some(StatusCode::TOO_MANY_REQUESTS),
        });
        assert_eq!(
            FactError::from(api),
            FactError::Provider("Resource has been exhausted".into())
        );

        let silent = ClientError::Api(ApiErrorBody {
            code: None,
            message: String::new(),
            status: None,
            http_status: Some(StatusCode::INTERNAL_SERVER_ERROR),
        });
        assert_eq!(
            FactError::from(silent),
            FactError::Provider(GENERIC_FAILURE.to_string())
        );

        let unexpected = ClientError::UnexpectedStatus {
            status: StatusCode::BAD_GATEWAY,
            body: b"bad gateway".to_vec(),
        };
        assert!(matches!(FactError::from(unexpected), FactError::Provider(msg) if msg.contains("502")));
    }

    #[test]
    fn missing_credential_refuses_construction() {
        let result = GeminiFactProvider::new(AppConfig::default());
        assert!(matches!(result, Err(FactError::Configuration(msg)) if msg.contains(API_KEY_VAR)));
    }

    #[test]
    fn provider_builds_with_credential() {
        let config = AppConfig {
            api_key: Some("test-key".into()),
            model: "models/gemini-test".into(),
            ..AppConfig::default()
        };
        let provider = GeminiFactProvider::new(config).expect("provider");
        assert_eq!(provider.model(), "gemini-test");
    }
}
