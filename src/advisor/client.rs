//! Vision model client with retry logic

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use super::prompt::{AdviceRequest, SYSTEM_PROMPT};
use crate::error::{ErrorCode, PlannerError, Result};

/// Text advice returned by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub text: String,
    pub model: String,
    pub tokens_used: Option<u32>,
}

/// Anything that can answer a troubleshooting request
#[async_trait]
pub trait VisionClient: Send + Sync {
    async fn advise(&self, request: &AdviceRequest) -> Result<Advice>;
}

/// Connection settings for an OpenAI-compatible chat completions API
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: Url,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
}

/// Chat completions client sending the photo inline as a data URL
pub struct OpenAiVisionClient {
    client: Client,
    settings: OpenAiSettings,
}

impl OpenAiVisionClient {
    pub fn new(settings: OpenAiSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(PlannerError::advisory_with_code(
                ErrorCode::ADVISORY_MISSING_API_KEY,
                "Please set an OpenAI API key (SOURDOUGH_OPENAI_API_KEY or openai_api_key in config.yml)",
                None,
            ));
        }

        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| {
                PlannerError::advisory("Failed to create HTTP client").with_source(e)
            })?;

        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> Result<Url> {
        let mut base = self.settings.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join("chat/completions").map_err(|e| {
            PlannerError::config_with_code(ErrorCode::CONFIG_INVALID_VALUE, "Invalid api_base")
                .with_source(e)
        })
    }

    /// Make a single API request
    async fn make_request(&self, url: &Url, body: &ChatRequest<'_>) -> Result<Advice> {
        let response = self
            .client
            .post(url.clone())
            .bearer_auth(&self.settings.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                let code = if e.is_timeout() {
                    ErrorCode::ADVISORY_TIMEOUT
                } else {
                    ErrorCode::ADVISORY_REQUEST_FAILED
                };
                PlannerError::advisory_with_code(code, "API request failed", None).with_source(e)
            })?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let api_response: ChatResponse = response.json().await.map_err(|e| {
                    PlannerError::advisory_with_code(
                        ErrorCode::ADVISORY_BAD_RESPONSE,
                        "Failed to parse response",
                        Some(status.as_u16()),
                    )
                    .with_source(e)
                })?;
                api_response.into_advice()
            }
            StatusCode::TOO_MANY_REQUESTS => Err(PlannerError::advisory_with_code(
                ErrorCode::ADVISORY_RATE_LIMITED,
                "Rate limit exceeded",
                Some(status.as_u16()),
            )),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(PlannerError::advisory_with_code(
                    ErrorCode::ADVISORY_UNAUTHORIZED,
                    "Invalid API key",
                    Some(status.as_u16()),
                ))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(PlannerError::advisory_with_code(
                    ErrorCode::ADVISORY_REQUEST_FAILED,
                    format!("API error: {}", error_text.trim()),
                    Some(status.as_u16()),
                ))
            }
        }
    }
}

#[async_trait]
impl VisionClient for OpenAiVisionClient {
    async fn advise(&self, request: &AdviceRequest) -> Result<Advice> {
        let url = self.endpoint()?;
        let image_url = request.image.to_data_url();
        let body = ChatRequest::new(
            &self.settings.model,
            self.settings.max_tokens,
            request.user_message(),
            &image_url,
        );

        let mut retry_count = 0;
        loop {
            match self.make_request(&url, &body).await {
                Ok(advice) => return Ok(advice),
                Err(e) => {
                    if retry_count >= self.settings.max_retries || !e.is_recoverable() {
                        return Err(e);
                    }

                    retry_count += 1;
                    let delay = backoff(self.settings.retry_delay, retry_count);
                    warn!(
                        "Advice request failed ({}), retry {}/{} in {:?}",
                        e, retry_count, self.settings.max_retries, delay
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Exponential backoff: `base * 2^(attempt - 1)`
fn backoff(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: String },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

impl<'a> ChatRequest<'a> {
    fn new(model: &'a str, max_tokens: u32, user_message: String, image_url: &'a str) -> Self {
        Self {
            model,
            max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(SYSTEM_PROMPT),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text { text: user_message },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl { url: image_url },
                        },
                    ]),
                },
            ],
        }
    }
}

// Internal API response structures
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u32,
}

impl ChatResponse {
    fn into_advice(self) -> Result<Advice> {
        let text = self
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                PlannerError::advisory_with_code(
                    ErrorCode::ADVISORY_BAD_RESPONSE,
                    "The model returned no advice",
                    None,
                )
            })?;

        debug!("Received {} characters of advice", text.len());
        Ok(Advice {
            text,
            model: self.model,
            tokens_used: self.usage.map(|u| u.total_tokens),
        })
    }
}
