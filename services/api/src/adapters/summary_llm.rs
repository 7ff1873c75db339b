//! services/api/src/adapters/summary_llm.rs
//!
//! This module contains the adapter for the story-writing LLM.
//! It implements the `SummaryGenerator` port from the `core` crate by calling a
//! Messages-style text-generation API once per request.

use async_trait::async_trait;
use momo_core::{
    domain::{DailySummary, Moment},
    ports::{PortError, PortResult, SummaryGenerator},
    summary_prompt::{build_prompt, parse_summary_reply},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::adapters::http::{service_error, transport_error};
use crate::config::SummaryServiceConfig;

const API_VERSION: &str = "2023-06-01";
const SERVICE: &str = "Messages";

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `SummaryGenerator` using a remote language model.
#[derive(Clone)]
pub struct MessagesSummaryAdapter {
    client: reqwest::Client,
    config: SummaryServiceConfig,
}

impl MessagesSummaryAdapter {
    /// Creates a new adapter. Every request is bounded by `config.timeout`.
    pub fn new(config: SummaryServiceConfig) -> PortResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PortError::Configuration(format!("HTTP client setup failed: {e}")))?;
        Ok(Self { client, config })
    }
}

//=========================================================================================
// `SummaryGenerator` Trait Implementation
//=========================================================================================

#[async_trait]
impl SummaryGenerator for MessagesSummaryAdapter {
    async fn generate_summary(&self, moments: &[Moment]) -> PortResult<DailySummary> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            PortError::Configuration(
                "Text-generation API key not configured. Set ANTHROPIC_API_KEY.".to_string(),
            )
        })?;
        if moments.is_empty() {
            return Err(PortError::InvalidInput(
                "No moments provided to generate a summary.".to_string(),
            ));
        }

        let prompt = build_prompt(moments);
        let url = format!("{}/v1/messages", self.config.base_url);
        info!(
            model = %self.config.model,
            moments = moments.len(),
            prompt_len = prompt.len(),
            "Requesting daily story"
        );

        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: [ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        info!(status = status.as_u16(), "Story service responded");

        if !status.is_success() {
            error!(status = status.as_u16(), "Story service returned an error");
            return Err(service_error(SERVICE, status, &body));
        }

        let reply: MessagesResponse = serde_json::from_str(&body).map_err(|e| {
            PortError::MalformedResponse(format!("unexpected response envelope: {e}"))
        })?;

        let text = match reply.content.into_iter().next() {
            Some(ContentBlock { kind, text: Some(text) }) if kind == "text" => text,
            Some(block) => {
                return Err(PortError::MalformedResponse(format!(
                    "expected a text content block, got '{}'",
                    block.kind
                )))
            }
            None => {
                return Err(PortError::MalformedResponse(
                    "response contained no content".to_string(),
                ))
            }
        };
        debug!(reply_len = text.len(), "Parsing story reply");

        parse_summary_reply(&text, moments)
    }
}
