//! HTTP client for the remote chat-completions endpoint.
//!
//! One request per query, no retries: the user re-issues input after a
//! failure. Failures are classified into `RemoteError` at this boundary so
//! callers only ever see displayable variants.

use crate::config::ApiConfig;
use crate::error::RemoteError;
use crate::types::{ChatRequest, ChatResponse, Message};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Injectable query interface so the interaction loop can be exercised with
/// mock transports in tests.
#[async_trait]
pub trait RemoteModel: Send + Sync {
    async fn send(&self, model: &str, context: &str, query: &str) -> Result<String, RemoteError>;
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct QueryClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl QueryClient {
    /// Build a client from resolved API configuration.
    pub fn new(api: &ApiConfig, timeout: Duration) -> Self {
        // Fall back to reqwest defaults if builder creation fails for any reason.
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            api_key: api.api_key.trim().to_string(),
        }
    }

    /// Send a two-message exchange and return the first choice's text.
    pub async fn send(
        &self,
        model: &str,
        context: &str,
        query: &str,
    ) -> Result<String, RemoteError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![Message::system(context), Message::user(query)],
        };

        debug!(%url, %model, "dispatching remote query");
        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status(status, body));
        }

        let parsed: ChatResponse = response.json().await?;
        match parsed.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content),
            None => Err(RemoteError::EmptyResponse),
        }
    }
}

#[async_trait]
impl RemoteModel for QueryClient {
    async fn send(&self, model: &str, context: &str, query: &str) -> Result<String, RemoteError> {
        QueryClient::send(self, model, context, query).await
    }
}
