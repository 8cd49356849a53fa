//! Generation API client for the product assistant.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::AssistantConfig;

use super::error::AssistantError;
use super::types::{ApiErrorResponse, ChatRequest, ChatResponse, Message};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 512;

/// Fixed system instruction for the shop assistant.
///
/// The catalog context is appended per call; the instruction itself never
/// changes.
const SYSTEM_INSTRUCTION: &str = "Bạn là trợ lý mua sắm của cửa hàng Việt Long. \
Trả lời ngắn gọn, bằng tiếng Việt, và giúp khách hàng chọn sản phẩm phù hợp \
trong danh mục dưới đây. Không bịa ra sản phẩm không có trong danh mục.";

/// Generation API client.
#[derive(Clone)]
pub struct AssistantClient {
    inner: Arc<AssistantClientInner>,
}

struct AssistantClientInner {
    client: reqwest::Client,
    api_url: String,
    model: String,
}

impl AssistantClient {
    /// Create a new assistant client.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &AssistantConfig) -> Self {
        let api_key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).expect("Invalid API key for header"),
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(AssistantClientInner {
                client,
                api_url: config.api_url.clone(),
                model: config.model.clone(),
            }),
        }
    }

    /// Answer a product question.
    ///
    /// Sends the user's text and the flattened catalog listing, returns the
    /// generated reply text. Each call is independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API rejects it, or the
    /// reply carries no text.
    #[instrument(skip(self, query, catalog_context), fields(model = %self.inner.model))]
    pub async fn ask(&self, query: &str, catalog_context: &str) -> Result<String, AssistantError> {
        let system = format!("{SYSTEM_INSTRUCTION}\n\nDanh mục hiện có: {catalog_context}");

        let request = ChatRequest {
            model: self.inner.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages: vec![Message::user(query)],
            system: Some(system),
        };

        let response = self
            .inner
            .client
            .post(&self.inner.api_url)
            .json(&request)
            .send()
            .await?;

        let response = self.handle_response(response).await?;

        let reply: String = response
            .content
            .iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        if reply.is_empty() {
            return Err(AssistantError::EmptyReply);
        }

        Ok(reply)
    }

    /// Handle a response, decoding errors into typed variants.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<ChatResponse, AssistantError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return serde_json::from_str(&body)
                .map_err(|e| AssistantError::Parse(format!("Failed to parse response: {e}")));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(AssistantError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AssistantError::Unauthorized("Invalid API key".to_owned()));
        }

        match response.text().await {
            Ok(body) => {
                if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                    Err(AssistantError::Api {
                        error_type: api_error.error.error_type,
                        message: api_error.error.message,
                    })
                } else {
                    Err(AssistantError::Api {
                        error_type: "unknown".to_owned(),
                        message: body,
                    })
                }
            }
            Err(e) => Err(AssistantError::Http(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AssistantClient>();
    }

    #[test]
    fn test_assistant_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AssistantClient>();
    }
}
