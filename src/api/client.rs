use super::logging::{debug_payload_enabled, emit_api_error_body, emit_debug_payload};
use crate::config::Config;
use crate::error::{ChatError, ChatResult};
use crate::types::ApiErrorEnvelope;
use crate::util::is_local_endpoint_url;
use anyhow::{Context, Result};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::pin::Pin;
#[cfg(test)]
use std::sync::Arc;
use std::time::Duration;

pub type ByteStream = Pin<Box<dyn Stream<Item = ChatResult<Bytes>> + Send>>;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

#[cfg(test)]
pub trait MockStreamProducer: Send + Sync {
    fn create_mock_stream(&self, payload: &str) -> ChatResult<ByteStream>;
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_url: String,
    #[cfg(test)]
    mock_stream_producer: Option<Arc<dyn MockStreamProducer>>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let local = is_local_endpoint_url(&config.api_url);
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .https_only(!local)
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_url: config.api_url.clone(),
            #[cfg(test)]
            mock_stream_producer: None,
        })
    }

    #[cfg(test)]
    pub fn new_mock(mock_producer: Arc<dyn MockStreamProducer>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: None,
            model: "mock-model".to_string(),
            api_url: "http://localhost:8000/v1/chat/completions".to_string(),
            mock_stream_producer: Some(mock_producer),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn is_local_endpoint(&self) -> bool {
        is_local_endpoint_url(&self.api_url)
    }

    /// POST a serialized request body and hand back the response body as a
    /// byte stream. Non-success statuses are read in full and surface as
    /// `ChatError::Api`.
    pub async fn create_stream(&self, payload: String) -> ChatResult<ByteStream> {
        #[cfg(test)]
        {
            if let Some(producer) = &self.mock_stream_producer {
                return producer.create_mock_stream(&payload);
            }
        }

        if debug_payload_enabled() {
            emit_debug_payload(&self.api_url, &payload);
        }

        let mut request = self
            .http
            .post(&self.api_url)
            .header("content-type", "application/json")
            .body(payload);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|error| ChatError::from_reqwest(error, &self.api_url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|error| ChatError::from_reqwest(error, &self.api_url))?;
            emit_api_error_body(status.as_u16(), &body);
            return Err(api_error_from_body(status.as_u16(), &body));
        }

        let request_url = self.api_url.clone();
        let stream = response
            .bytes_stream()
            .map(move |item| item.map_err(|error| ChatError::from_reqwest(error, &request_url)));
        Ok(Box::pin(stream))
    }
}

/// `error.message` of a JSON error envelope, when `body` is one.
pub fn error_envelope_message(body: &str) -> Option<String> {
    let envelope: ApiErrorEnvelope = serde_json::from_str(body.trim()).ok()?;
    let message = envelope.error.message.trim();
    if message.is_empty() {
        Some(envelope.error.error_type.unwrap_or_else(|| "unknown API error".to_string()))
    } else {
        Some(message.to_string())
    }
}

pub fn api_error_from_body(status: u16, body: &str) -> ChatError {
    let message = error_envelope_message(body).unwrap_or_else(|| {
        reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("unexpected response")
            .to_string()
    });
    ChatError::Api {
        status,
        message,
        body: body.to_string(),
    }
}
