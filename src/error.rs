use std::collections::TryReserveError;
use thiserror::Error;

pub type ChatResult<T> = std::result::Result<T, ChatError>;

/// Failure of a single request/response round.
///
/// Malformed stream fragments never surface here; they degrade to "no text"
/// inside the consumer.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("cannot reach API endpoint '{url}': {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API request to '{url}' timed out: {source}")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned HTTP {status}: {message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },

    #[error("out of memory while {context}")]
    Allocation {
        context: &'static str,
        #[source]
        source: TryReserveError,
    },

    #[cfg(test)]
    #[error("mock stream: {0}")]
    Mock(String),
}

impl ChatError {
    pub fn allocation(context: &'static str) -> impl FnOnce(TryReserveError) -> Self {
        move |source| Self::Allocation { context, source }
    }

    pub fn from_reqwest(error: reqwest::Error, url: &str) -> Self {
        let url = url.to_string();
        if error.is_connect() {
            return Self::Connect { url, source: error };
        }
        if error.is_timeout() {
            return Self::Timeout { url, source: error };
        }
        Self::Transport { url, source: error }
    }

    /// Raw server body for diagnostics, when the failure came from the API.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } if !body.trim().is_empty() => Some(body),
            _ => None,
        }
    }
}
