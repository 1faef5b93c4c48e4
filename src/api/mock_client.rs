use crate::api::client::{ByteStream, MockStreamProducer};
use crate::error::{ChatError, ChatResult};
use bytes::Bytes;
use futures::stream;
use std::sync::{Arc, Mutex};

/// Scripted response for one request.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Body chunks delivered exactly as given.
    Chunks(Vec<String>),
    /// Chunks followed by a transport failure.
    BrokenAfter(Vec<String>),
    /// The request itself fails before any byte arrives.
    Fail(String),
}

#[derive(Clone, Default)]
pub struct MockApiClient {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    payloads: Arc<Mutex<Vec<String>>>,
}

impl MockApiClient {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            payloads: Arc::default(),
        }
    }

    /// Single successful answer streamed as one delta per fragment.
    pub fn answering(fragments: &[&str]) -> Self {
        Self::new(vec![MockResponse::Chunks(sse_answer(fragments, None))])
    }

    /// Request bodies seen so far, oldest first.
    pub fn payloads(&self) -> Vec<String> {
        self.payloads.lock().unwrap().clone()
    }
}

/// Frame fragments as chat-completions deltas, optionally with a usage
/// frame, terminated by `[DONE]`.
pub fn sse_answer(fragments: &[&str], total_tokens: Option<u64>) -> Vec<String> {
    let mut chunks = vec![
        "data: {\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\",\"content\":\"\"}}]}\n\n"
            .to_string(),
    ];
    chunks.extend(fragments.iter().map(|fragment| {
        format!(
            "data: {{\"choices\":[{{\"index\":0,\"delta\":{{\"content\":\"{fragment}\"}}}}]}}\n\n"
        )
    }));
    if let Some(total) = total_tokens {
        chunks.push(format!(
            "data: {{\"choices\":[],\"usage\":{{\"prompt_tokens\":1,\"completion_tokens\":1,\"total_tokens\":{total}}}}}\n\n"
        ));
    }
    chunks.push("data: [DONE]\n\n".to_string());
    chunks
}

impl MockStreamProducer for MockApiClient {
    fn create_mock_stream(&self, payload: &str) -> ChatResult<ByteStream> {
        self.payloads.lock().unwrap().push(payload.to_string());

        let mut responses_guard = self.responses.lock().unwrap();
        if responses_guard.is_empty() {
            return Err(ChatError::Mock(
                "MockApiClient: No more responses configured".to_string(),
            ));
        }

        let (chunks, broken) = match responses_guard.remove(0) {
            MockResponse::Chunks(chunks) => (chunks, false),
            MockResponse::BrokenAfter(chunks) => (chunks, true),
            MockResponse::Fail(message) => return Err(ChatError::Mock(message)),
        };

        let mut items: Vec<ChatResult<Bytes>> =
            chunks.into_iter().map(|chunk| Ok(Bytes::from(chunk))).collect();
        if broken {
            items.push(Err(ChatError::Mock("connection reset".to_string())));
        }
        Ok(Box::pin(stream::iter(items)))
    }
}
