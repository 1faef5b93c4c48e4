use super::{History, SuggestedCommands};
use crate::api::client::error_envelope_message;
use crate::api::{finalize_stream, ApiClient, StreamConsumer, StreamEvent};
use crate::error::{ChatError, ChatResult};
use crate::payload::build_payload;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Live output of an in-flight round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationStreamUpdate {
    Delta(String),
    Usage(u64),
}

/// File content waiting to be sent with the next message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    path: String,
    content: String,
}

impl Attachment {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Size of the attached content in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Outgoing text for `message` with this file in front of it.
    pub fn wrap(&self, message: &str) -> String {
        format!(
            "\n\n--- FILE: {} ---\n{}\n----------------\nUser instruction: I have attached a file above. Please acknowledge it and wait for my question.\n{}",
            self.path, self.content, message
        )
    }
}

/// Conversation state plus the request/response round that updates it.
pub struct Session {
    client: Arc<ApiClient>,
    system_prompt: String,
    history: History,
    suggested_commands: SuggestedCommands,
    last_answer: Option<String>,
    pending_attachment: Option<Attachment>,
}

impl Session {
    pub fn new(client: ApiClient, system_prompt: impl Into<String>) -> Self {
        Self {
            client: Arc::new(client),
            system_prompt: system_prompt.into(),
            history: History::new(),
            suggested_commands: SuggestedCommands::default(),
            last_answer: None,
            pending_attachment: None,
        }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn set_system_prompt(&mut self, system_prompt: impl Into<String>) {
        self.system_prompt = system_prompt.into();
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn suggested_commands(&self) -> &SuggestedCommands {
        &self.suggested_commands
    }

    /// Canonical text of the most recent successful answer.
    pub fn last_answer(&self) -> Option<&str> {
        self.last_answer.as_deref()
    }

    /// Queue a file for the next message, replacing any earlier one.
    pub fn attach(&mut self, attachment: Attachment) {
        self.pending_attachment = Some(attachment);
    }

    pub fn pending_attachment(&self) -> Option<&Attachment> {
        self.pending_attachment.as_ref()
    }

    /// Run one round: send `message` with the current history, forward live
    /// text and usage through `stream_delta_tx`, and on success store the
    /// canonical answer.
    ///
    /// A pending attachment is consumed even when the round fails. History
    /// keeps `message` as typed, without the attachment.
    pub async fn send_message(
        &mut self,
        message: String,
        stream_delta_tx: Option<&mpsc::UnboundedSender<ConversationStreamUpdate>>,
    ) -> ChatResult<String> {
        let outgoing = match self.pending_attachment.take() {
            Some(attachment) => {
                tracing::debug!(
                    path = attachment.path(),
                    bytes = attachment.size(),
                    "sending attachment"
                );
                attachment.wrap(&message)
            }
            None => message.clone(),
        };
        let payload = build_payload(
            self.client.model(),
            &self.system_prompt,
            &self.history,
            &outgoing,
        )?;

        let mut stream = self.client.create_stream(payload).await?;
        let mut consumer = StreamConsumer::new();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            for event in consumer.consume_chunk(&chunk)? {
                let update = match event {
                    StreamEvent::Text(text) => ConversationStreamUpdate::Delta(text),
                    StreamEvent::Usage(total) => ConversationStreamUpdate::Usage(total),
                };
                emit_stream_update(stream_delta_tx, update);
            }
            if consumer.is_done() {
                break;
            }
        }

        if !consumer.saw_data() {
            let body = String::from_utf8_lossy(consumer.raw());
            if let Some(error_message) = error_envelope_message(&body) {
                return Err(ChatError::Api {
                    status: 200,
                    message: error_message,
                    body: body.into_owned(),
                });
            }
        }

        let answer = finalize_stream(consumer.raw())?;
        tracing::debug!(
            bytes = consumer.raw().len(),
            chars = answer.chars().count(),
            "stream finalized"
        );

        if let Some(evicted) = self.history.append(message, answer.clone()) {
            tracing::debug!(user = evicted.user(), "history full, evicted oldest turn");
        }
        self.suggested_commands.replace_from_answer(&answer);
        self.last_answer = Some(answer.clone());
        Ok(answer)
    }
}

pub(crate) fn emit_stream_update(
    stream_delta_tx: Option<&mpsc::UnboundedSender<ConversationStreamUpdate>>,
    update: ConversationStreamUpdate,
) {
    if let Some(tx) = stream_delta_tx {
        let _ = tx.send(update);
    }
}
