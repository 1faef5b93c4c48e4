use super::extract::{extract_string_field, extract_u64_field, find_key, UnicodeEscapes};
use crate::error::{ChatError, ChatResult};

pub(crate) const CONTENT_KEY: &str = "content";
const USAGE_KEY: &str = "usage";
const TOTAL_TOKENS_KEY: &str = "total_tokens";
const DATA_PREFIX: &[u8] = b"data: ";
const DONE_SENTINEL: &[u8] = b"[DONE]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Text fragment of the answer, ready to be printed.
    Text(String),
    /// `usage.total_tokens` reported by the final frame.
    Usage(u64),
}

/// One complete event-stream line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SseLine<'a> {
    Data(&'a [u8]),
    Done,
    Other,
}

pub(crate) fn classify_line(line: &[u8]) -> SseLine<'_> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return SseLine::Other;
    };
    if payload.trim_ascii_end() == DONE_SENTINEL {
        return SseLine::Done;
    }
    if payload.is_empty() {
        return SseLine::Other;
    }
    SseLine::Data(payload)
}

/// Incremental consumer for a chat-completions event stream.
///
/// Chunks arrive with arbitrary boundaries. Every chunk is appended to the
/// raw buffer, but only complete lines before the watermark have been
/// scanned; a partial trailing line waits for the next chunk.
#[derive(Debug, Default)]
pub struct StreamConsumer {
    raw: Vec<u8>,
    watermark: usize,
    live_text: String,
    done: bool,
    saw_data: bool,
}

impl StreamConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consume_chunk(&mut self, chunk: &[u8]) -> ChatResult<Vec<StreamEvent>> {
        if self.done {
            return Ok(Vec::new());
        }

        self.raw
            .try_reserve(chunk.len())
            .map_err(ChatError::allocation("buffering the response stream"))?;
        self.raw.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(offset) = self.raw[self.watermark..].iter().position(|&b| b == b'\n') {
            let line_end = self.watermark + offset;
            let line = &self.raw[self.watermark..line_end];
            self.watermark = line_end + 1;

            match classify_line(line) {
                SseLine::Done => {
                    self.done = true;
                    break;
                }
                SseLine::Data(payload) => {
                    self.saw_data = true;
                    let fragment = String::from_utf8_lossy(payload);
                    if let Some(text) =
                        extract_string_field(&fragment, CONTENT_KEY, UnicodeEscapes::Keep)
                    {
                        if !text.is_empty() {
                            self.live_text
                                .try_reserve(text.len())
                                .map_err(ChatError::allocation("collecting streamed text"))?;
                            self.live_text.push_str(&text);
                            events.push(StreamEvent::Text(text));
                        }
                    }
                    if let Some(total) = extract_usage_total(&fragment) {
                        events.push(StreamEvent::Usage(total));
                    }
                }
                SseLine::Other => {}
            }
        }

        if self.done {
            self.raw.truncate(self.watermark);
        }

        Ok(events)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// True once at least one `data: ` line has been scanned.
    pub fn saw_data(&self) -> bool {
        self.saw_data
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn watermark(&self) -> usize {
        self.watermark
    }

    /// Text already emitted, without `\uXXXX` decoding.
    pub fn live_text(&self) -> &str {
        &self.live_text
    }
}

fn extract_usage_total(fragment: &str) -> Option<u64> {
    let usage_start = find_key(fragment, USAGE_KEY)?;
    extract_u64_field(&fragment[usage_start..], TOTAL_TOKENS_KEY)
}
