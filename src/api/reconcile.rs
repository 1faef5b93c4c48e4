use super::extract::{extract_string_field, UnicodeEscapes};
use super::stream::{classify_line, SseLine, CONTENT_KEY};
use crate::error::{ChatError, ChatResult};

/// Rebuild the canonical answer from the complete raw event stream.
///
/// Walks every complete line from the start of `raw` without looking at
/// any consumer state. Unlike the live path, `\uXXXX` escapes are decoded
/// here, so the stored answer can differ from what was printed.
pub fn finalize_stream(raw: &[u8]) -> ChatResult<String> {
    let mut message = String::new();
    let Some(last_newline) = raw.iter().rposition(|&b| b == b'\n') else {
        return Ok(message);
    };

    for line in raw[..last_newline].split(|&b| b == b'\n') {
        match classify_line(line) {
            SseLine::Done => break,
            SseLine::Data(payload) => {
                let fragment = String::from_utf8_lossy(payload);
                if let Some(text) =
                    extract_string_field(&fragment, CONTENT_KEY, UnicodeEscapes::Decode)
                {
                    message
                        .try_reserve(text.len())
                        .map_err(ChatError::allocation("reconciling the streamed answer"))?;
                    message.push_str(&text);
                }
            }
            SseLine::Other => {}
        }
    }

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stream::{StreamConsumer, StreamEvent};

    fn delta(content: &str) -> String {
        format!("data: {{\"choices\":[{{\"index\":0,\"delta\":{{\"content\":\"{content}\"}}}}]}}\n\n")
    }

    #[test]
    fn test_concatenates_all_fragments() {
        let raw = format!(
            "{}{}{}data: [DONE]\n",
            "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
            delta("Hello"),
            delta(", world")
        );
        assert_eq!(finalize_stream(raw.as_bytes()).unwrap(), "Hello, world");
    }

    #[test]
    fn test_ignores_trailing_partial_line() {
        let raw = format!("{}data: {{\"choices\":[{{\"delta\":{{\"content\":\"cut", delta("whole"));
        assert_eq!(finalize_stream(raw.as_bytes()).unwrap(), "whole");
    }

    #[test]
    fn test_stops_at_done_sentinel() {
        let raw = format!("{}data: [DONE]\n{}", delta("before"), delta("after"));
        assert_eq!(finalize_stream(raw.as_bytes()).unwrap(), "before");
    }

    #[test]
    fn test_empty_and_lineless_buffers() {
        assert_eq!(finalize_stream(b"").unwrap(), "");
        assert_eq!(finalize_stream(b"data: {\"content\":\"x\"}").unwrap(), "");
    }

    #[test]
    fn test_decodes_escapes_into_utf8() {
        let raw = delta(r"Merhaba d\u00fcnya\n\u2713");
        assert_eq!(finalize_stream(raw.as_bytes()).unwrap(), "Merhaba dünya\n✓");
    }

    // Live printing keeps `\uXXXX` verbatim while the stored answer decodes
    // it. Both behaviours are pinned until they are unified.
    #[test]
    fn test_live_and_canonical_text_diverge_on_unicode_escapes() {
        let raw = format!("{}data: [DONE]\n", delta(r"caf\u00e9"));

        let mut consumer = StreamConsumer::new();
        let events = consumer.consume_chunk(raw.as_bytes()).unwrap();
        assert_eq!(events, vec![StreamEvent::Text(r"caf\u00e9".to_string())]);

        let canonical = finalize_stream(consumer.raw()).unwrap();
        assert_eq!(canonical, "café");
        assert_ne!(consumer.live_text(), canonical);
    }

    #[test]
    fn test_ascii_answers_match_live_text() {
        let raw = format!(
            "{}{}{}data: [DONE]\n",
            delta(r"Line one\nLine two"),
            delta(r#"\tindented \"quoted\""#),
            "data: {\"choices\":[],\"usage\":{\"total_tokens\":12}}\n\n"
        );
        let mut consumer = StreamConsumer::new();
        for chunk in raw.as_bytes().chunks(7) {
            consumer.consume_chunk(chunk).unwrap();
        }
        let canonical = finalize_stream(consumer.raw()).unwrap();
        assert_eq!(canonical, "Line one\nLine two\tindented \"quoted\"");
        assert_eq!(consumer.live_text(), canonical);
    }
}
