use crate::error::{ChatError, ChatResult};
use crate::state::History;
use crate::types::{ApiMessage, Role};

const TEMPERATURE: &str = "0.3";

/// Escape `"`, `\`, LF, CR and TAB as two-character sequences.
///
/// Every other byte, including non-ASCII UTF-8 and other control
/// characters, is copied through unchanged.
pub fn escape_json_string(text: &str) -> ChatResult<String> {
    let extra = text
        .bytes()
        .filter(|b| matches!(b, b'"' | b'\\' | b'\n' | b'\r' | b'\t'))
        .count();
    let mut out = String::new();
    out.try_reserve_exact(text.len() + extra)
        .map_err(ChatError::allocation("escaping request text"))?;
    push_escaped(&mut out, text);
    Ok(out)
}

/// Serialize a full streaming chat-completions request body.
///
/// Message order is system prompt, then every stored turn oldest first,
/// then the new user message.
pub fn build_payload(
    model: &str,
    system_prompt: &str,
    history: &History,
    new_message: &str,
) -> ChatResult<String> {
    let system = ApiMessage {
        role: Role::System,
        content: system_prompt,
    };
    let user = ApiMessage {
        role: Role::User,
        content: new_message,
    };
    let messages: Vec<ApiMessage<'_>> = std::iter::once(system)
        .chain(history.as_messages())
        .chain(std::iter::once(user))
        .collect();

    let estimate = 128
        + model.len()
        + messages
            .iter()
            .map(|message| 32 + message.content.len() + message.content.len() / 8)
            .sum::<usize>();
    let mut body = String::new();
    body.try_reserve(estimate)
        .map_err(ChatError::allocation("building the request payload"))?;

    body.push_str("{\"model\":\"");
    push_escaped_fallible(&mut body, model)?;
    body.push_str("\",\"stream\":true,\"stream_options\":{\"include_usage\":true},\"messages\":[");
    for (idx, message) in messages.iter().enumerate() {
        if idx > 0 {
            body.push(',');
        }
        body.push_str("{\"role\":\"");
        body.push_str(message.role.as_str());
        body.push_str("\",\"content\":\"");
        push_escaped_fallible(&mut body, message.content)?;
        body.push_str("\"}");
    }
    body.push_str("],\"temperature\":");
    body.push_str(TEMPERATURE);
    body.push('}');

    Ok(body)
}

fn push_escaped_fallible(out: &mut String, text: &str) -> ChatResult<()> {
    let escaped = escape_json_string(text)?;
    out.try_reserve(escaped.len() + 64)
        .map_err(ChatError::allocation("building the request payload"))?;
    out.push_str(&escaped);
    Ok(())
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
}
