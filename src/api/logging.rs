use crate::util::parse_bool_str;
use serde_json::Value;

const DEBUG_PAYLOAD_ENV: &str = "TERMGPT_DEBUG_PAYLOAD";

pub fn debug_payload_enabled() -> bool {
    std::env::var(DEBUG_PAYLOAD_ENV)
        .ok()
        .and_then(|v| parse_bool_str(&v))
        .unwrap_or(false)
}

/// Log the outgoing request body. Headers, and with them the API key, are
/// never part of the message.
pub fn emit_debug_payload(request_url: &str, payload: &str) {
    let formatted_payload = format_payload(payload);
    tracing::debug!(url = %request_url, "payload_request\n{formatted_payload}");
}

/// Log an error body the stream consumer could not turn into an answer.
pub fn emit_api_error_body(status: u16, body: &str) {
    tracing::debug!(status, "api_error_body\n{body}");
}

fn format_payload(payload: &str) -> String {
    serde_json::from_str::<Value>(payload)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| payload.to_string())
}
