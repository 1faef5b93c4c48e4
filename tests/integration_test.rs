use std::path::PathBuf;
use tempfile::TempDir;
use termgpt::config::{Config, ConfigStore, DEFAULT_MODEL};
use termgpt::payload::build_payload;
use termgpt::state::{extract_commands, History, MAX_TURNS};
use termgpt::ui::Lang;

fn remote_config(api_key: Option<&str>) -> Config {
    Config {
        api_key: api_key.map(str::to_string),
        model: DEFAULT_MODEL.to_string(),
        api_url: "https://api.openai.com/v1/chat/completions".to_string(),
        lang: None,
        system_prompt: None,
        config_dir: PathBuf::from("."),
    }
}

#[test]
fn test_config_validation_requires_api_key_for_remote_api() {
    assert!(remote_config(None).validate().is_err());
    assert!(remote_config(Some("sk-test")).validate().is_ok());
}

#[test]
fn test_config_validation_allows_local_endpoint_without_api_key() {
    let config = Config {
        api_url: "http://127.0.0.1:11434/v1/chat/completions".to_string(),
        ..remote_config(None)
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_stored_settings_feed_the_loaded_config() {
    let temp = TempDir::new().expect("temp dir");
    let store = ConfigStore::new(temp.path());
    store.save_api_key("sk-stored").expect("save key");
    store.save_model("gpt-4.1").expect("save model");
    store.save_lang(Lang::En).expect("save lang");

    let dir = temp.path().to_string_lossy().to_string();
    let config = Config::load_with(None, |key| {
        (key == "TERMGPT_CONFIG_DIR").then(|| dir.clone())
    })
    .expect("config loads");

    assert_eq!(config.api_key.as_deref(), Some("sk-stored"));
    assert_eq!(config.model, "gpt-4.1");
    assert_eq!(config.lang, Some(Lang::En));
    assert!(config.validate().is_ok());
}

#[test]
fn test_payload_carries_only_the_most_recent_turns() {
    let mut history = History::new();
    for i in 0..MAX_TURNS + 5 {
        history.append(format!("question {i}"), format!("answer {i}"));
    }

    let body = build_payload(DEFAULT_MODEL, "sys", &history, "latest").expect("payload");
    let parsed: serde_json::Value = serde_json::from_str(&body).expect("valid JSON");
    let messages = parsed["messages"].as_array().expect("messages array");

    assert_eq!(messages.len(), 1 + 2 * MAX_TURNS + 1);
    assert_eq!(messages[1]["content"], "question 5");
    assert_eq!(messages[messages.len() - 2]["content"], format!("answer {}", MAX_TURNS + 4));
    assert_eq!(messages[messages.len() - 1]["content"], "latest");
}

#[test]
fn test_command_extraction_from_answer() {
    let answer = "Try this:\n$ ls -la\ndone\n$ rm -rf /tmp/x";
    assert_eq!(extract_commands(answer), vec!["ls -la", "rm -rf /tmp/x"]);
}
