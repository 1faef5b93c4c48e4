mod store;

pub use store::ConfigStore;

use crate::api::client::DEFAULT_API_URL;
use crate::ui::strings::Lang;
use crate::util::{is_local_endpoint_url, non_blank};
use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const CONFIG_DIR_ENV: &str = "TERMGPT_CONFIG_DIR";
const API_KEY_ENV: &str = "OPENAI_API_KEY";
const MODEL_ENV: &str = "TERMGPT_MODEL";
const API_URL_ENV: &str = "TERMGPT_API_URL";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub lang: Option<Lang>,
    pub system_prompt: Option<String>,
    pub config_dir: PathBuf,
}

impl Config {
    /// Resolve settings from the process environment and the config
    /// directory. `cli_model` wins over every stored model.
    pub fn load(cli_model: Option<&str>) -> Result<Self> {
        Self::load_with(cli_model, |key| std::env::var(key).ok())
    }

    pub fn load_with(cli_model: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config_dir = env(CONFIG_DIR_ENV)
            .and_then(non_blank)
            .map(PathBuf::from)
            .unwrap_or_else(default_config_dir);
        let store = ConfigStore::new(&config_dir);

        let api_key = match env(API_KEY_ENV).and_then(non_blank) {
            Some(key) => {
                tracing::info!("API key loaded from {API_KEY_ENV}");
                Some(key)
            }
            None => {
                let key = store.api_key()?;
                if key.is_some() {
                    tracing::info!("API key loaded from config file");
                }
                key
            }
        };

        let model = match cli_model.and_then(non_blank) {
            Some(model) => model,
            None => match store.model()? {
                Some(model) => model,
                None => env(MODEL_ENV)
                    .and_then(non_blank)
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            },
        };

        let api_url = env(API_URL_ENV)
            .and_then(non_blank)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_key,
            model,
            api_url,
            lang: store.lang()?,
            system_prompt: store.system_prompt()?,
            config_dir,
        })
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        let is_https = url.starts_with("https://");
        if !is_https && !url.starts_with("http://") {
            bail!(
                "Invalid {API_URL_ENV} '{}': expected http:// or https:// URL",
                self.api_url
            );
        }

        let local_endpoint = self.is_local_endpoint();
        if !is_https && !local_endpoint {
            bail!(
                "Plain http:// is only allowed for loopback endpoints (url: '{}')",
                self.api_url
            );
        }

        if !local_endpoint && self.api_key.is_none() {
            bail!(
                "{API_KEY_ENV} must be set for non-local endpoints (url: '{}')",
                self.api_url
            );
        }

        if self.model.trim().is_empty() {
            bail!("Model name must not be empty");
        }

        Ok(())
    }

    pub fn store(&self) -> ConfigStore {
        ConfigStore::new(&self.config_dir)
    }

    pub fn is_local_endpoint(&self) -> bool {
        is_local_endpoint_url(&self.api_url)
    }

    pub fn effective_lang(&self) -> Lang {
        self.lang.unwrap_or_default()
    }

    /// Configured override, else the default prompt of the active language.
    pub fn system_prompt_text(&self) -> String {
        self.system_prompt
            .clone()
            .unwrap_or_else(|| self.effective_lang().default_system_prompt().to_string())
    }
}

fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("termgpt")
}
