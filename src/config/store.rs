use crate::ui::strings::Lang;
use crate::util::non_blank;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const API_KEY_FILE: &str = "config";
const MODEL_FILE: &str = "model";
const LANG_FILE: &str = "lang";
const SYSTEM_PROMPT_FILE: &str = "system_prompt";

/// Plain-text settings files under one configuration directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn api_key(&self) -> Result<Option<String>> {
        self.read_trimmed(API_KEY_FILE)
    }

    pub fn model(&self) -> Result<Option<String>> {
        self.read_trimmed(MODEL_FILE)
    }

    pub fn system_prompt(&self) -> Result<Option<String>> {
        self.read_trimmed(SYSTEM_PROMPT_FILE)
    }

    /// Stored language, ignoring values other than `tr`/`en`.
    pub fn lang(&self) -> Result<Option<Lang>> {
        let Some(value) = self.read_trimmed(LANG_FILE)? else {
            return Ok(None);
        };
        let lang = Lang::parse(&value);
        if lang.is_none() {
            tracing::warn!(value = %value, "ignoring unknown language in config");
        }
        Ok(lang)
    }

    pub fn save_api_key(&self, api_key: &str) -> Result<PathBuf> {
        self.write_private(API_KEY_FILE, api_key.trim())
    }

    pub fn save_model(&self, model: &str) -> Result<PathBuf> {
        self.write_private(MODEL_FILE, model.trim())
    }

    pub fn save_lang(&self, lang: Lang) -> Result<PathBuf> {
        self.write_private(LANG_FILE, lang.code())
    }

    /// Trimmed file content; `None` for a missing or blank file.
    fn read_trimmed(&self, name: &str) -> Result<Option<String>> {
        let path = self.dir.join(name);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(non_blank(content)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => {
                Err(error).with_context(|| format!("failed to read {}", path.display()))
            }
        }
    }

    fn write_private(&self, name: &str, value: &str) -> Result<PathBuf> {
        create_private_dir(&self.dir)?;
        let path = self.dir.join(name);

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        writeln!(file, "{value}").with_context(|| format!("failed to write {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
                .with_context(|| format!("failed to restrict {}", path.display()))?;
        }

        tracing::debug!(path = %path.display(), "config value saved");
        Ok(path)
    }
}

fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
            .with_context(|| format!("failed to restrict {}", dir.display()))?;
    }
    Ok(())
}
