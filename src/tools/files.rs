use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read a file to attach to the next message. Invalid UTF-8 is replaced
/// rather than rejected.
pub fn read_attachment(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write an answer to `path`, creating parent directories as needed.
pub fn save_answer(path: impl AsRef<Path>, answer: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, answer).with_context(|| format!("Failed to write file {}", path.display()))
}
