use anyhow::{Context, Result};
use tokio::process::Command;

/// Run a user-approved command through `sh -c` with the terminal's stdio and
/// return its exit code (`-1` when killed by a signal).
pub async fn run_shell_command(command: &str) -> Result<i32> {
    tracing::info!(command, "running shell command");
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .status()
        .await
        .with_context(|| format!("Failed to execute shell command: {command}"))?;
    Ok(status.code().unwrap_or(-1))
}
