use anyhow::{bail, Context, Result};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Clipboard writers tried in order: macOS, Wayland, X11.
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
];

/// Pipe `text` into the first clipboard tool that can be started.
/// Returns the name of the tool used.
pub async fn copy_to_clipboard(text: &str) -> Result<&'static str> {
    for &(program, args) in CLIPBOARD_COMMANDS {
        match pipe_into(program, args, text).await {
            Ok(true) => return Ok(program),
            Ok(false) => tracing::debug!(program, "clipboard tool exited with failure"),
            Err(error) => tracing::debug!(program, %error, "clipboard tool unavailable"),
        }
    }
    bail!("no clipboard tool found (tried pbcopy, wl-copy, xclip)")
}

async fn pipe_into(program: &str, args: &[&str], text: &str) -> Result<bool> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to start {program}"))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .await
            .with_context(|| format!("Failed to write to {program}"))?;
        stdin.shutdown().await.ok();
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("Failed to wait for {program}"))?;
    Ok(status.success())
}
