use crate::state::{ConversationStreamUpdate, History, SuggestedCommands};
use crate::ui::strings::{Lang, UiStrings};
use crossterm::style::Stylize;
use std::io::{self, Write};

pub fn render_banner(out: &mut impl Write, lang: Lang, model: &str) -> io::Result<()> {
    let s = lang.strings();
    writeln!(out, "{}", s.welcome.dark_grey())?;
    writeln!(out, "{}: {model}", s.model)?;
    writeln!(out, "{}: {lang}", s.lang)?;
    writeln!(out, "{}", s.commands)
}

pub fn render_user_prompt(out: &mut impl Write, s: &UiStrings) -> io::Result<()> {
    write!(out, "\n{} ", format!("{}:", s.me).cyan().bold())?;
    out.flush()
}

pub fn render_assistant_header(out: &mut impl Write, s: &UiStrings) -> io::Result<()> {
    write!(out, "\n{}", format!("{}:", s.assistant).green().bold())?;
    out.flush()
}

pub fn render_one_shot_header(
    out: &mut impl Write,
    s: &UiStrings,
    prompt: &str,
    model: &str,
) -> io::Result<()> {
    writeln!(out, "\n{} {prompt}", format!("➤ {}:", s.question).cyan().bold())?;
    writeln!(out, "\n{}", format!("➤ {} ({model}):", s.assistant).green().bold())?;
    out.flush()
}

/// Print one live update as soon as it arrives.
pub fn render_stream_update(
    out: &mut impl Write,
    s: &UiStrings,
    update: &ConversationStreamUpdate,
) -> io::Result<()> {
    match update {
        ConversationStreamUpdate::Delta(text) => write!(out, "{text}")?,
        ConversationStreamUpdate::Usage(total) => write!(
            out,
            "\n{}",
            format!("[Usage: {total} {}]", s.usage_tokens).dark_grey()
        )?,
    }
    out.flush()
}

/// Closing newline plus the numbered `$ ` commands of the answer.
pub fn render_answer_footer(
    out: &mut impl Write,
    s: &UiStrings,
    commands: &SuggestedCommands,
) -> io::Result<()> {
    writeln!(out)?;
    if commands.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", format!("{}:", s.suggested).magenta().bold())?;
    for (idx, command) in commands.iter().enumerate() {
        writeln!(out, "  [{}] $ {command}", idx + 1)?;
    }
    writeln!(out, "{}", s.run_hint)
}

pub fn render_history(out: &mut impl Write, s: &UiStrings, history: &History) -> io::Result<()> {
    if history.is_empty() {
        return writeln!(out, "{}", s.history_empty.dark_grey());
    }
    for (number, turn) in history.render() {
        writeln!(out, "{} {}", format!("[{number}] {}:", s.me).cyan().bold(), turn.user())?;
        writeln!(out, "{}", format!("[{number}] {}:", s.assistant).green().bold())?;
        writeln!(out, "{}", turn.assistant())?;
        writeln!(out, "----")?;
    }
    Ok(())
}

pub fn render_command_to_run(out: &mut impl Write, s: &UiStrings, command: &str) -> io::Result<()> {
    writeln!(out, "{} {command}", format!("{}:", s.run_command).magenta().bold())?;
    write!(out, "{}", s.confirm)?;
    out.flush()
}

pub fn render_info(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{}", message.dark_grey())
}

pub fn render_success(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("[+] {message}").dark_grey())
}

pub fn render_error(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("[!] {message}").red().bold())
}
