mod commands;

pub use commands::{read_line, read_multiline, ReplCommand};

use crate::config::{Config, ConfigStore};
use crate::state::{Attachment, Session};
use crate::tools::{copy_to_clipboard, read_attachment, run_shell_command, save_answer};
use crate::ui::render::{
    render_answer_footer, render_assistant_header, render_banner, render_command_to_run,
    render_error, render_history, render_info, render_one_shot_header, render_stream_update,
    render_success, render_user_prompt,
};
use crate::ui::strings::{LANGUAGE_PROMPT, LANGUAGE_SAVED, LANGUAGE_SAVE_PROMPT};
use crate::ui::{Lang, UiStrings};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use tokio::sync::mpsc;

/// Line-oriented front end over a [`Session`].
pub struct App<R, W> {
    config: Config,
    lang: Lang,
    session: Session,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(config: Config, session: Session, input: R, out: W) -> Self {
        let lang = config.effective_lang();
        Self {
            config,
            lang,
            session,
            input,
            out,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    fn strings(&self) -> &'static UiStrings {
        self.lang.strings()
    }

    /// Ask one question, stream the answer, and report whether it arrived.
    pub async fn run_one_shot(&mut self, prompt: String) -> Result<bool> {
        let s = self.strings();
        render_one_shot_header(&mut self.out, s, &prompt, self.session.model())?;
        let answered = self.send_and_render(prompt).await?;
        writeln!(self.out)?;
        Ok(answered)
    }

    pub async fn run_interactive(&mut self) -> Result<()> {
        if self.config.lang.is_none() {
            self.choose_language()?;
        }
        tracing::info!("interactive session started");
        render_banner(&mut self.out, self.lang, self.session.model())?;

        loop {
            let s = self.strings();
            render_user_prompt(&mut self.out, s)?;
            let Some(line) = read_line(&mut self.input)? else {
                writeln!(self.out, "\n{}", s.exiting)?;
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match ReplCommand::parse(line) {
                ReplCommand::Exit => {
                    writeln!(self.out, "{}", s.bye)?;
                    break;
                }
                ReplCommand::Model => {
                    writeln!(self.out, "{}: {}", s.model, self.session.model())?;
                }
                ReplCommand::History => {
                    render_history(&mut self.out, s, self.session.history())?;
                }
                ReplCommand::Clear => {
                    self.session.clear_history();
                    render_info(&mut self.out, s.history_cleared)?;
                }
                ReplCommand::Multiline => {
                    render_info(&mut self.out, s.multiline_intro)?;
                    match read_multiline(&mut self.input)? {
                        Some(text) => {
                            self.send_and_render(text).await?;
                        }
                        None => render_info(&mut self.out, s.multiline_empty)?,
                    }
                }
                ReplCommand::Run(number) => self.run_suggested(number).await?,
                ReplCommand::Read(path) => self.read_file(path)?,
                ReplCommand::Save(path) => self.save_last_answer(path)?,
                ReplCommand::Copy => self.copy_last_answer().await?,
                ReplCommand::Message(message) => {
                    self.send_and_render(message.to_string()).await?;
                }
            }
        }

        Ok(())
    }

    /// Ask for `tr`/`en` (default `tr`) and offer to persist the choice.
    /// EOF keeps Turkish without asking.
    fn choose_language(&mut self) -> Result<()> {
        write!(self.out, "\n{LANGUAGE_PROMPT}")?;
        self.out.flush()?;
        let answer = read_line(&mut self.input)?;
        self.lang = answer.as_deref().map(Lang::from_choice).unwrap_or_default();

        if self.config.system_prompt.is_none() {
            self.session.set_system_prompt(self.lang.default_system_prompt());
        }

        if answer.is_none() {
            return Ok(());
        }
        write!(self.out, "{LANGUAGE_SAVE_PROMPT}")?;
        self.out.flush()?;
        if confirmed(read_line(&mut self.input)?.as_deref()) {
            match self.config.store().save_lang(self.lang) {
                Ok(_) => writeln!(self.out, "{LANGUAGE_SAVED}: {}", self.lang)?,
                Err(error) => {
                    tracing::warn!(error = %error, "failed to save language");
                    render_error(&mut self.out, &error.to_string())?;
                }
            }
        }
        Ok(())
    }

    /// Stream one round to the terminal. Failures are reported and leave
    /// the session usable; only terminal I/O errors propagate.
    async fn send_and_render(&mut self, message: String) -> Result<bool> {
        let s = self.strings();
        render_assistant_header(&mut self.out, s)?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = &mut self.session;
        let out = &mut self.out;
        let send = async move {
            let result = session.send_message(message, Some(&tx)).await;
            drop(tx);
            result
        };
        let print = async move {
            while let Some(update) = rx.recv().await {
                render_stream_update(out, s, &update)?;
            }
            Ok::<(), io::Error>(())
        };
        let (result, printed) = tokio::join!(send, print);
        printed?;

        match result {
            Ok(_) => {
                render_answer_footer(&mut self.out, s, self.session.suggested_commands())?;
                Ok(true)
            }
            Err(error) => {
                tracing::warn!(error = %error, "no answer");
                if let Some(body) = error.raw_body() {
                    tracing::debug!(body, "API error body");
                }
                writeln!(self.out)?;
                render_error(&mut self.out, &format!("{} ({error})", s.no_answer))?;
                Ok(false)
            }
        }
    }

    async fn run_suggested(&mut self, number: Option<usize>) -> Result<()> {
        let s = self.strings();
        let commands = self.session.suggested_commands();
        if commands.is_empty() {
            return Ok(render_info(&mut self.out, s.no_commands)?);
        }
        let count = commands.len();
        let Some(command) = number.and_then(|n| commands.get(n)).map(str::to_string) else {
            return Ok(render_error(
                &mut self.out,
                &format!("{} (1-{count}).", s.invalid_number),
            )?);
        };

        render_command_to_run(&mut self.out, s, &command)?;
        if !confirmed(read_line(&mut self.input)?.as_deref()) {
            writeln!(self.out, "{}", s.cancelled)?;
            return Ok(());
        }

        self.out.flush()?;
        match run_shell_command(&command).await {
            Ok(code) => render_info(&mut self.out, &format!("{}: {code}", s.return_code))?,
            Err(error) => render_error(&mut self.out, &format!("{error:#}"))?,
        }
        Ok(())
    }

    fn read_file(&mut self, path: &str) -> Result<()> {
        let s = self.strings();
        match read_attachment(path) {
            Ok(content) => {
                let attachment = Attachment::new(path, content);
                render_info(
                    &mut self.out,
                    &format!("{} ({} bytes).", s.file_loaded, attachment.size()),
                )?;
                self.session.attach(attachment);
            }
            Err(error) => {
                tracing::warn!(error = %format!("{error:#}"), "attachment not loaded");
                render_error(&mut self.out, &format!("{}: {path}", s.file_unreadable))?;
            }
        }
        Ok(())
    }

    fn save_last_answer(&mut self, path: &str) -> Result<()> {
        let s = self.strings();
        let Some(answer) = self.session.last_answer() else {
            return Ok(render_error(&mut self.out, s.nothing_to_save)?);
        };
        match save_answer(path, answer) {
            Ok(()) => render_success(&mut self.out, &format!("{}: {path}", s.saved))?,
            Err(error) => {
                tracing::warn!(error = %format!("{error:#}"), "answer not saved");
                render_error(&mut self.out, &format!("{}: {path}", s.save_failed))?;
            }
        }
        Ok(())
    }

    async fn copy_last_answer(&mut self) -> Result<()> {
        let s = self.strings();
        let Some(answer) = self.session.last_answer() else {
            return Ok(render_error(&mut self.out, s.nothing_to_copy)?);
        };
        match copy_to_clipboard(answer).await {
            Ok(tool) => {
                tracing::debug!(tool, "answer copied");
                render_success(&mut self.out, s.copied)?;
            }
            Err(error) => {
                tracing::warn!(error = %error, "clipboard unavailable");
                render_error(&mut self.out, s.no_clipboard)?;
            }
        }
        Ok(())
    }
}

/// Ask for an API key once and persist it. `None` when nothing was entered.
pub fn prompt_for_api_key(
    input: &mut impl BufRead,
    out: &mut impl Write,
    s: &UiStrings,
    store: &ConfigStore,
) -> Result<Option<String>> {
    tracing::info!("no API key configured, first-run setup");
    write!(out, "{}", s.api_key_prompt)?;
    out.flush()?;
    let Some(key) = read_line(input)?.map(|line| line.trim().to_string()) else {
        return Ok(None);
    };
    if key.is_empty() {
        tracing::warn!("empty API key entered");
        return Ok(None);
    }
    let path = store.save_api_key(&key)?;
    tracing::info!(path = %path.display(), "{}", s.api_key_saved);
    Ok(Some(key))
}

fn confirmed(answer: Option<&str>) -> bool {
    matches!(answer.map(str::trim).and_then(|a| a.chars().next()), Some('y' | 'Y'))
}
