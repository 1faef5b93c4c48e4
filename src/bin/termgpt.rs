use anyhow::Result;
use clap::Parser;
use std::io;
use std::process::ExitCode;
use termgpt::api::ApiClient;
use termgpt::app::{prompt_for_api_key, App};
use termgpt::cli::Cli;
use termgpt::config::Config;
use termgpt::logging;
use termgpt::state::Session;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let one_shot = cli.one_shot_prompt();
    logging::init(cli.no_log || one_shot.is_some());

    let mut config = Config::load(cli.model.as_deref())?;
    let s = config.effective_lang().strings();

    if let Some(model) = cli.set_default_model.as_deref() {
        config.store().save_model(model)?;
        println!("{}: {}", s.default_model_set, model.trim());
        return Ok(ExitCode::SUCCESS);
    }
    if cli.list_models {
        println!("{}", s.model_list);
        return Ok(ExitCode::SUCCESS);
    }

    if config.api_key.is_none() && !config.is_local_endpoint() {
        config.api_key =
            prompt_for_api_key(&mut io::stdin().lock(), &mut io::stdout(), s, &config.store())?;
    }
    config.validate()?;

    let client = ApiClient::new(&config)?;
    let session = Session::new(client, config.system_prompt_text());
    let mut app = App::new(config, session, io::stdin().lock(), io::stdout());

    match one_shot {
        Some(prompt) => {
            if !app.run_one_shot(prompt).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
        None => app.run_interactive().await?,
    }
    Ok(ExitCode::SUCCESS)
}
