use clap::Parser;

/// Terminal chat client for OpenAI-compatible chat-completions endpoints.
///
/// Model precedence: --model > stored default > TERMGPT_MODEL > gpt-4o-mini.
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about)]
pub struct Cli {
    /// Model to use for this run.
    #[arg(long, short = 'm', value_name = "NAME")]
    pub model: Option<String>,

    /// Persist NAME as the default model and exit.
    #[arg(long = "set-default-model", value_name = "NAME")]
    pub set_default_model: Option<String>,

    /// Print example chat models and exit.
    #[arg(long = "list-models", short = 'l', default_value_t = false)]
    pub list_models: bool,

    /// Quiet mode: disable log output.
    #[arg(long = "no-log", short = 'q', default_value_t = false)]
    pub no_log: bool,

    /// One-shot question. Without it the interactive session starts.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "PROMPT")]
    pub prompt: Vec<String>,
}

impl Cli {
    /// Trailing words joined by single spaces, if any were given.
    pub fn one_shot_prompt(&self) -> Option<String> {
        let prompt = self.prompt.join(" ");
        if prompt.trim().is_empty() {
            None
        } else {
            Some(prompt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("termgpt").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_arguments_means_interactive() {
        let cli = parse(&[]);
        assert!(cli.model.is_none());
        assert!(!cli.list_models);
        assert!(!cli.no_log);
        assert!(cli.one_shot_prompt().is_none());
    }

    #[test]
    fn test_flags_and_one_shot_prompt() {
        let cli = parse(&["-q", "-m", "gpt-4o", "how", "do", "I", "list", "files?"]);
        assert!(cli.no_log);
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert_eq!(cli.one_shot_prompt().as_deref(), Some("how do I list files?"));
    }

    #[test]
    fn test_prompt_may_contain_hyphenated_words() {
        let cli = parse(&["explain", "ls", "-la"]);
        assert_eq!(cli.one_shot_prompt().as_deref(), Some("explain ls -la"));
    }

    #[test]
    fn test_set_default_model_and_list_models() {
        let cli = parse(&["--set-default-model", "gpt-4.1", "--list-models"]);
        assert_eq!(cli.set_default_model.as_deref(), Some("gpt-4.1"));
        assert!(cli.list_models);
    }

    #[test]
    fn test_model_flag_requires_value() {
        assert!(Cli::try_parse_from(["termgpt", "--model"]).is_err());
    }
}
