pub const MAX_SUGGESTED_COMMANDS: usize = 16;
const COMMAND_PREFIX: &str = "$ ";

/// Collect `$ <command>` lines from an answer, in order, at most 16.
pub fn extract_commands(answer: &str) -> Vec<String> {
    answer
        .split('\n')
        .filter(|line| line.len() >= 3)
        .filter_map(|line| line.strip_prefix(COMMAND_PREFIX))
        .take(MAX_SUGGESTED_COMMANDS)
        .map(str::to_string)
        .collect()
}

/// Commands suggested by the most recent answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestedCommands {
    commands: Vec<String>,
}

impl SuggestedCommands {
    /// Discard the previous list and extract a fresh one from `answer`.
    pub fn replace_from_answer(&mut self, answer: &str) {
        self.commands = extract_commands(answer);
    }

    /// Command by its 1-based display number.
    pub fn get(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.commands.get(idx))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extracts_dollar_lines_in_order() {
        let answer = "Try this:\n$ ls -la\ndone\n$ rm -rf /tmp/x";
        assert_eq!(extract_commands(answer), vec!["ls -la", "rm -rf /tmp/x"]);
    }

    #[test]
    fn test_line_shape_rules() {
        let answer = "$\n$ \n$x\n $ indented\n$  double space\n$ a\n$$ b";
        assert_eq!(extract_commands(answer), vec![" double space", "a"]);
    }

    #[test]
    fn test_keeps_at_most_sixteen() {
        let answer: String = (1..=20).map(|i| format!("$ echo {i}\n")).collect();
        let commands = extract_commands(&answer);
        assert_eq!(commands.len(), MAX_SUGGESTED_COMMANDS);
        assert_eq!(commands.first().map(String::as_str), Some("echo 1"));
        assert_eq!(commands.last().map(String::as_str), Some("echo 16"));
    }

    #[test]
    fn test_replace_discards_previous_list() {
        let mut suggested = SuggestedCommands::default();
        suggested.replace_from_answer("$ make\n$ make test");
        assert_eq!(suggested.len(), 2);
        assert_eq!(suggested.get(2), Some("make test"));
        assert_eq!(suggested.get(0), None);
        assert_eq!(suggested.get(3), None);

        suggested.replace_from_answer("no commands here");
        assert!(suggested.is_empty());
        assert_eq!(suggested.iter().count(), 0);
    }
}
