use std::io::{self, BufRead};

/// One line of REPL input, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Exit,
    Model,
    History,
    Clear,
    Multiline,
    /// `/run N`; `None` when N is missing or not a number.
    Run(Option<usize>),
    Read(&'a str),
    Save(&'a str),
    Copy,
    Message(&'a str),
}

impl<'a> ReplCommand<'a> {
    /// Classify a trimmed, non-empty input line.
    pub fn parse(line: &'a str) -> Self {
        match line {
            "/exit" | "/quit" => return Self::Exit,
            "/model" => return Self::Model,
            "/history" => return Self::History,
            "/clear" => return Self::Clear,
            "/ml" | "/multi" => return Self::Multiline,
            "/copy" => return Self::Copy,
            "/run" => return Self::Run(None),
            _ => {}
        }

        if let Some(rest) = line.strip_prefix("/run ") {
            return Self::Run(rest.trim().parse().ok());
        }
        if let Some(path) = line.strip_prefix("/read ") {
            return Self::Read(path.trim());
        }
        if let Some(path) = line.strip_prefix("/save ") {
            return Self::Save(path.trim());
        }
        Self::Message(line)
    }
}

/// Read one line without its line ending; `None` on EOF.
pub fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

/// Collect lines until one containing only `.` or EOF. Every collected
/// line keeps a trailing newline; `None` when nothing was entered.
pub fn read_multiline(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut text = String::new();
    while let Some(line) = read_line(input)? {
        if line.trim() == "." {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    Ok(if text.is_empty() { None } else { Some(text) })
}
