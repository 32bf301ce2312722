/// A user intent read from one line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Anything that is not a command is an answer, including an empty line.
    Answer(String),
    Digits(String),
    Operator(String),
    Reset,
    History,
    Help,
    Quit,
    Unknown(String),
}

impl Intent {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix(':') else {
            return Self::Answer(trimmed.to_owned());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "digits" | "d" => Self::Digits(arg.to_owned()),
            "op" | "o" => Self::Operator(arg.to_owned()),
            "reset" => Self::Reset,
            "history" | "h" => Self::History,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => Self::Unknown(trimmed.to_owned()),
        }
    }
}
