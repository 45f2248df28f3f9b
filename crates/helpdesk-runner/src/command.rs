use thiserror::Error;

/// One line of the headless driver's command language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeskCommand {
    /// Raw, unvalidated text; intake checks happen when the command is applied.
    Submit(String),
    Next,
    Peek,
    Resolve(usize),
    List,
    Resolved,
    Count,
    Empty,
    Board,
}

impl DeskCommand {
    pub fn is_mutating(&self) -> bool {
        matches!(self, DeskCommand::Submit(_) | DeskCommand::Next | DeskCommand::Resolve(_))
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("unknown command `{0}`")]
    UnknownVerb(String),
    #[error("`{verb}` needs an argument")]
    MissingArgument { verb: String },
    #[error("`{value}` is not a valid ticket index")]
    InvalidIndex { value: String },
    #[error("`{verb}` takes no arguments")]
    UnexpectedArgument { verb: String },
}

/// Parses a script line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<DeskCommand>, CommandParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((v, r)) => (v, r.trim()),
        None => (line, ""),
    };
    let verb_lc = verb.to_ascii_lowercase();

    let no_args = |cmd: DeskCommand| {
        if rest.is_empty() {
            Ok(Some(cmd))
        } else {
            Err(CommandParseError::UnexpectedArgument { verb: verb_lc.clone() })
        }
    };

    match verb_lc.as_str() {
        "submit" | "add" => Ok(Some(DeskCommand::Submit(rest.to_string()))),
        "next" | "assist" => no_args(DeskCommand::Next),
        "peek" => no_args(DeskCommand::Peek),
        "list" | "pending" => no_args(DeskCommand::List),
        "resolved" => no_args(DeskCommand::Resolved),
        "count" => no_args(DeskCommand::Count),
        "empty" => no_args(DeskCommand::Empty),
        "board" => no_args(DeskCommand::Board),
        "resolve" | "solve" => {
            if rest.is_empty() {
                return Err(CommandParseError::MissingArgument { verb: verb_lc.clone() });
            }
            rest.parse::<usize>()
                .map(|i| Some(DeskCommand::Resolve(i)))
                .map_err(|_| CommandParseError::InvalidIndex { value: rest.to_string() })
        }
        _ => Err(CommandParseError::UnknownVerb(verb.to_string())),
    }
}
