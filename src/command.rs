//! Parses the console input line into typed commands before anything reaches
//! a session.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizCommand {
    /// Pick a quiz from the home menu (1-based).
    Open(usize),
    /// Add a named node, or the next letter when no label is given.
    AddNode(Option<String>),
    /// The value stays raw text; each quiz kind parses its own attribute.
    AddEdge { from: String, to: String, value: String },
    Ask { source: String, target: String, guess: u64 },
    Generate(usize),
    Retry,
    Rebuild,
    Export,
    /// Discard the quiz on screen and return to the menu.
    Close,
    Menu,
    Quit,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CommandError {
    #[error("type a command first")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    WrongArguments {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{value}` is not a whole number")]
    InvalidNumber { value: String },
}

pub const HELP: &str = "node [LABEL] | edge U V VALUE | ask SRC DST GUESS | gen N | retry | \
                        rebuild | export | close | menu | quit";

pub fn parse_command(line: &str) -> Result<QuizCommand, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = words.split_first() else {
        return Err(CommandError::Empty);
    };

    match (head.to_ascii_lowercase().as_str(), args) {
        (number, []) if number.chars().all(|c| c.is_ascii_digit()) => {
            Ok(QuizCommand::Open(parse_number(number)?))
        }
        ("node" | "n", []) => Ok(QuizCommand::AddNode(None)),
        ("node" | "n", [label]) => Ok(QuizCommand::AddNode(Some(label.to_string()))),
        ("node" | "n", _) => Err(CommandError::WrongArguments {
            command: "node",
            expected: "at most one label without spaces",
        }),
        ("edge" | "e", [from, to, value]) => Ok(QuizCommand::AddEdge {
            from: from.to_string(),
            to: to.to_string(),
            value: value.to_string(),
        }),
        ("edge" | "e", _) => Err(CommandError::WrongArguments {
            command: "edge",
            expected: "two nodes and a value",
        }),
        ("ask" | "a", [source, target, guess]) => Ok(QuizCommand::Ask {
            source: source.to_string(),
            target: target.to_string(),
            guess: parse_number(guess)?,
        }),
        ("ask" | "a", _) => Err(CommandError::WrongArguments {
            command: "ask",
            expected: "a start node, an end node and a guess",
        }),
        ("gen" | "g", [count]) => Ok(QuizCommand::Generate(parse_number(count)?)),
        ("gen" | "g", _) => Err(CommandError::WrongArguments {
            command: "gen",
            expected: "a node count",
        }),
        ("retry", []) => Ok(QuizCommand::Retry),
        ("rebuild", []) => Ok(QuizCommand::Rebuild),
        ("export", []) => Ok(QuizCommand::Export),
        ("close", []) => Ok(QuizCommand::Close),
        ("menu" | "home", []) => Ok(QuizCommand::Menu),
        ("quit" | "exit" | "q", []) => Ok(QuizCommand::Quit),
        _ => Err(CommandError::Unknown(line.trim().to_string())),
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Result<T, CommandError> {
    raw.parse().map_err(|_| CommandError::InvalidNumber {
        value: raw.to_string(),
    })
}
