use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::error::RequestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Get,
    Put,
    Delete,
    Keys,
    Selected,
    Quit,
}

impl FromStr for Command {
    type Err = RequestError;

    /// Verbs are matched exactly; `get` is not `GET`.
    fn from_str(verb: &str) -> Result<Self, Self::Err> {
        match verb {
            "GET" => Ok(Command::Get),
            "PUT" => Ok(Command::Put),
            "DELETE" => Ok(Command::Delete),
            "KEYS" => Ok(Command::Keys),
            "SELECTED" => Ok(Command::Selected),
            "QUIT" => Ok(Command::Quit),
            _ => Err(RequestError::UnknownCommand),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Get { key: String },
    Put { key: String, value: String },
    Delete { key: String },
    Keys,
    Selected { session_id: String },
    Quit,
}

impl Request {
    pub fn command(&self) -> Command {
        match self {
            Request::Get { .. } => Command::Get,
            Request::Put { .. } => Command::Put,
            Request::Delete { .. } => Command::Delete,
            Request::Keys => Command::Keys,
            Request::Selected { .. } => Command::Selected,
            Request::Quit => Command::Quit,
        }
    }
}

fn separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Splits a command on runs of whitespace.
///
/// A leading separator produces an empty first token; trailing empty tokens
/// are dropped.
pub fn tokenize(request_data: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = separator().split(request_data).collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    parts
}

pub fn parse_request(request_data: &str) -> Result<Request, RequestError> {
    let parts = tokenize(request_data);
    let verb = parts.first().copied().unwrap_or_default();

    match verb.parse::<Command>()? {
        Command::Get => match parts.get(1) {
            Some(key) => Ok(Request::Get {
                key: key.to_string(),
            }),
            None => Err(RequestError::InvalidGet),
        },
        Command::Put => match (parts.get(1), parts.get(2)) {
            (Some(key), Some(value)) => Ok(Request::Put {
                key: key.to_string(),
                value: value.to_string(),
            }),
            _ => Err(RequestError::InvalidPut),
        },
        Command::Delete => match parts.get(1) {
            Some(key) => Ok(Request::Delete {
                key: key.to_string(),
            }),
            None => Err(RequestError::InvalidDelete),
        },
        Command::Keys => Ok(Request::Keys),
        Command::Selected if parts.len() == 2 => Ok(Request::Selected {
            session_id: parts[1].to_string(),
        }),
        Command::Selected => Err(RequestError::InvalidSelected),
        Command::Quit => Ok(Request::Quit),
    }
}
