// signup-client/src/commands.rs
use std::str::FromStr;

use thiserror::Error;

/// User actions handled by [`crate::controller::ViewController::dispatch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenLogin,
    CloseLogin,
    Login { email: String, password: String },
    Logout,
    Signup { activity: String, email: String },
    Unregister { activity: String, email: String },
    Refresh,
}

impl Command {
    /// Whether the command changes participants and needs an admin session
    pub fn is_mutation(&self) -> bool {
        matches!(self, Command::Signup { .. } | Command::Unregister { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
commands:
  login <email> <password>
  logout
  signup <email> <activity name>
  unregister <email> <activity name>
  refresh
  open-login | close-login
  help | quit";

/// Parses one input line. Activity names may contain spaces, so they come last.
impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb {
            "" => Err(CommandParseError::Empty),
            "open-login" => Ok(Command::OpenLogin),
            "close-login" => Ok(Command::CloseLogin),
            "logout" => Ok(Command::Logout),
            "refresh" => Ok(Command::Refresh),
            "login" => {
                let (email, password) = split_first(rest)
                    .ok_or(CommandParseError::Usage("login <email> <password>"))?;
                Ok(Command::Login { email, password })
            }
            "signup" => {
                let (email, activity) = split_first(rest)
                    .ok_or(CommandParseError::Usage("signup <email> <activity name>"))?;
                Ok(Command::Signup { activity, email })
            }
            "unregister" => {
                let (email, activity) = split_first(rest)
                    .ok_or(CommandParseError::Usage("unregister <email> <activity name>"))?;
                Ok(Command::Unregister { activity, email })
            }
            other => Err(CommandParseError::Unknown(other.to_string())),
        }
    }
}

fn split_first(rest: &str) -> Option<(String, String)> {
    let (first, tail) = rest.split_once(char::is_whitespace)?;
    let tail = tail.trim();
    if first.is_empty() || tail.is_empty() {
        return None;
    }
    Some((first.to_string(), tail.to_string()))
}
