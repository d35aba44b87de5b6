use crate::{Error, Result};

/// A line typed into the card's terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh,
    ToggleAuto,
    SetInterval(u64),
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command> {
        let mut words = line.split_whitespace();

        let command = match (words.next(), words.next()) {
            (Some("r"), None) => Command::Refresh,
            (Some("a"), None) => Command::ToggleAuto,
            (Some("q"), None) => Command::Quit,
            (Some("i"), Some(millis)) => match millis.parse() {
                Ok(millis) => Command::SetInterval(millis),
                Err(_) => return Error::InvalidCommand(line.trim().to_owned()).into(),
            },
            _ => return Error::InvalidCommand(line.trim().to_owned()).into(),
        };

        if words.next().is_some() {
            return Error::InvalidCommand(line.trim().to_owned()).into();
        }

        Ok(command)
    }
}
