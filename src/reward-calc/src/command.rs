//! Prompt commands. Each maps to one control of the calculator form.

use reward_core::loyalty::{Channel, ConfigField, UnknownField};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Show,
    /// The Edit/Save button.
    ToggleEdit,
    /// Empty `raw` clears the field.
    Set { field: ConfigField, raw: String },
    Spend { channel: Channel, raw: String },
    Calculate,
    MinimumSpend,
    Clear,
    Reset,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Name(#[from] UnknownField),
}

pub const HELP: &str = "\
Commands:
  show                        show the reward configuration
  edit                        toggle edit mode (Edit / Save)
  set <field> [value]         change a field while editing; no value clears it
                              fields: base, online, normal, minimum, existing
  spend <online|normal> <amt> enter a spend amount
  calc                        calculate points for the entered spend
  min                         calculate minimum spend to reach the threshold
  clear                       clear spend and results
  reset                       restore the default configuration
  help                        show this help
  quit                        exit";

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(Command::Help);
        };
        let command = match name.to_ascii_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "show" | "config" => Command::Show,
            "edit" | "save" => Command::ToggleEdit,
            "set" => {
                let field = parts
                    .next()
                    .ok_or(ParseError::Usage("set <field> [value]"))?
                    .parse::<ConfigField>()?;
                Command::Set { field, raw: remainder(parts) }
            }
            "spend" => {
                let channel = parts
                    .next()
                    .ok_or(ParseError::Usage("spend <online|normal> <amount>"))?
                    .parse::<Channel>()?;
                Command::Spend { channel, raw: remainder(parts) }
            }
            "calc" | "calculate" => Command::Calculate,
            "min" | "minimum" => Command::MinimumSpend,
            "clear" => Command::Clear,
            "reset" => Command::Reset,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn remainder(parts: std::str::SplitWhitespace<'_>) -> String {
    parts.collect::<Vec<_>>().join(" ")
}
