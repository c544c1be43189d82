use std::str::FromStr;

use thiserror::Error;

/// Operator commands accepted by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Orbit,
    Downlink,
    Recharge,
    Status,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ORBIT" => Ok(Command::Orbit),
            "DOWNLINK" => Ok(Command::Downlink),
            "RECHARGE" => Ok(Command::Recharge),
            "STATUS" => Ok(Command::Status),
            "QUIT" => Ok(Command::Quit),
            _ => Err(UnknownCommand(s.trim().to_string())),
        }
    }
}
