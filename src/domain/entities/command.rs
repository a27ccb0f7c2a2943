use std::fmt;
use std::str::FromStr;

/// A power-state change the host can be asked to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerAction {
    Shutdown,
    Reboot,
    Sleep,
    Hibernate,
}

impl PowerAction {
    pub const ALL: [PowerAction; 4] = [
        PowerAction::Shutdown,
        PowerAction::Reboot,
        PowerAction::Sleep,
        PowerAction::Hibernate,
    ];

    /// Canonical wire token for this action
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerAction::Shutdown => "shutdown",
            PowerAction::Reboot => "reboot",
            PowerAction::Sleep => "sleep",
            PowerAction::Hibernate => "hibernate",
        }
    }
}

impl fmt::Display for PowerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandToken::normalize(s)
            .action()
            .ok_or_else(|| format!("unknown command: {}", s.trim()))
    }
}

/// A command received from the network, trimmed and lower-cased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandToken(String);

impl CommandToken {
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The action this token names, or `None` for an unknown command
    pub fn action(&self) -> Option<PowerAction> {
        PowerAction::ALL
            .into_iter()
            .find(|action| action.as_str() == self.0)
    }
}

impl fmt::Display for CommandToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
