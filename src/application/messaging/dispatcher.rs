//! Command dispatcher - Routes command tokens to power actions

use std::sync::Arc;
use crate::application::errors::ActionError;
use crate::domain::entities::{CommandToken, PowerAction};
use crate::domain::traits::PowerControl;

/// Result of dispatching one command
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The action handler was invoked
    Executed(PowerAction),
    /// The action handler reported a failure (strict policy only)
    Failed { action: PowerAction, error: ActionError },
    /// The token named no known action; nothing was invoked
    Unknown(String),
}

impl DispatchOutcome {
    /// The action that was attempted, if any
    pub fn action(&self) -> Option<PowerAction> {
        match self {
            DispatchOutcome::Executed(action) => Some(*action),
            DispatchOutcome::Failed { action, .. } => Some(*action),
            DispatchOutcome::Unknown(_) => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, DispatchOutcome::Unknown(_))
    }
}

/// Maps command tokens onto a `PowerControl` implementation
#[derive(Clone)]
pub struct Dispatcher {
    power: Arc<dyn PowerControl>,
}

impl Dispatcher {
    pub fn new(power: Arc<dyn PowerControl>) -> Self {
        Self { power }
    }

    /// Name of the OS family the actions are executed for
    pub fn platform(&self) -> &'static str {
        self.power.name()
    }

    /// Dispatch a normalized command, invoking at most one action handler
    pub async fn dispatch(&self, token: &CommandToken) -> DispatchOutcome {
        let Some(action) = token.action() else {
            tracing::info!("Unknown command: {}", token);
            return DispatchOutcome::Unknown(token.as_str().to_string());
        };

        tracing::info!("Executing {}...", action);
        match self.power.perform(action).await {
            Ok(()) => DispatchOutcome::Executed(action),
            Err(error) => {
                tracing::error!("{} failed: {}", action, error);
                DispatchOutcome::Failed { action, error }
            }
        }
    }
}
