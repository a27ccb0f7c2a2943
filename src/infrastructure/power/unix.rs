//! Unix-family handlers: privileged command-line utilities via sudo
//!
//! The process must already be allowed to run these without a password
//! prompt; no privilege elevation happens here.

use async_trait::async_trait;
use super::{resolve, Invocation, InvocationRunner, OsFamily};
use crate::application::errors::ActionError;
use crate::domain::entities::PowerAction;
use crate::domain::traits::PowerControl;
use crate::infrastructure::config::CommandOverrides;

pub struct UnixPower {
    runner: InvocationRunner,
    overrides: CommandOverrides,
}

impl UnixPower {
    pub fn new(runner: InvocationRunner, overrides: CommandOverrides) -> Self {
        Self { runner, overrides }
    }

    pub fn default_invocation(action: PowerAction) -> Invocation {
        match action {
            PowerAction::Shutdown => Invocation::new("sudo", &["shutdown", "now"]),
            PowerAction::Reboot => Invocation::new("sudo", &["reboot"]),
            PowerAction::Sleep => Invocation::new("sudo", &["pm-suspend"]),
            PowerAction::Hibernate => Invocation::new("sudo", &["pm-hibernate"]),
        }
    }

    pub fn invocation(&self, action: PowerAction) -> Invocation {
        resolve(&self.overrides, action, Self::default_invocation)
    }

    async fn invoke(&self, action: PowerAction) -> Result<(), ActionError> {
        self.runner.run(&self.invocation(action)).await
    }
}

#[async_trait]
impl PowerControl for UnixPower {
    async fn shutdown(&self) -> Result<(), ActionError> {
        self.invoke(PowerAction::Shutdown).await
    }

    async fn reboot(&self) -> Result<(), ActionError> {
        self.invoke(PowerAction::Reboot).await
    }

    async fn sleep(&self) -> Result<(), ActionError> {
        self.invoke(PowerAction::Sleep).await
    }

    async fn hibernate(&self) -> Result<(), ActionError> {
        self.invoke(PowerAction::Hibernate).await
    }

    fn name(&self) -> &'static str {
        OsFamily::Unix.as_str()
    }
}
