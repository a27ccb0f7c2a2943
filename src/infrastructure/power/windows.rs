//! Windows-family handlers: `shutdown.exe` and the powrprof SetSuspendState entry point

use async_trait::async_trait;
use super::{resolve, Invocation, InvocationRunner, OsFamily};
use crate::application::errors::ActionError;
use crate::domain::entities::PowerAction;
use crate::domain::traits::PowerControl;
use crate::infrastructure::config::CommandOverrides;

const SET_SUSPEND_STATE: &str = "powrprof.dll,SetSuspendState";

pub struct WindowsPower {
    runner: InvocationRunner,
    overrides: CommandOverrides,
}

impl WindowsPower {
    pub fn new(runner: InvocationRunner, overrides: CommandOverrides) -> Self {
        Self { runner, overrides }
    }

    /// Built-in invocation; the SetSuspendState arguments are
    /// `hibernate,force,disable-wake-events`
    pub fn default_invocation(action: PowerAction) -> Invocation {
        match action {
            PowerAction::Shutdown => Invocation::new("shutdown", &["/s", "/t", "0"]),
            PowerAction::Reboot => Invocation::new("shutdown", &["/r", "/t", "0"]),
            PowerAction::Sleep => Invocation::new("rundll32.exe", &[SET_SUSPEND_STATE, "0,1,0"]),
            PowerAction::Hibernate => Invocation::new("rundll32.exe", &[SET_SUSPEND_STATE, "1,1,0"]),
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
impl PowerControl for WindowsPower {
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
        OsFamily::Windows.as_str()
    }
}
