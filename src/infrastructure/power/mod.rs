//! Power action handlers for the host operating system
//!
//! Each OS family has one `PowerControl` implementation that maps actions
//! onto fixed utility invocations. Both are always compiled so their
//! invocation tables can be inspected on any host; `for_host` picks the one
//! that actually runs.

mod unix;
mod windows;

pub use unix::UnixPower;
pub use windows::WindowsPower;

use std::fmt;
use std::sync::Arc;
use crate::application::errors::ActionError;
use crate::domain::entities::PowerAction;
use crate::domain::traits::PowerControl;
use crate::infrastructure::config::{CommandOverrides, PowerConfig};

/// Coarse platform classification used to select action handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Unix,
}

impl OsFamily {
    pub fn detect() -> Self {
        if cfg!(windows) {
            OsFamily::Windows
        } else {
            OsFamily::Unix
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Windows => "windows",
            OsFamily::Unix => "unix",
        }
    }
}

/// A single utility call with a fixed argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Build from an argv list; `None` if it names no program
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How the outcome of an invocation is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecPolicy {
    /// Run the utility and ignore whatever happens
    #[default]
    FireAndForget,
    /// Report spawn failures and non-zero exits
    Strict,
}

impl ExecPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ExecPolicy::Strict
        } else {
            ExecPolicy::FireAndForget
        }
    }
}

/// Runs invocations to completion under an `ExecPolicy`
#[derive(Debug, Clone, Copy, Default)]
pub struct InvocationRunner {
    policy: ExecPolicy,
}

impl InvocationRunner {
    pub fn new(policy: ExecPolicy) -> Self {
        Self { policy }
    }

    pub async fn run(&self, invocation: &Invocation) -> Result<(), ActionError> {
        tracing::debug!("Running `{}`", invocation);

        let result = tokio::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .await;

        match (self.policy, result) {
            (ExecPolicy::Strict, Err(source)) => Err(ActionError::Spawn {
                program: invocation.program.clone(),
                source,
            }),
            (ExecPolicy::Strict, Ok(status)) if !status.success() => Err(ActionError::ExitStatus {
                program: invocation.program.clone(),
                status,
            }),
            (ExecPolicy::FireAndForget, result) => {
                tracing::debug!("`{}` finished: {:?}", invocation, result);
                Ok(())
            }
            (ExecPolicy::Strict, Ok(_)) => Ok(()),
        }
    }
}

/// Resolve the invocation for an action, preferring a configured override
pub(crate) fn resolve(
    overrides: &CommandOverrides,
    action: PowerAction,
    default: fn(PowerAction) -> Invocation,
) -> Invocation {
    overrides
        .get(action)
        .and_then(Invocation::from_argv)
        .unwrap_or_else(|| default(action))
}

/// Select the action handlers for an OS family
pub fn for_family(family: OsFamily, config: &PowerConfig) -> Arc<dyn PowerControl> {
    let runner = InvocationRunner::new(ExecPolicy::from_strict(config.strict));
    let overrides = config.commands.clone();
    match family {
        OsFamily::Windows => Arc::new(WindowsPower::new(runner, overrides)),
        OsFamily::Unix => Arc::new(UnixPower::new(runner, overrides)),
    }
}

/// Select the action handlers for the running host
pub fn for_host(config: &PowerConfig) -> Arc<dyn PowerControl> {
    for_family(OsFamily::detect(), config)
}
