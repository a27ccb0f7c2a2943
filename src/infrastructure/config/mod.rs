//! Configuration management

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::domain::entities::PowerAction;

pub const DEFAULT_PORT: u16 = 9877;
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Listener configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub listener: ListenerConfig,
    pub power: PowerConfig,
}

/// Network endpoint settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ListenerConfig {
    /// Address to bind; all interfaces by default
    pub bind_address: IpAddr,
    pub port: u16,
    /// Receive buffer capacity; longer datagrams are truncated by the socket
    pub buffer_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ListenerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

/// Power action settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PowerConfig {
    /// Surface spawn failures and non-zero exits as errors
    pub strict: bool,
    pub commands: CommandOverrides,
}

/// Optional argv lists replacing the built-in invocation per action
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CommandOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutdown: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reboot: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hibernate: Option<Vec<String>>,
}

impl CommandOverrides {
    pub fn get(&self, action: PowerAction) -> Option<&[String]> {
        match action {
            PowerAction::Shutdown => self.shutdown.as_deref(),
            PowerAction::Reboot => self.reboot.as_deref(),
            PowerAction::Sleep => self.sleep.as_deref(),
            PowerAction::Hibernate => self.hibernate.as_deref(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise start from defaults; then apply
    /// environment overrides. A file that exists but fails to load is an error.
    pub fn resolve(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::resolve_with(path, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        path: impl Into<PathBuf>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let path = path.into();
        let mut config = if path.exists() {
            Config::load(&path)?
        } else {
            Config::default()
        };
        config.apply_vars(var)?;
        Ok(config)
    }

    /// Override settings from `REMOTE_POWER_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(bind) = var("REMOTE_POWER_BIND") {
            self.listener.bind_address = bind
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("REMOTE_POWER_BIND={}", bind)))?;
        }

        if let Some(port) = var("REMOTE_POWER_PORT") {
            self.listener.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("REMOTE_POWER_PORT={}", port)))?;
        }

        if let Some(strict) = var("REMOTE_POWER_STRICT") {
            self.power.strict = match strict.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidValue(format!(
                        "REMOTE_POWER_STRICT={}",
                        strict
                    )))
                }
            };
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listener.buffer_size == 0 {
            return Err(ConfigError::InvalidValue("buffer-size must be greater than 0".to_string()));
        }

        for action in PowerAction::ALL {
            if let Some(argv) = self.power.commands.get(action) {
                if argv.first().map_or(true, |program| program.trim().is_empty()) {
                    return Err(ConfigError::InvalidValue(format!(
                        "commands.{} must name a program",
                        action
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
