//! Application layer errors

use std::net::SocketAddr;
use thiserror::Error;

/// Listener lifecycle errors
#[derive(Error, Debug)]
pub enum ListenerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read local address: {0}")]
    LocalAddr(#[source] std::io::Error),

    #[error("Receive error: {0}")]
    Receive(#[source] std::io::Error),

    #[error("Send error: {0}")]
    Send(#[source] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Power action invocation errors
///
/// Only produced when the strict execution policy is enabled.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    ExitStatus {
        program: String,
        status: std::process::ExitStatus,
    },
}

/// Payload decoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Payload is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
