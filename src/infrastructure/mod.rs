//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Power: OS-family action handlers
//! - Adapters: Network integration (UDP)

pub mod config;
pub mod power;
pub mod adapters;
