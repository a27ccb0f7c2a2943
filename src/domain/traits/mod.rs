//! Domain traits - Abstractions implemented by infrastructure

pub mod power;

pub use power::PowerControl;
