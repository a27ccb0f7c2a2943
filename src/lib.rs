//! Remote power-control listener
//!
//! Waits for short text commands on a UDP socket and maps each one onto a
//! shutdown, reboot, sleep or hibernate of the host machine.

pub mod domain;
pub mod application;
pub mod infrastructure;
