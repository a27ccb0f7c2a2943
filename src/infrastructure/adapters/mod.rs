//! Network adapters

pub mod udp;

pub use udp::{send_command, UdpListener};
