//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Errors: Listener, action, decode and config errors
//! - Messaging: Payload parsing and command dispatching

pub mod errors;
pub mod messaging;
