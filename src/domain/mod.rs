//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Command tokens and the power action set
//! - Traits: Abstractions for infrastructure (PowerControl)

pub mod entities;
pub mod traits;
