//! Domain entities - Core business objects with no external dependencies

pub mod command;

pub use command::{CommandToken, PowerAction};
