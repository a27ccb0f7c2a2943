//! Payload parser - Turns raw datagram bytes into command tokens

use crate::application::errors::DecodeError;
use crate::domain::entities::CommandToken;

/// Decodes datagram payloads as UTF-8 and normalizes them
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadParser;

impl PayloadParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a raw payload into a normalized command token
    pub fn parse(&self, payload: &[u8]) -> Result<CommandToken, DecodeError> {
        let text = std::str::from_utf8(payload).map_err(|e| DecodeError::InvalidUtf8 {
            valid_up_to: e.valid_up_to(),
        })?;
        Ok(CommandToken::normalize(text))
    }
}
