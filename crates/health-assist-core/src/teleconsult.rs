//! Video-consultation room links.
//!
//! The typed room name is part of the launched URL. Names are reduced to
//! characters that are safe in a URL path segment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Room used when the user leaves the name blank.
pub const DEFAULT_ROOM: &str = "HealthAIConsultRoom";

/// Conferencing service the rooms live on.
pub const DEFAULT_MEET_BASE: &str = "https://meet.jit.si";

/// Teleconsultation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TeleconsultError {
    #[error("Room name has no usable characters: {0:?}")]
    InvalidRoomName(String),

    #[error("Meeting base URL must be http(s): {0}")]
    InvalidBaseUrl(String),
}

pub type TeleconsultResult<T> = Result<T, TeleconsultError>;

/// A sanitized conferencing room name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsultRoom {
    name: String,
}

impl Default for ConsultRoom {
    fn default() -> Self {
        Self {
            name: DEFAULT_ROOM.to_string(),
        }
    }
}

impl ConsultRoom {
    /// Parse a user-entered room name.
    ///
    /// Blank input selects [`DEFAULT_ROOM`]. Anything other than ASCII
    /// letters, digits, `-` and `_` is dropped.
    pub fn parse(input: &str) -> TeleconsultResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let name: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();

        if name.is_empty() {
            return Err(TeleconsultError::InvalidRoomName(input.to_string()));
        }

        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Room URL on the default conferencing service.
    pub fn url(&self) -> String {
        format!("{}/{}", DEFAULT_MEET_BASE, self.name)
    }

    /// Room URL on a custom conferencing service.
    pub fn url_on(&self, base: &str) -> TeleconsultResult<String> {
        let base = base.trim().trim_end_matches('/');
        let has_host = base
            .strip_prefix("https://")
            .or_else(|| base.strip_prefix("http://"))
            .is_some_and(|host| !host.is_empty());

        if !has_host {
            return Err(TeleconsultError::InvalidBaseUrl(base.to_string()));
        }

        Ok(format!("{}/{}", base, self.name))
    }
}
