//! Error codes for the crail API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. All
//! codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear
//! in HTTP responses.

use core::fmt;

/// Centralized error codes for the crail API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// No session cookie, or the cookie did not verify
    Unauthorized,
    /// Session cookie refers to a player that no longer exists
    UnknownPlayer,

    // Request validation
    /// Missing or malformed request field, or a precondition like
    /// "must be in a game" not met
    ValidationError,

    // Nonexistent referenced ids (client errors per the API contract)
    /// World id does not exist
    WorldNotFound,
    /// Game id does not exist
    GameNotFound,
    /// Contract id does not exist
    ContractNotFound,

    // System errors
    /// Database error
    DbError,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Invariant violation in stored data
    DataCorruption,
}

impl ErrorCode {
    /// Canonical SCREAMING_SNAKE_CASE string for this code — the exact
    /// string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::WorldNotFound => "WORLD_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::ContractNotFound => "CONTRACT_NOT_FOUND",
            Self::DbError => "DB_ERROR",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
