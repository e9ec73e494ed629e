use thiserror::Error;

/// Errors that can arise while interacting with the game storage layer.
#[derive(Debug, Error)]
pub enum GameError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when fetching a record that is not present. Also returned for
    /// records owned by another account, so callers cannot distinguish
    /// "missing" from "not yours".
    #[error("not found: {0}")]
    NotFound(String),

    /// Returned when deserializing a record with an unexpected schema version.
    #[error("schema mismatch for {entity}: expected {expected}, got {found}")]
    SchemaMismatch {
        entity: &'static str,
        expected: u8,
        found: u8,
    },

    /// Malformed or out-of-range client input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Not enough coins or gems for a purchase.
    #[error("insufficient currency")]
    InsufficientFunds,

    /// Operation restricted to administrators.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Account is already on the guild roster.
    #[error("already a member")]
    AlreadyMember,

    /// Another account already registered this email.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Internal error (unexpected conditions).
    #[error("internal error: {0}")]
    Internal(String),
}
