/// Convenience result type used across sparkfx.
pub type FxResult<T> = Result<T, FxError>;

/// Top-level error taxonomy.
///
/// Bad user-authored data (effect strings, unknown names, missing targets) never reaches this
/// type; it is absorbed where it happens. What remains are programming errors and I/O-ish
/// failures at the crate boundary.
#[derive(thiserror::Error, Debug)]
pub enum FxError {
    /// Invalid caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid configuration values.
    #[error("config error: {0}")]
    Config(String),

    /// A behavior wrapper was given something other than exactly one element child.
    #[error("invalid child: {0}")]
    InvalidChild(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FxError {
    /// Build a [`FxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FxError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FxError::InvalidChild`] value.
    pub fn invalid_child(msg: impl Into<String>) -> Self {
        Self::InvalidChild(msg.into())
    }

    /// Build a [`FxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for FxError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
