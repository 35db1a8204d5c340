/// Crate-wide result alias.
pub type ScrollFxResult<T> = Result<T, ScrollFxError>;

/// Errors produced while loading, validating, or parsing scene configuration.
///
/// Runtime playback never produces errors: missing elements and unmeasurable viewports degrade
/// to skipped work instead.
#[derive(thiserror::Error, Debug)]
pub enum ScrollFxError {
    /// Scene or value failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A scroll trigger position could not be parsed.
    #[error("trigger error: {0}")]
    Trigger(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error with preserved source.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollFxError {
    /// Build a [`ScrollFxError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollFxError::Trigger`].
    pub fn trigger(msg: impl Into<String>) -> Self {
        Self::Trigger(msg.into())
    }

    /// Build a [`ScrollFxError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
