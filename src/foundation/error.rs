/// Convenience result type used across inkstroke.
pub type InkResult<T> = Result<T, InkError>;

/// Error taxonomy for character and stroke construction.
///
/// Absent results (no matching stroke, stroke index out of range) are not errors and are
/// reported as `Option` by the APIs that produce them.
#[derive(thiserror::Error, Debug)]
pub enum InkError {
    /// Invalid caller-provided configuration or data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A path description could not be turned into a stroke.
    #[error("path error: {0}")]
    Path(String),

    /// Errors when serializing or deserializing options.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InkError {
    /// Build an [`InkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`InkError::Path`] value.
    pub fn path(msg: impl Into<String>) -> Self {
        Self::Path(msg.into())
    }

    /// Build an [`InkError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
