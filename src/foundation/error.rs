/// Crate-wide result alias.
pub type MorphResult<T> = Result<T, MorphError>;

/// Errors surfaced by the morph pipeline.
///
/// A rejected subject gate is not an error; see [`crate::MorphOutcome::NoSubject`].
#[derive(thiserror::Error, Debug)]
pub enum MorphError {
    /// Input contract violated (mismatched canvases, empty image, too few frames, ...).
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Input bytes are not a decodable image.
    #[error("decode error: {0}")]
    Decode(String),

    /// The subject detector could not produce a verdict.
    #[error("detector error: {0}")]
    Detector(String),

    /// The video sink could not be opened or a write failed.
    #[error("sink error: {0}")]
    Sink(String),

    /// Configuration could not be parsed or failed validation.
    #[error("config error: {0}")]
    Config(String),

    /// Anything else, usually IO with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphError {
    /// Build a [`MorphError::Precondition`].
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`MorphError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`MorphError::Detector`].
    pub fn detector(msg: impl Into<String>) -> Self {
        Self::Detector(msg.into())
    }

    /// Build a [`MorphError::Sink`].
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Build a [`MorphError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
