/// Convenience result type used across cardspin.
pub type CardspinResult<T> = Result<T, CardspinError>;

/// Top-level error taxonomy used by generation APIs.
#[derive(thiserror::Error, Debug)]
pub enum CardspinError {
    /// Non-positive fps/duration, canvas below the mode minimum, no mode selected.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A source or back image path does not exist.
    #[error("missing file: {0}")]
    MissingFile(String),

    /// The file exists but is not a loadable image.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// Temporary directories or frame files could not be created or written.
    #[error("resource failure: {0}")]
    ResourceFailure(String),

    /// The external encoder failed to start or exited non-zero.
    #[error("encoder failure: {message}{}", format_diagnostic(.diagnostic))]
    EncoderFailure {
        /// Human-readable summary.
        message: String,
        /// Raw diagnostic stream captured from the encoder, if any.
        diagnostic: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_diagnostic(diagnostic: &str) -> String {
    let trimmed = diagnostic.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

impl CardspinError {
    /// Build a [`CardspinError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`CardspinError::MissingFile`] value.
    pub fn missing_file(msg: impl Into<String>) -> Self {
        Self::MissingFile(msg.into())
    }

    /// Build a [`CardspinError::DecodeFailure`] value.
    pub fn decode_failure(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    /// Build a [`CardspinError::ResourceFailure`] value.
    pub fn resource_failure(msg: impl Into<String>) -> Self {
        Self::ResourceFailure(msg.into())
    }

    /// Build a [`CardspinError::EncoderFailure`] value.
    pub fn encoder_failure(msg: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::EncoderFailure {
            message: msg.into(),
            diagnostic: diagnostic.into(),
        }
    }

    /// Whether a back-face failure of this kind may degrade to single-sided output.
    pub fn is_recoverable_for_back_face(&self) -> bool {
        matches!(self, Self::MissingFile(_) | Self::DecodeFailure(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
