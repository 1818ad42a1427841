/// Result alias used across the crate.
pub type CalsheetResult<T> = Result<T, CalsheetError>;

#[derive(thiserror::Error, Debug)]
/// Error type for sheet generation, inspection and measurement checks.
pub enum CalsheetError {
    /// Configuration or input values are out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// A font source could not be loaded or parsed.
    #[error("font error: {0}")]
    Font(String),

    /// Text could not be shaped, measured or rasterised.
    #[error("text error: {0}")]
    Text(String),

    /// Reading or writing a sheet failed.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error with its context chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CalsheetError {
    /// Build a [`CalsheetError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CalsheetError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`CalsheetError::Text`].
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    /// Build a [`CalsheetError::Io`].
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
