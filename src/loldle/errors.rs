use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// A value passed the digit check but could not be converted.
    #[error("internal conversion error: {0}")]
    InternalConversion(String),
}
