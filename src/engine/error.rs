use thiserror::Error;

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Every way a single exchange with the story service can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoryError {
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("No generated text in response")]
    MissingText,

    #[error("{}", non_empty_or_fallback(.0))]
    Network(String),

    #[error("{}", non_empty_or_fallback(.0))]
    Decode(String),
}

fn non_empty_or_fallback(message: &str) -> &str {
    if message.trim().is_empty() {
        UNEXPECTED_ERROR
    } else {
        message
    }
}
