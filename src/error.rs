use thiserror::Error;

/// Failures surfaced to callers of the analysis API.
///
/// Recoverable problems (a failed first model tier, a failed image call) are
/// absorbed inside [`crate::analysis::Analyzer`] and never show up here.
#[derive(Debug, Error)]
pub enum KaiError {
    #[error("Service is currently overloaded. Please try again in a few moments.")]
    ServiceUnavailable,

    #[error("No image data returned from API")]
    NoImageData,

    #[error("Image generation failed: {0}")]
    ImageGeneration(String),

    #[error("Expected {expected} answers, got {actual}")]
    InvalidAnswerCount { expected: usize, actual: usize },

    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
}
