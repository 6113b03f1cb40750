use thiserror::Error;

/// Failure of the single reasoning-service exchange.
///
/// Both variants route the pipeline to the keyword fallback; neither reaches
/// the caller as an error.
#[derive(Debug, Error)]
pub enum ReasoningError {
    /// Transport failure, timeout, or a non-success status.
    #[error("reasoning service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The service answered but no JSON object could be recovered.
    #[error("reasoning service returned malformed output: {0}")]
    MalformedOutput(String),
}

/// Errors from the news fetch collaborators.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {provider}")]
    UnexpectedStatus { provider: &'static str, status: u16 },

    #[error("{provider} response had no articles array")]
    MissingArticles { provider: &'static str },
}
