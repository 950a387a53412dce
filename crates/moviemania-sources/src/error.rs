use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Provider answered with a non-success HTTP status
    #[error("provider returned HTTP {status}")]
    Http { status: u16 },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed provider response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Provider reported an empty result (`"Response": "False"`)
    #[error("{0}")]
    NotFound(String),

    /// Superseded by a newer request; never shown to the user
    #[error("request cancelled")]
    Cancelled,

    #[error("OMDb API key is not configured (set OMDB_API_KEY or run `moviemania config omdb`)")]
    MissingApiKey,
}
