use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("PIVOTAL_TOKEN is not set")]
    MissingCredential,

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid project selection: {0}")]
    InvalidSelection(String),
}

impl From<roxmltree::Error> for TrackerError {
    fn from(err: roxmltree::Error) -> Self {
        TrackerError::MalformedResponse(err.to_string())
    }
}
