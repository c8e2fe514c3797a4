use bailey_core_store::Error as StoreError;

/// Transport-level failures talking to a remote store.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("unexpected HTTP status: {status}")]
    Status { status: reqwest::StatusCode },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Short machine-readable label, used as the remote fault code.
    pub fn code(&self) -> String {
        match self {
            Error::Http(_) => "transport".to_string(),
            Error::UrlParse(_) => "invalid_url".to_string(),
            Error::Status { status } => format!("http_{}", status.as_u16()),
            Error::Json(_) => "malformed_reply".to_string(),
            Error::Io(_) => "io".to_string(),
        }
    }
}

impl From<Error> for StoreError {
    fn from(error: Error) -> Self {
        StoreError::RemoteFault {
            code: error.code(),
            message: error.to_string(),
        }
    }
}
