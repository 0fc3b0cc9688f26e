use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Teambox API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for tbdeploy_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Status { status, url } => tbdeploy_core::Error::Status { status, url },
            Error::Request(e) => tbdeploy_core::Error::Transport(e.to_string()),
            e @ Error::Decode { .. } => tbdeploy_core::Error::Decode(e.to_string()),
            Error::Config(msg) => tbdeploy_core::Error::Other(anyhow::anyhow!(msg)),
        }
    }
}
