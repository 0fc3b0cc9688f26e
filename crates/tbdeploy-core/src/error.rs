use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No tags found; cannot determine the previous deployment")]
    NoTags,

    #[error("Command error: {0}")]
    Command(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
