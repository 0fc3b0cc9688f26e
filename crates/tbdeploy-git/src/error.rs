use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for tbdeploy_core::Error {
    fn from(err: Error) -> Self {
        tbdeploy_core::Error::Command(err.to_string())
    }
}
