mod error;
pub mod git;
pub mod runner;

pub use error::{Error, Result};
pub use git::GitRepository;
pub use runner::{CommandOutput, CommandRunner};
