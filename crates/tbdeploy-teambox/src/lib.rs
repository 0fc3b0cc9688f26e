pub mod client;
pub mod conversation;
pub mod error;

// Re-exports
pub use client::{TeamboxClient, TeamboxConfig, DEFAULT_API_BASE};
pub use conversation::NewConversation;
pub use error::{Error, Result};
