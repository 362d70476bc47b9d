use audioscroll_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    /// Target of a point read or update does not exist. The payload is
    /// the display name of the entity ("Banner", "Spotlight").
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A spotlight references an audiobook snippet that does not resolve.
    #[error("Audiobook snippet not found")]
    SnippetNotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("malformed {0} document: {1}")]
    Decode(&'static str, String),
}
