pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate node id: {id}")]
    DuplicateNodeId { id: String },
}
