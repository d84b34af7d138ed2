#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Remote store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Remote store rejected the operation: {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("Local store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
