use atelier_core::error::CoreError;
use atelier_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A domain-level error, typically rejected input.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store operation failed; the caller decides whether to retry or
    /// keep its optimistic state.
    #[error(transparent)]
    Store(#[from] StoreError),
}
