//! The boundary to the external managed document database.
//!
//! Consumers hold an `Option<Arc<dyn DocumentStore>>`: `None` is the
//! supported offline mode selected when credentials are absent, not an
//! error. Implementations do not retry; a failed call surfaces as a
//! [`StoreError`] and the sync layer decides whether to log-and-stall
//! (subscriptions) or propagate (admin writes).

use async_trait::async_trait;

use crate::error::StoreError;

/// Name of the portfolio projects collection.
pub const COLLECTION_PROJECTS: &str = "projects";

/// Name of the singleton collection keyed `about` / `contact` / `theme`.
pub const COLLECTION_GENERAL: &str = "general";

/// Name of the visitor reviews collection.
pub const COLLECTION_COMMENTS: &str = "comments";

/// One remote document: its id within the collection and its fields as
/// plain JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: serde_json::Value,
}

/// A cloud document database holding keyed-by-id collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in `collection`.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Create or overwrite a document.
    ///
    /// With `id: None` the store assigns an id and returns it; with
    /// `Some(id)` the document's fields are replaced wholesale.
    async fn upsert(
        &self,
        collection: &str,
        id: Option<&str>,
        fields: &serde_json::Value,
    ) -> Result<String, StoreError>;

    /// Delete a document. Implementations may reject an unknown id; the
    /// consumer treats that as already-deleted.
    async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}
