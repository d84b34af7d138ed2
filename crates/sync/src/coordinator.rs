//! The sync coordinator: one owner for all published content.
//!
//! [`SyncCoordinator`] hydrates in-memory state from the local snapshot
//! store and mirrors every accepted write back into it. When a remote
//! document store is configured, the content watcher replaces state
//! wholesale with each remote snapshot. Consumers read through its
//! getters and subscribe to [`ContentEvent`]s; nothing else mutates the
//! state.
//!
//! Writes follow a cache-aside discipline: with a remote store configured
//! the write goes there first and the local mirror is only updated on
//! success, so a failed remote write surfaces as an `Err` instead of a
//! silently diverging local copy. Without a remote store, writes land in
//! the local store directly.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::RwLock;

use atelier_core::content::{AboutInfo, ContactInfo, Project, ThemeConfig};
use atelier_core::review::{self, NewReview, Review};
use atelier_core::types::Language;
use atelier_store::local::{self, KEY_ABOUT, KEY_CONTACT, KEY_PROJECTS, KEY_THEME};
use atelier_store::remote::{COLLECTION_COMMENTS, COLLECTION_GENERAL, COLLECTION_PROJECTS};
use atelier_store::{Document, DocumentStore, LocalStore, StoreError};

use crate::error::SyncError;
use crate::events::{ContentEvent, ContentEvents};
use crate::state::{union_with_seed, ContentState};

/// Document id of the about singleton in the `general` collection.
const DOC_ABOUT: &str = "about";
/// Document id of the contact singleton in the `general` collection.
const DOC_CONTACT: &str = "contact";
/// Document id of the theme singleton in the `general` collection.
const DOC_THEME: &str = "theme";

// ---------------------------------------------------------------------------
// SyncCoordinator
// ---------------------------------------------------------------------------

pub struct SyncCoordinator {
    local: LocalStore,
    remote: Option<Arc<dyn DocumentStore>>,
    state: RwLock<ContentState>,
    events: ContentEvents,
}

impl SyncCoordinator {
    /// Build a coordinator over the given stores, hydrating state from
    /// local snapshots (or compiled-in defaults where none exist).
    ///
    /// `remote: None` selects offline mode; every operation keeps working
    /// against the local store alone.
    pub fn new(local: LocalStore, remote: Option<Arc<dyn DocumentStore>>) -> Self {
        let state = ContentState::hydrate(&local);
        tracing::info!(
            projects = state.projects.len(),
            online = remote.is_some(),
            "Content state hydrated"
        );
        Self {
            local,
            remote,
            state: RwLock::new(state),
            events: ContentEvents::default(),
        }
    }

    /// Whether a remote document store is configured.
    pub fn is_online(&self) -> bool {
        self.remote.is_some()
    }

    pub(crate) fn remote(&self) -> Option<&Arc<dyn DocumentStore>> {
        self.remote.as_ref()
    }

    /// Subscribe to content change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ContentEvent> {
        self.events.subscribe()
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn projects(&self) -> Vec<Project> {
        self.state.read().await.projects.clone()
    }

    pub async fn project(&self, id: &str) -> Option<Project> {
        self.state
            .read()
            .await
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn about(&self) -> AboutInfo {
        self.state.read().await.about.clone()
    }

    pub async fn contact(&self) -> ContactInfo {
        self.state.read().await.contact.clone()
    }

    pub async fn theme(&self) -> ThemeConfig {
        self.state.read().await.theme.clone()
    }

    // -----------------------------------------------------------------------
    // Remote snapshot application (driven by the content watcher)
    // -----------------------------------------------------------------------

    /// Replace the projects list with a remote snapshot, unioned with the
    /// compiled-in seeds, and write it through to the local store. Emits
    /// only when the merged list differs from current state. Driven by
    /// the content watcher.
    pub async fn apply_projects_snapshot(&self, documents: Vec<Document>) {
        let mut projects: Vec<Project> = documents.into_iter().filter_map(decode_project).collect();
        // Newest first, like the gallery renders them.
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let merged = union_with_seed(projects);

        let mut state = self.state.write().await;
        if state.projects == merged {
            return;
        }
        state.projects = merged;
        self.persist(KEY_PROJECTS, &state.projects);
        drop(state);
        self.events.publish(ContentEvent::ProjectsChanged);
    }

    /// Apply a snapshot of the `general` collection. Each known singleton
    /// replaces its in-memory counterpart wholesale and is written through
    /// to the local store; unknown document ids are ignored. Driven by
    /// the content watcher.
    pub async fn apply_general_snapshot(&self, documents: Vec<Document>) {
        for doc in documents {
            match doc.id.as_str() {
                DOC_ABOUT => {
                    if let Some(about) = decode_fields::<AboutInfo>(&doc) {
                        let mut state = self.state.write().await;
                        if state.about != about {
                            state.about = about;
                            self.persist(KEY_ABOUT, &state.about);
                            drop(state);
                            self.events.publish(ContentEvent::AboutChanged);
                        }
                    }
                }
                DOC_CONTACT => {
                    if let Some(contact) = decode_fields::<ContactInfo>(&doc) {
                        let mut state = self.state.write().await;
                        if state.contact != contact {
                            state.contact = contact;
                            self.persist(KEY_CONTACT, &state.contact);
                            drop(state);
                            self.events.publish(ContentEvent::ContactChanged);
                        }
                    }
                }
                DOC_THEME => {
                    if let Some(theme) = decode_fields::<ThemeConfig>(&doc) {
                        let mut state = self.state.write().await;
                        if state.theme != theme {
                            state.theme = theme;
                            self.persist(KEY_THEME, &state.theme);
                            drop(state);
                            self.events.publish(ContentEvent::ThemeChanged);
                        }
                    }
                }
                other => {
                    tracing::debug!(id = other, "Ignoring unknown general document");
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Admin writes
    // -----------------------------------------------------------------------

    /// Create or overwrite a project.
    ///
    /// A project with an empty or `"new"` id is created: the remote store
    /// assigns the document id, or a UUID is generated offline. Returns
    /// the stored project including its final id.
    pub async fn save_project(&self, mut project: Project) -> Result<Project, SyncError> {
        let now = chrono::Utc::now();
        project.updated_at = Some(now);
        if project.is_new() {
            project.created_at = Some(now);
        }

        if let Some(remote) = &self.remote {
            let fields = document_fields(&project)?;
            let existing_id = (!project.is_new()).then_some(project.id.as_str());
            match remote.upsert(COLLECTION_PROJECTS, existing_id, &fields).await {
                Ok(id) => project.id = id,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to save project remotely");
                    return Err(e.into());
                }
            }
        } else if project.is_new() {
            project.id = uuid::Uuid::new_v4().to_string();
        }

        let mut state = self.state.write().await;
        match state.projects.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => *slot = project.clone(),
            None => state.projects.insert(0, project.clone()),
        }
        self.persist(KEY_PROJECTS, &state.projects);
        drop(state);
        self.events.publish(ContentEvent::ProjectsChanged);

        tracing::info!(id = %project.id, "Project saved");
        Ok(project)
    }

    /// Delete a project by id.
    ///
    /// A remote rejection (e.g. the document is already gone) is logged
    /// and treated as deleted; only transport failures surface as errors.
    pub async fn delete_project(&self, id: &str) -> Result<(), SyncError> {
        if let Some(remote) = &self.remote {
            match remote.remove(COLLECTION_PROJECTS, id).await {
                Ok(()) => {}
                Err(e @ StoreError::Rejected { .. }) => {
                    tracing::warn!(id, error = %e, "Remote rejected project delete, treating as removed");
                }
                Err(e) => {
                    tracing::error!(id, error = %e, "Failed to delete project remotely");
                    return Err(e.into());
                }
            }
        }

        let mut state = self.state.write().await;
        state.projects.retain(|p| p.id != id);
        self.persist(KEY_PROJECTS, &state.projects);
        drop(state);
        self.events.publish(ContentEvent::ProjectsChanged);

        tracing::info!(id, "Project deleted");
        Ok(())
    }

    /// Overwrite the about singleton.
    pub async fn save_about(&self, about: AboutInfo) -> Result<(), SyncError> {
        self.save_singleton(DOC_ABOUT, KEY_ABOUT, about, ContentEvent::AboutChanged, |state, about| {
            state.about = about
        })
        .await
    }

    /// Overwrite the contact singleton.
    pub async fn save_contact(&self, contact: ContactInfo) -> Result<(), SyncError> {
        self.save_singleton(
            DOC_CONTACT,
            KEY_CONTACT,
            contact,
            ContentEvent::ContactChanged,
            |state, contact| state.contact = contact,
        )
        .await
    }

    /// Overwrite the theme singleton.
    pub async fn save_theme(&self, theme: ThemeConfig) -> Result<(), SyncError> {
        self.save_singleton(DOC_THEME, KEY_THEME, theme, ContentEvent::ThemeChanged, |state, theme| {
            state.theme = theme
        })
        .await
    }

    async fn save_singleton<T>(
        &self,
        doc_id: &str,
        key: &str,
        value: T,
        event: ContentEvent,
        assign: impl FnOnce(&mut ContentState, T),
    ) -> Result<(), SyncError>
    where
        T: serde::Serialize + Clone,
    {
        if let Some(remote) = &self.remote {
            let fields = document_fields(&value)?;
            if let Err(e) = remote.upsert(COLLECTION_GENERAL, Some(doc_id), &fields).await {
                tracing::error!(doc_id, error = %e, "Failed to save singleton remotely");
                return Err(e.into());
            }
        }

        let mut state = self.state.write().await;
        assign(&mut state, value.clone());
        self.persist(key, &value);
        drop(state);
        self.events.publish(event);

        tracing::info!(doc_id, "Singleton saved");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reviews
    // -----------------------------------------------------------------------

    /// Reviews shown on a project page: visitor submissions unioned with
    /// the reviews embedded in the project document, newest first.
    ///
    /// A remote fetch failure is logged and degrades to the embedded
    /// reviews only; the public page never errors over it.
    pub async fn reviews_for(&self, project_id: &str) -> Vec<Review> {
        let mut reviews = match &self.remote {
            Some(remote) => match remote.list(COLLECTION_COMMENTS).await {
                Ok(documents) => documents
                    .into_iter()
                    .filter_map(decode_review)
                    .filter(|r| r.project_id == project_id)
                    .collect(),
                Err(e) => {
                    tracing::warn!(project_id, error = %e, "Failed to fetch reviews, showing embedded only");
                    Vec::new()
                }
            },
            None => self
                .local
                .load(&local::comments_key(project_id))
                .unwrap_or_default(),
        };

        if let Some(project) = self.project(project_id).await {
            reviews.extend(project.reviews);
        }
        review::sort_newest_first(&mut reviews);
        reviews
    }

    /// Validate and persist a visitor review.
    ///
    /// Incomplete submissions (no stars, blank text) are rejected before
    /// any write. A blank name falls back to the per-language visitor
    /// label.
    pub async fn submit_review(
        &self,
        project_id: &str,
        submission: NewReview,
        lang: Language,
    ) -> Result<Review, SyncError> {
        review::validate_review(&submission)?;

        let user_name = if submission.user_name.trim().is_empty() {
            review::default_visitor_name(lang).to_string()
        } else {
            submission.user_name.trim().to_string()
        };

        let mut stored = Review {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: project_id.to_string(),
            user_name,
            rating: submission.rating,
            text: submission.text.trim().to_string(),
            created_at: Some(chrono::Utc::now()),
        };

        match &self.remote {
            Some(remote) => {
                let fields = document_fields(&stored)?;
                match remote.upsert(COLLECTION_COMMENTS, None, &fields).await {
                    Ok(id) => stored.id = id,
                    Err(e) => {
                        tracing::error!(project_id, error = %e, "Failed to submit review remotely");
                        return Err(e.into());
                    }
                }
            }
            None => {
                let key = local::comments_key(project_id);
                let mut existing: Vec<Review> = self.local.load(&key).unwrap_or_default();
                existing.insert(0, stored.clone());
                self.local.save(&key, &existing)?;
            }
        }

        tracing::info!(project_id, rating = stored.rating, "Review submitted");
        Ok(stored)
    }

    /// Every visitor review across all projects, newest first, for the
    /// admin moderation view.
    pub async fn all_reviews(&self) -> Result<Vec<Review>, SyncError> {
        let mut reviews = match &self.remote {
            Some(remote) => remote
                .list(COLLECTION_COMMENTS)
                .await?
                .into_iter()
                .filter_map(decode_review)
                .collect(),
            None => {
                let mut reviews = Vec::new();
                for key in self.local.keys_with_prefix(local::COMMENTS_KEY_PREFIX) {
                    let project_id = key.trim_start_matches(local::COMMENTS_KEY_PREFIX);
                    let stored: Vec<Review> = self.local.load(&key).unwrap_or_default();
                    reviews.extend(stored.into_iter().map(|mut r| {
                        if r.project_id.is_empty() {
                            r.project_id = project_id.to_string();
                        }
                        r
                    }));
                }
                reviews
            }
        };

        review::sort_newest_first(&mut reviews);
        Ok(reviews)
    }

    /// Remove a visitor review. `project_id` locates the offline key; a
    /// remote rejection is treated as already deleted.
    pub async fn delete_review(&self, id: &str, project_id: &str) -> Result<(), SyncError> {
        match &self.remote {
            Some(remote) => match remote.remove(COLLECTION_COMMENTS, id).await {
                Ok(()) => {}
                Err(e @ StoreError::Rejected { .. }) => {
                    tracing::warn!(id, error = %e, "Remote rejected review delete, treating as removed");
                }
                Err(e) => {
                    tracing::error!(id, error = %e, "Failed to delete review remotely");
                    return Err(e.into());
                }
            },
            None => {
                let key = local::comments_key(project_id);
                let mut existing: Vec<Review> = self.local.load(&key).unwrap_or_default();
                existing.retain(|r| r.id != id);
                self.local.save(&key, &existing)?;
            }
        }

        tracing::info!(id, project_id, "Review deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Mirror a value into the local snapshot store. The snapshot is a
    /// cache of already-accepted state, so a persistence failure is
    /// logged rather than propagated.
    fn persist<T: serde::Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.local.save(key, value) {
            tracing::error!(key, error = %e, "Failed to persist local snapshot");
        }
    }
}

// ---------------------------------------------------------------------------
// Document mapping
// ---------------------------------------------------------------------------

/// Serialize a value as document fields, dropping the `id` field: the id
/// lives in the document name, not its payload.
fn document_fields<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, SyncError> {
    let mut fields = serde_json::to_value(value)
        .map_err(|e| SyncError::Store(StoreError::Malformed(e.to_string())))?;
    if let Some(obj) = fields.as_object_mut() {
        obj.remove("id");
    }
    Ok(fields)
}

fn decode_project(doc: Document) -> Option<Project> {
    match serde_json::from_value::<Project>(doc.fields) {
        Ok(mut project) => {
            project.id = doc.id;
            Some(project)
        }
        Err(e) => {
            tracing::warn!(id = %doc.id, error = %e, "Skipping malformed project document");
            None
        }
    }
}

fn decode_review(doc: Document) -> Option<Review> {
    match serde_json::from_value::<Review>(doc.fields) {
        Ok(mut review) => {
            review.id = doc.id;
            Some(review)
        }
        Err(e) => {
            tracing::warn!(id = %doc.id, error = %e, "Skipping malformed review document");
            None
        }
    }
}

fn decode_fields<T: serde::de::DeserializeOwned>(doc: &Document) -> Option<T> {
    match serde_json::from_value(doc.fields.clone()) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(id = %doc.id, error = %e, "Skipping malformed singleton document");
            None
        }
    }
}
