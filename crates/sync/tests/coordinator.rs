//! Integration tests for the sync coordinator in both offline mode and
//! against an in-memory document store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use tokio::sync::Mutex;

use atelier_core::content::{Project, ThemeConfig};
use atelier_core::defaults;
use atelier_core::localized::Localized;
use atelier_core::review::NewReview;
use atelier_core::types::Language;
use atelier_store::local::{comments_key, KEY_CONTACT, KEY_PROJECTS};
use atelier_store::remote::{COLLECTION_COMMENTS, COLLECTION_PROJECTS};
use atelier_store::{Document, DocumentStore, LocalStore, StoreError};
use atelier_sync::{ContentEvent, SyncCoordinator, SyncError};

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// In-memory document store standing in for the cloud database.
#[derive(Default)]
struct MemoryStore {
    collections: Mutex<BTreeMap<String, BTreeMap<String, serde_json::Value>>>,
    next_id: Mutex<u32>,
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn upsert(
        &self,
        collection: &str,
        id: Option<&str>,
        fields: &serde_json::Value,
    ) -> Result<String, StoreError> {
        let id = match id {
            Some(id) => id.to_string(),
            None => {
                let mut next = self.next_id.lock().await;
                *next += 1;
                format!("doc-{next}")
            }
        };
        self.collections
            .lock()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields.clone());
        Ok(id)
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().await;
        let removed = collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id));
        if removed.is_none() {
            return Err(StoreError::Rejected {
                status: 404,
                message: "no such document".to_string(),
            });
        }
        Ok(())
    }
}

/// A store whose writes always fail, for the remote-failure path.
struct FailingStore {
    called: AtomicBool,
}

impl FailingStore {
    fn new() -> Self {
        Self {
            called: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn list(&self, _collection: &str) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::Rejected {
            status: 503,
            message: "unavailable".to_string(),
        })
    }

    async fn upsert(
        &self,
        _collection: &str,
        _id: Option<&str>,
        _fields: &serde_json::Value,
    ) -> Result<String, StoreError> {
        self.called.store(true, Ordering::SeqCst);
        Err(StoreError::Rejected {
            status: 503,
            message: "unavailable".to_string(),
        })
    }

    async fn remove(&self, _collection: &str, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Rejected {
            status: 503,
            message: "unavailable".to_string(),
        })
    }
}

fn offline(dir: &tempfile::TempDir) -> SyncCoordinator {
    SyncCoordinator::new(LocalStore::open(dir.path()).unwrap(), None)
}

fn online(dir: &tempfile::TempDir, store: Arc<dyn DocumentStore>) -> SyncCoordinator {
    SyncCoordinator::new(LocalStore::open(dir.path()).unwrap(), Some(store))
}

fn new_project(title: &str) -> Project {
    Project {
        title: Localized::english(title),
        year: "2025".to_string(),
        ..Project::default()
    }
}

fn review(rating: u8, text: &str) -> NewReview {
    NewReview {
        rating,
        text: text.to_string(),
        ..NewReview::default()
    }
}

// ---------------------------------------------------------------------------
// Hydration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn offline_about_is_the_compiled_in_default() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = offline(&dir);

    let about = coordinator.about().await;
    assert_eq!(about.name.en, "Mariam Al-Haidari");
}

#[tokio::test]
async fn offline_gallery_starts_with_the_seed_projects() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = offline(&dir);

    let projects = coordinator.projects().await;
    assert_eq!(projects, defaults::seed_projects());
}

#[tokio::test]
async fn local_contact_snapshot_is_authoritative_until_remote_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let local = LocalStore::open(dir.path()).unwrap();
    local
        .save(KEY_CONTACT, &serde_json::json!({ "phone": "+1 555" }))
        .unwrap();

    let coordinator = offline(&dir);
    assert_eq!(coordinator.contact().await.phone, "+1 555");

    // A later remote snapshot replaces it.
    let store = Arc::new(MemoryStore::default());
    store
        .upsert(
            "general",
            Some("contact"),
            &serde_json::json!({ "phone": "+966 11 111 1111" }),
        )
        .await
        .unwrap();
    let coordinator = online(&dir, store.clone());
    let documents = store.list("general").await.unwrap();
    coordinator.apply_general_snapshot(documents).await;
    assert_eq!(coordinator.contact().await.phone, "+966 11 111 1111");
}

// ---------------------------------------------------------------------------
// Offline writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn offline_save_about_persists_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = offline(&dir);

    let mut about = coordinator.about().await;
    about.bio = Localized::english("Updated bio");
    coordinator.save_about(about).await.unwrap();

    let reopened = offline(&dir);
    assert_eq!(reopened.about().await.bio.en, "Updated bio");
}

#[tokio::test]
async fn offline_save_project_assigns_an_id_and_prepends() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = offline(&dir);

    let stored = coordinator.save_project(new_project("New Work")).await.unwrap();
    assert!(!stored.id.is_empty());
    assert!(stored.created_at.is_some());

    let projects = coordinator.projects().await;
    assert_eq!(projects[0].id, stored.id);
    assert_eq!(projects.len(), defaults::seed_projects().len() + 1);
}

#[tokio::test]
async fn offline_delete_project_removes_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = offline(&dir);

    coordinator.delete_project("p1").await.unwrap();
    assert!(coordinator.project("p1").await.is_none());

    let reopened = offline(&dir);
    assert!(reopened.project("p1").await.is_none());
}

#[tokio::test]
async fn save_theme_emits_a_change_event() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = offline(&dir);
    let mut events = coordinator.subscribe();

    let theme = ThemeConfig {
        serif: "Playfair Display".to_string(),
        ..ThemeConfig::default()
    };
    coordinator.save_theme(theme).await.unwrap();

    assert_eq!(events.recv().await.unwrap(), ContentEvent::ThemeChanged);
}

// ---------------------------------------------------------------------------
// Online writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn online_save_project_uses_the_store_assigned_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::default());
    let coordinator = online(&dir, store.clone());

    let stored = coordinator.save_project(new_project("Cloud Work")).await.unwrap();
    assert_eq!(stored.id, "doc-1");

    // Written through to both stores.
    let remote = store.list(COLLECTION_PROJECTS).await.unwrap();
    assert_eq!(remote.len(), 1);
    let snapshot: Vec<Project> = LocalStore::open(dir.path())
        .unwrap()
        .load(KEY_PROJECTS)
        .unwrap();
    assert!(snapshot.iter().any(|p| p.id == "doc-1"));
}

#[tokio::test]
async fn online_save_about_failure_leaves_state_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let failing = Arc::new(FailingStore::new());
    let coordinator = online(&dir, failing.clone());

    let mut about = coordinator.about().await;
    about.bio = Localized::english("Will not stick");
    let result = coordinator.save_about(about).await;

    assert_matches!(result, Err(SyncError::Store(_)));
    assert!(failing.called.load(Ordering::SeqCst));
    assert_eq!(
        coordinator.about().await.bio,
        defaults::default_about().bio,
        "failed remote write must not mutate local state"
    );
}

#[tokio::test]
async fn online_delete_of_unknown_project_is_treated_as_removed() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = online(&dir, Arc::new(MemoryStore::default()));

    // MemoryStore rejects unknown ids; the coordinator logs and proceeds.
    coordinator.delete_project("p1").await.unwrap();
    assert!(coordinator.project("p1").await.is_none());
}

// ---------------------------------------------------------------------------
// Snapshot application
// ---------------------------------------------------------------------------

#[tokio::test]
async fn projects_snapshot_is_unioned_with_seeds_and_written_through() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::default());
    store
        .upsert(
            COLLECTION_PROJECTS,
            Some("abc"),
            &serde_json::json!({ "title": { "en": "Remote Work" } }),
        )
        .await
        .unwrap();

    let coordinator = online(&dir, store.clone());
    let mut events = coordinator.subscribe();
    let documents = store.list(COLLECTION_PROJECTS).await.unwrap();
    coordinator.apply_projects_snapshot(documents).await;

    let projects = coordinator.projects().await;
    let ids: Vec<&str> = projects.iter().map(|p| p.id.as_str()).collect();
    assert!(ids.contains(&"abc"));
    for seed in defaults::seed_projects() {
        assert!(ids.contains(&seed.id.as_str()));
    }
    assert_eq!(events.recv().await.unwrap(), ContentEvent::ProjectsChanged);

    let snapshot: Vec<Project> = LocalStore::open(dir.path())
        .unwrap()
        .load(KEY_PROJECTS)
        .unwrap();
    assert_eq!(snapshot.len(), projects.len());
}

#[tokio::test]
async fn identical_snapshot_emits_no_event() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = online(&dir, Arc::new(MemoryStore::default()));
    let mut events = coordinator.subscribe();

    // An empty remote store unions to exactly the seed list already held.
    coordinator.apply_projects_snapshot(Vec::new()).await;
    assert_matches!(
        events.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    );
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[tokio::test]
async fn incomplete_reviews_are_rejected_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = offline(&dir);

    let zero_stars = coordinator
        .submit_review("p1", review(0, "Lovely"), Language::En)
        .await;
    assert_matches!(zero_stars, Err(SyncError::Core(_)));

    let blank_text = coordinator
        .submit_review("p1", review(4, "   "), Language::En)
        .await;
    assert_matches!(blank_text, Err(SyncError::Core(_)));

    // Nothing was persisted.
    let local = LocalStore::open(dir.path()).unwrap();
    assert!(local.load::<serde_json::Value>(&comments_key("p1")).is_none());
}

#[tokio::test]
async fn offline_review_round_trip_with_default_visitor_name() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = offline(&dir);

    let stored = coordinator
        .submit_review("p1", review(5, "Stunning"), Language::Ar)
        .await
        .unwrap();
    assert_eq!(stored.user_name, "زائر");

    let reviews = coordinator.reviews_for("p1").await;
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].rating, 5);
    assert_eq!(reviews[0].text, "Stunning");
}

#[tokio::test]
async fn reviews_come_back_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = offline(&dir);

    coordinator
        .submit_review("p1", review(3, "first"), Language::En)
        .await
        .unwrap();
    coordinator
        .submit_review("p1", review(4, "second"), Language::En)
        .await
        .unwrap();

    let reviews = coordinator.reviews_for("p1").await;
    assert_eq!(reviews[0].text, "second");
    assert_eq!(reviews[1].text, "first");
}

#[tokio::test]
async fn moderation_view_gathers_reviews_across_projects() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = offline(&dir);

    coordinator
        .submit_review("p1", review(5, "villa"), Language::En)
        .await
        .unwrap();
    coordinator
        .submit_review("p2", review(2, "loft"), Language::En)
        .await
        .unwrap();

    let all = coordinator.all_reviews().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|r| r.project_id == "p1"));
    assert!(all.iter().any(|r| r.project_id == "p2"));
}

#[tokio::test]
async fn deleting_a_review_removes_it_from_the_offline_key() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = offline(&dir);

    let stored = coordinator
        .submit_review("p1", review(1, "meh"), Language::En)
        .await
        .unwrap();
    coordinator.delete_review(&stored.id, "p1").await.unwrap();

    assert!(coordinator.reviews_for("p1").await.is_empty());
}

#[tokio::test]
async fn online_review_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::default());
    let coordinator = online(&dir, store.clone());

    let stored = coordinator
        .submit_review("p1", review(4, "From the cloud"), Language::Tr)
        .await
        .unwrap();
    assert_eq!(stored.id, "doc-1");

    let reviews = coordinator.reviews_for("p1").await;
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].user_name, "Ziyaretçi");

    // Reviews for other projects do not leak in.
    assert!(coordinator.reviews_for("p2").await.is_empty());

    coordinator.delete_review("doc-1", "p1").await.unwrap();
    assert!(store.list(COLLECTION_COMMENTS).await.unwrap().is_empty());
}
