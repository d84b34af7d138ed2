//! In-memory content state and its hydration from the local store.

use atelier_core::content::{AboutInfo, ContactInfo, Project, ThemeConfig};
use atelier_core::defaults;
use atelier_store::local::{KEY_ABOUT, KEY_CONTACT, KEY_PROJECTS, KEY_THEME};
use atelier_store::LocalStore;

/// The synchronized entities, owned by the coordinator and mutated only
/// through its methods.
#[derive(Debug, Clone)]
pub struct ContentState {
    pub projects: Vec<Project>,
    pub about: AboutInfo,
    pub contact: ContactInfo,
    pub theme: ThemeConfig,
}

impl ContentState {
    /// Populate state from the last-known-good local snapshots, falling
    /// back to the compiled-in seed gallery and default singletons for
    /// anything absent or malformed.
    pub fn hydrate(local: &LocalStore) -> Self {
        Self {
            projects: local
                .load(KEY_PROJECTS)
                .unwrap_or_else(defaults::seed_projects),
            about: local.load(KEY_ABOUT).unwrap_or_else(defaults::default_about),
            contact: local
                .load(KEY_CONTACT)
                .unwrap_or_else(defaults::default_contact),
            theme: local.load(KEY_THEME).unwrap_or_default(),
        }
    }
}

/// Append every compiled-in seed project whose id is absent from the
/// remote snapshot, so the gallery is never empty before any admin
/// content exists. Remote documents win on id collision.
pub fn union_with_seed(mut projects: Vec<Project>) -> Vec<Project> {
    for seed in defaults::seed_projects() {
        if !projects.iter().any(|p| p.id == seed.id) {
            projects.push(seed);
        }
    }
    projects
}
