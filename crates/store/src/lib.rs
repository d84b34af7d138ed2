//! Persistence for the atelier content platform.
//!
//! Two halves: [`local::LocalStore`], the file-backed snapshot store that
//! keeps the site usable offline, and [`remote::DocumentStore`], the
//! boundary to the cloud document database with its Firestore
//! implementation in [`firestore`].

pub mod error;
pub mod firestore;
pub mod local;
pub mod remote;

pub use error::StoreError;
pub use firestore::{FirestoreConfig, FirestoreStore};
pub use local::LocalStore;
pub use remote::{Document, DocumentStore};
