//! Domain types for the atelier content platform.
//!
//! Holds the content documents (projects, studio singletons, reviews),
//! the per-language text type with its fallback resolution, compiled-in
//! defaults, and input validation. Everything here is pure: no I/O, no
//! async.

pub mod content;
pub mod defaults;
pub mod error;
pub mod localized;
pub mod review;
pub mod types;
