//! Core data model definitions shared across Reelshelf crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod attributes;
pub mod error;
pub mod ids;
pub mod media_format;
pub mod prelude;
pub mod record;
pub mod titles;

// Intentionally curated re-exports for downstream consumers.
pub use attributes::{CodeName, FilmAttributes};
pub use error::{ModelError, Result as ModelResult};
pub use ids::MediaId;
pub use media_format::{MediaCategory, MediaFormat};
pub use record::{MediaRecord, NewMediaRecord, SearchIndexEntry};
pub use titles::orderable_title;
