//! Snapshot of the types surface most callers need.
//! Prefer importing from this module instead of individual tree nodes when
//! working in the server or other presentation layers.

pub use super::attributes::{CodeName, FilmAttributes};
pub use super::ids::MediaId;
pub use super::media_format::{MediaCategory, MediaFormat};
pub use super::record::{MediaRecord, NewMediaRecord, SearchIndexEntry};
pub use super::titles::orderable_title;
